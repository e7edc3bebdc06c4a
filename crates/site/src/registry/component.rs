//! The renderable abstraction every binding resolves to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A component prop value - either a literal string or a JS expression.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PropValue {
    /// A literal string value (from key="value").
    Literal {
        /// The attribute text.
        value: String,
    },
    /// A JS expression (from key={expression}).
    Expression {
        /// The expression source, without braces.
        value: String,
    },
}

impl PropValue {
    /// Creates a literal string prop value.
    pub fn literal(value: impl Into<String>) -> Self {
        PropValue::Literal {
            value: value.into(),
        }
    }

    /// Creates an expression prop value.
    pub fn expression(value: impl Into<String>) -> Self {
        PropValue::Expression {
            value: value.into(),
        }
    }

    /// Returns the raw value regardless of type.
    pub fn value(&self) -> &str {
        match self {
            PropValue::Literal { value } | PropValue::Expression { value } => value,
        }
    }
}

/// Props passed to a component, ordered by name.
pub type Props = BTreeMap<String, PropValue>;

/// A unit of rendering logic: takes props and already-rendered children, produces markup.
///
/// Implementations live outside this crate (the site's link renderer, code box, download
/// table, ...). They must be shareable across threads since one resolver serves every
/// concurrent render.
pub trait Component: Send + Sync {
    /// Display name, used in logs and by placeholder output.
    fn name(&self) -> &str;

    /// Renders the component with the given props around `children`.
    fn render(&self, props: &Props, children: &str) -> String;
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({})", self.name())
    }
}

/// Shared handle to a component. Identity is pointer identity (`Arc::ptr_eq`).
pub type ComponentRef = Arc<dyn Component>;

/// Stand-in component that re-emits its invocation as a JSX-style element.
///
/// `<Banner kind="info">...</Banner>` comes out unchanged, leaving the real component
/// for a downstream JSX runtime to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementComponent {
    name: String,
}

impl ElementComponent {
    /// Creates a placeholder emitting `<name ...>` elements.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Wraps a placeholder into a shareable [`ComponentRef`].
    pub fn shared(name: impl Into<String>) -> ComponentRef {
        Arc::new(Self::new(name))
    }
}

impl Component for ElementComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, props: &Props, children: &str) -> String {
        write_element(&self.name, props, children)
    }
}

/// Serializes `<tag key="literal" key={expression}>children</tag>`.
pub fn write_element(tag: &str, props: &Props, children: &str) -> String {
    let mut out = open_tag(tag, props);
    out.push('>');
    out.push_str(children);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    out
}

/// Serializes a self-closing `<tag key="literal" />`.
pub fn write_void_element(tag: &str, props: &Props) -> String {
    let mut out = open_tag(tag, props);
    out.push_str(" />");
    out
}

fn open_tag(tag: &str, props: &Props) -> String {
    let mut out = String::with_capacity(tag.len() + 16 * props.len() + 1);
    out.push('<');
    out.push_str(tag);
    for (key, value) in props {
        out.push(' ');
        out.push_str(key);
        match value {
            PropValue::Literal { value } => {
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(value));
                out.push('"');
            }
            PropValue::Expression { value } => {
                out.push_str("={");
                out.push_str(value);
                out.push('}');
            }
        }
    }
    out
}
