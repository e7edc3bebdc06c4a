//! Rendering context for the mdast renderer.

use super::Options;
use crate::registry::TagResolver;
use markdown::mdast::Node;
use std::collections::HashMap;

/// The kind of element currently being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Document root or the body of a component.
    Block,
    /// Inside a list; `spread` is false for tight lists.
    List { spread: bool },
}

/// Output buffer plus the scope stack for one document.
pub struct Context<'a> {
    resolver: &'a TagResolver,
    options: &'a Options,
    html: String,
    scopes: Vec<Scope>,
    /// Link reference definitions: identifier -> (url, title).
    definitions: HashMap<String, (String, Option<String>)>,
    /// Footnote identifiers in order of first reference.
    footnote_order: Vec<String>,
    /// Footnote identifier -> number of references seen so far.
    footnote_refs: HashMap<String, usize>,
    /// Footnote identifier -> rendered definition content.
    footnotes: HashMap<String, String>,
}

impl<'a> Context<'a> {
    /// Creates a context rendering against `resolver`.
    pub fn new(resolver: &'a TagResolver, options: &'a Options) -> Self {
        Self {
            resolver,
            options,
            html: String::new(),
            scopes: vec![Scope::Block],
            definitions: HashMap::new(),
            footnote_order: Vec::new(),
            footnote_refs: HashMap::new(),
            footnotes: HashMap::new(),
        }
    }

    /// Records every `[label]: url` definition in the tree so references resolve
    /// regardless of where the definition appears.
    pub fn collect_definitions(&mut self, node: &Node) {
        if let Node::Definition(def) = node {
            self.definitions
                .entry(def.identifier.clone())
                .or_insert_with(|| (def.url.clone(), def.title.clone()));
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    /// Looks up a link reference definition.
    pub fn definition(&self, identifier: &str) -> Option<(String, Option<String>)> {
        self.definitions.get(identifier).cloned()
    }

    /// The tag table in use. Not tied to the borrow of `self`.
    pub fn resolver(&self) -> &'a TagResolver {
        self.resolver
    }

    pub fn raw_html_allowed(&self) -> bool {
        self.options.allow_raw_html
    }

    /// Appends markup verbatim.
    pub fn push_raw(&mut self, html: &str) {
        self.html.push_str(html);
    }

    /// Appends text, HTML-escaped.
    pub fn push_text(&mut self, text: &str) {
        self.html.push_str(&html_escape::encode_text(text));
    }

    /// Appends a double-quoted attribute value, escaped.
    pub fn push_attr_value(&mut self, value: &str) {
        self.html
            .push_str(&html_escape::encode_double_quoted_attribute(value));
    }

    pub fn enter(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    pub fn exit(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// True when paragraphs should drop their `<p>` wrapper.
    pub fn is_in_tight_list(&self) -> bool {
        matches!(self.scopes.last(), Some(Scope::List { spread: false }))
    }

    /// Renders `f` into a fresh buffer under a block scope and returns the markup.
    ///
    /// Used for component children, which are handed to the component as a string.
    pub fn capture(&mut self, f: impl FnOnce(&mut Self)) -> String {
        let outer = std::mem::take(&mut self.html);
        self.enter(Scope::Block);
        f(self);
        self.exit();
        std::mem::replace(&mut self.html, outer)
    }

    /// Records a reference to footnote `id`, returning its ordinal and how many
    /// times it has now been referenced (both 1-based).
    pub fn reference_footnote(&mut self, id: &str) -> (usize, usize) {
        let ordinal = match self.footnote_order.iter().position(|seen| seen == id) {
            Some(index) => index + 1,
            None => {
                self.footnote_order.push(id.to_string());
                self.footnote_order.len()
            }
        };
        let count = self.footnote_refs.entry(id.to_string()).or_insert(0);
        *count += 1;
        (ordinal, *count)
    }

    /// Stores a rendered footnote definition for the section emitted by [`finish`](Self::finish).
    pub fn push_footnote(&mut self, id: &str, content: String) {
        self.footnotes.entry(id.to_string()).or_insert(content);
    }

    /// Consumes the context, returning the rendered markup.
    ///
    /// Referenced footnotes are appended as a single section, numbered by first
    /// reference. Definitions nothing references are dropped.
    pub fn finish(mut self) -> String {
        let mut items = String::new();
        for (index, id) in self.footnote_order.iter().enumerate() {
            let Some(content) = self.footnotes.get(id) else {
                log::warn!("Footnote [^{}] is referenced but never defined", id);
                continue;
            };
            let safe_id = footnote_id(id);
            items.push_str(&format!("<li id=\"user-content-fn-{}\">{}", safe_id, content));
            let refs = self.footnote_refs.get(id).copied().unwrap_or(1);
            for n in 1..=refs {
                let suffix = if n == 1 { String::new() } else { format!("-{}", n) };
                items.push_str(&format!(
                    " <a href=\"#user-content-fnref-{}{}\" data-footnote-backref aria-label=\"Back to reference {}\">↩</a>",
                    safe_id,
                    suffix,
                    index + 1
                ));
            }
            items.push_str("</li>");
        }

        if !items.is_empty() {
            self.html.push_str(concat!(
                "<section data-footnotes class=\"footnotes\">",
                "<h2 class=\"sr-only\" id=\"footnote-label\">Footnotes</h2><ol>"
            ));
            self.html.push_str(&items);
            self.html.push_str("</ol></section>");
        }
        self.html
    }
}

/// Footnote identifier made safe for `id`/`href` attributes.
pub fn footnote_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
