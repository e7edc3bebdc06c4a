//! Tag name to component bindings for MDX rendering.

use super::component::{ComponentRef, Props};
use super::components::ComponentSet;
use crate::config::SiteConfig;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Class carried by the pre-redesign blockquote container.
pub const HIGHLIGHT_BOX_CLASS: &str = "highlight-box";

/// Which generation of the site's tag table to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Release-aware shortcodes, code tabs, and the `pre` code box override.
    #[default]
    Current,
    /// API version links shortcode; no `pre` override.
    Legacy,
}

impl Variant {
    /// Shortcode names bound in `mdx_components`, in declaration order.
    pub fn shortcodes(self) -> &'static [&'static str] {
        match self {
            Variant::Current => &[
                "WithNodeRelease",
                "HomeDownloadButton",
                "DownloadReleasesTable",
                "Banner",
                "CodeTabs",
            ],
            Variant::Legacy => &[
                "NodeApiVersionLinks",
                "DownloadReleasesTable",
                "Banner",
                "HomeDownloadButton",
            ],
        }
    }

    /// HTML tags overridden in `html_components`.
    pub fn html_overrides(self) -> &'static [&'static str] {
        match self {
            Variant::Current => &["a", "blockquote", "pre"],
            Variant::Legacy => &["a", "blockquote"],
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(Variant::Current),
            "legacy" => Ok(Variant::Legacy),
            other => Err(format!("unknown tag table variant '{other}'")),
        }
    }
}

/// What a tag renders through.
#[derive(Clone)]
pub enum Binding {
    /// A site component, invoked with the element's props and children.
    Component(ComponentRef),
    /// `<div class="highlight-box">` around the children, nothing else.
    ///
    /// Stands in for `blockquote` until the website redesign ships; remove it once
    /// the redesign flag is permanently on.
    HighlightBox,
    /// Forwards every prop and the children, untouched, to the wrapped component.
    PassThrough(ComponentRef),
}

impl Binding {
    /// Renders the bound element.
    pub fn render(&self, props: &Props, children: &str) -> String {
        match self {
            Binding::Component(component) => component.render(props, children),
            Binding::HighlightBox => {
                format!("<div class=\"{HIGHLIGHT_BOX_CLASS}\">{children}</div>")
            }
            Binding::PassThrough(target) => target.render(props, children),
        }
    }

    /// The component ultimately rendering this binding, if any.
    pub fn target(&self) -> Option<&ComponentRef> {
        match self {
            Binding::Component(component) | Binding::PassThrough(component) => Some(component),
            Binding::HighlightBox => None,
        }
    }

    /// True when this is a direct binding to exactly `component`.
    pub fn is(&self, component: &ComponentRef) -> bool {
        matches!(self, Binding::Component(bound) if Arc::ptr_eq(bound, component))
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Component(c) => write!(f, "Component({})", c.name()),
            Binding::HighlightBox => f.write_str("HighlightBox"),
            Binding::PassThrough(c) => write!(f, "PassThrough({})", c.name()),
        }
    }
}

/// An immutable tag name to [`Binding`] table.
#[derive(Debug, Clone, Default)]
pub struct TagMap {
    entries: BTreeMap<&'static str, Binding>,
}

impl TagMap {
    /// Looks up the binding for `tag`.
    pub fn get(&self, tag: &str) -> Option<&Binding> {
        self.entries.get(tag)
    }

    /// Whether `tag` has a binding.
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Bound tag names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// `(tag, binding)` pairs, sorted by tag.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Binding)> {
        self.entries.iter().map(|(tag, binding)| (*tag, binding))
    }

    /// Number of bound tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(&'static str, Binding)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (&'static str, Binding)>>(iter: I) -> Self {
        let mut entries = BTreeMap::new();
        for (tag, binding) in iter {
            let previous = entries.insert(tag, binding);
            debug_assert!(previous.is_none(), "tag '{tag}' bound twice");
        }
        Self { entries }
    }
}

/// The two binding tables handed to the MDX renderer.
///
/// Built once; there is no way to change a binding afterwards. The `blockquote`
/// choice is made from the redesign flag at construction and never revisited.
#[derive(Debug, Clone)]
pub struct TagResolver {
    variant: Variant,
    website_redesign: bool,
    mdx_components: TagMap,
    html_components: TagMap,
}

impl TagResolver {
    /// Builds both tables for `variant` out of `components`.
    pub fn new(variant: Variant, components: &ComponentSet, enable_website_redesign: bool) -> Self {
        let shortcode = |component: &ComponentRef| Binding::Component(Arc::clone(component));

        let mdx_components: TagMap = match variant {
            Variant::Current => [
                ("WithNodeRelease", shortcode(&components.with_node_release)),
                ("HomeDownloadButton", shortcode(&components.home_download_button)),
                ("DownloadReleasesTable", shortcode(&components.download_releases_table)),
                ("Banner", shortcode(&components.banner)),
                ("CodeTabs", shortcode(&components.code_tabs)),
            ]
            .into_iter()
            .collect(),
            Variant::Legacy => [
                ("NodeApiVersionLinks", shortcode(&components.node_api_version_links)),
                ("DownloadReleasesTable", shortcode(&components.download_releases_table)),
                ("Banner", shortcode(&components.banner)),
                ("HomeDownloadButton", shortcode(&components.home_download_button)),
            ]
            .into_iter()
            .collect(),
        };

        let blockquote = if enable_website_redesign {
            Binding::Component(Arc::clone(&components.blockquote))
        } else {
            Binding::HighlightBox
        };

        let mut html = vec![
            ("a", Binding::Component(Arc::clone(&components.link))),
            ("blockquote", blockquote),
        ];
        if variant == Variant::Current {
            html.push(("pre", Binding::PassThrough(Arc::clone(&components.code_box))));
        }
        let html_components: TagMap = html.into_iter().collect();

        log::debug!(
            "Built {:?} tag table: {} shortcodes, {} html overrides, blockquote -> {:?}",
            variant,
            mdx_components.len(),
            html_components.len(),
            html_components.get("blockquote"),
        );

        Self {
            variant,
            website_redesign: enable_website_redesign,
            mdx_components,
            html_components,
        }
    }

    /// Builds the tables described by a site configuration.
    pub fn from_config(config: &SiteConfig, components: &ComponentSet) -> Self {
        Self::new(config.variant, components, config.enable_website_redesign)
    }

    /// Custom shortcode bindings.
    pub fn mdx_components(&self) -> &TagMap {
        &self.mdx_components
    }

    /// Standard HTML element overrides.
    pub fn html_components(&self) -> &TagMap {
        &self.html_components
    }

    /// Binding for a standard HTML tag, if overridden.
    pub fn resolve_html(&self, tag: &str) -> Option<&Binding> {
        self.html_components.get(tag)
    }

    /// Binding for a custom shortcode, if registered.
    pub fn resolve_shortcode(&self, name: &str) -> Option<&Binding> {
        self.mdx_components.get(name)
    }

    /// Binding for any tag name, HTML overrides first.
    pub fn resolve(&self, tag: &str) -> Option<&Binding> {
        self.resolve_html(tag).or_else(|| self.resolve_shortcode(tag))
    }

    /// The variant this table was built for.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Whether the redesign flag was on at construction.
    pub fn website_redesign(&self) -> bool {
        self.website_redesign
    }
}

static SITE_TAGS: Lazy<TagResolver> = Lazy::new(|| {
    TagResolver::from_config(&SiteConfig::from_env(), &ComponentSet::placeholders())
});

/// The process-wide tag table, built from the environment on first use.
pub fn site_tags() -> &'static TagResolver {
    &SITE_TAGS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PropValue;

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!(" Legacy ".parse::<Variant>(), Ok(Variant::Legacy));
        assert_eq!("current".parse::<Variant>(), Ok(Variant::Current));
        assert!("next".parse::<Variant>().is_err());
    }

    #[test]
    fn variant_key_lists_match_built_tables() {
        let components = ComponentSet::placeholders();
        for variant in [Variant::Current, Variant::Legacy] {
            let tags = TagResolver::new(variant, &components, false);
            let mut shortcodes = variant.shortcodes().to_vec();
            shortcodes.sort_unstable();
            assert_eq!(tags.mdx_components().keys().collect::<Vec<_>>(), shortcodes);
            let mut html = variant.html_overrides().to_vec();
            html.sort_unstable();
            assert_eq!(tags.html_components().keys().collect::<Vec<_>>(), html);
        }
    }

    #[test]
    fn highlight_box_wraps_children_only() {
        let mut props = Props::new();
        props.insert("cite".into(), PropValue::literal("https://nodejs.org"));
        assert_eq!(
            Binding::HighlightBox.render(&props, "hello"),
            r#"<div class="highlight-box">hello</div>"#
        );
    }

    #[test]
    fn resolve_prefers_html_overrides() {
        let tags = TagResolver::new(Variant::Current, &ComponentSet::placeholders(), true);
        assert!(tags.resolve("a").is_some());
        assert!(tags.resolve("Banner").is_some());
        assert!(tags.resolve("div").is_none());
        assert!(tags.resolve_html("Banner").is_none());
        assert!(tags.resolve_shortcode("a").is_none());
    }

    #[test]
    fn debug_output_names_components() {
        let tags = TagResolver::new(Variant::Current, &ComponentSet::placeholders(), false);
        assert_eq!(
            format!("{:?}", tags.resolve_html("pre").unwrap()),
            "PassThrough(CodeBox)"
        );
        assert_eq!(
            format!("{:?}", tags.resolve_html("blockquote").unwrap()),
            "HighlightBox"
        );
    }
}
