//! MDAST-based MDX to HTML renderer driven by a [`TagResolver`].
//!
//! # Module Structure
//!
//! - `context` - Output buffer and scope tracking during traversal
//! - `render` - AST node rendering functions

mod context;
mod render;

use crate::registry::TagResolver;
use context::Context;
use mdxmap_core::{MdxError, ParseOptions, extract_frontmatter, parse_mdast};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Whether raw HTML in the document passes through unescaped.
    #[serde(default)]
    pub allow_raw_html: bool,
}

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOutput {
    /// Rendered markup.
    pub html: String,
    /// Frontmatter data (an empty object when the document has none).
    pub frontmatter: JsonValue,
}

/// Renders an MDX document, substituting bound tags with their components.
///
/// # Examples
///
/// ```
/// use mdxmap_site::registry::{ComponentSet, TagResolver, Variant};
/// use mdxmap_site::renderer::{Options, render_document};
///
/// let tags = TagResolver::new(Variant::Current, &ComponentSet::placeholders(), false);
/// let output = render_document("> Note", &tags, &Options::default()).unwrap();
/// assert_eq!(output.html, r#"<div class="highlight-box"><p>Note</p></div>"#);
/// ```
pub fn render_document(
    source: &str,
    resolver: &TagResolver,
    options: &Options,
) -> Result<RenderOutput, MdxError> {
    let extraction = extract_frontmatter(source)?;
    let parse_options = ParseOptions::mdx().with_raw_html(options.allow_raw_html);
    let tree = parse_mdast(extraction.body, parse_options)?;

    let mut ctx = Context::new(resolver, options);
    ctx.collect_definitions(&tree);
    render::render_node(&tree, &mut ctx);

    Ok(RenderOutput {
        html: ctx.finish(),
        frontmatter: extraction.data,
    })
}
