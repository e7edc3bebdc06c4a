//! Markdown/MDX parsing on top of markdown-rs.

use crate::{MdxError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Enable MDX constructs (JSX, ESM, expressions).
    pub mdx: bool,
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Allow raw HTML nodes in the AST.
    pub raw_html: bool,
}

impl ParseOptions {
    /// Markdown-friendly defaults (no MDX).
    pub const fn markdown() -> Self {
        Self {
            mdx: false,
            gfm: true,
            raw_html: true,
        }
    }

    /// MDX-friendly defaults (JSX/ESM/expression enabled, raw HTML off).
    pub const fn mdx() -> Self {
        Self {
            mdx: true,
            gfm: true,
            raw_html: false,
        }
    }

    /// Returns a copy with raw HTML parsing switched on or off.
    pub const fn with_raw_html(mut self, raw_html: bool) -> Self {
        self.raw_html = raw_html;
        self
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            // Shortcode bodies are routinely indented inside their tags, so
            // indentation never starts a code block.
            code_indented: !self.mdx,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.mdx {
            constructs.mdx_esm = true;
            constructs.mdx_expression_flow = true;
            constructs.mdx_expression_text = true;
            constructs.mdx_jsx_flow = true;
            constructs.mdx_jsx_text = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::mdx()
    }
}

/// Parse markdown into an MDAST tree.
pub fn parse_mdast(input: &str, options: ParseOptions) -> Result<Node, MdxError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| MdxError::Parse {
        message: err.reason.clone(),
        location: message_location(&err),
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match message.place.as_deref() {
        Some(Place::Point(point)) => SourceLocation::new(point.line, point.column),
        Some(Place::Position(position)) => {
            SourceLocation::new(position.start.line, position.start.column)
        }
        None => SourceLocation::new(1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mdx_options_enable_jsx_and_disable_indented_code() {
        let options = ParseOptions::mdx().to_markdown();
        assert!(options.constructs.mdx_jsx_flow);
        assert!(options.constructs.mdx_jsx_text);
        assert!(!options.constructs.code_indented);
        assert!(!options.constructs.html_flow);
    }

    #[test]
    fn gfm_footnotes_are_not_link_definitions() {
        let root = parse_mdast("[^1]\n\n[^1]: note", ParseOptions::mdx()).expect("valid MDX");
        let Node::Root(root) = root else {
            panic!("expected root node");
        };
        assert!(matches!(root.children.last(), Some(Node::FootnoteDefinition(_))));
        assert!(!root.children.iter().any(|n| matches!(n, Node::Definition(_))));
    }

    #[test]
    fn raw_html_toggle_reaches_constructs() {
        let options = ParseOptions::mdx().with_raw_html(true).to_markdown();
        assert!(options.constructs.html_flow);
        assert!(options.constructs.html_text);
    }

    #[test]
    fn parses_shortcode_elements() {
        let root = parse_mdast("<Banner>\n\nHello\n\n</Banner>", ParseOptions::mdx())
            .expect("valid MDX");
        let Node::Root(root) = root else {
            panic!("expected root node");
        };
        assert!(matches!(
            root.children.first(),
            Some(Node::MdxJsxFlowElement(el)) if el.name.as_deref() == Some("Banner")
        ));
    }

    #[test]
    fn reports_location_of_unclosed_tag() {
        let err = parse_mdast("<Banner>\n\nHello", ParseOptions::mdx()).unwrap_err();
        let MdxError::Parse { location, .. } = err else {
            panic!("expected parse error, got {err:?}");
        };
        assert!(location.line >= 1);
    }
}
