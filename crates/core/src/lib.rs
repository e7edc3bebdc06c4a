#![deny(missing_docs)]
//! mdxmap core: MDX parsing, frontmatter extraction, and shared error types.

/// Core error types.
pub mod error;
/// YAML frontmatter extraction helpers.
pub mod frontmatter;
/// Markdown/MDX parsing utilities.
pub mod parse;

pub use error::{MdxError, SourceLocation};
pub use frontmatter::{FrontmatterError, FrontmatterExtraction, extract_frontmatter};
pub use parse::{ParseOptions, parse_mdast};
