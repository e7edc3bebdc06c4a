use serde_json::Value as JsonValue;
use thiserror::Error;

/// A document split into its frontmatter data and Markdown body.
#[derive(Debug)]
pub struct FrontmatterExtraction<'a> {
    /// Parsed frontmatter as a JSON object (empty when the document has none).
    pub data: JsonValue,
    /// The Markdown/MDX content following the frontmatter block.
    pub body: &'a str,
}

/// Errors emitted while parsing or extracting frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Unclosed YAML fence (e.g., missing terminating `---`).
    #[error("Unterminated YAML frontmatter block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Splits a leading `---` fenced YAML block off a document.
///
/// Blank lines and a byte order mark before the opening fence are skipped. A document
/// without an opening fence yields an empty object and the whole input as body.
pub fn extract_frontmatter(input: &str) -> Result<FrontmatterExtraction<'_>, FrontmatterError> {
    let content = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lines = LineCursor::new(content);

    let opened = loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() => continue,
            Some(line) => break is_fence(line),
            None => break false,
        }
    };
    if !opened {
        return Ok(FrontmatterExtraction {
            data: empty_object(),
            body: input,
        });
    }

    let block_start = lines.offset;
    loop {
        let line_start = lines.offset;
        match lines.next() {
            Some(line) if is_fence(line) => {
                let block = &content[block_start..line_start];
                return Ok(FrontmatterExtraction {
                    data: parse_yaml(block)?,
                    body: &content[lines.offset..],
                });
            }
            Some(_) => continue,
            None => return Err(FrontmatterError::Unterminated),
        }
    }
}

fn parse_yaml(block: &str) -> Result<JsonValue, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(empty_object());
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    match serde_json::to_value(yaml).map_err(|err| FrontmatterError::Parse(err.to_string()))? {
        JsonValue::Null => Ok(empty_object()),
        value @ JsonValue::Object(_) => Ok(value),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

fn empty_object() -> JsonValue {
    JsonValue::Object(Default::default())
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == "---"
}

/// Iterates lines (terminators included) while tracking the byte offset of the next one.
struct LineCursor<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> LineCursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.input;
        let rest = &input[self.offset..];
        if rest.is_empty() {
            return None;
        }
        let len = rest.find('\n').map_or(rest.len(), |pos| pos + 1);
        self.offset += len;
        Some(&rest[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(input: &str) -> FrontmatterExtraction<'_> {
        extract_frontmatter(input).expect("frontmatter extraction should succeed")
    }

    #[test]
    fn returns_whole_input_without_frontmatter() {
        let result = extract("# Title\nBody");
        assert_eq!(result.body, "# Title\nBody");
        assert_eq!(result.data, empty_object());
    }

    #[test]
    fn parses_page_metadata() {
        let input = "---\ntitle: Download\nlayout: download\nauthors:\n  - nodejs\n---\n# Content";
        let result = extract(input);
        assert_eq!(result.body, "# Content");
        assert_eq!(
            result.data.get("layout").and_then(JsonValue::as_str),
            Some("download")
        );
        assert_eq!(result.data["authors"][0], "nodejs");
    }

    #[test]
    fn handles_empty_block() {
        let result = extract("---\n---\n# Body");
        assert_eq!(result.data, empty_object());
        assert_eq!(result.body, "# Body");
    }

    #[test]
    fn skips_bom_and_leading_blank_lines() {
        let result = extract("\u{feff}\n   \n---\nfoo: bar\n---\nBody");
        assert_eq!(result.data["foo"], "bar");
        assert_eq!(result.body, "Body");
    }

    #[test]
    fn accepts_crlf_fences() {
        let result = extract("---\r\ntitle: Hi\r\n---\r\nBody");
        assert_eq!(result.data["title"], "Hi");
        assert_eq!(result.body, "Body");
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let err = extract_frontmatter("---\ninvalid: [unterminated\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Parse(_)), "{err:?}");
    }

    #[test]
    fn errors_on_non_mapping_root() {
        let err = extract_frontmatter("---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::InvalidRootType));
    }

    #[test]
    fn errors_on_unterminated_block() {
        let err = extract_frontmatter("---\ntitle: test").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated));
    }
}
