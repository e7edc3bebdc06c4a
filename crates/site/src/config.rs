//! Site configuration feeding the tag table.

use crate::registry::Variant;
use mdxmap_core::MdxError;
use serde::{Deserialize, Serialize};

/// Environment variable holding the website redesign flag.
pub const REDESIGN_ENV: &str = "NEXT_PUBLIC_ENABLE_WEBSITE_REDESIGN";
/// Environment variable selecting the tag table variant.
pub const VARIANT_ENV: &str = "MDXMAP_VARIANT";

/// Process-wide configuration read once when the tag table is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    /// `ENABLE_WEBSITE_REDESIGN`: bind `blockquote` to the Blockquote component.
    pub enable_website_redesign: bool,
    /// Tag table generation.
    pub variant: Variant,
}

impl SiteConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// The redesign flag is on only for the exact value `"true"`. An unrecognised
    /// variant is logged and the default kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enable_website_redesign = lookup(REDESIGN_ENV).is_some_and(|value| value == "true");

        let variant = match lookup(VARIANT_ENV) {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                log::warn!("Ignoring {}: {}", VARIANT_ENV, err);
                Variant::default()
            }),
            None => Variant::default(),
        };

        Self {
            enable_website_redesign,
            variant,
        }
    }

    /// Parses a JSON configuration object; missing fields take their defaults.
    pub fn from_json(input: &str) -> Result<Self, MdxError> {
        serde_json::from_str(input).map_err(|err| MdxError::Config(err.to_string()))
    }
}
