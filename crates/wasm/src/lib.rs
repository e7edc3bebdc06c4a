use mdxmap_site::batch::{BatchInput, BatchOptions, render_batch as render_batch_inner};
use mdxmap_site::registry::{ComponentSet, TagResolver, Variant};
use mdxmap_site::renderer::{Options, render_document};
use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Config
// ============================================================================

/// Configuration accepted by every exported function.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WasmConfig {
    pub enable_website_redesign: Option<bool>,
    pub variant: Option<Variant>,
    pub allow_raw_html: Option<bool>,
    pub continue_on_error: Option<bool>,
}

fn parse_config(config: JsValue) -> Result<WasmConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(WasmConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))
}

fn build_options(cfg: &WasmConfig) -> Options {
    Options {
        allow_raw_html: cfg.allow_raw_html.unwrap_or(false),
    }
}

/// Serializes to plain JS objects (not `Map`s), matching what `JSON.parse` would give.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Tag tables
// ============================================================================

/// One table per (variant, redesign flag) pair, each built on first use.
static TABLES: Lazy<[TagResolver; 4]> = Lazy::new(|| {
    let components = ComponentSet::placeholders();
    [
        TagResolver::new(Variant::Current, &components, false),
        TagResolver::new(Variant::Current, &components, true),
        TagResolver::new(Variant::Legacy, &components, false),
        TagResolver::new(Variant::Legacy, &components, true),
    ]
});

fn resolver_for(cfg: &WasmConfig) -> &'static TagResolver {
    let redesign = cfg.enable_website_redesign.unwrap_or(false) as usize;
    let variant = match cfg.variant.unwrap_or_default() {
        Variant::Current => 0,
        Variant::Legacy => 2,
    };
    &TABLES[variant + redesign]
}

// ============================================================================
// API
// ============================================================================

/// Tag names bound by a table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagNames {
    /// Custom shortcode names.
    pub mdx_components: Vec<String>,
    /// Overridden HTML tags.
    pub html_components: Vec<String>,
}

/// Renders an MDX document to HTML.
///
/// Returns `{ html, frontmatter }`.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { render } from './mdxmap_wasm';
///
/// const { html } = render('> Heads up', { enableWebsiteRedesign: false });
/// // html === '<div class="highlight-box"><p>Heads up</p></div>'
/// ```
#[wasm_bindgen]
pub fn render(source: &str, config: JsValue) -> Result<JsValue, JsError> {
    let cfg = parse_config(config)?;
    let output = render_document(source, resolver_for(&cfg), &build_options(&cfg))
        .map_err(|e| JsError::new(&e.to_string()))?;

    to_js(&output)
}

/// Renders `[{ id, source }]` documents, returning `{ results, stats }`.
#[wasm_bindgen(js_name = renderBatch)]
pub fn render_batch(inputs: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let cfg = parse_config(config)?;
    let inputs: Vec<BatchInput> = serde_wasm_bindgen::from_value(inputs)
        .map_err(|e| JsError::new(&format!("Invalid inputs: {}", e)))?;

    let options = BatchOptions {
        max_threads: None,
        continue_on_error: cfg.continue_on_error,
        render: build_options(&cfg),
    };
    let result = render_batch_inner(inputs, resolver_for(&cfg), &options);

    to_js(&result)
}

/// Lists the tag names the configured table binds.
#[wasm_bindgen(js_name = tagNames)]
pub fn tag_names(config: JsValue) -> Result<JsValue, JsError> {
    let cfg = parse_config(config)?;
    let resolver = resolver_for(&cfg);
    let names = TagNames {
        mdx_components: resolver.mdx_components().keys().map(String::from).collect(),
        html_components: resolver.html_components().keys().map(String::from).collect(),
    };

    to_js(&names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_indexed_by_variant_and_flag() {
        for variant in [Variant::Current, Variant::Legacy] {
            for redesign in [false, true] {
                let cfg = WasmConfig {
                    enable_website_redesign: Some(redesign),
                    variant: Some(variant),
                    ..Default::default()
                };
                let resolver = resolver_for(&cfg);
                assert_eq!(resolver.variant(), variant);
                assert_eq!(resolver.website_redesign(), redesign);
            }
        }
    }

    #[test]
    fn config_fields_are_camel_case() {
        let cfg: WasmConfig = serde_json::from_str(
            r#"{"enableWebsiteRedesign": true, "variant": "legacy", "allowRawHtml": true, "continueOnError": false}"#,
        )
        .unwrap();
        assert_eq!(cfg.enable_website_redesign, Some(true));
        assert_eq!(cfg.variant, Some(Variant::Legacy));
        assert!(build_options(&cfg).allow_raw_html);
        assert_eq!(cfg.continue_on_error, Some(false));
    }

    #[test]
    fn defaults_to_current_without_redesign() {
        let resolver = resolver_for(&WasmConfig::default());
        assert_eq!(resolver.variant(), Variant::Current);
        assert!(!resolver.website_redesign());
    }
}
