#![deny(missing_docs)]
//! mdxmap site engine: tag bindings, configuration, and MDX rendering.

/// Parallel batch rendering.
pub mod batch;
/// Site configuration (feature flags, variant selection).
pub mod config;
/// Components and the tag binding tables.
pub mod registry;
/// MDX to HTML rendering through the tag tables.
pub mod renderer;

pub use batch::{BatchInput, BatchOptions, BatchProcessingResult, render_batch};
pub use config::SiteConfig;
pub use registry::{
    Binding, Component, ComponentRef, ComponentSet, PropValue, Props, TagMap, TagResolver,
    Variant, site_tags,
};
pub use renderer::{Options as RenderOptions, RenderOutput, render_document};
