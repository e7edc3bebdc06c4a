//! The set of site components the bindings point at.

use super::component::{ComponentRef, ElementComponent};

/// Every external component a [`TagResolver`](super::TagResolver) may bind.
///
/// Hosts with real renderers build this struct directly; [`ComponentSet::placeholders`]
/// gives stand-ins that keep component invocations intact in the output.
#[derive(Debug, Clone)]
pub struct ComponentSet {
    /// Renders anchors (`a`).
    pub link: ComponentRef,
    /// Renders `blockquote` once the website redesign is enabled.
    pub blockquote: ComponentRef,
    /// Renders code blocks; target of the `pre` pass-through.
    pub code_box: ComponentRef,
    /// Renders `CodeTabs` groups.
    pub code_tabs: ComponentRef,
    /// Renders `DownloadReleasesTable`.
    pub download_releases_table: ComponentRef,
    /// Renders `Banner`.
    pub banner: ComponentRef,
    /// Renders `HomeDownloadButton`.
    pub home_download_button: ComponentRef,
    /// Renders `WithNodeRelease`.
    pub with_node_release: ComponentRef,
    /// Renders `NodeApiVersionLinks`.
    pub node_api_version_links: ComponentRef,
}

impl ComponentSet {
    /// Placeholder components named after the site components they stand for.
    pub fn placeholders() -> Self {
        Self {
            link: ElementComponent::shared("Link"),
            blockquote: ElementComponent::shared("Blockquote"),
            code_box: ElementComponent::shared("CodeBox"),
            code_tabs: ElementComponent::shared("CodeTabs"),
            download_releases_table: ElementComponent::shared("DownloadReleasesTable"),
            banner: ElementComponent::shared("Banner"),
            home_download_button: ElementComponent::shared("HomeDownloadButton"),
            with_node_release: ElementComponent::shared("WithNodeRelease"),
            node_api_version_links: ElementComponent::shared("NodeApiVersionLinks"),
        }
    }
}

impl Default for ComponentSet {
    fn default() -> Self {
        Self::placeholders()
    }
}
