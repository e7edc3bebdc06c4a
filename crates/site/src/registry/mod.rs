//! Component registry: the renderable abstraction and the tag binding tables.

mod component;
mod components;
mod resolver;

pub use component::{
    Component, ComponentRef, ElementComponent, PropValue, Props, write_element,
    write_void_element,
};
pub use components::ComponentSet;
pub use resolver::{Binding, HIGHLIGHT_BOX_CLASS, TagMap, TagResolver, Variant, site_tags};
