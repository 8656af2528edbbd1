pub mod errors;
pub mod options;
pub mod props;
pub mod node;
pub mod render;
pub mod rendered;
pub mod registry;   // component ids -> components
pub mod factory;
pub mod reducers;
pub mod tree;

pub use errors::{RenderError, Result};
pub use factory::{
    make_context_components, BoundUpdate, ContextComponents, ContextProvider, PropertyComponent,
    Reducer, UpdateContext, DEFAULT_CONTEXT_KEY,
};
pub use node::{Children, Component, Node, RenderFn};
pub use options::RenderOptions;
pub use props::{merge_props, props_from, Props};
pub use registry::Registry;
pub use render::{render_to_markup, render_tree, RenderContext};
pub use rendered::{to_markup, Rendered};
pub use tree::TreeSpec;
