use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::Result;
use crate::props::Props;
use crate::render::RenderContext;
use crate::rendered::Rendered;

/// Callback children: receives the resolved context and returns the subtree.
pub type RenderFn = Arc<dyn Fn(&Value) -> Result<Node> + Send + Sync>;

/// Anything that can sit in a `Node::Component`.
pub trait Component: Send + Sync {
    fn name(&self) -> &str;
    fn render(
        &self,
        props: &Props,
        children: &Children,
        cx: &mut RenderContext,
    ) -> Result<Vec<Rendered>>;
}

#[derive(Clone)]
pub enum Children {
    Nodes(Vec<Node>),
    Render(RenderFn),
}

impl Children {
    pub fn none() -> Self {
        Children::Nodes(Vec::new())
    }

    pub fn render<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<Node> + Send + Sync + 'static,
    {
        Children::Render(Arc::new(f))
    }
}

impl Default for Children {
    fn default() -> Self {
        Children::none()
    }
}

impl From<Vec<Node>> for Children {
    fn from(nodes: Vec<Node>) -> Self {
        Children::Nodes(nodes)
    }
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Children::Nodes(nodes) => f.debug_list().entries(nodes).finish(),
            Children::Render(_) => f.write_str("<render fn>"),
        }
    }
}

#[derive(Clone)]
pub enum Node {
    Text(String),
    Element {
        tag: String,
        props: Props,
        children: Vec<Node>,
    },
    Fragment(Vec<Node>),
    Component {
        component: Arc<dyn Component>,
        props: Props,
        children: Children,
    },
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn element(tag: impl Into<String>, props: Props, children: Vec<Node>) -> Self {
        Node::Element { tag: tag.into(), props, children }
    }

    pub fn component(
        component: Arc<dyn Component>,
        props: Props,
        children: impl Into<Children>,
    ) -> Self {
        Node::Component { component, props, children: children.into() }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Node::Element { tag, props, children } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("props", props)
                .field("children", children)
                .finish(),
            Node::Fragment(nodes) => f.debug_tuple("Fragment").field(nodes).finish(),
            Node::Component { component, props, children } => f
                .debug_struct("Component")
                .field("name", &component.name())
                .field("props", props)
                .field("children", children)
                .finish(),
        }
    }
}
