//! Declarative trees read from JSON, e.g.
//!
//! ```json
//! {"type": "update", "props": {"color": "red"}, "children": [
//!     {"type": "provide", "select": "/as", "props": {"id": "title"},
//!      "children": [{"type": "context", "pointer": "/color"}]}
//! ]}
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{RenderError, Result};
use crate::factory::ContextComponents;
use crate::node::Node;
use crate::props::Props;
use crate::registry::Registry;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeSpec {
    Text {
        value: String,
    },
    Element {
        tag: String,
        #[serde(default)]
        props: Props,
        #[serde(default)]
        children: Vec<TreeSpec>,
    },
    /// Updater with `props` over `children`.
    Update {
        #[serde(default)]
        props: Props,
        #[serde(default)]
        children: Vec<TreeSpec>,
    },
    /// Updater bound to `action`, with `props` applied on top.
    Action {
        action: Props,
        #[serde(default)]
        props: Props,
        #[serde(default)]
        children: Vec<TreeSpec>,
    },
    /// Registered component whose id sits at `select` in the context.
    Provide {
        select: String,
        #[serde(default)]
        props: Props,
        #[serde(default)]
        children: Vec<TreeSpec>,
    },
    /// The context value, or the part at `pointer`, as text.
    Context {
        #[serde(default)]
        pointer: Option<String>,
    },
}

impl TreeSpec {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| RenderError::Spec(e.to_string()))
    }

    pub fn build(&self, components: &ContextComponents, registry: &Registry) -> Result<Node> {
        let build_all = |specs: &[TreeSpec]| -> Result<Vec<Node>> {
            specs.iter().map(|s| s.build(components, registry)).collect()
        };
        Ok(match self {
            TreeSpec::Text { value } => Node::text(value.clone()),
            TreeSpec::Element { tag, props, children } => {
                Node::element(tag.clone(), props.clone(), build_all(children)?)
            }
            TreeSpec::Update { props, children } => {
                components.update(props.clone(), build_all(children)?)
            }
            TreeSpec::Action { action, props, children } => Node::component(
                components.update_context_generator(action.clone()),
                props.clone(),
                build_all(children)?,
            ),
            TreeSpec::Provide { select, props, children } => {
                if !select.is_empty() && !select.starts_with('/') {
                    return Err(RenderError::Spec(format!("bad JSON pointer `{select}`")));
                }
                let pointer = select.clone();
                let pick = components.property_component_generator(
                    move |ctx| {
                        ctx.pointer(&pointer)
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_owned()
                    },
                    registry.clone(),
                );
                Node::component(pick, props.clone(), build_all(children)?)
            }
            TreeSpec::Context { pointer } => {
                let pointer = pointer.clone().unwrap_or_default();
                components.provide(move |ctx| {
                    Ok(Node::text(match ctx.pointer(&pointer) {
                        Some(Value::String(s)) => s.clone(),
                        Some(v) => v.to_string(),
                        None => String::new(),
                    }))
                })
            }
        })
    }
}
