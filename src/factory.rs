//! Paired components sharing one tree-scoped context slot.
//!
//! [`make_context_components`] wires an updater and a provider to the same
//! key. The updater folds its props into the ambient value with a reducer and
//! republishes the result for its subtree; the provider hands the ambient
//! value to a render callback. Both fall back to the initial context when no
//! ancestor has published under the key.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::errors::{RenderError, Result};
use crate::node::{Children, Component, Node};
use crate::props::{merge_props, Props};
use crate::registry::Registry;
use crate::render::RenderContext;
use crate::rendered::Rendered;

pub const DEFAULT_CONTEXT_KEY: &str = "styleContext";

/// `(ambient context, own props) -> new context`. Must be deterministic.
pub type Reducer = Arc<dyn Fn(&Value, &Props) -> Result<Value> + Send + Sync>;

/// Picks a component id for the current context value.
pub type Getter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

struct Slot {
    key: String,
    initial: Value,
    reducer: Reducer,
}

impl Slot {
    fn resolve(&self, cx: &RenderContext) -> Value {
        cx.ambient(&self.key).cloned().unwrap_or_else(|| self.initial.clone())
    }
}

pub struct UpdateContext {
    slot: Arc<Slot>,
}

impl Component for UpdateContext {
    fn name(&self) -> &str { "UpdateContext" }

    fn render(
        &self,
        props: &Props,
        children: &Children,
        cx: &mut RenderContext,
    ) -> Result<Vec<Rendered>> {
        let current = self.slot.resolve(cx);
        let next = (self.slot.reducer)(&current, props)?;
        cx.with_context(&self.slot.key, next, |cx| cx.render_children(self.name(), children))
    }
}

pub struct ContextProvider {
    slot: Arc<Slot>,
}

impl Component for ContextProvider {
    fn name(&self) -> &str { "ContextProvider" }

    fn render(
        &self,
        _props: &Props,
        children: &Children,
        cx: &mut RenderContext,
    ) -> Result<Vec<Rendered>> {
        let Children::Render(f) = children else {
            return Err(RenderError::ChildrenNotCallable(self.name().to_owned()));
        };
        let context = self.slot.resolve(cx);
        let node = f(&context)?;
        cx.render(&node)
    }
}

/// Updater with a fixed action merged under the render-time props.
pub struct BoundUpdate {
    update: Arc<UpdateContext>,
    action: Props,
}

impl Component for BoundUpdate {
    fn name(&self) -> &str { "BoundUpdate" }

    fn render(
        &self,
        props: &Props,
        children: &Children,
        cx: &mut RenderContext,
    ) -> Result<Vec<Rendered>> {
        let node = Node::component(
            self.update.clone(),
            merge_props(&self.action, props),
            children.clone(),
        );
        cx.render(&node)
    }
}

/// Renders whichever registered component the getter selects for the
/// current context, forwarding its own props and children.
pub struct PropertyComponent {
    provider: Arc<ContextProvider>,
    getter: Getter,
    registry: Registry,
}

impl Component for PropertyComponent {
    fn name(&self) -> &str { "PropertyComponent" }

    fn render(
        &self,
        props: &Props,
        children: &Children,
        cx: &mut RenderContext,
    ) -> Result<Vec<Rendered>> {
        let getter = self.getter.clone();
        let registry = self.registry.clone();
        let props = props.clone();
        let children = children.clone();
        let select = Children::render(move |context| {
            let id = getter(context);
            let component = registry.get(&id).ok_or(RenderError::NotRenderable(id))?;
            Ok(Node::component(component, props.clone(), children.clone()))
        });
        cx.render(&Node::component(self.provider.clone(), Props::new(), select))
    }
}

/// The four artifacts of one factory call.
pub struct ContextComponents {
    pub update_context: Arc<UpdateContext>,
    pub context_provider: Arc<ContextProvider>,
    key: String,
}

impl ContextComponents {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Component rendering the updater with `action`, overridden by render-time props.
    pub fn update_context_generator(&self, action: Props) -> Arc<BoundUpdate> {
        Arc::new(BoundUpdate { update: self.update_context.clone(), action })
    }

    pub fn property_component_generator<G>(
        &self,
        getter: G,
        registry: Registry,
    ) -> Arc<PropertyComponent>
    where
        G: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Arc::new(PropertyComponent {
            provider: self.context_provider.clone(),
            getter: Arc::new(getter),
            registry,
        })
    }

    /// Node for the updater with `props` over `children`.
    pub fn update(&self, props: Props, children: Vec<Node>) -> Node {
        Node::component(self.update_context.clone(), props, children)
    }

    /// Node for the provider with a render callback.
    pub fn provide<F>(&self, f: F) -> Node
    where
        F: Fn(&Value) -> Result<Node> + Send + Sync + 'static,
    {
        Node::component(self.context_provider.clone(), Props::new(), Children::render(f))
    }
}

pub fn make_context_components<R>(
    reducer: R,
    initial_context: Value,
    context_key: Option<&str>,
) -> ContextComponents
where
    R: Fn(&Value, &Props) -> Result<Value> + Send + Sync + 'static,
{
    let key = context_key.unwrap_or(DEFAULT_CONTEXT_KEY).to_owned();
    debug!(key = %key, initial = %initial_context, "make context components");
    let slot = Arc::new(Slot {
        key: key.clone(),
        initial: initial_context,
        reducer: Arc::new(reducer),
    });
    ContextComponents {
        update_context: Arc::new(UpdateContext { slot: slot.clone() }),
        context_provider: Arc::new(ContextProvider { slot }),
        key,
    }
}
