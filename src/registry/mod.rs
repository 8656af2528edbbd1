use std::collections::HashMap;
use std::sync::Arc;

use crate::node::Component;

/// Thread-safe lookup table from component id to component.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<HashMap<String, Arc<dyn Component>>>,
}

impl Registry {
    pub fn new() -> Self { Self::default() }

    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        for tag in builtins::HOST_TAGS {
            reg.register(*tag, builtins::HostElement::new(*tag));
        }
        reg.register("text", builtins::Text);
        reg
    }

    pub fn register<C: Component + 'static>(&mut self, id: impl Into<String>, c: C) {
        self.register_arc(id, Arc::new(c));
    }

    pub fn register_arc(&mut self, id: impl Into<String>, c: Arc<dyn Component>) {
        let map = Arc::make_mut(&mut self.inner);
        map.insert(id.into(), c);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Component>> {
        self.inner.get(id).cloned()
    }
}

pub mod builtins {
    use crate::errors::Result;
    use crate::node::{Children, Component};
    use crate::props::Props;
    use crate::render::RenderContext;
    use crate::rendered::{check_element, Rendered};

    pub const HOST_TAGS: &[&str] = &["div", "span", "p", "section", "button", "label"];

    /// Plain host element: props become attributes, children render inside.
    pub struct HostElement {
        tag: String,
    }

    impl HostElement {
        pub fn new(tag: impl Into<String>) -> Self {
            Self { tag: tag.into() }
        }
    }

    impl Component for HostElement {
        fn name(&self) -> &str { &self.tag }
        fn render(
            &self,
            props: &Props,
            children: &Children,
            cx: &mut RenderContext,
        ) -> Result<Vec<Rendered>> {
            check_element(&self.tag, props)?;
            Ok(vec![Rendered::Element {
                tag: self.tag.clone(),
                props: props.clone(),
                children: cx.render_children(&self.tag, children)?,
            }])
        }
    }

    /// Renders its `text` prop; strings verbatim, other JSON as written.
    pub struct Text;
    impl Component for Text {
        fn name(&self) -> &str { "text" }
        fn render(
            &self,
            props: &Props,
            _children: &Children,
            _cx: &mut RenderContext,
        ) -> Result<Vec<Rendered>> {
            let s = match props.get("text") {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            Ok(vec![Rendered::Text(s)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RenderError;
    use crate::node::{Children, Node};
    use crate::props::{props_from, Props};
    use crate::render::{render_to_markup, render_tree};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn builtins_are_registered() {
        let reg = Registry::with_builtins();
        for id in ["div", "span", "p", "section", "button", "label", "text"] {
            assert!(reg.get(id).is_some(), "missing {id}");
        }
        assert!(reg.get("table").is_none());
    }

    #[test]
    fn clones_do_not_see_later_registrations() {
        let base = Registry::new();
        let mut extended = base.clone();
        extended.register("t", builtins::Text);
        assert!(base.get("t").is_none());
        assert!(extended.get("t").is_some());
    }

    #[test]
    fn host_element_rejects_render_fn_children() {
        let reg = Registry::with_builtins();
        let node = Node::component(
            reg.get("div").unwrap(),
            Props::new(),
            Children::render(|_| Ok(Node::text("x"))),
        );
        assert_eq!(render_tree(&node), Err(RenderError::UnexpectedRenderFn("div".into())));
    }

    #[test]
    fn host_element_rejects_bad_attribute_names() {
        let reg = Registry::with_builtins();
        let node = Node::component(
            reg.get("span").unwrap(),
            props_from(json!({"on click": "x"})).unwrap(),
            Children::none(),
        );
        assert_eq!(render_tree(&node), Err(RenderError::InvalidName("on click".into())));
    }

    #[test]
    fn host_element_renders_props_as_attributes() {
        let reg = Registry::with_builtins();
        let text = Node::component(
            reg.get("text").unwrap(),
            props_from(json!({"text": "hi"})).unwrap(),
            Children::none(),
        );
        let node = Node::component(
            reg.get("button").unwrap(),
            props_from(json!({"kind": "primary"})).unwrap(),
            vec![text],
        );
        assert_eq!(render_to_markup(&node).unwrap(), r#"<button kind="primary">hi</button>"#);
    }
}
