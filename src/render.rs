use serde_json::Value;
use tracing::{debug, trace};

use crate::errors::{RenderError, Result};
use crate::node::{Children, Node};
use crate::options::RenderOptions;
use crate::rendered::{check_element, to_markup, Rendered};

/// State of one render pass: the stack of values published by ancestors
/// plus the current nesting depth.
#[derive(Debug, Default)]
pub struct RenderContext {
    options: RenderOptions,
    scopes: Vec<(String, Value)>,
    depth: usize,
}

impl RenderContext {
    pub fn new(options: RenderOptions) -> Self {
        Self { options, scopes: Vec::new(), depth: 0 }
    }

    /// Innermost value published under `key`, if any ancestor published one.
    pub fn ambient(&self, key: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Publish `value` under `key` while `f` runs.
    pub fn with_context<T>(
        &mut self,
        key: &str,
        value: Value,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        debug!(key, %value, depth = self.depth, "publish context");
        self.scopes.push((key.to_owned(), value));
        let out = f(self);
        self.scopes.pop();
        out
    }

    pub fn render(&mut self, node: &Node) -> Result<Vec<Rendered>> {
        match node {
            Node::Text(s) => Ok(vec![Rendered::Text(s.clone())]),
            Node::Fragment(nodes) => self.nested(|cx| cx.render_nodes(nodes)),
            Node::Element { tag, props, children } => self.nested(|cx| {
                trace!(tag = %tag, "render element");
                check_element(tag, props)?;
                Ok(vec![Rendered::Element {
                    tag: tag.clone(),
                    props: props.clone(),
                    children: cx.render_nodes(children)?,
                }])
            }),
            Node::Component { component, props, children } => self.nested(|cx| {
                trace!(component = component.name(), "render component");
                component.render(props, children, cx)
            }),
        }
    }

    pub fn render_nodes(&mut self, nodes: &[Node]) -> Result<Vec<Rendered>> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            out.extend(self.render(node)?);
        }
        Ok(out)
    }

    /// Render plain children. `owner` names the component for error reports.
    pub fn render_children(
        &mut self,
        owner: &str,
        children: &Children,
    ) -> Result<Vec<Rendered>> {
        match children {
            Children::Nodes(nodes) => self.render_nodes(nodes),
            Children::Render(_) => Err(RenderError::UnexpectedRenderFn(owner.to_owned())),
        }
    }

    fn nested(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<Vec<Rendered>>,
    ) -> Result<Vec<Rendered>> {
        if self.depth >= self.options.max_depth {
            return Err(RenderError::DepthExceeded(self.options.max_depth));
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }
}

/// Render `node` from an empty context with default options.
pub fn render_tree(node: &Node) -> Result<Vec<Rendered>> {
    RenderContext::new(RenderOptions::default()).render(node)
}

pub fn render_to_markup(node: &Node) -> Result<String> {
    Ok(to_markup(&render_tree(node)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::Props;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn innermost_value_wins_and_pops() {
        let mut cx = RenderContext::default();
        assert_eq!(cx.ambient("k"), None);
        cx.with_context("k", json!(1), |cx| {
            cx.with_context("other", json!("x"), |cx| {
                cx.with_context("k", json!(2), |cx| {
                    assert_eq!(cx.ambient("k"), Some(&json!(2)));
                });
                assert_eq!(cx.ambient("k"), Some(&json!(1)));
            });
        });
        assert_eq!(cx.ambient("k"), None);
    }

    #[test]
    fn scope_is_popped_on_error() {
        let mut cx = RenderContext::default();
        let res: Result<()> =
            cx.with_context("k", json!(1), |_| Err(RenderError::Spec("boom".into())));
        assert!(res.is_err());
        assert_eq!(cx.ambient("k"), None);
    }

    #[test]
    fn elements_and_fragments() {
        let tree = Node::element(
            "div",
            Props::new(),
            vec![Node::Fragment(vec![Node::text("a"), Node::text("b")])],
        );
        assert_eq!(render_to_markup(&tree).unwrap(), "<div>ab</div>");
    }

    #[test]
    fn element_with_bad_attribute_fails() {
        let mut props = Props::new();
        props.insert("x\"><script>a</script><i y=\"".into(), json!(1));
        let tree = Node::element("div", props, vec![]);
        assert!(matches!(render_tree(&tree), Err(RenderError::InvalidName(_))));
    }

    #[test]
    fn fragments_count_towards_depth() {
        let mut tree = Node::text("leaf");
        for _ in 0..10 {
            tree = Node::Fragment(vec![tree]);
        }
        let mut cx = RenderContext::new(RenderOptions::default().with_max_depth(9));
        assert_eq!(cx.render(&tree), Err(RenderError::DepthExceeded(9)));
        let mut cx = RenderContext::new(RenderOptions::default().with_max_depth(10));
        assert_eq!(cx.render(&tree), Ok(vec![Rendered::text("leaf")]));
    }

    #[test]
    fn depth_guard() {
        let mut tree = Node::text("leaf");
        for _ in 0..5 {
            tree = Node::element("div", Props::new(), vec![tree]);
        }
        let mut cx = RenderContext::new(RenderOptions::default().with_max_depth(4));
        assert_eq!(cx.render(&tree), Err(RenderError::DepthExceeded(4)));
        let mut cx = RenderContext::new(RenderOptions::default().with_max_depth(5));
        assert!(cx.render(&tree).is_ok());
    }
}
