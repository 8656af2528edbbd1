use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{RenderError, Result};
use crate::props::Props;

/// Host output of a render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rendered {
    Text(String),
    Element {
        tag: String,
        props: Props,
        children: Vec<Rendered>,
    },
}

impl Rendered {
    pub fn text(s: impl Into<String>) -> Self {
        Rendered::Text(s.into())
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            Rendered::Text(s) => s.clone(),
            Rendered::Element { children, .. } => {
                children.iter().map(Rendered::text_content).join("")
            }
        }
    }
}

fn is_tag_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_attr_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Reject a tag or prop key that would break out of the element markup.
pub fn check_element(tag: &str, props: &Props) -> Result<()> {
    if !is_tag_name(tag) {
        return Err(RenderError::InvalidName(tag.to_owned()));
    }
    match props.keys().find(|k| !is_attr_name(k)) {
        Some(k) => Err(RenderError::InvalidName(k.clone())),
        None => Ok(()),
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn attr_value(v: &Value) -> String {
    let raw = match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    escape(&raw).replace('"', "&quot;")
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Text(s) => f.write_str(&escape(s)),
            Rendered::Element { tag, props, children } => {
                write!(f, "<{tag}")?;
                for (k, v) in props {
                    write!(f, " {k}=\"{}\"", attr_value(v))?;
                }
                write!(f, ">{}</{tag}>", children.iter().join(""))
            }
        }
    }
}

/// Markup for a list of sibling outputs.
pub fn to_markup(out: &[Rendered]) -> String {
    out.iter().join("")
}
