use serde_json::{Map, Value};

use crate::errors::{RenderError, Result};

/// Property bag handed to components. Insertion order is kept.
pub type Props = Map<String, Value>;

/// Merge two bags into a new one. Keys present in `overlay` replace the
/// ones in `base`; every other key keeps its position from `base`.
pub fn merge_props(base: &Props, overlay: &Props) -> Props {
    let mut out = base.clone();
    for (k, v) in overlay {
        out.insert(k.clone(), v.clone());
    }
    out
}

/// Turn a JSON value into a bag. `null` counts as an empty bag.
pub fn props_from(value: Value) -> Result<Props> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Props::new()),
        other => Err(RenderError::InvalidProps(other.to_string())),
    }
}
