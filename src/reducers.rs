use serde_json::{Number, Value};

use crate::errors::{RenderError, Result};
use crate::props::{merge_props, Props};

/// Shallow-merge props into an object context. A non-object context is
/// replaced outright.
pub fn merge_reducer() -> impl Fn(&Value, &Props) -> Result<Value> + Send + Sync + 'static {
    |ctx: &Value, props: &Props| -> Result<Value> {
        Ok(match ctx {
            Value::Object(base) => Value::Object(merge_props(base, props)),
            _ => Value::Object(props.clone()),
        })
    }
}

/// The props become the new context.
pub fn replace_reducer() -> impl Fn(&Value, &Props) -> Result<Value> + Send + Sync + 'static {
    |_: &Value, props: &Props| -> Result<Value> { Ok(Value::Object(props.clone())) }
}

/// `ctx + props[field]`. A missing field adds nothing.
pub fn sum_reducer(
    field: impl Into<String>,
) -> impl Fn(&Value, &Props) -> Result<Value> + Send + Sync + 'static {
    let field = field.into();
    move |ctx: &Value, props: &Props| {
        let delta = props.get(&field).unwrap_or(&Value::Null);
        add(ctx, delta).ok_or_else(|| {
            RenderError::Reducer(format!("cannot add {delta} to {ctx}"))
        })
    }
}

fn add(a: &Value, b: &Value) -> Option<Value> {
    let b = match b {
        Value::Null => return a.as_number().map(|_| a.clone()),
        Value::Number(n) => n,
        _ => return None,
    };
    let a = a.as_number()?;
    if let (Some(x), Some(y)) = (as_int(a), as_int(b)) {
        let sum = x + y;
        if let Ok(v) = i64::try_from(sum) {
            return Some(Value::from(v));
        }
        if let Ok(v) = u64::try_from(sum) {
            return Some(Value::from(v));
        }
    }
    Number::from_f64(a.as_f64()? + b.as_f64()?).map(Value::Number)
}

// Integers from either side of the i64/u64 split, widened so the sum cannot overflow.
fn as_int(n: &Number) -> Option<i128> {
    n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::props_from;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bag(v: Value) -> Props {
        props_from(v).unwrap()
    }

    #[test]
    fn merge_overrides_and_extends() {
        let r = merge_reducer();
        assert_eq!(
            r(&json!({"color": "red", "size": 1}), &bag(json!({"size": 2, "bold": true}))).unwrap(),
            json!({"color": "red", "size": 2, "bold": true})
        );
        assert_eq!(r(&json!(3), &bag(json!({"a": 1}))).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn replace_drops_context() {
        let r = replace_reducer();
        assert_eq!(r(&json!({"a": 1}), &bag(json!({"b": 2}))).unwrap(), json!({"b": 2}));
    }

    #[test]
    fn sum_handles_ints_floats_and_missing() {
        let r = sum_reducer("delta");
        assert_eq!(r(&json!(5), &bag(json!({"delta": 3}))).unwrap(), json!(8));
        assert_eq!(r(&json!(1.5), &bag(json!({"delta": 1}))).unwrap(), json!(2.5));
        assert_eq!(r(&json!(5), &Props::new()).unwrap(), json!(5));
    }

    #[test]
    fn sum_keeps_integers_beyond_i64() {
        let r = sum_reducer("delta");
        assert_eq!(r(&json!(u64::MAX), &bag(json!({"delta": 0}))).unwrap(), json!(u64::MAX));
        assert_eq!(
            r(&json!(i64::MAX), &bag(json!({"delta": 1}))).unwrap(),
            json!(i64::MAX as u64 + 1)
        );
        assert_eq!(r(&json!(u64::MAX), &bag(json!({"delta": -1}))).unwrap(), json!(u64::MAX - 1));
        // past u64 the sum is only representable as a float
        assert_eq!(
            r(&json!(u64::MAX), &bag(json!({"delta": 1}))).unwrap(),
            json!(u64::MAX as f64 + 1.0)
        );
    }

    #[test]
    fn sum_rejects_non_numbers() {
        let r = sum_reducer("delta");
        assert!(matches!(r(&json!("x"), &bag(json!({"delta": 1}))), Err(RenderError::Reducer(_))));
        assert!(matches!(r(&json!(1), &bag(json!({"delta": "1"}))), Err(RenderError::Reducer(_))));
    }
}
