//! Reducers over ranges and argument lists
//!
//! All reducers flatten their arguments and skip elements that do not coerce
//! to numbers (empty cells, dates, non-numeric strings). The empty-set
//! results differ on purpose: AVERAGE yields NaN, MIN/MAX yield the empty
//! value.

use super::{for_each_scalar, numeric_elements};
use crate::error::FormulaResult;
use crate::evaluator::Value;

/// SUM: total of all numeric-coercible elements
pub fn fn_sum(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(numeric_elements(args).iter().sum()))
}

/// AVERAGE: mean of all numeric-coercible elements; NaN when there are none
pub fn fn_average(args: &[Value]) -> FormulaResult<Value> {
    let numbers = numeric_elements(args);
    if numbers.is_empty() {
        return Ok(Value::Number(f64::NAN));
    }
    Ok(Value::Number(
        numbers.iter().sum::<f64>() / numbers.len() as f64,
    ))
}

/// MIN: smallest numeric element; empty when there are none
pub fn fn_min(args: &[Value]) -> FormulaResult<Value> {
    let result = numeric_elements(args)
        .into_iter()
        .fold(None, |acc: Option<f64>, n| Some(acc.map_or(n, |m| m.min(n))));
    Ok(result.map_or(Value::Empty, Value::Number))
}

/// MAX: largest numeric element; empty when there are none
pub fn fn_max(args: &[Value]) -> FormulaResult<Value> {
    let result = numeric_elements(args)
        .into_iter()
        .fold(None, |acc: Option<f64>, n| Some(acc.map_or(n, |m| m.max(n))));
    Ok(result.map_or(Value::Empty, Value::Number))
}

/// COUNT: number of numeric-coercible elements
pub fn fn_count(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(numeric_elements(args).len() as f64))
}

/// COUNTA: number of elements that are neither empty nor an empty string
pub fn fn_counta(args: &[Value]) -> FormulaResult<Value> {
    let mut count = 0u64;
    for_each_scalar(args, &mut |value| match value {
        Value::Empty => {}
        Value::Text(s) if s.is_empty() => {}
        _ => count += 1,
    });
    Ok(Value::Number(count as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matrix(rows: Vec<Vec<Value>>) -> Value {
        Value::Matrix(rows)
    }

    #[test]
    fn test_sum_flattens_and_skips() {
        let args = vec![
            Value::Number(1.0),
            matrix(vec![
                vec![Value::Number(2.0), Value::Text("skip".into())],
                vec![Value::Empty, Value::Number(3.0)],
            ]),
            Value::Bool(true),
            Value::Text("4".into()),
        ];
        assert_eq!(fn_sum(&args).unwrap(), Value::Number(11.0));
    }

    #[test]
    fn test_average() {
        let args = vec![Value::Array(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
            Value::Empty,
        ])];
        assert_eq!(fn_average(&args).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_average_of_nothing_is_nan() {
        let args = vec![Value::Array(vec![Value::Empty, Value::Text("x".into())])];
        match fn_average(&args).unwrap() {
            Value::Number(n) => assert!(n.is_nan()),
            other => panic!("Expected NaN, got {:?}", other),
        }
    }

    #[test]
    fn test_min_max() {
        let args = vec![Value::Array(vec![
            Value::Number(5.0),
            Value::Number(-2.0),
            Value::Number(3.0),
        ])];
        assert_eq!(fn_min(&args).unwrap(), Value::Number(-2.0));
        assert_eq!(fn_max(&args).unwrap(), Value::Number(5.0));
    }

    #[test]
    fn test_min_max_of_nothing_is_empty() {
        let args = vec![Value::Array(vec![Value::Empty])];
        assert_eq!(fn_min(&args).unwrap(), Value::Empty);
        assert_eq!(fn_max(&args).unwrap(), Value::Empty);
    }

    #[test]
    fn test_count_numeric_coercible() {
        let args = vec![Value::Array(vec![
            Value::Number(1.0),
            Value::Bool(true),
            Value::Text("2.5".into()),
            Value::Text("nope".into()),
            Value::Empty,
        ])];
        assert_eq!(fn_count(&args).unwrap(), Value::Number(3.0));
    }

    #[test]
    fn test_counta_skips_blank_only() {
        let args = vec![Value::Array(vec![
            Value::Number(1.0),
            Value::Text(String::new()),
            Value::Text("x".into()),
            Value::Empty,
            Value::Bool(false),
        ])];
        assert_eq!(fn_counta(&args).unwrap(), Value::Number(3.0));
    }
}
