//! Logical functions

use super::for_each_scalar;
use crate::error::FormulaResult;
use crate::evaluator::Value;

/// IF(condition, if_true, if_false)
pub fn fn_if(args: &[Value]) -> FormulaResult<Value> {
    let condition = args[0].clone().into_scalar()?.expect_bool()?;
    if condition {
        Ok(args[1].clone())
    } else {
        Ok(args[2].clone())
    }
}

/// AND(...): true when every element of every argument is truthy
pub fn fn_and(args: &[Value]) -> FormulaResult<Value> {
    let mut result = Ok(true);
    for_each_scalar(args, &mut |value| {
        if let Ok(true) = &result {
            result = value.expect_bool();
        }
    });
    Ok(Value::Bool(result?))
}

/// OR(...): true when any element of any argument is truthy
pub fn fn_or(args: &[Value]) -> FormulaResult<Value> {
    let mut result = Ok(false);
    for_each_scalar(args, &mut |value| {
        if let Ok(false) = &result {
            result = value.expect_bool();
        }
    });
    Ok(Value::Bool(result?))
}

/// NOT(x)
pub fn fn_not(args: &[Value]) -> FormulaResult<Value> {
    let value = args[0].clone().into_scalar()?.expect_bool()?;
    Ok(Value::Bool(!value))
}
