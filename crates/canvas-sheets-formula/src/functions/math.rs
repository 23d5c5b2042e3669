//! Scalar math functions
//!
//! These are strict: a range-shaped argument must reduce to exactly one
//! element, and that element must coerce to a number.

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Value;

/// Reduce one argument to a required number
fn scalar_number(args: &[Value], index: usize) -> FormulaResult<f64> {
    args[index].clone().into_scalar()?.expect_number()
}

/// ABS(x)
pub fn fn_abs(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(scalar_number(args, 0)?.abs()))
}

/// ROUND(x, [digits]) - round half away from zero
pub fn fn_round(args: &[Value]) -> FormulaResult<Value> {
    let number = scalar_number(args, 0)?;
    let digits = if args.len() > 1 {
        scalar_number(args, 1)? as i32
    } else {
        0
    };

    let multiplier = 10f64.powi(digits);
    let result = if number >= 0.0 {
        (number * multiplier + 0.5).floor() / multiplier
    } else {
        (number * multiplier - 0.5).ceil() / multiplier
    };

    Ok(Value::Number(result))
}

/// FLOOR(x)
pub fn fn_floor(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(scalar_number(args, 0)?.floor()))
}

/// CEIL(x)
pub fn fn_ceil(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(scalar_number(args, 0)?.ceil()))
}

/// SQRT(x), x >= 0
pub fn fn_sqrt(args: &[Value]) -> FormulaResult<Value> {
    let number = scalar_number(args, 0)?;
    if number < 0.0 {
        return Err(FormulaError::Domain("SQRT of a negative number".into()));
    }
    Ok(Value::Number(number.sqrt()))
}

/// POWER(base, exponent)
pub fn fn_power(args: &[Value]) -> FormulaResult<Value> {
    let base = scalar_number(args, 0)?;
    let exponent = scalar_number(args, 1)?;
    Ok(Value::Number(base.powf(exponent)))
}

/// LOG(x) natural log, or LOG(x, base)
pub fn fn_log(args: &[Value]) -> FormulaResult<Value> {
    let number = scalar_number(args, 0)?;
    if number <= 0.0 {
        return Err(FormulaError::Domain("LOG of a non-positive number".into()));
    }

    if args.len() > 1 {
        let base = scalar_number(args, 1)?;
        if base <= 0.0 || base == 1.0 {
            return Err(FormulaError::Domain("LOG base must be positive and not 1".into()));
        }
        return Ok(Value::Number(number.ln() / base.ln()));
    }

    Ok(Value::Number(number.ln()))
}

/// LOG10(x), x > 0
pub fn fn_log10(args: &[Value]) -> FormulaResult<Value> {
    let number = scalar_number(args, 0)?;
    if number <= 0.0 {
        return Err(FormulaError::Domain("LOG10 of a non-positive number".into()));
    }
    Ok(Value::Number(number.log10()))
}

/// EXP(x)
pub fn fn_exp(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(scalar_number(args, 0)?.exp()))
}

/// SIN(x)
pub fn fn_sin(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(scalar_number(args, 0)?.sin()))
}

/// COS(x)
pub fn fn_cos(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(scalar_number(args, 0)?.cos()))
}

/// TAN(x)
pub fn fn_tan(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(scalar_number(args, 0)?.tan()))
}
