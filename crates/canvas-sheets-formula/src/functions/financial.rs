//! Financial functions

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Value;

/// PMT(rate, nper, pv, [fv], [when]) - periodic payment of an annuity
///
/// `when` is 0 for payments due at period end, 1 for period start. With a
/// zero rate the formula reduces to `-(pv + fv) / nper`; a zero `nper` is a
/// division by zero.
pub fn fn_pmt(args: &[Value]) -> FormulaResult<Value> {
    let scalar = |index: usize| -> FormulaResult<f64> {
        args[index].clone().into_scalar()?.expect_number()
    };

    let rate = scalar(0)?;
    let nper = scalar(1)?;
    let pv = scalar(2)?;
    let fv = if args.len() > 3 { scalar(3)? } else { 0.0 };
    let when = if args.len() > 4 { scalar(4)? } else { 0.0 };

    if nper == 0.0 {
        return Err(FormulaError::DivisionByZero);
    }

    if rate == 0.0 {
        return Ok(Value::Number(-(pv + fv) / nper));
    }

    let factor = (1.0 + rate).powf(nper);
    let payment = -(pv * factor + fv) * rate / ((factor - 1.0) * (1.0 + rate * when));
    Ok(Value::Number(payment))
}
