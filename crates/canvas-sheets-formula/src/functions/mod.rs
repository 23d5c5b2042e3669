//! Built-in spreadsheet functions

pub mod financial;
pub mod logical;
pub mod math;
pub mod statistical;

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Function implementation signature
pub type FunctionImpl = fn(&[Value]) -> FormulaResult<Value>;

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

impl FunctionDef {
    /// Arity window check, run before any argument coercion
    pub fn check_arity(&self, actual: usize) -> FormulaResult<()> {
        let ok = actual >= self.min_args && self.max_args.map_or(true, |max| actual <= max);
        if ok {
            return Ok(());
        }
        let expected = match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{} to {}", self.min_args, max),
            None => format!("at least {}", self.min_args),
        };
        Err(FormulaError::ArityMismatch {
            function: self.name.to_string(),
            expected,
            actual,
        })
    }
}

/// Function registry
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register_statistical_functions();
        registry.register_logical_functions();
        registry.register_math_functions();
        registry.register_financial_functions();

        registry
    }

    /// Look up a function by name, case-insensitively
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_uppercase())
    }

    fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_string(), def);
    }

    fn register_statistical_functions(&mut self) {
        self.register(FunctionDef {
            name: "SUM",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_sum,
        });
        self.register(FunctionDef {
            name: "AVERAGE",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_average,
        });
        // MEAN is an alias for AVERAGE
        self.register(FunctionDef {
            name: "MEAN",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_average,
        });
        self.register(FunctionDef {
            name: "MIN",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_min,
        });
        self.register(FunctionDef {
            name: "MAX",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_max,
        });
        self.register(FunctionDef {
            name: "COUNT",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_count,
        });
        self.register(FunctionDef {
            name: "COUNTA",
            min_args: 1,
            max_args: None,
            implementation: statistical::fn_counta,
        });
    }

    fn register_logical_functions(&mut self) {
        self.register(FunctionDef {
            name: "IF",
            min_args: 3,
            max_args: Some(3),
            implementation: logical::fn_if,
        });
        self.register(FunctionDef {
            name: "AND",
            min_args: 1,
            max_args: None,
            implementation: logical::fn_and,
        });
        self.register(FunctionDef {
            name: "OR",
            min_args: 1,
            max_args: None,
            implementation: logical::fn_or,
        });
        self.register(FunctionDef {
            name: "NOT",
            min_args: 1,
            max_args: Some(1),
            implementation: logical::fn_not,
        });
    }

    fn register_math_functions(&mut self) {
        self.register(FunctionDef {
            name: "ABS",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_abs,
        });
        self.register(FunctionDef {
            name: "ROUND",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_round,
        });
        self.register(FunctionDef {
            name: "FLOOR",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_floor,
        });
        self.register(FunctionDef {
            name: "CEIL",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_ceil,
        });
        self.register(FunctionDef {
            name: "SQRT",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_sqrt,
        });
        self.register(FunctionDef {
            name: "POWER",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_power,
        });
        self.register(FunctionDef {
            name: "LOG",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_log,
        });
        self.register(FunctionDef {
            name: "LOG10",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_log10,
        });
        self.register(FunctionDef {
            name: "EXP",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_exp,
        });
        self.register(FunctionDef {
            name: "SIN",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_sin,
        });
        self.register(FunctionDef {
            name: "COS",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_cos,
        });
        self.register(FunctionDef {
            name: "TAN",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_tan,
        });
    }

    fn register_financial_functions(&mut self) {
        self.register(FunctionDef {
            name: "PMT",
            min_args: 3,
            max_args: Some(5),
            implementation: financial::fn_pmt,
        });
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

pub fn registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Visit every scalar element of the arguments, recursing through collections
pub(crate) fn for_each_scalar<'a>(args: &'a [Value], f: &mut impl FnMut(&'a Value)) {
    fn visit<'a>(value: &'a Value, f: &mut impl FnMut(&'a Value)) {
        match value {
            Value::Array(items) => {
                for item in items {
                    visit(item, f);
                }
            }
            Value::Matrix(rows) => {
                for row in rows {
                    for item in row {
                        visit(item, f);
                    }
                }
            }
            scalar => f(scalar),
        }
    }

    for arg in args {
        visit(arg, f);
    }
}

/// Flatten all arguments and keep the numeric-coercible elements
pub(crate) fn numeric_elements(args: &[Value]) -> Vec<f64> {
    let mut numbers = Vec::new();
    for_each_scalar(args, &mut |value| {
        if let Some(n) = value.as_number() {
            numbers.push(n);
        }
    });
    numbers
}
