//! Built-in function library.
//!
//! Nothing here is known to the evaluator; a host opts in with
//! [`register_builtins`] or [`EvaluationContext::with_builtins`].

pub mod date;
pub mod file;
pub mod json;
pub mod number;
pub mod string;
pub mod system;

use crate::context::EvaluationContext;
use crate::function::Function;
use std::sync::Arc;

pub use file::FileReference;

/// Every built-in function.
pub fn all_functions() -> Vec<Arc<dyn Function>> {
    let mut functions: Vec<Arc<dyn Function>> = Vec::new();
    let groups = [
        string::functions(),
        number::functions(),
        json::functions(),
        system::functions(),
        date::functions(),
        file::functions(),
    ];
    for group in groups {
        functions.extend(group.into_iter().map(|f| Arc::new(f) as Arc<dyn Function>));
    }
    functions
}

pub fn register_builtins(ctx: &mut EvaluationContext) {
    for function in all_functions() {
        ctx.register_shared(function);
    }
}
