//! Response evaluator port

use ccsmoke_domain::response::ResponseSpec;
use ccsmoke_domain::testing::{Assertion, AssertionResult};

/// Evaluates probe assertions against an observed response.
pub trait ResponseEvaluator: Send + Sync {
    /// Runs every assertion, in order, and returns one result per assertion.
    fn evaluate(&self, assertions: &[Assertion], response: &ResponseSpec) -> Vec<AssertionResult>;
}
