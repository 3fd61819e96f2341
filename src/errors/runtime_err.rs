use thiserror::Error;

use super::err::{ErrorState, EXIT_FATAL};

/// Failures of the postfix evaluator. None of them can be recovered from:
/// the host prints the message and exits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("[line {line}] Operand must be a number.")]
    NumberOperands { line: usize },
    #[error("[line {line}] Operands must be two numbers or two strings.")]
    AddOperands { line: usize },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid operand for NOT operator")]
    InvalidNotOperand,
    #[error("Invalid operator")]
    InvalidOperator,
    #[error("Missing operand")]
    MissingOperand,
}

impl EvalError {
    /// Type errors are classified as runtime errors and go through the
    /// end-of-run checkpoint; everything else carries its own exit code.
    pub fn state(&self) -> Option<ErrorState> {
        match self {
            EvalError::NumberOperands { .. } | EvalError::AddOperands { .. } => {
                Some(ErrorState::Runtime)
            }
            _ => None,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.state() {
            Some(state) => state.exit_code(),
            None => EXIT_FATAL,
        }
    }
}
