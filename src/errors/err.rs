use super::syntax_err::SyntaxErr;

pub const EXIT_SYNTAX: u8 = 65;
pub const EXIT_RUNTIME: u8 = 70;
pub const EXIT_IO: u8 = 1;
/// Division by zero, bad NOT operands and malformed postfix sequences.
pub const EXIT_FATAL: u8 = 65;

/// Worst diagnostic recorded during a run. Ordered so that escalating is a `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorState {
    None,
    Syntax,
    Runtime,
}

impl ErrorState {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorState::None => 0,
            ErrorState::Syntax => EXIT_SYNTAX,
            ErrorState::Runtime => EXIT_RUNTIME,
        }
    }
}

impl Default for ErrorState {
    fn default() -> Self {
        ErrorState::None
    }
}

/// Shared by the scanner and the parser for one run. Reports go to stderr
/// as they happen; the state is only read back at the end.
#[derive(Debug, Default)]
pub struct Diagnostics {
    state: ErrorState,
    errors: Vec<SyntaxErr>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn syntax(&mut self, err: SyntaxErr) {
        tracing::debug!(line = err.line, reason = ?err.reason, "syntax error");
        eprintln!("{}", err);
        self.errors.push(err);
        self.escalate(ErrorState::Syntax);
    }

    pub fn escalate(&mut self, state: ErrorState) {
        self.state = self.state.max(state);
    }

    pub fn state(&self) -> ErrorState {
        self.state
    }

    pub fn has_errors(&self) -> bool {
        self.state != ErrorState::None
    }

    pub fn errors(&self) -> &[SyntaxErr] {
        &self.errors
    }

    pub fn exit_code(&self) -> u8 {
        self.state.exit_code()
    }
}
