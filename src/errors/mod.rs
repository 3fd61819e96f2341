pub mod err;

pub mod runtime_err;

pub mod syntax_err;

pub use err::*;
pub use runtime_err::*;
pub use syntax_err::*;
