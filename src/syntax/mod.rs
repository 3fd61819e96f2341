pub mod ast;

pub mod lexer;

pub mod operators;

pub mod parser;

pub mod tokens;

pub use ast::*;
pub use lexer::*;
pub use parser::*;
pub use tokens::*;
