//! Parser for template patterns

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::{parse_alternation, parse_plain};
