//! Markup syntax shared by the `html!` macro and the runtime parser in `ssrhtml`.
//!
//! [parse_html] parses markup from a string at runtime, while [SynAstNode] parses
//! the same syntax from a token stream inside a procedural macro.

mod ast;
mod parser;
mod tokens;

pub use ast::{AstAttribute, AstNode, AttributeValue, ReservedComponent};
pub use parser::{parse_html, ParseError};
pub use tokens::SynAstNode;
