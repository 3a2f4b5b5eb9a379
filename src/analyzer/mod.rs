//! The Analyzer module is in charge of taking a
//! Jack source file and producing its parse tree.
//!
//! It does this by implementing a line-oriented tokenizer
//! and a two-token-lookahead recursive descent parser.
//! The tree is then handed to a sink (see `tree`) to be rendered.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod tree;
