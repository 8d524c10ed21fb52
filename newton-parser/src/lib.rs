//! Parsing of textual mathematical expressions into an [`Expr`](expr::Expr) tree.
//!
//! The tree type itself lives in [`expr`], since it is shared by every other stage of the engine
//! (evaluation, differentiation and simplification all consume and produce it). Text is turned
//! into a tree by [`parse`], or by [`Parser`](parser::Parser) when the nesting limit needs to be
//! configured.

pub mod expr;
pub mod parser;
pub mod tokenizer;

pub use parser::parse;
