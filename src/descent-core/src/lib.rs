#![deny(rust_2018_idioms)]

//! Runtime for parsers generated by `descent-codegen`: a cursor-based,
//! whitespace-aware text scanner plus the backtracking combinators the
//! emitted parsing functions call into.

mod combinator;
mod error;
mod scanner;

pub use self::{
    combinator::{attempt, many0, maybe, MAX_DEPTH},
    error::ParseError,
    scanner::Scanner,
};

// Re-exported so generated code resolves its pattern statics against a
// single regex/once_cell version.
pub use once_cell::sync::Lazy;
pub use regex::Regex;

pub type Result<O> = std::result::Result<O, ParseError>;
