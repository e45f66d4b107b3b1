#![deny(rust_2018_idioms)]

//! Facade over the descent parser generator: `descent_codegen` turns a
//! resolved grammar model into Rust parser source, `descent_core` is the
//! runtime the emitted parsers run on.

#[doc(inline)]
pub use descent_core::*;

#[doc(inline)]
pub use descent_codegen::{generate, model, Config, Generated};
