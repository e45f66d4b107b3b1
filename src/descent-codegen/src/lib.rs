#![deny(rust_2018_idioms)]

//! Parser-generator backend: given a fully resolved grammar model, emits
//! the Rust source of a complete recursive-descent parser whose runtime
//! is `descent-core`.

mod config;
mod generator;
mod names;

pub mod model;

pub use self::{
    config::Config,
    generator::{generate, Generated},
};
