//! Lexical pattern extraction: one named, precompiled, start-anchored
//! pattern per entity whose action is exactly a pattern consumption.
//! Centralizes lexical definitions and avoids redundant recompilation.

use super::{banner, regex_literal};
use crate::{model::{Model, ParseAction}, names};
use anyhow::Result;
use std::fmt::Write;

pub(super) fn generate(model: &Model) -> Result<String> {
    let mut out = banner("Lexical patterns");
    out += "\n";

    for entity in model.entities() {
        if let ParseAction::Pattern(pattern) = &entity.action {
            writeln!(
                &mut out,
                "pub static {}: Lazy<Regex> = Lazy::new(|| Regex::new({}).unwrap());",
                names::upper_snake_case(&entity.name),
                regex_literal(&format!("^{}", pattern.pattern)),
            )?;
        }
    }

    Ok(out)
}
