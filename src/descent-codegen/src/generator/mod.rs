mod entities;
mod parsers;
mod patterns;

use crate::{
    config::Config,
    model::{Entity, Model, ParseAction, Primitive, Property},
    names,
};
use anyhow::{bail, Result};
use std::collections::HashSet;

/// The emitted parser source plus the diagnostics collected while
/// generating it.
#[derive(Debug)]
pub struct Generated {
    pub source: String,
    pub warnings: Vec<String>,
}

/// Walks the grammar model and produces the source of a complete
/// recursive-descent parser: value types, parsing functions and
/// precompiled lexical patterns, in that order. The model is read-only;
/// with `emit_info` disabled the output is byte-identical across runs.
pub fn generate(model: &Model, config: &Config) -> Result<Generated> {
    if model.entities().is_empty() {
        return Ok(Generated {
            source: "// no entities generated\n".to_string(),
            warnings: Vec::new(),
        });
    }

    validate_patterns(model)?;

    let mut warnings = Vec::new();
    let body = [
        prelude().to_string(),
        entities::generate(model, &mut warnings)?,
        parsers::generate(model, &mut warnings)?,
        patterns::generate(model)?,
    ]
    .join("\n");

    let mut source = String::new();
    if let Some(header) = header(config) {
        source += &header;
        source += "\n";
    }
    source += "#![allow(clippy::all, unused_imports, unused_mut, unused_variables)]\n\n";
    match &config.namespace {
        Some(namespace) => {
            source += &format!("pub mod {} {{\n", names::snake_case(namespace));
            source += &indent(&body);
            source += "\n}\n";
        }
        None => {
            source += &body;
            source += "\n";
        }
    }

    // The same property may be renamed by more than one emitter stage;
    // surface each notice once.
    let mut seen = HashSet::new();
    warnings.retain(|warning| seen.insert(warning.clone()));

    Ok(Generated { source, warnings })
}

fn header(config: &Config) -> Option<String> {
    if !config.emit_info {
        return None;
    }
    let now = chrono::Local::now();
    let mut header = format!(
        "// DO NOT EDIT THIS FILE\n\
         // This file was generated using descent\n\
         // on {}\n",
        now.format("%B %e, %Y at %H:%M:%S"),
    );
    if !config.sources.is_empty() {
        header += &format!(
            "// Source{} : {}\n",
            if config.sources.len() > 1 { "s" } else { "" },
            config.sources.join(", "),
        );
    }
    Some(header)
}

fn prelude() -> &'static str {
    "use descent_core::{attempt, many0, maybe, Lazy, ParseError, Regex, Result, Scanner};\n\
     use std::fmt;\n"
}

/// Every pattern must compile once `^`-anchored and carry exactly one
/// capturing group; checked here so the capture access can never go out
/// of range at parse time.
fn validate_patterns(model: &Model) -> Result<()> {
    for entity in model.entities() {
        if let ParseAction::Pattern(pattern) = &entity.action {
            let anchored = format!("^{}", pattern.pattern);
            let compiled = match regex::Regex::new(&anchored) {
                Ok(compiled) => compiled,
                Err(e) => bail!("invalid pattern for entity '{}': {}", entity.name, e),
            };
            if compiled.captures_len() != 2 {
                bail!(
                    "pattern for entity '{}' must have exactly one capturing group, found {}",
                    entity.name,
                    compiled.captures_len() - 1,
                );
            }
        }
    }
    Ok(())
}

/// The Rust type an entity's parsed value has: the primitive alias for
/// pattern leaves, otherwise the emitted struct or enum name.
pub(crate) fn type_name(entity: &Entity) -> String {
    match entity.type_alias {
        Some(Primitive::Text) => "String".to_string(),
        Some(Primitive::Boolean) => "bool".to_string(),
        None => names::pascal_case(&entity.name),
    }
}

/// A property's field/local type: plural slots are lists, entity-valued
/// scalars are boxed options so absence is representable and recursive
/// rules have indirection.
pub(crate) fn slot_type(model: &Model, property: &Property) -> String {
    let referenced = model.entity(property.entity);
    let inner = type_name(referenced);
    if property.is_plural {
        format!("Vec<{}>", inner)
    } else if referenced.type_alias.is_some() {
        inner
    } else {
        format!("Option<Box<{}>>", inner)
    }
}

/// The zero value a local slot starts at.
pub(crate) fn slot_init(model: &Model, property: &Property) -> &'static str {
    let referenced = model.entity(property.entity);
    if property.is_plural {
        "Vec::new()"
    } else {
        match referenced.type_alias {
            Some(Primitive::Text) => "String::new()",
            Some(Primitive::Boolean) => "false",
            None => "None",
        }
    }
}

/// A Rust string literal for `text`, quotes and escapes included.
pub(crate) fn string_literal(text: &str) -> String {
    format!("{:?}", text)
}

/// A raw string literal holding a regex source, with enough `#` marks to
/// contain any quotes in the pattern.
pub(crate) fn regex_literal(pattern: &str) -> String {
    let mut hashes = 0;
    loop {
        let guard = "#".repeat(hashes);
        let terminator = format!("\"{}", guard);
        if !pattern.contains(&terminator) {
            return format!("r{}\"{}\"{}", guard, pattern, guard);
        }
        hashes += 1;
    }
}

pub(crate) fn indent(code: &str) -> String {
    code.lines()
        .map(|line| if line.is_empty() { line.to_string() } else { format!("    {}", line) })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn banner(title: &str) -> String {
    format!(
        "// ------------------------------------------------------------------\n\
         // {}\n\
         // ------------------------------------------------------------------\n",
        title,
    )
}
