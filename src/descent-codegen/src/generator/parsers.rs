//! Parsing-function emission: one function per non-inlined entity,
//! translating its ParseAction tree into scanner/runtime calls inside one
//! backtracking scope, plus the `parse` entry point.

use super::{banner, indent, slot_init, slot_type, string_literal, type_name};
use crate::{
    model::{
        ConsumeAny, ConsumeEntity, ConsumePattern, ConsumeString, Entity, Model, ParseAction,
        Primitive, Property,
    },
    names,
};
use anyhow::{bail, Result};
use std::fmt::Write;

pub(super) fn generate(model: &Model, warnings: &mut Vec<String>) -> Result<String> {
    let mut out = banner("Parsing functions");
    out += "\n";
    out += &entry_point(model);

    for entity in model.entities() {
        if entity.is_pattern_leaf() {
            continue;
        }
        out += "\n";
        out += &if entity.is_virtual {
            dispatcher_parser(model, entity)?
        } else {
            entity_parser(model, entity, warnings)?
        };
    }

    Ok(out)
}

/// Top-level driver: parse the root entity, then require full consumption.
fn entry_point(model: &Model) -> String {
    let root = model.root();
    let root_type = type_name(root);
    let root_call = if root.is_pattern_leaf() {
        format!("s.consume_pattern(&{})?.to_string()", names::upper_snake_case(&root.name))
    } else {
        format!("parse_{}(&mut s)?", names::snake_case(&root.name))
    };

    format!(
        "pub fn parse(input: &str) -> Result<{root_type}> {{\n\
         \x20   let mut s = Scanner::new(input);\n\
         \x20   let ast = {root_call};\n\
         \x20   if !s.is_at_end() {{\n\
         \x20       return Err(ParseError::trailing_input(s.context()));\n\
         \x20   }}\n\
         \x20   Ok(ast)\n\
         }}\n",
        root_type = root_type,
        root_call = root_call,
    )
}

/// A virtual entity's parser is a transparent pass-through: it tries each
/// concrete alternative in declared order and wraps whichever value was
/// produced into the union, never building an instance of its own.
fn dispatcher_parser(model: &Model, entity: &Entity) -> Result<String> {
    let enum_name = names::pascal_case(&entity.name);
    let fn_name = names::snake_case(&entity.name);

    let body = match &entity.action {
        ParseAction::Any(any) => {
            let mut body = String::from("let checkpoint = s.position();\n");
            for option in &any.actions {
                let (expr, wrap) = dispatch_arm(model, entity, option)?;
                writeln!(&mut body, "match {} {{", expr)?;
                writeln!(&mut body, "    Ok(value) => return Ok({}),", wrap)?;
                writeln!(&mut body, "    Err(_) => s.set_position(checkpoint),")?;
                writeln!(&mut body, "}}")?;
            }
            write!(
                &mut body,
                "Err(ParseError::alternation({}, s.context()))",
                string_literal(&any.label),
            )?;
            body
        }
        ParseAction::Entity(_) => {
            let (expr, wrap) = dispatch_arm(model, entity, &entity.action)?;
            format!("let value = {}?;\nOk({})", expr, wrap)
        }
        _ => bail!(
            "virtual entity '{}' must dispatch over entities or patterns",
            entity.name,
        ),
    };

    Ok(format!(
        "pub fn parse_{fn_name}(s: &mut Scanner<'_>) -> Result<{enum_name}> {{\n\
         \x20   attempt(s, |s| {{\n\
         {body}\n\
         \x20   }})\n\
         \x20   .map_err(|e| ParseError::entity({name_lit}, s.context(), e))\n\
         }}\n",
        fn_name = fn_name,
        enum_name = enum_name,
        body = indent(&indent(&body)),
        name_lit = string_literal(&names::pascal_case(&entity.name)),
    ))
}

/// One alternative of a dispatcher: the expression that parses it and the
/// union value wrapping the produced `value`.
fn dispatch_arm(
    model: &Model,
    entity: &Entity,
    option: &ParseAction,
) -> Result<(String, String)> {
    let enum_name = names::pascal_case(&entity.name);
    let target_id = match option {
        ParseAction::Entity(consume) => consume.entity,
        _ => bail!(
            "virtual entity '{}' has a non-entity alternative; only entity references \
             can drive dispatch",
            entity.name,
        ),
    };
    let target = model.entity(target_id);
    let variant = names::pascal_case(&target.name);

    if target.is_pattern_leaf() {
        let extractor = names::upper_snake_case(&target.name);
        let wrap = match target.type_alias {
            Some(Primitive::Boolean) => format!("{}::{}(true)", enum_name, variant),
            _ => format!("{}::{}(value.to_string())", enum_name, variant),
        };
        Ok((format!("s.consume_pattern(&{})", extractor), wrap))
    } else {
        Ok((
            format!("parse_{}(s)", names::snake_case(&target.name)),
            format!("{}::{}(value)", enum_name, variant),
        ))
    }
}

fn entity_parser(model: &Model, entity: &Entity, warnings: &mut Vec<String>) -> Result<String> {
    let ty = names::pascal_case(&entity.name);
    let fn_name = names::snake_case(&entity.name);

    // One local slot per property, starting at its zero value.
    let mut locals = String::new();
    for property in &entity.properties {
        writeln!(
            &mut locals,
            "    let mut {}: {} = {};",
            names::slot_name(property, model, warnings),
            slot_type(model, property),
            slot_init(model, property),
        )?;
    }

    let body = action_code(model, entity, &entity.action, warnings)?;

    let construct = if entity.properties.is_empty() {
        format!("{} {{}}", ty)
    } else {
        let fields = entity
            .properties
            .iter()
            .map(|p| names::slot_name(p, model, warnings))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {{ {} }}", ty, fields)
    };

    Ok(format!(
        "pub fn parse_{fn_name}(s: &mut Scanner<'_>) -> Result<{ty}> {{\n\
         {locals}\
         \x20   attempt(s, |s| {{\n\
         {body}\n\
         \x20       Ok(())\n\
         \x20   }})\n\
         \x20   .map_err(|e| ParseError::entity({name_lit}, s.context(), e))?;\n\
         \n\
         \x20   Ok({construct})\n\
         }}\n",
        fn_name = fn_name,
        ty = ty,
        locals = locals,
        body = indent(&indent(&body)),
        name_lit = string_literal(&ty),
        construct = construct,
    ))
}

/// Exhaustive dispatch over the five action kinds, then the generic
/// optionality wrapper (ConsumeString emits its own non-failing form).
fn action_code(
    model: &Model,
    entity: &Entity,
    action: &ParseAction,
    warnings: &mut Vec<String>,
) -> Result<String> {
    let code = match action {
        ParseAction::String(consume) => consume_string_code(model, entity, consume, warnings)?,
        ParseAction::Pattern(consume) => consume_pattern_code(model, entity, consume, warnings)?,
        ParseAction::Entity(consume) => consume_entity_code(model, entity, consume, warnings)?,
        ParseAction::All(all) => {
            let mut code = String::new();
            for (idx, child) in all.actions.iter().enumerate() {
                if idx > 0 {
                    code += "\n";
                }
                code += &action_code(model, entity, child, warnings)?;
            }
            code
        }
        ParseAction::Any(any) => consume_any_code(model, entity, any, warnings)?,
    };

    if action.is_optional() && !matches!(action, ParseAction::String(_)) {
        Ok(format!("maybe(s, |s| {{\n{}\n    Ok(())\n}});\n", indent(code.trim_end())))
    } else {
        Ok(code)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum SlotKind {
    Text,
    Boolean,
    Entity,
}

fn slot_kind(model: &Model, property: &Property) -> SlotKind {
    match model.entity(property.entity).type_alias {
        Some(Primitive::Text) => SlotKind::Text,
        Some(Primitive::Boolean) => SlotKind::Boolean,
        None => SlotKind::Entity,
    }
}

fn bound_slot<'m>(entity: &'m Entity, property: Option<usize>) -> Option<&'m Property> {
    property.map(|idx| &entity.properties[idx])
}

fn consume_string_code(
    model: &Model,
    entity: &Entity,
    consume: &ConsumeString,
    warnings: &mut Vec<String>,
) -> Result<String> {
    let lit = string_literal(&consume.literal);
    let slot = bound_slot(entity, consume.property);

    let code = match slot {
        None => {
            if consume.is_optional {
                format!("s.consume_literal_maybe({});\n", lit)
            } else {
                format!("s.consume_literal({})?;\n", lit)
            }
        }
        Some(property) => {
            if property.is_plural {
                bail!(
                    "literal consumption cannot populate plural property '{}' of '{}'",
                    property.name,
                    entity.name,
                );
            }
            let name = names::slot_name(property, model, warnings);
            match (slot_kind(model, property), consume.is_optional) {
                (SlotKind::Boolean, false) => {
                    format!("s.consume_literal({})?;\n{} = true;\n", lit, name)
                }
                (SlotKind::Boolean, true) => {
                    format!("{} = s.consume_literal_maybe({}).is_some();\n", name, lit)
                }
                (SlotKind::Text, false) => {
                    format!("{} = s.consume_literal({})?.to_string();\n", name, lit)
                }
                (SlotKind::Text, true) => format!(
                    "if let Some(value) = s.consume_literal_maybe({}) {{\n\
                     \x20   {} = value.to_string();\n\
                     }}\n",
                    lit, name,
                ),
                (SlotKind::Entity, _) => bail!(
                    "literal consumption cannot populate entity-typed property '{}' of '{}'",
                    property.name,
                    entity.name,
                ),
            }
        }
    };

    Ok(code)
}

fn consume_pattern_code(
    model: &Model,
    entity: &Entity,
    consume: &ConsumePattern,
    warnings: &mut Vec<String>,
) -> Result<String> {
    // A pattern action refers to its own entity's precompiled pattern
    // static, which only exists when the pattern is the entity's whole
    // action. A pattern nested in a larger action has no static to name.
    if !matches!(entity.action, ParseAction::Pattern(_)) {
        bail!(
            "entity '{}' consumes a pattern inside a larger action; hoist the pattern \
             into its own entity",
            entity.name,
        );
    }
    let extractor = names::upper_snake_case(&entity.name);

    Ok(match bound_slot(entity, consume.property) {
        None => format!("s.consume_pattern(&{})?;\n", extractor),
        Some(property) => {
            let name = names::slot_name(property, model, warnings);
            match slot_kind(model, property) {
                SlotKind::Boolean => {
                    format!("s.consume_pattern(&{})?;\n{} = true;\n", extractor, name)
                }
                _ => format!("{} = s.consume_pattern(&{})?.to_string();\n", name, extractor),
            }
        }
    })
}

fn consume_entity_code(
    model: &Model,
    entity: &Entity,
    consume: &ConsumeEntity,
    warnings: &mut Vec<String>,
) -> Result<String> {
    let target = model.entity(consume.entity);
    let slot = bound_slot(entity, consume.property);

    // Pattern leaves are inlined as direct pattern consumptions; anything
    // else dispatches to the target's parsing function.
    let code = match slot {
        Some(property) if property.is_plural => {
            let name = names::slot_name(property, model, warnings);
            if target.is_pattern_leaf() {
                let extractor = names::upper_snake_case(&target.name);
                match target.type_alias {
                    Some(Primitive::Boolean) => format!(
                        "{} = many0(s, |s| {{\n\
                         \x20   s.consume_pattern(&{})?;\n\
                         \x20   Ok(true)\n\
                         }});\n",
                        name, extractor,
                    ),
                    _ => format!(
                        "{} = many0(s, |s| Ok(s.consume_pattern(&{})?.to_string()));\n",
                        name, extractor,
                    ),
                }
            } else {
                format!("{} = many0(s, parse_{});\n", name, names::snake_case(&target.name))
            }
        }
        Some(property) => {
            let name = names::slot_name(property, model, warnings);
            if target.is_pattern_leaf() {
                let extractor = names::upper_snake_case(&target.name);
                match slot_kind(model, property) {
                    SlotKind::Boolean => {
                        format!("s.consume_pattern(&{})?;\n{} = true;\n", extractor, name)
                    }
                    _ => format!("{} = s.consume_pattern(&{})?.to_string();\n", name, extractor),
                }
            } else {
                format!(
                    "{} = Some(Box::new(parse_{}(s)?));\n",
                    name,
                    names::snake_case(&target.name),
                )
            }
        }
        None => {
            if target.is_pattern_leaf() {
                format!("s.consume_pattern(&{})?;\n", names::upper_snake_case(&target.name))
            } else {
                format!("parse_{}(s)?;\n", names::snake_case(&target.name))
            }
        }
    };

    Ok(code)
}

/// Ordered alternation: each option runs in its own immediately-invoked
/// closure so failed alternatives can rewind the cursor before the next
/// is tried; exhaustion raises the action's diagnostic label.
fn consume_any_code(
    model: &Model,
    entity: &Entity,
    any: &ConsumeAny,
    warnings: &mut Vec<String>,
) -> Result<String> {
    let mut body = String::from("let checkpoint = s.position();\n");
    for option in &any.actions {
        let option_code = action_code(model, entity, option, warnings)?;
        body += "match (|s: &mut Scanner<'_>| -> Result<()> {\n";
        body += &indent(option_code.trim_end());
        body += "\n    Ok(())\n})(s) {\n";
        body += "    Ok(()) => return Ok(()),\n";
        body += "    Err(_) => s.set_position(checkpoint),\n";
        body += "}\n";
    }
    write!(
        &mut body,
        "Err(ParseError::alternation({}, s.context()))",
        string_literal(&any.label),
    )?;

    Ok(format!(
        "(|s: &mut Scanner<'_>| -> Result<()> {{\n{}\n}})(s)?;\n",
        indent(&body),
    ))
}
