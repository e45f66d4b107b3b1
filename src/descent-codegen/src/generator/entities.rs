//! Value-type declarations: one `struct` per concrete entity, one
//! enumerated union per virtual entity, each with a `Display` rendering
//! `Name(prop=value,prop=[v,v,...],...)` for golden-output comparison.

use super::{banner, indent, slot_type, type_name};
use crate::{
    model::{Entity, Model, Primitive},
    names,
};
use anyhow::Result;
use std::fmt::Write;

pub(super) fn generate(model: &Model, warnings: &mut Vec<String>) -> Result<String> {
    let mut out = banner("Value types");

    for (idx, entity) in model.entities().iter().enumerate() {
        // Pattern leaves produce plain text or booleans; they get no type
        // of their own.
        if entity.is_pattern_leaf() {
            continue;
        }
        out += "\n";
        if entity.is_virtual {
            out += &generate_union(model, crate::model::EntityId(idx), entity);
        } else {
            out += &generate_struct(model, entity, warnings)?;
        }
    }

    Ok(out)
}

/// A virtual entity is a single-level capability tag: an enum with one
/// variant per entity that lists it among its supers, driving alternation
/// dispatch. `Display` passes through to the winning value.
fn generate_union(model: &Model, id: crate::model::EntityId, entity: &Entity) -> String {
    let name = names::pascal_case(&entity.name);
    let mut variants = String::new();
    let mut arms = String::new();
    for (_, implementor) in model.implementors(id) {
        let variant = names::pascal_case(&implementor.name);
        let payload = type_name(implementor);
        variants += &format!("    {}({}),\n", variant, payload);
        arms += &format!(
            "            {}::{}(value) => write!(f, \"{{}}\", value),\n",
            name, variant,
        );
    }

    format!(
        "#[derive(Debug, Clone, PartialEq)]\n\
         pub enum {name} {{\n\
         {variants}\
         }}\n\
         \n\
         impl fmt::Display for {name} {{\n\
         \x20   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {{\n\
         \x20       match self {{\n\
         {arms}\
         \x20       }}\n\
         \x20   }}\n\
         }}\n",
        name = name,
        variants = variants,
        arms = arms,
    )
}

fn generate_struct(model: &Model, entity: &Entity, warnings: &mut Vec<String>) -> Result<String> {
    let name = names::pascal_case(&entity.name);

    // The plural-initializing constructor of the original becomes a
    // Default derive: every slot's zero value is its Default.
    let derives = if entity.has_plural_property() {
        "#[derive(Debug, Clone, PartialEq, Default)]"
    } else {
        "#[derive(Debug, Clone, PartialEq)]"
    };

    let mut fields = String::new();
    for property in &entity.properties {
        writeln!(
            &mut fields,
            "    pub {}: {},",
            names::slot_name(property, model, warnings),
            slot_type(model, property),
        )?;
    }

    let mut display = String::new();
    writeln!(&mut display, "write!(f, \"{}(\")?;", name)?;
    for (idx, property) in entity.properties.iter().enumerate() {
        if idx > 0 {
            writeln!(&mut display, "write!(f, \",\")?;")?;
        }
        display += &display_property(model, property, warnings)?;
    }
    writeln!(&mut display, "write!(f, \")\")")?;

    Ok(format!(
        "{derives}\n\
         pub struct {name} {{\n\
         {fields}\
         }}\n\
         \n\
         impl fmt::Display for {name} {{\n\
         \x20   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {{\n\
         {body}\n\
         \x20   }}\n\
         }}\n",
        derives = derives,
        name = name,
        fields = fields,
        body = indent(&indent(&display)),
    ))
}

fn display_property(
    model: &Model,
    property: &crate::model::Property,
    warnings: &mut Vec<String>,
) -> Result<String> {
    let slot = names::slot_name(property, model, warnings);
    let referenced = model.entity(property.entity);

    let mut out = String::new();
    if property.is_plural {
        writeln!(
            &mut out,
            "write!(f, \"{slot}=[{{}}]\", self.{slot}.iter().map(|value| \
             value.to_string()).collect::<Vec<_>>().join(\",\"))?;",
            slot = slot,
        )?;
    } else if matches!(referenced.type_alias, Some(Primitive::Text) | Some(Primitive::Boolean)) {
        writeln!(&mut out, "write!(f, \"{slot}={{}}\", self.{slot})?;", slot = slot)?;
    } else {
        // Absent sub-entities render empty, like the original's nulls.
        writeln!(&mut out, "write!(f, \"{slot}=\")?;", slot = slot)?;
        writeln!(&mut out, "if let Some(value) = &self.{slot} {{", slot = slot)?;
        writeln!(&mut out, "    write!(f, \"{{}}\", value)?;")?;
        writeln!(&mut out, "}}")?;
    }
    Ok(out)
}
