//! Deterministic identifier casing and collision avoidance, shared by
//! every emitter stage. Entity names are dash-separated words.

use crate::model::{Model, Property};

/// Dashes are removed and the first letter of each segment is uppercased.
pub fn pascal_case(text: &str) -> String {
    text.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Segments lowercased and joined with underscores: functions, fields and
/// locals in the emitted Rust.
pub fn snake_case(text: &str) -> String {
    text.split('-').map(str::to_lowercase).collect::<Vec<_>>().join("_")
}

/// Segments uppercased and joined with underscores: the emitted pattern
/// statics.
pub fn upper_snake_case(text: &str) -> String {
    text.split('-').map(str::to_uppercase).collect::<Vec<_>>().join("_")
}

fn plural_suffix(property: &Property) -> &'static str {
    if !property.is_plural {
        ""
    } else if property.name.ends_with('x') {
        "es"
    } else {
        "s"
    }
}

/// Substitution table for property names that would collide with emitted
/// type names or Rust keywords.
fn substitute_reserved(name: &str) -> &str {
    match name {
        "string" => "text",
        "int" => "number",
        "float" => "floating",
        "type" => "kind",
        other => other,
    }
}

/// The emitted name of a property's slot, used alike for struct fields,
/// parser locals and stringification labels: reserved-word substitution,
/// then the self-reference rename, then casing plus plural suffix.
///
/// A property named after the entity it references is a recursive rule
/// (e.g. `rule ::= something [ rule ]`); it is renamed with a `next-`
/// prefix and a warning is pushed into the diagnostics sink, never
/// silently collided with the generated type name.
pub fn slot_name(property: &Property, model: &Model, warnings: &mut Vec<String>) -> String {
    let substituted = substitute_reserved(&property.name);
    let renamed = if property.name == model.entity(property.entity).name {
        warnings.push(format!("rewriting property name: {}", property.name));
        format!("next-{}", substituted)
    } else {
        substituted.to_string()
    };
    snake_case(&renamed) + plural_suffix(property)
}
