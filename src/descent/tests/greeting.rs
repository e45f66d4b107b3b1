//! End-to-end check of the Greeting example: the generator's output for
//! the model, and the runtime behavior of a parser written exactly the
//! way the generator emits it.

use descent::model::{
    ConsumeAll, ConsumeEntity, ConsumePattern, ConsumeString, Entity, EntityId, Model,
    ParseAction, Primitive, Property,
};
use descent::{attempt, generate, Config, Lazy, ParseError, Regex, Result, Scanner};
use std::fmt;

/// Greeting ::= "hello" name@Word ; Word ::= /([a-z]+)/
fn greeting_model() -> Model {
    let greeting = Entity {
        name: "greeting".to_string(),
        is_virtual: false,
        supers: vec![],
        properties: vec![Property {
            name: "name".to_string(),
            owner: EntityId(0),
            entity: EntityId(1),
            is_plural: false,
        }],
        action: ParseAction::All(ConsumeAll {
            actions: vec![
                ParseAction::String(ConsumeString {
                    literal: "hello".to_string(),
                    is_optional: false,
                    property: None,
                }),
                ParseAction::Entity(ConsumeEntity {
                    entity: EntityId(1),
                    is_optional: false,
                    property: Some(0),
                }),
            ],
            is_optional: false,
            property: None,
        }),
        type_alias: None,
    };
    let word = Entity {
        name: "word".to_string(),
        is_virtual: true,
        supers: vec![],
        properties: vec![],
        action: ParseAction::Pattern(ConsumePattern {
            pattern: "([a-z]+)".to_string(),
            is_optional: false,
            property: None,
        }),
        type_alias: Some(Primitive::Text),
    };
    Model::new(vec![greeting, word], EntityId(0))
}

#[test]
fn generates_the_expected_parser_surface() {
    let generated = generate(&greeting_model(), &Config::default()).unwrap();
    assert!(generated.source.contains("pub fn parse(input: &str) -> Result<Greeting>"));
    assert!(generated.source.contains("s.consume_literal(\"hello\")?;"));
    assert!(generated.source.contains("name = s.consume_pattern(&WORD)?.to_string();"));
    assert!(generated.warnings.is_empty());
}

// What follows mirrors the emitted output for the model above, verbatim
// in shape, so the runtime semantics of generated parsers are covered.

pub static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z]+)").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct Greeting {
    pub name: String,
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Greeting(")?;
        write!(f, "name={}", self.name)?;
        write!(f, ")")
    }
}

pub fn parse_greeting(s: &mut Scanner<'_>) -> Result<Greeting> {
    let mut name: String = String::new();
    attempt(s, |s| {
        s.consume_literal("hello")?;

        name = s.consume_pattern(&WORD)?.to_string();
        Ok(())
    })
    .map_err(|e| ParseError::entity("Greeting", s.context(), e))?;

    Ok(Greeting { name })
}

pub fn parse(input: &str) -> Result<Greeting> {
    let mut s = Scanner::new(input);
    let ast = parse_greeting(&mut s)?;
    if !s.is_at_end() {
        return Err(ParseError::trailing_input(s.context()));
    }
    Ok(ast)
}

#[test]
fn parses_hello_world() {
    let greeting = parse("hello world").unwrap();
    assert_eq!(greeting, Greeting { name: "world".to_string() });
    assert_eq!(greeting.to_string(), "Greeting(name=world)");
}

#[test]
fn whitespace_between_tokens_is_insignificant() {
    assert_eq!(parse("hello world").unwrap(), parse("  hello \n\t world  ").unwrap());
}

#[test]
fn missing_word_fails_the_whole_entity() {
    let err = parse("hello").unwrap_err();
    match &err {
        ParseError::EntityFailed { entity, .. } => assert_eq!(entity, "Greeting"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(matches!(err.innermost(), ParseError::PatternMismatch { .. }));
}

#[test]
fn unconsumed_input_is_an_error() {
    let err = parse("hello world !").unwrap_err();
    assert!(matches!(err, ParseError::TrailingInput { .. }));
}
