//! Runtime semantics of the shapes the generator emits for recursion,
//! union dispatch, repetition and ordered alternation, written the way
//! the emitted source spells them.

use descent::{attempt, many0, maybe, Lazy, ParseError, Regex, Result, Scanner};
use std::fmt;

pub static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)").unwrap());
pub static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z]+)").unwrap());

// chain ::= "x" [ chain ] — the self-recursive rule whose property is
// renamed at emission time.

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub next_chain: Option<Box<Chain>>,
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chain(")?;
        write!(f, "next_chain=")?;
        if let Some(value) = &self.next_chain {
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

pub fn parse_chain(s: &mut Scanner<'_>) -> Result<Chain> {
    let mut next_chain: Option<Box<Chain>> = None;
    attempt(s, |s| {
        s.consume_literal("x")?;

        maybe(s, |s| {
            next_chain = Some(Box::new(parse_chain(s)?));
            Ok(())
        });
        Ok(())
    })
    .map_err(|e| ParseError::entity("Chain", s.context(), e))?;

    Ok(Chain { next_chain })
}

fn chain_len(chain: &Chain) -> usize {
    1 + chain.next_chain.as_deref().map_or(0, chain_len)
}

#[test]
fn recursive_rule_builds_nested_values() {
    let mut s = Scanner::new("x x x");
    let chain = parse_chain(&mut s).unwrap();
    assert!(s.is_at_end());
    assert_eq!(chain_len(&chain), 3);
    assert_eq!(chain.to_string(), "Chain(next_chain=Chain(next_chain=Chain(next_chain=)))");
}

// list ::= "(" item* ")" ; item ::= word

#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    pub items: Vec<String>,
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List(")?;
        write!(
            f,
            "items=[{}]",
            self.items.iter().map(|value| value.to_string()).collect::<Vec<_>>().join(","),
        )?;
        write!(f, ")")
    }
}

pub fn parse_list(s: &mut Scanner<'_>) -> Result<List> {
    let mut items: Vec<String> = Vec::new();
    attempt(s, |s| {
        s.consume_literal("(")?;

        items = many0(s, |s| Ok(s.consume_pattern(&WORD)?.to_string()));

        s.consume_literal(")")?;
        Ok(())
    })
    .map_err(|e| ParseError::entity("List", s.context(), e))?;

    Ok(List { items })
}

#[test]
fn plural_zero_match_yields_empty_list() {
    let mut s = Scanner::new("( )");
    assert_eq!(parse_list(&mut s).unwrap(), List { items: vec![] });
    assert!(s.is_at_end());
}

#[test]
fn plural_accumulates_in_order() {
    let mut s = Scanner::new("(a b c)");
    let list = parse_list(&mut s).unwrap();
    assert_eq!(list.items, vec!["a", "b", "c"]);
    assert_eq!(list.to_string(), "List(items=[a,b,c])");
}

#[test]
fn empty_plural_renders_empty_brackets() {
    let mut s = Scanner::new("()");
    assert_eq!(parse_list(&mut s).unwrap().to_string(), "List(items=[])");
}

// decl ::= [ "pub" ] name@word — the presence of an optional keyword is a
// boolean slot.

#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub is_public: bool,
    pub name: String,
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decl(")?;
        write!(f, "is_public={}", self.is_public)?;
        write!(f, ",")?;
        write!(f, "name={}", self.name)?;
        write!(f, ")")
    }
}

pub fn parse_decl(s: &mut Scanner<'_>) -> Result<Decl> {
    let mut is_public: bool = false;
    let mut name: String = String::new();
    attempt(s, |s| {
        is_public = s.consume_literal_maybe("pub").is_some();

        name = s.consume_pattern(&WORD)?.to_string();
        Ok(())
    })
    .map_err(|e| ParseError::entity("Decl", s.context(), e))?;

    Ok(Decl { is_public, name })
}

#[test]
fn optional_keyword_sets_the_boolean_slot() {
    let mut s = Scanner::new("pub foo");
    let decl = parse_decl(&mut s).unwrap();
    assert!(decl.is_public);
    assert_eq!(decl.to_string(), "Decl(is_public=true,name=foo)");

    let mut s = Scanner::new("foo");
    let decl = parse_decl(&mut s).unwrap();
    assert!(!decl.is_public);
    assert_eq!(decl.to_string(), "Decl(is_public=false,name=foo)");
}

// term ::= number | word — a virtual entity emitted as a union whose
// parser passes the winning alternative through.

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Number(String),
    Word(String),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Number(value) => write!(f, "{}", value),
            Term::Word(value) => write!(f, "{}", value),
        }
    }
}

pub fn parse_term(s: &mut Scanner<'_>) -> Result<Term> {
    attempt(s, |s| {
        let checkpoint = s.position();
        match s.consume_pattern(&NUMBER) {
            Ok(value) => return Ok(Term::Number(value.to_string())),
            Err(_) => s.set_position(checkpoint),
        }
        match s.consume_pattern(&WORD) {
            Ok(value) => return Ok(Term::Word(value.to_string())),
            Err(_) => s.set_position(checkpoint),
        }
        Err(ParseError::alternation("a number or word", s.context()))
    })
    .map_err(|e| ParseError::entity("Term", s.context(), e))
}

#[test]
fn union_dispatch_passes_the_winning_value_through() {
    let mut s = Scanner::new("42");
    assert_eq!(parse_term(&mut s).unwrap(), Term::Number("42".to_string()));

    let mut s = Scanner::new("foo");
    assert_eq!(parse_term(&mut s).unwrap(), Term::Word("foo".to_string()));
}

#[test]
fn exhausted_union_reports_its_label() {
    let mut s = Scanner::new("!");
    let err = parse_term(&mut s).unwrap_err();
    assert_eq!(s.position(), 0);
    match err.innermost() {
        ParseError::AlternationExhausted { label, .. } => {
            assert_eq!(label, "a number or word");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// pair ::= ("a" | "ab") "b" — declared-order alternation, spelled the way
// the emitter nests option closures around shared locals.

#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub head: String,
}

pub fn parse_pair(s: &mut Scanner<'_>) -> Result<Pair> {
    let mut head: String = String::new();
    attempt(s, |s| {
        (|s: &mut Scanner<'_>| -> Result<()> {
            let checkpoint = s.position();
            match (|s: &mut Scanner<'_>| -> Result<()> {
                head = s.consume_literal("a")?.to_string();
                Ok(())
            })(s) {
                Ok(()) => return Ok(()),
                Err(_) => s.set_position(checkpoint),
            }
            match (|s: &mut Scanner<'_>| -> Result<()> {
                head = s.consume_literal("ab")?.to_string();
                Ok(())
            })(s) {
                Ok(()) => return Ok(()),
                Err(_) => s.set_position(checkpoint),
            }
            Err(ParseError::alternation("a or ab", s.context()))
        })(s)?;

        s.consume_literal("b")?;
        Ok(())
    })
    .map_err(|e| ParseError::entity("Pair", s.context(), e))?;

    Ok(Pair { head })
}

#[test]
fn first_declared_option_wins_over_longest_match() {
    let mut s = Scanner::new("ab");
    let pair = parse_pair(&mut s).unwrap();
    assert_eq!(pair.head, "a");
    assert!(s.is_at_end());
}
