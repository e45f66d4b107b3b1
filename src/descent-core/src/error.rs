use std::error::Error as StdError;
use std::fmt;

/// Failure raised while parsing. Every variant carries the context snippet
/// captured at its own origin point, so diagnostics point at the offending
/// input location rather than at an aggregate's rethrow site.
#[derive(Debug)]
pub enum ParseError {
    LiteralMismatch { literal: String, context: String },
    PatternMismatch { pattern: String, context: String },
    AlternationExhausted { label: String, context: String },
    EntityFailed { entity: String, context: String, source: Box<ParseError> },
    TrailingInput { context: String },
    DepthExceeded { context: String },
}

impl ParseError {
    pub fn literal_mismatch(literal: impl Into<String>, context: String) -> Self {
        Self::LiteralMismatch { literal: literal.into(), context }
    }

    pub fn pattern_mismatch(pattern: impl Into<String>, context: String) -> Self {
        Self::PatternMismatch { pattern: pattern.into(), context }
    }

    pub fn alternation(label: impl Into<String>, context: String) -> Self {
        Self::AlternationExhausted { label: label.into(), context }
    }

    pub fn entity(entity: impl Into<String>, context: String, source: ParseError) -> Self {
        Self::EntityFailed { entity: entity.into(), context, source: Box::new(source) }
    }

    pub fn trailing_input(context: String) -> Self {
        Self::TrailingInput { context }
    }

    pub fn depth_exceeded(context: String) -> Self {
        Self::DepthExceeded { context }
    }

    /// The failure at the bottom of an `EntityFailed` chain.
    pub fn innermost(&self) -> &ParseError {
        match self {
            Self::EntityFailed { source, .. } => source.innermost(),
            other => other,
        }
    }

    pub fn context(&self) -> &str {
        match self {
            Self::LiteralMismatch { context, .. }
            | Self::PatternMismatch { context, .. }
            | Self::AlternationExhausted { context, .. }
            | Self::EntityFailed { context, .. }
            | Self::TrailingInput { context }
            | Self::DepthExceeded { context } => context,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiteralMismatch { literal, context } => {
                write!(f, "could not consume '{}' at {}", literal, context)
            }
            Self::PatternMismatch { pattern, context } => {
                write!(f, "could not consume pattern {} at {}", pattern, context)
            }
            Self::AlternationExhausted { label, context } => {
                write!(f, "expected {} at {}", label, context)
            }
            Self::EntityFailed { entity, context, .. } => {
                write!(f, "failed to parse {} at {}", entity, context)
            }
            Self::TrailingInput { context } => {
                write!(f, "could not parse remaining data at {}", context)
            }
            Self::DepthExceeded { context } => {
                write!(f, "recursion depth limit exceeded at {}", context)
            }
        }
    }
}

impl StdError for ParseError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::EntityFailed { source, .. } => Some(&**source),
            _ => None,
        }
    }
}
