//! The grammar model: the generation engine's sole input. Constructed
//! entirely by an external model builder, fully resolved, and read-only
//! for the lifetime of one generation pass.

/// Index of an entity within its [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub usize);

#[derive(Debug)]
pub struct Model {
    entities: Vec<Entity>,
    root: EntityId,
}

impl Model {
    pub fn new(entities: Vec<Entity>, root: EntityId) -> Self {
        debug_assert!(entities.is_empty() || root.0 < entities.len());
        Self { entities, root }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    pub fn root(&self) -> &Entity {
        self.entity(self.root)
    }

    /// Entities that list `id` among their supers, in model order. Drives
    /// the enumerated union emitted for a virtual entity.
    pub fn implementors(&self, id: EntityId) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .filter(move |(_, entity)| entity.supers.contains(&id))
            .map(|(idx, entity)| (EntityId(idx), entity))
    }
}

/// A named grammar rule; concrete (produces a value type) or virtual (a
/// dispatch point). Names are unique, dash-separated words.
#[derive(Debug)]
pub struct Entity {
    pub name: String,
    pub is_virtual: bool,
    pub supers: Vec<EntityId>,
    /// Declaration order is significant.
    pub properties: Vec<Property>,
    /// Exactly one recipe to produce this entity's value.
    pub action: ParseAction,
    /// For pattern-leaf entities mapping to a primitive kind.
    pub type_alias: Option<Primitive>,
}

impl Entity {
    /// A virtual entity whose sole action is consuming a pattern is a pure
    /// lexical leaf: every reference to it is inlined as a direct pattern
    /// consumption, and it is never emitted as its own parsing function.
    pub fn is_pattern_leaf(&self) -> bool {
        self.is_virtual && matches!(self.action, ParseAction::Pattern(_))
    }

    pub fn has_plural_property(&self) -> bool {
        self.properties.iter().any(|p| p.is_plural)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Text,
    Boolean,
}

/// A named, typed slot on an entity, populated by one sub-action.
#[derive(Debug)]
pub struct Property {
    pub name: String,
    /// The entity this property is declared on. Back-reference, never an
    /// ownership edge.
    pub owner: EntityId,
    /// The entity whose value this property holds.
    pub entity: EntityId,
    /// Value is an ordered list rather than a single instance.
    pub is_plural: bool,
}

/// The recipe for producing an entity's value. Closed variant set,
/// matched exhaustively by the emitter.
#[derive(Debug)]
pub enum ParseAction {
    String(ConsumeString),
    Pattern(ConsumePattern),
    Entity(ConsumeEntity),
    All(ConsumeAll),
    Any(ConsumeAny),
}

impl ParseAction {
    pub fn is_optional(&self) -> bool {
        match self {
            ParseAction::String(a) => a.is_optional,
            ParseAction::Pattern(a) => a.is_optional,
            ParseAction::Entity(a) => a.is_optional,
            ParseAction::All(a) => a.is_optional,
            ParseAction::Any(a) => a.is_optional,
        }
    }

    /// Index into the owning entity's properties of the local slot that
    /// receives the produced value, if any.
    pub fn property(&self) -> Option<usize> {
        match self {
            ParseAction::String(a) => a.property,
            ParseAction::Pattern(a) => a.property,
            ParseAction::Entity(a) => a.property,
            ParseAction::All(a) => a.property,
            ParseAction::Any(a) => a.property,
        }
    }
}

#[derive(Debug)]
pub struct ConsumeString {
    pub literal: String,
    pub is_optional: bool,
    pub property: Option<usize>,
}

#[derive(Debug)]
pub struct ConsumePattern {
    /// Unanchored pattern source; the extractor emitter prepends `^`.
    /// Must contain exactly one capturing group.
    pub pattern: String,
    pub is_optional: bool,
    pub property: Option<usize>,
}

#[derive(Debug)]
pub struct ConsumeEntity {
    pub entity: EntityId,
    pub is_optional: bool,
    pub property: Option<usize>,
}

/// Sequence: every child in declaration order; any child's failure aborts
/// the whole sequence.
#[derive(Debug)]
pub struct ConsumeAll {
    pub actions: Vec<ParseAction>,
    pub is_optional: bool,
    pub property: Option<usize>,
}

/// Ordered alternation: first fully matching option wins, no longest-match
/// disambiguation.
#[derive(Debug)]
pub struct ConsumeAny {
    pub actions: Vec<ParseAction>,
    pub label: String,
    pub is_optional: bool,
    pub property: Option<usize>,
}
