//! Reserved names shared by the type resolver and the knowledge index.

/// The implicit root type every expression starts from.
pub const WORLD_TYPE: &str = "world";

/// Type of string literals.
pub const STRING_TYPE: &str = "string";

/// Type of numeric literals.
pub const NUMBER_TYPE: &str = "number";

/// Type of relations, `exists` tests and the `true`/`false` phrases.
pub const BOOLEAN_TYPE: &str = "boolean";

/// Fact `type` value that marks an indexable property.
pub const PROPERTY_FACT_KIND: &str = "property";

/// Phrase used to index into tuples (`item 0 of (1, "a")`).
pub const TUPLE_ITEM_PHRASE: &str = "item";
