use serde::{Deserialize, Serialize};

/// Composition of eligible heirs, as declared by the filer.
///
/// Age is the only per-heir datum the calculation needs; the age lists carry
/// one entry per heir in declaration order, duplicates allowed. Stable
/// per-heir identifiers for list editing belong to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeirSnapshot {
    pub has_spouse: bool,
    /// Conventionally 0-2; not enforced.
    pub parents_count: u32,
    pub adult_children_count: u32,
    /// One entry per minor lineal descendant.
    pub minor_children_ages: Vec<u8>,
    /// Dependent siblings claimed at the flat per-person amount.
    pub siblings_count: u32,
    /// One entry per minor dependent sibling, claimed age-prorated.
    pub minor_siblings_ages: Vec<u8>,
    pub grandparents_count: u32,
    /// Heirs with a severe disability.
    pub disabled_dependents_count: u32,
}
