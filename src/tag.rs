// src/tag.rs

//! Stable identifiers for the kinds of data flowing through a build.
//!
//! A [`TypeTag`] is the key space for both the store and the dependency
//! graph: one tag per logical data kind. It pairs the `TypeId` (used for
//! equality, ordering and hashing) with the type name (used only for
//! error messages and logs).

use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies one kind of value in the store and the dependency graph.
#[derive(Clone, Copy, Debug)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag for a concrete type.
    pub fn of<T: Send + Sync + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by the compiler.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path; what errors and logs print.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

// Identity is the TypeId alone; the name is carried for diagnostics and
// never participates in comparisons.
impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Criteria;
    struct Products;

    #[test]
    fn tags_of_the_same_type_are_equal() {
        assert_eq!(TypeTag::of::<Criteria>(), TypeTag::of::<Criteria>());
        assert_ne!(TypeTag::of::<Criteria>(), TypeTag::of::<Products>());
    }

    #[test]
    fn display_uses_the_short_name() {
        let tag = TypeTag::of::<Criteria>();
        assert_eq!(tag.to_string(), "Criteria");
        assert!(tag.name().contains("::"));
    }
}
