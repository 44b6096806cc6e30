// src/store.rs

//! Type-keyed workspace shared by the steps of one build.
//!
//! The store maps a [`TypeTag`] to at most one value of that type. Writes
//! fully replace prior values; reads for an absent tag return `None` (or a
//! distinguishable missing error via [`Store::require`]), never a default.
//!
//! Values are held behind `Arc<dyn Any + Send + Sync>`, so cloning the store
//! is shallow. The runner relies on this to hand each batch a cheap
//! read-only snapshot while it keeps exclusive ownership of the writable
//! store between batches.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::{StoreError, TypeMismatch};
use crate::tag::TypeTag;

/// A step output boxed for storage, paired with the tag of its concrete
/// type so commits can be checked against the producer's declaration.
#[derive(Clone)]
pub struct StoreValue {
    tag: TypeTag,
    value: Arc<dyn Any + Send + Sync>,
}

impl StoreValue {
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            tag: TypeTag::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// Tag of the value actually inside the box.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }
}

/// The shared typed workspace of a build.
///
/// Created empty per build, seeded once with the caller's parameters,
/// populated once per committed batch, and handed to the caller's
/// projection when the build completes.
#[derive(Clone, Default)]
pub struct Store {
    values: HashMap<TypeTag, Arc<dyn Any + Send + Sync>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under its own type, replacing any prior value.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) {
        self.values.insert(TypeTag::of::<T>(), Arc::new(value));
    }

    /// Store a boxed value under an explicitly declared tag.
    ///
    /// Fails if the value inside the box is not of the declared type; the
    /// runner maps this onto a step contract violation.
    pub(crate) fn insert_raw(
        &mut self,
        tag: TypeTag,
        value: StoreValue,
    ) -> Result<(), TypeMismatch> {
        if value.tag != tag {
            return Err(TypeMismatch {
                expected: tag,
                actual: value.tag,
            });
        }
        self.values.insert(tag, value.value);
        Ok(())
    }

    /// Non-failing lookup.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.values
            .get(&TypeTag::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    /// Owned handle to a stored value, for steps that move data into
    /// spawned work of their own.
    pub fn get_arc<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.values
            .get(&TypeTag::of::<T>())
            .and_then(|v| Arc::clone(v).downcast::<T>().ok())
    }

    /// Lookup that signals a distinguishable missing-dependency error when
    /// absent; the consistent way for steps to fetch what they declared.
    pub fn require<T: Send + Sync + 'static>(&self) -> Result<&T, StoreError> {
        self.get::<T>()
            .ok_or_else(|| StoreError::Missing(TypeTag::of::<T>()))
    }

    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.contains_tag(TypeTag::of::<T>())
    }

    pub fn contains_tag(&self, tag: TypeTag) -> bool {
        self.values.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Tags of everything currently stored, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.values.keys().copied()
    }
}

// Values are opaque; show only which tags are present.
impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}
