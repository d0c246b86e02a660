//! Fixed-width component signatures.
//!
//! A [`Signature`] marks which component types an entity currently owns,
//! one bit per registered type. It is `Copy` and hashable so the exact bit
//! pattern can key the entity registry's bucket index directly. Backed by a
//! fixed `u64` word array with direct bitwise ops.

use std::fmt;

use crate::limits::MAX_COMPONENT_TYPES;

/// Identifier of a component type, used as the signature bit index.
///
/// Assigned once per concrete type on first use by a registry instance,
/// monotonically from 0, never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentTypeId(u32);

impl ComponentTypeId {
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Bit index of this type within a [`Signature`].
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

const WORDS: usize = MAX_COMPONENT_TYPES.div_ceil(64);

/// Fixed-width bitset over component type IDs.
///
/// Two entities with identical component-type membership compare equal.
/// Equality is the exact-pattern test used by the registry's buckets;
/// [`contains_all`](Signature::contains_all) is the separate superset test
/// used for system subscriptions. The two must not be conflated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Signature {
    words: [u64; WORDS],
}

impl Signature {
    /// The all-zero signature every entity is born with.
    pub const EMPTY: Self = Self { words: [0; WORDS] };

    /// Set the bit for `id`.
    #[inline]
    pub fn set(&mut self, id: ComponentTypeId) {
        let index = id.index();
        debug_assert!(index < MAX_COMPONENT_TYPES);
        self.words[index / 64] |= 1 << (index % 64);
    }

    /// Clear the bit for `id`.
    #[inline]
    pub fn clear(&mut self, id: ComponentTypeId) {
        let index = id.index();
        debug_assert!(index < MAX_COMPONENT_TYPES);
        self.words[index / 64] &= !(1 << (index % 64));
    }

    /// Check if the bit for `id` is set.
    #[inline]
    pub fn contains(&self, id: ComponentTypeId) -> bool {
        let index = id.index();
        debug_assert!(index < MAX_COMPONENT_TYPES);
        (self.words[index / 64] & (1 << (index % 64))) != 0
    }

    /// Superset test: `self & required == required`.
    ///
    /// True when every bit set in `required` is also set here. This is the
    /// "has at least these component types" test systems subscribe with,
    /// distinct from plain equality.
    #[inline]
    pub fn contains_all(&self, required: &Self) -> bool {
        self.words
            .iter()
            .zip(required.words.iter())
            .all(|(own, req)| own & req == *req)
    }

    /// True when no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }

    /// Returns iterator over the type IDs whose bits are set.
    pub fn ones(&self) -> OnesIter<'_> {
        OnesIter {
            signature: self,
            word_idx: 0,
            current_word: self.words[0],
        }
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ones().map(|id| id.index())).finish()
    }
}

pub struct OnesIter<'a> {
    signature: &'a Signature,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for OnesIter<'_> {
    type Item = ComponentTypeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let trailing = self.current_word.trailing_zeros();
                self.current_word &= !(1 << trailing); // Clear the bit we just found
                return Some(ComponentTypeId::new(
                    (self.word_idx * 64) as u32 + trailing,
                ));
            }

            self.word_idx += 1;
            if self.word_idx >= WORDS {
                return None;
            }
            self.current_word = self.signature.words[self.word_idx];
        }
    }
}
