//! The per-call canonicalization cache (spec.md §4.2, C2).
//!
//! A signature is the tuple of outputs an expression produces on the fixed
//! probe set. Two expressions with equal signatures are observationally
//! indistinguishable on the given examples; the store keeps exactly one
//! representative per signature and rejects the all-`⊥` signature outright
//! (spec.md §3 invariants, §8 properties 1-3).

use std::collections::HashSet;
use std::hash::Hash;

/// Outcome of offering an expression to the store.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Kept {
    Yes,
    No,
}

/// `Sig` is the signature type -- a `Vec<Option<_>>` for both DSLs, where
/// `None` stands in for `⊥` (a failed interpretation on that probe).
pub struct SignatureStore<Sig> {
    seen: HashSet<Sig>,
}

impl<Sig> Default for SignatureStore<Sig> {
    fn default() -> Self {
        SignatureStore { seen: HashSet::new() }
    }
}

impl<Sig> SignatureStore<Sig>
where
    Sig: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `sig`, unless it is wholly undefined or already present.
    pub fn insert(&mut self, sig: Sig, is_bottom: impl FnOnce(&Sig) -> bool) -> Kept {
        if is_bottom(&sig) {
            return Kept::No;
        }
        if self.seen.insert(sig) { Kept::Yes } else { Kept::No }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_signatures() {
        let mut store: SignatureStore<Vec<Option<bool>>> = SignatureStore::new();
        let all_none = |sig: &Vec<Option<bool>>| sig.iter().all(Option::is_none);

        let sig = vec![Some(true), Some(false)];
        assert_eq!(store.insert(sig.clone(), all_none), Kept::Yes);
        assert_eq!(store.insert(sig, all_none), Kept::No);
    }

    #[test]
    fn rejects_all_bottom_signature() {
        let mut store: SignatureStore<Vec<Option<bool>>> = SignatureStore::new();
        let all_none = |sig: &Vec<Option<bool>>| sig.iter().all(Option::is_none);

        assert_eq!(store.insert(vec![None, None], all_none), Kept::No);
        assert!(store.is_empty());
    }
}
