//! Immutable in-memory mapping snapshot.
//!
//! # Responsibility
//! - Hold the full set of public mapping views loaded at startup.
//! - Pick one view at random for the serving layer.
//!
//! # Invariants
//! - A catalog is never mutated after construction; share it by `Arc`.
//! - Iteration order is load order.

use crate::model::mapping::MappingView;
use crate::source::json_file::ResolvedRecord;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<MappingView>,
}

impl Catalog {
    pub fn new(items: Vec<MappingView>) -> Self {
        Self { items }
    }

    pub fn from_records(records: Vec<ResolvedRecord>) -> Self {
        Self::new(records.into_iter().map(ResolvedRecord::into_view).collect())
    }

    pub fn items(&self) -> &[MappingView] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a uniformly chosen view, or `None` when empty.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&MappingView> {
        pick_random(&self.items, rng)
    }
}

/// Uniform choice over a slice; `None` for an empty slice.
pub fn pick_random<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::Catalog;
    use crate::model::mapping::MappingView;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn view(emoji: &str, movie: &str) -> MappingView {
        MappingView {
            emoji: emoji.to_string(),
            unicode_seq: crate::codepoint::encode(emoji),
            movie_name: movie.to_string(),
        }
    }

    #[test]
    fn empty_catalog_has_no_random_pick() {
        let catalog = Catalog::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(catalog.is_empty());
        assert_eq!(catalog.random(&mut rng), None);
    }

    #[test]
    fn random_pick_covers_every_item_eventually() {
        let catalog = Catalog::new(vec![
            view("\u{1F680}", "First Man"),
            view("\u{1F604}", "The Big Smile"),
            view("\u{1F3AC}", "Clapper"),
        ]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let pick = catalog.random(&mut rng).unwrap();
            seen.insert(pick.movie_name.clone());
        }
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn items_keep_load_order() {
        let catalog = Catalog::new(vec![view("\u{1F680}", "A"), view("\u{1F315}", "B")]);
        let names: Vec<_> = catalog.items().iter().map(|v| v.movie_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
