use rand::Rng;
use shared::constants::{
    MULTI_REEL_EXTRA_MAX, MULTI_REEL_LEAD, REEL_TAIL, SINGLE_REEL_EXTRA_MAX, SINGLE_REEL_LEAD,
};
use shared::shared_case::CatalogItem;

use super::error::EngineError;

/// One cell of one reel. `render_id` is unique per cell, not per item, so
/// the same catalog item can appear many times in a reel without view-key
/// collisions.
#[derive(Debug, Clone, PartialEq)]
pub struct ReelEntry {
    pub render_id: u64,
    pub item: CatalogItem,
}

/// A generated reel: random filler with the server-decided result spliced
/// in at `target_index`. The index is bounded away from both ends so the
/// deceleration has room to slow down before the target and the track does
/// not visibly end right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReelSequence {
    entries: Vec<ReelEntry>,
    target_index: usize,
}

impl ReelSequence {
    pub fn entries(&self) -> &[ReelEntry] {
        &self.entries
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn target_item(&self) -> &CatalogItem {
        &self.entries[self.target_index].item
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single full-width reel gets a longer filler run-up than the stacked
/// multi-lane layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelMode {
    Single,
    Multi,
}

/// Builds the display sequence for one reel lane. Filler is drawn
/// uniformly from the catalog with replacement; the result item itself is
/// injected explicitly and need not appear in the filler. The target index
/// carries a random extra cushion so repeated spins do not settle at the
/// same relative position every time.
pub fn generate(
    catalog: &[CatalogItem],
    result_item: &CatalogItem,
    mode: ReelMode,
    rng: &mut impl Rng,
) -> Result<ReelSequence, EngineError> {
    if catalog.is_empty() {
        return Err(EngineError::EmptyCatalog);
    }

    let (lead, extra_max) = match mode {
        ReelMode::Single => (SINGLE_REEL_LEAD, SINGLE_REEL_EXTRA_MAX),
        ReelMode::Multi => (MULTI_REEL_LEAD, MULTI_REEL_EXTRA_MAX),
    };
    let target_index = lead + rng.gen_range(0..=extra_max);
    let total = target_index + 1 + REEL_TAIL;

    let mut entries = Vec::with_capacity(total);
    for idx in 0..total {
        let item = if idx == target_index {
            result_item.clone()
        } else {
            catalog[rng.gen_range(0..catalog.len())].clone()
        };
        entries.push(ReelEntry {
            render_id: idx as u64,
            item,
        });
    }

    Ok(ReelSequence {
        entries,
        target_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::shared_case::Rarity;

    fn item(id: i64, name: &str) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_string(),
            image_path: format!("/assets/items/{}.png", id),
            price: 100 * id,
            drop_chance: 20.0,
            rarity: Rarity::Common,
            amount: 1,
        }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate(&[], &item(1, "a"), ReelMode::Multi, &mut rng);
        assert_eq!(result, Err(EngineError::EmptyCatalog));
    }

    #[test]
    fn test_result_lands_at_target_index() {
        // Five-item catalog, requested result C: whatever filler gets drawn
        // around it, the target cell holds C.
        let catalog: Vec<_> = (1..=5).map(|i| item(i, "x")).collect();
        let wanted = item(3, "x");
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let seq = generate(&catalog, &wanted, ReelMode::Single, &mut rng).unwrap();
            assert_eq!(seq.target_item(), &wanted);
        }
    }

    #[test]
    fn test_target_bounded_away_from_both_ends() {
        let catalog: Vec<_> = (1..=5).map(|i| item(i, "x")).collect();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let seq = generate(&catalog, &catalog[0], ReelMode::Multi, &mut rng).unwrap();
            assert!(seq.target_index() >= MULTI_REEL_LEAD);
            assert_eq!(seq.len(), seq.target_index() + 1 + REEL_TAIL);
        }
    }

    #[test]
    fn test_single_mode_longer_than_multi() {
        let catalog = vec![item(1, "only")];
        let mut rng = StdRng::seed_from_u64(7);
        let single = generate(&catalog, &catalog[0], ReelMode::Single, &mut rng).unwrap();
        let multi = generate(&catalog, &catalog[0], ReelMode::Multi, &mut rng).unwrap();
        assert!(single.target_index() >= SINGLE_REEL_LEAD);
        assert!(single.len() > multi.len());
    }

    #[test]
    fn test_one_item_catalog_still_valid() {
        let catalog = vec![item(9, "only")];
        let mut rng = StdRng::seed_from_u64(3);
        let seq = generate(&catalog, &catalog[0], ReelMode::Multi, &mut rng).unwrap();
        assert_eq!(seq.target_item().id, 9);
        assert!(seq.entries().iter().all(|e| e.item.id == 9));
    }

    #[test]
    fn test_render_ids_unique_per_cell() {
        let catalog = vec![item(1, "only")];
        let mut rng = StdRng::seed_from_u64(4);
        let seq = generate(&catalog, &catalog[0], ReelMode::Multi, &mut rng).unwrap();
        let mut ids: Vec<_> = seq.entries().iter().map(|e| e.render_id).collect();
        ids.dedup();
        assert_eq!(ids.len(), seq.len());
    }
}
