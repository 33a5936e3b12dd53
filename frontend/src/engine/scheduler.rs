use std::collections::{HashMap, HashSet};

use rand::Rng;
use shared::constants::{
    CARD_GAP_PX, CARD_WIDTH_PX, LANDING_JITTER_RANGE_PX, MAX_CASE_LANES, REEL_FAST_DURATION_MS,
    REEL_SPIN_DURATION_MS, WHEEL_SPIN_DURATION_MS,
};
use shared::shared_case::{CatalogItem, WonItem};

use super::error::EngineError;
use super::layout_cache::LayoutCache;
use super::offset::{compute_offset, measure_or_fallback};
use super::reel::{ReelAnimation, ReelDriveMode};
use super::sequence::{generate, ReelMode, ReelSequence};
use super::targeting::compute_target_rotation;
use super::zones::ZoneBoundary;
use super::{SurfaceGroup, SurfaceKey};

/// Lifecycle of one surface. Transitions are driven exclusively by the
/// scheduler: Idle -> Spinning at spin start, Spinning -> Settled when the
/// lane's completion fires, Settled -> Idle once the whole group settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
    Settled,
}

/// Everything a page needs to drive one reel lane for one spin.
#[derive(Debug, Clone, PartialEq)]
pub struct LanePlan {
    pub key: SurfaceKey,
    pub animation: ReelAnimation,
    pub generation: u64,
}

/// Wheel counterpart of [`LanePlan`].
#[derive(Debug, Clone, PartialEq)]
pub struct WheelPlan {
    pub from_deg: f64,
    pub to_deg: f64,
    pub duration_ms: f64,
    pub zones: ZoneBoundary,
    pub generation: u64,
}

/// Net effect of a settled spin, handed to the inventory/balance
/// collaborators exactly once, when the last lane of the group completes.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSettlement {
    pub gained: Vec<WonItem>,
    pub consumed_item_ids: Vec<i64>,
    pub new_balance: i64,
}

/// Result of reporting a lane completion back to the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum SettleOutcome {
    /// Completion from a cancelled or superseded spin; ignore it.
    Stale,
    /// Lane recorded, other lanes in the group still running.
    LaneSettled,
    /// Last lane of the group: the spin is settled as a whole.
    GroupSettled(SpinSettlement),
}

#[derive(Debug)]
struct PendingSpin {
    generation: u64,
    remaining: HashSet<SurfaceKey>,
    settlement: SpinSettlement,
    /// Absolute rotation to commit as the wheel's resting heading once the
    /// spin settles. None for reel spins.
    wheel_target_deg: Option<f64>,
}

/// Single owner of all animation state, per the one-writer discipline:
/// pages and the pure calculators only ever read. Guarantees at most one
/// in-flight spin per surface group and tags every spin with a generation
/// so completions that outlive a cancel or unmount are ignored instead of
/// mutating state that has moved on.
#[derive(Debug, Default)]
pub struct SpinScheduler {
    phases: HashMap<SurfaceKey, SpinPhase>,
    cache: LayoutCache,
    wheel_rotation_deg: f64,
    next_generation: u64,
    pending: HashMap<SurfaceGroup, PendingSpin>,
}

impl SpinScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_spinning(&self, group: SurfaceGroup) -> bool {
        self.pending.contains_key(&group)
    }

    pub fn phase(&self, key: SurfaceKey) -> SpinPhase {
        self.phases.get(&key).copied().unwrap_or_default()
    }

    /// Current absolute wheel heading, accumulated across every settled
    /// upgrade spin this session.
    pub fn wheel_rotation_deg(&self) -> f64 {
        self.wheel_rotation_deg
    }

    /// Cached sequence for a lane. Stable for the lifetime of the spin, so
    /// re-renders never reshuffle filler mid-flight.
    pub fn sequence(&self, key: SurfaceKey) -> Option<&ReelSequence> {
        self.cache.get(key)
    }

    /// Plans one case-opening spin across up to four lanes. All lanes get
    /// valid targets or none do: validation failures return before any
    /// cache entry, phase, or generation is touched.
    pub fn begin_case_spin(
        &mut self,
        catalog: &[CatalogItem],
        results: &[WonItem],
        new_balance: i64,
        container_px: Option<f64>,
        fast: bool,
        rng: &mut impl Rng,
    ) -> Result<Vec<LanePlan>, EngineError> {
        if self.is_spinning(SurfaceGroup::CaseLanes) {
            return Err(EngineError::SpinInProgress);
        }
        if results.is_empty() {
            return Err(EngineError::MissingOutcome);
        }
        if catalog.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }

        let lane_count = results.len().min(MAX_CASE_LANES);
        let lanes = &SurfaceKey::CASE_LANES[..lane_count];
        let mode = if lane_count == 1 {
            ReelMode::Single
        } else {
            ReelMode::Multi
        };
        let container = measure_or_fallback(container_px);
        let duration = if fast {
            REEL_FAST_DURATION_MS
        } else {
            REEL_SPIN_DURATION_MS
        };
        let drive = if fast {
            ReelDriveMode::Fast
        } else {
            ReelDriveMode::Normal
        };

        let mut planned: Vec<(SurfaceKey, ReelSequence, ReelAnimation)> =
            Vec::with_capacity(lane_count);
        for (key, won) in lanes.iter().zip(results) {
            let sequence = generate(catalog, &won.item, mode, rng)?;
            let to = compute_offset(
                container,
                CARD_WIDTH_PX,
                CARD_GAP_PX,
                sequence.target_index(),
                LANDING_JITTER_RANGE_PX,
                rng,
            );
            planned.push((*key, sequence, ReelAnimation::new(0.0, to, duration, drive)));
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        self.cache.invalidate(lanes);

        let mut plans = Vec::with_capacity(lane_count);
        let mut remaining = HashSet::new();
        for (key, sequence, animation) in planned {
            self.cache.set(key, sequence);
            self.phases.insert(key, SpinPhase::Spinning);
            remaining.insert(key);
            plans.push(LanePlan {
                key,
                animation,
                generation,
            });
        }

        self.pending.insert(
            SurfaceGroup::CaseLanes,
            PendingSpin {
                generation,
                remaining,
                settlement: SpinSettlement {
                    gained: results[..lane_count].to_vec(),
                    consumed_item_ids: Vec::new(),
                    new_balance,
                },
                wheel_target_deg: None,
            },
        );

        log::debug!("case spin {} started across {} lanes", generation, lane_count);
        Ok(plans)
    }

    /// Plans one upgrade spin on the wheel.
    pub fn begin_upgrade_spin(
        &mut self,
        success_probability_percent: f64,
        outcome_is_success: bool,
        won_item: Option<WonItem>,
        consumed_item_ids: Vec<i64>,
        new_balance: i64,
        rng: &mut impl Rng,
    ) -> Result<WheelPlan, EngineError> {
        if self.is_spinning(SurfaceGroup::Upgrade) {
            return Err(EngineError::SpinInProgress);
        }

        let zones = ZoneBoundary::from_percent(success_probability_percent);
        let from_deg = self.wheel_rotation_deg;
        let to_deg = compute_target_rotation(from_deg, &zones, outcome_is_success, rng);

        self.next_generation += 1;
        let generation = self.next_generation;
        self.phases.insert(SurfaceKey::Wheel, SpinPhase::Spinning);
        self.pending.insert(
            SurfaceGroup::Upgrade,
            PendingSpin {
                generation,
                remaining: HashSet::from([SurfaceKey::Wheel]),
                settlement: SpinSettlement {
                    gained: won_item.into_iter().collect(),
                    consumed_item_ids,
                    new_balance,
                },
                wheel_target_deg: Some(to_deg),
            },
        );

        log::debug!("upgrade spin {} started", generation);
        Ok(WheelPlan {
            from_deg,
            to_deg,
            duration_ms: f64::from(WHEEL_SPIN_DURATION_MS),
            zones,
            generation,
        })
    }

    /// Records one lane's completion. The group as a whole settles only at
    /// the last lane; completions carrying a stale generation are no-ops.
    pub fn mark_lane_settled(&mut self, key: SurfaceKey, generation: u64) -> SettleOutcome {
        let group = key.group();
        let pending = match self.pending.get_mut(&group) {
            Some(p) if p.generation == generation => p,
            _ => {
                log::debug!("ignoring stale completion for {}", key.as_str());
                return SettleOutcome::Stale;
            }
        };
        if !pending.remaining.remove(&key) {
            return SettleOutcome::Stale;
        }
        let group_done = pending.remaining.is_empty();
        self.phases.insert(key, SpinPhase::Settled);

        if group_done {
            if let Some(pending) = self.pending.remove(&group) {
                if let Some(target) = pending.wheel_target_deg {
                    self.wheel_rotation_deg = target;
                }
                for key in self.group_keys(group) {
                    self.phases.insert(key, SpinPhase::Idle);
                }
                log::debug!("spin {} settled", pending.generation);
                return SettleOutcome::GroupSettled(pending.settlement);
            }
        }
        SettleOutcome::LaneSettled
    }

    /// Abandons the in-flight spin for a group, if any. Completions from
    /// the abandoned spin become stale; its settlement is discarded, since
    /// the server already applied the outcome and the page refetches state
    /// on its next mount.
    pub fn cancel(&mut self, group: SurfaceGroup) {
        if self.pending.remove(&group).is_some() {
            log::debug!("cancelled in-flight spin for {:?}", group);
        }
        for key in self.group_keys(group) {
            self.phases.insert(key, SpinPhase::Idle);
        }
    }

    fn group_keys(&self, group: SurfaceGroup) -> Vec<SurfaceKey> {
        match group {
            SurfaceGroup::CaseLanes => SurfaceKey::CASE_LANES.to_vec(),
            SurfaceGroup::Upgrade => vec![SurfaceKey::Wheel],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::shared_case::Rarity;

    fn item(id: i64) -> CatalogItem {
        CatalogItem {
            id,
            name: format!("item {}", id),
            image_path: format!("/assets/items/{}.png", id),
            price: 100 * id,
            drop_chance: 20.0,
            rarity: Rarity::Rare,
            amount: 1,
        }
    }

    fn won(id: i64) -> WonItem {
        WonItem {
            item: item(id),
            withdrawable: true,
        }
    }

    fn catalog() -> Vec<CatalogItem> {
        (1..=5).map(item).collect()
    }

    #[test]
    fn test_case_spin_plans_one_lane_per_result() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(1);
        let plans = scheduler
            .begin_case_spin(&catalog(), &[won(1), won(2), won(3)], 900, Some(940.0), false, &mut rng)
            .unwrap();
        assert_eq!(plans.len(), 3);
        assert!(scheduler.is_spinning(SurfaceGroup::CaseLanes));
        for plan in &plans {
            assert_eq!(scheduler.phase(plan.key), SpinPhase::Spinning);
            let seq = scheduler.sequence(plan.key).unwrap();
            assert_eq!(seq.target_item().id, match plan.key {
                SurfaceKey::Field1 => 1,
                SurfaceKey::Field2 => 2,
                SurfaceKey::Field3 => 3,
                _ => panic!("unexpected lane"),
            });
        }
    }

    #[test]
    fn test_second_spin_request_is_rejected_without_mutation() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(2);
        let plans = scheduler
            .begin_case_spin(&catalog(), &[won(1)], 900, Some(940.0), false, &mut rng)
            .unwrap();
        let cached = scheduler.sequence(SurfaceKey::Field1).unwrap().clone();

        let err = scheduler
            .begin_case_spin(&catalog(), &[won(4)], 900, Some(940.0), false, &mut rng)
            .unwrap_err();
        assert_eq!(err, EngineError::SpinInProgress);
        assert!(!err.is_user_visible());
        // In-flight sequence untouched by the rejected request.
        assert_eq!(scheduler.sequence(SurfaceKey::Field1), Some(&cached));
        assert_eq!(plans[0].generation, scheduler.next_generation);
    }

    #[test]
    fn test_validation_failures_mutate_nothing() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(3);

        let err = scheduler
            .begin_case_spin(&catalog(), &[], 900, Some(940.0), false, &mut rng)
            .unwrap_err();
        assert_eq!(err, EngineError::MissingOutcome);

        let err = scheduler
            .begin_case_spin(&[], &[won(1)], 900, Some(940.0), false, &mut rng)
            .unwrap_err();
        assert_eq!(err, EngineError::EmptyCatalog);

        assert!(!scheduler.is_spinning(SurfaceGroup::CaseLanes));
        assert_eq!(scheduler.phase(SurfaceKey::Field1), SpinPhase::Idle);
        assert!(scheduler.sequence(SurfaceKey::Field1).is_none());
    }

    #[test]
    fn test_group_settles_only_after_last_lane() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(4);
        let plans = scheduler
            .begin_case_spin(&catalog(), &[won(1), won(2)], 700, Some(940.0), false, &mut rng)
            .unwrap();
        let generation = plans[0].generation;

        assert_eq!(
            scheduler.mark_lane_settled(SurfaceKey::Field1, generation),
            SettleOutcome::LaneSettled
        );
        assert!(scheduler.is_spinning(SurfaceGroup::CaseLanes));
        assert_eq!(scheduler.phase(SurfaceKey::Field1), SpinPhase::Settled);

        match scheduler.mark_lane_settled(SurfaceKey::Field2, generation) {
            SettleOutcome::GroupSettled(settlement) => {
                assert_eq!(settlement.new_balance, 700);
                assert_eq!(settlement.gained.len(), 2);
            }
            other => panic!("expected group settle, got {:?}", other),
        }
        assert!(!scheduler.is_spinning(SurfaceGroup::CaseLanes));
        assert_eq!(scheduler.phase(SurfaceKey::Field1), SpinPhase::Idle);
        assert_eq!(scheduler.phase(SurfaceKey::Field2), SpinPhase::Idle);
    }

    #[test]
    fn test_duplicate_lane_completion_is_stale() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(5);
        let plans = scheduler
            .begin_case_spin(&catalog(), &[won(1), won(2)], 700, Some(940.0), false, &mut rng)
            .unwrap();
        let generation = plans[0].generation;
        scheduler.mark_lane_settled(SurfaceKey::Field1, generation);
        assert_eq!(
            scheduler.mark_lane_settled(SurfaceKey::Field1, generation),
            SettleOutcome::Stale
        );
    }

    #[test]
    fn test_cancel_makes_pending_completions_stale() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(6);
        let plans = scheduler
            .begin_case_spin(&catalog(), &[won(1)], 700, Some(940.0), false, &mut rng)
            .unwrap();
        scheduler.cancel(SurfaceGroup::CaseLanes);
        assert!(!scheduler.is_spinning(SurfaceGroup::CaseLanes));
        assert_eq!(
            scheduler.mark_lane_settled(SurfaceKey::Field1, plans[0].generation),
            SettleOutcome::Stale
        );
    }

    #[test]
    fn test_new_spin_supersedes_cancelled_generation() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(7);
        let old = scheduler
            .begin_case_spin(&catalog(), &[won(1)], 700, Some(940.0), false, &mut rng)
            .unwrap();
        scheduler.cancel(SurfaceGroup::CaseLanes);
        let new = scheduler
            .begin_case_spin(&catalog(), &[won(2)], 600, Some(940.0), true, &mut rng)
            .unwrap();
        assert!(new[0].generation > old[0].generation);
        // The old completion cannot settle the new spin.
        assert_eq!(
            scheduler.mark_lane_settled(SurfaceKey::Field1, old[0].generation),
            SettleOutcome::Stale
        );
        assert!(matches!(
            scheduler.mark_lane_settled(SurfaceKey::Field1, new[0].generation),
            SettleOutcome::GroupSettled(_)
        ));
    }

    #[test]
    fn test_fast_mode_shortens_duration() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(8);
        let plans = scheduler
            .begin_case_spin(&catalog(), &[won(1)], 700, Some(940.0), true, &mut rng)
            .unwrap();
        assert_eq!(plans[0].animation.duration_ms, f64::from(REEL_FAST_DURATION_MS));
        assert_eq!(plans[0].animation.mode, ReelDriveMode::Fast);
    }

    #[test]
    fn test_wheel_rotation_monotonic_across_spins() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(9);

        let first = scheduler
            .begin_upgrade_spin(50.0, true, Some(won(4)), vec![1, 2], 300, &mut rng)
            .unwrap();
        assert!(first.to_deg > first.from_deg);
        assert!(first.zones.contains(first.to_deg, true));
        scheduler.mark_lane_settled(SurfaceKey::Wheel, first.generation);
        assert_eq!(scheduler.wheel_rotation_deg(), first.to_deg);

        let second = scheduler
            .begin_upgrade_spin(50.0, true, Some(won(5)), vec![3], 200, &mut rng)
            .unwrap();
        assert_eq!(second.from_deg, first.to_deg);
        assert!(second.to_deg > first.to_deg);
    }

    #[test]
    fn test_cancelled_wheel_spin_keeps_prior_heading() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(10);
        let plan = scheduler
            .begin_upgrade_spin(25.0, false, None, vec![7], 100, &mut rng)
            .unwrap();
        scheduler.cancel(SurfaceGroup::Upgrade);
        assert_eq!(scheduler.wheel_rotation_deg(), 0.0);
        assert_eq!(
            scheduler.mark_lane_settled(SurfaceKey::Wheel, plan.generation),
            SettleOutcome::Stale
        );
    }

    #[test]
    fn test_results_beyond_lane_limit_are_truncated() {
        let mut scheduler = SpinScheduler::new();
        let mut rng = StdRng::seed_from_u64(11);
        let results: Vec<_> = (1..=6).map(won).collect();
        let plans = scheduler
            .begin_case_spin(&catalog(), &results, 0, Some(940.0), false, &mut rng)
            .unwrap();
        assert_eq!(plans.len(), MAX_CASE_LANES);
    }
}
