//! Over-by-over bowling plans.
//!
//! A plan covers one day's play (90 overs). Slots may be left empty; when the
//! plan is resolved an empty slot is bowled by whoever bowled the last assigned
//! over before it.

use crate::error::{MatchError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub const MAX_PLAN_OVERS: u32 = 90;

/// Immutable plan, built with [`BowlingPlanBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlanDocument", into = "PlanDocument")]
pub struct BowlingPlan {
    /// Index 0 is over 1.
    slots: Vec<Option<String>>,
}

impl Default for BowlingPlan {
    fn default() -> Self {
        Self { slots: vec![None; MAX_PLAN_OVERS as usize] }
    }
}

impl BowlingPlan {
    pub fn builder() -> BowlingPlanBuilder {
        BowlingPlanBuilder::new()
    }

    /// Start a new builder from this plan's assignments.
    pub fn to_builder(&self) -> BowlingPlanBuilder {
        BowlingPlanBuilder { plan: self.clone() }
    }

    fn slot(over: u32) -> Option<usize> {
        (1..=MAX_PLAN_OVERS).contains(&over).then(|| (over - 1) as usize)
    }

    /// Bowler of `over` (1-based); `None` if unassigned or out of range.
    pub fn assignment(&self, over: u32) -> Option<&str> {
        Self::slot(over).and_then(|i| self.slots[i].as_deref())
    }

    pub fn is_assigned(&self, over: u32) -> bool {
        self.assignment(over).is_some()
    }

    /// Would `bowler` at `over` bowl two overs in a row?
    pub fn is_back_to_back(&self, over: u32, bowler: &str) -> bool {
        over > 1 && self.assignment(over - 1) == Some(bowler)
    }

    pub fn over_count(&self, bowler: &str) -> usize {
        self.assigned().filter(|(_, b)| *b == bowler).count()
    }

    /// Overs per bowler.
    pub fn over_counts(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for (_, bowler) in self.assigned() {
            *counts.entry(bowler.to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn total_assigned(&self) -> usize {
        self.assigned().count()
    }

    /// Unassigned over numbers, ascending.
    pub fn unassigned_overs(&self) -> Vec<u32> {
        (1..=MAX_PLAN_OVERS).filter(|&over| !self.is_assigned(over)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total_assigned() == 0
    }

    /// `(over, bowler)` for every assigned over.
    pub fn assigned(&self) -> impl Iterator<Item = (u32, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_deref().map(|bowler| (i as u32 + 1, bowler)))
    }

    /// Bowler list for the first `overs` overs, carrying the last assigned
    /// bowler into empty slots. Empty slots before the first assignment are
    /// dropped, so the list can be shorter than `overs`.
    pub fn resolve(&self, overs: u32) -> Vec<&str> {
        let mut last: Option<&str> = None;
        let mut resolved = Vec::with_capacity(overs.min(MAX_PLAN_OVERS) as usize);
        for slot in self.slots.iter().take(overs.min(MAX_PLAN_OVERS) as usize) {
            if let Some(bowler) = slot.as_deref() {
                last = Some(bowler);
            }
            if let Some(bowler) = last {
                resolved.push(bowler);
            }
        }
        resolved
    }
}

/// Mutable side of [`BowlingPlan`].
#[derive(Debug, Clone, Default)]
pub struct BowlingPlanBuilder {
    plan: BowlingPlan,
}

impl BowlingPlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(over: u32) -> Result<usize> {
        BowlingPlan::slot(over).ok_or(MatchError::InvalidOver { over, max: MAX_PLAN_OVERS })
    }

    /// Assign `over` (1-based). A blank name clears the slot.
    pub fn assign(&mut self, over: u32, bowler: &str) -> Result<&mut Self> {
        let i = Self::slot(over)?;
        let bowler = bowler.trim();
        self.plan.slots[i] = (!bowler.is_empty()).then(|| bowler.to_string());
        Ok(self)
    }

    /// Assign every over in `from..=to`.
    pub fn assign_block(&mut self, from: u32, to: u32, bowler: &str) -> Result<&mut Self> {
        Self::slot(from)?;
        Self::slot(to)?;
        for over in from..=to {
            self.assign(over, bowler)?;
        }
        Ok(self)
    }

    pub fn clear(&mut self, over: u32) -> Result<&mut Self> {
        let i = Self::slot(over)?;
        self.plan.slots[i] = None;
        Ok(self)
    }

    pub fn build(&self) -> BowlingPlan {
        self.plan.clone()
    }
}

// ========== JSON form ==========

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlanDocument {
    overs: Vec<PlanEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlanEntry {
    over: u32,
    #[serde(default)]
    bowler: Option<String>,
}

impl TryFrom<PlanDocument> for BowlingPlan {
    type Error = MatchError;

    fn try_from(doc: PlanDocument) -> Result<Self> {
        let mut builder = BowlingPlanBuilder::new();
        for entry in doc.overs {
            match entry.bowler {
                Some(bowler) => builder.assign(entry.over, &bowler)?,
                None => builder.clear(entry.over)?,
            };
        }
        Ok(builder.build())
    }
}

impl From<BowlingPlan> for PlanDocument {
    fn from(plan: BowlingPlan) -> Self {
        PlanDocument {
            overs: plan
                .slots
                .into_iter()
                .enumerate()
                .map(|(i, bowler)| PlanEntry { over: i as u32 + 1, bowler })
                .collect(),
        }
    }
}
