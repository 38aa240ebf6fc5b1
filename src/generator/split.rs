//! Post-hoc splits of a generated team list into two labeled sets.
//!
//! A split is a deterministic slice, never random, and only runs after
//! generation has succeeded. The union of both sets is always exactly
//! the original team list.

use crate::config::SplitConfig;
use crate::constants;

use super::{PairingMode, Team};

/// The two labeled display sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSets {
    pub set1: Vec<Team>,
    pub set2: Vec<Team>,
}

/// How to carve the team list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPlan {
    /// First `n` teams form Set 1, the remainder Set 2
    ByPosition(usize),
    /// Fixed composition over cross-group (AB) and same-group (CC)
    /// teams; only meaningful for a 3-group roster match
    ByComposition {
        set1_ab: usize,
        set1_cc: usize,
    },
}

impl SplitPlan {
    /// Resolves the configured split for the mode that actually ran.
    /// A composed split configured without a 3-group match is ignored.
    pub fn from_config(config: &SplitConfig, mode: PairingMode) -> Option<SplitPlan> {
        if config.composed {
            if mode == PairingMode::GroupedRule {
                return Some(SplitPlan::ByComposition {
                    set1_ab: constants::split::SET1_AB,
                    set1_cc: constants::split::SET1_CC,
                });
            }
            tracing::debug!("composed split configured but roster did not match 3 groups; skipping");
        }
        config.position.map(SplitPlan::ByPosition)
    }

    /// Applies the split. `ab_count` is the number of leading
    /// cross-group teams (the composed split needs to know where the
    /// same-group teams start). Teams not claimed by Set 1 land in
    /// Set 2 in their original order, so nothing is dropped.
    pub fn apply(&self, teams: &[Team], ab_count: usize) -> SplitSets {
        match *self {
            SplitPlan::ByPosition(n) => {
                let cut = n.min(teams.len());
                SplitSets {
                    set1: teams[..cut].to_vec(),
                    set2: teams[cut..].to_vec(),
                }
            }
            SplitPlan::ByComposition { set1_ab, set1_cc } => {
                let ab_cut = set1_ab.min(ab_count);
                let cc_start = ab_count;
                let cc_cut = (cc_start + set1_cc).min(teams.len());

                let mut set1 = teams[..ab_cut].to_vec();
                set1.extend_from_slice(&teams[cc_start..cc_cut]);

                let mut set2 = teams[ab_cut..cc_start].to_vec();
                set2.extend_from_slice(&teams[cc_cut..]);

                SplitSets { set1, set2 }
            }
        }
    }
}
