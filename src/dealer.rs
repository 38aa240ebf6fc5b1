//! Deck-based sequential pair dealer.
//!
//! Unlike the generator, which produces a full partition per call, the
//! dealer hands out one cross-group pair per call from two depleting
//! decks, reshuffling back to full membership when a deck empties or
//! the current round becomes stuck. Deck depletion, not attempt count,
//! governs its retries, so it carries its own feasibility check.

use crate::config::Config;
use crate::error::AppError;
use crate::names::PairKey;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use thiserror::Error;

/// One dealt pair plus how many more pairs the current round can yield.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealtPair {
    pub team: [String; 2],
    pub remaining: usize,
}

/// Outcome of a failed deal. `Reshuffled` is transient: the decks were
/// already restored to full membership, so the caller just calls again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DealError {
    #[error("Decks reshuffled; request the next pair again")]
    Reshuffled,

    #[error("No valid pairing is possible: {0}")]
    Infeasible(String),
}

/// Mutable dealer state: full group membership plus the two decks of
/// not-yet-dealt names for the current round.
///
/// Access must be serialized by the owner (the server wraps this in a
/// mutex); concurrent unsynchronized mutation would corrupt the
/// pop/scan/push invariant.
#[derive(Debug, Clone)]
pub struct Dealer {
    group_a: Vec<String>,
    group_b: Vec<String>,
    forbidden: HashSet<PairKey>,
    deck_a: Vec<String>,
    deck_b: Vec<String>,
}

impl Dealer {
    /// Creates a dealer over two non-empty groups, with both decks
    /// freshly shuffled to full membership.
    pub fn new<R: Rng>(
        group_a: Vec<String>,
        group_b: Vec<String>,
        forbidden: HashSet<PairKey>,
        rng: &mut R,
    ) -> Result<Self, AppError> {
        if group_a.is_empty() || group_b.is_empty() {
            return Err(AppError::config_error(
                "The dealer needs two non-empty groups (group_a and group_b)",
            ));
        }
        let mut dealer = Dealer {
            group_a,
            group_b,
            forbidden,
            deck_a: Vec::new(),
            deck_b: Vec::new(),
        };
        dealer.reset(rng);
        Ok(dealer)
    }

    /// Builds a dealer from the configured roster.
    pub fn from_config<R: Rng>(config: &Config, rng: &mut R) -> Result<Self, AppError> {
        let [group_a, group_b, _] = config.normalized_groups();
        Dealer::new(group_a, group_b, config.forbidden_set(), rng)
    }

    /// Unconditionally reshuffles both decks back to full membership.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.deck_a = self.group_a.clone();
        self.deck_b = self.group_b.clone();
        self.deck_a.shuffle(rng);
        self.deck_b.shuffle(rng);
    }

    /// Pairs still dealable in the current round
    pub fn remaining(&self) -> usize {
        self.deck_a.len().min(self.deck_b.len())
    }

    /// Deals the next cross-group pair.
    ///
    /// Pops names off deck A one at a time and scans deck B from its
    /// end for the first compatible partner. Popped-but-unused A names
    /// go back onto the deck, reshuffled, so a failed scan never
    /// consumes anyone.
    ///
    /// # Errors
    /// * `DealError::Reshuffled` - the current round was stuck; the
    ///   decks were reshuffled to full and the caller should retry
    /// * `DealError::Infeasible` - even full decks admit no valid pair;
    ///   terminal until the configuration changes
    pub fn deal_next<R: Rng>(&mut self, rng: &mut R) -> Result<DealtPair, DealError> {
        if self.deck_a.is_empty() || self.deck_b.is_empty() {
            self.reset(rng);
        }

        let mut unused = Vec::new();
        while let Some(a) = self.deck_a.pop() {
            let found = self
                .deck_b
                .iter()
                .rposition(|b| !self.forbidden.contains(&PairKey::new(&a, b)));
            if let Some(index) = found {
                let b = self.deck_b.remove(index);
                self.deck_a.append(&mut unused);
                self.deck_a.shuffle(rng);
                let remaining = self.remaining();
                return Ok(DealtPair {
                    team: [a, b],
                    remaining,
                });
            }
            unused.push(a);
        }

        // Every remaining A name was incompatible with every remaining
        // B name. Restore full decks, then decide whether this is a
        // dead configuration or just an unlucky round.
        self.reset(rng);
        if self.is_feasible() {
            Err(DealError::Reshuffled)
        } else {
            Err(DealError::Infeasible(
                "every cross-group combination is forbidden".to_string(),
            ))
        }
    }

    /// True when at least one cross-group combination is allowed.
    fn is_feasible(&self) -> bool {
        self.group_a.iter().any(|a| {
            self.group_b
                .iter()
                .any(|b| !self.forbidden.contains(&PairKey::new(a, b)))
        })
    }

    #[cfg(test)]
    fn set_decks(&mut self, deck_a: Vec<String>, deck_b: Vec<String>) {
        self.deck_a = deck_a;
        self.deck_b = deck_b;
    }
}
