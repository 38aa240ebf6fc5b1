//! Grouped pairing attempts.
//!
//! One attempt = one complete independent shuffle of every bucket. Any
//! forbidden pair aborts the whole attempt, never just the one pair,
//! and leftovers with singles disallowed reject the attempt too.

use crate::names::PairKey;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::Team;

/// A 3-group candidate with the counts the composed split needs.
/// Teams are ordered AB pairs, then CC pairs, then singles.
#[derive(Debug, Clone)]
pub struct ThreeGroupCandidate {
    pub teams: Vec<Team>,
    pub ab_count: usize,
    pub cc_count: usize,
}

/// One cross-pairing attempt over two buckets.
///
/// Shuffles A and B independently and pairs the i-th element of each.
/// Returns `None` when a forbidden pair comes up or when leftover
/// members exist and singles are disallowed.
pub fn attempt_cross_pair<R: Rng>(
    bucket_a: &[String],
    bucket_b: &[String],
    forbidden: &HashSet<PairKey>,
    allow_singles: bool,
    rng: &mut R,
) -> Option<Vec<Team>> {
    let mut a = bucket_a.to_vec();
    let mut b = bucket_b.to_vec();
    a.shuffle(rng);
    b.shuffle(rng);

    let pair_count = a.len().min(b.len());
    let mut teams = Vec::with_capacity(a.len().max(b.len()));
    for i in 0..pair_count {
        if forbidden.contains(&PairKey::new(&a[i], &b[i])) {
            return None;
        }
        teams.push(Team::pair(a[i].clone(), b[i].clone()));
    }

    // Uneven buckets leave someone without a cross-group partner.
    let leftovers = a.len() + b.len() - 2 * pair_count;
    if leftovers > 0 {
        if !allow_singles {
            return None;
        }
        for name in a.into_iter().skip(pair_count).chain(b.into_iter().skip(pair_count)) {
            teams.push(Team::single(name));
        }
    }

    Some(teams)
}

/// One 3-group attempt: A crossed with B, C paired within itself.
///
/// C is shuffled and consumed two at a time; the final odd member
/// becomes a single if allowed, otherwise the attempt is rejected.
/// When `minimums` is set (a composed split is configured) the
/// candidate must reach at least that many AB and CC teams.
pub fn attempt_three_group<R: Rng>(
    bucket_a: &[String],
    bucket_b: &[String],
    bucket_c: &[String],
    forbidden: &HashSet<PairKey>,
    allow_singles: bool,
    minimums: Option<(usize, usize)>,
    rng: &mut R,
) -> Option<ThreeGroupCandidate> {
    let ab_teams = attempt_cross_pair(bucket_a, bucket_b, forbidden, allow_singles, rng)?;
    let ab_count = ab_teams.iter().filter(|t| !t.is_single()).count();

    let mut c = bucket_c.to_vec();
    c.shuffle(rng);

    let mut cc_teams = Vec::with_capacity(c.len() / 2 + 1);
    let mut chunks = c.chunks_exact(2);
    for chunk in &mut chunks {
        if forbidden.contains(&PairKey::new(&chunk[0], &chunk[1])) {
            return None;
        }
        cc_teams.push(Team::pair(chunk[0].clone(), chunk[1].clone()));
    }
    let cc_count = cc_teams.len();

    let mut singles: Vec<Team> = ab_teams
        .iter()
        .filter(|t| t.is_single())
        .cloned()
        .collect();
    if let [odd] = chunks.remainder() {
        if !allow_singles {
            return None;
        }
        singles.push(Team::single(odd.clone()));
    }

    if let Some((min_ab, min_cc)) = minimums
        && (ab_count < min_ab || cc_count < min_cc)
    {
        return None;
    }

    let mut teams: Vec<Team> = ab_teams.into_iter().filter(|t| !t.is_single()).collect();
    teams.extend(cc_teams);
    teams.extend(singles);

    Some(ThreeGroupCandidate {
        teams,
        ab_count,
        cc_count,
    })
}
