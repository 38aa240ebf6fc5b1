//! Free, fixed-size and hidden-pool pairing attempts.

use crate::names::PairKey;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::Team;

/// One free-pairing attempt: shuffle everyone, take two at a time.
///
/// Returns `None` when a forbidden pair comes up or when a final odd
/// member is left and singles are disallowed.
pub fn attempt_free_pair<R: Rng>(
    names: &[String],
    forbidden: &HashSet<PairKey>,
    allow_singles: bool,
    rng: &mut R,
) -> Option<Vec<Team>> {
    let mut pool = names.to_vec();
    pool.shuffle(rng);

    let mut teams = Vec::with_capacity(pool.len() / 2 + 1);
    let mut chunks = pool.chunks_exact(2);
    for chunk in &mut chunks {
        if forbidden.contains(&PairKey::new(&chunk[0], &chunk[1])) {
            return None;
        }
        teams.push(Team::pair(chunk[0].clone(), chunk[1].clone()));
    }

    if let [odd] = chunks.remainder() {
        if !allow_singles {
            return None;
        }
        teams.push(Team::single(odd.clone()));
    }

    Some(teams)
}

/// One fixed-size attempt: shuffle and chunk into teams of `team_size`.
///
/// Divisibility is validated by the caller before any attempt runs, so
/// every chunk is exact. Any forbidden within-team pair rejects the
/// attempt.
pub fn attempt_fixed_size<R: Rng>(
    names: &[String],
    team_size: usize,
    forbidden: &HashSet<PairKey>,
    rng: &mut R,
) -> Option<Vec<Team>> {
    let mut pool = names.to_vec();
    pool.shuffle(rng);

    let mut teams = Vec::with_capacity(pool.len() / team_size);
    for chunk in pool.chunks_exact(team_size) {
        let team = Team::new(chunk.to_vec());
        if team.pair_keys().iter().any(|k| forbidden.contains(k)) {
            return None;
        }
        teams.push(team);
    }
    Some(teams)
}

/// One hidden-pool attempt: shuffle both pools independently and pair
/// the i-th member of each. Pools are equal-size by the caller's
/// validation; a forbidden pair rejects the attempt.
pub fn attempt_pools<R: Rng>(
    pool_a: &[String],
    pool_b: &[String],
    forbidden: &HashSet<PairKey>,
    rng: &mut R,
) -> Option<Vec<Team>> {
    let mut a = pool_a.to_vec();
    let mut b = pool_b.to_vec();
    a.shuffle(rng);
    b.shuffle(rng);

    let mut teams = Vec::with_capacity(a.len());
    for (left, right) in a.into_iter().zip(b) {
        if forbidden.contains(&PairKey::new(&left, &right)) {
            return None;
        }
        teams.push(Team::pair(left, right));
    }
    Some(teams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_free_pair_covers_everyone_once() {
        let mut rng = SmallRng::seed_from_u64(1);
        let input = names(&["A", "B", "C", "D", "E", "F"]);
        let teams = attempt_free_pair(&input, &HashSet::new(), false, &mut rng).unwrap();
        assert_eq!(teams.len(), 3);

        let mut covered: Vec<String> = teams.iter().flat_map(|t| t.members.clone()).collect();
        covered.sort();
        assert_eq!(covered, input);
    }

    #[test]
    fn test_free_pair_odd_member() {
        let mut rng = SmallRng::seed_from_u64(2);
        let input = names(&["A", "B", "C"]);

        assert!(attempt_free_pair(&input, &HashSet::new(), false, &mut rng).is_none());

        let teams = attempt_free_pair(&input, &HashSet::new(), true, &mut rng).unwrap();
        assert_eq!(teams.len(), 2);
        assert!(teams[1].is_single());
    }

    #[test]
    fn test_free_pair_forbidden_rejects_attempt() {
        let mut forbidden = HashSet::new();
        forbidden.insert(PairKey::new("A", "B"));

        // Two names that are forbidden together: every attempt fails.
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..10 {
            assert!(attempt_free_pair(&names(&["A", "B"]), &forbidden, false, &mut rng).is_none());
        }
    }

    #[test]
    fn test_fixed_size_chunks() {
        let mut rng = SmallRng::seed_from_u64(4);
        let input = names(&["A", "B", "C", "D", "E", "F"]);
        let teams = attempt_fixed_size(&input, 3, &HashSet::new(), &mut rng).unwrap();
        assert_eq!(teams.len(), 2);
        assert!(teams.iter().all(|t| t.members.len() == 3));
    }

    #[test]
    fn test_fixed_size_checks_all_within_team_pairs() {
        let mut forbidden = HashSet::new();
        forbidden.insert(PairKey::new("A", "B"));
        forbidden.insert(PairKey::new("A", "C"));
        forbidden.insert(PairKey::new("B", "C"));

        // One team of three where every pair is forbidden.
        let mut rng = SmallRng::seed_from_u64(5);
        assert!(attempt_fixed_size(&names(&["A", "B", "C"]), 3, &forbidden, &mut rng).is_none());
    }

    #[test]
    fn test_pools_pair_across() {
        let mut rng = SmallRng::seed_from_u64(6);
        let teams = attempt_pools(
            &names(&["X", "Y"]),
            &names(&["P", "Q"]),
            &HashSet::new(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(teams.len(), 2);
        for team in &teams {
            assert!(["X", "Y"].contains(&team.members[0].as_str()));
            assert!(["P", "Q"].contains(&team.members[1].as_str()));
        }
    }
}
