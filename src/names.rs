//! Name normalization and roster matching.
//!
//! Names are display strings; identity for every comparison in the
//! crate is the case-folded, whitespace-normalized form. Two names are
//! the same participant iff their folded forms are equal.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalizes a raw name: trims leading/trailing whitespace and
/// collapses any internal run of whitespace to a single space.
///
/// Idempotent; an empty result is valid and gets filtered later by
/// [`parse_list`].
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-folds a name for comparison purposes.
pub fn case_fold(name: &str) -> String {
    name.to_lowercase()
}

/// Parses a block of text into an ordered name list.
///
/// Splits on line boundaries (both `\n` and `\r\n`), normalizes each
/// line and discards lines that normalize to empty. Duplicates are
/// preserved, not deduplicated.
pub fn parse_list(text: &str) -> Vec<String> {
    text.lines()
        .map(normalize)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Exact multiset equality under case folding.
///
/// True iff, after folding and sorting both lists, the sequences are
/// element-wise identical. Order and original case are irrelevant;
/// duplicate multiplicities must match (length is checked first).
pub fn set_equals(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut folded_a: Vec<String> = a.iter().map(|n| case_fold(n)).collect();
    let mut folded_b: Vec<String> = b.iter().map(|n| case_fold(n)).collect();
    folded_a.sort();
    folded_b.sort();
    folded_a == folded_b
}

/// Substitutes the reference spelling for each input name.
///
/// For each input name, looks up a case-folded match in `reference` and
/// returns the reference's exact casing/spacing; names without a match
/// pass through unchanged. Used after a successful roster match to
/// normalize minor casing differences against the names of record.
pub fn canonicalize(input: &[String], reference: &[String]) -> Vec<String> {
    let canon_map: HashMap<String, &String> =
        reference.iter().map(|n| (case_fold(n), n)).collect();

    input
        .iter()
        .map(|n| match canon_map.get(&case_fold(n)) {
            Some(canonical) => (*canonical).clone(),
            None => n.clone(),
        })
        .collect()
}

/// An unordered, case-folded name pair.
///
/// The two folded forms are stored in sorted order, so lookup in a
/// `HashSet<PairKey>` is O(1) regardless of the order the names were
/// supplied in. Serializes as a 2-element array, matching the history
/// file schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey(String, String);

impl PairKey {
    /// Builds the key for two names, folding and ordering them.
    pub fn new(a: &str, b: &str) -> Self {
        let fa = case_fold(a);
        let fb = case_fold(b);
        if fa <= fb { PairKey(fa, fb) } else { PairKey(fb, fa) }
    }

    /// First (lexicographically smaller) folded name
    pub fn first(&self) -> &str {
        &self.0
    }

    /// Second folded name
    pub fn second(&self) -> &str {
        &self.1
    }
}
