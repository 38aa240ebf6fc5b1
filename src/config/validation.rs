use crate::error::AppError;
use crate::names::{case_fold, normalize};
use std::collections::HashSet;

/// Validates the roster and forbidden-pair settings.
///
/// # Arguments
/// * `groups` - The configured group name lists, in A/B/C order
/// * `forbidden_pairs` - The configured forbidden name pairs
///
/// # Returns
/// * `Ok(())` - Configuration is valid
/// * `Err(AppError)` - Configuration validation failed
///
/// # Validation Rules
/// - Either zero, two, or three groups are non-empty (a lone group
///   cannot be cross-paired with anything)
/// - No name appears twice within a group or across groups, compared
///   case-insensitively after normalization
/// - Every forbidden pair names two distinct participants
pub fn validate_roster(groups: &[&Vec<String>], forbidden_pairs: &[[String; 2]]) -> Result<(), AppError> {
    let populated = groups.iter().filter(|g| !g.is_empty()).count();
    if populated == 1 {
        return Err(AppError::config_error(
            "A single group cannot be cross-paired; configure zero, two, or three groups",
        ));
    }

    // Duplicate names anywhere in the roster make `set_equals` matching
    // ambiguous, so they are rejected outright.
    let mut seen: HashSet<String> = HashSet::new();
    for group in groups {
        for name in group.iter() {
            let folded = case_fold(&normalize(name));
            if folded.is_empty() {
                return Err(AppError::config_error(
                    "Group members cannot be empty or whitespace-only",
                ));
            }
            if !seen.insert(folded) {
                return Err(AppError::config_error(format!(
                    "Duplicate name '{}' in configured groups",
                    normalize(name)
                )));
            }
        }
    }

    for pair in forbidden_pairs {
        if case_fold(&normalize(&pair[0])) == case_fold(&normalize(&pair[1])) {
            return Err(AppError::config_error(format!(
                "Forbidden pair ['{}', '{}'] must name two distinct participants",
                pair[0], pair[1]
            )));
        }
    }

    Ok(())
}
