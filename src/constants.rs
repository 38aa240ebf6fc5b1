//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and tunables so the
//! generator, dealer and server stay consistent with each other.

#![allow(dead_code)]

/// Default number of complete shuffle-and-assign attempts before the
/// generator gives up and reports constraint exhaustion.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Minimum number of input names required before any generation runs
pub const MIN_NAMES: usize = 2;

/// Default team size for fixed-size ("mixed") generation
pub const DEFAULT_TEAM_SIZE: usize = 2;

/// Environment variable names
pub mod env_vars {
    /// Environment variable for history file path override
    pub const HISTORY_FILE: &str = "PAIRUP_HISTORY_FILE";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "PAIRUP_LOG_FILE";

    /// Environment variable for attempt budget override
    pub const MAX_ATTEMPTS: &str = "PAIRUP_MAX_ATTEMPTS";
}

/// Dealer HTTP server defaults
pub mod server {
    /// Default bind address for `--serve`
    pub const DEFAULT_ADDR: &str = "127.0.0.1:3310";
}

/// Default composition for the two labeled display sets produced from
/// a 3-group roster: Set 1 takes the first `SET1_AB` cross-group teams
/// plus the first `SET1_CC` same-group teams, Set 2 takes the next
/// `SET2_AB` and `SET2_CC`.
pub mod split {
    pub const SET1_AB: usize = 3;
    pub const SET1_CC: usize = 2;
    pub const SET2_AB: usize = 4;
    pub const SET2_CC: usize = 1;
}
