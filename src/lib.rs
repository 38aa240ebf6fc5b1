//! Constraint-aware team randomizer library.
//!
//! This library pairs a list of participant names into random teams
//! under roster-split and forbidden-pair constraints, with optional
//! repeat-avoidance backed by a persisted pairing history and a
//! deck-based "deal one pair at a time" server.
//!
//! # Examples
//!
//! ```rust
//! use pairup::config::Config;
//! use pairup::generator::{GenerateOptions, generate};
//! use pairup::names::parse_list;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let config = Config::default();
//! let names = parse_list("Alice\nBob\nCarol\nDave\n");
//! let mut rng = SmallRng::seed_from_u64(42);
//!
//! let generation = generate(
//!     &names,
//!     &config,
//!     &GenerateOptions::default(),
//!     None,
//!     &mut rng,
//! )
//! .unwrap();
//! assert_eq!(generation.teams.len(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod dealer;
pub mod display;
pub mod error;
pub mod generator;
pub mod history;
pub mod logging;
pub mod names;
pub mod server;

// Re-export commonly used types for convenience
pub use config::Config;
pub use dealer::{DealError, DealtPair, Dealer};
pub use error::AppError;
pub use generator::{GenerateOptions, Generation, PairingMode, Team, generate};
pub use history::HistoryStore;
pub use names::PairKey;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
