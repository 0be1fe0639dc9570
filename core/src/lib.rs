//! Simulation core for the company-management game.
//!
//! The crate is organised leaf-first:
//!   - `rng`           bounded draws and weighted selection
//!   - `state`         the immutable world snapshot types
//!   - `economy`       pure daily income/expense formulas
//!   - `candidates`    resume generation and scoring
//!   - `events`        the disruptive-event catalog and effect application
//!   - `achievements`  pure progress recomputation
//!   - `training`      training program templates and daily advancement
//!   - `enrichment`    the external text-generation client
//!   - `actions`       the player/background action protocol
//!   - `store`         the single mutation surface and the reducer
//!   - `saves`         the SQLite save-slot store
//!
//! RULES:
//!   - The snapshot is owned exclusively by `store::GameStore`. Everything
//!     else receives a read-only borrow and returns a new value.
//!   - All randomness flows through `rng::GameRng`.
//!   - Background work communicates only by dispatching actions back into
//!     the store thread. It never mutates a captured snapshot.

pub mod achievements;
pub mod actions;
pub mod candidates;
pub mod economy;
pub mod enrichment;
pub mod error;
pub mod events;
pub mod rng;
pub mod saves;
pub mod state;
pub mod store;
pub mod training;
pub mod types;
