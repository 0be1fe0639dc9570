//! Shared primitive types used across the entire simulation.

/// A day counter. Day 1 is the first playable day.
pub type Day = u64;

/// A stable, unique identifier for any entity in the simulation.
pub type EntityId = String;

/// Wall-clock milliseconds since the Unix epoch.
pub type TimestampMs = i64;
