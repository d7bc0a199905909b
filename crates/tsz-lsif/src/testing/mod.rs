//! Test-only helpers that are not part of the production emitter (§1
//! Non-goals: "the core does not... validate the emitted graph").
//!
//! Kept as a public module (rather than `#[cfg(test)]`) so integration tests
//! in `tests/*.rs`, which compile as a separate crate, can reach it.

pub mod roundtrip;
