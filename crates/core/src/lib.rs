// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The staffing engine.
//!
//! Given the roster of employees marked as working in a department/shift
//! and the configured required headcount for that pair, the engine decides
//! whether a change would reach or exceed the requirement and executes the
//! configured overflow policy: warn (two-step confirmation), auto-adjust
//! (relocate excess employees to shifts with free slots), or block.
//!
//! The engine depends only on the collaborator traits in [`store`]; it
//! never talks to a database directly. Every count is computed fresh
//! immediately before each decision; nothing is cached.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod alerts;
mod engine;
mod error;
mod rebalance;
mod store;

#[cfg(test)]
mod tests;

pub use engine::{GateDecision, StaffingEngine};
pub use error::StoreError;
pub use rebalance::{MoveFailure, RebalanceReport};
pub use store::{AuditSink, EmployeeStore, SettingsStore};
