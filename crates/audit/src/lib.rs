// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Action labels recorded in the history log.
///
/// Labels are free text in the schema; these constants keep the producers
/// consistent so the history viewer can group entries.
pub mod actions {
    /// An employee was added to the roster.
    pub const ADD_EMPLOYEE: &str = "Add employee";
    /// An employee's record was edited.
    pub const EDIT_EMPLOYEE: &str = "Edit employee";
    /// An employee was moved between departments/shifts/positions.
    pub const MOVE_EMPLOYEE: &str = "Move employee";
    /// An employee was deleted from the roster.
    pub const DELETE_EMPLOYEE: &str = "Delete employee";
    /// An employee's working status changed.
    pub const CHANGE_STATUS: &str = "Change status";
    /// An employee's machine assignment changed.
    pub const CHANGE_MACHINE: &str = "Change machine";
    /// The staffing engine relocated an excess employee.
    pub const AUTO_REBALANCE: &str = "Auto rebalance";
    /// A vacation period was recorded.
    pub const RECORD_VACATION: &str = "Record vacation";
    /// A sick-leave (L4) period was recorded.
    pub const RECORD_SICK_LEAVE: &str = "Record sick leave";
    /// An absence record was deleted.
    pub const DELETE_ABSENCE: &str = "Delete absence";
    /// A configuration value changed.
    pub const SETTINGS: &str = "Settings";
    /// Statuses were re-derived from the shift configuration.
    pub const REFRESH_STATUSES: &str = "Refresh statuses";
}

/// The operator a history entry is attributed to.
///
/// Mutations initiated by the staffing engine itself (auto-rebalance
/// moves, the scheduled status refresh) are attributed to the system
/// operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// The operator's login name.
    pub username: String,
    /// The operator's display name.
    pub display_name: String,
}

impl Operator {
    /// Creates a new Operator.
    ///
    /// # Arguments
    ///
    /// * `username` - The operator's login name
    /// * `display_name` - The operator's display name
    #[must_use]
    pub const fn new(username: String, display_name: String) -> Self {
        Self {
            username,
            display_name,
        }
    }

    /// Returns the operator used for engine-initiated actions.
    #[must_use]
    pub fn system() -> Self {
        Self {
            username: String::from("SYSTEM"),
            display_name: String::from("System"),
        }
    }
}

/// An append-only record of one mutation.
///
/// History entries are immutable once created; the engine and the API
/// layer only ever append them. The optional employee reference lets the
/// history viewer filter per employee, and deliberately survives the
/// employee's deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the action happened (UTC).
    pub timestamp: OffsetDateTime,
    /// Who performed the action.
    pub operator: Operator,
    /// The action label (see [`actions`]).
    pub action: String,
    /// Free-text details for the history viewer.
    pub details: String,
    /// The employee the action concerned, if any.
    pub employee_id: Option<i64>,
}

impl HistoryEntry {
    /// Creates a new `HistoryEntry` stamped with the current UTC time.
    ///
    /// # Arguments
    ///
    /// * `operator` - Who performed the action
    /// * `action` - The action label
    /// * `details` - Free-text details
    /// * `employee_id` - The employee the action concerned, if any
    #[must_use]
    pub fn new(
        operator: Operator,
        action: String,
        details: String,
        employee_id: Option<i64>,
    ) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            operator,
            action,
            details,
            employee_id,
        }
    }

    /// Creates a `HistoryEntry` with an explicit timestamp.
    ///
    /// Used when reconstructing entries from the database.
    ///
    /// # Arguments
    ///
    /// * `timestamp` - When the action happened
    /// * `operator` - Who performed the action
    /// * `action` - The action label
    /// * `details` - Free-text details
    /// * `employee_id` - The employee the action concerned, if any
    #[must_use]
    pub const fn with_timestamp(
        timestamp: OffsetDateTime,
        operator: Operator,
        action: String,
        details: String,
        employee_id: Option<i64>,
    ) -> Self {
        Self {
            timestamp,
            operator,
            action,
            details,
            employee_id,
        }
    }
}
