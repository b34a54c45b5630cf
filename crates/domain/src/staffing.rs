// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure staffing arithmetic.
//!
//! Everything in this module is computed from a `(required, current)` pair
//! of headcounts; no I/O happens here. Two distinct thresholds exist by
//! design and must stay distinct:
//!
//! - the interactive gate is proactive: `overflow` fires once
//!   `current >= required`, so the check performed *before* a mutation
//!   (against the post-change count) blocks hitting the cap;
//! - the alert sweep is retrospective: an [`OverflowAlert`] exists only
//!   when `current > required`, i.e. the cap is already broken.

use crate::shift::ShiftCode;
use serde::{Deserialize, Serialize};

/// Staffing picture for a (department, shift) pair.
///
/// `required == 0` means no requirement is configured: the pair is
/// unconstrained, `free_slots` is `None`, and `overflow` is always false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingInfo {
    /// The configured required headcount (0 = unconstrained).
    pub required: u32,
    /// The count of employees with status `Working` in the pair.
    pub current: u32,
    /// Open slots, or `None` when the pair is unconstrained.
    pub free_slots: Option<u32>,
    /// Whether the headcount has reached or exceeded the requirement.
    pub overflow: bool,
    /// Headcount beyond the requirement (0 when at or under the cap).
    pub excess: u32,
}

impl StaffingInfo {
    /// Computes the staffing picture from a requirement and a live count.
    ///
    /// # Arguments
    ///
    /// * `required` - The configured requirement (0 = unconstrained)
    /// * `current` - The count of `Working` employees in the pair
    #[must_use]
    pub const fn compute(required: u32, current: u32) -> Self {
        let constrained: bool = required > 0;
        Self {
            required,
            current,
            free_slots: if constrained {
                Some(required.saturating_sub(current))
            } else {
                None
            },
            overflow: constrained && current >= required,
            excess: if constrained {
                current.saturating_sub(required)
            } else {
                0
            },
        }
    }
}

/// Result of checking a hypothetical headcount against a requirement.
///
/// Used when the caller already knows "count after this change" rather
/// than "count right now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowCheck {
    /// Whether the prospective count reaches or exceeds the requirement.
    pub overflow: bool,
    /// The configured required headcount (0 = unconstrained).
    pub required: u32,
    /// The prospective count the check was made against.
    pub current: u32,
    /// Prospective headcount beyond the requirement.
    pub excess: u32,
}

impl OverflowCheck {
    /// Computes an overflow check for a prospective headcount.
    ///
    /// # Arguments
    ///
    /// * `required` - The configured requirement (0 = unconstrained)
    /// * `prospective` - The hypothetical count after the change
    #[must_use]
    pub const fn compute(required: u32, prospective: u32) -> Self {
        let overflow: bool = required > 0 && prospective >= required;
        Self {
            overflow,
            required,
            current: prospective,
            excess: if overflow {
                prospective.saturating_sub(required)
            } else {
                0
            },
        }
    }
}

/// A shift with open capacity, as reported by the rebalance search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableShift {
    /// The shift with free slots.
    pub shift: ShiftCode,
    /// The configured requirement for the shift.
    pub required: u32,
    /// The current `Working` headcount.
    pub current: u32,
    /// Open slots (`required - current`, always > 0 here).
    pub free_slots: u32,
}

/// A successfully executed rebalance move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The relocated employee's id.
    pub employee_id: i64,
    /// The relocated employee's full name, for operator reporting.
    pub name: String,
    /// The overflowing shift the employee left.
    pub from_shift: ShiftCode,
    /// The shift with free capacity the employee was moved to.
    pub to_shift: ShiftCode,
}

/// A (department, shift) pair whose cap is already broken.
///
/// Uses the strict `current > required` threshold; a pair exactly at its
/// cap is not alerted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowAlert {
    /// The department.
    pub department: String,
    /// The shift.
    pub shift: ShiftCode,
    /// The configured requirement.
    pub required: u32,
    /// The current `Working` headcount.
    pub current: u32,
    /// Headcount beyond the requirement.
    pub excess: u32,
}

/// A (department, shift) pair staffed below its requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageAlert {
    /// The department.
    pub department: String,
    /// The shift.
    pub shift: ShiftCode,
    /// The configured requirement.
    pub required: u32,
    /// The current `Working` headcount.
    pub current: u32,
    /// Missing headcount (`required - current`).
    pub missing: u32,
}
