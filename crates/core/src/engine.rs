// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::rebalance::RebalanceReport;
use crate::store::{EmployeeStore, SettingsStore};
use workadm_domain::{
    EmployeeStatus, OverflowCheck, OverflowPolicy, ShiftCode, StaffingInfo,
};

/// The outcome of the staffing gate for a prospective change.
///
/// The warning policy is deliberately split in two: the engine returns
/// [`GateDecision::ConfirmationRequired`] and the caller owns the yes/no
/// prompt, re-submitting the change once confirmed. The engine never
/// blocks on UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// No overflow; the change may proceed with no further action.
    Allowed,
    /// Policy `block`: the change must be refused. This is a normal
    /// negative result, not an error.
    Blocked(OverflowCheck),
    /// Policy `warning`: the change may proceed only after the operator
    /// confirms against the numbers in the check.
    ConfirmationRequired(OverflowCheck),
    /// Policy `auto_adjust`: room was made (or attempted) by relocating
    /// excess employees; the change proceeds regardless.
    AutoAdjusted {
        /// The check that triggered the rebalance.
        check: OverflowCheck,
        /// What the rebalance actually did.
        report: RebalanceReport,
    },
}

impl GateDecision {
    /// Returns whether the caller may apply the change without further
    /// operator input.
    #[must_use]
    pub const fn proceeds(&self) -> bool {
        matches!(self, Self::Allowed | Self::AutoAdjusted { .. })
    }
}

/// The staffing engine.
///
/// Borrows the backing store for the duration of one decision; every
/// operation runs to completion on the calling thread.
pub struct StaffingEngine<'a, S> {
    pub(crate) store: &'a mut S,
}

impl<'a, S> StaffingEngine<'a, S>
where
    S: EmployeeStore + SettingsStore,
{
    /// Creates an engine over the given store.
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Counts the employees currently `Working` in a (department, shift)
    /// pair. A failed query counts as no data, so staffing checks degrade
    /// to unconstrained rather than failing.
    pub(crate) fn working_count(&mut self, department: &str, shift: ShiftCode) -> u32 {
        self.store
            .employees_in(department, shift, EmployeeStatus::Working)
            .map(|employees| u32::try_from(employees.len()).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    /// Reads the required headcount for a pair. A failed read counts as
    /// no requirement.
    pub(crate) fn required(&mut self, department: &str, shift: ShiftCode) -> u32 {
        self.store.required_staff(department, shift).unwrap_or(0)
    }

    /// Computes the live staffing picture for a (department, shift) pair.
    ///
    /// Pure read; the `Working` count is queried fresh on every call.
    pub fn staffing_info(&mut self, department: &str, shift: ShiftCode) -> StaffingInfo {
        let required: u32 = self.required(department, shift);
        let current: u32 = self.working_count(department, shift);
        StaffingInfo::compute(required, current)
    }

    /// Checks a hypothetical headcount against the requirement for a
    /// pair. Used when the caller already knows the post-change count.
    pub fn check_overflow(
        &mut self,
        department: &str,
        shift: ShiftCode,
        prospective_count: u32,
    ) -> OverflowCheck {
        let required: u32 = self.required(department, shift);
        OverflowCheck::compute(required, prospective_count)
    }

    /// Runs the policy gate for a prospective change to a pair.
    ///
    /// The policy is read fresh from the settings store; a failed policy
    /// read falls back to the default (`warning`), matching the original
    /// system's behavior.
    ///
    /// Callers check the gate *before* mutating, passing the post-change
    /// count as `prospective_count` (typically `current + 1`), so the
    /// comparison is "would this make us reach or exceed the cap".
    pub fn evaluate_gate(
        &mut self,
        department: &str,
        shift: ShiftCode,
        prospective_count: u32,
    ) -> GateDecision {
        let check: OverflowCheck = self.check_overflow(department, shift, prospective_count);
        if !check.overflow {
            return GateDecision::Allowed;
        }

        let policy: OverflowPolicy = self.store.overflow_policy().unwrap_or_default();
        match policy {
            OverflowPolicy::Block => GateDecision::Blocked(check),
            OverflowPolicy::Warning => GateDecision::ConfirmationRequired(check),
            OverflowPolicy::AutoAdjust => {
                // Make room first; the change proceeds whatever the
                // rebalance managed to move.
                let report: RebalanceReport = self.auto_adjust_overflow(department, shift);
                GateDecision::AutoAdjusted { check, report }
            }
        }
    }
}
