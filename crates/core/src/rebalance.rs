// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The auto-rebalance search: finding shifts with open capacity and
//! relocating excess employees into them.

use crate::engine::StaffingEngine;
use crate::error::StoreError;
use crate::store::{EmployeeStore, SettingsStore};
use workadm_domain::{
    AvailableShift, Employee, EmployeeStatus, MoveRecord, ShiftCode, ShiftDefinition,
};

/// A rebalance move that could not be executed.
///
/// Failures never abort the batch; whichever moves succeeded, succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveFailure {
    /// The employee the engine tried to relocate.
    pub employee_id: i64,
    /// The employee's full name, for operator reporting.
    pub name: String,
    /// The shift the move targeted.
    pub to_shift: ShiftCode,
    /// The store error that stopped the move.
    pub error: StoreError,
}

/// What one auto-rebalance batch actually did.
///
/// Both halves are reported so callers can decide whether partial success
/// is acceptable; the original system dropped failures silently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RebalanceReport {
    /// Successfully executed moves, in execution order.
    pub moved: Vec<MoveRecord>,
    /// Moves that failed, in execution order.
    pub failed: Vec<MoveFailure>,
}

impl RebalanceReport {
    /// Returns whether the batch did nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty() && self.failed.is_empty()
    }
}

impl<S> StaffingEngine<'_, S>
where
    S: EmployeeStore + SettingsStore,
{
    /// Finds the shifts with open capacity in a department.
    ///
    /// Scans every configured non-off shift, keeps those with
    /// `required > 0` and `current < required`, and sorts the result
    /// descending by free slots - largest opening first, so rebalancing
    /// prefers the shift least likely to overflow next. Ties break on
    /// ascending shift code, keeping the order stable across calls.
    pub fn find_available_shifts(&mut self, department: &str) -> Vec<AvailableShift> {
        let definitions: Vec<ShiftDefinition> = self.shift_definitions_or_empty();

        let mut available: Vec<AvailableShift> = Vec::new();
        for definition in definitions {
            if definition.is_off_shift() {
                continue;
            }
            let required: u32 = self.required(department, definition.code);
            if required == 0 {
                continue;
            }
            let current: u32 = self.working_count(department, definition.code);
            if current < required {
                available.push(AvailableShift {
                    shift: definition.code,
                    required,
                    current,
                    free_slots: required - current,
                });
            }
        }

        available.sort_by(|a, b| {
            b.free_slots
                .cmp(&a.free_slots)
                .then(a.shift.cmp(&b.shift))
        });
        available
    }

    /// Relocates excess employees out of an overflowing (department,
    /// shift) pair into shifts with free slots.
    ///
    /// The roster is taken in ascending employee-id order: the earliest-
    /// added employees keep their shift, the most-recently-added ones
    /// beyond the requirement are relocated. The target list is computed
    /// once at the start of the batch. A failed move is recorded and the
    /// batch continues; nothing is rolled back.
    pub fn auto_adjust_overflow(&mut self, department: &str, shift: ShiftCode) -> RebalanceReport {
        let mut roster: Vec<Employee> = self
            .store
            .employees_in(department, shift, EmployeeStatus::Working)
            .unwrap_or_default();
        // The store contract already orders by ascending id; sorting here
        // makes the seniority key explicit rather than inherited.
        roster.sort_by_key(|employee| employee.employee_id);

        let required: u32 = self.required(department, shift);
        if required == 0 {
            return RebalanceReport::default();
        }
        let required: usize = usize::try_from(required).unwrap_or(usize::MAX);
        let excess: usize = roster.len().saturating_sub(required);
        if excess == 0 {
            return RebalanceReport::default();
        }

        let targets: Vec<AvailableShift> = self.find_available_shifts(department);

        let mut report: RebalanceReport = RebalanceReport::default();
        for (index, target) in targets.iter().take(excess).enumerate() {
            let employee: &Employee = &roster[required + index];
            let Some(employee_id) = employee.employee_id else {
                continue;
            };
            match self.store.update_department_shift_position(
                employee_id,
                None,
                Some(target.shift),
                None,
            ) {
                Ok(()) => report.moved.push(MoveRecord {
                    employee_id,
                    name: employee.full_name(),
                    from_shift: shift,
                    to_shift: target.shift,
                }),
                Err(error) => report.failed.push(MoveFailure {
                    employee_id,
                    name: employee.full_name(),
                    to_shift: target.shift,
                    error,
                }),
            }
        }

        report
    }

    pub(crate) fn shift_definitions_or_empty(&mut self) -> Vec<ShiftDefinition> {
        self.store.shift_definitions().unwrap_or_default()
    }
}
