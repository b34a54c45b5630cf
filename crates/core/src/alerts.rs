// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only alert sweeps over every (department, shift) pair.
//!
//! The overflow sweep uses the strict `current > required` threshold - it
//! reports caps already broken, unlike the interactive gate which fires
//! once the cap is reached. The two thresholds differ by design.

use crate::engine::StaffingEngine;
use crate::store::{EmployeeStore, SettingsStore};
use workadm_domain::{OverflowAlert, ShiftDefinition, ShortageAlert};

impl<S> StaffingEngine<'_, S>
where
    S: EmployeeStore + SettingsStore,
{
    /// Sweeps every constrained (department, non-off shift) pair and
    /// reports those whose cap is already broken (`current > required`).
    pub fn overflow_alerts(&mut self) -> Vec<OverflowAlert> {
        let mut alerts: Vec<OverflowAlert> = Vec::new();
        for (department, definition) in self.constrained_pairs() {
            let required: u32 = self.required(&department, definition.code);
            if required == 0 {
                continue;
            }
            let current: u32 = self.working_count(&department, definition.code);
            if current > required {
                alerts.push(OverflowAlert {
                    department,
                    shift: definition.code,
                    required,
                    current,
                    excess: current - required,
                });
            }
        }
        alerts
    }

    /// Sweeps every constrained (department, non-off shift) pair and
    /// reports those staffed below their requirement.
    ///
    /// Drives the application's periodic alert timer.
    pub fn shortage_alerts(&mut self) -> Vec<ShortageAlert> {
        let mut alerts: Vec<ShortageAlert> = Vec::new();
        for (department, definition) in self.constrained_pairs() {
            let required: u32 = self.required(&department, definition.code);
            if required == 0 {
                continue;
            }
            let current: u32 = self.working_count(&department, definition.code);
            if current < required {
                alerts.push(ShortageAlert {
                    department,
                    shift: definition.code,
                    required,
                    current,
                    missing: required - current,
                });
            }
        }
        alerts
    }

    /// Enumerates every (department, non-off shift) pair to sweep.
    fn constrained_pairs(&mut self) -> Vec<(String, ShiftDefinition)> {
        let departments: Vec<String> = self.store.departments().unwrap_or_default();
        let definitions: Vec<ShiftDefinition> = self.shift_definitions_or_empty();

        let mut pairs: Vec<(String, ShiftDefinition)> = Vec::new();
        for department in departments {
            for definition in &definitions {
                if definition.is_off_shift() {
                    continue;
                }
                pairs.push((department.clone(), definition.clone()));
            }
        }
        pairs
    }
}
