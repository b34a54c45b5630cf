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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod absence;
mod employee;
mod error;
mod policy;
mod shift;
mod staffing;
mod status;
mod validation;

#[cfg(test)]
mod tests;

pub use absence::{AbsenceKind, AbsenceRecord};
pub use employee::{Employee, status_for_shift};
pub use error::DomainError;
pub use policy::OverflowPolicy;
pub use shift::{ShiftCode, ShiftDefinition, parse_hhmm};
pub use staffing::{
    AvailableShift, MoveRecord, OverflowAlert, OverflowCheck, ShortageAlert, StaffingInfo,
};
pub use status::{EmployeeStatus, StatusDefinition};
pub use validation::validate_employee_fields;
