// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Shifts, statuses, absence kinds, and dates travel as strings in the
//! API contract and are parsed into domain types at the boundary.

use serde::{Deserialize, Serialize};
use workadm::{MoveFailure, RebalanceReport};
use workadm_domain::{Employee, MoveRecord};

/// API request to log an operator in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The operator username (case-insensitive).
    pub username: String,
    /// The plain-text password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The issued session token.
    pub session_token: String,
    /// The normalized username.
    pub username: String,
    /// The operator display name.
    pub display_name: String,
    /// The operator role (`Admin` or `Operator`).
    pub role: String,
}

/// API response describing the operator behind a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// The normalized username.
    pub username: String,
    /// The operator display name.
    pub display_name: String,
    /// The operator role (`Admin` or `Operator`).
    pub role: String,
}

/// One employee as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    /// The canonical employee identifier.
    pub employee_id: i64,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The employee's position.
    pub position: String,
    /// The department the employee belongs to.
    pub department: String,
    /// The assigned shift code.
    pub shift: String,
    /// The working status.
    pub status: String,
    /// The assigned machine (may be empty).
    pub machine: String,
}

impl EmployeeInfo {
    /// Builds the DTO from a persisted employee.
    ///
    /// Employees handed to the API layer always carry their id; a missing
    /// id maps to 0 rather than panicking.
    #[must_use]
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            employee_id: employee.employee_id.unwrap_or(0),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            shift: employee.shift.as_str().to_string(),
            status: employee.status.as_str().to_string(),
            machine: employee.machine.clone(),
        }
    }
}

/// One successful rebalance move as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInfo {
    /// The relocated employee's identifier.
    pub employee_id: i64,
    /// The relocated employee's full name.
    pub name: String,
    /// The shift the employee was moved from.
    pub from_shift: String,
    /// The shift the employee was moved to.
    pub to_shift: String,
}

impl MoveInfo {
    pub(crate) fn from_record(record: &MoveRecord) -> Self {
        Self {
            employee_id: record.employee_id,
            name: record.name.clone(),
            from_shift: record.from_shift.as_str().to_string(),
            to_shift: record.to_shift.as_str().to_string(),
        }
    }
}

/// One failed rebalance move as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFailureInfo {
    /// The employee the engine tried to relocate.
    pub employee_id: i64,
    /// The employee's full name.
    pub name: String,
    /// The shift the move targeted.
    pub to_shift: String,
    /// Why the move failed.
    pub error: String,
}

impl MoveFailureInfo {
    pub(crate) fn from_failure(failure: &MoveFailure) -> Self {
        Self {
            employee_id: failure.employee_id,
            name: failure.name.clone(),
            to_shift: failure.to_shift.as_str().to_string(),
            error: failure.error.to_string(),
        }
    }
}

/// The outcome of a gated roster change.
///
/// `ConfirmationRequired` is the first half of the two-step warning flow:
/// the change was not applied, and the caller re-submits the same request
/// with `confirmed = true` to proceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateOutcome {
    /// The change was applied with no staffing conflict.
    Applied,
    /// The change was applied after the operator confirmed the overflow.
    AppliedConfirmed {
        /// The requirement for the affected pair.
        required: u32,
        /// The `Working` count after the change.
        current: u32,
    },
    /// The change was refused by the `block` policy and not applied.
    Blocked {
        /// The requirement for the affected pair.
        required: u32,
        /// The prospective `Working` count that was refused.
        prospective: u32,
    },
    /// The change needs operator confirmation and was not applied.
    ConfirmationRequired {
        /// The requirement for the affected pair.
        required: u32,
        /// The prospective `Working` count.
        prospective: u32,
    },
    /// The `auto_adjust` policy made room; the change was applied.
    AutoAdjusted {
        /// Successfully executed moves.
        moved: Vec<MoveInfo>,
        /// Moves that failed.
        failed: Vec<MoveFailureInfo>,
    },
}

impl GateOutcome {
    /// Returns whether the requested change was actually applied.
    #[must_use]
    pub const fn applied(&self) -> bool {
        matches!(
            self,
            Self::Applied | Self::AppliedConfirmed { .. } | Self::AutoAdjusted { .. }
        )
    }

    pub(crate) fn auto_adjusted(report: &RebalanceReport) -> Self {
        Self::AutoAdjusted {
            moved: report.moved.iter().map(MoveInfo::from_record).collect(),
            failed: report
                .failed
                .iter()
                .map(MoveFailureInfo::from_failure)
                .collect(),
        }
    }
}

/// API request to add a new employee to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEmployeeRequest {
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The employee's position.
    pub position: String,
    /// The department to place the employee in.
    pub department: String,
    /// The shift to assign (code or display form).
    pub shift: String,
    /// The machine to assign (may be empty).
    pub machine: String,
    /// Second half of the two-step warning flow.
    pub confirmed: bool,
}

/// API response for an add-employee request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEmployeeResponse {
    /// What the staffing gate decided.
    pub outcome: GateOutcome,
    /// The assigned employee id, when the change was applied.
    pub employee_id: Option<i64>,
    /// A human-readable summary.
    pub message: String,
}

/// API request to edit an existing employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// The employee to edit.
    pub employee_id: i64,
    /// The new first name.
    pub first_name: String,
    /// The new last name.
    pub last_name: String,
    /// The new position.
    pub position: String,
    /// The new department.
    pub department: String,
    /// The new shift (code or display form).
    pub shift: String,
    /// The new machine.
    pub machine: String,
    /// Second half of the two-step warning flow.
    pub confirmed: bool,
}

/// API response for an update-employee request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployeeResponse {
    /// What the staffing gate decided.
    pub outcome: GateOutcome,
    /// A human-readable summary.
    pub message: String,
}

/// API request to move an employee to another department/shift/position.
///
/// `None` fields keep their current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEmployeeRequest {
    /// The employee to move.
    pub employee_id: i64,
    /// The target department, if changing.
    pub department: Option<String>,
    /// The target shift, if changing (code or display form).
    pub shift: Option<String>,
    /// The target position, if changing.
    pub position: Option<String>,
    /// Second half of the two-step warning flow.
    pub confirmed: bool,
}

/// API response for a move-employee request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEmployeeResponse {
    /// What the staffing gate decided.
    pub outcome: GateOutcome,
    /// The employee's status after the move (off-shift assignment derives
    /// `Free`, any other shift derives `Working`).
    pub status: String,
    /// A human-readable summary.
    pub message: String,
}

/// API request to change an employee's working status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetStatusRequest {
    /// The employee to change.
    pub employee_id: i64,
    /// The new status.
    pub status: String,
}

/// API request to change an employee's machine assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMachineRequest {
    /// The employee to change.
    pub employee_id: i64,
    /// The new machine (may be empty).
    pub machine: String,
}

/// API request to record a vacation or sick leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAbsenceRequest {
    /// The employee the absence belongs to.
    pub employee_id: i64,
    /// `Vacation` or `SickLeave`.
    pub kind: String,
    /// The first day of the absence (`YYYY-MM-DD`).
    pub start_date: String,
    /// The last day of the absence, inclusive (`YYYY-MM-DD`).
    pub end_date: String,
}

/// API response for a recorded absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAbsenceResponse {
    /// The assigned record id.
    pub record_id: i64,
    /// The inclusive day count of the absence.
    pub total_days: u32,
    /// The employee's status after the flip.
    pub status: String,
    /// A human-readable summary.
    pub message: String,
}

/// One absence record as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceInfo {
    /// The record identifier.
    pub record_id: i64,
    /// The employee the absence belongs to.
    pub employee_id: i64,
    /// `Vacation` or `SickLeave`.
    pub kind: String,
    /// The first day (`YYYY-MM-DD`).
    pub start_date: String,
    /// The last day, inclusive (`YYYY-MM-DD`).
    pub end_date: String,
    /// The inclusive day count.
    pub total_days: u32,
}

/// One shift definition as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinitionInfo {
    /// The shift code.
    pub code: String,
    /// The start time (`HH:MM`).
    pub start: String,
    /// The end time (`HH:MM`).
    pub end: String,
    /// The display color.
    pub color: String,
    /// Whether this is the designated off shift.
    pub is_off_shift: bool,
}

/// One status definition as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinitionInfo {
    /// The status name.
    pub status: String,
    /// The display color.
    pub color: String,
}

/// One required-staff target as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredStaffInfo {
    /// The department.
    pub department: String,
    /// The shift code.
    pub shift: String,
    /// The required headcount (0 means unconstrained).
    pub required_count: u32,
}

/// One broken staffing cap as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowAlertInfo {
    /// The department.
    pub department: String,
    /// The shift code.
    pub shift: String,
    /// The required headcount.
    pub required: u32,
    /// The current `Working` count.
    pub current: u32,
    /// How many employees over the requirement.
    pub excess: u32,
}

/// One understaffed pair as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageAlertInfo {
    /// The department.
    pub department: String,
    /// The shift code.
    pub shift: String,
    /// The required headcount.
    pub required: u32,
    /// The current `Working` count.
    pub current: u32,
    /// How many employees short of the requirement.
    pub missing: u32,
}

/// One history entry as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
    /// When the action happened (RFC 3339).
    pub timestamp: String,
    /// The acting operator's username.
    pub operator_username: String,
    /// The acting operator's display name.
    pub operator_display_name: String,
    /// The action performed.
    pub action: String,
    /// Free-form details.
    pub details: String,
    /// The affected employee, when the action targeted one.
    pub employee_id: Option<i64>,
}

/// API request to create a new operator account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOperatorRequest {
    /// The username (will be normalized to uppercase).
    pub username: String,
    /// The display name shown in history entries.
    pub display_name: String,
    /// The plain-text password.
    pub password: String,
    /// The password confirmation.
    pub confirmation: String,
    /// The role (`Admin` or `Operator`).
    pub role: String,
}

/// API response for a created operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOperatorResponse {
    /// The assigned operator id.
    pub operator_id: i64,
    /// The normalized username.
    pub username: String,
    /// A human-readable summary.
    pub message: String,
}

/// One operator account as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorInfo {
    /// The operator id.
    pub operator_id: i64,
    /// The normalized username.
    pub username: String,
    /// The display name.
    pub display_name: String,
    /// The role (`Admin` or `Operator`).
    pub role: String,
    /// Whether the account is disabled.
    pub is_disabled: bool,
    /// When the account was created.
    pub created_at: String,
    /// When the operator last logged in, if ever.
    pub last_login_at: Option<String>,
}

/// API request for an operator changing their own password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// The current password, for re-verification.
    pub current_password: String,
    /// The new password.
    pub new_password: String,
    /// The new password confirmation.
    pub confirmation: String,
}

/// API request for an admin resetting another operator's password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// The operator whose password is reset.
    pub operator_id: i64,
    /// The new password.
    pub new_password: String,
    /// The new password confirmation.
    pub confirmation: String,
}
