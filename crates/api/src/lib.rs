// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the workadm roster system.
//!
//! Callers (a UI shell, scripts, tests) talk to this crate in DTOs and
//! never see Diesel or engine internals. The layer owns:
//!
//! - operator authentication (bcrypt login, session tokens) and
//!   role-based authorization for structural changes,
//! - the request/response contract for roster, absence, settings, alert,
//!   and history operations,
//! - the two-step overflow confirmation flow: a change that would reach
//!   a staffing cap under the `warning` policy comes back as
//!   `ConfirmationRequired`, and the caller re-submits with
//!   `confirmed = true` to proceed,
//! - audit attribution: every mutating handler appends exactly one
//!   history entry for the authenticated operator, plus one system entry
//!   per engine-initiated rebalance move.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod csv_preview;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedOperator, AuthenticationService, AuthorizationService, Role};
pub use csv_preview::{CsvPreviewResult, CsvRowResult, CsvRowStatus, preview_csv_roster};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    add_employee, add_setting_value, change_password, create_operator, delete_absence,
    delete_employee, disable_operator, enable_operator, get_employee, get_overflow_policy,
    history_for_employee, list_absences, list_employees, list_history, list_operators,
    list_required_staff, list_setting_values, list_shift_definitions, list_status_definitions,
    login, logout, move_employee, overflow_alerts, record_absence, refresh_statuses,
    remove_setting_value, reset_password, save_shift_definition, save_status_definition,
    set_machine, set_overflow_policy, set_required_staff, set_status, shortage_alerts,
    update_employee, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AbsenceInfo, AddEmployeeRequest, AddEmployeeResponse, ChangePasswordRequest,
    CreateOperatorRequest, CreateOperatorResponse, EmployeeInfo, GateOutcome, HistoryEntryInfo,
    LoginRequest, LoginResponse, MoveEmployeeRequest, MoveEmployeeResponse, MoveFailureInfo,
    MoveInfo, OperatorInfo, OverflowAlertInfo, RecordAbsenceRequest, RecordAbsenceResponse,
    RequiredStaffInfo, ResetPasswordRequest, SetMachineRequest, SetStatusRequest,
    ShiftDefinitionInfo, ShortageAlertInfo, StatusDefinitionInfo, UpdateEmployeeRequest,
    UpdateEmployeeResponse, WhoAmIResponse,
};
