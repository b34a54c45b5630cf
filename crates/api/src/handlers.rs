// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Mutating handlers run the staffing gate before touching the roster,
//! append exactly one history entry attributed to the authenticated
//! operator, and surface gate refusals in the response rather than as
//! errors. The `warning` policy is a two-step flow: the first submission
//! comes back `ConfirmationRequired`, and the caller re-submits with
//! `confirmed = true`.

use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::Date;
use time::macros::format_description;
use tracing::{debug, info};

use workadm::{GateDecision, RebalanceReport, StaffingEngine};
use workadm_audit::{HistoryEntry, Operator, actions};
use workadm_domain::{
    AbsenceKind, AbsenceRecord, Employee, EmployeeStatus, OverflowAlert, OverflowPolicy,
    ShiftCode, ShiftDefinition, ShortageAlert, StatusDefinition, parse_hhmm, status_for_shift,
    validate_employee_fields,
};
use workadm_persistence::{
    DEPARTMENTS_KEY, MACHINES_KEY, OperatorData, POSITIONS_KEY, Persistence,
};

use crate::auth::{AuthenticatedOperator, AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AbsenceInfo, AddEmployeeRequest, AddEmployeeResponse, ChangePasswordRequest,
    CreateOperatorRequest, CreateOperatorResponse, EmployeeInfo, GateOutcome, HistoryEntryInfo,
    LoginRequest, LoginResponse, MoveEmployeeRequest, MoveEmployeeResponse, OperatorInfo,
    OverflowAlertInfo, RecordAbsenceRequest, RecordAbsenceResponse, RequiredStaffInfo,
    ResetPasswordRequest, SetMachineRequest, SetStatusRequest, ShiftDefinitionInfo,
    ShortageAlertInfo, StatusDefinitionInfo, UpdateEmployeeRequest, UpdateEmployeeResponse,
    WhoAmIResponse,
};

const API_DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

// ============================================================================
// Parsing helpers
// ============================================================================

fn parse_shift(value: &str) -> Result<ShiftCode, ApiError> {
    ShiftCode::normalize(value).map_err(translate_domain_error)
}

fn parse_status(value: &str) -> Result<EmployeeStatus, ApiError> {
    EmployeeStatus::from_str(value).map_err(translate_domain_error)
}

fn parse_absence_kind(value: &str) -> Result<AbsenceKind, ApiError> {
    match value {
        "Vacation" => Ok(AbsenceKind::Vacation),
        "SickLeave" => Ok(AbsenceKind::SickLeave),
        _ => Err(ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Invalid absence kind: '{value}'. Expected Vacation or SickLeave"),
        }),
    }
}

fn parse_api_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value, API_DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: String::from(field),
        message: format!("Invalid date '{value}': {e}"),
    })
}

fn format_api_date(date: Date) -> Result<String, ApiError> {
    date.format(API_DATE_FORMAT).map_err(|e| ApiError::Internal {
        message: format!("Failed to format date: {e}"),
    })
}

// ============================================================================
// Audit helpers
// ============================================================================

/// Appends the single history entry a mutating handler owes.
fn append_operator_entry(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    action: &str,
    details: String,
    employee_id: Option<i64>,
) -> Result<(), ApiError> {
    let entry: HistoryEntry = HistoryEntry::new(
        operator.to_audit_operator(),
        String::from(action),
        details,
        employee_id,
    );
    persistence
        .append_history(&entry)
        .map_err(translate_persistence_error)?;
    Ok(())
}

/// Audits an auto-rebalance batch: one system-operator entry per
/// successful move.
fn append_rebalance_entries(
    persistence: &mut Persistence,
    report: &RebalanceReport,
) -> Result<(), ApiError> {
    for moved in &report.moved {
        let entry: HistoryEntry = HistoryEntry::new(
            Operator::system(),
            String::from(actions::AUTO_REBALANCE),
            format!(
                "Moved {} from shift {} to shift {}",
                moved.name, moved.from_shift, moved.to_shift
            ),
            Some(moved.employee_id),
        );
        persistence
            .append_history(&entry)
            .map_err(translate_persistence_error)?;
    }
    Ok(())
}

// ============================================================================
// Staffing gate
// ============================================================================

/// Runs the staffing gate for placing one more `Working` employee into a
/// (department, shift) pair and translates the decision into the API
/// outcome, honoring the `confirmed` re-submission.
///
/// The auto-adjust path mutates the roster (the engine relocates excess
/// employees) and is audited here, one system entry per move.
fn run_staffing_gate(
    persistence: &mut Persistence,
    department: &str,
    shift: ShiftCode,
    confirmed: bool,
) -> Result<GateOutcome, ApiError> {
    let decision: GateDecision = {
        let mut engine: StaffingEngine<'_, Persistence> = StaffingEngine::new(persistence);
        let current: u32 = engine.staffing_info(department, shift).current;
        engine.evaluate_gate(department, shift, current + 1)
    };

    let outcome: GateOutcome = match decision {
        GateDecision::Allowed => GateOutcome::Applied,
        GateDecision::Blocked(check) => {
            debug!(
                "Gate blocked change to ({}, {}): {}/{} working",
                department, shift, check.current, check.required
            );
            GateOutcome::Blocked {
                required: check.required,
                prospective: check.current,
            }
        }
        GateDecision::ConfirmationRequired(check) => {
            if confirmed {
                GateOutcome::AppliedConfirmed {
                    required: check.required,
                    current: check.current,
                }
            } else {
                GateOutcome::ConfirmationRequired {
                    required: check.required,
                    prospective: check.current,
                }
            }
        }
        GateDecision::AutoAdjusted { report, .. } => {
            info!(
                "Auto-rebalance for ({}, {}): {} moved, {} failed",
                department,
                shift,
                report.moved.len(),
                report.failed.len()
            );
            append_rebalance_entries(persistence, &report)?;
            GateOutcome::auto_adjusted(&report)
        }
    };

    Ok(outcome)
}

/// Derives the status a shift assignment implies from the configured
/// definitions.
fn derive_status(
    persistence: &mut Persistence,
    shift: ShiftCode,
    current: EmployeeStatus,
) -> Result<EmployeeStatus, ApiError> {
    let definitions: Vec<ShiftDefinition> = persistence
        .get_shift_definitions()
        .map_err(translate_persistence_error)?;
    Ok(status_for_shift(shift, &definitions, current))
}

fn load_employee(persistence: &mut Persistence, employee_id: i64) -> Result<Employee, ApiError> {
    persistence
        .get_employee(employee_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_id} does not exist"),
        })
}

// ============================================================================
// Authentication
// ============================================================================

/// Logs an operator in and issues a session token.
///
/// # Errors
///
/// Returns an error if the credentials are wrong, the operator is
/// disabled, or the session cannot be stored.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, authenticated, operator) =
        AuthenticationService::login(persistence, &request.username, &request.password)?;

    info!("Operator {} logged in", authenticated.username);

    Ok(LoginResponse {
        session_token,
        username: authenticated.username,
        display_name: authenticated.display_name,
        role: operator.role,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Describes the operator behind a session token.
///
/// # Errors
///
/// Returns an error if the session is invalid or expired.
pub fn whoami(
    persistence: &mut Persistence,
    session_token: &str,
) -> Result<WhoAmIResponse, ApiError> {
    let (authenticated, operator) =
        AuthenticationService::validate_session(persistence, session_token)?;

    Ok(WhoAmIResponse {
        username: authenticated.username,
        display_name: authenticated.display_name,
        role: operator.role,
    })
}

// ============================================================================
// Roster
// ============================================================================

/// Lists the whole roster.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_employees(persistence: &mut Persistence) -> Result<Vec<EmployeeInfo>, ApiError> {
    let roster: Vec<Employee> = persistence
        .list_employees()
        .map_err(translate_persistence_error)?;
    Ok(roster.iter().map(EmployeeInfo::from_employee).collect())
}

/// Retrieves one employee.
///
/// # Errors
///
/// Returns an error if the employee does not exist or the query fails.
pub fn get_employee(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<EmployeeInfo, ApiError> {
    let employee: Employee = load_employee(persistence, employee_id)?;
    Ok(EmployeeInfo::from_employee(&employee))
}

/// Adds a new employee to the roster through the staffing gate.
///
/// The new employee's status is derived from the assigned shift: the off
/// shift yields `Free` (and bypasses the gate), anything else `Working`.
///
/// # Errors
///
/// Returns an error on invalid input or a failed store operation. A gate
/// refusal is a normal response, not an error.
pub fn add_employee(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    request: &AddEmployeeRequest,
) -> Result<AddEmployeeResponse, ApiError> {
    AuthorizationService::authorize_roster_change(operator)?;

    let shift: ShiftCode = parse_shift(&request.shift)?;
    let status: EmployeeStatus = derive_status(persistence, shift, EmployeeStatus::Working)?;

    let employee: Employee = Employee::new(
        request.first_name.trim().to_string(),
        request.last_name.trim().to_string(),
        request.position.trim().to_string(),
        request.department.trim().to_string(),
        shift,
        status,
        request.machine.trim().to_string(),
    );
    validate_employee_fields(&employee).map_err(translate_domain_error)?;

    let outcome: GateOutcome = if status == EmployeeStatus::Working {
        run_staffing_gate(persistence, &employee.department, shift, request.confirmed)?
    } else {
        GateOutcome::Applied
    };

    if !outcome.applied() {
        return Ok(AddEmployeeResponse {
            outcome,
            employee_id: None,
            message: format!("{} was not added", employee.full_name()),
        });
    }

    let employee_id: i64 = persistence
        .insert_employee(&employee)
        .map_err(translate_persistence_error)?;
    append_operator_entry(
        persistence,
        operator,
        actions::ADD_EMPLOYEE,
        format!(
            "Added {} to {} shift {}",
            employee.full_name(),
            employee.department,
            shift
        ),
        Some(employee_id),
    )?;

    Ok(AddEmployeeResponse {
        outcome,
        employee_id: Some(employee_id),
        message: format!("{} added", employee.full_name()),
    })
}

/// Edits every field of an existing employee through the staffing gate.
///
/// The gate runs only when the edit places the employee as `Working`
/// into a (department, shift) pair they are not already counted in.
///
/// # Errors
///
/// Returns an error on invalid input, a missing employee, or a failed
/// store operation.
pub fn update_employee(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    request: &UpdateEmployeeRequest,
) -> Result<UpdateEmployeeResponse, ApiError> {
    AuthorizationService::authorize_roster_change(operator)?;

    let existing: Employee = load_employee(persistence, request.employee_id)?;
    let shift: ShiftCode = parse_shift(&request.shift)?;
    let status: EmployeeStatus = if shift == existing.shift {
        existing.status
    } else {
        derive_status(persistence, shift, existing.status)?
    };

    let updated: Employee = Employee::with_id(
        request.employee_id,
        request.first_name.trim().to_string(),
        request.last_name.trim().to_string(),
        request.position.trim().to_string(),
        request.department.trim().to_string(),
        shift,
        status,
        request.machine.trim().to_string(),
    );
    validate_employee_fields(&updated).map_err(translate_domain_error)?;

    let entering_new_pair: bool = status == EmployeeStatus::Working
        && !(existing.status == EmployeeStatus::Working
            && existing.department == updated.department
            && existing.shift == shift);

    let outcome: GateOutcome = if entering_new_pair {
        run_staffing_gate(persistence, &updated.department, shift, request.confirmed)?
    } else {
        GateOutcome::Applied
    };

    if !outcome.applied() {
        return Ok(UpdateEmployeeResponse {
            outcome,
            message: format!("{} was not changed", existing.full_name()),
        });
    }

    persistence
        .update_employee(request.employee_id, &updated)
        .map_err(translate_persistence_error)?;
    append_operator_entry(
        persistence,
        operator,
        actions::EDIT_EMPLOYEE,
        format!(
            "Edited {}: {} shift {}",
            updated.full_name(),
            updated.department,
            shift
        ),
        Some(request.employee_id),
    )?;

    Ok(UpdateEmployeeResponse {
        outcome,
        message: format!("{} updated", updated.full_name()),
    })
}

/// Moves an employee to another department, shift, or position through
/// the staffing gate. Unset fields keep their current value.
///
/// Moving onto the off shift derives `Free`; moving onto a working shift
/// derives `Working`.
///
/// # Errors
///
/// Returns an error on invalid input, a missing employee, or a failed
/// store operation.
pub fn move_employee(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    request: &MoveEmployeeRequest,
) -> Result<MoveEmployeeResponse, ApiError> {
    AuthorizationService::authorize_roster_change(operator)?;

    let existing: Employee = load_employee(persistence, request.employee_id)?;

    let department: String = request
        .department
        .clone()
        .unwrap_or_else(|| existing.department.clone());
    let shift: ShiftCode = match &request.shift {
        Some(value) => parse_shift(value)?,
        None => existing.shift,
    };
    let status: EmployeeStatus = if shift == existing.shift {
        existing.status
    } else {
        derive_status(persistence, shift, existing.status)?
    };

    let entering_new_pair: bool = status == EmployeeStatus::Working
        && !(existing.status == EmployeeStatus::Working
            && existing.department == department
            && existing.shift == shift);

    let outcome: GateOutcome = if entering_new_pair {
        run_staffing_gate(persistence, &department, shift, request.confirmed)?
    } else {
        GateOutcome::Applied
    };

    if !outcome.applied() {
        return Ok(MoveEmployeeResponse {
            outcome,
            status: existing.status.as_str().to_string(),
            message: format!("{} was not moved", existing.full_name()),
        });
    }

    workadm::EmployeeStore::update_department_shift_position(
        persistence,
        request.employee_id,
        request.department.as_deref(),
        request.shift.as_ref().map(|_| shift),
        request.position.as_deref(),
    )
    .map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })?;

    if status != existing.status {
        persistence
            .set_employee_status(request.employee_id, status)
            .map_err(translate_persistence_error)?;
    }

    append_operator_entry(
        persistence,
        operator,
        actions::MOVE_EMPLOYEE,
        format!(
            "Moved {} to {} shift {}",
            existing.full_name(),
            department,
            shift
        ),
        Some(request.employee_id),
    )?;

    Ok(MoveEmployeeResponse {
        outcome,
        status: status.as_str().to_string(),
        message: format!("{} moved", existing.full_name()),
    })
}

/// Deletes an employee from the roster.
///
/// History entries referencing the employee are kept.
///
/// # Errors
///
/// Returns an error if the employee does not exist or the delete fails.
pub fn delete_employee(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    employee_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_roster_change(operator)?;

    let existing: Employee = load_employee(persistence, employee_id)?;
    persistence
        .delete_employee(employee_id)
        .map_err(translate_persistence_error)?;
    append_operator_entry(
        persistence,
        operator,
        actions::DELETE_EMPLOYEE,
        format!("Deleted {}", existing.full_name()),
        Some(employee_id),
    )?;
    Ok(())
}

/// Changes an employee's working status.
///
/// # Errors
///
/// Returns an error on invalid input, a missing employee, or a failed
/// store operation.
pub fn set_status(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    request: &SetStatusRequest,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_roster_change(operator)?;

    let status: EmployeeStatus = parse_status(&request.status)?;
    let existing: Employee = load_employee(persistence, request.employee_id)?;
    persistence
        .set_employee_status(request.employee_id, status)
        .map_err(translate_persistence_error)?;
    append_operator_entry(
        persistence,
        operator,
        actions::CHANGE_STATUS,
        format!("{} is now {}", existing.full_name(), status),
        Some(request.employee_id),
    )?;
    Ok(())
}

/// Changes an employee's machine assignment.
///
/// # Errors
///
/// Returns an error if the employee does not exist or the update fails.
pub fn set_machine(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    request: &SetMachineRequest,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_roster_change(operator)?;

    let existing: Employee = load_employee(persistence, request.employee_id)?;
    persistence
        .update_machine(request.employee_id, request.machine.trim())
        .map_err(translate_persistence_error)?;
    append_operator_entry(
        persistence,
        operator,
        actions::CHANGE_MACHINE,
        format!(
            "{} assigned to machine '{}'",
            existing.full_name(),
            request.machine.trim()
        ),
        Some(request.employee_id),
    )?;
    Ok(())
}

// ============================================================================
// Absences
// ============================================================================

/// Records a vacation or sick leave and flips the employee's status.
///
/// # Errors
///
/// Returns an error on invalid input, a reversed date range, a missing
/// employee, or a failed store operation.
pub fn record_absence(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    request: &RecordAbsenceRequest,
) -> Result<RecordAbsenceResponse, ApiError> {
    AuthorizationService::authorize_roster_change(operator)?;

    let kind: AbsenceKind = parse_absence_kind(&request.kind)?;
    let start: Date = parse_api_date("start_date", &request.start_date)?;
    let end: Date = parse_api_date("end_date", &request.end_date)?;

    let existing: Employee = load_employee(persistence, request.employee_id)?;
    let record: AbsenceRecord = AbsenceRecord::new(request.employee_id, kind, start, end)
        .map_err(translate_domain_error)?;

    let record_id: i64 = persistence
        .record_absence(&record)
        .map_err(translate_persistence_error)?;

    let (action, status) = match kind {
        AbsenceKind::Vacation => (actions::RECORD_VACATION, EmployeeStatus::OnVacation),
        AbsenceKind::SickLeave => (actions::RECORD_SICK_LEAVE, EmployeeStatus::OnSickLeave),
    };
    append_operator_entry(
        persistence,
        operator,
        action,
        format!(
            "{} for {}: {} to {} ({} days)",
            kind,
            existing.full_name(),
            request.start_date,
            request.end_date,
            record.total_days
        ),
        Some(request.employee_id),
    )?;

    Ok(RecordAbsenceResponse {
        record_id,
        total_days: record.total_days,
        status: status.as_str().to_string(),
        message: format!("{} recorded for {}", kind, existing.full_name()),
    })
}

/// Lists every absence recorded for an employee.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_absences(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<Vec<AbsenceInfo>, ApiError> {
    let records: Vec<AbsenceRecord> = persistence
        .absences_for_employee(employee_id)
        .map_err(translate_persistence_error)?;

    let mut infos: Vec<AbsenceInfo> = Vec::with_capacity(records.len());
    for record in records {
        infos.push(AbsenceInfo {
            record_id: record.record_id.unwrap_or(0),
            employee_id: record.employee_id,
            kind: record.kind.as_str().to_string(),
            start_date: format_api_date(record.start_date)?,
            end_date: format_api_date(record.end_date)?,
            total_days: record.total_days,
        });
    }
    Ok(infos)
}

/// Deletes one absence record.
///
/// The employee's status is not flipped back; the daily refresh or an
/// explicit status change handles that.
///
/// # Errors
///
/// Returns an error if the record does not exist or the delete fails.
pub fn delete_absence(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    employee_id: i64,
    kind: &str,
    record_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_roster_change(operator)?;

    let kind: AbsenceKind = parse_absence_kind(kind)?;
    persistence
        .delete_absence(kind, record_id)
        .map_err(translate_persistence_error)?;
    append_operator_entry(
        persistence,
        operator,
        actions::DELETE_ABSENCE,
        format!("Deleted {kind} record {record_id}"),
        Some(employee_id),
    )?;
    Ok(())
}

/// Re-derives every employee's status from the shift configuration,
/// skipping employees with an absence covering `today`.
///
/// The refresh audits itself with the system operator when anything
/// changed.
///
/// # Errors
///
/// Returns an error if a store operation fails.
pub fn refresh_statuses(persistence: &mut Persistence, today: Date) -> Result<usize, ApiError> {
    persistence
        .apply_statuses_from_shifts(today)
        .map_err(translate_persistence_error)
}

// ============================================================================
// Settings
// ============================================================================

fn list_setting_key(kind: &str) -> Result<&'static str, ApiError> {
    match kind {
        "departments" => Ok(DEPARTMENTS_KEY),
        "positions" => Ok(POSITIONS_KEY),
        "machines" => Ok(MACHINES_KEY),
        _ => Err(ApiError::InvalidInput {
            field: String::from("list"),
            message: format!(
                "Unknown list '{kind}'. Expected departments, positions, or machines"
            ),
        }),
    }
}

/// Lists a configured value list: `departments`, `positions`, or
/// `machines`.
///
/// # Errors
///
/// Returns an error if the list name is unknown or the query fails.
pub fn list_setting_values(
    persistence: &mut Persistence,
    kind: &str,
) -> Result<Vec<String>, ApiError> {
    let key: &str = list_setting_key(kind)?;
    persistence
        .get_list_setting(key)
        .map_err(translate_persistence_error)
}

/// Adds a value to a configured list. Admin only.
///
/// # Errors
///
/// Returns an error if the value is empty or already present, the
/// operator is not an admin, or the store operation fails.
pub fn add_setting_value(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    kind: &str,
    value: &str,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_settings(operator)?;

    let key: &str = list_setting_key(kind)?;
    let value: &str = value.trim();
    if value.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from(kind),
            message: String::from("Value must not be empty"),
        });
    }

    let mut values: Vec<String> = persistence
        .get_list_setting(key)
        .map_err(translate_persistence_error)?;
    if values.iter().any(|existing| existing == value) {
        return Err(ApiError::InvalidInput {
            field: String::from(kind),
            message: format!("'{value}' is already in the list"),
        });
    }
    values.push(value.to_string());
    persistence
        .set_list_setting(key, &values)
        .map_err(translate_persistence_error)?;

    append_operator_entry(
        persistence,
        operator,
        actions::SETTINGS,
        format!("Added '{value}' to {kind}"),
        None,
    )?;
    Ok(())
}

/// Removes a value from a configured list. Admin only.
///
/// # Errors
///
/// Returns an error if the value is not present, the operator is not an
/// admin, or the store operation fails.
pub fn remove_setting_value(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    kind: &str,
    value: &str,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_settings(operator)?;

    let key: &str = list_setting_key(kind)?;
    let mut values: Vec<String> = persistence
        .get_list_setting(key)
        .map_err(translate_persistence_error)?;
    let before: usize = values.len();
    values.retain(|existing| existing != value);
    if values.len() == before {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Setting"),
            message: format!("'{value}' is not in {kind}"),
        });
    }
    persistence
        .set_list_setting(key, &values)
        .map_err(translate_persistence_error)?;

    append_operator_entry(
        persistence,
        operator,
        actions::SETTINGS,
        format!("Removed '{value}' from {kind}"),
        None,
    )?;
    Ok(())
}

/// Reads the configured overflow policy.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_overflow_policy(persistence: &mut Persistence) -> Result<String, ApiError> {
    let policy: OverflowPolicy = persistence
        .get_overflow_policy()
        .map_err(translate_persistence_error)?;
    Ok(policy.as_str().to_string())
}

/// Sets the overflow policy. Admin only.
///
/// # Errors
///
/// Returns an error if the value is not a policy, the operator is not an
/// admin, or the store operation fails.
pub fn set_overflow_policy(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    value: &str,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_settings(operator)?;

    let policy: OverflowPolicy = OverflowPolicy::from_str(value).map_err(translate_domain_error)?;
    persistence
        .set_overflow_policy(policy)
        .map_err(translate_persistence_error)?;

    append_operator_entry(
        persistence,
        operator,
        actions::SETTINGS,
        format!("Overflow policy set to {policy}"),
        None,
    )?;
    Ok(())
}

/// Lists the configured shift definitions.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_shift_definitions(
    persistence: &mut Persistence,
) -> Result<Vec<ShiftDefinitionInfo>, ApiError> {
    let definitions: Vec<ShiftDefinition> = persistence
        .get_shift_definitions()
        .map_err(translate_persistence_error)?;

    Ok(definitions
        .iter()
        .map(|definition| ShiftDefinitionInfo {
            code: definition.code.as_str().to_string(),
            start: format!(
                "{:02}:{:02}",
                definition.start.hour(),
                definition.start.minute()
            ),
            end: format!("{:02}:{:02}", definition.end.hour(), definition.end.minute()),
            color: definition.color.clone(),
            is_off_shift: definition.is_off_shift(),
        })
        .collect())
}

/// Inserts or replaces a shift definition. Admin only.
///
/// # Errors
///
/// Returns an error on invalid input, a non-admin operator, or a failed
/// store operation.
pub fn save_shift_definition(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    definition: &ShiftDefinitionInfo,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_settings(operator)?;

    let code: ShiftCode = parse_shift(&definition.code)?;
    let start: time::Time = parse_hhmm(&definition.start).map_err(translate_domain_error)?;
    let end: time::Time = parse_hhmm(&definition.end).map_err(translate_domain_error)?;
    let domain_definition: ShiftDefinition =
        ShiftDefinition::new(code, start, end, definition.color.clone());

    persistence
        .upsert_shift_definition(&domain_definition)
        .map_err(translate_persistence_error)?;

    append_operator_entry(
        persistence,
        operator,
        actions::SETTINGS,
        format!("Shift definition saved: {}", domain_definition.display_name()),
        None,
    )?;
    Ok(())
}

/// Lists the configured status definitions.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_status_definitions(
    persistence: &mut Persistence,
) -> Result<Vec<StatusDefinitionInfo>, ApiError> {
    let definitions: Vec<StatusDefinition> = persistence
        .get_status_definitions()
        .map_err(translate_persistence_error)?;

    Ok(definitions
        .iter()
        .map(|definition| StatusDefinitionInfo {
            status: definition.status.as_str().to_string(),
            color: definition.color.clone(),
        })
        .collect())
}

/// Inserts or replaces a status definition. Admin only.
///
/// # Errors
///
/// Returns an error on invalid input, a non-admin operator, or a failed
/// store operation.
pub fn save_status_definition(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    definition: &StatusDefinitionInfo,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_settings(operator)?;

    let status: EmployeeStatus = parse_status(&definition.status)?;
    let domain_definition: StatusDefinition =
        StatusDefinition::new(status, definition.color.clone());

    persistence
        .upsert_status_definition(&domain_definition)
        .map_err(translate_persistence_error)?;

    append_operator_entry(
        persistence,
        operator,
        actions::SETTINGS,
        format!("Status definition saved: {status}"),
        None,
    )?;
    Ok(())
}

/// Lists every stored required-staff target.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_required_staff(
    persistence: &mut Persistence,
) -> Result<Vec<RequiredStaffInfo>, ApiError> {
    let targets: Vec<(String, ShiftCode, u32)> = persistence
        .list_required_staff()
        .map_err(translate_persistence_error)?;

    Ok(targets
        .into_iter()
        .map(|(department, shift, required_count)| RequiredStaffInfo {
            department,
            shift: shift.as_str().to_string(),
            required_count,
        })
        .collect())
}

/// Sets the required headcount for a (department, shift) pair. Admin
/// only. A count of 0 removes the constraint.
///
/// # Errors
///
/// Returns an error on invalid input, a non-admin operator, or a failed
/// store operation.
pub fn set_required_staff(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    department: &str,
    shift: &str,
    count: u32,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_set_required_staff(operator)?;

    let shift: ShiftCode = parse_shift(shift)?;
    persistence
        .set_required_staff(department, shift, count)
        .map_err(translate_persistence_error)?;

    append_operator_entry(
        persistence,
        operator,
        actions::SETTINGS,
        format!("Required staff for {department} shift {shift} set to {count}"),
        None,
    )?;
    Ok(())
}

// ============================================================================
// Alerts
// ============================================================================

/// Sweeps every constrained pair and reports broken caps
/// (`current > required`). Drives the periodic alert timer.
///
/// # Errors
///
/// Never fails; the engine degrades failed reads to "no data".
pub fn overflow_alerts(persistence: &mut Persistence) -> Result<Vec<OverflowAlertInfo>, ApiError> {
    let alerts: Vec<OverflowAlert> = StaffingEngine::new(persistence).overflow_alerts();
    Ok(alerts
        .into_iter()
        .map(|alert| OverflowAlertInfo {
            department: alert.department,
            shift: alert.shift.as_str().to_string(),
            required: alert.required,
            current: alert.current,
            excess: alert.excess,
        })
        .collect())
}

/// Sweeps every constrained pair and reports understaffed ones.
///
/// # Errors
///
/// Never fails; the engine degrades failed reads to "no data".
pub fn shortage_alerts(persistence: &mut Persistence) -> Result<Vec<ShortageAlertInfo>, ApiError> {
    let alerts: Vec<ShortageAlert> = StaffingEngine::new(persistence).shortage_alerts();
    Ok(alerts
        .into_iter()
        .map(|alert| ShortageAlertInfo {
            department: alert.department,
            shift: alert.shift.as_str().to_string(),
            required: alert.required,
            current: alert.current,
            missing: alert.missing,
        })
        .collect())
}

// ============================================================================
// History
// ============================================================================

fn history_info(entry: &HistoryEntry) -> Result<HistoryEntryInfo, ApiError> {
    let timestamp: String = entry
        .timestamp
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })?;
    Ok(HistoryEntryInfo {
        timestamp,
        operator_username: entry.operator.username.clone(),
        operator_display_name: entry.operator.display_name.clone(),
        action: entry.action.clone(),
        details: entry.details.clone(),
        employee_id: entry.employee_id,
    })
}

/// Lists history entries, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_history(
    persistence: &mut Persistence,
    limit: i64,
) -> Result<Vec<HistoryEntryInfo>, ApiError> {
    let entries: Vec<HistoryEntry> = persistence
        .list_history(limit)
        .map_err(translate_persistence_error)?;
    entries.iter().map(history_info).collect()
}

/// Lists history entries for one employee, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn history_for_employee(
    persistence: &mut Persistence,
    employee_id: i64,
    limit: i64,
) -> Result<Vec<HistoryEntryInfo>, ApiError> {
    let entries: Vec<HistoryEntry> = persistence
        .history_for_employee(employee_id, limit)
        .map_err(translate_persistence_error)?;
    entries.iter().map(history_info).collect()
}

// ============================================================================
// Operators
// ============================================================================

fn operator_info(data: &OperatorData) -> OperatorInfo {
    OperatorInfo {
        operator_id: data.operator_id,
        username: data.username.clone(),
        display_name: data.display_name.clone(),
        role: data.role.clone(),
        is_disabled: data.is_disabled,
        created_at: data.created_at.clone(),
        last_login_at: data.last_login_at.clone(),
    }
}

/// Creates a new operator account. Admin only.
///
/// # Errors
///
/// Returns an error on a password policy violation, a duplicate
/// username, a non-admin operator, or a failed store operation.
pub fn create_operator(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    request: &CreateOperatorRequest,
) -> Result<CreateOperatorResponse, ApiError> {
    AuthorizationService::authorize_manage_operators(operator)?;

    if crate::auth::Role::parse(&request.role).is_none() {
        return Err(ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Invalid role: '{}'. Expected Admin or Operator", request.role),
        });
    }

    PasswordPolicy::default().validate(
        &request.password,
        &request.confirmation,
        &request.username,
        &request.display_name,
    )?;

    let existing: Option<OperatorData> = persistence
        .get_operator_by_username(&request.username)
        .map_err(translate_persistence_error)?;
    if existing.is_some() {
        return Err(ApiError::InvalidInput {
            field: String::from("username"),
            message: format!("Operator '{}' already exists", request.username.to_uppercase()),
        });
    }

    let operator_id: i64 = persistence
        .create_operator(
            &request.username,
            &request.display_name,
            &request.password,
            &request.role,
        )
        .map_err(translate_persistence_error)?;

    let username: String = request.username.to_uppercase();
    append_operator_entry(
        persistence,
        operator,
        actions::SETTINGS,
        format!("Created operator {username} ({})", request.role),
        None,
    )?;

    Ok(CreateOperatorResponse {
        operator_id,
        username,
        message: String::from("Operator created"),
    })
}

/// Lists all operator accounts. Admin only.
///
/// # Errors
///
/// Returns an error if the operator is not an admin or the query fails.
pub fn list_operators(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
) -> Result<Vec<OperatorInfo>, ApiError> {
    AuthorizationService::authorize_manage_operators(operator)?;

    let operators: Vec<OperatorData> = persistence
        .list_operators()
        .map_err(translate_persistence_error)?;
    Ok(operators.iter().map(operator_info).collect())
}

/// Disables an operator account and removes their sessions. Admin only.
///
/// # Errors
///
/// Returns an error if the target does not exist, the operator is not an
/// admin, or the store operation fails.
pub fn disable_operator(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    operator_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_operators(operator)?;

    let target: OperatorData = persistence
        .get_operator_by_id(operator_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Operator"),
            message: format!("Operator {operator_id} does not exist"),
        })?;

    persistence
        .disable_operator(operator_id)
        .map_err(translate_persistence_error)?;
    append_operator_entry(
        persistence,
        operator,
        actions::SETTINGS,
        format!("Disabled operator {}", target.username),
        None,
    )?;
    Ok(())
}

/// Re-enables a disabled operator account. Admin only.
///
/// # Errors
///
/// Returns an error if the target does not exist, the operator is not an
/// admin, or the store operation fails.
pub fn enable_operator(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    operator_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_operators(operator)?;

    let target: OperatorData = persistence
        .get_operator_by_id(operator_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Operator"),
            message: format!("Operator {operator_id} does not exist"),
        })?;

    persistence
        .enable_operator(operator_id)
        .map_err(translate_persistence_error)?;
    append_operator_entry(
        persistence,
        operator,
        actions::SETTINGS,
        format!("Re-enabled operator {}", target.username),
        None,
    )?;
    Ok(())
}

/// Changes the authenticated operator's own password after re-verifying
/// the current one.
///
/// # Errors
///
/// Returns an error if the current password is wrong, the new password
/// violates the policy, or the store operation fails.
pub fn change_password(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    request: &ChangePasswordRequest,
) -> Result<(), ApiError> {
    let data: OperatorData = persistence
        .get_operator_by_username(&operator.username)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Operator"),
            message: operator.username.clone(),
        })?;

    let current_ok: bool = persistence
        .verify_password(&request.current_password, &data.password_hash)
        .map_err(translate_persistence_error)?;
    if !current_ok {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("Current password is wrong"),
        });
    }

    PasswordPolicy::default().validate(
        &request.new_password,
        &request.confirmation,
        &data.username,
        &data.display_name,
    )?;

    persistence
        .update_password(data.operator_id, &request.new_password)
        .map_err(translate_persistence_error)?;
    Ok(())
}

/// Resets another operator's password. Admin only.
///
/// # Errors
///
/// Returns an error if the target does not exist, the password violates
/// the policy, the operator is not an admin, or the store operation
/// fails.
pub fn reset_password(
    persistence: &mut Persistence,
    operator: &AuthenticatedOperator,
    request: &ResetPasswordRequest,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_operators(operator)?;

    let target: OperatorData = persistence
        .get_operator_by_id(request.operator_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Operator"),
            message: format!("Operator {} does not exist", request.operator_id),
        })?;

    PasswordPolicy::default().validate(
        &request.new_password,
        &request.confirmation,
        &target.username,
        &target.display_name,
    )?;

    persistence
        .update_password(request.operator_id, &request.new_password)
        .map_err(translate_persistence_error)?;
    append_operator_entry(
        persistence,
        operator,
        actions::SETTINGS,
        format!("Reset password for operator {}", target.username),
        None,
    )?;
    Ok(())
}
