// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite persistence layer for the workadm roster system.
//!
//! This crate stores the roster (employees, shift and status definitions,
//! key/value settings, required-staff targets), the append-only history
//! log, vacation and sick-leave records, and operator accounts with their
//! login sessions. It is built on Diesel with embedded migrations.
//!
//! The [`Persistence`] adapter owns one `SqliteConnection` and implements
//! the staffing engine's collaborator traits (`EmployeeStore`,
//! `SettingsStore`, `AuditSink`), so the engine can run directly against
//! a live database without knowing about Diesel.
//!
//! In-memory databases (used throughout the tests) are created with a
//! unique shared-memory URL per call via an atomic counter, which keeps
//! tests isolated without time-based names. File databases get WAL mode
//! and a startup check that foreign key enforcement is active.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use tracing::info;

use workadm::{AuditSink, EmployeeStore, SettingsStore, StoreError};
use workadm_audit::{HistoryEntry, Operator, actions};
use workadm_domain::{
    AbsenceKind, AbsenceRecord, Employee, EmployeeStatus, OverflowPolicy, ShiftCode,
    ShiftDefinition, StatusDefinition, status_for_shift,
};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{OperatorData, SessionData};
pub use error::PersistenceError;
pub use queries::settings::{DEPARTMENTS_KEY, MACHINES_KEY, OVERFLOW_POLICY_KEY, POSITIONS_KEY};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over one SQLite connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter with an in-memory database.
    ///
    /// Each call receives its own shared-memory database instance, so
    /// concurrently running tests never see each other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url: String = format!("file:workadm_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter with a file-based database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Lists the whole roster ordered by ascending employee id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees(&mut self) -> Result<Vec<Employee>, PersistenceError> {
        queries::employees::list_employees(&mut self.conn)
    }

    /// Retrieves one employee by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_employee(&mut self, employee_id: i64) -> Result<Option<Employee>, PersistenceError> {
        queries::employees::get_employee(&mut self.conn, employee_id)
    }

    /// Lists the employees in a (department, shift) pair with the given
    /// status, ordered by ascending employee id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn employees_in(
        &mut self,
        department: &str,
        shift: ShiftCode,
        status: EmployeeStatus,
    ) -> Result<Vec<Employee>, PersistenceError> {
        queries::employees::employees_in(&mut self.conn, department, shift, status)
    }

    /// Inserts a new employee and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_employee(&mut self, employee: &Employee) -> Result<i64, PersistenceError> {
        mutations::employees::insert_employee(&mut self.conn, employee)
    }

    /// Rewrites every field of an existing employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or the update fails.
    pub fn update_employee(
        &mut self,
        employee_id: i64,
        employee: &Employee,
    ) -> Result<(), PersistenceError> {
        mutations::employees::update_employee(&mut self.conn, employee_id, employee)
    }

    /// Updates an employee's machine assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or the update fails.
    pub fn update_machine(
        &mut self,
        employee_id: i64,
        machine: &str,
    ) -> Result<(), PersistenceError> {
        mutations::employees::update_machine(&mut self.conn, employee_id, machine)
    }

    /// Updates an employee's working status.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or the update fails.
    pub fn set_employee_status(
        &mut self,
        employee_id: i64,
        status: EmployeeStatus,
    ) -> Result<(), PersistenceError> {
        mutations::employees::update_status(&mut self.conn, employee_id, status)
    }

    /// Deletes an employee. History rows survive; absence rows cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or the delete fails.
    pub fn delete_employee(&mut self, employee_id: i64) -> Result<(), PersistenceError> {
        mutations::employees::delete_employee(&mut self.conn, employee_id)
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Retrieves a raw setting value.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_setting(&mut self, key: &str) -> Result<Option<String>, PersistenceError> {
        queries::settings::get_setting(&mut self.conn, key)
    }

    /// Stores a raw setting value.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        mutations::settings::set_setting(&mut self.conn, key, value)
    }

    /// Retrieves a comma-joined list setting.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_list_setting(&mut self, key: &str) -> Result<Vec<String>, PersistenceError> {
        queries::settings::get_list_setting(&mut self.conn, key)
    }

    /// Stores a list setting as a comma-joined value.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn set_list_setting(
        &mut self,
        key: &str,
        values: &[String],
    ) -> Result<(), PersistenceError> {
        mutations::settings::set_list_setting(&mut self.conn, key, values)
    }

    /// Reads the configured overflow policy, defaulting to `warning`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_overflow_policy(&mut self) -> Result<OverflowPolicy, PersistenceError> {
        queries::settings::get_overflow_policy(&mut self.conn)
    }

    /// Stores the overflow policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn set_overflow_policy(&mut self, policy: OverflowPolicy) -> Result<(), PersistenceError> {
        mutations::settings::set_overflow_policy(&mut self.conn, policy)
    }

    /// Loads every configured shift definition ordered by shift code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_shift_definitions(&mut self) -> Result<Vec<ShiftDefinition>, PersistenceError> {
        queries::settings::get_shift_definitions(&mut self.conn)
    }

    /// Inserts or replaces a shift definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn upsert_shift_definition(
        &mut self,
        definition: &ShiftDefinition,
    ) -> Result<(), PersistenceError> {
        mutations::settings::upsert_shift_definition(&mut self.conn, definition)
    }

    /// Loads every configured status definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_status_definitions(&mut self) -> Result<Vec<StatusDefinition>, PersistenceError> {
        queries::settings::get_status_definitions(&mut self.conn)
    }

    /// Inserts or replaces a status definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn upsert_status_definition(
        &mut self,
        definition: &StatusDefinition,
    ) -> Result<(), PersistenceError> {
        mutations::settings::upsert_status_definition(&mut self.conn, definition)
    }

    /// Reads the required headcount for a (department, shift) pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_required_staff(
        &mut self,
        department: &str,
        shift: ShiftCode,
    ) -> Result<u32, PersistenceError> {
        queries::settings::get_required_staff(&mut self.conn, department, shift)
    }

    /// Inserts or replaces a required-staff target.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn set_required_staff(
        &mut self,
        department: &str,
        shift: ShiftCode,
        count: u32,
    ) -> Result<(), PersistenceError> {
        mutations::settings::set_required_staff(&mut self.conn, department, shift, count)
    }

    /// Lists every stored required-staff target.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_required_staff(
        &mut self,
    ) -> Result<Vec<(String, ShiftCode, u32)>, PersistenceError> {
        queries::settings::list_required_staff(&mut self.conn)
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Appends one history entry and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn append_history(&mut self, entry: &HistoryEntry) -> Result<i64, PersistenceError> {
        mutations::history::append_history(&mut self.conn, entry)
    }

    /// Lists history entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_history(&mut self, limit: i64) -> Result<Vec<HistoryEntry>, PersistenceError> {
        queries::history::list_history(&mut self.conn, limit)
    }

    /// Lists history entries for one employee, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn history_for_employee(
        &mut self,
        employee_id: i64,
        limit: i64,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        queries::history::history_for_employee(&mut self.conn, employee_id, limit)
    }

    // ========================================================================
    // Absences
    // ========================================================================

    /// Records an absence and flips the employee's status accordingly
    /// (vacation to `OnVacation`, sick leave to `OnSickLeave`).
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or the status update fails.
    pub fn record_absence(&mut self, record: &AbsenceRecord) -> Result<i64, PersistenceError> {
        let record_id: i64 = mutations::absences::insert_absence(&mut self.conn, record)?;

        let status: EmployeeStatus = match record.kind {
            AbsenceKind::Vacation => EmployeeStatus::OnVacation,
            AbsenceKind::SickLeave => EmployeeStatus::OnSickLeave,
        };
        mutations::employees::update_status(&mut self.conn, record.employee_id, status)?;

        Ok(record_id)
    }

    /// Lists every absence recorded for an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn absences_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<AbsenceRecord>, PersistenceError> {
        queries::absences::absences_for_employee(&mut self.conn, employee_id)
    }

    /// Deletes one absence record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or the delete fails.
    pub fn delete_absence(
        &mut self,
        kind: AbsenceKind,
        record_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::absences::delete_absence(&mut self.conn, kind, record_id)
    }

    /// Returns whether an employee has an absence covering the given date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn has_active_absence(
        &mut self,
        employee_id: i64,
        date: Date,
    ) -> Result<bool, PersistenceError> {
        queries::absences::has_active_absence(&mut self.conn, employee_id, date)
    }

    /// Re-derives every employee's status from the shift configuration.
    ///
    /// Employees assigned to the off shift become `Free`, everyone else
    /// `Working`. Employees with an absence covering `today` are skipped
    /// so the refresh never overwrites a recorded vacation or sick leave.
    /// One history entry attributed to the system operator is appended
    /// when anything changed.
    ///
    /// # Arguments
    ///
    /// * `today` - The date the refresh runs for
    ///
    /// # Errors
    ///
    /// Returns an error if a query or update fails.
    pub fn apply_statuses_from_shifts(&mut self, today: Date) -> Result<usize, PersistenceError> {
        let definitions: Vec<ShiftDefinition> =
            queries::settings::get_shift_definitions(&mut self.conn)?;
        let roster: Vec<Employee> = queries::employees::list_employees(&mut self.conn)?;

        let mut changed: usize = 0;
        for employee in roster {
            let Some(employee_id) = employee.employee_id else {
                continue;
            };
            if queries::absences::has_active_absence(&mut self.conn, employee_id, today)? {
                continue;
            }
            let derived: EmployeeStatus =
                status_for_shift(employee.shift, &definitions, employee.status);
            if derived != employee.status {
                mutations::employees::update_status(&mut self.conn, employee_id, derived)?;
                changed += 1;
            }
        }

        if changed > 0 {
            info!("Status refresh updated {} employees", changed);
            let entry: HistoryEntry = HistoryEntry::new(
                Operator::system(),
                String::from(actions::REFRESH_STATUSES),
                format!("Re-derived statuses from shift configuration ({changed} changed)"),
                None,
            );
            mutations::history::append_history(&mut self.conn, &entry)?;
        }

        Ok(changed)
    }

    // ========================================================================
    // Operators & sessions
    // ========================================================================

    /// Creates a new operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator cannot be created.
    pub fn create_operator(
        &mut self,
        username: &str,
        display_name: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_operator(&mut self.conn, username, display_name, password, role)
    }

    /// Retrieves an operator by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_operator_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_username(&mut self.conn, username)
    }

    /// Retrieves an operator by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_operator_by_id(
        &mut self,
        operator_id: i64,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_id(&mut self.conn, operator_id)
    }

    /// Lists all operators.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_operators(&mut self) -> Result<Vec<OperatorData>, PersistenceError> {
        queries::operators::list_operators(&mut self.conn)
    }

    /// Counts stored operators.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_operators(&mut self) -> Result<i64, PersistenceError> {
        queries::operators::count_operators(&mut self.conn)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::operators::verify_password(password, password_hash)
    }

    /// Updates the last login timestamp for an operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_last_login(&mut self.conn, operator_id)
    }

    /// Disables an operator and removes their sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn disable_operator(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::disable_operator(&mut self.conn, operator_id)
    }

    /// Re-enables a disabled operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn enable_operator(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::enable_operator(&mut self.conn, operator_id)
    }

    /// Updates an operator's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_password(
        &mut self,
        operator_id: i64,
        new_password: &str,
    ) -> Result<(), PersistenceError> {
        mutations::operators::update_password(&mut self.conn, operator_id, new_password)
    }

    /// Creates a new session for an operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        operator_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_session(&mut self.conn, session_token, operator_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::operators::get_session_by_token(&mut self.conn, session_token)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::operators::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions expired at or before the given timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::operators::delete_expired_sessions(&mut self.conn, now)
    }
}

impl EmployeeStore for Persistence {
    fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        Ok(Self::list_employees(self)?)
    }

    fn employees_in(
        &mut self,
        department: &str,
        shift: ShiftCode,
        status: EmployeeStatus,
    ) -> Result<Vec<Employee>, StoreError> {
        Ok(Self::employees_in(self, department, shift, status)?)
    }

    fn update_department_shift_position(
        &mut self,
        employee_id: i64,
        department: Option<&str>,
        shift: Option<ShiftCode>,
        position: Option<&str>,
    ) -> Result<(), StoreError> {
        Ok(mutations::employees::update_department_shift_position(
            &mut self.conn,
            employee_id,
            department,
            shift,
            position,
        )?)
    }

    fn update_status(&mut self, employee_id: i64, status: EmployeeStatus) -> Result<(), StoreError> {
        Ok(mutations::employees::update_status(
            &mut self.conn,
            employee_id,
            status,
        )?)
    }

    fn delete(&mut self, employee_id: i64) -> Result<(), StoreError> {
        Ok(Self::delete_employee(self, employee_id)?)
    }
}

impl SettingsStore for Persistence {
    fn required_staff(&mut self, department: &str, shift: ShiftCode) -> Result<u32, StoreError> {
        Ok(Self::get_required_staff(self, department, shift)?)
    }

    fn shift_definitions(&mut self) -> Result<Vec<ShiftDefinition>, StoreError> {
        Ok(Self::get_shift_definitions(self)?)
    }

    fn overflow_policy(&mut self) -> Result<OverflowPolicy, StoreError> {
        Ok(Self::get_overflow_policy(self)?)
    }

    fn departments(&mut self) -> Result<Vec<String>, StoreError> {
        Ok(Self::get_list_setting(self, DEPARTMENTS_KEY)?)
    }
}

impl AuditSink for Persistence {
    fn log(&mut self, entry: &HistoryEntry) -> Result<(), StoreError> {
        Self::append_history(self, entry)?;
        Ok(())
    }
}
