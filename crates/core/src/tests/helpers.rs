// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::StoreError;
use crate::store::{AuditSink, EmployeeStore, SettingsStore};
use std::collections::HashMap;
use workadm_audit::HistoryEntry;
use workadm_domain::{
    Employee, EmployeeStatus, OverflowPolicy, ShiftCode, ShiftDefinition, parse_hhmm,
};

/// In-memory store for engine tests.
///
/// Implements all three collaborator traits; moves can be failure-injected
/// per employee id to exercise the partial-success path.
pub struct MemoryStore {
    pub employees: Vec<Employee>,
    pub required: HashMap<(String, ShiftCode), u32>,
    pub definitions: Vec<ShiftDefinition>,
    pub policy: OverflowPolicy,
    pub departments: Vec<String>,
    pub fail_moves_for: Vec<i64>,
    pub log: Vec<HistoryEntry>,
    next_id: i64,
}

impl MemoryStore {
    /// A store with the standard four shifts (D is the off shift) and a
    /// single "Assembly" department.
    pub fn new() -> Self {
        let definitions: Vec<ShiftDefinition> = vec![
            shift_definition(ShiftCode::A, "06:00", "14:00"),
            shift_definition(ShiftCode::B, "14:00", "22:00"),
            shift_definition(ShiftCode::C, "22:00", "06:00"),
            shift_definition(ShiftCode::D, "00:00", "00:00"),
        ];
        Self {
            employees: Vec::new(),
            required: HashMap::new(),
            definitions,
            policy: OverflowPolicy::Warning,
            departments: vec![String::from("Assembly")],
            fail_moves_for: Vec::new(),
            log: Vec::new(),
            next_id: 1,
        }
    }

    pub fn set_required(&mut self, department: &str, shift: ShiftCode, count: u32) {
        self.required
            .insert((String::from(department), shift), count);
    }

    pub fn add_working(&mut self, department: &str, shift: ShiftCode) -> i64 {
        self.add_with_status(department, shift, EmployeeStatus::Working)
    }

    pub fn add_with_status(
        &mut self,
        department: &str,
        shift: ShiftCode,
        status: EmployeeStatus,
    ) -> i64 {
        let id: i64 = self.next_id;
        self.next_id += 1;
        self.employees.push(Employee::with_id(
            id,
            format!("First{id}"),
            format!("Last{id}"),
            String::from("Operator"),
            String::from(department),
            shift,
            status,
            String::new(),
        ));
        id
    }

    pub fn employee(&self, employee_id: i64) -> &Employee {
        self.employees
            .iter()
            .find(|employee| employee.employee_id == Some(employee_id))
            .expect("employee exists")
    }
}

pub fn shift_definition(code: ShiftCode, start: &str, end: &str) -> ShiftDefinition {
    ShiftDefinition::new(
        code,
        parse_hhmm(start).expect("valid test time"),
        parse_hhmm(end).expect("valid test time"),
        String::from("white"),
    )
}

impl EmployeeStore for MemoryStore {
    fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.employees.clone())
    }

    fn employees_in(
        &mut self,
        department: &str,
        shift: ShiftCode,
        status: EmployeeStatus,
    ) -> Result<Vec<Employee>, StoreError> {
        let mut matched: Vec<Employee> = self
            .employees
            .iter()
            .filter(|employee| {
                employee.department == department
                    && employee.shift == shift
                    && employee.status == status
            })
            .cloned()
            .collect();
        matched.sort_by_key(|employee| employee.employee_id);
        Ok(matched)
    }

    fn update_department_shift_position(
        &mut self,
        employee_id: i64,
        department: Option<&str>,
        shift: Option<ShiftCode>,
        position: Option<&str>,
    ) -> Result<(), StoreError> {
        if self.fail_moves_for.contains(&employee_id) {
            return Err(StoreError::MutationFailed(String::from(
                "injected move failure",
            )));
        }
        let employee: &mut Employee = self
            .employees
            .iter_mut()
            .find(|employee| employee.employee_id == Some(employee_id))
            .ok_or(StoreError::EmployeeNotFound(employee_id))?;
        if let Some(department) = department {
            employee.department = String::from(department);
        }
        if let Some(shift) = shift {
            employee.shift = shift;
        }
        if let Some(position) = position {
            employee.position = String::from(position);
        }
        Ok(())
    }

    fn update_status(
        &mut self,
        employee_id: i64,
        status: EmployeeStatus,
    ) -> Result<(), StoreError> {
        let employee: &mut Employee = self
            .employees
            .iter_mut()
            .find(|employee| employee.employee_id == Some(employee_id))
            .ok_or(StoreError::EmployeeNotFound(employee_id))?;
        employee.status = status;
        Ok(())
    }

    fn delete(&mut self, employee_id: i64) -> Result<(), StoreError> {
        self.employees
            .retain(|employee| employee.employee_id != Some(employee_id));
        Ok(())
    }
}

impl SettingsStore for MemoryStore {
    fn required_staff(&mut self, department: &str, shift: ShiftCode) -> Result<u32, StoreError> {
        Ok(self
            .required
            .get(&(String::from(department), shift))
            .copied()
            .unwrap_or(0))
    }

    fn shift_definitions(&mut self) -> Result<Vec<ShiftDefinition>, StoreError> {
        Ok(self.definitions.clone())
    }

    fn overflow_policy(&mut self) -> Result<OverflowPolicy, StoreError> {
        Ok(self.policy)
    }

    fn departments(&mut self) -> Result<Vec<String>, StoreError> {
        Ok(self.departments.clone())
    }
}

impl AuditSink for MemoryStore {
    fn log(&mut self, entry: &HistoryEntry) -> Result<(), StoreError> {
        self.log.push(entry.clone());
        Ok(())
    }
}
