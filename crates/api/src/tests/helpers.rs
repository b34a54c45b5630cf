// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for the API handler tests.

use time::Time;
use workadm_domain::{Employee, EmployeeStatus, ShiftCode, ShiftDefinition};
use workadm_persistence::Persistence;

use crate::auth::{AuthenticatedOperator, Role};
use crate::request_response::AddEmployeeRequest;

fn hhmm(hour: u8, minute: u8) -> Time {
    Time::from_hms(hour, minute, 0).expect("valid time")
}

/// An in-memory database seeded with the standard four shifts
/// (D is the off shift).
pub fn create_test_db() -> Persistence {
    let mut db: Persistence = Persistence::new_in_memory().expect("Failed to create test database");

    let definitions: [ShiftDefinition; 4] = [
        ShiftDefinition::new(ShiftCode::A, hhmm(6, 0), hhmm(14, 0), String::from("yellow")),
        ShiftDefinition::new(ShiftCode::B, hhmm(14, 0), hhmm(22, 0), String::from("orange")),
        ShiftDefinition::new(ShiftCode::C, hhmm(22, 0), hhmm(6, 0), String::from("blue")),
        ShiftDefinition::new(ShiftCode::D, hhmm(0, 0), hhmm(0, 0), String::from("gray")),
    ];
    for definition in &definitions {
        db.upsert_shift_definition(definition)
            .expect("Failed to seed shift definition");
    }

    db
}

pub fn admin() -> AuthenticatedOperator {
    AuthenticatedOperator::new(
        String::from("ADMIN"),
        String::from("Site Admin"),
        Role::Admin,
    )
}

pub fn operator() -> AuthenticatedOperator {
    AuthenticatedOperator::new(
        String::from("MSILVA"),
        String::from("Marta Silva"),
        Role::Operator,
    )
}

/// Inserts a `Working` employee directly, bypassing the staffing gate.
pub fn insert_working(db: &mut Persistence, first: &str, last: &str, shift: ShiftCode) -> i64 {
    let employee: Employee = Employee::new(
        first.to_string(),
        last.to_string(),
        String::from("Assembler"),
        String::from("Assembly"),
        shift,
        EmployeeStatus::Working,
        String::new(),
    );
    db.insert_employee(&employee).expect("Failed to insert employee")
}

pub fn add_request(first: &str, last: &str, shift: &str, confirmed: bool) -> AddEmployeeRequest {
    AddEmployeeRequest {
        first_name: first.to_string(),
        last_name: last.to_string(),
        position: String::from("Assembler"),
        department: String::from("Assembly"),
        shift: shift.to_string(),
        machine: String::new(),
        confirmed,
    }
}
