// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod absence_tests;

use crate::Persistence;
use time::{Date, Month, Time};
use workadm_domain::{Employee, EmployeeStatus, ShiftCode, ShiftDefinition};

pub fn create_test_db() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database")
}

pub fn create_test_employee(first_name: &str, last_name: &str, shift: ShiftCode) -> Employee {
    Employee::new(
        String::from(first_name),
        String::from(last_name),
        String::from("Assembler"),
        String::from("Assembly"),
        shift,
        EmployeeStatus::Working,
        String::new(),
    )
}

pub fn create_test_date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}

fn hhmm(hour: u8, minute: u8) -> Time {
    Time::from_hms(hour, minute, 0).expect("Valid test time")
}

/// Seeds the standard four-shift configuration: three working shifts and
/// the off shift D.
pub fn seed_shift_definitions(db: &mut Persistence) {
    let definitions: [ShiftDefinition; 4] = [
        ShiftDefinition::new(ShiftCode::A, hhmm(6, 0), hhmm(14, 0), String::from("yellow")),
        ShiftDefinition::new(ShiftCode::B, hhmm(14, 0), hhmm(22, 0), String::from("orange")),
        ShiftDefinition::new(ShiftCode::C, hhmm(22, 0), hhmm(6, 0), String::from("blue")),
        ShiftDefinition::new(ShiftCode::D, hhmm(0, 0), hhmm(0, 0), String::from("gray")),
    ];
    for definition in &definitions {
        db.upsert_shift_definition(definition)
            .expect("Shift definition saved");
    }
}
