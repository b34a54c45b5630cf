// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for vacation and sick-leave storage and the daily status refresh.

use crate::PersistenceError;
use crate::tests::{create_test_date, create_test_db, create_test_employee, seed_shift_definitions};
use time::{Date, Month};
use workadm_audit::{HistoryEntry, actions};
use workadm_domain::{
    AbsenceKind, AbsenceRecord, Employee, EmployeeStatus, ShiftCode,
};

fn vacation(employee_id: i64, start: Date, end: Date) -> AbsenceRecord {
    AbsenceRecord::new(employee_id, AbsenceKind::Vacation, start, end).expect("Valid date range")
}

fn sick_leave(employee_id: i64, start: Date, end: Date) -> AbsenceRecord {
    AbsenceRecord::new(employee_id, AbsenceKind::SickLeave, start, end).expect("Valid date range")
}

#[test]
fn test_record_vacation_flips_status_to_on_vacation() {
    let mut db = create_test_db();

    let employee_id: i64 = db
        .insert_employee(&create_test_employee("Nuno", "Reis", ShiftCode::A))
        .expect("Employee inserted");

    let record: AbsenceRecord = vacation(
        employee_id,
        create_test_date(2026, Month::July, 1),
        create_test_date(2026, Month::July, 14),
    );
    let record_id: i64 = db.record_absence(&record).expect("Absence recorded");
    assert!(record_id > 0);

    let stored: Employee = db
        .get_employee(employee_id)
        .expect("Query succeeded")
        .expect("Employee found");
    assert_eq!(stored.status, EmployeeStatus::OnVacation);
}

#[test]
fn test_record_sick_leave_flips_status_to_on_sick_leave() {
    let mut db = create_test_db();

    let employee_id: i64 = db
        .insert_employee(&create_test_employee("Olga", "Ramos", ShiftCode::B))
        .expect("Employee inserted");

    let record: AbsenceRecord = sick_leave(
        employee_id,
        create_test_date(2026, Month::March, 2),
        create_test_date(2026, Month::March, 4),
    );
    db.record_absence(&record).expect("Absence recorded");

    let stored: Employee = db
        .get_employee(employee_id)
        .expect("Query succeeded")
        .expect("Employee found");
    assert_eq!(stored.status, EmployeeStatus::OnSickLeave);
}

#[test]
fn test_absences_for_employee_lists_both_kinds() {
    let mut db = create_test_db();

    let employee_id: i64 = db
        .insert_employee(&create_test_employee("Pedro", "Sousa", ShiftCode::A))
        .expect("Employee inserted");

    db.record_absence(&vacation(
        employee_id,
        create_test_date(2026, Month::June, 1),
        create_test_date(2026, Month::June, 5),
    ))
    .expect("Absence recorded");
    db.record_absence(&sick_leave(
        employee_id,
        create_test_date(2026, Month::September, 10),
        create_test_date(2026, Month::September, 12),
    ))
    .expect("Absence recorded");

    let records: Vec<AbsenceRecord> = db
        .absences_for_employee(employee_id)
        .expect("Query succeeded");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, AbsenceKind::Vacation);
    assert_eq!(records[0].total_days, 5);
    assert_eq!(records[1].kind, AbsenceKind::SickLeave);
    assert_eq!(records[1].total_days, 3);
}

#[test]
fn test_delete_absence_removes_the_record() {
    let mut db = create_test_db();

    let employee_id: i64 = db
        .insert_employee(&create_test_employee("Rui", "Teles", ShiftCode::A))
        .expect("Employee inserted");
    let record_id: i64 = db
        .record_absence(&vacation(
            employee_id,
            create_test_date(2026, Month::May, 1),
            create_test_date(2026, Month::May, 3),
        ))
        .expect("Absence recorded");

    db.delete_absence(AbsenceKind::Vacation, record_id)
        .expect("Absence deleted");

    let records: Vec<AbsenceRecord> = db
        .absences_for_employee(employee_id)
        .expect("Query succeeded");
    assert!(records.is_empty());
}

#[test]
fn test_delete_missing_absence_is_not_found() {
    let mut db = create_test_db();

    let result: Result<(), PersistenceError> = db.delete_absence(AbsenceKind::SickLeave, 404);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_has_active_absence_covers_boundary_dates_inclusively() {
    let mut db = create_test_db();

    let employee_id: i64 = db
        .insert_employee(&create_test_employee("Sofia", "Vaz", ShiftCode::A))
        .expect("Employee inserted");
    db.record_absence(&vacation(
        employee_id,
        create_test_date(2026, Month::August, 10),
        create_test_date(2026, Month::August, 20),
    ))
    .expect("Absence recorded");

    let before: bool = db
        .has_active_absence(employee_id, create_test_date(2026, Month::August, 9))
        .expect("Query succeeded");
    let first_day: bool = db
        .has_active_absence(employee_id, create_test_date(2026, Month::August, 10))
        .expect("Query succeeded");
    let last_day: bool = db
        .has_active_absence(employee_id, create_test_date(2026, Month::August, 20))
        .expect("Query succeeded");
    let after: bool = db
        .has_active_absence(employee_id, create_test_date(2026, Month::August, 21))
        .expect("Query succeeded");

    assert!(!before);
    assert!(first_day);
    assert!(last_day);
    assert!(!after);
}

#[test]
fn test_absence_records_cascade_when_the_employee_is_deleted() {
    let mut db = create_test_db();

    let employee_id: i64 = db
        .insert_employee(&create_test_employee("Teresa", "Cunha", ShiftCode::B))
        .expect("Employee inserted");
    db.record_absence(&sick_leave(
        employee_id,
        create_test_date(2026, Month::April, 1),
        create_test_date(2026, Month::April, 2),
    ))
    .expect("Absence recorded");

    db.delete_employee(employee_id).expect("Employee deleted");

    let records: Vec<AbsenceRecord> = db
        .absences_for_employee(employee_id)
        .expect("Query succeeded");
    assert!(records.is_empty());
}

#[test]
fn test_status_refresh_derives_free_and_working_from_shifts() {
    let mut db = create_test_db();
    seed_shift_definitions(&mut db);

    let mut off_shift: Employee = create_test_employee("Vasco", "Moura", ShiftCode::D);
    off_shift.status = EmployeeStatus::Working;
    let off_id: i64 = db.insert_employee(&off_shift).expect("Employee inserted");

    let mut stale_free: Employee = create_test_employee("Xavier", "Leal", ShiftCode::A);
    stale_free.status = EmployeeStatus::Free;
    let stale_id: i64 = db.insert_employee(&stale_free).expect("Employee inserted");

    let changed: usize = db
        .apply_statuses_from_shifts(create_test_date(2026, Month::October, 1))
        .expect("Refresh succeeded");

    assert_eq!(changed, 2);
    let off_stored: Employee = db
        .get_employee(off_id)
        .expect("Query succeeded")
        .expect("Employee found");
    let stale_stored: Employee = db
        .get_employee(stale_id)
        .expect("Query succeeded")
        .expect("Employee found");
    assert_eq!(off_stored.status, EmployeeStatus::Free);
    assert_eq!(stale_stored.status, EmployeeStatus::Working);
}

#[test]
fn test_status_refresh_skips_employees_with_an_active_absence() {
    let mut db = create_test_db();
    seed_shift_definitions(&mut db);

    let employee_id: i64 = db
        .insert_employee(&create_test_employee("Zeca", "Abreu", ShiftCode::A))
        .expect("Employee inserted");
    db.record_absence(&vacation(
        employee_id,
        create_test_date(2026, Month::July, 1),
        create_test_date(2026, Month::July, 31),
    ))
    .expect("Absence recorded");

    let changed: usize = db
        .apply_statuses_from_shifts(create_test_date(2026, Month::July, 15))
        .expect("Refresh succeeded");

    assert_eq!(changed, 0);
    let stored: Employee = db
        .get_employee(employee_id)
        .expect("Query succeeded")
        .expect("Employee found");
    assert_eq!(stored.status, EmployeeStatus::OnVacation);
}

#[test]
fn test_status_refresh_resumes_after_the_absence_ends() {
    let mut db = create_test_db();
    seed_shift_definitions(&mut db);

    let employee_id: i64 = db
        .insert_employee(&create_test_employee("Alda", "Neves", ShiftCode::A))
        .expect("Employee inserted");
    db.record_absence(&vacation(
        employee_id,
        create_test_date(2026, Month::July, 1),
        create_test_date(2026, Month::July, 14),
    ))
    .expect("Absence recorded");

    let changed: usize = db
        .apply_statuses_from_shifts(create_test_date(2026, Month::July, 15))
        .expect("Refresh succeeded");

    assert_eq!(changed, 1);
    let stored: Employee = db
        .get_employee(employee_id)
        .expect("Query succeeded")
        .expect("Employee found");
    assert_eq!(stored.status, EmployeeStatus::Working);
}

#[test]
fn test_status_refresh_logs_one_system_entry_when_anything_changed() {
    let mut db = create_test_db();
    seed_shift_definitions(&mut db);

    let mut employee: Employee = create_test_employee("Bento", "Prado", ShiftCode::D);
    employee.status = EmployeeStatus::Working;
    db.insert_employee(&employee).expect("Employee inserted");

    db.apply_statuses_from_shifts(create_test_date(2026, Month::October, 1))
        .expect("Refresh succeeded");

    let entries: Vec<HistoryEntry> = db.list_history(100).expect("Query succeeded");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, actions::REFRESH_STATUSES);
    assert_eq!(entries[0].operator.username, "SYSTEM");
}

#[test]
fn test_status_refresh_logs_nothing_when_nothing_changed() {
    let mut db = create_test_db();
    seed_shift_definitions(&mut db);

    db.insert_employee(&create_test_employee("Celia", "Pires", ShiftCode::A))
        .expect("Employee inserted");

    let changed: usize = db
        .apply_statuses_from_shifts(create_test_date(2026, Month::October, 1))
        .expect("Refresh succeeded");

    assert_eq!(changed, 0);
    let entries: Vec<HistoryEntry> = db.list_history(100).expect("Query succeeded");
    assert!(entries.is_empty());
}
