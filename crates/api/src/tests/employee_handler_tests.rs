// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use workadm_audit::actions;
use workadm_domain::{EmployeeStatus, OverflowPolicy, ShiftCode};
use workadm_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    AddEmployeeResponse, GateOutcome, MoveEmployeeRequest, MoveEmployeeResponse, SetMachineRequest,
    SetStatusRequest, UpdateEmployeeRequest, UpdateEmployeeResponse,
};
use crate::tests::helpers::{add_request, admin, create_test_db, insert_working, operator};

#[test]
fn test_add_employee_below_requirement_is_applied() {
    let mut db: Persistence = create_test_db();
    db.set_required_staff("Assembly", ShiftCode::A, 3).unwrap();
    insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    let response: AddEmployeeResponse =
        handlers::add_employee(&mut db, &operator(), &add_request("Rui", "Costa", "A", false))
            .unwrap();

    assert_eq!(response.outcome, GateOutcome::Applied);
    assert!(response.employee_id.is_some());
    assert_eq!(db.list_employees().unwrap().len(), 2);

    let history = db.list_history(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, actions::ADD_EMPLOYEE);
    assert_eq!(history[0].operator.username, "MSILVA");
    assert_eq!(history[0].employee_id, response.employee_id);
}

#[test]
fn test_add_employee_at_cap_requires_confirmation() {
    let mut db: Persistence = create_test_db();
    db.set_required_staff("Assembly", ShiftCode::A, 2).unwrap();
    insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    // Default policy is warning; the second employee reaches the cap.
    let response: AddEmployeeResponse =
        handlers::add_employee(&mut db, &operator(), &add_request("Rui", "Costa", "A", false))
            .unwrap();

    assert_eq!(
        response.outcome,
        GateOutcome::ConfirmationRequired {
            required: 2,
            prospective: 2
        }
    );
    assert!(response.employee_id.is_none());
    assert_eq!(db.list_employees().unwrap().len(), 1);
    assert!(db.list_history(10).unwrap().is_empty());
}

#[test]
fn test_add_employee_confirmed_resubmission_is_applied() {
    let mut db: Persistence = create_test_db();
    db.set_required_staff("Assembly", ShiftCode::A, 2).unwrap();
    insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    let response: AddEmployeeResponse =
        handlers::add_employee(&mut db, &operator(), &add_request("Rui", "Costa", "A", true))
            .unwrap();

    assert_eq!(
        response.outcome,
        GateOutcome::AppliedConfirmed {
            required: 2,
            current: 2
        }
    );
    assert!(response.employee_id.is_some());
    assert_eq!(db.list_employees().unwrap().len(), 2);
    assert_eq!(db.list_history(10).unwrap().len(), 1);
}

#[test]
fn test_add_employee_blocked_by_policy() {
    let mut db: Persistence = create_test_db();
    db.set_required_staff("Assembly", ShiftCode::A, 1).unwrap();
    db.set_overflow_policy(OverflowPolicy::Block).unwrap();
    insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    let response: AddEmployeeResponse =
        handlers::add_employee(&mut db, &operator(), &add_request("Rui", "Costa", "A", true))
            .unwrap();

    assert_eq!(
        response.outcome,
        GateOutcome::Blocked {
            required: 1,
            prospective: 2
        }
    );
    assert!(response.employee_id.is_none());
    assert_eq!(db.list_employees().unwrap().len(), 1);
    assert!(db.list_history(10).unwrap().is_empty());
}

#[test]
fn test_add_employee_auto_adjust_relocates_excess_and_audits_it() {
    let mut db: Persistence = create_test_db();
    db.set_required_staff("Assembly", ShiftCode::A, 2).unwrap();
    db.set_required_staff("Assembly", ShiftCode::B, 2).unwrap();
    db.set_overflow_policy(OverflowPolicy::AutoAdjust).unwrap();
    insert_working(&mut db, "Ana", "Reis", ShiftCode::A);
    insert_working(&mut db, "Rui", "Costa", ShiftCode::A);
    let newest_id: i64 = insert_working(&mut db, "Eva", "Pinto", ShiftCode::A);

    let response: AddEmployeeResponse =
        handlers::add_employee(&mut db, &operator(), &add_request("Tiago", "Melo", "A", false))
            .unwrap();

    // The most recently added excess employee moved to the shift with
    // free slots, then the new employee joined shift A.
    let GateOutcome::AutoAdjusted { moved, failed } = &response.outcome else {
        panic!("expected AutoAdjusted, got {:?}", response.outcome);
    };
    assert_eq!(moved.len(), 1);
    assert!(failed.is_empty());
    assert_eq!(moved[0].employee_id, newest_id);
    assert_eq!(moved[0].to_shift, "B");

    let relocated = db.get_employee(newest_id).unwrap().unwrap();
    assert_eq!(relocated.shift, ShiftCode::B);

    let history = db.list_history(10).unwrap();
    assert_eq!(history.len(), 2);
    // Newest first: the add itself, then the system rebalance entry.
    assert_eq!(history[0].action, actions::ADD_EMPLOYEE);
    assert_eq!(history[1].action, actions::AUTO_REBALANCE);
    assert_eq!(history[1].operator.username, "SYSTEM");
    assert_eq!(history[1].employee_id, Some(newest_id));
}

#[test]
fn test_add_employee_to_off_shift_bypasses_gate_and_is_free() {
    let mut db: Persistence = create_test_db();
    db.set_required_staff("Assembly", ShiftCode::D, 1).unwrap();
    db.set_overflow_policy(OverflowPolicy::Block).unwrap();

    let response: AddEmployeeResponse =
        handlers::add_employee(&mut db, &operator(), &add_request("Ana", "Reis", "D", false))
            .unwrap();

    assert_eq!(response.outcome, GateOutcome::Applied);
    let employee = db
        .get_employee(response.employee_id.unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(employee.status, EmployeeStatus::Free);
}

#[test]
fn test_add_employee_rejects_blank_names() {
    let mut db: Persistence = create_test_db();

    let result: Result<AddEmployeeResponse, ApiError> =
        handlers::add_employee(&mut db, &operator(), &add_request("  ", "Reis", "A", false));

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    assert!(db.list_employees().unwrap().is_empty());
}

#[test]
fn test_add_employee_rejects_unknown_shift_code() {
    let mut db: Persistence = create_test_db();

    let result: Result<AddEmployeeResponse, ApiError> =
        handlers::add_employee(&mut db, &operator(), &add_request("Ana", "Reis", "Q", false));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "shift"
    ));
}

#[test]
fn test_update_employee_same_pair_skips_the_gate() {
    let mut db: Persistence = create_test_db();
    db.set_required_staff("Assembly", ShiftCode::A, 1).unwrap();
    db.set_overflow_policy(OverflowPolicy::Block).unwrap();
    let employee_id: i64 = insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    // Shift A is already at its cap, but a rename within the same pair
    // adds nobody and must not be gated.
    let response: UpdateEmployeeResponse = handlers::update_employee(
        &mut db,
        &operator(),
        &UpdateEmployeeRequest {
            employee_id,
            first_name: String::from("Ana Maria"),
            last_name: String::from("Reis"),
            position: String::from("Assembler"),
            department: String::from("Assembly"),
            shift: String::from("A"),
            machine: String::new(),
            confirmed: false,
        },
    )
    .unwrap();

    assert_eq!(response.outcome, GateOutcome::Applied);
    let updated = db.get_employee(employee_id).unwrap().unwrap();
    assert_eq!(updated.first_name, "Ana Maria");
}

#[test]
fn test_update_employee_into_full_shift_is_gated() {
    let mut db: Persistence = create_test_db();
    db.set_required_staff("Assembly", ShiftCode::B, 1).unwrap();
    db.set_overflow_policy(OverflowPolicy::Block).unwrap();
    insert_working(&mut db, "Rui", "Costa", ShiftCode::B);
    let employee_id: i64 = insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    let response: UpdateEmployeeResponse = handlers::update_employee(
        &mut db,
        &operator(),
        &UpdateEmployeeRequest {
            employee_id,
            first_name: String::from("Ana"),
            last_name: String::from("Reis"),
            position: String::from("Assembler"),
            department: String::from("Assembly"),
            shift: String::from("B"),
            machine: String::new(),
            confirmed: false,
        },
    )
    .unwrap();

    assert_eq!(
        response.outcome,
        GateOutcome::Blocked {
            required: 1,
            prospective: 2
        }
    );
    let unchanged = db.get_employee(employee_id).unwrap().unwrap();
    assert_eq!(unchanged.shift, ShiftCode::A);
}

#[test]
fn test_move_employee_to_off_shift_derives_free_status() {
    let mut db: Persistence = create_test_db();
    let employee_id: i64 = insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    let response: MoveEmployeeResponse = handlers::move_employee(
        &mut db,
        &operator(),
        &MoveEmployeeRequest {
            employee_id,
            department: None,
            shift: Some(String::from("D")),
            position: None,
            confirmed: false,
        },
    )
    .unwrap();

    assert_eq!(response.outcome, GateOutcome::Applied);
    assert_eq!(response.status, "Free");
    let moved = db.get_employee(employee_id).unwrap().unwrap();
    assert_eq!(moved.shift, ShiftCode::D);
    assert_eq!(moved.status, EmployeeStatus::Free);

    let history = db.list_history(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, actions::MOVE_EMPLOYEE);
}

#[test]
fn test_move_employee_off_shift_back_to_working_shift_is_gated() {
    let mut db: Persistence = create_test_db();
    db.set_required_staff("Assembly", ShiftCode::A, 1).unwrap();
    db.set_overflow_policy(OverflowPolicy::Block).unwrap();
    insert_working(&mut db, "Rui", "Costa", ShiftCode::A);
    let employee_id: i64 = insert_working(&mut db, "Ana", "Reis", ShiftCode::D);
    db.set_employee_status(employee_id, EmployeeStatus::Free)
        .unwrap();

    let response: MoveEmployeeResponse = handlers::move_employee(
        &mut db,
        &operator(),
        &MoveEmployeeRequest {
            employee_id,
            department: None,
            shift: Some(String::from("A")),
            position: None,
            confirmed: false,
        },
    )
    .unwrap();

    assert_eq!(
        response.outcome,
        GateOutcome::Blocked {
            required: 1,
            prospective: 2
        }
    );
    let unchanged = db.get_employee(employee_id).unwrap().unwrap();
    assert_eq!(unchanged.shift, ShiftCode::D);
    assert_eq!(unchanged.status, EmployeeStatus::Free);
}

#[test]
fn test_move_missing_employee_is_not_found() {
    let mut db: Persistence = create_test_db();

    let result: Result<MoveEmployeeResponse, ApiError> = handlers::move_employee(
        &mut db,
        &operator(),
        &MoveEmployeeRequest {
            employee_id: 4242,
            department: None,
            shift: Some(String::from("B")),
            position: None,
            confirmed: false,
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Employee"
    ));
}

#[test]
fn test_delete_employee_keeps_history() {
    let mut db: Persistence = create_test_db();
    let employee_id: i64 = insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    handlers::delete_employee(&mut db, &operator(), employee_id).unwrap();

    assert!(db.get_employee(employee_id).unwrap().is_none());
    let history = db.list_history(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, actions::DELETE_EMPLOYEE);
    assert_eq!(history[0].employee_id, Some(employee_id));
}

#[test]
fn test_set_status_records_one_history_entry() {
    let mut db: Persistence = create_test_db();
    let employee_id: i64 = insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    handlers::set_status(
        &mut db,
        &operator(),
        &SetStatusRequest {
            employee_id,
            status: String::from("Free"),
        },
    )
    .unwrap();

    let employee = db.get_employee(employee_id).unwrap().unwrap();
    assert_eq!(employee.status, EmployeeStatus::Free);
    let history = db.list_history(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, actions::CHANGE_STATUS);
}

#[test]
fn test_set_status_rejects_unknown_status() {
    let mut db: Persistence = create_test_db();
    let employee_id: i64 = insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    let result: Result<(), ApiError> = handlers::set_status(
        &mut db,
        &operator(),
        &SetStatusRequest {
            employee_id,
            status: String::from("Resting"),
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "status"
    ));
}

#[test]
fn test_set_machine_updates_assignment() {
    let mut db: Persistence = create_test_db();
    let employee_id: i64 = insert_working(&mut db, "Ana", "Reis", ShiftCode::A);

    handlers::set_machine(
        &mut db,
        &operator(),
        &SetMachineRequest {
            employee_id,
            machine: String::from("  Press-02  "),
        },
    )
    .unwrap();

    let employee = db.get_employee(employee_id).unwrap().unwrap();
    assert_eq!(employee.machine, "Press-02");
    let history = db.list_history(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, actions::CHANGE_MACHINE);
}

#[test]
fn test_list_and_get_employee_round_trip() {
    let mut db: Persistence = create_test_db();
    let employee_id: i64 = insert_working(&mut db, "Ana", "Reis", ShiftCode::A);
    insert_working(&mut db, "Rui", "Costa", ShiftCode::B);

    let listed = handlers::list_employees(&mut db).unwrap();
    assert_eq!(listed.len(), 2);

    let fetched = handlers::get_employee(&mut db, employee_id).unwrap();
    assert_eq!(fetched.first_name, "Ana");
    assert_eq!(fetched.shift, "A");
    assert_eq!(fetched.status, "Working");
}

#[test]
fn test_roster_changes_allowed_for_admin_role_too() {
    let mut db: Persistence = create_test_db();

    let response: AddEmployeeResponse =
        handlers::add_employee(&mut db, &admin(), &add_request("Ana", "Reis", "A", false))
            .unwrap();

    assert_eq!(response.outcome, GateOutcome::Applied);
}
