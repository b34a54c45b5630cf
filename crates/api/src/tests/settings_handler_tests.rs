// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use workadm_audit::actions;
use workadm_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    ChangePasswordRequest, CreateOperatorRequest, CreateOperatorResponse, ResetPasswordRequest,
    ShiftDefinitionInfo,
};
use crate::tests::helpers::{admin, create_test_db, operator};

fn create_operator_request(username: &str, role: &str) -> CreateOperatorRequest {
    CreateOperatorRequest {
        username: username.to_string(),
        display_name: String::from("Marta Silva"),
        password: String::from("Roster!2026ab"),
        confirmation: String::from("Roster!2026ab"),
        role: role.to_string(),
    }
}

#[test]
fn test_settings_changes_require_admin_role() {
    let mut db: Persistence = create_test_db();

    let add = handlers::add_setting_value(&mut db, &operator(), "departments", "Packing");
    assert!(matches!(add, Err(ApiError::Unauthorized { .. })));

    let required = handlers::set_required_staff(&mut db, &operator(), "Assembly", "A", 2);
    assert!(matches!(required, Err(ApiError::Unauthorized { .. })));

    let policy = handlers::set_overflow_policy(&mut db, &operator(), "block");
    assert!(matches!(policy, Err(ApiError::Unauthorized { .. })));

    let account = handlers::create_operator(
        &mut db,
        &operator(),
        &create_operator_request("msilva", "Operator"),
    );
    assert!(matches!(account, Err(ApiError::Unauthorized { .. })));

    assert!(db.list_history(10).unwrap().is_empty());
}

#[test]
fn test_add_and_remove_setting_value() {
    let mut db: Persistence = create_test_db();

    handlers::add_setting_value(&mut db, &admin(), "departments", " Packing ").unwrap();
    handlers::add_setting_value(&mut db, &admin(), "departments", "Quality").unwrap();

    let values = handlers::list_setting_values(&mut db, "departments").unwrap();
    assert_eq!(values, vec!["Packing", "Quality"]);

    handlers::remove_setting_value(&mut db, &admin(), "departments", "Packing").unwrap();
    let values = handlers::list_setting_values(&mut db, "departments").unwrap();
    assert_eq!(values, vec!["Quality"]);

    let history = db.list_history(10).unwrap();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|entry| entry.action == actions::SETTINGS));
}

#[test]
fn test_add_duplicate_setting_value_is_rejected() {
    let mut db: Persistence = create_test_db();
    handlers::add_setting_value(&mut db, &admin(), "machines", "Press-01").unwrap();

    let result = handlers::add_setting_value(&mut db, &admin(), "machines", "Press-01");

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_remove_missing_setting_value_is_not_found() {
    let mut db: Persistence = create_test_db();

    let result = handlers::remove_setting_value(&mut db, &admin(), "positions", "Welder");

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_unknown_setting_list_is_rejected() {
    let mut db: Persistence = create_test_db();

    let result = handlers::list_setting_values(&mut db, "colors");

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "list"
    ));
}

#[test]
fn test_overflow_policy_round_trip() {
    let mut db: Persistence = create_test_db();
    assert_eq!(handlers::get_overflow_policy(&mut db).unwrap(), "warning");

    handlers::set_overflow_policy(&mut db, &admin(), "block").unwrap();

    assert_eq!(handlers::get_overflow_policy(&mut db).unwrap(), "block");
    let history = db.list_history(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, actions::SETTINGS);
}

#[test]
fn test_set_overflow_policy_rejects_unknown_value() {
    let mut db: Persistence = create_test_db();

    let result = handlers::set_overflow_policy(&mut db, &admin(), "panic");

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "overflow_policy"
    ));
}

#[test]
fn test_save_shift_definition_replaces_times() {
    let mut db: Persistence = create_test_db();

    handlers::save_shift_definition(
        &mut db,
        &admin(),
        &ShiftDefinitionInfo {
            code: String::from("A"),
            start: String::from("07:30"),
            end: String::from("15:30"),
            color: String::from("yellow"),
            is_off_shift: false,
        },
    )
    .unwrap();

    let definitions = handlers::list_shift_definitions(&mut db).unwrap();
    let shift_a = definitions
        .iter()
        .find(|definition| definition.code == "A")
        .unwrap();
    assert_eq!(shift_a.start, "07:30");
    assert_eq!(shift_a.end, "15:30");
    assert!(!shift_a.is_off_shift);

    let shift_d = definitions
        .iter()
        .find(|definition| definition.code == "D")
        .unwrap();
    assert!(shift_d.is_off_shift);
}

#[test]
fn test_save_shift_definition_rejects_bad_time() {
    let mut db: Persistence = create_test_db();

    let result = handlers::save_shift_definition(
        &mut db,
        &admin(),
        &ShiftDefinitionInfo {
            code: String::from("A"),
            start: String::from("7h30"),
            end: String::from("15:30"),
            color: String::from("yellow"),
            is_off_shift: false,
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "time"
    ));
}

#[test]
fn test_required_staff_round_trip() {
    let mut db: Persistence = create_test_db();

    handlers::set_required_staff(&mut db, &admin(), "Assembly", "A", 3).unwrap();
    handlers::set_required_staff(&mut db, &admin(), "Assembly", "B", 2).unwrap();

    let targets = handlers::list_required_staff(&mut db).unwrap();
    assert_eq!(targets.len(), 2);
    assert!(
        targets
            .iter()
            .any(|target| target.shift == "A" && target.required_count == 3)
    );
}

#[test]
fn test_create_operator_enforces_password_policy() {
    let mut db: Persistence = create_test_db();

    let mut request: CreateOperatorRequest = create_operator_request("msilva", "Operator");
    request.password = String::from("short");
    request.confirmation = String::from("short");

    let result = handlers::create_operator(&mut db, &admin(), &request);

    assert!(matches!(result, Err(ApiError::PasswordPolicyViolation { .. })));
    assert_eq!(db.count_operators().unwrap(), 0);
}

#[test]
fn test_create_operator_rejects_duplicate_username() {
    let mut db: Persistence = create_test_db();
    handlers::create_operator(&mut db, &admin(), &create_operator_request("msilva", "Operator"))
        .unwrap();

    let result = handlers::create_operator(
        &mut db,
        &admin(),
        &create_operator_request("MSILVA", "Operator"),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "username"
    ));
}

#[test]
fn test_create_operator_rejects_unknown_role() {
    let mut db: Persistence = create_test_db();

    let result = handlers::create_operator(
        &mut db,
        &admin(),
        &create_operator_request("msilva", "Supervisor"),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "role"
    ));
}

#[test]
fn test_create_and_list_operators() {
    let mut db: Persistence = create_test_db();

    let response: CreateOperatorResponse = handlers::create_operator(
        &mut db,
        &admin(),
        &create_operator_request("msilva", "Operator"),
    )
    .unwrap();
    assert_eq!(response.username, "MSILVA");

    let operators = handlers::list_operators(&mut db, &admin()).unwrap();
    assert_eq!(operators.len(), 1);
    assert_eq!(operators[0].username, "MSILVA");
    assert!(!operators[0].is_disabled);

    let denied = handlers::list_operators(&mut db, &operator());
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_disable_and_enable_operator() {
    let mut db: Persistence = create_test_db();
    let response: CreateOperatorResponse = handlers::create_operator(
        &mut db,
        &admin(),
        &create_operator_request("msilva", "Operator"),
    )
    .unwrap();

    handlers::disable_operator(&mut db, &admin(), response.operator_id).unwrap();
    let operators = handlers::list_operators(&mut db, &admin()).unwrap();
    assert!(operators[0].is_disabled);

    handlers::enable_operator(&mut db, &admin(), response.operator_id).unwrap();
    let operators = handlers::list_operators(&mut db, &admin()).unwrap();
    assert!(!operators[0].is_disabled);
}

#[test]
fn test_disable_missing_operator_is_not_found() {
    let mut db: Persistence = create_test_db();

    let result = handlers::disable_operator(&mut db, &admin(), 4242);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_change_password_requires_current_password() {
    let mut db: Persistence = create_test_db();
    db.create_operator("msilva", "Marta Silva", "Roster!2026ab", "Operator")
        .unwrap();
    let acting = crate::auth::AuthenticatedOperator::new(
        String::from("MSILVA"),
        String::from("Marta Silva"),
        crate::auth::Role::Operator,
    );

    let wrong = handlers::change_password(
        &mut db,
        &acting,
        &ChangePasswordRequest {
            current_password: String::from("NotTheOne!26"),
            new_password: String::from("Fresh!2026cd"),
            confirmation: String::from("Fresh!2026cd"),
        },
    );
    assert!(matches!(wrong, Err(ApiError::AuthenticationFailed { .. })));

    handlers::change_password(
        &mut db,
        &acting,
        &ChangePasswordRequest {
            current_password: String::from("Roster!2026ab"),
            new_password: String::from("Fresh!2026cd"),
            confirmation: String::from("Fresh!2026cd"),
        },
    )
    .unwrap();

    let data = db.get_operator_by_username("msilva").unwrap().unwrap();
    assert!(db.verify_password("Fresh!2026cd", &data.password_hash).unwrap());
    assert!(!db.verify_password("Roster!2026ab", &data.password_hash).unwrap());
}

#[test]
fn test_reset_password_is_admin_only_and_audited() {
    let mut db: Persistence = create_test_db();
    let operator_id: i64 = db
        .create_operator("msilva", "Marta Silva", "Roster!2026ab", "Operator")
        .unwrap();
    let request: ResetPasswordRequest = ResetPasswordRequest {
        operator_id,
        new_password: String::from("Fresh!2026cd"),
        confirmation: String::from("Fresh!2026cd"),
    };

    let denied = handlers::reset_password(&mut db, &operator(), &request);
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    handlers::reset_password(&mut db, &admin(), &request).unwrap();

    let data = db.get_operator_by_username("msilva").unwrap().unwrap();
    assert!(db.verify_password("Fresh!2026cd", &data.password_hash).unwrap());
    let history = db.list_history(10).unwrap();
    assert_eq!(history[0].action, actions::SETTINGS);
}
