// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::engine::StaffingEngine;
use crate::tests::helpers::MemoryStore;
use workadm_domain::{EmployeeStatus, ShiftCode, StaffingInfo};

#[test]
fn test_staffing_info_counts_only_working() {
    let mut store: MemoryStore = MemoryStore::new();
    store.set_required("Assembly", ShiftCode::A, 3);
    store.add_working("Assembly", ShiftCode::A);
    store.add_working("Assembly", ShiftCode::A);
    store.add_with_status("Assembly", ShiftCode::A, EmployeeStatus::OnVacation);
    store.add_with_status("Assembly", ShiftCode::A, EmployeeStatus::OnSickLeave);
    store.add_with_status("Assembly", ShiftCode::A, EmployeeStatus::Free);

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
    let info: StaffingInfo = engine.staffing_info("Assembly", ShiftCode::A);

    assert_eq!(info.required, 3);
    assert_eq!(info.current, 2);
    assert_eq!(info.free_slots, Some(1));
    assert!(!info.overflow);
    assert_eq!(info.excess, 0);
}

#[test]
fn test_staffing_info_unconstrained_when_no_requirement() {
    let mut store: MemoryStore = MemoryStore::new();
    for _ in 0..10 {
        store.add_working("Assembly", ShiftCode::A);
    }

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
    let info: StaffingInfo = engine.staffing_info("Assembly", ShiftCode::A);

    assert_eq!(info.required, 0);
    assert_eq!(info.current, 10);
    assert_eq!(info.free_slots, None);
    assert!(!info.overflow);
    assert_eq!(info.excess, 0);
}

#[test]
fn test_staffing_info_overflow_exactly_at_requirement() {
    let mut store: MemoryStore = MemoryStore::new();
    store.set_required("Assembly", ShiftCode::A, 3);
    for _ in 0..3 {
        store.add_working("Assembly", ShiftCode::A);
    }

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
    let info: StaffingInfo = engine.staffing_info("Assembly", ShiftCode::A);

    assert_eq!(info.current, 3);
    assert_eq!(info.free_slots, Some(0));
    assert!(info.overflow);
    assert_eq!(info.excess, 0);
}

#[test]
fn test_staffing_info_excess_above_requirement() {
    let mut store: MemoryStore = MemoryStore::new();
    store.set_required("Assembly", ShiftCode::B, 2);
    for _ in 0..5 {
        store.add_working("Assembly", ShiftCode::B);
    }

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
    let info: StaffingInfo = engine.staffing_info("Assembly", ShiftCode::B);

    assert_eq!(info.free_slots, Some(0));
    assert!(info.overflow);
    assert_eq!(info.excess, 3);
}

#[test]
fn test_staffing_info_is_recomputed_after_status_change() {
    let mut store: MemoryStore = MemoryStore::new();
    store.set_required("Assembly", ShiftCode::A, 2);
    let first: i64 = store.add_working("Assembly", ShiftCode::A);
    store.add_working("Assembly", ShiftCode::A);

    let before: StaffingInfo = {
        let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
        engine.staffing_info("Assembly", ShiftCode::A)
    };
    assert_eq!(before.current, 2);
    assert!(before.overflow);

    store
        .employees
        .iter_mut()
        .find(|employee| employee.employee_id == Some(first))
        .expect("employee exists")
        .status = workadm_domain::EmployeeStatus::OnVacation;

    let after: StaffingInfo = {
        let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
        engine.staffing_info("Assembly", ShiftCode::A)
    };
    assert_eq!(after.current, 1);
    assert!(!after.overflow);
}

#[test]
fn test_check_overflow_uses_prospective_count() {
    let mut store: MemoryStore = MemoryStore::new();
    store.set_required("Assembly", ShiftCode::A, 3);
    store.add_working("Assembly", ShiftCode::A);
    store.add_working("Assembly", ShiftCode::A);

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
    // Two working now; a third would reach the cap.
    let check = engine.check_overflow("Assembly", ShiftCode::A, 3);

    assert!(check.overflow);
    assert_eq!(check.required, 3);
    assert_eq!(check.current, 3);
    assert_eq!(check.excess, 0);
}

#[test]
fn test_check_overflow_unconstrained_never_overflows() {
    let mut store: MemoryStore = MemoryStore::new();

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
    let check = engine.check_overflow("Assembly", ShiftCode::C, 100);

    assert!(!check.overflow);
    assert_eq!(check.excess, 0);
}
