// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::engine::StaffingEngine;
use crate::tests::helpers::MemoryStore;
use workadm_domain::{OverflowAlert, ShiftCode, ShortageAlert, StaffingInfo};

#[test]
fn test_overflow_alerts_use_strict_threshold() {
    let mut store: MemoryStore = MemoryStore::new();
    store.set_required("Assembly", ShiftCode::A, 3);
    for _ in 0..3 {
        store.add_working("Assembly", ShiftCode::A);
    }

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);

    // Exactly at the cap: the gate view reports overflow, the sweep does
    // not. The two thresholds disagree here on purpose.
    let info: StaffingInfo = engine.staffing_info("Assembly", ShiftCode::A);
    assert!(info.overflow);
    assert!(engine.overflow_alerts().is_empty());
}

#[test]
fn test_overflow_alerts_report_broken_caps() {
    let mut store: MemoryStore = MemoryStore::new();
    store.set_required("Assembly", ShiftCode::A, 2);
    for _ in 0..4 {
        store.add_working("Assembly", ShiftCode::A);
    }

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
    let alerts: Vec<OverflowAlert> = engine.overflow_alerts();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].department, "Assembly");
    assert_eq!(alerts[0].shift, ShiftCode::A);
    assert_eq!(alerts[0].required, 2);
    assert_eq!(alerts[0].current, 4);
    assert_eq!(alerts[0].excess, 2);
}

#[test]
fn test_overflow_alerts_skip_unconstrained_pairs() {
    let mut store: MemoryStore = MemoryStore::new();
    for _ in 0..8 {
        store.add_working("Assembly", ShiftCode::B);
    }

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
    assert!(engine.overflow_alerts().is_empty());
}

#[test]
fn test_off_shift_never_alerts_even_when_configured() {
    let mut store: MemoryStore = MemoryStore::new();
    // A requirement on the off shift is a configuration mistake; the
    // sweeps ignore the pair entirely.
    store.set_required("Assembly", ShiftCode::D, 1);
    for _ in 0..5 {
        store.add_working("Assembly", ShiftCode::D);
    }

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
    assert!(engine.overflow_alerts().is_empty());
    assert!(engine.shortage_alerts().is_empty());
}

#[test]
fn test_shortage_alerts_report_missing_headcount() {
    let mut store: MemoryStore = MemoryStore::new();
    store.set_required("Assembly", ShiftCode::A, 4);
    store.set_required("Assembly", ShiftCode::B, 1);
    store.add_working("Assembly", ShiftCode::A);
    store.add_working("Assembly", ShiftCode::B);

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);
    let alerts: Vec<ShortageAlert> = engine.shortage_alerts();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].shift, ShiftCode::A);
    assert_eq!(alerts[0].required, 4);
    assert_eq!(alerts[0].current, 1);
    assert_eq!(alerts[0].missing, 3);
}

#[test]
fn test_alert_sweeps_cover_every_department() {
    let mut store: MemoryStore = MemoryStore::new();
    store.departments.push(String::from("Packing"));
    store.set_required("Assembly", ShiftCode::A, 1);
    store.set_required("Packing", ShiftCode::A, 1);
    store.add_working("Assembly", ShiftCode::A);
    store.add_working("Assembly", ShiftCode::A);

    let mut engine: StaffingEngine<'_, MemoryStore> = StaffingEngine::new(&mut store);

    let overflow: Vec<OverflowAlert> = engine.overflow_alerts();
    assert_eq!(overflow.len(), 1);
    assert_eq!(overflow[0].department, "Assembly");

    let shortage: Vec<ShortageAlert> = engine.shortage_alerts();
    assert_eq!(shortage.len(), 1);
    assert_eq!(shortage[0].department, "Packing");
}
