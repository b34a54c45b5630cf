// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Configuration mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::{required_staff, settings, shifts, statuses};
use crate::error::PersistenceError;
use crate::queries::settings::OVERFLOW_POLICY_KEY;
use workadm_domain::{OverflowPolicy, ShiftCode, ShiftDefinition, StatusDefinition};

/// Stores a raw setting value, replacing any previous value.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn set_setting(
    conn: &mut SqliteConnection,
    key: &str,
    value: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(settings::table)
        .values((settings::key.eq(key), settings::value.eq(value)))
        .on_conflict(settings::key)
        .do_update()
        .set(settings::value.eq(value))
        .execute(conn)?;
    Ok(())
}

/// Stores a list setting as a comma-joined value.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn set_list_setting(
    conn: &mut SqliteConnection,
    key: &str,
    values: &[String],
) -> Result<(), PersistenceError> {
    set_setting(conn, key, &values.join(","))
}

/// Stores the overflow policy.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn set_overflow_policy(
    conn: &mut SqliteConnection,
    policy: OverflowPolicy,
) -> Result<(), PersistenceError> {
    info!("Setting overflow policy to: {}", policy);
    set_setting(conn, OVERFLOW_POLICY_KEY, policy.as_str())
}

/// Inserts or replaces a shift definition.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert_shift_definition(
    conn: &mut SqliteConnection,
    definition: &ShiftDefinition,
) -> Result<(), PersistenceError> {
    let start: String = format!(
        "{:02}:{:02}",
        definition.start.hour(),
        definition.start.minute()
    );
    let end: String = format!("{:02}:{:02}", definition.end.hour(), definition.end.minute());

    info!("Saving shift definition: {}", definition.display_name());

    diesel::insert_into(shifts::table)
        .values((
            shifts::shift_code.eq(definition.code.as_str()),
            shifts::start_time.eq(&start),
            shifts::end_time.eq(&end),
            shifts::color.eq(&definition.color),
        ))
        .on_conflict(shifts::shift_code)
        .do_update()
        .set((
            shifts::start_time.eq(&start),
            shifts::end_time.eq(&end),
            shifts::color.eq(&definition.color),
        ))
        .execute(conn)?;
    Ok(())
}

/// Inserts or replaces a status definition.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert_status_definition(
    conn: &mut SqliteConnection,
    definition: &StatusDefinition,
) -> Result<(), PersistenceError> {
    diesel::insert_into(statuses::table)
        .values((
            statuses::status_name.eq(definition.status.as_str()),
            statuses::color.eq(&definition.color),
        ))
        .on_conflict(statuses::status_name)
        .do_update()
        .set(statuses::color.eq(&definition.color))
        .execute(conn)?;
    Ok(())
}

/// Inserts or replaces a required-staff target for a (department, shift)
/// pair. A count of 0 removes the constraint but keeps the row.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn set_required_staff(
    conn: &mut SqliteConnection,
    department: &str,
    shift: ShiftCode,
    count: u32,
) -> Result<(), PersistenceError> {
    let count: i32 = i32::try_from(count).unwrap_or(i32::MAX);

    info!(
        "Setting required staff for ({}, {}) to {}",
        department, shift, count
    );

    diesel::insert_into(required_staff::table)
        .values((
            required_staff::department.eq(department),
            required_staff::shift.eq(shift.as_str()),
            required_staff::required_count.eq(count),
        ))
        .on_conflict((required_staff::department, required_staff::shift))
        .do_update()
        .set(required_staff::required_count.eq(count))
        .execute(conn)?;
    Ok(())
}
