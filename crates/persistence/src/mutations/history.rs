// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! History mutations. Entries are only ever appended.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::diesel_schema::history;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use workadm_audit::HistoryEntry;

/// Appends one history entry and returns its id.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn append_history(
    conn: &mut SqliteConnection,
    entry: &HistoryEntry,
) -> Result<i64, PersistenceError> {
    let timestamp: String = entry
        .timestamp
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let operator_json: String = serde_json::to_string(&entry.operator)?;

    debug!(
        "Appending history entry: action={}, employee_id={:?}",
        entry.action, entry.employee_id
    );

    diesel::insert_into(history::table)
        .values((
            history::timestamp.eq(&timestamp),
            history::operator.eq(&operator_json),
            history::action.eq(&entry.action),
            history::details.eq(&entry.details),
            history::employee_id.eq(entry.employee_id),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
