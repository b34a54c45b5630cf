// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! History queries.
//!
//! The operator column stores the attributed [`Operator`] as JSON, so the
//! viewer gets both the login and display name back without a join.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::history;
use crate::error::PersistenceError;
use workadm_audit::{HistoryEntry, Operator};

#[derive(Queryable, Selectable)]
#[diesel(table_name = history)]
struct HistoryRow {
    #[allow(dead_code)]
    entry_id: i64,
    timestamp: String,
    operator: String,
    action: String,
    details: String,
    employee_id: Option<i64>,
}

impl HistoryRow {
    fn into_domain(self) -> Result<HistoryEntry, PersistenceError> {
        let timestamp: OffsetDateTime = OffsetDateTime::parse(&self.timestamp, &Rfc3339)
            .map_err(|e| PersistenceError::CorruptValue(e.to_string()))?;
        let operator: Operator = serde_json::from_str(&self.operator)?;
        Ok(HistoryEntry::with_timestamp(
            timestamp,
            operator,
            self.action,
            self.details,
            self.employee_id,
        ))
    }
}

/// Lists history entries, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `limit` - Maximum number of entries to return
///
/// # Errors
///
/// Returns an error if the query fails or a stored entry no longer
/// deserializes.
pub fn list_history(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    let rows: Vec<HistoryRow> = history::table
        .order(history::entry_id.desc())
        .limit(limit)
        .select(HistoryRow::as_select())
        .load(conn)?;

    rows.into_iter().map(HistoryRow::into_domain).collect()
}

/// Lists history entries for one employee, newest first.
///
/// Entries survive the employee's deletion; the viewer can still show the
/// trail afterwards.
///
/// # Errors
///
/// Returns an error if the query fails or a stored entry no longer
/// deserializes.
pub fn history_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    limit: i64,
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    let rows: Vec<HistoryRow> = history::table
        .filter(history::employee_id.eq(employee_id))
        .order(history::entry_id.desc())
        .limit(limit)
        .select(HistoryRow::as_select())
        .load(conn)?;

    rows.into_iter().map(HistoryRow::into_domain).collect()
}
