// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV roster import preview.
//!
//! Parses an uploaded roster CSV and validates every row without
//! touching the database. The caller decides what to do with the valid
//! rows; this module never mutates anything.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use workadm_domain::ShiftCode;

use crate::error::ApiError;

/// The headers a roster CSV must carry, in any order.
const REQUIRED_HEADERS: [&str; 6] = [
    "first_name",
    "last_name",
    "position",
    "department",
    "shift",
    "machine",
];

/// Validation status of one CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CsvRowStatus {
    /// The row parsed cleanly and can be imported.
    Valid,
    /// The row has at least one problem and must be fixed or skipped.
    Invalid,
}

/// One parsed CSV row with its validation outcome.
///
/// Fields stay `Some` even on invalid rows when they parsed, so the
/// preview can show the operator what was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRowResult {
    /// The 1-based row number in the file, excluding the header.
    pub row_number: usize,
    /// The parsed first name, if present.
    pub first_name: Option<String>,
    /// The parsed last name, if present.
    pub last_name: Option<String>,
    /// The parsed position, if present.
    pub position: Option<String>,
    /// The parsed department, if present.
    pub department: Option<String>,
    /// The parsed shift code, if it normalized.
    pub shift: Option<String>,
    /// The parsed machine assignment, if present.
    pub machine: Option<String>,
    /// Whether the row can be imported.
    pub status: CsvRowStatus,
    /// The problems found in this row.
    pub errors: Vec<String>,
}

/// The outcome of previewing an uploaded roster CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvPreviewResult {
    /// Every data row in file order.
    pub rows: Vec<CsvRowResult>,
    /// Total number of data rows.
    pub total_rows: usize,
    /// Number of rows that validated.
    pub valid_count: usize,
    /// Number of rows with problems.
    pub invalid_count: usize,
}

/// Normalizes a CSV header for matching: trimmed, lowercased, spaces to
/// underscores.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Validates that every required header is present and maps each to its
/// column index.
fn validate_headers(headers: &csv::StringRecord) -> Result<HashMap<String, usize>, ApiError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();
    for (index, header) in headers.iter().enumerate() {
        header_map.insert(normalize_header(header), index);
    }

    let missing: Vec<&str> = REQUIRED_HEADERS
        .into_iter()
        .filter(|required| !header_map.contains_key(*required))
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::InvalidCsvFormat {
            reason: format!("Missing required column(s): {}", missing.join(", ")),
        });
    }

    Ok(header_map)
}

/// Previews a roster CSV without importing it.
///
/// The file must carry the columns `first_name`, `last_name`,
/// `position`, `department`, `shift`, and `machine` (any order, any
/// case). Each data row is validated independently: names and the
/// department must be non-empty, and the shift must normalize to a
/// configured code. Position and machine may be empty.
///
/// # Errors
///
/// Returns `InvalidCsvFormat` when the file cannot be parsed at all or a
/// required column is missing. Bad rows are not errors; they come back
/// marked `Invalid`.
pub fn preview_csv_roster(csv_content: &str) -> Result<CsvPreviewResult, ApiError> {
    let mut reader: csv::Reader<&[u8]> = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_content.as_bytes());

    let headers: csv::StringRecord =
        reader
            .headers()
            .map_err(|e| ApiError::InvalidCsvFormat {
                reason: format!("Failed to read CSV headers: {e}"),
            })?
            .clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let mut rows: Vec<CsvRowResult> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row_number: usize = index + 1;
        let record: csv::StringRecord = match record {
            Ok(record) => record,
            Err(e) => {
                rows.push(CsvRowResult {
                    row_number,
                    first_name: None,
                    last_name: None,
                    position: None,
                    department: None,
                    shift: None,
                    machine: None,
                    status: CsvRowStatus::Invalid,
                    errors: vec![format!("Row could not be parsed: {e}")],
                });
                continue;
            }
        };

        rows.push(validate_row(row_number, &record, &header_map));
    }

    let total_rows: usize = rows.len();
    let valid_count: usize = rows
        .iter()
        .filter(|row| row.status == CsvRowStatus::Valid)
        .count();

    Ok(CsvPreviewResult {
        rows,
        total_rows,
        valid_count,
        invalid_count: total_rows - valid_count,
    })
}

fn validate_row(
    row_number: usize,
    record: &csv::StringRecord,
    header_map: &HashMap<String, usize>,
) -> CsvRowResult {
    let mut errors: Vec<String> = Vec::new();

    let get_field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&index| record.get(index))
            .map(|value| value.trim().to_string())
    };

    let mut required_field = |name: &str| -> Option<String> {
        match get_field(name) {
            Some(value) if !value.is_empty() => Some(value),
            _ => {
                errors.push(format!("Missing required field: {name}"));
                None
            }
        }
    };

    let first_name: Option<String> = required_field("first_name");
    let last_name: Option<String> = required_field("last_name");
    let department: Option<String> = required_field("department");

    let position: Option<String> = get_field("position");
    let machine: Option<String> = get_field("machine");

    let shift: Option<String> = match get_field("shift") {
        Some(raw) if !raw.is_empty() => match ShiftCode::normalize(&raw) {
            Ok(code) => Some(code.as_str().to_string()),
            Err(_) => {
                errors.push(format!("Invalid shift code: '{raw}'"));
                None
            }
        },
        _ => {
            errors.push(String::from("Missing required field: shift"));
            None
        }
    };

    let status: CsvRowStatus = if errors.is_empty() {
        CsvRowStatus::Valid
    } else {
        CsvRowStatus::Invalid
    };

    CsvRowResult {
        row_number,
        first_name,
        last_name,
        position,
        department,
        shift,
        machine,
        status,
        errors,
    }
}
