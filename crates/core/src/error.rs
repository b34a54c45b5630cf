// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors surfaced by the collaborator stores.
///
/// The engine's read paths deliberately degrade these to "no data" (see
/// the crate docs); mutating paths either propagate them or capture them
/// per item in a [`crate::RebalanceReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A query against the backing store failed.
    QueryFailed(String),
    /// A mutation against the backing store failed.
    MutationFailed(String),
    /// The requested employee does not exist.
    EmployeeNotFound(i64),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueryFailed(msg) => write!(f, "Store query failed: {msg}"),
            Self::MutationFailed(msg) => write!(f, "Store mutation failed: {msg}"),
            Self::EmployeeNotFound(id) => write!(f, "Employee not found: {id}"),
        }
    }
}

impl std::error::Error for StoreError {}
