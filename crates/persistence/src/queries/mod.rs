// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side database operations.
//!
//! All queries use Diesel DSL against the SQLite schema and convert rows
//! into domain types at the boundary.

pub mod absences;
pub mod employees;
pub mod history;
pub mod operators;
pub mod settings;
