// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side database operations.

pub mod absences;
pub mod employees;
pub mod history;
pub mod operators;
pub mod settings;
