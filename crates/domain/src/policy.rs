// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The configured behavior when a staffing check finds the headcount
/// would reach or exceed the requirement.
///
/// The policy is a single process-wide setting persisted under the
/// `overflow_policy` key. It is read fresh before every risky mutation so
/// an administrator change takes effect on the next staffing-affecting
/// action without a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OverflowPolicy {
    /// Ask the operator to confirm; proceed only on a yes.
    #[default]
    Warning,
    /// Make room first by relocating excess employees to shifts with free
    /// slots, then proceed.
    AutoAdjust,
    /// Refuse the change outright.
    Block,
}

impl FromStr for OverflowPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Self::Warning),
            "auto_adjust" => Ok(Self::AutoAdjust),
            "block" => Ok(Self::Block),
            _ => Err(DomainError::InvalidPolicy(s.to_string())),
        }
    }
}

impl std::fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl OverflowPolicy {
    /// Converts this policy to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::AutoAdjust => "auto_adjust",
            Self::Block => "block",
        }
    }
}
