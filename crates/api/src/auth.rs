// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use workadm_audit::Operator;
use workadm_persistence::{OperatorData, Persistence, SessionData};

use crate::error::AuthError;

/// Operator roles for authorization.
///
/// Roles determine what actions an authenticated operator may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: operators with structural authority.
    ///
    /// Admins may additionally:
    /// - manage departments, positions, machines, and shift/status
    ///   definitions
    /// - set required staff targets and the overflow policy
    /// - manage operator accounts
    Admin,
    /// Operator role: day-to-day roster work.
    ///
    /// Operators may add, edit, move, and delete employees, change
    /// statuses and machines, and record absences.
    Operator,
}

impl Role {
    /// Parses a stored role string.
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "Admin" => Some(Self::Admin),
            "Operator" => Some(Self::Operator),
            _ => None,
        }
    }

    /// Returns the stored string form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Operator => "Operator",
        }
    }
}

/// An authenticated operator with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedOperator {
    /// The normalized (uppercase) username.
    pub username: String,
    /// The display name shown in history entries.
    pub display_name: String,
    /// The role assigned to this operator.
    pub role: Role,
}

impl AuthenticatedOperator {
    /// Creates a new authenticated operator.
    ///
    /// # Arguments
    ///
    /// * `username` - The normalized username
    /// * `display_name` - The display name
    /// * `role` - The role assigned to this operator
    #[must_use]
    pub const fn new(username: String, display_name: String, role: Role) -> Self {
        Self {
            username,
            display_name,
            role,
        }
    }

    /// Converts this authenticated operator into an audit `Operator`.
    ///
    /// Used when recording history entries to attribute actions to the
    /// operator who performed them.
    #[must_use]
    pub fn to_audit_operator(&self) -> Operator {
        Operator::new(self.username.clone(), self.display_name.clone())
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an operator is authorized to change configuration:
    /// departments, positions, machines, shift and status definitions,
    /// and the overflow policy.
    ///
    /// Only Admin operators may change configuration.
    ///
    /// # Arguments
    ///
    /// * `operator` - The authenticated operator
    ///
    /// # Errors
    ///
    /// Returns an error if the operator does not have the Admin role.
    pub fn authorize_manage_settings(operator: &AuthenticatedOperator) -> Result<(), AuthError> {
        match operator.role {
            Role::Admin => Ok(()),
            Role::Operator => Err(AuthError::Unauthorized {
                action: String::from("manage_settings"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an operator is authorized to set required staff targets.
    ///
    /// Only Admin operators may set staffing requirements.
    ///
    /// # Arguments
    ///
    /// * `operator` - The authenticated operator
    ///
    /// # Errors
    ///
    /// Returns an error if the operator does not have the Admin role.
    pub fn authorize_set_required_staff(operator: &AuthenticatedOperator) -> Result<(), AuthError> {
        match operator.role {
            Role::Admin => Ok(()),
            Role::Operator => Err(AuthError::Unauthorized {
                action: String::from("set_required_staff"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an operator is authorized to manage operator accounts.
    ///
    /// Only Admin operators may create, disable, enable, or reset other
    /// operators.
    ///
    /// # Arguments
    ///
    /// * `operator` - The authenticated operator
    ///
    /// # Errors
    ///
    /// Returns an error if the operator does not have the Admin role.
    pub fn authorize_manage_operators(operator: &AuthenticatedOperator) -> Result<(), AuthError> {
        match operator.role {
            Role::Admin => Ok(()),
            Role::Operator => Err(AuthError::Unauthorized {
                action: String::from("manage_operators"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an operator is authorized to change the roster.
    ///
    /// Both roles may perform roster work; this exists so every handler
    /// makes its authorization explicit.
    ///
    /// # Errors
    ///
    /// Never fails in the current role model.
    pub const fn authorize_roster_change(
        _operator: &AuthenticatedOperator,
    ) -> Result<(), AuthError> {
        // Both Admin and Operator may change the roster
        Ok(())
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration.
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::hours(12);

    /// Authenticates an operator by password and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `username` - The operator username (case-insensitive)
    /// * `password` - The plain-text password to verify
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_operator`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the operator is unknown or disabled, the
    /// password does not match, or the session cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedOperator, OperatorData), AuthError> {
        let operator: OperatorData = persistence
            .get_operator_by_username(username)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Unknown username or wrong password"),
            })?;

        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let password_ok: bool = persistence
            .verify_password(password, &operator.password_hash)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Password verification error: {e}"),
            })?;
        if !password_ok {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Unknown username or wrong password"),
            });
        }

        let role: Role =
            Role::parse(&operator.role).ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {}", operator.role),
            })?;

        let session_token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String =
            expires_at
                .format(&Rfc3339)
                .map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Failed to format expiration time: {e}"),
                })?;

        persistence
            .create_session(&session_token, operator.operator_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(operator.operator_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        let authenticated: AuthenticatedOperator = AuthenticatedOperator::new(
            operator.username.clone(),
            operator.display_name.clone(),
            role,
        );

        Ok((session_token, authenticated, operator))
    }

    /// Validates a session token and returns the authenticated operator.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_operator`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or the
    /// operator no longer exists or is disabled.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedOperator, OperatorData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Rfc3339)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let operator: OperatorData = persistence
            .get_operator_by_id(session.operator_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Operator not found"),
            })?;

        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let role: Role =
            Role::parse(&operator.role).ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {}", operator.role),
            })?;

        let authenticated: AuthenticatedOperator = AuthenticatedOperator::new(
            operator.username.clone(),
            operator.display_name.clone(),
            role,
        );

        Ok((authenticated, operator))
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;
        Ok(())
    }

    /// Generates a session token from random material.
    fn generate_session_token() -> String {
        let high: u64 = rand::random();
        let low: u64 = rand::random();
        format!("session_{high:016x}{low:016x}")
    }
}
