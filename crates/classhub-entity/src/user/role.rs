//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a ClassHub account can hold.
///
/// The authentication subsystem only carries the role label; policy
/// decisions based on it belong to the calling application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A learner enrolled in courses.
    Student,
    /// A course instructor.
    Teacher,
    /// A guardian linked to one or more students.
    Parent,
    /// Full system administrator.
    Admin,
}

impl UserRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Parent => "parent",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = classhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "parent" => Ok(Self::Parent),
            "admin" => Ok(Self::Admin),
            _ => Err(classhub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: student, teacher, parent, admin"
            ))),
        }
    }
}
