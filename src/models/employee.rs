//! Directory and attendance value types. Both are read-only views from the
//! scheduler's perspective: the directory and attendance tables are written
//! by their own CLI commands, which stand in for the external systems.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeRef {
    pub id: i64,
    pub employee_id: String,
    pub name: String,
    pub department: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AttendanceStatus {
    CheckedIn,
    OnLeave,
    Unknown,
}

impl AttendanceStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::CheckedIn => "checked_in",
            AttendanceStatus::OnLeave => "on_leave",
            AttendanceStatus::Unknown => "unknown",
        }
    }

    /// Anything unrecognized maps to Unknown rather than failing.
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "checked_in" => AttendanceStatus::CheckedIn,
            "on_leave" => AttendanceStatus::OnLeave,
            _ => AttendanceStatus::Unknown,
        }
    }

    pub fn is_on_leave(&self) -> bool {
        matches!(self, AttendanceStatus::OnLeave)
    }

    pub fn is_checked_in(&self) -> bool {
        matches!(self, AttendanceStatus::CheckedIn)
    }
}
