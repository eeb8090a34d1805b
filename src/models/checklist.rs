//! Checklist definition model: a recurring task template with a schedule
//! rule and ordered owner/backup employee lists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrenceType {
    Daily,
    Weekly,
    Monthly,
    Once,
}

impl RecurrenceType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RecurrenceType::Daily => "daily",
            RecurrenceType::Weekly => "weekly",
            RecurrenceType::Monthly => "monthly",
            RecurrenceType::Once => "once",
        }
    }

    /// Convert DB string → enum. Unknown strings yield None and are
    /// rejected by validation before anything is persisted.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(RecurrenceType::Daily),
            "weekly" => Some(RecurrenceType::Weekly),
            "monthly" => Some(RecurrenceType::Monthly),
            "once" => Some(RecurrenceType::Once),
            _ => None,
        }
    }
}

/// Schedule rule of a checklist.
///
/// `day_of_week` uses 0=Sunday..6=Saturday. `day_of_month` is 1..31 with no
/// clamping: a rule targeting day 31 simply never fires in shorter months.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recurrence {
    pub rtype: RecurrenceType,
    pub day_of_week: Option<u32>,
    pub day_of_month: Option<u32>,
    pub specific_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistDefinition {
    pub id: i64,
    pub org: String,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    /// Primary owners, in priority order.
    pub assigned_employee_ids: Vec<String>,
    /// Backup candidates, in priority order. Order is the tie-break when
    /// picking a substitute, so this is a sequence, not a set.
    pub backup_employee_ids: Vec<String>,
    pub recurrence: Recurrence,
    pub created_by: String,
    pub created_at: String, // ISO8601
    pub updated_at: String, // ISO8601
}

impl ChecklistDefinition {
    pub fn is_primary(&self, employee_id: &str) -> bool {
        self.assigned_employee_ids.iter().any(|e| e == employee_id)
    }

    pub fn is_backup(&self, employee_id: &str) -> bool {
        self.backup_employee_ids.iter().any(|e| e == employee_id)
    }
}
