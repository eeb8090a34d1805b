//! Per-day, per-employee instantiation of a checklist definition.

use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Composite identity used for duplicate suppression: the in-memory lock
/// token and the stored `assignment_key` column are both this string.
pub fn assignment_key(checklist_id: i64, employee_id: &str, date: NaiveDate) -> String {
    format!("{}:{}:{}", checklist_id, employee_id, date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentRecord {
    pub id: i64,
    pub org: String,
    pub checklist_id: i64,
    pub checklist_title: String, // denormalized, survives checklist deletion of the title source
    pub employee_id: String,
    pub employee_name: String, // denormalized, annotated "(Backup for ...)" on backups
    pub date: NaiveDate,       // ⇔ assignments.date (TEXT "YYYY-MM-DD")
    pub completed: bool,
    pub reason: Option<String>, // required iff not completed
    pub completed_at: Option<String>,
    pub is_backup_assignment: bool,
    pub original_employee_id: Option<String>, // set iff backup
    pub generated_by: String,                 // trigger: check_in | manual | checklist_created | ...
    pub assignment_key: String,
    pub created_at: String, // ISO8601
}

impl AssignmentRecord {
    /// Constructor for freshly generated (pending) assignments.
    /// - `id = 0` until the row is inserted
    /// - `completed = false`, no reason, no completion timestamp
    /// - `created_at = now() in ISO8601`
    #[allow(clippy::too_many_arguments)]
    pub fn new_pending(
        org: &str,
        checklist_id: i64,
        checklist_title: &str,
        employee_id: &str,
        employee_name: &str,
        date: NaiveDate,
        generated_by: &str,
    ) -> Self {
        Self {
            id: 0,
            org: org.to_string(),
            checklist_id,
            checklist_title: checklist_title.to_string(),
            employee_id: employee_id.to_string(),
            employee_name: employee_name.to_string(),
            date,
            completed: false,
            reason: None,
            completed_at: None,
            is_backup_assignment: false,
            original_employee_id: None,
            generated_by: generated_by.to_string(),
            assignment_key: assignment_key(checklist_id, employee_id, date),
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Mark the record as a backup substitution for `original_employee_id`.
    pub fn into_backup(mut self, original_employee_id: &str, original_name: &str) -> Self {
        self.is_backup_assignment = true;
        self.original_employee_id = Some(original_employee_id.to_string());
        self.employee_name = format!("{} (Backup for {})", self.employee_name, original_name);
        self
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
