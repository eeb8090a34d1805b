pub mod assignment;
pub mod checklist;
pub mod employee;
