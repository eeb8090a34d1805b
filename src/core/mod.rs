pub mod calendar;
pub mod checklist;
pub mod completion;
pub mod generator;
pub mod guard;
pub mod log;
pub mod recurrence;
pub mod reassign;
