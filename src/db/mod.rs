pub mod assignments;
pub mod attendance;
pub mod checklists;
pub mod employees;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod stats;
