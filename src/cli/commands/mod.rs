pub mod checkin;
pub mod checklist;
pub mod complete;
pub mod config;
pub mod db;
pub mod employee;
pub mod generate;
pub mod init;
pub mod leave;
pub mod list;
pub mod log;
pub mod month;
