pub mod add;
pub mod backfill;
pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod insights;
pub mod list;
pub mod log;
pub mod status;
pub mod update;
