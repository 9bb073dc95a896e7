pub mod backfill;
pub mod backup;
pub mod export;
pub mod log;
pub mod repository;
