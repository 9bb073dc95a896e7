use crate::core::repository::ReservationRepository;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ensure_writable, export_csv, export_json};
use crate::models::Status;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the reservation snapshot (newest first) to `file`.
    /// Returns how many reservations were written.
    pub fn export(
        repo: &mut ReservationRepository,
        format: ExportFormat,
        file: &str,
        status: Option<Status>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let rows: Vec<_> = repo
            .list_all()?
            .into_iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
