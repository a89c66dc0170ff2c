use crate::domain::model::{Doctor, NOT_AVAILABLE};
use crate::domain::ports::Storage;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::validate_file_extension;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match validate_file_extension("export", path, &["json", "csv"]) {
            Ok(ext) if ext == "csv" => Ok(ExportFormat::Csv),
            Ok(_) => Ok(ExportFormat::Json),
            Err(_) => Err(FinderError::UnsupportedExport {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Flat view of a record for CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    name: &'a str,
    specialty: &'a str,
    experience: &'a str,
    fees: &'a str,
    clinic: &'a str,
    location: String,
    video_consult: bool,
    in_clinic: bool,
}

impl<'a> From<&'a Doctor> for CsvRow<'a> {
    fn from(doctor: &'a Doctor) -> Self {
        Self {
            id: &doctor.id,
            name: &doctor.name,
            specialty: doctor.primary_specialty(),
            experience: doctor.experience.as_deref().unwrap_or(NOT_AVAILABLE),
            fees: doctor.fees.as_deref().unwrap_or(NOT_AVAILABLE),
            clinic: doctor.clinic_name().unwrap_or(NOT_AVAILABLE),
            location: doctor.location(),
            video_consult: doctor.video_consult,
            in_clinic: doctor.in_clinic,
        }
    }
}

pub fn render(doctors: &[&Doctor], format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(doctors)?),
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for doctor in doctors {
                writer.serialize(CsvRow::from(*doctor))?;
            }
            writer
                .into_inner()
                .map_err(|e| FinderError::IoError(e.into_error()))
        }
    }
}

/// Writes the current result list to `path` through `storage`. Returns the
/// path for display.
pub async fn export<S: Storage>(storage: &S, path: &Path, doctors: &[&Doctor]) -> Result<String> {
    let format = ExportFormat::from_path(path)?;
    let data = render(doctors, format)?;

    tracing::info!(
        "Exporting {} doctors as {:?} to {}",
        doctors.len(),
        format,
        path.display()
    );
    storage.write_file(path, &data).await?;
    Ok(path.display().to_string())
}
