//! One-shot commands and the interactive session, wired from the ports.

pub mod session;

use crate::adapters::storage::LocalStorage;
use crate::core::export;
use crate::core::finder::DoctorFinder;
use crate::domain::autocomplete::suggest;
use crate::domain::filter::FilterState;
use crate::domain::ports::{ConfigProvider, DoctorSource};
use crate::utils::error::Result;
use crate::view;
use std::fmt::Write;
use std::path::Path;

pub use session::Session;

/// Fetches, filters and renders the list; optionally exports the results.
pub async fn list_doctors<S: DoctorSource>(
    finder: &mut DoctorFinder<S>,
    config: &dyn ConfigProvider,
    filters: &FilterState,
    show_filters: bool,
    export_to: Option<&Path>,
) -> Result<String> {
    finder.load().await?;
    let results = finder.view(filters);
    tracing::info!(
        "Showing {} of {} doctors",
        results.len(),
        finder.doctors().len()
    );

    let mut out = String::new();
    if show_filters {
        out.push_str(&view::render_filters(filters, &config.specialty_options()));
        out.push('\n');
    }
    out.push_str(&view::render_results(
        finder.state(),
        &results,
        config.placeholder_photo(),
    ));

    if let Some(path) = export_to {
        let storage = LocalStorage::new("");
        let written = export::export(&storage, path, &results).await?;
        let _ = writeln!(out, "Exported {} doctors to {}", results.len(), written);
    }
    Ok(out)
}

pub async fn suggest_names<S: DoctorSource>(
    finder: &mut DoctorFinder<S>,
    config: &dyn ConfigProvider,
    query: &str,
) -> Result<String> {
    let doctors = finder.load().await?;
    let suggestions = suggest(
        doctors,
        query,
        config.suggestion_limit(),
        config.min_query_length(),
    );

    if suggestions.is_empty() {
        return Ok("No matches found\n".to_string());
    }

    let mut out = String::new();
    for suggestion in suggestions {
        let _ = writeln!(out, "{}  [{}]", suggestion.name, suggestion.id);
    }
    Ok(out)
}

pub async fn list_specialties<S: DoctorSource>(finder: &mut DoctorFinder<S>) -> Result<String> {
    finder.load().await?;
    let mut out = String::new();
    for specialty in finder.specialties() {
        let _ = writeln!(out, "{}", specialty);
    }
    Ok(out)
}

pub async fn book<S: DoctorSource>(finder: &mut DoctorFinder<S>, id: &str) -> Result<String> {
    finder.load().await?;
    let doctor = finder.find(id)?;
    tracing::info!("Booking placeholder for doctor {}", doctor.id);
    Ok(format!("{}\n", view::booking_message(doctor)))
}
