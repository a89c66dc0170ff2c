//! Text rendering of the page: search bar, filters panel, doctor cards.
//!
//! Every function returns a `String` so callers decide where it goes.

use crate::core::finder::FetchState;
use crate::domain::autocomplete::SearchBox;
use crate::domain::filter::{ConsultMode, FilterState, SortBy};
use crate::domain::model::{Doctor, NOT_AVAILABLE};
use std::fmt::Write;

pub const DEFAULT_PLACEHOLDER_PHOTO: &str = "https://via.placeholder.com/80";
pub const EMPTY_LIST_MESSAGE: &str = "No doctors found matching your criteria.";
pub const LOADING_MESSAGE: &str = "Loading doctors...";

fn radio(selected: bool) -> &'static str {
    if selected {
        "(*)"
    } else {
        "( )"
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn render_search_bar(search: &SearchBox) -> String {
    let mut out = String::new();
    if search.input().is_empty() {
        out.push_str("Search: <type a doctor's name>\n");
    } else {
        let _ = writeln!(out, "Search: {}", search.input());
    }

    if search.is_open() {
        for (index, suggestion) in search.suggestions().iter().enumerate() {
            let marker = if search.active() == Some(index) { '>' } else { ' ' };
            let _ = writeln!(out, "  {} {}. {}", marker, index + 1, suggestion.name);
        }
    }
    out
}

pub fn render_filters<S: AsRef<str>>(filters: &FilterState, specialty_options: &[S]) -> String {
    let mut out = String::from("Sort By\n");
    for sort in SortBy::ALL {
        let _ = writeln!(out, "  {} {}", radio(filters.sort_by == sort), sort.label());
    }

    out.push_str("Filters  [Clear All]\n");
    out.push_str("Specialties\n");
    for option in specialty_options {
        let option = option.as_ref();
        let _ = writeln!(
            out,
            "  {} {}",
            checkbox(filters.specialties.contains(option)),
            option
        );
    }

    out.push_str("Mode of consultation\n");
    for mode in ConsultMode::ALL {
        let _ = writeln!(out, "  {} {}", radio(filters.mode == mode), mode.label());
    }
    out
}

pub fn render_card(doctor: &Doctor, placeholder_photo: &str) -> String {
    let mut out = String::new();
    let name = if doctor.name.is_empty() {
        NOT_AVAILABLE
    } else {
        doctor.name.as_str()
    };

    let _ = writeln!(out, "{}  [{}]", name, doctor.id);
    let _ = writeln!(out, "  {}", doctor.primary_specialty());
    let _ = writeln!(
        out,
        "  {}",
        doctor.experience.as_deref().unwrap_or("N/A experience")
    );
    let _ = writeln!(out, "  {}", doctor.clinic_name().unwrap_or("Clinic name N/A"));
    let _ = writeln!(out, "  Location: {}", doctor.location());

    if !doctor.languages.is_empty() {
        let _ = writeln!(out, "  Speaks: {}", doctor.languages.join(", "));
    }

    let modes: Vec<&str> = [
        doctor.video_consult.then_some("✓ Video Consult"),
        doctor.in_clinic.then_some("✓ In-Clinic"),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !modes.is_empty() {
        let _ = writeln!(out, "  {}", modes.join("  "));
    }

    let _ = writeln!(out, "  Photo: {}", doctor.photo_url(placeholder_photo));
    let _ = writeln!(
        out,
        "  Fees: {}  [Book Appointment]",
        doctor.fees.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    out
}

pub fn render_list(doctors: &[&Doctor], placeholder_photo: &str) -> String {
    if doctors.is_empty() {
        return format!("{}\n", EMPTY_LIST_MESSAGE);
    }

    doctors
        .iter()
        .map(|doctor| render_card(doctor, placeholder_photo))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_results(state: &FetchState, doctors: &[&Doctor], placeholder_photo: &str) -> String {
    match state {
        FetchState::Loading => format!("{}\n", LOADING_MESSAGE),
        FetchState::Failed(message) => format!("Error loading doctors: {}\n", message),
        FetchState::Ready(_) => render_list(doctors, placeholder_photo),
    }
}

/// Booking is a placeholder; no appointment is created.
pub fn booking_message(doctor: &Doctor) -> String {
    format!("Booking appointment with {}", doctor.name)
}
