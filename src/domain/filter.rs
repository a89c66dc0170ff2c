//! Derived-state pipeline: text search, specialty set, consultation mode, sort.
//!
//! The whole pipeline is recomputed from the fetched list whenever any input
//! changes; nothing here is incremental.

use crate::domain::model::Doctor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Checkbox list shown in the filters panel unless configuration replaces it.
pub const DEFAULT_SPECIALTY_OPTIONS: [&str; 13] = [
    "Dentist",
    "Gynaecologist and Obstetrician",
    "General Physician",
    "Homeopath",
    "Orthopaedic",
    "Dermatologist",
    "Ayurveda",
    "Dietitian/Nutritionist",
    "Paediatrician",
    "Audiologist",
    "Ophthalmologist",
    "Diabetologist",
    "ENT",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Relevance,
    FeesAsc,
    ExperienceDesc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultMode {
    #[default]
    All,
    Video,
    Clinic,
}

impl SortBy {
    pub const ALL: [SortBy; 3] = [SortBy::Relevance, SortBy::FeesAsc, SortBy::ExperienceDesc];

    pub fn label(self) -> &'static str {
        match self {
            SortBy::Relevance => "Relevance (Default)",
            SortBy::FeesAsc => "Fees - Low to High",
            SortBy::ExperienceDesc => "Experience - High to Low",
        }
    }
}

impl ConsultMode {
    pub const ALL: [ConsultMode; 3] = [ConsultMode::All, ConsultMode::Video, ConsultMode::Clinic];

    pub fn label(self) -> &'static str {
        match self {
            ConsultMode::All => "All",
            ConsultMode::Video => "Video Consultation",
            ConsultMode::Clinic => "In-Clinic Consultation",
        }
    }

    pub fn matches(self, doctor: &Doctor) -> bool {
        match self {
            ConsultMode::All => true,
            ConsultMode::Video => doctor.video_consult,
            ConsultMode::Clinic => doctor.in_clinic,
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "relevance" | "default" => Ok(SortBy::Relevance),
            "fees_asc" | "fees" => Ok(SortBy::FeesAsc),
            "experience_desc" | "experience" => Ok(SortBy::ExperienceDesc),
            other => Err(format!(
                "unknown sort '{}', expected relevance, fees or experience",
                other
            )),
        }
    }
}

impl FromStr for ConsultMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(ConsultMode::All),
            "video" => Ok(ConsultMode::Video),
            "clinic" | "in_clinic" | "in-clinic" => Ok(ConsultMode::Clinic),
            other => Err(format!(
                "unknown mode '{}', expected all, video or clinic",
                other
            )),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ConsultMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn digits() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("static regex"))
}

/// Years of experience from text like "13 Years of experience"; 0 when absent.
/// Only ASCII digits count. A run too long for `u64` saturates.
pub fn parse_experience(experience: &str) -> u64 {
    digits()
        .find(experience)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Fee amount from text like "₹ 500". Missing, unparsable and zero fees are
/// `None` so they sort after every real fee.
pub fn parse_fees(fees: &str) -> Option<u64> {
    let cleaned = fees.replace('₹', "");
    let cleaned = cleaned.trim();
    let end = cleaned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(cleaned.len());
    cleaned[..end].parse::<u64>().ok().filter(|fee| *fee > 0)
}

fn fee_of(doctor: &Doctor) -> Option<u64> {
    doctor.fees.as_deref().and_then(parse_fees)
}

fn experience_of(doctor: &Doctor) -> u64 {
    doctor.experience.as_deref().map(parse_experience).unwrap_or(0)
}

fn compare_fees(a: &Doctor, b: &Doctor) -> Ordering {
    match (fee_of(a), fee_of(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: String,
    pub specialties: BTreeSet<String>,
    pub mode: ConsultMode,
    pub sort_by: SortBy,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn toggle_specialty(&mut self, name: &str, checked: bool) {
        if checked {
            self.specialties.insert(name.to_string());
        } else {
            self.specialties.remove(name);
        }
    }

    /// Like `toggle_specialty`, with `name` first normalized against `options`.
    pub fn toggle_specialty_in(&mut self, options: &[String], name: &str, checked: bool) {
        let name = canonical_specialty(options, name);
        self.toggle_specialty(&name, checked);
    }

    pub fn set_mode(&mut self, mode: ConsultMode) {
        self.mode = mode;
    }

    pub fn set_sort(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    fn matches(&self, doctor: &Doctor, lower_term: Option<&str>) -> bool {
        if let Some(term) = lower_term {
            if !doctor.name.to_lowercase().contains(term) {
                return false;
            }
        }

        if !self.specialties.is_empty()
            && !self.specialties.iter().any(|name| doctor.has_specialty(name))
        {
            return false;
        }

        self.mode.matches(doctor)
    }

    /// Runs the pipeline over `doctors` without cloning records.
    pub fn apply_ref<'a>(&self, doctors: &'a [Doctor]) -> Vec<&'a Doctor> {
        let lower_term = (!self.search_term.is_empty()).then(|| self.search_term.to_lowercase());

        let mut filtered: Vec<&Doctor> = doctors
            .iter()
            .filter(|doctor| self.matches(doctor, lower_term.as_deref()))
            .collect();

        match self.sort_by {
            SortBy::Relevance => {}
            SortBy::FeesAsc => filtered.sort_by(|a, b| compare_fees(a, b)),
            SortBy::ExperienceDesc => {
                filtered.sort_by_key(|doctor| std::cmp::Reverse(experience_of(doctor)))
            }
        }

        tracing::debug!(
            total = doctors.len(),
            matched = filtered.len(),
            "recomputed doctor list"
        );
        filtered
    }

    pub fn apply(&self, doctors: &[Doctor]) -> Vec<Doctor> {
        self.apply_ref(doctors).into_iter().cloned().collect()
    }
}

/// The option spelled like `name` ignoring ASCII case, else `name` trimmed.
pub fn canonical_specialty(options: &[String], name: &str) -> String {
    let name = name.trim();
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(name))
        .cloned()
        .unwrap_or_else(|| name.to_string())
}

/// Sorted, de-duplicated specialty names found in `doctors`.
pub fn unique_specialties(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(|doctor| doctor.specialities.iter())
        .filter(|s| !s.name.is_empty())
        .map(|s| s.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
