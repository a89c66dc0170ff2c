use crate::domain::filter::{unique_specialties, FilterState};
use crate::domain::model::Doctor;
use crate::domain::ports::DoctorSource;
use crate::utils::error::{FinderError, Result};

/// Outcome of the single fetch that feeds the page.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Ready(Vec<Doctor>),
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub struct DoctorFinder<S: DoctorSource> {
    source: S,
    state: FetchState,
}

impl<S: DoctorSource> DoctorFinder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: FetchState::Loading,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Fetches the list once. A failure is kept in the state for display and
    /// also returned so one-shot callers can bail out.
    pub async fn load(&mut self) -> Result<&[Doctor]> {
        self.state = FetchState::Loading;
        tracing::info!("Loading doctors from {}", self.source.describe());

        match self.source.fetch_all().await {
            Ok(doctors) => {
                tracing::debug!("Loaded {} doctors", doctors.len());
                self.state = FetchState::Ready(doctors);
                Ok(self.doctors())
            }
            Err(e) => {
                tracing::error!("Error loading doctors: {}", e);
                self.state = FetchState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn refetch(&mut self) -> Result<&[Doctor]> {
        tracing::info!("Refetching doctor list");
        self.load().await
    }

    pub fn doctors(&self) -> &[Doctor] {
        match &self.state {
            FetchState::Ready(doctors) => doctors,
            _ => &[],
        }
    }

    pub fn specialties(&self) -> Vec<String> {
        unique_specialties(self.doctors())
    }

    pub fn view(&self, filters: &FilterState) -> Vec<&Doctor> {
        filters.apply_ref(self.doctors())
    }

    pub fn find(&self, id: &str) -> Result<&Doctor> {
        self.doctors()
            .iter()
            .find(|doctor| doctor.id == id)
            .ok_or_else(|| FinderError::NotFound { id: id.to_string() })
    }
}
