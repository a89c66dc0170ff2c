pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod view;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{HttpDoctorSource, LocalStorage};
pub use core::finder::{DoctorFinder, FetchState};
pub use domain::autocomplete::{suggest, Key, SearchBox};
pub use domain::filter::{ConsultMode, FilterState, SortBy};
pub use domain::model::{Doctor, Suggestion};
pub use utils::error::{FinderError, Result};
