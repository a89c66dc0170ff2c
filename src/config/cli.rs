use crate::domain::filter::{ConsultMode, FilterState, SortBy};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "doctor-finder")]
#[command(version)]
#[command(about = "Browse, search, filter and sort a remote list of doctors")]
pub struct CliConfig {
    /// URL of the JSON doctor list (overrides the config file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the filtered and sorted doctor list (default)
    List(ListArgs),

    /// Show autocomplete suggestions for a name fragment
    Suggest {
        /// Name fragment to complete
        query: String,
    },

    /// List every specialty present in the fetched data
    Specialties,

    /// Book an appointment with a doctor (placeholder)
    Book {
        /// Doctor id as shown in the list
        id: String,
    },

    /// Start an interactive session
    Interactive,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive name search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Specialty to include; repeat or separate with commas
    #[arg(long = "specialty", value_delimiter = ',')]
    pub specialties: Vec<String>,

    /// Consultation mode: all, video or clinic
    #[arg(long, default_value = "all")]
    pub mode: ConsultMode,

    /// Sort order: relevance, fees_asc or experience_desc
    #[arg(long, default_value = "relevance")]
    pub sort: SortBy,

    /// Also print the filters panel
    #[arg(long)]
    pub show_filters: bool,

    /// Write the results to a .json or .csv file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl ListArgs {
    /// Specialty names matching one of `specialty_options` ignoring case take
    /// the option's spelling.
    pub fn filter_state(&self, specialty_options: &[String]) -> FilterState {
        let mut state = FilterState::new();
        state.set_search_term(self.search.trim());
        for specialty in &self.specialties {
            let specialty = specialty.trim();
            if !specialty.is_empty() {
                state.toggle_specialty_in(specialty_options, specialty, true);
            }
        }
        state.set_mode(self.mode);
        state.set_sort(self.sort);
        state
    }
}
