//! Interactive session: the search page driven by line commands.

use crate::core::finder::DoctorFinder;
use crate::domain::autocomplete::{Key, SearchBox};
use crate::domain::filter::{ConsultMode, FilterState, SortBy};
use crate::domain::ports::{ConfigProvider, DoctorSource};
use crate::utils::error::Result;
use crate::view;
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  type <text>          search by name (shows suggestions)
  down | up            move through suggestions
  enter | esc          select the highlighted suggestion / close the list
  pick <n>             select suggestion number n
  hover <n>            highlight suggestion number n
  focus | blur         enter / leave the search box
  submit               submit the search box as typed
  check <specialty>    tick a specialty
  uncheck <specialty>  untick a specialty
  mode <all|video|clinic>
  sort <relevance|fees|experience>
  clear                clear all filters
  filters              show the filters panel
  list                 show the results
  book <id>            book an appointment
  refetch              reload the doctor list
  help                 show this help
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Type(String),
    Key(Key),
    Pick(usize),
    Hover(usize),
    Focus,
    Blur,
    Submit,
    Check(String),
    Uncheck(String),
    Mode(ConsultMode),
    Sort(SortBy),
    Clear,
    Filters,
    List,
    Book(String),
    Refetch,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return SessionCommand::Empty;
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        match name.to_lowercase().as_str() {
            "type" | "search" => SessionCommand::Type(rest.to_string()),
            "down" => SessionCommand::Key(Key::Down),
            "up" => SessionCommand::Key(Key::Up),
            "enter" => SessionCommand::Key(Key::Enter),
            "esc" | "escape" => SessionCommand::Key(Key::Escape),
            "pick" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => SessionCommand::Pick(n - 1),
                _ => SessionCommand::Invalid(format!("pick expects a number from 1, got '{}'", rest)),
            },
            "hover" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => SessionCommand::Hover(n - 1),
                _ => SessionCommand::Invalid(format!("hover expects a number from 1, got '{}'", rest)),
            },
            "focus" => SessionCommand::Focus,
            "blur" => SessionCommand::Blur,
            "submit" => SessionCommand::Submit,
            "check" | "uncheck" if rest.is_empty() => {
                SessionCommand::Invalid(format!("{} expects a specialty name", name))
            }
            "check" => SessionCommand::Check(rest.to_string()),
            "uncheck" => SessionCommand::Uncheck(rest.to_string()),
            "mode" => rest
                .parse()
                .map_or_else(SessionCommand::Invalid, SessionCommand::Mode),
            "sort" => rest
                .parse()
                .map_or_else(SessionCommand::Invalid, SessionCommand::Sort),
            "clear" => SessionCommand::Clear,
            "filters" => SessionCommand::Filters,
            "list" | "show" => SessionCommand::List,
            "book" if rest.is_empty() => SessionCommand::Invalid("book expects a doctor id".to_string()),
            "book" => SessionCommand::Book(rest.to_string()),
            "refetch" | "reload" => SessionCommand::Refetch,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            _ => SessionCommand::Invalid(format!(
                "Unknown command '{}'. Type 'help' for the list of commands",
                name
            )),
        }
    }
}

pub struct Session<S: DoctorSource> {
    finder: DoctorFinder<S>,
    filters: FilterState,
    search: SearchBox,
    specialty_options: Vec<String>,
    placeholder_photo: String,
}

impl<S: DoctorSource> Session<S> {
    pub fn new(finder: DoctorFinder<S>, config: &dyn ConfigProvider) -> Self {
        Self {
            finder,
            filters: FilterState::new(),
            search: SearchBox::new(config.suggestion_limit(), config.min_query_length()),
            specialty_options: config.specialty_options(),
            placeholder_photo: config.placeholder_photo().to_string(),
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    /// Loads the list, then reads commands until `quit` or end of input.
    pub async fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        // Fetch failures stay in the finder state and are rendered below.
        let _ = self.finder.load().await;
        writeln!(out, "{}", HELP)?;
        self.write_results(out)?;

        for line in input.lines() {
            let command = SessionCommand::parse(&line?);
            tracing::debug!("session command: {:?}", command);
            if !self.execute(command, out).await? {
                break;
            }
        }
        Ok(())
    }

    /// Applies one command. Returns `false` when the session should end.
    pub async fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<bool> {
        match command {
            SessionCommand::Type(text) => {
                let term = self.search.type_text(self.finder.doctors(), &text);
                self.filters.set_search_term(term);
                self.write_search_bar(out)?;
                self.write_results(out)?;
            }
            SessionCommand::Key(key) => {
                let selected = self.search.key(key);
                self.write_search_bar(out)?;
                if let Some(term) = selected {
                    self.filters.set_search_term(term);
                    self.write_results(out)?;
                }
            }
            SessionCommand::Pick(index) => match self.search.select(index) {
                Some(term) => {
                    self.filters.set_search_term(term);
                    self.write_search_bar(out)?;
                    self.write_results(out)?;
                }
                None => writeln!(out, "No suggestion number {}", index + 1)?,
            },
            SessionCommand::Hover(index) => {
                self.search.hover(index);
                self.write_search_bar(out)?;
            }
            SessionCommand::Focus => {
                self.search.focus();
                self.write_search_bar(out)?;
            }
            SessionCommand::Blur => {
                self.search.blur();
                self.write_search_bar(out)?;
            }
            SessionCommand::Submit => {
                self.search.submit();
                self.filters.set_search_term(self.search.input());
                self.write_search_bar(out)?;
                self.write_results(out)?;
            }
            SessionCommand::Check(name) => {
                self.filters
                    .toggle_specialty_in(&self.specialty_options, &name, true);
                self.write_results(out)?;
            }
            SessionCommand::Uncheck(name) => {
                self.filters
                    .toggle_specialty_in(&self.specialty_options, &name, false);
                self.write_results(out)?;
            }
            SessionCommand::Mode(mode) => {
                self.filters.set_mode(mode);
                self.write_results(out)?;
            }
            SessionCommand::Sort(sort) => {
                self.filters.set_sort(sort);
                self.write_results(out)?;
            }
            SessionCommand::Clear => {
                self.filters.clear();
                self.search.clear();
                writeln!(out, "Filters cleared")?;
                self.write_results(out)?;
            }
            SessionCommand::Filters => {
                write!(
                    out,
                    "{}",
                    view::render_filters(&self.filters, &self.specialty_options)
                )?;
            }
            SessionCommand::List => self.write_results(out)?,
            SessionCommand::Book(id) => match self.finder.find(&id) {
                Ok(doctor) => writeln!(out, "{}", view::booking_message(doctor))?,
                Err(e) => writeln!(out, "{}", e.user_friendly_message())?,
            },
            SessionCommand::Refetch => {
                let _ = self.finder.refetch().await;
                self.search.refresh(self.finder.doctors());
                self.write_results(out)?;
            }
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => return Ok(false),
            SessionCommand::Empty => {}
            SessionCommand::Invalid(message) => writeln!(out, "{}", message)?,
        }
        Ok(true)
    }

    fn write_search_bar<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}", view::render_search_bar(&self.search))?;
        Ok(())
    }

    fn write_results<W: Write>(&self, out: &mut W) -> Result<()> {
        let results = self.finder.view(&self.filters);
        write!(
            out,
            "{}",
            view::render_results(self.finder.state(), &results, &self.placeholder_photo)
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TomlConfig;
    use crate::core::finder::test_support::StaticSource;
    use crate::domain::model::fixtures::{doctor, with_specialties};
    use crate::domain::model::Doctor;
    use std::io::Cursor;

    fn sample() -> Vec<Doctor> {
        let mut a = with_specialties(doctor("1", "Dr. Priya Singh"), &["Dentist"]);
        a.video_consult = true;
        let mut b = with_specialties(doctor("2", "Dr. Pritam Roy"), &["ENT"]);
        b.in_clinic = true;
        let c = with_specialties(doctor("3", "Dr. Omar Khan"), &["Dentist"]);
        vec![a, b, c]
    }

    async fn run_script(source: StaticSource, script: &str) -> (Session<StaticSource>, String) {
        let config = TomlConfig::default();
        let mut session = Session::new(DoctorFinder::new(source), &config);
        let mut out = Vec::new();
        session
            .run(Cursor::new(script.as_bytes()), &mut out)
            .await
            .unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            SessionCommand::parse("type  Dr. Pri "),
            SessionCommand::Type("Dr. Pri".to_string())
        );
        assert_eq!(SessionCommand::parse("DOWN"), SessionCommand::Key(Key::Down));
        assert_eq!(SessionCommand::parse("pick 2"), SessionCommand::Pick(1));
        assert_eq!(SessionCommand::parse("hover 3"), SessionCommand::Hover(2));
        assert!(matches!(SessionCommand::parse("hover x"), SessionCommand::Invalid(_)));
        assert_eq!(SessionCommand::parse("Focus"), SessionCommand::Focus);
        assert_eq!(SessionCommand::parse("blur"), SessionCommand::Blur);
        assert_eq!(SessionCommand::parse("submit"), SessionCommand::Submit);
        assert!(matches!(SessionCommand::parse("pick 0"), SessionCommand::Invalid(_)));
        assert_eq!(
            SessionCommand::parse("check General Physician"),
            SessionCommand::Check("General Physician".to_string())
        );
        assert!(matches!(SessionCommand::parse("check"), SessionCommand::Invalid(_)));
        assert_eq!(SessionCommand::parse("mode video"), SessionCommand::Mode(ConsultMode::Video));
        assert_eq!(SessionCommand::parse("sort fees"), SessionCommand::Sort(SortBy::FeesAsc));
        assert!(matches!(SessionCommand::parse("sort price"), SessionCommand::Invalid(_)));
        assert_eq!(SessionCommand::parse("   "), SessionCommand::Empty);
        assert_eq!(SessionCommand::parse("q"), SessionCommand::Quit);
        assert!(matches!(SessionCommand::parse("dance"), SessionCommand::Invalid(_)));
    }

    #[tokio::test]
    async fn test_type_and_select_suggestion() {
        let (session, out) = run_script(StaticSource::new(sample()), "type pri\ndown\ndown\nenter\n").await;

        assert_eq!(session.filters().search_term, "Dr. Pritam Roy");
        assert_eq!(session.search().input(), "Dr. Pritam Roy");
        assert!(!session.search().is_open());
        assert!(out.contains("  > 2. Dr. Pritam Roy"));
    }

    #[tokio::test]
    async fn test_hover_then_enter_selects_hovered() {
        let (session, out) = run_script(StaticSource::new(sample()), "type pri\nhover 2\nenter\n").await;

        assert!(out.contains("  > 2. Dr. Pritam Roy"));
        assert_eq!(session.filters().search_term, "Dr. Pritam Roy");
        assert!(!session.search().is_open());
    }

    #[tokio::test]
    async fn test_blur_focus_and_submit() {
        let (session, _) = run_script(StaticSource::new(sample()), "type pri\nblur\n").await;
        assert!(!session.search().is_open());
        assert_eq!(session.filters().search_term, "pri");

        let (session, _) = run_script(StaticSource::new(sample()), "type pri\nblur\nfocus\n").await;
        assert!(session.search().is_open());

        let (session, out) = run_script(StaticSource::new(sample()), "type pri\nsubmit\n").await;
        assert!(!session.search().is_open());
        assert_eq!(session.filters().search_term, "pri");
        assert!(out.contains("Dr. Priya Singh"));
    }

    #[tokio::test]
    async fn test_filters_and_clear() {
        let (session, out) = run_script(
            StaticSource::new(sample()),
            "check dentist\nmode video\nfilters\nclear\nquit\ntype never-read\n",
        )
        .await;

        assert!(out.contains("[x] Dentist"));
        assert!(out.contains("(*) Video Consultation"));
        assert!(out.contains("Filters cleared"));
        assert!(session.filters().is_default());
        assert_eq!(session.search().input(), "");
    }

    #[tokio::test]
    async fn test_no_match_and_booking() {
        let (_, out) = run_script(
            StaticSource::new(sample()),
            "type zzz\nbook 3\nbook 404\n",
        )
        .await;

        assert!(out.contains("No doctors found matching your criteria."));
        assert!(out.contains("Booking appointment with Dr. Omar Khan"));
        assert!(out.contains("There is no doctor with id 404"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_rendered() {
        let (_, out) = run_script(StaticSource::failing("network down"), "list\n").await;
        assert!(out.contains("Error loading doctors: IO error: network down"));
    }

    #[test]
    fn test_refetch_reloads_source() {
        let source = StaticSource::new(sample());
        let (_, out) = tokio_test::block_on(run_script(source.clone(), "refetch\n"));
        assert_eq!(source.calls(), 2);
        assert!(out.contains("Dr. Omar Khan"));
    }
}
