use clap::Parser;
use doctor_finder::config::{CliConfig, Command, ListArgs};
use doctor_finder::domain::ports::ConfigProvider;
use doctor_finder::utils::error::{ErrorSeverity, FinderError};
use doctor_finder::utils::{logger, validation::Validate};
use doctor_finder::{app, view, DoctorFinder, HttpDoctorSource, TomlConfig};

fn load_config(cli: &CliConfig) -> Result<TomlConfig, FinderError> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    let config = config.with_endpoint(cli.endpoint.clone());
    config.validate()?;
    Ok(config)
}

fn exit_code(e: &FinderError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report(e: &FinderError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            report(&e);
        }
    };

    let source = HttpDoctorSource::from_config(&config);
    let mut finder = DoctorFinder::new(source);

    let command = cli.command.unwrap_or_else(|| Command::List(ListArgs::default()));
    let result = match command {
        Command::List(args) => {
            app::list_doctors(
                &mut finder,
                &config,
                &args.filter_state(&config.specialty_options()),
                args.show_filters,
                args.export.as_deref(),
            )
            .await
        }
        Command::Suggest { query } => app::suggest_names(&mut finder, &config, &query).await,
        Command::Specialties => app::list_specialties(&mut finder).await,
        Command::Book { id } => app::book(&mut finder, &id).await,
        Command::Interactive => {
            let mut session = app::Session::new(finder, &config);
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            session.run(stdin.lock(), &mut stdout).await?;
            return Ok(());
        }
    };

    match result {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            if finder.state().error().is_some() {
                eprint!(
                    "{}",
                    view::render_results(finder.state(), &[], config.placeholder_photo())
                );
            }
            report(&e);
        }
    }
}
