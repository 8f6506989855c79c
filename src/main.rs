use anyhow::Context;
use clap::Parser;
use course_planner::utils::error::{ErrorSeverity, PlannerError};
use course_planner::utils::{logger, validation};
use course_planner::{
    Catalog, CliConfig, Command, CsvRecordSource, PlannerConfig, RecordSource, Session,
};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            return Ok(exit_code(&e));
        }
    };

    // 初始化日誌
    if settings.json_logs() {
        logger::init_json_logger(settings.verbose());
    } else {
        logger::init_cli_logger(settings.verbose());
    }

    tracing::info!("Starting course-planner");
    tracing::debug!("Settings: {:?}", settings);

    let source = CsvRecordSource::with_delimiter(settings.delimiter()?);

    let outcome = match cli.command() {
        Command::Menu => run_menu(source, &settings, cli.data.is_some()),
        Command::List { json } => run_list(&source, &settings, json),
        Command::Show { course, json } => run_show(&source, &settings, &course, json),
    };

    match outcome {
        Ok(code) => Ok(code),
        Err(e) => match e.downcast_ref::<PlannerError>() {
            Some(planner_error) => {
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    planner_error,
                    planner_error.category(),
                    planner_error.severity()
                );
                tracing::error!(
                    "💡 Recovery suggestion: {}",
                    planner_error.recovery_suggestion()
                );

                eprintln!("❌ {}", planner_error.user_friendly_message());
                eprintln!("💡 Suggestion: {}", planner_error.recovery_suggestion());
                Ok(exit_code(planner_error))
            }
            None => Err(e),
        },
    }
}

fn run_menu(
    source: CsvRecordSource,
    settings: &PlannerConfig,
    data_flag: bool,
) -> anyhow::Result<ExitCode> {
    let mut session = Session::new(source);

    if settings.preload() || data_flag {
        if let Some(path) = settings.data_path() {
            match session.load(path) {
                Ok(count) => println!(
                    "Data loaded successfully from '{}'. (courses: {})",
                    path, count
                ),
                Err(e) => println!("{}", e.user_friendly_message()),
            }
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), stdout.lock())?;

    Ok(ExitCode::SUCCESS)
}

fn load_catalog(source: &CsvRecordSource, settings: &PlannerConfig) -> anyhow::Result<Catalog> {
    let path = validation::validate_required_field("source.path", &settings.source.path)?;

    let records = source.read_records(path)?;
    let mut catalog = Catalog::new();
    catalog
        .load(records)
        .map_err(PlannerError::MalformedRecord)?;

    Ok(catalog)
}

fn run_list(
    source: &CsvRecordSource,
    settings: &PlannerConfig,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let catalog = load_catalog(source, settings)?;
    let mut stdout = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut stdout, &catalog.sorted_summaries())
            .map_err(PlannerError::SerializationError)?;
        writeln!(stdout).context("failed to write course list")?;
    } else {
        for number in catalog.sorted_identifiers() {
            if let Some(line) = catalog.describe_line(&number) {
                writeln!(stdout, "{}", line).context("failed to write course list")?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_show(
    source: &CsvRecordSource,
    settings: &PlannerConfig,
    course: &str,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let catalog = load_catalog(source, settings)?;
    let mut stdout = io::stdout().lock();

    match catalog.describe_detail(course) {
        Ok(detail) if json => {
            serde_json::to_writer_pretty(&mut stdout, &detail)
                .map_err(PlannerError::SerializationError)?;
            writeln!(stdout).context("failed to write course detail")?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(detail) => {
            writeln!(stdout, "{}", detail).context("failed to write course detail")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(not_found) => {
            tracing::debug!("Lookup miss: {}", not_found.0);
            writeln!(stdout, "{}", not_found).context("failed to write course detail")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(e: &PlannerError) -> ExitCode {
    match e.severity() {
        ErrorSeverity::Medium => ExitCode::from(2),
        ErrorSeverity::High => ExitCode::from(1),
        ErrorSeverity::Critical => ExitCode::from(3),
    }
}
