use crate::config::toml_config::PlannerConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "course-planner")]
#[command(about = "Browse a course catalog and its prerequisites")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Course data file (overrides source.path)
    #[arg(long)]
    pub data: Option<String>,

    /// Field delimiter (overrides source.delimiter)
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive menu (default)
    Menu,
    /// Print the sorted course list
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print one course and its prerequisites
    Show {
        course: String,
        #[arg(long)]
        json: bool,
    },
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }

    /// Loads the config file (if any), applies command-line overrides and validates the result.
    pub fn settings(&self) -> Result<PlannerConfig> {
        let mut settings = match &self.config {
            Some(path) => PlannerConfig::from_file(path)?,
            None => PlannerConfig::default(),
        };

        if let Some(data) = &self.data {
            settings.source.path = Some(data.clone());
        }
        if let Some(delimiter) = &self.delimiter {
            settings.source.delimiter = Some(delimiter.clone());
        }
        if self.verbose {
            settings.logging.verbose = Some(true);
        }
        if self.log_json {
            settings.logging.json = Some(true);
        }

        settings.validate()?;
        Ok(settings)
    }
}
