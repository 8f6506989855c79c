use crate::core::catalog::Catalog;
use crate::domain::ports::RecordSource;
use crate::utils::error::{PlannerError, Result};
use std::io::{BufRead, Write};

const LOAD_FIRST: &str = "Please load the data structure first (option 1).";

/// Interactive front end over a [`Catalog`].
///
/// The session owns the "loaded" flag: it is set by a successful load and cleared by a failed
/// one, even though the catalog itself keeps whatever it held before the failure.
pub struct Session<S: RecordSource> {
    source: S,
    catalog: Catalog,
    loaded: bool,
}

impl<S: RecordSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: Catalog::new(),
            loaded: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reads `name` through the record source and loads it into the catalog.
    pub fn load(&mut self, name: &str) -> Result<usize> {
        let outcome = match self.source.read_records(name) {
            Ok(records) => self.catalog.load(records).map_err(PlannerError::from),
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(count) => tracing::info!("✅ Loaded {} course(s) from {}", count, name),
            Err(e) => tracing::warn!(
                "❌ Load from {} failed: {} (Category: {:?})",
                name,
                e,
                e.category()
            ),
        }

        self.loaded = outcome.is_ok();
        outcome
    }

    /// Runs the menu loop until the user exits or `input` is exhausted.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        writeln!(output, "Welcome to the course planner.")?;
        writeln!(output)?;

        loop {
            write_menu(&mut output)?;

            let Some(choice) = read_line(&mut input)? else {
                tracing::debug!("Input closed, leaving menu");
                break;
            };
            let choice = choice.trim();
            if choice.is_empty() {
                continue;
            }

            match choice {
                "1" => self.prompt_load(&mut input, &mut output)?,
                "2" => self.print_course_list(&mut output)?,
                "3" => self.prompt_course(&mut input, &mut output)?,
                "9" => {
                    writeln!(output, "Thank you for using the course planner!")?;
                    break;
                }
                other => writeln!(output, "{} is not a valid option.", other)?,
            }
        }

        output.flush()?;
        Ok(())
    }

    fn prompt_load<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        write!(
            output,
            "Enter the file name to load (e.g., ABCU_Advising_Program_Input.csv): "
        )?;
        output.flush()?;

        let filename = read_line(input)?.unwrap_or_default();
        let filename = filename.trim();
        if filename.is_empty() {
            writeln!(output, "No file name provided.")?;
            return Ok(());
        }

        match self.load(filename) {
            Ok(count) => writeln!(
                output,
                "Data loaded successfully from '{}'. (courses: {})",
                filename, count
            )?,
            Err(e) => writeln!(output, "{}", e.user_friendly_message())?,
        }

        Ok(())
    }

    fn print_course_list<W: Write>(&self, output: &mut W) -> Result<()> {
        if !self.loaded {
            writeln!(output, "{}", LOAD_FIRST)?;
            return Ok(());
        }

        writeln!(output)?;
        writeln!(output, "Here is a sample schedule:")?;
        writeln!(output)?;

        for number in self.catalog.sorted_identifiers() {
            if let Some(line) = self.catalog.describe_line(&number) {
                writeln!(output, "{}", line)?;
                writeln!(output)?;
            }
        }

        Ok(())
    }

    fn prompt_course<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<()> {
        if !self.loaded {
            writeln!(output, "{}", LOAD_FIRST)?;
            return Ok(());
        }

        write!(output, "What course do you want to know about? ")?;
        output.flush()?;

        let query = read_line(input)?.unwrap_or_default();
        let query = query.trim().to_ascii_uppercase();
        if query.is_empty() {
            writeln!(output, "No course entered.")?;
            return Ok(());
        }

        match self.catalog.describe_detail(&query) {
            Ok(detail) => writeln!(output, "{}", detail)?,
            Err(not_found) => writeln!(output, "{}", not_found)?,
        }

        Ok(())
    }
}

fn write_menu<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "1. Load Data Structure.")?;
    writeln!(output, "2. Print Course List.")?;
    writeln!(output, "3. Print Course.")?;
    writeln!(output, "9. Exit")?;
    writeln!(output)?;
    write!(output, "What would you like to do? ")?;
    output.flush()?;
    Ok(())
}

/// One line without its terminator, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}
