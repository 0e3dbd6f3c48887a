//! Interactive prompt loop: pick a transcript, choose a mode, review the
//! exemption list, then print the GPA until the user is done.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use gpa_calculator::exemption::{ExemptionEdit, ExemptionStore};
use gpa_calculator::gpa::{Mode, format_semester_label};
use gpa_calculator::output::GpaReport;
use gpa_calculator::transcript::{AcademicRecord, load_transcript, normalize, strip_path_quotes};
use tracing::{info, warn};

const BANNER: &str = "\
==============================
        GPA CALCULATOR
==============================";

pub struct Session<R, W> {
    input: R,
    output: W,
    store: ExemptionStore,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, store: ExemptionStore) -> Self {
        Self {
            input,
            output,
            store,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{BANNER}")?;
        let (source, records) = self.open_transcript()?;

        loop {
            let mode = self.choose_mode()?;
            let semester = match mode {
                Mode::OneSemester => Some(self.select_semester()?),
                Mode::Overall => None,
            };
            let exemptions = self.edit_exemptions()?;

            let report = GpaReport::compute(
                &source.display().to_string(),
                &records,
                mode,
                &exemptions,
                semester.as_deref(),
            );
            info!(gpa = ?report.gpa, mode = %mode, semester = ?semester, "GPA calculated");
            writeln!(self.output, "{}", report.display_line())?;

            if !self.ask_again()? {
                break;
            }
            writeln!(self.output)?;
        }
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("Input closed");
        }
        Ok(line.trim().to_string())
    }

    /// Asks for a transcript path until one loads.
    pub fn open_transcript(&mut self) -> Result<(PathBuf, Vec<AcademicRecord>)> {
        loop {
            let answer = self.ask("Please enter the path of your transcript: ")?;
            let path = PathBuf::from(strip_path_quotes(&answer));

            match load_transcript(&path) {
                Ok(table) => return Ok((path, normalize(table))),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Transcript rejected");
                    writeln!(self.output, "Error: {e}")?;
                }
            }
        }
    }

    pub fn choose_mode(&mut self) -> Result<Mode> {
        writeln!(self.output, "There are 2 modes available:\n1 - Overall\n2 - One semester")?;
        loop {
            let answer =
                self.ask("Please choose mode by typing mode name or just a number (1/2): ")?;
            match answer.parse::<Mode>() {
                Ok(mode) => return Ok(mode),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    pub fn select_semester(&mut self) -> Result<String> {
        loop {
            let answer = self.ask("Please enter semester you want to select: ")?;
            match format_semester_label(&answer) {
                Ok(label) => return Ok(label),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    /// Shows the exemption list and applies edits until the user types `ok`.
    /// The resulting list is saved back to the store.
    pub fn edit_exemptions(&mut self) -> Result<Vec<String>> {
        let mut subjects = self.store.load();

        loop {
            writeln!(self.output, "Here is the list of exemption subjects:")?;
            for subject in &subjects {
                writeln!(self.output, "- {subject}")?;
            }

            let action = self.ask(
                "Please type 'add' for adding a subject, or 'remove' for removing a subject, \
                 or 'ok' to proceed: ",
            )?;
            let action = action.to_lowercase();
            if action == "ok" {
                break;
            }
            if action != "add" && action != "remove" {
                writeln!(self.output, "Unknown action '{action}'. Type 'add', 'remove' or 'ok'")?;
                continue;
            }

            let code = self.ask(&format!(
                "Please specify a subject code to {action}: (Just first 3 letters of the code) "
            ))?;
            let edited = ExemptionEdit::parse(&action, &code)
                .and_then(|edit| edit.apply(subjects.clone()));
            match edited {
                Ok(updated) => subjects = updated,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }

        if let Err(e) = self.store.save(&subjects) {
            warn!(error = %e, "Could not save exemption list");
            writeln!(self.output, "Warning: {e:#}")?;
        }
        Ok(subjects)
    }

    fn ask_again(&mut self) -> Result<bool> {
        loop {
            let answer = self.ask("Do you want to calculate again? (Y/N) ")?;
            match answer.chars().next().map(|c| c.to_ascii_uppercase()) {
                Some('N') => return Ok(false),
                Some(_) => return Ok(true),
                None => continue,
            }
        }
    }
}
