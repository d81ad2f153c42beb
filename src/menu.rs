//! Interactive menu
//!
//! A plain read-dispatch loop over any `BufRead`/`Write` pair. Every action
//! runs against each configured [`Target`] in turn; a failure on one target
//! is reported and the loop carries on. Only I/O errors on the menu's own
//! input or output end the loop with an error.

use crate::backup::{self, BackupOutcome, OverrideFiles, ResetOutcome};
use crate::catalog::Catalog;
use crate::update::{check_for_update, UpdateStatus, VersionSource};
use crate::writer;
use std::io::{self, BufRead, Write};

/// An override file the menu operates on
#[derive(Debug, Clone)]
pub struct Target {
    /// Shown in messages, usually the profile directory
    pub label: String,
    pub files: OverrideFiles,
}

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Apply,
    Backup,
    Restore,
    Reset,
    CheckUpdate,
    Quit,
}

pub fn parse_main_choice(input: &str) -> Option<MainChoice> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" => Some(MainChoice::Apply),
        "2" => Some(MainChoice::Backup),
        "3" => Some(MainChoice::Restore),
        "4" => Some(MainChoice::Reset),
        "5" => Some(MainChoice::CheckUpdate),
        "q" | "quit" | "exit" => Some(MainChoice::Quit),
        _ => None,
    }
}

/// Answer to the category prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    All,
    Back,
    /// 0-based indices, duplicates removed, in the order typed
    Indices(Vec<usize>),
}

/// Why a category prompt answer was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Invalid input. Please enter numbers separated by commas (got '{0}').")]
    NotANumber(String),
    #[error("Invalid selection. Please choose valid category numbers (got {0}).")]
    OutOfRange(usize),
}

/// Parse `"1, 3"`, `"0"` (all) or `"b"` (back) against `count` categories
pub fn parse_category_selection(
    input: &str,
    count: usize,
) -> std::result::Result<CategorySelection, SelectionError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("b") {
        return Ok(CategorySelection::Back);
    }
    if input == "0" {
        return Ok(CategorySelection::All);
    }

    let mut indices = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        let n: usize = part
            .parse()
            .map_err(|_| SelectionError::NotANumber(part.to_string()))?;
        if n == 0 || n > count {
            return Err(SelectionError::OutOfRange(n));
        }
        if !indices.contains(&(n - 1)) {
            indices.push(n - 1);
        }
    }
    Ok(CategorySelection::Indices(indices))
}

pub struct Menu<'a, R, W> {
    input: R,
    output: W,
    catalog: Catalog,
    targets: Vec<Target>,
    updates: &'a dyn VersionSource,
    local_version: String,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        catalog: Catalog,
        targets: Vec<Target>,
        updates: &'a dyn VersionSource,
    ) -> Self {
        Self {
            input,
            output,
            catalog,
            targets,
            updates,
            local_version: crate::update::VERSION.to_string(),
        }
    }

    /// Compare against this version instead of the crate's own
    pub fn with_local_version(mut self, version: impl Into<String>) -> Self {
        self.local_version = version.into();
        self
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        self.banner()?;
        loop {
            self.main_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            match parse_main_choice(&line) {
                Some(MainChoice::Apply) => self.apply()?,
                Some(MainChoice::Backup) => self.backup()?,
                Some(MainChoice::Restore) => self.restore()?,
                Some(MainChoice::Reset) => self.reset()?,
                Some(MainChoice::CheckUpdate) => self.check_update()?,
                Some(MainChoice::Quit) => break,
                None => writeln!(self.output, "Invalid choice. Please select a valid option.")?,
            }
        }
        writeln!(self.output, "Exiting Firefox Optimizer.")?;
        self.output.flush()
    }

    /// Give back the output sink, mostly for inspecting it in tests
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn banner(&mut self) -> io::Result<()> {
        writeln!(self.output, "=============================================")?;
        writeln!(self.output, "           Firefox Optimizer v{}", self.local_version)?;
        writeln!(self.output, "     Firefox Security & Privacy Optimizer")?;
        writeln!(self.output, "=============================================")
    }

    fn main_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Please select an option:")?;
        writeln!(self.output, "1. Apply optimization settings")?;
        writeln!(self.output, "2. Backup current settings")?;
        writeln!(self.output, "3. Restore settings from backup")?;
        writeln!(self.output, "4. Reset to default settings")?;
        writeln!(self.output, "5. Check for updates")?;
        writeln!(self.output, "q. Quit")?;
        write!(self.output, "\nEnter your choice: ")
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{} (y/n): ", question)?;
        Ok(self
            .read_line()?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
    }

    /// Prompt until the selection is valid; `None` means go back
    fn choose_categories(&mut self) -> io::Result<Option<Vec<&'static str>>> {
        let names = self.catalog.category_names();
        loop {
            writeln!(self.output, "\nOptimization Categories:")?;
            for (idx, name) in names.iter().enumerate() {
                let count = self.catalog.entries_for(name).map(|e| e.len()).unwrap_or(0);
                writeln!(self.output, "{}. {} ({} settings)", idx + 1, name, count)?;
            }
            writeln!(self.output, "\n0. Apply all categories")?;
            writeln!(self.output, "b. Go back to main menu")?;
            write!(
                self.output,
                "\nEnter the numbers of the categories to apply (comma-separated), 0 for all, or 'b' to go back: "
            )?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match parse_category_selection(&line, names.len()) {
                Ok(CategorySelection::Back) => return Ok(None),
                Ok(CategorySelection::All) => return Ok(Some(names)),
                Ok(CategorySelection::Indices(indices)) => match self.catalog.select(&indices) {
                    Ok(selected) => return Ok(Some(selected)),
                    Err(e) => writeln!(self.output, "{}", e)?,
                },
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn apply(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "\nNote: settings are appended to user.js. A backup of the current file is saved as user.js.backup."
        )?;
        if !self.confirm("Do you want to continue?")? {
            return Ok(());
        }

        let Some(selected) = self.choose_categories()? else {
            return Ok(());
        };

        for target in &self.targets {
            writeln!(self.output, "\nApplying settings to profile: {}", target.label)?;
            match writer::apply(&self.catalog, &selected, &target.files.user_js) {
                Ok(report) => {
                    if report.backup == BackupOutcome::Created {
                        writeln!(self.output, "Existing user.js backed up to user.js.backup")?;
                    }
                    writeln!(
                        self.output,
                        "{} settings written, {} already in place",
                        report.written, report.skipped
                    )?;
                    match writer::verify(&target.files.user_js, &report.requested) {
                        Ok(missing) if missing.is_empty() => writeln!(
                            self.output,
                            "All selected settings have been successfully applied and verified."
                        )?,
                        Ok(missing) => {
                            writeln!(self.output, "The following settings were not applied correctly:")?;
                            for setting in missing {
                                writeln!(self.output, "  {}", setting.directive())?;
                            }
                        }
                        Err(e) => writeln!(self.output, "Could not verify {}: {}", target.label, e)?,
                    }
                }
                Err(e) => writeln!(self.output, "Failed to apply settings to {}: {}", target.label, e)?,
            }
        }
        Ok(())
    }

    fn backup(&mut self) -> io::Result<()> {
        for target in &self.targets {
            match backup::backup(&target.files.user_js, &target.files.backup) {
                Ok(BackupOutcome::Created) => {
                    writeln!(self.output, "Backup created for profile: {}", target.label)?
                }
                Ok(BackupOutcome::NothingToBackup) => {
                    writeln!(self.output, "No user.js file found in profile: {}", target.label)?
                }
                Err(e) => writeln!(
                    self.output,
                    "Failed to create backup for profile {}: {}",
                    target.label, e
                )?,
            }
        }
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        for target in &self.targets {
            match backup::restore(&target.files.backup, &target.files.user_js) {
                Ok(()) => writeln!(
                    self.output,
                    "Settings restored from backup for profile: {}",
                    target.label
                )?,
                Err(e) => writeln!(
                    self.output,
                    "Failed to restore settings for profile {}: {}",
                    target.label, e
                )?,
            }
        }
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        for target in &self.targets {
            match backup::reset(&target.files.user_js) {
                Ok(ResetOutcome::Removed) => writeln!(
                    self.output,
                    "user.js removed, settings reset to default for profile: {}",
                    target.label
                )?,
                Ok(ResetOutcome::NotPresent) => writeln!(
                    self.output,
                    "No user.js file to remove in profile: {}",
                    target.label
                )?,
                Err(e) => writeln!(
                    self.output,
                    "Failed to reset settings for profile {}: {}",
                    target.label, e
                )?,
            }
        }
        Ok(())
    }

    fn check_update(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nChecking for updates...")?;
        match check_for_update(self.updates, &self.local_version) {
            UpdateStatus::UpToDate => writeln!(
                self.output,
                "You are using the latest version of Firefox Optimizer."
            ),
            UpdateStatus::UpdateAvailable(version) => {
                writeln!(self.output, "A new version ({}) is available.", version)
            }
            UpdateStatus::CheckFailed(reason) => {
                writeln!(self.output, "Failed to check for updates: {}", reason)
            }
        }
    }
}
