use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::{
    helpers::pdf::create_timetable_pdf,
    models::{
        forms::{ClassEntryForm, LunchBreakForm},
        timetable::{CLASS_STANDARDS, Day, Entry, Grid, LunchBreak, Timetable},
    },
};

/// File name of the exported document.
pub const EXPORT_FILE_NAME: &str = "timetable.pdf";

/// Configuration for the timetable service
#[derive(Clone, Debug)]
pub struct TimetableConfig {
    pub output_dir: PathBuf,
    pub file_name: String,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

/// The main timetable service that owns the schedule state and handles
/// form submissions, grid derivation, and PDF export
#[derive(Clone, Debug, Default)]
pub struct TimetableService {
    timetable: Timetable,
    student_class: String,
    config: TimetableConfig,
}

impl TimetableService {
    /// Create a new timetable service instance
    pub fn new(config: TimetableConfig) -> Self {
        info!("Creating new TimetableService instance");
        Self {
            timetable: Timetable::new(),
            student_class: String::new(),
            config,
        }
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn student_class(&self) -> &str {
        &self.student_class
    }

    /// Select the student class. Entries added afterwards are stamped with
    /// it, and the exported document carries it in the title line.
    pub fn set_student_class(&mut self, name: &str) -> Result<(), String> {
        let name = name.trim();
        if !CLASS_STANDARDS.contains(&name) {
            return Err(format!("Unknown class '{name}'"));
        }
        info!("Selected student class: {}", name);
        self.student_class = name.to_string();
        Ok(())
    }

    /// Handle an "Add Class" form submission.
    pub fn add_class(&mut self, form: ClassEntryForm) -> Result<(), String> {
        let mut entry = Entry::try_from(form)?;
        entry.student_class = self.student_class.clone();

        info!(
            "Adding {} on {} at {}",
            entry.subject,
            entry.day,
            entry.slot_label()
        );
        self.timetable.add_entry(entry);
        Ok(())
    }

    /// Handle an "Add Lunch Break" form submission.
    pub fn set_lunch_break(&mut self, form: LunchBreakForm) -> Result<(), String> {
        let lunch = LunchBreak::try_from(form)?;

        info!("Setting lunch break at {}", lunch.slot_label());
        self.timetable.set_lunch_break(lunch);
        Ok(())
    }

    /// Handle the delete affordance of one table cell.
    pub fn delete_entry(&mut self, day: Day, slot_label: &str) {
        info!("Deleting entries on {} at {}", day, slot_label);
        self.timetable.delete_entry(day, slot_label);
    }

    pub fn derive_grid(&self) -> Grid {
        self.timetable.derive_grid()
    }

    /// Export the timetable: derive the table, render it, and write the
    /// document into the configured output directory.
    pub fn export_pdf(&self) -> Result<PathBuf> {
        let table = self.timetable.export_table();
        info!(
            "Exporting timetable with {} slot(s) and {} entries",
            self.timetable.slots().len(),
            self.timetable.entries().len()
        );

        let title = format!("Class: {}", self.student_class);
        let bytes = match create_timetable_pdf(&title, &table) {
            Ok(bytes) => {
                info!(
                    "Successfully created timetable PDF, size: {} bytes",
                    bytes.len()
                );
                bytes
            }
            Err(e) => {
                error!("Failed to create timetable PDF: {e:#}");
                return Err(e.context("failed to render timetable PDF"));
            }
        };

        let path = self.config.output_dir.join(&self.config.file_name);
        fs::write(&path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;

        info!("Timetable written to {}", path.display());
        Ok(path)
    }
}
