//! Weekly Class Timetable Library
//!
//! This library provides functionality for building a weekly class timetable
//! from form submissions, deriving the day/time-slot grid shown on screen,
//! and exporting the same grid as a PDF document.

pub mod helpers;
pub mod models;
pub mod service;

pub use service::{TimetableConfig, TimetableService};

// Re-export key types for convenience
pub use models::forms::{ClassEntryForm, LunchBreakForm};
pub use models::timetable::{
    CellContent, Day, Entry, Grid, GridRow, LunchBreak, TableData, Timetable,
};
