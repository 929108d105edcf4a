use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::timetable::{CLASS_STANDARDS, Day, Entry, LunchBreak};

/// Payload of the "Add Class" form, one field per input. Values arrive as
/// the user typed or selected them; conversion into an [`Entry`] validates
/// and normalizes them.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ClassEntryForm {
    pub day: String,
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
    pub class_standard: String,
}

/// Payload of the "Add Lunch Break" form.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LunchBreakForm {
    pub start_time: String,
    pub end_time: String,
    pub apply_to_all_days: bool,
    pub custom_days: Vec<String>,
}

impl Default for LunchBreakForm {
    fn default() -> Self {
        Self {
            start_time: String::new(),
            end_time: String::new(),
            apply_to_all_days: true,
            custom_days: Vec::new(),
        }
    }
}

/// Parse a wall-clock field and re-format it as `HH:MM`, so that slot
/// labels compare equal regardless of how the time was typed.
fn normalize_time(field: &str, raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(format!("Missing {field}"));
    }

    let time = NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|e| format!("Invalid {field} '{raw}': {e}"))?;

    Ok(time.format("%H:%M").to_string())
}

fn require(field: &str, raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("Missing {field}"));
    }
    Ok(trimmed.to_string())
}

impl TryFrom<ClassEntryForm> for Entry {
    type Error = String;

    fn try_from(form: ClassEntryForm) -> Result<Self, Self::Error> {
        let day = form.day.parse::<Day>()?;
        let subject = require("subject", &form.subject)?;
        let start_time = normalize_time("start time", &form.start_time)?;
        let end_time = normalize_time("end time", &form.end_time)?;

        let class_standard = require("class standard", &form.class_standard)?;
        if !CLASS_STANDARDS.contains(&class_standard.as_str()) {
            return Err(format!("Unknown class standard '{class_standard}'"));
        }

        Ok(Entry {
            day,
            subject,
            start_time,
            end_time,
            class_standard,
            // Stamped by the service from the selected student class.
            student_class: String::new(),
        })
    }
}

impl TryFrom<LunchBreakForm> for LunchBreak {
    type Error = String;

    fn try_from(form: LunchBreakForm) -> Result<Self, Self::Error> {
        let start_time = normalize_time("start time", &form.start_time)?;
        let end_time = normalize_time("end time", &form.end_time)?;

        let mut custom_days = Vec::new();
        for raw in &form.custom_days {
            let day = raw.parse::<Day>()?;
            if !custom_days.contains(&day) {
                custom_days.push(day);
            }
        }

        Ok(LunchBreak {
            start_time,
            end_time,
            apply_to_all_days: form.apply_to_all_days,
            custom_days,
        })
    }
}
