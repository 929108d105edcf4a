use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display order of the school week. There is no Sunday column.
pub const DAYS_OF_WEEK: [Day; 6] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
];

/// Class standards offered in the student-class selector.
pub const CLASS_STANDARDS: [&str; 13] = [
    "Nursery", "LKG", "UKG", "CLASS-1", "CLASS-2", "CLASS-3", "CLASS-4", "CLASS-5", "CLASS-6",
    "CLASS-7", "CLASS-8", "CLASS-9", "CLASS-10",
];

/// Marker text shown in a cell covered by the lunch break.
pub const LUNCH_MARKER: &str = "Lunch Break";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DAYS_OF_WEEK
            .iter()
            .copied()
            .find(|day| day.as_str() == trimmed)
            .ok_or_else(|| format!("Unknown day '{s}'"))
    }
}

/// The `"<start> - <end>"` string identifying a table column.
pub fn slot_label(start_time: &str, end_time: &str) -> String {
    format!("{start_time} - {end_time}")
}

/// One scheduled class occupying a day and time slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub day: Day,
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
    pub class_standard: String,
    pub student_class: String,
}

impl Entry {
    pub fn slot_label(&self) -> String {
        slot_label(&self.start_time, &self.end_time)
    }
}

/// A single configurable non-class interval, applied to all days or a
/// custom subset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LunchBreak {
    pub start_time: String,
    pub end_time: String,
    pub apply_to_all_days: bool,
    pub custom_days: Vec<Day>,
}

impl Default for LunchBreak {
    fn default() -> Self {
        Self {
            start_time: String::new(),
            end_time: String::new(),
            apply_to_all_days: true,
            custom_days: Vec::new(),
        }
    }
}

impl LunchBreak {
    pub fn slot_label(&self) -> String {
        slot_label(&self.start_time, &self.end_time)
    }

    /// Whether this lunch break covers the given day/slot cell.
    pub fn applies_to(&self, day: Day, slot: &str) -> bool {
        if slot != self.slot_label() {
            return false;
        }
        self.apply_to_all_days || self.custom_days.contains(&day)
    }
}

/// Content of one derived grid cell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Subject(String),
    Lunch,
    Empty,
}

impl CellContent {
    pub fn render(&self) -> &str {
        match self {
            CellContent::Subject(subject) => subject,
            CellContent::Lunch => LUNCH_MARKER,
            CellContent::Empty => "",
        }
    }
}

/// The derived day × time-slot mapping used for both display and export.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub slots: Vec<String>,
    pub rows: Vec<GridRow>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub day: Day,
    pub cells: Vec<CellContent>,
}

/// Header and body arrays handed to the document-table writer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Accumulated schedule state: the entry list, the ordered sequence of
/// distinct time-slot labels, and the lunch-break value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Timetable {
    entries: Vec<Entry>,
    slots: Vec<String>,
    lunch: LunchBreak,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Distinct slot labels in first-occurrence order.
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn lunch_break(&self) -> &LunchBreak {
        &self.lunch
    }

    /// Append an entry, registering its slot label on first occurrence.
    ///
    /// Duplicate (day, slot) entries are allowed: `derive_grid` shows the
    /// first one added, `delete_entry` removes them all.
    pub fn add_entry(&mut self, entry: Entry) {
        let label = entry.slot_label();
        if !self.slots.contains(&label) {
            self.slots.push(label);
        }
        self.entries.push(entry);
    }

    /// Replace the lunch break wholesale. The new label joins the slot
    /// sequence on first occurrence; a label registered by an earlier
    /// lunch break stays in the sequence.
    pub fn set_lunch_break(&mut self, lunch: LunchBreak) {
        let label = lunch.slot_label();
        if !self.slots.contains(&label) {
            self.slots.push(label);
        }
        self.lunch = lunch;
    }

    /// Remove every entry matching the (day, slot label) pair. Silent
    /// no-op when nothing matches.
    pub fn delete_entry(&mut self, day: Day, slot_label: &str) {
        self.entries
            .retain(|entry| !(entry.day == day && entry.slot_label() == slot_label));
    }

    /// Derive the day × slot grid. Pure: the same grid feeds the on-screen
    /// table and the exported document.
    pub fn derive_grid(&self) -> Grid {
        let rows = DAYS_OF_WEEK
            .iter()
            .map(|&day| {
                let cells = self
                    .slots
                    .iter()
                    .map(|slot| {
                        let entry = self
                            .entries
                            .iter()
                            .find(|entry| entry.day == day && entry.slot_label() == *slot);
                        match entry {
                            Some(entry) => CellContent::Subject(entry.subject.clone()),
                            None if self.lunch.applies_to(day, slot) => CellContent::Lunch,
                            None => CellContent::Empty,
                        }
                    })
                    .collect();
                GridRow { day, cells }
            })
            .collect();

        Grid {
            slots: self.slots.clone(),
            rows,
        }
    }

    /// Render the derived grid into header/row string arrays, one row per
    /// day with the day name in the leading column.
    pub fn export_table(&self) -> TableData {
        let grid = self.derive_grid();

        let mut header = Vec::with_capacity(grid.slots.len() + 1);
        header.push("Day".to_string());
        header.extend(grid.slots.iter().cloned());

        let rows = grid
            .rows
            .iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(row.cells.len() + 1);
                cells.push(row.day.to_string());
                cells.extend(row.cells.iter().map(|cell| cell.render().to_string()));
                cells
            })
            .collect();

        TableData { header, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: Day, subject: &str, start: &str, end: &str) -> Entry {
        Entry {
            day,
            subject: subject.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            class_standard: "CLASS-5".to_string(),
            student_class: "CLASS-5".to_string(),
        }
    }

    fn lunch(start: &str, end: &str, all_days: bool, custom: &[Day]) -> LunchBreak {
        LunchBreak {
            start_time: start.to_string(),
            end_time: end.to_string(),
            apply_to_all_days: all_days,
            custom_days: custom.to_vec(),
        }
    }

    fn cell<'a>(grid: &'a Grid, day: Day, slot: &str) -> &'a CellContent {
        let col = grid.slots.iter().position(|s| s == slot).expect("slot");
        let row = grid.rows.iter().find(|row| row.day == day).expect("day");
        &row.cells[col]
    }

    #[test]
    fn slot_labels_are_distinct_and_insertion_ordered() {
        let mut timetable = Timetable::new();
        timetable.add_entry(entry(Day::Monday, "Math", "09:00", "10:00"));
        timetable.add_entry(entry(Day::Tuesday, "English", "10:00", "11:00"));
        timetable.add_entry(entry(Day::Wednesday, "Physics", "09:00", "10:00"));

        assert_eq!(timetable.slots(), ["09:00 - 10:00", "10:00 - 11:00"]);
    }

    #[test]
    fn derive_grid_is_pure() {
        let mut timetable = Timetable::new();
        timetable.add_entry(entry(Day::Monday, "Math", "09:00", "10:00"));
        timetable.set_lunch_break(lunch("12:00", "13:00", true, &[]));

        assert_eq!(timetable.derive_grid(), timetable.derive_grid());
    }

    #[test]
    fn set_lunch_break_is_idempotent_on_slot_membership() {
        let mut timetable = Timetable::new();
        timetable.set_lunch_break(lunch("12:00", "13:00", true, &[]));
        timetable.set_lunch_break(lunch("12:00", "13:00", true, &[]));

        assert_eq!(timetable.slots(), ["12:00 - 13:00"]);
    }

    #[test]
    fn delete_removes_all_matching_entries_and_none_others() {
        let mut timetable = Timetable::new();
        timetable.add_entry(entry(Day::Monday, "Math", "09:00", "10:00"));
        timetable.add_entry(entry(Day::Monday, "Physics", "09:00", "10:00"));
        timetable.add_entry(entry(Day::Tuesday, "Math", "09:00", "10:00"));

        timetable.delete_entry(Day::Monday, "09:00 - 10:00");

        assert_eq!(timetable.entries().len(), 1);
        assert_eq!(timetable.entries()[0].day, Day::Tuesday);
        // The label stays registered even with no entry left under it.
        assert_eq!(timetable.slots(), ["09:00 - 10:00"]);
    }

    #[test]
    fn delete_of_unknown_cell_is_a_no_op() {
        let mut timetable = Timetable::new();
        timetable.add_entry(entry(Day::Monday, "Math", "09:00", "10:00"));

        timetable.delete_entry(Day::Friday, "09:00 - 10:00");
        timetable.delete_entry(Day::Monday, "11:00 - 12:00");

        assert_eq!(timetable.entries().len(), 1);
    }

    #[test]
    fn custom_day_lunch_marks_only_listed_days() {
        let mut timetable = Timetable::new();
        timetable.set_lunch_break(lunch("12:00", "13:00", false, &[Day::Monday]));

        let grid = timetable.derive_grid();
        assert_eq!(*cell(&grid, Day::Monday, "12:00 - 13:00"), CellContent::Lunch);
        for day in DAYS_OF_WEEK.iter().skip(1) {
            assert_eq!(*cell(&grid, *day, "12:00 - 13:00"), CellContent::Empty);
        }
    }

    #[test]
    fn entry_wins_over_lunch_in_a_contested_cell() {
        let mut timetable = Timetable::new();
        timetable.set_lunch_break(lunch("12:00", "13:00", true, &[]));
        timetable.add_entry(entry(Day::Monday, "Math", "12:00", "13:00"));

        let grid = timetable.derive_grid();
        assert_eq!(
            *cell(&grid, Day::Monday, "12:00 - 13:00"),
            CellContent::Subject("Math".to_string())
        );
        assert_eq!(*cell(&grid, Day::Tuesday, "12:00 - 13:00"), CellContent::Lunch);
    }

    #[test]
    fn duplicate_cell_shows_the_first_added_entry() {
        let mut timetable = Timetable::new();
        timetable.add_entry(entry(Day::Monday, "Math", "09:00", "10:00"));
        timetable.add_entry(entry(Day::Monday, "Physics", "09:00", "10:00"));

        let grid = timetable.derive_grid();
        assert_eq!(
            *cell(&grid, Day::Monday, "09:00 - 10:00"),
            CellContent::Subject("Math".to_string())
        );
    }

    #[test]
    fn replacing_the_lunch_break_keeps_the_old_label_as_a_plain_slot() {
        let mut timetable = Timetable::new();
        timetable.set_lunch_break(lunch("12:00", "13:00", true, &[]));
        timetable.set_lunch_break(lunch("13:00", "14:00", true, &[]));

        assert_eq!(timetable.slots(), ["12:00 - 13:00", "13:00 - 14:00"]);

        let grid = timetable.derive_grid();
        assert_eq!(*cell(&grid, Day::Monday, "12:00 - 13:00"), CellContent::Empty);
        assert_eq!(*cell(&grid, Day::Monday, "13:00 - 14:00"), CellContent::Lunch);
    }

    #[test]
    fn monday_math_scenario_renders_one_subject_cell() {
        let mut timetable = Timetable::new();
        timetable.add_entry(entry(Day::Monday, "Math", "09:00", "10:00"));

        let table = timetable.export_table();
        assert_eq!(table.header, ["Day", "09:00 - 10:00"]);
        assert_eq!(table.rows[0], ["Monday", "Math"]);
        for row in &table.rows[1..] {
            assert_eq!(row[1], "");
        }
    }

    #[test]
    fn export_table_matches_the_derived_grid() {
        let mut timetable = Timetable::new();
        timetable.add_entry(entry(Day::Monday, "Math", "09:00", "10:00"));
        timetable.set_lunch_break(lunch("12:00", "13:00", true, &[]));

        let grid = timetable.derive_grid();
        let table = timetable.export_table();

        assert_eq!(table.rows.len(), DAYS_OF_WEEK.len());
        for (grid_row, table_row) in grid.rows.iter().zip(&table.rows) {
            assert_eq!(table_row[0], grid_row.day.to_string());
            for (cell, rendered) in grid_row.cells.iter().zip(&table_row[1..]) {
                assert_eq!(rendered, cell.render());
            }
        }
    }

    #[test]
    fn grid_serializes_for_rendering_collaborators() {
        let mut timetable = Timetable::new();
        timetable.add_entry(entry(Day::Monday, "Math", "09:00", "10:00"));

        let json = serde_json::to_value(timetable.derive_grid()).unwrap();
        assert_eq!(json["slots"][0], "09:00 - 10:00");
        assert_eq!(json["rows"][0]["day"], "Monday");
        assert_eq!(json["rows"][0]["cells"][0]["Subject"], "Math");
        assert_eq!(json["rows"][1]["cells"][0], "Empty");
    }

    #[test]
    fn day_parses_from_form_strings() {
        assert_eq!("Monday".parse::<Day>(), Ok(Day::Monday));
        assert_eq!(" Saturday ".parse::<Day>(), Ok(Day::Saturday));
        assert!("Sunday".parse::<Day>().is_err());
    }
}
