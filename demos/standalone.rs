use tracing::info;

use timetable_util::{
    ClassEntryForm, Day, LunchBreakForm, TimetableConfig, TimetableService,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting timetable builder example");

    // In a real app, the form values below come from user input.
    let mut service = TimetableService::new(TimetableConfig::default());
    service.set_student_class("CLASS-5")?;

    for (day, subject, start, end) in [
        ("Monday", "Math", "09:00", "10:00"),
        ("Monday", "English", "10:00", "11:00"),
        ("Tuesday", "Physics", "09:00", "10:00"),
        ("Wednesday", "Art", "10:00", "11:00"),
    ] {
        service.add_class(ClassEntryForm {
            day: day.to_string(),
            subject: subject.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            class_standard: "CLASS-5".to_string(),
        })?;
    }

    // Lunch on every day except Saturday.
    service.set_lunch_break(LunchBreakForm {
        start_time: "12:00".to_string(),
        end_time: "12:30".to_string(),
        apply_to_all_days: false,
        custom_days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
            .iter()
            .map(|day| day.to_string())
            .collect(),
    })?;

    // Second thoughts about the Wednesday art class.
    service.delete_entry("Wednesday".parse::<Day>()?, "10:00 - 11:00");

    // Print the derived grid the way the on-screen table shows it.
    let grid = service.derive_grid();
    println!("{:<12} {}", "", grid.slots.join("  |  "));
    for row in &grid.rows {
        let cells: Vec<&str> = row.cells.iter().map(|cell| cell.render()).collect();
        println!("{:<12} {}", row.day.as_str(), cells.join("  |  "));
    }

    let path = service.export_pdf()?;
    println!("Timetable written to {}", path.display());

    Ok(())
}
