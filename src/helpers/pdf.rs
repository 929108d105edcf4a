use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tracing::info;

use crate::models::timetable::TableData;

// A4 in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;

const MARGIN: f32 = 40.0;
const ROW_HEIGHT: f32 = 26.0;
const CELL_PADDING: f32 = 4.0;
const TITLE_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 9.0;

// The page rotates to landscape once the slot columns would get too
// narrow in portrait.
const MAX_PORTRAIT_COLUMNS: usize = 6;

fn real(value: f32) -> Object {
    Object::Real(value as _)
}

fn text_ops(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), real(size)]));
    ops.push(Operation::new("Td", vec![real(x), real(y)]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

// Helvetica runs at roughly half the font size per glyph; clip with a
// trailing ellipsis when a value cannot fit its column.
fn fit_cell(text: &str, col_width: f32, size: f32) -> String {
    let max_chars = ((col_width - 2.0 * CELL_PADDING) / (size * 0.55)) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    format!("{kept}..")
}

/// Render the timetable into a single-page PDF document and return its
/// bytes. The layout mirrors the on-screen table: a title line, a shaded
/// header row of slot labels, and one row per day.
pub fn create_timetable_pdf(title: &str, table: &TableData) -> Result<Vec<u8>> {
    let columns = table.header.len().max(1);
    let (page_width, page_height) = if columns > MAX_PORTRAIT_COLUMNS {
        (PAGE_HEIGHT, PAGE_WIDTH)
    } else {
        (PAGE_WIDTH, PAGE_HEIGHT)
    };

    info!(
        "Rendering timetable PDF with {} column(s) and {} day row(s)",
        table.header.len(),
        table.rows.len()
    );

    let table_width = page_width - 2.0 * MARGIN;
    let col_width = table_width / columns as f32;
    let table_top = page_height - MARGIN - TITLE_SIZE - 10.0;
    let table_height = ROW_HEIGHT * (table.rows.len() + 1) as f32;

    let mut ops = Vec::new();

    // Title line above the table.
    text_ops(
        &mut ops,
        "F2",
        TITLE_SIZE,
        MARGIN,
        page_height - MARGIN,
        title,
    );

    // Header row background.
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("rg", vec![real(0.85), real(0.85), real(0.85)]));
    ops.push(Operation::new(
        "re",
        vec![
            real(MARGIN),
            real(table_top - ROW_HEIGHT),
            real(table_width),
            real(ROW_HEIGHT),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));

    // Cell borders.
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("w", vec![real(0.75)]));
    ops.push(Operation::new("RG", vec![real(0.4), real(0.4), real(0.4)]));
    for i in 0..=table.rows.len() + 1 {
        let y = table_top - ROW_HEIGHT * i as f32;
        ops.push(Operation::new("m", vec![real(MARGIN), real(y)]));
        ops.push(Operation::new(
            "l",
            vec![real(MARGIN + table_width), real(y)],
        ));
    }
    for i in 0..=columns {
        let x = MARGIN + col_width * i as f32;
        ops.push(Operation::new("m", vec![real(x), real(table_top)]));
        ops.push(Operation::new(
            "l",
            vec![real(x), real(table_top - table_height)],
        ));
    }
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));

    // Header labels, then the day rows. Text sits a few points above each
    // row's bottom rule.
    for (col, label) in table.header.iter().enumerate() {
        text_ops(
            &mut ops,
            "F2",
            HEADER_SIZE,
            MARGIN + col_width * col as f32 + CELL_PADDING,
            table_top - ROW_HEIGHT + 9.0,
            &fit_cell(label, col_width, HEADER_SIZE),
        );
    }
    for (row_index, row) in table.rows.iter().enumerate() {
        let y = table_top - ROW_HEIGHT * (row_index + 2) as f32 + 9.0;
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            text_ops(
                &mut ops,
                "F1",
                BODY_SIZE,
                MARGIN + col_width * col as f32 + CELL_PADDING,
                y,
                &fit_cell(value, col_width, BODY_SIZE),
            );
        }
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
            "F2" => bold_font_id,
        },
    });

    let content = Content { operations: ops };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().context("failed to encode page content")?,
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![real(0.0), real(0.0), real(page_width), real(page_height)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .context("failed to serialize timetable PDF")?;

    info!(
        "Successfully converted PDF to bytes, size: {} bytes",
        buffer.len()
    );

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> TableData {
        TableData {
            header: vec!["Day".to_string(), "09:00 - 10:00".to_string()],
            rows: vec![
                vec!["Monday".to_string(), "Math".to_string()],
                vec!["Tuesday".to_string(), String::new()],
            ],
        }
    }

    #[test]
    fn rendered_document_parses_back_with_one_page() {
        let bytes = create_timetable_pdf("Class: CLASS-5", &sample_table()).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn title_and_cell_values_land_in_the_content_stream() {
        let bytes = create_timetable_pdf("Class: CLASS-5", &sample_table()).unwrap();
        let raw = String::from_utf8_lossy(&bytes);

        assert!(raw.contains("(Class: CLASS-5)"));
        assert!(raw.contains("(Math)"));
        assert!(raw.contains("(Monday)"));
    }

    #[test]
    fn long_values_are_clipped_to_their_column() {
        let long = "A very long subject name indeed";
        let clipped = fit_cell(long, 60.0, BODY_SIZE);
        assert!(clipped.ends_with(".."));
        assert!(clipped.len() < long.len());

        assert_eq!(fit_cell("Math", 60.0, BODY_SIZE), "Math");
    }
}
