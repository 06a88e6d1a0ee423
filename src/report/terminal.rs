use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::generator::FixtureSummary;

/// Render a colored terminal summary of the written fixtures.
pub fn render(fixtures: &[FixtureSummary], quiet: bool) -> Result<()> {
    let complete = fixtures
        .iter()
        .filter(|f| f.classification.starts_with("C1_100%"))
        .count();

    if quiet {
        println!(
            "Fixtures: {}  Class 1 complete: {}",
            fixtures.len(),
            complete.to_string().green()
        );
        return Ok(());
    }

    println!("\n {} v{}\n", "mof-fixtures".bold(), env!("CARGO_PKG_VERSION"));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("File").add_attribute(Attribute::Bold),
            Cell::new("Components").add_attribute(Attribute::Bold),
            Cell::new("Globals").add_attribute(Attribute::Bold),
            Cell::new("Classification").add_attribute(Attribute::Bold),
            Cell::new("Flags").add_attribute(Attribute::Bold),
        ]);

    for fixture in fixtures {
        let file = fixture
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| fixture.path.display().to_string());

        table.add_row(vec![
            Cell::new(file),
            Cell::new(fixture.components).set_alignment(CellAlignment::Right),
            Cell::new(fixture.global_licenses).set_alignment(CellAlignment::Right),
            Cell::new(&fixture.classification).fg(classification_color(&fixture.classification)),
            Cell::new(fixture.flags.to_string()),
        ]);
    }

    println!("{}", table);
    println!(
        "\n {} {} fixture(s) written, {} complete for Class 1\n",
        "✓".green(),
        fixtures.len(),
        complete
    );

    Ok(())
}

/// Green when some class is complete, yellow when partially met, grey when empty.
fn classification_color(classification: &str) -> Color {
    if classification.contains("_100%") {
        Color::Green
    } else if classification == "C1_0%-C2_0%-C3_0%" {
        Color::DarkGrey
    } else {
        Color::Yellow
    }
}
