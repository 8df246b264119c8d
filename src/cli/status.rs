use super::ui;
use crate::core::RateDocument;
use crate::core::config::AppConfig;
use anyhow::Result;
use comfy_table::Cell;
use std::path::Path;

impl RateDocument {
    pub fn display_status(&self, path: &Path) -> String {
        let mut table = ui::new_styled_table();

        table.add_row(vec![
            ui::label_cell("File"),
            Cell::new(path.display().to_string()),
        ]);
        table.add_row(vec![
            ui::label_cell("Updated"),
            ui::format_optional_cell(self.update_time(), str::to_string),
        ]);
        table.add_row(vec![
            ui::label_cell("Provider timestamp"),
            ui::format_optional_cell(self.provider_updated_at(), str::to_string),
        ]);
        table.add_row(vec![
            ui::label_cell("Currencies"),
            Cell::new(self.currency_count()),
        ]);

        format!(
            "{}\n\n{}",
            ui::style_text("Exchange rates", ui::StyleType::Title),
            table
        )
    }
}

/// Prints what the destination file currently holds.
pub fn run(config: &AppConfig) -> Result<()> {
    let path = config.output_path();
    let document = RateDocument::load(&path)?;
    println!("{}", document.display_status(&path));
    Ok(())
}
