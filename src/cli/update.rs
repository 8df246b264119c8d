use super::ui;
use crate::core::config::AppConfig;
use crate::updater;
use anyhow::Result;

pub async fn run(config: &AppConfig) -> Result<()> {
    let spinner = ui::new_spinner("Fetching latest exchange rates...");
    let result = updater::run_update(config).await;
    spinner.finish_and_clear();

    let document = result?;
    println!(
        "{} {} currencies written to {} {}",
        ui::style_text("Updated", ui::StyleType::Success),
        document.currency_count(),
        config.output_path().display(),
        ui::style_text(
            &format!("({})", document.update_time().unwrap_or_default()),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
