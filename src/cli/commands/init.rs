//! Initialize command.

use console::style;

use crate::config::Settings;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    if settings.database_url.is_none() {
        settings.ensure_directories()?;
    }

    let ctx = settings.create_db_context()?;
    let applied = ctx.init_schema().await?;

    if applied.is_empty() {
        println!("{} Schema already up to date", style("✓").green());
    } else {
        for name in &applied {
            println!("  {} Applied migration {}", style("✓").green(), name);
        }
    }

    let version = ctx.get_schema_version().await?;
    println!(
        "{} Initialized dbrsettings at {} (schema version {})",
        style("✓").green(),
        settings.database_url(),
        version.as_deref().unwrap_or("unknown")
    );

    Ok(())
}
