//! Record listing, display and deletion commands.

use console::style;

use crate::config::Settings;
use crate::models::ConfigRecord;
use crate::store::{ConfigRecordStore, RecordFilter};
use crate::utils::{json_preview, pretty_json};

fn flag(value: bool) -> console::StyledObject<&'static str> {
    if value {
        style("yes").green()
    } else {
        style("no").dim()
    }
}

/// Open the store, refusing to create a missing database file.
fn open_store(settings: &Settings) -> anyhow::Result<ConfigRecordStore> {
    if !settings.database_exists() {
        anyhow::bail!(
            "No database at {}; run `dbrsettings init` first",
            settings.database_path().display()
        );
    }
    let (_, store) = settings.create_store()?;
    Ok(store)
}

/// List records, optionally filtered.
pub async fn cmd_ls(
    settings: &Settings,
    system: Option<&str>,
    domain: Option<&str>,
    source_type: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let store = open_store(settings)?;
    let filter = RecordFilter::new(system, domain, source_type);
    let records = store.list_filtered(&filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{} No records found", style("!").yellow());
        return Ok(());
    }

    println!(
        "{:>6}  {:<16} {:<16} {:<12} {:<5} {:<5} {:<5} {:<5}  {}",
        style("Id").bold(),
        style("System").bold(),
        style("Domain").bold(),
        style("SourceType").bold(),
        style("Copy").bold(),
        style("Mark").bold(),
        style("Ingst").bold(),
        style("Purge").bold(),
        style("SourceSettings").bold(),
    );
    for record in &records {
        println!(
            "{:>6}  {:<16} {:<16} {:<12} {:<5} {:<5} {:<5} {:<5}  {}",
            record.id,
            record.system,
            record.domain,
            record.source_type,
            flag(record.copy_enabled),
            flag(record.load_mark),
            flag(record.status_ingestion),
            flag(record.load_purge),
            style(json_preview(&record.source_settings, 48)).dim(),
        );
    }
    println!("\n{} record(s)", records.len());

    Ok(())
}

fn print_record(record: &ConfigRecord) {
    println!("{} {}", style("Record").bold(), style(record.id).cyan().bold());
    println!("  System:              {}", record.system);
    println!("  Domain:              {}", record.domain);
    println!("  SourceType:          {}", record.source_type);
    println!("  DataLoadingBehavior: {}", record.data_loading_behavior);
    println!("  EntityType:          {}", record.entity_type);
    println!();
    println!("  CopyEnabled:         {}", flag(record.copy_enabled));
    println!("  LoadMark:            {}", flag(record.load_mark));
    println!("  StatusIngestion:     {}", flag(record.status_ingestion));
    println!("  LoadPurge:           {}", flag(record.load_purge));
    println!();
    println!("  LastIncrementalUpdate:  {}", record.last_incremental_update);
    println!("  LastIngestionDate:      {}", record.last_ingestion_date);
    println!("  LastIngestionDatePurge: {}", record.last_ingestion_date_purge);

    for (name, text) in record.json_fields() {
        println!();
        println!("{}", style(name).bold());
        if text.is_empty() {
            println!("  {}", style("(empty)").dim());
        } else {
            for line in pretty_json(text).lines() {
                println!("  {}", line);
            }
        }
    }
}

/// Show one record.
pub async fn cmd_show(settings: &Settings, id: i64) -> anyhow::Result<()> {
    let store = open_store(settings)?;

    match store.get_record(id).await? {
        Some(record) => {
            print_record(&record);
            Ok(())
        }
        None => anyhow::bail!("No record with Id {}", id),
    }
}

/// Delete one record after confirmation.
pub async fn cmd_rm(settings: &Settings, id: i64, yes: bool) -> anyhow::Result<()> {
    let store = open_store(settings)?;

    let Some(record) = store.get_record(id).await? else {
        anyhow::bail!("No record with Id {}", id);
    };

    if !yes {
        println!(
            "{} About to delete record {} ({} / {} / {})",
            style("!").yellow(),
            record.id,
            record.system,
            record.domain,
            record.source_type
        );
        println!("  Re-run with --yes to confirm");
        return Ok(());
    }

    let deleted = store.delete_record(id).await?;
    println!(
        "{} Deleted {} record(s) with Id {}",
        style("✓").green(),
        deleted,
        id
    );
    Ok(())
}
