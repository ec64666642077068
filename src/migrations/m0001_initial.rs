use cetane::prelude::*;

pub fn migration() -> Migration {
    Migration::new("0001_initial_schema")
        // Column order is positional for the ingestion engine; keep it fixed.
        .operation(RunSql::portable().for_backend(
            "sqlite",
            r#"CREATE TABLE IF NOT EXISTS dbrsettings (
    Id INTEGER PRIMARY KEY NOT NULL,
    System TEXT NOT NULL,
    Domain TEXT NOT NULL,
    SourceType TEXT NOT NULL,
    SourceSettings TEXT NOT NULL,
    CopyQueries TEXT NOT NULL,
    CopySettings TEXT NOT NULL,
    SinkSettings TEXT NOT NULL,
    DataLoadingBehavior TEXT NOT NULL,
    EntityType TEXT NOT NULL,
    CopyEnabled BOOLEAN NOT NULL DEFAULT 0,
    LastIncrementalUpdate TEXT NOT NULL,
    LoadMark BOOLEAN NOT NULL DEFAULT 0,
    ParseColumns TEXT NOT NULL,
    UserDefineFunctions TEXT NOT NULL,
    LastIngestionDate TEXT NOT NULL,
    StatusIngestion BOOLEAN NOT NULL DEFAULT 0,
    LoadPurge BOOLEAN NOT NULL DEFAULT 0,
    LastIngestionDatePurge TEXT NOT NULL
)"#,
        ))
        .operation(RunSql::portable().for_backend(
            "sqlite",
            "CREATE INDEX IF NOT EXISTS idx_dbrsettings_system ON dbrsettings(System, Domain, SourceType)",
        ))
}
