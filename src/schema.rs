// Manually maintained to match the cetane migrations in src/migrations.
// Column names keep the PascalCase spelling the ingestion engine reads.

diesel::table! {
    dbrsettings (id) {
        #[sql_name = "Id"]
        id -> BigInt,
        #[sql_name = "System"]
        system -> Text,
        #[sql_name = "Domain"]
        domain -> Text,
        #[sql_name = "SourceType"]
        source_type -> Text,
        #[sql_name = "SourceSettings"]
        source_settings -> Text,
        #[sql_name = "CopyQueries"]
        copy_queries -> Text,
        #[sql_name = "CopySettings"]
        copy_settings -> Text,
        #[sql_name = "SinkSettings"]
        sink_settings -> Text,
        #[sql_name = "DataLoadingBehavior"]
        data_loading_behavior -> Text,
        #[sql_name = "EntityType"]
        entity_type -> Text,
        #[sql_name = "CopyEnabled"]
        copy_enabled -> Bool,
        #[sql_name = "LastIncrementalUpdate"]
        last_incremental_update -> Text,
        #[sql_name = "LoadMark"]
        load_mark -> Bool,
        #[sql_name = "ParseColumns"]
        parse_columns -> Text,
        #[sql_name = "UserDefineFunctions"]
        user_define_functions -> Text,
        #[sql_name = "LastIngestionDate"]
        last_ingestion_date -> Text,
        #[sql_name = "StatusIngestion"]
        status_ingestion -> Bool,
        #[sql_name = "LoadPurge"]
        load_purge -> Bool,
        #[sql_name = "LastIngestionDatePurge"]
        last_ingestion_date_purge -> Text,
    }
}
