use cetane::prelude::*;

pub fn migration() -> Migration {
    Migration::new("0002_storage_meta")
        .depends_on(&["0001_initial_schema"])
        .operation(
            CreateTable::new("storage_meta")
                .add_field(Field::new("key", FieldType::Text).primary_key())
                .add_field(Field::new("value", FieldType::Text).not_null()),
        )
        .operation(RunSql::portable().for_backend(
            "sqlite",
            "INSERT OR REPLACE INTO storage_meta (key, value) VALUES ('format_version', '2')",
        ))
}
