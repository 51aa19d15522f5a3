//! SQL text for the PostgreSQL sink.

use contact_core::{ColumnType, ContactField, ContactRecord};
use tokio_postgres::types::ToSql;

/// Exact-match existence check against the catalog.
pub const DATABASE_EXISTS_SQL: &str = "SELECT 1 FROM pg_database WHERE datname = $1";

/// Quote an identifier with double quotes, preserving case.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn generate_create_database(database: &str) -> String {
    format!("CREATE DATABASE {}", quote_identifier(database))
}

fn column_definition(field: ContactField) -> String {
    let sql_type = match field.column_type() {
        ColumnType::VarChar { length } => format!("VARCHAR({length})"),
        ColumnType::Date => "DATE".to_string(),
    };
    format!("{} {sql_type} NULL", quote_identifier(field.name()))
}

/// Generate CREATE TABLE statement with one nullable column per contact field.
pub fn generate_create_table(table_name: &str) -> String {
    let columns: Vec<String> = ContactField::ALL
        .iter()
        .map(|f| format!("    {}", column_definition(*f)))
        .collect();
    format!(
        "CREATE TABLE {} (\n{}\n)",
        quote_identifier(table_name),
        columns.join(",\n")
    )
}

/// Generate the single-row INSERT statement with `$n` placeholders.
pub fn generate_insert(table_name: &str) -> String {
    let columns: Vec<String> = ContactField::ALL
        .iter()
        .map(|f| quote_identifier(f.name()))
        .collect();
    let placeholders: Vec<String> = (1..=ContactField::ALL.len())
        .map(|i| format!("${i}"))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table_name),
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Statement parameters for one record, in column order. `None` binds as NULL.
pub fn record_params(record: &ContactRecord) -> [&(dyn ToSql + Sync); 11] {
    [
        &record.first_name,
        &record.last_name,
        &record.date_of_birth,
        &record.email,
        &record.phone,
        &record.street_address_1,
        &record.street_address_2,
        &record.city,
        &record.state_province,
        &record.postal_code,
        &record.country,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table("contact_data_2024_01_01T00_00_00");

        assert!(sql.starts_with("CREATE TABLE \"contact_data_2024_01_01T00_00_00\" ("));
        assert!(sql.contains("\"first_name\" VARCHAR(255) NULL"));
        assert!(sql.contains("\"date_of_birth\" DATE NULL"));
        assert!(sql.contains("\"postal_code\" VARCHAR(255) NULL"));
        assert!(!sql.contains("NOT NULL"));
    }

    #[test]
    fn test_generate_insert() {
        let sql = generate_insert("t");
        assert!(sql.starts_with("INSERT INTO \"t\" (\"first_name\", \"last_name\", \"date_of_birth\""));
        assert!(sql.ends_with("VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("Contacts"), "\"Contacts\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(generate_create_database("contacts"), "CREATE DATABASE \"contacts\"");
    }

    #[test]
    fn test_record_params_follow_column_order() {
        let record = ContactRecord::default();
        let params = record_params(&record);
        assert_eq!(params.len(), ContactField::ALL.len());
    }
}
