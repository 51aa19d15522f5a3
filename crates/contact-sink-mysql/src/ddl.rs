//! SQL text for the MySQL sink.

use chrono::{Datelike, NaiveDate};
use contact_core::{ColumnType, ContactField, ContactRecord};
use mysql_async::Value;

/// Case-sensitive existence check for a database.
pub const DATABASE_EXISTS_SQL: &str = "SELECT SCHEMA_NAME FROM INFORMATION_SCHEMA.SCHEMATA \
     WHERE CAST(SCHEMA_NAME AS BINARY) = CAST(? AS BINARY)";

/// Quote an identifier with backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
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

/// Generate the single-row INSERT statement with positional placeholders.
pub fn generate_insert(table_name: &str) -> String {
    let columns: Vec<String> = ContactField::ALL
        .iter()
        .map(|f| quote_identifier(f.name()))
        .collect();
    let placeholders: Vec<&str> = ContactField::ALL.iter().map(|_| "?").collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table_name),
        columns.join(", "),
        placeholders.join(", ")
    )
}

fn date_value(date: NaiveDate) -> Value {
    Value::Date(
        date.year() as u16,
        date.month() as u8,
        date.day() as u8,
        0,
        0,
        0,
        0,
    )
}

/// Statement parameters for one record, in column order. Absent fields bind as NULL.
pub fn record_params(record: &ContactRecord) -> Vec<Value> {
    ContactField::ALL
        .iter()
        .map(|field| match field {
            ContactField::DateOfBirth => record.date_of_birth.map(date_value).unwrap_or(Value::NULL),
            other => record
                .text(*other)
                .map(|s| Value::Bytes(s.as_bytes().to_vec()))
                .unwrap_or(Value::NULL),
        })
        .collect()
}
