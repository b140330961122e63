//! Schema introspection through the SQL client.
//!
//! `mysql` prints tab-separated rows under one header line when stdout is a
//! pipe (batch mode), which is how the client is run here. The boxed table
//! layout it prints in interactive mode (`+---+` borders, `|` separators) is
//! accepted as well, so a client forced out of batch mode still parses.

use crate::error::TypesResult;
use crate::generator::Column;
use dc_db::{SqlClient, VERSION_TABLE};

const SHOW_TABLES_SQL: &str = "show tables;";

/// Fields of every data row, header and table borders dropped
fn rows(output: &str) -> Vec<Vec<&str>> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty() && !line.starts_with('+'))
        .skip(1)
        .map(split_fields)
        .collect()
}

/// `a\tb` or `| a | b |` -> `["a", "b"]`
fn split_fields(line: &str) -> Vec<&str> {
    match line.trim().strip_prefix('|') {
        Some(boxed) => boxed
            .strip_suffix('|')
            .unwrap_or(boxed)
            .split('|')
            .map(str::trim)
            .collect(),
        None => line.split('\t').map(str::trim).collect(),
    }
}

/// Names of every table except the bookkeeping table, in client order
pub async fn list_tables(client: &dyn SqlClient) -> TypesResult<Vec<String>> {
    let output = client.query(SHOW_TABLES_SQL).await?;
    let tables: Vec<String> = rows(&output)
        .into_iter()
        .filter_map(|fields| fields.first().copied())
        .filter(|name| !name.is_empty() && *name != VERSION_TABLE)
        .map(String::from)
        .collect();
    log::debug!("Found {} tables", tables.len());
    Ok(tables)
}

/// Columns of `table` with their base database type
pub async fn describe_table(client: &dyn SqlClient, table: &str) -> TypesResult<Vec<Column>> {
    let output = client.query(&format!("describe {table};")).await?;
    Ok(rows(&output)
        .iter()
        .filter_map(|fields| parse_column(fields))
        .collect())
}

/// `["id", "bigint(20) unsigned", ...]` -> `Column { name: "id", db_type: "bigint" }`
fn parse_column(fields: &[&str]) -> Option<Column> {
    let name = *fields.first()?;
    let raw_type = *fields.get(1)?;
    if name.is_empty() {
        return None;
    }
    let db_type = raw_type
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    Some(Column {
        name: name.to_string(),
        db_type,
    })
}
