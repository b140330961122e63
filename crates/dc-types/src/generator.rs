//! TypeScript rendering of introspected tables.

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Lowercase base type without size, e.g. `varchar`
    pub db_type: String,
}

/// One table and its columns in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

/// Map a database type to its TypeScript type.
///
/// The second value is a comment line to emit above the field, used where
/// the mapping loses information.
pub fn ts_type(db_type: &str) -> (&'static str, Option<&'static str>) {
    match db_type {
        "bigint" => ("string", Some("type is bigint")),
        "tinyint" | "smallint" | "int" | "integer" | "double" | "float" | "decimal" => {
            ("number", None)
        }
        // varchar, longtext, text, char, datetime, date, timestamp and
        // anything unrecognized
        _ => ("string", None),
    }
}

/// `user_account`, `USER_ACCOUNT` and `userAccount` -> `UserAccount`
///
/// Words break at `_`, `-`, spaces and lower-to-upper case changes. Each
/// word is capitalized and the rest of it lowercased.
pub fn to_pascal_case(s: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in s.chars() {
        if matches!(c, '_' | '-' | ' ') {
            words.push(std::mem::take(&mut current));
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    words.push(current);

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
            }
        })
        .collect()
}

fn render_table(table: &Table, prefix: &str) -> String {
    let mut out = format!(
        "export class {}{} {{\n",
        prefix,
        to_pascal_case(&table.name)
    );
    for column in &table.columns {
        let (ty, comment) = ts_type(&column.db_type);
        if let Some(comment) = comment {
            out.push_str(&format!("  // {comment}\n"));
        }
        out.push_str(&format!("  {}: {}\n", column.name, ty));
    }
    out.push_str("}\n");
    out
}

/// Render every table as an exported class, separated by blank lines.
pub fn render(tables: &[Table], prefix: &str) -> String {
    tables
        .iter()
        .map(|t| render_table(t, prefix))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
