//! SQL statement composition.
//!
//! Deterministic string builders for the three statements a load executes.
//! Identifier quoting and placeholder syntax come from the database handle;
//! these functions only compose the parts. Memoization lives on the loader,
//! which calls each builder at most once per instance.

use crate::core::column::Column;

/// Default base table name when neither configuration nor the row source
/// supplies one.
pub const DEFAULT_NAME: &str = "data";

/// Default CREATE suffix: closes the column definition list.
pub const DEFAULT_CREATE_SUFFIX: &str = ")";

/// Default DROP prefix. Deliberately a fixed literal with no table-type
/// qualifier: the common engines all accept an unqualified drop.
pub const DEFAULT_DROP_PREFIX: &str = "DROP TABLE";

/// Default DROP suffix: empty.
pub const DEFAULT_DROP_SUFFIX: &str = "";

/// Default CREATE prefix: `CREATE <table_type> TABLE <quoted_name> (`.
///
/// An empty `table_type` yields a double space, which the engines accept;
/// nothing collapses it.
pub fn default_create_prefix(table_type: &str, quoted_name: &str) -> String {
    format!("CREATE {} TABLE {} (", table_type, quoted_name)
}

/// Comma-joined `<quoted name> <data type>` pairs, in declared order.
pub fn column_definitions<Q>(columns: &[Column], quote: Q) -> String
where
    Q: Fn(&str) -> String,
{
    columns
        .iter()
        .map(|col| format!("{} {}", quote(&col.name), col.data_type))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `<prefix> <body> <suffix>`: the shared composition rule for CREATE and
/// DROP statements.
pub fn compose(prefix: &str, body: &str, suffix: &str) -> String {
    format!("{} {} {}", prefix, body, suffix)
}

/// Parameterized INSERT statement with one placeholder per column.
pub fn insert_statement<Q, P>(
    quoted_name: &str,
    columns: &[Column],
    quote: Q,
    placeholder: P,
) -> String
where
    Q: Fn(&str) -> String,
    P: Fn(usize) -> String,
{
    let column_names = columns
        .iter()
        .map(|col| quote(&col.name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(placeholder)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ( {} ) VALUES( {} )",
        quoted_name, column_names, placeholders
    )
}
