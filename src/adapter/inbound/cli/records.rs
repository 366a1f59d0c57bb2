//! Handler for the `records` command.

use tabled::{Table as TextTable, Tabled};

use crate::adapter::inbound::cli::command::RecordsArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::{
    CitationRow, Filter, OffenderRow, Operator, RecordStore, Row, StoreOptions, Table, Value,
};
use crate::app::Config;
use crate::error::Result;

#[derive(Tabled)]
struct OffenderLine {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Alliance")]
    alliance: String,
    #[tabled(rename = "Created")]
    created_at: String,
    #[tabled(rename = "Updated")]
    updated_at: String,
}

impl From<&OffenderRow> for OffenderLine {
    fn from(row: &OffenderRow) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            alliance: row.alliance.clone().unwrap_or_default(),
            created_at: row.created_at.clone(),
            updated_at: row.updated_at.clone(),
        }
    }
}

#[derive(Tabled)]
struct CitationLine {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Offender")]
    offender_id: i64,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<&CitationRow> for CitationLine {
    fn from(row: &CitationRow) -> Self {
        Self {
            id: row.id,
            offender_id: row.offender_id,
            note: row.note.clone().unwrap_or_default(),
            created_at: row.created_at.clone(),
        }
    }
}

/// Execute the records command.
pub fn execute(args: &RecordsArgs) -> Result<()> {
    let config = Config::discover(args.config.config.as_deref())?;
    let table: Table = args.table.parse()?;
    let filter = filter_from(args)?;

    let mut store = RecordStore::open(&config.database.path, StoreOptions::table(table))?;
    let rows = store.all(filter)?;
    store.disconnect();

    if output::is_json() {
        output::json_output(serde_json::to_value(&rows)?);
        return Ok(());
    }

    output::section(&format!("{table} ({})", rows.len()));
    if rows.is_empty() {
        output::hint("no rows");
        return Ok(());
    }
    output::lines(&render(table, &rows));
    Ok(())
}

fn filter_from(args: &RecordsArgs) -> Result<Option<Filter>> {
    let (Some(column), Some(value)) = (&args.column, &args.value) else {
        return Ok(None);
    };
    let operator = match &args.operator {
        Some(raw) => raw.parse::<Operator>()?,
        None => Operator::default(),
    };
    Ok(Some(
        Filter::eq(column.as_str(), Value::parse_loose(value)).with_operator(operator),
    ))
}

fn render(table: Table, rows: &[Row]) -> String {
    match table {
        Table::Offenders => TextTable::new(
            rows.iter()
                .filter_map(Row::as_offender)
                .map(OffenderLine::from),
        )
        .to_string(),
        Table::Citations => TextTable::new(
            rows.iter()
                .filter_map(Row::as_citation)
                .map(CitationLine::from),
        )
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::inbound::cli::command::ConfigArg;

    fn args(column: Option<&str>, value: Option<&str>, operator: Option<&str>) -> RecordsArgs {
        RecordsArgs {
            config: ConfigArg::default(),
            table: "citations".into(),
            column: column.map(str::to_string),
            value: value.map(str::to_string),
            operator: operator.map(str::to_string),
        }
    }

    #[test]
    fn no_filter_without_column() {
        assert!(filter_from(&args(None, None, None)).unwrap().is_none());
    }

    #[test]
    fn filter_values_are_typed() {
        let filter = filter_from(&args(Some("offender_id"), Some("3"), Some(">=")))
            .unwrap()
            .unwrap();
        assert_eq!(filter.column, "offender_id");
        assert_eq!(filter.value, Value::Integer(3));
        assert_eq!(filter.operator, Operator::Ge);
    }

    #[test]
    fn unknown_operator_is_rejected() {
        assert!(filter_from(&args(Some("note"), Some("x"), Some("~"))).is_err());
    }

    #[test]
    fn renders_rows_as_table() {
        let rows = vec![Row::Offender(OffenderRow {
            id: 1,
            name: "Alice".into(),
            alliance: Some("Red".into()),
            created_at: "2024-01-05 10:00:00".into(),
            updated_at: "2024-01-05 10:00:00".into(),
            deleted_at: None,
        })];
        let text = render(Table::Offenders, &rows);
        assert!(text.contains("Name"));
        assert!(text.contains("Alice"));
        assert!(text.contains("Red"));
    }
}
