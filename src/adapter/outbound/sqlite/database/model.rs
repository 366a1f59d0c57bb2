//! Database row types for Diesel ORM.

use diesel::prelude::*;
use serde::Serialize;

use super::schema::{citations, offenders};
use crate::adapter::outbound::sqlite::query::Value;

/// Database row for an offender.
#[derive(QueryableByName, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = offenders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OffenderRow {
    pub id: i64,
    pub name: String,
    pub alliance: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

/// Database row for a citation.
#[derive(QueryableByName, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = citations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CitationRow {
    pub id: i64,
    pub offender_id: i64,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

/// A row read through the record store, tagged by its table.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Row {
    Offender(OffenderRow),
    Citation(CitationRow),
}

impl Row {
    /// Primary key of the row.
    #[must_use]
    pub fn id(&self) -> i64 {
        match self {
            Self::Offender(row) => row.id,
            Self::Citation(row) => row.id,
        }
    }

    /// Read a column by name. Returns `None` for columns the table lacks.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<Value> {
        match self {
            Self::Offender(row) => match column {
                "id" => Some(Value::Integer(row.id)),
                "name" => Some(Value::from(row.name.as_str())),
                "alliance" => Some(Value::from(row.alliance.clone())),
                "created_at" => Some(Value::from(row.created_at.as_str())),
                "updated_at" => Some(Value::from(row.updated_at.as_str())),
                "deleted_at" => Some(Value::from(row.deleted_at.clone())),
                _ => None,
            },
            Self::Citation(row) => match column {
                "id" => Some(Value::Integer(row.id)),
                "offender_id" => Some(Value::Integer(row.offender_id)),
                "note" => Some(Value::from(row.note.clone())),
                "created_at" => Some(Value::from(row.created_at.as_str())),
                "updated_at" => Some(Value::from(row.updated_at.as_str())),
                "deleted_at" => Some(Value::from(row.deleted_at.clone())),
                _ => None,
            },
        }
    }

    #[must_use]
    pub fn as_offender(&self) -> Option<&OffenderRow> {
        match self {
            Self::Offender(row) => Some(row),
            Self::Citation(_) => None,
        }
    }

    #[must_use]
    pub fn as_citation(&self) -> Option<&CitationRow> {
        match self {
            Self::Citation(row) => Some(row),
            Self::Offender(_) => None,
        }
    }

    #[must_use]
    pub fn into_offender(self) -> Option<OffenderRow> {
        match self {
            Self::Offender(row) => Some(row),
            Self::Citation(_) => None,
        }
    }

    #[must_use]
    pub fn into_citation(self) -> Option<CitationRow> {
        match self {
            Self::Citation(row) => Some(row),
            Self::Offender(_) => None,
        }
    }
}
