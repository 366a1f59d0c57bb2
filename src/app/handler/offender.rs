use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::adapter::outbound::sqlite::{
    attributes, CitationRow, Filter, OffenderRow, RecordStore, Row, StoreOptions, Table, Value,
};
use crate::app::command::Command;
use crate::app::format::{citation_count, format_offender, offender_label};
use crate::error::StoreError;

use super::{is_reserved_name, reserved_name_reply, Handler};

/// Answers `offender`: look up, add, list and remove offenders.
pub struct OffenderHandler {
    offenders: RecordStore,
    citations: RecordStore,
    prefix: String,
}

impl OffenderHandler {
    /// Open both stores the handler needs.
    ///
    /// # Errors
    /// Returns an error if either connection cannot be opened.
    pub fn open(path: &Path, prefix: impl Into<String>) -> Result<Self, StoreError> {
        Ok(Self::new(
            RecordStore::open(path, StoreOptions::table(Table::Offenders))?,
            RecordStore::open(path, StoreOptions::table(Table::Citations))?,
            prefix,
        ))
    }

    #[must_use]
    pub fn new(offenders: RecordStore, citations: RecordStore, prefix: impl Into<String>) -> Self {
        Self {
            offenders,
            citations,
            prefix: prefix.into(),
        }
    }

    fn usage(&self) -> String {
        let p = &self.prefix;
        format!(
            "Usage:\n{p}offender <name>\n{p}offender add <name> [alliance]\n{p}offender remove <name>\n{p}offender list"
        )
    }

    fn find(&mut self, name: &str) -> Result<Option<OffenderRow>, StoreError> {
        Ok(self
            .offenders
            .find_by("name", name)?
            .and_then(Row::into_offender))
    }

    fn citations_of(&mut self, offender_id: i64) -> Result<Vec<CitationRow>, StoreError> {
        Ok(self
            .citations
            .all(Some(Filter::eq("offender_id", offender_id)))?
            .into_iter()
            .filter_map(Row::into_citation)
            .collect())
    }

    fn show(&mut self, name: &str) -> Result<String, StoreError> {
        let Some(offender) = self.find(name)? else {
            return Ok(format!("No record for {name}."));
        };
        let citations = self.citations_of(offender.id)?;
        Ok(format_offender(&offender, &citations))
    }

    fn add(&mut self, name: &str, alliance: &str) -> Result<String, StoreError> {
        if is_reserved_name(name) {
            return Ok(reserved_name_reply(name));
        }
        let alliance = Some(alliance).filter(|a| !a.is_empty());
        let created = self.offenders.create(attributes([
            ("name", Value::from(name)),
            ("alliance", Value::from(alliance)),
        ]));

        match created {
            Ok(row) => {
                let label = row
                    .as_offender()
                    .map_or_else(|| name.to_string(), offender_label);
                info!(offender = name, id = row.id(), "Offender recorded");
                Ok(format!("Recorded {label}."))
            }
            Err(e) if e.is_unique_violation() => Ok(format!("{name} is already on record.")),
            Err(e) => Err(e),
        }
    }

    fn remove(&mut self, name: &str) -> Result<String, StoreError> {
        let Some(offender) = self.find(name)? else {
            return Ok(format!("No record for {name}."));
        };
        let cited = self.citations_of(offender.id)?.len();
        self.offenders.delete(offender.id)?;
        info!(offender = name, id = offender.id, cited, "Offender removed");
        Ok(format!(
            "Removed {} and {}.",
            offender.name,
            citation_count(cited)
        ))
    }

    fn list(&mut self) -> Result<String, StoreError> {
        let offenders: Vec<OffenderRow> = self
            .offenders
            .all(None)?
            .into_iter()
            .filter_map(Row::into_offender)
            .collect();
        if offenders.is_empty() {
            return Ok("No offenders on record.".to_string());
        }

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for citation in self
            .citations
            .all(None)?
            .iter()
            .filter_map(Row::as_citation)
        {
            *counts.entry(citation.offender_id).or_default() += 1;
        }

        let mut lines = vec![format!("🚨 Offenders ({})", offenders.len())];
        for offender in &offenders {
            let count = counts.get(&offender.id).copied().unwrap_or_default();
            lines.push(format!(
                "  {} - {}",
                offender_label(offender),
                citation_count(count)
            ));
        }
        Ok(lines.join("\n"))
    }
}

impl Handler for OffenderHandler {
    fn run(&mut self, command: &Command) -> Result<Option<String>, StoreError> {
        let reply = match command.arg(0) {
            None => self.usage(),
            Some("add") => match command.arg(1) {
                Some(name) => self.add(name, &command.rest(2))?,
                None => self.usage(),
            },
            Some("remove") => match command.arg(1) {
                Some(name) => self.remove(name)?,
                None => self.usage(),
            },
            Some("list") => self.list()?,
            Some(name) => self.show(name)?,
        };
        Ok(Some(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::install;
    use tempfile::TempDir;

    fn handler() -> (TempDir, OffenderHandler) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gdps.db");
        install(&path).unwrap();
        let handler = OffenderHandler::open(&path, "/").unwrap();
        (dir, handler)
    }

    fn run(handler: &mut OffenderHandler, args: &[&str]) -> String {
        handler
            .run(&Command::new("offender", args.iter().copied()))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn no_arguments_prints_usage() {
        let (_dir, mut handler) = handler();
        assert!(run(&mut handler, &[]).starts_with("Usage:"));
        assert!(run(&mut handler, &["add"]).starts_with("Usage:"));
    }

    #[test]
    fn add_then_show() {
        let (_dir, mut handler) = handler();
        assert_eq!(run(&mut handler, &["add", "Alice", "Red"]), "Recorded Alice [Red].");

        let shown = run(&mut handler, &["Alice"]);
        assert!(shown.contains("Alice [Red]"));
        assert!(shown.contains("0 citations"));
    }

    #[test]
    fn add_keeps_multi_word_alliance() {
        let (_dir, mut handler) = handler();
        assert_eq!(
            run(&mut handler, &["add", "Alice", "Red", "Army"]),
            "Recorded Alice [Red Army]."
        );

        let row = handler.offenders.find_by("name", "Alice").unwrap().unwrap();
        assert_eq!(row.as_offender().unwrap().alliance.as_deref(), Some("Red Army"));
    }

    #[test]
    fn add_without_alliance_stores_null() {
        let (_dir, mut handler) = handler();
        assert_eq!(run(&mut handler, &["add", "Bob"]), "Recorded Bob.");
        let row = handler.offenders.find_by("name", "Bob").unwrap().unwrap();
        assert!(row.as_offender().unwrap().alliance.is_none());
    }

    #[test]
    fn add_refuses_subcommand_names() {
        let (_dir, mut handler) = handler();
        for word in ["add", "remove", "list"] {
            assert_eq!(
                run(&mut handler, &["add", word]),
                format!("`{word}` is a reserved word and cannot be an offender name.")
            );
        }
        assert!(handler.offenders.all(None).unwrap().is_empty());
    }

    #[test]
    fn add_duplicate_is_reported() {
        let (_dir, mut handler) = handler();
        run(&mut handler, &["add", "Alice"]);
        assert_eq!(
            run(&mut handler, &["add", "Alice"]),
            "Alice is already on record."
        );
    }

    #[test]
    fn show_unknown() {
        let (_dir, mut handler) = handler();
        assert_eq!(run(&mut handler, &["Nobody"]), "No record for Nobody.");
    }

    #[test]
    fn remove_cascades() {
        let (_dir, mut handler) = handler();
        run(&mut handler, &["add", "Alice"]);
        handler
            .citations
            .create(attributes([
                ("offender_id", Value::from(1_i64)),
                ("note", Value::from("spam")),
            ]))
            .unwrap();

        assert_eq!(
            run(&mut handler, &["remove", "Alice"]),
            "Removed Alice and 1 citation."
        );
        assert!(handler.citations.all(None).unwrap().is_empty());
        assert_eq!(run(&mut handler, &["remove", "Alice"]), "No record for Alice.");
    }

    #[test]
    fn list_counts_citations() {
        let (_dir, mut handler) = handler();
        assert_eq!(run(&mut handler, &["list"]), "No offenders on record.");

        run(&mut handler, &["add", "Alice", "Red"]);
        run(&mut handler, &["add", "Bob"]);
        for note in ["spam", "farming"] {
            handler
                .citations
                .create(attributes([
                    ("offender_id", Value::from(1_i64)),
                    ("note", Value::from(note)),
                ]))
                .unwrap();
        }

        let listed = run(&mut handler, &["list"]);
        assert!(listed.contains("Offenders (2)"));
        assert!(listed.contains("Alice [Red] - 2 citations"));
        assert!(listed.contains("Bob - 0 citations"));
    }
}
