use std::path::Path;

use tracing::info;

use crate::adapter::outbound::sqlite::{
    attributes, Filter, OffenderRow, RecordStore, Row, StoreOptions, Table, Value,
};
use crate::app::command::Command;
use crate::app::format::{citation_count, offender_label};
use crate::error::StoreError;

use super::{is_reserved_name, reserved_name_reply, Handler};

/// Answers `citation`: cite an offender, or remove a citation.
pub struct CitationHandler {
    offenders: RecordStore,
    citations: RecordStore,
    prefix: String,
}

impl CitationHandler {
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
        format!("Usage:\n{p}citation <name> <note>\n{p}citation remove <id>")
    }

    /// Find the offender by name, recording them first if unknown.
    fn find_or_create(&mut self, name: &str) -> Result<OffenderRow, StoreError> {
        if let Some(offender) = self
            .offenders
            .find_by("name", name)?
            .and_then(Row::into_offender)
        {
            return Ok(offender);
        }

        let row = self.offenders.create(attributes([("name", name)]))?;
        info!(offender = name, id = row.id(), "Offender recorded by citation");
        let id = row.id();
        row.into_offender().ok_or(StoreError::MissingInsert(id))
    }

    fn cite(
        &mut self,
        name: &str,
        note: &str,
        author: Option<&str>,
    ) -> Result<String, StoreError> {
        if is_reserved_name(name) {
            return Ok(reserved_name_reply(name));
        }
        let offender = self.find_or_create(name)?;
        let note = Some(note).filter(|n| !n.is_empty());

        let citation = self.citations.create(attributes([
            ("offender_id", Value::from(offender.id)),
            ("note", Value::from(note)),
        ]))?;
        let total = self
            .citations
            .all(Some(Filter::eq("offender_id", offender.id)))?
            .len();

        info!(
            offender = name,
            citation_id = citation.id(),
            author,
            total,
            "Citation recorded"
        );
        let cited_by = author.map(|a| format!(" by {a}")).unwrap_or_default();
        Ok(format!(
            "Citation #{} recorded for {}{cited_by}. They now have {}.",
            citation.id(),
            offender_label(&offender),
            citation_count(total)
        ))
    }

    fn remove(&mut self, raw_id: &str) -> Result<String, StoreError> {
        let Ok(id) = raw_id.trim_start_matches('#').parse::<i64>() else {
            return Ok(format!("Citation id must be a number, got `{raw_id}`."));
        };
        match self.citations.delete(id)? {
            0 => Ok(format!("No citation #{id}.")),
            _ => {
                info!(citation_id = id, "Citation removed");
                Ok(format!("Removed citation #{id}."))
            }
        }
    }
}

impl Handler for CitationHandler {
    fn run(&mut self, command: &Command) -> Result<Option<String>, StoreError> {
        let reply = match command.arg(0) {
            None => self.usage(),
            Some("remove") => match command.arg(1) {
                Some(id) => self.remove(id)?,
                None => self.usage(),
            },
            Some(name) => self.cite(name, &command.rest(1), command.author.as_deref())?,
        };
        Ok(Some(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::install;
    use tempfile::TempDir;

    fn handler() -> (TempDir, CitationHandler) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gdps.db");
        install(&path).unwrap();
        let handler = CitationHandler::open(&path, "/").unwrap();
        (dir, handler)
    }

    fn run(handler: &mut CitationHandler, args: &[&str]) -> String {
        handler
            .run(&Command::new("citation", args.iter().copied()))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn no_arguments_prints_usage() {
        let (_dir, mut handler) = handler();
        assert!(run(&mut handler, &[]).starts_with("Usage:"));
        assert!(run(&mut handler, &["remove"]).starts_with("Usage:"));
    }

    #[test]
    fn citing_unknown_offender_records_them() {
        let (_dir, mut handler) = handler();
        let reply = run(&mut handler, &["Alice", "spam", "in", "chat"]);
        assert_eq!(reply, "Citation #1 recorded for Alice. They now have 1 citation.");

        let offender = handler.offenders.find_by("name", "Alice").unwrap().unwrap();
        assert_eq!(offender.id(), 1);

        let citation = handler.citations.find_by("id", 1_i64).unwrap().unwrap();
        let citation = citation.as_citation().unwrap();
        assert_eq!(citation.offender_id, 1);
        assert_eq!(citation.note.as_deref(), Some("spam in chat"));
    }

    #[test]
    fn citing_subcommand_word_records_nothing() {
        let (_dir, mut handler) = handler();
        assert_eq!(
            run(&mut handler, &["list", "spam"]),
            "`list` is a reserved word and cannot be an offender name."
        );
        assert!(handler.offenders.all(None).unwrap().is_empty());
        assert!(handler.citations.all(None).unwrap().is_empty());
    }

    #[test]
    fn reply_names_the_author() {
        let (_dir, mut handler) = handler();
        let command = Command::new("citation", ["Alice", "spam"]).with_author("Mod Squad");
        let reply = handler.run(&command).unwrap().unwrap();
        assert_eq!(
            reply,
            "Citation #1 recorded for Alice by Mod Squad. They now have 1 citation."
        );
    }

    #[test]
    fn repeated_citations_accumulate() {
        let (_dir, mut handler) = handler();
        run(&mut handler, &["Alice", "spam"]);
        let reply = run(&mut handler, &["Alice", "farming"]);
        assert!(reply.ends_with("They now have 2 citations."));
        assert_eq!(handler.offenders.all(None).unwrap().len(), 1);
    }

    #[test]
    fn citation_without_note_stores_null() {
        let (_dir, mut handler) = handler();
        run(&mut handler, &["Bob"]);
        let row = handler.citations.find_by("id", 1_i64).unwrap().unwrap();
        assert!(row.as_citation().unwrap().note.is_none());
    }

    #[test]
    fn remove_by_id() {
        let (_dir, mut handler) = handler();
        run(&mut handler, &["Alice", "spam"]);

        assert_eq!(run(&mut handler, &["remove", "#1"]), "Removed citation #1.");
        assert_eq!(run(&mut handler, &["remove", "1"]), "No citation #1.");
        assert_eq!(
            run(&mut handler, &["remove", "one"]),
            "Citation id must be a number, got `one`."
        );
    }
}
