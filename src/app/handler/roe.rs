use crate::app::command::Command;
use crate::error::StoreError;

use super::Handler;

/// Answers `roe` with the configured rules of engagement.
pub struct RoeHandler {
    rules: String,
}

impl RoeHandler {
    #[must_use]
    pub fn new(rules: impl Into<String>) -> Self {
        Self {
            rules: rules.into(),
        }
    }
}

impl Handler for RoeHandler {
    fn run(&mut self, _command: &Command) -> Result<Option<String>, StoreError> {
        if self.rules.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(self.rules.clone()))
    }
}
