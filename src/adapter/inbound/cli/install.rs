//! Handler for the `install` command.

use crate::adapter::inbound::cli::command::ConfigArg;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::{install, InstallReport};
use crate::app::Config;
use crate::error::Result;

/// Execute the install command.
pub fn execute(args: &ConfigArg) -> Result<()> {
    let config = Config::discover(args.config.as_deref())?;
    let report = install(&config.database.path)?;
    print_report(&report);
    Ok(())
}

pub(super) fn print_report(report: &InstallReport) {
    output::section("Database");
    output::field("Path", report.path.display());
    if report.created_file {
        output::field("File", "created");
    }
    output::field("Migrations", report.migrations_applied);
    output::field("Offenders", report.offender_count);

    if report.migrations_applied == 0 {
        output::success("Schema already up to date");
    } else {
        output::success("Schema installed");
    }
}
