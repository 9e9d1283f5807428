//! Handlers for the `import` command group.

use std::path::Path;

use crate::domain::ImportReport;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

/// Execute `import prices FILE`.
pub fn execute_prices(config: &Config, file: &Path) -> Result<()> {
    let pool = bootstrap::open_database(config)?;
    let report = bootstrap::build_importer(pool).import_prices(file)?;
    print_report("prices", file, &report);
    Ok(())
}

/// Execute `import landings FILE`.
pub fn execute_landings(config: &Config, file: &Path) -> Result<()> {
    let pool = bootstrap::open_database(config)?;
    let report = bootstrap::build_importer(pool).import_landings(file)?;
    print_report("landings", file, &report);
    Ok(())
}

fn print_report(kind: &str, file: &Path, report: &ImportReport) {
    println!("Imported {kind} from {}", file.display());
    println!("  rows read:  {}", report.rows_read);
    println!("  inserted:   {}", report.inserted);
    println!("  skipped:    {}", report.skipped);
    println!("  duplicates: {}", report.duplicates);
}
