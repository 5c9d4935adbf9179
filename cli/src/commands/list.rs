//! `devstack list`: enumerate the catalog.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::app::AppContext;
use crate::application::Catalog;
use crate::domain::FailurePolicy;

#[derive(Serialize)]
struct StepInfo<'a> {
    name: &'a str,
    description: &'a str,
    depends_on: &'a [&'a str],
    on_failure: FailurePolicy,
    destructive: bool,
}

/// Print the catalog as a table, or as a JSON array with `--json`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be built or serialized.
pub fn run(app: &AppContext) -> Result<()> {
    let catalog = crate::catalog::build(&app.config)?;
    if app.is_json() {
        println!("{}", format_json(&catalog)?);
    } else {
        app.human().render_catalog(&catalog);
    }
    Ok(())
}

/// JSON rendering of the catalog in registration order.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_json(catalog: &Catalog) -> Result<String> {
    let steps: Vec<StepInfo<'_>> = catalog
        .steps()
        .iter()
        .map(|s| StepInfo {
            name: s.name(),
            description: s.description(),
            depends_on: s.depends_on(),
            on_failure: s.on_failure(),
            destructive: s.destructive(),
        })
        .collect();
    serde_json::to_string_pretty(&steps).context("JSON serialization failed")
}
