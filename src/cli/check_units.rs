use super::{error, load_units, Result};
use crate::facts::Facts;
use argh::FromArgs;
use snafu::ensure;
use std::path::PathBuf;

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "check")]
/// Validate all declared units without writing any files
pub(crate) struct CheckArgs {
    #[argh(option, short = 'u')]
    /// path to the declared units file
    units: Option<PathBuf>,
}

/// Validate every declared unit, reporting each failure.  Hardware-address resolution is
/// best-effort and never a validation concern, so an empty fact table is used.
pub(crate) fn run(args: CheckArgs) -> Result<()> {
    let units = load_units(args.units)?;
    if !units.has_units() {
        eprintln!("No units were configured");
        return Ok(());
    }

    let facts = Facts::empty();
    let mut failed: usize = 0;
    for interface in &units.interfaces {
        if let Err(e) = interface.compile(&facts) {
            failed += 1;
            eprintln!("Invalid interface unit '{}': {}", interface.name, e);
        }
    }
    for route in &units.routes {
        if let Err(e) = route.compile() {
            failed += 1;
            eprintln!("Invalid route unit '{}': {}", route.name, e);
        }
    }

    ensure!(failed == 0, error::UnitsFailedSnafu { count: failed });
    println!(
        "Validated {} interface unit(s) and {} route unit(s)",
        units.interfaces.len(),
        units.routes.len()
    );
    Ok(())
}
