pub(crate) mod check_units;
pub(crate) mod compile;

use crate::facts::Facts;
use crate::units::{self, Units};
use crate::{DEFAULT_FACTS_FILE, DEFAULT_UNITS_FILE};
use snafu::ResultExt;
use std::path::{Path, PathBuf};

/// Load the declared units from the given path, falling back to the default location.
fn load_units(path: Option<PathBuf>) -> Result<Units> {
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_UNITS_FILE));
    units::from_path(&path).context(error::UnitsLoadSnafu { path })
}

/// Load the discovered facts.  An explicitly given path must exist; the default location is
/// optional and an empty fact table is used when it is missing.
fn load_facts(path: Option<PathBuf>) -> Result<Facts> {
    match path {
        Some(path) => Facts::from_path(&path).context(error::FactsLoadSnafu { path }),
        None => {
            if Path::exists(Path::new(DEFAULT_FACTS_FILE)) {
                Facts::from_path(DEFAULT_FACTS_FILE).context(error::FactsLoadSnafu {
                    path: DEFAULT_FACTS_FILE,
                })
            } else {
                Ok(Facts::empty())
            }
        }
    }
}

/// Potential errors during ifcfg-gen execution
mod error {
    use crate::{facts, units};
    use snafu::Snafu;
    use std::io;
    use std::path::PathBuf;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(crate)))]
    pub(crate) enum Error {
        #[snafu(display("Failed to write '{}': {}", path.display(), source))]
        ArtifactWrite { path: PathBuf, source: io::Error },

        #[snafu(display("Failed to set mode on '{}': {}", path.display(), source))]
        ArtifactMode { path: PathBuf, source: io::Error },

        #[snafu(display("Failed to create directory '{}': {}", path.display(), source))]
        CreateDir { path: PathBuf, source: io::Error },

        #[snafu(display("Unable to load facts from '{}': {}", path.display(), source))]
        FactsLoad {
            path: PathBuf,
            source: facts::Error,
        },

        #[snafu(display("Error serializing summary to JSON: {}", source))]
        JsonSerialize { source: serde_json::Error },

        #[snafu(display("{} unit(s) failed to compile", count))]
        UnitsFailed { count: usize },

        #[snafu(display("Unable to load units from '{}': {}", path.display(), source))]
        UnitsLoad {
            path: PathBuf,
            source: units::Error,
        },
    }
}

pub(crate) type Result<T> = std::result::Result<T, error::Error>;
