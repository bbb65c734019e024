//! The units module contains the structures needed to deserialize a `units.toml` file, the
//! declared network configuration units for a host.
//!
//! These structures are the user-facing declarations; validation and defaulting happen per unit
//! at compile time (see the `compile` module) so that one malformed unit cannot prevent the
//! others from compiling.

pub(crate) mod interface;
pub(crate) mod route;

pub(crate) use interface::InterfaceUnit;
pub(crate) use route::RouteUnit;
use serde::Deserialize;
use snafu::ResultExt;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Units {
    #[serde(default, rename = "interface")]
    pub(crate) interfaces: Vec<InterfaceUnit>,
    #[serde(default, rename = "route")]
    pub(crate) routes: Vec<RouteUnit>,
}

impl Units {
    pub(crate) fn has_units(&self) -> bool {
        !self.interfaces.is_empty() || !self.routes.is_empty()
    }
}

/// Read the declared units from file
pub(crate) fn from_path<P>(path: P) -> Result<Units>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let units_str = fs::read_to_string(path).context(error::UnitsReadFailedSnafu { path })?;
    toml::from_str(&units_str).context(error::UnitsParseSnafu)
}

mod error {
    use snafu::Snafu;
    use std::io;
    use std::path::PathBuf;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(crate)))]
    pub(crate) enum Error {
        #[snafu(display("Failed to read units from '{}': {}", path.display(), source))]
        UnitsReadFailed { path: PathBuf, source: io::Error },

        #[snafu(display("Failed to parse units: {}", source))]
        UnitsParse { source: toml::de::Error },
    }
}

pub(crate) use error::Error;
pub(crate) type Result<T> = std::result::Result<T, error::Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn test_data() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_data")
    }

    #[test]
    fn ok_units() {
        let units = from_path(test_data().join("units.toml")).unwrap();
        assert!(units.has_units());
        assert_eq!(units.interfaces.len(), 3);
        assert_eq!(units.routes.len(), 2);
    }

    #[test]
    fn empty_units() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file).unwrap();
        let units = from_path(file.path()).unwrap();
        assert!(!units.has_units());
    }

    #[test]
    fn unknown_field_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [[interface]]
            name = "eth0"
            ensure = "up"
            bootprot = "dhcp"
            "#
        )
        .unwrap();
        assert!(from_path(file.path()).is_err());
    }

    #[test]
    fn missing_units_file() {
        assert!(from_path(test_data().join("nonexistent.toml")).is_err());
    }
}
