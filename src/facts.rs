//! The facts module contains the read-only view of host state discovered outside this program,
//! such as the hardware addresses reported by the fact gatherer.  Facts are supplied as a JSON
//! object of fact name to string value; the absence of a fact is never an error.
use crate::interface_id::MacAddress;
use indexmap::IndexMap;
use snafu::ResultExt;
use std::convert::TryFrom;
use std::fs;
use std::path::Path;

// Hardware address facts are named by convention, e.g. "macaddress_eth0"
const MAC_FACT_PREFIX: &str = "macaddress_";

#[derive(Debug, Default)]
pub(crate) struct Facts {
    facts: IndexMap<String, String>,
}

impl Facts {
    /// Read the fact table from a JSON file of fact name -> string value.
    pub(crate) fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let facts_str = fs::read_to_string(path).context(error::FactsReadFailedSnafu { path })?;
        let facts =
            serde_json::from_str(&facts_str).context(error::FactsParseSnafu { path })?;
        Ok(Self { facts })
    }

    /// An empty fact table; every lookup resolves to `None`.
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Look up the discovered hardware address for a device.
    ///
    /// Lookups are best-effort: a missing fact returns `None`, and a fact whose value does not
    /// parse as a MAC address is treated as absent after warning on stderr.
    pub(crate) fn mac_address(&self, device: &str) -> Option<MacAddress> {
        let value = self.facts.get(&format!("{}{}", MAC_FACT_PREFIX, device))?;
        match MacAddress::try_from(value.as_str()) {
            Ok(mac) => Some(mac),
            Err(e) => {
                eprintln!("Ignoring malformed hardware address fact for '{}': {}", device, e);
                None
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn with_mac(device: &str, mac: &str) -> Self {
        let mut facts = IndexMap::new();
        facts.insert(format!("{}{}", MAC_FACT_PREFIX, device), mac.to_string());
        Self { facts }
    }
}

mod error {
    use snafu::Snafu;
    use std::io;
    use std::path::PathBuf;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(crate)))]
    pub(crate) enum Error {
        #[snafu(display("Failed to read facts from '{}': {}", path.display(), source))]
        FactsReadFailed { path: PathBuf, source: io::Error },

        #[snafu(display("Failed to parse facts from '{}': {}", path.display(), source))]
        FactsParse {
            path: PathBuf,
            source: serde_json::Error,
        },
    }
}

pub(crate) use error::Error;
type Result<T> = std::result::Result<T, error::Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn present_mac_fact() {
        let facts = Facts::with_mac("eth99", "ff:aa:ff:aa:ff:aa");
        let mac = facts.mac_address("eth99").unwrap();
        assert_eq!(&*mac, "ff:aa:ff:aa:ff:aa");
    }

    #[test]
    fn absent_mac_fact() {
        let facts = Facts::with_mac("eth99", "ff:aa:ff:aa:ff:aa");
        assert!(facts.mac_address("eth0").is_none());
    }

    #[test]
    fn malformed_mac_fact_is_absent() {
        let facts = Facts::with_mac("eth99", "not-a-mac");
        assert!(facts.mac_address("eth99").is_none());
    }

    #[test]
    fn empty_facts() {
        assert!(Facts::empty().mac_address("eth0").is_none());
    }

    #[test]
    fn facts_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"osfamily": "RedHat", "macaddress_eth0": "bb:cc:bb:cc:bb:cc"}}"#
        )
        .unwrap();

        let facts = Facts::from_path(file.path()).unwrap();
        assert_eq!(&*facts.mac_address("eth0").unwrap(), "bb:cc:bb:cc:bb:cc");
    }

    #[test]
    fn unparseable_facts_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "macaddress_eth0=bb:cc:bb:cc:bb:cc").unwrap();
        assert!(Facts::from_path(file.path()).is_err());
    }
}
