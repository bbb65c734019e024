//! The compile module contains the two unit compilers and the artifact model they share.
//!
//! Each compiler is a pure function from (declared unit, discovered facts) to an `Artifact`:
//! validation and defaulting run first, rendering second, and no output of any kind exists if
//! validation fails.  Compiling the same unit against the same facts twice yields byte-identical
//! content.
pub(crate) mod interface;
pub(crate) mod route;

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Directory the consuming OS tooling reads; artifact paths under it must match bit-for-bit.
pub(crate) const SCRIPTS_DIR: &str = "/etc/sysconfig/network-scripts";

// Permission attributes the file materializer must apply to every artifact
pub(crate) const ARTIFACT_MODE: u32 = 0o644;
pub(crate) const ARTIFACT_OWNER: &str = "root";
pub(crate) const ARTIFACT_GROUP: &str = "root";

/// An opaque token naming a service that must be restarted/reloaded when the rendered file
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Notification {
    NmcliConfig,
    NmcliManage,
    NmcliClean,
    Network,
}

derive_display_from_serialize!(Notification);

/// A service resource the surrounding system must ensure exists and is running.  The compiler
/// only reports the dependency; it never manages the service itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum ServiceDependency {
    NetworkManager,
    #[serde(rename = "network")]
    Network,
}

derive_display_from_serialize!(ServiceDependency);

/// One rendered configuration file plus the wiring the surrounding system needs to apply it.
#[derive(Debug, PartialEq)]
pub(crate) struct Artifact {
    pub(crate) filename: String,
    pub(crate) content: String,
    pub(crate) notify: &'static [Notification],
    pub(crate) requires: Option<ServiceDependency>,
}

impl Artifact {
    /// The canonical path of the artifact under the sysconfig scripts directory.
    pub(crate) fn path(&self) -> PathBuf {
        Path::new(SCRIPTS_DIR).join(&self.filename)
    }
}

mod error {
    use crate::interface_id;
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(crate)))]
    pub(crate) enum Error {
        #[snafu(display(r#"ensure must be either "up" or "down", got '{}'"#, given))]
        InvalidEnsure { given: String },

        #[snafu(display("Invalid declared hardware address: {}", source))]
        InvalidMacAddress { source: interface_id::Error },

        #[snafu(display(
            "route entries misaligned: {} addresses, {} netmasks, {} gateways",
            addresses,
            netmasks,
            gateways
        ))]
        RouteLengthMismatch {
            addresses: usize,
            netmasks: usize,
            gateways: usize,
        },
    }
}

pub(crate) type Result<T> = std::result::Result<T, error::Error>;
