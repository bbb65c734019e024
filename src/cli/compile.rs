use super::{error, load_facts, load_units, Result};
use crate::compile::{
    Artifact, Notification, ARTIFACT_GROUP, ARTIFACT_MODE, ARTIFACT_OWNER, SCRIPTS_DIR,
};
use crate::facts::Facts;
use crate::units::Units;
use argh::FromArgs;
use serde::Serialize;
use snafu::{ensure, ResultExt};
use std::collections::BTreeSet;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "compile")]
/// Render and write configuration files for all declared units
pub(crate) struct CompileArgs {
    #[argh(option, short = 'u')]
    /// path to the declared units file
    units: Option<PathBuf>,

    #[argh(option, short = 'f')]
    /// path to the discovered facts file
    facts: Option<PathBuf>,

    #[argh(option, short = 'o')]
    /// directory to write rendered files into (defaults to the sysconfig scripts directory)
    out_dir: Option<PathBuf>,
}

/// One written file and the service wiring the surrounding system needs for it.
#[derive(Debug, Serialize)]
struct FileEntry<'a> {
    path: String,
    mode: String,
    owner: &'static str,
    group: &'static str,
    notify: &'a [Notification],
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    files: Vec<FileEntry<'a>>,
    services: BTreeSet<String>,
}

/// Compile all declared units and materialize their files.
///
/// A unit that fails validation is reported and skipped; the remaining units still compile and
/// their files are still written.  The process exits nonzero if any unit failed.
pub(crate) fn run(args: CompileArgs) -> Result<()> {
    let units = load_units(args.units)?;
    if !units.has_units() {
        eprintln!("No units were configured");
        return Ok(());
    }
    let facts = load_facts(args.facts)?;
    let out_dir = args
        .out_dir
        .unwrap_or_else(|| PathBuf::from(SCRIPTS_DIR));

    let (artifacts, failed) = compile_units(&units, &facts);

    fs::create_dir_all(&out_dir).context(error::CreateDirSnafu { path: &out_dir })?;
    for artifact in &artifacts {
        write_artifact(&out_dir, artifact)?;
    }
    print_summary(&artifacts)?;

    ensure!(failed == 0, error::UnitsFailedSnafu { count: failed });
    Ok(())
}

/// Compile every unit, collecting the artifacts of the units that validated and the count of
/// those that did not.
fn compile_units(units: &Units, facts: &Facts) -> (Vec<Artifact>, usize) {
    let mut artifacts = Vec::with_capacity(units.interfaces.len() + units.routes.len());
    let mut failed = 0;

    for interface in &units.interfaces {
        match interface.compile(facts) {
            Ok(artifact) => artifacts.push(artifact),
            Err(e) => {
                failed += 1;
                eprintln!("Failed to compile interface unit '{}': {}", interface.name, e);
            }
        }
    }
    for route in &units.routes {
        match route.compile() {
            Ok(artifact) => artifacts.push(artifact),
            Err(e) => {
                failed += 1;
                eprintln!("Failed to compile route unit '{}': {}", route.name, e);
            }
        }
    }

    (artifacts, failed)
}

/// Write the artifact's content into the output directory with the required mode.
fn write_artifact<P>(out_dir: P, artifact: &Artifact) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = out_dir.as_ref().join(&artifact.filename);
    fs::write(&path, &artifact.content).context(error::ArtifactWriteSnafu { path: &path })?;
    fs::set_permissions(&path, fs::Permissions::from_mode(ARTIFACT_MODE))
        .context(error::ArtifactModeSnafu { path })
}

/// Print the JSON summary of written files and required services for the surrounding system to
/// wire up "file changed -> notify service" edges.
fn print_summary(artifacts: &[Artifact]) -> Result<()> {
    let summary = Summary {
        files: artifacts
            .iter()
            .map(|artifact| FileEntry {
                path: artifact.path().display().to_string(),
                mode: format!("{:04o}", ARTIFACT_MODE),
                owner: ARTIFACT_OWNER,
                group: ARTIFACT_GROUP,
                notify: artifact.notify,
            })
            .collect(),
        services: artifacts
            .iter()
            .filter_map(|artifact| artifact.requires)
            .map(|service| service.to_string())
            .collect(),
    };

    let output = serde_json::to_string(&summary).context(error::JsonSerializeSnafu)?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units;
    use std::path::PathBuf;

    fn test_data() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_data")
    }

    #[test]
    fn compile_and_write_units() {
        let units = units::from_path(test_data().join("units.toml")).unwrap();
        let facts = Facts::from_path(test_data().join("facts.json")).unwrap();

        let (artifacts, failed) = compile_units(&units, &facts);
        assert_eq!(failed, 0);
        assert_eq!(artifacts.len(), 5);

        // Interface files require NetworkManager; route files require the network service
        let services: BTreeSet<String> = artifacts
            .iter()
            .filter_map(|artifact| artifact.requires)
            .map(|service| service.to_string())
            .collect();
        assert!(services.contains("NetworkManager"));
        assert!(services.contains("network"));

        let out_dir = tempfile::tempdir().unwrap();
        for artifact in &artifacts {
            write_artifact(out_dir.path(), artifact).unwrap();
        }

        let written = fs::read_to_string(out_dir.path().join("ifcfg-test99")).unwrap();
        assert!(written.contains("HWADDR=ff:aa:ff:aa:ff:aa\n"));

        let mode = fs::metadata(out_dir.path().join("route-test2"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o7777, ARTIFACT_MODE);
    }

    #[test]
    fn failed_unit_does_not_affect_others() {
        let units = units::from_path(test_data().join("bad_units.toml")).unwrap();
        let (artifacts, failed) = compile_units(&units, &Facts::empty());

        // One bad ensure value and one misaligned route; the good interface still compiles
        assert_eq!(failed, 2);
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].filename, "ifcfg-good0");
    }
}
