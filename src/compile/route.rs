//! The route compiler turns a `RouteUnit` into an indexed route file.  The three declared
//! sequences must be the same length; entry `i` across all three describes one route.
use super::{error, Artifact, Notification, Result, ServiceDependency};
use crate::units::RouteUnit;
use snafu::ensure;
use std::fmt::Display;

static ROUTE_NOTIFICATIONS: &[Notification] = &[Notification::Network];

/// The validated route entries for one route file.  Lines are grouped by field, each group in
/// ascending index order, not interleaved per route.
#[derive(Debug)]
struct RouteFile<'a> {
    routes: &'a RouteUnit,
}

impl Display for RouteFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, address) in self.routes.ipaddress.iter().enumerate() {
            writeln!(f, "ADDRESS{}={}", i, address)?;
        }
        for (i, netmask) in self.routes.netmask.iter().enumerate() {
            writeln!(f, "NETMASK{}={}", i, netmask)?;
        }
        for (i, gateway) in self.routes.gateway.iter().enumerate() {
            writeln!(f, "GATEWAY{}={}", i, gateway)?;
        }
        Ok(())
    }
}

impl RouteUnit {
    /// Compile this unit into its `route-<name>` artifact.
    pub(crate) fn compile(&self) -> Result<Artifact> {
        ensure!(
            self.ipaddress.len() == self.netmask.len()
                && self.ipaddress.len() == self.gateway.len(),
            error::RouteLengthMismatchSnafu {
                addresses: self.ipaddress.len(),
                netmasks: self.netmask.len(),
                gateways: self.gateway.len(),
            }
        );

        Ok(Artifact {
            filename: format!("route-{}", self.name),
            content: RouteFile { routes: self }.to_string(),
            notify: ROUTE_NOTIFICATIONS,
            requires: Some(ServiceDependency::Network),
        })
    }
}
