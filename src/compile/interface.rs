//! The interface compiler turns an `InterfaceUnit` and the discovered facts into an ifcfg-style
//! configuration file.
//!
//! Validation and defaulting happen once, up front: `ensure` is checked against its two legal
//! values, the device defaults to the unit name, VLAN detection is derived from the name, and the
//! hardware address is resolved (explicit value first, then a best-effort fact lookup keyed by
//! the parent device).  The rendered line order is fixed and significant for byte comparison.
use super::{error, Artifact, Notification, Result, ServiceDependency};
use crate::facts::Facts;
use crate::interface_id::{InterfaceName, MacAddress};
use crate::units::InterfaceUnit;
use snafu::ResultExt;
use std::convert::TryFrom;
use std::fmt::Display;

const DEFAULT_BOOTPROTO: &str = "dhcp";

// Applying an interface file always notifies the full nmcli set, regardless of which fields
// changed
static INTERFACE_NOTIFICATIONS: &[Notification] = &[
    Notification::NmcliConfig,
    Notification::NmcliManage,
    Notification::NmcliClean,
];

#[derive(Debug, PartialEq)]
enum Ensure {
    Up,
    Down,
}

impl Ensure {
    // Case-sensitive by design of the declared format; "Up" is not a legal value
    fn parse(given: &str) -> Result<Self> {
        match given {
            "up" => Ok(Ensure::Up),
            "down" => Ok(Ensure::Down),
            _ => error::InvalidEnsureSnafu { given }.fail(),
        }
    }
}

/// The validated, fully-defaulted parameter set for one ifcfg file.  Every ambiguous input has
/// been resolved by the time this struct exists; rendering is a straight transcription.
#[derive(Debug)]
struct IfcfgFile {
    device: InterfaceName,
    bootproto: String,
    hwaddr: Option<MacAddress>,
    onboot: bool,
    hotplug: bool,
    mtu: Option<u32>,
    dhcp_hostname: Option<String>,
    ethtool_opts: Option<String>,
    userctl: Option<bool>,
    linkdelay: Option<u32>,
    check_link_down: Option<bool>,
    defroute: Option<String>,
    metric: Option<u32>,
    zone: Option<String>,
    nm_controlled: bool,
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl Display for IfcfgFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DEVICE={}", self.device)?;
        writeln!(f, "BOOTPROTO={}", self.bootproto)?;
        if let Some(hwaddr) = &self.hwaddr {
            writeln!(f, "HWADDR={}", hwaddr)?;
        }
        writeln!(f, "ONBOOT={}", yes_no(self.onboot))?;
        writeln!(f, "HOTPLUG={}", yes_no(self.hotplug))?;
        writeln!(f, "TYPE=Ethernet")?;
        if let Some(mtu) = self.mtu {
            writeln!(f, "MTU={}", mtu)?;
        }
        // Values that may contain spaces are double-quoted on output
        if let Some(dhcp_hostname) = &self.dhcp_hostname {
            writeln!(f, "DHCP_HOSTNAME=\"{}\"", dhcp_hostname)?;
        }
        if let Some(ethtool_opts) = &self.ethtool_opts {
            writeln!(f, "ETHTOOL_OPTS=\"{}\"", ethtool_opts)?;
        }
        if let Some(userctl) = self.userctl {
            writeln!(f, "USERCTL={}", yes_no(userctl))?;
        }
        if let Some(linkdelay) = self.linkdelay {
            writeln!(f, "LINKDELAY={}", linkdelay)?;
        }
        if let Some(check_link_down) = self.check_link_down {
            writeln!(f, "CHECK_LINK_DOWN={}", yes_no(check_link_down))?;
        }
        if let Some(defroute) = &self.defroute {
            writeln!(f, "DEFROUTE={}", defroute)?;
        }
        if let Some(metric) = self.metric {
            writeln!(f, "METRIC={}", metric)?;
        }
        if let Some(zone) = &self.zone {
            writeln!(f, "ZONE={}", zone)?;
        }
        writeln!(f, "NM_CONTROLLED={}", yes_no(self.nm_controlled))
    }
}

impl InterfaceUnit {
    /// Compile this unit into its `ifcfg-<name>` artifact.
    ///
    /// Fails with a validation error before producing any output; a failure here must not affect
    /// any other unit's compilation.
    pub(crate) fn compile(&self, facts: &Facts) -> Result<Artifact> {
        let ensure = Ensure::parse(&self.ensure)?;
        let device = self.device.clone().unwrap_or_else(|| self.name.clone());
        let is_vlan = self.name.is_vlan();

        // An explicitly declared address is a hard validation concern, unlike the best-effort
        // fact lookup
        let declared_mac = self
            .macaddress
            .as_deref()
            .map(MacAddress::try_from)
            .transpose()
            .context(error::InvalidMacAddressSnafu)?;

        let hwaddr = if self.manage_hwaddr.unwrap_or(true) {
            declared_mac.or_else(|| facts.mac_address(self.fact_device(&device)))
        } else {
            None
        };

        let onboot = ensure == Ensure::Up;
        let file = IfcfgFile {
            device,
            bootproto: self
                .bootproto
                .clone()
                .unwrap_or_else(|| DEFAULT_BOOTPROTO.to_string()),
            hwaddr,
            onboot,
            // HOTPLUG mirrors ONBOOT
            hotplug: onboot,
            mtu: self.mtu,
            dhcp_hostname: self.dhcp_hostname.clone(),
            ethtool_opts: self.ethtool_opts.clone(),
            userctl: self.userctl,
            linkdelay: self.linkdelay,
            check_link_down: self.check_link_down,
            defroute: self.defroute.clone(),
            metric: self.metric,
            zone: self.zone.clone(),
            // NetworkManager doesn't handle VLAN sub-interfaces
            nm_controlled: !is_vlan,
        };

        Ok(Artifact {
            filename: format!("ifcfg-{}", self.name),
            content: file.to_string(),
            notify: INTERFACE_NOTIFICATIONS,
            requires: Some(ServiceDependency::NetworkManager),
        })
    }

    // The hardware address lives on the parent device: the portion of `name` before the VLAN
    // suffix, or the resolved device when there is no suffix.
    fn fact_device<'a>(&'a self, device: &'a InterfaceName) -> &'a str {
        self.name.vlan_parent().unwrap_or(&**device)
    }
}
