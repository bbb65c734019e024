//! An interface unit declares one network interface configuration file.  Unset optional fields
//! are `None`, which is distinct from an empty string: absent optionals produce no output line
//! at all.
use crate::interface_id::InterfaceName;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct InterfaceUnit {
    /// Unit name; may encode a VLAN sub-interface as `<parent>.<vlan-id>`
    pub(crate) name: InterfaceName,
    /// "up" or "down"; validated at compile time so a bad value only fails this unit
    pub(crate) ensure: String,
    /// Device to configure, defaults to `name`
    pub(crate) device: Option<InterfaceName>,
    /// Explicit hardware address; wins over the discovered fact.  Kept as a string here and
    /// validated at compile time so a bad value only fails this unit, not the whole units file
    pub(crate) macaddress: Option<String>,
    /// Defaults to "dhcp"
    pub(crate) bootproto: Option<String>,
    /// Defaults to true; when false no HWADDR line is emitted at all
    pub(crate) manage_hwaddr: Option<bool>,
    pub(crate) mtu: Option<u32>,
    pub(crate) dhcp_hostname: Option<String>,
    pub(crate) ethtool_opts: Option<String>,
    pub(crate) userctl: Option<bool>,
    // Accepted for declaration compatibility; dynamic interfaces never render PEERDNS
    #[allow(dead_code)]
    pub(crate) peerdns: Option<bool>,
    pub(crate) linkdelay: Option<u32>,
    pub(crate) check_link_down: Option<bool>,
    pub(crate) defroute: Option<String>,
    pub(crate) metric: Option<u32>,
    pub(crate) zone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_interface_unit() {
        let unit: InterfaceUnit = toml::from_str(
            r#"
            name = "test99"
            ensure = "up"
            "#,
        )
        .unwrap();

        assert_eq!(&*unit.name, "test99");
        assert_eq!(unit.ensure, "up");
        assert!(unit.device.is_none());
        assert!(unit.bootproto.is_none());
        assert!(unit.manage_hwaddr.is_none());
    }

    #[test]
    fn all_optionals() {
        let unit: InterfaceUnit = toml::from_str(
            r#"
            name = "test99"
            ensure = "down"
            device = "eth99"
            macaddress = "ef:ef:ef:ef:ef:ef"
            bootproto = "bootp"
            userctl = true
            mtu = 1500
            dhcp_hostname = "hostname"
            ethtool_opts = "speed 100 duplex full autoneg off"
            peerdns = true
            linkdelay = 5
            check_link_down = true
            defroute = "yes"
            metric = 10
            zone = "trusted"
            "#,
        )
        .unwrap();

        assert_eq!(&*unit.device.unwrap(), "eth99");
        assert_eq!(unit.macaddress.as_deref(), Some("ef:ef:ef:ef:ef:ef"));
        assert_eq!(unit.mtu, Some(1500));
        assert_eq!(unit.zone.as_deref(), Some("trusted"));
    }

    #[test]
    fn malformed_macaddress_still_parses() {
        // The declaration layer is isolation-preserving: a bad hardware address is a per-unit
        // compile failure, not a parse failure of the whole units file
        let unit: InterfaceUnit = toml::from_str(
            r#"
            name = "test99"
            ensure = "up"
            macaddress = "not-a-mac"
            "#,
        )
        .unwrap();
        assert_eq!(unit.macaddress.as_deref(), Some("not-a-mac"));
    }

    #[test]
    fn empty_string_is_not_absent() {
        let unit: InterfaceUnit = toml::from_str(
            r#"
            name = "test99"
            ensure = "up"
            zone = ""
            "#,
        )
        .unwrap();
        assert_eq!(unit.zone.as_deref(), Some(""));
    }
}
