//! A route unit declares one routing configuration file.  The three sequences are positional:
//! index `i` across `ipaddress`, `netmask`, and `gateway` describes one route entry.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct RouteUnit {
    /// Unit name, used as the output file's suffix
    pub(crate) name: String,
    pub(crate) ipaddress: Vec<String>,
    pub(crate) netmask: Vec<String>,
    pub(crate) gateway: Vec<String>,
}
