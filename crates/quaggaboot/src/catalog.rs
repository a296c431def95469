//! Fixed daemon catalog and the flags each daemon is started with.

use crate::inspector::ConfigInspector;

/// Core daemon every protocol daemon depends on.
pub const MANDATORY_DAEMON: &str = "zebra";

/// Control client that applies the integrated configuration.
pub const CONTROL_CLIENT: &str = "vtysh";

/// Flag appended to every daemon launch so it detaches into the background.
pub const DAEMON_MODE_FLAG: &str = "-d";

/// Flag asking `vtysh` to apply the full configuration to every daemon.
pub const COMMIT_FLAG: &str = "-b";

/// Flag restricting `xpimd` to IPv6 multicast routing.
pub const PIM_IPV6_FLAG: &str = "-6";

/// Configuration statement that enables an optional daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonGate {
    /// Enabled by `router <protocol>`.
    Router(&'static str),
    /// Enabled by `router pim` or `router pim6`.
    PimFamily,
}

/// Optional daemon started when its protocol appears in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaemonSpec {
    name: &'static str,
    gate: DaemonGate,
}

impl DaemonSpec {
    const fn router(name: &'static str, protocol: &'static str) -> Self {
        Self {
            name,
            gate: DaemonGate::Router(protocol),
        }
    }

    /// Executable name of the daemon.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Statement that gates the daemon.
    #[must_use]
    pub const fn gate(&self) -> DaemonGate {
        self.gate
    }

    /// Whether the inspected configuration asks for this daemon.
    #[must_use]
    pub fn is_enabled(&self, inspector: &ConfigInspector) -> bool {
        match self.gate {
            DaemonGate::Router(protocol) => inspector.is_protocol_enabled(protocol),
            DaemonGate::PimFamily => inspector.wants_pim_family(),
        }
    }

    /// Protocol-specific flags, excluding the daemon-mode flag.
    #[must_use]
    pub fn flags(&self, inspector: &ConfigInspector) -> Vec<&'static str> {
        match self.gate {
            DaemonGate::PimFamily if inspector.wants_ipv6_variant() => vec![PIM_IPV6_FLAG],
            DaemonGate::Router(_) | DaemonGate::PimFamily => Vec::new(),
        }
    }
}

/// Optional daemons in launch order.
pub const OPTIONAL_DAEMONS: [DaemonSpec; 7] = [
    DaemonSpec::router("ripd", "rip"),
    DaemonSpec::router("ripngd", "ripng"),
    DaemonSpec::router("ospf6d", "ospf6"),
    DaemonSpec::router("ospfd", "ospf"),
    DaemonSpec::router("bgpd", "bgp"),
    DaemonSpec::router("babeld", "babel"),
    DaemonSpec {
        name: "xpimd",
        gate: DaemonGate::PimFamily,
    },
];
