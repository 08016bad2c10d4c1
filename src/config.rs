//! Convenience constructors for [`SessionConfig`] and [`Session`].

use crate::error::Result;
use crate::header::NodeAddress;
use crate::session::{Protocol, Session, SessionConfig};

/// Builds a [`SessionConfig`] from plain node numbers, defaulting to network
/// 0 for both ends and the CPU unit (unit 0) — the common case of a single
/// PC talking to a single PLC on the local network.
///
/// # Errors
///
/// Returns `FinsError::InvalidAddress` if either node number is out of
/// range.
pub fn simple_config(
    host: impl Into<String>,
    plc_node: u8,
    pc_node: u8,
    protocol: Protocol,
    port: u16,
) -> Result<SessionConfig> {
    Ok(SessionConfig::new(host)
        .with_port(port)
        .with_protocol(protocol)
        .with_destination(NodeAddress::plc_node(plc_node, 0)?)
        .with_source(NodeAddress::pc_node(pc_node, 0)?))
}

/// Builds a fully-specified [`SessionConfig`], warning on stderr if the PLC
/// and PC node addresses are on different networks — a configuration that
/// works on some gateway topologies but is usually a mistake.
#[allow(clippy::too_many_arguments)]
pub fn create_config(
    host: impl Into<String>,
    port: u16,
    protocol: Protocol,
    timeout: std::time::Duration,
    plc_node: NodeAddress,
    pc_node: NodeAddress,
    icf: u8,
) -> SessionConfig {
    if plc_node.network != pc_node.network {
        eprintln!(
            "warning: PLC node is on network {} but PC node is on network {} — \
             cross-network addressing requires a gateway hop count greater than 0",
            plc_node.network, pc_node.network
        );
    }

    SessionConfig::new(host)
        .with_port(port)
        .with_protocol(protocol)
        .with_timeout(timeout)
        .with_icf(icf)
        .with_destination(plc_node)
        .with_source(pc_node)
}

/// Builds a [`Session`] from plain node numbers and connects it immediately.
///
/// # Errors
///
/// Returns an error if the node numbers are out of range or the initial
/// connection attempt fails.
pub fn quick_connect(
    host: impl Into<String>,
    plc_node: u8,
    pc_node: u8,
    protocol: Protocol,
) -> Result<Session> {
    let config = simple_config(host, plc_node, pc_node, protocol, crate::transport::DEFAULT_FINS_PORT)?;
    let session = Session::new(config);
    session.connect()?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_config_builds_node_addresses() {
        let config = simple_config("192.168.0.1", 10, 1, Protocol::Udp, 9600).unwrap();
        assert_eq!(format!("{config:?}").contains("192.168.0.1"), true);
    }

    #[test]
    fn test_simple_config_rejects_invalid_node() {
        assert!(simple_config("192.168.0.1", 255, 1, Protocol::Udp, 9600).is_err());
    }

    #[test]
    fn test_create_config_same_network_is_silent() {
        let plc = NodeAddress::new(0, 10, 0).unwrap();
        let pc = NodeAddress::new(0, 1, 0).unwrap();
        let config = create_config(
            "192.168.0.1",
            9600,
            Protocol::Udp,
            std::time::Duration::from_secs(5),
            plc,
            pc,
            0x80,
        );
        assert!(format!("{config:?}").contains("192.168.0.1"));
    }

    #[test]
    fn test_create_config_cross_network_still_builds() {
        let plc = NodeAddress::new(1, 10, 0).unwrap();
        let pc = NodeAddress::new(0, 1, 0).unwrap();
        let config = create_config(
            "192.168.0.1",
            9600,
            Protocol::Udp,
            std::time::Duration::from_secs(5),
            plc,
            pc,
            0x80,
        );
        assert!(format!("{config:?}").contains("192.168.0.1"));
    }
}
