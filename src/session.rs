//! The [`Session`] type: a mutex-serialized, auto-reconnecting FINS client.

use std::sync::Mutex;
use std::time::Duration;

use crate::address::{Address, IntoAddress};
use crate::command::{
    real_to_words, ClockReadCommand, ClockWriteCommand, ControllerDataReadCommand,
    ControllerStatusReadCommand, FillCommand, MultipleReadCommand, ReadCommand, RunCommand,
    StopCommand, TransferCommand, WriteCommand, MAX_MULTI_READ_ADDRESSES,
};
use crate::error::{FinsError, Result};
use crate::header::NodeAddress;
use crate::response::{ClockReading, ControllerData, ControllerStatus, FinsResponse};
use crate::transport::{
    TcpTransport, Transport, UdpTransport, DEFAULT_FINS_PORT, DEFAULT_TIMEOUT,
};

/// Which wire carrier a [`Session`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// FINS/UDP.
    Udp,
    /// FINS/TCP (raw FINS frames over a stream socket, no extra framing).
    Tcp,
}

/// Connection-independent settings for a [`Session`]: host, port, protocol,
/// timeout, and the node addressing used for every frame it builds.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    host: String,
    port: u16,
    protocol: Protocol,
    timeout: Duration,
    auto_connect: bool,
    icf: u8,
    destination: NodeAddress,
    source: NodeAddress,
}

impl SessionConfig {
    /// Creates a new configuration with FINS's conventional defaults: UDP,
    /// port 9600, a 5 second timeout, auto-connect enabled, ICF 0x80, and
    /// both nodes defaulting to the local node (network 0, node 0, unit 0).
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_FINS_PORT,
            protocol: Protocol::Udp,
            timeout: DEFAULT_TIMEOUT,
            auto_connect: true,
            icf: 0x80,
            destination: NodeAddress::local(),
            source: NodeAddress::local(),
        }
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the protocol.
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Sets the request/response timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables auto-connect on first use.
    pub fn with_auto_connect(mut self, auto_connect: bool) -> Self {
        self.auto_connect = auto_connect;
        self
    }

    /// Sets the Information Control Field byte used on outbound headers.
    pub fn with_icf(mut self, icf: u8) -> Self {
        self.icf = icf;
        self
    }

    /// Sets the destination (PLC) node address.
    pub fn with_destination(mut self, node: NodeAddress) -> Self {
        self.destination = node;
        self
    }

    /// Sets the source (this host's) node address.
    pub fn with_source(mut self, node: NodeAddress) -> Self {
        self.source = node;
        self
    }

    fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

struct Inner {
    transport: Option<Box<dyn Transport>>,
    sid: u8,
}

/// A FINS session: owns at most one transport at a time, serializes every
/// request/response exchange behind a single mutex, and auto-reconnects on
/// first use when configured to.
pub struct Session {
    config: SessionConfig,
    inner: Mutex<Inner>,
}

impl Session {
    /// Creates a new, not-yet-connected session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner {
                transport: None,
                sid: 0,
            }),
        }
    }

    /// Returns `true` if the session currently holds an open transport.
    pub fn is_connected(&self) -> bool {
        self.lock().transport.is_some()
    }

    /// Opens the transport, if it isn't already open. A no-op when already
    /// connected.
    pub fn connect(&self) -> Result<()> {
        let mut inner = self.lock();
        self.connect_locked(&mut inner)
    }

    /// Closes the transport, if open. Never fails — there is nothing
    /// meaningful to report if the peer has already gone away.
    pub fn disconnect(&self) {
        self.lock().transport = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn connect_locked(&self, inner: &mut Inner) -> Result<()> {
        if inner.transport.is_some() {
            return Ok(());
        }
        let addr = self.config.socket_addr();
        let transport: Box<dyn Transport> = match self.config.protocol {
            Protocol::Udp => Box::new(UdpTransport::connect(&addr, self.config.timeout)?),
            Protocol::Tcp => Box::new(TcpTransport::connect(&addr, self.config.timeout)?),
        };
        inner.transport = Some(transport);
        Ok(())
    }

    fn ensure_connected(&self, inner: &mut Inner) -> Result<()> {
        if inner.transport.is_some() {
            return Ok(());
        }
        if self.config.auto_connect {
            self.connect_locked(inner)
        } else {
            Err(FinsError::connection("session is not connected and auto-connect is disabled"))
        }
    }

    fn next_sid(inner: &mut Inner) -> u8 {
        inner.sid = inner.sid.wrapping_add(1);
        inner.sid
    }

    /// Runs one request/response exchange under the session's lock:
    /// ensures a transport is open, advances the SID, builds the request
    /// frame, sends it, and parses the response. On a timeout or
    /// connection-level failure the transport is torn down so the next
    /// call re-establishes it from scratch.
    fn exchange<F>(&self, build: F) -> Result<FinsResponse>
    where
        F: FnOnce(u8, NodeAddress, NodeAddress) -> Result<Vec<u8>>,
    {
        let mut inner = self.lock();
        self.ensure_connected(&mut inner)?;
        let sid = Self::next_sid(&mut inner);
        let mut request = build(sid, self.config.destination, self.config.source)?;
        request[0] = self.config.icf;

        // Taken out of `inner` for the duration of the exchange rather than
        // borrowed via `.expect()`: the `None` case is then a plain `Result`
        // (reconnect-on-next-call), never a panic, even if a future change
        // ever weakens `ensure_connected`'s postcondition.
        let mut transport = match inner.transport.take() {
            Some(transport) => transport,
            None => {
                return Err(FinsError::connection(
                    "session is not connected and auto-connect is disabled",
                ))
            }
        };

        let outcome = (|| -> Result<FinsResponse> {
            transport.send(&request)?;
            let raw = transport.recv()?;
            let response = FinsResponse::from_bytes(&raw)?;
            response.check_sid(sid)?;
            Ok(response)
        })();

        if !matches!(
            outcome,
            Err(FinsError::Timeout) | Err(FinsError::Connection { .. })
        ) {
            inner.transport = Some(transport);
        }

        outcome
    }

    /// Reads `count` words starting at `addr`.
    pub fn read<A>(&self, addr: A, count: u16) -> Result<Vec<u16>>
    where
        A: IntoAddress,
    {
        let address = addr.into_address()?;
        let response = self.exchange(|sid, dest, src| {
            Ok(ReadCommand::new(dest, src, sid, address, count)?.to_bytes())
        })?;
        response.check_protocol()?;
        response
            .to_words()
            .map_err(|_| FinsError::read("malformed read response"))
    }

    /// Reads a single bit at `addr`.
    pub fn read_bit<A>(&self, addr: A) -> Result<bool>
    where
        A: IntoAddress,
    {
        let address = addr.into_address()?;
        let response = self.exchange(|sid, dest, src| {
            Ok(ReadCommand::new(dest, src, sid, address, 1)?.to_bytes())
        })?;
        response.check_protocol()?;
        response
            .to_bit()
            .map_err(|_| FinsError::read("malformed bit read response"))
    }

    /// Writes `values` starting at `addr`.
    pub fn write<A>(&self, addr: A, values: &[u16]) -> Result<()>
    where
        A: IntoAddress,
    {
        let address = addr.into_address()?;
        let response = self
            .exchange(|sid, dest, src| Ok(WriteCommand::words(dest, src, sid, address, values)?.to_bytes()))
            .map_err(FinsError::into_write)?;
        response.check_protocol()?;
        Ok(())
    }

    /// Writes a single bit at `addr`.
    pub fn write_bit<A>(&self, addr: A, value: bool) -> Result<()>
    where
        A: IntoAddress,
    {
        let address = addr.into_address()?;
        let response = self
            .exchange(|sid, dest, src| Ok(WriteCommand::bit(dest, src, sid, address, value).to_bytes()))
            .map_err(FinsError::into_write)?;
        response.check_protocol()?;
        Ok(())
    }

    /// Fills `count` words starting at `addr` with `value`.
    pub fn fill<A>(&self, addr: A, count: u16, value: u16) -> Result<()>
    where
        A: IntoAddress,
    {
        let address = addr.into_address()?;
        let response = self
            .exchange(|sid, dest, src| Ok(FillCommand::new(dest, src, sid, address, count, value)?.to_bytes()))
            .map_err(FinsError::into_write)?;
        response.check_protocol()?;
        Ok(())
    }

    /// Copies `count` words from `from` to `to`.
    pub fn transfer<A, B>(&self, from: A, to: B, count: u16) -> Result<()>
    where
        A: IntoAddress,
        B: IntoAddress,
    {
        let source_address = from.into_address()?;
        let destination_address = to.into_address()?;
        let response = self
            .exchange(|sid, dest, src| {
                Ok(TransferCommand::new(dest, src, sid, source_address, destination_address, count)?.to_bytes())
            })
            .map_err(FinsError::into_write)?;
        response.check_protocol()?;
        Ok(())
    }

    /// Reads a single REAL (`f32`) value starting at `addr`.
    pub fn read_real<A>(&self, addr: A) -> Result<f32>
    where
        A: IntoAddress,
    {
        let address = addr.into_address()?;
        let response = self.exchange(|sid, dest, src| {
            Ok(ReadCommand::new(dest, src, sid, address, 2)?.to_bytes())
        })?;
        response.check_protocol()?;
        response
            .to_real()
            .map_err(|_| FinsError::read("malformed REAL response"))
    }

    /// Writes a single REAL (`f32`) value starting at `addr`.
    pub fn write_real<A>(&self, addr: A, value: f32) -> Result<()>
    where
        A: IntoAddress,
    {
        let address = addr.into_address()?;
        let words = real_to_words(value);
        let response = self
            .exchange(|sid, dest, src| {
                Ok(WriteCommand::words(dest, src, sid, address, &words)?.to_bytes())
            })
            .map_err(FinsError::into_write)?;
        response.check_protocol()?;
        Ok(())
    }

    /// Reads `count` words from each address in `addresses` (at most
    /// [`MAX_MULTI_READ_ADDRESSES`]) in a single round trip. Returns pairs
    /// of (canonical address string, value) in the order the addresses
    /// were given.
    pub fn read_multiple<A>(&self, addresses: Vec<A>) -> Result<Vec<(String, u16)>>
    where
        A: IntoAddress,
    {
        if addresses.is_empty() {
            return Err(FinsError::invalid_address("address list must not be empty"));
        }
        if addresses.len() > MAX_MULTI_READ_ADDRESSES {
            return Err(FinsError::invalid_address(format!(
                "at most {MAX_MULTI_READ_ADDRESSES} addresses allowed per multi-read, got {}",
                addresses.len()
            )));
        }
        let parsed = addresses
            .into_iter()
            .map(|a| a.into_address())
            .collect::<Result<Vec<Address>>>()?;

        let for_exchange = parsed.clone();
        let response = self.exchange(move |sid, dest, src| {
            Ok(MultipleReadCommand::new(dest, src, sid, for_exchange)?.to_bytes())
        })?;
        response.check_protocol()?;
        let words = response
            .to_words()
            .map_err(|_| FinsError::read("malformed multi-read response"))?;
        if words.len() != parsed.len() {
            return Err(FinsError::read(
                "multi-read response word count does not match address count",
            ));
        }
        Ok(parsed
            .iter()
            .zip(words)
            .map(|(addr, word)| (addr.to_string(), word))
            .collect())
    }

    /// Sets the PLC to the given operating mode.
    pub fn run(&self, mode: crate::command::PlcMode) -> Result<()> {
        let response = self
            .exchange(|sid, dest, src| Ok(RunCommand::new(dest, src, sid, mode).to_bytes()))
            .map_err(FinsError::into_write)?;
        response.check_protocol()?;
        Ok(())
    }

    /// Sets the PLC to program (stopped) mode.
    pub fn stop(&self) -> Result<()> {
        let response = self
            .exchange(|sid, dest, src| Ok(StopCommand::new(dest, src, sid).to_bytes()))
            .map_err(FinsError::into_write)?;
        response.check_protocol()?;
        Ok(())
    }

    /// Reads the PLC's run/program/error flags.
    pub fn get_status(&self) -> Result<ControllerStatus> {
        let response = self.exchange(|sid, dest, src| {
            Ok(ControllerStatusReadCommand::new(dest, src, sid).to_bytes())
        })?;
        response.check_protocol()?;
        response
            .to_status()
            .map_err(|_| FinsError::read("malformed controller status response"))
    }

    /// Reads the PLC's model and version strings.
    pub fn get_cpu_unit_data(&self) -> Result<ControllerData> {
        let response = self.exchange(|sid, dest, src| {
            Ok(ControllerDataReadCommand::new(dest, src, sid).to_bytes())
        })?;
        response.check_protocol()?;
        response
            .to_controller_data()
            .map_err(|_| FinsError::read("malformed controller data response"))
    }

    /// Reads the PLC's current clock.
    pub fn read_clock(&self) -> Result<ClockReading> {
        let response =
            self.exchange(|sid, dest, src| Ok(ClockReadCommand::new(dest, src, sid).to_bytes()))?;
        response.check_protocol()?;
        response
            .to_clock()
            .map_err(|_| FinsError::read("malformed clock response"))
    }

    /// Sets the PLC's clock.
    pub fn write_clock(&self, reading: ClockReading) -> Result<()> {
        let response = self
            .exchange(|sid, dest, src| Ok(ClockWriteCommand::new(dest, src, sid, reading).to_bytes()))
            .map_err(FinsError::into_write)?;
        response.check_protocol()?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("protocol", &self.config.protocol)
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::PlcMode;

    fn local_config() -> SessionConfig {
        SessionConfig::new("127.0.0.1")
            .with_port(19600)
            .with_timeout(Duration::from_millis(50))
    }

    #[test]
    fn test_session_starts_disconnected() {
        let session = Session::new(local_config());
        assert!(!session.is_connected());
    }

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::new("10.0.0.1")
            .with_port(9601)
            .with_protocol(Protocol::Tcp)
            .with_timeout(Duration::from_secs(1))
            .with_auto_connect(false)
            .with_icf(0x80)
            .with_destination(NodeAddress::new(0, 10, 0).unwrap())
            .with_source(NodeAddress::new(0, 1, 0).unwrap());
        assert_eq!(config.socket_addr(), "10.0.0.1:9601");
        assert_eq!(config.protocol, Protocol::Tcp);
        assert!(!config.auto_connect);
    }

    #[test]
    fn test_disconnected_without_auto_connect_fails_fast() {
        let config = local_config().with_auto_connect(false);
        let session = Session::new(config);
        match session.read("D100", 1) {
            Err(FinsError::Connection { .. }) => {}
            other => panic!("expected Connection error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_accepts_a_pre_parsed_address() {
        let config = local_config().with_auto_connect(false);
        let session = Session::new(config);
        let address = crate::address::Address::parse("D100").unwrap();
        match session.read(address, 1) {
            Err(FinsError::Connection { .. }) => {}
            other => panic!("expected Connection error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_multiple_rejects_too_many_addresses() {
        let session = Session::new(local_config());
        let addresses: Vec<&str> = vec!["D0"; MAX_MULTI_READ_ADDRESSES + 1];
        assert!(session.read_multiple(addresses).is_err());
    }

    #[test]
    fn test_read_multiple_rejects_empty() {
        let session = Session::new(local_config());
        let addresses: Vec<&str> = vec![];
        assert!(session.read_multiple(addresses).is_err());
    }

    #[test]
    fn test_run_mode_is_plain_copy() {
        let mode = PlcMode::Run;
        assert_eq!(mode as u8, 0x04);
    }
}
