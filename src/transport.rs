//! Transport layer for FINS communication.
//!
//! This module provides [`UdpTransport`] and [`TcpTransport`], the two wire
//! carriers for FINS frames, behind a shared [`Transport`] trait. The
//! transport layer is completely separated from the protocol layer — it
//! only knows about sockets and bytes.
//!
//! # Design
//!
//! - **Protocol agnostic** - Handles only byte transmission, no FINS knowledge
//! - **Synchronous** - Blocking send/receive with configurable timeout
//! - **Simple** - One socket, one remote address, no connection pooling or
//!   automatic reconnection (that's [`Session`](crate::Session)'s job)
//!
//! # Constants
//!
//! - [`DEFAULT_FINS_PORT`] - Default FINS port (9600), shared by UDP and TCP
//! - [`DEFAULT_TIMEOUT`] - Default timeout (5 seconds)
//! - [`MAX_PACKET_SIZE`] - Read buffer size (2048 bytes)

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use crate::error::{FinsError, Result};

/// Default FINS port, used by both UDP and TCP transports.
pub const DEFAULT_FINS_PORT: u16 = 9600;

/// Default timeout for transport operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Read buffer size. A FINS frame never approaches this size; a single read
/// is sufficient to receive a whole response.
pub const MAX_PACKET_SIZE: usize = 2048;

/// A byte-level carrier for FINS frames.
///
/// Implementors send exactly the bytes they're given and return exactly the
/// bytes the peer sent back — no framing, retries, or reconnection logic.
pub trait Transport: std::fmt::Debug + Send {
    /// Sends a FINS frame.
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Blocks until a response arrives (or the transport's timeout elapses)
    /// and returns its raw bytes.
    fn recv(&mut self) -> Result<Vec<u8>>;
}

fn resolve(addr: &str) -> Result<SocketAddr> {
    addr.to_socket_addrs()?
        .next()
        .ok_or_else(|| FinsError::connection(format!("could not resolve address '{addr}'")))
}

/// UDP transport for FINS communication.
pub struct UdpTransport {
    socket: UdpSocket,
    remote_addr: SocketAddr,
}

impl UdpTransport {
    /// Creates a new UDP transport connected to the specified PLC address.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the socket cannot be created, bound,
    /// configured, or if `addr` cannot be resolved.
    pub fn connect(addr: &str, timeout: Duration) -> Result<Self> {
        let remote_addr = resolve(addr)?;
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(remote_addr)?;
        socket.set_read_timeout(Some(timeout))?;
        socket.set_write_timeout(Some(timeout))?;

        Ok(Self {
            socket,
            remote_addr,
        })
    }

    /// Creates a new UDP transport with the default timeout.
    pub fn connect_with_default_timeout(addr: &str) -> Result<Self> {
        Self::connect(addr, DEFAULT_TIMEOUT)
    }

    /// Returns the remote PLC address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.socket.send(data)?;
        Ok(())
    }

    fn recv(&mut self) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; MAX_PACKET_SIZE];
        let size = self.socket.recv(&mut buffer)?;
        buffer.truncate(size);
        Ok(buffer)
    }
}

impl std::fmt::Debug for UdpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpTransport")
            .field("remote_addr", &self.remote_addr)
            .field("local_addr", &self.socket.local_addr().ok())
            .finish()
    }
}

/// TCP transport for FINS communication.
///
/// Sends raw FINS frames directly over the stream — there is no additional
/// handshake or length-prefix framing layered on top.
pub struct TcpTransport {
    stream: TcpStream,
    remote_addr: SocketAddr,
}

impl TcpTransport {
    /// Creates a new TCP transport connected to the specified PLC address.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the address cannot be resolved, the
    /// connection cannot be established within `timeout`, or the stream
    /// cannot be configured.
    pub fn connect(addr: &str, timeout: Duration) -> Result<Self> {
        let remote_addr = resolve(addr)?;
        let stream = TcpStream::connect_timeout(&remote_addr, timeout)?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;
        stream.set_nodelay(true)?;

        Ok(Self {
            stream,
            remote_addr,
        })
    }

    /// Creates a new TCP transport with the default timeout.
    pub fn connect_with_default_timeout(addr: &str) -> Result<Self> {
        Self::connect(addr, DEFAULT_TIMEOUT)
    }

    /// Returns the remote PLC address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.stream.write_all(data)?;
        Ok(())
    }

    fn recv(&mut self) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; MAX_PACKET_SIZE];
        let size = self.stream.read(&mut buffer)?;
        if size == 0 {
            return Err(FinsError::connection("peer closed the connection"));
        }
        buffer.truncate(size);
        Ok(buffer)
    }
}

impl std::fmt::Debug for TcpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpTransport")
            .field("remote_addr", &self.remote_addr)
            .field("local_addr", &self.stream.local_addr().ok())
            .finish()
    }
}
