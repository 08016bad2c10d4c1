//! # Omron FINS Protocol Library
//!
//! A Rust library for communicating with Omron PLCs using the FINS (Factory
//! Interface Network Service) protocol.
//!
//! This is a **protocol-only** library — no business logic, polling,
//! schedulers, or application-level features. Each call produces exactly 1
//! request and 1 response. No automatic retries or caching; the only
//! automatic behavior is optional lazy reconnection on first use.
//!
//! ## Features
//!
//! - **Protocol-only** — focuses solely on FINS protocol implementation
//! - **Deterministic** — each call produces exactly 1 request and 1 response
//! - **Type-safe** — memory areas as enums, compile-time validation
//! - **No panics** — all errors returned as `Result<T, FinsError>`
//! - **Complete API** — read, write, fill, transfer, run/stop, clock, status
//! - **Two transports** — FINS/UDP and FINS/TCP behind one [`Session`] type
//! - **Utility functions** — bit manipulation, formatting, and conversion helpers
//!
//! ## Quick Start
//!
//! ```no_run
//! use omron_fins::{quick_connect, session::Protocol};
//!
//! fn main() -> omron_fins::Result<()> {
//!     // Connect to a PLC at node 10, identifying ourselves as node 1.
//!     let session = quick_connect("192.168.1.250", 10, 1, Protocol::Udp)?;
//!
//!     // Read D1 (1 word from DM area)
//!     let data = session.read("D1", 1)?;
//!     println!("D1 = {:?}", data);
//!
//!     // Read 10 words from DM100
//!     let data = session.read("D100", 10)?;
//!     println!("DM100-109: {:?}", data);
//!
//!     // Write values to DM200
//!     session.write("D200", &[0x1234, 0x5678])?;
//!
//!     // Read a single bit from CIO 0.05
//!     let bit = session.read_bit("CIO0.05")?;
//!     println!("CIO 0.05 = {}", bit);
//!
//!     // Write a single bit
//!     session.write_bit("CIO0.05", true)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Memory Areas
//!
//! The library supports the following Omron PLC memory areas. Each area
//! carries one wire code; whether a read/write is word- or bit-addressed is
//! determined by the [`Address`] itself, not by the area.
//!
//! | Area | Description | Textual prefix |
//! |------|-------------|-----------------|
//! | [`MemoryArea::CIO`] | Core I/O — inputs, outputs, internal relays | `CIO` |
//! | [`MemoryArea::WR`] | Work area — temporary work bits/words | `WR` |
//! | [`MemoryArea::HR`] | Holding area — retentive bits/words | `HR` |
//! | [`MemoryArea::AR`] | Auxiliary Relay — system status/control | `AR` |
//! | [`MemoryArea::DM`] | Data Memory — numeric data storage | `DM` or `D` |
//! | [`MemoryArea::EM`] | Extended Memory — banked data storage | `EM` |
//! | [`MemoryArea::TIM`] | Timer/Counter current values | `TIM` or `CNT` |
//! | [`MemoryArea::DR`] | Data Register (indirect addressing) | `DR` |
//! | [`MemoryArea::IR`] | Index Register (indirect addressing) | `IR` |
//!
//! Addresses can be given as a pre-parsed [`Address`], or as any `&str`/
//! `String` (e.g. `"D100"`, `"CIO0.05"`) accepted via [`Address::parse`] — a
//! call site can use whichever is more convenient. Every address parameter
//! is bounded by [`IntoAddress`], which supplies both conversions.
//!
//! ## Core Operations
//!
//! ### Word Operations
//!
//! ```no_run
//! # use omron_fins::{quick_connect, session::Protocol};
//! # let session = quick_connect("192.168.1.250", 10, 1, Protocol::Udp).unwrap();
//! // Read words
//! let data = session.read("D100", 10)?;
//!
//! // Write words
//! session.write("D200", &[0x1234, 0x5678])?;
//!
//! // Fill memory with a value
//! session.fill("D100", 50, 0x0000)?;
//!
//! // Transfer between addresses
//! session.transfer("D100", "D200", 10)?;
//! # Ok::<(), omron_fins::FinsError>(())
//! ```
//!
//! ### Bit Operations
//!
//! ```no_run
//! # use omron_fins::{quick_connect, session::Protocol};
//! # let session = quick_connect("192.168.1.250", 10, 1, Protocol::Udp).unwrap();
//! // Read a bit (CIO 0.05)
//! let bit = session.read_bit("CIO0.05")?;
//!
//! // Write a bit
//! session.write_bit("CIO0.05", true)?;
//! # Ok::<(), omron_fins::FinsError>(())
//! ```
//!
//! ### REAL and Multi-Address Reads
//!
//! ```no_run
//! # use omron_fins::{quick_connect, session::Protocol};
//! # let session = quick_connect("192.168.1.250", 10, 1, Protocol::Udp).unwrap();
//! // f32 (REAL) - 2 words, word-swapped on the wire
//! let temp: f32 = session.read_real("D100")?;
//! session.write_real("D100", 3.14159)?;
//!
//! // One word from each of several addresses in a single round trip
//! let values = session.read_multiple(vec!["D0", "D1", "CIO10"])?;
//! for (address, value) in values {
//!     println!("{address} = {value}");
//! }
//! # Ok::<(), omron_fins::FinsError>(())
//! ```
//!
//! ### PLC Control
//!
//! ```no_run
//! # use omron_fins::{quick_connect, session::Protocol};
//! # use omron_fins::PlcMode;
//! # let session = quick_connect("192.168.1.250", 10, 1, Protocol::Udp).unwrap();
//! // Put PLC in monitor (running, online edits allowed) mode
//! session.run(PlcMode::Monitor)?;
//!
//! // Stop PLC
//! session.stop()?;
//!
//! // Query run/program/error flags
//! let status = session.get_status()?;
//! println!("running: {}", status.run_mode);
//!
//! // Model and firmware version
//! let data = session.get_cpu_unit_data()?;
//! println!("{} {}", data.controller_model, data.controller_version);
//!
//! // PLC's current clock
//! let clock = session.read_clock()?;
//! println!("{}-{}-{}", clock.year, clock.month, clock.day);
//! # Ok::<(), omron_fins::FinsError>(())
//! ```
//!
//! ## Utility Functions
//!
//! The [`utils`] module provides helper functions for bit manipulation and formatting:
//!
//! ```
//! use omron_fins::utils::{get_bit, set_bit, word_to_bits, format_binary, format_hex};
//!
//! let value: u16 = 0b1010_0101;
//!
//! // Get individual bits
//! assert!(get_bit(value, 0));   // bit 0 is ON
//! assert!(!get_bit(value, 1));  // bit 1 is OFF
//!
//! // Modify bits
//! let modified = set_bit(value, 1, true);
//!
//! // Convert to bit array
//! let bits = word_to_bits(value);
//!
//! // Format for display
//! println!("{}", format_binary(value));  // "0b0000_0000_1010_0101"
//! println!("{}", format_hex(value));     // "0x00A5"
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, FinsError>`]. The library never panics
//! in public code. Errors are a closed taxonomy of six kinds, so callers can
//! match on category rather than parsing reason strings:
//!
//! ```no_run
//! use omron_fins::{quick_connect, session::Protocol, FinsError};
//!
//! let session = quick_connect("192.168.1.250", 10, 1, Protocol::Udp)?;
//!
//! match session.read("D100", 10) {
//!     Ok(data) => println!("Data: {:?}", data),
//!     Err(FinsError::Timeout) => println!("Communication timeout"),
//!     Err(FinsError::Protocol { main_code, sub_code }) => {
//!         println!("PLC error: main=0x{:02X}, sub=0x{:02X}", main_code, sub_code);
//!     }
//!     Err(FinsError::InvalidAddress { reason }) => {
//!         println!("Invalid addressing: {}", reason);
//!     }
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok::<(), FinsError>(())
//! ```
//!
//! ## Configuration
//!
//! ```no_run
//! use omron_fins::session::{Protocol, SessionConfig};
//! use omron_fins::NodeAddress;
//! use std::time::Duration;
//!
//! let config = SessionConfig::new("192.168.1.250")
//!     .with_port(9601)                              // Custom port (default: 9600)
//!     .with_protocol(Protocol::Tcp)                 // FINS/TCP instead of FINS/UDP
//!     .with_timeout(Duration::from_secs(5))         // Custom timeout (default: 5s)
//!     .with_destination(NodeAddress::plc_node(10, 0).unwrap())
//!     .with_source(NodeAddress::pc_node(1, 0).unwrap());
//! ```
//!
//! Or use the convenience constructors in [`simple_config`] and
//! [`create_config`] for the common node-number-only case.
//!
//! ## Design Philosophy
//!
//! This library follows the principle of **determinism over abstraction**:
//!
//! 1. Each operation does exactly what it says
//! 2. No magic or implicit behavior beyond optional lazy reconnection
//! 3. The application has full control over retry and caching
//! 4. Errors are always explicit and descriptive

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod address;
mod command;
mod config;
mod error;
mod header;
mod memory;
mod response;
pub mod session;
mod transport;
pub mod utils;

// Public re-exports
pub use address::{Address, IntoAddress};
pub use command::{
    ClockReadCommand, ClockWriteCommand, ControllerDataReadCommand, ControllerStatusReadCommand,
    FillCommand, MultipleReadCommand, PlcMode, ReadCommand, RunCommand, StopCommand,
    TransferCommand, WriteCommand, MAX_MULTI_READ_ADDRESSES, MAX_WORDS_PER_COMMAND,
};
pub use config::{create_config, quick_connect, simple_config};
pub use error::{fins_error_description, FinsError, Result};
pub use header::{FinsHeader, NodeAddress, FINS_HEADER_SIZE};
pub use memory::MemoryArea;
pub use response::{ClockReading, ControllerData, ControllerStatus, FinsResponse};
pub use session::{Protocol, Session, SessionConfig};
pub use transport::{
    TcpTransport, Transport, UdpTransport, DEFAULT_FINS_PORT, DEFAULT_TIMEOUT, MAX_PACKET_SIZE,
};
