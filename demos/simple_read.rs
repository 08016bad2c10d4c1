//! Example: Reading data from PLC memory
//!
//! Run with: cargo run --example simple_read
//!
//! This example demonstrates:
//! - Reading words from different memory areas
//! - Reading individual bits
//! - Reading a REAL value and a multi-address batch
//! - Using utility functions for bit analysis

use omron_fins::session::Protocol;
use omron_fins::utils::{format_binary, format_hex, get_on_bits, print_bits, word_to_bits};
use omron_fins::{quick_connect, Address};

fn main() -> omron_fins::Result<()> {
    // =========================================================================
    // Connect to PLC
    // =========================================================================

    let session = quick_connect("192.168.1.250", 10, 1, Protocol::Udp)?;

    // =========================================================================
    // Reading Words (16-bit values)
    // =========================================================================

    println!("=== Reading Words ===\n");

    // Read single word from DM area
    let data = session.read("D0", 1)?;
    println!("DM0 = {} (0x{:04X})", data[0], data[0]);

    // Read multiple words
    let data = session.read("D100", 5)?;
    println!("DM100-DM104: {:?}", data);

    // Read from different memory areas
    let cio_data = session.read("CIO0", 1)?;
    let wr_data = session.read("WR0", 1)?;
    let hr_data = session.read("HR0", 1)?;

    println!("CIO0 = 0x{:04X}", cio_data[0]);
    println!("WR0  = 0x{:04X}", wr_data[0]);
    println!("HR0  = 0x{:04X}", hr_data[0]);

    // A pre-parsed Address works at any read/write entry point too, not
    // just `&str`/`String` — useful when an address is built once and
    // reused across several calls.
    let dm100 = Address::parse("D100")?;
    let data = session.read(dm100, 5)?;
    println!("DM100-DM104 (via pre-parsed Address): {:?}", data);

    // =========================================================================
    // Reading Bits
    // =========================================================================

    println!("\n=== Reading Bits ===\n");

    // Read individual bit (CIO 0.05)
    let bit = session.read_bit("CIO0.05")?;
    println!("CIO 0.05 = {}", bit);

    // Read a word and analyze its bits
    let value = session.read("CIO100", 1)?[0];
    println!("\nCIO100 = {} ({})", value, format_hex(value));
    println!("Binary: {}", format_binary(value));

    // Get list of ON bits
    let on_bits = get_on_bits(value);
    println!("Bits that are ON: {:?}", on_bits);

    // Print all bits with indices
    println!("\nAll bits of CIO100:");
    print_bits(value);

    // Convert to array for programmatic access
    let bits_array = word_to_bits(value);
    for (i, bit_value) in bits_array.iter().enumerate() {
        if *bit_value {
            println!("  Bit {} is ON", i);
        }
    }

    // =========================================================================
    // REAL Values
    // =========================================================================

    println!("\n=== REAL Values ===\n");

    // Read f32 (REAL) - 2 words, word-swapped on the wire
    let temperature: f32 = session.read_real("D200")?;
    println!("Temperature (REAL from DM200-201): {:.2}", temperature);

    // =========================================================================
    // Multiple Read (Single Request)
    // =========================================================================

    println!("\n=== Multiple Read ===\n");

    let values = session.read_multiple(vec!["D0", "D100", "CIO0.05"])?;
    for (address, value) in &values {
        println!("{address} = {value}");
    }

    // =========================================================================
    // PLC Status
    // =========================================================================

    println!("\n=== PLC Status ===\n");

    let status = session.get_status()?;
    println!(
        "run_mode={} program_mode={} fatal_error={} non_fatal_error={}",
        status.run_mode, status.program_mode, status.fatal_error, status.non_fatal_error
    );

    println!("\nRead example completed!");
    Ok(())
}
