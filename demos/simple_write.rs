//! Example: Writing data to PLC memory
//!
//! Run with: cargo run --example simple_write
//!
//! This example demonstrates:
//! - Writing words to different memory areas
//! - Writing individual bits
//! - Writing a REAL value
//! - Fill and transfer operations
//! - PLC run/stop control

use omron_fins::session::Protocol;
use omron_fins::{quick_connect, PlcMode};

fn main() -> omron_fins::Result<()> {
    // =========================================================================
    // Connect to PLC
    // =========================================================================

    let session = quick_connect("192.168.1.250", 10, 1, Protocol::Udp)?;

    // =========================================================================
    // Writing Words (16-bit values)
    // =========================================================================

    println!("=== Writing Words ===\n");

    // Write single word to DM area
    session.write("D0", &[1234])?;
    println!("Wrote 1234 to DM0");

    // Write multiple words at once
    session.write("D100", &[100, 200, 300, 400, 500])?;
    println!("Wrote [100, 200, 300, 400, 500] to DM100-DM104");

    // =========================================================================
    // Writing to Different Memory Areas
    // =========================================================================

    println!("\n=== Writing to Different Areas ===\n");

    // CIO (Core I/O) - for outputs and internal relays
    session.write("CIO100", &[0x00FF])?;
    println!("Wrote 0x00FF to CIO100");

    // WR (Work) - for temporary work data
    session.write("WR0", &[42])?;
    println!("Wrote 42 to WR0");

    // HR (Holding) - retentive data that survives power cycles
    session.write("HR0", &[9999])?;
    println!("Wrote 9999 to HR0");

    // =========================================================================
    // Writing Bits
    // =========================================================================

    println!("\n=== Writing Bits ===\n");

    session.write_bit("CIO100.00", true)?;
    println!("Set CIO100.00 to ON");

    session.write_bit("CIO100.01", false)?;
    println!("Set CIO100.01 to OFF");

    // Set multiple bits in sequence
    for bit in 0..8 {
        session.write_bit(format!("CIO200.{bit:02}"), bit % 2 == 0)?;
    }
    println!("Set CIO200 bits 0,2,4,6 to ON and 1,3,5,7 to OFF");

    // =========================================================================
    // REAL Values
    // =========================================================================

    println!("\n=== REAL Values ===\n");

    session.write_real("D200", 3.14159)?;
    println!("Wrote REAL 3.14159 to DM200-201");

    // =========================================================================
    // Fill Operation
    // =========================================================================

    println!("\n=== Fill Operation ===\n");

    session.fill("D400", 100, 0x0000)?;
    println!("Filled DM400-DM499 with 0x0000 (100 words)");

    session.fill("D500", 50, 0xFFFF)?;
    println!("Filled DM500-DM549 with 0xFFFF (50 words)");

    // =========================================================================
    // Transfer Operation
    // =========================================================================

    println!("\n=== Transfer Operation ===\n");

    session.transfer("D0", "D600", 10)?;
    println!("Transferred DM0-DM9 to DM600-DM609");

    session.transfer("D100", "WR100", 5)?;
    println!("Transferred DM100-DM104 to WR100-WR104");

    // =========================================================================
    // PLC Control
    // =========================================================================

    println!("\n=== PLC Control ===\n");

    session.run(PlcMode::Monitor)?;
    println!("PLC set to monitor mode");

    session.stop()?;
    println!("PLC stopped");

    println!("\nWrite example completed!");
    Ok(())
}
