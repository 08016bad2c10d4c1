//! Memory area definitions for FINS protocol.

use crate::error::{FinsError, Result};

/// Memory areas available in Omron PLCs.
///
/// Unlike some FINS references, a single area carries one wire code for both
/// word and bit access — the area code plus the address/bit fields together
/// select the exact cell, there is no separate "bit variant" code per area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryArea {
    /// CIO (Core I/O) area - general purpose I/O and internal relays.
    CIO,
    /// WR (Work) area - work bits/words.
    WR,
    /// HR (Holding) area - holding bits/words that retain values.
    HR,
    /// AR (Auxiliary Relay) area - system status/control bits/words.
    AR,
    /// DM (Data Memory) area - general purpose data storage.
    DM,
    /// EM (Extended Memory) area - banked data storage.
    EM,
    /// TIM/CNT (Timer/Counter) area - current values and completion flags.
    TIM,
    /// DR (Data Register) area - index registers used for indirect addressing.
    DR,
    /// IR (Index Register) area - pointer registers used for indirect addressing.
    IR,
}

impl MemoryArea {
    /// Returns the single FINS wire code for this memory area.
    pub(crate) fn code(self) -> u8 {
        match self {
            MemoryArea::CIO => 0x30,
            MemoryArea::WR => 0x31,
            MemoryArea::HR => 0x32,
            MemoryArea::AR => 0x33,
            MemoryArea::DM => 0x82,
            MemoryArea::EM => 0x20,
            MemoryArea::TIM => 0x09,
            MemoryArea::DR => 0x2C,
            MemoryArea::IR => 0x2D,
        }
    }

    /// Parses a textual area prefix (already uppercased), accepting the
    /// known aliases `D` (for `DM`) and `CNT` (for `TIM`).
    pub(crate) fn from_prefix(prefix: &str) -> Result<Self> {
        match prefix {
            "CIO" => Ok(MemoryArea::CIO),
            "WR" => Ok(MemoryArea::WR),
            "HR" => Ok(MemoryArea::HR),
            "AR" => Ok(MemoryArea::AR),
            "DM" | "D" => Ok(MemoryArea::DM),
            "EM" => Ok(MemoryArea::EM),
            "TIM" | "CNT" => Ok(MemoryArea::TIM),
            "DR" => Ok(MemoryArea::DR),
            "IR" => Ok(MemoryArea::IR),
            other => Err(FinsError::invalid_address(format!(
                "unknown memory area prefix '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for MemoryArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            MemoryArea::CIO => "CIO",
            MemoryArea::WR => "WR",
            MemoryArea::HR => "HR",
            MemoryArea::AR => "AR",
            MemoryArea::DM => "DM",
            MemoryArea::EM => "EM",
            MemoryArea::TIM => "TIM",
            MemoryArea::DR => "DR",
            MemoryArea::IR => "IR",
        };
        write!(f, "{tag}")
    }
}
