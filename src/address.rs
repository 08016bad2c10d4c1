//! Memory addressing: the area/word/bit triple and its textual form.

use crate::error::{FinsError, Result};
use crate::memory::MemoryArea;

/// A fully-resolved memory address: an area, a 16-bit word offset, and an
/// optional bit index within that word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    area: MemoryArea,
    word: u16,
    bit: Option<u8>,
}

impl Address {
    /// Creates a word address (no bit component).
    pub fn word(area: MemoryArea, word: u16) -> Self {
        Self {
            area,
            word,
            bit: None,
        }
    }

    /// Creates a bit address.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidAddress` if `bit` exceeds 15.
    pub fn bit(area: MemoryArea, word: u16, bit: u8) -> Result<Self> {
        if bit > 15 {
            return Err(FinsError::invalid_address(format!(
                "bit {bit} exceeds maximum of 15"
            )));
        }
        Ok(Self {
            area,
            word,
            bit: Some(bit),
        })
    }

    /// The memory area this address refers to.
    pub fn area(&self) -> MemoryArea {
        self.area
    }

    /// The word offset within the area.
    pub fn word_offset(&self) -> u16 {
        self.word
    }

    /// The bit index within the word, if this is a bit address.
    pub fn bit_index(&self) -> Option<u8> {
        self.bit
    }

    /// Parses a textual address such as `"D100"`, `"DM0100"`, or
    /// `"CIO0.05"` into a structured [`Address`].
    ///
    /// Grammar: an optional run of whitespace is trimmed, the remainder is
    /// upper-cased, an optional single `.NN` bit suffix is split off, and
    /// the rest is split at the first digit into an alphabetic area prefix
    /// and a decimal word offset. Both the prefix and the word offset must
    /// be non-empty, the word offset must fit in 16 bits, and a bit suffix
    /// (if present) must be in `0..=15`.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidAddress` for any malformed input.
    pub fn parse(input: &str) -> Result<Self> {
        let upper = input.trim().to_uppercase();

        let dot_count = upper.matches('.').count();
        if dot_count > 1 {
            return Err(FinsError::invalid_address(
                "address must contain at most one '.' bit separator",
            ));
        }

        let (area_word, bit_str) = if dot_count == 1 {
            let mut parts = upper.splitn(2, '.');
            let area_word = parts.next().unwrap();
            let bit_str = parts.next().unwrap();
            (area_word, Some(bit_str))
        } else {
            (upper.as_str(), None)
        };

        let split_at = area_word
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit())
            .map(|(idx, _)| idx)
            .ok_or_else(|| FinsError::invalid_address("address has no numeric word offset"))?;

        let (area_str, word_str) = area_word.split_at(split_at);
        if area_str.is_empty() {
            return Err(FinsError::invalid_address("address is missing an area prefix"));
        }
        if word_str.is_empty() || !word_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(FinsError::invalid_address(
                "address word offset must be a non-empty decimal number",
            ));
        }

        let word: u32 = word_str
            .parse()
            .map_err(|_| FinsError::invalid_address("address word offset is not a valid number"))?;
        if word > u16::MAX as u32 {
            return Err(FinsError::invalid_address(format!(
                "word offset {word} exceeds maximum of {}",
                u16::MAX
            )));
        }

        let area = MemoryArea::from_prefix(area_str)?;

        match bit_str {
            None => Ok(Address::word(area, word as u16)),
            Some(bit_str) => {
                if bit_str.is_empty() || !bit_str.chars().all(|c| c.is_ascii_digit()) {
                    return Err(FinsError::invalid_address(
                        "bit suffix must be a non-empty decimal number",
                    ));
                }
                let bit: u32 = bit_str
                    .parse()
                    .map_err(|_| FinsError::invalid_address("bit suffix is not a valid number"))?;
                if bit > 15 {
                    return Err(FinsError::invalid_address(format!(
                        "bit {bit} exceeds maximum of 15"
                    )));
                }
                Address::bit(area, word as u16, bit as u8)
            }
        }
    }

    /// Encodes the 4-byte wire form: area code, word high byte, word low
    /// byte, bit index (0 for a plain word address).
    pub(crate) fn to_wire(self) -> [u8; 4] {
        let word = self.word.to_be_bytes();
        [self.area.code(), word[0], word[1], self.bit.unwrap_or(0)]
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bit {
            Some(bit) => write!(f, "{}{:04}.{:02}", self.area, self.word, bit),
            None => write!(f, "{}{:04}", self.area, self.word),
        }
    }
}

impl TryFrom<&str> for Address {
    type Error = FinsError;

    fn try_from(value: &str) -> Result<Self> {
        Address::parse(value)
    }
}

impl TryFrom<String> for Address {
    type Error = FinsError;

    fn try_from(value: String) -> Result<Self> {
        Address::parse(&value)
    }
}

/// Accepted as the address argument at every `Session` read/write entry
/// point: either a pre-parsed [`Address`], or any textual form
/// [`Address::parse`] understands.
///
/// `Address` can't implement `TryInto<Address, Error = FinsError>` itself —
/// the standard library's blanket `impl<T> From<T> for T` already gives it
/// `TryInto<Address, Error = Infallible>`, and coherence forbids a second,
/// conflicting `TryFrom<Address>` impl with a different `Error` type. This
/// trait is the two-case alternative spec'd for exactly that reason: one
/// infallible arm for an already-parsed `Address`, one fallible arm per
/// textual type.
pub trait IntoAddress {
    /// Resolves `self` into a structured [`Address`].
    fn into_address(self) -> Result<Address>;
}

impl IntoAddress for Address {
    fn into_address(self) -> Result<Address> {
        Ok(self)
    }
}

impl IntoAddress for &str {
    fn into_address(self) -> Result<Address> {
        Address::parse(self)
    }
}

impl IntoAddress for &String {
    fn into_address(self) -> Result<Address> {
        Address::parse(self)
    }
}

impl IntoAddress for String {
    fn into_address(self) -> Result<Address> {
        Address::parse(&self)
    }
}
