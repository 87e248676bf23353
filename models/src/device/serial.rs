use crate::{ErrorLocation, ModelError};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// 8-byte hardware identifier of a device.
///
/// Only the first six bytes (the MAC address) are meaningful; the last two are
/// always zero on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Serial(pub [u8; 8]);

impl Serial {
    pub const BROADCAST: Serial = Serial([0; 8]);

    pub fn is_nil(&self) -> bool {
        *self == Self::BROADCAST
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl From<[u8; 8]> for Serial {
    fn from(bytes: [u8; 8]) -> Self {
        Serial(bytes)
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..6] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Serial {
    type Err = ModelError;

    /// Accepts 12 (MAC only) or 16 hex digits, with optional `:` separators.
    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| *c != ':').collect();
        if !digits.chars().all(|c| c.is_ascii_hexdigit())
            || (digits.len() != 12 && digits.len() != 16)
        {
            return Err(ModelError::Validation {
                message: format!("Serial must be 12 or 16 hex digits, got {s:?}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut bytes = [0u8; 8];
        for (i, byte) in bytes.iter_mut().enumerate().take(digits.len() / 2) {
            let pair = &digits[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|e| ModelError::Validation {
                message: format!("Invalid hex in serial {s:?}: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }
        Ok(Serial(bytes))
    }
}

impl Serialize for Serial {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
