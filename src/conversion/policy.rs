use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

/// How bytes are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Space-separated decimal value of every byte. Lossless.
    #[default]
    Decimal,
    /// UTF-8 decode; invalid input is an error.
    Utf8,
    /// UTF-8 decode with U+FFFD for invalid sequences.
    Utf8Lossy,
}

impl Policy {
    pub const NAMES: [&'static str; 3] = ["decimal", "utf8", "utf8-lossy"];

    pub fn render(&self, name: &str, bytes: &[u8]) -> Result<String, ConvertError> {
        match self {
            Policy::Decimal => Ok(decimal_listing(bytes)),
            Policy::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| ConvertError::InvalidUtf8 {
                    name: name.to_string(),
                    valid_up_to: e.valid_up_to(),
                }),
            Policy::Utf8Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Decimal => "decimal",
            Policy::Utf8 => "utf8",
            Policy::Utf8Lossy => "utf8-lossy",
        };
        f.write_str(name)
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decimal" => Ok(Policy::Decimal),
            "utf8" => Ok(Policy::Utf8),
            "utf8-lossy" => Ok(Policy::Utf8Lossy),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

fn decimal_listing(bytes: &[u8]) -> String {
    // at most "255 " per byte
    let mut out = String::with_capacity(bytes.len() * 4);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&byte.to_string());
    }
    out
}
