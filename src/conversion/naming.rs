use crate::error::ConvertError;

pub const BIN_EXTENSION: &str = ".bin";
pub const TXT_EXTENSION: &str = ".txt";

/// Which input names the converter takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptMode {
    /// Only names ending in `.bin` (case-sensitive).
    BinOnly,
    AnyExtension,
}

impl AcceptMode {
    pub fn check(&self, name: &str) -> Result<(), ConvertError> {
        match self {
            AcceptMode::BinOnly if !name.ends_with(BIN_EXTENSION) => {
                Err(ConvertError::InvalidFileType {
                    name: name.to_string(),
                    expected: BIN_EXTENSION.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            AcceptMode::BinOnly => ".bin only",
            AcceptMode::AnyExtension => "any extension",
        }
    }
}

/// Replace the final extension of `name` with `.txt`.
///
/// A dot at position zero marks a hidden file, not an extension, so
/// `.profile` becomes `.profile.txt`.
pub fn output_name(name: &str) -> String {
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    format!("{stem}{TXT_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_final_extension_is_replaced() {
        assert_eq!(output_name("archive.tar.bin"), "archive.tar.txt");
        assert_eq!(output_name("dump.bin"), "dump.txt");
    }

    #[test]
    fn names_without_extension_get_one() {
        assert_eq!(output_name("firmware"), "firmware.txt");
        assert_eq!(output_name(".profile"), ".profile.txt");
    }

    #[test]
    fn bare_bin_extension_keeps_empty_stem() {
        assert_eq!(output_name("x.bin"), "x.txt");
        assert_eq!(output_name(".bin"), ".bin.txt");
    }

    #[test]
    fn bin_only_is_case_sensitive() {
        assert!(AcceptMode::BinOnly.check("data.bin").is_ok());
        assert!(matches!(
            AcceptMode::BinOnly.check("DATA.BIN"),
            Err(ConvertError::InvalidFileType { .. })
        ));
        assert!(AcceptMode::BinOnly.check("photo.jpg").is_err());
    }

    #[test]
    fn any_extension_accepts_everything() {
        for name in ["photo.jpg", "noext", ".hidden", "a.b.c"] {
            assert!(AcceptMode::AnyExtension.check(name).is_ok());
        }
    }
}
