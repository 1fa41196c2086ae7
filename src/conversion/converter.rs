use log::{debug, info};

use super::naming::{output_name, AcceptMode};
use super::policy::Policy;
use super::source::SourceFile;
use crate::error::ConvertError;

/// Text produced from one source file, plus the name to save it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub text: String,
    pub output_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    policy: Policy,
    accept_mode: AcceptMode,
}

impl Converter {
    pub fn new(policy: Policy, accept_mode: AcceptMode) -> Self {
        Self {
            policy,
            accept_mode,
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn accept_mode(&self) -> AcceptMode {
        self.accept_mode
    }

    /// Name check done before any bytes are read.
    pub fn validate(&self, name: &str) -> Result<(), ConvertError> {
        self.accept_mode.check(name)
    }

    pub fn accept(&self, file: &SourceFile) -> Result<ConversionResult, ConvertError> {
        self.validate(file.name())?;
        debug!(
            "Converting {} ({} bytes) with {} policy",
            file.name(),
            file.bytes().len(),
            self.policy
        );
        let text = self.policy.render(file.name(), file.bytes())?;
        let result = ConversionResult {
            text,
            output_name: output_name(file.name()),
        };
        info!("Converted {} -> {}", file.name(), result.output_name);
        Ok(result)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Policy::Decimal, AcceptMode::BinOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_converter_lists_bytes() {
        let file = SourceFile::new("sample.bin", vec![0x00, 0x41, 0xFF]);
        let result = Converter::default().accept(&file).unwrap();
        assert_eq!(result.text, "0 65 255");
        assert_eq!(result.output_name, "sample.txt");
    }

    #[test]
    fn strict_mode_rejects_before_rendering() {
        // invalid UTF-8 too, so a rendered attempt would surface a different error
        let file = SourceFile::new("photo.jpg", vec![0xFF]);
        let converter = Converter::new(Policy::Utf8, AcceptMode::BinOnly);
        assert!(matches!(
            converter.accept(&file),
            Err(ConvertError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn permissive_mode_renames_any_extension() {
        let file = SourceFile::new("notes.md", b"# hi".to_vec());
        let converter = Converter::new(Policy::Utf8, AcceptMode::AnyExtension);
        let result = converter.accept(&file).unwrap();
        assert_eq!(result.text, "# hi");
        assert_eq!(result.output_name, "notes.txt");
    }

    #[test]
    fn nested_extension_keeps_inner_part() {
        let file = SourceFile::new("archive.tar.bin", vec![1]);
        let result = Converter::default().accept(&file).unwrap();
        assert_eq!(result.output_name, "archive.tar.txt");
    }
}
