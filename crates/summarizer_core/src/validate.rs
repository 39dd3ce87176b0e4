use crate::FileDescriptor;

pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("file exceeds the maximum size")]
    Oversized,
    #[error("file type is not supported")]
    UnsupportedType,
    #[error("file is empty")]
    Empty,
    #[error("file was rejected by the picker")]
    Rejected,
}

pub type ValidationResult = Result<(), ValidationFailure>;

/// Local gate run before a file may be uploaded. Looks at metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileValidator {
    max_bytes: u64,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new(MAX_FILE_BYTES)
    }
}

impl FileValidator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Rules run in order and the first failure wins: extension, emptiness,
    /// size limit, then any rejection reported by the picker.
    pub fn validate(&self, file: &FileDescriptor) -> ValidationResult {
        // The extension comes from the name; the declared MIME type is not trusted.
        let extension = crate::input::extension_of(&file.name);
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ValidationFailure::UnsupportedType);
        }
        if file.size_bytes == 0 {
            return Err(ValidationFailure::Empty);
        }
        if file.size_bytes > self.max_bytes {
            return Err(ValidationFailure::Oversized);
        }
        if file.picker_rejected {
            return Err(ValidationFailure::Rejected);
        }
        Ok(())
    }
}
