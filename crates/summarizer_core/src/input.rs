use bytes::Bytes;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    File,
}

/// A document picked by the user, together with what the picker reported about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    /// Lower-cased extension taken from `name`, empty when the name has none.
    pub extension: String,
    /// Set when the selection mechanism refused the file before it reached us.
    pub picker_rejected: bool,
    pub content: Bytes,
}

impl FileDescriptor {
    /// Describe an in-memory document; size and MIME type are derived from it.
    pub fn from_bytes(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content = content.into();
        let extension = extension_of(&name);
        Self {
            size_bytes: content.len() as u64,
            mime_type: mime_for_extension(&extension).to_string(),
            extension,
            name,
            picker_rejected: false,
            content,
        }
    }

    /// Describe a document by metadata only, e.g. before its bytes are loaded.
    pub fn metadata_only(name: impl Into<String>, size_bytes: u64) -> Self {
        let mut file = Self::from_bytes(name, Bytes::new());
        file.size_bytes = size_bytes;
        file
    }

    pub fn rejected_by_picker(mut self) -> Self {
        self.picker_rejected = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionInput {
    Text(String),
    File(FileDescriptor),
}

impl SubmissionInput {
    pub fn mode(&self) -> InputMode {
        match self {
            SubmissionInput::Text(_) => InputMode::Text,
            SubmissionInput::File(_) => InputMode::File,
        }
    }
}

pub fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "pdf" => PDF_MIME,
        "docx" => DOCX_MIME,
        _ => FALLBACK_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lower_cased_last_segment() {
        assert_eq!(extension_of("Report.Final.PDF"), "pdf");
        assert_eq!(extension_of("notes"), "");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
    }

    #[test]
    fn from_bytes_derives_metadata() {
        let file = FileDescriptor::from_bytes("paper.docx", vec![1u8, 2, 3]);
        assert_eq!(file.size_bytes, 3);
        assert_eq!(file.extension, "docx");
        assert_eq!(file.mime_type, DOCX_MIME);
        assert!(!file.picker_rejected);
    }

    #[test]
    fn unknown_extension_gets_octet_stream() {
        let file = FileDescriptor::metadata_only("a.txt", 100);
        assert_eq!(file.mime_type, FALLBACK_MIME);
        assert_eq!(file.size_bytes, 100);
        assert!(file.content.is_empty());
    }
}
