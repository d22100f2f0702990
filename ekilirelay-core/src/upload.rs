/// A single file to be sent to the Relay storage endpoint.
///
/// No size or type checks are applied; the Relay service is the only judge of what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// The file name reported in the multipart `file` field.
    pub file_name: String,

    /// The raw file contents.
    pub content: Vec<u8>,

    /// Optional MIME type, eg. `image/png`.
    pub mime_type: Option<String>,
}

impl FileUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            mime_type: None,
        }
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
