//! Media attachments staged on the report form

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::types::MediaKind;

/// Identity of a staged file: name and size together
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub name: String,
    pub size: u64,
}

impl FileKey {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Stable DOM-safe identifier for the preview element
    pub fn element_id(&self) -> String {
        let slug: String = self
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!("media-{}-{}", slug, self.size)
    }
}

/// A user-selected file held in memory until submission
#[derive(Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

impl StagedFile {
    /// Build from file contents; `size` is taken from the data length
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: data.len() as u64,
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn key(&self) -> FileKey {
        FileKey::new(self.name.clone(), self.size)
    }

    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_mime(&self.mime_type)
    }

    /// `data:` URL used as the preview source
    pub fn preview_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_data_url() {
        let file = StagedFile::new("a.png", "image/png", b"hi".to_vec());
        assert_eq!(file.size, 2);
        assert_eq!(file.preview_data_url(), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_element_id_is_dom_safe() {
        let key = FileKey::new("my photo (1).jpg", 1024);
        assert_eq!(key.element_id(), "media-my-photo--1--jpg-1024");
    }
}
