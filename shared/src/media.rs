//! Ordered set of staged media files
//!
//! Holds the attachment rules from [`crate::validation`] together with the
//! batch semantics of a file-picker selection.

use crate::models::{FileKey, StagedFile};
use crate::validation::{validate_media_file, MediaRejection, MAX_FILES};

/// Result for one candidate of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Staged(FileKey),
    Rejected(MediaRejection),
}

/// Staged attachments, unique by (name, size), at most [`MAX_FILES`]
#[derive(Debug, Clone, Default)]
pub struct MediaStager {
    files: Vec<StagedFile>,
}

impl MediaStager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a batch of candidates in order.
    ///
    /// Each file is judged on its own. Once the set is full the candidate
    /// that hit the cap is rejected and the remainder of the batch is not
    /// looked at.
    pub fn add_files(&mut self, candidates: Vec<StagedFile>) -> Vec<StageOutcome> {
        let mut outcomes = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match validate_media_file(&candidate, &self.files) {
                Ok(()) => {
                    outcomes.push(StageOutcome::Staged(candidate.key()));
                    self.files.push(candidate);
                }
                Err(rejection @ MediaRejection::TooManyFiles { .. }) => {
                    outcomes.push(StageOutcome::Rejected(rejection));
                    break;
                }
                Err(rejection) => outcomes.push(StageOutcome::Rejected(rejection)),
            }
        }
        outcomes
    }

    /// Remove the entry with exactly this key
    pub fn remove(&mut self, key: &FileKey) -> Option<StagedFile> {
        let index = self
            .files
            .iter()
            .position(|f| f.name == key.name && f.size == key.size)?;
        Some(self.files.remove(index))
    }

    pub fn get(&self, key: &FileKey) -> Option<&StagedFile> {
        self.files
            .iter()
            .find(|f| f.name == key.name && f.size == key.size)
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.files.len() >= MAX_FILES
    }

    /// Text of the file-input label
    pub fn label(&self) -> String {
        match self.files.len() {
            0 => "Click to upload images and videos".to_string(),
            1 => "1 file selected".to_string(),
            n => format!("{} files selected", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::MAX_FILE_SIZE;

    fn image(name: &str, len: usize) -> StagedFile {
        StagedFile::new(name, "image/jpeg", vec![1u8; len])
    }

    fn full_stager() -> MediaStager {
        let mut stager = MediaStager::new();
        let batch = (0..MAX_FILES).map(|i| image(&format!("{}.jpg", i), 8)).collect();
        stager.add_files(batch);
        assert_eq!(stager.len(), MAX_FILES);
        stager
    }

    #[test]
    fn test_sixth_file_rejected() {
        let mut stager = full_stager();
        let outcomes = stager.add_files(vec![image("extra.jpg", 8)]);
        assert!(matches!(
            outcomes.as_slice(),
            [StageOutcome::Rejected(MediaRejection::TooManyFiles { .. })]
        ));
        assert_eq!(stager.len(), MAX_FILES);
    }

    #[test]
    fn test_cap_stops_the_batch() {
        let mut stager = MediaStager::new();
        let batch = (0..7).map(|i| image(&format!("{}.jpg", i), 8)).collect();
        let outcomes = stager.add_files(batch);
        assert_eq!(outcomes.len(), MAX_FILES + 1);
        assert!(matches!(
            outcomes.last(),
            Some(StageOutcome::Rejected(MediaRejection::TooManyFiles { .. }))
        ));
        assert_eq!(stager.len(), MAX_FILES);
    }

    #[test]
    fn test_bad_file_does_not_block_batch() {
        let mut stager = MediaStager::new();
        let outcomes = stager.add_files(vec![
            StagedFile::new("doc.txt", "text/plain", vec![0; 4]),
            image("ok.jpg", 4),
            StagedFile::new("clip.mp4", "video/mp4", vec![0; 4]),
        ]);
        assert!(matches!(outcomes[0], StageOutcome::Rejected(_)));
        assert_eq!(outcomes[1], StageOutcome::Staged(FileKey::new("ok.jpg", 4)));
        assert_eq!(outcomes[2], StageOutcome::Staged(FileKey::new("clip.mp4", 4)));
        assert_eq!(stager.len(), 2);
        assert_eq!(stager.label(), "2 files selected");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut stager = MediaStager::new();
        stager.add_files(vec![image("wave.jpg", 16)]);
        let outcomes = stager.add_files(vec![image("wave.jpg", 16)]);
        assert_eq!(
            outcomes,
            vec![StageOutcome::Rejected(MediaRejection::Duplicate {
                name: "wave.jpg".into()
            })]
        );
        assert_eq!(stager.len(), 1);
    }

    #[test]
    fn test_oversized_rejected() {
        let mut stager = MediaStager::new();
        let outcomes = stager.add_files(vec![image("huge.jpg", MAX_FILE_SIZE as usize + 1)]);
        assert!(matches!(
            outcomes.as_slice(),
            [StageOutcome::Rejected(MediaRejection::TooLarge { .. })]
        ));
        assert!(stager.is_empty());
    }

    #[test]
    fn test_remove_uses_name_and_size() {
        let mut stager = MediaStager::new();
        stager.add_files(vec![image("shore.jpg", 10), image("shore.jpg", 20)]);
        assert_eq!(stager.len(), 2);

        let removed = stager.remove(&FileKey::new("shore.jpg", 20));
        assert_eq!(removed.map(|f| f.size), Some(20));
        assert_eq!(stager.len(), 1);
        assert!(stager.get(&FileKey::new("shore.jpg", 10)).is_some());
        assert!(stager.remove(&FileKey::new("shore.jpg", 20)).is_none());
    }

    #[test]
    fn test_labels() {
        let mut stager = MediaStager::new();
        assert_eq!(stager.label(), "Click to upload images and videos");
        stager.add_files(vec![image("a.jpg", 1)]);
        assert_eq!(stager.label(), "1 file selected");
        stager.clear();
        assert!(stager.is_empty());
    }
}
