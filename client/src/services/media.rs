//! Media attachment manager
//!
//! Applies the staging rules and keeps previews, the file input and its
//! label in step with the staged set.

use std::cell::RefCell;

use shared::media::{MediaStager, StageOutcome};
use shared::models::{FileKey, StagedFile};
use shared::notify::{Notification, SHORT_ALERT_TIMEOUT};

use super::ports::{FormView, Notifier};

#[derive(Default)]
pub struct MediaManager {
    stager: RefCell<MediaStager>,
}

impl MediaManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a picker selection; rejections are announced per file
    pub fn add_files<V: FormView, N: Notifier>(
        &self,
        candidates: Vec<StagedFile>,
        view: &V,
        notifier: &N,
    ) -> Vec<StageOutcome> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let outcomes = self.stager.borrow_mut().add_files(candidates);
        for outcome in &outcomes {
            match outcome {
                StageOutcome::Staged(key) => {
                    if let Some(file) = self.stager.borrow().get(key) {
                        view.add_preview(file);
                    }
                }
                StageOutcome::Rejected(rejection) => {
                    tracing::debug!(file = rejection.file_name(), "Attachment rejected");
                    notifier.notify(Notification::warning(rejection.to_string()));
                }
            }
        }
        self.sync(view);
        outcomes
    }

    /// Remove one staged file and its preview
    pub fn remove_file<V: FormView, N: Notifier>(
        &self,
        key: &FileKey,
        view: &V,
        notifier: &N,
    ) -> Option<StagedFile> {
        let removed = self.stager.borrow_mut().remove(key)?;
        view.remove_preview(key);
        self.sync(view);
        notifier.notify(
            Notification::info("File removed successfully").with_timeout(SHORT_ALERT_TIMEOUT),
        );
        Some(removed)
    }

    pub fn clear<V: FormView>(&self, view: &V) {
        self.stager.borrow_mut().clear();
        view.clear_previews();
        self.sync(view);
    }

    pub fn files(&self) -> Vec<StagedFile> {
        self.stager.borrow().files().to_vec()
    }

    pub fn len(&self) -> usize {
        self.stager.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stager.borrow().is_empty()
    }

    pub fn label(&self) -> String {
        self.stager.borrow().label()
    }

    fn sync<V: FormView>(&self, view: &V) {
        let stager = self.stager.borrow();
        view.sync_file_input(stager.files());
        view.set_media_label(&stager.label());
    }
}
