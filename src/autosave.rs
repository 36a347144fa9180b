//! Debounced auto-save of the template being edited.
//!
//! One `AutoSaver` owns at most one auto-save record: the first save creates it,
//! later saves update it in place. Saves are skipped for blank or very short
//! templates and when nothing changed since the previous save.

use crate::config::AutoSaveConfig;
use crate::constants::AUTOSAVE_PREFIX;
use crate::debounce::Debouncer;
use crate::error::PromptgenError;
use crate::placeholder::ValueMap;
use crate::store::PromptRepository;
use chrono::{DateTime, Local, Utc};
use log::{debug, error};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Error,
}

/// Returns true when `title` belongs to an auto-saved prompt.
pub fn is_auto_save(title: &str) -> bool {
    title.starts_with(AUTOSAVE_PREFIX)
}

#[derive(Debug)]
pub struct AutoSaver {
    enabled: bool,
    min_content_length: usize,
    debouncer: Debouncer,
    status: SaveStatus,
    auto_save_id: Option<i64>,
    last_saved: Option<(String, ValueMap)>,
    last_saved_at: Option<DateTime<Utc>>,
}

impl AutoSaver {
    pub fn new(config: &AutoSaveConfig) -> Self {
        Self {
            enabled: config.enabled,
            min_content_length: config.min_content_length,
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            status: SaveStatus::Idle,
            auto_save_id: None,
            last_saved: None,
            last_saved_at: None,
        }
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn auto_save_id(&self) -> Option<i64> {
        self.auto_save_id
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Returns a finished save status (`Saved` or `Error`) to `Idle`.
    pub fn reset_status(&mut self) {
        if self.status != SaveStatus::Saving {
            self.status = SaveStatus::Idle;
        }
    }

    /// Records an edit. Schedules a save unless auto-save is disabled or the
    /// template is blank.
    pub fn on_change(&mut self, template: &str, now: Instant) {
        if !self.enabled || template.trim().is_empty() {
            return;
        }
        self.debouncer.schedule(now);
    }

    /// Saves if the debounce delay elapsed since the last edit.
    ///
    /// # Returns
    /// * `Some(SaveStatus)` if a save was attempted, `None` otherwise
    pub fn tick(
        &mut self,
        repo: &mut dyn PromptRepository,
        template: &str,
        values: &ValueMap,
        now: Instant,
    ) -> Option<SaveStatus> {
        if self.debouncer.fire(now) {
            Some(self.perform(repo, template, values))
        } else {
            None
        }
    }

    /// Saves immediately, dropping any pending debounced save.
    pub fn save_now(
        &mut self,
        repo: &mut dyn PromptRepository,
        template: &str,
        values: &ValueMap,
    ) -> SaveStatus {
        self.debouncer.cancel();
        self.perform(repo, template, values)
    }

    /// Writes the auto-save record. Repository failures are logged and reported
    /// as `SaveStatus::Error`.
    pub fn perform(
        &mut self,
        repo: &mut dyn PromptRepository,
        template: &str,
        values: &ValueMap,
    ) -> SaveStatus {
        if template.trim().is_empty() || template.chars().count() < self.min_content_length {
            debug!(
                "Skipping auto-save: template shorter than {} characters",
                self.min_content_length
            );
            return self.status;
        }

        let unchanged = self
            .last_saved
            .as_ref()
            .is_some_and(|(saved_template, saved_values)| {
                saved_template == template && saved_values == values
            });
        if unchanged {
            debug!("Skipping auto-save: no changes since last save");
            return self.status;
        }

        self.status = SaveStatus::Saving;
        let title = format!("{} {}", AUTOSAVE_PREFIX, Local::now().format("%Y-%m-%d %H:%M:%S"));

        let outcome = match self.auto_save_id {
            Some(id) => match repo.update_prompt(id, &title, template, values) {
                Ok(()) => Ok(id),
                // record deleted elsewhere, start a new one
                Err(PromptgenError::PromptNotFound { .. }) => {
                    debug!("Auto-save record {id} is gone, creating a new one");
                    self.auto_save_id = None;
                    repo.save_prompt(&title, template, values)
                }
                Err(e) => Err(e),
            },
            None => repo.save_prompt(&title, template, values),
        };

        match outcome {
            Ok(id) => {
                debug!("Auto-saved prompt {id}");
                self.auto_save_id = Some(id);
                self.last_saved = Some((template.to_string(), values.clone()));
                self.last_saved_at = Some(Utc::now());
                self.status = SaveStatus::Saved;
            }
            Err(e) => {
                error!("Auto-save failed: {e}");
                self.status = SaveStatus::Error;
            }
        }
        self.status
    }

    /// Deletes this saver's auto-save record.
    pub fn clear(&mut self, repo: &mut dyn PromptRepository) {
        let Some(id) = self.auto_save_id else {
            return;
        };
        match repo.delete_prompt(id) {
            Ok(()) => self.forget(),
            Err(e) => error!("Failed to clear auto-save: {e}"),
        }
    }

    /// Deletes every auto-save record in the repository.
    pub fn purge_all(&mut self, repo: &mut dyn PromptRepository) {
        match repo.delete_auto_saves() {
            Ok(()) => self.forget(),
            Err(e) => error!("Failed to purge auto-saves: {e}"),
        }
    }

    fn forget(&mut self) {
        self.auto_save_id = None;
        self.last_saved = None;
        self.last_saved_at = None;
        self.status = SaveStatus::Idle;
    }
}
