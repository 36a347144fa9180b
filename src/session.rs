//! Draft recovery between runs.
//!
//! The editing state (template, values and title) is kept in a small JSON file
//! so an interrupted session can be resumed. Drafts expire after a maximum age.

use crate::config::SessionConfig;
use crate::debounce::Debouncer;
use crate::error::PromptgenResult;
use crate::placeholder::ValueMap;
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub template: String,
    pub values: ValueMap,
    pub title: String,
    pub last_modified: DateTime<Utc>,
}

impl SessionDraft {
    pub fn new(template: &str, values: &ValueMap, title: &str) -> Self {
        Self {
            template: template.to_string(),
            values: values.clone(),
            title: title.to_string(),
            last_modified: Utc::now(),
        }
    }

    /// Compares everything except the modification time.
    pub fn same_content(&self, other: &SessionDraft) -> bool {
        self.template == other.template && self.values == other.values && self.title == other.title
    }
}

/// Draft file on disk.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
    max_age: TimeDelta,
}

impl DraftStore {
    pub fn new<P: AsRef<Path>>(path: P, max_age: TimeDelta) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_age,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the draft, creating missing parent directories.
    pub fn save(&self, draft: &SessionDraft) -> PromptgenResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string(draft)?;
        fs::write(&self.path, content)?;
        debug!("Session draft written to {}", self.path.display());
        Ok(())
    }

    /// Loads the draft unless it is missing, unreadable or older than the maximum age.
    pub fn load(&self, now: DateTime<Utc>) -> Option<SessionDraft> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to load session draft: {e}");
                return None;
            }
        };

        let draft: SessionDraft = match serde_json::from_str(&content) {
            Ok(draft) => draft,
            Err(e) => {
                warn!("Failed to load session draft: {e}");
                return None;
            }
        };

        if now - draft.last_modified >= self.max_age {
            debug!("Ignoring session draft from {}", draft.last_modified);
            return None;
        }
        Some(draft)
    }

    /// Removes the draft file. A missing file is not an error.
    pub fn clear(&self) -> PromptgenResult<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Tracks unsaved edits and writes them to a `DraftStore` after a debounce delay.
#[derive(Debug)]
pub struct SessionTracker {
    enabled: bool,
    debouncer: Debouncer,
    last_written: Option<SessionDraft>,
    pending: Option<SessionDraft>,
}

impl SessionTracker {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            enabled: config.enabled,
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            last_written: None,
            pending: None,
        }
    }

    /// Loads the stored draft and treats it as already written.
    pub fn restore(&mut self, store: &DraftStore, now: DateTime<Utc>) -> Option<SessionDraft> {
        let draft = store.load(now)?;
        self.last_written = Some(draft.clone());
        Some(draft)
    }

    /// Records the current editing state.
    pub fn observe(&mut self, draft: SessionDraft, now: Instant) {
        if !self.enabled {
            return;
        }
        if self
            .last_written
            .as_ref()
            .is_some_and(|written| written.same_content(&draft))
        {
            self.pending = None;
            self.debouncer.cancel();
            return;
        }
        self.pending = Some(draft);
        self.debouncer.schedule(now);
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.pending.is_some()
    }

    /// Writes the pending draft once the debounce delay elapsed.
    ///
    /// # Returns
    /// * `PromptgenResult<bool>` - Whether a draft was written
    pub fn flush(&mut self, store: &DraftStore, now: Instant) -> PromptgenResult<bool> {
        if !self.debouncer.fire(now) {
            return Ok(false);
        }
        self.flush_now(store)
    }

    /// Writes the pending draft without waiting, e.g. before exiting.
    pub fn flush_now(&mut self, store: &DraftStore) -> PromptgenResult<bool> {
        self.debouncer.cancel();
        let Some(draft) = self.pending.take() else {
            return Ok(false);
        };
        if let Err(e) = store.save(&draft) {
            self.pending = Some(draft);
            return Err(e);
        }
        self.last_written = Some(draft);
        Ok(true)
    }

    /// Writes `draft` immediately.
    pub fn save_now(&mut self, store: &DraftStore, draft: SessionDraft) -> PromptgenResult<()> {
        self.debouncer.cancel();
        self.pending = None;
        store.save(&draft)?;
        self.last_written = Some(draft);
        Ok(())
    }

    /// Removes the stored draft and forgets unsaved changes.
    pub fn clear(&mut self, store: &DraftStore) -> PromptgenResult<()> {
        store.clear()?;
        self.debouncer.cancel();
        self.pending = None;
        self.last_written = None;
        Ok(())
    }
}
