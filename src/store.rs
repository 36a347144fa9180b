//! Storage of saved prompt templates.
//! The engine never depends on this module; it is the persistence side that
//! stores a title, the template and its value map, and lists them by recency.

use crate::autosave::is_auto_save;
use crate::error::{PromptgenError, PromptgenResult};
use crate::placeholder::ValueMap;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A stored prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub id: i64,
    pub title: String,
    pub template: String,
    pub values: ValueMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persistence contract for prompt templates.
pub trait PromptRepository {
    /// Stores a new prompt and returns its id.
    fn save_prompt(&mut self, title: &str, template: &str, values: &ValueMap) -> PromptgenResult<i64>;

    /// Replaces title, template and values of an existing prompt.
    ///
    /// # Errors
    /// * `PromptgenError::PromptNotFound` if no prompt has this id
    fn update_prompt(
        &mut self,
        id: i64,
        title: &str,
        template: &str,
        values: &ValueMap,
    ) -> PromptgenResult<()>;

    /// # Errors
    /// * `PromptgenError::PromptNotFound` if no prompt has this id
    fn delete_prompt(&mut self, id: i64) -> PromptgenResult<()>;

    /// Deletes every auto-saved prompt.
    fn delete_auto_saves(&mut self) -> PromptgenResult<()>;

    /// Deletes every prompt that is not an auto-save.
    fn delete_all_saved_prompts(&mut self) -> PromptgenResult<()>;

    /// All prompts, newest first.
    fn get_all_prompts(&self) -> PromptgenResult<Vec<PromptRecord>>;
}

/// In-process prompt store. Also the on-disk document of `JsonFileRepository`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryRepository {
    #[serde(default)]
    next_id: i64,
    #[serde(default)]
    records: Vec<PromptRecord>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_mut(&mut self, id: i64) -> PromptgenResult<&mut PromptRecord> {
        self.records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(PromptgenError::PromptNotFound { id })
    }
}

impl PromptRepository for MemoryRepository {
    fn save_prompt(&mut self, title: &str, template: &str, values: &ValueMap) -> PromptgenResult<i64> {
        self.next_id += 1;
        let now = Utc::now();
        self.records.push(PromptRecord {
            id: self.next_id,
            title: title.to_string(),
            template: template.to_string(),
            values: values.clone(),
            created_at: now,
            updated_at: now,
        });
        debug!("Saved prompt {} '{}'", self.next_id, title);
        Ok(self.next_id)
    }

    fn update_prompt(
        &mut self,
        id: i64,
        title: &str,
        template: &str,
        values: &ValueMap,
    ) -> PromptgenResult<()> {
        let record = self.find_mut(id)?;
        record.title = title.to_string();
        record.template = template.to_string();
        record.values = values.clone();
        record.updated_at = Utc::now();
        debug!("Updated prompt {id}");
        Ok(())
    }

    fn delete_prompt(&mut self, id: i64) -> PromptgenResult<()> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            return Err(PromptgenError::PromptNotFound { id });
        }
        debug!("Deleted prompt {id}");
        Ok(())
    }

    fn delete_auto_saves(&mut self) -> PromptgenResult<()> {
        self.records.retain(|record| !is_auto_save(&record.title));
        Ok(())
    }

    fn delete_all_saved_prompts(&mut self) -> PromptgenResult<()> {
        self.records.retain(|record| is_auto_save(&record.title));
        Ok(())
    }

    fn get_all_prompts(&self) -> PromptgenResult<Vec<PromptRecord>> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }
}

/// Prompt store kept in a single JSON file, rewritten after every change.
/// A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> PromptgenResult<MemoryRepository> {
        if !self.path.exists() {
            debug!("Prompt store {} does not exist yet", self.path.display());
            return Ok(MemoryRepository::new());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            PromptgenError::StorageError(format!("cannot read {}: {}", self.path.display(), e))
        })
    }

    fn persist(&self, state: &MemoryRepository) -> PromptgenResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content).map_err(PromptgenError::IoError)
    }

    fn modify<T>(&self, op: impl FnOnce(&mut MemoryRepository) -> PromptgenResult<T>) -> PromptgenResult<T> {
        let mut state = self.load()?;
        let result = op(&mut state)?;
        self.persist(&state)?;
        Ok(result)
    }
}

impl PromptRepository for JsonFileRepository {
    fn save_prompt(&mut self, title: &str, template: &str, values: &ValueMap) -> PromptgenResult<i64> {
        self.modify(|state| state.save_prompt(title, template, values))
    }

    fn update_prompt(
        &mut self,
        id: i64,
        title: &str,
        template: &str,
        values: &ValueMap,
    ) -> PromptgenResult<()> {
        self.modify(|state| state.update_prompt(id, title, template, values))
    }

    fn delete_prompt(&mut self, id: i64) -> PromptgenResult<()> {
        self.modify(|state| state.delete_prompt(id))
    }

    fn delete_auto_saves(&mut self) -> PromptgenResult<()> {
        self.modify(|state| state.delete_auto_saves())
    }

    fn delete_all_saved_prompts(&mut self) -> PromptgenResult<()> {
        self.modify(|state| state.delete_all_saved_prompts())
    }

    fn get_all_prompts(&self) -> PromptgenResult<Vec<PromptRecord>> {
        self.load()?.get_all_prompts()
    }
}
