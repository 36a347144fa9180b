use promptgen::autosave::{is_auto_save, AutoSaver, SaveStatus};
use promptgen::config::AutoSaveConfig;
use promptgen::error::{PromptgenError, PromptgenResult};
use promptgen::placeholder::ValueMap;
use promptgen::store::{MemoryRepository, PromptRecord, PromptRepository};
use std::time::{Duration, Instant};

fn values(pairs: &[(&str, &str)]) -> ValueMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn saver() -> AutoSaver {
    AutoSaver::new(&AutoSaveConfig::default())
}

/// Repository whose writes always fail.
struct BrokenRepository;

impl PromptRepository for BrokenRepository {
    fn save_prompt(&mut self, _: &str, _: &str, _: &ValueMap) -> PromptgenResult<i64> {
        Err(PromptgenError::StorageError("disk full".to_string()))
    }

    fn update_prompt(&mut self, _: i64, _: &str, _: &str, _: &ValueMap) -> PromptgenResult<()> {
        Err(PromptgenError::StorageError("disk full".to_string()))
    }

    fn delete_prompt(&mut self, id: i64) -> PromptgenResult<()> {
        Err(PromptgenError::PromptNotFound { id })
    }

    fn delete_auto_saves(&mut self) -> PromptgenResult<()> {
        Err(PromptgenError::StorageError("disk full".to_string()))
    }

    fn delete_all_saved_prompts(&mut self) -> PromptgenResult<()> {
        Ok(())
    }

    fn get_all_prompts(&self) -> PromptgenResult<Vec<PromptRecord>> {
        Ok(Vec::new())
    }
}

#[test]
fn test_is_auto_save() {
    assert!(is_auto_save("[Auto-save] 2024-05-01 12:00:00"));
    assert!(!is_auto_save("My prompt [Auto-save]"));
    assert!(!is_auto_save(""));
}

#[test]
fn test_first_save_creates_then_updates_same_record() {
    let mut repo = MemoryRepository::new();
    let mut saver = saver();

    let status = saver.perform(&mut repo, "Hello ${name}, welcome", &values(&[("name", "")]));
    assert_eq!(status, SaveStatus::Saved);
    let id = saver.auto_save_id().unwrap();
    assert!(saver.last_saved_at().is_some());

    let status = saver.perform(&mut repo, "Hello ${name}, welcome!", &values(&[("name", "Ada")]));
    assert_eq!(status, SaveStatus::Saved);
    assert_eq!(saver.auto_save_id(), Some(id));

    let records = repo.get_all_prompts().unwrap();
    assert_eq!(records.len(), 1);
    assert!(is_auto_save(&records[0].title));
    assert_eq!(records[0].template, "Hello ${name}, welcome!");
    assert_eq!(records[0].values["name"], "Ada");
}

#[test]
fn test_short_or_blank_templates_are_not_saved() {
    let mut repo = MemoryRepository::new();
    let mut saver = saver();

    assert_eq!(saver.perform(&mut repo, "short", &ValueMap::new()), SaveStatus::Idle);
    assert_eq!(saver.perform(&mut repo, "            ", &ValueMap::new()), SaveStatus::Idle);
    assert!(repo.get_all_prompts().unwrap().is_empty());
    assert_eq!(saver.auto_save_id(), None);
}

#[test]
fn test_unchanged_content_is_not_saved_again() {
    let mut repo = MemoryRepository::new();
    let mut saver = saver();
    let template = "A long enough template ${x}";
    let values = values(&[("x", "1")]);

    saver.perform(&mut repo, template, &values);
    let first = repo.get_all_prompts().unwrap()[0].updated_at;

    saver.reset_status();
    assert_eq!(saver.perform(&mut repo, template, &values), SaveStatus::Idle);
    assert_eq!(repo.get_all_prompts().unwrap()[0].updated_at, first);
}

#[test]
fn test_debounced_save_fires_after_delay() {
    let mut repo = MemoryRepository::new();
    let mut saver = saver();
    let start = Instant::now();
    let template = "Summarize ${topic} for ${audience}";
    let values = values(&[("topic", "rust"), ("audience", "")]);

    saver.on_change(template, start);
    assert!(saver.is_pending());
    assert_eq!(
        saver.tick(&mut repo, template, &values, start + Duration::from_millis(500)),
        None
    );

    saver.on_change(template, start + Duration::from_millis(1500));
    assert_eq!(
        saver.tick(&mut repo, template, &values, start + Duration::from_millis(2500)),
        None
    );
    assert_eq!(
        saver.tick(&mut repo, template, &values, start + Duration::from_millis(3500)),
        Some(SaveStatus::Saved)
    );
    assert_eq!(repo.get_all_prompts().unwrap().len(), 1);
}

#[test]
fn test_disabled_or_blank_template_is_not_scheduled() {
    let mut saver = AutoSaver::new(&AutoSaveConfig {
        enabled: false,
        ..AutoSaveConfig::default()
    });
    saver.on_change("A long enough template", Instant::now());
    assert!(!saver.is_pending());

    let mut saver = self::saver();
    saver.on_change("   ", Instant::now());
    assert!(!saver.is_pending());
}

#[test_log::test]
fn test_repository_failure_sets_error_status() {
    let mut repo = BrokenRepository;
    let mut saver = saver();

    let status = saver.save_now(&mut repo, "A long enough template", &ValueMap::new());
    assert_eq!(status, SaveStatus::Error);
    assert_eq!(saver.auto_save_id(), None);

    saver.reset_status();
    assert_eq!(saver.status(), SaveStatus::Idle);
}

#[test]
fn test_clear_deletes_own_record() {
    let mut repo = MemoryRepository::new();
    repo.save_prompt("kept", "manual prompt", &ValueMap::new()).unwrap();
    let mut saver = saver();
    saver.perform(&mut repo, "A long enough template", &ValueMap::new());
    assert_eq!(repo.get_all_prompts().unwrap().len(), 2);

    saver.clear(&mut repo);
    assert_eq!(saver.auto_save_id(), None);
    assert_eq!(saver.status(), SaveStatus::Idle);
    let records = repo.get_all_prompts().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "kept");

    // after clearing, the next save creates a fresh record
    saver.perform(&mut repo, "A long enough template", &ValueMap::new());
    assert_eq!(repo.get_all_prompts().unwrap().len(), 2);
}

#[test]
fn test_purge_all_removes_every_auto_save() {
    let mut repo = MemoryRepository::new();
    repo.save_prompt("[Auto-save] old", "older template", &ValueMap::new()).unwrap();
    repo.save_prompt("kept", "manual prompt", &ValueMap::new()).unwrap();
    let mut saver = saver();
    saver.perform(&mut repo, "A long enough template", &ValueMap::new());

    saver.purge_all(&mut repo);
    assert_eq!(saver.auto_save_id(), None);
    let records = repo.get_all_prompts().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "kept");
}

#[test_log::test]
fn test_failed_purge_keeps_state() {
    let mut memory = MemoryRepository::new();
    let mut saver = saver();
    saver.perform(&mut memory, "A long enough template", &ValueMap::new());
    let id = saver.auto_save_id();

    saver.purge_all(&mut BrokenRepository);
    assert_eq!(saver.auto_save_id(), id);
}

#[test]
fn test_recovers_after_auto_saves_are_deleted_elsewhere() {
    let mut repo = MemoryRepository::new();
    let mut saver = saver();
    saver.perform(&mut repo, "A long enough template", &ValueMap::new());
    let first_id = saver.auto_save_id().unwrap();

    repo.delete_auto_saves().unwrap();

    for attempt in 0..3 {
        let template = format!("A long enough template, edit {attempt}");
        let status = saver.perform(&mut repo, &template, &ValueMap::new());
        assert_eq!(status, SaveStatus::Saved);

        let records = repo.get_all_prompts().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].template, template);
        assert_eq!(saver.auto_save_id(), Some(records[0].id));
    }
    assert_ne!(saver.auto_save_id(), Some(first_id));
}

#[test]
fn test_recovers_after_own_record_is_deleted() {
    let mut repo = MemoryRepository::new();
    repo.save_prompt("kept", "manual prompt", &ValueMap::new()).unwrap();
    let mut saver = saver();
    saver.perform(&mut repo, "A long enough template", &values(&[("x", "1")]));
    let first_id = saver.auto_save_id().unwrap();

    repo.delete_prompt(first_id).unwrap();

    let status = saver.perform(&mut repo, "A long enough template", &values(&[("x", "2")]));
    assert_eq!(status, SaveStatus::Saved);
    let second_id = saver.auto_save_id().unwrap();
    assert_ne!(second_id, first_id);

    // later saves update the new record in place
    saver.perform(&mut repo, "A long enough template", &values(&[("x", "3")]));
    assert_eq!(saver.auto_save_id(), Some(second_id));
    let records = repo.get_all_prompts().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, second_id);
    assert_eq!(records[0].values["x"], "3");
}
