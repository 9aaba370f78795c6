//! Task store: owns the task collection and keeps it persisted.
//!
//! Every mutation is expressed as a [`Command`] and applied by the pure
//! [`apply`] function. [`TaskStore`] then writes a full snapshot of the
//! collection to its [`KeyValueStore`] and returns a [`Notice`] for the user.
//! Writes are best-effort: a failed write keeps the in-memory change and is
//! reported as a warning on the notice.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{Error, Result, StorageError};
use crate::storage::{KeyValueStore, BACKUP_KEY, STORAGE_KEY};
use crate::task::{today, Task, TaskInput};

/// A mutation of the task collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Prepend a fully built task.
    Create(Task),
    /// Replace the editable fields of task `id`, stamping `date`.
    Update { id: u64, date: String, input: TaskInput },
    Delete(u64),
    ToggleCompletion(u64),
    MarkAllCompleted,
    DeleteAll,
}

/// What a command did to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Created { id: u64 },
    Updated { id: u64 },
    Deleted { title: String },
    Toggled { title: String, completed: bool },
    MarkedAllCompleted,
    DeletedAll,
    /// The command named an id that is not in the collection.
    NotFound { id: u64 },
}

/// Apply `command` to `tasks`, returning the new collection and its effect.
///
/// Unknown ids leave the collection untouched.
pub fn apply(mut tasks: Vec<Task>, command: Command) -> (Vec<Task>, Effect) {
    let effect = match command {
        Command::Create(task) => {
            let id = task.id;
            tasks.insert(0, task);
            Effect::Created { id }
        }
        Command::Update { id, date, input } => match tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.apply_input(date, &input);
                Effect::Updated { id }
            }
            None => Effect::NotFound { id },
        },
        Command::Delete(id) => match tasks.iter().position(|t| t.id == id) {
            Some(idx) => {
                let removed = tasks.remove(idx);
                Effect::Deleted { title: removed.title }
            }
            None => Effect::NotFound { id },
        },
        Command::ToggleCompletion(id) => match tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.completed = !t.completed;
                Effect::Toggled { title: t.title.clone(), completed: t.completed }
            }
            None => Effect::NotFound { id },
        },
        Command::MarkAllCompleted => {
            for t in tasks.iter_mut() {
                t.completed = true;
            }
            Effect::MarkedAllCompleted
        }
        Command::DeleteAll => {
            tasks.clear();
            Effect::DeletedAll
        }
    };
    (tasks, effect)
}

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Destructive,
}

/// Transient, user-facing confirmation of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    /// Set when the change could not be persisted.
    pub warning: Option<String>,
}

impl Notice {
    fn for_effect(effect: &Effect) -> Self {
        let (message, kind) = match effect {
            Effect::Created { .. } => ("Task added successfully".to_string(), NoticeKind::Info),
            Effect::Updated { .. } => ("Task updated successfully".to_string(), NoticeKind::Info),
            Effect::Deleted { title } => (format!("Task \"{title}\" deleted"), NoticeKind::Destructive),
            Effect::Toggled { title, completed } => (
                format!(
                    "Task \"{title}\" marked as {}",
                    if *completed { "completed" } else { "incomplete" }
                ),
                NoticeKind::Info,
            ),
            Effect::MarkedAllCompleted => ("All tasks marked as completed".to_string(), NoticeKind::Info),
            Effect::DeletedAll => ("All tasks deleted".to_string(), NoticeKind::Destructive),
            Effect::NotFound { id } => (format!("No task with id {id}"), NoticeKind::Info),
        };
        Notice { message, kind, warning: None }
    }
}

/// Warning shown after an unreadable record was moved aside.
fn backed_up_warning() -> String {
    format!("The old record was kept as '{BACKUP_KEY}'")
}

/// Result of a store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub effect: Effect,
    pub notice: Notice,
}

impl Outcome {
    /// Whether the collection changed.
    pub fn changed(&self) -> bool {
        !matches!(self.effect, Effect::NotFound { .. })
    }
}

/// Where the collection came from when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from the persisted record.
    Stored,
    /// Nothing was stored; started from the welcome task.
    Seeded,
    /// The stored record was unreadable; started from the welcome task.
    Recovered,
}

/// The task collection and the storage it is mirrored to.
#[derive(Debug)]
pub struct TaskStore<S: KeyValueStore> {
    tasks: Vec<Task>,
    storage: S,
    next_id: u64,
    source: LoadSource,
    /// Set when the stored record could not be read or backed up; a write would destroy it.
    write_blocked: bool,
    startup_warning: Option<String>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load the collection from `storage`, seeding it with the welcome task
    /// when nothing usable is stored.
    ///
    /// Read failures are recovered here and never returned. An unreadable
    /// record is copied to [`BACKUP_KEY`] before anything is written; if that
    /// copy fails the store never writes to [`STORAGE_KEY`].
    pub fn open(mut storage: S) -> Self {
        let mut write_blocked = false;
        let mut startup_warning = None;

        let (tasks, source) = match storage.get(STORAGE_KEY) {
            Ok(None) => (Vec::new(), LoadSource::Seeded),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => (tasks, LoadSource::Stored),
                Err(source) => {
                    let err = StorageError::Malformed { key: STORAGE_KEY.to_string(), source };
                    warn!(error = %err, "starting from defaults");
                    match storage.set(BACKUP_KEY, &raw) {
                        Ok(()) => startup_warning = Some(backed_up_warning()),
                        Err(e) => {
                            warn!(error = %e, "could not preserve malformed record");
                            write_blocked = true;
                        }
                    }
                    (Vec::new(), LoadSource::Recovered)
                }
            },
            Err(StorageError::Encoding { key, source }) => {
                warn!(%key, error = %source, "starting from defaults");
                match storage.set_bytes(BACKUP_KEY, source.as_bytes()) {
                    Ok(()) => startup_warning = Some(backed_up_warning()),
                    Err(e) => {
                        warn!(error = %e, "could not preserve unreadable record");
                        write_blocked = true;
                    }
                }
                (Vec::new(), LoadSource::Recovered)
            }
            Err(err) => {
                // The record may still exist; it cannot be copied, so leave it alone.
                warn!(error = %err, "starting from defaults");
                write_blocked = true;
                (Vec::new(), LoadSource::Recovered)
            }
        };

        if write_blocked {
            startup_warning =
                Some("The stored record was left untouched; changes will not be saved this session".to_string());
        }

        let mut store = TaskStore {
            tasks,
            storage,
            next_id: 1,
            source,
            write_blocked,
            startup_warning,
        };
        store.dedupe_ids();

        if source != LoadSource::Stored {
            let id = store.allocate_id();
            store.tasks = vec![Task::welcome(id, today())];
            info!(?source, "seeded task list");
            if !store.write_blocked {
                if let Err(e) = store.persist() {
                    warn!(error = %e, "could not persist seeded task list");
                    store.startup_warning = Some(format!("Changes were not saved: {e}"));
                }
            }
        } else {
            debug!(count = store.tasks.len(), "loaded tasks");
        }
        store
    }

    /// Give any repeated id a fresh one and prime the id counter.
    ///
    /// When fresh ids would run past `u64::MAX` the whole list is renumbered.
    fn dedupe_ids(&mut self) {
        let max = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let mut ids = HashSet::new();
        let dupes = self.tasks.iter().filter(|t| !ids.insert(t.id)).count() as u64;

        match max.checked_add(dupes + 1) {
            Some(_) => {
                self.next_id = max + 1;
                let mut seen = HashSet::new();
                for i in 0..self.tasks.len() {
                    if !seen.insert(self.tasks[i].id) {
                        let fresh = self.next_id;
                        self.next_id += 1;
                        warn!(old = self.tasks[i].id, new = fresh, "reassigned duplicate task id");
                        self.tasks[i].id = fresh;
                        seen.insert(fresh);
                    }
                }
            }
            // Ids are unique; renumber lazily on the next allocation.
            None if dupes == 0 => self.next_id = u64::MAX,
            None => self.renumber(),
        }
    }

    /// Assign ids `1..=n` in display order.
    fn renumber(&mut self) {
        warn!(count = self.tasks.len(), "task ids exhausted, renumbering");
        for (i, task) in self.tasks.iter_mut().enumerate() {
            task.id = i as u64 + 1;
        }
        self.next_id = self.tasks.len() as u64 + 1;
    }

    /// Generate the next task id. Ids are never reused within a session.
    fn allocate_id(&mut self) -> u64 {
        if self.next_id == u64::MAX {
            self.renumber();
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Write a full snapshot of the collection.
    fn persist(&mut self) -> std::result::Result<(), StorageError> {
        if self.write_blocked {
            return Err(StorageError::Protected { key: STORAGE_KEY.to_string() });
        }
        let data = serde_json::to_string_pretty(&self.tasks)?;
        self.storage.set(STORAGE_KEY, &data)
    }

    /// Apply a command, persist the result and describe it.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        let tasks = std::mem::take(&mut self.tasks);
        let (tasks, effect) = apply(tasks, command);
        self.tasks = tasks;

        let mut notice = Notice::for_effect(&effect);
        if let Err(e) = self.persist() {
            warn!(error = %e, "change applied but not persisted");
            notice.warning = Some(format!("Changes were not saved: {e}"));
        }
        debug!(?effect, count = self.tasks.len(), "applied command");
        Outcome { effect, notice }
    }

    /// Add a new task at the top of the list.
    pub fn create(&mut self, input: &TaskInput) -> Result<Outcome> {
        if input.valid_title().is_none() {
            return Err(Error::Validation("Title is required".to_string()));
        }
        let id = self.allocate_id();
        let task = Task::from_input(id, today(), input);
        Ok(self.dispatch(Command::Create(task)))
    }

    /// Replace the editable fields of task `id`. Unknown ids are a no-op.
    pub fn update(&mut self, id: u64, input: &TaskInput) -> Result<Outcome> {
        if input.valid_title().is_none() {
            return Err(Error::Validation("Title is required".to_string()));
        }
        Ok(self.dispatch(Command::Update { id, date: today(), input: input.clone() }))
    }

    /// Remove task `id`. Unknown ids are a no-op.
    pub fn delete(&mut self, id: u64) -> Outcome {
        self.dispatch(Command::Delete(id))
    }

    /// Flip the completion flag of task `id`.
    pub fn toggle_completion(&mut self, id: u64) -> Outcome {
        self.dispatch(Command::ToggleCompletion(id))
    }

    pub fn mark_all_completed(&mut self) -> Outcome {
        self.dispatch(Command::MarkAllCompleted)
    }

    pub fn delete_all(&mut self) -> Outcome {
        self.dispatch(Command::DeleteAll)
    }

    /// Tasks in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Problem met while opening the store, worth telling the user about.
    pub fn startup_notice(&self) -> Option<Notice> {
        let warning = self.startup_warning.clone()?;
        let message = match self.source {
            LoadSource::Recovered => "Stored tasks could not be read",
            LoadSource::Seeded | LoadSource::Stored => "Started a new task list",
        };
        Some(Notice { message: message.to_string(), kind: NoticeKind::Info, warning: Some(warning) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;
    use crate::storage::{FileStore, MemoryStore};
    use crate::task::split_tags;

    fn store_with(tasks: &[Task]) -> TaskStore<MemoryStore> {
        let raw = serde_json::to_string(tasks).unwrap();
        let mut store = TaskStore::open(MemoryStore::with_record(STORAGE_KEY, &raw));
        // Force a snapshot so the record reflects the loaded collection.
        store.persist().unwrap();
        store
    }

    fn persisted(store: &TaskStore<MemoryStore>) -> Vec<Task> {
        let raw = store.storage().get(STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn task(id: u64, title: &str) -> Task {
        Task::from_input(id, "Jan 1, 2026".to_string(), &TaskInput::titled(title))
    }

    #[test]
    fn test_empty_storage_seeds_welcome_task() {
        let store = TaskStore::open(MemoryStore::new());
        assert_eq!(store.source(), LoadSource::Seeded);
        assert_eq!(store.len(), 1);
        let welcome = &store.tasks()[0];
        assert_eq!(welcome.title, "Welcome to your Todo List!");
        assert_eq!(welcome.priority, Some(Priority::Medium));
        assert_eq!(welcome.tags, vec!["example"]);
        assert!(!welcome.completed);
        assert_eq!(persisted(&store), store.tasks());
    }

    #[test]
    fn test_loads_stored_collection_without_rewriting() {
        let tasks = vec![task(5, "a"), task(2, "b")];
        let raw = serde_json::to_string(&tasks).unwrap();
        let store = TaskStore::open(MemoryStore::with_record(STORAGE_KEY, &raw));
        assert_eq!(store.source(), LoadSource::Stored);
        assert_eq!(store.tasks(), tasks.as_slice());
        // Untouched: still the compact form we stored.
        assert_eq!(store.storage().get(STORAGE_KEY).unwrap().unwrap(), raw);
    }

    #[test]
    fn test_stored_empty_list_is_not_reseeded() {
        let store = TaskStore::open(MemoryStore::with_record(STORAGE_KEY, "[]"));
        assert_eq!(store.source(), LoadSource::Stored);
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_record_is_preserved_and_seeded() {
        let store = TaskStore::open(MemoryStore::with_record(STORAGE_KEY, "{not json"));
        assert_eq!(store.source(), LoadSource::Recovered);
        assert_eq!(store.len(), 1);
        assert_eq!(store.storage().get(BACKUP_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_invalid_utf8_record_is_preserved() {
        let raw: &[u8] = b"[{\"id\":1,\"title\":\"caf\xe9\",\"date\":\"d\"}]";
        let store = TaskStore::open(MemoryStore::with_raw_record(STORAGE_KEY, raw));
        assert_eq!(store.source(), LoadSource::Recovered);
        assert_eq!(store.storage().raw(BACKUP_KEY), Some(raw));
        let notice = store.startup_notice().expect("startup notice");
        assert_eq!(notice.message, "Stored tasks could not be read");
        assert!(notice.warning.unwrap().contains(BACKUP_KEY));
    }

    #[test]
    fn test_invalid_utf8_file_is_backed_up_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let raw: &[u8] = b"[{\"id\":1,\"title\":\"caf\xe9\",\"date\":\"d\"}]";
        let files = FileStore::open(dir.path()).unwrap();
        std::fs::write(files.path_for(STORAGE_KEY), raw).unwrap();

        let store = TaskStore::open(files);
        assert_eq!(store.len(), 1);
        let backup = std::fs::read(store.storage().path_for(BACKUP_KEY)).unwrap();
        assert_eq!(backup, raw);
    }

    #[test]
    fn test_unreadable_record_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileStore::open(dir.path()).unwrap();
        // A directory in place of the record makes reads fail with something other than NotFound.
        let record = files.path_for(STORAGE_KEY);
        std::fs::create_dir(&record).unwrap();
        std::fs::write(record.join("keep"), "x").unwrap();

        let mut store = TaskStore::open(files);
        assert_eq!(store.source(), LoadSource::Recovered);
        assert!(store.startup_notice().unwrap().warning.unwrap().contains("left untouched"));

        let outcome = store.create(&TaskInput::titled("later")).unwrap();
        assert!(outcome.notice.warning.unwrap().contains("refusing to overwrite"));
        assert!(record.is_dir());
        assert_eq!(std::fs::read_to_string(record.join("keep")).unwrap(), "x");
    }

    #[test]
    fn test_failed_backup_blocks_writes() {
        // Room for nothing, so the backup copy of the malformed record fails.
        let mut storage = MemoryStore::with_quota(12);
        storage.set(STORAGE_KEY, "{not json").unwrap();
        let mut store = TaskStore::open(storage);
        assert_eq!(store.source(), LoadSource::Recovered);
        store.create(&TaskInput::titled("later")).unwrap();
        assert_eq!(store.storage().get(STORAGE_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_create_prepends_with_unique_id() {
        let mut store = TaskStore::open(MemoryStore::new());
        let outcome = store.create(&TaskInput::titled("Buy milk")).unwrap();
        assert_eq!(outcome.notice.message, "Task added successfully");
        assert!(outcome.notice.warning.is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.tasks()[0].title, "Buy milk");
        assert_eq!(store.tasks()[0].date, today());
        assert_eq!(persisted(&store), store.tasks());

        for i in 0..50 {
            store.create(&TaskInput::titled(&format!("task {i}"))).unwrap();
        }
        let ids: HashSet<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn test_create_requires_title() {
        let mut store = TaskStore::open(MemoryStore::new());
        let before = persisted(&store);
        let err = store.create(&TaskInput::titled("   ")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(persisted(&store), before);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = TaskStore::open(MemoryStore::with_record(STORAGE_KEY, "[]"));
        let Effect::Created { id: first } = store.create(&TaskInput::titled("a")).unwrap().effect else {
            panic!("expected create");
        };
        store.delete(first);
        let Effect::Created { id: second } = store.create(&TaskInput::titled("b")).unwrap().effect else {
            panic!("expected create");
        };
        assert_ne!(first, second);
    }

    #[test]
    fn test_create_then_delete_restores_collection() {
        let mut store = store_with(&[task(1, "a"), task(2, "b")]);
        let before = store.tasks().to_vec();
        let Effect::Created { id } = store.create(&TaskInput::titled("temp")).unwrap().effect else {
            panic!("expected create");
        };
        let outcome = store.delete(id);
        assert_eq!(outcome.notice.message, "Task \"temp\" deleted");
        assert_eq!(outcome.notice.kind, NoticeKind::Destructive);
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(persisted(&store), before);
    }

    #[test]
    fn test_delete_unknown_id_still_persists() {
        let mut store = TaskStore::open(MemoryStore::with_record(STORAGE_KEY, "[]"));
        let outcome = store.delete(42);
        assert!(!outcome.changed());
        assert_eq!(outcome.notice.message, "No task with id 42");
        assert_eq!(store.storage().get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_in_place() {
        let mut store = store_with(&[task(1, "a"), task(2, "b"), task(3, "c")]);
        let input = TaskInput {
            title: "B!".to_string(),
            priority: Some(Priority::High),
            tags: split_tags("x, y"),
            ..TaskInput::default()
        };
        let outcome = store.update(2, &input).unwrap();
        assert!(outcome.changed());
        assert_eq!(outcome.notice.message, "Task updated successfully");
        let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "B!", "c"]);
        let updated = store.get(2).unwrap();
        assert_eq!(updated.priority, Some(Priority::High));
        assert_eq!(updated.tags, vec!["x", "y"]);
        assert_eq!(updated.date, today());
        assert_eq!(persisted(&store), store.tasks());
    }

    #[test]
    fn test_update_unknown_id_leaves_collection_unchanged() {
        let mut store = store_with(&[task(1, "a"), task(2, "b")]);
        let before = store.tasks().to_vec();
        let outcome = store.update(99, &TaskInput::titled("nope")).unwrap();
        assert!(!outcome.changed());
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn test_update_requires_title() {
        let mut store = store_with(&[task(1, "a")]);
        assert!(store.update(1, &TaskInput::titled("")).is_err());
        assert_eq!(store.get(1).unwrap().title, "a");
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut store = store_with(&[task(1, "a"), task(2, "b")]);
        let first = store.toggle_completion(2);
        assert_eq!(first.notice.message, "Task \"b\" marked as completed");
        assert!(store.get(2).unwrap().completed);
        assert!(!store.get(1).unwrap().completed);
        let second = store.toggle_completion(2);
        assert_eq!(second.notice.message, "Task \"b\" marked as incomplete");
        assert!(!store.get(2).unwrap().completed);
    }

    #[test]
    fn test_mark_all_completed() {
        let mut store = store_with(&[task(1, "a"), task(2, "b")]);
        let outcome = store.mark_all_completed();
        assert_eq!(outcome.notice.message, "All tasks marked as completed");
        assert!(store.tasks().iter().all(|t| t.completed));
        assert!(persisted(&store).iter().all(|t| t.completed));
    }

    #[test]
    fn test_delete_all_then_create() {
        let mut store = store_with(&[task(1, "a"), task(2, "b")]);
        let outcome = store.delete_all();
        assert_eq!(outcome.notice.message, "All tasks deleted");
        assert!(store.is_empty());
        assert!(persisted(&store).is_empty());
        store.create(&TaskInput::titled("fresh")).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_write_failure_keeps_change_and_warns() {
        let mut store = TaskStore::open(MemoryStore::with_quota(0));
        assert_eq!(store.len(), 1);
        let outcome = store.create(&TaskInput::titled("unsaved")).unwrap();
        assert_eq!(store.len(), 2);
        let warning = outcome.notice.warning.expect("warning");
        assert!(warning.starts_with("Changes were not saved"));
        assert!(store.storage().get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_failed_seed_write_is_reported_at_startup() {
        let store = TaskStore::open(MemoryStore::with_quota(0));
        let notice = store.startup_notice().expect("startup notice");
        assert_eq!(notice.message, "Started a new task list");
        assert!(notice.warning.unwrap().starts_with("Changes were not saved"));

        assert!(TaskStore::open(MemoryStore::new()).startup_notice().is_none());
    }

    #[test]
    fn test_duplicate_ids_are_reassigned() {
        let tasks = vec![task(7, "a"), task(7, "b"), task(3, "c")];
        let store = TaskStore::open(MemoryStore::with_record(
            STORAGE_KEY,
            &serde_json::to_string(&tasks).unwrap(),
        ));
        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 8, 3]);
    }

    #[test]
    fn test_max_id_does_not_overflow() {
        let raw = format!("[{{\"id\":{},\"title\":\"x\",\"date\":\"d\"}}]", u64::MAX);
        let mut store = TaskStore::open(MemoryStore::with_record(STORAGE_KEY, &raw));
        assert_eq!(store.source(), LoadSource::Stored);
        assert_eq!(store.tasks()[0].id, u64::MAX);

        store.create(&TaskInput::titled("next")).unwrap();
        store.create(&TaskInput::titled("after")).unwrap();
        let ids: HashSet<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(persisted(&store), store.tasks());
    }

    #[test]
    fn test_duplicate_max_ids_are_renumbered() {
        let raw = format!(
            "[{{\"id\":{max},\"title\":\"a\",\"date\":\"d\"}},{{\"id\":{max},\"title\":\"b\",\"date\":\"d\"}}]",
            max = u64::MAX
        );
        let store = TaskStore::open(MemoryStore::with_record(STORAGE_KEY, &raw));
        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_apply_is_pure_over_input() {
        let tasks = vec![task(1, "a")];
        let (after, effect) = apply(tasks.clone(), Command::ToggleCompletion(1));
        assert_eq!(effect, Effect::Toggled { title: "a".to_string(), completed: true });
        assert!(!tasks[0].completed);
        assert!(after[0].completed);

        let (after, effect) = apply(tasks.clone(), Command::Delete(9));
        assert_eq!(effect, Effect::NotFound { id: 9 });
        assert_eq!(after, tasks);
    }

    #[test]
    fn test_file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::open(FileStore::open(dir.path()).unwrap());
        store.create(&TaskInput::titled("Buy milk")).unwrap();
        store.toggle_completion(store.tasks()[1].id);
        let expected = store.tasks().to_vec();

        let reopened = TaskStore::open(FileStore::open(dir.path()).unwrap());
        assert_eq!(reopened.source(), LoadSource::Stored);
        assert_eq!(reopened.tasks(), expected.as_slice());
    }

    #[test]
    fn test_round_trip_through_storage() {
        let tasks = vec![task(1, "a"), task(2, "b")];
        assert_eq!(persisted(&store_with(&tasks)), tasks);
    }
}
