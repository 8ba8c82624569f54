use crate::errors::{ChecklistError, StorageError};
use crate::models::{DayState, Exercise, Person};
use crate::progression;
use crate::storage::{load_state, persist_state};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info, warn};

/// Owner of the single current [`DayState`].
///
/// Reads and writes are serialized through one mutex. A mutation holds the
/// lock across the file write and runs on its own task, so it completes (or
/// fails) as a whole even if the caller goes away. The in-memory state only
/// changes after the write succeeded.
#[derive(Debug)]
pub struct DayStateStore {
    path: Arc<Path>,
    state: Arc<Mutex<DayState>>,
}

impl DayStateStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path: PathBuf = path.into();
        let state = load_state(&path).await?;
        info!(day = state.day().get(), "loaded state from {}", path.display());
        Ok(Self {
            path: Arc::from(path),
            state: Arc::new(Mutex::new(state)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get_state(&self) -> DayState {
        self.state.lock().await.clone()
    }

    pub async fn toggle(
        &self,
        person: Person,
        exercise: Exercise,
    ) -> Result<DayState, ChecklistError> {
        let updated = self
            .update(move |current| {
                let mut next = current.clone();
                next.flip(person, exercise);
                Ok(next)
            })
            .await?;
        let done = updated.is_done(person, exercise);
        info!(day = updated.day().get(), %person, %exercise, done, "toggled");
        Ok(updated)
    }

    pub async fn advance(&self) -> Result<DayState, ChecklistError> {
        let updated = self
            .update(|current| {
                progression::next_day(current).inspect_err(|err| {
                    warn!(day = current.day().get(), "advance rejected: {err}");
                })
            })
            .await?;
        info!(day = updated.day().get(), "advanced to next day");
        Ok(updated)
    }

    async fn update<F>(&self, apply: F) -> Result<DayState, ChecklistError>
    where
        F: FnOnce(&DayState) -> Result<DayState, ChecklistError> + Send + 'static,
    {
        let current = Arc::clone(&self.state).lock_owned().await;
        let path = Arc::clone(&self.path);
        tokio::spawn(commit(path, current, apply))
            .await
            .map_err(|err| ChecklistError::from(StorageError::from(err)))?
    }
}

async fn commit<F>(
    path: Arc<Path>,
    mut current: OwnedMutexGuard<DayState>,
    apply: F,
) -> Result<DayState, ChecklistError>
where
    F: FnOnce(&DayState) -> Result<DayState, ChecklistError>,
{
    let next = apply(&current)?;
    if let Err(err) = persist_state(&path, &next).await {
        error!("failed to persist state: {err}");
        return Err(err.into());
    }
    *current = next.clone();
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn open_store() -> (TempDir, DayStateStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DayStateStore::open(dir.path().join("state.json"))
            .await
            .unwrap();
        (dir, store)
    }

    fn pairs() -> impl Iterator<Item = (Person, Exercise)> {
        Person::ALL
            .into_iter()
            .flat_map(|person| Exercise::ALL.into_iter().map(move |exercise| (person, exercise)))
    }

    #[tokio::test]
    async fn new_store_starts_at_day_one_with_nothing_done() {
        let (_dir, store) = open_store().await;
        let state = store.get_state().await;
        assert_eq!(state.day().get(), 1);
        assert!(state.entries().all(|(_, _, done)| !done));
    }

    #[tokio::test]
    async fn toggling_twice_restores_the_checklist() {
        let (_dir, store) = open_store().await;
        let initial = store.get_state().await;

        let once = store.toggle(Person::A, Exercise::Squats).await.unwrap();
        assert!(once.is_done(Person::A, Exercise::Squats));

        let twice = store.toggle(Person::A, Exercise::Squats).await.unwrap();
        assert_eq!(twice, initial);
        assert!(!progression::can_advance(&twice));
    }

    #[tokio::test]
    async fn advance_unlocks_only_after_the_last_toggle() {
        let (_dir, store) = open_store().await;
        let total = pairs().count();

        for (i, (person, exercise)) in pairs().enumerate() {
            let state = store.toggle(person, exercise).await.unwrap();
            assert_eq!(progression::can_advance(&state), i + 1 == total);
        }

        let next = store.advance().await.unwrap();
        assert_eq!(next.day().get(), 2);
        assert!(next.entries().all(|(_, _, done)| !done));
        assert_eq!(store.get_state().await, next);
    }

    #[tokio::test]
    async fn incomplete_advance_leaves_state_untouched() {
        let (_dir, store) = open_store().await;
        store.toggle(Person::B, Exercise::Pushups).await.unwrap();
        let before = store.get_state().await;

        let err = store.advance().await.unwrap_err();

        assert!(matches!(err, ChecklistError::IncompleteChecklist { day: 1 }));
        assert_eq!(store.get_state().await, before);
    }

    #[tokio::test]
    async fn days_advance_one_at_a_time() {
        let (_dir, store) = open_store().await;
        for expected in 2..=5 {
            for (person, exercise) in pairs() {
                store.toggle(person, exercise).await.unwrap();
            }
            let state = store.advance().await.unwrap();
            assert_eq!(state.day().get(), expected);
            assert!(store.advance().await.is_err());
        }
    }

    #[tokio::test]
    async fn mutations_are_visible_after_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = DayStateStore::open(&path).await.unwrap();
        for (person, exercise) in pairs() {
            store.toggle(person, exercise).await.unwrap();
        }
        store.advance().await.unwrap();
        let saved = store.toggle(Person::B, Exercise::Situps).await.unwrap();
        drop(store);

        let reopened = DayStateStore::open(&path).await.unwrap();
        assert_eq!(reopened.get_state().await, saved);
    }

    #[tokio::test]
    async fn failed_persist_does_not_mutate() {
        let dir = tempfile::tempdir().unwrap();
        let store = DayStateStore::open(dir.path().join("missing").join("state.json"))
            .await
            .unwrap();

        let err = store.toggle(Person::A, Exercise::Squats).await.unwrap_err();

        assert!(matches!(err, ChecklistError::Storage(_)));
        assert_eq!(store.get_state().await, DayState::default());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_toggles_are_not_lost() {
        let (_dir, store) = open_store().await;
        let store = Arc::new(store);

        let handles: Vec<_> = pairs()
            .map(|(person, exercise)| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.toggle(person, exercise).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let state = store.get_state().await;
        assert!(progression::can_advance(&state));
        assert_eq!(store.advance().await.unwrap().day().get(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn advance_racing_toggles_never_leaves_stale_flags() {
        let (_dir, store) = open_store().await;
        let store = Arc::new(store);
        for (person, exercise) in pairs() {
            store.toggle(person, exercise).await.unwrap();
        }

        let racer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.toggle(Person::A, Exercise::Pushups).await })
        };
        let advanced = store.advance().await;
        let toggled = racer.await.unwrap().unwrap();

        let state = store.get_state().await;
        match advanced {
            // advance won: the toggle landed on the fresh day 2
            Ok(_) => {
                assert_eq!(state.day().get(), 2);
                assert_eq!(state, toggled);
                let set: Vec<_> = state.entries().filter(|(_, _, done)| *done).collect();
                assert_eq!(set, vec![(Person::A, Exercise::Pushups, true)]);
            }
            // toggle won: day 1 with that single flag cleared
            Err(err) => {
                assert!(matches!(err, ChecklistError::IncompleteChecklist { day: 1 }));
                assert_eq!(state.day().get(), 1);
                assert!(!state.is_done(Person::A, Exercise::Pushups));
                assert_eq!(state.entries().filter(|(_, _, done)| *done).count(), 5);
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn abandoned_toggles_keep_disk_and_memory_in_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = DayStateStore::open(&path).await.unwrap();
        store.toggle(Person::B, Exercise::Squats).await.unwrap();

        for i in 0..200u64 {
            let deadline = Duration::from_micros(1 + i % 80);
            let _ = tokio::time::timeout(deadline, store.toggle(Person::A, Exercise::Situps)).await;

            let in_memory = store.get_state().await;
            assert_eq!(load_state(&path).await.unwrap(), in_memory, "iteration {i}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn abandoned_advance_is_applied_in_full_or_not_at_all() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = DayStateStore::open(&path).await.unwrap();

        for i in 0..50u64 {
            for (person, exercise) in pairs() {
                if !store.get_state().await.is_done(person, exercise) {
                    store.toggle(person, exercise).await.unwrap();
                }
            }
            let before = store.get_state().await.day().get();
            let deadline = Duration::from_micros(1 + i % 40);
            let _ = tokio::time::timeout(deadline, store.advance()).await;

            let in_memory = store.get_state().await;
            assert_eq!(load_state(&path).await.unwrap(), in_memory, "iteration {i}");
            let after = in_memory.day().get();
            assert!(after == before || after == before + 1);
        }
    }
}
