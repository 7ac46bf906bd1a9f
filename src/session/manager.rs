// src/session/manager.rs

use std::{
    collections::HashMap,
    sync::{Arc, Weak},
    time::Duration,
};

use chrono::Utc;
use tokio::{sync::Mutex, task::JoinHandle, time::Instant};
use uuid::Uuid;

use super::{TestSession, Tick};
use crate::{
    config::TICK_SECONDS,
    error::AppError,
    models::session::{NavigateRequest, NavigationStep, SessionView, Submission},
    store::SharedStore,
};

type Registry = Mutex<HashMap<Uuid, ActiveSession>>;

/// A running attempt together with the task counting it down.
struct ActiveSession {
    session: Arc<Mutex<TestSession>>,
    ticker: JoinHandle<()>,
}

impl Drop for ActiveSession {
    // Removing a session from the registry, for whatever reason, stops its countdown.
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

/// Owns every in-progress session, at most one per test.
///
/// Lock order is session first, then store.
pub struct SessionManager {
    store: SharedStore,
    active: Arc<Registry>,
    tick: Duration,
}

impl Drop for SessionManager {
    // Tickers only hold a weak handle to the registry, so it normally dies with
    // the manager. Clearing it here also covers a ticker that has upgraded its
    // handle at this moment.
    fn drop(&mut self) {
        if let Ok(mut active) = self.active.try_lock() {
            active.clear();
        }
    }
}

impl SessionManager {
    pub fn new(store: SharedStore) -> Self {
        Self::with_tick(store, Duration::from_secs(TICK_SECONDS))
    }

    pub fn with_tick(store: SharedStore, tick: Duration) -> Self {
        Self {
            store,
            active: Arc::new(Mutex::new(HashMap::new())),
            tick,
        }
    }

    /// Starts a fresh attempt. An attempt already running for the same test is
    /// discarded without recording anything.
    pub async fn start(&self, test_id: Uuid) -> Result<SessionView, AppError> {
        let session = {
            let store = self.store.read().await;
            let test = store
                .find_test(test_id)
                .ok_or(AppError::TestNotFound(test_id))?;
            if test.is_completed() {
                return Err(AppError::Conflict(
                    "Test already completed; its score is final".to_string(),
                ));
            }
            TestSession::start(test)
        };

        let view = session.view();
        let session = Arc::new(Mutex::new(session));
        let ticker = tokio::spawn(run_countdown(
            session.clone(),
            self.store.clone(),
            Arc::downgrade(&self.active),
            self.tick,
        ));

        let previous = self
            .active
            .lock()
            .await
            .insert(test_id, ActiveSession { session, ticker });
        if previous.is_some() {
            tracing::info!("Discarded unfinished session for test {}", test_id);
        }

        tracing::info!(
            "Session started for test {} ({} questions, {}s)",
            test_id,
            view.total_questions,
            view.remaining_seconds
        );
        Ok(view)
    }

    async fn session(&self, test_id: Uuid) -> Result<Arc<Mutex<TestSession>>, AppError> {
        self.active
            .lock()
            .await
            .get(&test_id)
            .map(|active| active.session.clone())
            .ok_or_else(|| AppError::NotFound("No active session for this test".to_string()))
    }

    pub async fn view(&self, test_id: Uuid) -> Result<SessionView, AppError> {
        let session = self.session(test_id).await?;
        let view = session.lock().await.view();
        Ok(view)
    }

    pub async fn select_answer(
        &self,
        test_id: Uuid,
        question: u32,
        option: u8,
    ) -> Result<SessionView, AppError> {
        let session = self.session(test_id).await?;
        let mut session = session.lock().await;
        session.select_answer(question, option)?;
        Ok(session.view())
    }

    pub async fn toggle_review(&self, test_id: Uuid, question: u32) -> Result<SessionView, AppError> {
        let session = self.session(test_id).await?;
        let mut session = session.lock().await;
        session.toggle_review(question)?;
        Ok(session.view())
    }

    pub async fn navigate(
        &self,
        test_id: Uuid,
        request: NavigateRequest,
    ) -> Result<SessionView, AppError> {
        let session = self.session(test_id).await?;
        let mut session = session.lock().await;
        match request {
            NavigateRequest::GoTo { to } => session.go_to(to),
            NavigateRequest::Step { action: NavigationStep::Next } => session.next(),
            NavigateRequest::Step { action: NavigationStep::Previous } => session.previous(),
        };
        Ok(session.view())
    }

    /// Manual submit. Converges with the countdown: whichever arrives second
    /// gets the result of the first.
    pub async fn submit(&self, test_id: Uuid) -> Result<Submission, AppError> {
        let session = match self.session(test_id).await {
            Ok(session) => session,
            Err(_) => return self.stored_submission(test_id).await,
        };

        let submission = {
            let mut guard = session.lock().await;
            let mut store = self.store.write().await;
            guard.submit(&mut store, Utc::now())?
        };

        remove_session(&self.active, test_id, &session).await;
        Ok(submission)
    }

    /// Result of a test whose session has already ended.
    async fn stored_submission(&self, test_id: Uuid) -> Result<Submission, AppError> {
        let store = self.store.read().await;
        let test = store
            .find_test(test_id)
            .ok_or(AppError::TestNotFound(test_id))?;

        match (test.score, test.completed_at) {
            (Some(score), Some(completed_at)) => Ok(Submission {
                test_id,
                score,
                total_questions: test.total_questions,
                completed_at,
                redirect: format!("/analysis/{}", test_id),
            }),
            _ => Err(AppError::NotFound(
                "No active session for this test".to_string(),
            )),
        }
    }

    /// Leaves the test without submitting. Answers are discarded and the test
    /// stays unscored.
    pub async fn abandon(&self, test_id: Uuid) -> Result<(), AppError> {
        let removed = self.active.lock().await.remove(&test_id);
        match removed {
            Some(_) => {
                tracing::info!("Session for test {} abandoned", test_id);
                Ok(())
            }
            None => Err(AppError::NotFound(
                "No active session for this test".to_string(),
            )),
        }
    }

    pub async fn active_count(&self) -> usize {
        self.active.lock().await.len()
    }
}

/// Drops the registry entry for `test_id` if it still belongs to `session`.
async fn remove_session(registry: &Registry, test_id: Uuid, session: &Arc<Mutex<TestSession>>) {
    let removed = {
        let mut active = registry.lock().await;
        match active.get(&test_id) {
            Some(entry) if Arc::ptr_eq(&entry.session, session) => active.remove(&test_id),
            _ => None,
        }
    };
    drop(removed);
}

/// Counts a session down once per `period` and submits it when time runs out.
async fn run_countdown(
    session: Arc<Mutex<TestSession>>,
    store: SharedStore,
    registry: Weak<Registry>,
    period: Duration,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);

    let test_id = loop {
        interval.tick().await;

        let mut guard = session.lock().await;
        match guard.tick() {
            Tick::Running { .. } => {}
            Tick::Finished => break guard.test_id(),
            Tick::Expired => {
                let mut store = store.write().await;
                match guard.submit(&mut store, Utc::now()) {
                    Ok(submission) => tracing::info!(
                        "Time is up for test {}, submitted with score {}",
                        submission.test_id,
                        submission.score
                    ),
                    Err(e) => tracing::error!("Auto-submit failed for test {}: {}", guard.test_id(), e),
                }
                break guard.test_id();
            }
        }
    };

    if let Some(registry) = registry.upgrade() {
        remove_session(&registry, test_id, &session).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionStatus;
    use crate::models::test::Subject;
    use crate::store::{Store, tests::sample_test};

    async fn setup(duration: u32) -> (SharedStore, SessionManager, Uuid) {
        let store = Store::shared();
        let mut test = sample_test(Subject::Mathematics, Utc::now());
        test.duration = duration;
        let id = test.id;
        store.write().await.add_test(test);
        let manager = SessionManager::new(store.clone());
        (store, manager, id)
    }

    #[tokio::test]
    async fn test_start_unknown_test() {
        let (_, manager, _) = setup(30).await;
        let err = manager.start(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::TestNotFound(_)));
        assert_eq!(manager.active_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ticks_once_per_second() {
        let (_, manager, id) = setup(30).await;
        manager.start(id).await.unwrap();

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        let view = manager.view(id).await.unwrap();
        assert_eq!(view.remaining_seconds, 1790);
        assert_eq!(view.status, SessionStatus::InProgress);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_submits_exactly_once() {
        let (store, manager, id) = setup(30).await;
        manager.start(id).await.unwrap();
        for q in 0..21 {
            manager.select_answer(id, q, 1).await.unwrap();
        }

        tokio::time::sleep(Duration::from_millis(1_799_500)).await;
        assert_eq!(manager.view(id).await.unwrap().remaining_seconds, 1);
        assert!(store.read().await.find_test(id).unwrap().score.is_none());

        tokio::time::sleep(Duration::from_secs(2)).await;
        let completed_at = {
            let store = store.read().await;
            let test = store.find_test(id).unwrap();
            assert_eq!(test.score, Some(70));
            test.completed_at.unwrap()
        };
        assert_eq!(manager.active_count().await, 0);

        // A late manual submit sees the same result.
        let late = manager.submit(id).await.unwrap();
        assert_eq!(late.score, 70);
        assert_eq!(late.completed_at, completed_at);

        tokio::time::sleep(Duration::from_secs(60)).await;
        let test = store.read().await.find_test(id).unwrap().clone();
        assert_eq!(test.completed_at, Some(completed_at));
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_submit_stops_countdown() {
        let (store, manager, id) = setup(30).await;
        manager.start(id).await.unwrap();
        manager.select_answer(id, 0, 2).await.unwrap();

        let submission = manager.submit(id).await.unwrap();
        assert_eq!(submission.score, 3);
        assert_eq!(manager.active_count().await, 0);

        tokio::time::sleep(Duration::from_secs(3600)).await;
        let test = store.read().await.find_test(id).unwrap().clone();
        assert_eq!(test.score, Some(3));
        assert_eq!(test.completed_at, Some(submission.completed_at));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_manager_stops_countdowns() {
        let (store, manager, id) = setup(30).await;
        manager.start(id).await.unwrap();
        manager.select_answer(id, 0, 1).await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(manager);

        tokio::time::sleep(Duration::from_secs(1801)).await;
        let test = store.read().await.find_test(id).unwrap().clone();
        assert_eq!(test.score, None);
        assert_eq!(test.completed_at, None);
    }

    #[tokio::test]
    async fn test_completed_test_cannot_be_restarted() {
        let (_, manager, id) = setup(30).await;
        manager.start(id).await.unwrap();
        manager.submit(id).await.unwrap();

        let err = manager.start(id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_abandon_discards_answers() {
        let (store, manager, id) = setup(30).await;
        manager.start(id).await.unwrap();
        manager.select_answer(id, 4, 0).await.unwrap();

        manager.abandon(id).await.unwrap();
        assert_eq!(manager.active_count().await, 0);
        assert!(store.read().await.find_test(id).unwrap().score.is_none());

        // Coming back starts from scratch.
        let view = manager.start(id).await.unwrap();
        assert_eq!(view.answered_count, 0);
    }

    #[tokio::test]
    async fn test_restart_replaces_session() {
        let (_, manager, id) = setup(30).await;
        manager.start(id).await.unwrap();
        manager.select_answer(id, 1, 1).await.unwrap();

        let view = manager.start(id).await.unwrap();
        assert_eq!(view.answered_count, 0);
        assert_eq!(manager.active_count().await, 1);
    }

    #[tokio::test]
    async fn test_navigate() {
        let (_, manager, id) = setup(30).await;
        manager.start(id).await.unwrap();

        let view = manager
            .navigate(id, NavigateRequest::GoTo { to: 50 })
            .await
            .unwrap();
        assert_eq!(view.current_question, 29);

        let view = manager
            .navigate(id, NavigateRequest::Step { action: NavigationStep::Previous })
            .await
            .unwrap();
        assert_eq!(view.current_question, 28);
    }
}
