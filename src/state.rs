use std::sync::Arc;

use crate::generator::QuestionGenerator;
use crate::session::SessionManager;
use crate::store::{SharedStore, Store};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub sessions: Arc<SessionManager>,
    pub generator: Arc<dyn QuestionGenerator>,
}

impl AppState {
    /// Fresh, empty state around the given generator.
    pub fn new(generator: Arc<dyn QuestionGenerator>) -> Self {
        let store = Store::shared();
        Self {
            sessions: Arc::new(SessionManager::new(store.clone())),
            store,
            generator,
        }
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<SessionManager> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<dyn QuestionGenerator> {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}
