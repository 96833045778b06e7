//! Per-visitor state. Each session owns its own note book and expense ledger;
//! nothing is shared between sessions and nothing outlives the process.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::errors::AppError;
use crate::tools::expenses::ExpenseLedger;
use crate::tools::quick_notes::NoteBook;

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub notes: NoteBook,
    pub expenses: ExpenseLedger,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            notes: NoteBook::default(),
            expenses: ExpenseLedger::default(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// In-memory session table. A tool invocation locks one session for its whole duration,
/// so two calls against the same session never interleave.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> SessionSummary {
        let session = Session::new();
        let summary = SessionSummary {
            id: session.id,
            created_at: session.created_at,
        };
        self.sessions
            .write()
            .await
            .insert(session.id, Arc::new(Mutex::new(session)));
        summary
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<Mutex<Session>>, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_remove() {
        let store = SessionStore::new();
        let summary = store.create().await;
        assert_eq!(store.count().await, 1);

        let session = store.get(summary.id).await.unwrap();
        assert_eq!(session.lock().await.id, summary.id);

        store.remove(summary.id).await.unwrap();
        assert!(matches!(
            store.get(summary.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(store.remove(summary.id).await.is_err());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.create().await.id;
        let b = store.create().await.id;

        store
            .get(a)
            .await
            .unwrap()
            .lock()
            .await
            .notes
            .add("only in a", chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap());

        assert_eq!(store.get(a).await.unwrap().lock().await.notes.len(), 1);
        assert_eq!(store.get(b).await.unwrap().lock().await.notes.len(), 0);
    }
}
