//! In-memory registry of page sessions.
//!
//! A session owns one chat controller and one fit analyzer. Nothing is
//! persisted; a page reload starts a new session. The lock is only held for
//! pure controller transitions, never across a completion call.
//!
//! Sessions untouched for longer than the idle timeout are evicted when a new
//! session is created. A session with a request in flight is never evicted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::analyzer::FitAnalyzer;
use crate::chat::controller::ConversationController;
use crate::context::ResumeContext;
use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct Session {
    pub chat: ConversationController,
    pub fit: FitAnalyzer,
    last_active: Instant,
}

impl Session {
    pub fn new(context: ResumeContext) -> Self {
        Self {
            chat: ConversationController::new(context.clone()),
            fit: FitAnalyzer::new(context),
            last_active: Instant::now(),
        }
    }

    /// A chat reply or an analysis is outstanding.
    pub fn is_busy(&self) -> bool {
        !self.chat.input_enabled() || !self.fit.control_enabled()
    }

    fn is_idle(&self, now: Instant, idle_timeout: Duration) -> bool {
        !self.is_busy() && now.duration_since(self.last_active) >= idle_timeout
    }
}

#[derive(Clone)]
pub struct SessionRegistry {
    context: ResumeContext,
    idle_timeout: Duration,
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionRegistry {
    pub fn new(context: ResumeContext, idle_timeout: Duration) -> Self {
        Self {
            context,
            idle_timeout,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.lock().await;
        Self::evict_locked(&mut sessions, self.idle_timeout);
        sessions.insert(id, Session::new(self.context.clone()));
        info!("Session {id} created ({} active)", sessions.len());
        id
    }

    /// Drops idle sessions and returns how many were removed.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        Self::evict_locked(&mut sessions, self.idle_timeout)
    }

    fn evict_locked(sessions: &mut HashMap<Uuid, Session>, idle_timeout: Duration) -> usize {
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|id, session| {
            let idle = session.is_idle(now, idle_timeout);
            if idle {
                debug!("Session {id} evicted after {}s idle", idle_timeout.as_secs());
            }
            !idle
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {evicted} idle sessions");
        }
        evicted
    }

    /// Returns `true` if the session existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(&id).is_some();
        if removed {
            info!("Session {id} removed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Runs `f` against the session under the registry lock and marks it active.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.last_active = Instant::now();
        Ok(f(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::CompletionResult;
    use crate::models::submission::Submission;

    const IDLE: Duration = Duration::from_secs(30 * 60);

    fn registry() -> SessionRegistry {
        SessionRegistry::new(ResumeContext::embedded().unwrap(), IDLE)
    }

    #[tokio::test]
    async fn test_create_and_remove() {
        let registry = registry();
        let id = registry.create().await;
        assert_eq!(registry.len().await, 1);
        assert!(registry.remove(id).await);
        assert!(!registry.remove(id).await);
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let result = registry().with_session(Uuid::new_v4(), |_| ()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let registry = registry();
        let a = registry.create().await;
        let b = registry.create().await;

        let started = registry
            .with_session(a, |s| s.chat.submit("hello"))
            .await
            .unwrap();
        assert!(started.request().is_some());

        let b_enabled = registry
            .with_session(b, |s| s.chat.input_enabled())
            .await
            .unwrap();
        assert!(b_enabled);
    }

    #[tokio::test]
    async fn test_chat_and_fit_can_both_be_pending() {
        let registry = registry();
        let id = registry.create().await;
        let (chat, fit) = registry
            .with_session(id, |s| (s.chat.submit("hi"), s.fit.begin("Data analyst")))
            .await
            .unwrap();
        assert!(matches!(chat, Submission::Started(_)));
        assert!(matches!(fit, Submission::Started(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted_on_create() {
        let registry = registry();
        let stale = registry.create().await;

        tokio::time::advance(IDLE + Duration::from_secs(1)).await;
        let fresh = registry.create().await;

        assert_eq!(registry.len().await, 1);
        let result = registry.with_session(stale, |_| ()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(registry.with_session(fresh, |_| ()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_keeps_session_alive() {
        let registry = registry();
        let id = registry.create().await;

        tokio::time::advance(IDLE / 2).await;
        registry.with_session(id, |s| s.chat.view()).await.unwrap();
        tokio::time::advance(IDLE / 2 + Duration::from_secs(1)).await;

        assert_eq!(registry.evict_idle().await, 0);
        assert!(registry.with_session(id, |_| ()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_session_is_not_evicted() {
        let registry = registry();
        let id = registry.create().await;
        registry
            .with_session(id, |s| s.fit.begin("Data analyst"))
            .await
            .unwrap();

        tokio::time::advance(IDLE * 2).await;
        assert_eq!(registry.evict_idle().await, 0);

        registry
            .with_session(id, |s| {
                s.fit.resolve(CompletionResult::Unavailable);
            })
            .await
            .unwrap();
        tokio::time::advance(IDLE).await;
        assert_eq!(registry.evict_idle().await, 1);
        assert_eq!(registry.len().await, 0);
    }
}
