//! Shared application state: config, chat client, sessions, forum.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use uuid::Uuid;

use anima_core::{
    AdviceRules, AnimaConfig, ChatClient, ChatTurn, ProfileStore, ScreeningRules, SurveyResponse,
};

/// Per-session context. One of these exists per logged-in browser tab; it
/// replaces the ambient login/survey globals of the original app with
/// explicit fields.
pub struct Session {
    pub user: String,
    pub survey: Option<SurveyResponse>,
    pub history: Vec<ChatTurn>,
}

/// A post on the shared forum. In-memory only, gone on restart.
#[derive(Debug, Clone, Serialize)]
pub struct ForumPost {
    pub author: String,
    pub body: String,
    pub at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AnimaConfig>,
    pub chat: Arc<ChatClient>,
    pub advice_rules: Arc<AdviceRules>,
    pub screening_rules: Arc<ScreeningRules>,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    forum: Arc<Mutex<Vec<ForumPost>>>,
}

impl AppState {
    pub fn new(config: AnimaConfig) -> Result<Self> {
        let chat = ChatClient::new(
            config.chat.api_key.clone(),
            config.chat.model.clone(),
            config.chat_timeout(),
        )?;

        if !chat.enabled() {
            warn!("No chat API key configured; chat replies are disabled");
        }

        Ok(AppState {
            config: Arc::new(config),
            chat: Arc::new(chat),
            advice_rules: Arc::new(AdviceRules::default()),
            screening_rules: Arc::new(ScreeningRules::default()),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            forum: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// The profile store is rebuilt per request so every interaction
    /// re-reads the user's file from disk.
    pub fn store(&self) -> ProfileStore {
        ProfileStore::new(self.config.data_path())
    }

    // SESSIONS:

    pub fn open_session(&self, user: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.lock_sessions().insert(
            token.clone(),
            Session {
                user: user.to_string(),
                survey: None,
                history: Vec::new(),
            },
        );
        token
    }

    pub fn close_session(&self, token: &str) {
        self.lock_sessions().remove(token);
    }

    pub fn user_for(&self, token: &str) -> Option<String> {
        self.lock_sessions().get(token).map(|s| s.user.clone())
    }

    /// Run a closure against a session, returning None for unknown tokens.
    pub fn with_session<T>(&self, token: &str, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        self.lock_sessions().get_mut(token).map(f)
    }

    fn lock_sessions(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().expect("session lock poisoned")
    }

    // FORUM:

    pub fn forum_posts(&self) -> Vec<ForumPost> {
        self.forum.lock().expect("forum lock poisoned").clone()
    }

    pub fn add_forum_post(&self, author: &str, body: &str) -> ForumPost {
        let post = ForumPost {
            author: author.to_string(),
            body: body.to_string(),
            at: Utc::now(),
        };
        self.forum
            .lock()
            .expect("forum lock poisoned")
            .push(post.clone());
        post
    }
}
