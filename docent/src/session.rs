use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{DocentError, Result};
use crate::models::{ChatMessage, SessionSettings, SettingsUpdate};

/// One browser's chat: settings, the message list and synthesized audio.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub settings: SessionSettings,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    audio: HashMap<Uuid, Arc<Vec<u8>>>,
}

impl Session {
    fn new(settings: SessionSettings) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            settings,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            audio: HashMap::new(),
        }
    }

    pub fn has_audio(&self, message_id: &Uuid) -> bool {
        self.audio.contains_key(message_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// In-memory sessions shared by all handlers.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    defaults: SessionSettings,
}

impl SessionStore {
    pub fn new(defaults: SessionSettings) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            defaults,
        }
    }

    pub fn defaults(&self) -> &SessionSettings {
        &self.defaults
    }

    pub async fn create(&self) -> Session {
        let session = Session::new(self.defaults.clone());
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        tracing::debug!(session_id = %session.id, "Session created");
        session
    }

    pub async fn get(&self, id: &Uuid) -> Result<Session> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub async fn update_settings(&self, id: &Uuid, update: SettingsUpdate) -> Result<SessionSettings> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;

        if let Some(language) = update.language {
            session.settings.language = language;
        }
        if let Some(audio_enabled) = update.audio_enabled {
            session.settings.audio_enabled = audio_enabled;
        }
        if let Some(voice) = update.voice {
            session.settings.voice = voice;
        }
        session.touch();

        Ok(session.settings.clone())
    }

    pub async fn append(&self, id: &Uuid, message: ChatMessage) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        session.messages.push(message);
        session.touch();
        Ok(())
    }

    /// Empty the message list and the audio cached for it.
    pub async fn clear(&self, id: &Uuid) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        session.messages.clear();
        session.audio.clear();
        session.touch();
        Ok(())
    }

    pub async fn message(&self, id: &Uuid, message_id: &Uuid) -> Result<ChatMessage> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(id).ok_or_else(|| not_found(id))?;
        session
            .messages
            .iter()
            .find(|message| message.id == *message_id)
            .cloned()
            .ok_or_else(|| DocentError::NotFound(format!("Message {message_id}")))
    }

    pub async fn audio(&self, id: &Uuid, message_id: &Uuid) -> Result<Option<Arc<Vec<u8>>>> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(id).ok_or_else(|| not_found(id))?;
        Ok(session.audio.get(message_id).cloned())
    }

    /// Audio for a message that was cleared in the meantime is dropped.
    pub async fn put_audio(&self, id: &Uuid, message_id: &Uuid, audio: Arc<Vec<u8>>) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        if session.messages.iter().any(|message| message.id == *message_id) {
            session.audio.insert(*message_id, audio);
        }
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn not_found(id: &Uuid) -> DocentError {
    DocentError::NotFound(format!("Session {id}"))
}
