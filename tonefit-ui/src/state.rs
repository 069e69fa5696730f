//! Shared wizard state
//!
//! One [`WizardSession`] holds everything the wizard knows: the current step,
//! user inputs and fetched results. Step controllers read it and request
//! mutations through its setters; none of them keep private copies.
//!
//! Sessions are handed out by a [`WizardProvider`]. Asking the provider for
//! state while no session is active is an [`Error::UninitializedContext`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tonefit_common::api::Product;
use tonefit_common::{color, Error, Result, WizardStep};
use tracing::{debug, info};
use uuid::Uuid;

use crate::events::WizardEvent;

/// Cosmetic category selected when a session starts ("base" makeup)
pub const DEFAULT_COSMETIC_CATEGORY: &str = "베이스";

/// Body type and style chosen on the style-preference step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePreferences {
    pub body_type: String,
    pub style: String,
}

/// Point-in-time copy of every session field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub step: WizardStep,
    pub personal_color: String,
    pub personal_color_note: Option<String>,
    pub personal_color_class: Option<String>,
    pub uploaded_image: Option<String>,
    pub cosmetic_preferences: String,
    pub style_preferences: Option<StylePreferences>,
    pub selected_cosmetic_category: String,
    pub recommended_products: Vec<Product>,
}

/// Session-scoped wizard state
///
/// Uses RwLock per field; reads vastly outnumber writes.
pub struct WizardSession {
    id: Uuid,
    started_at: DateTime<Utc>,

    step: RwLock<WizardStep>,

    /// Detailed (or manually chosen) color code, empty until known
    personal_color: RwLock<String>,

    /// `reason | suggestions` note from the prediction service
    personal_color_note: RwLock<Option<String>>,

    /// Raw predicted class; takes precedence over `personal_color` in queries
    personal_color_class: RwLock<Option<String>>,

    /// Data-URI preview of the uploaded photo
    uploaded_image: RwLock<Option<String>>,

    /// Free-text preference, empty means "no preference"
    cosmetic_preferences: RwLock<String>,

    style_preferences: RwLock<Option<StylePreferences>>,

    selected_cosmetic_category: RwLock<String>,

    /// Latest recommendation result set, replaced wholesale
    recommended_products: RwLock<Vec<Product>>,

    event_tx: broadcast::Sender<WizardEvent>,
}

impl WizardSession {
    /// Create a session with every field at its default
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            step: RwLock::new(WizardStep::Welcome),
            personal_color: RwLock::new(String::new()),
            personal_color_note: RwLock::new(None),
            personal_color_class: RwLock::new(None),
            uploaded_image: RwLock::new(None),
            cosmetic_preferences: RwLock::new(String::new()),
            style_preferences: RwLock::new(None),
            selected_cosmetic_category: RwLock::new(DEFAULT_COSMETIC_CATEGORY.to_string()),
            recommended_products: RwLock::new(Vec::new()),
            event_tx,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Subscribe to state change events
    pub fn subscribe_events(&self) -> broadcast::Receiver<WizardEvent> {
        self.event_tx.subscribe()
    }

    fn broadcast_event(&self, event: WizardEvent) {
        // No receivers is OK
        let _ = self.event_tx.send(event);
    }

    pub async fn step(&self) -> WizardStep {
        *self.step.read().await
    }

    /// Move to `step`, broadcasting the transition
    pub async fn set_step(&self, step: WizardStep) {
        let from = {
            let mut current = self.step.write().await;
            std::mem::replace(&mut *current, step)
        };

        if from != step {
            debug!(session_id = %self.id, from = %from, to = %step, "Wizard step changed");
            self.broadcast_event(WizardEvent::StepChanged {
                session_id: self.id,
                from,
                to: step,
            });
        }
    }

    pub async fn personal_color(&self) -> String {
        self.personal_color.read().await.clone()
    }

    pub async fn set_personal_color(&self, color: impl Into<String>) {
        let color = color.into();
        *self.personal_color.write().await = color.clone();
        let personal_color_class = self.personal_color_class().await;
        self.broadcast_event(WizardEvent::PersonalColorSet {
            session_id: self.id,
            personal_color: color,
            personal_color_class,
        });
    }

    pub async fn personal_color_note(&self) -> Option<String> {
        self.personal_color_note.read().await.clone()
    }

    pub async fn set_personal_color_note(&self, note: Option<String>) {
        *self.personal_color_note.write().await = note;
    }

    pub async fn personal_color_class(&self) -> Option<String> {
        self.personal_color_class.read().await.clone()
    }

    pub async fn set_personal_color_class(&self, class: Option<String>) {
        *self.personal_color_class.write().await = class;
    }

    pub async fn uploaded_image(&self) -> Option<String> {
        self.uploaded_image.read().await.clone()
    }

    pub async fn set_uploaded_image(&self, image: Option<String>) {
        let ready = image.is_some();
        *self.uploaded_image.write().await = image;
        if ready {
            self.broadcast_event(WizardEvent::ImagePreviewReady { session_id: self.id });
        }
    }

    pub async fn cosmetic_preferences(&self) -> String {
        self.cosmetic_preferences.read().await.clone()
    }

    pub async fn set_cosmetic_preferences(&self, preferences: impl Into<String>) {
        *self.cosmetic_preferences.write().await = preferences.into();
    }

    pub async fn style_preferences(&self) -> Option<StylePreferences> {
        self.style_preferences.read().await.clone()
    }

    pub async fn set_style_preferences(&self, preferences: Option<StylePreferences>) {
        *self.style_preferences.write().await = preferences;
    }

    pub async fn selected_cosmetic_category(&self) -> String {
        self.selected_cosmetic_category.read().await.clone()
    }

    pub async fn set_selected_cosmetic_category(&self, category: impl Into<String>) {
        *self.selected_cosmetic_category.write().await = category.into();
    }

    pub async fn recommended_products(&self) -> Vec<Product> {
        self.recommended_products.read().await.clone()
    }

    /// Replace the whole result set
    pub async fn set_recommended_products(&self, products: Vec<Product>) {
        let count = products.len();
        *self.recommended_products.write().await = products;
        self.broadcast_event(WizardEvent::ProductsReplaced {
            session_id: self.id,
            count,
        });
    }

    /// Display name for a coarse or detailed color code
    ///
    /// Unknown codes come back unchanged.
    pub fn personal_color_name<'a>(&self, code: &'a str) -> &'a str {
        color::display_name(code)
    }

    /// Copy every field
    pub async fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            session_id: self.id,
            started_at: self.started_at,
            step: self.step().await,
            personal_color: self.personal_color().await,
            personal_color_note: self.personal_color_note().await,
            personal_color_class: self.personal_color_class().await,
            uploaded_image: self.uploaded_image().await,
            cosmetic_preferences: self.cosmetic_preferences().await,
            style_preferences: self.style_preferences().await,
            selected_cosmetic_category: self.selected_cosmetic_category().await,
            recommended_products: self.recommended_products().await,
        }
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner of the active wizard session
///
/// State lives only as long as its session: starting a new session resets
/// everything, nothing is persisted.
#[derive(Default)]
pub struct WizardProvider {
    current: RwLock<Option<Arc<WizardSession>>>,
}

impl WizardProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session, replacing any active one
    pub async fn begin(&self) -> Arc<WizardSession> {
        let session = Arc::new(WizardSession::new());
        let previous = self.current.write().await.replace(Arc::clone(&session));

        if let Some(previous) = previous {
            info!(previous = %previous.id(), session_id = %session.id(), "Wizard session restarted");
        } else {
            info!(session_id = %session.id(), "Wizard session started");
        }
        session
    }

    /// End the active session, if any
    pub async fn end(&self) {
        if let Some(session) = self.current.write().await.take() {
            info!(session_id = %session.id(), "Wizard session ended");
        }
    }

    /// The active session
    ///
    /// Fails with [`Error::UninitializedContext`] when no session is active.
    pub async fn session(&self) -> Result<Arc<WizardSession>> {
        self.current
            .read()
            .await
            .clone()
            .ok_or(Error::UninitializedContext)
    }
}
