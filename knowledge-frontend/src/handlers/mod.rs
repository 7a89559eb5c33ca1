pub mod app;
pub mod documents;
pub mod metrics;
pub mod wizard;

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::{PageState, WizardDraft};

const PAGE_STATE_KEY: &str = "page_state";
const WIZARD_DRAFT_KEY: &str = "wizard_draft";
const FLASH_KEY: &str = "flash";

/// Transient notification, consumed by the next page render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub kind: String,
    pub message: String,
}

pub(crate) async fn load_page_state(session: &Session) -> PageState {
    session
        .get::<PageState>(PAGE_STATE_KEY)
        .await
        .unwrap_or(None)
        .unwrap_or_default()
}

pub(crate) async fn store_page_state(session: &Session, state: &PageState) {
    if let Err(e) = session.insert(PAGE_STATE_KEY, state).await {
        tracing::error!("Failed to persist page state: {}", e);
    }
}

pub(crate) async fn load_wizard_draft(session: &Session) -> WizardDraft {
    session
        .get::<WizardDraft>(WIZARD_DRAFT_KEY)
        .await
        .unwrap_or(None)
        .unwrap_or_default()
}

pub(crate) async fn store_wizard_draft(session: &Session, draft: &WizardDraft) {
    if let Err(e) = session.insert(WIZARD_DRAFT_KEY, draft).await {
        tracing::error!("Failed to persist wizard draft: {}", e);
    }
}

pub(crate) async fn flash_success(session: &Session, message: &str) {
    put_flash(session, "success", message).await;
}

pub(crate) async fn flash_error(session: &Session, message: &str) {
    put_flash(session, "error", message).await;
}

async fn put_flash(session: &Session, kind: &str, message: &str) {
    let flash = Flash {
        kind: kind.to_string(),
        message: message.to_string(),
    };
    if let Err(e) = session.insert(FLASH_KEY, &flash).await {
        tracing::error!("Failed to store flash message: {}", e);
    }
}

pub(crate) async fn take_flash(session: &Session) -> Option<Flash> {
    session
        .remove::<Flash>(FLASH_KEY)
        .await
        .unwrap_or(None)
}
