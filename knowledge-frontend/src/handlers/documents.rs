use askama::Template;
use axum::extract::{Query, State};
use axum::Form;
use serde::Deserialize;
use service_core::error::AppError;
use tower_sessions::Session;

use crate::handlers::{
    flash_error, flash_success, load_page_state, load_wizard_draft, store_page_state, take_flash,
    Flash,
};
use crate::models::{
    color_for, format_last_sync, result_badge, Document, PageState, ResultBadge, SourceType,
    WizardDraft, WizardStep, PAGE_SIZE,
};
use crate::AppState;

#[derive(Template)]
#[template(path = "pages/documents.html")]
pub struct DocumentsTemplate {
    pub space: String,
    pub rows: Vec<DocumentRow>,
    pub pager_pages: Vec<PageLink>,
    pub flash_kind: String,
    pub flash_message: String,
    pub wizard: WizardView,
    pub type_cards: Vec<TypeCard>,
}

/// One table row, pre-rendered so the template stays layout-only.
pub struct DocumentRow {
    pub id: i64,
    pub doc_name: String,
    pub doc_type: String,
    pub chunk_size: u64,
    pub last_sync: String,
    pub status: String,
    pub status_class: String,
    pub badge_show: bool,
    pub badge_label: String,
    pub badge_class: String,
    pub badge_detail: String,
}

impl DocumentRow {
    fn from_document(doc: &Document) -> Self {
        let (badge_show, badge_label, badge_class, badge_detail) =
            match result_badge(doc.status, doc.result.as_deref()) {
                ResultBadge::Hidden => (false, "", "", String::new()),
                ResultBadge::Success(detail) => (true, "SUCCESS", "chip-success", detail),
                ResultBadge::Failed(detail) => (true, "FAILED", "chip-danger", detail),
            };

        Self {
            id: doc.id,
            doc_name: doc.doc_name.clone(),
            doc_type: doc.doc_type.clone(),
            chunk_size: doc.chunk_size,
            last_sync: format_last_sync(&doc.last_sync),
            status: doc.status.as_str().to_string(),
            status_class: color_for(doc.status).css_class().to_string(),
            badge_show,
            badge_label: badge_label.to_string(),
            badge_class: badge_class.to_string(),
            badge_detail,
        }
    }
}

pub struct PageLink {
    pub number: u64,
    pub current: bool,
}

pub struct WizardView {
    pub open: bool,
    pub step0: bool,
    pub is_web_page: bool,
    pub is_file: bool,
    pub document_name: String,
    pub web_page_url: String,
    pub text_source: String,
    pub text: String,
    pub file_name: String,
}

impl WizardView {
    fn from_draft(draft: &WizardDraft) -> Self {
        Self {
            open: draft.open,
            step0: draft.active_step == WizardStep::ChooseType,
            is_web_page: draft.document_type == Some(SourceType::WebPage),
            is_file: draft.document_type == Some(SourceType::File),
            document_name: draft.document_name.clone(),
            web_page_url: draft.web_page_url.clone(),
            text_source: draft.text_source.clone(),
            text: draft.text.clone(),
            file_name: draft.file_name.clone().unwrap_or_default(),
        }
    }
}

pub struct TypeCard {
    pub value: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

fn type_cards() -> Vec<TypeCard> {
    vec![
        TypeCard {
            value: "text",
            title: "Text",
            subtitle: "Fill your raw text",
        },
        TypeCard {
            value: "webPage",
            title: "URL",
            subtitle: "Fetch the content of a URL",
        },
        TypeCard {
            value: "file",
            title: "Document",
            subtitle:
                "Upload a document, document type can be PDF, CSV, Text, PowerPoint, Word, Markdown",
        },
    ]
}

impl DocumentsTemplate {
    fn assemble(
        space: &str,
        page_state: &PageState,
        draft: &WizardDraft,
        flash: Option<Flash>,
    ) -> Self {
        let rows = page_state
            .documents
            .iter()
            .map(DocumentRow::from_document)
            .collect();

        let pager_pages = if page_state.needs_pager() {
            (1..=page_state.page_count())
                .map(|number| PageLink {
                    number,
                    current: number == page_state.current,
                })
                .collect()
        } else {
            Vec::new()
        };

        let (flash_kind, flash_message) = match flash {
            Some(flash) => (flash.kind, flash.message),
            None => (String::new(), String::new()),
        };

        Self {
            space: space.to_string(),
            rows,
            pager_pages,
            flash_kind,
            flash_message,
            wizard: WizardView::from_draft(draft),
            type_cards: type_cards(),
        }
    }
}

pub(crate) fn require_space(name: Option<String>) -> Result<String, AppError> {
    name.filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing space name")))
}

/// Fetch a listing page into the session-held state. Failures of any kind
/// leave the previous state in place with nothing shown to the user.
pub(crate) async fn fetch_page(state: &AppState, session: &Session, space: &str, page: u64) {
    let mut page_state = load_page_state(session).await;
    let token = page_state.begin_load();

    match state
        .knowledge_client
        .list_documents(space, page, PAGE_SIZE)
        .await
    {
        Ok(response) if response.success => {
            if let Some(data) = response.data {
                page_state.apply(token, data.data, data.total, data.page);
            }
        }
        Ok(response) => {
            tracing::warn!(
                space = %space,
                err_msg = response.err_msg.as_deref().unwrap_or("-"),
                "Document list request rejected"
            );
        }
        Err(e) => {
            tracing::error!(space = %space, "Failed to fetch documents: {}", e);
        }
    }

    store_page_state(session, &page_state).await;
}

/// Render the page from whatever the session currently holds.
pub(crate) async fn render_page(session: &Session, space: &str) -> DocumentsTemplate {
    let page_state = load_page_state(session).await;
    let draft = load_wizard_draft(session).await;
    let flash = take_flash(session).await;
    DocumentsTemplate::assemble(space, &page_state, &draft, flash)
}

#[derive(Deserialize)]
pub struct DocumentsParams {
    pub name: Option<String>,
    pub page: Option<u64>,
}

pub async fn documents_page(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<DocumentsParams>,
) -> Result<DocumentsTemplate, AppError> {
    let space = require_space(params.name)?;
    let page = params.page.unwrap_or(1).max(1);

    fetch_page(&state, &session, &space, page).await;

    Ok(render_page(&session, &space).await)
}

#[derive(Deserialize)]
pub struct SyncForm {
    pub name: String,
    pub doc_id: i64,
}

pub async fn sync_document(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SyncForm>,
) -> Result<DocumentsTemplate, AppError> {
    match state
        .knowledge_client
        .sync_documents(&form.name, &[form.doc_id])
        .await
    {
        Ok(response) if response.success => flash_success(&session, "success").await,
        Ok(response) => {
            flash_error(&session, response.err_msg.as_deref().unwrap_or("failed")).await
        }
        Err(e) => {
            tracing::error!(doc_id = form.doc_id, "Failed to sync document: {}", e);
            flash_error(&session, "failed").await;
        }
    }

    // The table keeps its current contents; status changes show up on the
    // next page load.
    Ok(render_page(&session, &form.name).await)
}
