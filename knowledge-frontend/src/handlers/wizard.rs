use axum::extract::{Multipart, State};
use axum::Form;
use serde::Deserialize;
use service_core::error::AppError;
use tower_sessions::Session;

use crate::handlers::documents::{fetch_page, render_page, DocumentsTemplate};
use crate::handlers::{
    flash_error, flash_success, load_page_state, load_wizard_draft, store_wizard_draft,
};
use crate::models::{SourceType, SubmitAction};
use crate::services::knowledge_client::AddDocumentRequest;
use crate::AppState;

#[derive(Deserialize)]
pub struct WizardForm {
    pub name: String,
}

pub async fn open_wizard(
    session: Session,
    Form(form): Form<WizardForm>,
) -> Result<DocumentsTemplate, AppError> {
    let mut draft = load_wizard_draft(&session).await;
    draft.open();
    store_wizard_draft(&session, &draft).await;

    Ok(render_page(&session, &form.name).await)
}

pub async fn close_wizard(
    session: Session,
    Form(form): Form<WizardForm>,
) -> Result<DocumentsTemplate, AppError> {
    let mut draft = load_wizard_draft(&session).await;
    draft.close();
    store_wizard_draft(&session, &draft).await;

    Ok(render_page(&session, &form.name).await)
}

#[derive(Deserialize)]
pub struct ChooseForm {
    pub name: String,
    pub document_type: String,
}

pub async fn choose_type(
    session: Session,
    Form(form): Form<ChooseForm>,
) -> Result<DocumentsTemplate, AppError> {
    let source_type: SourceType = form
        .document_type
        .parse()
        .map_err(|e: String| AppError::BadRequest(anyhow::anyhow!(e)))?;

    let mut draft = load_wizard_draft(&session).await;
    draft.choose(source_type);
    store_wizard_draft(&session, &draft).await;

    Ok(render_page(&session, &form.name).await)
}

struct UploadedFile {
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e)))
}

pub async fn submit_wizard(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<DocumentsTemplate, AppError> {
    let mut space = String::new();
    let mut doc_name = String::new();
    let mut web_page_url: Option<String> = None;
    let mut text_source: Option<String> = None;
    let mut text: Option<String> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        let Some(field_name) = field.name().map(|n| n.to_string()) else {
            continue;
        };

        match field_name.as_str() {
            "name" => space = read_text(field).await?,
            "doc_name" => doc_name = read_text(field).await?,
            "web_page_url" => web_page_url = Some(read_text(field).await?),
            "text_source" => text_source = Some(read_text(field).await?),
            "text" => text = Some(read_text(field).await?),
            "doc_file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
                })?;
                // Browsers post an empty part when no file was chosen.
                if !file_name.is_empty() {
                    file = Some(UploadedFile {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    if space.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("Missing space name")));
    }

    let mut draft = load_wizard_draft(&session).await;
    if draft.document_type == Some(SourceType::File) {
        // The file selection only exists within this request; any handle
        // from a previous attempt is gone along with its defaulted name.
        draft.clear_file();
        if let Some(uploaded) = &file {
            draft.attach_file(&uploaded.file_name);
        }
        // An explicitly typed name wins over the file-name default.
        if !doc_name.is_empty() {
            draft.set_name(&doc_name);
        }
    } else {
        draft.set_name(&doc_name);
    }
    if let Some(url) = &web_page_url {
        draft.set_url(url);
    }
    if let Some(source) = &text_source {
        draft.set_source(source);
    }
    if let Some(body) = &text {
        draft.set_text(body);
    }

    let action = match draft.validate() {
        Ok(action) => action,
        Err(e) => {
            // No request goes out; the modal re-renders with the message.
            store_wizard_draft(&session, &draft).await;
            flash_error(&session, &e.to_string()).await;
            return Ok(render_page(&session, &space).await);
        }
    };

    store_wizard_draft(&session, &draft).await;

    let outcome = match &action {
        SubmitAction::AddText {
            doc_name,
            source,
            text,
        } => {
            state
                .knowledge_client
                .add_document(
                    &space,
                    &AddDocumentRequest {
                        doc_name: doc_name.clone(),
                        content: text.clone(),
                        doc_type: "TEXT".to_string(),
                        source: Some(source.clone()),
                    },
                )
                .await
        }
        SubmitAction::AddUrl { doc_name, url } => {
            state
                .knowledge_client
                .add_document(
                    &space,
                    &AddDocumentRequest {
                        doc_name: doc_name.clone(),
                        content: url.clone(),
                        doc_type: "URL".to_string(),
                        source: None,
                    },
                )
                .await
        }
        SubmitAction::UploadFile { doc_name, .. } => {
            // Validation only passes when the file arrived with this request.
            let uploaded = file
                .take()
                .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing file upload")))?;
            state
                .knowledge_client
                .upload_document(
                    &space,
                    doc_name,
                    &uploaded.file_name,
                    &uploaded.content_type,
                    uploaded.data,
                )
                .await
        }
    };

    match outcome {
        Ok(response) if response.success => {
            flash_success(&session, "success").await;
            draft.close();
            store_wizard_draft(&session, &draft).await;

            // Refresh the page the user is looking at.
            let current = load_page_state(&session).await.current_or_first();
            fetch_page(&state, &session, &space, current).await;
        }
        Ok(response) => {
            flash_error(&session, response.err_msg.as_deref().unwrap_or("failed")).await;
        }
        Err(e) => {
            tracing::error!("Failed to submit document: {}", e);
            flash_error(&session, "failed").await;
        }
    }

    Ok(render_page(&session, &space).await)
}
