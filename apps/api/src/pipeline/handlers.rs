//! Axum route handlers for the pipeline API.
//!
//! A run is synchronous: the create handler blocks on the orchestrator for
//! the full pipeline, stores the result, and returns it. Credential and
//! input validation happen before any external call is made.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::docx::build_docx;
use crate::errors::AppError;
use crate::extract::extract_text;
use crate::markdown::normalize;
use crate::pipeline::orchestrator::Orchestrator;
use crate::pipeline::units::{build_pipeline, RunInput};
use crate::session::RunResult;
use crate::state::AppState;

/// Fixed filename of the exported document.
const EXPORT_FILENAME: &str = "Tailored_Resume.docx";

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Uploaded form fields, gathered from the multipart body.
#[derive(Debug, Default)]
struct RunForm {
    resume_bytes: Option<Bytes>,
    resume_media_type: Option<String>,
    job_url: String,
    portfolio_url: Option<String>,
    achievements: String,
}

/// POST /api/v1/runs
///
/// Multipart form: `resume` file part (PDF or plain text), `job_url`,
/// optional `portfolio_url`, `achievements` free text. Runs the full
/// pipeline and returns the stored result.
pub async fn handle_create_run(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RunResult>, AppError> {
    // Credentials first: a missing model key blocks the run with zero
    // external calls made.
    let creds = state.config.model_credentials()?;

    let form = read_run_form(multipart).await?;
    let (resume_bytes, media_type) = validate_form(&form)?;

    let resume_text = extract_text(resume_bytes, media_type)?;
    info!(
        "Extracted {} chars of resume text ({media_type})",
        resume_text.len()
    );

    let input = RunInput {
        resume_text,
        job_url: form.job_url.clone(),
        achievements: form.achievements.clone(),
        portfolio_url: form.portfolio_url.clone(),
    };
    let units = build_pipeline(&input);

    let orchestrator =
        Orchestrator::from_credentials(&creds, state.config.serper_api_key.clone());
    let outputs = orchestrator.run(&units).await?;

    let result = RunResult::new(outputs.resume, outputs.interview_prep);
    info!("Run {} completed", result.run_id);
    state.runs.insert(result.clone()).await;

    Ok(Json(result))
}

/// GET /api/v1/runs/:id
///
/// Returns the two result texts raw, residual markup included.
pub async fn handle_get_run(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Result<Json<RunResult>, AppError> {
    let result = state
        .runs
        .get(run_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Run {run_id} not found")))?;
    Ok(Json(result))
}

/// GET /api/v1/runs/:id/document
///
/// Normalizes the tailored resume and returns it as a downloadable `.docx`
/// with a fixed filename.
pub async fn handle_download_document(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let result = state
        .runs
        .get(run_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Run {run_id} not found")))?;

    let cleaned = normalize(&result.tailored_resume);
    let document = build_docx(&cleaned).map_err(|e| AppError::Export(e.to_string()))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, DOCX_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILENAME}\""),
        )
        .body(Body::from(document))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {e}")))
}

/// DELETE /api/v1/runs
///
/// Reset: clears all stored results wholesale.
pub async fn handle_reset(State(state): State<AppState>) -> StatusCode {
    state.runs.clear().await;
    info!("Run store cleared");
    StatusCode::NO_CONTENT
}

/// Drains the multipart body into a `RunForm`.
async fn read_run_form(mut multipart: Multipart) -> Result<RunForm, AppError> {
    let mut form = RunForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                form.resume_media_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                form.resume_bytes = Some(bytes);
            }
            "job_url" => {
                form.job_url = read_text_field(field).await?;
            }
            "portfolio_url" => {
                let value = read_text_field(field).await?;
                if !value.trim().is_empty() {
                    form.portfolio_url = Some(value);
                }
            }
            "achievements" => {
                form.achievements = read_text_field(field).await?;
            }
            _ => {} // unknown fields are ignored
        }
    }

    Ok(form)
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))
}

/// Missing resume or job URL blocks the run before anything else happens.
fn validate_form(form: &RunForm) -> Result<(&[u8], &str), AppError> {
    let resume_bytes = form.resume_bytes.as_deref().ok_or_else(|| {
        AppError::Validation("Missing inputs: please provide at least a resume and job URL".to_string())
    })?;
    if form.job_url.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing inputs: please provide at least a resume and job URL".to_string(),
        ));
    }
    let media_type = form.resume_media_type.as_deref().unwrap_or("text/plain");
    Ok((resume_bytes, media_type))
}
