//! Route handlers.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::FormRejection;
use axum::extract::{Multipart, Path as UrlPath, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form, Json};
use filedeck_core::{
    DirectoryEntry, FsError, SortColumn, SortOrder, SortState, format_datetime,
    format_optional_size, format_timestamp, validate_filename,
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::html;
use crate::session::SessionId;
use crate::state::AppState;

/// Service name reported by the status endpoints.
pub const SERVICE_NAME: &str = "filedeck-web";

type ApiResult = Result<Json<Value>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct PathForm {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NameForm {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RenameForm {
    old_path: Option<String>,
    new_name: Option<String>,
}

/// Repeated `path` fields, e.g. `path=a&path=b`.
#[derive(Debug, Default, Deserialize)]
pub struct PathsForm {
    #[serde(default)]
    path: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    sort: Option<String>,
    order: Option<String>,
}

/// Trimmed, non-empty form value.
fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve a client path against the session directory. Absolute paths are
/// used as given.
fn resolve(dir: &Path, path: &str) -> PathBuf {
    dir.join(path)
}

fn success(message: &str) -> Json<Value> {
    Json(json!({ "success": message }))
}

/// `GET /`: listing of the session's current directory.
pub async fn index(State(state): State<AppState>, Extension(id): Extension<SessionId>) -> Response {
    let result = state
        .blocking(move |st| {
            let (dir, clipboard) = st
                .sessions
                .with(id, |s| (s.current_dir().to_path_buf(), s.clipboard.clone()));
            let listing = st.service.list(&dir)?;
            Ok((listing, st.service.clipboard_summary(&clipboard)))
        })
        .await;

    match result {
        Ok((listing, clipboard)) => Html(html::render_index(&listing, &clipboard)).into_response(),
        Err(err) => (err.status(), Html(html::render_error(&err.to_string()))).into_response(),
    }
}

/// `POST /navigate`: change directory if the target is a directory; always
/// redirects home.
pub async fn navigate(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    form: Result<Form<PathForm>, FormRejection>,
) -> Redirect {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    if let Some(path) = required(form.path) {
        let result = state
            .blocking(move |st| {
                Ok(st
                    .sessions
                    .with(id, |s| s.navigate(&path).map(Path::to_path_buf)))
            })
            .await;
        match result {
            Ok(Ok(dir)) => debug!(dir = %dir.display(), "navigated"),
            Ok(Err(err)) => debug!(error = %err, "navigation rejected"),
            Err(err) => debug!(error = %err, "navigation failed"),
        }
    }
    Redirect::to("/")
}

/// `POST /upload`: store the multipart `file` field in the current
/// directory.
pub async fn upload(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    let mut multipart = multipart.map_err(|_| ApiError::bad_request("No file selected"))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned).filter(|n| !n.is_empty()) else {
            return Err(ApiError::bad_request("No file selected"));
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let saved = state
            .blocking(move |st| {
                let dir = st.sessions.current_dir(id);
                Ok(st.service.save_upload(&dir, &file_name, &bytes)?)
            })
            .await?;
        info!(path = %saved.display(), "file uploaded");
        return Ok(Json(json!({
            "success": "File uploaded successfully",
            "path": saved,
        })));
    }

    Err(ApiError::bad_request("No file selected"))
}

/// `POST /create_folder`
pub async fn create_folder(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    form: Result<Form<NameForm>, FormRejection>,
) -> ApiResult {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let name = required(form.name).ok_or_else(|| ApiError::bad_request("Folder name is required"))?;
    validate_filename(&name).map_err(|reason| FsError::invalid_name(&name, reason))?;

    state
        .blocking(move |st| {
            let dir = st.sessions.current_dir(id);
            Ok(st.service.create_folder(&dir.join(&name))?)
        })
        .await?;
    Ok(success("Folder created successfully"))
}

/// `POST /delete`
pub async fn delete(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    form: Result<Form<PathForm>, FormRejection>,
) -> ApiResult {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let path = required(form.path).ok_or_else(|| ApiError::bad_request("Path is required"))?;

    state
        .blocking(move |st| {
            let target = resolve(&st.sessions.current_dir(id), &path);
            Ok(st.service.delete(&target)?)
        })
        .await?;
    Ok(success("Item deleted successfully"))
}

/// `POST /rename`: rename within the item's parent directory.
pub async fn rename(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    form: Result<Form<RenameForm>, FormRejection>,
) -> ApiResult {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let (Some(old_path), Some(new_name)) = (required(form.old_path), required(form.new_name)) else {
        return Err(ApiError::bad_request(
            "Both old path and new name are required",
        ));
    };

    let renamed = state
        .blocking(move |st| {
            let source = resolve(&st.sessions.current_dir(id), &old_path);
            Ok(st.service.rename(&source, &new_name)?)
        })
        .await?;
    Ok(Json(json!({
        "success": "Item renamed successfully",
        "path": renamed,
    })))
}

/// `GET /download/{*path}`: a file relative to the current directory, as an
/// attachment.
pub async fn download(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    UrlPath(path): UrlPath<String>,
) -> Result<Response, ApiError> {
    let file = resolve(&state.sessions.current_dir(id), &path);
    let is_file = tokio::fs::metadata(&file)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(ApiError::NotFound("File not found".to_string()));
    }

    let bytes = tokio::fs::read(&file)
        .await
        .map_err(|e| FsError::io(&file, e))?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "download".to_string());

    Ok((
        [
            (CONTENT_TYPE, "application/octet-stream".to_string()),
            (CONTENT_DISPOSITION, content_disposition(&name)),
        ],
        bytes,
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 name.
fn content_disposition(name: &str) -> String {
    let fallback: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        utf8_percent_encode(name, NON_ALPHANUMERIC)
    )
}

/// `GET /search?q=`: recursive search from the current directory.
pub async fn search(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let Some(q) = required(query.q) else {
        return Redirect::to("/").into_response();
    };

    let result = state
        .blocking(move |st| {
            let dir = st.sessions.current_dir(id);
            let hits = st.service.search(&dir, &q);
            Ok(html::render_search(&q, &dir, &hits))
        })
        .await;

    match result {
        Ok(page) => Html(page).into_response(),
        Err(err) => (err.status(), Html(html::render_error(&err.to_string()))).into_response(),
    }
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

/// `GET /api/status`
pub async fn api_status(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
) -> Json<Value> {
    Json(json!({
        "status": "running",
        "current_directory": state.sessions.current_dir(id),
        "service": SERVICE_NAME,
    }))
}

fn parse_sort(query: &ListQuery) -> Result<SortState, ApiError> {
    let column = match query.sort.as_deref() {
        None | Some("") => SortColumn::default(),
        Some(s) => SortColumn::from_str(s)
            .map_err(|_| ApiError::bad_request(format!("Unknown sort column: {s}")))?,
    };
    let order = match query.order.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("") | Some("asc") | Some("ascending") => SortOrder::Ascending,
        Some("desc") | Some("descending") => SortOrder::Descending,
        Some(other) => {
            return Err(ApiError::bad_request(format!("Unknown sort order: {other}")));
        }
    };
    Ok(SortState::new(column, order))
}

fn entry_json(entry: &DirectoryEntry) -> Value {
    json!({
        "name": entry.name,
        "path": entry.path,
        "is_dir": entry.is_folder(),
        "type": entry.type_label(),
        "size": entry.size,
        "size_display": format_optional_size(entry.size),
        "modified": format_datetime(entry.modified.as_ref()),
    })
}

/// `GET /api/list?sort=&order=`
pub async fn api_list(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    Query(query): Query<ListQuery>,
) -> ApiResult {
    let sort = parse_sort(&query)?;
    let mut listing = state
        .blocking(move |st| Ok(st.service.list(&st.sessions.current_dir(id))?))
        .await?;
    sort.apply(&mut listing.entries);

    Ok(Json(json!({
        "path": listing.path,
        "parent": listing.parent,
        "summary": listing.summary(),
        "sort": sort.label(),
        "entries": listing.entries.iter().map(entry_json).collect::<Vec<_>>(),
    })))
}

/// `GET /api/properties?path=`
pub async fn api_properties(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    Query(query): Query<PathForm>,
) -> ApiResult {
    let path = required(query.path).ok_or_else(|| ApiError::bad_request("Path is required"))?;
    let props = state
        .blocking(move |st| {
            let target = resolve(&st.sessions.current_dir(id), &path);
            Ok(st.service.properties(&target)?)
        })
        .await?;

    Ok(Json(json!({
        "name": props.name,
        "type": props.kind.to_string(),
        "size": props.size,
        "size_display": props.size_display(),
        "location": props.location,
        "created": format_timestamp(props.created.as_ref()),
        "modified": format_timestamp(props.modified.as_ref()),
        "accessed": format_timestamp(props.accessed.as_ref()),
    })))
}

async fn fill_clipboard(
    state: AppState,
    id: SessionId,
    form: Result<axum_extra::extract::Form<PathsForm>, axum_extra::extract::FormRejection>,
    cut: bool,
) -> ApiResult {
    let form = form
        .map(|axum_extra::extract::Form(f)| f)
        .unwrap_or_default();
    let paths: Vec<String> = form.path.into_iter().filter_map(|p| required(Some(p))).collect();
    if paths.is_empty() {
        return Err(ApiError::bad_request("Path is required"));
    }

    let summary = state
        .blocking(move |st| {
            let clipboard = st.sessions.with(id, |s| {
                let dir = s.current_dir().to_path_buf();
                let resolved = paths.iter().map(|p| resolve(&dir, p));
                if cut {
                    s.clipboard.cut(resolved);
                } else {
                    s.clipboard.copy(resolved);
                }
                s.clipboard.clone()
            });
            Ok(st.service.clipboard_summary(&clipboard))
        })
        .await?;

    let message = if cut {
        "Cut to clipboard"
    } else {
        "Copied to clipboard"
    };
    Ok(Json(json!({ "success": message, "clipboard": summary })))
}

/// `POST /copy`
pub async fn copy(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    form: Result<axum_extra::extract::Form<PathsForm>, axum_extra::extract::FormRejection>,
) -> ApiResult {
    fill_clipboard(state, id, form, false).await
}

/// `POST /cut`
pub async fn cut(
    State(state): State<AppState>,
    Extension(id): Extension<SessionId>,
    form: Result<axum_extra::extract::Form<PathsForm>, axum_extra::extract::FormRejection>,
) -> ApiResult {
    fill_clipboard(state, id, form, true).await
}

/// `POST /paste`: paste the session clipboard into the current directory.
pub async fn paste(State(state): State<AppState>, Extension(id): Extension<SessionId>) -> ApiResult {
    let outcome = state
        .blocking(move |st| {
            let (dir, mut clipboard) = st
                .sessions
                .with(id, |s| (s.current_dir().to_path_buf(), s.clipboard.clone()));
            if clipboard.is_empty() {
                return Err(ApiError::bad_request("Clipboard is empty"));
            }
            let pasted = clipboard.clone();
            let outcome = st.service.paste(&mut clipboard, &dir)?;
            st.sessions.finish_paste(id, &pasted, clipboard);
            Ok(outcome)
        })
        .await?;

    if !outcome.is_success() {
        let details: Vec<String> = outcome.errors.iter().map(ToString::to_string).collect();
        return Err(ApiError::Internal(format!(
            "{}: {}",
            outcome.summary(),
            details.join("; ")
        )));
    }
    Ok(Json(json!({
        "success": outcome.summary(),
        "created": outcome.created,
    })))
}
