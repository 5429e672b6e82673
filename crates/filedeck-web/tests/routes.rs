use std::fs;
use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::header::{
    CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE, COOKIE, EXPIRES, LOCATION, PRAGMA,
    SET_COOKIE,
};
use axum::http::{Request, Response, StatusCode};
use filedeck_core::Config;
use filedeck_ops::FileService;
use filedeck_web::{AppState, SESSION_COOKIE, router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

fn app(root: &Path) -> Router {
    router(AppState::new(FileService::new(&Config::default()), root))
}

async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// `name=value` pair from the session cookie of a response.
fn session_cookie(res: &Response<Body>) -> String {
    let header = res
        .headers()
        .get(SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    let pair = header.split(';').next().unwrap().to_string();
    assert!(pair.starts_with(SESSION_COOKIE));
    pair
}

async fn body_text(res: Response<Body>) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(res: Response<Body>) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Start a session and return its cookie.
async fn start_session(app: &Router) -> String {
    let res = send(app, get("/api/status", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    session_cookie(&res)
}

fn canonical_tempdir() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::Builder::new().prefix("web").tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    (dir, root)
}

#[tokio::test]
async fn test_health_and_cache_headers() {
    let (_dir, root) = canonical_tempdir();
    let app = app(&root);

    let res = send(&app, get("/health", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[CACHE_CONTROL],
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(res.headers()[PRAGMA], "no-cache");
    assert_eq!(res.headers()[EXPIRES], "0");

    let body = body_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "filedeck-web");
}

#[tokio::test]
async fn test_status_reports_session_directory() {
    let (_dir, root) = canonical_tempdir();
    let app = app(&root);

    let res = send(&app, get("/api/status", None)).await;
    let cookie = session_cookie(&res);
    let body = body_json(res).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["current_directory"], root.to_str().unwrap());

    let res = send(&app, get("/api/status", Some(&cookie))).await;
    assert!(res.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_sessions_navigate_independently() {
    let (_dir, root) = canonical_tempdir();
    fs::create_dir(root.join("alpha")).unwrap();
    let app = app(&root);

    let first = start_session(&app).await;
    let second = start_session(&app).await;
    assert_ne!(first, second);

    let res = send(&app, post_form("/navigate", Some(&first), "path=alpha")).await;
    assert!(res.status().is_redirection());
    assert_eq!(res.headers()[LOCATION], "/");

    let body = body_json(send(&app, get("/api/status", Some(&first))).await).await;
    assert_eq!(
        body["current_directory"],
        root.join("alpha").to_str().unwrap()
    );
    let body = body_json(send(&app, get("/api/status", Some(&second))).await).await;
    assert_eq!(body["current_directory"], root.to_str().unwrap());
}

#[tokio::test]
async fn test_navigate_to_file_keeps_directory() {
    let (_dir, root) = canonical_tempdir();
    fs::write(root.join("file.txt"), b"x").unwrap();
    let app = app(&root);
    let cookie = start_session(&app).await;

    for body in ["path=file.txt", "path=missing", ""] {
        let res = send(&app, post_form("/navigate", Some(&cookie), body)).await;
        assert!(res.status().is_redirection());
    }
    let body = body_json(send(&app, get("/api/status", Some(&cookie))).await).await;
    assert_eq!(body["current_directory"], root.to_str().unwrap());
}

#[tokio::test]
async fn test_index_lists_entries() {
    let (_dir, root) = canonical_tempdir();
    fs::create_dir(root.join("Documents")).unwrap();
    fs::write(root.join("a <b>.txt"), vec![0u8; 1536]).unwrap();
    let app = app(&root);

    let res = send(&app, get("/", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("Documents/"));
    assert!(html.contains("a &lt;b&gt;.txt"));
    assert!(html.contains("/download/a%20%3Cb%3E.txt"));
    assert!(html.contains("1.5 KB"));
    assert!(html.contains("1 folders, 1 files"));
}

#[tokio::test]
async fn test_index_error_page_when_directory_vanishes() {
    let (_dir, root) = canonical_tempdir();
    fs::create_dir(root.join("gone")).unwrap();
    let app = app(&root);
    let cookie = start_session(&app).await;

    send(&app, post_form("/navigate", Some(&cookie), "path=gone")).await;
    fs::remove_dir(root.join("gone")).unwrap();

    let res = send(&app, get("/", Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_text(res).await.contains("Path not found"));
}

#[tokio::test]
async fn test_create_folder() {
    let (_dir, root) = canonical_tempdir();
    let app = app(&root);
    let cookie = start_session(&app).await;

    let res = send(&app, post_form("/create_folder", Some(&cookie), "name=")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "Folder name is required");

    let res = send(&app, post_form("/create_folder", Some(&cookie), "name=Projects")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["success"], "Folder created successfully");
    assert!(root.join("Projects").is_dir());

    let res = send(&app, post_form("/create_folder", Some(&cookie), "name=Projects")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_json(res).await["error"]
            .as_str()
            .unwrap()
            .contains("already exists")
    );

    let res = send(&app, post_form("/create_folder", Some(&cookie), "name=a%2Fb")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(!root.join("a").exists());
}

#[tokio::test]
async fn test_delete_and_rename() {
    let (_dir, root) = canonical_tempdir();
    fs::create_dir_all(root.join("tree/nested")).unwrap();
    fs::write(root.join("tree/nested/leaf"), b"x").unwrap();
    fs::write(root.join("a.txt"), b"a").unwrap();
    fs::write(root.join("b.txt"), b"b").unwrap();
    let app = app(&root);
    let cookie = start_session(&app).await;

    let res = send(&app, post_form("/delete", Some(&cookie), "")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "Path is required");

    let res = send(&app, post_form("/delete", Some(&cookie), "path=tree")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!root.join("tree").exists());

    let res = send(&app, post_form("/rename", Some(&cookie), "old_path=a.txt")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(res).await["error"],
        "Both old path and new name are required"
    );

    let res = send(
        &app,
        post_form("/rename", Some(&cookie), "old_path=a.txt&new_name=b.txt"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "a");

    let res = send(
        &app,
        post_form("/rename", Some(&cookie), "old_path=a.txt&new_name=c.txt"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(root.join("c.txt").exists());

    let res = send(&app, post_form("/delete", Some(&cookie), "path=missing")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download() {
    let (_dir, root) = canonical_tempdir();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/my file.txt"), b"contents").unwrap();
    let app = app(&root);

    let res = send(&app, get("/download/sub/my%20file.txt", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let disposition = res.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"my file.txt\""));
    assert_eq!(body_text(res).await, "contents");

    let res = send(&app, get("/download/sub", None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["error"], "File not found");

    let res = send(&app, get("/download/nope.txt", None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

fn multipart(uri: &str, cookie: &str, field: &str, file_name: &str, data: &str) -> Request<Body> {
    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/plain\r\n\r\n{data}\r\n--{boundary}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(COOKIE, cookie)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_upload() {
    let (_dir, root) = canonical_tempdir();
    fs::write(root.join("notes.txt"), b"existing").unwrap();
    let app = app(&root);
    let cookie = start_session(&app).await;

    let res = send(&app, multipart("/upload", &cookie, "file", "notes.txt", "uploaded")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["success"], "File uploaded successfully");
    assert_eq!(fs::read_to_string(root.join("notes.txt")).unwrap(), "existing");
    assert_eq!(
        fs::read_to_string(root.join("notes (1).txt")).unwrap(),
        "uploaded"
    );

    let res = send(&app, multipart("/upload", &cookie, "file", "", "x")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "No file selected");

    let res = send(&app, multipart("/upload", &cookie, "other", "a.txt", "x")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(&app, post_form("/upload", Some(&cookie), "")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "No file selected");
}

#[tokio::test]
async fn test_search() {
    let (_dir, root) = canonical_tempdir();
    fs::create_dir_all(root.join("deep/er")).unwrap();
    fs::write(root.join("deep/er/Budget.xlsx"), b"").unwrap();
    fs::write(root.join("other.txt"), b"").unwrap();
    let app = app(&root);

    let res = send(&app, get("/search?q=", None)).await;
    assert!(res.status().is_redirection());
    assert_eq!(res.headers()[LOCATION], "/");

    let res = send(&app, get("/search?q=budget", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("Budget.xlsx"));
    assert!(html.contains("/download/deep/er/Budget.xlsx"));
    assert!(!html.contains("other.txt"));
    assert!(html.contains("1 result(s)"));
}

#[tokio::test]
async fn test_api_list_sorting() {
    let (_dir, root) = canonical_tempdir();
    fs::create_dir(root.join("zdir")).unwrap();
    fs::write(root.join("small.txt"), b"1").unwrap();
    fs::write(root.join("large.txt"), vec![0u8; 100]).unwrap();
    let app = app(&root);

    let body = body_json(send(&app, get("/api/list?sort=size&order=desc", None)).await).await;
    let names: Vec<&str> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["zdir", "large.txt", "small.txt"]);
    assert_eq!(body["summary"], "1 folders, 2 files");
    assert_eq!(body["entries"][1]["type"], "Text File");

    let res = send(&app, get("/api/list?sort=colour", None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_properties() {
    let (_dir, root) = canonical_tempdir();
    fs::write(root.join("photo.JPG"), vec![0u8; 2048]).unwrap();
    let app = app(&root);

    let res = send(&app, get("/api/properties?path=photo.JPG", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["type"], "JPEG Image");
    assert_eq!(body["size_display"], "2.0 KB");
    assert_eq!(body["location"], root.to_str().unwrap());

    let res = send(&app, get("/api/properties", None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cut_and_paste_between_directories() {
    let (_dir, root) = canonical_tempdir();
    fs::create_dir(root.join("target")).unwrap();
    fs::write(root.join("one.txt"), b"1").unwrap();
    fs::write(root.join("two.txt"), b"2").unwrap();
    let app = app(&root);
    let cookie = start_session(&app).await;

    let res = send(&app, post_form("/paste", Some(&cookie), "")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        &app,
        post_form("/cut", Some(&cookie), "path=one.txt&path=two.txt"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body_json(res).await["clipboard"],
        "2 items: 2 file(s) (cut)"
    );

    send(&app, post_form("/navigate", Some(&cookie), "path=target")).await;
    let res = send(&app, post_form("/paste", Some(&cookie), "")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["success"], "Moved 2 item(s)");
    assert!(root.join("target/one.txt").exists());
    assert!(!root.join("one.txt").exists());

    let res = send(&app, post_form("/paste", Some(&cookie), "")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "Clipboard is empty");
}
