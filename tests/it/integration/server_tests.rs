//! The dashboard server over real HTTP.

use crate::helpers::{ScriptedTransport, inline_source, three_cases};
use epiboard::app::EpiBoard;
use epiboard::render::DashboardView;
use epiboard::server::DashboardServer;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::PathBuf;
use tempfile::TempDir;

async fn loaded_view() -> DashboardView {
    let transport = ScriptedTransport::new().then_csv(three_cases().to_csv());
    let mut board = EpiBoard::new(transport);
    board.load(&inline_source()).await.unwrap();
    board.view()
}

fn start(view: DashboardView, static_dir: PathBuf) -> DashboardServer {
    DashboardServer::start("127.0.0.1:0", view, static_dir).unwrap()
}

#[tokio::test]
async fn test_page_renders_loaded_view() {
    let server = start(loaded_view().await, PathBuf::from("."));

    let resp = reqwest::get(server.url()).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body = resp.text().await.unwrap();

    assert!(body.contains("Loaded 3 rows"));
    assert!(body.contains(r#"id="regionChart""#));
    assert!(body.contains(r#"id="ageChart""#));
    assert!(body.contains("Showing 3 of 3 rows"));
    assert!(body.contains("A (2)"));
}

#[tokio::test]
async fn test_page_applies_query() {
    let server = start(loaded_view().await, PathBuf::from("."));

    let body = reqwest::get(format!("{}?q=Female", server.url()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Showing 1 of 3 rows"));
    assert_eq!(body.matches(r#"style="display:none""#).count(), 2);
    assert!(body.contains(r#"value="Female""#));
}

#[tokio::test]
async fn test_api_returns_view_json() {
    let server = start(loaded_view().await, PathBuf::from("."));

    let json: serde_json::Value = reqwest::get(format!("{}api/dashboard", server.url()))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["status"], "Loaded 3 rows");
    assert_eq!(json["error"], serde_json::Value::Null);
    assert_eq!(json["charts"].as_array().unwrap().len(), 6);
    assert_eq!(json["charts"][0]["surface"], "regionChart");
    assert_eq!(json["table"]["rows"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_failed_view_is_served() {
    let mut board = EpiBoard::new(ScriptedTransport::new());
    board.load(&inline_source()).await.unwrap_err();
    let server = start(board.view(), PathBuf::from("."));

    let body = reqwest::get(server.url()).await.unwrap().text().await.unwrap();
    assert!(body.contains("Failed to load data"));
    assert!(body.contains("Fetch failed: 503"));
    assert!(!body.contains("Showing "));
}

#[tokio::test]
async fn test_publish_swaps_view() {
    let server = start(DashboardView::default(), PathBuf::from("."));
    server.publish(loaded_view().await);

    let body = reqwest::get(server.url()).await.unwrap().text().await.unwrap();
    assert!(body.contains("Loaded 3 rows"));
}

#[tokio::test]
async fn test_static_files() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("datasets")).unwrap();
    std::fs::write(dir.path().join("datasets/data.csv"), three_cases().to_csv()).unwrap();
    let server = start(DashboardView::default(), dir.path().to_path_buf());

    let resp = reqwest::get(format!("{}datasets/data.csv", server.url()))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.headers()["content-type"], "text/csv");
    assert_eq!(resp.text().await.unwrap(), three_cases().to_csv());

    let missing = reqwest::get(format!("{}datasets/none.csv", server.url()))
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[test]
fn test_path_traversal_is_rejected() {
    let dir = TempDir::new().unwrap();
    let public = dir.path().join("public");
    std::fs::create_dir(&public).unwrap();
    std::fs::write(dir.path().join("secret.txt"), "secret").unwrap();
    let server = start(DashboardView::default(), public);

    // Raw request, since HTTP clients normalize dot segments away
    let mut stream = TcpStream::connect(server.addr()).unwrap();
    stream
        .write_all(b"GET /../secret.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();

    assert!(response.starts_with("HTTP/1.1 404"));
    assert!(!response.contains("secret"));
}
