//! Local HTTP server for the dashboard.
//!
//! Serves the rendered page at `/` (filtered by `?q=`), the current view as
//! JSON at `/api/dashboard`, and anything else from the static directory.
//! Requests are handled on a background thread that polls a shutdown flag.

use crate::constants::SERVER_POLL_MS;
use crate::render::{DashboardView, render_page};
use parking_lot::RwLock;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use tracing::{debug, error, info, warn};
use url::Url;

/// Create an HTTP header (returns None if invalid)
fn create_header(name: &[u8], value: &[u8]) -> Option<Header> {
    Header::from_bytes(name, value).ok()
}

pub struct DashboardServer {
    addr: std::net::SocketAddr,
    view: Arc<RwLock<DashboardView>>,
    shutdown_flag: Arc<AtomicBool>,
    server_thread: Option<JoinHandle<()>>,
}

impl DashboardServer {
    /// Bind `addr` and start serving `view`
    pub fn start(addr: &str, view: DashboardView, static_dir: PathBuf) -> anyhow::Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| anyhow::anyhow!("failed to bind dashboard server on {addr}: {e}"))?;
        let addr = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| anyhow::anyhow!("dashboard server is not bound to an IP address"))?;

        let view = Arc::new(RwLock::new(view));
        let shutdown_flag = Arc::new(AtomicBool::new(false));

        let thread_view = view.clone();
        let thread_flag = shutdown_flag.clone();
        let server_thread = thread::spawn(move || {
            loop {
                if thread_flag.load(Ordering::Relaxed) {
                    break;
                }

                match server.recv_timeout(Duration::from_millis(SERVER_POLL_MS)) {
                    Ok(Some(request)) => handle_request(request, &thread_view, &static_dir),
                    Ok(None) => {}
                    Err(e) => {
                        error!("dashboard server stopped: {}", e);
                        break;
                    }
                }
            }
            debug!("dashboard server thread exiting");
        });

        info!(%addr, "dashboard server listening");
        Ok(Self {
            addr,
            view,
            shutdown_flag,
            server_thread: Some(server_thread),
        })
    }

    pub fn addr(&self) -> std::net::SocketAddr {
        self.addr
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Swap in the view of a newer load cycle
    pub fn publish(&self, view: DashboardView) {
        *self.view.write() = view;
    }
}

impl Drop for DashboardServer {
    fn drop(&mut self) {
        self.shutdown_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.server_thread.take() {
            let _ = handle.join();
        }
    }
}

fn handle_request(request: Request, view: &RwLock<DashboardView>, static_dir: &Path) {
    if !matches!(request.method(), Method::Get | Method::Head) {
        let _ = request.respond(Response::empty(StatusCode(405)));
        return;
    }

    // Parsing normalizes dot segments, so static paths are checked raw
    let raw_path = request
        .url()
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_string();

    // Request URLs are origin-form; give them a base so they parse
    let url = match Url::parse(&format!("http://localhost{}", request.url())) {
        Ok(url) => url,
        Err(_) => {
            let _ = request.respond(Response::empty(StatusCode(400)));
            return;
        }
    };
    debug!(path = url.path(), "request");

    match url.path() {
        "/" | "/index.html" => {
            let query = url
                .query_pairs()
                .find(|(key, _)| key == "q")
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default();
            serve_page(request, &view.read(), &query);
        }
        "/api/dashboard" => serve_json(request, &view.read()),
        _ => serve_static(request, static_dir, &raw_path),
    }
}

fn serve_page(request: Request, view: &DashboardView, query: &str) {
    match render_page(view, query) {
        Ok(html) => {
            let mut response = Response::from_string(html);
            if let Some(header) = create_header(b"Content-Type", b"text/html; charset=utf-8") {
                response = response.with_header(header);
            }
            let _ = request.respond(response);
        }
        Err(e) => {
            error!("failed to render dashboard page: {}", e);
            let _ = request.respond(Response::empty(StatusCode(500)));
        }
    }
}

fn serve_json(request: Request, view: &DashboardView) {
    match serde_json::to_string(view) {
        Ok(body) => {
            let mut response = Response::from_string(body);
            if let Some(header) = create_header(b"Content-Type", b"application/json") {
                response = response.with_header(header);
            }
            let _ = request.respond(response);
        }
        Err(e) => {
            error!("failed to serialize dashboard view: {}", e);
            let _ = request.respond(Response::empty(StatusCode(500)));
        }
    }
}

fn serve_static(request: Request, static_dir: &Path, url_path: &str) {
    let Some(relative) = safe_relative_path(url_path) else {
        warn!(path = url_path, "rejected static path");
        let _ = request.respond(Response::empty(StatusCode(404)));
        return;
    };

    let path = static_dir.join(relative);
    match std::fs::read(&path) {
        Ok(bytes) => {
            let mut response = Response::from_data(bytes);
            if let Some(header) = create_header(b"Content-Type", content_type(&path).as_bytes()) {
                response = response.with_header(header);
            }
            let _ = request.respond(response);
        }
        Err(_) => {
            debug!(path = %path.display(), "static file not found");
            let _ = request.respond(Response::empty(StatusCode(404)));
        }
    }
}

/// Map a URL path onto a path below the static root
///
/// Returns None for anything that could escape it.
pub fn safe_relative_path(url_path: &str) -> Option<PathBuf> {
    let trimmed = url_path.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.contains('\\') {
        return None;
    }

    let mut relative = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!relative.as_os_str().is_empty()).then_some(relative)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
