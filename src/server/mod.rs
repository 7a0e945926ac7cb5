//! HTTP server
//!
//! Serves the generated tree, answers the "load more" pagination calls,
//! and resolves slugs missing from the build on demand instead of
//! returning a hard 404.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cms::{CmsClient, CmsError};
use crate::content::{PostDetail, PostSummary};
use crate::generator::Generator;
use crate::Blog;

lazy_static! {
    /// Detail routes eligible for on-demand resolution. Slugs are CMS
    /// UIDs; anything outside this alphabet is not a post.
    static ref POST_ROUTE: Regex = Regex::new(r"^/post/([a-z0-9][a-z0-9-]*)/?$").unwrap();
}

/// Server state
pub struct ServerState {
    blog: Blog,
    client: CmsClient,
    generator: Generator,
    /// Slugs whose on-demand build is currently in flight
    building: Mutex<HashSet<String>>,
}

impl ServerState {
    pub fn new(blog: Blog) -> Result<Self> {
        let client = CmsClient::new(&blog.config.cms)?;
        let generator = Generator::new(&blog)?;
        Ok(Self {
            blog,
            client,
            generator,
            building: Mutex::new(HashSet::new()),
        })
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/posts", get(load_more_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(blog.clone())?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Deserialize)]
struct LoadMoreParams {
    /// Opaque continuation URL from a previous pagination response
    next: Option<String>,
}

/// Pagination proxy behind the "load more" control.
///
/// Fetches the CMS cursor server-side and returns the shaped page, so
/// date localization stays in one place and the access token never
/// reaches the browser. A failed fetch maps to an error status; the
/// in-browser control keeps its cursor and offers a retry.
async fn load_more_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<LoadMoreParams>,
) -> Response {
    let Some(next) = params.next else {
        return error_json(StatusCode::BAD_REQUEST, "missing `next` cursor");
    };

    match state.client.get_page(&next).await {
        Ok(page) => {
            let tz = state.generator.timezone();
            let results: Vec<PostSummary> = page
                .results
                .iter()
                .map(|doc| PostSummary::from_document(doc, tz))
                .collect();
            Json(serde_json::json!({
                "next_page": page.next_page,
                "results": results,
            }))
            .into_response()
        }
        Err(err @ CmsError::ForeignCursor(_)) => {
            tracing::warn!("Rejected pagination cursor: {}", err);
            error_json(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(err) => {
            tracing::error!("Pagination fetch failed: {}", err);
            error_json(StatusCode::BAD_GATEWAY, &err.to_string())
        }
    }
}

/// Fallback handler: serve the generated tree; a miss on a detail route
/// goes through on-demand resolution
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    if let Some(captures) = POST_ROUTE.captures(&path) {
        let slug = captures[1].to_string();
        if !state.generator.post_page_path(&slug).exists() {
            return on_demand(&state, &slug).await;
        }
    }

    let mut service = ServeDir::new(&state.blog.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Resolve an unregistered slug: fetch, render, persist, serve.
///
/// Concurrent requests for a slug already being resolved get the loading
/// placeholder instead of a second CMS fetch.
async fn on_demand(state: &ServerState, slug: &str) -> Response {
    {
        let mut building = state.building.lock().await;
        if building.contains(slug) {
            return loading_page(state);
        }
        building.insert(slug.to_string());
    }

    let kind = state.blog.config.cms.document_type.clone();
    let result = state.client.get_by_uid(&kind, slug).await;
    state.building.lock().await.remove(slug);

    match result {
        Ok(document) => {
            let detail = PostDetail::from_document(&document, state.generator.timezone());
            match state.generator.render_post(&detail) {
                Ok(html) => {
                    // Register the path so the next request is a static hit
                    if let Err(e) = state.generator.write_post_page(slug, &html) {
                        tracing::warn!("Failed to persist on-demand page {}: {}", slug, e);
                    }
                    tracing::info!("Resolved {} on demand", slug);
                    Html(html).into_response()
                }
                Err(e) => {
                    tracing::error!("Failed to render {}: {}", slug, e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Render error").into_response()
                }
            }
        }
        Err(CmsError::NotFound { .. }) => not_found_page(state),
        Err(err) => {
            tracing::error!("On-demand fetch for {} failed: {}", slug, err);
            (StatusCode::BAD_GATEWAY, "Content backend unavailable").into_response()
        }
    }
}

fn loading_page(state: &ServerState) -> Response {
    match state.generator.render_loading() {
        Ok(html) => Html(html).into_response(),
        Err(_) => "Carregando...".into_response(),
    }
}

fn not_found_page(state: &ServerState) -> Response {
    match state.generator.render_not_found() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Post não encontrado").into_response(),
    }
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_route_matches_slugs() {
        let slug = |path: &str| POST_ROUTE.captures(path).map(|c| c[1].to_string());
        assert_eq!(slug("/post/meu-post").as_deref(), Some("meu-post"));
        assert_eq!(slug("/post/meu-post/").as_deref(), Some("meu-post"));
        assert_eq!(slug("/post/a1-b2").as_deref(), Some("a1-b2"));
    }

    #[test]
    fn test_post_route_rejects_non_slugs() {
        assert!(POST_ROUTE.captures("/post/").is_none());
        assert!(POST_ROUTE.captures("/post/../secret").is_none());
        assert!(POST_ROUTE.captures("/post/Maiusculas").is_none());
        assert!(POST_ROUTE.captures("/post/a/b").is_none());
        assert!(POST_ROUTE.captures("/posts/a").is_none());
    }
}
