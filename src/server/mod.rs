//! Local preview server
//!
//! Serves the public directory. With live reload on, HTML responses get a
//! small script that listens on a websocket and refreshes the page after
//! every successful rebuild.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tower_http::services::ServeDir;

use crate::commands::generate;
use crate::helpers::url_for;
use crate::Folio;

const RELOAD_ROUTE: &str = "/__reload";

/// Sent to browsers after a rebuild
const RELOAD_MESSAGE: &str = "rebuilt";

struct Preview {
    public_dir: PathBuf,
    /// Target of `/` when the site has no home page
    blog_url: String,
    rebuilt: broadcast::Sender<()>,
    live_reload: bool,
}

/// Serve the site until interrupted
pub async fn start(folio: &Folio, ip: &str, port: u16, live_reload: bool, open: bool) -> Result<()> {
    let (rebuilt, _) = broadcast::channel(16);

    let preview = Arc::new(Preview {
        public_dir: folio.public_dir.clone(),
        blog_url: url_for(&folio.config, &folio.config.blog_path),
        rebuilt: rebuilt.clone(),
        live_reload,
    });

    let listener = tokio::net::TcpListener::bind((ip, port)).await?;
    let url = format!("http://{}:{}", ip, port);
    tracing::info!("Serving {:?} at {}", folio.public_dir, url);

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if live_reload {
        let folio = folio.clone();
        tokio::task::spawn_blocking(move || {
            let on_rebuilt = move || {
                let _ = rebuilt.send(());
            };
            if let Err(e) = generate::watch_with(&folio, on_rebuilt) {
                tracing::error!("File watcher stopped: {:#}", e);
            }
        });
    }

    let app = Router::new()
        .route(RELOAD_ROUTE, get(reload_socket))
        .fallback(serve_page)
        .with_state(preview);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn reload_socket(ws: WebSocketUpgrade, State(preview): State<Arc<Preview>>) -> Response {
    let rebuilt = preview.rebuilt.subscribe();
    ws.on_upgrade(move |socket| push_reloads(socket, rebuilt))
}

/// Forward rebuild notifications until either side goes away
async fn push_reloads(mut socket: WebSocket, mut rebuilt: broadcast::Receiver<()>) {
    loop {
        let reload = tokio::select! {
            changed = rebuilt.recv() => !matches!(changed, Err(RecvError::Closed)),
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => false,
                Some(Ok(_)) => continue,
            },
        };

        if !reload
            || socket
                .send(Message::Text(RELOAD_MESSAGE.to_string()))
                .await
                .is_err()
        {
            break;
        }
    }
}

async fn serve_page(State(preview): State<Arc<Preview>>, request: Request<Body>) -> Response {
    let Some(page) = page_file(&preview.public_dir, request.uri().path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if request.uri().path() == "/" && !page.exists() {
        return Redirect::temporary(&preview.blog_url).into_response();
    }

    if preview.live_reload && page.extension().is_some_and(|ext| ext == "html") {
        return match tokio::fs::read_to_string(&page).await {
            Ok(html) => Html(with_reload_script(&html)).into_response(),
            Err(_) => StatusCode::NOT_FOUND.into_response(),
        };
    }

    match ServeDir::new(&preview.public_dir).try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// File a request path maps to; pages live at `<route>/index.html`
fn page_file(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let relative = Path::new(decoded.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let file = public_dir.join(relative);
    if file.is_dir() || file.extension().is_none() {
        Some(file.join("index.html"))
    } else {
        Some(file)
    }
}

fn with_reload_script(html: &str) -> String {
    let script = format!(
        "<script>new WebSocket(`ws://${{location.host}}{}`).onmessage = (e) => {{ if (e.data === '{}') location.reload(); }};</script>",
        RELOAD_ROUTE, RELOAD_MESSAGE
    );
    match html.rfind("</body>") {
        Some(at) => format!("{}{}{}", &html[..at], script, &html[at..]),
        None => format!("{}{}", html, script),
    }
}

fn open_browser(url: &str) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = std::process::Command::new("cmd");
        cmd.args(["/c", "start"]);
        cmd
    } else {
        std::process::Command::new("xdg-open")
    };
    command.arg(url).spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_script_goes_before_body_close() {
        let html = with_reload_script("<html><body><p>x</p></body></html>");
        assert!(html.contains(RELOAD_ROUTE));
        assert!(html.ends_with("</script></body></html>"));
        assert_eq!(html.matches("</body>").count(), 1);

        let fragment = with_reload_script("<p>x</p>");
        assert!(fragment.starts_with("<p>x</p><script>"));
    }

    #[test]
    fn test_page_file() {
        let public = Path::new("/site/public");
        assert_eq!(
            page_file(public, "/blog"),
            Some(public.join("blog/index.html"))
        );
        assert_eq!(
            page_file(public, "/blog/hello/"),
            Some(public.join("blog/hello/index.html"))
        );
        assert_eq!(page_file(public, "/"), Some(public.join("index.html")));
        assert_eq!(
            page_file(public, "/css/site.css"),
            Some(public.join("css/site.css"))
        );
        assert_eq!(
            page_file(public, "/blog/caf%C3%A9"),
            Some(public.join("blog/café/index.html"))
        );
        assert_eq!(page_file(public, "/../secret"), None);
        assert_eq!(page_file(public, "/%2E%2E/secret"), None);
    }
}
