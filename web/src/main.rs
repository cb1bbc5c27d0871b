//! Server entry-point – Axum + Leptos SSR.

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::{
        extract::State,
        response::{IntoResponse, Response},
        Router,
    };
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use std::path::PathBuf;
    use tower_http::services::ServeDir;

    use timetable_common::config::{self, Config};
    use timetable_web::app::{shell, App, AppState};

    // ── Tracing ──────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timetable_web=info,tower_http=info".into()),
        )
        .init();

    // ── Configuration ────────────────────────────────────────────────────
    let conf = match get_configuration(None) {
        Ok(conf) => conf,
        Err(e) => {
            tracing::error!("Cannot read Leptos configuration: {e}");
            std::process::exit(1);
        }
    };
    let leptos_options = conf.leptos_options.clone();
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.clone();

    let config_path = PathBuf::from(
        std::env::var("TIMETABLE_CONFIG").unwrap_or_else(|_| Config::default_path().into()),
    );
    let config = match config::load_or_default(&config_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Cannot load config: {e:#}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Schedule backend at {} (default role: {})",
        config.api_base_url,
        config.role
    );

    let state = AppState {
        config,
        leptos_options: leptos_options.clone(),
    };

    // ── Routes ───────────────────────────────────────────────────────────
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let state = state.clone();
                move || {
                    provide_context(state.clone());
                }
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        // Serve static assets (WASM bundle, CSS, etc.)
        .nest_service("/pkg", ServeDir::new(format!("{site_root}/pkg")))
        .fallback(fallback_handler)
        .with_state(leptos_options);

    tracing::info!("Timetable Web listening on http://{addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Cannot bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("Server error: {e}");
    }

    /// Fallback: try to serve a static file, otherwise return 404.
    async fn fallback_handler(
        State(options): State<LeptosOptions>,
        req: axum::http::Request<axum::body::Body>,
    ) -> Response {
        let (parts, _body) = req.into_parts();
        let path = format!("{}{}", options.site_root, parts.uri.path());

        if let Ok(meta) = tokio::fs::metadata(&path).await {
            if meta.is_file() {
                if let Ok(bytes) = tokio::fs::read(&path).await {
                    return (
                        axum::http::StatusCode::OK,
                        [(axum::http::header::CONTENT_TYPE, mime_for(&path))],
                        bytes,
                    )
                        .into_response();
                }
            }
        }

        (axum::http::StatusCode::NOT_FOUND, "Not Found").into_response()
    }

    fn mime_for(path: &str) -> &'static str {
        match path.rsplit('.').next().unwrap_or("") {
            "html" => "text/html; charset=utf-8",
            "css" => "text/css",
            "js" => "application/javascript",
            "wasm" => "application/wasm",
            "svg" => "image/svg+xml",
            "png" => "image/png",
            "ico" => "image/x-icon",
            "json" => "application/json",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This binary is only built with the `ssr` feature.
    // The WASM entry point is `lib::hydrate()`.
}
