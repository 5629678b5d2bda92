use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tscope::kernel::prelude::ApiState;
use tscope::server::router;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "TruthScope", description = "News verification API"))]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let api = ApiDoc::openapi();
    let static_dir = state.config.storage.static_dir.clone();
    let max_upload_bytes = state.config.media.max_upload_bytes;

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(tscope::server::system_router())
        .merge(router::news())
        .merge(router::factcheck())
        .merge(router::media(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/api", api_doc);

    // Everything else is a static asset; `/` resolves to index.html.
    Router::new()
        .merge(openapi_routes)
        .merge(scalar_routes)
        .fallback_service(ServeDir::new(static_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;
    use tscope::domain::config::ApiConfig;

    struct Fixture {
        router: Router,
        _dirs: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let dirs = tempfile::tempdir().unwrap();
        let static_dir = dirs.path().join("public");
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::write(static_dir.join("index.html"), "<h1>TruthScope</h1>").unwrap();

        let mut cfg = ApiConfig::default();
        cfg.storage.static_dir = static_dir;
        cfg.media.upload_dir = dirs.path().join("uploads");
        cfg.news.rss.trusted_feeds.clear();
        cfg.news.rss.fallback_feeds.clear();

        let platform = tscope::init(&cfg).unwrap();
        let state = ApiState::builder().config(cfg).register_slices(platform.slices).build().unwrap();
        Fixture { router: init(state), _dirs: dirs }
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn serves_health_and_static_index() {
        let fx = fixture();

        let (status, body) = send(fx.router.clone(), Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"up\""));

        let (status, body) = send(fx.router, Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>TruthScope</h1>");
    }

    #[tokio::test]
    async fn documents_every_route() {
        let fx = fixture();

        let (status, body) = send(fx.router, Request::get("/api").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        for path in ["/health", "/trusted_news", "/trusted_feed", "/search_news", "/check_news", "/chatbot", "/upload"] {
            assert!(body.contains(path), "{path} missing from the OpenAPI document");
        }
    }

    #[tokio::test]
    async fn feature_routes_are_mounted() {
        let fx = fixture();

        let request = Request::post("/check_news")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(fx.router.clone(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "No headline provided");

        let (status, body) = send(fx.router, Request::get("/trusted_news").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }
}
