use axum::body::Body;
use axum::Router;
use http::Request;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use swagger_docs::{
    AccessChecker, AccessError, Controller, ControllerRegistry, DocsConfig, Method,
    SchemaRegistry, SwaggerDocs,
};
use tower::ServiceExt;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn registry_with_users() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry.add(Controller {
        methods: vec![Method {
            versions: vec!["v1".to_string()],
            ..Method::new("list", "GET", "/users")
        }],
        ..Controller::new("Users")
    });
    registry
}

fn docs_router() -> Router {
    SwaggerDocs::new(DocsConfig::new("Test API"))
        .into_router(registry_with_users(), &SchemaRegistry::new())
}

async fn get_response(router: Router, path: &str) -> (http::StatusCode, String, http::HeaderMap) {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();

    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8(body.to_vec()).unwrap();
    (status, body_str, headers)
}

// ── Document endpoint ───────────────────────────────────────────────────────

#[tokio::test]
async fn swagger_json_endpoint() {
    let (status, body, _) = get_response(docs_router(), "/v1/swagger.json").await;
    assert_eq!(status, http::StatusCode::OK);

    let doc: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(doc["openapi"], "3.0.0");
    assert_eq!(doc["info"]["version"], "v1");
    assert!(doc["paths"]["/v1/users"]["get"].is_object());
}

#[tokio::test]
async fn swagger_json_content_type() {
    let (_, _, headers) = get_response(docs_router(), "/v1/swagger.json").await;
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn plugin_documents_its_own_routes() {
    let (_, body, _) = get_response(docs_router(), "/v1/swagger.json").await;
    let doc: Value = serde_json::from_str(&body).unwrap();

    // The self-registered controller is a root controller, so its paths are
    // not version-prefixed and carry brace placeholders.
    assert!(doc["paths"]["/{version}/swagger.json"]["get"].is_object());
    assert_eq!(
        doc["paths"]["/{version}/swagger.json"]["get"]["operationId"],
        "Swagger@swagger_file"
    );
    assert!(doc["paths"]["/{version}"]["get"].is_object());
    assert!(doc["paths"]["/{version}/swagger-initializer.js"]["get"].is_object());
}

#[tokio::test]
async fn version_filtering_over_http() {
    let (_, body, _) = get_response(docs_router(), "/v2/swagger.json").await;
    let doc: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(doc["info"]["version"], "v2");
    assert!(doc["paths"].get("/v2/users").is_none());
    // Root plugin routes are still present.
    assert!(doc["paths"]["/{version}/swagger.json"]["get"].is_object());
}

#[tokio::test]
async fn repeated_requests_are_byte_identical() {
    let router = docs_router();
    let (_, first, _) = get_response(router.clone(), "/v1/swagger.json").await;
    let (_, second, _) = get_response(router, "/v1/swagger.json").await;
    assert_eq!(first, second);
}

// ── UI endpoints ────────────────────────────────────────────────────────────

#[tokio::test]
async fn ui_page_served() {
    let (status, body, headers) = get_response(docs_router(), "/v1").await;
    assert_eq!(status, http::StatusCode::OK);
    assert!(headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(body.contains("<html"));
    assert!(body.contains("/swagger/swagger-ui-bundle.js"));
    assert!(body.contains("/v1/swagger-initializer.js"));
}

#[tokio::test]
async fn initializer_served() {
    let (status, body, headers) = get_response(docs_router(), "/v1/swagger-initializer.js").await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "text/javascript"
    );
    assert!(body.contains("url: \"/v1/swagger.json\""));
    assert!(body.contains("SwaggerUIBundle"));
}

// ── Access control ──────────────────────────────────────────────────────────

struct DenyAll;

impl AccessChecker for DenyAll {
    fn check(
        &self,
        _headers: &http::HeaderMap,
        _rule: Option<&[String]>,
    ) -> Result<(), AccessError> {
        Err(AccessError::Forbidden("missing scope".to_string()))
    }
}

#[tokio::test]
async fn rejected_requests_get_error_body() {
    let router = SwaggerDocs::new(DocsConfig::new("Test API"))
        .with_access(vec!["docs:read".to_string()])
        .with_checker(Arc::new(DenyAll))
        .into_router(ControllerRegistry::new(), &SchemaRegistry::new());

    for path in ["/v1/swagger.json", "/v1", "/v1/swagger-initializer.js"] {
        let (status, body, _) = get_response(router.clone(), path).await;
        assert_eq!(status, http::StatusCode::FORBIDDEN, "path {path}");
        let error: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["error"], "missing scope");
    }
}

// ── Static passthrough ──────────────────────────────────────────────────────

#[tokio::test]
async fn ui_assets_served_from_configured_dir() {
    let dir = std::env::temp_dir().join(format!("swagger-docs-assets-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("swagger-ui.css"), ".swagger-ui { }").unwrap();

    let router = SwaggerDocs::new(DocsConfig::new("Test API"))
        .with_ui_assets(&dir)
        .into_router(ControllerRegistry::new(), &SchemaRegistry::new());

    let (status, body, _) = get_response(router, "/swagger/swagger-ui.css").await;
    assert_eq!(status, http::StatusCode::OK);
    assert!(body.contains(".swagger-ui"));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn no_asset_mount_without_configured_dir() {
    let (status, _, _) = get_response(docs_router(), "/swagger/swagger-ui.css").await;
    assert_eq!(status, http::StatusCode::NOT_FOUND);
}
