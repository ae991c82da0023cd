use crate::access::{AccessChecker, AccessError, AllowAll};
use crate::document::{build_document, DocsConfig};
use crate::registry::{Controller, ControllerRegistry, Method, Param, ReturnSpec, SchemaRef};
use crate::schema::SchemaRegistry;
use crate::ui;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::HeaderMap;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tower_http::services::ServeDir;

/// Shared context for the documentation handlers: host options, the
/// registries captured at mount time, and the per-version document cache.
///
/// The cache is populated lazily and never invalidated. Concurrent first
/// requests for the same version may each build a document; the last insert
/// wins, and both results are identical since generation is a pure function
/// of registry state.
pub struct DocsState {
    config: DocsConfig,
    controllers: ControllerRegistry,
    components: Map<String, Value>,
    access: Option<Vec<String>>,
    checker: Arc<dyn AccessChecker>,
    cache: RwLock<HashMap<String, Arc<Value>>>,
}

async fn swagger_file(
    State(state): State<Arc<DocsState>>,
    Path(version): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AccessError> {
    state.checker.check(&headers, state.access.as_deref())?;

    let cached = {
        let cache = state.cache.read().expect("docs cache lock poisoned");
        cache.get(&version).cloned()
    };

    let document = match cached {
        Some(document) => document,
        None => {
            // Built outside the lock; a racing request builds the same
            // document and the last insert wins.
            let document = Arc::new(build_document(
                &state.config,
                state.controllers.list(),
                &state.components,
                &version,
            ));
            tracing::debug!(version = %version, "generated OpenAPI document");
            state
                .cache
                .write()
                .expect("docs cache lock poisoned")
                .insert(version.clone(), Arc::clone(&document));
            document
        }
    };

    Ok(Json(&*document).into_response())
}

async fn swagger_page(
    State(state): State<Arc<DocsState>>,
    Path(version): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, AccessError> {
    state.checker.check(&headers, state.access.as_deref())?;
    Ok(Html(ui::page(&version)))
}

async fn swagger_initializer(
    State(state): State<Arc<DocsState>>,
    Path(version): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AccessError> {
    state.checker.check(&headers, state.access.as_deref())?;
    Ok((
        [("content-type", "text/javascript")],
        ui::initializer(&version),
    ))
}

/// Plugin that serves versioned OpenAPI documents and the Swagger UI around
/// them.
///
/// # Example
///
/// ```ignore
/// use swagger_docs::{DocsConfig, SwaggerDocs};
///
/// let router = SwaggerDocs::new(DocsConfig::new("My API"))
///     .with_ui_assets("/usr/share/swagger-ui")
///     .into_router(registry, &schemas);
/// app = app.merge(router);
/// ```
pub struct SwaggerDocs {
    config: DocsConfig,
    controller_name: String,
    access: Option<Vec<String>>,
    checker: Arc<dyn AccessChecker>,
    ui_assets: Option<PathBuf>,
}

impl SwaggerDocs {
    /// Create the plugin with the given document configuration.
    pub fn new(config: DocsConfig) -> Self {
        Self {
            config,
            controller_name: "Swagger".to_string(),
            access: None,
            checker: Arc::new(AllowAll),
            ui_assets: None,
        }
    }

    /// Name under which the plugin registers its own controller.
    pub fn with_controller_name(mut self, name: &str) -> Self {
        self.controller_name = name.to_string();
        self
    }

    /// Scope rule applied uniformly to all three served endpoints.
    pub fn with_access(mut self, scopes: Vec<String>) -> Self {
        self.access = Some(scopes);
        self
    }

    /// Host access checker consulted before every request.
    pub fn with_checker(mut self, checker: Arc<dyn AccessChecker>) -> Self {
        self.checker = checker;
        self
    }

    /// Directory holding the swagger-ui distribution, served under
    /// `/swagger`. When unset the passthrough is not mounted.
    pub fn with_ui_assets(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ui_assets = Some(dir.into());
        self
    }

    /// Mount the documentation routes over the host's registries.
    ///
    /// The plugin registers its own root controller first, so the served
    /// endpoints document themselves.
    pub fn into_router(self, mut registry: ControllerRegistry, schemas: &SchemaRegistry) -> Router {
        registry.add(self.describe());

        let state = Arc::new(DocsState {
            config: self.config,
            controllers: registry,
            components: schemas.components(),
            access: self.access,
            checker: self.checker,
            cache: RwLock::new(HashMap::new()),
        });

        let mut router = Router::new()
            .route("/{version}/swagger.json", get(swagger_file))
            .route("/{version}", get(swagger_page))
            .route("/{version}/swagger-initializer.js", get(swagger_initializer))
            .with_state(state);

        if let Some(dir) = self.ui_assets {
            router = router.nest_service("/swagger", ServeDir::new(dir));
        }

        router
    }

    /// The plugin's own controller entry: a root controller whose methods
    /// appear in every version's document.
    fn describe(&self) -> Controller {
        let version_param = Param::new("version")
            .with_description("The API version, defaults to: v1")
            .with_schema(SchemaRef::Inline(json!({ "type": "string" })));

        let mut file = Method::new("swagger_file", "GET", "/:version/swagger.json");
        file.title = Some("Get Swagger documentation file".to_string());
        file.parameters = vec![version_param.clone()];
        file.returns = vec![ReturnSpec {
            code: 200,
            mime_type: "application/json".to_string(),
            description: "Swagger JSON file".to_string(),
            schema: Some(SchemaRef::Inline(
                json!({ "type": "object", "additionalProperties": true }),
            )),
        }];

        let mut page = Method::new("swagger_page", "GET", "/:version");
        page.title = Some("Get Swagger UI HTML".to_string());
        page.parameters = vec![version_param.clone()];
        page.returns = vec![ReturnSpec {
            code: 200,
            mime_type: "text/html".to_string(),
            description: "Swagger UI HTML code".to_string(),
            schema: Some(SchemaRef::Inline(json!({ "type": "string" }))),
        }];

        let mut initializer =
            Method::new("swagger_initializer", "GET", "/:version/swagger-initializer.js");
        initializer.title = Some("Get Swagger UI initialization file".to_string());
        initializer.parameters = vec![version_param];
        initializer.returns = vec![ReturnSpec {
            code: 200,
            mime_type: "text/javascript".to_string(),
            description: "Swagger UI initialization script".to_string(),
            schema: Some(SchemaRef::Inline(json!({ "type": "string" }))),
        }];

        Controller {
            name: self.controller_name.clone(),
            title: Some("Swagger".to_string()),
            description: Some("Handles API documentation display".to_string()),
            root: true,
            parameters: Vec::new(),
            access: self.access.clone(),
            methods: vec![file, page, initializer],
        }
    }
}
