use crate::registry::{Controller, Param};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// A server entry for the document's `servers` array.
#[derive(Debug, Clone, Serialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Where an API key is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    Header,
    Query,
    Cookie,
}

impl ApiKeyLocation {
    fn as_str(self) -> &'static str {
        match self {
            ApiKeyLocation::Header => "header",
            ApiKeyLocation::Query => "query",
            ApiKeyLocation::Cookie => "cookie",
        }
    }
}

/// The OAuth2 flow exposed in the security scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuth2Flow {
    AuthorizationCode,
    Implicit,
    Password,
    ClientCredentials,
}

impl OAuth2Flow {
    fn as_str(self) -> &'static str {
        match self {
            OAuth2Flow::AuthorizationCode => "authorizationCode",
            OAuth2Flow::Implicit => "implicit",
            OAuth2Flow::Password => "password",
            OAuth2Flow::ClientCredentials => "clientCredentials",
        }
    }
}

/// OAuth2 strategy configuration. Which URLs end up in the scheme depends on
/// the flow: `authorizationCode` uses both URLs, `implicit` only the
/// authorization URL, `password` and `clientCredentials` only the token URL.
#[derive(Debug, Clone, Default)]
pub struct OAuth2Config {
    pub flow: Option<OAuth2Flow>,
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub refresh_url: Option<String>,
    /// Seed scope map; controller and method scopes are merged in during
    /// generation without overwriting these.
    pub scopes: BTreeMap<String, String>,
}

/// The authentication strategy advertised by the document's single
/// `securitySchemes.auth` entry.
#[derive(Debug, Clone, Default)]
pub enum AuthStrategy {
    /// No security scheme is emitted.
    #[default]
    None,
    Basic,
    Bearer {
        bearer_format: Option<String>,
    },
    ApiKey {
        location: ApiKeyLocation,
        name: String,
    },
    OpenId {
        connect_url: String,
    },
    OAuth2(OAuth2Config),
}

/// Host options for the generated documents.
pub struct DocsConfig {
    pub title: String,
    pub description: Option<String>,
    pub servers: Vec<Server>,
    pub auth: AuthStrategy,
}

impl DocsConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            servers: Vec::new(),
            auth: AuthStrategy::None,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn with_auth(mut self, auth: AuthStrategy) -> Self {
        self.auth = auth;
        self
    }
}

/// Build the `securitySchemes.auth` object for a strategy, or `None` for
/// [`AuthStrategy::None`].
fn security_scheme(auth: &AuthStrategy) -> Option<Value> {
    match auth {
        AuthStrategy::None => None,
        AuthStrategy::Basic => Some(json!({
            "type": "http",
            "scheme": "basic",
        })),
        AuthStrategy::Bearer { bearer_format } => {
            let mut scheme = Map::new();
            scheme.insert("type".into(), json!("http"));
            scheme.insert("scheme".into(), json!("bearer"));
            if let Some(format) = bearer_format {
                scheme.insert("bearerFormat".into(), json!(format));
            }
            Some(Value::Object(scheme))
        }
        AuthStrategy::ApiKey { location, name } => Some(json!({
            "type": "apiKey",
            "in": location.as_str(),
            "name": name,
        })),
        AuthStrategy::OpenId { connect_url } => Some(json!({
            "type": "openIdConnect",
            "openIdConnectUrl": connect_url,
        })),
        AuthStrategy::OAuth2(oauth2) => {
            let flow = oauth2.flow?;
            let mut flow_obj = Map::new();
            match flow {
                OAuth2Flow::AuthorizationCode => {
                    insert_opt(&mut flow_obj, "authorizationUrl", &oauth2.authorization_url);
                    insert_opt(&mut flow_obj, "tokenUrl", &oauth2.token_url);
                }
                OAuth2Flow::Implicit => {
                    insert_opt(&mut flow_obj, "authorizationUrl", &oauth2.authorization_url);
                }
                OAuth2Flow::Password | OAuth2Flow::ClientCredentials => {
                    insert_opt(&mut flow_obj, "tokenUrl", &oauth2.token_url);
                }
            }
            insert_opt(&mut flow_obj, "refreshUrl", &oauth2.refresh_url);
            flow_obj.insert("scopes".into(), json!(oauth2.scopes));
            let mut flows = Map::new();
            flows.insert(flow.as_str().to_string(), Value::Object(flow_obj));
            Some(json!({
                "type": "oauth2",
                "flows": flows,
            }))
        }
    }
}

fn insert_opt(obj: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        obj.insert(key.to_string(), json!(value));
    }
}

/// Merge access scopes into the scheme's scope map, self-describing
/// (name == value) and without overwriting existing entries.
///
/// Only oauth2 schemes carry a scope map; for every other scheme this is a
/// no-op.
fn merge_scopes(scheme: Option<&mut Value>, access: &[String]) {
    let Some(scheme) = scheme else { return };
    let Some(flows) = scheme.get_mut("flows").and_then(Value::as_object_mut) else {
        return;
    };
    for flow in flows.values_mut() {
        if let Some(scopes) = flow.get_mut("scopes").and_then(Value::as_object_mut) {
            for scope in access {
                scopes.entry(scope.clone()).or_insert_with(|| json!(scope));
            }
        }
    }
}

/// Rewrite a route into its externally visible OpenAPI path: non-root
/// controllers get a `/{version}` prefix, and every colon-prefixed segment
/// becomes `{name}` brace syntax.
fn openapi_path(version: &str, root: bool, full_route: &str) -> String {
    let route = if root {
        full_route.to_string()
    } else {
        format!("/{version}{full_route}")
    };
    route
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn param_value(param: &Param, location: &str, required: bool) -> Value {
    let mut obj = Map::new();
    obj.insert("name".into(), json!(param.name));
    obj.insert("in".into(), json!(location));
    if let Some(ref schema) = param.schema {
        obj.insert("schema".into(), schema.resolve());
    }
    obj.insert("required".into(), json!(required));
    Value::Object(obj)
}

/// Build an OpenAPI 3.0 JSON document for one API version.
///
/// Pure function of its inputs: walks the controllers in registry order,
/// including a method only when its version set contains `version` or the
/// owning controller is a root controller.
pub fn build_document(
    config: &DocsConfig,
    controllers: &[Controller],
    components: &Map<String, Value>,
    version: &str,
) -> Value {
    let mut scheme = security_scheme(&config.auth);

    let mut paths: Map<String, Value> = Map::new();
    let mut tags: Vec<Value> = Vec::new();

    for controller in controllers {
        let mut tag = Map::new();
        tag.insert("name".into(), json!(controller.display_name()));
        if let Some(ref description) = controller.description {
            tag.insert("description".into(), json!(description));
        }
        tags.push(Value::Object(tag));

        if let Some(ref access) = controller.access {
            merge_scopes(scheme.as_mut(), access);
        }

        for method in &controller.methods {
            if !method.versions.iter().any(|v| v == version) && !controller.root {
                continue;
            }

            let path = openapi_path(version, controller.root, &method.full_route);
            let verb = method.verb.to_lowercase();

            if let Some(ref access) = method.access {
                merge_scopes(scheme.as_mut(), access);
            }

            let mut operation = Map::new();
            operation.insert("tags".into(), json!([controller.display_name()]));
            if let Some(ref title) = method.title {
                operation.insert("summary".into(), json!(title));
            }
            if let Some(ref description) = method.description {
                operation.insert("description".into(), json!(description));
            }
            operation.insert(
                "operationId".into(),
                json!(format!("{}@{}", controller.name, method.name)),
            );

            // Method scopes win over controller scopes.
            if method.access.is_some() || controller.access.is_some() {
                let scopes = method.access.as_ref().or(controller.access.as_ref());
                operation.insert("security".into(), json!([{ "auth": scopes }]));
            }

            let mut parameters: Vec<Value> = Vec::new();
            for param in &controller.parameters {
                parameters.push(param_value(param, "path", true));
            }
            for param in &method.parameters {
                parameters.push(param_value(param, "path", true));
            }
            for param in &method.query {
                parameters.push(param_value(param, "query", false));
            }
            operation.insert("parameters".into(), Value::Array(parameters));

            if matches!(verb.as_str(), "post" | "put" | "patch") {
                if let Some(ref body) = method.accepts {
                    let mut media = Map::new();
                    if let Some(ref schema) = body.schema {
                        media.insert("schema".into(), schema.resolve());
                    }
                    let mut content = Map::new();
                    content.insert(body.mime_type.clone(), Value::Object(media));
                    operation.insert(
                        "requestBody".into(),
                        json!({ "required": true, "content": content }),
                    );
                }
            }

            let mut responses = Map::new();
            for ret in &method.returns {
                let mut media = Map::new();
                if let Some(ref schema) = ret.schema {
                    media.insert("schema".into(), schema.resolve());
                }
                let mut content = Map::new();
                content.insert(ret.mime_type.clone(), Value::Object(media));
                responses.insert(
                    ret.code.to_string(),
                    json!({ "description": ret.description, "content": content }),
                );
            }
            operation.insert("responses".into(), Value::Object(responses));

            let path_entry = paths.entry(path).or_insert_with(|| json!({}));
            if let Some(obj) = path_entry.as_object_mut() {
                obj.insert(verb, Value::Object(operation));
            }
        }
    }

    let mut info = Map::new();
    info.insert("title".into(), json!(config.title));
    if let Some(ref description) = config.description {
        info.insert("description".into(), json!(description));
    }
    info.insert("version".into(), json!(version));

    let mut doc_components = Map::new();
    doc_components.insert("schemas".into(), Value::Object(components.clone()));
    if let Some(scheme) = scheme {
        doc_components.insert("securitySchemes".into(), json!({ "auth": scheme }));
    }

    json!({
        "openapi": "3.0.0",
        "info": info,
        "servers": config.servers,
        "components": doc_components,
        "paths": paths,
        "tags": tags,
    })
}
