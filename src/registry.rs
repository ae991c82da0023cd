use crate::schema::component_name;
use serde_json::{json, Value};

/// A reference to a JSON Schema, either written inline or naming a component
/// in the [`SchemaRegistry`](crate::schema::SchemaRegistry).
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaRef {
    /// An inline JSON Schema object, passed through verbatim.
    Inline(Value),
    /// A component name, resolved to a `$ref` via [`component_name`].
    Named(String),
}

impl SchemaRef {
    /// Resolve this reference into the schema value embedded in the document.
    ///
    /// Named references are not validated against the registry; a name with
    /// no registered component degrades to a dangling `$ref`.
    pub fn resolve(&self) -> Value {
        match self {
            SchemaRef::Inline(schema) => schema.clone(),
            SchemaRef::Named(name) => {
                json!({ "$ref": format!("#/components/schemas/{}", component_name(name)) })
            }
        }
    }
}

/// A path or query parameter declared on a controller or method.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub description: Option<String>,
    pub schema: Option<SchemaRef>,
}

impl Param {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            schema: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_schema(mut self, schema: SchemaRef) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Request body descriptor for a method (mime type + schema).
#[derive(Debug, Clone)]
pub struct BodySpec {
    pub mime_type: String,
    pub schema: Option<SchemaRef>,
}

/// A declared response of a method.
#[derive(Debug, Clone)]
pub struct ReturnSpec {
    pub code: u16,
    pub mime_type: String,
    pub description: String,
    pub schema: Option<SchemaRef>,
}

/// Metadata about a single route handler within a controller.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    /// HTTP verb as declared (`"GET"`, `"post"`, ...); lower-cased when the
    /// document is built.
    pub verb: String,
    /// Full route pattern with colon-prefixed path parameters,
    /// e.g. `/users/:id`.
    pub full_route: String,
    /// API versions this method applies to. Ignored for root controllers,
    /// whose methods appear in every version.
    pub versions: Vec<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Path parameters, appended after the owning controller's.
    pub parameters: Vec<Param>,
    /// Query parameters, always optional in the generated document.
    pub query: Vec<Param>,
    /// Request body, emitted only for `post`/`put`/`patch`.
    pub accepts: Option<BodySpec>,
    pub returns: Vec<ReturnSpec>,
    /// Scopes required by this method; overrides the controller rule.
    pub access: Option<Vec<String>>,
}

impl Method {
    pub fn new(name: &str, verb: &str, full_route: &str) -> Self {
        Self {
            name: name.to_string(),
            verb: verb.to_string(),
            full_route: full_route.to_string(),
            versions: Vec::new(),
            title: None,
            description: None,
            parameters: Vec::new(),
            query: Vec::new(),
            accepts: None,
            returns: Vec::new(),
            access: None,
        }
    }
}

/// A logical grouping of related routes.
#[derive(Debug, Clone)]
pub struct Controller {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Root controllers are not version-prefixed and their methods appear in
    /// every version's document.
    pub root: bool,
    /// Path parameters shared by all methods of this controller.
    pub parameters: Vec<Param>,
    /// Scopes required for every method, unless a method declares its own.
    pub access: Option<Vec<String>>,
    pub methods: Vec<Method>,
}

impl Controller {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            title: None,
            description: None,
            root: false,
            parameters: Vec::new(),
            access: None,
            methods: Vec::new(),
        }
    }

    /// Tag name used in the document: the title when set, the name otherwise.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Ordered registry of controllers, populated once at startup by the host
/// and treated as immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    controllers: Vec<Controller>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a controller. Registration order is document order.
    pub fn add(&mut self, controller: Controller) {
        self.controllers.push(controller);
    }

    /// Append a method to a previously registered controller.
    ///
    /// Returns `false` when no controller with that name exists.
    pub fn add_method(&mut self, controller: &str, method: Method) -> bool {
        match self.controllers.iter_mut().find(|c| c.name == controller) {
            Some(c) => {
                c.methods.push(method);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Controller> {
        self.controllers.iter().find(|c| c.name == name)
    }

    pub fn list(&self) -> &[Controller] {
        &self.controllers
    }
}
