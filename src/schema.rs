use schemars::JsonSchema;
use serde_json::{json, Map, Value};

/// Mangle a schema name into an OpenAPI component name: slashes become
/// underscores and a trailing `.json` is stripped.
///
/// Pure function — `component_name("a/b.json") == "a_b"`.
pub fn component_name(name: &str) -> String {
    let mangled = name.replace('/', "_");
    match mangled.strip_suffix(".json") {
        Some(stripped) => stripped.to_string(),
        None => mangled,
    }
}

/// Recursively rewrite `$ref` paths from schemars format to OpenAPI
/// components format.
///
/// schemars 1.x generates JSON Schema Draft 2020-12 using `$defs` and
/// `$ref: "#/$defs/X"`. OpenAPI expects schemas under
/// `#/components/schemas/X`.
fn rewrite_refs(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(ref_str)) = obj.get_mut("$ref") {
                if ref_str.starts_with("#/$defs/") {
                    *ref_str = ref_str.replace("#/$defs/", "#/components/schemas/");
                }
            }

            for (_, v) in obj.iter_mut() {
                rewrite_refs(v);
            }
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                rewrite_refs(v);
            }
        }
        _ => {}
    }
}

/// Registry of named JSON Schema components, embedded at
/// `components.schemas` in every generated document.
///
/// Populated once at startup; the synthesizer only reads it.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Map<String, Value>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema definition under the given name.
    ///
    /// The name is mangled via [`component_name`], so `"user/profile.json"`
    /// registers the `user_profile` component that
    /// `SchemaRef::Named("user/profile.json")` resolves to.
    pub fn register(&mut self, name: &str, schema: Value) {
        self.schemas.insert(component_name(name), schema);
    }

    /// Register a simple object schema with the given fields.
    ///
    /// Each field is `(name, type_string)` where type_string is an OpenAPI
    /// type like `"string"`, `"integer"`, `"number"`, `"boolean"`.
    pub fn register_object(&mut self, name: &str, fields: &[(&str, &str)]) {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for (field_name, field_type) in fields {
            properties.insert(
                field_name.to_string(),
                json!({ "type": field_type }),
            );
            required.push(json!(field_name));
        }

        let schema = json!({
            "type": "object",
            "properties": properties,
            "required": required,
        });

        self.register(name, schema);
    }

    /// Register a schemars-derived type under its schema name.
    ///
    /// Strips `$schema`, promotes `$defs` entries to standalone components,
    /// and rewrites `$ref` paths to `#/components/schemas/...`.
    pub fn register_type<T: JsonSchema>(&mut self) {
        let mut schema = schemars::schema_for!(T).to_value();
        if let Some(obj) = schema.as_object_mut() {
            obj.remove("$schema");
            if let Some(Value::Object(defs)) = obj.remove("$defs") {
                for (def_name, mut def_schema) in defs {
                    rewrite_refs(&mut def_schema);
                    self.schemas.entry(def_name).or_insert(def_schema);
                }
            }
        }
        rewrite_refs(&mut schema);
        self.schemas.insert(T::schema_name().to_string(), schema);
    }

    /// Check if a component is registered (the name is mangled first).
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(&component_name(name))
    }

    /// The components map embedded at `components.schemas`.
    pub fn components(&self) -> Map<String, Value> {
        self.schemas.clone()
    }
}

/// Trait for types that can provide their own JSON Schema.
///
/// Implement this for request/response types that are not schemars-derived
/// to enable registration in the [`SchemaRegistry`].
pub trait SchemaProvider {
    /// The component name (typically the type name, e.g. `"User"`).
    fn schema_name() -> &'static str;

    /// Return a JSON Schema representation of this type.
    fn json_schema() -> Value;

    /// Register this type's schema in the given registry.
    fn register_schema(registry: &mut SchemaRegistry) {
        registry.register(Self::schema_name(), Self::json_schema());
    }
}
