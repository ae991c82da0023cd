mod access;
mod document;
mod handlers;
mod registry;
pub mod schema;
mod ui;

pub use access::{AccessChecker, AccessError, AllowAll};
pub use document::{
    build_document, ApiKeyLocation, AuthStrategy, DocsConfig, OAuth2Config, OAuth2Flow, Server,
};
pub use handlers::{DocsState, SwaggerDocs};
pub use registry::{
    BodySpec, Controller, ControllerRegistry, Method, Param, ReturnSpec, SchemaRef,
};
pub use schema::{component_name, SchemaProvider, SchemaRegistry};
