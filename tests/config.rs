use swagger_docs::{AuthStrategy, DocsConfig, Server};

#[test]
fn config_new() {
    let config = DocsConfig::new("My API");
    assert_eq!(config.title, "My API");
    assert!(config.description.is_none());
    assert!(config.servers.is_empty());
    assert!(matches!(config.auth, AuthStrategy::None));
}

#[test]
fn config_with_description() {
    let config = DocsConfig::new("My API").with_description("A great API");
    assert_eq!(config.description.as_deref(), Some("A great API"));
}

#[test]
fn config_with_servers() {
    let config = DocsConfig::new("My API")
        .with_server(Server::new("https://api.example.com"))
        .with_server(Server::new("http://localhost:3000"));
    assert_eq!(config.servers.len(), 2);
    assert_eq!(config.servers[0].url, "https://api.example.com");
}

#[test]
fn config_with_auth() {
    let config = DocsConfig::new("My API").with_auth(AuthStrategy::Basic);
    assert!(matches!(config.auth, AuthStrategy::Basic));
}
