mod common;

use std::sync::Arc;

use common::*;
use nacos_env_core::{ConfigFormat, ConfigMap, Environment, PropertySource};
use nacos_env_loader::{COMPOSITE_SOURCE_NAME, CompositeLoader, ConfigurationError, LoadError};

fn local_defaults() -> PropertySource {
    let mut config = ConfigMap::new();
    config.insert("greeting", "local");
    config.insert("local.only", "yes");
    PropertySource::new("applicationConfig", config)
}

fn global_and_db_settings() -> &'static str {
    r#"
    server_addr = "10.0.0.1:8848"
    data_id = "app.properties"

    [[ext_config]]
    group = "db"
    format = "yaml"
    data_ids = ["db.yaml", "pool.yaml"]
    "#
}

#[tokio::test]
async fn test_global_then_extras_in_order() {
    init_tracing();
    let factory = RecordingFactory::new();
    let server = factory.server(GLOBAL_SERVER);
    server
        .put("app.properties", "DEFAULT_GROUP", "greeting=remote\nserver.port=8080")
        .put("db.yaml", "db", "db:\n  url: jdbc:mysql://db/app")
        .put("pool.yaml", "db", "db:\n  pool: 16");

    let loader = CompositeLoader::new(settings(global_and_db_settings()), factory.clone());
    let env = Environment::new();

    let loaded = loader.load_all(&env).await.unwrap();

    let ids: Vec<_> = loaded
        .documents
        .iter()
        .map(|d| (d.data_id().to_string(), d.group().to_string()))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("app.properties".to_string(), "DEFAULT_GROUP".to_string()),
            ("db.yaml".to_string(), "db".to_string()),
            ("pool.yaml".to_string(), "db".to_string()),
        ]
    );

    // The extra target declares no server, so it shares the global client.
    assert_eq!(factory.created().len(), 1);
    assert_eq!(
        server.requests(),
        vec!["app.properties@DEFAULT_GROUP", "db.yaml@db", "pool.yaml@db"]
    );

    assert_eq!(loaded.pending.len(), 3);
    for entry in &loaded.pending {
        assert_eq!(entry.connection().server_addr(), Some(GLOBAL_SERVER));
        assert!(entry.environment().same_as(&env));
    }

    // load_all alone does not touch the environment.
    assert!(env.source_names().is_empty());
}

#[tokio::test]
async fn test_load_config_appends_one_composite() {
    let factory = RecordingFactory::new();
    factory
        .server(GLOBAL_SERVER)
        .put("app.properties", "DEFAULT_GROUP", "greeting=remote\nserver.port=8080")
        .put("db.yaml", "db", "db:\n  url: jdbc:mysql://db/app")
        .put("pool.yaml", "db", "db:\n  pool: 16");

    let loader = CompositeLoader::new(settings(global_and_db_settings()), factory.clone());
    let env = Environment::new();
    env.add_last(local_defaults());

    let pending = loader.load_config(&env).await.unwrap();

    assert_eq!(pending.len(), 3);
    assert_eq!(
        env.source_names(),
        vec!["applicationConfig".to_string(), COMPOSITE_SOURCE_NAME.to_string()]
    );
    // Local layers win over remote ones by default.
    assert_eq!(env.get_string("greeting").as_deref(), Some("local"));
    assert_eq!(env.get_string("server.port").as_deref(), Some("8080"));
    assert_eq!(env.get_property("db.pool").and_then(|v| v.as_i64()), Some(16));
    assert_eq!(
        env.get_string("db.url").as_deref(),
        Some("jdbc:mysql://db/app")
    );
}

#[tokio::test]
async fn test_remote_first_puts_composite_ahead() {
    let factory = RecordingFactory::new();
    factory
        .server(GLOBAL_SERVER)
        .put("app.properties", "DEFAULT_GROUP", "greeting=remote");

    let properties = settings(
        r#"
        server_addr = "10.0.0.1:8848"
        data_id = "app.properties"
        remote_first = true
        "#,
    );
    let loader = CompositeLoader::new(properties, factory);
    let env = Environment::new();
    env.add_last(local_defaults());

    loader.load_config(&env).await.unwrap();

    assert_eq!(env.source_names()[0], COMPOSITE_SOURCE_NAME);
    assert_eq!(env.get_string("greeting").as_deref(), Some("remote"));
    assert_eq!(env.get_string("local.only").as_deref(), Some("yes"));
}

#[tokio::test]
async fn test_not_found_aborts_cycle() {
    let factory = RecordingFactory::new();
    let server = factory.server(GLOBAL_SERVER);
    server.put("db.yaml", "db", "db:\n  url: x");

    let loader = CompositeLoader::new(
        settings(
            r#"
            server_addr = "10.0.0.1:8848"
            data_id = "missing.properties"

            [[ext_config]]
            group = "db"
            format = "yaml"
            data_id = "db.yaml"
            "#,
        ),
        factory,
    );
    let env = Environment::new();
    env.add_last(local_defaults());

    let err = loader.load_config(&env).await.unwrap_err();

    match err {
        LoadError::Fetch(e) => {
            assert_eq!(e.data_id.as_str(), "missing.properties");
            assert_eq!(e.group.as_str(), "DEFAULT_GROUP");
            assert!(e.cause.is_not_found());
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(!env.contains(COMPOSITE_SOURCE_NAME));
    assert_eq!(server.requests(), vec!["missing.properties@DEFAULT_GROUP"]);
}

#[tokio::test]
async fn test_sub_target_with_own_server_inherits_the_rest() {
    let factory = RecordingFactory::new();
    factory
        .server(GLOBAL_SERVER)
        .put("app.properties", "DEFAULT_GROUP", "greeting=remote");
    factory.server(DB_SERVER).put("db.yaml", "db", "db:\n  url: x");

    let loader = CompositeLoader::new(
        settings(
            r#"
            server_addr = "10.0.0.1:8848"
            namespace = "prod"
            access_key = "ak"
            secret_key = "sk"
            data_id = "app.properties"

            [[ext_config]]
            server_addr = "10.0.0.2:8848"
            group = "db"
            format = "yaml"
            data_id = "db.yaml"
            "#,
        ),
        factory.clone(),
    );

    let loaded = loader.load_all(&Environment::new()).await.unwrap();

    let created = factory.created();
    assert_eq!(created.len(), 2);
    assert_eq!(created[1].server_addr(), Some(DB_SERVER));
    assert_eq!(created[1].namespace(), Some("prod"));
    assert_eq!(created[1].access_key(), Some("ak"));
    assert_eq!(created[1].secret_key(), Some("sk"));

    assert_ne!(
        loaded.documents[0].derived_name(),
        loaded.documents[1].derived_name()
    );
    assert!(loaded.documents[1].derived_name().contains(DB_SERVER));
}

#[tokio::test]
async fn test_invalid_settings_fail_before_any_fetch() {
    let factory = RecordingFactory::new();
    let server = factory.server(GLOBAL_SERVER);
    server.put("app.properties", "DEFAULT_GROUP", "a=1");

    let loader = CompositeLoader::new(
        settings(
            r#"
            server_addr = "10.0.0.1:8848"
            data_id = "app.properties"

            [[ext_config]]
            server_addr = "10.0.0.2:8848"
            max_retry = "lots"
            data_id = "db.yaml"
            "#,
        ),
        factory.clone(),
    );

    let err = loader.load_all(&Environment::new()).await.unwrap_err();

    assert!(err.is_configuration());
    assert!(server.requests().is_empty());
    assert!(factory.created().is_empty());
}

#[tokio::test]
async fn test_unparsable_document_aborts() {
    let factory = RecordingFactory::new();
    factory
        .server(GLOBAL_SERVER)
        .put("app.json", "DEFAULT_GROUP", "{ nope");

    let loader = CompositeLoader::new(
        settings(
            r#"
            server_addr = "10.0.0.1:8848"
            data_id = "app.json"
            format = "json"
            "#,
        ),
        factory,
    );
    let env = Environment::new();

    let err = loader.load_config(&env).await.unwrap_err();

    assert!(err.is_parse());
    assert!(env.source_names().is_empty());
}

#[tokio::test]
async fn test_duplicate_documents_keep_first() {
    let factory = RecordingFactory::new();
    factory
        .server(GLOBAL_SERVER)
        .put("app.properties", "DEFAULT_GROUP", "greeting=remote");

    let loader = CompositeLoader::new(
        settings(
            r#"
            server_addr = "10.0.0.1:8848"
            data_ids = "app.properties,app.properties"
            "#,
        ),
        factory,
    );

    let loaded = loader.load_all(&Environment::new()).await.unwrap();
    assert_eq!(loaded.documents.len(), 2);

    let composite = loaded.to_composite();
    assert_eq!(composite.len(), 1);
    // Only the document that made it into the composite may refresh it.
    assert_eq!(loaded.pending.len(), 1);
}

#[tokio::test]
async fn test_shadowed_document_gets_no_refresh_entry() {
    let factory = RecordingFactory::new();
    factory
        .server(GLOBAL_SERVER)
        .put("shared", "DEFAULT_GROUP", "greeting: remote");

    let loader = CompositeLoader::new(
        settings(
            r#"
            server_addr = "10.0.0.1:8848"
            data_id = "shared"

            [[ext_config]]
            data_id = "shared"
            format = "yaml"
            "#,
        ),
        factory,
    );

    let loaded = loader.load_all(&Environment::new()).await.unwrap();

    assert_eq!(loaded.documents.len(), 2);
    assert_eq!(loaded.pending.len(), 1);
    let entry = loaded.pending.iter().next().unwrap();
    assert_eq!(entry.document().format(), ConfigFormat::Properties);
}

#[tokio::test]
async fn test_repeated_cycles_are_idempotent() {
    let factory = RecordingFactory::new();
    factory
        .server(GLOBAL_SERVER)
        .put("app.properties", "DEFAULT_GROUP", "greeting=remote\nserver.port=8080")
        .put("db.yaml", "db", "db:\n  url: jdbc:mysql://db/app")
        .put("pool.yaml", "db", "db:\n  pool: 16");

    let loader = Arc::new(CompositeLoader::new(
        settings(global_and_db_settings()),
        factory.clone(),
    ));
    let env = Environment::new();

    let first = loader.load_all(&env).await.unwrap();
    let second = loader.load_all(&env).await.unwrap();

    assert_eq!(first.documents, second.documents);
    assert_eq!(first.to_composite(), second.to_composite());

    loader.load_config(&env).await.unwrap();
    loader.load_config(&env).await.unwrap();

    assert_eq!(env.source_names(), vec![COMPOSITE_SOURCE_NAME.to_string()]);
    assert_eq!(factory.created().len(), 1);
}

#[tokio::test]
async fn test_extra_targets_with_own_servers_need_no_global_address() {
    let factory = RecordingFactory::new();
    factory.server(DB_SERVER).put("db.yaml", "db", "db:\n  url: x");

    let loader = CompositeLoader::new(
        settings(
            r#"
            [[ext_config]]
            server_addr = "10.0.0.2:8848"
            group = "db"
            format = "yaml"
            data_id = "db.yaml"
            "#,
        ),
        factory.clone(),
    );
    let env = Environment::new();

    loader.load_config(&env).await.unwrap();

    assert_eq!(env.get_string("db.url").as_deref(), Some("x"));
    assert_eq!(factory.created().len(), 1);
    assert_eq!(factory.created()[0].server_addr(), Some(DB_SERVER));
}

#[tokio::test]
async fn test_fetching_without_any_address_is_rejected() {
    let factory = RecordingFactory::new();

    let loader = CompositeLoader::new(
        settings(
            r#"
            namespace = "prod"

            [[ext_config]]
            data_id = "db.yaml"
            "#,
        ),
        factory.clone(),
    );

    let err = loader.load_all(&Environment::new()).await.unwrap_err();

    match err {
        LoadError::Configuration(ConfigurationError::Missing(what)) => {
            assert!(what.contains("db.yaml"));
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(factory.created().is_empty());
}
