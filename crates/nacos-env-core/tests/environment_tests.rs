use nacos_env_core::{ConfigFormat, Environment, PropertyLayer};

mod common;

#[test]
fn test_remote_composite_appended_last_is_shadowed_by_local() {
    let env = Environment::new();
    env.add_last(common::source(
        "application.properties",
        ConfigFormat::Properties,
        "server.port=9000\nlocal.only=yes\n",
    ));
    env.add_last(common::composite(
        "remote",
        vec![
            common::source("app.yaml", ConfigFormat::Yaml, common::APP_YAML),
            common::source("extra.json", ConfigFormat::Json, r#"{"remote": {"only": true}}"#),
        ],
    ));

    assert_eq!(env.source_names(), vec!["application.properties", "remote"]);
    assert_eq!(env.get_string("server.port").as_deref(), Some("9000"));
    assert_eq!(env.get_string("local.only").as_deref(), Some("yes"));
    assert_eq!(
        env.get_string("spring.datasource.url").as_deref(),
        Some("jdbc:mysql://db:3306/app")
    );
    assert_eq!(env.get_string("remote.only").as_deref(), Some("true"));
}

#[test]
fn test_refresh_replaces_one_child_only() {
    let env = Environment::new();
    env.add_last(common::composite(
        "remote",
        vec![
            common::source("a", ConfigFormat::Properties, "k=a\nshared=a\n"),
            common::source("b", ConfigFormat::Properties, "k=b\nb.only=1\n"),
        ],
    ));

    let previous = env.replace_source(common::source(
        "b",
        ConfigFormat::Properties,
        "k=b2\nb.only=2\n",
    ));

    assert!(previous.is_some());
    assert_eq!(env.get_string("k").as_deref(), Some("a"));
    assert_eq!(env.get_string("b.only").as_deref(), Some("2"));
    assert_eq!(env.get_string("shared").as_deref(), Some("a"));
}

#[test]
fn test_snapshot_is_detached() {
    let env = Environment::new();
    env.add_last(common::source("a", ConfigFormat::Properties, "k=1\n"));

    let snapshot = env.snapshot();
    env.remove("a");

    assert!(!env.contains("a"));
    assert_eq!(snapshot.len(), 1);
    assert!(matches!(snapshot.get("a"), Some(PropertyLayer::Source(_))));
}

#[test]
fn test_concurrent_readers_during_replace() {
    let env = Environment::new();
    env.add_last(common::composite(
        "remote",
        vec![common::source("doc", ConfigFormat::Properties, "v=0\n")],
    ));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let env = env.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    assert!(env.get_string("v").is_some());
                }
            })
        })
        .collect();

    for i in 1..=50 {
        env.replace_source(common::source(
            "doc",
            ConfigFormat::Properties,
            &format!("v={}\n", i),
        ));
    }

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(env.get_string("v").as_deref(), Some("50"));
}

#[test]
fn test_merged_view() {
    let env = Environment::new();
    env.add_first(common::source("override", ConfigFormat::Properties, "server.port=1\n"));
    env.add_last(common::source("base", ConfigFormat::Yaml, common::APP_YAML));

    let merged = env.merged();
    assert_eq!(merged.get("server.port").unwrap().as_str(), Some("1"));
    assert_eq!(merged.get("spring.datasource.pool.size").unwrap().as_i64(), Some(10));
}
