//! Registration behavior across the public surface.

use waypost::testing::{CountingCallback, RecordingSink};
use waypost::{
    DEFAULT_TARGET, DispatchOutcome, DispatchPath, PathRewrite, RegistryError, RulePosition,
};

mod common;
use common::{Host, main_query};

#[test]
fn test_register_all_last_entry_wins() {
    let mut host = Host::new();
    let first = CountingCallback::new();
    let second = CountingCallback::new();

    host.registry
        .register_all([
            DispatchPath::new("hi").callback(first.clone()),
            DispatchPath::new("hi").callback(second.clone()),
        ])
        .unwrap();

    assert_eq!(host.registry.len(), 1);
    host.dispatch(&main_query("hi")).unwrap();

    assert_eq!(first.count(), 0, "the overridden registration must be gone");
    assert_eq!(second.count(), 1);
}

#[test]
fn test_register_all_stops_at_first_error() {
    let mut host = Host::new();
    let result = host
        .registry
        .register_all([DispatchPath::new("ok"), DispatchPath::new("")]);

    assert_eq!(result, Err(RegistryError::EmptyPath));
    assert!(host.registry.contains("ok"));
    assert_eq!(host.registry.len(), 1);
}

#[test]
fn test_rewrite_registration_leaves_the_simple_mapping() {
    let mut host = Host::new();
    host.registry.register("hi").unwrap();
    host.registry
        .register(DispatchPath::new("hi").rewrite(PathRewrite::new("hi/(.*)/?")))
        .unwrap();

    // No simple paths remain, so no alternation rule is compiled.
    let mut sink = RecordingSink::new();
    host.registry.compile_rules(&mut sink).unwrap();

    assert_eq!(sink.rules().len(), 1);
    assert_eq!(sink.rules()[0].pattern, "hi/(.*)/?");
}

#[test]
fn test_string_shorthand_registers_a_simple_path() {
    let mut host = Host::new();
    host.registry.register("changelog").unwrap();

    let outcome = host.dispatch(&main_query("changelog")).unwrap();
    assert_eq!(outcome, DispatchOutcome::Fired);

    let mut sink = RecordingSink::new();
    host.registry.compile_rules(&mut sink).unwrap();
    assert_eq!(sink.rules()[0].pattern, "(changelog)/?$");
}

#[test]
fn test_paths_load_from_toml() {
    #[derive(serde::Deserialize)]
    struct PathTable {
        paths: Vec<DispatchPath>,
    }

    let table: PathTable = toml::from_str(
        r#"
        [[paths]]
        path = "reports"
        template = "reports"
        section = "internal"

        [[paths]]
        path = "archive"

        [paths.rewrite]
        rule = 'archive/(\d{4})/?$'
        redirect = 'index.php?dispatch=archive&year=$matches[1]'
        position = "bottom"
        query_vars = ["year"]
        "#,
    )
    .unwrap();

    let mut host = Host::new();
    host.registry.register_all(table.paths).unwrap();

    let reports = host.registry.lookup("reports").unwrap();
    assert_eq!(reports.template.as_deref(), Some("reports"));
    assert_eq!(reports.extra["section"], "internal");

    let archive = host.registry.lookup("archive").unwrap();
    let rewrite = archive.rewrite.as_ref().unwrap();
    assert_eq!(rewrite.position, Some(RulePosition::Bottom));

    let vars = host.registry.filter_query_vars(vec!["page".to_string()]);
    assert!(vars.iter().any(|var| var == "year"));

    let mut sink = RecordingSink::new();
    host.registry.compile_rules(&mut sink).unwrap();
    assert_eq!(sink.rules().len(), 2);
    assert_eq!(sink.rules()[0].pattern, "(reports)/?$");
    assert_eq!(sink.rules()[0].target, DEFAULT_TARGET);
    assert_eq!(sink.rules()[1].position, RulePosition::Bottom);
}
