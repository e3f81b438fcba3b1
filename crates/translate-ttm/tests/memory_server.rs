//! End-to-end tests: configure services, write translations, query suggestions.

use translate_ttm::{TtmEntry, TtmError, TtmServerFactory};

const CONFIG: &str = r#"{
    "default": "main",
    "services": {
        "main": {"type": "ttmserver", "threshold": 0.5},
        "archive": {"type": "ttmserver", "frozen": true}
    }
}"#;

fn entry(context: &str, source: &str, target: &str) -> TtmEntry {
    TtmEntry {
        context: context.to_string(),
        source_language: "en".to_string(),
        source: source.to_string(),
        target_language: "fi".to_string(),
        target: target.to_string(),
    }
}

#[test]
fn write_then_query_default_server() {
    let factory = TtmServerFactory::from_json(CONFIG).unwrap();
    let mut server = factory.default_server().unwrap();

    let writer = server.writer().expect("memory server is writable");
    writer
        .update(entry("app:welcome", "Welcome to the wiki", "Tervetuloa wikiin"))
        .unwrap();
    writer
        .update(entry("app:welcome-back", "Welcome back to the wiki", "Tervetuloa takaisin wikiin"))
        .unwrap();
    writer
        .update(entry("app:logout", "You have been logged out", "Sinut on kirjattu ulos"))
        .unwrap();

    let results = server.query("en", "fi", "Welcome to this wiki").unwrap();
    let texts: Vec<&str> = results.iter().map(|s| s.text()).collect();
    assert_eq!(texts, ["Tervetuloa wikiin", "Tervetuloa takaisin wikiin"]);
    assert!(results[0].quality() > results[1].quality());
    assert_eq!(results[0].metadata().source, "Welcome to the wiki");
}

#[test]
fn multibyte_sources_are_matched_by_code_point() {
    let factory = TtmServerFactory::from_json(CONFIG).unwrap();
    let mut server = factory.create("main").unwrap().unwrap();
    let writer = server.writer().unwrap();
    writer
        .update(TtmEntry {
            context: "app:cafe".to_string(),
            source_language: "fr".to_string(),
            source: "Le café est fermé".to_string(),
            target_language: "en".to_string(),
            target: "The café is closed".to_string(),
        })
        .unwrap();

    let results = server.query("fr", "en", "Le cafe est ferme").unwrap();
    assert_eq!(results.len(), 1);
    // Two substitutions over 17 code points.
    let expected = 1.0 - 0.9 * 2.0 / 17.0;
    assert!((results[0].quality() - expected).abs() < 1e-12);
}

#[test]
fn frozen_service_refuses_writes() {
    let factory = TtmServerFactory::from_json(CONFIG).unwrap();
    let mut server = factory.create("archive").unwrap().unwrap();
    let err = server
        .writer()
        .unwrap()
        .update(entry("app:x", "x", "y"))
        .unwrap_err();
    assert!(matches!(err, TtmError::Frozen(_)));
}
