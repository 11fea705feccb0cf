//! Integration tests for loading template files and generating responses

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use gobot_nlg::{
    ConfigError, LoadError, NlgConfig, NlgError, ResponseManager, TemplateStore, TemplateSyntax,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn plain_manager() -> ResponseManager {
    let config = NlgConfig::new(fixture("restaurant_plain.txt")).with_api_call_action("api_call");
    ResponseManager::new(&config).expect("Should load")
}

fn alternation_manager() -> ResponseManager {
    let config = NlgConfig::from_file(&fixture("nlg.toml")).expect("Should read config");
    ResponseManager::new(&config).expect("Should load")
}

fn no_slots() -> HashMap<String, String> {
    HashMap::new()
}

fn is_marker_free(text: &str) -> bool {
    let bytes = text.as_bytes();
    !bytes
        .windows(2)
        .any(|w| w[0] == b'#' && w[1].is_ascii_alphabetic())
}

#[test]
fn test_plain_fixture_loads_in_file_order() {
    let nlg = plain_manager();
    assert_eq!(nlg.action_count(), 9);
    assert_eq!(nlg.resolve_action_id("api_call").unwrap(), 0);
    assert_eq!(nlg.resolve_action_id("welcome_msg").unwrap(), 8);
    assert_eq!(nlg.api_call_id(), Some(0));
}

#[test]
fn test_inform_area_plain_syntax() {
    let nlg = plain_manager();
    let id = nlg.resolve_action_id("inform_area").unwrap();

    let slots = HashMap::from([("area", "north")]);
    assert_eq!(
        nlg.generate_text(id, &slots).unwrap(),
        "The place is in north area."
    );
    assert_eq!(
        nlg.generate_text(id, &no_slots()).unwrap(),
        "The place is in  area."
    );
}

#[test]
fn test_inform_area_alternation_syntax() {
    let nlg = alternation_manager();
    let id = nlg.resolve_action_id("inform_area").unwrap();
    assert_eq!(
        nlg.generate_text(id, &no_slots()).unwrap(),
        "The place is in #area area."
    );
}

#[test]
fn test_api_call_alternation_syntax() {
    let nlg = alternation_manager();
    let id = nlg.resolve_action_id("api_call").unwrap();
    let slots = HashMap::from([("food", "Italian")]);
    insta::assert_snapshot!(
        nlg.generate_text(id, &slots).unwrap(),
        @"api_call area=dontcare food=italian pricerange=dontcare"
    );
}

#[test]
fn test_api_call_plain_syntax() {
    let nlg = plain_manager();
    let slots = HashMap::from([("food", "Italian"), ("area", "South")]);
    assert_eq!(
        nlg.generate_text(0, &slots).unwrap(),
        "api_call area=south food=italian pricerange="
    );
}

#[test]
fn test_every_action_renders_without_slots() {
    for nlg in [plain_manager(), alternation_manager()] {
        for id in 0..nlg.action_count() {
            assert!(nlg.generate_text(id, &no_slots()).is_ok());
        }
    }
}

#[test]
fn test_api_call_output_is_lowercase_and_marker_free() {
    let slot_sets = [
        HashMap::new(),
        HashMap::from([("area", "West")]),
        HashMap::from([("food", "Thai"), ("pricerange", "CHEAP")]),
    ];
    for nlg in [plain_manager(), alternation_manager()] {
        let id = nlg.api_call_id().expect("api call configured");
        for slots in &slot_sets {
            let text = nlg.generate_text(id, slots).unwrap();
            assert_eq!(text, text.to_lowercase());
            assert!(is_marker_free(&text), "marker left in {:?}", text);
        }
    }
}

#[test]
fn test_non_api_call_keeps_literal_text() {
    let nlg = alternation_manager();
    let id = nlg.resolve_action_id("welcome_msg").unwrap();
    assert_eq!(
        nlg.generate_text(id, &no_slots()).unwrap(),
        "Hello, welcome to the Cambridge restaurant system. How may I help you?"
    );
}

#[test]
fn test_fallback_and_escape() {
    let nlg = alternation_manager();

    let food = nlg.resolve_action_id("inform_food").unwrap();
    let slots = HashMap::from([("name", "Golden Wok")]);
    assert_eq!(
        nlg.generate_text(food, &slots).unwrap(),
        "Golden Wok serves a bit of everything."
    );

    let price = nlg.resolve_action_id("inform_price").unwrap();
    let slots = HashMap::from([("price", "20")]);
    assert_eq!(
        nlg.generate_text(price, &slots).unwrap(),
        "It costs around #20 per person."
    );
}

#[test]
fn test_dontcare_pattern() {
    let nlg = alternation_manager();
    let id = nlg.resolve_action_id("confirm_search").unwrap();

    let slots = HashMap::from([("food", "indian"), ("area", "dontcare")]);
    assert_eq!(
        nlg.generate_text(id, &slots).unwrap(),
        "You are looking for a indian restaurant in any part of town, right?"
    );

    let slots = HashMap::from([("food", "indian"), ("area", "east")]);
    assert_eq!(
        nlg.generate_text(id, &slots).unwrap(),
        "You are looking for a indian restaurant in the east part of town, right?"
    );
}

#[test]
fn test_resolve_action_id_inverts_enumeration() {
    let nlg = plain_manager();
    for (id, label, _) in nlg.store().iter() {
        assert_eq!(nlg.resolve_action_id(label).unwrap(), id);
    }
}

#[test]
fn test_unknown_action_is_lookup_error() {
    let nlg = plain_manager();
    let err = nlg.resolve_action_id("order_pizza").unwrap_err();
    assert_eq!(err.action, "order_pizza");
}

#[test]
fn test_out_of_range_action_id() {
    let nlg = plain_manager();
    let err = nlg.generate_text(42, &no_slots()).unwrap_err();
    assert_eq!(err.index, 42);
    assert_eq!(err.count, 9);
}

#[test]
fn test_loading_twice_is_deterministic() {
    let a = alternation_manager();
    let b = alternation_manager();
    assert_eq!(a.action_count(), b.action_count());

    let slots = HashMap::from([("name", "Nandos"), ("food", "portuguese")]);
    for id in 0..a.action_count() {
        assert_eq!(
            a.generate_text(id, &slots).unwrap(),
            b.generate_text(id, &slots).unwrap()
        );
    }
}

#[test]
fn test_shared_across_threads() {
    let nlg = Arc::new(alternation_manager());
    let expected = nlg
        .generate_text(1, &HashMap::from([("area", "centre")]))
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let nlg = Arc::clone(&nlg);
            thread::spawn(move || {
                nlg.generate_text(1, &HashMap::from([("area", "centre")]))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_duplicate_action_file_rejected() {
    let config = NlgConfig::new(fixture("duplicate.txt"));
    let err = ResponseManager::new(&config).unwrap_err();
    assert!(matches!(
        err,
        NlgError::Load(LoadError::DuplicateAction {
            line: 3,
            first_line: 1,
            ..
        })
    ));
}

#[test]
fn test_bad_syntax_file_reports_location() {
    let path = fixture("bad_syntax.txt");
    let err = TemplateStore::from_file(&path, TemplateSyntax::Alternation).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 2, .. }));

    let source = std::fs::read_to_string(&path).unwrap();
    let report = err.format(&source, "bad_syntax.txt");
    assert!(report.contains("bad_syntax.txt"));
    assert!(report.contains("inform_food"));
}

#[test]
fn test_bad_syntax_file_is_fine_as_plain() {
    let store =
        TemplateStore::from_file(&fixture("bad_syntax.txt"), TemplateSyntax::Plain).unwrap();
    assert_eq!(store.action_count(), 2);
}

#[test]
fn test_missing_api_call_action_is_config_error() {
    let config = NlgConfig::from_file(&fixture("missing_api_call.toml")).unwrap();
    let err = ResponseManager::new(&config).unwrap_err();
    assert!(matches!(
        err,
        NlgError::Config(ConfigError::UnknownApiCallAction { .. })
    ));
}

#[test]
fn test_config_resolves_relative_template_path() {
    let config = NlgConfig::from_file(&fixture("nlg.toml")).unwrap();
    assert_eq!(config.template_path, fixture("restaurant_alternation.txt"));
    assert_eq!(config.template_type, TemplateSyntax::Alternation);
}

#[test]
fn test_save_and_reload() {
    let nlg = alternation_manager();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("templates.txt");
    nlg.store().save(&path).unwrap();

    let reloaded = TemplateStore::from_file(&path, TemplateSyntax::Alternation).unwrap();
    assert_eq!(&reloaded, nlg.store());
}

#[test]
fn test_config_debug_survives_cli_without_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nlg.toml");
    std::fs::write(
        &config_path,
        format!(
            "template_path = {:?}\ntemplate_type = \"alternation\"\ndebug = true\n",
            fixture("restaurant_alternation.txt").display().to_string()
        ),
    )
    .unwrap();

    let config = NlgConfig::from_file(&config_path).unwrap().enable_debug(false);
    assert!(config.debug);
    assert!(ResponseManager::new(&config).is_ok());
}

#[test]
fn test_non_ascii_syntax_error_keeps_source_context() {
    let source = "greet\tHéllo ünïcödé wörld }\n";
    let err = TemplateStore::from_str(source, TemplateSyntax::Alternation).unwrap_err();
    let report = err.format(source, "greetings.txt");
    assert!(report.contains("greetings.txt"), "got: {}", report);
    assert!(report.contains("wörld"), "got: {}", report);
}
