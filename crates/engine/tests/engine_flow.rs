use pretty_assertions::assert_eq;
use resonance_encoding::{Value, SIMPLE};
use resonance_engine::{
    Engine, EngineConfig, RejectReason, RemovalOutcome, SharedEngine, ViewState,
};
use resonance_graph::ColorFamily;
use std::thread;

fn engine_with(words: &[&str]) -> Engine {
    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    engine.submit_many(words.iter().copied(), "seed.md").unwrap();
    engine
}

#[test]
fn anagram_submission_creates_a_simple_resonance() {
    let mut engine = engine_with(&["Beans", "Dream"]);
    assert_eq!(engine.graph().edges_in_layer(SIMPLE).count(), 0);

    let submission = engine.submit("snaeb", "_MANUAL_").unwrap();
    assert!(submission.accepted && submission.created);
    assert_eq!(submission.item.as_deref(), Some("Snaeb"));

    let simple: Vec<_> = engine.groups().iter().filter(|g| g.layer == SIMPLE).collect();
    assert_eq!(simple.len(), 1);
    assert_eq!(simple[0].value, Value::Int(48));
    assert_eq!(simple[0].items, vec!["Beans".to_string(), "Snaeb".to_string()]);
    assert_eq!(engine.graph().edges_in_layer(SIMPLE).count(), 1);
    assert_eq!(engine.stats().items, 3);
}

#[test]
fn numeric_filter_selects_matching_items() {
    let engine = engine_with(&["Beans", "Dream", "Snaeb"]);
    let view = engine.query(&ViewState {
        value: Some(48.0),
        ..ViewState::default()
    });
    assert_eq!(view.node_texts().into_iter().collect::<Vec<_>>(), vec!["Beans", "Snaeb"]);
}

#[test]
fn unknown_layer_gives_empty_view_with_reason() {
    let engine = engine_with(&["Beans", "Snaeb"]);
    let view = engine.graph_view(Some(&["Martian".to_string()]));
    assert!(view.nodes.is_empty() && view.edges.is_empty());
    assert!(view.reason.unwrap().contains("Martian"));
}

#[test]
fn invalid_submissions_are_rejected_without_change() {
    let mut engine = engine_with(&["Beans"]);
    let submission = engine.submit("b3ans!", "_MANUAL_").unwrap();
    assert!(!submission.accepted);
    assert_eq!(submission.reason, Some(RejectReason::InvalidFormat));
    assert_eq!(engine.registry().len(), 1);
}

#[test]
fn repeat_submission_merges_origins() {
    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    engine.submit("Love", "fileA").unwrap();
    let again = engine.submit("love", "fileB").unwrap();
    assert!(again.accepted && !again.created);

    let origins: Vec<_> = engine.registry().origins("LOVE").unwrap().iter().cloned().collect();
    assert_eq!(origins, vec!["fileA".to_string(), "fileB".to_string()]);
    assert_eq!(engine.graph().node_count(), 1);
}

#[test]
fn positions_survive_incremental_rebuilds() {
    let mut engine = engine_with(&["Beans", "Dream", "Angel"]);
    let before = engine.layout().clone();
    assert_eq!(before.get("Beans"), Some([0.0, 0.0, 0.0]));

    engine.submit("Snaeb", "_MANUAL_").unwrap();
    for (text, position) in before.iter() {
        assert_eq!(engine.layout().get(text), Some(*position), "{text}");
    }
    assert!(engine.layout().contains("Snaeb"));
}

#[test]
fn colors_are_stable_across_rebuilds() {
    let mut engine = engine_with(&["Beans", "Dream", "Angel"]);
    let before = engine.node_colors().clone();
    engine.rebuild().unwrap();
    assert_eq!(engine.node_colors(), &before);
}

#[test]
fn negative_feedback_honors_protected_origins() {
    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    engine.submit("Hope", "_MANUAL_").unwrap();
    engine.submit("Fear", "notes.md").unwrap();

    assert_eq!(engine.reject("hope").unwrap(), RemovalOutcome::Protected);
    assert_eq!(engine.reject("fear").unwrap(), RemovalOutcome::Removed);
    assert_eq!(engine.reject("fear").unwrap(), RemovalOutcome::Absent);
    assert_eq!(engine.graph().node_count(), 1);
    assert!(!engine.layout().contains("Fear"));

    assert!(engine.remove("hope").unwrap());
    assert_eq!(engine.export(), "");
}

#[test]
fn item_report_collects_shared_and_hand_readings() {
    let engine = engine_with(&["Beans", "Dream", "Snaeb"]);
    let report = engine.item_report("beans").unwrap();

    assert_eq!(report.text, "Beans");
    assert_eq!(report.origins, vec!["seed.md".to_string()]);
    let simple = report.shared.iter().find(|s| s.layer == SIMPLE).unwrap();
    assert_eq!(simple.others, vec!["Snaeb".to_string()]);

    // Right hand: N=25. Left hand: B+E+A+S = 24+3+11+12.
    assert_eq!(report.hands.positional, -25);
    assert_eq!(report.hands.count, -3);
    assert_eq!(report.layers.len(), engine.encodings().len());
    assert!(report.binary.representation.starts_with("01000010"));
    assert!((180.0..=280.0).contains(&report.hue));

    assert!(engine.item_report("Nobody").is_err());
}

#[test]
fn number_report_and_prime_connections() {
    let engine = engine_with(&["Ab", "Ba", "Beans", "Snaeb"]);

    let report = engine.number_report(48.0);
    let simple = report.matches.iter().find(|m| m.layer == SIMPLE).unwrap();
    assert_eq!(simple.items, vec!["Beans".to_string(), "Snaeb".to_string()]);
    assert!(!report.facts.prime);

    let simple_layer = [SIMPLE.to_string()];
    let primes = engine.prime_connections(&simple_layer, false).unwrap();
    assert_eq!(primes.len(), 1);
    assert_eq!(primes[0].value, Value::Int(3));
    assert!(engine.prime_connections(&simple_layer, true).unwrap().is_empty());
    assert!(engine.prime_connections(&["Nope".to_string()], false).is_err());
}

#[test]
fn color_families_use_the_blue_violet_band() {
    let engine = engine_with(&["Beans", "Dream", "Snaeb", "Angel"]);
    let families = engine.color_families();
    let total: usize = families.values().map(Vec::len).sum();
    assert_eq!(total, 4);
    assert!(families
        .keys()
        .all(|f| matches!(f, ColorFamily::Blue | ColorFamily::Purple | ColorFamily::Pink)));
}

#[test]
fn configured_layers_limit_the_index() {
    let config = EngineConfig::from_bytes(br#"{"layers": ["Simple"]}"#).unwrap();
    let mut engine = Engine::new(config).unwrap();
    engine.submit_many(["Beans", "Snaeb"], "x").unwrap();

    assert_eq!(engine.graph().layers, vec![SIMPLE.to_string()]);
    assert_eq!(engine.graph().edge_count(), 1);
    let view = engine.query(&ViewState {
        layers: Some(vec!["Binary".into()]),
        ..ViewState::default()
    });
    assert!(view.reason.is_some());
}

#[test]
fn export_is_sorted() {
    let engine = engine_with(&["chaos", "Angel", "beans"]);
    assert_eq!(engine.export(), "Angel\nBeans\nChaos\n");
}

#[test]
fn shared_engine_serializes_concurrent_writers() {
    let shared = SharedEngine::new(Engine::new(EngineConfig::default()).unwrap());
    let words = ["Angel", "Beans", "Chaos", "Dream", "Snaeb", "Spiral", "Trust", "Light"];

    let handles: Vec<_> = words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let shared = shared.clone();
            let word = word.to_string();
            thread::spawn(move || {
                shared.submit(&word, &format!("worker{i}")).unwrap();
                shared.submit(&word.to_uppercase(), "again").unwrap();
                shared.query(&ViewState::default()).nodes.len()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap() >= 1);
    }

    let engine = shared.read();
    assert_eq!(engine.registry().len(), words.len());
    assert_eq!(engine.graph().node_count(), words.len());
    for layer in engine.index().layers().iter() {
        assert!(layer.is_partition_of(engine.registry()));
    }
}
