//! Behavioural properties of the handle over the walk fixture: expanded
//! forms are accepted, overlay mutations are idempotent and shadow the base
//! dictionary, suggestions stay within two edits.

use std::path::PathBuf;

use morphspell::morphology::expand;
use morphspell::{MorphspellHandle, OverlayStatus};

fn data_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(filename)
}

fn create_handle() -> MorphspellHandle {
    MorphspellHandle::from_files(data_path("walk.dic"), data_path("walk.aff"))
        .unwrap_or_else(|e| panic!("failed to create MorphspellHandle: {}", e))
}

#[test]
fn every_expanded_form_is_accepted() {
    let loaded = morphspell_aff::load_from_files(data_path("walk.dic"), data_path("walk.aff"))
        .expect("fixture loads");
    let handle = create_handle();

    let mut total = 0;
    for entry in loaded.dictionary.entries() {
        for expansion in expand(&loaded.table, &entry.stem, &entry.flags) {
            total += 1;
            assert!(
                handle.spell(&expansion.form),
                "{} (from {}) should be accepted",
                expansion.form,
                entry.stem
            );
        }
    }
    // walk alone has eight forms: bare, three suffixed, un- on each.
    assert!(total > 8);
    assert!(expand(&loaded.table, "wrong", &loaded.dictionary.get("wrong").unwrap().flags).is_empty());
}

#[test]
fn walk_scenario() {
    let handle = create_handle();
    assert!(handle.spell("walked"));
    assert!(!handle.spell("walkked"));

    let suggestions = handle.suggest("walkk");
    let position = |word: &str| suggestions.iter().position(|s| s == word);
    let walk = position("walk").expect("walk is suggested");
    let walked = position("walked").expect("walked is suggested");
    assert!(walk < walked, "closer suggestion ranks first: {:?}", suggestions);

    assert_eq!(handle.stem("walking"), vec!["walk"]);
}

#[test]
fn frobnicate_scenario() {
    let handle = create_handle();
    assert!(!handle.spell("frobnicated"));
    assert_eq!(handle.add_with_affix("frobnicate", "walk"), OverlayStatus::Ok);
    assert!(handle.spell("frobnicated"));
    assert!(handle.spell("Frobnicating"));
    assert!(handle.spell("unfrobnicated"));
    assert_eq!(handle.stem("frobnicated"), vec!["frobnicate"]);
}

#[test]
fn add_and_remove_are_idempotent() {
    let handle = create_handle();
    assert_eq!(handle.add("zorp"), OverlayStatus::Ok);
    assert_eq!(handle.add("zorp"), OverlayStatus::AlreadyPresent);
    assert!(handle.spell("zorp"));

    assert_eq!(handle.remove("zorp"), OverlayStatus::Ok);
    assert_eq!(handle.remove("zorp"), OverlayStatus::NotFound);
    assert!(!handle.spell("zorp"));

    assert_eq!(handle.remove("talked"), OverlayStatus::Ok);
    assert_eq!(handle.remove("talked"), OverlayStatus::NotFound);
    assert!(!handle.spell("talked"));
    assert!(handle.spell("talk"));
}

#[test]
fn overlay_shadows_base_dictionary() {
    let handle = create_handle();
    assert_eq!(handle.remove("phone"), OverlayStatus::Ok);
    assert!(!handle.spell("phone"));
    assert!(!handle.spell("phones"));
    assert!(handle.stem("phones").is_empty());
    assert!(!handle.suggest("phonse").contains(&"phones".to_string()));

    assert_eq!(handle.add("phone"), OverlayStatus::Ok);
    assert!(handle.spell("phone"));
    assert!(handle.spell("phones"));
}

#[test]
fn suggestions_are_correct_and_close() {
    let handle = create_handle();
    for input in [
        "walkk", "wlak", "Talkde", "bakd", "phnoe", "unwalkd", "WALKK", "wALKED", "tALKS",
    ] {
        for suggestion in handle.suggest(input) {
            assert_ne!(suggestion, input);
            assert!(handle.spell(&suggestion), "{input} -> {suggestion}");
            let distance = strsim::osa_distance(input, &suggestion);
            assert!(distance <= 2, "{input} -> {suggestion} ({distance})");
        }
    }
}

#[test]
fn generate_with_itself_contains_the_word() {
    let handle = create_handle();
    for word in [
        "walk", "walked", "baking", "phones", "unwalked", "NASA", "rare", "Walked", "WALKED",
        "Phones",
    ] {
        let forms = handle.generate(word, word);
        assert!(forms.contains(&word.to_string()), "{word}: {forms:?}");
    }
}

#[test]
fn concurrent_queries_and_mutations() {
    let handle = create_handle();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    assert!(handle.spell("walked"));
                    assert!(!handle.suggest("walkk").is_empty());
                }
            });
        }
        scope.spawn(|| {
            for i in 0..50 {
                let word = format!("zz{i}");
                assert_eq!(handle.add(&word), OverlayStatus::Ok);
                assert_eq!(handle.remove(&word), OverlayStatus::Ok);
            }
        });
    });
    assert!(!handle.spell("zz0"));
}

#[test]
fn recased_suggestions_stay_within_two_edits() {
    let handle = create_handle();
    assert_eq!(handle.suggest("wALKED"), vec!["WALKED"]);
    assert!(!handle.suggest("tALKS").contains(&"talks".to_string()));
    assert_eq!(handle.suggest("WAlked")[0], "Walked");
}
