// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for path classification and normalisation

#![no_main]

use arbitrary::Arbitrary;
use fsnode_core::{DotHeuristic, NodePath, PathClassifier, TrailingSeparator, SEPARATOR};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    raw: String,
    pieces: Vec<String>,
    strict: bool,
}

fn check(classifier: &dyn PathClassifier, raw: &str) {
    let Ok(path) = NodePath::parse_with(classifier, raw) else {
        return;
    };

    // normalising twice changes nothing
    let again = NodePath::parse_with(classifier, path.as_str()).expect("normalised path reparses");
    assert_eq!(again, path);

    assert_eq!(path.as_str().ends_with(SEPARATOR), path.is_dir());
    assert_eq!(path.extension().is_err(), path.is_dir());

    let _ = path.name();
    if let Some(parent) = path.parent() {
        assert!(parent.is_dir());
        assert!(path.as_str().starts_with(parent.as_str()));
    }
}

fuzz_target!(|input: Input| {
    if input.strict {
        check(&TrailingSeparator, &input.raw);
    } else {
        check(&DotHeuristic, &input.raw);
    }

    if let Ok(joined) = NodePath::join(&input.pieces) {
        check(&DotHeuristic, joined.as_str());
    }
});
