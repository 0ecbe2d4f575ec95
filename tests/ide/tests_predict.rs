#![allow(clippy::unwrap_used)]

use relevance::hir::RelDataType;
use relevance::ide::{MarkedNode, PredictOptions, predict, predict_with};
use relevance::syntax::NodeKind;

use crate::helpers::index;

fn end(text: &str) -> usize {
    text.len()
}

#[test]
fn test_open_filter_predicts_world_inside_boolean_filter() {
    let text = "files whose (name contains ";
    let prediction = predict(text, 29);

    assert_eq!(prediction.attempts, 2);
    assert_eq!(prediction.candidate, "files whose (name contains ?)");
    let tree = prediction.tree.as_ref().unwrap();
    let marker = prediction.marker.unwrap();
    assert!(matches!(tree.kind(marker), NodeKind::TypeHint));

    match prediction.marked().unwrap() {
        MarkedNode::World { scope } => {
            assert!(matches!(
                tree.kind(scope.unwrap()),
                NodeKind::Phrase { name, .. } if name == "files"
            ));
        }
        other => panic!("expected a world marker, got {other:?}"),
    }
    assert_eq!(
        prediction.marked_type(&index()).unwrap().unwrap(),
        RelDataType::world()
    );
    assert_eq!(
        prediction.enclosing_filter_type(&index()).unwrap().unwrap(),
        RelDataType::boolean()
    );
}

#[test]
fn test_balanced_text_compiles_first_time() {
    let prediction = predict("name of ", 8);
    assert_eq!(prediction.attempts, 1);
    assert_eq!(prediction.candidate, "name of ?");
    assert!(matches!(prediction.marked(), Some(MarkedNode::World { scope: None })));
    assert!(prediction.enclosing_filter().is_none());
}

#[test]
fn test_direct_marker_takes_source_type() {
    let text = "folder \"c\" -> ";
    let prediction = predict(text, end(text));
    assert!(matches!(prediction.marked(), Some(MarkedNode::Node(_))));
    assert_eq!(
        prediction.marked_type(&index()).unwrap().unwrap(),
        RelDataType::named("folder")
    );
}

#[test]
fn test_partial_word_is_replaced() {
    let text = "file \"a\".na";
    let prediction = predict(text, end(text));
    assert_eq!(prediction.candidate, "file \"a\".?");
    assert_eq!(
        prediction.marked_type(&index()).unwrap().unwrap(),
        RelDataType::named("file")
    );
}

#[test]
fn test_cursor_on_property_name() {
    let prediction = predict("size of file \"a\"", 0);
    assert_eq!(prediction.candidate, "? of file \"a\"");
    assert_eq!(
        prediction.marked_type(&index()).unwrap().unwrap(),
        RelDataType::named("file")
    );
}

#[test]
fn test_two_open_parens_need_three_attempts() {
    let text = "files whose (exists (name of ";
    let prediction = predict(text, end(text));
    assert_eq!(prediction.attempts, 3);
    assert_eq!(prediction.candidate, "files whose (exists (name of ?))");
    assert!(!prediction.is_empty());
}

#[test]
fn test_gives_up_after_three_attempts() {
    let text = "(((name of ";
    let prediction = predict(text, end(text));
    assert!(prediction.is_empty());
    assert_eq!(prediction.attempts, 3);
    assert!(prediction.marker.is_none());
    assert!(prediction.marked_type(&index()).is_none());
}

#[test]
fn test_attempt_limit_is_configurable() {
    let options = PredictOptions {
        max_attempts: 1,
        ..PredictOptions::default()
    };
    let prediction = predict_with("files whose (name contains ", 27, &options);
    assert!(prediction.is_empty());
    assert_eq!(prediction.attempts, 1);
}

#[test]
fn test_marker_inside_filter_on_property() {
    let text = "names of files whose (size of ";
    let prediction = predict(text, end(text));
    // `size of ?`: the marker is the source of a property, a world reference
    assert!(matches!(prediction.marked(), Some(MarkedNode::World { .. })));
    assert!(prediction.enclosing_filter().is_some());
}

#[test]
fn test_earlier_markers_are_skipped() {
    let text = "(name of ?, size of ";
    let prediction = predict(text, end(text));
    let tree = prediction.tree.as_ref().unwrap();
    let marker = prediction.marker.unwrap();
    assert_eq!(tree.type_hints()[1], marker);
}

#[test]
fn test_marker_after_whose_is_the_filter() {
    let text = "files whose ";
    let prediction = predict(text, end(text));
    assert_eq!(prediction.attempts, 1);
    assert_eq!(prediction.candidate, "files whose ?");

    let tree = prediction.tree.as_ref().unwrap();
    let marker = prediction.marker.unwrap();
    assert_eq!(prediction.enclosing_filter(), Some(marker));
    match prediction.marked().unwrap() {
        MarkedNode::World { scope } => {
            assert!(matches!(
                tree.kind(scope.unwrap()),
                NodeKind::Phrase { name, .. } if name == "files"
            ));
        }
        other => panic!("expected a world marker, got {other:?}"),
    }
}

#[test]
fn test_marker_after_creation_phrase_is_its_argument() {
    let text = "file ";
    let prediction = predict(text, end(text));
    assert_eq!(prediction.attempts, 1);
    assert_eq!(prediction.candidate, "file ?");

    let tree = prediction.tree.as_ref().unwrap();
    let marker = prediction.marker.unwrap();
    assert!(matches!(
        tree.kind(tree.root()),
        NodeKind::Phrase { params: Some(param), .. } if *param == marker
    ));
    assert_eq!(
        prediction.marked_type(&index()).unwrap().unwrap(),
        RelDataType::world()
    );
}

#[test]
fn test_deep_nesting_gives_an_empty_prediction() {
    let text = "(".repeat(10_000);
    let prediction = predict(&text, end(&text));
    assert!(prediction.is_empty());
    assert_eq!(prediction.attempts, 3);
}
