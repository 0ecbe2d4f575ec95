#![allow(clippy::unwrap_used)]

use relevance::ide::{CompletionItem, CompletionKind, completions};

use crate::helpers::{filtered_index, index};

fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| &*item.label).collect()
}

fn item<'a>(items: &'a [CompletionItem], label: &str) -> &'a CompletionItem {
    items
        .iter()
        .find(|item| &*item.label == label)
        .unwrap_or_else(|| panic!("no completion {label:?} in {:?}", labels(items)))
}

#[test]
fn test_root_completions_are_creation_functions() {
    let items = completions(&index(), "name of ", 8);
    // `current date` has no singular phrase and is not offered
    assert_eq!(
        labels(&items),
        vec!["file <string>", "folder <string>", "system folder", "process", "registry"]
    );
    assert!(items.iter().all(|i| i.kind == CompletionKind::Creation));
    assert_eq!(item(&items, "file <string>").kind.to_lsp(), 3);
}

#[test]
fn test_member_completions_follow_ancestry() {
    let text = "folder \"c\" -> ";
    let items = completions(&index(), text, text.len());
    assert_eq!(
        labels(&items),
        vec![
            "file",
            "folder",
            "name",
            "pathname",
            "parent folder",
            "uptime",
            "setting <(string, string)>",
        ]
    );
    assert!(items.iter().all(|i| i.kind == CompletionKind::Property));
    let priorities: Vec<u32> = items.iter().map(|i| i.sort_priority).collect();
    assert!(priorities.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_insert_text_snippets() {
    let items = completions(&index(), "name of ", 8);
    assert_eq!(item(&items, "file <string>").insert_text.as_deref(), Some("files \"$0\""));
    assert_eq!(item(&items, "system folder").insert_text.as_deref(), Some("system folders"));

    let text = "file \"a\" -> ";
    let items = completions(&index(), text, text.len());
    assert_eq!(item(&items, "line <number>").insert_text.as_deref(), Some("lines $0"));
    assert_eq!(
        item(&items, "setting <(string, string)>").insert_text.as_deref(),
        Some("settings ($0, )")
    );
    assert_eq!(item(&items, "parent folder").insert_text.as_deref(), Some("parent folders"));
}

#[test]
fn test_detail_and_documentation() {
    let text = "file \"a\" -> ";
    let items = completions(&index(), text, text.len());
    let name = item(&items, "name");
    assert_eq!(name.detail.as_deref(), Some("string"));
    let doc = name.documentation.as_deref().unwrap();
    assert!(doc.starts_with("The name of the object, without its path."));
    assert!(doc.contains("Plural: names"));
    assert!(doc.contains("1.0: win, mac, linux"));
}

#[test]
fn test_filtered_index_hides_newer_creations() {
    let items = completions(&filtered_index(Some("8.0"), None), "name of ", 8);
    assert!(!labels(&items).contains(&"registry"));

    let items = completions(&filtered_index(Some("9.1"), Some("win")), "name of ", 8);
    assert!(labels(&items).contains(&"registry"));
}

#[test]
fn test_no_completions_when_prediction_fails() {
    let text = "(((name of ";
    assert!(completions(&index(), text, text.len()).is_empty());
}

#[test]
fn test_no_completions_for_unknown_type() {
    let text = "widget \"a\" -> ";
    assert!(completions(&index(), text, text.len()).is_empty());
}

#[test]
fn test_no_completions_on_tuples() {
    let text = "(1, 2) -> ";
    assert!(completions(&index(), text, text.len()).is_empty());
}
