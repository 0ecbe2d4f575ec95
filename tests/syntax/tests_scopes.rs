use relevance::NodeKind;

use crate::helpers::{compile, find_kind, find_phrase};

#[test]
fn test_root_has_no_scope() {
    let ast = compile("name of file \"a\"");
    assert_eq!(ast.scope(ast.root()), None);
    assert!(!ast.is_direct_access(ast.root()));
}

#[test]
fn test_property_accessor_is_direct_on_source() {
    let ast = compile("name of file \"a\"");
    let name = find_phrase(&ast, "name");
    let file = find_phrase(&ast, "file");

    assert!(ast.is_direct_access(name));
    assert_eq!(ast.scope(name), Some(file));
    assert!(!ast.is_direct_access(file));
    assert_eq!(ast.scope(file), None);
}

#[test]
fn test_phrase_argument_is_not_direct() {
    let ast = compile("name of file \"a\"");
    let literal = find_kind(&ast, "string");
    assert!(!ast.is_direct_access(literal));
    assert_eq!(ast.scope(literal), None);
}

#[test]
fn test_whose_filter_is_scoped_to_source() {
    let ast = compile("files whose (size of it > 10)");
    let files = find_phrase(&ast, "files");
    let it = find_kind(&ast, "it");
    let parens = find_kind(&ast, "parens");

    assert_eq!(ast.scope(parens), Some(files));
    assert!(!ast.is_direct_access(parens));
    // `it` is the source of `size of it`, so it keeps the filter's scope
    assert_eq!(ast.scope(it), Some(files));
    assert!(!ast.is_direct_access(it));
}

#[test]
fn test_whose_passes_direct_access_to_source() {
    let ast = compile("names of files whose (x) of folder \"c\"");
    let files = find_phrase(&ast, "files");
    let folder = find_phrase(&ast, "folder");
    let whose = find_kind(&ast, "whose");

    assert!(ast.is_direct_access(whose));
    assert!(ast.is_direct_access(files));
    assert_eq!(ast.scope(files), Some(folder));
}

#[test]
fn test_nested_property_chain() {
    let ast = compile("names of files of folder \"c\"");
    let names = find_phrase(&ast, "names");
    let files = find_phrase(&ast, "files");
    let folder = find_phrase(&ast, "folder");

    assert_eq!(ast.scope(names), Some(ast.parents()[files.index()].unwrap()));
    assert!(matches!(
        ast.kind(ast.scope(names).unwrap()),
        NodeKind::Property { .. }
    ));
    assert_eq!(ast.scope(files), Some(folder));
    assert!(ast.is_direct_access(files));
}

#[test]
fn test_marker_scope() {
    let ast = compile("folder \"c\" -> ?");
    let marker = ast.type_hints()[0];
    let folder = find_phrase(&ast, "folder");
    assert!(ast.is_direct_access(marker));
    assert_eq!(ast.scope(marker), Some(folder));

    let ast = compile("name of ?");
    let marker = ast.type_hints()[0];
    assert!(!ast.is_direct_access(marker));
    assert_eq!(ast.scope(marker), None);
}

#[test]
fn test_type_hints_in_source_order() {
    let ast = compile("(name of ?, size of ?)");
    let hints = ast.type_hints();
    assert_eq!(hints.len(), 2);
    assert!(ast.node(hints[0]).range.start() < ast.node(hints[1]).range.start());
}

#[test]
fn test_foreign_node_id_is_not_found() {
    let large = compile("names of files of folder \"c\"");
    let small = compile("x");
    assert!(small.get(large.root()).is_none());
    assert_eq!(small.get(small.root()), Some(small.node(small.root())));
}
