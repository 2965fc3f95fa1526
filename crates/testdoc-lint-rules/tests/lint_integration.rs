//! End-to-end tests running the linter with the built-in rules.

use testdoc_lint_core::{apply_fixes, Config, DocBlock, Linter, Severity, TokenStream, TokenStreamBuilder};
use testdoc_lint_rules::{NoVoidReturn, TestAnnotations};

fn fixture() -> (TokenStream, Vec<DocBlock>) {
    TokenStreamBuilder::new("CartTest.php")
        .doc_open()
        .tag("@covers")
        .text("Shopping\\Cart")
        .doc_close()
        .newline()
        .class("CartTest")
        .newline()
        .doc_open()
        .tag("@dataProvider")
        .text("provideItems")
        .tag("@cover")
        .text("Cart::add")
        .doc_close()
        .newline()
        .function("testAddItem")
        .newline()
        .function("resetCart")
        .return_type("void")
        .finish()
}

fn linter() -> Linter {
    Linter::builder()
        .rule(TestAnnotations::new())
        .function_rule(NoVoidReturn::new())
        .build()
}

#[test]
fn lints_a_whole_file() {
    let (stream, blocks) = fixture();
    let result = linter().lint(&stream, &blocks);

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.diagnostics.len(), 2);

    let codes: Vec<&str> = result.diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["SingularCover", "NotAllowed"]);

    assert!(result.has_errors());
    assert!(result.diagnostics[0].is_fixable());
    assert!(result.diagnostics[0].location.line < result.diagnostics[1].location.line);
}

#[test]
fn fixes_are_idempotent() {
    let (mut stream, blocks) = fixture();
    let lint = linter();

    let result = lint.lint(&stream, &blocks);
    apply_fixes(&mut stream, &result.diagnostics);

    let result = lint.lint(&stream, &blocks);
    let codes: Vec<&str> = result.diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["NotAllowed"]);
}

#[test]
fn config_disables_rules_by_name() {
    let (stream, blocks) = fixture();
    let config =
        Config::parse("[rules.no-void-return]\nenabled = false").expect("Failed to parse config");
    let lint = Linter::builder()
        .rule(TestAnnotations::new())
        .function_rule(NoVoidReturn::new())
        .config(config)
        .build();

    let result = lint.lint(&stream, &blocks);
    assert!(!result.has_errors());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, "SingularCover");
}

#[test]
fn config_overrides_severity() {
    let (stream, blocks) = fixture();
    let config = Config::parse("[rules.test-annotations]\nseverity = \"info\"")
        .expect("Failed to parse config");
    let lint = Linter::builder()
        .rule(TestAnnotations::new())
        .config(config)
        .build();

    let result = lint.lint(&stream, &blocks);
    assert_eq!(result.by_severity(Severity::Info).len(), 1);
    assert!(!result.has_warnings());
}
