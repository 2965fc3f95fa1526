//! Rule validating PHPUnit-style annotation tags in doc comments.
//!
//! # Checks
//!
//! For every tag in a doc block, in source order:
//!
//! - forbidden tags (`@test`, `@testdox`, ...) always warn and end processing
//!   of that tag;
//! - tags outside the known table are ignored (plain PHPDoc is not this
//!   rule's concern);
//! - a file-level block must be directly followed by a class declaration, a
//!   nested block must sit inside a class or trait, and an enclosing class
//!   must be named like a test class;
//! - deprecated spellings (`@cover`, `@small`, ...) get a fixable warning
//!   that rewrites the tag to its canonical form;
//! - most tags must be followed by description text;
//! - inside a structure, the function under the block must follow the tag's
//!   naming convention (`tearDown` hooks, `test*`/`provide*` methods).
//!
//! Every diagnostic this rule emits is a non-blocking warning.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use testdoc_lint_core::{
    Diagnostic, DocBlock, DocBlockRule, Fix, Location, Severity, TokenKind, TokenStream,
};

/// Rule name for test-annotations.
pub const NAME: &str = "test-annotations";

/// Class-name suffixes that mark a class as a test class.
const TEST_CLASS_SUFFIXES: [&str; 4] = ["Test", "TestCase", "TestBase", "Suite"];

/// Disposition of a single annotation tag.
enum TagRule {
    /// Permitted as-is.
    Allowed,
    /// Permitted, but a canonical spelling should be used instead.
    AllowedWithReplacement {
        replacement: &'static str,
        code: &'static str,
    },
    /// Never permitted.
    Forbidden,
    /// Never permitted, with a tag-specific hint.
    ForbiddenWithMessage(&'static str),
}

/// Naming convention for the function under an annotated block.
struct NamingRule {
    pattern: Regex,
    hint: &'static str,
    code: &'static str,
}

static TAG_RULES: Lazy<HashMap<&'static str, TagRule>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for tag in [
        "@after",
        "@afterClass",
        "@before",
        "@beforeClass",
        "@covers",
        "@coversDefaultClass",
        "@coversNothing",
        "@dataProvider",
        "@expectedException",
        "@expectedExceptionCode",
        "@expectedExceptionMessage",
        "@expectedExceptionMessageRegExp",
        "@group",
        "@requires",
        "@depends",
    ] {
        table.insert(tag, TagRule::Allowed);
    }

    table.insert(
        "@cover",
        TagRule::AllowedWithReplacement {
            replacement: "@covers",
            code: "SingularCover",
        },
    );
    table.insert(
        "@coverDefaultClass",
        TagRule::AllowedWithReplacement {
            replacement: "@coversDefaultClass",
            code: "SingularCoverDefaultClass",
        },
    );
    table.insert(
        "@coverNothing",
        TagRule::AllowedWithReplacement {
            replacement: "@coversNothing",
            code: "SingularCoverNothing",
        },
    );
    table.insert(
        "@small",
        TagRule::AllowedWithReplacement {
            replacement: "@group small",
            code: "GroupAliasSmall",
        },
    );
    table.insert(
        "@medium",
        TagRule::AllowedWithReplacement {
            replacement: "@group medium",
            code: "GroupAliasMedium",
        },
    );
    table.insert(
        "@large",
        TagRule::AllowedWithReplacement {
            replacement: "@group large",
            code: "GroupAliasLarge",
        },
    );

    table.insert(
        "@test",
        TagRule::ForbiddenWithMessage("prefix the function name with \"test\" instead"),
    );
    table.insert(
        "@testWith",
        TagRule::ForbiddenWithMessage("use @dataProvider instead"),
    );
    for tag in [
        "@doesNotPerformAssertions",
        "@testdox",
        "@backupGlobals",
        "@backupStaticAttributes",
        "@preserveGlobalState",
        "@runTestsInSeparateProcesses",
        "@runInSeparateProcess",
    ] {
        table.insert(tag, TagRule::Forbidden);
    }

    table
});

static EMPTY_ALLOWED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "@coversNothing",
        "@coverNothing",
        "@small",
        "@medium",
        "@large",
        "@after",
        "@afterClass",
        "@before",
        "@beforeClass",
    ]
    .into_iter()
    .collect()
});

#[allow(clippy::unwrap_used)] // patterns are fixed at design time
static NAMING_RULES: Lazy<HashMap<&'static str, NamingRule>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        "@after",
        NamingRule {
            pattern: Regex::new("TearDown$").unwrap(),
            hint: "tearDown functions (*TearDown)",
            code: "NotTearDown",
        },
    );
    table.insert(
        "@afterClass",
        NamingRule {
            pattern: Regex::new("TearDownAfterClass$").unwrap(),
            hint: "tearDownAfterClass functions (*TearDownAfterClass)",
            code: "NotTearDownAfterClass",
        },
    );
    table.insert(
        "@before",
        NamingRule {
            pattern: Regex::new("SetUp$").unwrap(),
            hint: "setUp functions (*SetUp)",
            code: "NotSetUp",
        },
    );
    table.insert(
        "@beforeClass",
        NamingRule {
            pattern: Regex::new("SetUpBeforeClass$").unwrap(),
            hint: "setUpBeforeClass functions (*SetUpBeforeClass)",
            code: "NotSetUpBeforeClass",
        },
    );
    table
});

#[allow(clippy::unwrap_used)] // pattern is fixed at design time
static DEFAULT_NAMING: Lazy<NamingRule> = Lazy::new(|| NamingRule {
    pattern: Regex::new("^(?:test|provide)|Provider$").unwrap(),
    hint: "test or data provider functions (test*, provide*, *Provider)",
    code: "NotTestFunction",
});

/// Derives a diagnostic code from a prefix and a tag name.
///
/// The tag's leading `@` is stripped and its first character title-cased, so
/// `("Empty", "@expectedException")` yields `EmptyExpectedException`.
fn dynamic_code(prefix: &str, tag: &str) -> String {
    let name = tag.trim_start_matches('@');
    let mut code = String::with_capacity(prefix.len() + name.len());
    code.push_str(prefix);
    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        code.extend(first.to_uppercase());
        code.push_str(chars.as_str());
    }
    code
}

fn is_test_class_name(name: &str) -> bool {
    TEST_CLASS_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

/// A declaration is adjacent when its keyword starts on the line directly
/// after the block's closing line.
fn is_adjacent(stream: &TokenStream, closer: usize, pos: usize) -> bool {
    match (stream.line_of(closer), stream.line_of(pos)) {
        (Some(closer_line), Some(line)) => line == closer_line + 1,
        _ => false,
    }
}

/// Validates PHPUnit-style annotation tags against the static rule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestAnnotations;

impl TestAnnotations {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn warning(
        &self,
        stream: &TokenStream,
        pos: usize,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Diagnostic {
        let location = stream.get(pos).map_or_else(
            || Location::new(stream.path().to_path_buf(), 0, 0),
            |token| Location::from_token(stream.path(), token),
        );
        Diagnostic::new(code, NAME, Severity::Warning, location, message)
    }

    /// Checks that the block sits in a scope where the tag is meaningful.
    ///
    /// Returns the diagnostic that ends processing of this tag, or `None`
    /// when the scope is acceptable. Traits bypass the test-class gate.
    fn check_placement(
        &self,
        stream: &TokenStream,
        block: &DocBlock,
        tag_pos: usize,
    ) -> Option<Diagnostic> {
        let tag = stream
            .get(tag_pos)
            .map(|t| t.text.as_str())
            .unwrap_or_default();

        let structure = if block.level == 0 {
            let adjacent = stream
                .find_next(TokenKind::Class, block.closer + 1, None)
                .filter(|&pos| is_adjacent(stream, block.closer, pos));
            match adjacent {
                Some(pos) => pos,
                None => {
                    return Some(self.warning(
                        stream,
                        tag_pos,
                        "NotClass",
                        format!("Annotation {tag} should only be used in class level comments"),
                    ))
                }
            }
        } else {
            let enclosing = block.enclosing.iter().rev().copied().find(|&pos| {
                matches!(
                    stream.get(pos).map(|t| t.kind),
                    Some(TokenKind::Class | TokenKind::Trait)
                )
            });
            match enclosing {
                Some(pos) => pos,
                None => {
                    return Some(self.warning(
                        stream,
                        tag_pos,
                        "NotInClassTrait",
                        format!("Annotation {tag} should only be used inside a class or trait"),
                    ))
                }
            }
        };

        if stream.get(structure).map(|t| t.kind) == Some(TokenKind::Class) {
            let name = stream.declaration_name(structure).unwrap_or_default();
            if !is_test_class_name(name) {
                return Some(self.warning(
                    stream,
                    tag_pos,
                    "NotTestClass",
                    format!(
                        "Annotation {tag} should only be used in test classes \
                         (name ending in Test, TestCase, TestBase, or Suite)"
                    ),
                ));
            }
        }

        None
    }
}

impl DocBlockRule for TestAnnotations {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Validates PHPUnit annotation tags in doc comments"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, stream: &TokenStream, block: &DocBlock) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for &tag_pos in &block.tags {
            let Some(token) = stream.get(tag_pos) else {
                continue;
            };
            let tag = token.text.as_str();

            let Some(rule) = TAG_RULES.get(tag) else {
                continue;
            };

            match rule {
                TagRule::Forbidden => {
                    diagnostics.push(self.warning(
                        stream,
                        tag_pos,
                        dynamic_code("Forbidden", tag),
                        format!("Annotation {tag} is not allowed"),
                    ));
                    continue;
                }
                TagRule::ForbiddenWithMessage(hint) => {
                    diagnostics.push(self.warning(
                        stream,
                        tag_pos,
                        dynamic_code("Forbidden", tag),
                        format!("Annotation {tag} is not allowed; {hint}"),
                    ));
                    continue;
                }
                TagRule::Allowed | TagRule::AllowedWithReplacement { .. } => {}
            }

            if let Some(diagnostic) = self.check_placement(stream, block, tag_pos) {
                diagnostics.push(diagnostic);
                continue;
            }

            if let TagRule::AllowedWithReplacement { replacement, code } = rule {
                diagnostics.push(
                    self.warning(
                        stream,
                        tag_pos,
                        *code,
                        format!("Use {replacement} instead of {tag}"),
                    )
                    .with_fix(Fix::new(tag_pos, *replacement)),
                );
            }

            if !EMPTY_ALLOWED.contains(tag) {
                let next = stream.next_in_comment(tag_pos + 1, block.closer);
                let has_text = next.is_some_and(|pos| {
                    stream.get(pos).map(|t| t.kind) == Some(TokenKind::DocCommentString)
                });
                if !has_text {
                    diagnostics.push(self.warning(
                        stream,
                        tag_pos,
                        dynamic_code("Empty", tag),
                        format!("Annotation {tag} must be followed by text"),
                    ));
                }
            }

            if block.level > 0 {
                let constraint = NAMING_RULES.get(tag).unwrap_or(&*DEFAULT_NAMING);
                let function = stream
                    .find_next(TokenKind::Function, block.closer + 1, None)
                    .filter(|&pos| is_adjacent(stream, block.closer, pos));
                let name_ok = function
                    .and_then(|pos| stream.declaration_name(pos))
                    .is_some_and(|name| constraint.pattern.is_match(name));
                if !name_ok {
                    diagnostics.push(self.warning(
                        stream,
                        tag_pos,
                        constraint.code,
                        format!("Annotation {tag} should only be used for {}", constraint.hint),
                    ));
                }
            }
        }

        diagnostics
    }
}
