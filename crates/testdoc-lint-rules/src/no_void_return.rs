//! Rule rejecting the `void` return-type hint.
//!
//! Every function-like declaration with a declared return type of exactly
//! `void` gets one blocking error. There is no further logic.

use testdoc_lint_core::{Diagnostic, FunctionRule, Location, Severity, TokenStream};

/// Rule name for no-void-return.
pub const NAME: &str = "no-void-return";

/// Forbids the `void` return-type hint on function declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVoidReturn;

impl NoVoidReturn {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FunctionRule for NoVoidReturn {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids the void return-type hint on function declarations"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, stream: &TokenStream, pos: usize) -> Vec<Diagnostic> {
        let Some(hint_pos) = stream.return_type_of(pos) else {
            return Vec::new();
        };
        let Some(hint) = stream.get(hint_pos) else {
            return Vec::new();
        };

        if hint.text != "void" {
            return Vec::new();
        }

        vec![Diagnostic::new(
            "NotAllowed",
            NAME,
            Severity::Error,
            Location::from_token(stream.path(), hint),
            "void return type is not allowed",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testdoc_lint_core::TokenStreamBuilder;

    fn check_all(stream: &TokenStream) -> Vec<Diagnostic> {
        let rule = NoVoidReturn::new();
        stream
            .functions()
            .into_iter()
            .flat_map(|pos| rule.check(stream, pos))
            .collect()
    }

    #[test]
    fn detects_void_hint() {
        let (stream, _) = TokenStreamBuilder::new("Foo.php")
            .function("reset")
            .return_type("void")
            .finish();

        let diagnostics = check_all(&stream);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "NotAllowed");
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn allows_other_hints() {
        let (stream, _) = TokenStreamBuilder::new("Foo.php")
            .function("count")
            .return_type("int")
            .finish();

        assert!(check_all(&stream).is_empty());
    }

    #[test]
    fn allows_missing_hint() {
        let (stream, _) = TokenStreamBuilder::new("Foo.php")
            .function("legacy")
            .finish();

        assert!(check_all(&stream).is_empty());
    }

    #[test]
    fn does_not_borrow_hint_from_next_function() {
        let (stream, _) = TokenStreamBuilder::new("Foo.php")
            .function("first")
            .newline()
            .function("second")
            .return_type("void")
            .finish();

        let diagnostics = check_all(&stream);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.line, 2);
    }
}
