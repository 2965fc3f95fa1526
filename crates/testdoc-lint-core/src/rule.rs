//! Rule traits for defining lint rules.

use crate::token::{DocBlock, TokenStream};
use crate::types::{Diagnostic, Severity};

/// A lint rule invoked once per documentation-comment block.
///
/// Implement this trait for rules that inspect annotation tags and their
/// token neighborhood. The host drives tokenization and traversal; the rule
/// only decides which diagnostics a given block yields.
///
/// # Example
///
/// ```ignore
/// use testdoc_lint_core::{Diagnostic, DocBlock, DocBlockRule, TokenStream};
///
/// pub struct NoEmptyBlocks;
///
/// impl DocBlockRule for NoEmptyBlocks {
///     fn name(&self) -> &'static str { "no-empty-blocks" }
///
///     fn check(&self, stream: &TokenStream, block: &DocBlock) -> Vec<Diagnostic> {
///         if block.tags.is_empty() { /* ... */ }
///         Vec::new()
///     }
/// }
/// ```
pub trait DocBlockRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "test-annotations").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Checks a single documentation-comment block.
    ///
    /// # Arguments
    ///
    /// * `stream` - The file's token stream
    /// * `block` - The doc block under inspection, with host-derived metadata
    ///
    /// # Returns
    ///
    /// A vector of diagnostics found in this block.
    fn check(&self, stream: &TokenStream, block: &DocBlock) -> Vec<Diagnostic>;
}

/// Type alias for boxed `DocBlockRule` trait objects.
pub type DocBlockRuleBox = Box<dyn DocBlockRule>;

/// A lint rule invoked once per function-like declaration.
///
/// Implement this trait for rules that inspect a declaration rather than a
/// documentation comment, such as return-type checks.
pub trait FunctionRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-void-return").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single function declaration.
    ///
    /// # Arguments
    ///
    /// * `stream` - The file's token stream
    /// * `pos` - Position of the function keyword token
    ///
    /// # Returns
    ///
    /// A vector of diagnostics found at this declaration.
    fn check(&self, stream: &TokenStream, pos: usize) -> Vec<Diagnostic>;
}

/// Type alias for boxed `FunctionRule` trait objects.
pub type FunctionRuleBox = Box<dyn FunctionRule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use crate::types::Location;

    struct TestRule;

    impl DocBlockRule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, stream: &TokenStream, block: &DocBlock) -> Vec<Diagnostic> {
            vec![Diagnostic::new(
                "TestCode",
                self.name(),
                self.default_severity(),
                Location::new(stream.path().to_path_buf(), block.opener, 1),
                "Test diagnostic",
            )]
        }
    }

    #[test]
    fn doc_block_rule_defaults() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.default_severity(), Severity::Warning);

        let stream = TokenStream::new("Example.php", Vec::<Token>::new());
        let block = DocBlock::new(0, 0, 0);
        assert_eq!(rule.check(&stream, &block).len(), 1);
    }
}
