//! # testdoc-lint-rules
//!
//! Built-in lint rules for testdoc-lint.
//!
//! ## Available Rules
//!
//! | Name | Kind | Description |
//! |------|------|-------------|
//! | `test-annotations` | doc block | Validates PHPUnit annotation tags in doc comments |
//! | `no-void-return` | function | Forbids the `void` return-type hint |
//!
//! ## Usage
//!
//! ```ignore
//! use testdoc_lint_core::Linter;
//! use testdoc_lint_rules::{NoVoidReturn, TestAnnotations};
//!
//! let linter = Linter::builder()
//!     .rule(TestAnnotations::new())
//!     .function_rule(NoVoidReturn::new())
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod no_void_return;
mod test_annotations;

pub use no_void_return::NoVoidReturn;
pub use test_annotations::TestAnnotations;

use testdoc_lint_core::{DocBlockRuleBox, FunctionRuleBox};

/// Returns all built-in doc-block rules.
#[must_use]
pub fn all_doc_block_rules() -> Vec<DocBlockRuleBox> {
    vec![Box::new(TestAnnotations::new())]
}

/// Returns all built-in function rules.
#[must_use]
pub fn all_function_rules() -> Vec<FunctionRuleBox> {
    vec![Box::new(NoVoidReturn::new())]
}

/// Re-export core types for convenience.
pub use testdoc_lint_core::{Diagnostic, DocBlockRule, FunctionRule, Severity};
