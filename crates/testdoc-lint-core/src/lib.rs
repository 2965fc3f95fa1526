//! # testdoc-lint-core
//!
//! Core framework for doc-comment annotation linting over PHP token streams.
//!
//! Tokenization, file traversal, and diagnostic presentation belong to an
//! external host analysis engine. This crate provides the pieces the host
//! plugs rules into:
//!
//! - [`TokenStream`] and [`DocBlock`] - the host-materialized token model
//! - [`DocBlockRule`] and [`FunctionRule`] traits for implementing rules
//! - [`Linter`] for orchestrating rule execution over one stream
//! - [`Diagnostic`] and [`Fix`] for representing findings and repairs
//!
//! ## Example
//!
//! ```ignore
//! use testdoc_lint_core::Linter;
//!
//! let linter = Linter::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! let result = linter.lint(&stream, &blocks);
//! result.print_report();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod linter;
mod rule;
mod token;
mod types;

pub use builder::TokenStreamBuilder;
pub use config::{Config, ConfigError, RuleConfig};
pub use linter::{Linter, LinterBuilder};
pub use rule::{DocBlockRule, DocBlockRuleBox, FunctionRule, FunctionRuleBox};
pub use token::{DocBlock, Token, TokenKind, TokenStream};
pub use types::{
    apply_fixes, Diagnostic, DiagnosticReport, Fix, LintResult, Location, Severity,
};
