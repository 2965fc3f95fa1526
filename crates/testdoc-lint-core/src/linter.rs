//! Linter driver orchestrating rule execution over one token stream.

use crate::config::Config;
use crate::rule::{DocBlockRule, DocBlockRuleBox, FunctionRule, FunctionRuleBox};
use crate::token::{DocBlock, TokenStream};
use crate::types::{Diagnostic, LintResult};

use tracing::{debug, info};

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    doc_block_rules: Vec<DocBlockRuleBox>,
    function_rules: Vec<FunctionRuleBox>,
    config: Option<Config>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a doc-block rule to the linter.
    #[must_use]
    pub fn rule<R: DocBlockRule + 'static>(mut self, rule: R) -> Self {
        self.doc_block_rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed doc-block rule to the linter.
    #[must_use]
    pub fn rule_box(mut self, rule: DocBlockRuleBox) -> Self {
        self.doc_block_rules.push(rule);
        self
    }

    /// Adds a function rule to the linter.
    #[must_use]
    pub fn function_rule<R: FunctionRule + 'static>(mut self, rule: R) -> Self {
        self.function_rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed function rule to the linter.
    #[must_use]
    pub fn function_rule_box(mut self, rule: FunctionRuleBox) -> Self {
        self.function_rules.push(rule);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the linter.
    #[must_use]
    pub fn build(self) -> Linter {
        Linter {
            doc_block_rules: self.doc_block_rules,
            function_rules: self.function_rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// The linter that runs registered rules over a token stream.
///
/// Use [`Linter::builder()`] to construct an instance. One call to
/// [`lint`](Linter::lint) covers one file; the host loops over files and
/// merges results with [`LintResult::extend`]. Linting never fails: every
/// condition a rule detects degrades to a diagnostic, so the only fallible
/// step in the whole pipeline is configuration loading.
pub struct Linter {
    doc_block_rules: Vec<DocBlockRuleBox>,
    function_rules: Vec<FunctionRuleBox>,
    config: Config,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.doc_block_rules.len() + self.function_rules.len()
    }

    /// Lints one token stream and its doc blocks, returning the results.
    #[must_use]
    pub fn lint(&self, stream: &TokenStream, blocks: &[DocBlock]) -> LintResult {
        info!("Linting {:?}", stream.path());

        let mut result = LintResult::new();

        for block in blocks {
            debug!(
                "Checking doc block at tokens {}..{}",
                block.opener, block.closer
            );
            for rule in &self.doc_block_rules {
                if !self.config.is_rule_enabled(rule.name()) {
                    debug!("Skipping disabled rule: {}", rule.name());
                    continue;
                }

                let diagnostics = rule.check(stream, block);
                let diagnostics = self.apply_severity_override(rule.name(), diagnostics);
                result.diagnostics.extend(diagnostics);
            }
        }

        for pos in stream.functions() {
            for rule in &self.function_rules {
                if !self.config.is_rule_enabled(rule.name()) {
                    debug!("Skipping disabled rule: {}", rule.name());
                    continue;
                }

                let diagnostics = rule.check(stream, pos);
                let diagnostics = self.apply_severity_override(rule.name(), diagnostics);
                result.diagnostics.extend(diagnostics);
            }
        }

        result.files_checked = 1;

        // Sort diagnostics by line, then column
        result.diagnostics.sort_by(|a, b| {
            a.location
                .line
                .cmp(&b.location.line)
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Lint complete: {} diagnostic(s) in {:?}",
            result.diagnostics.len(),
            stream.path()
        );

        result
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Vec<Diagnostic> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for d in &mut diagnostics {
                d.severity = severity;
            }
        }
        diagnostics
    }
}
