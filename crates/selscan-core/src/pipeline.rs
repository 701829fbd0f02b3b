use anyhow::{Context, Result};

use crate::config::Config;
use crate::decompose::Decomposer;
use crate::diagnostics::Diagnostics;
use crate::filter;
use crate::order;
use crate::parser::{SelectorParser, StylesheetParser};
use crate::report::{Inventory, Report, SimpleBuckets};
use crate::walker::RuleWalker;

/// Normalized run options. Resolved once from the configuration surface;
/// nothing downstream inspects shapes.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub include: Vec<String>,
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        Self {
            include: config.report.include.normalize(),
        }
    }
}

/// The whole extraction run: walk, dedup/order, decompose, classify,
/// aggregate, filter. One instance can serve any number of runs; each run
/// builds its accumulations from scratch and returns its report directly.
pub struct ExtractionPipeline {
    stylesheet_parser: Box<dyn StylesheetParser>,
    selector_parser: Box<dyn SelectorParser>,
    walker: RuleWalker,
    options: Options,
}

impl ExtractionPipeline {
    pub fn new(
        stylesheet_parser: Box<dyn StylesheetParser>,
        selector_parser: Box<dyn SelectorParser>,
        options: Options,
    ) -> Self {
        Self {
            stylesheet_parser,
            selector_parser,
            walker: RuleWalker::new(),
            options,
        }
    }

    /// Parse stylesheet text and run the pipeline over it.
    pub fn run(&self, css: &str, diag: &mut Diagnostics) -> Result<Report> {
        let stylesheet = self
            .stylesheet_parser
            .parse(css)
            .context("failed to parse stylesheet")?;
        self.run_on_stylesheet(&stylesheet, diag)
    }

    /// Run the pipeline over an already parsed stylesheet.
    pub fn run_on_stylesheet(
        &self,
        stylesheet: &crate::types::Stylesheet,
        diag: &mut Diagnostics,
    ) -> Result<Report> {
        let accumulated = self.walker.collect(stylesheet);

        // Nothing to classify: warn once and short-circuit with the empty
        // report, skipping decomposition and filtering entirely.
        if accumulated.is_empty() {
            diag.warn(
                "Failed to find any selectors at all in the source files you provided. \
                 You are going to get an empty selector list.",
            );
            return Ok(Report::empty());
        }

        let selectors = order::sort_unique(accumulated);

        let decomposer = Decomposer::new(self.selector_parser.as_ref());
        let mut buckets = SimpleBuckets::default();
        for selector in &selectors {
            decomposer
                .decompose_into(selector, &mut buckets)
                .with_context(|| format!("failed to parse selector '{selector}'"))?;
        }

        let inventory = Inventory {
            selectors,
            simple: buckets.sort_unique(),
        };
        Ok(filter::apply(&inventory, &self.options.include, diag))
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}
