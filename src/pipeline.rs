// 🚚 Pipeline - run a whole schema against one or more locales
//
// Components are merged in the order given (top-down for a flattened
// SchemaTree). What happens on a missing resource or a failed merge is
// decided by the config policies; the merger itself never retries.

use crate::config::{Config, Policy};
use crate::entities::{Category, Form};
use crate::merge::ContentMerger;
use crate::schema::Component;
use crate::slug::join_slug;
use crate::source::ContentSource;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIssue {
    pub kind: String,
    pub slug: String,
    pub message: String,
}

impl NodeIssue {
    fn new(component: &Component, message: impl Into<String>) -> Self {
        NodeIssue {
            kind: component.kind().to_string(),
            slug: join_slug(&component.path()),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleReport {
    pub locale: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub merged: usize,
    pub skipped: Vec<NodeIssue>,
    pub failures: Vec<NodeIssue>,
    /// The locale stopped early because a policy said abort
    pub aborted: bool,
}

impl LocaleReport {
    fn start(locale: &str) -> Self {
        let now = Utc::now();
        LocaleReport {
            locale: locale.to_string(),
            started_at: now,
            finished_at: now,
            merged: 0,
            skipped: Vec::new(),
            failures: Vec::new(),
            aborted: false,
        }
    }

    pub fn is_clean(&self) -> bool {
        !self.aborted && self.failures.is_empty() && self.skipped.is_empty()
    }
}

/// Everything produced by a run, ready to serialize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub categories: BTreeMap<String, Vec<Category>>,
    pub forms: BTreeMap<String, BTreeMap<String, Form>>,
}

// ============================================================================
// PIPELINE
// ============================================================================

pub struct Pipeline {
    merger: ContentMerger,
    source: Box<dyn ContentSource>,
    components: Vec<Component>,
}

impl Pipeline {
    pub fn new(config: Config, source: Box<dyn ContentSource>, components: Vec<Component>) -> Self {
        Pipeline {
            merger: ContentMerger::with_config(config),
            source,
            components,
        }
    }

    pub fn merger(&self) -> &ContentMerger {
        &self.merger
    }

    /// Locales to run when none are requested: whatever the source has
    pub fn available_locales(&self) -> Result<Vec<String>> {
        self.source.locales()
    }

    pub fn run(&mut self, locale: &str) -> Result<LocaleReport> {
        let bundle = self
            .source
            .load(locale)
            .with_context(|| format!("Failed to load {} content for {}", self.source.name(), locale))?;
        let config = self.merger.config().clone();
        let mut report = LocaleReport::start(locale);

        tracing::info!(locale, resources = bundle.len(), nodes = self.components.len(), "merging locale");

        for component in &self.components {
            let Some(res) = bundle.get(&component.path()) else {
                let issue = NodeIssue::new(component, "no content");
                tracing::warn!(locale, kind = %issue.kind, slug = %issue.slug, "missing resource");
                match config.on_missing_resource {
                    Policy::Skip => {
                        report.skipped.push(issue);
                        continue;
                    }
                    Policy::Abort => {
                        report.failures.push(issue);
                        report.aborted = true;
                        break;
                    }
                }
            };

            match self.merger.merge(component, res, locale) {
                Ok(()) => report.merged += 1,
                Err(e) => {
                    let issue = NodeIssue::new(component, e.to_string());
                    tracing::warn!(locale, kind = %issue.kind, slug = %issue.slug, error = %e, "merge failed");
                    report.failures.push(issue);
                    if config.on_error == Policy::Abort {
                        report.aborted = true;
                        break;
                    }
                }
            }
        }

        report.finished_at = Utc::now();
        tracing::info!(
            locale,
            merged = report.merged,
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            aborted = report.aborted,
            "locale done"
        );
        Ok(report)
    }

    pub fn run_all(&mut self, locales: &[String]) -> Result<Vec<LocaleReport>> {
        locales.iter().map(|l| self.run(l)).collect()
    }

    pub fn output(&self) -> Output {
        Output {
            categories: self.merger.categories(),
            forms: self.merger.forms().by_locale(),
        }
    }

    pub fn write_output(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.output())?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write output: {}", path.display()))?;
        Ok(())
    }
}
