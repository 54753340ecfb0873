// 📥 Content Sources
// Where per-locale rows come from
//
// A source yields, for one locale, a bundle of resources keyed by slug.
// Slugs are decoded with `split_slug`; a node's path is encoded with
// `join_slug` and decoded the same way before lookup, so an id such as
// `home_network` is found under the slug `home___network`.

use crate::resource::{Resource, Row};
use crate::slug::{slug_key, split_slug};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::{Path, PathBuf};

// ============================================================================
// BUNDLE
// ============================================================================

/// Resources for one locale, keyed by decoded path
#[derive(Debug, Clone, Default)]
pub struct ContentBundle {
    resources: HashMap<Vec<String>, Resource>,
}

impl ContentBundle {
    pub fn new() -> Self {
        ContentBundle {
            resources: HashMap::new(),
        }
    }

    /// Insert under an encoded slug; returns the decoded path
    pub fn insert_slug(&mut self, slug: &str, res: Resource) -> Vec<String> {
        let path = split_slug(slug);
        self.resources.insert(path.clone(), res);
        path
    }

    /// Resource for a node path (as produced by `Component::path`)
    pub fn get(&self, path: &[String]) -> Option<&Resource> {
        self.resources.get(&slug_key(path))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

// ============================================================================
// SOURCE TRAIT
// ============================================================================

pub trait ContentSource {
    /// Load every resource available for `locale`
    fn load(&self, locale: &str) -> Result<ContentBundle>;

    /// Locales this source has content for, sorted
    fn locales(&self) -> Result<Vec<String>>;

    fn name(&self) -> &str;
}

/// Directory source: file → CSV tree, `.json` file → JSON bundle
pub fn detect_source(path: &Path) -> Result<Box<dyn ContentSource>> {
    if path.is_dir() {
        return Ok(Box::new(CsvDirSource::new(path)));
    }

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json && path.is_file() {
        return Ok(Box::new(JsonBundleSource::new(path)));
    }

    Err(anyhow::anyhow!(
        "Could not detect content source: {}",
        path.display()
    ))
}

// ============================================================================
// CSV DIRECTORY
// ============================================================================

/// `<root>/<locale>/<slug>.csv`
///
/// The header row names the fields. A record whose cells are all empty is a
/// placeholder row. Blank lines are ignored by the CSV reader, so in a
/// one-column file a placeholder must be written as `""`.
pub struct CsvDirSource {
    root: PathBuf,
}

impl CsvDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CsvDirSource { root: root.into() }
    }

    fn read_resource(path: &Path) -> Result<Resource> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header in {}", path.display()))?
            .clone();

        let mut rows = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            let record = result.with_context(|| {
                format!("Failed to parse CSV line {} in {}", line_num + 2, path.display())
            })?;

            if record.iter().all(|cell| cell.is_empty()) {
                rows.push(Row::placeholder());
            } else {
                rows.push(Row::from_pairs(headers.iter().zip(record.iter())));
            }
        }

        Ok(Resource::new(rows))
    }
}

impl ContentSource for CsvDirSource {
    fn load(&self, locale: &str) -> Result<ContentBundle> {
        let dir = self.root.join(locale);
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("No content for locale {}: {}", locale, dir.display()))?;

        let mut bundle = ContentBundle::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let res = Self::read_resource(&path)?;
            tracing::trace!(slug, rows = res.len(), "loaded csv resource");
            bundle.insert_slug(slug, res);
        }
        Ok(bundle)
    }

    fn locales(&self) -> Result<Vec<String>> {
        let mut locales = Vec::new();
        for entry in std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list {}", self.root.display()))?
        {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    locales.push(name.to_string());
                }
            }
        }
        locales.sort();
        Ok(locales)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

// ============================================================================
// JSON BUNDLE
// ============================================================================

/// One file: `{ "<locale>": { "<slug>": [row | null, ...] } }`
pub struct JsonBundleSource {
    path: PathBuf,
}

type JsonLocales = BTreeMap<String, BTreeMap<String, Resource>>;

impl JsonBundleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonBundleSource { path: path.into() }
    }

    fn read_all(&self) -> Result<JsonLocales> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open file: {}", self.path.display()))?;
        let locales: JsonLocales = serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("Invalid content bundle: {}", self.path.display()))?;
        Ok(locales)
    }
}

impl ContentSource for JsonBundleSource {
    fn load(&self, locale: &str) -> Result<ContentBundle> {
        let mut all = self.read_all()?;
        let resources = all.remove(locale).ok_or_else(|| {
            anyhow::anyhow!("No content for locale {} in {}", locale, self.path.display())
        })?;

        let mut bundle = ContentBundle::new();
        for (slug, res) in resources {
            bundle.insert_slug(&slug, res);
        }
        Ok(bundle)
    }

    fn locales(&self) -> Result<Vec<String>> {
        Ok(self.read_all()?.into_keys().collect())
    }

    fn name(&self) -> &str {
        "json"
    }
}
