// Content Overlay - Core Library
// Merges per-locale content rows onto a locale-independent schema tree

pub mod error;
pub mod resource;
pub mod schema;         // Shape side: schema nodes + tree flattening
pub mod entities;       // Localized output: category tree, forms, registries
pub mod shape;          // Row-count validators
pub mod merge;          // Dispatcher + tree mergers
pub mod align;          // Form aligner
pub mod slug;
pub mod config;
pub mod source;         // CSV / JSON content sources
pub mod pipeline;

// Re-export commonly used types
pub use error::{MergeError, MergeResult, NodeKind};
pub use resource::{Resource, Row};
pub use schema::{
    CategoryNode, CheckSlot, ChecklistNode, Component, DifficultyNode, DifficultyPath, FormNode,
    ItemNode, ItemSlot, ScreenSlot, SchemaTree, SubcategoryNode,
    load_schema, parse_schema,
};
pub use entities::{
    Category, CategoryRegistry, Check, Checklist, Difficulty, Form, FormInput, FormScreen,
    FormStore, Item, Subcategory,
};
pub use merge::ContentMerger;
pub use align::align_form;
pub use slug::split_slug;
pub use config::{Config, Policy};
pub use source::{detect_source, ContentBundle, ContentSource, CsvDirSource, JsonBundleSource};
pub use pipeline::{LocaleReport, NodeIssue, Output, Pipeline};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
