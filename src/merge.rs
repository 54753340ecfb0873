// 🔀 Content Merger - Dispatcher + Tree Mergers
//
// One call = one schema node + its rows for one locale. Each call either
// extends the category registry / form store or fails without touching them.
//
// Callers must merge top-down (category before its subcategories, and so on)
// and must not share a merger between threads.

use crate::align::align_form;
use crate::config::Config;
use crate::entities::{
    Category, CategoryRegistry, Check, Checklist, Difficulty, Form, FormStore, Item, Subcategory,
};
use crate::error::{MergeError, MergeResult, NodeKind};
use crate::resource::{Resource, Row};
use crate::schema::{
    CategoryNode, ChecklistNode, Component, DifficultyNode, DifficultyPath, FormNode, ItemNode,
    SubcategoryNode,
};
use crate::shape;
use std::collections::BTreeMap;

/// Row fields read by the tree mergers
pub mod fields {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
    pub const TEXT: &str = "text";
}

#[derive(Debug, Default)]
pub struct ContentMerger {
    config: Config,
    categories: CategoryRegistry,
    forms: FormStore,
}

impl ContentMerger {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        ContentMerger {
            config,
            categories: CategoryRegistry::new(),
            forms: FormStore::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========================================================================
    // DISPATCHER
    // ========================================================================

    /// Merge one schema node with its rows for `locale`
    pub fn merge(&mut self, component: &Component, res: &Resource, locale: &str) -> MergeResult {
        let result = match component {
            Component::Form(f) => self.merge_form(f, res, locale),
            Component::Category(c) => self.merge_category(c, res, locale),
            Component::Subcategory(s) => self.merge_subcategory(s, res, locale),
            Component::Difficulty(d) => self.merge_difficulty(d, res, locale),
            Component::Item(i) => self.merge_item(i, res, locale),
            Component::Checklist(c) => self.merge_checklist(c, res, locale),
        };

        if let Err(e) = &result {
            tracing::debug!(kind = %component.kind(), locale, error = %e, "merge rejected");
        } else {
            tracing::trace!(kind = %component.kind(), locale, rows = res.len(), "merged");
        }
        result
    }

    // ========================================================================
    // TREE MERGERS
    // ========================================================================

    pub fn merge_category(&mut self, c: &CategoryNode, res: &Resource, locale: &str) -> MergeResult {
        let row = shape::exactly_one(NodeKind::Category, &c.id, res.rows())?;
        self.categories.register(Category::new(
            &c.id,
            c.order,
            row.get(fields::NAME),
            locale,
        ));
        Ok(())
    }

    pub fn merge_subcategory(
        &mut self,
        s: &SubcategoryNode,
        res: &Resource,
        locale: &str,
    ) -> MergeResult {
        let cat = self
            .categories
            .get_mut(&s.category, locale)
            .ok_or_else(|| MergeError::not_found(NodeKind::Category, &s.category, locale))?;
        let row = shape::exactly_one(NodeKind::Subcategory, &s.id, res.rows())?;
        cat.add(Subcategory::new(&s.id, s.order, row.get(fields::NAME)));
        Ok(())
    }

    pub fn merge_difficulty(
        &mut self,
        d: &DifficultyNode,
        res: &Resource,
        locale: &str,
    ) -> MergeResult {
        let sub = resolve_subcategory(&mut self.categories, &d.category, &d.subcategory, locale)?;
        let row = shape::exactly_one(NodeKind::Difficulty, &d.id, res.rows())?;
        sub.add_difficulty(Difficulty::new(&d.id, row.get(fields::DESCRIPTION)));
        Ok(())
    }

    pub fn merge_item(&mut self, i: &ItemNode, res: &Resource, locale: &str) -> MergeResult {
        let dif = resolve_difficulty(&mut self.categories, &i.parent, locale)?;
        let item = build_item(i, res.rows(), &self.config.paragraph_separator)?;
        dif.add_item(item);
        Ok(())
    }

    pub fn merge_checklist(
        &mut self,
        c: &ChecklistNode,
        res: &Resource,
        locale: &str,
    ) -> MergeResult {
        let dif = resolve_difficulty(&mut self.categories, &c.parent, locale)?;

        let rows = res.without_leading_placeholders();
        shape::exact_count(NodeKind::Checklist, &c.parent.difficulty, rows, c.checks.len())?;

        let mut checks = Checklist::new();
        for (row, slot) in rows.iter().zip(&c.checks) {
            checks.add(Check {
                text: row.get(fields::TEXT).trim().to_string(),
                no_check: slot.no_check,
            });
        }
        dif.set_checks(checks);
        Ok(())
    }

    pub fn merge_form(&mut self, f: &FormNode, res: &Resource, locale: &str) -> MergeResult {
        let form = align_form(f, res, locale, &self.config.options_delimiter)?;
        self.forms.insert(form);
        Ok(())
    }

    // ========================================================================
    // OUTPUT
    // ========================================================================

    /// Locale → root categories in registration order
    pub fn categories(&self) -> BTreeMap<String, Vec<Category>> {
        self.categories.categories()
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn form(&self, id: &str, locale: &str) -> Option<&Form> {
        self.forms.get(id, locale)
    }

    pub fn forms(&self) -> &FormStore {
        &self.forms
    }
}

// ============================================================================
// ANCESTOR RESOLUTION
// ============================================================================

fn resolve_subcategory<'a>(
    categories: &'a mut CategoryRegistry,
    category: &str,
    subcategory: &str,
    locale: &str,
) -> MergeResult<&'a mut Subcategory> {
    categories
        .get_mut(category, locale)
        .ok_or_else(|| MergeError::not_found(NodeKind::Category, category, locale))?
        .sub_mut(subcategory)
        .ok_or_else(|| MergeError::not_found(NodeKind::Subcategory, subcategory, locale))
}

fn resolve_difficulty<'a>(
    categories: &'a mut CategoryRegistry,
    path: &DifficultyPath,
    locale: &str,
) -> MergeResult<&'a mut Difficulty> {
    resolve_subcategory(categories, &path.category, &path.subcategory, locale)?
        .difficulty_mut(&path.difficulty)
        .ok_or_else(|| MergeError::not_found(NodeKind::Difficulty, &path.difficulty, locale))
}

// ============================================================================
// ITEM BODY
// ============================================================================

/// Title from the first row; body either legacy (first row only) or the
/// paragraphs of every following row
fn build_item(node: &ItemNode, rows: &[Row], separator: &str) -> MergeResult<Item> {
    let first = shape::at_least_one(NodeKind::Item, &node.id, rows)?;

    let legacy = first.get(fields::BODY);
    let body = if !legacy.is_empty() {
        if rows.len() != 1 {
            return Err(MergeError::shape(
                NodeKind::Item,
                &node.id,
                format!("invalid legacy item: body in title row plus {} rows", rows.len() - 1),
            ));
        }
        legacy.trim().to_string()
    } else {
        let mut body = String::new();
        for row in &rows[1..] {
            if !body.is_empty() {
                body.push_str(separator);
            }
            body.push_str(row.get(fields::BODY).trim());
        }
        body
    };

    Ok(Item {
        id: node.id.clone(),
        order: node.order,
        title: first.get(fields::TITLE).trim().to_string(),
        body,
    })
}
