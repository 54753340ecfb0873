// 🗂️ Category Registry & Form Store
//
// Categories: insertion-ordered list + (id, locale) index.
// Registering the same key twice keeps both entries; the index points at the
// newest one. No de-duplication happens here.

use super::category::Category;
use super::form::Form;
use std::collections::{BTreeMap, HashMap};

type Key = (String, String);

fn key(id: &str, locale: &str) -> Key {
    (id.to_string(), locale.to_string())
}

// ============================================================================
// CATEGORY REGISTRY
// ============================================================================

#[derive(Debug, Default)]
pub struct CategoryRegistry {
    index: HashMap<Key, usize>,
    list: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        CategoryRegistry {
            index: HashMap::new(),
            list: Vec::new(),
        }
    }

    /// Append a category (never replaces)
    pub fn register(&mut self, category: Category) {
        self.index
            .insert(key(&category.id, &category.locale), self.list.len());
        self.list.push(category);
    }

    pub fn get(&self, id: &str, locale: &str) -> Option<&Category> {
        self.index
            .get(&key(id, locale))
            .and_then(|&idx| self.list.get(idx))
    }

    pub fn get_mut(&mut self, id: &str, locale: &str) -> Option<&mut Category> {
        let idx = *self.index.get(&key(id, locale))?;
        self.list.get_mut(idx)
    }

    /// Every registered entry, in registration order (duplicates included)
    pub fn entries(&self) -> &[Category] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Locale → categories in registration order
    pub fn categories(&self) -> BTreeMap<String, Vec<Category>> {
        let mut res: BTreeMap<String, Vec<Category>> = BTreeMap::new();
        for cat in &self.list {
            res.entry(cat.locale.clone()).or_default().push(cat.clone());
        }
        res
    }
}

// ============================================================================
// FORM STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct FormStore {
    forms: HashMap<Key, Form>,
}

impl FormStore {
    pub fn new() -> Self {
        FormStore {
            forms: HashMap::new(),
        }
    }

    /// Store a form, replacing any previous value for (id, locale)
    pub fn insert(&mut self, form: Form) -> Option<Form> {
        self.forms.insert(key(&form.id, &form.locale), form)
    }

    pub fn get(&self, id: &str, locale: &str) -> Option<&Form> {
        self.forms.get(&key(id, locale))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Locale → form id → form
    pub fn by_locale(&self) -> BTreeMap<String, BTreeMap<String, Form>> {
        let mut res: BTreeMap<String, BTreeMap<String, Form>> = BTreeMap::new();
        for ((id, locale), form) in &self.forms {
            res.entry(locale.clone())
                .or_default()
                .insert(id.clone(), form.clone());
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_grouped_by_locale_in_registration_order() {
        let mut registry = CategoryRegistry::new();
        registry.register(Category::new("b", 2, "B", "en"));
        registry.register(Category::new("a", 1, "A", "en"));
        registry.register(Category::new("a", 1, "A-it", "it"));

        let grouped = registry.categories();
        assert_eq!(grouped.len(), 2);
        let en: Vec<&str> = grouped["en"].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(en, vec!["b", "a"]);
        assert_eq!(grouped["it"][0].name, "A-it");
    }

    #[test]
    fn test_lookup_is_scoped_by_locale() {
        let mut registry = CategoryRegistry::new();
        registry.register(Category::new("safety", 1, "Safety", "en"));

        assert!(registry.get("safety", "en").is_some());
        assert!(registry.get("safety", "fr").is_none());
        assert!(registry.get("privacy", "en").is_none());
    }

    #[test]
    fn test_duplicate_register_keeps_both_and_indexes_newest() {
        let mut registry = CategoryRegistry::new();
        registry.register(Category::new("safety", 1, "Old", "en"));
        registry.register(Category::new("safety", 1, "New", "en"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("safety", "en").unwrap().name, "New");
        assert_eq!(registry.categories()["en"].len(), 2);
    }

    #[test]
    fn test_form_store_replaces() {
        let mut store = FormStore::new();
        assert!(store.insert(Form::new("signup", "Sign up", "en")).is_none());
        let previous = store.insert(Form::new("signup", "Register", "en"));

        assert_eq!(previous.unwrap().name, "Sign up");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("signup", "en").unwrap().name, "Register");
        assert!(store.get("signup", "it").is_none());
    }
}
