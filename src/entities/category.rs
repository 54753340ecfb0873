// 🏷️ Localized Category Tree
//
// Category → Subcategory → Difficulty → Items (+ at most one Checklist)
//
// Ownership is forward-only: a parent owns its children, children carry no
// back-reference. A Category is created empty and filled in by later merges.

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub order: i32,
    pub name: String,
    pub locale: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        order: i32,
        name: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Category {
            id: id.into(),
            order,
            name: name.into(),
            locale: locale.into(),
            subcategories: Vec::new(),
        }
    }

    /// Insert keeping subcategories sorted by `order` (stable for ties)
    pub fn add(&mut self, sub: Subcategory) {
        let pos = self.subcategories.partition_point(|s| s.order <= sub.order);
        self.subcategories.insert(pos, sub);
    }

    /// First subcategory with this id
    pub fn sub(&self, id: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }

    pub fn sub_mut(&mut self, id: &str) -> Option<&mut Subcategory> {
        self.subcategories.iter_mut().find(|s| s.id == id)
    }
}

// ============================================================================
// SUBCATEGORY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub order: i32,
    pub name: String,
    #[serde(default)]
    pub difficulties: Vec<Difficulty>,
}

impl Subcategory {
    pub fn new(id: impl Into<String>, order: i32, name: impl Into<String>) -> Self {
        Subcategory {
            id: id.into(),
            order,
            name: name.into(),
            difficulties: Vec::new(),
        }
    }

    /// Difficulties are unordered; appended as merged
    pub fn add_difficulty(&mut self, dif: Difficulty) {
        self.difficulties.push(dif);
    }

    pub fn difficulty(&self, id: &str) -> Option<&Difficulty> {
        self.difficulties.iter().find(|d| d.id == id)
    }

    pub fn difficulty_mut(&mut self, id: &str) -> Option<&mut Difficulty> {
        self.difficulties.iter_mut().find(|d| d.id == id)
    }
}

// ============================================================================
// DIFFICULTY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Checklist>,
}

impl Difficulty {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Difficulty {
            id: id.into(),
            description: description.into(),
            items: Vec::new(),
            checklist: None,
        }
    }

    /// Insert keeping items sorted by `order` (stable for ties)
    pub fn add_item(&mut self, item: Item) {
        let pos = self.items.partition_point(|i| i.order <= item.order);
        self.items.insert(pos, item);
    }

    /// Replaces any previous checklist
    pub fn set_checks(&mut self, checks: Checklist) {
        self.checklist = Some(checks);
    }
}

// ============================================================================
// ITEM & CHECKLIST
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub order: i32,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub text: String,
    #[serde(rename = "noCheck")]
    pub no_check: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub checks: Vec<Check>,
}

impl Checklist {
    pub fn new() -> Self {
        Checklist { checks: Vec::new() }
    }

    pub fn add(&mut self, check: Check) {
        self.checks.push(check);
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
