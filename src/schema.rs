// 📐 Shape Layer - Schema Nodes
// Locale-independent structure that content rows are overlaid onto
//
// Nodes are read-only templates. Ancestors are referenced by id, never by
// pointer: resolving a parent always goes through the registry.

use crate::error::{MergeError, NodeKind};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// TREE NODES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryNode {
    pub id: String,
    #[serde(default)]
    pub order: i32,
    /// Parent category id
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyNode {
    pub id: String,
    pub category: String,
    pub subcategory: String,
}

/// Full ancestor chain of anything hanging off a difficulty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyPath {
    pub category: String,
    pub subcategory: String,
    pub difficulty: String,
}

impl DifficultyPath {
    pub fn new(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        DifficultyPath {
            category: category.into(),
            subcategory: subcategory.into(),
            difficulty: difficulty.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemNode {
    pub id: String,
    #[serde(default)]
    pub order: i32,
    pub parent: DifficultyPath,
}

/// Shape of one expected check; the text comes from content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSlot {
    #[serde(default, rename = "noCheck", alias = "no_check")]
    pub no_check: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistNode {
    pub parent: DifficultyPath,
    #[serde(default)]
    pub checks: Vec<CheckSlot>,
}

// ============================================================================
// FORM NODES
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSlot {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl ItemSlot {
    /// A slot with no label, hint or options consumes no content row
    pub fn is_placeholder(&self) -> bool {
        self.label.is_empty() && self.hint.is_empty() && self.options.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSlot {
    /// Empty name = anonymous screen without a header row
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormNode {
    pub id: String,
    #[serde(default)]
    pub screens: Vec<ScreenSlot>,
}

// ============================================================================
// COMPONENT (dispatch variant)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Form(FormNode),
    Category(CategoryNode),
    Subcategory(SubcategoryNode),
    Difficulty(DifficultyNode),
    Item(ItemNode),
    Checklist(ChecklistNode),
}

/// Segment used in a checklist's path in place of an id
pub const CHECKLIST_SEGMENT: &str = "checklist";

/// Leading segment of every form path
pub const FORM_SEGMENT: &str = "form";

impl Component {
    pub fn kind(&self) -> NodeKind {
        match self {
            Component::Form(_) => NodeKind::Form,
            Component::Category(_) => NodeKind::Category,
            Component::Subcategory(_) => NodeKind::Subcategory,
            Component::Difficulty(_) => NodeKind::Difficulty,
            Component::Item(_) => NodeKind::Item,
            Component::Checklist(_) => NodeKind::Checklist,
        }
    }

    /// Hierarchical path used to key this node's content
    pub fn path(&self) -> Vec<String> {
        match self {
            Component::Form(f) => vec![FORM_SEGMENT.to_string(), f.id.clone()],
            Component::Category(c) => vec![c.id.clone()],
            Component::Subcategory(s) => vec![s.category.clone(), s.id.clone()],
            Component::Difficulty(d) => {
                vec![d.category.clone(), d.subcategory.clone(), d.id.clone()]
            }
            Component::Item(i) => vec![
                i.parent.category.clone(),
                i.parent.subcategory.clone(),
                i.parent.difficulty.clone(),
                i.id.clone(),
            ],
            Component::Checklist(c) => vec![
                c.parent.category.clone(),
                c.parent.subcategory.clone(),
                c.parent.difficulty.clone(),
                CHECKLIST_SEGMENT.to_string(),
            ],
        }
    }

    /// Decode a component tagged with a `kind` field
    ///
    /// Unknown kinds fail with `MergeError::UnsupportedVariant`, which can be
    /// recovered with `downcast_ref`.
    pub fn from_value(mut value: serde_json::Value) -> Result<Component> {
        let kind = value
            .as_object_mut()
            .and_then(|o| o.remove("kind"))
            .and_then(|k| k.as_str().map(str::to_string))
            .unwrap_or_default();

        let component = match kind.as_str() {
            "form" => Component::Form(serde_json::from_value(value)?),
            "category" => Component::Category(serde_json::from_value(value)?),
            "subcategory" => Component::Subcategory(serde_json::from_value(value)?),
            "difficulty" => Component::Difficulty(serde_json::from_value(value)?),
            "item" => Component::Item(serde_json::from_value(value)?),
            "checklist" => Component::Checklist(serde_json::from_value(value)?),
            _ => return Err(MergeError::UnsupportedVariant(kind.clone()).into()),
        };
        Ok(component)
    }
}

// ============================================================================
// SCHEMA TREE (authoring form)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DifficultyDef {
    pub id: String,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub checklist: Option<Vec<CheckSlot>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubcategoryDef {
    pub id: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub difficulties: Vec<DifficultyDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryDef {
    pub id: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub subcategories: Vec<SubcategoryDef>,
}

/// Nested schema as authored
///
/// Built once before any merging and never mutated by the merger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaTree {
    #[serde(default)]
    pub categories: Vec<CategoryDef>,
    #[serde(default)]
    pub forms: Vec<FormNode>,
}

impl SchemaTree {
    /// Flatten into dispatchable components, parents before children
    ///
    /// Categories keep their declared order (that becomes registration
    /// order). Subcategories and items are visited by `order`.
    pub fn components(&self) -> Vec<Component> {
        let mut out = Vec::new();

        for cat in &self.categories {
            out.push(Component::Category(CategoryNode {
                id: cat.id.clone(),
                order: cat.order,
            }));

            let mut subs: Vec<&SubcategoryDef> = cat.subcategories.iter().collect();
            subs.sort_by_key(|s| s.order);

            for sub in subs {
                out.push(Component::Subcategory(SubcategoryNode {
                    id: sub.id.clone(),
                    order: sub.order,
                    category: cat.id.clone(),
                }));

                for dif in &sub.difficulties {
                    out.push(Component::Difficulty(DifficultyNode {
                        id: dif.id.clone(),
                        category: cat.id.clone(),
                        subcategory: sub.id.clone(),
                    }));

                    let parent = DifficultyPath::new(&cat.id, &sub.id, &dif.id);

                    let mut items: Vec<&ItemDef> = dif.items.iter().collect();
                    items.sort_by_key(|i| i.order);
                    for item in items {
                        out.push(Component::Item(ItemNode {
                            id: item.id.clone(),
                            order: item.order,
                            parent: parent.clone(),
                        }));
                    }

                    if let Some(checks) = &dif.checklist {
                        out.push(Component::Checklist(ChecklistNode {
                            parent: parent.clone(),
                            checks: checks.clone(),
                        }));
                    }
                }
            }
        }

        out.extend(self.forms.iter().cloned().map(Component::Form));
        out
    }
}

/// Load schema components from a JSON file
///
/// Accepts either a nested `SchemaTree` object or a flat array of
/// `kind`-tagged components (kept in file order).
pub fn load_schema(path: &Path) -> Result<Vec<Component>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;
    parse_schema(&text).with_context(|| format!("Invalid schema: {}", path.display()))
}

pub fn parse_schema(text: &str) -> Result<Vec<Component>> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    match value {
        serde_json::Value::Array(nodes) => nodes.into_iter().map(Component::from_value).collect(),
        other => {
            let tree: SchemaTree = serde_json::from_value(other)?;
            Ok(tree.components())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_tree() -> SchemaTree {
        SchemaTree {
            categories: vec![CategoryDef {
                id: "safety".to_string(),
                order: 1,
                subcategories: vec![
                    SubcategoryDef {
                        id: "wifi".to_string(),
                        order: 2,
                        difficulties: vec![],
                    },
                    SubcategoryDef {
                        id: "passwords".to_string(),
                        order: 1,
                        difficulties: vec![DifficultyDef {
                            id: "easy".to_string(),
                            items: vec![
                                ItemDef { id: "second".to_string(), order: 2 },
                                ItemDef { id: "first".to_string(), order: 1 },
                            ],
                            checklist: Some(vec![CheckSlot { no_check: true }]),
                        }],
                    },
                ],
            }],
            forms: vec![FormNode {
                id: "signup".to_string(),
                screens: vec![],
            }],
        }
    }

    #[test]
    fn test_components_are_top_down() {
        let paths: Vec<String> = sample_tree()
            .components()
            .iter()
            .map(|c| format!("{}:{}", c.kind(), c.path().join("/")))
            .collect();

        assert_eq!(
            paths,
            vec![
                "category:safety",
                "subcategory:safety/passwords",
                "difficulty:safety/passwords/easy",
                "item:safety/passwords/easy/first",
                "item:safety/passwords/easy/second",
                "checklist:safety/passwords/easy/checklist",
                "subcategory:safety/wifi",
                "form:form/signup",
            ]
        );
    }

    #[test]
    fn test_item_slot_placeholder() {
        assert!(ItemSlot::default().is_placeholder());
        let slot = ItemSlot {
            options: vec!["a".to_string()],
            ..ItemSlot::default()
        };
        assert!(!slot.is_placeholder());
    }

    #[test]
    fn test_parse_flat_schema() {
        let json = r#"[
            {"kind": "category", "id": "safety", "order": 1},
            {"kind": "checklist",
             "parent": {"category": "safety", "subcategory": "wifi", "difficulty": "easy"},
             "checks": [{"noCheck": true}, {}]}
        ]"#;

        let components = parse_schema(json).unwrap();
        assert_eq!(components.len(), 2);
        match &components[1] {
            Component::Checklist(c) => {
                assert_eq!(c.checks, vec![CheckSlot { no_check: true }, CheckSlot::default()]);
            }
            other => panic!("unexpected component {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_unsupported_variant() {
        let err = parse_schema(r#"[{"kind": "video", "id": "intro"}]"#).unwrap_err();
        let merge_err = err.downcast_ref::<MergeError>().unwrap();
        assert_eq!(merge_err, &MergeError::UnsupportedVariant("video".to_string()));
    }

    #[test]
    fn test_parse_nested_schema() {
        let json = r#"{
            "categories": [{"id": "safety", "subcategories": [{"id": "wifi"}]}],
            "forms": [{"id": "signup", "screens": [{"name": "intro", "items": [{"label": "x"}]}]}]
        }"#;
        let components = parse_schema(json).unwrap();
        let kinds: Vec<NodeKind> = components.iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Category, NodeKind::Subcategory, NodeKind::Form]
        );
    }
}
