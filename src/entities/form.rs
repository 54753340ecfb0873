// 📝 Localized Form
// Built atomically by one merge call and stored whole

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub label: String,
    pub hint: String,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormScreen {
    /// Empty for anonymous screens
    pub name: String,
    #[serde(default)]
    pub items: Vec<FormInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    pub name: String,
    pub locale: String,
    #[serde(default)]
    pub screens: Vec<FormScreen>,
}

impl Form {
    pub fn new(id: impl Into<String>, name: impl Into<String>, locale: impl Into<String>) -> Self {
        Form {
            id: id.into(),
            name: name.into(),
            locale: locale.into(),
            screens: Vec::new(),
        }
    }

    /// Number of inputs across all screens
    pub fn input_count(&self) -> usize {
        self.screens.iter().map(|s| s.items.len()).sum()
    }
}
