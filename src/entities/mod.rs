// Localized output entities
//
// Category trees are filled in progressively across many merge calls.
// Forms are built in one call and stored whole.

pub mod category;
pub mod form;
pub mod registry;

pub use category::{Category, Check, Checklist, Difficulty, Item, Subcategory};
pub use form::{Form, FormInput, FormScreen};
pub use registry::{CategoryRegistry, FormStore};
