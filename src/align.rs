// 🧩 Form Aligner
//
// Zips a flat row stream against the nested screen/item schema of a form.
//
// Row 0 carries the form name. After that, rows are consumed left to right:
// - a named screen takes one header row (non-empty `screen` field)
// - an anonymous screen takes none
// - a placeholder item slot takes none
// - every other slot takes one row, which must not be a screen header

use crate::error::{MergeError, MergeResult, NodeKind};
use crate::entities::{Form, FormInput, FormScreen};
use crate::resource::{Resource, Row};
use crate::schema::FormNode;
use std::iter::Peekable;
use std::slice::Iter;

/// Row fields read by the aligner
pub mod fields {
    pub const FORM: &str = "form";
    pub const SCREEN: &str = "screen";
    pub const LABEL: &str = "label";
    pub const HINT: &str = "hint";
    pub const OPTIONS: &str = "options";
}

/// Build the localized form for `locale`; nothing is stored here
pub fn align_form(
    node: &FormNode,
    res: &Resource,
    locale: &str,
    options_delimiter: &str,
) -> MergeResult<Form> {
    let (head, rest) = res
        .rows()
        .split_first()
        .ok_or_else(|| MergeError::shape(NodeKind::Form, &node.id, "no rows"))?;

    let mut form = Form::new(&node.id, head.get(fields::FORM), locale);
    let mut stream = rest.iter().peekable();
    let total = node.screens.len();

    for (i, slot) in node.screens.iter().enumerate() {
        let mut screen = FormScreen::default();

        if !slot.name.is_empty() {
            let row = stream.next().ok_or_else(|| {
                MergeError::shape(
                    NodeKind::Form,
                    &node.id,
                    format!("no more rows at screen {}/{}", i + 1, total),
                )
            })?;
            let name = row.get(fields::SCREEN);
            if name.is_empty() {
                return Err(MergeError::shape(
                    NodeKind::Form,
                    &node.id,
                    format!("expected screen {}/{}, got item", i + 1, total),
                ));
            }
            screen.name = name.to_string();
        }

        for (j, item) in slot.items.iter().enumerate() {
            if item.is_placeholder() {
                continue;
            }
            let at = SlotPosition {
                screen: i + 1,
                screens: total,
                item: j + 1,
                items: slot.items.len(),
            };
            let row = next_item_row(&mut stream, &node.id, at)?;
            screen.items.push(FormInput {
                label: row.get(fields::LABEL).to_string(),
                hint: row.get(fields::HINT).to_string(),
                options: split_options(row.get(fields::OPTIONS), options_delimiter),
            });
        }

        form.screens.push(screen);
    }

    if stream.peek().is_some() {
        tracing::trace!(form = %node.id, locale, left = stream.count(), "unconsumed form rows");
    }

    Ok(form)
}

/// 1-based position of an item slot, for error messages
#[derive(Debug, Clone, Copy)]
struct SlotPosition {
    screen: usize,
    screens: usize,
    item: usize,
    items: usize,
}

impl std::fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "item {}/{} of screen {}/{}",
            self.item, self.items, self.screen, self.screens
        )
    }
}

fn next_item_row<'a>(
    stream: &mut Peekable<Iter<'a, Row>>,
    form_id: &str,
    at: SlotPosition,
) -> MergeResult<&'a Row> {
    let row = stream.peek().copied().ok_or_else(|| {
        MergeError::shape(
            NodeKind::Form,
            form_id,
            format!("no more rows at {}", at),
        )
    })?;

    let header = row.get(fields::SCREEN);
    if !header.is_empty() {
        return Err(MergeError::shape(
            NodeKind::Form,
            form_id,
            format!("expected {}, got screen {:?}", at, header),
        ));
    }

    stream.next();
    Ok(row)
}

/// An empty cell means no options
fn split_options(cell: &str, delimiter: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.split(delimiter).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ItemSlot, ScreenSlot};
    use pretty_assertions::assert_eq;

    fn slot(label: &str) -> ItemSlot {
        ItemSlot {
            label: label.to_string(),
            ..ItemSlot::default()
        }
    }

    fn form_node(screens: Vec<ScreenSlot>) -> FormNode {
        FormNode {
            id: "signup".to_string(),
            screens,
        }
    }

    fn screen(name: &str, items: Vec<ItemSlot>) -> ScreenSlot {
        ScreenSlot {
            name: name.to_string(),
            items,
        }
    }

    fn input_row(label: &str) -> Row {
        Row::new().with("label", label).with("hint", "h")
    }

    #[test]
    fn test_named_screen_with_placeholder_slot() {
        let node = form_node(vec![screen("intro", vec![slot("x"), ItemSlot::default()])]);
        let res = Resource::new(vec![
            Row::new(),
            Row::new().with("screen", "S1"),
            Row::new()
                .with("label", "L")
                .with("hint", "H")
                .with("options", "a;b"),
        ]);

        let form = align_form(&node, &res, "en", ";").unwrap();
        assert_eq!(form.screens.len(), 1);
        assert_eq!(form.screens[0].name, "S1");
        assert_eq!(
            form.screens[0].items,
            vec![FormInput {
                label: "L".to_string(),
                hint: "H".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
            }]
        );
    }

    #[test]
    fn test_form_name_and_locale() {
        let node = form_node(vec![]);
        let res = Resource::new(vec![Row::new().with("form", "Sign up")]);

        let form = align_form(&node, &res, "it", ";").unwrap();
        assert_eq!(form.id, "signup");
        assert_eq!(form.name, "Sign up");
        assert_eq!(form.locale, "it");
        assert!(form.screens.is_empty());
    }

    #[test]
    fn test_anonymous_screen_consumes_no_header() {
        let node = form_node(vec![
            screen("", vec![slot("a")]),
            screen("second", vec![slot("b")]),
        ]);
        let res = Resource::new(vec![
            Row::new(),
            input_row("A"),
            Row::new().with("screen", "Two"),
            input_row("B"),
        ]);

        let form = align_form(&node, &res, "en", ";").unwrap();
        assert_eq!(form.screens[0].name, "");
        assert_eq!(form.screens[0].items[0].label, "A");
        assert_eq!(form.screens[1].name, "Two");
        assert_eq!(form.screens[1].items[0].label, "B");
        assert_eq!(form.input_count(), 2);
    }

    #[test]
    fn test_missing_screen_header_fails() {
        let node = form_node(vec![screen("intro", vec![slot("x")])]);
        let res = Resource::new(vec![Row::new(), input_row("L")]);

        let err = align_form(&node, &res, "en", ";").unwrap_err();
        assert!(err.is_shape_mismatch());
        assert!(err.to_string().contains("expected screen 1/1, got item"));
    }

    #[test]
    fn test_premature_screen_header_fails() {
        let node = form_node(vec![
            screen("one", vec![slot("a"), slot("b")]),
            screen("two", vec![slot("c")]),
        ]);
        let res = Resource::new(vec![
            Row::new(),
            Row::new().with("screen", "One"),
            input_row("A"),
            Row::new().with("screen", "Two"),
            input_row("C"),
        ]);

        let err = align_form(&node, &res, "en", ";").unwrap_err();
        assert!(err
            .to_string()
            .contains("expected item 2/2 of screen 1/2, got screen \"Two\""));
    }

    #[test]
    fn test_stream_exhaustion_fails() {
        let node = form_node(vec![screen("one", vec![slot("a")])]);

        let only_header = Resource::new(vec![Row::new(), Row::new().with("screen", "One")]);
        let err = align_form(&node, &only_header, "en", ";").unwrap_err();
        assert!(err.to_string().contains("no more rows at item 1/1 of screen 1/1"));

        let only_name = Resource::new(vec![Row::new()]);
        let err = align_form(&node, &only_name, "en", ";").unwrap_err();
        assert!(err.to_string().contains("no more rows at screen 1/1"));

        let err = align_form(&node, &Resource::default(), "en", ";").unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_split_options() {
        assert_eq!(split_options("", ";"), Vec::<String>::new());
        assert_eq!(split_options("yes", ";"), vec!["yes"]);
        assert_eq!(split_options("a|b|", "|"), vec!["a", "b", ""]);
    }
}
