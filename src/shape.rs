// 📏 Shape Validators
// Row count must agree with what the schema node kind implies

use crate::error::{MergeError, MergeResult, NodeKind};
use crate::resource::Row;

/// Category, subcategory and difficulty nodes take exactly one row
pub fn exactly_one<'a>(node: NodeKind, id: &str, rows: &'a [Row]) -> MergeResult<&'a Row> {
    match rows {
        [row] => Ok(row),
        _ => Err(MergeError::shape(
            node,
            id,
            format!("expected 1 row, got {}", rows.len()),
        )),
    }
}

/// Items need at least the title row
pub fn at_least_one<'a>(node: NodeKind, id: &str, rows: &'a [Row]) -> MergeResult<&'a Row> {
    rows.first()
        .ok_or_else(|| MergeError::shape(node, id, "expected at least 1 row, got 0"))
}

/// Checklists need exactly one row per expected check
pub fn exact_count(node: NodeKind, id: &str, rows: &[Row], expected: usize) -> MergeResult {
    if rows.len() != expected {
        return Err(MergeError::shape(
            node,
            id,
            format!("{} checks, {} expected", rows.len(), expected),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Row> {
        (0..n).map(|_| Row::new()).collect()
    }

    #[test]
    fn test_exactly_one() {
        assert!(exactly_one(NodeKind::Category, "c", &rows(1)).is_ok());
        assert!(exactly_one(NodeKind::Category, "c", &rows(0))
            .unwrap_err()
            .is_shape_mismatch());
        assert!(exactly_one(NodeKind::Category, "c", &rows(2))
            .unwrap_err()
            .is_shape_mismatch());
    }

    #[test]
    fn test_at_least_one() {
        assert!(at_least_one(NodeKind::Item, "i", &rows(0)).is_err());
        assert!(at_least_one(NodeKind::Item, "i", &rows(3)).is_ok());
    }

    #[test]
    fn test_exact_count_message() {
        let err = exact_count(NodeKind::Checklist, "easy", &rows(3), 2).unwrap_err();
        assert!(err.to_string().contains("3 checks, 2 expected"));
        assert!(exact_count(NodeKind::Checklist, "easy", &rows(2), 2).is_ok());
    }
}
