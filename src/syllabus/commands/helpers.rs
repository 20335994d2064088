use crate::error::{Result, SyllabusError};
use crate::model::ItemPayload;

/// Trims a required text field, rejecting blanks.
pub fn required_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SyllabusError::Validation(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

pub fn validate_payload(payload: &ItemPayload) -> Result<()> {
    match payload {
        ItemPayload::Link { url } => {
            required_text(url, "link url")?;
        }
        ItemPayload::File {
            file_name,
            file_data,
            ..
        } => {
            required_text(file_name, "file name")?;
            if file_data.is_empty() {
                return Err(SyllabusError::Validation(
                    "file data must not be empty".to_string(),
                ));
            }
        }
    }
    Ok(())
}

pub fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(SyllabusError::Range { index, len });
    }
    Ok(())
}

/// Removes the element at `from` and reinserts it at `to`.
///
/// Moving 0 to 2 in `[A, B, C, D]` yields `[B, C, A, D]`. Returns whether the
/// sequence changed.
pub fn splice_move<T>(seq: &mut Vec<T>, from: usize, to: usize) -> Result<bool> {
    check_index(from, seq.len())?;
    check_index(to, seq.len())?;
    if from == to {
        return Ok(false);
    }
    let element = seq.remove(from);
    seq.insert(to, element);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("  Week 1 ", "name").unwrap(), "Week 1");
    }

    #[test]
    fn required_text_rejects_whitespace() {
        let err = required_text(" \t\n", "module name").unwrap_err();
        assert!(matches!(err, SyllabusError::Validation(_)));
        assert!(err.to_string().contains("module name"));
    }

    #[test]
    fn splice_move_is_remove_then_insert() {
        let mut seq = vec!['A', 'B', 'C', 'D'];
        assert!(splice_move(&mut seq, 0, 2).unwrap());
        assert_eq!(seq, vec!['B', 'C', 'A', 'D']);

        let mut seq = vec!['A', 'B', 'C', 'D'];
        assert!(splice_move(&mut seq, 3, 1).unwrap());
        assert_eq!(seq, vec!['A', 'D', 'B', 'C']);
    }

    #[test]
    fn splice_move_same_index_is_noop() {
        let mut seq = vec![1, 2, 3];
        assert!(!splice_move(&mut seq, 1, 1).unwrap());
        assert_eq!(seq, vec![1, 2, 3]);
    }

    #[test]
    fn splice_move_checks_both_bounds() {
        let mut seq = vec![1, 2, 3];
        assert!(matches!(
            splice_move(&mut seq, 3, 0),
            Err(SyllabusError::Range { index: 3, len: 3 })
        ));
        assert!(matches!(
            splice_move(&mut seq, 0, 5),
            Err(SyllabusError::Range { index: 5, len: 3 })
        ));
        assert_eq!(seq, vec![1, 2, 3]);
    }

    #[test]
    fn file_payload_needs_bytes() {
        let payload = ItemPayload::File {
            file_name: "a.pdf".into(),
            file_size: 0,
            file_type: "application/pdf".into(),
            file_data: Vec::new(),
        };
        assert!(matches!(
            validate_payload(&payload),
            Err(SyllabusError::Validation(_))
        ));
    }

    #[test]
    fn link_payload_needs_url() {
        let payload = ItemPayload::Link { url: "  ".into() };
        assert!(matches!(
            validate_payload(&payload),
            Err(SyllabusError::Validation(_))
        ));
    }
}
