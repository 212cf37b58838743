//! Optional foreign keys.
//!
//! Inside the crate an absent reference is `None` all the way down to SQL
//! `NULL`. Admin payloads historically send `0` (or omit the field) for
//! "no parent"/"no category"; that convention is translated here and
//! nowhere else.

/// Converts a payload reference into an optional id. Missing, `null`, zero
/// and negative values are all "absent".
pub fn from_payload(raw: Option<i64>) -> Option<i64> {
    raw.filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_ids_are_kept() {
        assert_eq!(from_payload(Some(7)), Some(7));
    }

    #[test]
    fn zero_negative_and_missing_are_absent() {
        assert_eq!(from_payload(Some(0)), None);
        assert_eq!(from_payload(Some(-1)), None);
        assert_eq!(from_payload(None), None);
    }
}
