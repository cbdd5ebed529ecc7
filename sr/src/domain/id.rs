//! Record identity generation
//!
//! Identities are UUIDv7: unique under concurrent submission (no
//! sub-millisecond collision window) and time-prefixed, so ids from
//! different moments sort by creation time.

/// Generate a new record identity
pub fn generate_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct() {
        let ids: Vec<String> = (0..100).map(|_| generate_id()).collect();
        let unique: std::collections::HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_id_is_uuid_shaped() {
        let id = generate_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
    }
}
