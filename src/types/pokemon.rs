use crate::error::VaultError;
use serde_json::Value;

/// One fetched record: the deduplication key plus the untouched JSON body.
///
/// The body is stored verbatim; the only field this program interprets is
/// the top-level `id`, which becomes the table's primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonDocument {
    pub id: i32,
    pub body: Value,
}

impl PokemonDocument {
    /// Parse raw response bytes into a document. The payload must be valid
    /// JSON carrying a top-level integer `id` that fits an INTEGER column;
    /// anything else is a parse-category failure.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VaultError> {
        let body: Value = serde_json::from_slice(bytes)?;
        let id = body
            .get("id")
            .and_then(Value::as_i64)
            .and_then(|id| i32::try_from(id).ok())
            .ok_or(VaultError::MissingId)?;
        Ok(Self { id, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn extracts_id_and_keeps_body_verbatim() {
        let raw = br#"{"id": 25, "name": "pikachu", "types": [{"slot": 1}]}"#;
        let doc = PokemonDocument::from_bytes(raw).expect("valid document");
        assert_eq!(doc.id, 25);
        assert_eq!(doc.body["name"], "pikachu");
        assert_eq!(doc.body["types"][0]["slot"], 1);
    }

    #[test]
    fn malformed_json_is_a_parse_failure() {
        let err = PokemonDocument::from_bytes(b"{truncated").unwrap_err();
        assert!(matches!(err, VaultError::Json(_)));
        assert_eq!(err.kind(), FailureKind::Parse);
    }

    #[test]
    fn missing_or_unusable_id_is_rejected() {
        for raw in [
            br#"{"name": "missingno"}"#.as_slice(),
            br#"{"id": "25"}"#.as_slice(),
            br#"{"id": 25.5}"#.as_slice(),
            br#"{"id": 4294967296}"#.as_slice(),
            br#"[1, 2, 3]"#.as_slice(),
        ] {
            let err = PokemonDocument::from_bytes(raw).unwrap_err();
            assert!(matches!(err, VaultError::MissingId), "payload: {raw:?}");
            assert_eq!(err.kind(), FailureKind::Parse);
        }
    }

    #[test]
    fn negative_ids_still_fit_the_column() {
        let doc = PokemonDocument::from_bytes(br#"{"id": -7}"#).expect("fits i32");
        assert_eq!(doc.id, -7);
    }
}
