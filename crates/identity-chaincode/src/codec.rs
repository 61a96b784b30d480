//! # Record Codec
//!
//! JSON encoding of user records, query selectors and response envelopes to
//! and from the byte form held by the state store.

use crate::domain::envelope::Envelope;
use crate::domain::entities::User;
use crate::domain::invariants::check_persist_invariants;
use crate::domain::selector::UserSelector;
use crate::errors::CodecError;

/// Payload used when an envelope itself cannot be serialized.
pub const ENVELOPE_FALLBACK: &[u8] = br#"{"message":"Something went wrong while parsing json"}"#;

/// Encode a user record for storage.
///
/// Records that break a persistence invariant are refused, so nothing that
/// fails here ever reaches the store.
pub fn encode_user(user: &User) -> Result<Vec<u8>, CodecError> {
    check_persist_invariants(user)?;
    Ok(serde_json::to_vec(user)?)
}

/// Decode a stored user record.
pub fn decode_user(bytes: &[u8]) -> Result<User, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Compile a selector into the query string passed to the store.
pub fn encode_query(selector: &UserSelector) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&selector.clone().into_query())?)
}

/// Encode a response envelope.
pub fn encode_envelope(envelope: &Envelope) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(envelope)?)
}

/// Decode a response envelope.
///
/// A `data` object carrying full-record fields must be a valid [`User`];
/// a bad record (for example an unknown `status`) is an error rather than
/// a silently reduced summary.
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{UserStatus, UserSummary};
    use crate::domain::envelope::ResponseData;
    use serde_json::{json, Value};

    fn jane() -> User {
        User::new_active("u1", "Jane", "Doe", "pw123", "jane@x.com")
    }

    #[test]
    fn test_user_wire_format() {
        let bytes = encode_user(&jane()).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            json!({
                "user_id": "u1",
                "first_name": "Jane",
                "last_name": "Doe",
                "password": "pw123",
                "doc_type": "user",
                "email": "jane@x.com",
                "status": 1
            })
        );
    }

    #[test]
    fn test_decode_legacy_id_key() {
        let raw = br#"{"ID":"u9","first_name":"A","last_name":"B","password":"p","doc_type":"user","email":"a@b.c","status":0}"#;
        let user = decode_user(raw).unwrap();
        assert_eq!(user.id, "u9");
        assert_eq!(user.status, UserStatus::Inactive);
    }

    #[test]
    fn test_decode_rejects_unknown_status() {
        let raw = br#"{"user_id":"u9","first_name":"A","last_name":"B","password":"p","doc_type":"user","email":"a@b.c","status":3}"#;
        let err = decode_user(raw).unwrap_err();
        assert!(err.to_string().contains("invalid user status: 3"));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(decode_user(b"not json"), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_encode_refuses_foreign_doc_type() {
        let mut user = jane();
        user.doc_type = "asset".into();
        assert!(matches!(encode_user(&user), Err(CodecError::Invariant(_))));
    }

    #[test]
    fn test_probe_query() {
        let query = encode_query(&UserSelector::new().email("jane@x.com")).unwrap();
        assert_eq!(query, r#"{"selector":{"email":"jane@x.com"}}"#);
    }

    #[test]
    fn test_login_query() {
        let selector = UserSelector::new()
            .email("jane@x.com")
            .password("pw123")
            .status(UserStatus::Active);
        assert_eq!(
            encode_query(&selector).unwrap(),
            r#"{"selector":{"email":"jane@x.com","password":"pw123","status":1}}"#
        );
    }

    #[test]
    fn test_registration_envelope_shape() {
        let bytes = encode_envelope(&Envelope::user_created(jane().summary())).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            json!({
                "status": 1,
                "message": "User created successfully",
                "data": {
                    "user_id": "u1",
                    "email": "jane@x.com",
                    "first_name": "Jane",
                    "last_name": "Doe"
                }
            })
        );
    }

    #[test]
    fn test_envelope_data_variants_decode() {
        let login = Envelope::login_successful("u1", jane());
        let decoded = decode_envelope(&encode_envelope(&login).unwrap()).unwrap();
        assert_eq!(decoded, login);

        let created = Envelope::user_created(jane().summary());
        let decoded = decode_envelope(&encode_envelope(&created).unwrap()).unwrap();
        assert!(matches!(decoded.data, ResponseData::UserSummary(UserSummary { .. })));

        let stale = br#"{"status":1,"message":"User login successful","id":"u1","data":{"user_id":"u1","first_name":"Jane","last_name":"Doe","password":"pw123","doc_type":"user","email":"jane@x.com","status":3}}"#;
        assert!(matches!(decode_envelope(stale), Err(CodecError::Json(_))));

        let raw = br#"{"status":401,"message":"nope","data":null}"#;
        let decoded = decode_envelope(raw).unwrap();
        assert_eq!(decoded.data, ResponseData::None);
        assert_eq!(decoded.id, None);
    }
}
