use serde::{Deserialize, Serialize};

/// The identity bound to a session handle.
///
/// Always written and read as a whole, so a handle can never carry a uid
/// without its display name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub name: String,
}

impl Session {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Session {
            uid: uid.into(),
            name: name.into(),
        }
    }

    /// Both fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.uid.is_empty() && !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete() {
        assert!(Session::new("u1", "Alice").is_complete());
        assert!(!Session::new("", "Alice").is_complete());
        assert!(!Session::new("u1", "").is_complete());
    }

    #[test]
    fn test_partial_payload_does_not_deserialize() {
        let partial = serde_json::json!({ "uid": "u1" });
        assert!(serde_json::from_value::<Session>(partial).is_err());
    }
}
