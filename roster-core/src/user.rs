use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user record. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A candidate that passed the validation gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_serializes_with_camel_case_keys() {
        let user = User {
            id: Uuid::nil(),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["createdAt"], json!("1970-01-01T00:00:00Z"));
        assert!(value.get("created_at").is_none());
    }
}
