//! Student entity and the create-request body.

use serde::{Deserialize, Serialize};

/// A persisted student. `id` is assigned by the store and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Email", alias = "email")]
    pub email: String,
    #[serde(rename = "Age", alias = "age")]
    pub age: i32,
}

/// Body of `POST /students`. Missing keys decode to empty values so validation reports them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewStudent {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Email")]
    pub email: String,
    #[serde(alias = "Age")]
    pub age: i32,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        NewStudent {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    pub fn with_id(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}
