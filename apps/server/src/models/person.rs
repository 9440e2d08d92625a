use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub roles: Roles,
}

/// Ids of the films a person took part in, by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roles {
    pub actor: Vec<Uuid>,
    pub writer: Vec<Uuid>,
    pub director: Vec<Uuid>,
}
