use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the backend. Never generated on this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(UserId)
    }
}

/// A user as listed by the collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(rename = "nombreCompleto", default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(rename = "correoElectronico", default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(rename = "numeroTelefono", default, deserialize_with = "null_as_empty")]
    pub phone_number: String,
}

/// Body of the create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "correoElectronico")]
    pub email: String,
    #[serde(rename = "numeroTelefono")]
    pub phone_number: String,
}

// The backend stores nullable columns; a missing value shows as an empty cell.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
