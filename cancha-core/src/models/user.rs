use std::fmt;

use serde::{Deserialize, Serialize};

/// Person types are a fixed two-entry table; any other id is "unset".
pub fn person_type_label(id: i64) -> Option<&'static str> {
    match id {
        1 => Some("Atleta"),
        2 => Some("Entrenador"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "M"),
            Gender::Female => write!(f, "F"),
        }
    }
}

/// An admin-console user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role_id: Option<i64>,
    pub role: String,
    pub status_id: Option<i64>,
    pub status: String,
    pub person_type_id: Option<i64>,
    pub person_type: String,
    /// Backend-supplied URI, or a deterministic placeholder derived from
    /// the name, email, or id when the backend sends none.
    pub avatar: String,
    pub identification: String,
    pub birth_date: String,
    pub gender: Option<Gender>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} <{}>", self.id, self.name, self.email)?;
        if !self.role.is_empty() {
            write!(f, " - {}", self.role)?;
        }
        if !self.person_type.is_empty() {
            write!(f, " ({})", self.person_type)?;
        }
        if !self.status.is_empty() {
            write!(f, " [{}]", self.status)?;
        }
        Ok(())
    }
}
