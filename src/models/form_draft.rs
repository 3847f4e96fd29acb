use serde::{Deserialize, Serialize};

use super::user_record::{UserId, UserPayload, UserRecord};

/// One of the three editable fields of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    FullName,
    Email,
    PhoneNumber,
}

impl DraftField {
    pub const ALL: [DraftField; 3] =
        [DraftField::FullName, DraftField::Email, DraftField::PhoneNumber];

    /// Accepts the wire name as well as the snake/camel case English names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nombreCompleto" | "full_name" | "fullName" => Some(Self::FullName),
            "correoElectronico" | "email" => Some(Self::Email),
            "numeroTelefono" | "phone_number" | "phoneNumber" => Some(Self::PhoneNumber),
            _ => None,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::FullName => "nombreCompleto",
            Self::Email => "correoElectronico",
            Self::PhoneNumber => "numeroTelefono",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone number",
        }
    }
}

/// In-progress form values. `edit_target_id` decides whether a submit
/// creates a new record or updates an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub edit_target_id: Option<UserId>,
}

impl FormDraft {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            phone_number: record.phone_number.clone(),
            edit_target_id: Some(record.id),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::FullName => &self.full_name,
            DraftField::Email => &self.email,
            DraftField::PhoneNumber => &self.phone_number,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::FullName => self.full_name = value,
            DraftField::Email => self.email = value,
            DraftField::PhoneNumber => self.phone_number = value,
        }
    }

    /// Literal emptiness only: a field holding whitespace counts as filled.
    pub fn is_complete(&self) -> bool {
        DraftField::ALL.iter().all(|f| !self.field(*f).is_empty())
    }

    /// True when none of the three fields holds a value.
    pub fn is_blank(&self) -> bool {
        DraftField::ALL.iter().all(|f| self.field(*f).is_empty())
    }

    /// Empties the three fields. The edit target is left alone.
    pub fn clear_fields(&mut self) {
        self.full_name.clear();
        self.email.clear();
        self.phone_number.clear();
    }

    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_parse() {
        for field in DraftField::ALL {
            assert_eq!(DraftField::parse(field.wire_name()), Some(field));
        }
        assert_eq!(DraftField::parse("fullName"), Some(DraftField::FullName));
        assert_eq!(DraftField::parse("id"), None);
    }

    #[test]
    fn clear_fields_keeps_edit_target() {
        let mut draft = FormDraft {
            full_name: "Ana".into(),
            email: "a@x.com".into(),
            phone_number: "1".into(),
            edit_target_id: Some(UserId(1)),
        };
        assert!(draft.is_complete());
        draft.clear_fields();
        assert!(draft.is_blank());
        assert_eq!(draft.edit_target_id, Some(UserId(1)));
    }
}
