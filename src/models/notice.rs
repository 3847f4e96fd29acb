use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A message surfaced to the person using the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    MissingFields,
    Created,
    CreateFailed,
    Updated,
    UpdateFailed,
    /// Only raised under the unified error policy.
    RequestFailed(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::MissingFields => "Fill in all fields".to_string(),
            Notice::Created => "User created successfully".to_string(),
            Notice::CreateFailed => "Error creating user".to_string(),
            Notice::Updated => "User updated successfully".to_string(),
            Notice::UpdateFailed => "Error updating user".to_string(),
            Notice::RequestFailed(reason) => format!("Could not reach the server: {}", reason),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Notice::Created | Notice::Updated => Severity::Success,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
