/// Speaker of a transcript turn.
///
/// Only these two roles are ever stored in a [`crate::core::conversation::Conversation`].
/// The `system` role exists solely on the wire, see [`ROLE_SYSTEM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Assistant => ROLE_ASSISTANT,
        }
    }

    pub fn is_user(self) -> bool {
        self == Role::User
    }

    pub fn is_assistant(self) -> bool {
        self == Role::Assistant
    }
}

/// One message in the conversation. Fields are private so a turn cannot be
/// edited after it has been recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }

    pub fn is_assistant(&self) -> bool {
        self.role.is_assistant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_wire_names() {
        assert_eq!(Role::User.as_str(), ROLE_USER);
        assert_eq!(Role::Assistant.as_str(), ROLE_ASSISTANT);
        assert_ne!(Role::Assistant.as_str(), ROLE_SYSTEM);
    }

    #[test]
    fn turn_constructors_set_roles() {
        let question = Turn::user("why does this panic?");
        let answer = Turn::assistant("index out of bounds");
        assert!(question.is_user());
        assert!(answer.is_assistant());
        assert_eq!(answer.content(), "index out of bounds");
    }
}
