//! Entry screen state.

/// Which input field owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Username,
    Password,
}

/// Login/registration form state.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub username: String,
    pub password: String,
    pub field: AuthField,
}

impl AuthState {
    /// Local validation shared by login and registration: trimmed username
    /// and password must both be non-empty. Runs before any network call.
    pub fn validated(&self) -> Result<(String, String), &'static str> {
        let username = self.username.trim();
        if username.is_empty() || self.password.is_empty() {
            return Err("Please enter both username and password.");
        }
        Ok((username.to_string(), self.password.clone()))
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Username,
        };
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.field {
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.active_field_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.active_field_mut().pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_requires_both_fields() {
        let mut auth = AuthState::default();
        assert!(auth.validated().is_err());

        auth.username = "  alice  ".to_string();
        assert!(auth.validated().is_err());

        auth.password = "pw".to_string();
        let (username, password) = auth.validated().unwrap();
        assert_eq!(username, "alice");
        assert_eq!(password, "pw");
    }

    #[test]
    fn whitespace_username_is_rejected() {
        let mut auth = AuthState::default();
        auth.username = "   ".to_string();
        auth.password = "pw".to_string();
        assert!(auth.validated().is_err());
    }
}
