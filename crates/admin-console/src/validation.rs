// crates/admin-console/src/validation.rs
// Client-side checks for the create and edit user forms

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Anything@anything.tld, no whitespace
#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Per-field validation failures, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn add(&mut self, field: &'static str, message: &str) {
        self.fields.insert(field, message.to_string());
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Fields of the create-user form before role names are resolved to ids
#[derive(Debug, Clone, Default)]
pub struct NewUserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
}

impl NewUserForm {
    /// Check every field and report all failures at once
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if self.username.trim().is_empty() {
            errors.add("username", "Username is required");
        }

        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.add("email", "Please enter a valid email address");
        }

        if self.password.trim().is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", "Password must be at least 6 characters long");
        }

        if self.roles.is_empty() {
            errors.add("roles", "Please select at least one role");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Requested edits to an existing account; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Role names, resolved to ids before sending
    pub roles: Option<Vec<String>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.roles.is_none()
    }

    /// Same rules as [`NewUserForm::validate`], applied only to fields being changed
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if let Some(username) = &self.username
            && username.trim().is_empty()
        {
            errors.add("username", "Username is required");
        }

        if let Some(email) = &self.email {
            if email.trim().is_empty() {
                errors.add("email", "Email is required");
            } else if !is_valid_email(email) {
                errors.add("email", "Please enter a valid email address");
            }
        }

        if let Some(password) = &self.password
            && password.chars().count() < MIN_PASSWORD_LEN
        {
            errors.add("password", "Password must be at least 6 characters long");
        }

        if let Some(roles) = &self.roles
            && roles.is_empty()
        {
            errors.add("roles", "Please select at least one role");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> NewUserForm {
        NewUserForm {
            username: "dave".to_string(),
            email: "dave@example.com".to_string(),
            password: "secret1".to_string(),
            roles: vec!["User".to_string()],
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = NewUserForm::default().validate().unwrap_err();
        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert_eq!(errors.get("roles"), Some("Please select at least one role"));
        assert_eq!(errors.iter().count(), 4);
    }

    #[test]
    fn test_blank_username_rejected() {
        let form = NewUserForm {
            username: "   ".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("username").is_some());
        assert_eq!(errors.iter().count(), 1);
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("@c.de"));

        let form = NewUserForm {
            email: "nope".to_string(),
            ..valid_form()
        };
        assert_eq!(
            form.validate().unwrap_err().get("email"),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_short_password() {
        let form = NewUserForm {
            password: "12345".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("password").unwrap().contains("at least 6"));

        let form = NewUserForm {
            password: "123456".to_string(),
            ..valid_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_changes_only_check_present_fields() {
        assert!(UserChanges::default().validate().is_ok());
        assert!(UserChanges::default().is_empty());

        let changes = UserChanges {
            email: Some("carol@example.com".to_string()),
            ..Default::default()
        };
        assert!(changes.validate().is_ok());
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_changes_reject_bad_values() {
        let changes = UserChanges {
            username: Some(" ".to_string()),
            email: Some("carol".to_string()),
            password: Some("abc".to_string()),
            roles: Some(Vec::new()),
        };
        let errors = changes.validate().unwrap_err();
        assert_eq!(errors.iter().count(), 4);
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn test_display_lists_fields() {
        let errors = NewUserForm::default().validate().unwrap_err();
        let text = errors.to_string();
        assert!(text.contains("email: Email is required"));
        assert!(text.contains("roles:"));
    }
}
