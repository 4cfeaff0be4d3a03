//! Login form values and validation.

use crate::core::ui::FieldErrors;
use crate::models::Credentials;

/// Form field key for the user name.
pub const FIELD_USER_NAME: &str = "userName";
/// Form field key for the password.
pub const FIELD_PASSWORD: &str = "password";
/// Longest accepted user name or password.
pub const MAX_INPUT_LEN: usize = 20;

const MIN_USER_NAME_LEN: usize = 6;
const MIN_PASSWORD_LEN: usize = 4;

/// Login form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// User name as typed.
    pub user_name: String,
    /// Password as typed.
    pub password: String,
}

impl LoginForm {
    /// Check the form and build the request body.
    ///
    /// # Errors
    /// Returns one message per failing field.
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        let user_name = self.user_name.trim();
        if let Some(message) = check_len(
            user_name,
            MIN_USER_NAME_LEN,
            "用户必填！",
            "用户名至少 6 位",
            "用户名最多 20 位",
        ) {
            errors.insert(FIELD_USER_NAME, message.to_string());
        }
        if let Some(message) = check_len(
            &self.password,
            MIN_PASSWORD_LEN,
            "密码必填!",
            "密码至少 4 位",
            "密码最多 20 位",
        ) {
            errors.insert(FIELD_PASSWORD, message.to_string());
        }
        if errors.is_empty() {
            Ok(Credentials {
                user_name: user_name.to_string(),
                password: self.password.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

fn check_len(
    value: &str,
    min: usize,
    missing: &'static str,
    short: &'static str,
    long: &'static str,
) -> Option<&'static str> {
    let len = value.chars().count();
    if len == 0 {
        Some(missing)
    } else if len < min {
        Some(short)
    } else if len > MAX_INPUT_LEN {
        Some(long)
    } else {
        None
    }
}
