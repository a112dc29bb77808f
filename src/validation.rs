use validator::{Validate, ValidationError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// ユーザー名に許可する文字種
    /// 半角英数字、@/./+/-/_ のみ
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();
}

/// ユーザー登録リクエストのバリデーション。
#[derive(Debug, Validate)]
pub struct RegisterValidation {
    #[validate(
        length(min = 1, max = 150, message = "Username must be between 1 and 150 characters"),
        custom(function = "validate_username_chars", message = "Username may only contain letters, digits and @/./+/-/_")
    )]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// ユーザー名の文字種バリデーション
fn validate_username_chars(username: &str) -> Result<(), ValidationError> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username_chars"))
    }
}

impl RegisterValidation {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// バリデーションを実行し、エラーメッセージを返す
    pub fn validate_form(&self) -> Result<(), Vec<String>> {
        match self.validate() {
            Ok(_) => Ok(()),
            Err(errors) => {
                let mut messages = Vec::new();
                for (field, field_errors) in errors.field_errors() {
                    for error in field_errors {
                        let msg = error.message.as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", field));
                        messages.push(msg);
                    }
                }
                Err(messages)
            }
        }
    }
}
