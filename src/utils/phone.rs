use regex::Regex;
use std::sync::OnceLock;

use crate::error::{AppError, AppResult};

fn phone_regex() -> &'static Regex {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    PHONE_REGEX.get_or_init(|| Regex::new(r"^\d{10}$").expect("valid phone regex"))
}

/// 验证手机号：必须是 10 位数字
pub fn validate_phone(phone: &str) -> AppResult<()> {
    if !phone_regex().is_match(phone) {
        return Err(AppError::ValidationError(
            "Phone must be a 10-digit number".to_string(),
        ));
    }

    Ok(())
}
