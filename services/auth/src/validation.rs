//! Input validation utilities for the registration form

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{RegisterRequest, RegistrationForm};

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("hard-coded pattern compiles"))
}

/// Value must be present and within `min..=max` characters
fn check_length(value: &str, field: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len == 0 {
        Err(format!("{} is required", field))
    } else if len < min {
        Err(format!("{} must be at least {} characters long", field, min))
    } else if len > max {
        Err(format!("{} must be at most {} characters long", field, max))
    } else {
        Ok(())
    }
}

/// 3 to 50 letters, digits, dots or underscores
pub fn validate_username(username: &str) -> Result<(), String> {
    check_length(username, "Username", 3, 50)?;

    static USERNAME: OnceLock<Regex> = OnceLock::new();
    if pattern(&USERNAME, r"^[a-zA-Z0-9_.]+$").is_match(username) {
        Ok(())
    } else {
        Err("Username can only contain letters, numbers, dots and underscores".to_string())
    }
}

pub fn validate_email(email: &str) -> Result<(), String> {
    check_length(email, "Email", 1, 254)?;

    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = pattern(&EMAIL, r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$");
    if re.is_match(email) {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

/// The confirmation is compared before any other rule
pub fn validate_password(password: &str, confirm_password: &str) -> Result<(), String> {
    if password != confirm_password {
        return Err("Passwords do not match".to_string());
    }
    check_length(password, "Password", 6, 128)
}

/// Validate a registration form and turn it into the request payload
pub fn validate_registration(form: &RegistrationForm) -> Result<RegisterRequest, String> {
    validate_password(&form.password, &form.confirm_password)?;
    validate_username(&form.username)?;
    check_length(form.name.trim(), "Name", 1, 100)?;
    validate_email(&form.email)?;
    check_length(form.department.trim(), "Department", 1, 100)?;
    let role = form.role.ok_or_else(|| "Role is required".to_string())?;

    Ok(RegisterRequest {
        username: form.username.clone(),
        password: form.password.clone(),
        name: form.name.trim().to_string(),
        email: form.email.clone(),
        department: form.department.trim().to_string(),
        role,
    })
}
