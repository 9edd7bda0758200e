//! Login and registration form handling

use crate::auth::models::{LoginRequest, ProfileDetails, RegisterRequest};
use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

pub const INVALID_PINCODE: &str = "Please enter a valid pincode (numbers only)";

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .expect("Invalid regex pattern - this is a bug in the codebase")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Rough password strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Fair,
    Strong,
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordStrength::Weak => write!(f, "weak"),
            PasswordStrength::Fair => write!(f, "fair"),
            PasswordStrength::Strong => write!(f, "strong"),
        }
    }
}

/// Score a password. Anything under 8 characters is weak outright.
pub fn password_strength(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    if length < 8 {
        return PasswordStrength::Weak;
    }

    let checks = [
        true,
        length >= 12,
        password.chars().any(|c| c.is_lowercase()),
        password.chars().any(|c| c.is_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_alphanumeric()),
    ];
    let score = checks.iter().filter(|passed| **passed).count();

    if score >= 5 {
        PasswordStrength::Strong
    } else if score >= 3 {
        PasswordStrength::Fair
    } else {
        PasswordStrength::Weak
    }
}

fn required(value: &str, label: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(format!("{} is required", label)));
    }
    Ok(value.to_string())
}

fn checked_email(email: &str) -> Result<String> {
    let email = required(email, "Email")?;
    if !is_valid_email(&email) {
        return Err(Error::Validation(format!("'{}' is not a valid email", email)));
    }
    Ok(email)
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Result<Self> {
        if password.is_empty() {
            return Err(Error::Validation("Password is required".to_string()));
        }
        Ok(Self {
            email: checked_email(email)?,
            password: password.to_string(),
        })
    }
}

/// Optional contact fields, as typed
#[derive(Debug, Clone, Default)]
pub struct DetailsForm {
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub country: String,
    pub phone: String,
}

impl DetailsForm {
    /// Keep the filled-in fields. `None` when every field is blank.
    pub fn into_details(self) -> Result<Option<ProfileDetails>> {
        let details = ProfileDetails {
            address: optional(&self.address),
            city: optional(&self.city),
            postal_code: parse_pincode(&self.pincode)?,
            country: optional(&self.country),
            phone: optional(&self.phone),
            ..Default::default()
        };
        Ok((!details.is_empty()).then_some(details))
    }
}

/// Raw registration form input, as typed
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub details: DetailsForm,
}

impl RegisterForm {
    /// Validate the form and build the request payload.
    ///
    /// Blank optional fields are left out, and `details` is omitted
    /// altogether when every one of them is blank.
    pub fn into_request(self) -> Result<RegisterRequest> {
        let name = required(&self.name, "Name")?;
        let email = checked_email(&self.email)?;
        if self.password.is_empty() {
            return Err(Error::Validation("Password is required".to_string()));
        }
        let strength = password_strength(&self.password);
        if strength < PasswordStrength::Fair {
            return Err(Error::Validation(
                "Password is too weak: use at least 8 characters mixing letters, digits and symbols"
                    .to_string(),
            ));
        }

        Ok(RegisterRequest {
            name,
            email,
            password: self.password,
            details: self.details.into_details()?,
        })
    }
}

/// Parse an optional numeric pincode; blank means not given
pub fn parse_pincode(value: &str) -> Result<Option<u32>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Validation(INVALID_PINCODE.to_string()));
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| Error::Validation(INVALID_PINCODE.to_string()))
}
