use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::validation::{check_new_password, ensure, is_digits, is_email, required, required_date};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, AppError> {
        let email = required(self.email, "Email is required.")?;
        ensure(is_email(&email), "Please enter a valid email address.")?;
        let password = required(self.password, "Password is required.")?;
        ensure(
            password.chars().count() >= 8,
            "Please enter a password with 8 or more characters.",
        )?;
        Ok(Credentials { email, password })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub dob: Option<String>,
}

/// Sign-up fields after validation; the password is still plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUp {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub dob: NaiveDate,
}

impl SignUpRequest {
    pub fn validate(self) -> Result<SignUp, AppError> {
        let first_name = required(self.first_name, "First name is required.")?;
        let middle_name = required(self.middle_name, "Middle name is required.")?;
        let last_name = required(self.last_name, "Last name is required.")?;
        let email = required(self.email, "Email is required.")?;
        ensure(is_email(&email), "Please enter a valid email address.")?;
        let phone = required(self.phone, "Phone number is required.")?;
        ensure(is_digits(&phone, 10), "Phone number must be exactly 10 digits.")?;
        let password = check_new_password(self.password)?;
        let dob = required_date(
            self.dob,
            "Date of birth is required.",
            "Enter a valid date of birth (YYYY-MM-DD).",
        )?;

        Ok(SignUp {
            first_name,
            middle_name,
            last_name,
            email,
            phone,
            password,
            dob,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

impl ForgotPasswordRequest {
    pub fn validate(self) -> Result<String, AppError> {
        let email = required(self.email, "Email is required.")?;
        ensure(is_email(&email), "Please enter a valid email address.")?;
        Ok(email)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetTokenQuery {
    pub token: Option<String>,
}
