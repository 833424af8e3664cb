//! Allow-listed request bodies for the five editable profile sections.
//!
//! Each `*Request` accepts only the fields it names (anything else in the body
//! is dropped during deserialization) and converts into a fully-typed
//! `*Update` through `validate`, which reports the first failing rule.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::validation::{
    ensure, is_aadhaar, is_digits, is_pan, optional, optional_date, required, required_date,
    required_id,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoRequest {
    pub aadhaar_no: Option<String>,
    pub pan: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub marital: Option<Value>,
    pub blood_group: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalInfoUpdate {
    pub aadhaar_no: String,
    pub pan: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub marital: i64,
    pub blood_group: i64,
}

impl PersonalInfoRequest {
    pub fn validate(self) -> Result<PersonalInfoUpdate, AppError> {
        let aadhaar_no = required(self.aadhaar_no, "Aadhaar number is required.")?;
        ensure(
            is_aadhaar(&aadhaar_no),
            "Aadhaar number must be 12 digits and should not start with 0 or 1.",
        )?;
        let pan = required(self.pan, "PAN number is required.")?;
        ensure(is_pan(&pan), "PAN number must be in the format ABCDE1234F.")?;
        let phone = required(self.phone, "Phone number is required.")?;
        ensure(is_digits(&phone, 10), "Phone number must be exactly 10 digits.")?;
        let dob = required_date(
            self.dob,
            "Date of birth is required.",
            "Enter a valid date of birth (YYYY-MM-DD).",
        )?;
        let marital = required_id(self.marital.as_ref(), "Enter a valid marital ID")?;
        let blood_group = required_id(self.blood_group.as_ref(), "Enter a valid blood group ID")?;

        Ok(PersonalInfoUpdate {
            aadhaar_no,
            pan,
            phone,
            dob,
            marital,
            blood_group,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationInfoRequest {
    pub degree: Option<Value>,
    pub college: Option<String>,
    pub university: Option<Value>,
    pub city: Option<String>,
    pub state: Option<Value>,
    pub pincode: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationInfoUpdate {
    pub degree: i64,
    pub college: String,
    pub university: i64,
    pub city: String,
    pub state: i64,
    pub pincode: String,
    pub start_year: NaiveDate,
    pub end_year: NaiveDate,
}

impl EducationInfoRequest {
    pub fn validate(self) -> Result<EducationInfoUpdate, AppError> {
        let degree = required_id(self.degree.as_ref(), "Enter a valid degree ID")?;
        let college = required(self.college, "College name is required.")?;
        let university = required_id(self.university.as_ref(), "Enter a valid university ID")?;
        let city = required(self.city, "City name is required.")?;
        let state = required_id(self.state.as_ref(), "Enter a valid state ID")?;
        let pincode = required(self.pincode, "PIN code is required.")?;
        ensure(is_digits(&pincode, 6), "PIN code must be exactly 6 digits.")?;
        let start_year = required_date(
            self.start_year,
            "Start date is required.",
            "Invalid start date format. Please use YYYY-MM-DD.",
        )?;
        let end_year = required_date(
            self.end_year,
            "End date is required.",
            "Invalid end date format. Please use YYYY-MM-DD.",
        )?;
        ensure(end_year >= start_year, "End date must not be before the start date.")?;

        Ok(EducationInfoUpdate {
            degree,
            college,
            university,
            city,
            state,
            pincode,
            start_year,
            end_year,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressInfoRequest {
    pub addr_type: Option<Value>,
    pub addr1: Option<String>,
    pub addr2: Option<String>,
    pub addr3: Option<String>,
    pub city: Option<String>,
    pub state: Option<Value>,
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressInfoUpdate {
    pub addr_type: i64,
    pub addr1: String,
    pub addr2: Option<String>,
    pub addr3: Option<String>,
    pub city: String,
    pub state: i64,
    pub pincode: String,
}

impl AddressInfoRequest {
    pub fn validate(self) -> Result<AddressInfoUpdate, AppError> {
        let addr_type = required_id(self.addr_type.as_ref(), "Enter a valid address type ID")?;
        let addr1 = required(self.addr1, "Address Line 1 is required.")?;
        let addr2 = optional(self.addr2);
        let addr3 = optional(self.addr3);
        let city = required(self.city, "City name is required.")?;
        let state = required_id(self.state.as_ref(), "Enter a valid state ID")?;
        let pincode = required(self.pincode, "PIN code is required.")?;
        ensure(is_digits(&pincode, 6), "PIN code must be exactly 6 digits.")?;

        Ok(AddressInfoUpdate {
            addr_type,
            addr1,
            addr2,
            addr3,
            city,
            state,
            pincode,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceInfoRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub city: Option<String>,
    pub state: Option<Value>,
    pub pincode: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceInfoUpdate {
    pub name: String,
    pub role: String,
    pub city: String,
    pub state: i64,
    pub pincode: String,
    pub start_year: NaiveDate,
    /// `None` while the position is current.
    pub end_year: Option<NaiveDate>,
}

impl ExperienceInfoRequest {
    pub fn validate(self) -> Result<ExperienceInfoUpdate, AppError> {
        let name = required(self.name, "Company name is required.")?;
        let role = required(self.role, "Role is required.")?;
        let city = required(self.city, "City name is required.")?;
        let state = required_id(self.state.as_ref(), "Enter a valid state ID")?;
        let pincode = required(self.pincode, "PIN code is required.")?;
        ensure(is_digits(&pincode, 6), "PIN code must be exactly 6 digits.")?;
        let start_year = required_date(
            self.start_year,
            "Start date is required.",
            "Invalid start date format. Please use YYYY-MM-DD.",
        )?;
        let end_year = optional_date(
            self.end_year,
            "Invalid end date format. Please use YYYY-MM-DD.",
        )?;
        if let Some(end) = end_year {
            ensure(end >= start_year, "End date must not be before the start date.")?;
        }

        Ok(ExperienceInfoUpdate {
            name,
            role,
            city,
            state,
            pincode,
            start_year,
            end_year,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyInfoRequest {
    pub relationship: Option<Value>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FamilyInfoUpdate {
    pub relationship: i64,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub phone: String,
}

impl FamilyInfoRequest {
    pub fn validate(self) -> Result<FamilyInfoUpdate, AppError> {
        let relationship = required_id(self.relationship.as_ref(), "Enter a valid relationship ID")?;
        let first_name = required(self.first_name, "First name is required.")?;
        let middle_name = required(self.middle_name, "Middle name is required.")?;
        let last_name = required(self.last_name, "Last name is required.")?;
        let phone = required(self.phone, "Phone number is required.")?;
        ensure(is_digits(&phone, 10), "Phone number must be exactly 10 digits.")?;

        Ok(FamilyInfoUpdate {
            relationship,
            first_name,
            middle_name,
            last_name,
            phone,
        })
    }
}
