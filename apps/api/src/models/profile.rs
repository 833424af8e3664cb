use chrono::NaiveDate;
use sqlx::FromRow;

// One row per (section, employee); `emp_id` is unique in every section table.

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PersonalInfoRow {
    pub emp_id: i64,
    pub aadhaar_no: Option<String>,
    pub pan: Option<String>,
    pub marital: Option<i64>,
    pub blood_group: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EducationInfoRow {
    pub emp_id: i64,
    pub degree: Option<i64>,
    pub college: Option<String>,
    pub university: Option<i64>,
    pub city: Option<String>,
    pub state: Option<i64>,
    pub pincode: Option<String>,
    pub start_year: Option<NaiveDate>,
    pub end_year: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AddressInfoRow {
    pub emp_id: i64,
    pub addr_type: Option<i64>,
    pub addr1: Option<String>,
    pub addr2: Option<String>,
    pub addr3: Option<String>,
    pub city: Option<String>,
    pub state: Option<i64>,
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ExperienceInfoRow {
    pub emp_id: i64,
    pub name: Option<String>,
    pub role: Option<String>,
    pub city: Option<String>,
    pub state: Option<i64>,
    pub pincode: Option<String>,
    pub start_year: Option<NaiveDate>,
    pub end_year: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FamilyInfoRow {
    pub emp_id: i64,
    pub relationship: Option<i64>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}
