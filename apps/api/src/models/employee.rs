use chrono::NaiveDate;
use sqlx::FromRow;

/// Row of `emp_info`. Deliberately not `Serialize`: it carries the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub dob: Option<NaiveDate>,
    pub doj: Option<NaiveDate>,
    pub dos: Option<NaiveDate>,
    pub gender: Option<i64>,
    pub role_id: Option<i64>,
}

impl EmployeeRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub dob: NaiveDate,
}
