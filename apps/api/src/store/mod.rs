//! Store: the relational collaborator behind every read and write.
//!
//! Split into one trait per concern so core logic can ask for exactly what it
//! touches (`&S where S: LookupStore + ?Sized`). `AppState` carries the
//! combined `Arc<dyn Store>`; production uses `PgStore`, tests `MemoryStore`.

use async_trait::async_trait;
use thiserror::Error;

use crate::lookup::LookupKind;
use crate::models::company::{CompanyPage, CompanyQuery, CompanyRow, NewCompany};
use crate::models::employee::{EmployeeRow, NewEmployee};
use crate::models::lookup::LookupEntry;
use crate::models::profile::{
    AddressInfoRow, EducationInfoRow, ExperienceInfoRow, FamilyInfoRow, PersonalInfoRow,
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// Store failure. Only `Conflict` is meant to be recovered by callers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A write hit a unique constraint; carries the constraint name.
    #[error("unique constraint violated: {0}")]
    Conflict(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait LookupStore: Send + Sync {
    /// All `(id, code)` pairs whose discriminator matches `kind`, ordered by id.
    async fn lookup_entries(&self, kind: LookupKind) -> StoreResult<Vec<LookupEntry>>;

    /// The `role` entry with the given id, if any.
    async fn role_label(&self, role_id: i64) -> StoreResult<Option<LookupEntry>>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_employee(&self, id: i64) -> StoreResult<Option<EmployeeRow>>;
    async fn find_employee_by_email(&self, email: &str) -> StoreResult<Option<EmployeeRow>>;
    /// Returns the new employee id.
    async fn insert_employee(&self, employee: &NewEmployee) -> StoreResult<i64>;
    async fn update_password(&self, id: i64, password_hash: &str) -> StoreResult<()>;
    async fn update_contact(&self, id: i64, phone: &str, dob: chrono::NaiveDate) -> StoreResult<()>;
}

/// Per-section reads by employee id and single-row upserts.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_personal(&self, emp_id: i64) -> StoreResult<Option<PersonalInfoRow>>;
    async fn find_education(&self, emp_id: i64) -> StoreResult<Option<EducationInfoRow>>;
    async fn find_address(&self, emp_id: i64) -> StoreResult<Option<AddressInfoRow>>;
    async fn find_experience(&self, emp_id: i64) -> StoreResult<Option<ExperienceInfoRow>>;
    async fn find_family(&self, emp_id: i64) -> StoreResult<Option<FamilyInfoRow>>;

    async fn upsert_personal(&self, row: &PersonalInfoRow) -> StoreResult<()>;
    async fn upsert_education(&self, row: &EducationInfoRow) -> StoreResult<()>;
    async fn upsert_address(&self, row: &AddressInfoRow) -> StoreResult<()>;
    async fn upsert_experience(&self, row: &ExperienceInfoRow) -> StoreResult<()>;
    async fn upsert_family(&self, row: &FamilyInfoRow) -> StoreResult<()>;
}

#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn find_company(&self, id: i64) -> StoreResult<Option<CompanyRow>>;
    async fn company_name_exists(&self, name: &str) -> StoreResult<bool>;
    async fn company_code_exists(&self, co_code: &str) -> StoreResult<bool>;
    async fn insert_company(&self, company: &NewCompany) -> StoreResult<i64>;
    async fn list_companies(&self, query: &CompanyQuery) -> StoreResult<CompanyPage>;
}

/// Everything the HTTP layer needs from persistence.
pub trait Store: LookupStore + EmployeeStore + ProfileStore + CompanyStore {}

impl<T> Store for T where T: LookupStore + EmployeeStore + ProfileStore + CompanyStore {}
