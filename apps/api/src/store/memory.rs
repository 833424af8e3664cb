use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use super::{CompanyStore, EmployeeStore, LookupStore, ProfileStore, StoreError, StoreResult};
use crate::lookup::LookupKind;
use crate::models::company::{CompanyPage, CompanyQuery, CompanyRow, NewCompany};
use crate::models::employee::{EmployeeRow, NewEmployee};
use crate::models::lookup::LookupEntry;
use crate::models::profile::{
    AddressInfoRow, EducationInfoRow, ExperienceInfoRow, FamilyInfoRow, PersonalInfoRow,
};

#[derive(Debug, Clone)]
struct LookupRecord {
    id: i64,
    lookup_type: String,
    code: String,
}

#[derive(Debug, Default)]
struct Tables {
    lookups: Vec<LookupRecord>,
    employees: Vec<EmployeeRow>,
    personal: Vec<PersonalInfoRow>,
    education: Vec<EducationInfoRow>,
    address: Vec<AddressInfoRow>,
    experience: Vec<ExperienceInfoRow>,
    family: Vec<FamilyInfoRow>,
    companies: Vec<CompanyRow>,
}

/// In-memory store for tests. Section tables are plain vectors with the same
/// update-if-present-else-insert behaviour as the Postgres upsert.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    failing: Arc<AtomicBool>,
    blind_checks: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent call fails with a store error.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Duplicate lookups by email or company name see nothing from now on, as
    /// when a concurrent request inserts between the check and the write.
    pub fn blind_duplicate_checks(&self) {
        self.blind_checks.store(true, Ordering::SeqCst);
    }

    pub fn add_lookup(&self, id: i64, lookup_type: &str, code: &str) {
        self.tables().lookups.push(LookupRecord {
            id,
            lookup_type: lookup_type.to_string(),
            code: code.to_string(),
        });
    }

    pub fn add_employee(&self, employee: EmployeeRow) {
        self.tables().employees.push(employee);
    }

    pub fn employee(&self, id: i64) -> Option<EmployeeRow> {
        self.tables().employees.iter().find(|e| e.id == id).cloned()
    }

    pub fn personal_rows(&self, emp_id: i64) -> Vec<PersonalInfoRow> {
        self.tables()
            .personal
            .iter()
            .filter(|r| r.emp_id == emp_id)
            .cloned()
            .collect()
    }

    pub fn education_rows(&self, emp_id: i64) -> usize {
        self.tables().education.iter().filter(|r| r.emp_id == emp_id).count()
    }

    pub fn address_rows(&self, emp_id: i64) -> usize {
        self.tables().address.iter().filter(|r| r.emp_id == emp_id).count()
    }

    pub fn experience_rows(&self, emp_id: i64) -> usize {
        self.tables().experience.iter().filter(|r| r.emp_id == emp_id).count()
    }

    pub fn family_rows(&self, emp_id: i64) -> usize {
        self.tables().family.iter().filter(|r| r.emp_id == emp_id).count()
    }

    pub fn company_count(&self) -> usize {
        self.tables().companies.len()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store mutex poisoned")
    }

    fn blind(&self) -> bool {
        self.blind_checks.load(Ordering::SeqCst)
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

fn upsert_by_emp<T: Clone>(rows: &mut Vec<T>, row: &T, emp_id: impl Fn(&T) -> i64) {
    let key = emp_id(row);
    match rows.iter_mut().find(|r| emp_id(r) == key) {
        Some(existing) => *existing = row.clone(),
        None => rows.push(row.clone()),
    }
}

#[async_trait]
impl LookupStore for MemoryStore {
    async fn lookup_entries(&self, kind: LookupKind) -> StoreResult<Vec<LookupEntry>> {
        self.check()?;
        let mut entries: Vec<LookupEntry> = self
            .tables()
            .lookups
            .iter()
            .filter(|l| l.lookup_type == kind.discriminator())
            .map(|l| LookupEntry::new(l.id, l.code.clone()))
            .collect();
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }

    async fn role_label(&self, role_id: i64) -> StoreResult<Option<LookupEntry>> {
        self.check()?;
        Ok(self
            .tables()
            .lookups
            .iter()
            .find(|l| l.lookup_type == "role" && l.id == role_id)
            .map(|l| LookupEntry::new(l.id, l.code.clone())))
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn find_employee(&self, id: i64) -> StoreResult<Option<EmployeeRow>> {
        self.check()?;
        Ok(self.employee(id))
    }

    async fn find_employee_by_email(&self, email: &str) -> StoreResult<Option<EmployeeRow>> {
        self.check()?;
        if self.blind() {
            return Ok(None);
        }
        Ok(self
            .tables()
            .employees
            .iter()
            .find(|e| e.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_employee(&self, employee: &NewEmployee) -> StoreResult<i64> {
        self.check()?;
        let mut tables = self.tables();
        if tables
            .employees
            .iter()
            .any(|e| e.email.eq_ignore_ascii_case(&employee.email))
        {
            return Err(StoreError::Conflict("emp_info_email_idx".to_string()));
        }
        let id = tables.employees.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        tables.employees.push(EmployeeRow {
            id,
            first_name: employee.first_name.clone(),
            middle_name: Some(employee.middle_name.clone()),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            phone: Some(employee.phone.clone()),
            password_hash: employee.password_hash.clone(),
            dob: Some(employee.dob),
            doj: None,
            dos: None,
            gender: None,
            role_id: None,
        });
        Ok(id)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> StoreResult<()> {
        self.check()?;
        if let Some(e) = self.tables().employees.iter_mut().find(|e| e.id == id) {
            e.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    async fn update_contact(&self, id: i64, phone: &str, dob: NaiveDate) -> StoreResult<()> {
        self.check()?;
        if let Some(e) = self.tables().employees.iter_mut().find(|e| e.id == id) {
            e.phone = Some(phone.to_string());
            e.dob = Some(dob);
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_personal(&self, emp_id: i64) -> StoreResult<Option<PersonalInfoRow>> {
        self.check()?;
        Ok(self.tables().personal.iter().find(|r| r.emp_id == emp_id).cloned())
    }

    async fn find_education(&self, emp_id: i64) -> StoreResult<Option<EducationInfoRow>> {
        self.check()?;
        Ok(self.tables().education.iter().find(|r| r.emp_id == emp_id).cloned())
    }

    async fn find_address(&self, emp_id: i64) -> StoreResult<Option<AddressInfoRow>> {
        self.check()?;
        Ok(self.tables().address.iter().find(|r| r.emp_id == emp_id).cloned())
    }

    async fn find_experience(&self, emp_id: i64) -> StoreResult<Option<ExperienceInfoRow>> {
        self.check()?;
        Ok(self.tables().experience.iter().find(|r| r.emp_id == emp_id).cloned())
    }

    async fn find_family(&self, emp_id: i64) -> StoreResult<Option<FamilyInfoRow>> {
        self.check()?;
        Ok(self.tables().family.iter().find(|r| r.emp_id == emp_id).cloned())
    }

    async fn upsert_personal(&self, row: &PersonalInfoRow) -> StoreResult<()> {
        self.check()?;
        upsert_by_emp(&mut self.tables().personal, row, |r| r.emp_id);
        Ok(())
    }

    async fn upsert_education(&self, row: &EducationInfoRow) -> StoreResult<()> {
        self.check()?;
        upsert_by_emp(&mut self.tables().education, row, |r| r.emp_id);
        Ok(())
    }

    async fn upsert_address(&self, row: &AddressInfoRow) -> StoreResult<()> {
        self.check()?;
        upsert_by_emp(&mut self.tables().address, row, |r| r.emp_id);
        Ok(())
    }

    async fn upsert_experience(&self, row: &ExperienceInfoRow) -> StoreResult<()> {
        self.check()?;
        upsert_by_emp(&mut self.tables().experience, row, |r| r.emp_id);
        Ok(())
    }

    async fn upsert_family(&self, row: &FamilyInfoRow) -> StoreResult<()> {
        self.check()?;
        upsert_by_emp(&mut self.tables().family, row, |r| r.emp_id);
        Ok(())
    }
}

fn company_matches(c: &CompanyRow, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    let id = c.id.to_string();
    [
        c.name.as_str(),
        id.as_str(),
        c.auth_name.as_str(),
        c.auth_mail.as_str(),
        c.mgr_first_name.as_str(),
        c.mgr_middle_name.as_str(),
        c.mgr_last_name.as_str(),
        c.mgr_mail.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn find_company(&self, id: i64) -> StoreResult<Option<CompanyRow>> {
        self.check()?;
        Ok(self.tables().companies.iter().find(|c| c.id == id).cloned())
    }

    async fn company_name_exists(&self, name: &str) -> StoreResult<bool> {
        self.check()?;
        if self.blind() {
            return Ok(false);
        }
        Ok(self
            .tables()
            .companies
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name)))
    }

    async fn company_code_exists(&self, co_code: &str) -> StoreResult<bool> {
        self.check()?;
        Ok(self.tables().companies.iter().any(|c| c.co_code == co_code))
    }

    async fn insert_company(&self, c: &NewCompany) -> StoreResult<i64> {
        self.check()?;
        let mut tables = self.tables();
        if tables
            .companies
            .iter()
            .any(|row| row.name.eq_ignore_ascii_case(&c.name))
        {
            return Err(StoreError::Conflict("co_info_name_idx".to_string()));
        }
        let id = tables.companies.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        tables.companies.push(CompanyRow {
            id,
            co_code: c.co_code.clone(),
            name: c.name.clone(),
            plan_id: c.plan_id,
            co_type: c.co_type.clone(),
            date_attach: c.date_attach,
            pan_attach: c.pan_attach.clone(),
            gst_attach: c.gst_attach.clone(),
            tan_attach: c.tan_attach.clone(),
            add1: c.add1.clone(),
            add2: c.add2.clone(),
            add3: c.add3.clone(),
            city: c.city.clone(),
            state: c.state.clone(),
            pin: c.pin.clone(),
            auth_name: c.auth_name.clone(),
            auth_mail: c.auth_mail.clone(),
            auth_phone: c.auth_phone.clone(),
            mgr_is_active: c.mgr_is_active,
            mgr_emp_id: c.mgr_emp_id.clone(),
            mgr_first_name: c.mgr_first_name.clone(),
            mgr_middle_name: c.mgr_middle_name.clone(),
            mgr_last_name: c.mgr_last_name.clone(),
            mgr_phone: c.mgr_phone.clone(),
            mgr_mail: c.mgr_mail.clone(),
            whatsapp: c.whatsapp.clone(),
            website: c.website.clone(),
            linkedin: c.linkedin.clone(),
            facebook: c.facebook.clone(),
            instagram: c.instagram.clone(),
            twitter: c.twitter.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_companies(&self, query: &CompanyQuery) -> StoreResult<CompanyPage> {
        self.check()?;
        let mut matching: Vec<CompanyRow> = self
            .tables()
            .companies
            .iter()
            .filter(|c| query.filter.as_deref().map_or(true, |f| company_matches(c, f)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));
        let total_count = matching.len() as i64;
        let companies = matching
            .into_iter()
            .skip(query.offset().max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect();
        Ok(CompanyPage {
            companies,
            total_count,
        })
    }
}
