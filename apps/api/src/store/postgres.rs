use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::{CompanyStore, EmployeeStore, LookupStore, ProfileStore, StoreError, StoreResult};
use crate::lookup::LookupKind;
use crate::models::company::{CompanyPage, CompanyQuery, CompanyRow, NewCompany};
use crate::models::employee::{EmployeeRow, NewEmployee};
use crate::models::lookup::LookupEntry;
use crate::models::profile::{
    AddressInfoRow, EducationInfoRow, ExperienceInfoRow, FamilyInfoRow, PersonalInfoRow,
};

/// Postgres-backed store. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

const EMPLOYEE_COLUMNS: &str = "id, first_name, middle_name, last_name, email, phone, \
     password_hash, dob, doj, dos, gender, role_id";

#[async_trait]
impl LookupStore for PgStore {
    async fn lookup_entries(&self, kind: LookupKind) -> StoreResult<Vec<LookupEntry>> {
        Ok(sqlx::query_as::<_, LookupEntry>(
            "SELECT id, code AS value FROM common_lookup WHERE lookup_type = $1 ORDER BY id",
        )
        .bind(kind.discriminator())
        .fetch_all(&self.pool)
        .await?)
    }

    async fn role_label(&self, role_id: i64) -> StoreResult<Option<LookupEntry>> {
        Ok(sqlx::query_as::<_, LookupEntry>(
            "SELECT id, code AS value FROM common_lookup WHERE lookup_type = 'role' AND id = $1",
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl EmployeeStore for PgStore {
    async fn find_employee(&self, id: i64) -> StoreResult<Option<EmployeeRow>> {
        Ok(sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM emp_info WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_employee_by_email(&self, email: &str) -> StoreResult<Option<EmployeeRow>> {
        Ok(sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM emp_info WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_employee(&self, employee: &NewEmployee) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO emp_info
                (first_name, middle_name, last_name, email, phone, password_hash, dob)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.middle_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(&employee.password_hash)
        .bind(employee.dob)
        .fetch_one(&self.pool)
        .await
        .map_err(unique_violation)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> StoreResult<()> {
        sqlx::query("UPDATE emp_info SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_contact(&self, id: i64, phone: &str, dob: NaiveDate) -> StoreResult<()> {
        sqlx::query("UPDATE emp_info SET phone = $1, dob = $2 WHERE id = $3")
            .bind(phone)
            .bind(dob)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// Upserts are single statements against the UNIQUE (emp_id) constraint, so two
// concurrent first-time submissions cannot produce duplicate section rows.
#[async_trait]
impl ProfileStore for PgStore {
    async fn find_personal(&self, emp_id: i64) -> StoreResult<Option<PersonalInfoRow>> {
        Ok(sqlx::query_as::<_, PersonalInfoRow>(
            "SELECT emp_id, aadhaar_no, pan, marital, blood_group FROM pers_info WHERE emp_id = $1",
        )
        .bind(emp_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_education(&self, emp_id: i64) -> StoreResult<Option<EducationInfoRow>> {
        Ok(sqlx::query_as::<_, EducationInfoRow>(
            r#"
            SELECT emp_id, degree, college, university, city, state, pincode, start_year, end_year
            FROM edu_info WHERE emp_id = $1
            "#,
        )
        .bind(emp_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_address(&self, emp_id: i64) -> StoreResult<Option<AddressInfoRow>> {
        Ok(sqlx::query_as::<_, AddressInfoRow>(
            r#"
            SELECT emp_id, addr_type, addr1, addr2, addr3, city, state, pincode
            FROM addr_info WHERE emp_id = $1
            "#,
        )
        .bind(emp_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_experience(&self, emp_id: i64) -> StoreResult<Option<ExperienceInfoRow>> {
        Ok(sqlx::query_as::<_, ExperienceInfoRow>(
            r#"
            SELECT emp_id, name, role, city, state, pincode, start_year, end_year
            FROM expr_info WHERE emp_id = $1
            "#,
        )
        .bind(emp_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_family(&self, emp_id: i64) -> StoreResult<Option<FamilyInfoRow>> {
        Ok(sqlx::query_as::<_, FamilyInfoRow>(
            r#"
            SELECT emp_id, relationship, first_name, middle_name, last_name, phone
            FROM fami_info WHERE emp_id = $1
            "#,
        )
        .bind(emp_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn upsert_personal(&self, row: &PersonalInfoRow) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pers_info (emp_id, aadhaar_no, pan, marital, blood_group)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (emp_id) DO UPDATE SET
                aadhaar_no = EXCLUDED.aadhaar_no,
                pan = EXCLUDED.pan,
                marital = EXCLUDED.marital,
                blood_group = EXCLUDED.blood_group
            "#,
        )
        .bind(row.emp_id)
        .bind(&row.aadhaar_no)
        .bind(&row.pan)
        .bind(row.marital)
        .bind(row.blood_group)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn upsert_education(&self, row: &EducationInfoRow) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO edu_info
                (emp_id, degree, college, university, city, state, pincode, start_year, end_year)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (emp_id) DO UPDATE SET
                degree = EXCLUDED.degree,
                college = EXCLUDED.college,
                university = EXCLUDED.university,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                pincode = EXCLUDED.pincode,
                start_year = EXCLUDED.start_year,
                end_year = EXCLUDED.end_year
            "#,
        )
        .bind(row.emp_id)
        .bind(row.degree)
        .bind(&row.college)
        .bind(row.university)
        .bind(&row.city)
        .bind(row.state)
        .bind(&row.pincode)
        .bind(row.start_year)
        .bind(row.end_year)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn upsert_address(&self, row: &AddressInfoRow) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO addr_info (emp_id, addr_type, addr1, addr2, addr3, city, state, pincode)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (emp_id) DO UPDATE SET
                addr_type = EXCLUDED.addr_type,
                addr1 = EXCLUDED.addr1,
                addr2 = EXCLUDED.addr2,
                addr3 = EXCLUDED.addr3,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                pincode = EXCLUDED.pincode
            "#,
        )
        .bind(row.emp_id)
        .bind(row.addr_type)
        .bind(&row.addr1)
        .bind(&row.addr2)
        .bind(&row.addr3)
        .bind(&row.city)
        .bind(row.state)
        .bind(&row.pincode)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn upsert_experience(&self, row: &ExperienceInfoRow) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO expr_info
                (emp_id, name, role, city, state, pincode, start_year, end_year)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (emp_id) DO UPDATE SET
                name = EXCLUDED.name,
                role = EXCLUDED.role,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                pincode = EXCLUDED.pincode,
                start_year = EXCLUDED.start_year,
                end_year = EXCLUDED.end_year
            "#,
        )
        .bind(row.emp_id)
        .bind(&row.name)
        .bind(&row.role)
        .bind(&row.city)
        .bind(row.state)
        .bind(&row.pincode)
        .bind(row.start_year)
        .bind(row.end_year)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn upsert_family(&self, row: &FamilyInfoRow) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO fami_info (emp_id, relationship, first_name, middle_name, last_name, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (emp_id) DO UPDATE SET
                relationship = EXCLUDED.relationship,
                first_name = EXCLUDED.first_name,
                middle_name = EXCLUDED.middle_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone
            "#,
        )
        .bind(row.emp_id)
        .bind(row.relationship)
        .bind(&row.first_name)
        .bind(&row.middle_name)
        .bind(&row.last_name)
        .bind(&row.phone)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

const COMPANY_FILTER: &str = r#"
    ($1::text IS NULL
        OR name ILIKE $1
        OR id::text ILIKE $1
        OR auth_name ILIKE $1
        OR auth_mail ILIKE $1
        OR mgr_first_name ILIKE $1
        OR mgr_middle_name ILIKE $1
        OR mgr_last_name ILIKE $1
        OR mgr_mail ILIKE $1)
"#;

/// Wraps a search term for substring matching, escaping LIKE metacharacters.
fn like_pattern(filter: &str) -> String {
    let escaped = filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Surfaces unique-index violations as `StoreError::Conflict` so the losing
/// side of a check-then-insert race is reported as a conflict.
fn unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::Conflict(db.constraint().unwrap_or("unique").to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl CompanyStore for PgStore {
    async fn find_company(&self, id: i64) -> StoreResult<Option<CompanyRow>> {
        Ok(
            sqlx::query_as::<_, CompanyRow>("SELECT * FROM co_info WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn company_name_exists(&self, name: &str) -> StoreResult<bool> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM co_info WHERE lower(name) = lower($1))",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn company_code_exists(&self, co_code: &str) -> StoreResult<bool> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM co_info WHERE co_code = $1)")
                .bind(co_code)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn insert_company(&self, c: &NewCompany) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO co_info
                (co_code, name, plan_id, co_type, date_attach, pan_attach, gst_attach, tan_attach,
                 add1, add2, add3, city, state, pin, auth_name, auth_mail, auth_phone,
                 mgr_is_active, mgr_emp_id, mgr_first_name, mgr_middle_name, mgr_last_name,
                 mgr_phone, mgr_mail, whatsapp, website, linkedin, facebook, instagram, twitter)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30)
            RETURNING id
            "#,
        )
        .bind(&c.co_code)
        .bind(&c.name)
        .bind(c.plan_id)
        .bind(&c.co_type)
        .bind(c.date_attach)
        .bind(&c.pan_attach)
        .bind(&c.gst_attach)
        .bind(&c.tan_attach)
        .bind(&c.add1)
        .bind(&c.add2)
        .bind(&c.add3)
        .bind(&c.city)
        .bind(&c.state)
        .bind(&c.pin)
        .bind(&c.auth_name)
        .bind(&c.auth_mail)
        .bind(&c.auth_phone)
        .bind(c.mgr_is_active)
        .bind(&c.mgr_emp_id)
        .bind(&c.mgr_first_name)
        .bind(&c.mgr_middle_name)
        .bind(&c.mgr_last_name)
        .bind(&c.mgr_phone)
        .bind(&c.mgr_mail)
        .bind(&c.whatsapp)
        .bind(&c.website)
        .bind(&c.linkedin)
        .bind(&c.facebook)
        .bind(&c.instagram)
        .bind(&c.twitter)
        .fetch_one(&self.pool)
        .await
        .map_err(unique_violation)
    }

    async fn list_companies(&self, query: &CompanyQuery) -> StoreResult<CompanyPage> {
        let pattern = query.filter.as_deref().map(like_pattern);

        let total_count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM co_info WHERE {COMPANY_FILTER}"))
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

        let companies = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT * FROM co_info WHERE {COMPANY_FILTER} ORDER BY id DESC OFFSET $2 LIMIT $3"
        ))
        .bind(&pattern)
        .bind(query.offset())
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(CompanyPage {
            companies,
            total_count,
        })
    }
}
