use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub id: i64,
    pub co_code: String,
    pub name: String,
    pub plan_id: i64,
    #[serde(rename = "type")]
    pub co_type: String,
    pub date_attach: NaiveDate,
    pub pan_attach: String,
    pub gst_attach: String,
    pub tan_attach: String,
    pub add1: String,
    pub add2: String,
    pub add3: String,
    pub city: String,
    pub state: String,
    pub pin: String,
    pub auth_name: String,
    pub auth_mail: String,
    pub auth_phone: String,
    pub mgr_is_active: bool,
    pub mgr_emp_id: String,
    pub mgr_first_name: String,
    pub mgr_middle_name: String,
    pub mgr_last_name: String,
    pub mgr_phone: String,
    pub mgr_mail: String,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated company fields ready for insertion; `co_code` is assigned by the caller.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub co_code: String,
    pub name: String,
    pub plan_id: i64,
    pub co_type: String,
    pub date_attach: NaiveDate,
    pub pan_attach: String,
    pub gst_attach: String,
    pub tan_attach: String,
    pub add1: String,
    pub add2: String,
    pub add3: String,
    pub city: String,
    pub state: String,
    pub pin: String,
    pub auth_name: String,
    pub auth_mail: String,
    pub auth_phone: String,
    pub mgr_is_active: bool,
    pub mgr_emp_id: String,
    pub mgr_first_name: String,
    pub mgr_middle_name: String,
    pub mgr_last_name: String,
    pub mgr_phone: String,
    pub mgr_mail: String,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

/// Paging and search parameters for the company listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyQuery {
    pub page: i64,
    pub limit: i64,
    pub filter: Option<String>,
}

impl CompanyQuery {
    /// Rows to skip; saturates instead of wrapping for absurd page numbers.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit).max(0)
    }
}

#[derive(Debug, Clone)]
pub struct CompanyPage {
    pub companies: Vec<CompanyRow>,
    pub total_count: i64,
}
