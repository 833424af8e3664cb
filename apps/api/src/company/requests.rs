use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::company::{CompanyQuery, NewCompany};
use crate::validation::{
    ensure, is_digits, is_email, optional, required, required_date, required_id,
};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCompanyRequest {
    pub name: Option<String>,
    pub plan_id: Option<Value>,
    #[serde(rename = "type")]
    pub co_type: Option<String>,
    pub date_attach: Option<String>,
    pub pan_attach: Option<String>,
    pub gst_attach: Option<String>,
    pub tan_attach: Option<String>,
    pub add1: Option<String>,
    pub add2: Option<String>,
    pub add3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin: Option<String>,
    pub auth_name: Option<String>,
    pub auth_mail: Option<String>,
    pub auth_phone: Option<String>,
    pub mgr_is_active: Option<bool>,
    pub mgr_emp_id: Option<String>,
    pub mgr_first_name: Option<String>,
    pub mgr_middle_name: Option<String>,
    pub mgr_last_name: Option<String>,
    pub mgr_phone: Option<String>,
    pub mgr_mail: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

impl CreateCompanyRequest {
    /// Checks every field in declaration order. The returned company has an
    /// empty `co_code`.
    pub fn validate(self) -> Result<NewCompany, AppError> {
        let name = required(self.name, "Company name is required.")?;
        let plan_id = required_id(self.plan_id.as_ref(), "Enter a valid plan ID")?;
        let co_type = required(self.co_type, "Company type is required.")?;
        let date_attach = required_date(
            self.date_attach,
            "Attachment date is required.",
            "Invalid attachment date format. Please use YYYY-MM-DD.",
        )?;
        let pan_attach = required(self.pan_attach, "PAN attachment is required.")?;
        let gst_attach = required(self.gst_attach, "GST attachment is required.")?;
        let tan_attach = required(self.tan_attach, "TAN attachment is required.")?;
        let add1 = required(self.add1, "Address Line 1 is required.")?;
        let add2 = required(self.add2, "Address Line 2 is required.")?;
        let add3 = required(self.add3, "Address Line 3 is required.")?;
        let city = required(self.city, "City name is required.")?;
        let state = required(self.state, "State is required.")?;
        let pin = required(self.pin, "PIN code is required.")?;
        ensure(is_digits(&pin, 6), "PIN code must be exactly 6 digits.")?;
        let auth_name = required(self.auth_name, "Authorized person name is required.")?;
        let auth_mail = required(self.auth_mail, "Authorized person email is required.")?;
        ensure(is_email(&auth_mail), "Please enter a valid authorized person email.")?;
        let auth_phone = required(self.auth_phone, "Authorized person phone is required.")?;
        ensure(
            is_digits(&auth_phone, 10),
            "Authorized person phone must be exactly 10 digits.",
        )?;
        let mgr_emp_id = required(self.mgr_emp_id, "Manager employee ID is required.")?;
        let mgr_first_name = required(self.mgr_first_name, "Manager first name is required.")?;
        let mgr_middle_name = required(self.mgr_middle_name, "Manager middle name is required.")?;
        let mgr_last_name = required(self.mgr_last_name, "Manager last name is required.")?;
        let mgr_mail = required(self.mgr_mail, "Manager email is required.")?;
        ensure(is_email(&mgr_mail), "Please enter a valid manager email.")?;
        let mgr_phone = required(self.mgr_phone, "Manager phone is required.")?;
        ensure(is_digits(&mgr_phone, 10), "Manager phone must be exactly 10 digits.")?;

        Ok(NewCompany {
            co_code: String::new(),
            name,
            plan_id,
            co_type,
            date_attach,
            pan_attach,
            gst_attach,
            tan_attach,
            add1,
            add2,
            add3,
            city,
            state,
            pin,
            auth_name,
            auth_mail,
            auth_phone,
            mgr_is_active: self.mgr_is_active.unwrap_or(true),
            mgr_emp_id,
            mgr_first_name,
            mgr_middle_name,
            mgr_last_name,
            mgr_phone,
            mgr_mail,
            whatsapp: optional(self.whatsapp),
            website: optional(self.website),
            linkedin: optional(self.linkedin),
            facebook: optional(self.facebook),
            instagram: optional(self.instagram),
            twitter: optional(self.twitter),
        })
    }
}

/// Raw `?page&limit&filter` parameters; anything unparsable falls back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub filter: Option<String>,
}

impl CompanyListParams {
    pub fn into_query(self) -> CompanyQuery {
        let number = |raw: Option<String>, default: i64| {
            raw.and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(default)
        };
        let filter = self
            .filter
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty() && f != "null");

        CompanyQuery {
            page: number(self.page, DEFAULT_PAGE).max(1),
            limit: number(self.limit, DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            filter,
        }
    }
}

/// Ceiling division that cannot overflow; a non-positive limit yields no pages.
pub fn total_pages(total_count: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    total_count / limit + i64::from(total_count % limit != 0)
}
