//! Profile view assembly: pure mapping from stored section rows to the
//! nested `FieldView` model the client renders.
//!
//! Field policy is fixed: `email` is read-only, everything else editable.
//! Coded fields resolve through the catalog and are capitalized; free text
//! passes through with empty strings treated as absent; dates are rendered as
//! `YYYY-MM-DD` or `null`.

use chrono::NaiveDate;

use crate::formatting::{capitalize_first, format_date, non_empty};
use crate::lookup::{LookupCatalog, LookupKind};
use crate::models::employee::EmployeeRow;
use crate::models::profile::{
    AddressInfoRow, EducationInfoRow, ExperienceInfoRow, FamilyInfoRow, PersonalInfoRow,
};
use crate::profile::view::{
    AddressInfoView, EducationInfoView, ExperienceInfoView, FamilyInfoView, FieldView,
    PersonalInfoView, ProfileView, UserInfoView,
};

pub const WELCOME_TEXT: &str = "Welcome to Register";

/// Raw rows for one employee. The employee row is mandatory: callers resolve
/// "user not found" before assembly.
#[derive(Debug, Clone)]
pub struct ProfileRows {
    pub employee: EmployeeRow,
    pub personal: Option<PersonalInfoRow>,
    pub education: Option<EducationInfoRow>,
    pub address: Option<AddressInfoRow>,
    pub experience: Option<ExperienceInfoRow>,
    pub family: Option<FamilyInfoRow>,
}

pub fn assemble_profile_view(rows: &ProfileRows, catalog: &LookupCatalog) -> ProfileView {
    ProfileView {
        user_info: user_info(&rows.employee, catalog),
        personal_info: personal_info(&rows.employee, rows.personal.as_ref(), catalog),
        education_info: education_info(rows.education.as_ref(), catalog),
        address_info: address_info(rows.address.as_ref(), catalog),
        experience_info: experience_info(rows.experience.as_ref(), catalog),
        family_info: family_info(rows.family.as_ref(), catalog),
    }
}

pub fn user_info(employee: &EmployeeRow, catalog: &LookupCatalog) -> UserInfoView {
    UserInfoView {
        welcome_text: WELCOME_TEXT.to_string(),
        name: employee.full_name(),
        role: catalog
            .user_role
            .as_ref()
            .map(|role| capitalize_first(&role.value)),
    }
}

pub fn personal_info(
    employee: &EmployeeRow,
    row: Option<&PersonalInfoRow>,
    catalog: &LookupCatalog,
) -> PersonalInfoView {
    PersonalInfoView {
        aadhaar_no: text(row.and_then(|r| r.aadhaar_no.as_deref())),
        phone: text(employee.phone.as_deref()),
        email: FieldView::read_only(non_empty(Some(employee.email.as_str()))),
        pan: text(row.and_then(|r| r.pan.as_deref())),
        dob: date(employee.dob),
        marital: coded(catalog, LookupKind::Marital, row.and_then(|r| r.marital)),
        blood_group: coded(catalog, LookupKind::BloodGroup, row.and_then(|r| r.blood_group)),
    }
}

pub fn education_info(row: Option<&EducationInfoRow>, catalog: &LookupCatalog) -> EducationInfoView {
    EducationInfoView {
        degree: coded(catalog, LookupKind::Degree, row.and_then(|r| r.degree)),
        college: text(row.and_then(|r| r.college.as_deref())),
        university: coded(catalog, LookupKind::University, row.and_then(|r| r.university)),
        city: text(row.and_then(|r| r.city.as_deref())),
        state: coded(catalog, LookupKind::State, row.and_then(|r| r.state)),
        pincode: text(row.and_then(|r| r.pincode.as_deref())),
        start_year: date(row.and_then(|r| r.start_year)),
        end_year: date(row.and_then(|r| r.end_year)),
    }
}

pub fn address_info(row: Option<&AddressInfoRow>, catalog: &LookupCatalog) -> AddressInfoView {
    AddressInfoView {
        addr_type: coded(catalog, LookupKind::AddressType, row.and_then(|r| r.addr_type)),
        addr1: text(row.and_then(|r| r.addr1.as_deref())),
        addr2: text(row.and_then(|r| r.addr2.as_deref())),
        addr3: text(row.and_then(|r| r.addr3.as_deref())),
        city: text(row.and_then(|r| r.city.as_deref())),
        state: coded(catalog, LookupKind::State, row.and_then(|r| r.state)),
        pincode: text(row.and_then(|r| r.pincode.as_deref())),
    }
}

pub fn experience_info(
    row: Option<&ExperienceInfoRow>,
    catalog: &LookupCatalog,
) -> ExperienceInfoView {
    ExperienceInfoView {
        name: text(row.and_then(|r| r.name.as_deref())),
        role: text(row.and_then(|r| r.role.as_deref())),
        city: text(row.and_then(|r| r.city.as_deref())),
        state: coded(catalog, LookupKind::State, row.and_then(|r| r.state)),
        pincode: text(row.and_then(|r| r.pincode.as_deref())),
        start_year: date(row.and_then(|r| r.start_year)),
        end_year: date(row.and_then(|r| r.end_year)),
    }
}

pub fn family_info(row: Option<&FamilyInfoRow>, catalog: &LookupCatalog) -> FamilyInfoView {
    FamilyInfoView {
        relationship: coded(catalog, LookupKind::Relation, row.and_then(|r| r.relationship)),
        first_name: text(row.and_then(|r| r.first_name.as_deref())),
        middle_name: text(row.and_then(|r| r.middle_name.as_deref())),
        last_name: text(row.and_then(|r| r.last_name.as_deref())),
        phone: text(row.and_then(|r| r.phone.as_deref())),
    }
}

fn text(value: Option<&str>) -> FieldView {
    FieldView::editable(non_empty(value))
}

fn date(value: Option<NaiveDate>) -> FieldView {
    FieldView::editable(format_date(value))
}

fn coded(catalog: &LookupCatalog, kind: LookupKind, id: Option<i64>) -> FieldView {
    FieldView::dropdown(
        catalog.label(kind, id).map(capitalize_first),
        catalog.options(kind),
    )
}
