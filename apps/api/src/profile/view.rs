use serde::Serialize;

use crate::models::lookup::LookupEntry;

/// One leaf of the assembled profile: resolved value, editability and, for
/// coded fields, the option list backing the client's selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dd_value: Option<Vec<LookupEntry>>,
    pub is_editable: bool,
}

impl FieldView {
    pub fn editable(value: Option<String>) -> Self {
        FieldView {
            value,
            dd_value: None,
            is_editable: true,
        }
    }

    pub fn read_only(value: Option<String>) -> Self {
        FieldView {
            value,
            dd_value: None,
            is_editable: false,
        }
    }

    pub fn dropdown(value: Option<String>, options: &[LookupEntry]) -> Self {
        FieldView {
            value,
            dd_value: Some(options.to_vec()),
            is_editable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoView {
    pub welcome_text: String,
    pub name: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoView {
    pub aadhaar_no: FieldView,
    pub phone: FieldView,
    pub email: FieldView,
    pub pan: FieldView,
    pub dob: FieldView,
    pub marital: FieldView,
    pub blood_group: FieldView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationInfoView {
    pub degree: FieldView,
    pub college: FieldView,
    pub university: FieldView,
    pub city: FieldView,
    pub state: FieldView,
    pub pincode: FieldView,
    pub start_year: FieldView,
    pub end_year: FieldView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfoView {
    pub addr_type: FieldView,
    pub addr1: FieldView,
    pub addr2: FieldView,
    pub addr3: FieldView,
    pub city: FieldView,
    pub state: FieldView,
    pub pincode: FieldView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceInfoView {
    pub name: FieldView,
    pub role: FieldView,
    pub city: FieldView,
    pub state: FieldView,
    pub pincode: FieldView,
    pub start_year: FieldView,
    pub end_year: FieldView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyInfoView {
    pub relationship: FieldView,
    pub first_name: FieldView,
    pub middle_name: FieldView,
    pub last_name: FieldView,
    pub phone: FieldView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub user_info: UserInfoView,
    pub personal_info: PersonalInfoView,
    pub education_info: EducationInfoView,
    pub address_info: AddressInfoView,
    pub experience_info: ExperienceInfoView,
    pub family_info: FamilyInfoView,
}
