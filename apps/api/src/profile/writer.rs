//! Section write path: every coded field must resolve against its own lookup
//! list before anything is written; then the section row is upserted and the
//! section is re-assembled with the same wrapping as the read path.

use tracing::info;

use crate::errors::AppError;
use crate::lookup::{LookupCatalog, LookupKind};
use crate::models::employee::EmployeeRow;
use crate::models::profile::{
    AddressInfoRow, EducationInfoRow, ExperienceInfoRow, FamilyInfoRow, PersonalInfoRow,
};
use crate::profile::assembler::{
    address_info, education_info, experience_info, family_info, personal_info,
};
use crate::profile::requests::{
    AddressInfoUpdate, EducationInfoUpdate, ExperienceInfoUpdate, FamilyInfoUpdate,
    PersonalInfoUpdate,
};
use crate::profile::view::{
    AddressInfoView, EducationInfoView, ExperienceInfoView, FamilyInfoView, PersonalInfoView,
};
use crate::store::{EmployeeStore, ProfileStore};

/// Fails with `InvalidReference` naming `field` unless `id` is in the `kind` list.
fn require_reference(
    catalog: &LookupCatalog,
    kind: LookupKind,
    id: i64,
    field: &'static str,
    label: &str,
) -> Result<(), AppError> {
    match catalog.label(kind, Some(id)) {
        Some(_) => Ok(()),
        None => Err(AppError::invalid_reference(field, label)),
    }
}

/// Writes the personal section and the employee's phone and date of birth.
pub async fn write_personal_info<S>(
    store: &S,
    employee: &EmployeeRow,
    update: PersonalInfoUpdate,
    catalog: &LookupCatalog,
) -> Result<PersonalInfoView, AppError>
where
    S: EmployeeStore + ProfileStore + ?Sized,
{
    require_reference(catalog, LookupKind::Marital, update.marital, "marital", "marital status")?;
    require_reference(
        catalog,
        LookupKind::BloodGroup,
        update.blood_group,
        "bloodGroup",
        "blood group",
    )?;

    let row = PersonalInfoRow {
        emp_id: employee.id,
        aadhaar_no: Some(update.aadhaar_no),
        pan: Some(update.pan),
        marital: Some(update.marital),
        blood_group: Some(update.blood_group),
    };

    store
        .update_contact(employee.id, &update.phone, update.dob)
        .await?;
    store.upsert_personal(&row).await?;
    info!("Upserted personal info for user {}", employee.id);

    let employee = EmployeeRow {
        phone: Some(update.phone),
        dob: Some(update.dob),
        ..employee.clone()
    };
    Ok(personal_info(&employee, Some(&row), catalog))
}

pub async fn write_education_info<S>(
    store: &S,
    user_id: i64,
    update: EducationInfoUpdate,
    catalog: &LookupCatalog,
) -> Result<EducationInfoView, AppError>
where
    S: ProfileStore + ?Sized,
{
    require_reference(catalog, LookupKind::Degree, update.degree, "degree", "degree")?;
    require_reference(
        catalog,
        LookupKind::University,
        update.university,
        "university",
        "university",
    )?;
    require_reference(catalog, LookupKind::State, update.state, "state", "state")?;

    let row = EducationInfoRow {
        emp_id: user_id,
        degree: Some(update.degree),
        college: Some(update.college),
        university: Some(update.university),
        city: Some(update.city),
        state: Some(update.state),
        pincode: Some(update.pincode),
        start_year: Some(update.start_year),
        end_year: Some(update.end_year),
    };

    store.upsert_education(&row).await?;
    info!("Upserted education info for user {user_id}");

    Ok(education_info(Some(&row), catalog))
}

pub async fn write_address_info<S>(
    store: &S,
    user_id: i64,
    update: AddressInfoUpdate,
    catalog: &LookupCatalog,
) -> Result<AddressInfoView, AppError>
where
    S: ProfileStore + ?Sized,
{
    require_reference(
        catalog,
        LookupKind::AddressType,
        update.addr_type,
        "addrType",
        "address type",
    )?;
    require_reference(catalog, LookupKind::State, update.state, "state", "state")?;

    let row = AddressInfoRow {
        emp_id: user_id,
        addr_type: Some(update.addr_type),
        addr1: Some(update.addr1),
        addr2: update.addr2,
        addr3: update.addr3,
        city: Some(update.city),
        state: Some(update.state),
        pincode: Some(update.pincode),
    };

    store.upsert_address(&row).await?;
    info!("Upserted address info for user {user_id}");

    Ok(address_info(Some(&row), catalog))
}

pub async fn write_experience_info<S>(
    store: &S,
    user_id: i64,
    update: ExperienceInfoUpdate,
    catalog: &LookupCatalog,
) -> Result<ExperienceInfoView, AppError>
where
    S: ProfileStore + ?Sized,
{
    require_reference(catalog, LookupKind::State, update.state, "state", "state")?;

    let row = ExperienceInfoRow {
        emp_id: user_id,
        name: Some(update.name),
        role: Some(update.role),
        city: Some(update.city),
        state: Some(update.state),
        pincode: Some(update.pincode),
        start_year: Some(update.start_year),
        end_year: update.end_year,
    };

    store.upsert_experience(&row).await?;
    info!("Upserted experience info for user {user_id}");

    Ok(experience_info(Some(&row), catalog))
}

pub async fn write_family_info<S>(
    store: &S,
    user_id: i64,
    update: FamilyInfoUpdate,
    catalog: &LookupCatalog,
) -> Result<FamilyInfoView, AppError>
where
    S: ProfileStore + ?Sized,
{
    require_reference(
        catalog,
        LookupKind::Relation,
        update.relationship,
        "relationship",
        "relationship",
    )?;

    let row = FamilyInfoRow {
        emp_id: user_id,
        relationship: Some(update.relationship),
        first_name: Some(update.first_name),
        middle_name: Some(update.middle_name),
        last_name: Some(update.last_name),
        phone: Some(update.phone),
    };

    store.upsert_family(&row).await?;
    info!("Upserted family info for user {user_id}");

    Ok(family_info(Some(&row), catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::assembler::tests::{sample_catalog, sample_employee};
    use crate::store::memory::MemoryStore;
    use chrono::NaiveDate;

    fn personal_update(marital: i64, blood_group: i64) -> PersonalInfoUpdate {
        PersonalInfoUpdate {
            aadhaar_no: "234567890123".to_string(),
            pan: "ABCDE1234F".to_string(),
            phone: "9000000001".to_string(),
            dob: NaiveDate::from_ymd_opt(1995, 1, 31).unwrap(),
            marital,
            blood_group,
        }
    }

    fn store_with_employee() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_employee(sample_employee());
        store
    }

    #[tokio::test]
    async fn test_personal_married_scenario() {
        let store = store_with_employee();
        let view = write_personal_info(&store, &sample_employee(), personal_update(2, 4), &sample_catalog())
            .await
            .unwrap();

        assert_eq!(view.marital.value.as_deref(), Some("Married"));
        assert_eq!(view.blood_group.value.as_deref(), Some("O+"));
        assert_eq!(view.phone.value.as_deref(), Some("9000000001"));
        assert_eq!(view.dob.value.as_deref(), Some("1995-01-31"));
        assert!(!view.email.is_editable);

        let employee = store.employee(42).unwrap();
        assert_eq!(employee.phone.as_deref(), Some("9000000001"));
        assert_eq!(store.personal_rows(42).len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_marital_rejected_without_write() {
        let store = store_with_employee();
        let err = write_personal_info(&store, &sample_employee(), personal_update(99, 4), &sample_catalog())
            .await
            .unwrap_err();

        match err {
            AppError::InvalidReference { field, .. } => assert_eq!(field, "marital"),
            other => panic!("expected invalid reference, got {other:?}"),
        }
        assert!(store.personal_rows(42).is_empty());
        assert_eq!(store.employee(42).unwrap().phone.as_deref(), Some("9876543210"));
    }

    #[tokio::test]
    async fn test_blood_group_checked_against_its_own_list() {
        // 9 is a valid relation id but not a blood group
        let store = store_with_employee();
        let err = write_personal_info(&store, &sample_employee(), personal_update(1, 9), &sample_catalog())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { field: "bloodGroup", .. }));
    }

    #[tokio::test]
    async fn test_repeated_update_keeps_one_row() {
        let store = store_with_employee();
        let catalog = sample_catalog();
        for _ in 0..2 {
            write_personal_info(&store, &sample_employee(), personal_update(1, 4), &catalog)
                .await
                .unwrap();
        }
        write_personal_info(&store, &sample_employee(), personal_update(2, 12), &catalog)
            .await
            .unwrap();

        let rows = store.personal_rows(42);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].marital, Some(2));
        assert_eq!(rows[0].blood_group, Some(12));
    }

    #[tokio::test]
    async fn test_education_validates_each_reference() {
        let store = store_with_employee();
        let update = EducationInfoUpdate {
            degree: 5,
            college: "COEP".to_string(),
            university: 6,
            city: "Pune".to_string(),
            state: 1, // marital id, not a state
            pincode: "411005".to_string(),
            start_year: NaiveDate::from_ymd_opt(2012, 7, 1).unwrap(),
            end_year: NaiveDate::from_ymd_opt(2016, 5, 31).unwrap(),
        };
        let err = write_education_info(&store, 42, update.clone(), &sample_catalog())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { field: "state", .. }));
        assert_eq!(store.education_rows(42), 0);

        let view = write_education_info(&store, 42, EducationInfoUpdate { state: 7, ..update }, &sample_catalog())
            .await
            .unwrap();
        assert_eq!(view.degree.value.as_deref(), Some("Btech"));
        assert_eq!(view.university.value.as_deref(), Some("Mumbai university"));
        assert_eq!(view.state.value.as_deref(), Some("Maharashtra"));
        assert_eq!(view.end_year.value.as_deref(), Some("2016-05-31"));
        assert_eq!(store.education_rows(42), 1);
    }

    #[tokio::test]
    async fn test_address_family_experience_upserts() {
        let store = store_with_employee();
        let catalog = sample_catalog();

        let address = AddressInfoUpdate {
            addr_type: 8,
            addr1: "12 MG Road".to_string(),
            addr2: None,
            addr3: None,
            city: "Pune".to_string(),
            state: 11,
            pincode: "411001".to_string(),
        };
        for _ in 0..2 {
            write_address_info(&store, 42, address.clone(), &catalog).await.unwrap();
        }
        assert_eq!(store.address_rows(42), 1);

        let family = FamilyInfoUpdate {
            relationship: 9,
            first_name: "Ravi".to_string(),
            middle_name: "S".to_string(),
            last_name: "Patil".to_string(),
            phone: "9123456780".to_string(),
        };
        let view = write_family_info(&store, 42, family, &catalog).await.unwrap();
        assert_eq!(view.relationship.value.as_deref(), Some("Father"));
        assert_eq!(store.family_rows(42), 1);

        let experience = ExperienceInfoUpdate {
            name: "Acme".to_string(),
            role: "Engineer".to_string(),
            city: "Pune".to_string(),
            state: 7,
            pincode: "411001".to_string(),
            start_year: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            end_year: None,
        };
        let view = write_experience_info(&store, 42, experience, &catalog).await.unwrap();
        assert_eq!(view.end_year.value, None);
        assert_eq!(store.experience_rows(42), 1);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = store_with_employee();
        store.fail_all();
        let err = write_family_info(
            &store,
            42,
            FamilyInfoUpdate {
                relationship: 9,
                first_name: "Ravi".to_string(),
                middle_name: "S".to_string(),
                last_name: "Patil".to_string(),
                phone: "9123456780".to_string(),
            },
            &sample_catalog(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }
}
