use serde::Serialize;
use tracing::debug;

use crate::models::lookup::LookupEntry;
use crate::store::{LookupStore, StoreResult};

/// The coded-option lists kept in `common_lookup`, keyed by their discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Marital,
    BloodGroup,
    Degree,
    University,
    State,
    AddressType,
    Relation,
    Gender,
}

impl LookupKind {
    pub const ALL: [LookupKind; 8] = [
        LookupKind::Marital,
        LookupKind::BloodGroup,
        LookupKind::Degree,
        LookupKind::University,
        LookupKind::State,
        LookupKind::AddressType,
        LookupKind::Relation,
        LookupKind::Gender,
    ];

    /// Value of `common_lookup.lookup_type` for this list.
    pub fn discriminator(&self) -> &'static str {
        match self {
            LookupKind::Marital => "marital",
            LookupKind::BloodGroup => "bloodGroup",
            LookupKind::Degree => "degree",
            LookupKind::University => "university",
            LookupKind::State => "state",
            LookupKind::AddressType => "addrtype",
            LookupKind::Relation => "relation",
            LookupKind::Gender => "gender",
        }
    }

    /// Key under which the list is serialized in the catalog.
    pub fn list_name(&self) -> &'static str {
        match self {
            LookupKind::Marital => "maritalStatusOptions",
            LookupKind::BloodGroup => "bloodGroupOptions",
            LookupKind::Degree => "degreeOptions",
            LookupKind::University => "universityOptions",
            LookupKind::State => "stateOptions",
            LookupKind::AddressType => "addressTypeOptions",
            LookupKind::Relation => "relationOptions",
            LookupKind::Gender => "genderOptions",
        }
    }
}

/// Per-request snapshot of every lookup list plus the caller's role label.
/// Built fresh for each request and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupCatalog {
    pub marital_status_options: Vec<LookupEntry>,
    pub blood_group_options: Vec<LookupEntry>,
    pub degree_options: Vec<LookupEntry>,
    pub university_options: Vec<LookupEntry>,
    pub state_options: Vec<LookupEntry>,
    pub address_type_options: Vec<LookupEntry>,
    pub relation_options: Vec<LookupEntry>,
    pub gender_options: Vec<LookupEntry>,
    pub user_role: Option<LookupEntry>,
}

impl LookupCatalog {
    pub fn options(&self, kind: LookupKind) -> &[LookupEntry] {
        match kind {
            LookupKind::Marital => &self.marital_status_options,
            LookupKind::BloodGroup => &self.blood_group_options,
            LookupKind::Degree => &self.degree_options,
            LookupKind::University => &self.university_options,
            LookupKind::State => &self.state_options,
            LookupKind::AddressType => &self.address_type_options,
            LookupKind::Relation => &self.relation_options,
            LookupKind::Gender => &self.gender_options,
        }
    }

    /// Label for `id` in the list of `kind`; see [`resolve_label`].
    pub fn label(&self, kind: LookupKind, id: Option<i64>) -> Option<&str> {
        resolve_label(self.options(kind), id)
    }
}

/// Loads every lookup list and the role label concurrently.
///
/// All nine reads are independent and joined together; the first store error
/// aborts the whole fetch. A list with no rows is an empty `Vec`, not an
/// error. `role_id = None` skips the role read and yields `user_role = None`.
pub async fn fetch_lookup_catalog<S>(store: &S, role_id: Option<i64>) -> StoreResult<LookupCatalog>
where
    S: LookupStore + ?Sized,
{
    let role = async {
        match role_id {
            Some(id) => store.role_label(id).await,
            None => Ok(None),
        }
    };

    let (marital, blood_group, degree, university, state, address_type, relation, gender, role) = tokio::try_join!(
        store.lookup_entries(LookupKind::Marital),
        store.lookup_entries(LookupKind::BloodGroup),
        store.lookup_entries(LookupKind::Degree),
        store.lookup_entries(LookupKind::University),
        store.lookup_entries(LookupKind::State),
        store.lookup_entries(LookupKind::AddressType),
        store.lookup_entries(LookupKind::Relation),
        store.lookup_entries(LookupKind::Gender),
        role,
    )?;

    debug!(?role_id, has_role = role.is_some(), "Lookup catalog loaded");

    Ok(LookupCatalog {
        marital_status_options: marital,
        blood_group_options: blood_group,
        degree_options: degree,
        university_options: university,
        state_options: state,
        address_type_options: address_type,
        relation_options: relation,
        gender_options: gender,
        user_role: role,
    })
}

/// Returns the label of the entry whose id equals `id`.
///
/// `None` when `id` is absent or zero, and when no entry matches: an unknown
/// or stale reference is a missing label, not an error.
pub fn resolve_label(list: &[LookupEntry], id: Option<i64>) -> Option<&str> {
    let id = id.filter(|&id| id != 0)?;
    list.iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.value.as_str())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::StoreError;

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_lookup(1, "marital", "single");
        store.add_lookup(2, "marital", "married");
        store.add_lookup(3, "role", "manager");
        store.add_lookup(4, "bloodGroup", "o+");
        store.add_lookup(5, "degree", "btech");
        store.add_lookup(6, "university", "mumbai university");
        store.add_lookup(7, "state", "maharashtra");
        store.add_lookup(8, "addrtype", "permanent");
        store.add_lookup(9, "relation", "father");
        store.add_lookup(10, "gender", "female");
        store.add_lookup(11, "state", "goa");
        store
    }

    #[tokio::test]
    async fn test_marital_scenario() {
        let catalog = fetch_lookup_catalog(&seeded_store(), Some(3)).await.unwrap();
        assert_eq!(
            catalog.marital_status_options,
            vec![LookupEntry::new(1, "single"), LookupEntry::new(2, "married")]
        );
        assert_eq!(catalog.user_role, Some(LookupEntry::new(3, "manager")));
    }

    #[tokio::test]
    async fn test_lists_are_not_cross_contaminated() {
        let store = seeded_store();
        let catalog = fetch_lookup_catalog(&store, Some(3)).await.unwrap();

        for kind in LookupKind::ALL {
            let expected = store.lookup_entries(kind).await.unwrap();
            assert!(!expected.is_empty(), "{} seeded", kind.list_name());
            assert_eq!(catalog.options(kind), expected.as_slice(), "{}", kind.list_name());
        }
        assert_eq!(catalog.state_options.len(), 2);
        assert!(catalog
            .marital_status_options
            .iter()
            .all(|e| e.id == 1 || e.id == 2));
    }

    #[tokio::test]
    async fn test_missing_role_id_yields_no_role() {
        let catalog = fetch_lookup_catalog(&seeded_store(), None).await.unwrap();
        assert!(catalog.user_role.is_none());
        assert_eq!(catalog.degree_options.len(), 1);
    }

    #[tokio::test]
    async fn test_non_role_id_is_not_a_role() {
        // id 1 exists, but as a marital entry
        let catalog = fetch_lookup_catalog(&seeded_store(), Some(1)).await.unwrap();
        assert!(catalog.user_role.is_none());
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_lists() {
        let catalog = fetch_lookup_catalog(&MemoryStore::new(), Some(3)).await.unwrap();
        assert_eq!(catalog, LookupCatalog::default());
    }

    #[tokio::test]
    async fn test_store_failure_aborts_fetch() {
        let store = seeded_store();
        store.fail_all();
        let err = fetch_lookup_catalog(&store, Some(3)).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_resolve_label() {
        let list = vec![LookupEntry::new(1, "single"), LookupEntry::new(2, "married")];
        assert_eq!(resolve_label(&list, Some(2)), Some("married"));
        assert_eq!(resolve_label(&list, None), None);
        assert_eq!(resolve_label(&list, Some(0)), None);
        assert_eq!(resolve_label(&list, Some(99)), None);
        assert_eq!(resolve_label(&[], Some(1)), None);
    }

    #[test]
    fn test_catalog_serializes_list_names() {
        let catalog = LookupCatalog::default();
        let value = serde_json::to_value(&catalog).unwrap();
        for kind in LookupKind::ALL {
            assert!(value.get(kind.list_name()).is_some(), "{}", kind.list_name());
        }
        assert!(value.get("userRole").unwrap().is_null());
    }
}
