//! Shared fixtures for handler and router tests.

use axum::response::Response;
use serde_json::Value;

use crate::auth::password::hash_password;
use crate::lookup::LookupKind;
use crate::models::employee::EmployeeRow;
use crate::profile::assembler::tests::{sample_catalog, sample_employee};
use crate::store::memory::MemoryStore;

pub const SEED_PASSWORD: &str = "secret12!";

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Loads the rows behind `sample_catalog` into `store`, role 3 included.
pub fn seed_catalog(store: &MemoryStore) {
    let catalog = sample_catalog();
    for kind in LookupKind::ALL {
        for entry in catalog.options(kind) {
            store.add_lookup(entry.id, kind.discriminator(), &entry.value);
        }
    }
    if let Some(role) = &catalog.user_role {
        store.add_lookup(role.id, "role", &role.value);
    }
}

/// Adds employee 42 (asha@example.com) with `SEED_PASSWORD`.
pub fn seed_employee(store: &MemoryStore) -> EmployeeRow {
    let employee = EmployeeRow {
        password_hash: hash_password(SEED_PASSWORD).unwrap(),
        ..sample_employee()
    };
    store.add_employee(employee.clone());
    employee
}
