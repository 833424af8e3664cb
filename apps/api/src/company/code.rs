use anyhow::anyhow;
use rand::Rng;
use tracing::warn;

use crate::errors::AppError;
use crate::store::CompanyStore;

const CODE_PREFIX: &str = "CO";
const MAX_ATTEMPTS: u32 = 10;

/// `CO` followed by five random digits.
pub fn generate_co_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{CODE_PREFIX}{:05}", rng.gen_range(0..100_000))
}

/// Draws codes until one is not yet taken.
pub async fn unique_co_code<S>(store: &S) -> Result<String, AppError>
where
    S: CompanyStore + ?Sized,
{
    for attempt in 1..=MAX_ATTEMPTS {
        let code = generate_co_code(&mut rand::thread_rng());
        if !store.company_code_exists(&code).await? {
            return Ok(code);
        }
        warn!("Company code {code} already taken (attempt {attempt})");
    }
    Err(AppError::Internal(anyhow!(
        "No free company code after {MAX_ATTEMPTS} attempts"
    )))
}
