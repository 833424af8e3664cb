pub mod extractor;
pub mod handlers;
pub mod password;
pub mod requests;
pub mod token;

pub use extractor::AuthUser;
