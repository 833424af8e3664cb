//! Company: client organisations registered with the HR service.

pub mod code;
pub mod handlers;
pub mod requests;
