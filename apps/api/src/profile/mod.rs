//! Profile: the employee's editable record split into five sections.
//!
//! `assembler` turns stored rows into the `FieldView` tree, `writer` validates
//! coded references and upserts one section, `handlers` exposes both over HTTP.

pub mod assembler;
pub mod handlers;
pub mod requests;
pub mod view;
pub mod writer;
