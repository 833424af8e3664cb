pub mod company;
pub mod employee;
pub mod lookup;
pub mod profile;
