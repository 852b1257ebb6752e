pub mod accounts;
pub mod cafes;
