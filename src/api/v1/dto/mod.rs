pub mod me;
pub mod reports;
