pub mod anonymize;
pub mod count;
pub mod fields;
