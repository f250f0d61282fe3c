pub mod assess;
pub mod fields;
