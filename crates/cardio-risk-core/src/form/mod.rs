//! Input validation and normalization for raw form submissions.
//!
//! [`validate_form`] reports every problem field by field; only a form it
//! accepts should be passed to [`process_form_data`].

pub mod conversion;
pub mod raw;
pub mod validation;

pub use conversion::process_form_data;
pub use raw::{FieldValue, RawFormData};
pub use validation::{validate_form, IssueKind, ValidationIssue, ValidationReport, GENERAL_KEY};
