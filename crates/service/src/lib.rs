//! Service layer for the company tracker.
//! - Separates business rules (defaults, uniqueness, allowed statuses) from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Exposes one error type that the HTTP layer maps to status codes.

pub mod errors;
pub mod company;
#[cfg(test)]
pub mod test_support;
