//! Request handlers, one module per router prefix.

pub mod applications;
pub mod healthcare_providers;
pub mod protocols;
pub mod qualifications;
pub mod roles;
pub mod system_types;
pub mod vendors;

use crate::{Error, Result};

/// Run `validator` checks on an extracted request value, surfacing failures
/// as 422 validation errors.
pub(crate) fn validated<T: validator::Validate>(value: T) -> Result<T> {
    value
        .validate()
        .map_err(|err| Error::Validation(err.to_string()))?;
    Ok(value)
}
