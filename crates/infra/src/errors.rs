//! Conversions from external infrastructure errors into domain errors.

use poroherald_domain::HeraldError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HeraldError);

impl From<InfraError> for HeraldError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HeraldError> for InfraError {
    fn from(value: HeraldError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoHeraldError {
    fn into_herald(self) -> HeraldError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → HeraldError */
/* -------------------------------------------------------------------------- */

impl IntoHeraldError for HttpError {
    fn into_herald(self) -> HeraldError {
        if self.is_timeout() {
            return HeraldError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return HeraldError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => HeraldError::NotFound(message),
                400..=499 => HeraldError::InvalidInput(message),
                _ => HeraldError::Network(message),
            };
        }

        HeraldError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_herald())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → HeraldError */
/* -------------------------------------------------------------------------- */

impl IntoHeraldError for JsonError {
    fn into_herald(self) -> HeraldError {
        HeraldError::Parse(self.to_string())
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_herald())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → HeraldError */
/* -------------------------------------------------------------------------- */

impl IntoHeraldError for std::io::Error {
    fn into_herald(self) -> HeraldError {
        HeraldError::Storage(self.to_string())
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_herald())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
