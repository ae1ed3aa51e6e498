//! Conversions from external infrastructure errors into domain errors.

use nfield_domain::NfieldError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub NfieldError);

impl From<InfraError> for NfieldError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<NfieldError> for InfraError {
    fn from(value: NfieldError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoNfieldError {
    fn into_nfield(self) -> NfieldError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → NfieldError */
/* -------------------------------------------------------------------------- */

impl IntoNfieldError for HttpError {
    fn into_nfield(self) -> NfieldError {
        if self.is_decode() {
            return NfieldError::Deserialization(format!("malformed response body: {self}"));
        }

        if self.is_builder() {
            return NfieldError::InvalidArgument(format!("invalid HTTP request: {self}"));
        }

        if self.is_timeout() {
            return NfieldError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return NfieldError::Network(format!("HTTP connection failure: {self}"));
        }

        NfieldError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_nfield())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → NfieldError */
/* -------------------------------------------------------------------------- */

impl IntoNfieldError for serde_json::Error {
    fn into_nfield(self) -> NfieldError {
        NfieldError::Deserialization(self.to_string())
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_nfield())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
