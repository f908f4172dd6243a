//! Response envelope decoding.
//!
//! Every platform response is wrapped as
//!
//! ```json
//! { "data": ..., "links": {...}, "progress": {...}, "error": {...} }
//! ```
//!
//! and resolves to exactly one [`Outcome`]:
//!
//! 1. **Error** when `error` is present and differs from the all-empty
//!    [`RequestError::default()`]. The platform sends `"error": {}` (or empty
//!    strings with status 0) on success, so presence alone means nothing.
//! 2. **Progress** when `progress` is present and differs from
//!    [`Progress::default()`]. Only polling endpoints report progress.
//! 3. **Result** otherwise. A zero-valued `progress` is dropped, and a
//!    missing or `null` `data` decodes as `T::default()`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AcrolinxError, AcrolinxResult};
use crate::types::{Links, Progress, RequestError};

/// Raw response wrapper as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, deserialize_with = "crate::utils::de::null_as_default")]
    pub links: Links,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RequestError>,
}

/// What an envelope turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The platform rejected the request.
    Error(RequestError),
    /// The check is still running.
    Progress { progress: Progress, links: Links },
    /// Final payload.
    Result { data: T, links: Links },
}

impl<T> Envelope<T> {
    /// The non-empty error, if the platform reported one.
    pub fn reported_error(&self) -> Option<&RequestError> {
        self.error
            .as_ref()
            .filter(|err| **err != RequestError::default())
    }

    /// The non-zero progress, if the platform reported one.
    pub fn reported_progress(&self) -> Option<&Progress> {
        self.progress
            .as_ref()
            .filter(|progress| **progress != Progress::default())
    }
}

impl<T: Default> Envelope<T> {
    /// Classify the envelope into error, progress or result.
    pub fn into_outcome(self) -> Outcome<T> {
        if let Some(err) = self.reported_error() {
            return Outcome::Error(err.clone());
        }
        if let Some(progress) = self.reported_progress() {
            return Outcome::Progress {
                progress: progress.clone(),
                links: self.links,
            };
        }
        Outcome::Result {
            data: self.data.unwrap_or_default(),
            links: self.links,
        }
    }

    /// Data and links for endpoints that never report progress.
    ///
    /// Only the error branch is checked; a `progress` member is ignored.
    pub fn into_data(self) -> AcrolinxResult<(T, Links)> {
        if let Some(err) = self.reported_error() {
            return Err(AcrolinxError::Service(err.clone()));
        }
        Ok((self.data.unwrap_or_default(), self.links))
    }
}

impl<T> Outcome<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    pub fn is_progress(&self) -> bool {
        matches!(self, Outcome::Progress { .. })
    }

    /// Links of a progress or result outcome.
    pub fn links(&self) -> Option<&Links> {
        match self {
            Outcome::Error(_) => None,
            Outcome::Progress { links, .. } | Outcome::Result { links, .. } => Some(links),
        }
    }
}

/// Parse raw response bytes into an [`Envelope`].
pub fn parse<T: DeserializeOwned>(bytes: &[u8]) -> AcrolinxResult<Envelope<T>> {
    serde_json::from_slice(bytes).map_err(|e| AcrolinxError::InvalidJson(e.to_string()))
}

/// Parse and classify raw response bytes.
pub fn decode<T: DeserializeOwned + Default>(bytes: &[u8]) -> AcrolinxResult<Outcome<T>> {
    Ok(parse::<T>(bytes)?.into_outcome())
}
