//! Checking API: capabilities, check submission, result retrieval and
//! cancellation.
//!
//! A check moves through `submitted → processing* → complete` from the
//! caller's point of view. [`CheckingService::get_check_result`] is a single
//! poll: while the platform is still working it returns
//! [`CheckStatus::InProgress`] with a retry hint, and the caller decides when
//! to ask again.

use reqwest::Method;
use url::Url;

use crate::envelope::Outcome;
use crate::error::{AcrolinxError, AcrolinxResult};
use crate::types::{
    CancelledCheck, Capabilities, Check, CheckResult, GetCapabilitiesOptions, Links, Progress,
    SubmitCheckOptions,
};
use crate::utils::constants::{CAPABILITIES_PATH, CHECKS_PATH, HEADER_LOCALE};

use super::acrolinx_client::{insert_header, Client};
use super::transport::ApiRequest;

/// State of a check as reported by a single poll.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    /// Still processing. Wait at least [`Progress::retry_after`] before
    /// polling again.
    InProgress(Progress),
    /// Finished; the full result tree. A response with neither data nor
    /// progress also lands here, as an empty `CheckResult`.
    Complete(Box<CheckResult>),
}

impl CheckStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, CheckStatus::Complete(_))
    }

    pub fn progress(&self) -> Option<&Progress> {
        match self {
            CheckStatus::InProgress(progress) => Some(progress),
            CheckStatus::Complete(_) => None,
        }
    }

    pub fn result(&self) -> Option<&CheckResult> {
        match self {
            CheckStatus::InProgress(_) => None,
            CheckStatus::Complete(result) => Some(result),
        }
    }

    pub fn into_result(self) -> Option<CheckResult> {
        match self {
            CheckStatus::InProgress(_) => None,
            CheckStatus::Complete(result) => Some(*result),
        }
    }
}

/// Checking operations, borrowed from a [`Client`] via [`Client::checking`].
#[derive(Debug, Clone, Copy)]
pub struct CheckingService<'a> {
    client: &'a Client,
}

impl<'a> CheckingService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch the platform's checking capabilities.
    ///
    /// A non-empty `locale` is sent as `X-Acrolinx-Client-Locale` and
    /// localizes display names.
    pub async fn get_capabilities(
        &self,
        options: Option<&GetCapabilitiesOptions>,
    ) -> AcrolinxResult<(Capabilities, Links)> {
        let mut request = self
            .client
            .new_request::<()>(Method::GET, CAPABILITIES_PATH, None)?;

        if let Some(locale) = options.map(|o| o.locale.as_str()).filter(|l| !l.is_empty()) {
            insert_header(&mut request.headers, HEADER_LOCALE, locale)?;
        }

        self.client.send::<Capabilities>(request).await?.into_data()
    }

    /// Submit content for checking.
    ///
    /// Returns the check handle and links, typically `result` (poll here)
    /// and `cancel`.
    pub async fn submit_check(
        &self,
        options: &SubmitCheckOptions,
    ) -> AcrolinxResult<(Check, Links)> {
        let request = self
            .client
            .new_request(Method::POST, CHECKS_PATH, Some(options))?;

        let (check, links) = self.client.send::<Check>(request).await?.into_data()?;
        tracing::debug!(check_id = %check.id, "check submitted");
        Ok((check, links))
    }

    /// Poll a check once.
    pub async fn get_check_result(&self, check: &Check) -> AcrolinxResult<(CheckStatus, Links)> {
        let request = self.check_request(Method::GET, check)?;

        match self.client.send::<CheckResult>(request).await?.into_outcome() {
            Outcome::Error(err) => Err(AcrolinxError::Service(err)),
            Outcome::Progress { progress, links } => {
                tracing::debug!(
                    check_id = %check.id,
                    percent = progress.percent,
                    retry_after = progress.retry_after,
                    "check still processing"
                );
                Ok((CheckStatus::InProgress(progress), links))
            }
            Outcome::Result { data, links } => {
                tracing::debug!(check_id = %check.id, "check complete");
                Ok((CheckStatus::Complete(Box::new(data)), links))
            }
        }
    }

    /// Ask the platform to stop a running check.
    ///
    /// This is the request behind a submission's `cancel` link. Polling a
    /// cancelled check afterwards reports whatever the platform returns.
    pub async fn cancel_check(&self, check: &Check) -> AcrolinxResult<(CancelledCheck, Links)> {
        let request = self.check_request(Method::DELETE, check)?;

        let (cancelled, links) = self
            .client
            .send::<CancelledCheck>(request)
            .await?
            .into_data()?;
        tracing::debug!(check_id = %cancelled.id, "check cancelled");
        Ok((cancelled, links))
    }

    /// Request addressing a single check below the checks collection.
    fn check_request(&self, method: Method, check: &Check) -> AcrolinxResult<ApiRequest> {
        let mut request = self.client.new_request::<()>(method, CHECKS_PATH, None)?;
        push_segment(&mut request.url, &check.id)?;
        Ok(request)
    }
}

/// Append `segment` as one percent-encoded path segment.
///
/// `/`, `?` and `#` are escaped, and bare `.` or `..` segments are dropped,
/// so an id can never leave the collection path.
fn push_segment(url: &mut Url, segment: &str) -> AcrolinxResult<()> {
    let rendered = url.to_string();
    url.path_segments_mut()
        .map_err(|()| AcrolinxError::InvalidUrl {
            url: rendered,
            message: "URL cannot have path segments".to_string(),
        })?
        .push(segment);
    Ok(())
}
