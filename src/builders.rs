//! Builder patterns for configuring clients and check submissions.

use std::time::Duration;

use crate::client::{AuthState, Client, HttpTransport, Transport, TransportConfig};
use crate::error::AcrolinxResult;
use crate::types::{
    CheckOptions, ContentEncoding, CustomField, Document, PartialCheckRange, SubmitCheckOptions,
};
use crate::utils::batch::generate_batch_id;
use crate::utils::constants::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// Builder for [`Client`].
///
/// The platform URL is parsed in [`build()`](Self::build), before any
/// request can be made.
///
/// # Example
///
/// ```
/// use acrolinx::builders::ClientBuilder;
/// use std::time::Duration;
///
/// let client = ClientBuilder::new("my-signature", "https://acme.acrolinx.cloud")
///     .with_api_token("sOmEaPiToKeN")
///     .with_timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert!(client.is_authenticated());
/// ```
pub struct ClientBuilder {
    signature: String,
    url: String,
    token: Option<String>,
    timeout: Duration,
    user_agent: String,
    http_client: Option<reqwest::Client>,
    transport: Option<Box<dyn Transport>>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("signature", &self.signature)
            .field("url", &self.url)
            .field("has_token", &self.token.is_some())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Create a builder for the given client signature and platform URL.
    pub fn new(signature: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            url: url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_client: None,
            transport: None,
        }
    }

    /// Start authenticated with an existing API or access token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Per-request timeout for the default HTTP transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` for the default HTTP transport.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Use a preconfigured `reqwest::Client`. Its own timeout applies.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Use a custom transport. Overrides every HTTP setting above.
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AcrolinxError::InvalidUrl`] for an unparseable
    /// platform URL, or a transport error if the HTTP client cannot be set up.
    pub fn build(self) -> AcrolinxResult<Client> {
        let platform_url = crate::client::make_platform_url(&self.url)?;

        let transport: Box<dyn Transport> = match (self.transport, self.http_client) {
            (Some(transport), _) => transport,
            (None, Some(http)) => Box::new(HttpTransport::with_client(http)),
            (None, None) => Box::new(HttpTransport::with_config(TransportConfig {
                timeout: self.timeout,
                user_agent: self.user_agent,
            })?),
        };

        let auth = self
            .token
            .map(AuthState::from_token)
            .unwrap_or_default();

        Ok(Client::from_parts(self.signature, platform_url, auth, transport))
    }
}

/// Builder for [`SubmitCheckOptions`].
///
/// # Example
///
/// ```
/// use acrolinx::builders::SubmitCheckBuilder;
///
/// let options = SubmitCheckBuilder::new("Some content to check.")
///     .guidance_profile("710e1361-90b7-3867-a42e-35279b7f8aa2")
///     .content_format("TEXT")
///     .check_type("batch")
///     .report_type("scorecard")
///     .document_reference("docs/intro.txt")
///     .custom_field("project", "website")
///     .build();
///
/// let check_options = options.check_options.unwrap();
/// assert_eq!(check_options.check_type, "batch");
/// assert_eq!(options.document.unwrap().reference, "docs/intro.txt");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SubmitCheckBuilder {
    content: String,
    content_encoding: Option<ContentEncoding>,
    check_options: Option<CheckOptions>,
    document: Option<Document>,
    language: String,
}

impl SubmitCheckBuilder {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Declare how `content` is encoded.
    pub fn content_encoding(mut self, encoding: ContentEncoding) -> Self {
        self.content_encoding = Some(encoding);
        self
    }

    pub fn guidance_profile(mut self, id: impl Into<String>) -> Self {
        self.options().guidance_profile_id = id.into();
        self
    }

    /// Content format id as advertised in the capabilities (e.g. `TEXT`, `XML`).
    pub fn content_format(mut self, format: impl Into<String>) -> Self {
        self.options().content_format = format.into();
        self
    }

    /// `interactive`, `batch`, `baseline` or `automated`.
    pub fn check_type(mut self, check_type: impl Into<String>) -> Self {
        self.options().check_type = check_type.into();
        self
    }

    pub fn report_type(mut self, report_type: impl Into<String>) -> Self {
        self.options().report_types.push(report_type.into());
        self
    }

    /// Restrict the check to `[begin, end)`. May be called repeatedly.
    pub fn partial_range(mut self, begin: i32, end: i32) -> Self {
        self.options()
            .partial_check_ranges
            .push(PartialCheckRange { begin, end });
        self
    }

    pub fn batch_id(mut self, batch_id: impl Into<String>) -> Self {
        self.options().batch_id = batch_id.into();
        self
    }

    /// Set a fresh batch id derived from the client signature.
    pub fn generated_batch_id(self, client_signature: &str) -> Self {
        self.batch_id(generate_batch_id(client_signature))
    }

    pub fn document_reference(mut self, reference: impl Into<String>) -> Self {
        self.document().reference = reference.into();
        self
    }

    pub fn custom_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.document().custom_fields.push(CustomField {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn build(self) -> SubmitCheckOptions {
        SubmitCheckOptions {
            content: self.content,
            content_encoding: self.content_encoding,
            check_options: self.check_options,
            document: self.document,
            language: self.language,
        }
    }

    fn options(&mut self) -> &mut CheckOptions {
        self.check_options.get_or_insert_with(CheckOptions::default)
    }

    fn document(&mut self) -> &mut Document {
        self.document.get_or_insert_with(Document::default)
    }
}
