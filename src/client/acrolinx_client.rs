//! The Acrolinx platform client.
//!
//! A [`Client`] holds the client signature, the platform URL, the current
//! authentication state and a [`Transport`]. Every operation issues exactly
//! one request and awaits the response; nothing is retried or run in the
//! background.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::builders::ClientBuilder;
use crate::envelope::{self, Envelope};
use crate::error::{AcrolinxError, AcrolinxResult};
use crate::types::{AccessToken, Credentials};
use crate::utils::constants::{HEADER_SIGNATURE, HEADER_TOKEN, SIGN_IN_PATH};

use super::auth::AuthState;
use super::checking::CheckingService;
use super::transport::{ApiRequest, ApiResponse, Transport};

/// Client for the Acrolinx platform API.
///
/// # Example
///
/// ```no_run
/// use acrolinx::client::Client;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = Client::new("my-client-signature", "https://acme.acrolinx.cloud")?;
/// client.sign_in("alice", "secret").await?;
///
/// let (capabilities, _links) = client.checking().get_capabilities(None).await?;
/// println!("{} guidance profiles", capabilities.guidance_profiles.len());
/// # Ok(())
/// # }
/// ```
///
/// Token changes take `&mut self`. Share a client across tasks only behind
/// your own synchronization.
pub struct Client {
    signature: String,
    platform_url: Url,
    auth: AuthState,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("signature", &self.signature)
            .field("platform_url", &self.platform_url.as_str())
            .field("authenticated", &self.auth.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`AcrolinxError::InvalidUrl`] if `url` cannot be parsed.
    pub fn new(signature: impl Into<String>, url: &str) -> AcrolinxResult<Self> {
        ClientBuilder::new(signature, url).build()
    }

    /// Start configuring a client.
    pub fn builder(signature: impl Into<String>, url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(signature, url)
    }

    pub(crate) fn from_parts(
        signature: String,
        platform_url: Url,
        auth: AuthState,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            signature,
            platform_url,
            auth,
            transport,
        }
    }

    /// The client signature sent as `X-Acrolinx-Client`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Normalized platform URL, always ending in `/`.
    pub fn platform_url(&self) -> &Url {
        &self.platform_url
    }

    pub fn auth_state(&self) -> &AuthState {
        &self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// The current access token, if authenticated.
    pub fn access_token(&self) -> Option<&str> {
        self.auth.token().map(AccessToken::as_str)
    }

    /// Replace the access token. An empty token signs the client out.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.auth = AuthState::from_token(token);
    }

    /// Forget the access token.
    pub fn sign_out(&mut self) {
        self.auth = AuthState::Unauthenticated;
    }

    /// Exchange credentials for an access token and keep it for all later
    /// requests.
    ///
    /// # Errors
    ///
    /// Returns [`AcrolinxError::SignIn`] if the request fails, the platform
    /// rejects the credentials, or the response has no token. The auth state
    /// is unchanged on error.
    pub async fn sign_in(&mut self, username: &str, password: &str) -> AcrolinxResult<()> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let token = self
            .request_token(&credentials)
            .await
            .map_err(AcrolinxError::sign_in)?;

        tracing::debug!(username, "signed in");
        self.auth = AuthState::Authenticated(token);
        Ok(())
    }

    async fn request_token(&self, credentials: &Credentials) -> AcrolinxResult<AccessToken> {
        let request = self.new_request(Method::POST, SIGN_IN_PATH, Some(credentials))?;
        let response = self.execute(request).await?;

        // The token arrives either wrapped in the usual envelope or bare.
        let (token, _links) = envelope::parse::<AccessToken>(&response.body)?.into_data()?;
        if !token.is_empty() {
            return Ok(token);
        }
        let bare: AccessToken = serde_json::from_slice(&response.body)?;
        if bare.is_empty() {
            return Err(AcrolinxError::MissingToken);
        }
        Ok(bare)
    }

    /// Operations of the checking API.
    pub fn checking(&self) -> CheckingService<'_> {
        CheckingService::new(self)
    }

    /// Build a request for `path`, relative to the platform URL.
    ///
    /// The path is appended to the platform URL's path verbatim. The
    /// signature and content-type headers are always set; the token header
    /// only when authenticated.
    pub(crate) fn new_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AcrolinxResult<ApiRequest>
    where
        B: Serialize + ?Sized,
    {
        let mut url = self.platform_url.clone();
        url.set_path(&format!("{}{}", self.platform_url.path(), path));

        let body = body
            .map(|b| serde_json::to_vec(b))
            .transpose()
            .map_err(|e| AcrolinxError::Serialization(e.to_string()))?;

        let mut headers = HeaderMap::new();
        insert_header(&mut headers, HEADER_SIGNATURE, &self.signature)?;
        if let Some(token) = self.auth.token() {
            insert_header(&mut headers, HEADER_TOKEN, token.as_str())?;
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(ApiRequest {
            method,
            url,
            headers,
            body,
        })
    }

    pub(crate) async fn execute(&self, request: ApiRequest) -> AcrolinxResult<ApiResponse> {
        self.transport.execute(request).await
    }

    /// Execute a request and parse the response envelope.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> AcrolinxResult<Envelope<T>> {
        let response = self.execute(request).await?;
        envelope::parse(&response.body).map_err(|e| match e {
            AcrolinxError::InvalidJson(message) => {
                tracing::warn!(status = response.status, "undecodable response body");
                AcrolinxError::InvalidJson(format!("HTTP {}: {message}", response.status))
            }
            other => other,
        })
    }
}

/// Add a header, rejecting values that cannot be sent on the wire.
pub(crate) fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> AcrolinxResult<()> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
        AcrolinxError::InvalidHeader {
            name: name.to_string(),
            message: e.to_string(),
        }
    })?;
    let header_value = HeaderValue::from_str(value).map_err(|e| AcrolinxError::InvalidHeader {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    headers.insert(header_name, header_value);
    Ok(())
}

/// Parse a platform URL, appending the trailing `/` that relative paths need.
pub(crate) fn make_platform_url(url: &str) -> AcrolinxResult<Url> {
    let normalized = if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    };
    Url::parse(&normalized).map_err(|e| AcrolinxError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn execute(&self, _request: ApiRequest) -> AcrolinxResult<ApiResponse> {
            Err(AcrolinxError::Transport("no network in unit tests".to_string()))
        }
    }

    fn client(url: &str) -> Client {
        Client::from_parts(
            "testsignature".to_string(),
            make_platform_url(url).unwrap(),
            AuthState::Unauthenticated,
            Box::new(Unreachable),
        )
    }

    #[test]
    fn platform_url_gets_trailing_slash() {
        assert_eq!(
            make_platform_url("https://example.com/acrolinx").unwrap().as_str(),
            "https://example.com/acrolinx/"
        );
        assert_eq!(
            make_platform_url("https://example.com/").unwrap().as_str(),
            "https://example.com/"
        );
    }

    #[test]
    fn unparseable_platform_url_is_rejected() {
        let err = make_platform_url("not a URL").unwrap_err();
        match err {
            AcrolinxError::InvalidUrl { url, .. } => assert_eq!(url, "not a URL"),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn request_path_is_appended_to_base_path() {
        let client = client("https://example.com/platform");
        let req = client
            .new_request::<()>(Method::GET, "api/v1/checking/capabilities", None)
            .unwrap();
        assert_eq!(
            req.url.as_str(),
            "https://example.com/platform/api/v1/checking/capabilities"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn duplicate_slashes_are_not_normalized() {
        let client = client("https://example.com/");
        let req = client
            .new_request::<()>(Method::GET, "/api/v1/checking/checks", None)
            .unwrap();
        assert_eq!(req.url.path(), "//api/v1/checking/checks");
    }

    #[test]
    fn token_header_only_after_authentication() {
        let mut client = client("https://example.com");
        let req = client.new_request::<()>(Method::GET, "x", None).unwrap();
        assert_eq!(req.headers[HEADER_SIGNATURE], "testsignature");
        assert_eq!(req.headers[CONTENT_TYPE], "application/json");
        assert!(req.headers.get(HEADER_TOKEN).is_none());

        client.set_access_token("sOmEaPiToKeN");
        let req = client.new_request::<()>(Method::GET, "x", None).unwrap();
        assert_eq!(req.headers[HEADER_TOKEN], "sOmEaPiToKeN");

        client.sign_out();
        let req = client.new_request::<()>(Method::GET, "x", None).unwrap();
        assert!(req.headers.get(HEADER_TOKEN).is_none());
    }

    #[test]
    fn body_is_encoded_as_json() {
        let client = client("https://example.com");
        let creds = Credentials {
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let req = client
            .new_request(Method::POST, SIGN_IN_PATH, Some(&creds))
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&req.body.unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"username": "u", "password": "p"}));
    }

    #[test]
    fn unencodable_signature_is_rejected() {
        let client = Client::from_parts(
            "bad\nsignature".to_string(),
            make_platform_url("https://example.com").unwrap(),
            AuthState::Unauthenticated,
            Box::new(Unreachable),
        );
        let err = client.new_request::<()>(Method::GET, "x", None).unwrap_err();
        assert!(matches!(err, AcrolinxError::InvalidHeader { .. }));
    }

    #[tokio::test]
    async fn failed_sign_in_leaves_state_unchanged() {
        let mut client = client("https://example.com");
        client.set_access_token("previous");
        let err = client.sign_in("u", "p").await.unwrap_err();
        assert!(matches!(err, AcrolinxError::SignIn(_)));
        assert_eq!(client.access_token(), Some("previous"));
    }

    #[test]
    fn debug_output_hides_token() {
        let mut client = client("https://example.com");
        client.set_access_token("topsecret");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("topsecret"));
        assert!(rendered.contains("authenticated: true"));
    }
}
