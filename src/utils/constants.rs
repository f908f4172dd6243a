//! Header names, endpoint paths and client defaults for the Acrolinx platform.

use std::time::Duration;

/// Client signature header, sent on every request.
pub const HEADER_SIGNATURE: &str = "X-Acrolinx-Client";

/// Access token header, sent once the client is authenticated.
pub const HEADER_TOKEN: &str = "X-Acrolinx-Auth";

/// Locale header for capability queries.
pub const HEADER_LOCALE: &str = "X-Acrolinx-Client-Locale";

/// Sign-in endpoint, relative to the platform URL.
pub const SIGN_IN_PATH: &str = "dashboard/api/signin/authenticate";

/// Checking capabilities endpoint.
pub const CAPABILITIES_PATH: &str = "api/v1/checking/capabilities";

/// Check submission endpoint. Individual checks live below it.
pub const CHECKS_PATH: &str = "api/v1/checking/checks";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("acrolinx-rs/", env!("CARGO_PKG_VERSION"));
