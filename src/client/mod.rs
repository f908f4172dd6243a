//! Acrolinx client: call the platform's checking API.
//!
//! - [`Client`]: signature, platform URL, auth state and transport
//! - [`CheckingService`]: capabilities, check submission, polling, cancellation
//! - [`Transport`] / [`HttpTransport`]: pluggable request execution
//! - [`AuthState`]: unauthenticated or holding an access token
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use acrolinx::client::{CheckStatus, Client};
//! use acrolinx::builders::SubmitCheckBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::builder("my-client-signature", "https://acme.acrolinx.cloud")
//!     .with_api_token("token-from-somewhere")
//!     .build()?;
//!
//! let options = SubmitCheckBuilder::new("This sentence have an error.")
//!     .guidance_profile("b7a9b4b5-3d10-4b3f-9e4c-0b3e0e0b7f3c")
//!     .content_format("TEXT")
//!     .build();
//! let (check, _links) = client.checking().submit_check(&options).await?;
//!
//! let result = loop {
//!     match client.checking().get_check_result(&check).await?.0 {
//!         CheckStatus::InProgress(progress) => {
//!             tokio::time::sleep(progress.retry_after().max(Duration::from_secs(1))).await;
//!         }
//!         CheckStatus::Complete(result) => break result,
//!     }
//! };
//! println!("score: {:?}", result.quality.map(|q| q.score));
//! # Ok(())
//! # }
//! ```

mod acrolinx_client;
mod auth;
mod checking;
mod transport;

pub use acrolinx_client::Client;
pub use auth::AuthState;
pub use checking::{CheckStatus, CheckingService};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport, TransportConfig};

pub(crate) use acrolinx_client::make_platform_url;
