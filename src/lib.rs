//! # acrolinx: Rust client for the Acrolinx platform API
//!
//! Typed access to the Acrolinx checking API: sign in, query checking
//! capabilities, submit content, and poll for results.
//!
//! ## Overview
//!
//! Every platform response arrives in the same envelope
//! (`data` / `links` / `progress` / `error`). The [`envelope`] module turns
//! that envelope into one of three outcomes: a service error, a progress
//! snapshot, or the final data. Operations return the typed data together
//! with the response's [`Links`] for further navigation.
//!
//! Checks are asynchronous on the platform side. Submitting returns a
//! [`Check`] handle; [`client::CheckingService::get_check_result`] is a
//! single poll that answers either [`client::CheckStatus::InProgress`] (with
//! a minimum wait before the next poll) or [`client::CheckStatus::Complete`].
//! The library never polls, retries or backs off on its own.
//!
//! ## Quick Start
//!
//! ```no_run
//! use acrolinx::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::new("my-client-signature", "https://acme.acrolinx.cloud")?;
//!     client.sign_in("alice", "secret").await?;
//!
//!     let (caps, _) = client
//!         .checking()
//!         .get_capabilities(Some(&GetCapabilitiesOptions::with_locale("en")))
//!         .await?;
//!     let profile = caps.default_guidance_profile().ok_or("no default profile")?;
//!
//!     let options = SubmitCheckBuilder::new("Their is a typo here.")
//!         .guidance_profile(&profile.id)
//!         .content_format("TEXT")
//!         .build();
//!     let (check, _) = client.checking().submit_check(&options).await?;
//!
//!     loop {
//!         let (status, _) = client.checking().get_check_result(&check).await?;
//!         match status {
//!             CheckStatus::InProgress(progress) => {
//!                 tokio::time::sleep(progress.retry_after()).await;
//!             }
//!             CheckStatus::Complete(result) => {
//!                 for issue in result.all_issues() {
//!                     println!("{}: {}", issue.goal_id, issue.display_surface);
//!                 }
//!                 break;
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! All operations return [`AcrolinxResult`]. A platform-reported error
//! surfaces as [`AcrolinxError::Service`], whose message is the platform's
//! `detail` text verbatim.
//!
//! ## Logging
//!
//! Requests and responses are traced with [`tracing`] at `debug` level.
//! Access tokens are never logged. Install a subscriber to see them.

pub mod builders;
pub mod client;
pub mod envelope;
pub mod error;
pub mod types;
pub mod utils;

/// Prelude module that re-exports commonly used types.
///
/// ```
/// use acrolinx::prelude::*;
/// ```
pub mod prelude {
    pub use crate::types::{
        Capabilities, Check, CheckResult, GetCapabilitiesOptions, Issue, Links, Progress,
        SubmitCheckOptions,
    };

    pub use crate::error::{AcrolinxError, AcrolinxResult};

    pub use crate::builders::{ClientBuilder, SubmitCheckBuilder};

    pub use crate::client::{CheckStatus, CheckingService, Client};
}

// Re-export core types at crate root for convenience.
pub use builders::{ClientBuilder, SubmitCheckBuilder};
pub use client::{CheckStatus, Client};
pub use error::{AcrolinxError, AcrolinxResult};
pub use types::*;
