//! Helpers shared across the client: wire constants, batch ids and
//! deserialization shims.

pub mod batch;
pub mod constants;
pub(crate) mod de;

pub use batch::generate_batch_id;
pub use constants::*;
