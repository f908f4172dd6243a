//! Batch id generation.
//!
//! Checks that share a `batchId` are grouped into one report on the
//! platform. Ids only need to be unique per batch run.

/// Generate a fresh batch id of the form `gen.<signature>.<uuid>`.
///
/// Characters outside `[A-Za-z0-9_-]` in the signature are replaced with
/// `_` so the id stays URL-safe.
pub fn generate_batch_id(client_signature: &str) -> String {
    let sanitized: String = client_signature
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("gen.{}.{}", sanitized, uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_id_has_prefix_and_uuid() {
        let id = generate_batch_id("my client/1.0");
        let rest = id.strip_prefix("gen.my_client_1_0.").unwrap();
        assert!(uuid::Uuid::parse_str(rest).is_ok());
    }

    #[test]
    fn batch_ids_are_unique() {
        assert_ne!(generate_batch_id("sig"), generate_batch_id("sig"));
    }
}
