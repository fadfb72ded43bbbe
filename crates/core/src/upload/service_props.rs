//! Property-based tests for the upload gates.

use std::sync::Arc;

use bytes::Bytes;
use proptest::prelude::*;

use super::config::UploadConfig;
use super::error::{UploadError, ValidationError};
use super::recording::{Outcome, RecordingStore};
use super::service::UploadService;
use super::types::UploadRequest;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

fn service(store: &Arc<RecordingStore>, max: u64, allowed: &[&str]) -> UploadService {
    let config = UploadConfig::new("media", "https://blr1.digitaloceanspaces.com")
        .with_max_file_size(max)
        .with_allowed_mime_types(allowed.iter().copied());
    UploadService::new(store.clone(), config)
}

fn allowed_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("application/pdf"),
        Just("image/png"),
        Just("image/jpeg"),
        Just("video/mp4"),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Oversized files are rejected without touching the store.
    #[test]
    fn prop_size_gate_makes_no_store_call(
        max in 1u64..=50 * 1024 * 1024,
        excess in 1u64..=10 * 1024 * 1024,
        mime in allowed_type(),
    ) {
        let store = Arc::new(RecordingStore::new(Outcome::Succeed));
        let service = service(&store, max, &["application/pdf", "image/png", "image/jpeg", "video/mp4"]);
        let request = UploadRequest::new(Bytes::from_static(b"x"), "big.bin", mime)
            .with_size(max + excess);

        let result = runtime().block_on(service.upload(request));
        let is_too_large = matches!(
            result,
            Err(UploadError::Validation(ValidationError::FileTooLarge { .. }))
        );
        prop_assert!(is_too_large);
        prop_assert_eq!(store.puts(), 0);
    }

    /// Types outside the allow-list are rejected, types inside pass.
    #[test]
    fn prop_type_gate(
        mime in "[a-z]{1,10}/[a-z0-9.+-]{1,15}",
        size in 0u64..=1024,
    ) {
        let allowed = ["application/pdf", "image/png"];
        let store = Arc::new(RecordingStore::new(Outcome::Succeed));
        let service = service(&store, 1024, &allowed);

        let result = service.validate_upload(size, &mime);
        if allowed.contains(&mime.as_str()) {
            prop_assert!(result.is_ok());
        } else {
            let is_unsupported = matches!(result, Err(ValidationError::UnsupportedType { .. }));
            prop_assert!(is_unsupported);
        }
    }

    /// Allowed types within the limit always pass validation.
    #[test]
    fn prop_allowed_types_pass(mime in allowed_type(), size in 0u64..=4096) {
        let store = Arc::new(RecordingStore::new(Outcome::Succeed));
        let service = service(&store, 4096, &["application/pdf", "image/png", "image/jpeg", "video/mp4"]);
        prop_assert!(service.validate_upload(size, mime).is_ok());
    }
}
