//! Attachment normalization
//!
//! Chat requests can reference an image three ways: raw multipart bytes, a
//! previously uploaded `{url, name, contentType}` record, or a data URL. The
//! pipeline only needs one canonical byte-accessible reference, so everything
//! collapses to either a data URL or a dereferenceable URL here.

use crate::models::AttachmentRecord;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// An attachment as received at the HTTP boundary
#[derive(Debug, Clone)]
pub enum AttachmentInput {
    /// Raw file bytes from a multipart upload
    Bytes {
        data: Vec<u8>,
        content_type: String,
        name: String,
    },
    /// Reference to a previously uploaded file
    Record(AttachmentRecord),
}

/// Collapse the attachment list to one canonical image reference.
///
/// Only the first attachment is used; additional attachments are ignored
/// (documented limitation). Returns None when there are no attachments, in
/// which case the pipeline proceeds text-only.
pub fn normalize_attachments(inputs: &[AttachmentInput]) -> Option<String> {
    if inputs.len() > 1 {
        log::debug!(
            "Ignoring {} extra attachments; only the first is used",
            inputs.len() - 1
        );
    }

    match inputs.first()? {
        AttachmentInput::Bytes {
            data,
            content_type,
            name,
        } => {
            log::debug!(
                "Normalizing attachment {:?} ({} bytes, {})",
                name,
                data.len(),
                content_type
            );
            let mime = if content_type.is_empty() {
                "application/octet-stream"
            } else {
                content_type.as_str()
            };
            Some(format!("data:{};base64,{}", mime, BASE64.encode(data)))
        }
        AttachmentInput::Record(record) => {
            // Data URLs and hosted URLs both pass through verbatim
            Some(record.url.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str) -> AttachmentInput {
        AttachmentInput::Record(AttachmentRecord {
            url: url.to_string(),
            name: "ref.png".to_string(),
            content_type: "image/png".to_string(),
        })
    }

    #[test]
    fn test_no_attachments_is_none() {
        assert!(normalize_attachments(&[]).is_none());
    }

    #[test]
    fn test_bytes_become_data_url() {
        let input = AttachmentInput::Bytes {
            data: vec![1, 2, 3],
            content_type: "image/png".to_string(),
            name: "shot.png".to_string(),
        };
        let normalized = normalize_attachments(&[input]).unwrap();
        assert!(normalized.starts_with("data:image/png;base64,"));
        assert!(normalized.ends_with(&BASE64.encode([1u8, 2, 3])));
    }

    #[test]
    fn test_bytes_without_content_type_use_octet_stream() {
        let input = AttachmentInput::Bytes {
            data: vec![9],
            content_type: String::new(),
            name: "blob".to_string(),
        };
        let normalized = normalize_attachments(&[input]).unwrap();
        assert!(normalized.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_record_url_passes_through() {
        let normalized = normalize_attachments(&[record("https://host/uploads/a.png")]).unwrap();
        assert_eq!(normalized, "https://host/uploads/a.png");
    }

    #[test]
    fn test_data_url_record_passes_through() {
        let normalized = normalize_attachments(&[record("data:image/png;base64,AAAA")]).unwrap();
        assert_eq!(normalized, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_only_first_attachment_used() {
        let inputs = vec![record("https://host/first.png"), record("https://host/second.png")];
        assert_eq!(
            normalize_attachments(&inputs).as_deref(),
            Some("https://host/first.png")
        );
    }
}
