//! Request bodies for the document API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crpt_core::model::DocumentType;

/// Path of the document creation endpoint.
pub const DOCUMENT_CREATE_PATH: &str = "/api/v3/lk/documents/create";

/// Only manually signed documents are submitted.
pub const MANUAL_FORMAT: &str = "MANUAL";

/// Body of a document creation request.
///
/// The document JSON and the signature travel base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    pub document_format: String,
    pub product_document: String,
    pub signature: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
}

impl CreateDocumentRequest {
    #[must_use]
    pub fn new(product_document_json: &str, signature: &str, doc_type: DocumentType) -> Self {
        Self {
            document_format: String::from(MANUAL_FORMAT),
            product_document: STANDARD.encode(product_document_json),
            signature: STANDARD.encode(signature),
            doc_type,
        }
    }
}
