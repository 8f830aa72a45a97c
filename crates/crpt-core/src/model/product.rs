use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::reference::CertificateDocument;
use crate::validate;

/// A single product line of an introduce-goods document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Kind of mandatory certification document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_document: Option<CertificateDocument>,

    /// Date of the certification document (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_document_date: Option<String>,

    /// Number of the certification document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_document_number: Option<String>,

    /// Taxpayer number (INN) of the owner.
    pub owner_inn: String,

    /// Taxpayer number (INN) of the producer.
    pub producer_inn: String,

    /// Production date (`YYYY-MM-DD`), if it differs from the document's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,

    /// Ten-digit commodity nomenclature code (TN VED).
    pub tnved_code: String,

    /// Unique identifier of the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uit_code: Option<String>,

    /// Unique identifier of the transport package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uitu_code: Option<String>,
}

impl Product {
    #[must_use]
    pub fn new(
        owner_inn: impl Into<String>,
        producer_inn: impl Into<String>,
        tnved_code: impl Into<String>,
    ) -> Self {
        Self {
            certificate_document: None,
            certificate_document_date: None,
            certificate_document_number: None,
            owner_inn: owner_inn.into(),
            producer_inn: producer_inn.into(),
            production_date: None,
            tnved_code: tnved_code.into(),
            uit_code: None,
            uitu_code: None,
        }
    }

    #[must_use]
    pub fn with_uit_code(mut self, uit_code: impl Into<String>) -> Self {
        self.uit_code = Some(uit_code.into());
        self
    }

    #[must_use]
    pub fn with_uitu_code(mut self, uitu_code: impl Into<String>) -> Self {
        self.uitu_code = Some(uitu_code.into());
        self
    }

    /// Check required fields, date formats, and that the product is
    /// identified by an item or package code.
    pub fn validate(&self) -> Result<()> {
        validate::required("owner_inn", &self.owner_inn)?;
        validate::required("producer_inn", &self.producer_inn)?;
        validate::required("tnved_code", &self.tnved_code)?;
        validate::optional_iso_local_date(
            "certificate_document_date",
            self.certificate_document_date.as_deref(),
        )?;
        validate::optional_iso_local_date("production_date", self.production_date.as_deref())?;

        if self.uit_code.is_none() && self.uitu_code.is_none() {
            return Err(Error::InvalidData(String::from(
                "either uit_code or uitu_code is required",
            )));
        }

        Ok(())
    }
}
