use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::product::Product;
use crate::model::reference::{DocumentType, ProductGroup, ProductionType};
use crate::validate;

/// Participant block of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// Taxpayer number (INN) of the turnover participant.
    #[serde(rename = "participantInn")]
    pub participant_inn: String,
}

impl Description {
    #[must_use]
    pub fn new(participant_inn: impl Into<String>) -> Self {
        Self {
            participant_inn: participant_inn.into(),
        }
    }
}

/// Introduction into circulation of goods produced in Russia.
///
/// Field names match the JSON accepted by the document API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    pub doc_id: String,

    pub doc_status: String,

    pub doc_type: String,

    #[serde(
        rename = "importRequest",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub import_request: Option<String>,

    /// Taxpayer number (INN) of the goods owner.
    pub owner_inn: String,

    /// Taxpayer number (INN) of the turnover participant.
    pub participant_inn: String,

    /// Taxpayer number (INN) of the producer.
    pub producer_inn: String,

    /// Production date (`YYYY-MM-DD`).
    pub production_date: String,

    pub production_type: ProductionType,

    #[serde(default)]
    pub products: Vec<Product>,

    /// Registration date, either `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD`.
    pub reg_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_number: Option<String>,
}

impl Document {
    /// Parse a document from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document to the JSON sent to the API.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check the document and every product in it.
    pub fn validate(&self) -> Result<()> {
        if let Some(description) = &self.description {
            validate::required("description.participantInn", &description.participant_inn)?;
        }
        validate::required("doc_id", &self.doc_id)?;
        validate::required("doc_status", &self.doc_status)?;
        validate::required("doc_type", &self.doc_type)?;
        validate::required("owner_inn", &self.owner_inn)?;
        validate::required("participant_inn", &self.participant_inn)?;
        validate::required("producer_inn", &self.producer_inn)?;
        validate::iso_local_date("production_date", &self.production_date)?;
        validate::iso_local_date_or_date_time("reg_date", &self.reg_date)?;

        for (index, product) in self.products.iter().enumerate() {
            product
                .validate()
                .map_err(|e| Error::InvalidData(format!("products[{index}]: {e}")))?;
        }

        Ok(())
    }
}

/// Input of the introduce-goods call: the document and its product group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpIntroduceGoods {
    pub product_group: ProductGroup,
    pub document: Document,
}

impl LpIntroduceGoods {
    pub const DOCUMENT_TYPE: DocumentType = DocumentType::LpIntroduceGoods;

    #[must_use]
    pub const fn new(product_group: ProductGroup, document: Document) -> Self {
        Self {
            product_group,
            document,
        }
    }
}
