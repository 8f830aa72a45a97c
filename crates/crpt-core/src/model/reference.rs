//! Reference values shared by the document types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Commodity group a document belongs to.
///
/// Sent as the `pg` query parameter by its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductGroup {
    Clothes,
    Shoes,
    Tobacco,
    Perfumery,
    Tires,
    Electronics,
    Pharma,
    Milk,
    Bicycle,
    Wheelchairs,
}

impl ProductGroup {
    pub const ALL: [Self; 10] = [
        Self::Clothes,
        Self::Shoes,
        Self::Tobacco,
        Self::Perfumery,
        Self::Tires,
        Self::Electronics,
        Self::Pharma,
        Self::Milk,
        Self::Bicycle,
        Self::Wheelchairs,
    ];

    /// Numeric code of the group in the national catalogue.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Clothes => 1,
            Self::Shoes => 2,
            Self::Tobacco => 3,
            Self::Perfumery => 4,
            Self::Tires => 5,
            Self::Electronics => 6,
            Self::Pharma => 7,
            Self::Milk => 8,
            Self::Bicycle => 9,
            Self::Wheelchairs => 10,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clothes => "clothes",
            Self::Shoes => "shoes",
            Self::Tobacco => "tobacco",
            Self::Perfumery => "perfumery",
            Self::Tires => "tires",
            Self::Electronics => "electronics",
            Self::Pharma => "pharma",
            Self::Milk => "milk",
            Self::Bicycle => "bicycle",
            Self::Wheelchairs => "wheelchairs",
        }
    }
}

impl fmt::Display for ProductGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == name)
            .ok_or_else(|| Error::InvalidData(format!("unknown product group: {s}")))
    }
}

/// How the goods were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductionType {
    /// Produced in-house.
    OwnProduction,
    /// Produced under contract.
    ContractProduction,
}

/// Kind of mandatory certification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateDocument {
    ConformityCertificate,
    ConformityDeclaration,
}

/// Document type sent alongside the encoded document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Introduction into circulation of goods produced in Russia.
    LpIntroduceGoods,
}

impl DocumentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LpIntroduceGoods => "LP_INTRODUCE_GOODS",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_group_codes() {
        let codes: Vec<u8> = ProductGroup::ALL.iter().map(|g| g.code()).collect();
        assert_eq!(codes, (1..=10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_product_group_from_str() {
        assert_eq!("milk".parse::<ProductGroup>().unwrap(), ProductGroup::Milk);
        assert_eq!("Shoes".parse::<ProductGroup>().unwrap(), ProductGroup::Shoes);
        assert!("groceries".parse::<ProductGroup>().is_err());
    }

    #[test]
    fn test_product_group_serializes_lowercase() {
        let json = serde_json::to_string(&ProductGroup::Wheelchairs).unwrap();
        assert_eq!(json, "\"wheelchairs\"");
        assert_eq!(ProductGroup::Tobacco.to_string(), "tobacco");
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&ProductionType::ContractProduction).unwrap(),
            "\"CONTRACT_PRODUCTION\""
        );
        assert_eq!(
            serde_json::to_string(&CertificateDocument::ConformityDeclaration).unwrap(),
            "\"CONFORMITY_DECLARATION\""
        );
        assert_eq!(
            serde_json::to_string(&DocumentType::LpIntroduceGoods).unwrap(),
            format!("\"{}\"", DocumentType::LpIntroduceGoods)
        );
    }
}
