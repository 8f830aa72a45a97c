pub mod document;
pub mod product;
pub mod reference;

pub use document::{Description, Document, LpIntroduceGoods};
pub use product::Product;
pub use reference::{CertificateDocument, DocumentType, ProductGroup, ProductionType};
