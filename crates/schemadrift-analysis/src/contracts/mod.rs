//! Contract store: declared entity schemas loaded from YAML or JSON.

pub mod store;
pub mod types;

pub use store::{ContractStore, DEFAULT_CONTRACT_PATHS};
pub use types::{Contract, ContractFormat, FieldType};
