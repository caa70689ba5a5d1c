pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Annualization, DataType, Field, Periodicity};
pub use error::{CoreError, ParseError};
pub use structs::{NumericMatrix, NumericSequence, PortfolioRisk, RiskRequest};
