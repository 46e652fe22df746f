//! Card system: card records and the catalog.
//!
//! ## Key Types
//!
//! - `CardType`: The deck a card belongs to
//! - `Card`: Static card data with an optional effect tree
//! - `CardCatalog`: Lookup by id and type, JSON loading

pub mod card;
pub mod catalog;

pub use card::{Card, CardType};
pub use catalog::CardCatalog;
