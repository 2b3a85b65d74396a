//! Catalog and deck-list loading: turns JSON card data and effect text into
//! core types once at startup.

pub mod effect_text;
pub mod load;
pub mod schema;

pub use effect_text::*;
pub use load::*;
pub use schema::*;
