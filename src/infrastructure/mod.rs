pub mod db;
pub mod inspect;

pub use inspect::{Inspection, StoreInspector};
