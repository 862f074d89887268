mod fillet;
mod join;
pub mod ordering;
mod split;
mod trim;

pub use fillet::Fillet;
pub use join::Join;
pub use split::Split;
pub use trim::{Trim, TrimResult};
