pub mod comparator;
pub mod matcher;
pub mod normalize;

pub use comparator::evaluate;
pub use matcher::find_match;
pub use normalize::{fix, name_key};
