pub mod criteria;
pub mod engine;

pub use criteria::{
    parse_bound, BathroomFilter, BedroomFilter, Bounds, FilterCriteria, BATHROOM_OPTIONS,
    BEDROOM_OPTIONS,
};
pub use engine::{apply, matches};
