// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod geometry;
pub mod parser;
pub mod query;
pub mod statistics;

pub use distance::calculate_bounding_box;
pub use filters::{filter_by_area, filter_by_tag_value};
pub use geometry::{ring_is_closed, shoelace_area};
pub use parser::{parse_element, parse_response, stitch_rings};
pub use query::{build_tag_conditions, ways_query, relations_query, AVAILABILITY_QUERY};
pub use statistics::calculate_statistics;
