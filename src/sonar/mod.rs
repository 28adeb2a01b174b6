pub mod active_space;
pub mod source_level;

pub use active_space::{
    ActiveSpace, active_space_area_km2, max_detection_range_m, propagation_loss,
};
pub use source_level::{SourceLevel, source_level};
