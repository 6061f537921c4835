//! Page analysis: geometry utilities, structural detectors, and the
//! profile-building orchestration.

mod builder;
pub mod forms;
pub mod geometry;
pub mod headings;
pub mod lists;
pub mod mode;
pub mod paragraph;
pub mod tables;

pub use builder::build_page_profile;
pub use geometry::Line;
pub use lists::ListDetector;
pub use mode::ModeDecision;
