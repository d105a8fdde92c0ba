//! Systems for the AR scene.
//!
//! Organized by functionality:
//! - hit_test: XR input pumping and the hit-test session state machine
//! - placement: select handling and placed-object spinning
//! - animate: sphere pulse, hue cycling, scene-store sync

pub mod animate;
pub mod placement;

pub use animate::*;
pub use hit_test::*;
pub use placement::*;
