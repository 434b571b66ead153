//! Geometry structures shared by the pipeline stages

pub mod clip;
pub mod clipvertex;
pub mod coordinate;
pub mod dimension;
pub mod screenvertex;

pub use self::clip::{ClippingPlane, ALL_CLIPPING_PLANES};
pub use self::clipvertex::ClipVertex;
pub use self::coordinate::Coordinate;
pub use self::dimension::{Dimensions, HasDimensions};
pub use self::screenvertex::ScreenVertex;
