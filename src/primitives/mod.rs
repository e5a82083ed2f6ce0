//! Floating-point geometric primitives.

mod circle2;
mod line2;
mod point2;
mod point3;
mod segment2;
mod vec2;

pub use circle2::Circle2;
pub use line2::LineEquation2;
pub use point2::Point2;
pub use point3::Point3;
pub use segment2::Segment2;
pub use vec2::Vec2;
