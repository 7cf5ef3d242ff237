pub mod body;
pub mod scene;
pub mod transform;

pub use body::CelestialBody;
pub use scene::RenderSnapshot;
pub use transform::ViewTransform;
