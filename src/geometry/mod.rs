mod bezier;
pub mod mesh;
mod ramp;

pub use mesh::MeshData;
pub use ramp::RampShape;
