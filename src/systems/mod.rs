mod collision;
mod kinematics;
mod physics;
mod raycast;
mod sync;
mod transform;

pub use kinematics::{acceleration, kinematics_system, AccelerationClock};
pub use physics::{PhysicsBackend, SimplePhysics};
pub use raycast::raycast_sphere;
pub use sync::{
    body_to_mesh_system, reset_position, set_position, sleep, update_mesh_from_body,
    velocity_module, wake,
};
pub use transform::transform_propagation_system;
