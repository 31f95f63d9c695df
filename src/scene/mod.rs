pub mod demo_scene;
pub mod prefabs;

pub use demo_scene::{
    apply_preset, attach_target, build_demo_scene, rebuild_ramp, target_model_source,
};
