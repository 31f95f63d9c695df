use glam::Vec3;
use hecs::World;
use tracing::{info, warn};

use crate::assets::ModelSource;
use crate::components::{Collider, MeshHandle};
use crate::config::{vec3, SceneConfig, TargetConfig};
use crate::context::{SimContext, TargetWatch};
use crate::events::{publish_angle, AngleChanged, AngleListeners};
use crate::geometry::{MeshData, RampShape};
use crate::renderer::MeshStore;
use crate::scene::prefabs::{
    ramp_parts, spawn_ground, spawn_projectile, spawn_ramp, spawn_scene_root, spawn_target,
};
use crate::ui::{gravity_text, Label};

/// Build the ramp, ball and ground under a fresh scene root.
///
/// `listeners` are installed before the ramp's first angle is published, so
/// they all see it. The target is not part of the initial scene; see
/// [`attach_target`].
pub fn build_demo_scene(
    config: &SceneConfig,
    listeners: AngleListeners,
) -> (SimContext, MeshStore) {
    let mut world = World::new();
    let mut meshes = MeshStore::new();

    let root = spawn_scene_root(&mut world);
    spawn_ground(&mut world, &mut meshes, root);
    let projectile = spawn_projectile(&mut world, &mut meshes, root, &config.projectile);

    let preset = config
        .ramp
        .preset_index(&config.ramp.preset)
        .map(|i| &config.ramp.presets[i]);
    let shape = match preset {
        Some(preset) => preset.shape(),
        None => {
            warn!(preset = %config.ramp.preset, "unknown ramp preset, using the first one");
            config
                .ramp
                .presets
                .first()
                .map(|p| p.shape())
                .unwrap_or_else(RampShape::demo)
        }
    };
    let ramp = spawn_ramp(&mut world, &mut meshes, root, &config.ramp, &shape);

    let mut ctx = SimContext::new(world, root, projectile, ramp);
    ctx.target_watch = TargetWatch::new(Vec3::new(
        0.0,
        config.target.ray_height,
        config.target.depth / 2.0,
    ));
    ctx.angle_listeners = listeners;
    ctx.labels.set(Label::Status, "ready");
    ctx.labels.set(Label::Gravity, gravity_text(vec3(config.world.gravity)));

    let angle = shape.launch_angle();
    info!(angle, "ramp built");
    publish_angle(&mut ctx, AngleChanged { new_angle: angle, source: ramp });

    (ctx, meshes)
}

/// Regenerate collider and mesh of the ramp, then republish its angle.
pub fn rebuild_ramp(ctx: &mut SimContext, meshes: &mut MeshStore, shape: &RampShape, depth: f32) {
    let (collider, mesh) = ramp_parts(shape, depth);
    let angle = shape.launch_angle();

    if let Ok(handle) = ctx.world.get::<&MeshHandle>(ctx.ramp).map(|h| *h) {
        meshes.replace(handle, mesh);
    }
    if let Ok(mut current) = ctx.world.get::<&mut Collider>(ctx.ramp) {
        *current = collider;
    }

    info!(angle, "ramp rebuilt");
    let source = ctx.ramp;
    publish_angle(ctx, AngleChanged { new_angle: angle, source });
}

/// Rebuild the ramp from preset `index`. Returns false if there is no such preset.
pub fn apply_preset(
    ctx: &mut SimContext,
    meshes: &mut MeshStore,
    config: &SceneConfig,
    index: usize,
) -> bool {
    let Some(preset) = config.ramp.presets.get(index) else {
        warn!(index, "no ramp preset at this slot");
        return false;
    };
    info!(name = %preset.name, "switching ramp preset");
    rebuild_ramp(ctx, meshes, &preset.shape(), config.ramp.depth);
    true
}

pub fn target_model_source(config: &TargetConfig) -> ModelSource {
    match &config.model {
        Some(path) => ModelSource::Obj {
            path: path.clone(),
            scale: config.model_scale,
        },
        None => ModelSource::Profile {
            outline: config.profile_points(),
            depth: config.depth,
        },
    }
}

/// Turn a loaded model into the target entity. Only the frame loop calls this.
pub fn attach_target(
    ctx: &mut SimContext,
    meshes: &mut MeshStore,
    config: &TargetConfig,
    mesh: MeshData,
) {
    let target = spawn_target(&mut ctx.world, meshes, ctx.scene_root, config, mesh);
    ctx.target = Some(target);
    info!("target placed");
}
