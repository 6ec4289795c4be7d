//! Optional glTF character models
//!
//! A fighter can be dressed in a model from the settings file. The model
//! loads in the background; until it resolves the procedural body stays
//! visible, and if it never resolves nothing changes at all. Gameplay only
//! ever reads the `Duel`, so it does not care which state a slot is in.

use std::f32::consts::PI;

use bevy::asset::LoadState;
use bevy::prelude::*;

use super::scene::{FighterRoot, ProceduralBody};
use crate::actors::SPAWN_HEIGHT;

/// Uniform scale applied to loaded models
pub const MODEL_SCALE: f32 = 2.0;

/// Visual slot of one fighter
#[derive(Component, Debug, Clone, PartialEq)]
pub enum ModelSlot {
    /// No model configured; the procedural body is the visual
    Procedural,
    /// Waiting for the asset server
    Pending { path: String, scene: Handle<Scene> },
    /// Model attached under the fighter root
    Attached { path: String },
    /// Model failed to load; the procedural body stays
    Unavailable { path: String },
}

impl ModelSlot {
    /// Start loading `path`, or fall back to the procedural body.
    pub fn request(path: Option<&str>, asset_server: &AssetServer) -> Self {
        match path {
            Some(path) if !path.trim().is_empty() => ModelSlot::Pending {
                path: path.to_string(),
                scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.to_string())),
            },
            _ => ModelSlot::Procedural,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ModelSlot::Pending { .. })
    }
}

/// Transform of a loaded model relative to the fighter root: feet on the
/// ground, turned to face the same way as the procedural body.
pub fn model_transform() -> Transform {
    Transform::from_xyz(0.0, -SPAWN_HEIGHT, 0.0)
        .with_rotation(Quat::from_rotation_y(PI))
        .with_scale(Vec3::splat(MODEL_SCALE))
}

/// Poll pending slots; attach models that finished loading.
pub fn poll_model_slots(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut fighters: Query<(Entity, &FighterRoot, &mut ModelSlot)>,
    mut bodies: Query<(&Parent, &mut Visibility), With<ProceduralBody>>,
) {
    for (root, fighter, mut slot) in fighters.iter_mut() {
        let ModelSlot::Pending { path, scene } = &*slot else {
            continue;
        };

        match asset_server.load_state(scene.id()) {
            LoadState::Loaded => {
                let path = path.clone();
                let scene = scene.clone();
                commands.entity(root).with_children(|parent| {
                    parent.spawn((SceneRoot(scene), model_transform()));
                });

                for (body_parent, mut visibility) in bodies.iter_mut() {
                    if body_parent.get() == root {
                        *visibility = Visibility::Hidden;
                    }
                }

                info!("Attached model {} to {:?}", path, fighter.side);
                *slot = ModelSlot::Attached { path };
            }
            LoadState::Failed(err) => {
                warn!(
                    "Model {} for {:?} unavailable, keeping procedural body: {}",
                    path, fighter.side, err
                );
                *slot = ModelSlot::Unavailable { path: path.clone() };
            }
            _ => {}
        }
    }
}
