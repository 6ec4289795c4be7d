//! Duel scene
//!
//! Spawns the arena and the two procedural fighters, and keeps the rendered
//! entities in step with the `Duel` each frame. Nothing here feeds back into
//! the simulation.

use bevy::prelude::*;

use super::constants::*;
use super::models::ModelSlot;
use super::{Duel, Side};
use crate::actors::Body;
use crate::camera::MainCamera;
use crate::combat::events::WeaponSwitchedEvent;
use crate::combat::vitals::HealthBand;
use crate::combat::weapon::WeaponKind;
use crate::rig::{Joint, TORSO_BASE_HEIGHT};
use crate::settings::GameSettings;

/// Root of one fighter; follows the body position and facing
#[derive(Component, Debug, Clone, Copy)]
pub struct FighterRoot {
    pub side: Side,
}

/// Parent of every procedural body part. Hidden once a model attaches.
#[derive(Component)]
pub struct ProceduralBody;

/// A rotatable joint of a fighter rig
#[derive(Component, Debug, Clone, Copy)]
pub struct FighterJoint {
    pub side: Side,
    pub joint: Joint,
    /// Rest translation relative to the parent
    pub rest: Vec3,
}

/// Floating health bar; faces the camera
#[derive(Component)]
pub struct HealthBar {
    pub side: Side,
}

/// Coloured fill of a health bar, anchored at its left edge
#[derive(Component)]
pub struct HealthBarFill {
    pub side: Side,
    band: HealthBand,
}

#[derive(Component)]
pub struct SwordVisual;

/// Meshes shared by both rigs
struct RigMeshes {
    torso: Handle<Mesh>,
    chest: Handle<Mesh>,
    neck: Handle<Mesh>,
    head: Handle<Mesh>,
    eye: Handle<Mesh>,
    shoulder: Handle<Mesh>,
    upper_arm: Handle<Mesh>,
    forearm: Handle<Mesh>,
    hand: Handle<Mesh>,
    hip: Handle<Mesh>,
    thigh: Handle<Mesh>,
    shin: Handle<Mesh>,
    foot: Handle<Mesh>,
    blade: Handle<Mesh>,
}

impl RigMeshes {
    fn new(meshes: &mut Assets<Mesh>) -> Self {
        let s = RIG_SCALE;
        Self {
            torso: meshes.add(Cuboid::new(0.9 * s, 1.0 * s, 0.5 * s)),
            chest: meshes.add(Cuboid::new(0.85 * s, 0.6 * s, 0.52 * s)),
            neck: meshes.add(Cylinder::new(0.165 * s, 0.3 * s)),
            head: meshes.add(Sphere::new(0.35 * s)),
            eye: meshes.add(Sphere::new(0.06 * s)),
            shoulder: meshes.add(Sphere::new(0.22 * s)),
            upper_arm: meshes.add(Cylinder::new(0.11 * s, 0.6 * s)),
            forearm: meshes.add(Cylinder::new(0.095 * s, 0.5 * s)),
            hand: meshes.add(Cuboid::new(0.15 * s, 0.22 * s, 0.12 * s)),
            hip: meshes.add(Cuboid::new(0.85 * s, 0.3 * s, 0.45 * s)),
            thigh: meshes.add(Cylinder::new(0.14 * s, 0.7 * s)),
            shin: meshes.add(Cylinder::new(0.115 * s, 0.7 * s)),
            foot: meshes.add(Cuboid::new(0.22 * s, 0.12 * s, 0.4 * s)),
            blade: meshes.add(Cuboid::new(0.08, 1.5, 0.05)),
        }
    }
}

/// Materials for one fighter
struct RigMaterials {
    body: Handle<StandardMaterial>,
    trim: Handle<StandardMaterial>,
    skin: Handle<StandardMaterial>,
    boots: Handle<StandardMaterial>,
    eyes: Handle<StandardMaterial>,
    blade: Handle<StandardMaterial>,
}

impl RigMaterials {
    fn new(materials: &mut Assets<StandardMaterial>, side: Side) -> Self {
        let (body, trim) = match side {
            Side::Player => (PLAYER_COLOR, PLAYER_TRIM_COLOR),
            Side::Bot => (BOT_COLOR, BOT_TRIM_COLOR),
        };
        Self {
            body: materials.add(rgb(body)),
            trim: materials.add(rgb(trim)),
            skin: materials.add(rgb(SKIN_COLOR)),
            boots: materials.add(rgb(BOOT_COLOR)),
            eyes: materials.add(Color::BLACK),
            blade: materials.add(StandardMaterial {
                base_color: rgb(BLADE_COLOR),
                metallic: 0.8,
                perceptual_roughness: 0.2,
                ..default()
            }),
        }
    }
}

fn part(
    mesh: &Handle<Mesh>,
    material: &Handle<StandardMaterial>,
    translation: Vec3,
) -> (Mesh3d, MeshMaterial3d<StandardMaterial>, Transform) {
    (
        Mesh3d(mesh.clone()),
        MeshMaterial3d(material.clone()),
        Transform::from_translation(translation),
    )
}

fn joint(side: Side, joint: Joint, rest: Vec3) -> (FighterJoint, Transform, Visibility) {
    (
        FighterJoint { side, joint, rest },
        Transform::from_translation(rest),
        Visibility::default(),
    )
}

/// Spawn the arena, lights, camera, and both fighters.
pub fn spawn_duel_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    duel: Res<Duel>,
    settings: Res<GameSettings>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(duel.camera.position())
            .looking_at(duel.camera.look_at(), Vec3::Y),
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 15000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ARENA_SIZE, ARENA_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: rgb(GROUND_COLOR),
            perceptual_roughness: 0.9,
            ..default()
        })),
    ));

    let rig_meshes = RigMeshes::new(&mut meshes);
    let bar_background = meshes.add(Rectangle::new(HEALTH_BAR_WIDTH, 0.2));
    let bar_fill = meshes.add(Rectangle::new(HEALTH_BAR_WIDTH, 0.15));
    let bar_background_material = materials.add(StandardMaterial {
        base_color: rgb(HEALTH_BAR_BACKGROUND),
        unlit: true,
        ..default()
    });

    for side in [Side::Player, Side::Bot] {
        let body = duel.body(side);
        let model_path = match side {
            Side::Player => settings.models.player.as_deref(),
            Side::Bot => settings.models.bot.as_deref(),
        };
        let rig_materials = RigMaterials::new(&mut materials, side);
        let show_sword = side == Side::Player && duel.player.equipped() == WeaponKind::Sword;

        spawn_fighter(
            &mut commands,
            &rig_meshes,
            &rig_materials,
            side,
            body,
            show_sword,
            ModelSlot::request(model_path, &asset_server),
        );

        let fill_material = materials.add(StandardMaterial {
            base_color: body.vitals.health_bar().band.color(),
            unlit: true,
            ..default()
        });
        commands
            .spawn((
                HealthBar { side },
                Transform::from_translation(body.position + Vec3::Y * HEALTH_BAR_HEIGHT),
                Visibility::default(),
                Mesh3d(bar_background.clone()),
                MeshMaterial3d(bar_background_material.clone()),
            ))
            .with_children(|bar| {
                bar.spawn((
                    HealthBarFill {
                        side,
                        band: body.vitals.health_bar().band,
                    },
                    Mesh3d(bar_fill.clone()),
                    MeshMaterial3d(fill_material),
                    Transform::from_xyz(0.0, 0.0, 0.01),
                ));
            });
    }

    info!("Duel scene spawned");
}

fn spawn_fighter(
    commands: &mut Commands,
    meshes: &RigMeshes,
    materials: &RigMaterials,
    side: Side,
    body: &Body,
    show_sword: bool,
    model: ModelSlot,
) {
    let s = RIG_SCALE;

    commands
        .spawn((
            FighterRoot { side },
            Transform::from_translation(body.position).with_rotation(body.rotation()),
            Visibility::default(),
            model,
        ))
        .with_children(|root| {
            root.spawn((ProceduralBody, Transform::default(), Visibility::default()))
                .with_children(|rig| {
                    // Torso
                    rig.spawn((
                        joint(side, Joint::Torso, Vec3::Y * TORSO_BASE_HEIGHT),
                        Mesh3d(meshes.torso.clone()),
                        MeshMaterial3d(materials.body.clone()),
                    ));
                    rig.spawn(part(&meshes.chest, &materials.body, Vec3::new(0.0, 0.7 * s, 0.0)));
                    rig.spawn(part(&meshes.hip, &materials.trim, Vec3::new(0.0, -0.15 * s, 0.0)));

                    // Head
                    rig.spawn(joint(side, Joint::Head, Vec3::new(0.0, 1.3 * s, 0.0)))
                        .with_children(|head| {
                            head.spawn(part(&meshes.neck, &materials.skin, Vec3::new(0.0, 0.15 * s, 0.0)));
                            head.spawn(part(&meshes.head, &materials.skin, Vec3::new(0.0, 0.5 * s, 0.0)));
                            for x in [-0.12 * s, 0.12 * s] {
                                head.spawn(part(&meshes.eye, &materials.eyes, Vec3::new(x, 0.55 * s, 0.32 * s)));
                            }
                        });

                    // Arms
                    for (arm, forearm, x) in [
                        (Joint::LeftArm, Joint::LeftForearm, -0.55 * s),
                        (Joint::RightArm, Joint::RightForearm, 0.55 * s),
                    ] {
                        rig.spawn(part(&meshes.shoulder, &materials.trim, Vec3::new(x, 0.9 * s, 0.0)));
                        rig.spawn(joint(side, arm, Vec3::new(x, 0.9 * s, 0.0)))
                            .with_children(|upper| {
                                upper.spawn(part(&meshes.upper_arm, &materials.skin, Vec3::new(0.0, -0.3 * s, 0.0)));
                                upper
                                    .spawn(joint(side, forearm, Vec3::new(0.0, -0.6 * s, 0.0)))
                                    .with_children(|lower| {
                                        lower.spawn(part(&meshes.forearm, &materials.skin, Vec3::new(0.0, -0.25 * s, 0.0)));
                                        if forearm == Joint::RightForearm {
                                            spawn_hand(lower, meshes, materials, side, show_sword);
                                        }
                                    });
                            });
                    }

                    // Legs
                    for (leg, shin, x) in [
                        (Joint::LeftLeg, Joint::LeftShin, -0.25 * s),
                        (Joint::RightLeg, Joint::RightShin, 0.25 * s),
                    ] {
                        rig.spawn(joint(side, leg, Vec3::new(x, -0.3 * s, 0.0)))
                            .with_children(|thigh| {
                                thigh.spawn(part(&meshes.thigh, &materials.trim, Vec3::new(0.0, -0.35 * s, 0.0)));
                                thigh
                                    .spawn(joint(side, shin, Vec3::new(0.0, -0.7 * s, 0.0)))
                                    .with_children(|lower| {
                                        lower.spawn(part(&meshes.shin, &materials.trim, Vec3::new(0.0, -0.35 * s, 0.0)));
                                        lower.spawn(part(&meshes.foot, &materials.boots, Vec3::new(0.0, -0.8 * s, 0.1 * s)));
                                    });
                            });
                    }
                });
        });
}

/// Right hand; the player's hand carries the (possibly hidden) sword.
fn spawn_hand(
    forearm: &mut ChildBuilder,
    meshes: &RigMeshes,
    materials: &RigMaterials,
    side: Side,
    show_sword: bool,
) {
    let s = RIG_SCALE;
    forearm
        .spawn(part(&meshes.hand, &materials.skin, Vec3::new(0.0, -0.55 * s, 0.0)))
        .with_children(|hand| {
            if side == Side::Player {
                hand.spawn((
                    SwordVisual,
                    part(&meshes.blade, &materials.blade, Vec3::new(0.0, -0.85, 0.0)),
                    if show_sword {
                        Visibility::Inherited
                    } else {
                        Visibility::Hidden
                    },
                ));
            }
        });
}

/// Place fighter roots at their body position and facing.
pub fn sync_fighter_roots(duel: Res<Duel>, mut roots: Query<(&FighterRoot, &mut Transform)>) {
    for (root, mut transform) in roots.iter_mut() {
        let body = duel.body(root.side);
        transform.translation = body.position;
        transform.rotation = body.rotation();
    }
}

/// Write each fighter's pose onto its joints.
pub fn apply_fighter_poses(duel: Res<Duel>, mut joints: Query<(&FighterJoint, &mut Transform)>) {
    for (rig_joint, mut transform) in joints.iter_mut() {
        let pose = &duel.body(rig_joint.side).pose;
        transform.rotation = pose.rotation(rig_joint.joint);
        if rig_joint.joint == Joint::Torso {
            transform.translation = Vec3::new(rig_joint.rest.x, pose.torso_height, rig_joint.rest.z);
        }
    }
}

/// Resize and recolour the health bars, and turn them toward the camera.
pub fn update_health_bars(
    duel: Res<Duel>,
    mut bars: Query<(&HealthBar, &mut Transform), Without<HealthBarFill>>,
    mut fills: Query<
        (&mut HealthBarFill, &mut Transform, &MeshMaterial3d<StandardMaterial>),
        Without<HealthBar>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let facing = Quat::from_rotation_y(duel.camera.yaw);

    for (bar, mut transform) in bars.iter_mut() {
        transform.translation = duel.body(bar.side).position + Vec3::Y * HEALTH_BAR_HEIGHT;
        transform.rotation = facing;
    }

    for (mut fill, mut transform, material) in fills.iter_mut() {
        let state = duel.body(fill.side).vitals.health_bar();
        let (scale, offset) = fill_geometry(state.fraction);
        transform.scale.x = scale;
        transform.translation.x = offset;

        if fill.band != state.band {
            fill.band = state.band;
            if let Some(material) = materials.get_mut(&material.0) {
                material.base_color = state.band.color();
            }
        }
    }
}

/// Horizontal scale and offset of a left-anchored fill at `fraction`.
fn fill_geometry(fraction: f32) -> (f32, f32) {
    // A zero scale breaks the mesh normals; keep a sliver
    let scale = fraction.clamp(0.0, 1.0).max(1e-4);
    (scale, -(1.0 - scale) * HEALTH_BAR_WIDTH / 2.0)
}

/// Show the sword only while it is equipped.
pub fn update_sword_visual(
    mut switched: EventReader<WeaponSwitchedEvent>,
    mut swords: Query<&mut Visibility, With<SwordVisual>>,
) {
    let Some(event) = switched.read().last() else {
        return;
    };
    for mut visibility in swords.iter_mut() {
        *visibility = if event.weapon == WeaponKind::Sword {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
