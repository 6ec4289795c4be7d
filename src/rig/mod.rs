//! Procedural body rig
//!
//! A fighter's body is a fixed tree of rotatable joints. Animation never
//! touches the joint entities directly: each fighter owns a `Pose`, the walk
//! cycle and strike animation write into it during the tick, and the render
//! layer copies the finished pose onto the joint transforms once per frame.
//!
//! ## Joint tree
//! ```text
//! root
//! ├── torso
//! ├── head
//! ├── left_arm ── left_forearm
//! ├── right_arm ── right_forearm ── hand (weapon mount)
//! ├── left_leg ── left_shin
//! └── right_leg ── right_shin
//! ```

use bevy::prelude::*;

pub mod strike;
pub mod walk;

pub use strike::{StrikeAnimation, StrikePose};
pub use walk::{GaitProfile, WalkCycle};

/// Resting height of the torso above the root.
pub const TORSO_BASE_HEIGHT: f32 = 0.75;

/// Peak vertical bob of the torso while walking.
pub const TORSO_BOB_AMPLITUDE: f32 = 0.08;

/// Every rotatable node of a fighter rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Torso,
    Head,
    LeftArm,
    LeftForearm,
    RightArm,
    RightForearm,
    LeftLeg,
    LeftShin,
    RightLeg,
    RightShin,
}

pub const JOINT_COUNT: usize = 10;

impl Joint {
    pub fn all() -> [Joint; JOINT_COUNT] {
        [
            Joint::Torso,
            Joint::Head,
            Joint::LeftArm,
            Joint::LeftForearm,
            Joint::RightArm,
            Joint::RightForearm,
            Joint::LeftLeg,
            Joint::LeftShin,
            Joint::RightLeg,
            Joint::RightShin,
        ]
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Joints swung by the walk cycle.
    pub fn limbs() -> [Joint; 8] {
        [
            Joint::LeftArm,
            Joint::LeftForearm,
            Joint::RightArm,
            Joint::RightForearm,
            Joint::LeftLeg,
            Joint::LeftShin,
            Joint::RightLeg,
            Joint::RightShin,
        ]
    }
}

/// Rotation of every joint plus torso height, for one fighter.
///
/// Rotations are XYZ Euler angles in radians: x is pitch (limb swing),
/// z is roll.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    rotations: [Vec3; JOINT_COUNT],
    pub torso_height: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            rotations: [Vec3::ZERO; JOINT_COUNT],
            torso_height: TORSO_BASE_HEIGHT,
        }
    }
}

impl Pose {
    pub fn euler(&self, joint: Joint) -> Vec3 {
        self.rotations[joint.index()]
    }

    pub fn euler_mut(&mut self, joint: Joint) -> &mut Vec3 {
        &mut self.rotations[joint.index()]
    }

    pub fn pitch(&self, joint: Joint) -> f32 {
        self.euler(joint).x
    }

    pub fn roll(&self, joint: Joint) -> f32 {
        self.euler(joint).z
    }

    pub fn set_pitch(&mut self, joint: Joint, angle: f32) {
        self.euler_mut(joint).x = angle;
    }

    pub fn set_roll(&mut self, joint: Joint, angle: f32) {
        self.euler_mut(joint).z = angle;
    }

    /// Joint rotation as a quaternion for the render layer.
    pub fn rotation(&self, joint: Joint) -> Quat {
        let e = self.euler(joint);
        Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z)
    }
}
