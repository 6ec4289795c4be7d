//! Walk cycle
//!
//! A phase accumulator drives a sine swing. Opposite arms and legs swing in
//! opposite directions; elbows and knees only ever bend one way.

use super::{Joint, Pose, TORSO_BASE_HEIGHT, TORSO_BOB_AMPLITUDE};

/// Phase advance per second of walking, in radians.
pub const WALK_PHASE_RATE: f32 = 12.0;

/// Peak swing before per-limb gains.
pub const SWING_AMPLITUDE: f32 = 0.5;

/// Per-call decay applied to limbs once walking stops.
pub const SETTLE_DECAY: f32 = 0.85;

/// Per-fighter walk coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaitProfile {
    /// Upper-arm gain
    pub arm_gain: f32,
    /// Thigh gain
    pub leg_gain: f32,
    /// Elbow bend gain (hinge, never negative)
    pub forearm_bend: f32,
    /// Knee bend gain (hinge, never negative)
    pub shin_bend: f32,
    /// Left arm leads instead of the right
    pub mirrored: bool,
}

impl GaitProfile {
    pub const PLAYER: GaitProfile = GaitProfile {
        arm_gain: 0.8,
        leg_gain: 0.7,
        forearm_bend: 0.6,
        shin_bend: 0.9,
        mirrored: false,
    };

    pub const BOT: GaitProfile = GaitProfile {
        arm_gain: 1.0,
        leg_gain: 0.7,
        forearm_bend: 0.6,
        shin_bend: 0.9,
        mirrored: true,
    };
}

/// Walk phase of one fighter. Grows without bound; sine wraps it.
#[derive(Debug, Clone, Default)]
pub struct WalkCycle {
    pub phase: f32,
}

impl WalkCycle {
    /// Current swing value, `sin(phase) * 0.5`.
    pub fn swing(&self) -> f32 {
        self.phase.sin() * SWING_AMPLITUDE
    }

    /// Advance the cycle and write the walking pose.
    pub fn advance(&mut self, dt: f32, gait: &GaitProfile, pose: &mut Pose) {
        self.phase += dt * WALK_PHASE_RATE;
        let swing = if gait.mirrored { -self.swing() } else { self.swing() };

        // Each side's drive: the right arm and left leg move with the swing.
        let left_arm = -swing;
        let right_arm = swing;
        let left_leg = swing;
        let right_leg = -swing;

        pose.set_pitch(Joint::LeftArm, left_arm * gait.arm_gain);
        pose.set_pitch(Joint::RightArm, right_arm * gait.arm_gain);
        pose.set_pitch(Joint::LeftForearm, hinge(left_arm, gait.forearm_bend));
        pose.set_pitch(Joint::RightForearm, hinge(right_arm, gait.forearm_bend));

        pose.set_pitch(Joint::LeftLeg, left_leg * gait.leg_gain);
        pose.set_pitch(Joint::RightLeg, right_leg * gait.leg_gain);
        pose.set_pitch(Joint::LeftShin, hinge(left_leg, gait.shin_bend));
        pose.set_pitch(Joint::RightShin, hinge(right_leg, gait.shin_bend));

        pose.torso_height =
            TORSO_BASE_HEIGHT + (self.phase * 2.0).sin().abs() * TORSO_BOB_AMPLITUDE;
    }
}

/// Bend only on the backswing.
fn hinge(drive: f32, gain: f32) -> f32 {
    (-drive * gain).max(0.0)
}

/// Ease limbs back toward rest and drop the torso to its base height.
pub fn settle(pose: &mut Pose) {
    for joint in Joint::limbs() {
        let pitch = pose.pitch(joint);
        pose.set_pitch(joint, pitch * SETTLE_DECAY);
    }
    pose.torso_height = TORSO_BASE_HEIGHT;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_advances_by_rate() {
        let mut cycle = WalkCycle::default();
        let mut pose = Pose::default();
        cycle.advance(0.5, &GaitProfile::PLAYER, &mut pose);
        assert!((cycle.phase - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_contralateral_swing() {
        let mut cycle = WalkCycle::default();
        let mut pose = Pose::default();
        // Quarter period: sin(phase) = 1
        cycle.advance(std::f32::consts::FRAC_PI_2 / WALK_PHASE_RATE, &GaitProfile::PLAYER, &mut pose);

        assert!((pose.pitch(Joint::RightArm) - 0.4).abs() < 1e-5);
        assert!((pose.pitch(Joint::LeftArm) + 0.4).abs() < 1e-5);
        assert!((pose.pitch(Joint::LeftLeg) - 0.35).abs() < 1e-5);
        assert!((pose.pitch(Joint::RightLeg) + 0.35).abs() < 1e-5);
    }

    #[test]
    fn test_hinges_never_hyperextend() {
        let mut cycle = WalkCycle::default();
        let mut pose = Pose::default();
        for _ in 0..200 {
            cycle.advance(0.013, &GaitProfile::BOT, &mut pose);
            for joint in [Joint::LeftForearm, Joint::RightForearm, Joint::LeftShin, Joint::RightShin] {
                assert!(pose.pitch(joint) >= 0.0, "{:?} bent backwards", joint);
            }
        }
    }

    #[test]
    fn test_mirrored_gait_leads_with_left_arm() {
        let mut cycle = WalkCycle::default();
        let mut pose = Pose::default();
        cycle.advance(std::f32::consts::FRAC_PI_2 / WALK_PHASE_RATE, &GaitProfile::BOT, &mut pose);
        assert!((pose.pitch(Joint::LeftArm) - 0.5).abs() < 1e-5);
        assert!((pose.pitch(Joint::RightArm) + 0.5).abs() < 1e-5);
        assert!((pose.pitch(Joint::LeftLeg) + 0.35).abs() < 1e-5);
    }

    #[test]
    fn test_torso_bob_stays_within_amplitude() {
        let mut cycle = WalkCycle::default();
        let mut pose = Pose::default();
        for _ in 0..100 {
            cycle.advance(0.016, &GaitProfile::PLAYER, &mut pose);
            assert!(pose.torso_height >= TORSO_BASE_HEIGHT);
            assert!(pose.torso_height <= TORSO_BASE_HEIGHT + TORSO_BOB_AMPLITUDE + 1e-6);
        }
    }

    #[test]
    fn test_settle_decays_and_resets_height() {
        let mut pose = Pose::default();
        pose.set_pitch(Joint::LeftArm, 0.4);
        pose.set_pitch(Joint::RightShin, 0.2);
        pose.torso_height = 0.8;

        settle(&mut pose);
        assert!((pose.pitch(Joint::LeftArm) - 0.34).abs() < 1e-6);
        assert!((pose.pitch(Joint::RightShin) - 0.17).abs() < 1e-6);
        assert_eq!(pose.torso_height, TORSO_BASE_HEIGHT);

        for _ in 0..100 {
            settle(&mut pose);
        }
        assert!(pose.pitch(Joint::LeftArm).abs() < 1e-6);
    }
}
