//! Strike animation
//!
//! Fixed-length punch on the right arm and torso: a short linear wind-up,
//! a fast ease-out strike, and an ease-in recovery back to rest. While it
//! plays it owns the right arm and torso joints; the walk cycle is held off.

use super::{Joint, Pose};

/// Length of the strike window, in milliseconds.
pub const STRIKE_DURATION_MS: f64 = 300.0;

const WIND_UP_END: f32 = 0.2;
const STRIKE_END: f32 = 0.5;

/// Key angles of the three phases
const WIND_UP_PITCH: f32 = -0.3;
const WIND_UP_ROLL: f32 = -0.4;
const WIND_UP_TWIST: f32 = -0.1;
const FOLLOW_THROUGH_PITCH: f32 = 0.9;
const FOLLOW_THROUGH_ROLL: f32 = 0.2;
const FOLLOW_THROUGH_TWIST: f32 = 0.1;

/// Right-arm and torso angles at one instant of the strike
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrikePose {
    pub arm_pitch: f32,
    pub arm_roll: f32,
    pub torso_twist: f32,
}

impl StrikePose {
    pub const REST: StrikePose = StrikePose {
        arm_pitch: 0.0,
        arm_roll: 0.0,
        torso_twist: 0.0,
    };

    /// Sample the strike curve at `progress` in `[0, 1)`.
    /// Anything at or past 1 is the rest pose.
    pub fn sample(progress: f32) -> StrikePose {
        if !progress.is_finite() || progress >= 1.0 {
            return StrikePose::REST;
        }
        let progress = progress.max(0.0);

        if progress < WIND_UP_END {
            let t = progress / WIND_UP_END;
            StrikePose {
                arm_pitch: WIND_UP_PITCH * t,
                arm_roll: WIND_UP_ROLL * t,
                torso_twist: WIND_UP_TWIST * t,
            }
        } else if progress < STRIKE_END {
            let t = (progress - WIND_UP_END) / (STRIKE_END - WIND_UP_END);
            let e = 1.0 - (1.0 - t).powi(3);
            StrikePose {
                arm_pitch: lerp(WIND_UP_PITCH, FOLLOW_THROUGH_PITCH, e),
                arm_roll: lerp(WIND_UP_ROLL, FOLLOW_THROUGH_ROLL, e),
                torso_twist: lerp(WIND_UP_TWIST, FOLLOW_THROUGH_TWIST, e),
            }
        } else {
            let t = (progress - STRIKE_END) / (1.0 - STRIKE_END);
            let remaining = 1.0 - t * t;
            StrikePose {
                arm_pitch: FOLLOW_THROUGH_PITCH * remaining,
                arm_roll: FOLLOW_THROUGH_ROLL * remaining,
                torso_twist: FOLLOW_THROUGH_TWIST * remaining,
            }
        }
    }

    fn write(&self, pose: &mut Pose) {
        pose.set_pitch(Joint::RightArm, self.arm_pitch);
        pose.set_roll(Joint::RightArm, self.arm_roll);
        pose.set_roll(Joint::Torso, self.torso_twist);
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Idle / attacking state machine
#[derive(Debug, Clone, Default)]
pub struct StrikeAnimation {
    /// Start time in ms while attacking; `None` while idle
    started_at: Option<f64>,
}

impl StrikeAnimation {
    pub fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }

    /// Enter (or restart) the attacking state.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    pub fn progress(&self, now: f64) -> Option<f32> {
        self.started_at
            .map(|start| ((now - start) / STRIKE_DURATION_MS).max(0.0) as f32)
    }

    /// Write the current strike angles into `pose`. Returns to idle and
    /// zeroes the joints once the window has elapsed.
    pub fn update(&mut self, now: f64, pose: &mut Pose) {
        let Some(progress) = self.progress(now) else {
            return;
        };

        if progress >= 1.0 {
            self.started_at = None;
            StrikePose::REST.write(pose);
        } else {
            StrikePose::sample(progress).write(pose);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_starts_at_rest() {
        assert_eq!(StrikePose::sample(0.0), StrikePose::REST);
    }

    #[test]
    fn test_key_poses() {
        let wound = StrikePose::sample(0.2);
        assert!(close(wound.arm_pitch, -0.3));
        assert!(close(wound.arm_roll, -0.4));
        assert!(close(wound.torso_twist, -0.1));

        let extended = StrikePose::sample(0.5);
        assert!(close(extended.arm_pitch, 0.9));
        assert!(close(extended.arm_roll, 0.2));
        assert!(close(extended.torso_twist, 0.1));

        assert_eq!(StrikePose::sample(1.0), StrikePose::REST);
    }

    #[test]
    fn test_continuous_across_phase_seams() {
        for seam in [WIND_UP_END, STRIKE_END] {
            let before = StrikePose::sample(seam - 1e-4);
            let after = StrikePose::sample(seam);
            assert!((before.arm_pitch - after.arm_pitch).abs() < 0.01, "pitch jump at {}", seam);
            assert!((before.arm_roll - after.arm_roll).abs() < 0.01, "roll jump at {}", seam);
            assert!((before.torso_twist - after.torso_twist).abs() < 0.01);
        }
        let near_end = StrikePose::sample(0.9999);
        assert!(near_end.arm_pitch.abs() < 0.01);
    }

    #[test]
    fn test_state_machine_returns_to_idle() {
        let mut strike = StrikeAnimation::default();
        let mut pose = Pose::default();
        assert!(!strike.is_playing());

        strike.start(1000.0);
        assert!(strike.is_playing());

        strike.update(1000.0 + 0.5 * STRIKE_DURATION_MS, &mut pose);
        assert!(close(pose.pitch(Joint::RightArm), 0.9));
        assert!(strike.is_playing());

        strike.update(1000.0 + STRIKE_DURATION_MS, &mut pose);
        assert!(!strike.is_playing());
        assert_eq!(pose.pitch(Joint::RightArm), 0.0);
        assert_eq!(pose.roll(Joint::RightArm), 0.0);
        assert_eq!(pose.roll(Joint::Torso), 0.0);
    }

    #[test]
    fn test_idle_update_leaves_pose_alone() {
        let mut strike = StrikeAnimation::default();
        let mut pose = Pose::default();
        pose.set_pitch(Joint::RightArm, 0.25);
        strike.update(5000.0, &mut pose);
        assert_eq!(pose.pitch(Joint::RightArm), 0.25);
    }
}
