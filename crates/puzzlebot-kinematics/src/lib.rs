#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for Puzzlebot differential-drive kinematics."]
#![doc = ""]
#![doc = "This crate provides forward and inverse kinematics for a two-wheeled robot,"]
#![doc = "a solver that turns a target endpoint into a constant velocity command,"]
#![doc = "and a fixed-step integrator that records the resulting trajectory."]

extern crate alloc;

use core::f64::consts::PI;
use core::fmt;
use libm::{cos, sin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod endpoint;
pub mod error;
pub mod trajectory;

pub use endpoint::solve_endpoint;
pub use error::KinematicsError;
pub use trajectory::{Simulator, Trajectory, TrajectorySample, WheelAngles};

/// Puzzlebot wheel radius (m).
pub const WHEEL_RADIUS: f64 = 0.05;

/// Puzzlebot distance between the two drive wheels (m).
pub const WHEEL_SEPARATION: f64 = 0.18;

/// A 2‑D pose `(x, y, θ)` in meters and radians (θ measured counter‑clockwise
/// from the x‑axis in the world frame).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// World‑frame x position (m).
    pub x: f64,
    /// World‑frame y position (m).
    pub y: f64,
    /// Heading (rad). Accumulates without wrapping, so a robot that spins
    /// twice ends at `4π`, not `0`.
    pub theta: f64,
}

impl Pose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `x`: World-frame x position in meters.
    /// * `y`: World-frame y position in meters.
    /// * `theta`: Heading in radians.
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Pose { x, y, theta }
    }

    /// Normalize an angle to be within `[-PI, PI)`.
    ///
    /// Angles at `PI` will be normalized to `-PI`.
    pub fn normalize_angle(angle: f64) -> f64 {
        let a = angle % (2.0 * PI);
        if a >= PI {
            a - 2.0 * PI
        } else if a < -PI {
            a + 2.0 * PI
        } else {
            a
        }
    }

    /// The heading wrapped into `[-PI, PI)`, for display.
    pub fn wrapped_heading(&self) -> f64 {
        Pose::normalize_angle(self.theta)
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.2}, y: {:.2}, θ: {:.2} rad)", self.x, self.y, self.theta)
    }
}

/// Right and left wheel angular velocities.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSpeeds {
    /// Right wheel angular velocity (rad/s).
    pub omega_r: f64,
    /// Left wheel angular velocity (rad/s).
    pub omega_l: f64,
}

impl WheelSpeeds {
    /// Construct wheel speeds.
    ///
    /// # Arguments
    ///
    /// * `omega_r`: Right wheel angular velocity (rad/s).
    /// * `omega_l`: Left wheel angular velocity (rad/s).
    pub const fn new(omega_r: f64, omega_l: f64) -> Self {
        WheelSpeeds { omega_r, omega_l }
    }
}

impl fmt::Display for WheelSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(ωR: {:.2} rad/s, ωL: {:.2} rad/s)", self.omega_r, self.omega_l)
    }
}

/// Linear and angular chassis velocities.
/// These represent the overall motion of the robot's chassis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisSpeeds {
    /// Linear speed of the chassis center (m/s).
    pub v: f64,
    /// Angular speed of the chassis (rad/s).
    pub omega: f64,
}

impl ChassisSpeeds {
    /// Construct chassis speeds.
    ///
    /// # Arguments
    ///
    /// * `v`: Linear speed of the chassis center (m/s).
    /// * `omega`: Angular speed of the chassis (rad/s).
    pub const fn new(v: f64, omega: f64) -> Self {
        ChassisSpeeds { v, omega }
    }
}

impl fmt::Display for ChassisSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(v: {:.2} m/s, ω: {:.2} rad/s)", self.v, self.omega)
    }
}

/// Differential‑drive kinematics helper.
///
/// This struct holds the two physical parameters of the robot (wheel radius
/// and wheel separation) and provides the kinematic mappings between wheel
/// speeds, chassis speeds and pose.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialDrive {
    /// Wheel radius (m).
    wheel_radius: f64,
    /// Wheel separation (m).
    wheel_separation: f64,
}

impl DifferentialDrive {
    /// The Puzzlebot: `R = 0.05 m`, `L = 0.18 m`.
    pub const PUZZLEBOT: DifferentialDrive = DifferentialDrive {
        wheel_radius: WHEEL_RADIUS,
        wheel_separation: WHEEL_SEPARATION,
    };

    /// Construct a new differential‑drive kinematics helper.
    ///
    /// # Arguments
    ///
    /// * `wheel_radius`: The radius of the robot's wheels in meters.
    /// * `wheel_separation`: The distance between the centers of the two drive wheels in meters.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidWheelRadius)` if `wheel_radius` is not positive.
    /// Returns `Err(KinematicsError::InvalidWheelSeparation)` if `wheel_separation` is not positive.
    pub const fn new(wheel_radius: f64, wheel_separation: f64) -> Result<Self, KinematicsError> {
        // Written as negated comparisons so NaN is rejected too.
        if !(wheel_radius > 0.0) {
            return Err(KinematicsError::InvalidWheelRadius("must be positive"));
        }
        if !(wheel_separation > 0.0) {
            return Err(KinematicsError::InvalidWheelSeparation("must be positive"));
        }
        Ok(DifferentialDrive {
            wheel_radius,
            wheel_separation,
        })
    }

    /// Returns the wheel radius.
    pub fn wheel_radius(&self) -> f64 {
        self.wheel_radius
    }

    /// Returns the wheel separation.
    pub fn wheel_separation(&self) -> f64 {
        self.wheel_separation
    }

    /// Calculates the robot's chassis speeds (linear and angular velocity)
    /// from the wheel speeds.
    ///
    /// `v = R·(ωR + ωL)/2`, `ω = R·(ωR − ωL)/L`.
    pub fn forward_kinematics(&self, wheel_speeds: WheelSpeeds) -> ChassisSpeeds {
        let v_r = wheel_speeds.omega_r * self.wheel_radius;
        let v_l = wheel_speeds.omega_l * self.wheel_radius;

        let v = (v_r + v_l) / 2.0;
        let omega = (v_r - v_l) / self.wheel_separation;

        ChassisSpeeds::new(v, omega)
    }

    /// Calculates the wheel speeds required to achieve the given chassis speeds.
    ///
    /// `ωR = (2v + ω·L)/(2R)`, `ωL = (2v − ω·L)/(2R)`.
    pub fn inverse_kinematics(&self, chassis_speeds: ChassisSpeeds) -> WheelSpeeds {
        let v_r = chassis_speeds.v + chassis_speeds.omega * (self.wheel_separation / 2.0);
        let v_l = chassis_speeds.v - chassis_speeds.omega * (self.wheel_separation / 2.0);

        WheelSpeeds::new(v_r / self.wheel_radius, v_l / self.wheel_radius)
    }

    /// Advances `current_pose` by one explicit Euler step of length `dt`.
    ///
    /// The heading used for the translation is the heading at the start of the
    /// step. The result heading is not wrapped. `dt` is not validated: zero
    /// leaves the pose unchanged and a negative value steps backwards.
    pub fn update_pose(&self, current_pose: Pose, chassis_speeds: ChassisSpeeds, dt: f64) -> Pose {
        let delta_x = chassis_speeds.v * cos(current_pose.theta) * dt;
        let delta_y = chassis_speeds.v * sin(current_pose.theta) * dt;
        let delta_theta = chassis_speeds.omega * dt;

        Pose {
            x: current_pose.x + delta_x,
            y: current_pose.y + delta_y,
            theta: current_pose.theta + delta_theta,
        }
    }

    /// Advances the pose directly from wheel speeds.
    ///
    /// Equivalent to `update_pose(pose, forward_kinematics(wheel_speeds), dt)`.
    pub fn update_pose_from_wheel_speeds(
        &self,
        current_pose: Pose,
        wheel_speeds: WheelSpeeds,
        dt: f64,
    ) -> Pose {
        let chassis_speeds = self.forward_kinematics(wheel_speeds);
        self.update_pose(current_pose, chassis_speeds, dt)
    }
}

impl Default for DifferentialDrive {
    fn default() -> Self {
        DifferentialDrive::PUZZLEBOT
    }
}

impl fmt::Display for DifferentialDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DifferentialDrive (r: {:.2} m, L: {:.2} m)",
            self.wheel_radius, self.wheel_separation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_pose_normalization() {
        assert!((Pose::normalize_angle(0.0) - 0.0).abs() < EPSILON);
        assert!((Pose::normalize_angle(PI) - (-PI)).abs() < EPSILON);
        assert!((Pose::normalize_angle(2.5 * PI) - 0.5 * PI).abs() < EPSILON);
        assert!((Pose::normalize_angle(-2.5 * PI) - -0.5 * PI).abs() < EPSILON);
    }

    #[test]
    fn test_puzzlebot_constants() {
        let drive = DifferentialDrive::PUZZLEBOT;
        assert_eq!(drive.wheel_radius(), 0.05);
        assert_eq!(drive.wheel_separation(), 0.18);
        assert_eq!(DifferentialDrive::default(), drive);
        assert_eq!(DifferentialDrive::new(0.05, 0.18), Ok(drive));
    }

    #[test]
    fn test_constructor_rejects_non_positive_parameters() {
        assert!(matches!(
            DifferentialDrive::new(0.0, 0.18),
            Err(KinematicsError::InvalidWheelRadius("must be positive"))
        ));
        assert!(matches!(
            DifferentialDrive::new(f64::NAN, 0.18),
            Err(KinematicsError::InvalidWheelRadius(_))
        ));
        assert!(matches!(
            DifferentialDrive::new(0.05, -0.18),
            Err(KinematicsError::InvalidWheelSeparation("must be positive"))
        ));
    }

    #[test]
    fn test_inverse_kinematics_puzzlebot_example() {
        // w_r = (0.4 + 0.09) / 0.1, w_l = (0.4 - 0.09) / 0.1
        let wheels = DifferentialDrive::PUZZLEBOT.inverse_kinematics(ChassisSpeeds::new(0.2, 0.5));
        assert!((wheels.omega_r - 4.9).abs() < EPSILON);
        assert!((wheels.omega_l - 3.1).abs() < EPSILON);
    }

    #[test]
    fn test_inverse_then_forward_recovers_command() {
        let drive = DifferentialDrive::PUZZLEBOT;
        for &(v, omega) in &[(0.0, 0.0), (0.2, 0.5), (1.0, -1.0), (-0.3, 0.7), (12.5, -40.0)] {
            let wheels = drive.inverse_kinematics(ChassisSpeeds::new(v, omega));
            let r = drive.wheel_radius();
            let l = drive.wheel_separation();
            assert!((r * (wheels.omega_r + wheels.omega_l) / 2.0 - v).abs() < EPSILON);
            assert!((r * (wheels.omega_r - wheels.omega_l) / l - omega).abs() < EPSILON);

            let chassis = drive.forward_kinematics(wheels);
            assert!((chassis.v - v).abs() < EPSILON);
            assert!((chassis.omega - omega).abs() < EPSILON);
        }
    }

    #[test]
    fn test_forward_kinematics_pivot_turn() {
        // v_r = 0.5 m/s, v_l = -0.5 m/s => v = 0, ω = 1.0 / 0.18
        let chassis = DifferentialDrive::PUZZLEBOT.forward_kinematics(WheelSpeeds::new(10.0, -10.0));
        assert!(chassis.v.abs() < EPSILON);
        assert!((chassis.omega - 1.0 / 0.18).abs() < EPSILON);
    }

    #[test]
    fn test_update_pose_uses_heading_at_step_start() {
        let drive = DifferentialDrive::PUZZLEBOT;
        let pose = Pose::new(1.0, 2.0, PI / 4.0);
        let next = drive.update_pose(pose, ChassisSpeeds::new(1.0, PI / 2.0), 0.5);
        assert!((next.x - (1.0 + 2.0_f64.sqrt() / 4.0)).abs() < EPSILON);
        assert!((next.y - (2.0 + 2.0_f64.sqrt() / 4.0)).abs() < EPSILON);
        assert!((next.theta - PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_update_pose_heading_is_not_wrapped() {
        let drive = DifferentialDrive::PUZZLEBOT;
        let next = drive.update_pose(Pose::new(0.0, 0.0, 3.0), ChassisSpeeds::new(0.0, 1.0), 1.0);
        assert!((next.theta - 4.0).abs() < EPSILON);
        assert!((next.wrapped_heading() - (4.0 - 2.0 * PI)).abs() < EPSILON);
    }

    #[test]
    fn test_update_pose_accepts_zero_and_negative_dt() {
        let drive = DifferentialDrive::PUZZLEBOT;
        let pose = Pose::new(0.5, -0.5, 0.0);
        let speeds = ChassisSpeeds::new(1.0, 0.0);
        assert_eq!(drive.update_pose(pose, speeds, 0.0), pose);

        let back = drive.update_pose(pose, speeds, -0.1);
        assert!((back.x - 0.4).abs() < EPSILON);
    }

    #[test]
    fn test_update_pose_from_wheel_speeds_straight() {
        // Both wheels at 4 rad/s => v = 0.2 m/s
        let drive = DifferentialDrive::PUZZLEBOT;
        let next = drive.update_pose_from_wheel_speeds(Pose::default(), WheelSpeeds::new(4.0, 4.0), 1.0);
        assert!((next.x - 0.2).abs() < EPSILON);
        assert!(next.y.abs() < EPSILON);
        assert_eq!(next.theta, 0.0);
    }
}
