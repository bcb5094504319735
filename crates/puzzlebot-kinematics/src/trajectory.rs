//! Fixed-step trajectory integration.
//!
//! A [`Simulator`] holds a chassis command constant for the whole run and
//! records one [`TrajectorySample`] per Euler step, starting from the origin
//! pose `(0, 0, 0)`.

use alloc::vec::Vec;
use core::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ChassisSpeeds, DifferentialDrive, Pose, WheelSpeeds};

/// Integration step (s).
pub const SIM_DT: f64 = 0.1;

/// Length of one run (s).
pub const SIM_DURATION: f64 = 10.0;

/// Cumulative rotation of each wheel since the start of a run (rad).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelAngles {
    /// Right wheel (rad).
    pub right: f64,
    /// Left wheel (rad).
    pub left: f64,
}

/// One recorded step of a run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    /// Time at the start of the step (s). Step `k` is stamped `k·dt`.
    pub time: f64,
    /// Pose at the end of the step.
    pub pose: Pose,
    /// Wheel speeds applied during the step.
    pub wheel_speeds: WheelSpeeds,
    /// Cumulative wheel rotation at the end of the step.
    pub wheel_angles: WheelAngles,
}

/// The time-ordered result of one run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    command: ChassisSpeeds,
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    /// The chassis command the run was integrated with.
    pub fn command(&self) -> ChassisSpeeds {
        self.command
    }

    /// All samples in time order.
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no step was recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The last recorded sample.
    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    /// Iterates over the samples in time order.
    pub fn iter(&self) -> slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    /// Sample time stamps (s).
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time)
    }

    /// World-frame x positions (m).
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.pose.x)
    }

    /// World-frame y positions (m).
    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.pose.y)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Fixed-step integrator for a constant chassis command.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulator {
    drive: DifferentialDrive,
    dt: f64,
    duration: f64,
}

impl Simulator {
    /// A simulator for `drive` with the standard timing of [`SIM_DT`] over [`SIM_DURATION`].
    pub const fn new(drive: DifferentialDrive) -> Self {
        Simulator {
            drive,
            dt: SIM_DT,
            duration: SIM_DURATION,
        }
    }

    /// The drive model used for integration.
    pub fn drive(&self) -> &DifferentialDrive {
        &self.drive
    }

    /// Integration step (s).
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Run length (s).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of steps in one run, `round(duration / dt)`.
    pub fn step_count(&self) -> usize {
        libm::round(self.duration / self.dt) as usize
    }

    /// Integrates `command` from the origin for [`Self::step_count`] steps.
    ///
    /// The command is held constant, so the wheel speeds are solved once and
    /// reused for every step. Wheel angles accumulate for the whole run.
    pub fn run(&self, command: ChassisSpeeds) -> Trajectory {
        let steps = self.step_count();
        let wheel_speeds = self.drive.inverse_kinematics(command);

        let mut pose = Pose::default();
        let mut wheel_angles = WheelAngles::default();
        let mut samples = Vec::with_capacity(steps);

        for k in 0..steps {
            pose = self.drive.update_pose_from_wheel_speeds(pose, wheel_speeds, self.dt);
            wheel_angles.right += wheel_speeds.omega_r * self.dt;
            wheel_angles.left += wheel_speeds.omega_l * self.dt;

            samples.push(TrajectorySample {
                time: k as f64 * self.dt,
                pose,
                wheel_speeds,
                wheel_angles,
            });
        }

        Trajectory { command, samples }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Simulator::new(DifferentialDrive::PUZZLEBOT)
    }
}
