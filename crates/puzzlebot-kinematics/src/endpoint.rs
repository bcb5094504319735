//! Endpoint solver.
//!
//! Turns a target position and a duration into the constant chassis command
//! that covers the straight-line distance to the target in that time while
//! turning through the target's bearing.
//!
//! The command is an approximation: it matches the average radial speed and
//! the bearing, but once `ω ≠ 0` the integrated path curves and does not end
//! exactly at the target. Callers get the command as-is, with no refinement.

use libm::{atan2, sqrt};

use crate::{ChassisSpeeds, KinematicsError};

/// Computes the constant `(v, ω)` for reaching `(target_x, target_y)` from the
/// origin in `duration` seconds.
///
/// `v = sqrt(x² + y²) / t`, `ω = atan2(y, x) / t`.
///
/// # Errors
///
/// Returns `Err(KinematicsError::InvalidDuration)` if `duration` is zero or not finite.
/// Returns `Err(KinematicsError::NonFiniteTarget)` if either coordinate is infinite or NaN.
pub fn solve_endpoint(
    target_x: f64,
    target_y: f64,
    duration: f64,
) -> Result<ChassisSpeeds, KinematicsError> {
    if duration == 0.0 {
        return Err(KinematicsError::InvalidDuration("must be non-zero"));
    }
    if !duration.is_finite() {
        return Err(KinematicsError::InvalidDuration("must be finite"));
    }
    if !target_x.is_finite() || !target_y.is_finite() {
        return Err(KinematicsError::NonFiniteTarget("coordinates must be finite"));
    }

    let distance = sqrt(target_x * target_x + target_y * target_y);
    let bearing = atan2(target_y, target_x);

    Ok(ChassisSpeeds::new(distance / duration, bearing / duration))
}
