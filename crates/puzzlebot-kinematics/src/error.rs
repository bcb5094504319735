#![warn(missing_docs)]

//! Error types for the kinematics library.
//!
//! This module defines the errors returned when building a drive model or
//! solving for a velocity command.

use core::fmt;

/// Errors that can occur in kinematic calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Error for invalid wheel radius.
    /// This variant is returned when a wheel radius is provided that is not positive.
    InvalidWheelRadius(&'static str),
    /// Error for invalid wheel separation.
    /// This variant is returned when a wheel separation is provided that is not positive.
    InvalidWheelSeparation(&'static str),
    /// Error for an unusable duration, such as zero seconds.
    InvalidDuration(&'static str),
    /// Error for a target coordinate that is infinite or NaN.
    NonFiniteTarget(&'static str),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidWheelRadius(msg) => write!(f, "Invalid wheel radius: {}", msg),
            KinematicsError::InvalidWheelSeparation(msg) => {
                write!(f, "Invalid wheel separation: {}", msg)
            }
            KinematicsError::InvalidDuration(msg) => write!(f, "Invalid duration: {}", msg),
            KinematicsError::NonFiniteTarget(msg) => write!(f, "Non-finite target: {}", msg),
        }
    }
}

impl core::error::Error for KinematicsError {}
