use puzzlebot_kinematics::{ChassisSpeeds, KinematicsError, Simulator, Trajectory, solve_endpoint};
use thiserror::Error;
use tracing::{debug_span, info};

use crate::input::Command;

#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error("cannot solve for the final position: {0}")]
    Endpoint(#[from] KinematicsError),
}

/// Maps a command to the chassis speeds it asks for.
pub fn command_speeds(simulator: &Simulator, command: Command) -> Result<ChassisSpeeds, DispatchError> {
    match command {
        Command::Velocity { v, w } => Ok(ChassisSpeeds::new(v, w)),
        Command::Endpoint { x, y } => Ok(solve_endpoint(x, y, simulator.duration())?),
    }
}

/// Runs one full simulation for `command`. Each call starts from the origin.
pub fn dispatch(simulator: &Simulator, command: Command) -> Result<Trajectory, DispatchError> {
    let _span = debug_span!("run", ?command).entered();

    let speeds = command_speeds(simulator, command)?;
    let trajectory = simulator.run(speeds);

    if let Some(last) = trajectory.last() {
        info!(
            %speeds,
            steps = trajectory.len(),
            final_pose = %last.pose,
            "Simulation finished"
        );
    }
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_velocity_command_runs_directly() {
        let trajectory = dispatch(&Simulator::default(), Command::Velocity { v: 0.2, w: 0.5 }).unwrap();
        assert_eq!(trajectory.len(), 100);
        assert_eq!(trajectory.command(), ChassisSpeeds::new(0.2, 0.5));
    }

    #[test]
    fn test_endpoint_command_goes_through_solver() {
        let simulator = Simulator::default();
        let speeds = command_speeds(&simulator, Command::Endpoint { x: 1.0, y: 1.0 }).unwrap();
        assert!((speeds.v - 2.0_f64.sqrt() / 10.0).abs() < EPSILON);
        assert!((speeds.omega - FRAC_PI_4 / 10.0).abs() < EPSILON);

        let trajectory = dispatch(&simulator, Command::Endpoint { x: 1.0, y: 1.0 }).unwrap();
        assert_eq!(trajectory.command(), speeds);
    }

    #[test]
    fn test_non_finite_endpoint_is_rejected() {
        let result = dispatch(&Simulator::default(), Command::Endpoint { x: f64::INFINITY, y: 0.0 });
        assert!(matches!(
            result,
            Err(DispatchError::Endpoint(KinematicsError::NonFiniteTarget(_)))
        ));
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let simulator = Simulator::default();
        let first = dispatch(&simulator, Command::Velocity { v: 0.5, w: -0.3 }).unwrap();
        let _ = dispatch(&simulator, Command::Velocity { v: 1.0, w: 1.0 }).unwrap();
        let again = dispatch(&simulator, Command::Velocity { v: 0.5, w: -0.3 }).unwrap();
        assert_eq!(first, again);
    }
}
