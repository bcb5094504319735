use std::num::ParseFloatError;
use std::ops::RangeInclusive;

use macroquad::prelude::vec2;
use macroquad::ui::{hash, root_ui, widgets};
use thiserror::Error;

use crate::settings::ControlSettings;

pub const LINEAR_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const ANGULAR_RANGE: RangeInclusive<f64> = -1.0..=1.0;
pub const SLIDER_STEP: f64 = 0.01;

/// One user request, marshalled from the form at click time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Drive with constant linear (m/s) and angular (rad/s) velocity.
    Velocity { v: f64, w: f64 },
    /// Head for a final position (m) over the standard run length.
    Endpoint { x: f64, y: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("final {axis} position {text:?} is not a number")]
    InvalidCoordinate {
        axis: char,
        text: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Which button was pressed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    RunVelocity,
    RunEndpoint,
}

/// Rounds `value` to the nearest multiple of `step`, then clamps it into `range`.
pub fn snap(value: f64, step: f64, range: &RangeInclusive<f64>) -> f64 {
    let stepped = (value / step).round() * step;
    stepped.clamp(*range.start(), *range.end())
}

fn parse_coordinate(axis: char, text: &str) -> Result<f64, InputError> {
    text.trim()
        .parse::<f64>()
        .map_err(|source| InputError::InvalidCoordinate {
            axis,
            text: text.to_string(),
            source,
        })
}

#[derive(Debug, Clone)]
pub struct ControlForm {
    pub linear: f32,
    pub angular: f32,
    pub target_x: String,
    pub target_y: String,
    pub status: Option<String>,
}

impl ControlForm {
    pub fn new(controls: &ControlSettings) -> Self {
        ControlForm {
            linear: snap(controls.linear_default, SLIDER_STEP, &LINEAR_RANGE) as f32,
            angular: snap(controls.angular_default, SLIDER_STEP, &ANGULAR_RANGE) as f32,
            target_x: String::new(),
            target_y: String::new(),
            status: None,
        }
    }

    pub fn velocity_command(&self) -> Command {
        Command::Velocity {
            v: snap(self.linear as f64, SLIDER_STEP, &LINEAR_RANGE),
            w: snap(self.angular as f64, SLIDER_STEP, &ANGULAR_RANGE),
        }
    }

    pub fn endpoint_command(&self) -> Result<Command, InputError> {
        let x = parse_coordinate('x', &self.target_x)?;
        let y = parse_coordinate('y', &self.target_y)?;
        Ok(Command::Endpoint { x, y })
    }

    /// Draws the form and reports a button press, if any.
    pub fn ui(&mut self) -> Option<FormAction> {
        let mut action = None;

        widgets::Window::new(hash!(), vec2(20.0, 20.0), vec2(440.0, 300.0))
            .label("Puzzlebot simulation")
            .movable(false)
            .ui(&mut *root_ui(), |ui| {
                ui.label(None, "Linear velocity v (m/s):");
                ui.slider(hash!(), "v", 0.0..1.0, &mut self.linear);
                ui.label(None, "Angular velocity w (rad/s):");
                ui.slider(hash!(), "w", -1.0..1.0, &mut self.angular);

                ui.separator();
                ui.input_text(hash!(), "Final X (m)", &mut self.target_x);
                ui.input_text(hash!(), "Final Y (m)", &mut self.target_y);

                ui.separator();
                if ui.button(None, "Simulate with v and w") {
                    action = Some(FormAction::RunVelocity);
                }
                if ui.button(None, "Simulate to coordinates") {
                    action = Some(FormAction::RunEndpoint);
                }

                if let Some(status) = &self.status {
                    ui.label(None, status);
                }
            });

        self.linear = snap(self.linear as f64, SLIDER_STEP, &LINEAR_RANGE) as f32;
        self.angular = snap(self.angular as f64, SLIDER_STEP, &ANGULAR_RANGE) as f32;
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn form() -> ControlForm {
        ControlForm::new(&ControlSettings::default())
    }

    #[test]
    fn test_defaults_come_from_settings() {
        let form = form();
        assert!((form.linear as f64 - 0.2).abs() < EPSILON);
        assert!((form.angular as f64 - 0.5).abs() < EPSILON);
        assert!(form.target_x.is_empty() && form.status.is_none());
    }

    #[test]
    fn test_snap_rounds_to_step_and_clamps() {
        assert!((snap(0.234, SLIDER_STEP, &LINEAR_RANGE) - 0.23).abs() < EPSILON);
        assert!((snap(-0.456, SLIDER_STEP, &ANGULAR_RANGE) - (-0.46)).abs() < EPSILON);
        assert_eq!(snap(1.7, SLIDER_STEP, &LINEAR_RANGE), 1.0);
        assert_eq!(snap(-0.2, SLIDER_STEP, &LINEAR_RANGE), 0.0);
        assert_eq!(snap(-3.0, SLIDER_STEP, &ANGULAR_RANGE), -1.0);
    }

    #[test]
    fn test_velocity_command_uses_slider_values() {
        let mut form = form();
        form.linear = 0.3141;
        form.angular = -0.999;
        let Command::Velocity { v, w } = form.velocity_command() else {
            panic!("expected a velocity command");
        };
        assert!((v - 0.31).abs() < EPSILON);
        assert!((w - (-1.0)).abs() < EPSILON);
    }

    #[test]
    fn test_endpoint_command_parses_fields() {
        let mut form = form();
        form.target_x = " 1.5 ".to_string();
        form.target_y = "-2".to_string();
        assert_eq!(
            form.endpoint_command(),
            Ok(Command::Endpoint { x: 1.5, y: -2.0 })
        );
    }

    #[test]
    fn test_endpoint_command_rejects_non_numeric_text() {
        let mut form = form();
        form.target_x = "abc".to_string();
        form.target_y = "1.0".to_string();
        let err = form.endpoint_command().unwrap_err();
        assert!(matches!(err, InputError::InvalidCoordinate { axis: 'x', .. }));
        assert_eq!(err.to_string(), "final x position \"abc\" is not a number");

        form.target_x = "1.0".to_string();
        form.target_y = String::new();
        assert!(matches!(
            form.endpoint_command(),
            Err(InputError::InvalidCoordinate { axis: 'y', .. })
        ));
    }
}
