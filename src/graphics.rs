use std::sync::Arc;

use macroquad::prelude::*;
use macroquad::ui::root_ui;
use puzzlebot_kinematics::{Simulator, Trajectory};
use tracing::{info, warn};

use crate::animation::Animation;
use crate::dispatch::dispatch;
use crate::input::{Command, ControlForm, FormAction};
use crate::plot::{self, Panel};
use crate::settings::Settings;

// Function to configure the macroquad window
pub fn window_conf() -> Conf {
    Conf {
        window_title: "Puzzlebot Simulation".to_string(),
        window_width: 900,
        window_height: 960,
        high_dpi: true,
        ..Default::default()
    }
}

/// What the window currently shows. Result views own a snapshot of the run
/// they were built from.
enum View {
    Form,
    Plots {
        trajectory: Arc<Trajectory>,
        panels: [Panel; 3],
    },
    Animation(Animation),
}

impl View {
    fn plots(trajectory: Trajectory) -> Self {
        let panels = plot::panels(&trajectory);
        View::Plots {
            trajectory: Arc::new(trajectory),
            panels,
        }
    }
}

fn run_command(simulator: &Simulator, form: &mut ControlForm, command: Command) -> Option<View> {
    match dispatch(simulator, command) {
        Ok(trajectory) => {
            form.status = None;
            Some(View::plots(trajectory))
        }
        Err(e) => {
            warn!(error = %e, "Simulation not run");
            form.status = Some(e.to_string());
            None
        }
    }
}

fn update_form(simulator: &Simulator, form: &mut ControlForm) -> Option<View> {
    match form.ui()? {
        FormAction::RunVelocity => {
            let command = form.velocity_command();
            run_command(simulator, form, command)
        }
        FormAction::RunEndpoint => match form.endpoint_command() {
            Ok(command) => run_command(simulator, form, command),
            Err(e) => {
                warn!(error = %e, "Enter valid numbers for the final coordinates");
                form.status = Some(e.to_string());
                None
            }
        },
    }
}

fn back_pressed() -> bool {
    root_ui().button(vec2(screen_width() - 90.0, 10.0), "Back") || is_key_pressed(KeyCode::Escape)
}

pub async fn run_app(settings: Settings, simulator: Simulator) {
    let animation_settings = settings.animation.clone();
    let mut form = ControlForm::new(&settings.controls);
    let mut view = View::Form;

    info!(drive = %simulator.drive(), "Visualization loop starting...");

    loop {
        clear_background(WHITE);

        let next = match &mut view {
            View::Form => update_form(&simulator, &mut form),
            View::Plots { trajectory, panels } => {
                plot::draw_panels(
                    &panels[..],
                    Rect::new(0.0, 40.0, screen_width(), screen_height() - 40.0),
                );
                if root_ui().button(vec2(10.0, 10.0), "Animate") {
                    Some(View::Animation(Animation::new(
                        Arc::clone(trajectory),
                        animation_settings.frame_interval(),
                        animation_settings.marker_height,
                    )))
                } else if back_pressed() {
                    Some(View::Form)
                } else {
                    None
                }
            }
            View::Animation(animation) => {
                animation.advance(get_frame_time());
                animation.draw();
                if back_pressed() { Some(View::Form) } else { None }
            }
        };
        if let Some(next) = next {
            view = next;
        }

        next_frame().await
    }
}
