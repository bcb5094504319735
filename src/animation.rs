//! 3-D playback of a finished run.

use std::sync::Arc;
use std::time::Duration;

use macroquad::prelude::*;
use puzzlebot_kinematics::{Trajectory, TrajectorySample};

/// Scene extent in robot coordinates (m): x and y in `[0, 2]`, z in `[0, 1]`.
const SCENE_SIZE: Vec3 = vec3(2.0, 2.0, 1.0);
const MARKER_RADIUS: f32 = 0.03;

/// Robot frame (x forward, y left, z up) to the renderer's y-up frame.
pub fn world_point(x: f32, y: f32, z: f32) -> Vec3 {
    vec3(x, z, -y)
}

pub struct Animation {
    trajectory: Arc<Trajectory>,
    frame: usize,
    elapsed: f32,
    frame_interval: f32,
    marker_height: f32,
}

impl Animation {
    pub fn new(trajectory: Arc<Trajectory>, frame_interval: Duration, marker_height: f32) -> Self {
        Animation {
            trajectory,
            frame: 0,
            elapsed: 0.0,
            frame_interval: frame_interval.as_secs_f32().max(0.001),
            marker_height,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Moves forward by whole frames for `dt` seconds of wall time, wrapping
    /// back to the first frame after the last one.
    pub fn advance(&mut self, dt: f32) {
        let len = self.trajectory.len();
        if len == 0 {
            return;
        }
        self.elapsed += dt;
        let frames = (self.elapsed / self.frame_interval) as usize;
        self.elapsed -= frames as f32 * self.frame_interval;
        self.frame = (self.frame + frames) % len;
    }

    pub fn current(&self) -> Option<&TrajectorySample> {
        self.trajectory.samples().get(self.frame)
    }

    /// Samples drawn so far, including the current one.
    pub fn trail(&self) -> &[TrajectorySample] {
        let samples = self.trajectory.samples();
        &samples[..(self.frame + 1).min(samples.len())]
    }

    fn marker_position(&self, sample: &TrajectorySample) -> Vec3 {
        world_point(sample.pose.x as f32, sample.pose.y as f32, self.marker_height)
    }

    pub fn draw(&self) {
        let center = world_point(SCENE_SIZE.x / 2.0, SCENE_SIZE.y / 2.0, SCENE_SIZE.z / 2.0);
        set_camera(&Camera3D {
            position: world_point(3.4, -1.6, 2.2),
            target: center,
            up: Vec3::Y,
            ..Default::default()
        });

        draw_cube_wires(center, vec3(SCENE_SIZE.x, SCENE_SIZE.z, SCENE_SIZE.y), GRAY);
        let origin = world_point(0.0, 0.0, 0.0);
        draw_line_3d(origin, world_point(SCENE_SIZE.x, 0.0, 0.0), RED);
        draw_line_3d(origin, world_point(0.0, SCENE_SIZE.y, 0.0), GREEN);
        draw_line_3d(origin, world_point(0.0, 0.0, SCENE_SIZE.z), BLUE);

        for pair in self.trail().windows(2) {
            draw_line_3d(
                self.marker_position(&pair[0]),
                self.marker_position(&pair[1]),
                BLUE,
            );
        }
        if let Some(sample) = self.current() {
            draw_sphere(self.marker_position(sample), MARKER_RADIUS, None, RED);
        }

        set_default_camera();
        self.draw_hud();
    }

    fn draw_hud(&self) {
        draw_text("Puzzlebot animation", 10.0, 24.0, 24.0, BLACK);
        let Some(sample) = self.current() else {
            draw_text("Empty trajectory", 10.0, 48.0, 20.0, BLACK);
            return;
        };
        draw_text(
            &format!(
                "t = {:.1} s  frame {}/{}",
                sample.time,
                self.frame() + 1,
                self.trajectory.len()
            ),
            10.0,
            48.0,
            20.0,
            BLACK,
        );
        draw_text(
            &format!(
                "x = {:.2} m  y = {:.2} m  heading = {:.2} rad",
                sample.pose.x,
                sample.pose.y,
                sample.pose.wrapped_heading()
            ),
            10.0,
            70.0,
            20.0,
            BLACK,
        );
        draw_text(&format!("wheels {}", sample.wheel_speeds), 10.0, 92.0, 20.0, BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzlebot_kinematics::{ChassisSpeeds, Simulator};

    fn animation() -> Animation {
        let trajectory = Simulator::default().run(ChassisSpeeds::new(0.2, 0.5));
        Animation::new(Arc::new(trajectory), Duration::from_millis(100), 0.05)
    }

    #[test]
    fn test_one_frame_per_interval() {
        let mut animation = animation();
        assert_eq!(animation.frame(), 0);
        animation.advance(0.05);
        assert_eq!(animation.frame(), 0);
        animation.advance(0.05);
        assert_eq!(animation.frame(), 1);
        animation.advance(0.25);
        assert_eq!(animation.frame(), 3);
    }

    #[test]
    fn test_wraps_after_last_frame() {
        let mut animation = animation();
        animation.advance(10.05);
        assert_eq!(animation.frame(), 0);
    }

    #[test]
    fn test_trail_grows_with_frames() {
        let mut animation = animation();
        assert_eq!(animation.trail().len(), 1);
        animation.advance(0.45);
        assert_eq!(animation.trail().len(), 5);
        assert_eq!(animation.current(), animation.trail().last());
    }

    #[test]
    fn test_marker_stays_at_fixed_height() {
        let animation = animation();
        for sample in animation.trajectory.iter() {
            assert_eq!(animation.marker_position(sample).y, 0.05);
        }
    }

    #[test]
    fn test_empty_trajectory_does_not_advance() {
        let mut animation = Animation::new(Arc::default(), Duration::from_millis(100), 0.05);
        animation.advance(1.0);
        assert_eq!(animation.frame(), 0);
        assert!(animation.current().is_none());
        assert!(animation.trail().is_empty());
    }

    #[test]
    fn test_world_point_is_y_up() {
        assert_eq!(world_point(1.0, 2.0, 3.0), vec3(1.0, 3.0, -2.0));
    }
}
