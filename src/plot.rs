//! Static plots of a finished run: path, cumulative wheel angle and wheel speed.

use std::f32::consts::FRAC_PI_2;

use macroquad::prelude::*;
use puzzlebot_kinematics::Trajectory;

const RIGHT_WHEEL: Color = BLUE;
const LEFT_WHEEL: Color = ORANGE;
const GRID: Color = Color::new(0.85, 0.85, 0.85, 1.0);
const TICKS: usize = 5;

/// A closed data range mapped onto one screen axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
}

impl Axis {
    /// Covers all `values` with 5% padding on both ends. A constant series
    /// gets a unit span around its value; an empty one spans `[0, 1]`.
    pub fn fit(values: impl IntoIterator<Item = f64>) -> Self {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if lo > hi {
            return Axis { min: 0.0, max: 1.0 };
        }
        let span = hi - lo;
        if span < 1e-9 {
            return Axis {
                min: lo - 0.5,
                max: hi + 0.5,
            };
        }
        let pad = span * 0.05;
        Axis {
            min: lo - pad,
            max: hi + pad,
        }
    }

    /// Linear map from data space onto `[from, to]` screen pixels.
    pub fn map(&self, value: f64, from: f32, to: f32) -> f32 {
        let t = (value - self.min) / (self.max - self.min);
        from + (to - from) * t as f32
    }

    /// `count` evenly spaced tick values from `min` to `max`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.min];
        }
        let step = (self.max - self.min) / (count - 1) as f64;
        (0..count).map(|i| self.min + step * i as f64).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Series {
    pub label: &'static str,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
}

impl Panel {
    pub fn axes(&self) -> (Axis, Axis) {
        let points = || self.series.iter().flat_map(|s| s.points.iter());
        (
            Axis::fit(points().map(|p| p.0)),
            Axis::fit(points().map(|p| p.1)),
        )
    }
}

/// The three stacked panels for `trajectory`, top to bottom.
pub fn panels(trajectory: &Trajectory) -> [Panel; 3] {
    let over_time = |f: fn(&puzzlebot_kinematics::TrajectorySample) -> f64| {
        trajectory.iter().map(|s| (s.time, f(s))).collect::<Vec<_>>()
    };

    [
        Panel {
            title: "Puzzlebot motion",
            x_label: "X position (m)",
            y_label: "Y position (m)",
            series: vec![Series {
                label: "Puzzlebot trajectory",
                color: RIGHT_WHEEL,
                points: trajectory.xs().zip(trajectory.ys()).collect(),
            }],
        },
        Panel {
            title: "Total wheel rotation",
            x_label: "Time (s)",
            y_label: "Total angle (rad)",
            series: vec![
                Series {
                    label: "Right wheel angle",
                    color: RIGHT_WHEEL,
                    points: over_time(|s| s.wheel_angles.right),
                },
                Series {
                    label: "Left wheel angle",
                    color: LEFT_WHEEL,
                    points: over_time(|s| s.wheel_angles.left),
                },
            ],
        },
        Panel {
            title: "Inverse kinematics: wheel speeds",
            x_label: "Time (s)",
            y_label: "Angular speed (rad/s)",
            series: vec![
                Series {
                    label: "Right wheel speed",
                    color: RIGHT_WHEEL,
                    points: over_time(|s| s.wheel_speeds.omega_r),
                },
                Series {
                    label: "Left wheel speed",
                    color: LEFT_WHEEL,
                    points: over_time(|s| s.wheel_speeds.omega_l),
                },
            ],
        },
    ]
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

pub fn draw_panel(panel: &Panel, area: Rect) {
    let (left, right, top, bottom) = (70.0, 16.0, 30.0, 44.0);
    let plot = Rect::new(
        area.x + left,
        area.y + top,
        area.w - left - right,
        area.h - top - bottom,
    );
    let (x_axis, y_axis) = panel.axes();

    for tick in x_axis.ticks(TICKS) {
        let px = x_axis.map(tick, plot.left(), plot.right());
        draw_line(px, plot.top(), px, plot.bottom(), 1.0, GRID);
        let label = format_tick(tick);
        let width = measure_text(&label, None, 16, 1.0).width;
        draw_text(&label, px - width / 2.0, plot.bottom() + 16.0, 16.0, DARKGRAY);
    }
    for tick in y_axis.ticks(TICKS) {
        let py = y_axis.map(tick, plot.bottom(), plot.top());
        draw_line(plot.left(), py, plot.right(), py, 1.0, GRID);
        let label = format_tick(tick);
        let width = measure_text(&label, None, 16, 1.0).width;
        draw_text(&label, plot.left() - width - 6.0, py + 5.0, 16.0, DARKGRAY);
    }
    draw_rectangle_lines(plot.x, plot.y, plot.w, plot.h, 1.5, DARKGRAY);

    for series in &panel.series {
        let screen: Vec<Vec2> = series
            .points
            .iter()
            .map(|&(x, y)| {
                vec2(
                    x_axis.map(x, plot.left(), plot.right()),
                    y_axis.map(y, plot.bottom(), plot.top()),
                )
            })
            .collect();
        match screen.as_slice() {
            [single] => draw_circle(single.x, single.y, 2.5, series.color),
            points => {
                for pair in points.windows(2) {
                    draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, 2.0, series.color);
                }
            }
        }
    }

    let title_width = measure_text(panel.title, None, 22, 1.0).width;
    draw_text(
        panel.title,
        plot.x + (plot.w - title_width) / 2.0,
        area.y + 20.0,
        22.0,
        BLACK,
    );
    let x_label_width = measure_text(panel.x_label, None, 18, 1.0).width;
    draw_text(
        panel.x_label,
        plot.x + (plot.w - x_label_width) / 2.0,
        plot.bottom() + 36.0,
        18.0,
        BLACK,
    );
    let y_label_width = measure_text(panel.y_label, None, 18, 1.0).width;
    draw_text_ex(
        panel.y_label,
        area.x + 16.0,
        plot.y + (plot.h + y_label_width) / 2.0,
        TextParams {
            font_size: 18,
            rotation: -FRAC_PI_2,
            color: BLACK,
            ..Default::default()
        },
    );

    draw_legend(&panel.series, plot);
}

fn draw_legend(series: &[Series], plot: Rect) {
    let row = 20.0;
    let width = series
        .iter()
        .map(|s| measure_text(s.label, None, 16, 1.0).width)
        .fold(0.0, f32::max)
        + 40.0;
    let x = plot.right() - width - 8.0;
    let y = plot.top() + 8.0;

    draw_rectangle(x, y, width, row * series.len() as f32 + 6.0, Color::new(1.0, 1.0, 1.0, 0.85));
    draw_rectangle_lines(x, y, width, row * series.len() as f32 + 6.0, 1.0, GRAY);
    for (i, s) in series.iter().enumerate() {
        let cy = y + 13.0 + row * i as f32;
        draw_line(x + 6.0, cy, x + 28.0, cy, 2.0, s.color);
        draw_text(s.label, x + 34.0, cy + 5.0, 16.0, BLACK);
    }
}

/// Lays the panels out top to bottom over the given area.
pub fn draw_panels(panels: &[Panel], area: Rect) {
    let height = area.h / panels.len().max(1) as f32;
    for (i, panel) in panels.iter().enumerate() {
        draw_panel(
            panel,
            Rect::new(area.x, area.y + height * i as f32, area.w, height),
        );
    }
}
