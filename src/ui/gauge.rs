use std::f64::consts::PI;

const EASING: f64 = 0.1;
const SNAP_DISTANCE: f64 = 0.5;

/// Displayed value of a gauge easing toward its target.
///
/// Each [`GaugeTween::step`] covers a tenth of the remaining distance and
/// snaps once within half a unit. The host calls it once per frame while it
/// returns `true`. Only one frame loop runs at a time: retargeting while it
/// runs just moves the target it is easing toward.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeTween {
    min: f64,
    max: f64,
    target: f64,
    displayed: f64,
    animate: bool,
    running: bool,
}

impl GaugeTween {
    pub fn new(min: f64, max: f64, animate: bool) -> Self {
        Self {
            min,
            max,
            target: min,
            displayed: min,
            animate,
            running: false,
        }
    }

    /// Returns `true` when the caller must start a frame loop.
    pub fn set_target(&mut self, target: f64) -> bool {
        self.target = target;
        if !self.animate {
            self.displayed = target;
            return false;
        }
        if self.running || self.is_settled() {
            return false;
        }
        self.running = true;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn step(&mut self) -> bool {
        if (self.displayed - self.target).abs() < SNAP_DISTANCE {
            self.displayed = self.target;
            self.running = false;
            return false;
        }
        self.displayed += (self.target - self.displayed) * EASING;
        true
    }

    pub fn is_settled(&self) -> bool {
        self.displayed == self.target
    }

    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    fn fraction(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.0;
        }
        (self.displayed - self.min) / span
    }

    pub fn percent(&self) -> i64 {
        (self.fraction() * 100.0).round() as i64
    }

    /// Stroke dash offset for a ring of the given size and stroke width.
    pub fn dash_offset(&self, size: f64, stroke_width: f64) -> f64 {
        let radius = (size - stroke_width) / 2.0;
        let circumference = 2.0 * PI * radius;
        circumference * (1.0 - self.fraction())
    }
}
