use crate::geometry::{ImageBounds, ScreenPoint, ToolPoint};

pub const DEFAULT_ZOOM_MIN: f64 = 0.1;
pub const DEFAULT_ZOOM_MAX: f64 = 16.0;
pub const WHEEL_ZOOM_IN_FACTOR: f64 = 1.1;
pub const WHEEL_ZOOM_OUT_FACTOR: f64 = 1.0 / WHEEL_ZOOM_IN_FACTOR;
const VIEWPORT_PAN_STEP_PX: i32 = 48;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    min: f64,
    max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_ZOOM_MIN,
            max: DEFAULT_ZOOM_MAX,
        }
    }
}

impl ZoomLimits {
    /// Non-positive or non-finite bounds fall back to the defaults; an inverted
    /// range collapses to `min`.
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() && min > 0.0 {
            min
        } else {
            DEFAULT_ZOOM_MIN
        };
        let max = if max.is_finite() && max > 0.0 {
            max.max(min)
        } else {
            DEFAULT_ZOOM_MAX.max(min)
        };
        Self { min, max }
    }

    pub const fn min(&self) -> f64 {
        self.min
    }

    pub const fn max(&self) -> f64 {
        self.max
    }

    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min;
        }
        zoom.clamp(self.min, self.max)
    }
}

/// Pan/zoom mapping between image pixels and window pixels:
/// `screen = image * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pan_x: i32,
    pan_y: i32,
    zoom: f64,
    limits: ZoomLimits,
    viewport_width: u32,
    viewport_height: u32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

fn round_to_i32(value: f64) -> i32 {
    // f64 -> i32 `as` saturates and maps NaN to 0.
    value.round() as i32
}

fn wheel_factor(wheel_delta: i32) -> Option<f64> {
    match wheel_delta.signum() {
        1 => Some(WHEEL_ZOOM_IN_FACTOR),
        -1 => Some(WHEEL_ZOOM_OUT_FACTOR),
        _ => None,
    }
}

impl ViewTransform {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            pan_x: 0,
            pan_y: 0,
            zoom: limits.clamp(1.0),
            limits,
            viewport_width: 0,
            viewport_height: 0,
        }
    }

    pub const fn pan_x(&self) -> i32 {
        self.pan_x
    }

    pub const fn pan_y(&self) -> i32 {
        self.pan_y
    }

    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    pub const fn limits(&self) -> ZoomLimits {
        self.limits
    }

    pub const fn viewport_size(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    pub fn viewport_center(&self) -> ScreenPoint {
        ScreenPoint::new(
            i32::try_from(self.viewport_width / 2).unwrap_or(i32::MAX),
            i32::try_from(self.viewport_height / 2).unwrap_or(i32::MAX),
        )
    }

    pub fn image_to_screen(&self, point: ToolPoint) -> ScreenPoint {
        ScreenPoint::new(
            round_to_i32(f64::from(point.x) * self.zoom + f64::from(self.pan_x)),
            round_to_i32(f64::from(point.y) * self.zoom + f64::from(self.pan_y)),
        )
    }

    pub fn screen_to_image_precise(&self, point: ScreenPoint) -> (f64, f64) {
        (
            (f64::from(point.x) - f64::from(self.pan_x)) / self.zoom,
            (f64::from(point.y) - f64::from(self.pan_y)) / self.zoom,
        )
    }

    /// Inverse mapping, rounded half away from zero.
    pub fn screen_to_image(&self, point: ScreenPoint) -> ToolPoint {
        let (x, y) = self.screen_to_image_precise(point);
        ToolPoint::new(round_to_i32(x), round_to_i32(y))
    }

    /// Sets the zoom while keeping the image point under `anchor` fixed on screen.
    /// Returns whether the zoom changed.
    pub fn zoom_at(&mut self, anchor: ScreenPoint, zoom: f64) -> bool {
        let target = self.limits.clamp(zoom);
        if (target - self.zoom).abs() <= f64::EPSILON {
            return false;
        }
        let (image_x, image_y) = self.screen_to_image_precise(anchor);
        self.zoom = target;
        self.pan_x = round_to_i32(f64::from(anchor.x) - image_x * target);
        self.pan_y = round_to_i32(f64::from(anchor.y) - image_y * target);
        true
    }

    pub fn zoom_at_wheel(&mut self, screen: ScreenPoint, wheel_delta: i32) -> bool {
        match wheel_factor(wheel_delta) {
            Some(factor) => self.zoom_at(screen, self.zoom * factor),
            None => false,
        }
    }

    pub fn zoom_at_viewport_center(&mut self, wheel_delta: i32) -> bool {
        let center = self.viewport_center();
        self.zoom_at_wheel(center, wheel_delta)
    }

    pub fn pan_by(&mut self, delta_x: i32, delta_y: i32) {
        if delta_x == 0 && delta_y == 0 {
            return;
        }
        self.pan_x = self.pan_x.saturating_add(delta_x);
        self.pan_y = self.pan_y.saturating_add(delta_y);
    }

    pub fn pan_left(&mut self) {
        self.pan_by(-VIEWPORT_PAN_STEP_PX, 0);
    }

    pub fn pan_right(&mut self) {
        self.pan_by(VIEWPORT_PAN_STEP_PX, 0);
    }

    pub fn pan_up(&mut self) {
        self.pan_by(0, -VIEWPORT_PAN_STEP_PX);
    }

    pub fn pan_down(&mut self) {
        self.pan_by(0, VIEWPORT_PAN_STEP_PX);
    }

    /// Centers `image` in the viewport at the current zoom.
    pub fn center_image(&mut self, image: ImageBounds) {
        let scaled_width = f64::from(image.width) * self.zoom;
        let scaled_height = f64::from(image.height) * self.zoom;
        self.pan_x = round_to_i32((f64::from(self.viewport_width) - scaled_width) / 2.0);
        self.pan_y = round_to_i32((f64::from(self.viewport_height) - scaled_height) / 2.0);
    }

    pub fn fit_to_viewport(&mut self, image: ImageBounds) {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return;
        }
        let fit_x = f64::from(self.viewport_width) / f64::from(image.width.max(1));
        let fit_y = f64::from(self.viewport_height) / f64::from(image.height.max(1));
        self.zoom = self.limits.clamp(fit_x.min(fit_y));
        self.center_image(image);
    }

    pub fn actual_size(&mut self, image: ImageBounds) {
        self.zoom = self.limits.clamp(1.0);
        self.center_image(image);
    }
}
