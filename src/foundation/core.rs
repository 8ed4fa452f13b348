use crate::foundation::error::{IntroError, IntroResult};

pub use nalgebra::{Point3, Vector3};

/// Window dimensions in CSS pixels plus the device pixel density.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
    /// Physical pixels per CSS pixel.
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Create a validated viewport with a device pixel ratio of 1.
    pub fn new(width: u32, height: u32) -> IntroResult<Self> {
        Self::with_pixel_ratio(width, height, 1.0)
    }

    /// Create a validated viewport.
    pub fn with_pixel_ratio(width: u32, height: u32, device_pixel_ratio: f64) -> IntroResult<Self> {
        if width == 0 || height == 0 {
            return Err(IntroError::validation(format!(
                "viewport must be non-empty, got {width}x{height}"
            )));
        }
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(IntroError::validation(format!(
                "device pixel ratio must be > 0, got {device_pixel_ratio}"
            )));
        }
        Ok(Self {
            width,
            height,
            device_pixel_ratio,
        })
    }

    /// Width divided by height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Physical drawing-buffer size for an effective pixel ratio.
    pub fn drawing_buffer(self, pixel_ratio: f64) -> (u32, u32) {
        let w = (f64::from(self.width) * pixel_ratio).floor().max(1.0) as u32;
        let h = (f64::from(self.height) * pixel_ratio).floor().max(1.0) as u32;
        (w, h)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> IntroResult<Self> {
        if den == 0 {
            return Err(IntroError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(IntroError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to frame count using floor semantics.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// Linear RGB color with unbounded channels (values above 1 brighten).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::splat(0.0);
    /// White.
    pub const WHITE: Self = Self::splat(1.0);

    /// Build a color from three channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build a gray with every channel set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Decode a `0xRRGGBB` sRGB hex color into linear RGB.
    pub fn from_hex(hex: u32) -> Self {
        let c = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f64 / 255.0);
        Self::new(c(16), c(8), c(0))
    }

    /// Multiply every channel by `k`.
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Linear blend toward `o`.
    pub fn lerp(self, o: Self, t: f64) -> Self {
        Self::new(
            self.r + (o.r - self.r) * t,
            self.g + (o.g - self.g) * t,
            self.b + (o.b - self.b) * t,
        )
    }
}

impl std::ops::Add for Rgb {
    type Output = Self;

    fn add(self, o: Self) -> Self {
        Self::new(self.r + o.r, self.g + o.g, self.b + o.b)
    }
}

impl std::ops::AddAssign for Rgb {
    fn add_assign(&mut self, o: Self) {
        *self = *self + o;
    }
}

impl std::ops::Mul for Rgb {
    type Output = Self;

    fn mul(self, o: Self) -> Self {
        Self::new(self.r * o.r, self.g * o.g, self.b * o.b)
    }
}

/// sRGB transfer function, decode direction.
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function, encode direction.
pub fn linear_to_srgb(c: f64) -> f64 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
