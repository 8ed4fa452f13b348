use std::sync::OnceLock;

use crate::{
    foundation::core::srgb_to_linear,
    foundation::error::{IntroError, IntroResult},
    media::source::VideoFrame,
};

/// Identifier of a texture stored in a [`crate::Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(pub u64);

/// Minification/magnification filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Closest texel.
    Nearest,
    /// Bilinear blend of the four closest texels.
    Linear,
}

/// Color space of the stored texels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    /// sRGB-encoded; decoded to linear when sampled.
    Srgb,
    /// Already linear.
    Linear,
}

/// Texture whose contents follow a playing video.
///
/// The render loop marks it dirty every frame the video has data; the next [`upload`] copies
/// the latest decoded frame and clears the flag.
///
/// [`upload`]: VideoTexture::upload
#[derive(Debug)]
pub struct VideoTexture {
    id: TextureId,
    width: u32,
    height: u32,
    texels: Vec<u8>,
    needs_update: bool,
    version: u64,
    /// Filter used when the texture is drawn smaller than its size.
    pub min_filter: Filter,
    /// Filter used when the texture is drawn larger than its size.
    pub mag_filter: Filter,
    /// Texel encoding.
    pub color_space: ColorSpace,
}

impl VideoTexture {
    pub(crate) fn new(id: TextureId, width: u32, height: u32) -> IntroResult<Self> {
        if width == 0 || height == 0 {
            return Err(IntroError::validation(format!(
                "video texture must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            id,
            width,
            height,
            texels: vec![0; (width as usize) * (height as usize) * 4],
            needs_update: false,
            version: 0,
            min_filter: Filter::Linear,
            mag_filter: Filter::Linear,
            color_space: ColorSpace::Srgb,
        })
    }

    /// Texture id.
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of completed uploads.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the next upload will copy a frame.
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Request a re-upload of the latest frame.
    pub fn mark_needs_update(&mut self) {
        self.needs_update = true;
    }

    /// Copy `frame` into the texture if it was marked dirty. Returns whether a copy happened.
    pub fn upload(&mut self, frame: &VideoFrame) -> IntroResult<bool> {
        if !self.needs_update {
            return Ok(false);
        }
        let expected = (frame.width as usize) * (frame.height as usize) * 4;
        if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
            return Err(IntroError::render(format!(
                "video frame {}x{} carries {} bytes, expected {expected}",
                frame.width,
                frame.height,
                frame.data.len()
            )));
        }

        self.width = frame.width;
        self.height = frame.height;
        self.texels.clear();
        self.texels.extend_from_slice(&frame.data);
        self.needs_update = false;
        self.version += 1;
        Ok(true)
    }

    /// Sample linear RGBA at normalized coordinates (`u` right, `v` down, both in `[0, 1]`).
    pub fn sample(&self, u: f64, v: f64, filter: Filter) -> [f64; 4] {
        let fx = u.clamp(0.0, 1.0) * f64::from(self.width) - 0.5;
        let fy = v.clamp(0.0, 1.0) * f64::from(self.height) - 0.5;
        match filter {
            Filter::Nearest => self.texel(fx.round() as i64, fy.round() as i64),
            Filter::Linear => {
                let x0 = fx.floor();
                let y0 = fy.floor();
                let tx = fx - x0;
                let ty = fy - y0;
                let (x0, y0) = (x0 as i64, y0 as i64);
                let a = self.texel(x0, y0);
                let b = self.texel(x0 + 1, y0);
                let c = self.texel(x0, y0 + 1);
                let d = self.texel(x0 + 1, y0 + 1);
                std::array::from_fn(|i| {
                    let top = a[i] + (b[i] - a[i]) * tx;
                    let bottom = c[i] + (d[i] - c[i]) * tx;
                    top + (bottom - top) * ty
                })
            }
        }
    }

    fn texel(&self, x: i64, y: i64) -> [f64; 4] {
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.height) - 1) as usize;
        let i = (y * self.width as usize + x) * 4;
        let px = &self.texels[i..i + 4];
        let decode = |c: u8| match self.color_space {
            ColorSpace::Srgb => srgb_lut()[usize::from(c)],
            ColorSpace::Linear => f64::from(c) / 255.0,
        };
        [
            decode(px[0]),
            decode(px[1]),
            decode(px[2]),
            f64::from(px[3]) / 255.0,
        ]
    }
}

fn srgb_lut() -> &'static [f64; 256] {
    static LUT: OnceLock<[f64; 256]> = OnceLock::new();
    LUT.get_or_init(|| {
        let mut lut = [0.0; 256];
        for (i, v) in lut.iter_mut().enumerate() {
            *v = srgb_to_linear(i as f64 / 255.0);
        }
        lut
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/texture.rs"]
mod tests;
