use crate::*;
use chrono::{DateTime, Utc};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use ndarray::Array3;
use std::path::Path;

/// A single capture of the game's visual output. Pixels are laid out as
/// `(height, width, channels)` with 1, 3 or 4 channels.
#[derive(Debug, Clone, PartialEq)]
pub struct GameFrame {
    pixels: Array3<u8>,
    timestamp: DateTime<Utc>,
}

impl GameFrame {
    pub fn new(pixels: Array3<u8>) -> Self {
        Self::with_timestamp(pixels, Utc::now())
    }

    pub fn with_timestamp(pixels: Array3<u8>, timestamp: DateTime<Utc>) -> Self {
        Self { pixels, timestamp }
    }

    pub fn from_image(image: DynamicImage) -> GameAgentResult<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let (raw, channels) = match image {
            DynamicImage::ImageLuma8(buffer) => (buffer.into_raw(), 1),
            DynamicImage::ImageRgba8(buffer) => (buffer.into_raw(), 4),
            other => (other.into_rgb8().into_raw(), 3),
        };
        let pixels = Array3::from_shape_vec((height, width, channels), raw)?;
        Ok(Self::new(pixels))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> GameAgentResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| {
            GameAgentError::new(GameAgentErrorVariant::ImageEncoding {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::from_image(image)
    }

    pub fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn height(&self) -> usize {
        self.pixels.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.pixels.shape()[1]
    }

    pub fn channels(&self) -> usize {
        self.pixels.shape()[2]
    }

    pub fn to_image(&self) -> GameAgentResult<DynamicImage> {
        let width = self.width() as u32;
        let height = self.height() as u32;
        let raw: Vec<u8> = self.pixels.iter().copied().collect();
        let image = match self.channels() {
            1 => GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
            3 => RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
            channels => {
                return GameAgentError::new_result(
                    GameAgentErrorVariant::UnsupportedChannelCount(channels),
                )
            }
        };
        image.ok_or_else(|| {
            GameAgentError::new(GameAgentErrorVariant::UnsupportedChannelCount(
                self.channels(),
            ))
        })
    }

    /// Downscales to `(height / 2, width / 2)`, keeping the capture timestamp.
    pub fn half_size(&self) -> GameAgentResult<Self> {
        let (width, height) = (self.width() / 2, self.height() / 2);
        if width == 0 || height == 0 {
            return GameAgentError::new_result(GameAgentErrorVariant::FrameTooSmall {
                width: self.width(),
                height: self.height(),
            });
        }
        let resized = self
            .to_image()?
            .resize_exact(width as u32, height as u32, FilterType::Triangle);
        let mut frame = Self::from_image(resized)?;
        frame.timestamp = self.timestamp;
        Ok(frame)
    }
}
