use crate::Arguments;

pub mod reader;
pub mod resampler;
pub mod writer;

use resampler::ResamplingPolicy;

/// One 24-bit RGB sample. No alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    red: u8,
    green: u8,
    blue: u8,
}

impl Pixel {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }
}

/// A fully decoded image, row-major, row 0 topmost.
pub struct RawImage {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl RawImage {
    /// `pixels` must hold exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, column_index: u32, row_index: u32) -> Pixel {
        let index = row_index * self.width + column_index;
        self.pixels[index as usize]
    }
}

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<RawImage>;
}

/// Target memory grid, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub fn cell_count(&self) -> u32 {
        self.width * self.height
    }
}

/// One resampled cell in sampling orientation, row 0 = top of the image.
/// The MIF encoder flips rows into memory orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSample {
    pub column: u32,
    pub row: u32,
    pub color: Pixel,
}

pub struct ConversionOptions {
    pub grid: GridDimensions,
    pub bits_per_channel: u8,
    pub resampling_policy: ResamplingPolicy,
}

impl From<&Arguments> for ConversionOptions {
    fn from(arguments: &Arguments) -> Self {
        Self {
            grid: GridDimensions {
                width: arguments.output_width,
                height: arguments.output_height,
            },
            bits_per_channel: arguments.bits_per_channel,
            resampling_policy: arguments.resampling_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Pixel, RawImage};

    #[test]
    fn pixel_lookup_is_row_major() {
        let pixels = vec![
            Pixel::new(1, 0, 0),
            Pixel::new(2, 0, 0),
            Pixel::new(3, 0, 0),
            Pixel::new(4, 0, 0),
            Pixel::new(5, 0, 0),
            Pixel::new(6, 0, 0),
        ];
        let image = RawImage::new(3, 2, pixels);
        assert_eq!(image.pixel(0, 0).red(), 1);
        assert_eq!(image.pixel(2, 0).red(), 3);
        assert_eq!(image.pixel(0, 1).red(), 4);
        assert_eq!(image.pixel(2, 1).red(), 6);
    }
}
