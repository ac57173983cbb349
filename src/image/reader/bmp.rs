use std::io::{ErrorKind, Read};

use super::super::{ImageReader, Pixel, RawImage};
use crate::Error;

const HEADER_LENGTH: usize = 54;
const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
/// Upper bound on either declared dimension. Anything larger is treated as
/// a corrupt header rather than an allocation request.
const MAX_DIMENSION: i32 = 1 << 15;

/// Reader for uncompressed 24-bit-per-pixel BMP files.
///
/// Only the width and height fields of the 54-byte header are interpreted;
/// magic bytes and compression flags are not validated.
pub struct BmpImageReader<T: Read> {
    reader: T,
}

impl<T: Read> BmpImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    fn read_header(&mut self) -> crate::Result<[u8; HEADER_LENGTH]> {
        let mut header = [0_u8; HEADER_LENGTH];
        self.reader
            .read_exact(&mut header)
            .map_err(|e| map_read_error(e, "54-byte header"))?;
        Ok(header)
    }

    fn read_pixel_rows(&mut self, width: u32, height: u32) -> crate::Result<Vec<Pixel>> {
        // Rows are stored bottom-up and padded to 4-byte boundaries.
        let row_stride = ((width as usize * 3) + 3) & !3;
        let mut row_data = vec![0_u8; row_stride];
        let mut pixels = vec![Pixel::default(); (width * height) as usize];
        for source_row in 0..height {
            self.reader
                .read_exact(&mut row_data)
                .map_err(|e| map_read_error(e, "pixel rows"))?;
            let destination_row = height - 1 - source_row;
            for column in 0..width {
                let offset = column as usize * 3;
                // Triples are stored in blue, green, red byte order.
                pixels[(destination_row * width + column) as usize] = Pixel::new(
                    row_data[offset + 2],
                    row_data[offset + 1],
                    row_data[offset],
                );
            }
        }
        Ok(pixels)
    }
}

impl<T: Read> ImageReader for BmpImageReader<T> {
    fn read_image(&mut self) -> crate::Result<RawImage> {
        let header = self.read_header()?;
        let (width, height) = parse_dimensions(&header)?;
        let pixels = self.read_pixel_rows(width, height)?;
        Ok(RawImage::new(width, height, pixels))
    }
}

fn parse_dimensions(header: &[u8; HEADER_LENGTH]) -> crate::Result<(u32, u32)> {
    let width = read_i32_le(header, WIDTH_OFFSET);
    let height = read_i32_le(header, HEIGHT_OFFSET);
    if width <= 0 || height <= 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::InvalidHeader { width, height });
    }
    Ok((width as u32, height as u32))
}

fn read_i32_le(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn map_read_error(error: std::io::Error, section: &'static str) -> Error {
    if error.kind() == ErrorKind::UnexpectedEof {
        Error::TruncatedData(section)
    } else {
        Error::FailedToReadImageData(error)
    }
}
