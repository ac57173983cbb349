use std::cmp;

use clap::builder::PossibleValue;
use clap::ValueEnum;

use super::{ColorSample, GridDimensions, Pixel, RawImage};

/// Maps an image onto the target grid, one sample per populated cell.
/// Samples stay in sampling orientation (row 0 = top); the MIF encoder
/// applies the vertical flip.
pub trait Resampler {
    fn resample(&self, image: &RawImage, grid: &GridDimensions) -> Vec<ColorSample>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResamplingPolicy {
    /// Nearest-neighbor point sampling. Visits every grid cell exactly once.
    PointSample,
    /// Uniform block averaging with horizontal centering when the scaled
    /// image is narrower than the grid.
    BlockAverage,
}

impl ResamplingPolicy {
    pub fn resampler(&self) -> Box<dyn Resampler> {
        match self {
            Self::PointSample => Box::new(PointSampler),
            Self::BlockAverage => Box::new(BlockAverageSampler),
        }
    }
}

impl ValueEnum for ResamplingPolicy {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::PointSample, Self::BlockAverage]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::PointSample => Some(PossibleValue::new("point")),
            Self::BlockAverage => Some(PossibleValue::new("block-average")),
        }
    }
}

pub struct PointSampler;

impl Resampler for PointSampler {
    fn resample(&self, image: &RawImage, grid: &GridDimensions) -> Vec<ColorSample> {
        let mut samples = Vec::with_capacity(grid.cell_count() as usize);
        for row in 0..grid.height {
            let source_row = cmp::min(
                image.height() - 1,
                (row as u64 * image.height() as u64 / grid.height as u64) as u32,
            );
            for column in 0..grid.width {
                let source_column = cmp::min(
                    image.width() - 1,
                    (column as u64 * image.width() as u64 / grid.width as u64) as u32,
                );
                samples.push(ColorSample {
                    column,
                    row,
                    color: image.pixel(source_column, source_row),
                });
            }
        }
        samples
    }
}

pub struct BlockAverageSampler;

impl Resampler for BlockAverageSampler {
    fn resample(&self, image: &RawImage, grid: &GridDimensions) -> Vec<ColorSample> {
        let stride_x = cmp::max(1, image.width() / grid.width);
        let stride_y = cmp::max(1, image.height() / grid.height);
        // Equal strides on both axes, so the image is scaled, not stretched.
        let stride = cmp::max(stride_x, stride_y);
        let scaled_width = image.width() / stride;
        let column_offset = if grid.width > scaled_width {
            (grid.width - scaled_width) / 2
        } else {
            0
        };
        log::debug!(
            "block-average stride {} (scaled width {}, column offset {})",
            stride,
            scaled_width,
            column_offset
        );
        let mut samples = Vec::new();
        let mut source_row = 0;
        while source_row < image.height() {
            let mut source_column = 0;
            while source_column < image.width() {
                let column = source_column / stride + column_offset;
                let row = source_row / stride;
                // Blocks falling outside the grid are dropped.
                if column < grid.width && row < grid.height {
                    samples.push(ColorSample {
                        column,
                        row,
                        color: average_block(image, source_column, source_row, stride),
                    });
                }
                source_column += stride;
            }
            source_row += stride;
        }
        samples
    }
}

/// Truncating integer mean of each channel over a stride x stride block,
/// clipped to the image bounds.
fn average_block(image: &RawImage, column: u32, row: u32, stride: u32) -> Pixel {
    let end_column = cmp::min(image.width(), column + stride);
    let end_row = cmp::min(image.height(), row + stride);
    let mut red: u64 = 0;
    let mut green: u64 = 0;
    let mut blue: u64 = 0;
    for y in row..end_row {
        for x in column..end_column {
            let pixel = image.pixel(x, y);
            red += pixel.red() as u64;
            green += pixel.green() as u64;
            blue += pixel.blue() as u64;
        }
    }
    let count = ((end_row - row) * (end_column - column)) as u64;
    Pixel::new(
        (red / count) as u8,
        (green / count) as u8,
        (blue / count) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::{BlockAverageSampler, PointSampler, Resampler};
    use crate::image::{GridDimensions, Pixel, RawImage};

    fn gradient_image(width: u32, height: u32) -> RawImage {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for row in 0..height {
            for column in 0..width {
                pixels.push(Pixel::new(column as u8, row as u8, 0));
            }
        }
        RawImage::new(width, height, pixels)
    }

    #[test]
    fn point_sampling_same_size_is_identity() {
        let image = gradient_image(3, 3);
        let grid = GridDimensions {
            width: 3,
            height: 3,
        };
        let samples = PointSampler.resample(&image, &grid);
        assert_eq!(samples.len(), 9);
        for sample in samples {
            assert_eq!(sample.color, image.pixel(sample.column, sample.row));
        }
    }

    #[test]
    fn point_sampling_downscale_picks_floor_coordinates() {
        let image = gradient_image(4, 4);
        let grid = GridDimensions {
            width: 2,
            height: 2,
        };
        let samples = PointSampler.resample(&image, &grid);
        assert_eq!(samples.len(), 4);
        // Cell (x, y) maps to source (x * 4 / 2, y * 4 / 2).
        assert_eq!(samples[0].color, image.pixel(0, 0));
        assert_eq!(samples[1].color, image.pixel(2, 0));
        assert_eq!(samples[2].color, image.pixel(0, 2));
        assert_eq!(samples[3].color, image.pixel(2, 2));
    }

    #[test]
    fn point_sampling_visits_every_cell_once() {
        let image = gradient_image(7, 5);
        let grid = GridDimensions {
            width: 4,
            height: 3,
        };
        let samples = PointSampler.resample(&image, &grid);
        assert_eq!(samples.len(), 12);
        let mut seen = vec![false; 12];
        for sample in samples {
            let index = (sample.row * grid.width + sample.column) as usize;
            assert!(!seen[index], "cell visited twice");
            seen[index] = true;
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn block_average_computes_truncating_channel_means() {
        // 2x2 blocks: the left block holds reds 0, 1, 0, 1, so the truncating
        // mean is 2 / 4 = 0.
        let pixels = vec![
            Pixel::new(0, 0, 0),
            Pixel::new(1, 0, 0),
            Pixel::new(10, 0, 0),
            Pixel::new(20, 0, 0),
            Pixel::new(0, 4, 0),
            Pixel::new(1, 4, 0),
            Pixel::new(10, 8, 0),
            Pixel::new(20, 8, 0),
        ];
        let image = RawImage::new(4, 2, pixels);
        let grid = GridDimensions {
            width: 2,
            height: 1,
        };
        let samples = BlockAverageSampler.resample(&image, &grid);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].color, Pixel::new(0, 2, 0));
        assert_eq!(samples[1].color, Pixel::new(15, 4, 0));
    }

    #[test]
    fn block_average_centers_narrow_images_horizontally() {
        let image = gradient_image(4, 4);
        let grid = GridDimensions {
            width: 8,
            height: 4,
        };
        let samples = BlockAverageSampler.resample(&image, &grid);
        // stride 1, scaled width 4, offset (8 - 4) / 2 = 2.
        let columns: Vec<u32> = samples.iter().map(|s| s.column).collect();
        assert!(columns.iter().all(|&c| (2..6).contains(&c)));
        let min = *columns.iter().min().unwrap();
        let max = *columns.iter().max().unwrap();
        assert_eq!(min, 2);
        assert_eq!(max, 5);
        // Symmetric around the grid center: 2 empty columns on each side.
        assert_eq!(min, grid.width - 1 - max);
    }

    #[test]
    fn block_average_drops_blocks_outside_the_grid() {
        // width 5 with stride 2 yields blocks at columns 0, 1, 2; the grid
        // only holds 2 columns, so the last block is dropped.
        let image = gradient_image(5, 5);
        let grid = GridDimensions {
            width: 2,
            height: 2,
        };
        let samples = BlockAverageSampler.resample(&image, &grid);
        assert!(samples.iter().all(|s| s.column < 2 && s.row < 2));
        assert_eq!(samples.len(), 4);
    }

    #[test]
    fn block_average_clips_edge_blocks_to_image_bounds() {
        // 5x8 with grid 2x2: the vertical stride wins (4), so the blocks in
        // the right column cover a single source column and must be clipped
        // instead of read out of range.
        let image = gradient_image(5, 8);
        let grid = GridDimensions {
            width: 2,
            height: 2,
        };
        let samples = BlockAverageSampler.resample(&image, &grid);
        assert_eq!(samples.len(), 4);
        let right_top = samples
            .iter()
            .find(|s| s.column == 1 && s.row == 0)
            .expect("clipped block missing");
        // Column 4, rows 0..4: greens 0 + 1 + 2 + 3 = 6, mean 1.
        assert_eq!(right_top.color, Pixel::new(4, 1, 0));
    }
}
