use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
use error::Error;
use image::{
    reader::bmp::BmpImageReader, resampler::ResamplingPolicy, writer::mif::MifEncoder,
    ConversionOptions, ImageReader,
};

mod cli;
mod error;
mod image;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: Option<PathBuf>,
    output_width: u32,
    output_height: u32,
    bits_per_channel: u8,
    resampling_policy: ResamplingPolicy,
}

impl Arguments {
    /// Default output name, derived from the grid width and the MIF word
    /// width the way the original converter named its files.
    fn derive_output_file(&self) -> PathBuf {
        PathBuf::from(format!(
            "bmp_{}_{}.mif",
            self.output_width,
            3 * self.bits_per_channel
        ))
    }
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.to_string_lossy().into_owned(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.to_string_lossy().into_owned(), e)
        })
}

pub fn convert_bmp_to_mif(arguments: &Arguments) -> Result<()> {
    let input_file = open_input_file(&arguments.input_file)?;
    let image = BmpImageReader::new(BufReader::new(&input_file)).read_image()?;
    log::info!("decoded {}x{} bitmap", image.width(), image.height());
    let options = ConversionOptions::from(arguments);
    let samples = options
        .resampling_policy
        .resampler()
        .resample(&image, &options.grid);
    let output_path = arguments
        .output_file
        .clone()
        .unwrap_or_else(|| arguments.derive_output_file());
    log::info!(
        "writing {} of {} cells to '{}'",
        samples.len(),
        options.grid.cell_count(),
        output_path.display()
    );
    let output_file = open_output_file(&output_path)?;
    let mut output_file_writer = BufWriter::new(&output_file);
    let mut encoder = MifEncoder::new(
        &mut output_file_writer,
        options.grid,
        options.bits_per_channel,
    )?;
    encoder.encode(&samples)?;
    output_file_writer
        .flush()
        .map_err(Error::FailedToWriteMifFooter)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Arguments;
    use crate::image::resampler::ResamplingPolicy;
    use std::path::PathBuf;

    #[test]
    fn default_output_name_combines_width_and_word_width() {
        let arguments = Arguments {
            input_file: PathBuf::from("image.bmp"),
            output_file: None,
            output_width: 60,
            output_height: 60,
            bits_per_channel: 3,
            resampling_policy: ResamplingPolicy::PointSample,
        };
        assert_eq!(arguments.derive_output_file(), PathBuf::from("bmp_60_9.mif"));
    }
}
