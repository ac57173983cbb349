use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadImageData(std::io::Error),
    TruncatedData(&'static str),
    InvalidHeader { width: i32, height: i32 },
    UnsupportedDepth(u8),
    FailedToWriteMifHeader(std::io::Error),
    FailedToWriteMifContent(std::io::Error),
    FailedToWriteMifFooter(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadImageData(error) => {
                write!(f, "Failed to read image data: {}", error)
            }
            Self::TruncatedData(section) => {
                write!(
                    f,
                    "Input file ended before the {} declared by the header",
                    section
                )
            }
            Self::InvalidHeader { width, height } => {
                write!(
                    f,
                    "Header declares unusable image dimensions {}x{}",
                    width, height
                )
            }
            Self::UnsupportedDepth(bits) => {
                write!(
                    f,
                    "Unsupported color depth of {} bits per channel, must be 1, 2 or 3",
                    bits
                )
            }
            Self::FailedToWriteMifHeader(error) => {
                write!(f, "Failed to write MIF header: {}", error)
            }
            Self::FailedToWriteMifContent(error) => {
                write!(f, "Failed to write MIF content records: {}", error)
            }
            Self::FailedToWriteMifFooter(error) => {
                write!(f, "Failed to write MIF end marker: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {}
