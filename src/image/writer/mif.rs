use std::collections::BTreeMap;
use std::io::Write;

use super::super::{ColorSample, GridDimensions, Pixel};
use crate::Error;

const MIN_BITS_PER_CHANNEL: u8 = 1;
const MAX_BITS_PER_CHANNEL: u8 = 3;

/// Writes a Quartus-style Memory Initialization File: a fixed header, one
/// `address : hexvalue;` record per populated cell, and an `END;` marker.
///
/// Sample rows arrive in sampling orientation (row 0 = top) and are flipped
/// into the memory layout, where the highest addresses hold the top of the
/// image.
pub struct MifEncoder<'a, T> {
    writer: &'a mut T,
    grid: GridDimensions,
    bits_per_channel: u8,
}

impl<'a, T: Write> MifEncoder<'a, T> {
    pub fn new(
        writer: &'a mut T,
        grid: GridDimensions,
        bits_per_channel: u8,
    ) -> crate::Result<Self> {
        if !(MIN_BITS_PER_CHANNEL..=MAX_BITS_PER_CHANNEL).contains(&bits_per_channel) {
            return Err(Error::UnsupportedDepth(bits_per_channel));
        }
        Ok(Self {
            writer,
            grid,
            bits_per_channel,
        })
    }

    pub fn encode(&mut self, samples: &[ColorSample]) -> crate::Result<()> {
        self.write_header()?;
        self.write_records(samples)?;
        self.write_footer()
    }

    fn write_header(&mut self) -> crate::Result<()> {
        let word_width = 3 * self.bits_per_channel;
        write!(
            self.writer,
            "WIDTH={};\nDEPTH={};\n\nADDRESS_RADIX=UNS;\nDATA_RADIX=HEX;\n\nCONTENT BEGIN\n",
            word_width,
            self.grid.cell_count()
        )
        .map_err(Error::FailedToWriteMifHeader)
    }

    fn write_records(&mut self, samples: &[ColorSample]) -> crate::Result<()> {
        let mut records: BTreeMap<u32, u16> = BTreeMap::new();
        for sample in samples {
            records.insert(self.address_of(sample), self.pack_color(&sample.color));
        }
        for (address, word) in records {
            writeln!(self.writer, "{} : {:X};", address, word)
                .map_err(Error::FailedToWriteMifContent)?;
        }
        Ok(())
    }

    fn write_footer(&mut self) -> crate::Result<()> {
        writeln!(self.writer, "END;").map_err(Error::FailedToWriteMifFooter)
    }

    fn address_of(&self, sample: &ColorSample) -> u32 {
        let memory_row = self.grid.height - 1 - sample.row;
        memory_row * self.grid.width + sample.column
    }

    fn pack_color(&self, color: &Pixel) -> u16 {
        let bits = self.bits_per_channel;
        let red = quantize_channel(color.red(), bits) as u16;
        let green = quantize_channel(color.green(), bits) as u16;
        let blue = quantize_channel(color.blue(), bits) as u16;
        (red << (2 * bits)) | (green << bits) | blue
    }
}

/// Reduces an 8-bit channel value to `bits` bits by truncation, no rounding.
pub fn quantize_channel(value: u8, bits: u8) -> u8 {
    value >> (8 - bits)
}
