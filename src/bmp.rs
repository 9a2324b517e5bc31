//! A minimal writer for uncompressed 32-bit BMP files.
//!
//! Pixels are passed as raw bytes, four per pixel in blue, green, red, padding order. Rows are written exactly as
//! given, which BMP readers display bottom row first.
//!
//! ~~~no_run
//! let pixels = vec![0u8; 64 * 32 * 4];
//! pocketplan::bmp::write_bmp("fractal.bmp", 64, 32, &pixels)?;
//! # Ok::<(), pocketplan::BmpError>(())
//! ~~~

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::BmpError;

const FILE_HEADER_LEN: u32 = 14;
const INFO_HEADER_LEN: u32 = 40;
const BYTES_PER_PIXEL: u32 = 4;

/// Offset of the pixel data from the start of the file
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_LEN + INFO_HEADER_LEN;

struct Header {
    width: i32,
    height: i32,
    image_len: u32,
    file_len: u32,
}

impl Header {
    fn new(width: u32, height: u32) -> Result<Self, BmpError> {
        let invalid = || BmpError::Dimensions { width, height };

        let image_len = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(invalid)?;
        let file_len = image_len
            .checked_add(PIXEL_DATA_OFFSET)
            .ok_or_else(invalid)?;

        Ok(Self {
            width: i32::try_from(width).map_err(|_| invalid())?,
            height: i32::try_from(height).map_err(|_| invalid())?,
            image_len,
            file_len,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<(), BmpError> {
        // file header
        writer.write_all(b"BM")?;
        writer.write_u32::<LittleEndian>(self.file_len)?;
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u32::<LittleEndian>(PIXEL_DATA_OFFSET)?;

        // info header
        writer.write_u32::<LittleEndian>(INFO_HEADER_LEN)?;
        writer.write_i32::<LittleEndian>(self.width)?;
        writer.write_i32::<LittleEndian>(self.height)?;
        writer.write_u16::<LittleEndian>(1)?; // planes
        writer.write_u16::<LittleEndian>(32)?; // bits per pixel
        writer.write_u32::<LittleEndian>(0)?; // no compression
        writer.write_u32::<LittleEndian>(self.image_len)?;
        writer.write_i32::<LittleEndian>(0)?;
        writer.write_i32::<LittleEndian>(0)?;
        writer.write_u32::<LittleEndian>(0)?;
        writer.write_u32::<LittleEndian>(0)?;
        Ok(())
    }

    fn check_pixels(&self, pixels: &[u8]) -> Result<(), BmpError> {
        let expected = self.image_len as usize;
        if pixels.len() == expected {
            Ok(())
        } else {
            Err(BmpError::PixelBufferSize {
                expected,
                actual: pixels.len(),
            })
        }
    }
}

/// Writes a complete bitmap to `writer`.
///
/// `pixels` must hold exactly `width * height * 4` bytes.
pub fn encode_bmp<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<(), BmpError> {
    let header = Header::new(width, height)?;
    header.check_pixels(pixels)?;

    header.write(writer)?;
    writer.write_all(pixels)?;
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes a bitmap into it.
///
/// Nothing is created if the dimensions or the pixel buffer are invalid.
pub fn write_bmp<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<(), BmpError> {
    let header = Header::new(width, height)?;
    header.check_pixels(pixels)?;

    let mut writer = BufWriter::new(File::create(path)?);
    header.write(&mut writer)?;
    writer.write_all(pixels)?;
    writer.flush()?;
    Ok(())
}
