/* Copyright 2020 @TwoCookingMice */

use crate::math::constants::Float;

use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PfmError {
    #[error("not a PNM file")]
    BadMagic,
    #[error("unsupported PNM variant 'P{}'", char::from(*.0))]
    UnsupportedVariant(u8),
    #[error("malformed PFM header field: {0}")]
    MalformedHeader(String),
    #[error("image data truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

// Float image in the PNM family: header "PF\n<width> <height>\n<maxval>\n"
// followed by width * height RGB triples of little-endian f32.
pub struct PfmImage {
    pub width: usize,
    pub height: usize,
    pub bands: usize,
    pub max_value: Float,
    pub data: Vec<Float>,
}

fn read_byte<R: Read>(reader: &mut R) -> Result<u8, PfmError> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_word<R: Read>(reader: &mut R) -> Result<String, PfmError> {
    let mut byte = read_byte(reader)?;
    while (byte as char).is_whitespace() {
        byte = read_byte(reader)?;
    }

    let mut word = String::new();
    while !(byte as char).is_whitespace() {
        word.push(byte as char);
        byte = read_byte(reader)?;
    }

    Ok(word)
}

pub fn read_pfm<R: Read>(mut reader: R) -> Result<PfmImage, PfmError> {
    if read_byte(&mut reader)? != b'P' {
        return Err(PfmError::BadMagic);
    }

    let variant = read_byte(&mut reader)?;
    if variant != b'F' {
        return Err(PfmError::UnsupportedVariant(variant));
    }
    let bands = 3usize;

    let width_word = read_word(&mut reader)?;
    let width: usize = width_word
        .parse()
        .map_err(|_| PfmError::MalformedHeader(width_word.clone()))?;
    let height_word = read_word(&mut reader)?;
    let height: usize = height_word
        .parse()
        .map_err(|_| PfmError::MalformedHeader(height_word.clone()))?;
    let max_word = read_word(&mut reader)?;
    let max_value: Float = max_word
        .parse()
        .map_err(|_| PfmError::MalformedHeader(max_word.clone()))?;

    let expected = width * height * bands * 4;
    let mut raw = vec![0u8; expected];
    let mut actual = 0usize;
    while actual < expected {
        let n = reader.read(&mut raw[actual..])?;
        if n == 0 {
            return Err(PfmError::Truncated { expected, actual });
        }
        actual += n;
    }

    let mut data = Vec::with_capacity(width * height * bands);
    for chunk in raw.chunks_exact(4) {
        let bytes = [chunk[0], chunk[1], chunk[2], chunk[3]];
        data.push(f32::from_le_bytes(bytes) as Float);
    }

    log::info!("PFM image loaded, width = {}, height = {}.", width, height);

    Ok(PfmImage { width, height, bands, max_value, data })
}

/* Tests for the PFM reader */
