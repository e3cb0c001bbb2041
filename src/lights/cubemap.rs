// Copyright @yucwang 2026

use crate::core::environment::{Environment, EnvironmentSample};
use crate::io::pfm::{read_pfm, PfmError};
use crate::math::constants::{INV_4_PI, Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

use std::io::Read;
use std::path::Path;
use thiserror::Error;

// Where each face sits in the 3-wide, 4-tall cross layout, and the
// inverse: which face occupies each grid cell (-1 for empty corners).
const FACE_LOC: [[usize; 2]; 6] = [[2, 2], [0, 2], [1, 3], [1, 1], [1, 0], [1, 2]];
const LOC_FACE: [[i32; 3]; 4] = [[-1, 4, -1], [-1, 3, -1], [1, 5, 0], [-1, 2, -1]];

#[derive(Debug, Error)]
pub enum CubemapError {
    #[error("cube cross must be 3 faces wide and 4 tall, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("pixel data length {actual} does not match {width}x{height} RGB")]
    DataSizeMismatch { width: usize, height: usize, actual: usize },
    #[error("cubemap carries no positive radiance, nothing to sample")]
    NoEnergy,
    #[error(transparent)]
    Pfm(#[from] PfmError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

// Environment radiance stored as a vertical-cross cubemap, importance
// sampled per pixel with probability max(R,G,B) weighted by the
// pixel's solid angle. Sampling binary-searches a cumulative table.
pub struct Cubemap {
    width: usize,
    height: usize,
    block: usize,
    data: Vec<Float>,
    cum_prob: Vec<Float>,
    map_bits: u32,
    scale: Float,
}

impl Cubemap {
    pub fn from_image(width: usize, height: usize, data: Vec<Float>) -> Result<Self, CubemapError> {
        if width == 0 || width % 3 != 0 || height % 4 != 0 || width / 3 != height / 4 {
            return Err(CubemapError::InvalidDimensions { width, height });
        }
        if data.len() != width * height * 3 {
            return Err(CubemapError::DataSizeMismatch { width, height, actual: data.len() });
        }

        let block = width / 3;
        let mut cubemap = Self {
            width,
            height,
            block,
            data,
            cum_prob: Vec::new(),
            map_bits: 0,
            scale: 1.0,
        };

        let pixel_count = width * height;
        let mut cum_prob = vec![0.0; pixel_count + 1];
        for k in 1..=pixel_count {
            cum_prob[k] = cum_prob[k - 1] + cubemap.pixel_prob(k - 1);
        }

        let total = cum_prob[pixel_count];
        if total <= 0.0 {
            return Err(CubemapError::NoEnergy);
        }
        for k in 1..=pixel_count {
            cum_prob[k] /= total;
        }

        let mut map_bits = 0u32;
        while (1usize << map_bits) < pixel_count {
            map_bits += 1;
        }

        cubemap.cum_prob = cum_prob;
        cubemap.map_bits = map_bits;
        log::info!("Cubemap initialized, faces = {}x{}, table bits = {}.",
                   block, block, map_bits);
        Ok(cubemap)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CubemapError> {
        let image = read_pfm(reader)?;
        Self::from_image(image.width, image.height, image.data)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CubemapError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn set_scale_factor(&mut self, scale: Float) {
        self.scale = scale;
    }

    fn pixel_radiance(&self, k: usize) -> RGBSpectrum {
        RGBSpectrum::new(
            self.data[3 * k],
            self.data[3 * k + 1],
            self.data[3 * k + 2],
        ) * self.scale
    }

    // Probability mass assigned to pixel k before normalization.
    // Empty corner cells of the cross carry none.
    fn pixel_prob(&self, k: usize) -> Float {
        let (_, uv) = match self.index_to_face(k) {
            Some(hit) => hit,
            None => return 0.0,
        };

        let max_channel = self.data[3 * k]
            .max(self.data[3 * k + 1])
            .max(self.data[3 * k + 2]);
        let weight = (1.0 + uv.x * uv.x + uv.y * uv.y).powf(1.5);
        let pixel_area = (self.block * self.block) as Float / 4.0;

        INV_4_PI * max_channel / weight / pixel_area
    }

    fn dir_to_face(dir: &Vector3f) -> (usize, Vector2f) {
        let (face, u, v);
        if dir.x.abs() > dir.y.abs() && dir.x.abs() > dir.z.abs() {
            face = if dir.x > 0.0 { 0 } else { 1 };
            u = dir.z / dir.x;
            v = dir.y / dir.x.abs();
        } else if dir.y.abs() > dir.z.abs() {
            face = if dir.y > 0.0 { 2 } else { 3 };
            u = dir.x / dir.y.abs();
            v = dir.z / dir.y;
        } else {
            face = if dir.z > 0.0 { 4 } else { 5 };
            u = dir.x / dir.z.abs();
            v = -dir.y / dir.z;
        }

        (face, Vector2f::new(u, v))
    }

    fn face_to_dir(face: usize, uv: &Vector2f) -> Vector3f {
        let u = uv.x;
        let v = uv.y;
        let dir = match face {
            0 => Vector3f::new(1.0, v, u),
            1 => Vector3f::new(-1.0, v, -u),
            2 => Vector3f::new(u, 1.0, v),
            3 => Vector3f::new(u, -1.0, -v),
            4 => Vector3f::new(u, -v, 1.0),
            _ => Vector3f::new(u, v, -1.0),
        };

        dir.normalize()
    }

    fn face_to_index(&self, face: usize, uv: &Vector2f) -> usize {
        // pixel coords within the face, clamped so u = 1 stays inside
        let iu = ((self.block as Float * (uv.x + 1.0) / 2.0) as usize).min(self.block - 1);
        let iv = ((self.block as Float * (uv.y + 1.0) / 2.0) as usize).min(self.block - 1);

        let ix = iu + self.block * FACE_LOC[face][0];
        let iy = iv + self.block * FACE_LOC[face][1];

        ix + self.width * iy
    }

    // Face id and pixel-center uv for a flat index; None in the empty
    // corners of the cross.
    fn index_to_face(&self, index: usize) -> Option<(usize, Vector2f)> {
        let ix = index % self.width;
        let iy = index / self.width;
        let face = LOC_FACE[iy / self.block][ix / self.block];
        if face < 0 {
            return None;
        }

        let iu = ix % self.block;
        let iv = iy % self.block;
        let uv = Vector2f::new(
            2.0 * (iu as Float + 0.5) / self.block as Float - 1.0,
            2.0 * (iv as Float + 0.5) / self.block as Float - 1.0,
        );

        Some((face as usize, uv))
    }

    fn density(&self, k: usize, uv: &Vector2f) -> Float {
        let pixel_prob = self.cum_prob[k + 1] - self.cum_prob[k];
        let pixel_area = (self.block * self.block) as Float / 4.0;
        pixel_prob * pixel_area * (1.0 + uv.x * uv.x + uv.y * uv.y).powf(1.5)
    }
}

impl Environment for Cubemap {
    fn eval(&self, direction: &Vector3f) -> RGBSpectrum {
        let (face, uv) = Self::dir_to_face(direction);
        let k = self.face_to_index(face, &uv);
        self.pixel_radiance(k)
    }

    fn sample(&self, seed: &Vector2f) -> EnvironmentSample {
        // binary search the cumulative table for the pixel containing
        // seed.x
        let pixel_count = self.width * self.height;
        let mut k = 0usize;
        for p in (0..self.map_bits).rev() {
            let step = 1usize << p;
            if k + step <= pixel_count && seed.x > self.cum_prob[k + step] {
                k += step;
            }
        }

        let pixel_prob = self.cum_prob[k + 1] - self.cum_prob[k];
        if pixel_prob <= 0.0 {
            return EnvironmentSample {
                direction: Vector3f::zeros(),
                radiance: RGBSpectrum::default(),
                pdf: 0.0,
            };
        }
        // remainder of seed.x, rescaled to jitter within the pixel
        let seed_x = (seed.x - self.cum_prob[k]) / pixel_prob;

        let (face, mut uv) = match self.index_to_face(k) {
            Some(hit) => hit,
            None => {
                return EnvironmentSample {
                    direction: Vector3f::zeros(),
                    radiance: RGBSpectrum::default(),
                    pdf: 0.0,
                }
            }
        };
        uv.x += (2.0 * seed_x - 1.0) / self.block as Float;
        uv.y += (2.0 * seed.y - 1.0) / self.block as Float;

        let direction = Self::face_to_dir(face, &uv);
        EnvironmentSample {
            direction,
            radiance: self.pixel_radiance(k),
            pdf: self.density(k, &uv),
        }
    }

    fn pdf(&self, direction: &Vector3f) -> Float {
        let (face, uv) = Self::dir_to_face(direction);
        let k = self.face_to_index(face, &uv);
        self.density(k, &uv)
    }
}
