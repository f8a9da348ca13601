//! Decoding the planet's surface maps.

use std::path::{Path, PathBuf};

use crate::planet::PhongMaterial;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("cannot load texture {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Tightly packed RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct DecodedTexture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedTexture {
    /// Decodes the image at `path`, converting any pixel format to RGBA8.
    pub fn open(path: &Path) -> Result<Self, TextureError> {
        let image = image::open(path)
            .map_err(|source| TextureError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }
}

/// The three maps a [`PhongMaterial`] refers to.
#[derive(Clone, Debug)]
pub struct PlanetTextures {
    pub color: DecodedTexture,
    pub specular: DecodedTexture,
    pub normal: DecodedTexture,
}

impl PlanetTextures {
    /// Loads every map of `material`, resolving relative paths against `base_dir`.
    pub fn load(material: &PhongMaterial, base_dir: &Path) -> Result<Self, TextureError> {
        let resolve = |p: &Path| base_dir.join(p);
        let textures = Self {
            color: DecodedTexture::open(&resolve(&material.color_map))?,
            specular: DecodedTexture::open(&resolve(&material.specular_map))?,
            normal: DecodedTexture::open(&resolve(&material.normal_map))?,
        };
        tracing::info!(
            width = textures.color.width,
            height = textures.color.height,
            "Loaded planet textures"
        );
        Ok(textures)
    }
}
