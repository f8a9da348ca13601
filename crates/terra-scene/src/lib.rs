//! Scene description for the Terra viewer: a textured planet lit from four
//! sides, exponential fog, layered point starfields and the perspective
//! projection the fly camera looks through.
//!
//! Everything here is CPU-side data. Uniform structs are `bytemuck::Pod` so a
//! renderer can upload them unchanged.

mod camera;
mod color;
mod lights;
mod planet;
mod scene;
mod sphere;
mod starfield;
mod texture;

pub use camera::{CameraUniform, PerspectiveCamera};
pub use color::hex_to_rgb;
pub use lights::{DirectionalLight, DirectionalLightUniform, FogExp2, default_lights};
pub use planet::{PhongMaterial, Planet, PlanetUniform};
pub use scene::{FrameUniforms, Scene};
pub use sphere::SphereMesh;
pub use starfield::{PointMaterial, StarLayer, Starfield};
pub use texture::{DecodedTexture, PlanetTextures, TextureError};
