//! Procedural generation for the descent: the asteroid field, the landing
//! pad and the fallback surface texture.

pub mod asteroid_field;
pub mod landing_pad;
pub mod textures;

pub use asteroid_field::*;
pub use landing_pad::*;
pub use textures::*;
