//! Software rendering for the lander: perspective projection, a CPU
//! framebuffer that scenes draw into, cached images, and a wgpu presenter
//! that puts the framebuffer in a window.

pub mod assets;
pub mod backdrop;
pub mod canvas;
pub mod color;
pub mod framebuffer;
pub mod presenter;
pub mod projection;
pub mod sprite;
pub mod text;

pub use assets::*;
pub use backdrop::*;
pub use canvas::*;
pub use color::*;
pub use framebuffer::*;
pub use presenter::*;
pub use projection::*;
pub use sprite::*;
pub use text::*;

pub use image::RgbaImage;
