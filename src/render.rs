mod fonts;
pub mod og_image;

pub use self::{
    fonts::{FontData, FontLoader, FontSource},
    og_image::{OgImageOptions, render_png},
};
