pub mod draft;
pub mod image;
pub mod signature;
pub mod template;

pub use draft::{ApplyMode, Draft};
pub use image::ImageBlob;
pub use signature::SignatureSet;
pub use template::Template;
