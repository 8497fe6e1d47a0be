use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops, ImageFormat, RgbaImage};
use imageproc::rect::Rect;
use tracing::*;

use crate::grid::Candidate;
use crate::SplitError;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Something that can be cut out of a source raster.
pub trait Renderable {
    /// Copies the covered region of `source` onto a fresh surface of the region's size.
    fn render(&self, source: &RgbaImage) -> Result<RgbaImage, SplitError>;

    /// Renders and PNG-encodes in one step.
    fn render_png(&self, source: &RgbaImage) -> Result<Vec<u8>, SplitError> {
        encode_png(&self.render(source)?)
    }
}

impl Renderable for Candidate {
    /// Parts of the region that fall outside `source` stay transparent.
    fn render(&self, source: &RgbaImage) -> Result<RgbaImage, SplitError> {
        let rect = Rect::try_from(self)?;
        trace!(
            "Rendering slice {} at ({}, {}) size {}x{}",
            self.key(),
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height()
        );
        let mut surface = RgbaImage::new(rect.width(), rect.height());
        let region = imageops::crop_imm(
            source,
            rect.left().max(0) as u32,
            rect.top().max(0) as u32,
            rect.width(),
            rect.height(),
        );
        imageops::replace(&mut surface, &*region, 0, 0);
        Ok(surface)
    }
}

/// Encodes a raster as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, SplitError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| SplitError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Wraps PNG bytes into an inline `data:` URL.
///
/// # Example
/// ```
/// use gridcut::render::to_data_url;
///
/// assert_eq!(to_data_url(b"png"), "data:image/png;base64,cG5n");
/// ```
pub fn to_data_url(png: &[u8]) -> String {
    let mut url = String::with_capacity(DATA_URL_PREFIX.len() + png.len() * 4 / 3 + 4);
    url.push_str(DATA_URL_PREFIX);
    STANDARD.encode_string(png, &mut url);
    url
}
