//! PNG output of a [`RasterSurface`].
//!
//! Feature-gated behind `png` (default on) so consumers that only need the
//! raw buffer do not pull in the `image` crate.

use std::path::Path;

use log::info;
use metaballs_core::error::MetaballError;

use crate::raster::RasterSurface;

/// Writes the surface's pixels as an RGBA PNG.
///
/// Returns `MetaballError::InvalidDimensions` if the surface does not fit
/// `u32`, or `MetaballError::Io` on write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), MetaballError> {
    let invalid = || MetaballError::InvalidDimensions {
        width: surface.width() as f64,
        height: surface.height() as f64,
    };
    let w = u32::try_from(surface.width()).map_err(|_| invalid())?;
    let h = u32::try_from(surface.height()).map_err(|_| invalid())?;
    let img = image::RgbaImage::from_raw(w, h, surface.data().to_vec())
        .ok_or_else(|| MetaballError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| MetaballError::Io(e.to_string()))?;
    info!("wrote {}x{} PNG to {}", w, h, path.display());
    Ok(())
}
