//! Selecting and cropping local images before their upload.

use std::{fs, path::Path};

use service::domain::upload::{Area, Cropped, Selected};
use tracing as log;

use crate::{AsError, Error};

/// Arguments of cropping an image.
///
/// The largest centered square is cropped unless the whole area is
/// provided.
#[derive(Clone, Copy, Debug, clap::Args)]
pub struct Crop {
    /// Desplazamiento horizontal del recorte, en píxeles.
    #[arg(long, requires_all = ["y", "width", "height"])]
    pub x: Option<u32>,

    /// Desplazamiento vertical del recorte, en píxeles.
    #[arg(long, requires_all = ["x", "width", "height"])]
    pub y: Option<u32>,

    /// Ancho del recorte, en píxeles.
    #[arg(long, requires_all = ["x", "y", "height"])]
    pub width: Option<u32>,

    /// Alto del recorte, en píxeles.
    #[arg(long, requires_all = ["x", "y", "width"])]
    pub height: Option<u32>,
}

impl Crop {
    /// Returns the [`Area`] to crop out of an image with the provided
    /// dimensions.
    fn area(self, (width, height): (u32, u32)) -> Area {
        match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(width), Some(height)) => Area {
                x,
                y,
                width,
                height,
            },
            _ => Area::centered_square(width, height),
        }
    }
}

/// Reads the image at the provided `path` and crops it.
///
/// # Errors
///
/// If the file is not readable, is not an allowed image, or the [`Crop`]
/// doesn't fit into it.
pub(crate) fn select_and_crop(path: &Path, crop: Crop) -> Result<Cropped, Error> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime = Selected::guess_mime(&name).unwrap_or("application/octet-stream");
    let bytes = fs::read(path).map_err(AsError::into_error)?;

    let selected =
        Selected::new(name, mime, bytes).map_err(AsError::into_error)?;
    let dimensions = selected.dimensions().map_err(AsError::into_error)?;
    let cropped = selected
        .crop(crop.area(dimensions))
        .map_err(AsError::into_error)?;
    log::debug!(
        file = %path.display(),
        size = cropped.len(),
        "image cropped",
    );
    Ok(cropped)
}
