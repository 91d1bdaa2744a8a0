//! Image crop-then-upload definitions.
//!
//! An image is first [`Selected`] (and validated), then [`Cropped`] locally.
//! Only the [`Cropped`] image is ever sent to the backend, once the
//! surrounding form is submitted.

use std::io::Cursor;

use derive_more::{AsRef, Debug, Display, From, Into};
use image::{ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};

use crate::domain::{user, Agency, Labels, Resource as _, User};

/// Maximum size of a [`Selected`] image, in bytes.
pub const MAX_SIZE: usize = 5 * 1024 * 1024;

/// MIME types of the images allowed to be [`Selected`].
pub const ALLOWED_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/jpg",
    "image/gif",
    "image/webp",
];

/// Image file chosen by a user, validated but not cropped yet.
#[derive(Clone, Debug)]
pub struct Selected {
    /// Original name of the file.
    name: String,

    /// Contents of the file.
    #[debug(skip)]
    bytes: Vec<u8>,
}

impl Selected {
    /// Validates the provided file, creating a new [`Selected`] image out of
    /// it.
    ///
    /// # Errors
    ///
    /// - If the `mime` type is not one of the [`ALLOWED_TYPES`];
    /// - If the file is larger than [`MAX_SIZE`].
    pub fn new(
        name: impl Into<String>,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, Error> {
        let mime = mime.trim().to_ascii_lowercase();
        if !ALLOWED_TYPES.contains(&mime.as_str()) {
            return Err(Error::UnsupportedType(mime));
        }
        if bytes.len() > MAX_SIZE {
            return Err(Error::TooLarge(bytes.len()));
        }
        Ok(Self {
            name: name.into(),
            bytes,
        })
    }

    /// Guesses the MIME type of a file by its `name` extension.
    #[must_use]
    pub fn guess_mime(name: &str) -> Option<&'static str> {
        let (_, ext) = name.rsplit_once('.')?;
        ImageFormat::from_extension(ext).map(|f| f.to_mime_type())
    }

    /// Returns the original name of this [`Selected`] file.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns pixel dimensions of this [`Selected`] image.
    ///
    /// # Errors
    ///
    /// If the image cannot be decoded.
    pub fn dimensions(&self) -> Result<(u32, u32), Error> {
        ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .map_err(|_| Error::Decode)?
            .into_dimensions()
            .map_err(|_| Error::Decode)
    }

    /// Crops this [`Selected`] image to the provided [`Area`], re-encoding
    /// the result as PNG.
    ///
    /// # Errors
    ///
    /// - If the image cannot be decoded;
    /// - If the [`Area`] is empty or lies outside the image.
    pub fn crop(&self, area: Area) -> Result<Cropped, Error> {
        let decoded = ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .map_err(|_| Error::Decode)?
            .decode()
            .map_err(|_| Error::Decode)?;

        if !area.fits(decoded.width(), decoded.height()) {
            return Err(Error::InvalidArea);
        }
        let cropped =
            decoded.crop_imm(area.x, area.y, area.width, area.height);

        let mut bytes = Vec::new();
        cropped
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|_| Error::Encode)?;

        let stem = self
            .name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(stem, _)| stem);
        Ok(Cropped {
            name: format!("{stem}.png"),
            bytes,
        })
    }
}

/// Rectangular area of an image, in pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Area {
    /// Horizontal offset of the left edge.
    pub x: u32,

    /// Vertical offset of the top edge.
    pub y: u32,

    /// Width of the [`Area`].
    pub width: u32,

    /// Height of the [`Area`].
    pub height: u32,
}

impl Area {
    /// Returns the largest centered square [`Area`] of an image with the
    /// provided dimensions.
    #[must_use]
    pub fn centered_square(width: u32, height: u32) -> Self {
        let side = width.min(height);
        Self {
            x: (width - side) / 2,
            y: (height - side) / 2,
            width: side,
            height: side,
        }
    }

    /// Checks whether this [`Area`] is non-empty and fits into an image with
    /// the provided dimensions.
    fn fits(self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|r| r <= width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= height)
    }
}

/// PNG image produced by cropping a [`Selected`] one, held locally until the
/// surrounding form is submitted.
#[derive(Clone, Debug)]
pub struct Cropped {
    /// Name of the file to upload.
    name: String,

    /// PNG-encoded contents.
    #[debug(skip)]
    bytes: Vec<u8>,
}

impl Cropped {
    /// MIME type of every [`Cropped`] image.
    pub const MIME: &'static str = "image/png";

    /// Returns the name of this [`Cropped`] file.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the PNG-encoded contents of this [`Cropped`] image.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the size of this [`Cropped`] image, in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Indicates whether this [`Cropped`] image has no contents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Owner of an uploaded image.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Target {
    /// Logo of an [`Agency`].
    ///
    /// [`Agency`]: crate::domain::Agency
    #[display("agency logo")]
    AgencyLogo,

    /// Photo of a [`User`].
    ///
    /// [`User`]: crate::domain::User
    #[display("photo of user {_0}")]
    UserPhoto(user::Id),
}

impl Target {
    /// Returns [`Labels`] of the resource owning images of this [`Target`].
    #[must_use]
    pub fn labels(self) -> Labels {
        match self {
            Self::AgencyLogo => Agency::LABELS,
            Self::UserPhoto(_) => User::LABELS,
        }
    }

    /// Returns the path (relative to the `/api/` prefix) to upload images of
    /// this [`Target`] to.
    #[must_use]
    pub fn upload_path(self) -> String {
        match self {
            Self::AgencyLogo => "agencies/upload-logo".to_owned(),
            Self::UserPhoto(id) => format!("auth/users/{id}/upload-photo"),
        }
    }

    /// Returns the path (relative to the `/api/` prefix) to delete images of
    /// this [`Target`] at.
    #[must_use]
    pub fn delete_path(self) -> String {
        match self {
            Self::AgencyLogo => "agencies/delete-logo".to_owned(),
            Self::UserPhoto(id) => format!("auth/users/{id}/photo"),
        }
    }
}

/// URL of an uploaded file, as returned by the backend.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[from(String, &str)]
#[serde(transparent)]
pub struct FileUrl(String);

/// Body of a backend response to an upload.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Uploaded {
    /// [`FileUrl`] of the uploaded file.
    pub file_url: FileUrl,
}

/// Error of selecting or cropping an image.
#[derive(Clone, Debug, Display, derive_more::Error, Eq, PartialEq)]
pub enum Error {
    /// MIME type is not allowed.
    #[display("Tipo de archivo no permitido. Use JPG, PNG, GIF o WEBP")]
    UnsupportedType(#[error(not(source))] String),

    /// File is larger than [`MAX_SIZE`].
    #[display("El archivo no debe superar los 5MB")]
    TooLarge(#[error(not(source))] usize),

    /// Image cannot be decoded.
    #[display("No se pudo leer la imagen")]
    Decode,

    /// Crop [`Area`] is empty or lies outside the image.
    #[display("Área de recorte inválida")]
    InvalidArea,

    /// Cropped image cannot be encoded.
    #[display("No se pudo procesar la imagen recortada")]
    Encode,
}

#[cfg(test)]
pub(crate) mod spec {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage};

    use super::{Area, Error, Selected, Target, MAX_SIZE};

    pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn rejects_unsupported_type() {
        let err = Selected::new("plano.pdf", "application/pdf", vec![1, 2, 3])
            .unwrap_err();

        assert_eq!(err, Error::UnsupportedType("application/pdf".into()));
        assert!(err.to_string().contains("JPG, PNG, GIF o WEBP"));
    }

    #[test]
    fn rejects_oversized_file() {
        let err = Selected::new("foto.jpg", "image/jpeg", vec![0; MAX_SIZE + 1])
            .unwrap_err();
        assert_eq!(err, Error::TooLarge(MAX_SIZE + 1));

        assert!(Selected::new("foto.jpg", "IMAGE/JPG", vec![0; MAX_SIZE])
            .is_ok());
    }

    #[test]
    fn crops_to_png() {
        let selected =
            Selected::new("logo.webp", "image/webp", png(40, 20)).unwrap();
        assert_eq!(selected.dimensions().unwrap(), (40, 20));

        let area = Area::centered_square(40, 20);
        assert_eq!(
            area,
            Area {
                x: 10,
                y: 0,
                width: 20,
                height: 20,
            },
        );

        let cropped = selected.crop(area).unwrap();
        assert_eq!(cropped.name(), "logo.png");
        assert_eq!(
            image::guess_format(cropped.bytes()).unwrap(),
            ImageFormat::Png,
        );
        let decoded = image::load_from_memory(cropped.bytes()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 20));
    }

    #[test]
    fn rejects_outside_area() {
        let selected =
            Selected::new("logo.png", "image/png", png(10, 10)).unwrap();
        let area = Area {
            x: 5,
            y: 5,
            width: 10,
            height: 1,
        };

        assert_eq!(selected.crop(area).unwrap_err(), Error::InvalidArea);
        assert_eq!(
            Selected::new("x.png", "image/png", vec![1, 2, 3])
                .unwrap()
                .crop(Area::centered_square(1, 1))
                .unwrap_err(),
            Error::Decode,
        );
    }

    #[test]
    fn builds_paths() {
        assert_eq!(Target::AgencyLogo.upload_path(), "agencies/upload-logo");
        assert_eq!(
            Target::UserPhoto(5.into()).delete_path(),
            "auth/users/5/photo",
        );
        assert_eq!(Selected::guess_mime("a.JPG"), Some("image/jpeg"));
    }
}
