//! [`Command`] for uploading a [`Cropped`] image.

use common::operations::{By, Upload};
use tracerr::Traced;

use crate::{
    domain::upload::{Cropped, FileUrl, Target},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for uploading a [`Cropped`] image of a [`Target`].
#[derive(Clone, Debug)]
pub struct UploadImage {
    /// [`Target`] owning the image.
    pub target: Target,

    /// [`Cropped`] image to upload.
    pub image: Cropped,

    /// [`FileUrl`] of the image being replaced, if any.
    pub previous_url: Option<FileUrl>,
}

impl<Bk> Command<UploadImage> for Service<Bk>
where
    Bk: Backend<
        Upload<By<FileUrl, (Target, Cropped, Option<FileUrl>)>>,
        Ok = FileUrl,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = FileUrl;
    type Err = Traced<backend::Error>;

    #[tracing::instrument(
        skip_all,
        fields(target = %cmd.target, size = cmd.image.len()),
    )]
    async fn execute(&self, cmd: UploadImage) -> Result<Self::Ok, Self::Err> {
        let UploadImage {
            target,
            image,
            previous_url,
        } = cmd;
        self.backend()
            .execute(Upload(By::new((target, image, previous_url))))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::upload::{self, Area, Selected, Target},
        infra::Mock,
        Command as _, Config, Service,
    };

    use super::UploadImage;

    #[tokio::test]
    async fn uploads_cropped_image_only() {
        let mock = Mock::new();
        _ = mock.respond(
            "POST",
            "/api/agencies/upload-logo",
            serde_json::json!({"fileUrl": "/uploads/logo-1.png"}),
        );
        let svc = Service::new(Config::default(), mock.clone());

        let selected =
            Selected::new("logo.jpg", "image/png", upload::spec::png(40, 20))
                .unwrap();
        let cropped = selected.crop(Area::centered_square(40, 20)).unwrap();
        assert!(mock.calls().is_empty());

        let url = svc
            .execute(UploadImage {
                target: Target::AgencyLogo,
                image: cropped,
                previous_url: Some("/uploads/old.png".into()),
            })
            .await
            .unwrap();

        assert_eq!(String::from(url), "/uploads/logo-1.png");
        let call = mock.calls().pop().unwrap();
        assert_eq!(call.body.unwrap()["file"], "logo.png");
    }
}
