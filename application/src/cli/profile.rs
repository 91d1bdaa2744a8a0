//! Subcommands of the [`User`] profile of the current session.

use std::{io::Write, path::PathBuf};

use clap::Subcommand;
use service::{
    command::{ChangeUserPassword, DeleteImage, UpdateResource, UploadImage},
    domain::{
        upload::{FileUrl, Target},
        user::{PasswordForm, ProfileDraft},
        User,
    },
    Command as _,
};

use crate::{prompt::{Ask, Prompt}, session::Store, AsError, Context, Error};

use super::{say, upload};

/// Profile subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Actualiza los datos del perfil.
    Update {
        /// Nuevo nombre completo.
        #[arg(long)]
        name: Option<String>,

        /// Nuevo correo electrónico.
        #[arg(long)]
        email: Option<String>,

        /// Nuevo teléfono de contacto.
        #[arg(long)]
        phone: Option<String>,
    },

    /// Cambia la contraseña.
    Password,

    /// Recorta y sube la foto de perfil.
    Photo {
        /// Ruta de la imagen (JPG, PNG, GIF o WEBP, hasta 5MB).
        file: PathBuf,

        /// Área de recorte.
        #[command(flatten)]
        crop: upload::Crop,
    },

    /// Elimina la foto de perfil.
    RemovePhoto,
}

/// Runs the provided profile [`Command`].
///
/// # Errors
///
/// If not logged in or the [`Command`] fails.
pub async fn run<St, I, O>(
    cmd: Command,
    ctx: &mut Context<St>,
    prompt: &mut Prompt<I, O>,
) -> Result<(), Error>
where
    St: Store,
    I: Ask,
    O: Write,
{
    let user = ctx.require_session()?.user.clone();
    let svc = ctx.service();
    match cmd {
        Command::Update { name, email, phone } => {
            let draft = ProfileDraft {
                name: name.unwrap_or_else(|| user.name.clone()),
                email: email.unwrap_or_else(|| user.email.clone()),
                phone: phone.or_else(|| user.phone.clone()),
                ..ProfileDraft::from(&user)
            };
            let updated = svc
                .execute(UpdateResource::<User>::new(user.id, draft))
                .await
                .map_err(AsError::into_error)?;
            say!(prompt, "Perfil actualizado: {} <{}>", updated.name, updated.email)?;
            ctx.refresh_user(updated)
        }
        Command::Password => {
            let mut ask =
                |q: &str| prompt.ask_secret(q).map_err(AsError::into_error);
            let form = PasswordForm::new(
                ask("Contraseña actual")?,
                ask("Nueva contraseña")?,
                ask("Confirme la nueva contraseña")?,
            );
            svc.execute(ChangeUserPassword {
                user_id: user.id,
                form,
            })
            .await
            .map_err(AsError::into_error)?;
            say!(prompt, "Contraseña actualizada")
        }
        Command::Photo { file, crop } => {
            let cropped = upload::select_and_crop(&file, crop)?;
            let url = svc
                .execute(UploadImage {
                    target: Target::UserPhoto(user.id),
                    image: cropped,
                    previous_url: user.photo_url.clone().map(FileUrl::from),
                })
                .await
                .map_err(AsError::into_error)?;
            let updated = svc
                .execute(UpdateResource::<User>::new(
                    user.id,
                    ProfileDraft {
                        photo_url: Some(url.into()),
                        ..ProfileDraft::from(&user)
                    },
                ))
                .await
                .map_err(AsError::into_error)?;
            say!(
                prompt,
                "Foto actualizada: {}",
                updated.photo_url.as_deref().unwrap_or_default(),
            )?;
            ctx.refresh_user(updated)
        }
        Command::RemovePhoto => {
            let Some(url) = user.photo_url.clone() else {
                return say!(prompt, "El perfil no tiene foto");
            };
            svc.execute(DeleteImage {
                target: Target::UserPhoto(user.id),
                url: url.into(),
            })
            .await
            .map_err(AsError::into_error)?;
            say!(prompt, "Foto eliminada")?;
            ctx.refresh_user(User {
                photo_url: None,
                ..user
            })
        }
    }
}
