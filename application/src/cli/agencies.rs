//! [`Agency`] subcommands.

use std::{io::Write, path::PathBuf};

use clap::Subcommand;
use common::{filter::Choice, pagination::Arguments};
use service::{
    command::{CreateResource, UpdateResource, UploadImage},
    domain::{
        agency::{self, Draft},
        upload::{FileUrl, Target},
        Agency,
    },
    query::{agency::Overview, resource::ById},
    read, Command as _, Query as _,
};

use crate::{prompt::{Ask, Prompt}, session::Store, AsError, Context, Error};

use super::{active_label, say, upload, CliError, ListArgs};

/// [`Agency`] subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista una página de agencias.
    List {
        /// Argumentos del listado.
        #[command(flatten)]
        list: ListArgs,

        /// Muestra solo las agencias activas (`true`) o inactivas (`false`).
        #[arg(long)]
        active: Option<bool>,
    },

    /// Muestra las estadísticas de agencias junto con la primera página.
    Stats,

    /// Crea una nueva agencia.
    Create {
        /// Nombre de la agencia.
        name: String,

        /// Dirección de la agencia.
        #[arg(long)]
        address: Option<String>,

        /// Teléfono de contacto.
        #[arg(long)]
        phone: Option<String>,

        /// Correo electrónico de contacto.
        #[arg(long)]
        email: Option<String>,

        /// Sitio web de la agencia.
        #[arg(long)]
        website: Option<String>,

        /// Descripción de la agencia.
        #[arg(long)]
        description: Option<String>,
    },

    /// Elimina una agencia.
    Delete {
        /// ID de la agencia.
        id: agency::Id,
    },

    /// Activa o desactiva una agencia.
    Toggle {
        /// ID de la agencia.
        id: agency::Id,
    },

    /// Recorta y sube el logo de una agencia.
    Logo {
        /// ID de la agencia.
        id: agency::Id,

        /// Ruta de la imagen (JPG, PNG, GIF o WEBP, hasta 5MB).
        file: PathBuf,

        /// Área de recorte.
        #[command(flatten)]
        crop: upload::Crop,
    },
}

/// Runs the provided [`Agency`] [`Command`].
///
/// # Errors
///
/// If the [`Command`] fails.
pub async fn run<St, I, O>(
    cmd: Command,
    ctx: &Context<St>,
    prompt: &mut Prompt<I, O>,
) -> Result<(), Error>
where
    St: Store,
    I: Ask,
    O: Write,
{
    let svc = ctx.service();
    match cmd {
        Command::List { list, active } => {
            let filter = read::agency::Filter {
                search: list.search.clone().into(),
                active: Choice::from(active),
            };
            let agencies = super::load::<Agency>(&svc, &list, filter).await?;
            super::print(prompt, &agencies, row)
        }
        Command::Stats => {
            let overview = svc
                .execute(Overview(Arguments::first(svc.config().page_size)))
                .await
                .map_err(AsError::into_error)?;
            let agency::Stats {
                total,
                active,
                inactive,
            } = overview.stats;
            say!(prompt, "Total: {total}  Activas: {active}  Inactivas: {inactive}")?;
            for a in &overview.page.items {
                say!(prompt, "{}", row(a))?;
            }
            Ok(())
        }
        Command::Create {
            name,
            address,
            phone,
            email,
            website,
            description,
        } => {
            let created = svc
                .execute(CreateResource::<Agency>::new(Draft {
                    name,
                    address,
                    phone,
                    email,
                    website,
                    logo_url: None,
                    description,
                    active: true,
                }))
                .await
                .map_err(AsError::into_error)?;
            say!(prompt, "Agencia creada: {}", row(&created))
        }
        Command::Delete { id } => super::delete::<Agency, _, _>(&svc, prompt, id).await,
        Command::Toggle { id } => super::toggle::<Agency, _, _>(&svc, prompt, id).await,
        Command::Logo { id, file, crop } => {
            let cropped = upload::select_and_crop(&file, crop)?;
            let agency = svc
                .execute(ById::<Agency>::by(id))
                .await
                .map_err(AsError::into_error)?
                .ok_or_else(|| Error::from(CliError::NotFound))?;

            let url = svc
                .execute(UploadImage {
                    target: Target::AgencyLogo,
                    image: cropped,
                    previous_url: agency.logo_url.clone().map(FileUrl::from),
                })
                .await
                .map_err(AsError::into_error)?;
            let updated = svc
                .execute(UpdateResource::<Agency>::new(
                    id,
                    Draft {
                        logo_url: Some(url.into()),
                        ..Draft::from(&agency)
                    },
                ))
                .await
                .map_err(AsError::into_error)?;
            say!(
                prompt,
                "Logo actualizado: {}",
                updated.logo_url.unwrap_or_default(),
            )
        }
    }
}

/// Formats the provided [`Agency`] as a single row.
fn row(a: &Agency) -> String {
    let mut row = format!("#{}  {}  [{}]", a.id, a.name, active_label(a.active));
    for detail in [&a.email, &a.phone, &a.address].into_iter().flatten() {
        row.push_str("  ");
        row.push_str(detail);
    }
    row
}

#[cfg(test)]
mod spec {
    use service::{domain::Agency, infra::Mock};

    use crate::cli::{spec::output, upload::spec::png, ListArgs};

    use super::Command;

    fn agency(id: i64, name: &str, active: bool) -> Agency {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": name, "active": active,
            "logoUrl": format!("/uploads/agencies/logo-{id}.png"),
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn filters_by_activity_and_search() {
        let mock = Mock::new();
        _ = mock.seed([
            agency(1, "Inmobiliaria Sur", true),
            agency(2, "Casas del Norte", false),
            agency(3, "Sur Propiedades", false),
        ]);

        let out = output(
            &mock,
            super::super::Command::Agencies(Command::List {
                list: ListArgs {
                    page: 1,
                    search: Some("sur".into()),
                    desc: false,
                },
                active: Some(false),
            }),
            "",
        )
        .await
        .unwrap();

        assert!(out.starts_with("#3  Sur Propiedades  [inactivo]\n"));
        assert!(!out.contains("Inmobiliaria Sur"));
        assert!(!out.contains("Casas del Norte"));
        let call = &mock.calls()[0];
        assert_eq!(call.path, "/api/agencies");
        assert!(call.query.contains(&("page".into(), "1".into())));
        assert!(call.query.contains(&("limit".into(), "10".into())));
    }

    #[tokio::test]
    async fn shows_stats_with_first_page() {
        let mock = Mock::new();
        _ = mock.seed([
            agency(1, "Inmobiliaria Sur", true),
            agency(2, "Casas del Norte", false),
        ]);

        let out = output(
            &mock,
            super::super::Command::Agencies(Command::Stats),
            "",
        )
        .await
        .unwrap();

        assert!(out.starts_with("Total: 2  Activas: 1  Inactivas: 1\n"));
        assert!(out.contains("#2  Casas del Norte"));
    }

    #[tokio::test]
    async fn rejects_invalid_agency() {
        let mock = Mock::new();

        let err = output(
            &mock,
            super::super::Command::Agencies(Command::Create {
                name: String::new(),
                address: None,
                phone: None,
                email: Some("sin-arroba".into()),
                website: None,
                description: None,
            }),
            "",
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, "INVALID_FORM");
        assert!(err.message.contains("email: Correo electrónico inválido"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn uploads_cropped_logo_replacing_previous() {
        let mock = Mock::new();
        _ = mock.seed([agency(7, "Inmobiliaria Sur", true)]);
        _ = mock.respond(
            "POST",
            "/api/agencies/upload-logo",
            serde_json::json!({"fileUrl": "/uploads/agencies/logo-8.png"}),
        );
        let (_dir, file) = png("nuevo.webp", 30, 60);

        let out = output(
            &mock,
            super::super::Command::Agencies(Command::Logo {
                id: 7.into(),
                file,
                crop: crate::cli::upload::spec::SQUARE,
            }),
            "",
        )
        .await
        .unwrap();

        assert!(out.contains("Logo actualizado: /uploads/agencies/logo-8.png"));
        let calls = mock.calls();
        let upload = calls
            .iter()
            .find(|c| c.path == "/api/agencies/upload-logo")
            .unwrap();
        assert_eq!(
            upload.body.as_ref().unwrap()["previousUrl"],
            "/uploads/agencies/logo-7.png",
        );
        assert_eq!(upload.body.as_ref().unwrap()["file"], "nuevo.png");
        assert_eq!(mock.count("PUT", "/api/agencies/7"), 1);
        assert_eq!(
            mock.items::<Agency>()[0].logo_url.as_deref(),
            Some("/uploads/agencies/logo-8.png"),
        );
    }
}
