//! [`Partner`] subcommands.

use std::io::Write;

use clap::Subcommand;
use common::filter::Choice;
use itertools::Itertools as _;
use service::{
    command::CreateResource,
    domain::{
        partner::{self, Draft, Kind},
        Partner,
    },
    read, Command as _,
};

use crate::{prompt::{Ask, Prompt}, session::Store, AsError, Context, Error};

use super::{active_label, say, ListArgs};

/// [`Partner`] subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista una página de socios.
    List {
        /// Argumentos del listado.
        #[command(flatten)]
        list: ListArgs,

        /// Muestra solo los socios del tipo indicado (`individual` o
        /// `company`).
        #[arg(long)]
        kind: Option<Kind>,

        /// Muestra solo los socios activos (`true`) o inactivos (`false`).
        #[arg(long)]
        active: Option<bool>,
    },

    /// Registra un nuevo socio.
    Create {
        /// Tipo del socio (`individual` o `company`).
        kind: Kind,

        /// Nombre o razón social del socio.
        name: String,

        /// Correo electrónico de contacto.
        #[arg(long)]
        email: Option<String>,

        /// Teléfono de contacto.
        #[arg(long)]
        phone: Option<String>,

        /// Especialidades, separadas por comas.
        #[arg(long, default_value = "")]
        specializations: String,

        /// Zonas atendidas, separadas por comas.
        #[arg(long, default_value = "")]
        territories: String,

        /// Idiomas, separados por comas.
        #[arg(long, default_value = "")]
        languages: String,
    },

    /// Activa o desactiva un socio.
    Toggle {
        /// ID del socio.
        id: partner::Id,
    },

    /// Elimina un socio.
    Delete {
        /// ID del socio.
        id: partner::Id,
    },
}

/// Runs the provided [`Partner`] [`Command`].
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
        Command::List { list, kind, active } => {
            let filter = read::partner::Filter {
                search: list.search.clone().into(),
                kind: Choice::from(kind),
                active: Choice::from(active),
            };
            let partners = super::load::<Partner>(&svc, &list, filter).await?;
            super::print(prompt, &partners, row)
        }
        Command::Create {
            kind,
            name,
            email,
            phone,
            specializations,
            territories,
            languages,
        } => {
            let created = svc
                .execute(CreateResource::<Partner>::new(Draft {
                    kind,
                    name,
                    email,
                    phone,
                    specializations: Draft::split_list(&specializations),
                    territories: Draft::split_list(&territories),
                    languages: Draft::split_list(&languages),
                    photo_url: None,
                    active: true,
                }))
                .await
                .map_err(AsError::into_error)?;
            say!(prompt, "Socio registrado: {}", row(&created))
        }
        Command::Toggle { id } => {
            super::toggle::<Partner, _, _>(&svc, prompt, id).await
        }
        Command::Delete { id } => {
            super::delete::<Partner, _, _>(&svc, prompt, id).await
        }
    }
}

/// Formats the provided [`Partner`] as a single row.
fn row(p: &Partner) -> String {
    let mut row = format!(
        "#{}  {}  ({})  [{}]",
        p.id,
        p.name,
        p.kind.label(),
        active_label(p.active),
    );
    if !p.specializations.is_empty() {
        row.push_str("  ");
        row.push_str(&p.specializations.iter().join(", "));
    }
    row
}

#[cfg(test)]
mod spec {
    use service::{domain::Partner, infra::Mock};

    use crate::cli::spec::output;

    use super::Command;

    #[tokio::test]
    async fn splits_comma_separated_lists() {
        let mock = Mock::new();

        let out = output(
            &mock,
            super::super::Command::Partners(Command::Create {
                kind: "company".parse().unwrap(),
                name: "Tasaciones Lima".into(),
                email: None,
                phone: None,
                specializations: "tasación, , legal ".into(),
                territories: "Miraflores".into(),
                languages: String::new(),
            }),
            "",
        )
        .await
        .unwrap();

        assert_eq!(
            out,
            "Socio registrado: #1  Tasaciones Lima  (Empresa)  [activo]  \
             tasación, legal\n",
        );
        let created = &mock.items::<Partner>()[0];
        assert_eq!(created.territories, ["Miraflores"]);
        assert!(created.languages.is_empty());
    }

    #[tokio::test]
    async fn toggles_activity() {
        let mock = Mock::new();
        _ = mock.seed::<Partner>([serde_json::from_value(serde_json::json!({
            "id": 5, "kind": "INDIVIDUAL", "name": "Jorge Salas",
        }))
        .unwrap()]);

        let out = output(
            &mock,
            super::super::Command::Partners(Command::Toggle { id: 5.into() }),
            "",
        )
        .await
        .unwrap();

        assert_eq!(out, "Estado del socio 5: inactivo\n");
        assert!(!mock.items::<Partner>()[0].active);
    }
}
