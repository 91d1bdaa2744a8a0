//! [`NearbyFacility`] subcommands.

use std::io::Write;

use clap::Subcommand;
use common::filter::Choice;
use service::{
    domain::{
        facility::{self, Type, Vicinity},
        NearbyFacility,
    },
    query::facility::Nearby,
    read, Query as _,
};

use crate::{
    define_error, prompt::{Ask, Prompt}, session::Store, AsError, Context, Error,
};

use super::{active_label, say, ListArgs};

/// [`NearbyFacility`] subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista una página de instalaciones cercanas.
    List {
        /// Argumentos del listado.
        #[command(flatten)]
        list: ListArgs,

        /// Muestra solo las instalaciones de la categoría indicada
        /// (por ejemplo, `hospital` o `school`).
        #[arg(long)]
        kind: Option<Type>,

        /// Muestra solo las instalaciones activas (`true`) o inactivas
        /// (`false`).
        #[arg(long)]
        active: Option<bool>,
    },

    /// Busca instalaciones alrededor de una ubicación, de la más cercana a
    /// la más lejana.
    Nearby {
        /// Latitud del centro, en grados.
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitud del centro, en grados.
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Radio de búsqueda, en kilómetros.
        #[arg(long, default_value_t = Vicinity::DEFAULT_RADIUS_KM)]
        radius: f64,
    },

    /// Activa o desactiva una instalación.
    Toggle {
        /// ID de la instalación.
        id: facility::Id,
    },

    /// Elimina una instalación.
    Delete {
        /// ID de la instalación.
        id: facility::Id,
    },
}

/// Runs the provided [`NearbyFacility`] [`Command`].
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
            let filter = read::facility::Filter {
                search: list.search.clone().into(),
                kind: Choice::from(kind),
                active: Choice::from(active),
            };
            let facilities =
                super::load::<NearbyFacility>(&svc, &list, filter).await?;
            super::print(prompt, &facilities, row)
        }
        Command::Nearby { lat, lon, radius } => {
            let vicinity = Vicinity::new(lat, lon, radius)
                .ok_or(FacilityError::InvalidVicinity)?;
            let found = svc
                .execute(Nearby(vicinity))
                .await
                .map_err(AsError::into_error)?;
            if found.is_empty() {
                return say!(
                    prompt,
                    "Sin instalaciones en un radio de {radius} km",
                );
            }
            for f in &found {
                let distance = f
                    .distance_km
                    .map_or_else(|| "?".to_owned(), |d| format!("{d:.1}"));
                say!(prompt, "{distance} km  {}", row(f))?;
            }
            Ok(())
        }
        Command::Toggle { id } => {
            super::toggle::<NearbyFacility, _, _>(&svc, prompt, id).await
        }
        Command::Delete { id } => {
            super::delete::<NearbyFacility, _, _>(&svc, prompt, id).await
        }
    }
}

/// Formats the provided [`NearbyFacility`] as a single row.
fn row(f: &NearbyFacility) -> String {
    let mut row = format!(
        "#{}  {}  ({})  [{}]",
        f.id,
        f.name,
        f.kind.label(),
        active_label(f.active),
    );
    if let Some(address) = &f.address {
        row.push_str("  ");
        row.push_str(address);
    }
    row
}

define_error! {
    enum FacilityError {
        #[code = "INVALID_LOCATION"]
        #[message = "Ubicación o radio de búsqueda inválidos"]
        InvalidVicinity,
    }
}

#[cfg(test)]
mod spec {
    use service::{domain::NearbyFacility, infra::Mock};

    use crate::cli::{spec::output, ListArgs};

    use super::Command;

    fn facility(id: i64, name: &str, kind: &str, km: f64) -> NearbyFacility {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": name, "type": kind, "distanceKm": km,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn lists_nearest_first() {
        let mock = Mock::new();
        _ = mock.seed([
            facility(1, "Colegio San Andrés", "SCHOOL", 3.2),
            facility(2, "Clínica Delgado", "CLINIC", 0.8),
        ]);

        let out = output(
            &mock,
            super::super::Command::Facilities(Command::Nearby {
                lat: -12.1,
                lon: -77.03,
                radius: 5.0,
            }),
            "",
        )
        .await
        .unwrap();

        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            [
                "0.8 km  #2  Clínica Delgado  (Clínica)  [activo]",
                "3.2 km  #1  Colegio San Andrés  (Colegio)  [activo]",
            ],
        );
        let call = &mock.calls()[0];
        assert_eq!(call.path, "/api/nearby-facilities/nearby");
        assert!(call.query.contains(&("radius".into(), "5".into())));
    }

    #[tokio::test]
    async fn rejects_invalid_location() {
        let mock = Mock::new();

        let err = output(
            &mock,
            super::super::Command::Facilities(Command::Nearby {
                lat: 120.0,
                lon: 0.0,
                radius: 5.0,
            }),
            "",
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, "INVALID_LOCATION");
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn filters_by_kind() {
        let mock = Mock::new();
        _ = mock.seed([
            facility(1, "Colegio San Andrés", "SCHOOL", 3.2),
            facility(2, "Clínica Delgado", "CLINIC", 0.8),
        ]);

        let out = output(
            &mock,
            super::super::Command::Facilities(Command::List {
                list: ListArgs {
                    page: 1,
                    search: None,
                    desc: false,
                },
                kind: Some("clinic".parse().unwrap()),
                active: None,
            }),
            "",
        )
        .await
        .unwrap();

        assert!(out.starts_with("#2  Clínica Delgado"));
        assert!(!out.contains("Colegio"));
    }
}
