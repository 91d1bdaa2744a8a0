//! [`Appointment`] subcommands, including the interactive booking.

use std::io::Write;

use clap::Subcommand;
use common::{datetime::parse_date, filter::Choice};
use service::{
    booking::{self, ClientInfo, Step, Wizard},
    domain::{
        appointment::{self, ScheduleDateTime, Slot, Status},
        Appointment,
    },
    query::appointment::{Agents, Properties},
    read, Query as _,
};

use crate::{prompt::{Ask, Prompt}, session::Store, AsError, Context, Error};

use super::{say, ListArgs};

/// [`Appointment`] subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista una página de citas.
    List {
        /// Argumentos del listado.
        #[command(flatten)]
        list: ListArgs,

        /// Muestra solo las citas con el estado indicado (por ejemplo,
        /// `pending` o `confirmed`).
        #[arg(long)]
        status: Option<Status>,
    },

    /// Agenda una visita paso a paso.
    ///
    /// Una respuesta vacía vuelve al paso anterior.
    Book,

    /// Elimina una cita.
    Delete {
        /// ID de la cita.
        id: appointment::Id,
    },
}

/// Runs the provided [`Appointment`] [`Command`].
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
        Command::List { list, status } => {
            let filter = read::appointment::Filter {
                search: list.search.clone().into(),
                status: Choice::from(status),
            };
            let appointments =
                super::load::<Appointment>(&svc, &list, filter).await?;
            super::print(prompt, &appointments, row)
        }
        Command::Book => book(&svc, prompt).await,
        Command::Delete { id } => {
            super::delete::<Appointment, _, _>(&svc, prompt, id).await
        }
    }
}

/// Walks through the booking [`Wizard`] until an [`Appointment`] is
/// created or the booking is abandoned on its first [`Step`].
async fn book<I, O>(
    svc: &crate::Service,
    prompt: &mut Prompt<I, O>,
) -> Result<(), Error>
where
    I: Ask,
    O: Write,
{
    let properties = svc
        .execute(Properties)
        .await
        .map_err(AsError::into_error)?;
    let agents = svc.execute(Agents).await.map_err(AsError::into_error)?;

    let mut wizard = Wizard::new();
    let mut resubmit = false;
    loop {
        match wizard.step() {
            Step::SelectProperty => {
                let options = properties
                    .iter()
                    .map(|p| match &p.address {
                        Some(address) => format!("{} ({address})", p.title),
                        None => p.title.clone(),
                    })
                    .collect::<Vec<_>>();
                let Some(n) = prompt
                    .choose("Propiedad a visitar", &options)
                    .map_err(AsError::into_error)?
                else {
                    return say!(prompt, "Reserva cancelada");
                };
                wizard
                    .select_property(properties[n].clone())
                    .map_err(AsError::into_error)?;
            }
            Step::SelectAgent => {
                let options =
                    agents.iter().map(|a| a.name.clone()).collect::<Vec<_>>();
                match prompt
                    .choose("Agente", &options)
                    .map_err(AsError::into_error)?
                {
                    Some(n) => wizard
                        .select_agent(agents[n].clone())
                        .map_err(AsError::into_error)?,
                    None => {
                        _ = wizard.back();
                    }
                }
            }
            Step::SelectDateTime => {
                let Some(answer) = prompt
                    .ask_optional("Fecha de la visita (AAAA-MM-DD)")
                    .map_err(AsError::into_error)?
                else {
                    _ = wizard.back();
                    continue;
                };
                let Ok(date) = parse_date(&answer) else {
                    say!(prompt, "Fecha inválida: {answer}")?;
                    continue;
                };

                let available = wizard
                    .choose_date(svc, date)
                    .await
                    .map_err(AsError::into_error)?
                    .iter()
                    .filter(|s| s.available)
                    .copied()
                    .collect::<Vec<_>>();
                if available.is_empty() {
                    say!(prompt, "Sin horarios disponibles el {answer}")?;
                    continue;
                }
                let options = available.iter().map(slot).collect::<Vec<_>>();
                if let Some(n) = prompt
                    .choose("Horario", &options)
                    .map_err(AsError::into_error)?
                {
                    wizard
                        .select_slot(available[n])
                        .map_err(AsError::into_error)?;
                }
            }
            Step::EnterClientInfo => {
                if !resubmit {
                    let Some(client) = ask_client(prompt)? else {
                        _ = wizard.back();
                        continue;
                    };
                    wizard
                        .enter_client(client)
                        .map_err(AsError::into_error)?;
                }
                resubmit = false;

                let submitted = wizard.submit(svc).await.map(|_| ());
                match submitted {
                    Ok(()) => {}
                    Err(e) if matches!(e.as_ref(), booking::Error::Invalid(_)) => {
                        say!(
                            prompt,
                            "{}: {}",
                            e.as_ref().message(),
                            e.into_error().message,
                        )?;
                    }
                    Err(e) => {
                        say!(prompt, "{}", wizard.failure().unwrap_or_default())?;
                        if !prompt
                            .confirm("¿Reintentar?")
                            .map_err(AsError::into_error)?
                        {
                            return Err(e.into_error());
                        }
                        resubmit = true;
                    }
                }
            }
            Step::Submitted => break,
        }
    }

    match wizard.appointment() {
        Some(a) => say!(prompt, "Cita reservada: {}", row(a)),
        None => Ok(()),
    }
}

/// Asks for the [`ClientInfo`], returning [`None`] if the name is left
/// empty.
fn ask_client<I, O>(
    prompt: &mut Prompt<I, O>,
) -> Result<Option<ClientInfo>, Error>
where
    I: Ask,
    O: Write,
{
    let Some(name) = prompt
        .ask_optional("Nombre del cliente")
        .map_err(AsError::into_error)?
    else {
        return Ok(None);
    };
    let email = prompt
        .ask("Correo del cliente")
        .map_err(AsError::into_error)?;
    let phone = prompt
        .ask_optional("Teléfono (opcional)")
        .map_err(AsError::into_error)?;
    let notes = prompt
        .ask_optional("Notas (opcional)")
        .map_err(AsError::into_error)?;
    Ok(Some(ClientInfo {
        name,
        email,
        phone,
        notes,
    }))
}

/// Formats the provided [`ScheduleDateTime`] as `AAAA-MM-DD HH:MM`.
fn schedule(at: &ScheduleDateTime) -> String {
    let (hour, minute) = at.hour_minute();
    format!(
        "{} {hour:02}:{minute:02}",
        common::datetime::format_date(at.date()),
    )
}

/// Formats the provided [`Slot`] as a time range.
fn slot(s: &Slot) -> String {
    let ((h1, m1), (h2, m2)) = (s.start_time.hour_minute(), s.end_time.hour_minute());
    format!("{h1:02}:{m1:02} - {h2:02}:{m2:02}")
}

/// Formats the provided [`Appointment`] as a single row.
fn row(a: &Appointment) -> String {
    format!(
        "#{}  {}  {}  [{}]  {}",
        a.id,
        schedule(&a.appointment_date),
        a.title,
        a.status.label(),
        a.client_name,
    )
}

#[cfg(test)]
mod spec {
    use service::{
        domain::{Agent, Appointment, Property},
        infra::{demo, Mock},
    };

    use crate::cli::spec::output;

    use super::Command;

    const SLOTS: &str = "/api/appointments/available-slots";

    fn mock() -> Mock {
        let mock = Mock::new();
        _ = mock
            .seed::<Property>(demo::properties())
            .seed::<Agent>(demo::agents())
            .respond(
                "GET",
                SLOTS,
                serde_json::json!([
                    {"startTime": "2025-03-10T09:00:00",
                     "endTime": "2025-03-10T10:00:00",
                     "available": false},
                    {"startTime": "2025-03-10T10:00:00",
                     "endTime": "2025-03-10T11:00:00"},
                ]),
            );
        mock
    }

    fn book() -> super::super::Command {
        super::super::Command::Appointments(Command::Book)
    }

    #[tokio::test]
    async fn books_available_slot() {
        let mock = mock();

        let out = output(
            &mock,
            book(),
            "1\n2\n2025-03-10\n1\nLucía Torres\nlucia@correo.pe\n\n\n",
        )
        .await
        .unwrap();

        assert!(out.contains("  1) 10:00 - 11:00\n"));
        assert!(!out.contains("09:00 - 10:00"));
        assert!(out.contains(
            "Cita reservada: #1  2025-03-10 10:00  \
             Visita: Departamento en Miraflores  [Pendiente]  Lucía Torres",
        ));
        let booked = mock.items::<Appointment>();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].agent_id.get(), 2);
        assert_eq!(booked[0].client_email, "lucia@correo.pe");
    }

    #[tokio::test]
    async fn goes_back_on_empty_answer() {
        let mock = mock();

        _ = output(
            &mock,
            book(),
            "1\n\n3\n1\n\n2\n2025-03-10\n1\nLucía Torres\nlucia@correo.pe\n\n\n",
        )
        .await
        .unwrap();

        let booked = mock.items::<Appointment>();
        assert_eq!(booked[0].property_id.get(), 3);
        assert_eq!(booked[0].agent_id.get(), 2);
    }

    #[tokio::test]
    async fn asks_again_for_invalid_client() {
        let mock = mock();

        let out = output(
            &mock,
            book(),
            "1\n1\n2025-03-10\n1\nLucía\nlucia\n\n\n\
             Lucía\nlucia@correo.pe\n\n\n",
        )
        .await
        .unwrap();

        assert!(out.contains(
            "Revise los datos del cliente: \
             clientEmail: Correo electrónico inválido",
        ));
        assert_eq!(mock.count("POST", "/api/appointments"), 1);
    }

    #[tokio::test]
    async fn abandons_on_first_step() {
        let mock = mock();

        let out = output(&mock, book(), "\n").await.unwrap();

        assert!(out.ends_with("Reserva cancelada\n"));
        assert!(mock.items::<Appointment>().is_empty());
    }

    #[tokio::test]
    async fn rejects_malformed_date() {
        let mock = mock();

        let out = output(
            &mock,
            book(),
            "1\n1\n10/03/2025\n2025-03-10\n1\nLucía\nlucia@correo.pe\n\n\n",
        )
        .await
        .unwrap();

        assert!(out.contains("Fecha inválida: 10/03/2025"));
        assert_eq!(mock.count("GET", SLOTS), 1);
    }
}
