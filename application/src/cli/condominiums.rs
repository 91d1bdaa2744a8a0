//! [`Condominium`] subcommands.

use std::io::Write;

use clap::Subcommand;
use common::{datetime::format_date, money::Money};
use service::{
    command::CreateResource,
    domain::{
        condominium::{self, Draft},
        Condominium,
    },
    query::condominium::{FeePayments, Payments},
    read, Command as _, Query as _,
};

use crate::{prompt::{Ask, Prompt}, session::Store, AsError, Context, Error};

use super::{say, ListArgs};

/// [`Condominium`] subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista una página de condominios.
    List(ListArgs),

    /// Crea un nuevo condominio.
    Create {
        /// Nombre del condominio.
        name: String,

        /// Dirección del condominio.
        #[arg(long)]
        address: Option<String>,

        /// Cantidad total de unidades.
        #[arg(long)]
        units: Option<u32>,

        /// Descripción del condominio.
        #[arg(long)]
        description: Option<String>,
    },

    /// Muestra las cuotas de un condominio junto con lo pagado.
    Payments {
        /// ID del condominio.
        id: condominium::Id,
    },

    /// Elimina un condominio.
    Delete {
        /// ID del condominio.
        id: condominium::Id,
    },
}

/// Runs the provided [`Condominium`] [`Command`].
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
        Command::List(list) => {
            let filter = read::named::Filter {
                search: list.search.clone().into(),
            };
            let condominiums =
                super::load::<Condominium>(&svc, &list, filter).await?;
            super::print(prompt, &condominiums, row)
        }
        Command::Create {
            name,
            address,
            units,
            description,
        } => {
            let created = svc
                .execute(CreateResource::<Condominium>::new(Draft {
                    name,
                    address,
                    total_units: units,
                    description,
                }))
                .await
                .map_err(AsError::into_error)?;
            say!(prompt, "Condominio creado: {}", row(&created))
        }
        Command::Payments { id } => {
            let fees = svc
                .execute(Payments { condominium_id: id })
                .await
                .map_err(AsError::into_error)?;
            if fees.is_empty() {
                return say!(prompt, "Sin cuotas");
            }
            for f in &fees {
                say!(prompt, "{}", fee_row(f))?;
            }
            Ok(())
        }
        Command::Delete { id } => {
            super::delete::<Condominium, _, _>(&svc, prompt, id).await
        }
    }
}

/// Formats the provided [`Condominium`] as a single row.
fn row(c: &Condominium) -> String {
    let mut row = format!("#{}  {}", c.id, c.name);
    if let Some(address) = &c.address {
        row.push_str("  ");
        row.push_str(address);
    }
    if let Some(units) = c.total_units {
        row.push_str(&format!("  ({units} unidades)"));
    }
    row
}

/// Formats the provided [`FeePayments`] as a single row.
fn fee_row(f: &FeePayments) -> String {
    let FeePayments { fee, payments } = f;
    let code = fee.currency.as_str();
    let paid = Money {
        amount: f.paid(),
        currency: fee.currency.clone(),
    };
    let mut row = format!(
        "{}  {}  pagado {} en {} pagos",
        fee.name,
        fee.money().format_with(code, 2),
        paid.format_with(code, 2),
        payments.len(),
    );
    if let Some(due) = fee.due_date {
        row.push_str(&format!("  vence {}", format_date(due)));
    }
    row
}

#[cfg(test)]
mod spec {
    use service::{
        domain::condominium::{Fee, Payment},
        infra::Mock,
    };

    use crate::cli::spec::output;

    use super::Command;

    #[tokio::test]
    async fn shows_paid_amount_of_fees() {
        let mock = Mock::new();
        _ = mock
            .seed::<Fee>([
                serde_json::from_value(serde_json::json!({
                    "id": 1, "condominiumId": 4, "name": "Mantenimiento",
                    "amount": 1500, "currency": "PEN", "dueDate": "2025-04-05",
                }))
                .unwrap(),
                serde_json::from_value(serde_json::json!({
                    "id": 2, "condominiumId": 5, "name": "Seguridad",
                    "amount": 300, "currency": "PEN",
                }))
                .unwrap(),
            ])
            .seed::<Payment>([
                serde_json::from_value(serde_json::json!({
                    "id": 1, "feeId": 1, "amount": 1000,
                }))
                .unwrap(),
                serde_json::from_value(serde_json::json!({
                    "id": 2, "feeId": 1, "amount": 250.5,
                }))
                .unwrap(),
            ]);

        let out = output(
            &mock,
            super::super::Command::Condominiums(Command::Payments {
                id: 4.into(),
            }),
            "",
        )
        .await
        .unwrap();

        assert_eq!(
            out,
            "Mantenimiento  PEN 1,500.00  pagado PEN 1,250.50 en 2 pagos  \
             vence 2025-04-05\n",
        );
    }

    #[tokio::test]
    async fn reports_condominium_without_fees() {
        let mock = Mock::new();

        let out = output(
            &mock,
            super::super::Command::Condominiums(Command::Payments {
                id: 4.into(),
            }),
            "",
        )
        .await
        .unwrap();

        assert_eq!(out, "Sin cuotas\n");
    }
}
