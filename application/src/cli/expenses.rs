//! [`Expense`] subcommands.

use std::io::Write;

use clap::Subcommand;
use common::{datetime::format_date, filter::Choice};
use service::{
    domain::financial::{expense::Status, Expense},
    read,
};

use crate::{prompt::{Ask, Prompt}, session::Store, Context, Error};

use super::ListArgs;

/// [`Expense`] subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista una página de gastos, por fecha de vencimiento.
    List {
        /// Argumentos del listado.
        #[command(flatten)]
        list: ListArgs,

        /// Muestra solo los gastos con el estado indicado (por ejemplo,
        /// `pending` u `overdue`).
        #[arg(long)]
        status: Option<Status>,
    },
}

/// Runs the provided [`Expense`] [`Command`].
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
            let filter = read::expense::Filter {
                search: list.search.clone().into(),
                status: Choice::from(status),
            };
            let expenses = super::load::<Expense>(&svc, &list, filter).await?;
            super::print(prompt, &expenses, row)
        }
    }
}

/// Formats the provided [`Expense`] as a single row.
fn row(e: &Expense) -> String {
    let code = e.currency.as_str();
    let mut row = format!(
        "#{}  {}  {}  [{}]",
        e.id,
        e.description,
        e.money().format_with(code, 2),
        e.status.label(),
    );
    if let Some(due) = e.due_date {
        row.push_str(&format!("  vence {}", format_date(due)));
    }
    if let Some(balance) = e.balance.filter(|b| !b.is_zero()) {
        let balance = common::money::Money {
            amount: balance,
            currency: e.currency.clone(),
        };
        row.push_str(&format!("  saldo {}", balance.format_with(code, 2)));
    }
    row
}
