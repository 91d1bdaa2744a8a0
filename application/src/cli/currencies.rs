//! [`Currency`] subcommands.

use std::io::Write;

use clap::Subcommand;
use common::filter::Choice;
use rust_decimal::Decimal;
use service::{
    command::{CreateResource, SetBaseCurrency},
    domain::{
        currency::{self, Draft},
        Currency,
    },
    read, Command as _,
};

use crate::{prompt::{Ask, Prompt}, session::Store, AsError, Context, Error};

use super::{say, ListArgs};

/// [`Currency`] subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista una página de monedas.
    List {
        /// Argumentos del listado.
        #[command(flatten)]
        list: ListArgs,

        /// Muestra solo las monedas activas (`true`) o inactivas (`false`).
        #[arg(long)]
        active: Option<bool>,
    },

    /// Crea una nueva moneda.
    Create {
        /// Código ISO 4217 de la moneda (por ejemplo, `PEN`).
        code: String,

        /// Nombre de la moneda.
        name: String,

        /// Símbolo de la moneda.
        symbol: String,

        /// Tipo de cambio respecto de la moneda base.
        #[arg(long)]
        rate: Decimal,

        /// Cantidad de decimales mostrados.
        #[arg(long, default_value_t = 2)]
        decimals: u8,
    },

    /// Establece la moneda base.
    SetBase {
        /// ID de la moneda.
        id: currency::Id,
    },

    /// Activa o desactiva una moneda.
    Toggle {
        /// ID de la moneda.
        id: currency::Id,
    },

    /// Elimina una moneda.
    Delete {
        /// ID de la moneda.
        id: currency::Id,
    },
}

/// Runs the provided [`Currency`] [`Command`].
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
            let filter = read::currency::Filter {
                search: list.search.clone().into(),
                active: Choice::from(active),
                base: Choice::All,
            };
            let currencies =
                super::load::<Currency>(&svc, &list, filter).await?;
            super::print(prompt, &currencies, row)
        }
        Command::Create {
            code,
            name,
            symbol,
            rate,
            decimals,
        } => {
            let created = svc
                .execute(CreateResource::<Currency>::new(Draft {
                    code: code.trim().to_uppercase(),
                    name,
                    symbol,
                    exchange_rate: rate,
                    is_base: None,
                    is_active: None,
                    decimal_places: decimals,
                    format: None,
                }))
                .await
                .map_err(AsError::into_error)?;
            say!(prompt, "Moneda creada: {}", row(&created))
        }
        Command::SetBase { id } => {
            let base = svc
                .execute(SetBaseCurrency { id })
                .await
                .map_err(AsError::into_error)?;
            say!(prompt, "Moneda base: {}", row(&base))
        }
        Command::Toggle { id } => {
            super::toggle::<Currency, _, _>(&svc, prompt, id).await
        }
        Command::Delete { id } => {
            super::delete::<Currency, _, _>(&svc, prompt, id).await
        }
    }
}

/// Formats the provided [`Currency`] as a single row.
fn row(c: &Currency) -> String {
    let mut row = format!(
        "#{}  {}  {}  ({})  tasa {}",
        c.id, c.code, c.name, c.symbol, c.exchange_rate,
    );
    if c.is_base {
        row.push_str("  [base]");
    }
    if !c.is_active {
        row.push_str("  [inactiva]");
    }
    row
}

#[cfg(test)]
mod spec {
    use service::{domain::Currency, infra::Mock};

    use crate::cli::{spec::output, ListArgs};

    use super::Command;

    fn currency(id: i64, code: &str, base: bool) -> Currency {
        serde_json::from_value(serde_json::json!({
            "id": id, "code": code, "name": code, "symbol": "$",
            "exchangeRate": 1.5, "isBase": base, "isActive": true,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn lists_base_currency_first() {
        let mock = Mock::new();
        _ = mock.seed([
            currency(1, "USD", false),
            currency(2, "EUR", false),
            currency(3, "PEN", true),
        ]);

        let out = output(
            &mock,
            super::super::Command::Currencies(Command::List {
                list: ListArgs {
                    page: 1,
                    search: None,
                    desc: false,
                },
                active: None,
            }),
            "",
        )
        .await
        .unwrap();

        let codes = out
            .lines()
            .take(3)
            .map(|l| l.split("  ").nth(1).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(codes, ["PEN", "EUR", "USD"]);
        assert!(out.contains("#3  PEN  PEN  ($)  tasa 1.5  [base]"));
    }

    #[tokio::test]
    async fn creates_uppercased_code() {
        let mock = Mock::new();

        let out = output(
            &mock,
            super::super::Command::Currencies(Command::Create {
                code: " usd ".into(),
                name: "Dólar".into(),
                symbol: "$".into(),
                rate: "3.75".parse().unwrap(),
                decimals: 2,
            }),
            "",
        )
        .await
        .unwrap();

        assert!(out.starts_with("Moneda creada: #1  USD  Dólar"));
        assert_eq!(
            mock.calls()[0].body.as_ref().unwrap()["code"],
            serde_json::json!("USD"),
        );
    }

    #[tokio::test]
    async fn sets_base_currency() {
        let mock = Mock::new();
        _ = mock.seed([currency(1, "USD", false), currency(3, "PEN", true)]);

        let out = output(
            &mock,
            super::super::Command::Currencies(Command::SetBase { id: 1.into() }),
            "",
        )
        .await
        .unwrap();

        assert!(out.contains("Moneda base: #1  USD"));
        assert_eq!(mock.count("PATCH", "/api/currencies/1/set-base"), 1);
    }
}
