//! Subcommands of the `proptech` CLI.

pub mod agencies;
pub mod appointments;
pub mod auth;
pub mod condominiums;
pub mod currencies;
pub mod expenses;
pub mod facilities;
pub mod partners;
pub mod profile;
pub mod upload;

use std::io::Write;

use clap::Subcommand;
use common::{filter::Direction, pagination::Page};
use service::{
    collection::ResourceList,
    command::{delete_resource::Pending, DeleteResource, ToggleResourceActive},
    domain::{Activatable, Resource},
    infra::backend,
    query::resource::List,
    read::{Listable, Sort},
    Command as _, Query,
};
use tracerr::Traced;

use crate::{
    define_error, prompt::{Ask, Prompt}, session::Store, AsError, Context, Error,
    Service,
};

/// Writes a formatted line to the output of the provided [`Prompt`].
macro_rules! say {
    ($prompt:expr, $($arg:tt)*) => {
        ::std::writeln!($prompt.out(), $($arg)*)
            .map_err($crate::AsError::into_error)
    };
}
pub(crate) use say;

/// Subcommand of the `proptech` CLI.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inicia sesión con correo y contraseña.
    Login(auth::Login),

    /// Cierra la sesión actual.
    Logout,

    /// Muestra el usuario de la sesión actual.
    Whoami,

    /// Gestiona las agencias.
    #[command(subcommand)]
    Agencies(agencies::Command),

    /// Gestiona las monedas.
    #[command(subcommand)]
    Currencies(currencies::Command),

    /// Gestiona las instalaciones cercanas.
    #[command(subcommand)]
    Facilities(facilities::Command),

    /// Gestiona las citas y agenda visitas.
    #[command(subcommand)]
    Appointments(appointments::Command),

    /// Gestiona los condominios.
    #[command(subcommand)]
    Condominiums(condominiums::Command),

    /// Consulta los gastos.
    #[command(subcommand)]
    Expenses(expenses::Command),

    /// Gestiona los socios.
    #[command(subcommand)]
    Partners(partners::Command),

    /// Gestiona el perfil del usuario.
    #[command(subcommand)]
    Profile(profile::Command),
}

/// Runs the provided [`Command`].
///
/// The current session is dropped once the backend rejects its
/// credentials.
///
/// # Errors
///
/// If the [`Command`] fails.
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
    let res = match cmd {
        Command::Login(cmd) => return auth::login(cmd, ctx, prompt).await,
        Command::Logout => return auth::logout(ctx, prompt),
        Command::Whoami => auth::whoami(ctx, prompt),
        Command::Agencies(cmd) => agencies::run(cmd, ctx, prompt).await,
        Command::Currencies(cmd) => currencies::run(cmd, ctx, prompt).await,
        Command::Facilities(cmd) => facilities::run(cmd, ctx, prompt).await,
        Command::Appointments(cmd) => {
            appointments::run(cmd, ctx, prompt).await
        }
        Command::Condominiums(cmd) => {
            condominiums::run(cmd, ctx, prompt).await
        }
        Command::Expenses(cmd) => expenses::run(cmd, ctx, prompt).await,
        Command::Partners(cmd) => partners::run(cmd, ctx, prompt).await,
        Command::Profile(cmd) => profile::run(cmd, ctx, prompt).await,
    };
    res.map_err(ctx.error())
}

/// Arguments of listing a page of a collection.
#[derive(Clone, Debug, clap::Args)]
pub struct ListArgs {
    /// Número de página, empezando en 1.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Texto a buscar entre los elementos de la página.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Ordena de forma descendente.
    #[arg(long)]
    pub desc: bool,
}

/// Loads the page of a [`Listable`] collection requested by the provided
/// [`ListArgs`], applying the provided `filter` to it.
///
/// # Errors
///
/// If the page doesn't exist or cannot be loaded.
pub(crate) async fn load<R>(
    svc: &Service,
    args: &ListArgs,
    filter: R::Filter,
) -> Result<ResourceList<R>, Error>
where
    R: Listable,
    Service: Query<List<R>, Ok = Page<R>, Err = Traced<backend::Error>>,
{
    let mut list = ResourceList::new(svc.config().page_size);
    let page = args.page.saturating_sub(1);
    if !list
        .open_page(svc, page)
        .await
        .map_err(AsError::into_error)?
    {
        return Err(CliError::NoSuchPage.into());
    }

    list.set_filter(filter);
    list.set_sort(Some(Sort {
        key: R::SortKey::default(),
        direction: if args.desc {
            Direction::Descending
        } else {
            Direction::Ascending
        },
    }));
    Ok(list)
}

/// Prints the filtered and sorted view of the provided [`ResourceList`],
/// one `row` per item, followed by the pagination summary.
///
/// # Errors
///
/// If the output is not writable.
pub(crate) fn print<R, I, O>(
    prompt: &mut Prompt<I, O>,
    list: &ResourceList<R>,
    row: impl Fn(&R) -> String,
) -> Result<(), Error>
where
    R: Listable,
    O: Write,
{
    let view = list.view();
    if view.is_empty() {
        say!(prompt, "Sin {}", R::LABELS.plural)?;
    }
    for item in view {
        say!(prompt, "{}", row(item))?;
    }

    let pager = list.pager();
    say!(
        prompt,
        "Página {} de {} ({} {})",
        pager.current() + 1,
        pager.total_pages().max(1),
        list.page().total,
        R::LABELS.plural,
    )
}

/// Deletes the [`Resource`] with the provided `id` once the deletion is
/// confirmed.
///
/// # Errors
///
/// If the [`Resource`] cannot be deleted.
pub(crate) async fn delete<R, I, O>(
    svc: &Service,
    prompt: &mut Prompt<I, O>,
    id: R::Id,
) -> Result<(), Error>
where
    R: Resource,
    Service: service::Command<
        DeleteResource<R>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
    I: Ask,
    O: Write,
{
    let pending = Pending::<R>::new(id);
    let confirmed = prompt
        .confirm(&format!(
            "¿Está seguro de eliminar {} {id}?",
            R::LABELS.singular,
        ))
        .map_err(AsError::into_error)?;
    if !confirmed {
        pending.cancel();
        return say!(prompt, "Operación cancelada");
    }

    svc.execute(DeleteResource::from(pending.confirm()))
        .await
        .map_err(AsError::into_error)?;
    say!(prompt, "Se eliminó {} {id}", R::LABELS.singular)
}

/// Toggles the "active" flag of the [`Activatable`] resource with the
/// provided `id`.
///
/// # Errors
///
/// If the flag cannot be toggled.
pub(crate) async fn toggle<R, I, O>(
    svc: &Service,
    prompt: &mut Prompt<I, O>,
    id: R::Id,
) -> Result<(), Error>
where
    R: Activatable,
    Service: service::Command<
        ToggleResourceActive<R>,
        Ok = R,
        Err = Traced<backend::Error>,
    >,
    O: Write,
{
    let toggled = svc
        .execute(ToggleResourceActive::<R>::new(id))
        .await
        .map_err(AsError::into_error)?;
    say!(
        prompt,
        "Estado {} {id}: {}",
        R::LABELS.of_singular(),
        active_label(toggled.is_active()),
    )
}

/// Returns a human-readable label of an "active" flag.
pub(crate) fn active_label(active: bool) -> &'static str {
    if active {
        "activo"
    } else {
        "inactivo"
    }
}

define_error! {
    enum CliError {
        #[code = "NO_SUCH_PAGE"]
        #[message = "La página solicitada no existe"]
        NoSuchPage,

        #[code = "NOT_FOUND"]
        #[message = "No se encontró el elemento solicitado"]
        NotFound,
    }
}
