//! [`Args`] definitions.

use clap::Parser;

use crate::cli::Command;

/// Cliente de línea de comandos de la plataforma inmobiliaria.
#[derive(Debug, Parser)]
#[command(name = "proptech", version, about, long_about = None)]
pub struct Args {
    /// Ruta al archivo de configuración.
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    /// Confirma automáticamente las operaciones destructivas.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Subcomando a ejecutar.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
