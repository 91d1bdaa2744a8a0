//! Interactive [`Prompt`] of the terminal.

use std::io::{self, Write};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};

/// Source of the answers to the questions of a [`Prompt`].
pub trait Ask {
    /// Asks for a line of text, which may be left empty.
    ///
    /// # Errors
    ///
    /// If the input is exhausted or the terminal is not accessible.
    fn text(&mut self, question: &str) -> io::Result<String>;

    /// Asks for a line of text without echoing it.
    ///
    /// # Errors
    ///
    /// If the input is exhausted or the terminal is not accessible.
    fn secret(&mut self, question: &str) -> io::Result<String>;

    /// Asks to select one of the provided non-empty `options`, returning
    /// [`None`] if the selection is abandoned.
    ///
    /// # Errors
    ///
    /// If the input is exhausted or the terminal is not accessible.
    fn select(
        &mut self,
        question: &str,
        options: &[String],
    ) -> io::Result<Option<usize>>;

    /// Asks a yes/no question, defaulting to "no".
    ///
    /// # Errors
    ///
    /// If the terminal is not accessible.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// [`Ask`]s on the interactive terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal;

impl Terminal {
    /// Returns the theme the questions are rendered with.
    fn theme() -> ColorfulTheme {
        ColorfulTheme::default()
    }
}

impl Ask for Terminal {
    fn text(&mut self, question: &str) -> io::Result<String> {
        Ok(Input::<String>::with_theme(&Self::theme())
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(|dialoguer::Error::IO(e)| e)?)
    }

    fn secret(&mut self, question: &str) -> io::Result<String> {
        Ok(Password::with_theme(&Self::theme())
            .with_prompt(question)
            .allow_empty_password(true)
            .interact()
            .map_err(|dialoguer::Error::IO(e)| e)?)
    }

    fn select(
        &mut self,
        question: &str,
        options: &[String],
    ) -> io::Result<Option<usize>> {
        Ok(Select::with_theme(&Self::theme())
            .with_prompt(format!("{question} (Esc para volver)"))
            .items(options)
            .default(0)
            .interact_opt()
            .map_err(|dialoguer::Error::IO(e)| e)?)
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(Confirm::with_theme(&Self::theme())
            .with_prompt(question)
            .default(false)
            .interact_opt()
            .map_err(|dialoguer::Error::IO(e)| e)?
            .unwrap_or(false))
    }
}

/// Interactive prompt asking questions with `I` and writing command output to
/// `O`.
#[derive(Debug)]
pub struct Prompt<I, O> {
    /// Source of the answers.
    input: I,

    /// Destination of the command output.
    output: O,

    /// Indicator whether every confirmation is answered positively without
    /// asking.
    assume_yes: bool,
}

impl<I, O> Prompt<I, O> {
    /// Creates a new [`Prompt`] over the provided `input` and `output`.
    #[must_use]
    pub fn new(input: I, output: O, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    /// Returns the output of this [`Prompt`].
    pub fn out(&mut self) -> &mut O {
        &mut self.output
    }
}

impl<I: Ask, O: Write> Prompt<I, O> {
    /// Asks for a line of text, returning it trimmed.
    ///
    /// # Errors
    ///
    /// If the input is exhausted or the terminal is not accessible.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        self.output.flush()?;
        self.input.text(question).map(|a| a.trim().to_owned())
    }

    /// Asks for a line of text, returning [`None`] if it's left empty.
    ///
    /// # Errors
    ///
    /// If the input is exhausted or the terminal is not accessible.
    pub fn ask_optional(&mut self, question: &str) -> io::Result<Option<String>> {
        self.ask(question).map(|a| Some(a).filter(|a| !a.is_empty()))
    }

    /// Asks for a password, without trimming it.
    ///
    /// # Errors
    ///
    /// If the input is exhausted or the terminal is not accessible.
    pub fn ask_secret(&mut self, question: &str) -> io::Result<String> {
        self.output.flush()?;
        self.input.secret(question)
    }

    /// Asks to choose one of the provided `options`.
    ///
    /// Returns [`None`] if there is nothing to choose or the choice is
    /// abandoned, so the caller may go back.
    ///
    /// # Errors
    ///
    /// If the input is exhausted or the terminal is not accessible.
    pub fn choose(
        &mut self,
        question: &str,
        options: &[String],
    ) -> io::Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }
        self.output.flush()?;
        self.input.select(question, options)
    }

    /// Asks to confirm the described action.
    ///
    /// # Errors
    ///
    /// If the terminal is not accessible.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        self.output.flush()?;
        self.input.confirm(question)
    }
}
