//! [`Error`]-related definitions.

use std::{fmt, io};

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    booking,
    command::ExecutionError,
    domain::{upload, FieldErrors},
    infra::backend,
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// User-facing [`Error`] of a CLI command.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message shown to the user.
    pub message: String,
}

impl Error {
    /// Code of an [`Error`] caused by rejected session credentials.
    pub const UNAUTHORIZED: Code = "UNAUTHORIZED";

    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Indicates whether this [`Error`] is caused by rejected session
    /// credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.code == Self::UNAUTHORIZED
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for backend::Error {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: if self.is_unauthorized() {
                Error::UNAUTHORIZED
            } else {
                "BACKEND_ERROR"
            },
            message: self.message(),
            backtrace: None,
        })
    }
}

impl AsError for FieldErrors {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "INVALID_FORM",
            message: self
                .iter()
                .map(|(field, msg)| format!("{field}: {msg}"))
                .join("; "),
            backtrace: None,
        })
    }
}

impl AsError for ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Invalid(e) => e.try_as_error(),
        }
    }
}

impl AsError for upload::Error {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "INVALID_IMAGE",
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for booking::Error {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Invalid(e) => e.try_as_error(),
            Self::WrongStep(_) | Self::UnavailableSlot => Some(Error {
                code: "BOOKING_ERROR",
                message: self.message(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for io::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}
