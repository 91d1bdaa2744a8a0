//! Client-side validation of submitted forms.

use std::{collections::BTreeMap, fmt, sync::LazyLock};

use regex::Regex;

/// Field-level validation errors, keyed by the (camelCase) field name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    /// Message of a missing required value.
    pub const REQUIRED: &'static str = "Este campo es obligatorio";

    /// Message of a malformed email address.
    pub const INVALID_EMAIL: &'static str = "Correo electrónico inválido";

    /// Message of a malformed URL.
    pub const INVALID_URL: &'static str = "URL inválida";

    /// Message of a malformed phone number.
    pub const INVALID_PHONE: &'static str = "Teléfono inválido";

    /// Creates new empty [`FieldErrors`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the `message` for the `field`, unless the `field` already has
    /// one.
    pub fn add(&mut self, field: &'static str, message: &'static str) {
        _ = self.0.entry(field).or_insert(message);
    }

    /// Records the `message` for the `field` if the `valid` condition doesn't
    /// hold.
    pub fn check(
        &mut self,
        field: &'static str,
        valid: bool,
        message: &'static str,
    ) -> &mut Self {
        if !valid {
            self.add(field, message);
        }
        self
    }

    /// Records [`FieldErrors::REQUIRED`] for the `field` if the `value` is
    /// blank.
    pub fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        self.check(field, !value.trim().is_empty(), Self::REQUIRED)
    }

    /// Records [`FieldErrors::INVALID_EMAIL`] for the `field` if the `value`
    /// is present but malformed.
    pub fn email(
        &mut self,
        field: &'static str,
        value: Option<&str>,
    ) -> &mut Self {
        self.check(
            field,
            present(value).map_or(true, is_email),
            Self::INVALID_EMAIL,
        )
    }

    /// Records [`FieldErrors::INVALID_URL`] for the `field` if the `value` is
    /// present but malformed.
    pub fn url(&mut self, field: &'static str, value: Option<&str>) -> &mut Self {
        self.check(field, present(value).map_or(true, is_url), Self::INVALID_URL)
    }

    /// Records [`FieldErrors::INVALID_PHONE`] for the `field` if the `value`
    /// is present but malformed.
    pub fn phone(
        &mut self,
        field: &'static str,
        value: Option<&str>,
    ) -> &mut Self {
        self.check(
            field,
            present(value).map_or(true, is_phone),
            Self::INVALID_PHONE,
        )
    }

    /// Returns the message recorded for the `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    /// Indicates whether no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the recorded `(field, message)` pairs, ordered by field.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    /// Converts these [`FieldErrors`] into a [`Result`], succeeding if there
    /// are none.
    ///
    /// # Errors
    ///
    /// If any error has been recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Form data which can be validated before being submitted.
pub trait Validate {
    /// Validates this form data.
    ///
    /// # Errors
    ///
    /// With every invalid field, if any.
    fn validate(&self) -> Result<(), FieldErrors>;
}

impl Validate for () {
    fn validate(&self) -> Result<(), FieldErrors> {
        Ok(())
    }
}

/// Returns the `value` unless it's missing or blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Checks whether the provided `address` is a well-formed email address.
#[must_use]
pub fn is_email(address: &str) -> bool {
    /// Regular expression of a `local@domain.tld` address without
    /// whitespace.
    static REGEX: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
    });

    REGEX.is_match(address)
}

/// Checks whether the provided `url` is an absolute `http(s)` URL.
#[must_use]
pub fn is_url(url: &str) -> bool {
    /// Regular expression of an absolute `http(s)` URL with a host.
    static REGEX: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^https?://[^\s/?#]+\.[^\s/?#]+([/?#]\S*)?$")
            .expect("valid regex")
    });

    REGEX.is_match(url)
}

/// Checks whether the provided `number` looks like a phone number.
#[must_use]
pub fn is_phone(number: &str) -> bool {
    /// Regular expression of digits with an optional leading `+` and common
    /// separators, between 6 and 20 symbols long.
    static REGEX: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^\+?[\d\s\-().]{6,20}$").expect("valid regex")
    });

    REGEX.is_match(number)
}

#[cfg(test)]
mod spec {
    use super::{is_email, is_phone, is_url, FieldErrors};

    #[test]
    fn validates_formats() {
        assert!(is_email("ventas@inmobiliaria.pe"));
        assert!(!is_email("ventas@inmobiliaria"));
        assert!(!is_email("ventas inmobiliaria.pe"));

        assert!(is_url("https://inmobiliaria.pe"));
        assert!(is_url("http://www.inmobiliaria.pe/contacto?x=1"));
        assert!(!is_url("www.inmobiliaria.pe"));
        assert!(!is_url("ftp://inmobiliaria.pe"));

        assert!(is_phone("+51 987 654 321"));
        assert!(is_phone("(01) 555-1234"));
        assert!(!is_phone("llámame"));
    }

    #[test]
    fn keeps_first_message_per_field() {
        let mut errors = FieldErrors::new();
        _ = errors
            .required("name", " ")
            .check("name", false, "otro")
            .email("email", Some("nope"))
            .email("altEmail", None)
            .url("website", Some(""));

        assert_eq!(errors.get("name"), Some(FieldErrors::REQUIRED));
        assert_eq!(errors.get("email"), Some(FieldErrors::INVALID_EMAIL));
        assert_eq!(errors.get("altEmail"), None);
        assert_eq!(errors.get("website"), None);
        assert_eq!(
            errors.to_string(),
            "email: Correo electrónico inválido; \
             name: Este campo es obligatorio",
        );
        assert!(errors.into_result().is_err());
    }
}
