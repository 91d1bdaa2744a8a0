//! [`User`] definitions.

pub mod session;

use derive_more::{Debug, From};
use secrecy::{zeroize::Zeroize, CloneableSecret, ExposeSecret as _, SecretBox};
use serde::{Deserialize, Serialize, Serializer};

use super::{define_id, Editable, FieldErrors, Labels, Resource, Validate};

pub use self::session::Session;

/// Platform user, as exposed by the authentication endpoints.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// Full name of this [`User`].
    pub name: String,

    /// Email address of this [`User`], used to log in.
    pub email: String,

    /// Contact phone of this [`User`].
    #[serde(default)]
    pub phone: Option<String>,

    /// URL of this [`User`] photo.
    #[serde(default)]
    pub photo_url: Option<String>,

    /// Role of this [`User`] (`"ADMIN"`, `"AGENT"`).
    #[serde(default)]
    pub role: Option<String>,
}

define_id! {
    #[doc = "ID of a [`User`]."]
}

impl Resource for User {
    type Id = Id;

    const PATH: &'static str = "auth/users";
    const LABELS: Labels = Labels {
        plural: "usuarios",
        singular: "el usuario",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for User {
    type Draft = ProfileDraft;
}

/// Profile data of a [`User`] to be updated.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    /// Full name of the [`User`].
    pub name: String,

    /// Email address of the [`User`].
    pub email: String,

    /// Contact phone of the [`User`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// URL of the [`User`] photo, as returned by a photo upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<&User> for ProfileDraft {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            photo_url: user.photo_url.clone(),
        }
    }
}

impl Validate for ProfileDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors
            .required("name", &self.name)
            .required("email", &self.email)
            .email("email", Some(&self.email))
            .phone("phone", self.phone.as_deref());
        errors.into_result()
    }
}

/// Password of a [`User`].
#[derive(Clone, Debug, Eq, From, PartialEq)]
#[debug("Password(*)")]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Minimum length of a new [`Password`].
    pub const MIN_LEN: usize = 6;

    /// Maximum length of a new [`Password`].
    pub const MAX_LEN: usize = 128;

    /// Checks whether this [`Password`] is acceptable as a new one.
    #[must_use]
    pub fn is_acceptable(&self) -> bool {
        (Self::MIN_LEN..=Self::MAX_LEN).contains(&self.0.chars().count())
    }

    /// Indicates whether this [`Password`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the plain text of this [`Password`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Serializes a secret [`Password`] as a plain string.
fn expose_password<S: Serializer>(
    password: &SecretBox<Password>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret().as_str())
}

/// Password change form, as filled by a [`User`].
#[derive(Clone, Debug)]
pub struct PasswordForm {
    /// Current [`Password`] of the [`User`].
    pub current: SecretBox<Password>,

    /// New [`Password`] of the [`User`].
    pub new: SecretBox<Password>,

    /// Repetition of the new [`Password`].
    pub confirmation: SecretBox<Password>,
}

impl PasswordForm {
    /// Message of a mismatching confirmation.
    pub const MISMATCH: &'static str = "Las contraseñas no coinciden";

    /// Creates a new [`PasswordForm`] out of the provided plain values.
    #[must_use]
    pub fn new(
        current: impl Into<String>,
        new: impl Into<String>,
        confirmation: impl Into<String>,
    ) -> Self {
        let secret =
            |s: String| SecretBox::new(Box::new(Password::from(s)));
        Self {
            current: secret(current.into()),
            new: secret(new.into()),
            confirmation: secret(confirmation.into()),
        }
    }

    /// Validates this [`PasswordForm`], converting it into a
    /// [`PasswordChange`] request.
    ///
    /// # Errors
    ///
    /// With every invalid field, if any.
    pub fn into_change(self) -> Result<PasswordChange, FieldErrors> {
        self.validate()?;
        Ok(PasswordChange {
            current_password: self.current,
            new_password: self.new,
        })
    }
}

impl Validate for PasswordForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let (current, new, confirmation) = (
            self.current.expose_secret(),
            self.new.expose_secret(),
            self.confirmation.expose_secret(),
        );

        let mut errors = FieldErrors::new();
        _ = errors
            .check(
                "currentPassword",
                !current.is_empty(),
                "Ingrese su contraseña actual",
            )
            .check(
                "newPassword",
                new.is_acceptable(),
                "La contraseña debe tener entre 6 y 128 caracteres",
            )
            .check(
                "newPassword",
                current != new,
                "La nueva contraseña debe ser distinta de la actual",
            )
            .check("confirmPassword", new == confirmation, Self::MISMATCH);
        errors.into_result()
    }
}

/// Validated request to change a [`User`]'s password.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    /// Current [`Password`] of the [`User`].
    #[serde(serialize_with = "expose_password")]
    current_password: SecretBox<Password>,

    /// New [`Password`] of the [`User`].
    #[serde(serialize_with = "expose_password")]
    new_password: SecretBox<Password>,
}
