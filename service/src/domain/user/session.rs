//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::DateTimeOf;
use derive_more::{AsRef, Debug, Display, From};
use secrecy::{ExposeSecret as _, SecretBox};
use serde::{Deserialize, Serialize};

use crate::domain::{user::Password, FieldErrors, User, Validate};

/// Authenticated session of a [`User`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    /// [`Token`] authorizing requests of this [`Session`].
    pub token: Token,

    /// Profile of the [`User`] this [`Session`] belongs to.
    pub user: User,
}

impl Session {
    /// Returns the [`DateTime`] when this [`Session`] expires, if its
    /// [`Token`] declares one.
    #[must_use]
    pub fn expires_at(&self) -> Option<ExpirationDateTime> {
        self.token.expires_at()
    }

    /// Checks whether this [`Session`] has expired at the provided moment.
    ///
    /// A [`Session`] without a known expiration never expires on the client
    /// side.
    #[must_use]
    pub fn is_expired_at(&self, now: ExpirationDateTime) -> bool {
        self.expires_at().is_some_and(|at| at <= now)
    }

    /// Checks whether this [`Session`] has already expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(DateTimeOf::now())
    }
}

/// Bearer access token of a [`Session`].
#[derive(AsRef, Clone, Deserialize, Display, Debug, From, Serialize)]
#[as_ref(str)]
#[debug("Token(*)")]
#[serde(transparent)]
pub struct Token(String);

/// Claims of a [`Token`] the client is interested in.
#[derive(Deserialize)]
struct Claims {
    /// Expiration Unix timestamp.
    #[serde(default)]
    exp: Option<i64>,
}

impl Token {
    /// Reads the expiration of this [`Token`] from its `exp` claim.
    ///
    /// The signature is not verified: the backend stays the only judge of a
    /// [`Token`] validity.
    #[must_use]
    pub fn expires_at(&self) -> Option<ExpirationDateTime> {
        let mut validation = jsonwebtoken::Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = jsonwebtoken::decode::<Claims>(
            &self.0,
            &jsonwebtoken::DecodingKey::from_secret(&[]),
            &validation,
        )
        .ok()?
        .claims;
        DateTimeOf::from_unix_timestamp(claims.exp?)
    }
}

/// Credentials of a [`User`] to log in with.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    /// Email address of the [`User`].
    pub email: String,

    /// [`Password`] of the [`User`].
    #[serde(serialize_with = "super::expose_password")]
    pub password: SecretBox<Password>,
}

impl Credentials {
    /// Creates new [`Credentials`] out of the provided plain values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_owned(),
            password: SecretBox::new(Box::new(Password::from(password.into()))),
        }
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors
            .required("email", &self.email)
            .email("email", Some(&self.email))
            .check(
                "password",
                !self.password.expose_secret().is_empty(),
                FieldErrors::REQUIRED,
            );
        errors.into_result()
    }
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, Expiration)>;

/// Marker type describing a [`Session`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

#[cfg(test)]
pub(crate) mod spec {
    use common::DateTimeOf;
    use jsonwebtoken::{EncodingKey, Header};

    use super::{Session, Token};

    /// Encodes a [`Token`] expiring at the provided Unix timestamp.
    pub(crate) fn token(exp: i64) -> Token {
        jsonwebtoken::encode(
            &Header::default(),
            &serde_json::json!({"sub": "1", "exp": exp}),
            &EncodingKey::from_secret(b"backend-secret"),
        )
        .unwrap()
        .into()
    }

    fn session(token: Token) -> Session {
        Session {
            token,
            user: serde_json::from_str(
                r#"{"id": 1, "name": "Ana", "email": "ana@correo.pe"}"#,
            )
            .unwrap(),
        }
    }

    #[test]
    fn reads_expiration_without_key() {
        let session = session(token(1_700_000_000));

        assert_eq!(
            session.expires_at().map(|at| at.unix_timestamp()),
            Some(1_700_000_000),
        );
        assert!(session.is_expired());
        assert!(!session.is_expired_at(
            DateTimeOf::from_unix_timestamp(1_600_000_000).unwrap(),
        ));
    }

    #[test]
    fn opaque_token_never_expires() {
        let session = session(Token::from("opaque".to_owned()));

        assert!(session.expires_at().is_none());
        assert!(!session.is_expired());
    }

    #[test]
    fn stores_as_token_and_user() {
        let json = serde_json::to_value(session("abc".to_owned().into()))
            .unwrap();

        assert_eq!(json["token"], "abc");
        assert_eq!(json["user"]["email"], "ana@correo.pe");
        assert!(!format!("{:?}", Token::from("abc".to_owned())).contains("abc"));
    }
}
