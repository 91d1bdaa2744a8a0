//! Session subcommands.

use std::io::Write;

use service::domain::user::session::Credentials;

use crate::{prompt::{Ask, Prompt}, session::Store, AsError, Context, Error};

use super::say;

/// Arguments of logging in.
#[derive(Clone, Debug, clap::Args)]
pub struct Login {
    /// Correo electrónico del usuario.
    pub email: String,
}

/// Logs in, asking for the password.
///
/// # Errors
///
/// If the credentials are rejected.
pub async fn login<St, I, O>(
    Login { email }: Login,
    ctx: &mut Context<St>,
    prompt: &mut Prompt<I, O>,
) -> Result<(), Error>
where
    St: Store,
    I: Ask,
    O: Write,
{
    let password = prompt
        .ask_secret("Contraseña")
        .map_err(AsError::into_error)?;
    let session = ctx.login(Credentials::new(email, password)).await?;
    let name = session.user.name.clone();
    let expires_at = session.expires_at();

    say!(prompt, "Bienvenido, {name}")?;
    if let Some(at) = expires_at {
        say!(prompt, "La sesión expira el {at}")?;
    }
    Ok(())
}

/// Logs out.
///
/// # Errors
///
/// If the session cannot be dropped.
pub fn logout<St, I, O>(
    ctx: &mut Context<St>,
    prompt: &mut Prompt<I, O>,
) -> Result<(), Error>
where
    St: Store,
    O: Write,
{
    ctx.logout()?;
    say!(prompt, "Sesión cerrada")
}

/// Prints the user of the current session.
///
/// # Errors
///
/// If not logged in.
pub fn whoami<St, I, O>(
    ctx: &Context<St>,
    prompt: &mut Prompt<I, O>,
) -> Result<(), Error>
where
    St: Store,
    O: Write,
{
    let user = &ctx.require_session()?.user;
    say!(prompt, "{} <{}>", user.name, user.email)?;
    if let Some(role) = &user.role {
        say!(prompt, "Rol: {role}")?;
    }
    if let Some(phone) = &user.phone {
        say!(prompt, "Teléfono: {phone}")?;
    }
    Ok(())
}

#[cfg(test)]
mod spec {
    use service::infra::Mock;

    use crate::{
        cli::{run, spec::output, Command},
        context::spec::context,
        prompt::spec::prompt,
    };

    use super::Login;

    #[tokio::test]
    async fn logs_in_with_prompted_password() {
        let mock = Mock::new();
        _ = mock.respond(
            "POST",
            "/api/auth/login",
            serde_json::json!({
                "token": "t0k3n",
                "user": {"id": 3, "name": "Luis", "email": "luis@correo.pe"},
            }),
        );
        let mut ctx = context(&mock, None);
        let mut prompt = prompt("secreta1\n", false);

        run(
            Command::Login(Login {
                email: "luis@correo.pe".into(),
            }),
            &mut ctx,
            &mut prompt,
        )
        .await
        .unwrap();

        assert_eq!(ctx.session().map(|s| s.user.id.get()), Some(3));
        let out = prompt.transcript();
        assert!(out.contains("Bienvenido, Luis"));
        assert_eq!(
            mock.calls()[0].body,
            Some(serde_json::json!({
                "email": "luis@correo.pe",
                "password": "secreta1",
            })),
        );
    }

    #[tokio::test]
    async fn shows_and_drops_session() {
        let mock = Mock::new();

        let out = output(&mock, Command::Whoami, "").await.unwrap();
        assert!(out.contains("Rosa Quispe <rosa@inmobiliaria.pe>"));

        let mut ctx = context(&mock, Some("abc"));
        let mut prompt = prompt("", false);
        run(Command::Logout, &mut ctx, &mut prompt).await.unwrap();
        assert!(ctx.session().is_none());

        let err = run(Command::Whoami, &mut ctx, &mut prompt)
            .await
            .unwrap_err();
        assert_eq!(err.code, "LOGIN_REQUIRED");
    }
}
