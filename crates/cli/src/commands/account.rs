use std::io::Write;

use clap::Args;
use lapak_app::{
    auth::{Credentials, SignUp},
    domain::profiles::{ProfilesServiceError, data::NewProfile},
};
use tracing::debug;

use crate::{errors::CliError, shop::Shop};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email
    #[arg(long, env = "LAPAK_EMAIL")]
    email: String,

    /// Account password
    #[arg(long, env = "LAPAK_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Account email
    #[arg(long, env = "LAPAK_EMAIL")]
    email: String,

    /// Account password
    #[arg(long, env = "LAPAK_PASSWORD", hide_env_values = true)]
    password: String,

    /// Display name
    #[arg(long)]
    full_name: String,
}

pub(crate) async fn login(
    args: LoginArgs,
    shop: &mut Shop,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let session = shop
        .app()?
        .auth
        .sign_in(Credentials {
            email: args.email,
            password: args.password,
        })
        .await?;

    shop.save_session(Some(&session))?;

    let name = session
        .user
        .full_name()
        .or(session.user.email.as_deref())
        .unwrap_or("you");
    writeln!(out, "Signed in as {name}")?;

    Ok(())
}

pub(crate) async fn register(
    args: RegisterArgs,
    shop: &mut Shop,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let app = shop.app()?.clone();

    let user = app
        .auth
        .sign_up(SignUp {
            credentials: Credentials {
                email: args.email,
                password: args.password,
            },
            full_name: args.full_name.clone(),
        })
        .await?;

    let Some(session) = app.auth.current_session() else {
        writeln!(out, "Account created. Confirm your email, then run `lapak login`.")?;
        return Ok(());
    };

    shop.save_session(Some(&session))?;

    match app.profiles.create_profile(NewProfile::user(user.id, args.full_name)).await {
        Ok(_) | Err(ProfilesServiceError::AlreadyExists) => {}
        Err(error) => return Err(error.into()),
    }

    debug!(user = %user.id, "profile created");

    writeln!(out, "Account created. You are signed in.")?;

    Ok(())
}

pub(crate) async fn logout(shop: &mut Shop, out: &mut impl Write) -> Result<(), CliError> {
    shop.app()?.auth.sign_out().await?;
    shop.save_session(None)?;

    writeln!(out, "Signed out")?;

    Ok(())
}
