use std::io;

use clap::Args;
use jam3a::{
    locale::Language,
    users::{Role, User},
};
use jam3a_app::domain::auth::{AuthServiceError, Credentials, Registration};
use tracing::warn;

use crate::cli::{Shell, chain, output_failed, render};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "JAM3A_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Full name
    #[arg(long)]
    name: String,

    /// Account email
    #[arg(long)]
    email: String,

    /// Saudi mobile number, e.g. 05XXXXXXXX
    #[arg(long)]
    phone: String,

    /// Account password
    #[arg(long, env = "JAM3A_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn login(
    args: LoginArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let credentials = Credentials {
        email: args.email,
        password: args.password,
    };

    let user = shell
        .app
        .auth
        .login(credentials)
        .await
        .or_else(|error| refused(error, shell, out, "failed to sign in"))?;

    greet(&user, shell.language, out)
}

pub(crate) async fn register(
    args: RegisterArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let registration = Registration {
        name: args.name,
        email: args.email,
        phone: args.phone,
        password: args.password,
    };

    let user = shell
        .app
        .auth
        .register(registration)
        .await
        .or_else(|error| refused(error, shell, out, "failed to register"))?;

    greet(&user, shell.language, out)
}

pub(crate) async fn logout(shell: &Shell, out: &mut impl io::Write) -> Result<(), String> {
    shell
        .app
        .auth
        .logout()
        .await
        .map_err(|error| format!("failed to sign out: {}", chain(&error)))?;

    let signed_out = match shell.language {
        Language::English => "Signed out.",
        Language::Arabic => "تم تسجيل الخروج.",
    };

    writeln!(out, "{signed_out}").map_err(output_failed)
}

pub(crate) async fn whoami(shell: &Shell, out: &mut impl io::Write) -> Result<(), String> {
    let user = match shell.app.auth.current_user().await {
        Ok(user) => user,
        Err(AuthServiceError::Api(error)) => {
            warn!(%error, "profile unavailable, using stored session");

            shell
                .app
                .session
                .user()
                .map_err(|error| format!("failed to read session: {}", chain(&error)))?
                .ok_or_else(|| "not signed in".to_string())?
        }
        Err(error) => return Err(format!("failed to load profile: {}", chain(&error))),
    };

    let roles = [(Role::Admin, "admin"), (Role::Seller, "seller")]
        .into_iter()
        .filter(|(role, _)| user.has_role(*role))
        .map(|(_, label)| label)
        .collect::<Vec<_>>();

    writeln!(out, "{} <{}>", user.display_name(), user.email).map_err(output_failed)?;

    if !roles.is_empty() {
        writeln!(out, "{}", roles.join(", ")).map_err(output_failed)?;
    }

    Ok(())
}

fn refused(
    error: AuthServiceError,
    shell: &Shell,
    out: &mut impl io::Write,
    context: &str,
) -> Result<User, String> {
    match error {
        AuthServiceError::Invalid(errors) => {
            render::write_field_errors(out, &errors, shell.language).map_err(output_failed)?;
            Err(format!("{context}: form is invalid"))
        }
        AuthServiceError::InvalidCredentials => {
            let message = match shell.language {
                Language::English => "Invalid email or password.",
                Language::Arabic => "البريد الإلكتروني أو كلمة المرور غير صحيحة.",
            };

            writeln!(out, "{message}").map_err(output_failed)?;
            Err(format!("{context}: {error}"))
        }
        other => Err(format!("{context}: {}", chain(&other))),
    }
}

fn greet(user: &User, language: Language, out: &mut impl io::Write) -> Result<(), String> {
    let welcome = match language {
        Language::English => "Welcome,",
        Language::Arabic => "مرحباً،",
    };

    writeln!(out, "{welcome} {}", user.display_name()).map_err(output_failed)
}
