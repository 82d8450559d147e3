//! Account commands: login, register, logout, whoami and profile.

use std::io::Write;

use clap::Args;
use jiff::tz::TimeZone;
use tabled::builder::Builder;

use dacha::auth::{LoginForm, RegistrationForm};

use crate::{
    cli::{
        CliError,
        render::{price, table},
    },
    context::AppContext,
};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Phone number
    #[arg(long)]
    phone: String,

    /// Password
    #[arg(long, env = "DACHA_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Phone number, used as the login
    #[arg(long)]
    phone: String,

    /// Password
    #[arg(long, env = "DACHA_PASSWORD", hide_env_values = true)]
    password: String,

    /// Password confirmation
    #[arg(long)]
    confirm_password: String,

    /// Display name
    #[arg(long, default_value = "")]
    name: String,

    /// Email
    #[arg(long, default_value = "")]
    email: String,
}

pub(crate) async fn login(
    args: LoginArgs,
    context: &mut AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let user = context
        .auth
        .login(LoginForm {
            phone: args.phone,
            password: args.password,
        })
        .await?;

    writeln!(out, "Добро пожаловать, {}!", user.display_name())?;

    Ok(())
}

pub(crate) async fn register(
    args: RegisterArgs,
    context: &mut AppContext,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let user = context
        .auth
        .register(RegistrationForm {
            phone: args.phone,
            password: args.password,
            confirm_password: args.confirm_password,
            name: args.name,
            email: args.email,
        })
        .await?;

    writeln!(out, "Аккаунт создан. Добро пожаловать, {}!", user.display_name())?;

    Ok(())
}

pub(crate) async fn logout(context: &mut AppContext, out: &mut impl Write) -> Result<(), CliError> {
    context.auth.logout().await;

    writeln!(out, "Вы вышли из аккаунта")?;

    Ok(())
}

pub(crate) async fn whoami(context: &mut AppContext, out: &mut impl Write) -> Result<(), CliError> {
    match context.auth.refresh().await {
        Some(user) => {
            writeln!(out, "{} ({})", user.display_name(), user.username)?;
            if !user.email.is_empty() {
                writeln!(out, "{}", user.email)?;
            }
        }
        None => writeln!(out, "Вы не вошли в аккаунт")?,
    }

    Ok(())
}

pub(crate) async fn profile(context: &AppContext, out: &mut impl Write) -> Result<(), CliError> {
    let profile = context.api.profile().await?;

    if let Some(user) = &profile.user {
        writeln!(out, "{} ({})", user.display_name(), user.username)?;
    }

    if !profile.addresses.is_empty() {
        writeln!(out, "\nАдреса:")?;
        for address in &profile.addresses {
            let marker = if address.is_default { " (основной)" } else { "" };
            writeln!(out, "  • {}{marker}", address.address)?;
        }
    }

    writeln!(out, "\nИстория заказов")?;

    if profile.orders.is_empty() {
        writeln!(out, "У вас пока нет заказов")?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Заказ", "Дата", "Статус", "Состав", "Сумма"]);

    for order in &profile.orders {
        let created = order
            .created_at()
            .map(|timestamp| {
                timestamp
                    .to_zoned(TimeZone::system())
                    .strftime("%d.%m.%Y %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|| order.created_at.clone());

        let items = order
            .items()
            .iter()
            .map(|item| format!("{} × {}", item.title, item.quantity))
            .collect::<Vec<_>>()
            .join("\n");

        builder.push_record([
            format!("№{}", order.id),
            created,
            order.status.label().to_string(),
            items,
            price(order.total_price),
        ]);
    }

    writeln!(out, "{}", table(builder, 4..5))?;

    Ok(())
}
