//! Interactive sign-up demo
//!
//! Drives the verification flow from stdin, one trigger per line, and
//! prints the view directives each transition emits. Codes are "delivered"
//! to the terminal.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use oh_core::domain::entities::{AccountRole, Channel};
use oh_core::errors::FlowError;
use oh_core::services::verification::{
    RegistrationForm, VerificationFlowConfig, VerificationFlowController, ViewDirective,
};
use oh_infra::accounts::InMemoryAccountRegistry;
use oh_infra::delivery::ConsoleCodeDelivery;
use oh_infra::settings::load_config;
use oh_infra::telemetry::init_tracing;

const HELP: &str = "\
commands:
  signup | signin                      switch panel
  role <citizen|authority|admin>       pick a role
  submit [name=..] [email=..] [phone=..] password=.. [robot]
  verify <email|phone> <code>          check a delivered code
  finalize                             create the account
  back                                 abandon the sign-up
  status | accounts | help | quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    SignUp,
    SignIn,
    Role(AccountRole),
    Submit(RegistrationForm),
    Verify(Channel, String),
    Finalize,
    Back,
    Status,
    Accounts,
    Help,
    Quit,
}

fn parse_submit<'a>(args: impl Iterator<Item = &'a str>) -> Result<RegistrationForm, String> {
    let mut form = RegistrationForm::default();
    for arg in args {
        match arg.split_once('=') {
            Some(("name", value)) => form.display_name = Some(value.to_string()),
            Some(("email", value)) => form.email = Some(value.to_string()),
            Some(("phone", value)) => form.phone = Some(value.to_string()),
            Some(("password", value)) => form.password = value.to_string(),
            None if arg == "robot" => form.robot_attested = true,
            _ => return Err(format!("unknown submit field '{}'", arg)),
        }
    }
    Ok(form)
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(None);
    };

    let command = match name.to_lowercase().as_str() {
        "signup" => Command::SignUp,
        "signin" => Command::SignIn,
        "role" => {
            let role = parts.next().ok_or("usage: role <citizen|authority|admin>")?;
            Command::Role(role.parse()?)
        }
        "submit" => Command::Submit(parse_submit(parts)?),
        "verify" => {
            let channel = parts.next().ok_or("usage: verify <email|phone> <code>")?;
            let code = parts.next().unwrap_or_default();
            Command::Verify(channel.parse()?, code.to_string())
        }
        "finalize" => Command::Finalize,
        "back" => Command::Back,
        "status" => Command::Status,
        "accounts" => Command::Accounts,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(Some(command))
}

fn print_directives(out: &mut impl Write, directives: &[ViewDirective]) -> Result<()> {
    for directive in directives {
        writeln!(out, "  -> {}", serde_json::to_string(directive)?)?;
    }
    Ok(())
}

fn print_error(out: &mut impl Write, error: &FlowError) -> Result<()> {
    match ViewDirective::for_error(error) {
        Some(directive) => print_directives(out, &[directive]),
        None => {
            writeln!(out, "  !! ignored ({})", error.error_code())?;
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let config = load_config().context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialise logging")?;

    let delivery = Arc::new(ConsoleCodeDelivery::new());
    let registry = Arc::new(InMemoryAccountRegistry::with_cost(config.verification.bcrypt_cost));
    let mut controller = VerificationFlowController::new(
        delivery,
        registry.clone(),
        VerificationFlowConfig::from(&config.verification),
    );

    tracing::info!(environment = %config.environment, "Sign-up demo started");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", HELP)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "  !! {}", message)?;
                continue;
            }
        };

        match command {
            Command::SignUp => print_directives(&mut out, &controller.show_sign_up())?,
            Command::SignIn => print_directives(&mut out, &controller.show_sign_in())?,
            Command::Role(role) => print_directives(&mut out, &controller.select_role(role))?,
            Command::Submit(form) => match controller.submit_registration(form) {
                Ok(directives) => print_directives(&mut out, &directives)?,
                Err(error) => print_error(&mut out, &error)?,
            },
            Command::Verify(channel, code) => match controller.verify_channel(channel, &code) {
                Ok(directives) => print_directives(&mut out, &directives)?,
                Err(error) => print_error(&mut out, &error)?,
            },
            Command::Finalize => match controller.finalize_account() {
                Ok(result) => {
                    writeln!(out, "  account created: {}", result.account_id)?;
                    print_directives(&mut out, &result.directives)?;
                }
                Err(error) => print_error(&mut out, &error)?,
            },
            Command::Back => print_directives(&mut out, &controller.reset())?,
            Command::Status => writeln!(out, "  {:?}", controller.session())?,
            Command::Accounts => writeln!(out, "  {} account(s) registered", registry.len())?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
