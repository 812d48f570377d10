use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::{AuthLogic, Session};
use crate::errors::AppResult;
use crate::gateway::Gateway;
use crate::models::user::Credentials;
use crate::ui::messages::{info, step, success, warning};

use super::{open_store, password_or_prompt};

/// Handle `register`, `login`, `logout` and `me`.
pub fn handle(cmd: &Commands, cfg: &Config, gw: &dyn Gateway) -> AppResult<()> {
    let mut pool = open_store(cfg)?;

    match cmd {
        Commands::Register {
            username,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            step(format!("Registering {}", username));
            let user = AuthLogic::register(gw, &mut pool, username, email, &password)?;
            success(format!("Account created: {} <{}>", user.username, user.email));
            info("Log in with `tramreport login`.");
        }

        Commands::Login { user, password } => {
            let credentials = Credentials {
                username_or_email: user.clone(),
                password: password_or_prompt(password)?,
            };
            step(format!("Logging in as {}", user));
            let session = AuthLogic::login(gw, &mut pool, &credentials)?;
            success(format!(
                "Logged in as {} <{}>",
                session.user.username, session.user.email
            ));
        }

        Commands::Logout => {
            let out = AuthLogic::logout(gw, &mut pool)?;
            if let Some(e) = out.remote_error {
                warning(format!("Server logout failed: {}", e));
            }
            success(format!("Session for {} removed.", out.user.username));
        }

        Commands::Me => {
            let session = Session::require(&mut pool)?;
            let user = AuthLogic::me(gw, &mut pool)?;
            println!("👤 {} <{}>", user.username, user.email);
            println!("   id:         {}", user.id);
            if let Some(created) = &user.created_at {
                println!("   created:    {}", created);
            }
            println!("   logged in:  {}", session.logged_in_at);
        }

        _ => {}
    }

    Ok(())
}
