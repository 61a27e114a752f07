// crates/admin-console/src/cli/auth.rs
// Login, logout, identity and dashboard commands

use super::print_json;
use admin_console::AdminConsole;
use admin_console::guard::{DASHBOARD_ROUTE, GuardDecision, LOGIN_ROUTE, check_route_with};
use anyhow::Result;
use dialoguer::{Input, Password};
use serde::Serialize;

/// Identity as stored locally; nothing here is checked against the server
#[derive(Serialize)]
struct Whoami {
    logged_in: bool,
    username: Option<String>,
    roles: Vec<String>,
    admin: bool,
}

pub async fn run_login(
    console: &AdminConsole,
    username: Option<String>,
    password: Option<String>,
    force: bool,
    json: bool,
) -> Result<()> {
    let decision = check_route_with(console.session().storage(), LOGIN_ROUTE);
    if !force && decision == GuardDecision::Redirect(DASHBOARD_ROUTE) {
        let who = console.session().username().unwrap_or_else(|| "unknown".into());
        println!("Already logged in as {}. Use --force to log in again.", who);
        return Ok(());
    }

    let username = match username {
        Some(u) => u,
        None => Input::<String>::new().with_prompt("Username").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let response = console.login(&username, &password).await?;
    if json {
        // Token stays in the state file
        print_json(&serde_json::json!({
            "username": response.username,
            "roles": response.roles,
        }))?;
    } else {
        println!("Logged in as {}", response.username);
        if !response.roles.is_empty() {
            println!("Roles: {}", response.roles.join(", "));
        }
    }
    Ok(())
}

pub async fn run_logout(console: &AdminConsole) -> Result<()> {
    console.logout().await;
    println!("Logged out");
    Ok(())
}

pub async fn run_whoami(console: &AdminConsole, json: bool) -> Result<()> {
    let session = console.session();
    let who = Whoami {
        logged_in: session.is_logged_in().await,
        username: session.username(),
        roles: session.roles().await,
        admin: session.is_admin().await,
    };

    if json {
        return print_json(&who);
    }
    if !who.logged_in {
        println!("Not logged in");
        return Ok(());
    }
    println!("Username: {}", who.username.as_deref().unwrap_or("(unknown)"));
    if who.roles.is_empty() {
        println!("Roles:    (none)");
    } else {
        println!("Roles:    {}", who.roles.join(", "));
    }
    Ok(())
}

pub async fn run_dashboard(console: &AdminConsole, json: bool) -> Result<()> {
    let decision = check_route_with(console.session().storage(), DASHBOARD_ROUTE);
    if let GuardDecision::Redirect(_) = decision {
        println!("Not logged in. Run `admin-console login` first.");
        return Ok(());
    }

    let dashboard = console.dashboard().await?;
    if json {
        return print_json(&dashboard);
    }
    println!("{}", dashboard.message);
    println!("Role: {}", dashboard.role);
    Ok(())
}
