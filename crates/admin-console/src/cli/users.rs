// crates/admin-console/src/cli/users.rs
// User and role administration commands

use super::{UserAction, print_json};
use admin_console::AdminConsole;
use admin_console::validation::{NewUserForm, UserChanges};
use admin_types::{RoleDto, UserDto};
use anyhow::Result;
use dialoguer::{Confirm, Password};

pub async fn run_users(console: &AdminConsole, action: UserAction, json: bool) -> Result<()> {
    match action {
        UserAction::List => {
            let users = console.list_users().await?;
            if json {
                return print_json(&users);
            }
            print_user_table(&users);
        }
        UserAction::Get { id } => {
            let user = console.get_user(id).await?;
            if json {
                return print_json(&user);
            }
            print_user(&user);
        }
        UserAction::Create {
            username,
            email,
            roles,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()?,
            };
            let form = NewUserForm {
                username,
                email,
                password,
                roles,
            };
            console.create_user(&form).await?;
            println!("User '{}' created", form.username.trim());
        }
        UserAction::Update {
            id,
            username,
            email,
            roles,
            reset_password,
        } => {
            let password = if reset_password {
                Some(
                    Password::new()
                        .with_prompt("New password")
                        .with_confirmation("Confirm password", "Passwords do not match")
                        .interact()?,
                )
            } else {
                None
            };
            let changes = UserChanges {
                username,
                email,
                password,
                roles: (!roles.is_empty()).then_some(roles),
            };
            if changes.is_empty() {
                println!("Nothing to update");
                return Ok(());
            }
            console.update_user(id, &changes).await?;
            println!("User {} updated", id);
        }
        UserAction::Delete { id, yes } => {
            if !yes
                && !Confirm::new()
                    .with_prompt(format!("Delete user {}?", id))
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }
            let user = console.delete_user(id).await?;
            println!("User '{}' deleted", user.username);
        }
    }
    Ok(())
}

pub async fn run_roles(console: &AdminConsole, json: bool) -> Result<()> {
    let roles = console.list_roles().await?;
    if json {
        return print_json(&roles);
    }
    print_role_table(&roles);
    Ok(())
}

fn print_user_table(users: &[UserDto]) {
    if users.is_empty() {
        println!("No users");
        return;
    }
    let name_width = users.iter().map(|u| u.username.len()).max().unwrap_or(0).max(8);
    let email_width = users.iter().map(|u| u.email.len()).max().unwrap_or(0).max(5);
    println!(
        "{:>6}  {:<nw$}  {:<ew$}  ROLES",
        "ID",
        "USERNAME",
        "EMAIL",
        nw = name_width,
        ew = email_width
    );
    for user in users {
        println!(
            "{:>6}  {:<nw$}  {:<ew$}  {}",
            user.id,
            user.username,
            user.email,
            user.roles.join(", "),
            nw = name_width,
            ew = email_width
        );
    }
}

fn print_user(user: &UserDto) {
    println!("ID:       {}", user.id);
    println!("Username: {}", user.username);
    println!("Email:    {}", user.email);
    println!("Roles:    {}", user.roles.join(", "));
    println!("Created:  {}", user.created_at);
    if let Some(updated) = &user.updated_at {
        println!("Updated:  {}", updated);
    }
}

fn print_role_table(roles: &[RoleDto]) {
    if roles.is_empty() {
        println!("No roles");
        return;
    }
    let name_width = roles.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);
    for role in roles {
        println!(
            "{:>6}  {:<nw$}  {}",
            role.id,
            role.name,
            role.description.as_deref().unwrap_or(""),
            nw = name_width
        );
    }
}
