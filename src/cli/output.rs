//! CLI output formatting utilities

use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

use crate::auth::{SessionEvent, SessionStore, Subscription, User};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Spinner shown while waiting on the remote API
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Keep a one-line session banner in sync for as long as the subscription lives
pub fn watch_session(store: &SessionStore) -> Subscription {
    let observer = store.clone();
    store.subscribe(move |event| print_session_banner(event, &observer))
}

fn print_session_banner(event: SessionEvent, store: &SessionStore) {
    tracing::debug!("Session changed: {}", event);
    match store.session() {
        Some(session) => println!(
            "{} Signed in as {} <{}>",
            "●".green(),
            session.user.name.bold(),
            session.user.email
        ),
        None => println!("{} Signed out", "○".red()),
    }
}

/// Snapshot of the session for display
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub authenticated: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: Option<User>,
}

impl SessionStatus {
    pub fn read(store: &SessionStore) -> Self {
        Self {
            authenticated: store.is_authenticated(),
            expires_at: store.expires_at(),
            user: store.get_user(),
        }
    }
}

/// Print the session as a table
pub fn print_session_table(status: &SessionStatus) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Field").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let (state, state_color) = if status.authenticated {
        ("signed in", Color::Green)
    } else if status.user.is_some() {
        ("expired", Color::Yellow)
    } else {
        ("signed out", Color::Red)
    };
    table.add_row(vec![Cell::new("Status"), Cell::new(state).fg(state_color)]);

    let expires = status
        .expires_at
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string());
    table.add_row(vec![Cell::new("Expires"), Cell::new(expires)]);

    if let Some(user) = &status.user {
        table.add_row(vec![Cell::new("Name"), Cell::new(&user.name)]);
        table.add_row(vec![Cell::new("Email"), Cell::new(&user.email)]);
        table.add_row(vec![
            Cell::new("Admin"),
            Cell::new(if user.is_admin { "yes" } else { "no" }),
        ]);
        table.add_row(vec![
            Cell::new("Profile"),
            Cell::new(if user.has_complete_profile() {
                "complete"
            } else {
                "incomplete"
            }),
        ]);
    }

    println!("{table}");
}

/// Print a user's profile
pub fn print_profile_detail(user: &User) {
    println!("{}", "Profile".bold().underline());
    println!();
    println!("  {} {}", "Name:".bold(), user.name);
    println!("  {} {}", "Email:".bold(), user.email.cyan());

    if let Some(created) = user.created_at {
        println!(
            "  {} {}",
            "Member since:".bold(),
            created.format("%Y-%m-%d")
        );
    }

    let Some(details) = &user.profile_details else {
        println!();
        info("No profile details yet. Add them with 'storefront profile update'");
        return;
    };

    println!();
    println!("  {}", "Details:".bold());
    if let Some(address) = &details.address {
        println!("    {} {}", "Address:".bold(), address);
    }
    if let Some(city) = &details.city {
        println!("    {} {}", "City:".bold(), city);
    }
    if let Some(pincode) = details.postal_code {
        println!("    {} {}", "Pincode:".bold(), pincode);
    }
    if let Some(country) = &details.country {
        println!("    {} {}", "Country:".bold(), country);
    }
    if let Some(phone) = &details.phone {
        println!("    {} {}", "Phone:".bold(), phone);
    }
}
