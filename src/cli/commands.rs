//! CLI command implementations
//!
//! Each command receives the session store and API client it works with;
//! nothing here reaches for global state.

use anyhow::Result;
use dialoguer::Password;
use std::fs;
use std::path::Path;

use crate::api::ApiClient;
use crate::auth::{DetailsForm, LoginRequest, RegisterForm, SessionStore, UserUpdate};
use crate::cli::{
    error, info, print_profile_detail, print_session_table, spinner, success, warn,
    watch_session, DetailsArgs, OutputFormat, SessionStatus,
};
use crate::config::loader::{default_config_content, CONFIG_FILENAME};
use crate::error::Error;

/// Initialize a new storefront.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    fs::write(config_path, default_config_content())?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Edit the configuration file and run 'storefront login --email <email>' to sign in");

    Ok(())
}

fn password_or_prompt(password: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

/// Sign in and cache the session
pub async fn login(
    store: &SessionStore,
    api: &ApiClient,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = password_or_prompt(password, false)?;
    let credentials = LoginRequest::new(email, &password)?;
    let _banner = watch_session(store);

    let progress = spinner("Logging in...");
    let result = api.login(&credentials).await;
    progress.finish_and_clear();

    match result {
        Ok(response) => {
            store.login(&response.token, &response.user);
            success(&format!("Welcome back, {}", response.user.name));
            Ok(())
        }
        Err(e) => {
            error(&format!("Login failed: {}", e));
            Err(e.into())
        }
    }
}

/// Create an account and sign in with the returned session
pub async fn register(
    store: &SessionStore,
    api: &ApiClient,
    name: &str,
    email: &str,
    password: Option<String>,
    details: DetailsArgs,
) -> Result<()> {
    let password = password_or_prompt(password, true)?;
    let form = RegisterForm {
        name: name.to_string(),
        email: email.to_string(),
        password,
        details: details.into(),
    };

    let request = match form.into_request() {
        Ok(request) => request,
        Err(e) => {
            error(&e.to_string());
            return Err(e.into());
        }
    };
    let _banner = watch_session(store);

    let progress = spinner("Registering...");
    let result = api.register(&request).await;
    progress.finish_and_clear();

    match result {
        Ok(response) => {
            store.login(&response.token, &response.user);
            success(&format!("Account created for {}", response.user.email));
            Ok(())
        }
        Err(e) => {
            error(&format!("Registration failed: {}", e));
            Err(e.into())
        }
    }
}

/// Sign out
pub async fn logout(store: &SessionStore) -> Result<()> {
    let _banner = watch_session(store);
    store.logout();
    success("Logged out");
    Ok(())
}

/// Show the cached session
pub async fn status(store: &SessionStore, format: OutputFormat) -> Result<()> {
    let status = SessionStatus::read(store);

    match format {
        OutputFormat::Table => {
            print_session_table(&status);
            if !status.authenticated && status.user.is_some() {
                info("Session has expired. Run 'storefront login' to sign in again");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&status)?);
        }
    }

    Ok(())
}

/// The active session, or an error telling the user to sign in
fn require_session(store: &SessionStore) -> crate::error::Result<crate::auth::Session> {
    match store.session() {
        Some(session) if store.is_authenticated() => Ok(session),
        _ => Err(Error::NotAuthenticated),
    }
}

/// Fetch the profile from the server and refresh the cached user
pub async fn profile_show(store: &SessionStore, api: &ApiClient, format: OutputFormat) -> Result<()> {
    let session = match require_session(store) {
        Ok(session) => session,
        Err(e) => {
            error(&e.to_string());
            return Err(e.into());
        }
    };

    let _banner = watch_session(store);
    let progress = spinner("Fetching profile...");
    let result = api.user_details(&session.user.id, &session.token).await;
    progress.finish_and_clear();

    let user = match result {
        Ok(user) => user,
        Err(e) => {
            error(&format!("Failed to fetch profile: {}", e));
            return Err(e.into());
        }
    };

    store.update_user(&UserUpdate::from(user.clone()));

    match format {
        OutputFormat::Table => print_profile_detail(&user),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&user)?),
    }

    Ok(())
}

/// Send new profile details and merge the result into the cached user
pub async fn profile_update(store: &SessionStore, api: &ApiClient, details: DetailsArgs) -> Result<()> {
    let session = match require_session(store) {
        Ok(session) => session,
        Err(e) => {
            error(&e.to_string());
            return Err(e.into());
        }
    };

    let Some(details) = DetailsForm::from(details).into_details()? else {
        warn("Nothing to update. Pass at least one of --address, --city, --pincode, --country, --phone");
        return Ok(());
    };
    let _banner = watch_session(store);

    let progress = spinner("Saving profile...");
    let result = api
        .update_profile(&session.user.id, &session.token, &details)
        .await;
    progress.finish_and_clear();

    match result {
        Ok(user) => {
            store.update_user(&UserUpdate::from(user));
            success("Profile updated");
            Ok(())
        }
        Err(e) => {
            error(&format!("Failed to update profile: {}", e));
            Err(e.into())
        }
    }
}
