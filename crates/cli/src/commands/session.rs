//! Sign in, sign out, and identity.

use kronos_client::Storefront;
use kronos_client::models::{LoginRequest, User};

use crate::error::CliError;

pub async fn login(app: &Storefront, email: String, password: String) -> Result<(), CliError> {
    let user = app
        .auth_store()
        .login(&LoginRequest::new(email, password))
        .await?;

    app.logs()
        .log_auth("Inicio de sesión", "Sesión iniciada desde la CLI", &user.email, true)
        .await;
    println!("Signed in as {}", describe(&user));
    Ok(())
}

pub async fn logout(app: &Storefront) {
    app.auth_store().logout().await;
    println!("Signed out");
}

pub async fn whoami(app: &Storefront) -> Result<(), CliError> {
    let user = signed_in(app).await?;
    println!("{}", describe(&user));
    if let Some(phone) = &user.phone {
        println!("  phone: {phone}");
    }
    println!("  registered: {}", user.registered_at);
    Ok(())
}

/// Restore the persisted session and return its user.
pub async fn signed_in(app: &Storefront) -> Result<User, CliError> {
    if !app.tokens().is_authenticated() {
        return Err(CliError::NotSignedIn);
    }
    app.auth_store().init().await;
    app.auth_store().user().ok_or(CliError::NotSignedIn)
}

fn describe(user: &User) -> String {
    format!("{} <{}> ({})", user.full_name(), user.email, user.role)
}
