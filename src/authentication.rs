use argon2::{Argon2, PasswordHash, PasswordVerifier};
use secrecy::{ExposeSecret, Secret};

use crate::{
    domain::OperatorRecord, repository::OperatorRepository,
    telemetry::spawn_blocking_with_tracing, Result,
};

/// Verified in place of a missing hash so that unknown logins cost as much
/// as known ones.
const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$\
gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

#[derive(Debug)]
pub struct Credentials {
    pub login: String,
    pub password: Option<Secret<String>>,
}

/// Result of checking credentials. Only `Authenticated` lets the operator in.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(OperatorRecord),
    /// The account exists but is disabled, whatever the password was.
    Disabled,
    /// Unknown login, missing hash or wrong password.
    InvalidCredentials,
}

/// An absent operator is never considered disabled.
pub fn operator_is_disabled(operator: Option<&OperatorRecord>) -> bool {
    operator.is_some_and(|operator| operator.disabled)
}

#[tracing::instrument(
    name = "Validate credentials",
    skip(credentials, repository),
    fields(login = %credentials.login)
)]
pub async fn validate_credentials(
    credentials: Credentials,
    repository: &dyn OperatorRepository,
) -> Result<LoginOutcome> {
    let operator = repository.operator_by_login(&credentials.login).await?;

    let stored_password_hash = operator
        .as_ref()
        .and_then(OperatorRecord::stored_password_hash);
    let password_matches = match credentials.password {
        Some(password) => {
            let verified = verify_password_hash(
                credentials.login.clone(),
                password,
                stored_password_hash
                    .unwrap_or(DUMMY_PASSWORD_HASH)
                    .to_string(),
            )
            .await?;
            verified && stored_password_hash.is_some()
        }
        None => false,
    };

    let Some(operator) = operator else {
        tracing::debug!("unknown operator");
        return Ok(LoginOutcome::InvalidCredentials);
    };

    let disabled = operator_is_disabled(Some(&operator));
    if password_matches && !disabled {
        Ok(LoginOutcome::Authenticated(operator))
    } else if disabled {
        tracing::info!("login attempt on a disabled account");
        Ok(LoginOutcome::Disabled)
    } else {
        Ok(LoginOutcome::InvalidCredentials)
    }
}

/// Checks `password_candidate` against an argon2 PHC string off the async
/// runtime.
pub async fn verify_password_hash(
    login: String,
    password_candidate: Secret<String>,
    expected_password_hash: String,
) -> Result<bool> {
    let verified = spawn_blocking_with_tracing(move || {
        check_password_hash(&login, &password_candidate, &expected_password_hash)
    })
    .await?;
    Ok(verified)
}

fn check_password_hash(
    login: &str,
    password_candidate: &Secret<String>,
    expected_password_hash: &str,
) -> bool {
    let expected_password_hash = match PasswordHash::new(expected_password_hash) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!(login, error = %e, "stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .is_ok()
}
