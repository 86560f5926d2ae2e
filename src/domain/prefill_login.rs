use std::sync::LazyLock;

use regex::Regex;

static QUERY_LOGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,15}$").expect("valid login pattern"));

/// A login value that may be echoed back into the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefillLogin(String);

impl PrefillLogin {
    /// Logins typed into the form are echoed back verbatim.
    pub fn from_form(login: String) -> Self {
        Self(login)
    }

    /// Logins from the query string are only trusted when they look like a
    /// login name. Anything else is ignored rather than rejected.
    pub fn from_query(login: &str) -> Option<Self> {
        QUERY_LOGIN
            .is_match(login)
            .then(|| Self(login.to_string()))
    }

    /// Form data wins unconditionally, the query is the fallback.
    pub fn resolve(form: Option<String>, query: Option<&str>) -> Option<Self> {
        match form {
            Some(login) => Some(Self::from_form(login)),
            None => query.and_then(Self::from_query),
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
