//! Hook fired when the backend rejects the cached credentials.

use tracing::warn;

/// Sends the user back to the login entry point.
///
/// Called exactly once per 401 response, after the session has been
/// cleared. A GUI front end would navigate; the CLI only reports it.
pub trait LoginRedirect: Send + Sync {
    /// Navigate to `login_path`.
    fn redirect_to_login(&self, login_path: &str);
}

/// Default redirect that only records the event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRedirect;

impl LoginRedirect for LogRedirect {
    fn redirect_to_login(&self, login_path: &str) {
        warn!(login_path, "Session expired; log in again");
    }
}

impl<F> LoginRedirect for F
where
    F: Fn(&str) + Send + Sync,
{
    fn redirect_to_login(&self, login_path: &str) {
        self(login_path);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_closure_redirect_receives_path() {
        let seen = Mutex::new(Vec::new());
        let redirect = |path: &str| {
            if let Ok(mut seen) = seen.lock() {
                seen.push(path.to_owned());
            }
        };
        redirect.redirect_to_login("/login");
        LogRedirect.redirect_to_login("/login");

        assert_eq!(*seen.lock().expect("lock"), vec!["/login".to_string()]);
    }
}
