use std::fmt;

/// Minimum accepted registration password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Identity of the authenticated user, 1:1 with the live credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
}

/// Local registration-form failure. No network call is issued for these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    PasswordTooShort,
    PasswordMismatch,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PasswordTooShort => {
                write!(f, "Password must be at least {PASSWORD_MIN_LEN} characters")
            }
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl std::error::Error for RegistrationError {}

/// Validates registration input before any busy/network activity.
pub fn validate_registration(
    password: &str,
    confirmation: &str,
) -> Result<(), RegistrationError> {
    if password.len() < PASSWORD_MIN_LEN {
        return Err(RegistrationError::PasswordTooShort);
    }
    if password != confirmation {
        return Err(RegistrationError::PasswordMismatch);
    }
    Ok(())
}

/// Auth attempt state: identity, in-flight flag, and last error.
///
/// Pure state container; the session driver performs the gateway call
/// between `begin_attempt` and `complete`/`fail`. One attempt may be in
/// flight at a time — `begin_attempt` refuses re-entry while busy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuthManager {
    user: Option<UserIdentity>,
    busy: bool,
    error: Option<String>,
}

impl AuthManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starts a login/register cycle; clears any prior error.
    ///
    /// Returns false (and changes nothing) when an attempt is already in
    /// flight: re-invocation while busy is a caller no-op, not an error.
    pub fn begin_attempt(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.error = None;
        true
    }

    /// Finishes a successful attempt with the authenticated identity.
    pub fn complete(&mut self, user: UserIdentity) {
        self.user = Some(user);
        self.busy = false;
        self.error = None;
    }

    /// Finishes a failed attempt; identity is left untouched.
    pub fn fail(&mut self, message: String) {
        self.busy = false;
        self.error = Some(message);
    }

    /// Clears identity and error on logout. Synchronous, cannot fail.
    pub fn reset(&mut self) {
        self.user = None;
        self.busy = false;
        self.error = None;
    }
}
