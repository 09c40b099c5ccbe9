//! Terminal session state.
//!
//! A session moves through risk acceptance, login and (optionally) admin
//! unlock. Each step is an explicit transition on [`Session`]; nothing is
//! held in process-wide flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AdminCredentials;
use crate::error::{TerminalError, TerminalResult};

/// Identity supplied at login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub mobile: String,
}

/// One user's view of the terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub profile: UserProfile,
    pub login_time: Option<DateTime<Utc>>,
    pub accepted_risk: bool,
    pub authenticated: bool,
    pub admin_unlocked: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acknowledge the risk disclosure. Idempotent.
    pub fn accept_risk(&mut self) {
        self.accepted_risk = true;
    }

    /// Sign in with the given profile.
    pub fn login(&mut self, profile: UserProfile) -> TerminalResult<()> {
        if !self.accepted_risk {
            return Err(TerminalError::transition("log in", "the risk disclosure is unaccepted"));
        }
        if self.authenticated {
            return Err(TerminalError::transition("log in", "already logged in"));
        }
        if profile.email.trim().is_empty() {
            return Err(TerminalError::validation("email is required"));
        }

        info!(email = %profile.email, "Session authenticated");
        self.profile = profile;
        self.login_time = Some(Utc::now());
        self.authenticated = true;
        Ok(())
    }

    /// True when the signed-in email is the configured operator's.
    pub fn is_admin(&self, admin: Option<&AdminCredentials>) -> bool {
        match admin {
            Some(creds) => {
                self.authenticated && self.profile.email.eq_ignore_ascii_case(creds.email.trim())
            }
            None => false,
        }
    }

    /// Unlock the admin panel with the operator password.
    pub fn unlock_admin(
        &mut self,
        password: &str,
        admin: Option<&AdminCredentials>,
    ) -> TerminalResult<()> {
        let creds = admin
            .ok_or_else(|| TerminalError::Config("no admin credentials configured".to_string()))?;

        if !self.authenticated {
            return Err(TerminalError::transition("unlock admin", "logged out"));
        }
        if !self.is_admin(Some(creds)) {
            warn!(email = %self.profile.email, "Admin unlock attempted by non-operator");
            return Err(TerminalError::Unauthorized("not an operator account".to_string()));
        }
        if password != creds.password {
            warn!(email = %self.profile.email, "Admin unlock rejected");
            return Err(TerminalError::Unauthorized("incorrect admin password".to_string()));
        }

        self.admin_unlocked = true;
        Ok(())
    }

    /// Sign out. Risk acceptance survives; everything else resets.
    pub fn logout(&mut self) {
        *self = Self {
            accepted_risk: self.accepted_risk,
            ..Self::default()
        };
    }
}
