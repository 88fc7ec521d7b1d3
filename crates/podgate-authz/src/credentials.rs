//! Request credentials as handed over by the authentication layer.
//!
//! # Purpose
//! Holds the identities proven for one request: the primary agent channel and
//! the delegated ticket channel.
//!
//! # Key invariants
//! - A set is authenticated iff either channel carries a non-empty WebID.
//! - When both channels are present, the ticket identity is reported first.
use crate::{ClientId, WebId};
use serde::{Deserialize, Serialize};

/// One proven identity: the agent and, optionally, the client acting for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_id: Option<WebId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
}

impl Credential {
    pub fn agent(web_id: impl Into<String>) -> Self {
        Self {
            web_id: Some(WebId::new(web_id)),
            client_id: None,
        }
    }

    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(ClientId::new(client_id));
        self
    }

    /// The WebID, if present and non-empty.
    pub fn web_id(&self) -> Option<&WebId> {
        self.web_id.as_ref().filter(|web_id| !web_id.is_empty())
    }
}

/// All credentials extracted for a request.
///
/// # Example
/// ```rust
/// use podgate_authz::{Credential, CredentialSet};
///
/// let anonymous = CredentialSet::default();
/// assert!(!anonymous.is_authenticated());
///
/// let alice = CredentialSet::agent(Credential::agent("https://alice.example/#me"));
/// assert!(alice.is_authenticated());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Credential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Credential>,
}

impl CredentialSet {
    pub fn agent(agent: Credential) -> Self {
        Self {
            agent: Some(agent),
            ticket: None,
        }
    }

    pub fn ticket(ticket: Credential) -> Self {
        Self {
            agent: None,
            ticket: Some(ticket),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.agent.as_ref().and_then(Credential::web_id).is_some()
            || self.ticket.as_ref().and_then(Credential::web_id).is_some()
    }

    /// Identity used in log lines; the ticket channel wins over the agent channel.
    pub fn display_identity(&self) -> Option<&WebId> {
        if let Some(ticket) = &self.ticket {
            return ticket.web_id.as_ref();
        }
        self.agent.as_ref().and_then(|agent| agent.web_id.as_ref())
    }

    /// Client application named by the credentials, agent channel first.
    pub fn client_id(&self) -> Option<&ClientId> {
        self.agent
            .as_ref()
            .and_then(|agent| agent.client_id.as_ref())
            .or_else(|| self.ticket.as_ref().and_then(|t| t.client_id.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_set_is_not_authenticated() {
        let credentials = CredentialSet::default();
        assert!(!credentials.is_authenticated());
        assert!(credentials.display_identity().is_none());
        assert!(credentials.client_id().is_none());
    }

    #[test]
    fn empty_web_id_does_not_authenticate() {
        let credentials = CredentialSet::agent(Credential::agent(""));
        assert!(!credentials.is_authenticated());
    }

    #[test]
    fn either_channel_authenticates() {
        let agent = CredentialSet::agent(Credential::agent("https://alice.example/#me"));
        let ticket = CredentialSet::ticket(Credential::agent("https://bob.example/#me"));
        assert!(agent.is_authenticated());
        assert!(ticket.is_authenticated());
    }

    #[test]
    fn ticket_identity_is_displayed_first() {
        let credentials = CredentialSet {
            agent: Some(Credential::agent("https://alice.example/#me")),
            ticket: Some(Credential::agent("https://bob.example/#me")),
        };
        assert_eq!(
            credentials.display_identity().map(WebId::as_str),
            Some("https://bob.example/#me")
        );
    }

    #[test]
    fn client_id_prefers_agent_channel() {
        let credentials = CredentialSet {
            agent: Some(Credential::agent("https://alice.example/#me").with_client("app-a")),
            ticket: Some(Credential::agent("https://bob.example/#me").with_client("app-b")),
        };
        assert_eq!(credentials.client_id().map(ClientId::as_str), Some("app-a"));

        let ticket_only = CredentialSet::ticket(
            Credential::agent("https://bob.example/#me").with_client("app-b"),
        );
        assert_eq!(ticket_only.client_id().map(ClientId::as_str), Some("app-b"));
    }

    #[test]
    fn credentials_deserialize_from_json() {
        let credentials: CredentialSet = serde_json::from_str(
            r#"{"agent":{"web_id":"https://alice.example/#me","client_id":"app"}}"#,
        )
        .expect("deserialize");
        assert!(credentials.is_authenticated());
        assert_eq!(credentials.client_id().map(ClientId::as_str), Some("app"));
    }
}
