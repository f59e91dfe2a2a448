//! Command vocabulary.
//!
//! The table below is the interop protocol. Every platform binding must
//! accept exactly these selectors with exactly these parameter names.
//!
//! | Selector               | Required parameters      |
//! |------------------------|--------------------------|
//! | `init-mls`             | `client`, `ciphersuite`  |
//! | `get-key-package`      | `ciphersuite`            |
//! | `add-client`           | `cid`, `ciphersuite`, `kp` |
//! | `remove-client`        | `cid`, `client`          |
//! | `process-welcome`      | `welcome_path`           |
//! | `encrypt-message`      | `cid`, `message`         |
//! | `decrypt-message`      | `cid`, `message`         |
//! | `init-proteus`         |                          |
//! | `get-prekey`           | `id`                     |
//! | `session-from-prekey`  | `session_id`, `prekey`   |
//! | `session-from-message` | `session_id`, `message`  |
//! | `encrypt-proteus`      | `session_id`, `message`  |
//! | `decrypt-proteus`      | `session_id`, `message`  |
//! | `get-fingerprint`      |                          |

use std::fmt;

/// Query parameter names.
pub mod param {
    /// Base64 client identifier.
    pub const CLIENT: &str = "client";
    /// Decimal ciphersuite identifier.
    pub const CIPHERSUITE: &str = "ciphersuite";
    /// Base64 conversation identifier.
    pub const CONVERSATION_ID: &str = "cid";
    /// Base64 key package.
    pub const KEY_PACKAGE: &str = "kp";
    /// Local path of a welcome message file.
    pub const WELCOME_PATH: &str = "welcome_path";
    /// Base64 message payload.
    pub const MESSAGE: &str = "message";
    /// Decimal prekey identifier.
    pub const PREKEY_ID: &str = "id";
    /// Proteus session identifier, verbatim text.
    pub const SESSION_ID: &str = "session_id";
    /// Base64 prekey bundle.
    pub const PREKEY: &str = "prekey";
}

/// A command selector from the vocabulary.
///
/// One-to-one with the variants of [`crate::Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `init-mls`
    InitMls,
    /// `get-key-package`
    GetKeyPackage,
    /// `add-client`
    AddClient,
    /// `remove-client`
    RemoveClient,
    /// `process-welcome`
    ProcessWelcome,
    /// `encrypt-message`
    EncryptMessage,
    /// `decrypt-message`
    DecryptMessage,
    /// `init-proteus`
    InitProteus,
    /// `get-prekey`
    GetPrekey,
    /// `session-from-prekey`
    SessionFromPrekey,
    /// `session-from-message`
    SessionFromMessage,
    /// `encrypt-proteus`
    EncryptProteusMessage,
    /// `decrypt-proteus`
    DecryptProteusMessage,
    /// `get-fingerprint`
    GetFingerprint,
}

impl Command {
    /// Every command, in vocabulary order.
    pub const ALL: [Self; 14] = [
        Self::InitMls,
        Self::GetKeyPackage,
        Self::AddClient,
        Self::RemoveClient,
        Self::ProcessWelcome,
        Self::EncryptMessage,
        Self::DecryptMessage,
        Self::InitProteus,
        Self::GetPrekey,
        Self::SessionFromPrekey,
        Self::SessionFromMessage,
        Self::EncryptProteusMessage,
        Self::DecryptProteusMessage,
        Self::GetFingerprint,
    ];

    /// Look up a command by its selector. Matching is exact and
    /// case-sensitive.
    pub fn from_selector(selector: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.selector() == selector)
    }

    /// The selector (URL host) naming this command.
    pub const fn selector(self) -> &'static str {
        match self {
            Self::InitMls => "init-mls",
            Self::GetKeyPackage => "get-key-package",
            Self::AddClient => "add-client",
            Self::RemoveClient => "remove-client",
            Self::ProcessWelcome => "process-welcome",
            Self::EncryptMessage => "encrypt-message",
            Self::DecryptMessage => "decrypt-message",
            Self::InitProteus => "init-proteus",
            Self::GetPrekey => "get-prekey",
            Self::SessionFromPrekey => "session-from-prekey",
            Self::SessionFromMessage => "session-from-message",
            Self::EncryptProteusMessage => "encrypt-proteus",
            Self::DecryptProteusMessage => "decrypt-proteus",
            Self::GetFingerprint => "get-fingerprint",
        }
    }

    /// Parameters that must be present, in the order the action's fields are
    /// declared.
    pub const fn required_params(self) -> &'static [&'static str] {
        use param::{
            CIPHERSUITE, CLIENT, CONVERSATION_ID, KEY_PACKAGE, MESSAGE, PREKEY, PREKEY_ID,
            SESSION_ID, WELCOME_PATH,
        };

        match self {
            Self::InitMls => &[CLIENT, CIPHERSUITE],
            Self::GetKeyPackage => &[CIPHERSUITE],
            Self::AddClient => &[CONVERSATION_ID, CIPHERSUITE, KEY_PACKAGE],
            Self::RemoveClient => &[CONVERSATION_ID, CLIENT],
            Self::ProcessWelcome => &[WELCOME_PATH],
            Self::EncryptMessage | Self::DecryptMessage => &[CONVERSATION_ID, MESSAGE],
            Self::InitProteus | Self::GetFingerprint => &[],
            Self::GetPrekey => &[PREKEY_ID],
            Self::SessionFromPrekey => &[SESSION_ID, PREKEY],
            Self::SessionFromMessage
            | Self::EncryptProteusMessage
            | Self::DecryptProteusMessage => &[SESSION_ID, MESSAGE],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn selectors_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_selector(command.selector()), Some(command));
        }
    }

    #[test]
    fn selectors_are_unique() {
        let selectors: HashSet<_> = Command::ALL.iter().map(|c| c.selector()).collect();
        assert_eq!(selectors.len(), Command::ALL.len());
    }

    #[test]
    fn unknown_selector() {
        assert_eq!(Command::from_selector("init-mls2"), None);
        assert_eq!(Command::from_selector("INIT-MLS"), None);
        assert_eq!(Command::from_selector(""), None);
    }

    #[test]
    fn add_client_params() {
        assert_eq!(Command::AddClient.required_params(), &["cid", "ciphersuite", "kp"]);
    }

    #[test]
    fn parameterless_commands() {
        assert!(Command::InitProteus.required_params().is_empty());
        assert!(Command::GetFingerprint.required_params().is_empty());
    }

    #[test]
    fn display_is_selector() {
        assert_eq!(Command::EncryptProteusMessage.to_string(), "encrypt-proteus");
    }
}
