//! Typed actions.
//!
//! An [`Action`] exists only when every field of its variant decoded. Parsing
//! is all-or-nothing: the first missing or malformed parameter aborts the
//! whole action, and the caller sees `None`.
//!
//! # Field decoding
//!
//! - Byte fields: standard base64 with padding
//! - `u16` fields: base-10, within `0..=65535`
//! - Path fields: taken as a local path, not checked for existence
//! - Text fields: verbatim; only presence is required

use std::path::PathBuf;

use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::debug;

use crate::{
    command::{Command, param},
    request::Request,
};

/// A command together with its decoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Initialise the MLS client.
    InitMls {
        /// Client identifier.
        client_id: Vec<u8>,
        /// Ciphersuite identifier.
        ciphersuite: u16,
    },

    /// Generate a key package.
    GetKeyPackage {
        /// Ciphersuite identifier.
        ciphersuite: u16,
    },

    /// Add a client to a conversation using its key package.
    AddClient {
        /// Conversation identifier.
        conversation_id: Vec<u8>,
        /// Ciphersuite identifier.
        ciphersuite: u16,
        /// Serialized key package of the client to add.
        key_package: Vec<u8>,
    },

    /// Remove a client from a conversation.
    RemoveClient {
        /// Conversation identifier.
        conversation_id: Vec<u8>,
        /// Client identifier.
        client_id: Vec<u8>,
    },

    /// Join a conversation from a welcome message stored on disk.
    ProcessWelcome {
        /// Local path of the welcome message.
        welcome_path: PathBuf,
    },

    /// Encrypt an application message for a conversation.
    EncryptMessage {
        /// Conversation identifier.
        conversation_id: Vec<u8>,
        /// Plaintext.
        message: Vec<u8>,
    },

    /// Decrypt a conversation message.
    DecryptMessage {
        /// Conversation identifier.
        conversation_id: Vec<u8>,
        /// Ciphertext.
        message: Vec<u8>,
    },

    /// Initialise the Proteus client.
    InitProteus,

    /// Generate a Proteus prekey.
    GetPrekey {
        /// Prekey identifier.
        id: u16,
    },

    /// Open a Proteus session from a peer's prekey bundle.
    SessionFromPrekey {
        /// Session identifier.
        session_id: String,
        /// Serialized prekey bundle.
        prekey: Vec<u8>,
    },

    /// Open a Proteus session from an incoming prekey message.
    SessionFromMessage {
        /// Session identifier.
        session_id: String,
        /// Incoming message.
        message: Vec<u8>,
    },

    /// Encrypt a message in a Proteus session.
    EncryptProteusMessage {
        /// Session identifier.
        session_id: String,
        /// Plaintext.
        message: Vec<u8>,
    },

    /// Decrypt a message in a Proteus session.
    DecryptProteusMessage {
        /// Session identifier.
        session_id: String,
        /// Ciphertext.
        message: Vec<u8>,
    },

    /// Report the Proteus identity fingerprint.
    GetFingerprint,
}

impl Action {
    /// Decode a request into an action.
    ///
    /// Returns `None` for an unknown selector or for any missing or malformed
    /// required parameter. Parameters the command does not use are ignored.
    pub fn parse(request: &Request) -> Option<Self> {
        let Some(command) = Command::from_selector(request.selector()) else {
            debug!(selector = request.selector(), "unknown command selector");
            return None;
        };

        let fields = Fields { request, command };

        let action = match command {
            Command::InitMls => Self::InitMls {
                client_id: fields.bytes(param::CLIENT)?,
                ciphersuite: fields.u16(param::CIPHERSUITE)?,
            },
            Command::GetKeyPackage => {
                Self::GetKeyPackage { ciphersuite: fields.u16(param::CIPHERSUITE)? }
            },
            Command::AddClient => Self::AddClient {
                conversation_id: fields.bytes(param::CONVERSATION_ID)?,
                ciphersuite: fields.u16(param::CIPHERSUITE)?,
                key_package: fields.bytes(param::KEY_PACKAGE)?,
            },
            Command::RemoveClient => Self::RemoveClient {
                conversation_id: fields.bytes(param::CONVERSATION_ID)?,
                client_id: fields.bytes(param::CLIENT)?,
            },
            Command::ProcessWelcome => {
                Self::ProcessWelcome { welcome_path: fields.path(param::WELCOME_PATH)? }
            },
            Command::EncryptMessage => Self::EncryptMessage {
                conversation_id: fields.bytes(param::CONVERSATION_ID)?,
                message: fields.bytes(param::MESSAGE)?,
            },
            Command::DecryptMessage => Self::DecryptMessage {
                conversation_id: fields.bytes(param::CONVERSATION_ID)?,
                message: fields.bytes(param::MESSAGE)?,
            },
            Command::InitProteus => Self::InitProteus,
            Command::GetPrekey => Self::GetPrekey { id: fields.u16(param::PREKEY_ID)? },
            Command::SessionFromPrekey => Self::SessionFromPrekey {
                session_id: fields.text(param::SESSION_ID)?,
                prekey: fields.bytes(param::PREKEY)?,
            },
            Command::SessionFromMessage => Self::SessionFromMessage {
                session_id: fields.text(param::SESSION_ID)?,
                message: fields.bytes(param::MESSAGE)?,
            },
            Command::EncryptProteusMessage => Self::EncryptProteusMessage {
                session_id: fields.text(param::SESSION_ID)?,
                message: fields.bytes(param::MESSAGE)?,
            },
            Command::DecryptProteusMessage => Self::DecryptProteusMessage {
                session_id: fields.text(param::SESSION_ID)?,
                message: fields.bytes(param::MESSAGE)?,
            },
            Command::GetFingerprint => Self::GetFingerprint,
        };

        Some(action)
    }

    /// Decompose a URL and decode it. A malformed URL is also `None`.
    pub fn parse_url(url: &str) -> Option<Self> {
        match Request::from_url(url) {
            Ok(request) => Self::parse(&request),
            Err(error) => {
                debug!(%error, "request url rejected");
                None
            },
        }
    }

    /// The command this action answers to.
    pub const fn command(&self) -> Command {
        match self {
            Self::InitMls { .. } => Command::InitMls,
            Self::GetKeyPackage { .. } => Command::GetKeyPackage,
            Self::AddClient { .. } => Command::AddClient,
            Self::RemoveClient { .. } => Command::RemoveClient,
            Self::ProcessWelcome { .. } => Command::ProcessWelcome,
            Self::EncryptMessage { .. } => Command::EncryptMessage,
            Self::DecryptMessage { .. } => Command::DecryptMessage,
            Self::InitProteus => Command::InitProteus,
            Self::GetPrekey { .. } => Command::GetPrekey,
            Self::SessionFromPrekey { .. } => Command::SessionFromPrekey,
            Self::SessionFromMessage { .. } => Command::SessionFromMessage,
            Self::EncryptProteusMessage { .. } => Command::EncryptProteusMessage,
            Self::DecryptProteusMessage { .. } => Command::DecryptProteusMessage,
            Self::GetFingerprint => Command::GetFingerprint,
        }
    }

    /// Encode back into a request carrying exactly the required parameters.
    ///
    /// Paths that are not valid UTF-8 are rendered lossily.
    pub fn to_request(&self) -> Request {
        let request = Request::new(self.command().selector());

        match self {
            Self::InitMls { client_id, ciphersuite } => request
                .with_param(param::CLIENT, STANDARD.encode(client_id))
                .with_param(param::CIPHERSUITE, ciphersuite.to_string()),
            Self::GetKeyPackage { ciphersuite } => {
                request.with_param(param::CIPHERSUITE, ciphersuite.to_string())
            },
            Self::AddClient { conversation_id, ciphersuite, key_package } => request
                .with_param(param::CONVERSATION_ID, STANDARD.encode(conversation_id))
                .with_param(param::CIPHERSUITE, ciphersuite.to_string())
                .with_param(param::KEY_PACKAGE, STANDARD.encode(key_package)),
            Self::RemoveClient { conversation_id, client_id } => request
                .with_param(param::CONVERSATION_ID, STANDARD.encode(conversation_id))
                .with_param(param::CLIENT, STANDARD.encode(client_id)),
            Self::ProcessWelcome { welcome_path } => {
                request.with_param(param::WELCOME_PATH, welcome_path.to_string_lossy())
            },
            Self::EncryptMessage { conversation_id, message }
            | Self::DecryptMessage { conversation_id, message } => request
                .with_param(param::CONVERSATION_ID, STANDARD.encode(conversation_id))
                .with_param(param::MESSAGE, STANDARD.encode(message)),
            Self::GetPrekey { id } => request.with_param(param::PREKEY_ID, id.to_string()),
            Self::SessionFromPrekey { session_id, prekey } => request
                .with_param(param::SESSION_ID, session_id.as_str())
                .with_param(param::PREKEY, STANDARD.encode(prekey)),
            Self::SessionFromMessage { session_id, message }
            | Self::EncryptProteusMessage { session_id, message }
            | Self::DecryptProteusMessage { session_id, message } => request
                .with_param(param::SESSION_ID, session_id.as_str())
                .with_param(param::MESSAGE, STANDARD.encode(message)),
            Self::InitProteus | Self::GetFingerprint => request,
        }
    }

    /// Encode as a URL string.
    pub fn to_url(&self) -> String {
        self.to_request().to_url()
    }
}

/// Field decoders for one request. Each returns `None` on failure so the
/// variant constructors can chain them with `?`.
struct Fields<'a> {
    request: &'a Request,
    command: Command,
}

impl Fields<'_> {
    fn raw(&self, name: &str) -> Option<&str> {
        let value = self.request.param(name);
        if value.is_none() {
            debug!(command = %self.command, param = name, "missing parameter");
        }
        value
    }

    fn bytes(&self, name: &str) -> Option<Vec<u8>> {
        let value = self.raw(name)?;
        STANDARD
            .decode(value)
            .inspect_err(|error| {
                debug!(command = %self.command, param = name, %error, "parameter is not base64");
            })
            .ok()
    }

    fn u16(&self, name: &str) -> Option<u16> {
        let value = self.raw(name)?;
        value
            .parse::<u16>()
            .inspect_err(|error| {
                debug!(command = %self.command, param = name, %error, "parameter is not a u16");
            })
            .ok()
    }

    fn path(&self, name: &str) -> Option<PathBuf> {
        self.raw(name).map(PathBuf::from)
    }

    fn text(&self, name: &str) -> Option<String> {
        self.raw(name).map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(selector: &str, params: &[(&str, &str)]) -> Option<Action> {
        let request = params
            .iter()
            .fold(Request::new(selector), |request, (name, value)| request.with_param(*name, *value));
        Action::parse(&request)
    }

    #[test]
    fn encrypt_message() {
        assert_eq!(
            parse("encrypt-message", &[("cid", "Y2lk"), ("message", "bXNn")]),
            Some(Action::EncryptMessage { conversation_id: b"cid".to_vec(), message: b"msg".to_vec() })
        );
    }

    #[test]
    fn session_from_prekey() {
        assert_eq!(
            parse("session-from-prekey", &[("session_id", "abc"), ("prekey", "cGs=")]),
            Some(Action::SessionFromPrekey { session_id: "abc".into(), prekey: b"pk".to_vec() })
        );
    }

    #[test]
    fn get_fingerprint() {
        assert_eq!(parse("get-fingerprint", &[]), Some(Action::GetFingerprint));
    }

    #[test]
    fn extra_params_ignored() {
        assert_eq!(parse("init-proteus", &[("foo", "bar")]), Some(Action::InitProteus));
    }

    #[test]
    fn bad_base64() {
        assert_eq!(parse("init-mls", &[("client", "not-base64!!"), ("ciphersuite", "1")]), None);
    }

    #[test]
    fn unpadded_base64_rejected() {
        assert_eq!(parse("session-from-prekey", &[("session_id", "abc"), ("prekey", "cGs")]), None);
    }

    #[test]
    fn prekey_id_out_of_range() {
        assert_eq!(parse("get-prekey", &[("id", "99999999")]), None);
        assert_eq!(parse("get-prekey", &[("id", "65536")]), None);
        assert_eq!(parse("get-prekey", &[("id", "-1")]), None);
        assert_eq!(parse("get-prekey", &[("id", "")]), None);
        assert_eq!(parse("get-prekey", &[("id", "65535")]), Some(Action::GetPrekey { id: 65535 }));
    }

    #[test]
    fn prekey_id_sign_and_whitespace() {
        assert_eq!(parse("get-prekey", &[("id", "+5")]), Some(Action::GetPrekey { id: 5 }));
        assert_eq!(parse("get-prekey", &[("id", " 5")]), None);
        assert_eq!(parse("get-prekey", &[("id", "5 ")]), None);
    }

    #[test]
    fn non_numeric_ciphersuite() {
        assert_eq!(parse("get-key-package", &[("ciphersuite", "one")]), None);
    }

    #[test]
    fn empty_text_is_present() {
        assert_eq!(
            parse("decrypt-proteus", &[("session_id", ""), ("message", "")]),
            Some(Action::DecryptProteusMessage { session_id: String::new(), message: Vec::new() })
        );
    }

    #[test]
    fn welcome_path_not_checked() {
        assert_eq!(
            parse("process-welcome", &[("welcome_path", "/does/not/exist")]),
            Some(Action::ProcessWelcome { welcome_path: PathBuf::from("/does/not/exist") })
        );
    }

    #[test]
    fn unknown_selector() {
        assert_eq!(parse("init-everything", &[("client", "Y2lk"), ("ciphersuite", "1")]), None);
    }

    #[test]
    fn command_matches_selector() {
        assert_eq!(Action::GetPrekey { id: 3 }.command(), Command::GetPrekey);
        assert_eq!(Action::InitProteus.command().selector(), "init-proteus");
    }

    #[test]
    fn to_url_carries_only_required_params() {
        let action = Action::AddClient {
            conversation_id: b"cid".to_vec(),
            ciphersuite: 2,
            key_package: vec![0xfb, 0xff],
        };
        assert_eq!(action.to_url(), "interop://add-client?cid=Y2lk&ciphersuite=2&kp=%2B%2F8%3D");
        assert_eq!(Action::parse_url(&action.to_url()), Some(action));
    }

    #[test]
    fn parse_url_rejects_malformed_url() {
        assert_eq!(Action::parse_url("init-proteus"), None);
    }
}
