//! Vocabulary conformance tests.
//!
//! Every command is exercised with a well-formed request, then with each of
//! its required parameters removed and corrupted in turn.

use std::path::PathBuf;

use interop_proto::{Action, Command, Request, command::param};

/// One representative action per command.
fn sample(command: Command) -> Action {
    match command {
        Command::InitMls => Action::InitMls { client_id: b"alice".to_vec(), ciphersuite: 1 },
        Command::GetKeyPackage => Action::GetKeyPackage { ciphersuite: 2 },
        Command::AddClient => Action::AddClient {
            conversation_id: b"conv".to_vec(),
            ciphersuite: 1,
            key_package: vec![0, 1, 2, 0xff],
        },
        Command::RemoveClient => {
            Action::RemoveClient { conversation_id: b"conv".to_vec(), client_id: b"bob".to_vec() }
        },
        Command::ProcessWelcome => {
            Action::ProcessWelcome { welcome_path: PathBuf::from("/tmp/interop/welcome.bin") }
        },
        Command::EncryptMessage => {
            Action::EncryptMessage { conversation_id: b"conv".to_vec(), message: b"hi".to_vec() }
        },
        Command::DecryptMessage => {
            Action::DecryptMessage { conversation_id: b"conv".to_vec(), message: vec![9; 40] }
        },
        Command::InitProteus => Action::InitProteus,
        Command::GetPrekey => Action::GetPrekey { id: 65535 },
        Command::SessionFromPrekey => {
            Action::SessionFromPrekey { session_id: "s1".into(), prekey: vec![7; 33] }
        },
        Command::SessionFromMessage => {
            Action::SessionFromMessage { session_id: "s2".into(), message: b"m".to_vec() }
        },
        Command::EncryptProteusMessage => {
            Action::EncryptProteusMessage { session_id: "s3".into(), message: b"m".to_vec() }
        },
        Command::DecryptProteusMessage => {
            Action::DecryptProteusMessage { session_id: "s4".into(), message: b"m".to_vec() }
        },
        Command::GetFingerprint => Action::GetFingerprint,
    }
}

/// Copy of `request` with `edit` applied to the item named `name`, or with
/// that item dropped when `edit` returns `None`.
fn edit_param(request: &Request, name: &str, edit: impl Fn(&str) -> Option<String>) -> Request {
    request.items().iter().fold(Request::new(request.selector()), |out, item| {
        if item.name != name {
            return out.with_item(item.clone());
        }
        match item.value.as_deref().and_then(&edit) {
            Some(value) => out.with_param(item.name.clone(), value),
            None => out,
        }
    })
}

#[test]
fn encoded_params_match_vocabulary() {
    for command in Command::ALL {
        let request = sample(command).to_request();
        let names: Vec<&str> = request.items().iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, command.required_params(), "{command}");
        assert_eq!(request.selector(), command.selector());
    }
}

#[test]
fn well_formed_requests_parse() {
    for command in Command::ALL {
        let action = sample(command);
        assert_eq!(Action::parse(&action.to_request()), Some(action.clone()), "{command}");
        assert_eq!(Action::parse_url(&action.to_url()), Some(action), "{command}");
    }
}

#[test]
fn missing_any_required_param_fails() {
    for command in Command::ALL {
        let request = sample(command).to_request();
        for name in command.required_params() {
            let request = edit_param(&request, name, |_| None);
            assert_eq!(Action::parse(&request), None, "{command} without {name}");
        }
    }
}

#[test]
fn corrupt_byte_or_integer_param_fails() {
    for command in Command::ALL {
        let request = sample(command).to_request();
        for name in command.required_params() {
            // Text and path fields accept anything.
            if matches!(*name, param::SESSION_ID | param::WELCOME_PATH) {
                continue;
            }
            let request = edit_param(&request, name, |_| Some("not-base64!!".into()));
            assert_eq!(Action::parse(&request), None, "{command} with corrupt {name}");
        }
    }
}

#[test]
fn valueless_param_counts_as_missing() {
    let request = Request::from_url("interop://get-key-package?ciphersuite").unwrap();
    assert_eq!(Action::parse(&request), None);
}

#[test]
fn extra_params_do_not_change_result() {
    for command in Command::ALL {
        let action = sample(command);
        let request = action.to_request().with_param("foo", "bar").with_param("zzz", "");
        assert_eq!(Action::parse(&request), Some(action), "{command}");
    }
}

#[test]
fn undecodable_extra_params_are_ignored() {
    assert_eq!(Action::parse_url("interop://init-proteus?foo=%FF"), Some(Action::InitProteus));
    assert_eq!(
        Action::parse_url("interop://get-prekey?id=1&junk=%C3"),
        Some(Action::GetPrekey { id: 1 })
    );
    assert_eq!(
        Action::parse_url("interop://get-fingerprint?%FF=%FE"),
        Some(Action::GetFingerprint)
    );
}

#[test]
fn undecodable_required_param_fails() {
    assert_eq!(Action::parse_url("interop://get-prekey?id=%FF&junk=1"), None);
    assert_eq!(Action::parse_url("interop://session-from-message?session_id=%C3&message=AA=="), None);
}

#[test]
fn embedded_tab_in_text_param_fails() {
    assert_eq!(
        Action::parse_url("interop://session-from-message?session_id=a\tb&message=AA=="),
        None
    );
    assert_eq!(
        Action::parse_url("interop://session-from-message?session_id=a%09b&message=AA=="),
        Some(Action::SessionFromMessage { session_id: "a\tb".into(), message: vec![0] })
    );
}

#[test]
fn unknown_selector_never_matches() {
    let request = Request::new("init-mlss")
        .with_param(param::CLIENT, "Y2lk")
        .with_param(param::CIPHERSUITE, "1");
    assert_eq!(Action::parse(&request), None);
    assert_eq!(Action::parse(&Request::new("")), None);
}

#[test]
fn url_scenarios() {
    assert_eq!(
        Action::parse_url("interop://encrypt-message?cid=Y2lk&message=bXNn"),
        Some(Action::EncryptMessage { conversation_id: b"cid".to_vec(), message: b"msg".to_vec() })
    );
    assert_eq!(
        Action::parse_url("interop://session-from-prekey?session_id=abc&prekey=cGs="),
        Some(Action::SessionFromPrekey { session_id: "abc".into(), prekey: b"pk".to_vec() })
    );
    assert_eq!(Action::parse_url("interop://get-fingerprint"), Some(Action::GetFingerprint));
    assert_eq!(Action::parse_url("interop://init-proteus?foo=bar"), Some(Action::InitProteus));
    assert_eq!(Action::parse_url("interop://init-mls?client=not-base64!!&ciphersuite=1"), None);
    assert_eq!(Action::parse_url("interop://get-prekey?id=99999999"), None);
}

#[test]
fn raw_plus_in_base64_survives_url() {
    // [0xfb, 0xff] encodes to "+/8=".
    assert_eq!(
        Action::parse_url("interop://decrypt-message?cid=Y2lk&message=+/8="),
        Some(Action::DecryptMessage { conversation_id: b"cid".to_vec(), message: vec![0xfb, 0xff] })
    );
}
