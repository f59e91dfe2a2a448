#![no_main]

use interop_proto::Action;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Whatever parses must encode to a URL that parses to the same action.
    if let Some(action) = Action::parse_url(data) {
        assert_eq!(Action::parse_url(&action.to_url()), Some(action));
    }
});
