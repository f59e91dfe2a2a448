#![no_main]

use interop_proto::Response;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(response) = Response::from_json(data) {
        let json = response.to_json().unwrap();
        assert_eq!(Response::from_json(&json).unwrap(), response);
    }
});
