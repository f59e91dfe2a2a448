#![no_main]

use interop_proto::Request;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(request) = Request::from_url(data) else {
        return;
    };

    // Rendering and decomposing again must be lossless.
    assert_eq!(Request::from_url(&request.to_url()).ok(), Some(request));
});
