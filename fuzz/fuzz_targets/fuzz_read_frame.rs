#![no_main]

use libfuzzer_sys::fuzz_target;
use tic_rs::tic::frame::read_frame;

fuzz_target!(|data: &[u8]| {
    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(_) => return,
    };

    runtime.block_on(async {
        let mut reader: &[u8] = data;
        // Keep reading until the input is exhausted; every call must return
        while let Ok(frame) = read_frame(&mut reader).await {
            let _ = frame.fields().count();
        }
    });
});
