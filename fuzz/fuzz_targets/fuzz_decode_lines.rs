#![no_main]

use libfuzzer_sys::fuzz_target;
use tic_rs::payload::{parse_horodate, HistoricalRecord, StandardRecord, TicDecode};
use tic_rs::tic::is_valid_line;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let lines: Vec<&str> = text.split('\n').collect();

    let _ = HistoricalRecord::decode_lines(&lines);
    let _ = StandardRecord::decode_lines(&lines);

    // Decoding never depends on anything but the input
    assert_eq!(
        StandardRecord::decode_lines(&lines),
        StandardRecord::decode_lines(&lines)
    );

    for line in &lines {
        let _ = is_valid_line(line);
        let _ = parse_horodate(line);
    }
});
