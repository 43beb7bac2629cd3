#![no_main]

use abcscope::{AbcFile, LoadConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = AbcFile::from_bytes_with_config(data, LoadConfig::eager());
});
