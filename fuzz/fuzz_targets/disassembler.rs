#![no_main]

use abcscope::disassembler::decode_code;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(operations) = decode_code(data) {
        let mut offset = 0;
        for operation in &operations {
            assert_eq!(operation.offset, offset);
            offset += operation.size;
        }
        assert_eq!(offset, data.len());
    }
});
