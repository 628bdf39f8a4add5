#![no_main]

use libfuzzer_sys::fuzz_target;
use wbxml_wire::{ByteReader, WbxmlHeader};

// Fuzz target: WbxmlHeader::read_from with arbitrary bytes.
//
// Catches bugs in:
// - Version checking
// - Literal public id resolution against the string table
// - Charset MIBenum handling
// - String table length limits and truncation
fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    if let Ok(header) = WbxmlHeader::read_from(&mut reader, 1 << 16) {
        assert!(header.string_table.len() <= 1 << 16);
        assert!(reader.position() <= data.len());
    }
});
