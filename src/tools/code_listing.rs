//! Human readable code listing.
//!
//! Each record is `<symbol>: <code>\n` where the symbol is the raw byte and the
//! code is a run of ASCII `0` and `1`.  Symbols are not escaped, so records are
//! parsed by position: the symbol is always the first byte of the record.
//! This way even the newline and colon symbols can be read back.
//! Records may end with either LF or CRLF.

use bit_vec::BitVec;
use crate::static_huff::CodeTable;
use crate::tools::bit_text;
use crate::Error;

/// Write the listing in ascending symbol order
pub fn write(table: &CodeTable) -> Vec<u8> {
    let mut ans = Vec::new();
    for (symbol,code) in table.iter() {
        ans.push(symbol);
        ans.extend_from_slice(b": ");
        ans.append(&mut bit_text::to_text(code));
        ans.push(b'\n');
    }
    ans
}

/// Parse a listing, line numbers in errors count from 1.
/// Only the syntax is checked here, `HuffTree::from_codes` checks the prefix property.
pub fn read(listing: &[u8]) -> Result<CodeTable,Error> {
    let mut table = CodeTable::new();
    let mut ptr = 0;
    let mut line = 1;
    while ptr < listing.len() {
        if ptr + 3 > listing.len() || &listing[ptr+1..ptr+3] != b": " {
            log::error!("expected `<symbol>: ` at line {}",line);
            return Err(Error::BadCodeListing { line });
        }
        let symbol = listing[ptr];
        ptr += 3;
        let mut code = BitVec::new();
        loop {
            match listing.get(ptr) {
                Some(b'0') => code.push(false),
                Some(b'1') => code.push(true),
                Some(b'\n') => {
                    ptr += 1;
                    break;
                },
                // CRLF, e.g. after the listing passed through an editor
                Some(b'\r') if matches!(listing.get(ptr+1),Some(b'\n') | None) => {
                    ptr += 2;
                    break;
                },
                // final newline is optional
                None => break,
                Some(c) => {
                    log::error!("unexpected character {:#04x} in code at line {}",c,line);
                    return Err(Error::BadCodeListing { line });
                }
            }
            ptr += 1;
        }
        if code.is_empty() || table.get(symbol).is_some() {
            log::error!("empty or repeated code for {:#04x} at line {}",symbol,line);
            return Err(Error::BadCodeListing { line });
        }
        log::trace!("listing has {:#04x} -> {:?}",symbol,code);
        table.insert(symbol,code);
        line += 1;
    }
    Ok(table)
}

#[test]
fn listing_is_sorted() {
    let mut table = CodeTable::new();
    table.insert(b'r',bit_text::from_text(b"10").unwrap());
    table.insert(b'a',bit_text::from_text(b"0").unwrap());
    table.insert(b'b',bit_text::from_text(b"11").unwrap());
    assert_eq!(write(&table),b"a: 0\nb: 11\nr: 10\n".to_vec());
    assert_eq!(read(&write(&table)).expect("parse failed"),table);
}

#[test]
fn awkward_symbols() {
    let listing = b"\n: 00\n:: 01\n : 1";
    let table = read(listing).expect("parse failed");
    assert_eq!(table.len(),3);
    assert_eq!(table.get(b'\n'),Some(&bit_text::from_text(b"00").unwrap()));
    assert_eq!(table.get(b':'),Some(&bit_text::from_text(b"01").unwrap()));
    assert_eq!(table.get(b' '),Some(&bit_text::from_text(b"1").unwrap()));
}

#[test]
fn malformed_listing() {
    assert_eq!(read(b"a: 0\nb 1\n"),Err(Error::BadCodeListing { line: 2 }));
    assert_eq!(read(b"a: \n"),Err(Error::BadCodeListing { line: 1 }));
    assert_eq!(read(b"a: 02\n"),Err(Error::BadCodeListing { line: 1 }));
    assert_eq!(read(b"a: 0\na: 1\n"),Err(Error::BadCodeListing { line: 2 }));
    assert_eq!(read(b"a:"),Err(Error::BadCodeListing { line: 1 }));
}

#[test]
fn crlf_listing() {
    let table = read(b"a: 0\r\nb: 11\r\nr: 10\r\n").expect("parse failed");
    assert_eq!(write(&table),b"a: 0\nb: 11\nr: 10\n".to_vec());
    // carriage return as a symbol is still positional
    let table = read(b"\r: 0\r\n\n: 1\r").expect("parse failed");
    assert_eq!(table.get(b'\r'),Some(&bit_text::from_text(b"0").unwrap()));
    assert_eq!(table.get(b'\n'),Some(&bit_text::from_text(b"1").unwrap()));
    assert_eq!(read(b"a: 0\rb: 1\n"),Err(Error::BadCodeListing { line: 1 }));
}
