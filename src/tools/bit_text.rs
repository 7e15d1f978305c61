//! Persisted forms of a bit stream.
//!
//! The text form stores one ASCII `0` or `1` per bit.  This is 8 times larger
//! than necessary but is what existing listings and streams look like.
//! The packed form is a 4 byte little endian bit count followed by the bits,
//! MSB first, with the last byte zero padded.

use bit_vec::BitVec;
use crate::Error;

/// How a bit stream is stored
#[derive(Clone,Copy,Debug,PartialEq)]
pub enum BitFormat {
    Text,
    Packed
}

pub fn to_text(bits: &BitVec) -> Vec<u8> {
    bits.iter().map(|b| if b { b'1' } else { b'0' }).collect()
}

/// Trailing ASCII whitespace is ignored, any other character is an error.
pub fn from_text(txt: &[u8]) -> Result<BitVec,Error> {
    let mut end = txt.len();
    while end > 0 && txt[end-1].is_ascii_whitespace() {
        end -= 1;
    }
    let mut ans = BitVec::with_capacity(end);
    for c in &txt[0..end] {
        match c {
            b'0' => ans.push(false),
            b'1' => ans.push(true),
            _ => {
                log::error!("unexpected character {:#04x} in bit stream",c);
                return Err(Error::FileFormatMismatch);
            }
        }
    }
    Ok(ans)
}

pub fn to_packed(bits: &BitVec) -> Result<Vec<u8>,Error> {
    let count = u32::try_from(bits.len()).map_err(|_| Error::FileTooLarge)?;
    let mut ans = u32::to_le_bytes(count).to_vec();
    ans.append(&mut bits.to_bytes());
    Ok(ans)
}

pub fn from_packed(buf: &[u8]) -> Result<BitVec,Error> {
    if buf.len() < 4 {
        return Err(Error::FileFormatMismatch);
    }
    let count = u32::from_le_bytes([buf[0],buf[1],buf[2],buf[3]]) as usize;
    let mut ans = BitVec::from_bytes(&buf[4..]);
    if count > ans.len() || ans.len() - count >= 8 {
        log::error!("header has {} bits, but {} bytes follow",count,buf.len()-4);
        return Err(Error::FileFormatMismatch);
    }
    ans.truncate(count);
    Ok(ans)
}

pub fn write(bits: &BitVec,format: BitFormat) -> Result<Vec<u8>,Error> {
    match format {
        BitFormat::Text => Ok(to_text(bits)),
        BitFormat::Packed => to_packed(bits)
    }
}

pub fn read(buf: &[u8],format: BitFormat) -> Result<BitVec,Error> {
    match format {
        BitFormat::Text => from_text(buf),
        BitFormat::Packed => from_packed(buf)
    }
}

#[test]
fn text_form() {
    let bits = from_text("0111100\n".as_bytes()).expect("parse failed");
    assert_eq!(bits.len(),7);
    assert_eq!(to_text(&bits),"0111100".as_bytes().to_vec());
    assert_eq!(from_text("01x1".as_bytes()),Err(Error::FileFormatMismatch));
    assert_eq!(from_text(&[]).expect("parse failed").len(),0);
}

#[test]
fn packed_form() {
    let bits = from_text("01111001100011010111100".as_bytes()).expect("parse failed");
    let packed = to_packed(&bits).expect("pack failed");
    assert_eq!(packed,hex::decode("17000000798D78").unwrap());
    assert_eq!(from_packed(&packed).expect("unpack failed"),bits);
}

#[test]
fn packed_header_mismatch() {
    // 23 bits claimed but only one byte follows
    assert_eq!(from_packed(&hex::decode("1700000079").unwrap()),Err(Error::FileFormatMismatch));
    // 1 bit claimed but two bytes follow
    assert_eq!(from_packed(&hex::decode("010000008000").unwrap()),Err(Error::FileFormatMismatch));
    assert_eq!(from_packed(&[0,0]),Err(Error::FileFormatMismatch));
}
