use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const SAM: &str = "I am Sam. Sam I am. I do not like this Sam I am.\n";

// Write the test input into the temporary directory.
fn put_input(temp_dir: &tempfile::TempDir,dat: &[u8]) -> Result<PathBuf,Box<dyn std::error::Error>> {
    let path = temp_dir.path().join("original_text.txt");
    std::fs::write(&path,dat)?;
    Ok(path)
}

fn compress_cmd(temp_dir: &tempfile::TempDir,in_path: &PathBuf,format: &str) -> Result<Command,Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("huffcoder")?;
    cmd.arg("compress")
        .arg("-i").arg(in_path)
        .arg("-o").arg(temp_dir.path().join("encoded_output.txt"))
        .arg("-c").arg(temp_dir.path().join("huffman_codes.txt"))
        .arg("-f").arg(format);
    Ok(cmd)
}

fn expand_cmd(temp_dir: &tempfile::TempDir,format: &str) -> Result<Command,Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("huffcoder")?;
    cmd.arg("expand")
        .arg("-i").arg(temp_dir.path().join("encoded_output.txt"))
        .arg("-c").arg(temp_dir.path().join("huffman_codes.txt"))
        .arg("-o").arg(temp_dir.path().join("decoded_output.txt"))
        .arg("-f").arg(format);
    Ok(cmd)
}

fn round_trip(dat: &[u8],format: &str) -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = put_input(&temp_dir,dat)?;
    compress_cmd(&temp_dir,&in_path,format)?.assert().success();
    expand_cmd(&temp_dir,format)?.assert().success();
    let decoded = std::fs::read(temp_dir.path().join("decoded_output.txt"))?;
    assert_eq!(dat.to_vec(),decoded);
    Ok(())
}

#[test]
fn text_round_trip() -> STDRESULT {
    round_trip(SAM.as_bytes(),"text")?;
    round_trip("aaaa".as_bytes(),"text")?;
    round_trip(&[],"text")
}

#[test]
fn packed_round_trip() -> STDRESULT {
    round_trip(SAM.as_bytes(),"packed")?;
    let binary: Vec<u8> = (0..=255).rev().chain(0..=255).collect();
    round_trip(&binary,"packed")
}

#[test]
fn compression_works() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = put_input(&temp_dir,"abracadabra".as_bytes())?;
    compress_cmd(&temp_dir,&in_path,"text")?.assert().success();
    let encoded = std::fs::read(temp_dir.path().join("encoded_output.txt"))?;
    let codes = std::fs::read(temp_dir.path().join("huffman_codes.txt"))?;
    assert_eq!(encoded,"01111001100011010111100".as_bytes().to_vec());
    assert_eq!(codes,"a: 0\nb: 111\nc: 1100\nd: 1101\nr: 10\n".as_bytes().to_vec());
    Ok(())
}

#[test]
fn truncated_stream_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = put_input(&temp_dir,"abracadabra".as_bytes())?;
    compress_cmd(&temp_dir,&in_path,"text")?.assert().success();
    std::fs::write(temp_dir.path().join("encoded_output.txt"),"011110011")?;
    expand_cmd(&temp_dir,"text")?.assert()
        .failure()
        .stderr(predicate::str::contains("middle of a code"));
    Ok(())
}

#[test]
fn strict_empty_input_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = put_input(&temp_dir,&[])?;
    compress_cmd(&temp_dir,&in_path,"text")?.arg("--strict").assert()
        .failure()
        .stderr(predicate::str::contains("input is empty"));
    Ok(())
}

#[test]
fn code_report() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = put_input(&temp_dir,"aaaa".as_bytes())?;
    let mut cmd = Command::cargo_bin("huffcoder")?;
    cmd.arg("codes").arg("-i").arg(&in_path)
        .assert()
        .success()
        .stdout("Huffman Codes:\na: 0\n");
    Ok(())
}

#[test]
fn code_report_raw_bytes() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = put_input(&temp_dir,&[0xe9,0xe9,0xff])?;
    let mut cmd = Command::cargo_bin("huffcoder")?;
    cmd.arg("codes").arg("-i").arg(&in_path)
        .assert()
        .success()
        .stdout(&b"Huffman Codes:\n\xe9: 1\n\xff: 0\n"[..]);
    Ok(())
}

#[test]
fn crlf_listing_expands() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = put_input(&temp_dir,"abracadabra".as_bytes())?;
    compress_cmd(&temp_dir,&in_path,"text")?.assert().success();
    let codes_path = temp_dir.path().join("huffman_codes.txt");
    let listing = std::fs::read_to_string(&codes_path)?;
    std::fs::write(&codes_path,listing.replace("\n","\r\n"))?;
    expand_cmd(&temp_dir,"text")?.assert().success();
    let decoded = std::fs::read(temp_dir.path().join("decoded_output.txt"))?;
    assert_eq!(decoded,"abracadabra".as_bytes().to_vec());
    Ok(())
}
