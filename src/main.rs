use clap::{arg,crate_version,Command};
use huffcoder::{static_huff,code_listing,BitFormat};
use std::io::Write;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const RCH: &str = "unreachable was reached";

fn ok_to_overwrite(path_out: &str) -> bool {
    if let Ok(_f) = std::fs::File::open(path_out) {
        let mut ans = String::new();
        eprint!("{} exists, overwrite? (y/n) ",path_out);
        std::io::stdin().read_line(&mut ans).expect("could not read stdin");
        if ans.trim_end()=="y" || ans.trim_end()=="Y" {
            log::warn!("existing file will be truncated");
            return true;
        }
        return false;
    }
    true
}

fn options(cmd: &clap::ArgMatches) -> huffcoder::Options {
    let mut opt = huffcoder::STD_OPTIONS;
    opt.format = match cmd.get_one::<String>("format").map(|s| s.as_str()) {
        Some("packed") => BitFormat::Packed,
        _ => BitFormat::Text
    };
    opt.require_tree = cmd.get_flag("strict");
    opt
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(e) = run() {
        eprintln!("huffcoder: {}",e);
        std::process::exit(1);
    }
}

fn run() -> STDRESULT
{
    let long_help =
"Examples:
---------
Compress:      `huffcoder compress -i original_text.txt -o encoded_output.txt -c huffman_codes.txt`
Expand:        `huffcoder expand -i encoded_output.txt -c huffman_codes.txt -o decoded_output.txt`
Show codes:    `huffcoder codes -i original_text.txt`";

    let formats = ["text","packed"];

    let mut main_cmd = Command::new("huffcoder")
        .about("Compress and expand with static Huffman codes")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "bit stream output path").required(true))
        .arg(arg!(-c --codes <PATH> "code listing output path").required(true))
        .arg(arg!(-f --format <FORMAT> "bit stream format").value_parser(formats)
            .default_value("text"))
        .arg(arg!(-s --strict "fail on empty input"))
        .about("compress a file"));

    main_cmd = main_cmd.subcommand(Command::new("expand")
        .arg(arg!(-i --input <PATH> "bit stream input path").required(true))
        .arg(arg!(-c --codes <PATH> "code listing input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .arg(arg!(-f --format <FORMAT> "bit stream format").value_parser(formats)
            .default_value("text"))
        .arg(arg!(-s --strict "fail on empty input"))
        .about("expand a file"));

    main_cmd = main_cmd.subcommand(Command::new("codes")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .about("print the code for each symbol"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let path_codes = cmd.get_one::<String>("codes").expect(RCH);
        if !ok_to_overwrite(path_out) || !ok_to_overwrite(path_codes) {
            eprintln!("abort operation");
            return Ok(());
        }
        let opt = options(cmd);
        let mut in_file = std::fs::File::open(path_in)?;
        let mut out_file = std::fs::File::create(path_out)?;
        let mut codes_file = std::fs::File::create(path_codes)?;
        let (in_size,out_size) = static_huff::compress(&mut in_file,&mut out_file,&mut codes_file,&opt)?;
        eprintln!("compressed {} into {}",in_size,out_size);
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_codes = cmd.get_one::<String>("codes").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        if !ok_to_overwrite(path_out) {
            eprintln!("abort operation");
            return Ok(());
        }
        let opt = options(cmd);
        let mut in_file = std::fs::File::open(path_in)?;
        let mut codes_file = std::fs::File::open(path_codes)?;
        let mut out_file = std::fs::File::create(path_out)?;
        let (in_size,out_size) = static_huff::expand(&mut in_file,&mut codes_file,&mut out_file,&opt)?;
        eprintln!("expanded {} into {}",in_size,out_size);
    }

    if let Some(cmd) = matches.subcommand_matches("codes") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let dat = std::fs::read(path_in)?;
        let huff = static_huff::StaticHuffman::create(&dat);
        // symbols are raw bytes, do not force them through UTF-8
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(b"Huffman Codes:\n")?;
        stdout.write_all(&code_listing::write(huff.codes()))?;
        stdout.flush()?;
    }

    Ok(())
}
