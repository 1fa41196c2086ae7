use clap::{Arg, ArgAction, Command};
use colored::Colorize;
use log::{debug, error};
use prettytable::{Cell, Row, Table};
use std::path::{Path, PathBuf};

use crate::conversion::source::display_name;
use crate::conversion::{download, AcceptMode, Converter, Policy, SourceFile};
use crate::error::ConvertError;
use crate::notice::Notice;
use crate::tui;
use crate::utils::logging::init_logging;

const BIN2TXT_ASCII: &str = r#"
 _     _       ____  _        _
| |__ (_)_ __ |___ \| |___  _| |_
| '_ \| | '_ \  __) | __\ \/ / __|
| |_) | | | | |/ __/| |_ >  <| |_
|_.__/|_|_| |_|_____|\__/_/\_\\__|
       Binary to Text Converter
"#;

/// Where converted text goes in classic mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Into this directory, or next to each input when `None`.
    Files(Option<PathBuf>),
    Stdout,
}

/// Everything the command line configures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub files: Vec<PathBuf>,
    pub policy: Policy,
    pub accept_mode: AcceptMode,
    pub output: Output,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
    pub no_tui: bool,
}

impl Settings {
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Self, Box<dyn std::error::Error>> {
        let files: Vec<PathBuf> = matches
            .get_many::<String>("FILE")
            .map(|vals| vals.map(PathBuf::from).collect())
            .unwrap_or_default();

        let policy = match matches.get_one::<String>("format") {
            Some(name) => name.parse::<Policy>()?,
            None => Policy::default(),
        };

        let accept_mode = if matches.get_flag("any-extension") {
            AcceptMode::AnyExtension
        } else {
            AcceptMode::BinOnly
        };

        let output_dir = matches.get_one::<String>("output-dir").map(PathBuf::from);
        let output = if matches.get_flag("stdout") {
            Output::Stdout
        } else {
            Output::Files(output_dir)
        };

        let no_tui = matches.get_flag("no-tui") || matches.get_flag("stdout");
        if no_tui && files.is_empty() {
            return Err("no input files given".into());
        }

        Ok(Self {
            files,
            policy,
            accept_mode,
            output,
            verbose: matches.get_flag("verbose"),
            log_file: matches.get_one::<String>("log-file").map(PathBuf::from),
            no_tui,
        })
    }

    pub fn converter(&self) -> Converter {
        Converter::new(self.policy, self.accept_mode)
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let matches = create_cli().get_matches();
    let settings = Settings::from_matches(&matches)?;

    init_logging(settings.log_file.as_deref(), settings.verbose, settings.no_tui)?;
    debug!("Settings: {:?}", settings);

    if settings.no_tui {
        return run_standard_cli(&settings);
    }

    // Otherwise, run the TUI interface
    tui::run_tui(&settings)
}

/// One line of the classic-mode summary.
#[derive(Debug)]
struct Converted {
    input: String,
    bytes: usize,
    destination: Option<PathBuf>,
}

fn run_standard_cli(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let converter = settings.converter();
    let to_stdout = settings.output == Output::Stdout;

    if !to_stdout {
        println!("{}", BIN2TXT_ASCII.truecolor(225, 95, 80).bold());
    }

    let mut done = Vec::new();
    let mut failures = 0;

    for path in &settings.files {
        match convert_one(path, &converter, &settings.output, settings.files.len() > 1) {
            Ok(converted) => {
                if let Some(dest) = &converted.destination {
                    println!(
                        "{} {}",
                        "[+]".green().bold(),
                        Notice::saved(dest).body
                    );
                }
                done.push(converted);
            }
            Err(e) => {
                failures += 1;
                error!("{}", e);
                eprintln!("{} {}", "[-]".red().bold(), Notice::from(&e));
            }
        }
    }

    if !to_stdout && !done.is_empty() {
        print_summary(&done, converter.policy());
    }

    if failures > 0 {
        return Err(format!("{} of {} file(s) failed", failures, settings.files.len()).into());
    }
    Ok(())
}

fn convert_one(
    path: &Path,
    converter: &Converter,
    output: &Output,
    with_header: bool,
) -> Result<Converted, ConvertError> {
    converter.validate(&display_name(path))?;
    let source = SourceFile::read(path)?;
    let result = converter.accept(&source)?;

    let destination = match output {
        Output::Stdout => {
            print!("{}", stdout_block(source.name(), &result.text, with_header));
            None
        }
        Output::Files(dir) => {
            let dir = match dir {
                Some(dir) => dir.clone(),
                None => path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(".")),
            };
            Some(download::save(&result, &dir)?)
        }
    };

    Ok(Converted {
        input: source.name().to_string(),
        bytes: source.bytes().len(),
        destination,
    })
}

/// Converted text as printed by `--stdout`, headed by the input name when
/// several files share the stream.
fn stdout_block(name: &str, text: &str, with_header: bool) -> String {
    if with_header {
        format!("==> {} <==\n{}\n\n", name, text)
    } else {
        format!("{}\n", text)
    }
}

fn print_summary(done: &[Converted], policy: Policy) {
    println!("{}", "\n[+] Summary".green().bold());

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Input"),
        Cell::new("Bytes"),
        Cell::new("Format"),
        Cell::new("Output"),
    ]));
    for item in done {
        let dest = item
            .destination
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(Row::new(vec![
            Cell::new(&item.input),
            Cell::new(&item.bytes.to_string()),
            Cell::new(&policy.to_string()),
            Cell::new(&dest),
        ]));
    }
    table.printstd();
}

fn create_cli() -> Command {
    Command::new("bin2txt")
        .version("0.1.0")
        .about("Convert binary files into text")
        .arg(
            Arg::new("FILE")
                .help("Binary file(s) to convert")
                .num_args(1..)
                .action(ArgAction::Append)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("How bytes become text (default: decimal)")
                .value_parser(Policy::NAMES),
        )
        .arg(
            Arg::new("any-extension")
                .long("any-extension")
                .short('a')
                .help("Accept files with any extension, not only .bin")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .help("Directory for .txt files (default: next to each input, or the current directory in the TUI)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Print converted text instead of writing files (implies --no-tui)")
                .action(ArgAction::SetTrue)
                .conflicts_with("output-dir"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Path to log file (optional)")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("no-tui")
                .long("no-tui")
                .help("Run in classic command-line mode without TUI")
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn settings(args: &[&str]) -> Result<Settings, Box<dyn std::error::Error>> {
        let mut argv = vec!["bin2txt"];
        argv.extend_from_slice(args);
        let matches = create_cli().try_get_matches_from(argv)?;
        Settings::from_matches(&matches)
    }

    #[test]
    fn defaults_are_decimal_and_bin_only() {
        let s = settings(&["dump.bin"]).unwrap();
        assert_eq!(s.files, vec![PathBuf::from("dump.bin")]);
        assert_eq!(s.policy, Policy::Decimal);
        assert_eq!(s.accept_mode, AcceptMode::BinOnly);
        assert_eq!(s.output, Output::Files(None));
        assert!(!s.no_tui);
    }

    #[test]
    fn flags_map_onto_settings() {
        let s = settings(&[
            "-f",
            "utf8-lossy",
            "--any-extension",
            "-o",
            "out",
            "--no-tui",
            "a.bin",
            "b.dat",
        ])
        .unwrap();
        assert_eq!(s.policy, Policy::Utf8Lossy);
        assert_eq!(s.accept_mode, AcceptMode::AnyExtension);
        assert_eq!(s.output, Output::Files(Some(PathBuf::from("out"))));
        assert_eq!(s.files.len(), 2);
        assert!(s.no_tui);
    }

    #[test]
    fn stdout_implies_classic_mode() {
        let s = settings(&["--stdout", "a.bin"]).unwrap();
        assert_eq!(s.output, Output::Stdout);
        assert!(s.no_tui);
    }

    #[test]
    fn classic_mode_needs_files() {
        assert!(settings(&["--no-tui"]).is_err());
        assert!(settings(&[]).is_ok());
    }

    #[test]
    fn unknown_format_is_rejected_by_parser() {
        assert!(settings(&["-f", "hex", "a.bin"]).is_err());
    }

    #[test]
    fn convert_one_writes_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("archive.tar.bin");
        fs::write(&input, [0u8, 65, 255]).unwrap();

        let converted =
            convert_one(&input, &Converter::default(), &Output::Files(None), false).unwrap();
        let dest = dir.path().join("archive.tar.txt");
        assert_eq!(converted.destination.as_deref(), Some(dest.as_path()));
        assert_eq!(converted.bytes, 3);
        assert_eq!(fs::read_to_string(dest).unwrap(), "0 65 255");
    }

    #[test]
    fn convert_one_skips_read_for_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("photo.jpg");
        fs::write(&input, [1u8]).unwrap();

        let err = convert_one(&input, &Converter::default(), &Output::Files(None), false).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidFileType { .. }));
        assert!(!dir.path().join("photo.txt").exists());
    }

    #[test]
    fn stdout_blocks_are_separated_for_several_files() {
        assert_eq!(stdout_block("a.bin", "0 1", false), "0 1\n");

        let joined = format!(
            "{}{}",
            stdout_block("a.bin", "0 1", true),
            stdout_block("b.bin", "2", true)
        );
        assert_eq!(joined, "==> a.bin <==\n0 1\n\n==> b.bin <==\n2\n\n");
    }

    #[test]
    fn classic_run_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.bin");
        fs::write(&good, [1u8]).unwrap();
        let s = Settings {
            files: vec![good, dir.path().join("missing.bin")],
            policy: Policy::Decimal,
            accept_mode: AcceptMode::BinOnly,
            output: Output::Files(None),
            verbose: false,
            log_file: None,
            no_tui: true,
        };

        let err = run_standard_cli(&s).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 file(s) failed");
        assert!(dir.path().join("good.txt").exists());
    }
}
