use subcue::{read_text, Cue, Format, ParseOptions, Parser};

use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subcue=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "List the cues of a SubRip or WebVTT subtitle file")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to read from. If not supplied, the subtitles will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FORMAT",
        help = "The subtitle format, 'srt' or 'vtt'. Guessed from the file extension when not supplied."
    )]
    format: Option<Format>,
    #[arg(
        short,
        long,
        help = "Require both timecodes to be valid, keep a final cue without a trailing blank line and accept CRLF line endings in SubRip files."
    )]
    strict: bool,
    #[arg(
        short,
        long,
        help = "Print a summary of skipped blocks to standard error."
    )]
    report: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None if cli.input == "-" => {
            return Err(anyhow!("--format is required when reading from standard input."))
        }
        None => Format::from_extension(&cli.input).ok_or_else(|| {
            anyhow!(
                "Cannot tell the subtitle format of '{}', use --format.",
                cli.input
            )
        })?,
    };

    let data = if cli.input == "-" {
        read_text(io::stdin().lock()).context("Failed to read from stdin")?
    } else {
        let file = std::fs::File::open(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?;
        read_text(file).context(format!("Failed to read input file: '{}'", cli.input))?
    };

    let options = if cli.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::default()
    };
    let parser = Parser::new(format).with_options(options);
    let (cues, report) = parser.parse_with_report(&data);
    tracing::info!(%format, cues = cues.len(), "parsed {}", cli.input);

    if cues.is_empty() {
        tracing::info!("no cues found in {}", cli.input);
    }

    let stdout = io::stdout();
    list_cues(stdout.lock(), &cues).context("Failed to write to stdout")?;

    if cli.report {
        eprintln!("{}", report);
    }

    Ok(())
}

fn list_cues<W: Write>(mut out: W, cues: &[Cue]) -> io::Result<()> {
    for cue in cues {
        writeln!(out, "{}", cue)?;
    }
    out.flush()
}
