use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use simdup::{
    DEFAULT_WINDOW, InputConfig, InputFormat, PipelineError, SearchProgress, SimdupConfig,
    run_pipeline, set_search_progress,
};

const USAGE: &str = "\
usage: simdup --blocks BLOCKS --distance DISTANCE --input INPUT --format FORMAT --output OUTPUT
              [--config CONFIG] [--text_column TEXT] [--id_column ID] [--sample SAMPLE] [--window WINDOW]

Read simhashes or json lines from the input, find all pairs within DISTANCE
bits of each other, and write the resulting clusters to the output.

  --blocks BLOCKS        Number of bit blocks to use
  --distance DISTANCE    Maximum bit distance of matches
  --input INPUT          Path to input ('-' for stdin)
  --format FORMAT        Format of the input, hash or json
  --output OUTPUT        Path to output ('-' for stdout)
  --config CONFIG        Optional YAML config file; flags override it
  --text_column TEXT     Column of the text to hash, json format only
  --id_column ID         Column of the record id, json format only
  --sample SAMPLE        Read at most SAMPLE records from the input
  --window WINDOW        Size of the hashing window (default 5)
";

#[derive(Debug, Default)]
struct CliArgs {
    blocks: Option<String>,
    distance: Option<String>,
    input: Option<String>,
    format: Option<String>,
    output: Option<String>,
    config: Option<String>,
    text_column: Option<String>,
    id_column: Option<String>,
    sample: Option<String>,
    window: Option<String>,
    help: bool,
}

impl CliArgs {
    /// Parse `--flag value` and `--flag=value` forms.
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut cli = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (arg.as_str(), None),
            };
            if flag == "--help" || flag == "-h" {
                cli.help = true;
                continue;
            }
            let slot = match flag {
                "--blocks" => &mut cli.blocks,
                "--distance" => &mut cli.distance,
                "--input" => &mut cli.input,
                "--format" => &mut cli.format,
                "--output" => &mut cli.output,
                "--config" => &mut cli.config,
                "--text_column" => &mut cli.text_column,
                "--id_column" => &mut cli.id_column,
                "--sample" => &mut cli.sample,
                "--window" => &mut cli.window,
                _ => return Err(format!("unknown option {arg:?}\n\n{USAGE}")),
            };
            let value = match inline {
                Some(value) => value,
                None => iter
                    .next()
                    .cloned()
                    .ok_or_else(|| format!("missing value for {flag}\n\n{USAGE}"))?,
            };
            *slot = Some(value);
        }
        Ok(cli)
    }
}

/// Numeric flags that fail to parse count as "not provided".
fn parse_count(value: &str) -> usize {
    value.parse().unwrap_or(0)
}

struct LogProgress;

impl SearchProgress for LogProgress {
    fn permutation_scanned(&self, index: usize, total: usize, matches: usize) {
        info!(permutation = index + 1, total, matches, "permutation scanned");
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(1);
        }
    };
    if cli.help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    run(cli)
}

fn run(cli: CliArgs) -> ExitCode {
    let config = if let Some(path) = &cli.config {
        match SimdupConfig::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error loading {path}: {err}");
                return ExitCode::from(1);
            }
        }
    } else {
        SimdupConfig::default()
    };

    // Flags override whatever the config file set.
    let blocks = cli
        .blocks
        .as_deref()
        .map(parse_count)
        .unwrap_or(config.search.blocks);
    let distance = cli
        .distance
        .as_deref()
        .map(parse_count)
        .unwrap_or(config.search.distance);
    let input_path = cli.input.or(config.input.path).unwrap_or_default();
    let output_path = cli.output.or(config.output.path).unwrap_or_default();

    if blocks == 0 {
        eprintln!("blocks must be provided and > 0");
        return ExitCode::from(2);
    }
    if blocks > 64 {
        eprintln!("blocks must not exceed 64, got {blocks}");
        return ExitCode::from(2);
    }
    if distance == 0 {
        eprintln!("distance must be provided and > 0");
        return ExitCode::from(3);
    }
    if input_path.is_empty() {
        eprintln!("input must be provided and non-empty");
        return ExitCode::from(4);
    }
    if output_path.is_empty() {
        eprintln!("output must be provided and non-empty");
        return ExitCode::from(5);
    }
    if blocks <= distance {
        eprintln!("blocks ({blocks}) must be greater than distance ({distance})");
        return ExitCode::from(6);
    }

    let format = match cli.format.as_deref() {
        Some(name) => match InputFormat::parse(name) {
            Some(format) => format,
            None => {
                eprintln!("format must be hash or json, got {name:?}");
                return ExitCode::from(7);
            }
        },
        None if cli.config.is_some() => config.input.reader.format,
        None => {
            eprintln!("format must be provided (hash or json) and non-empty");
            return ExitCode::from(7);
        }
    };

    let window = {
        let window = cli
            .window
            .as_deref()
            .map(parse_count)
            .unwrap_or(config.input.reader.window);
        if window == 0 { DEFAULT_WINDOW } else { window }
    };
    let input_cfg = InputConfig {
        format,
        text_column: cli.text_column.or(config.input.reader.text_column),
        id_column: cli.id_column.or(config.input.reader.id_column),
        sample: cli
            .sample
            .as_deref()
            .map(parse_count)
            .unwrap_or(config.input.reader.sample),
        window,
        seed: config.input.reader.seed,
    };

    set_search_progress(Some(Arc::new(LogProgress)));

    let reader: Box<dyn BufRead> = if input_path == "-" {
        info!("reading hashes from stdin");
        Box::new(BufReader::new(io::stdin()))
    } else {
        info!(path = %input_path, "reading hashes");
        match File::open(&input_path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(err) => {
                eprintln!("error reading {input_path}: {err}");
                return ExitCode::from(7);
            }
        }
    };
    let writer: Box<dyn Write> = if output_path == "-" {
        info!("writing results to stdout");
        Box::new(io::stdout())
    } else {
        info!(path = %output_path, "writing results");
        match File::create(&output_path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("error writing {output_path}: {err}");
                return ExitCode::from(8);
            }
        }
    };

    let start = Instant::now();
    match run_pipeline(reader, BufWriter::new(writer), &input_cfg, blocks, distance) {
        Ok(summary) => {
            info!(
                hashes = summary.hashes,
                clusters = summary.clusters,
                elapsed_secs = start.elapsed().as_secs_f64(),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(PipelineError::Ingest(err)) => {
            eprintln!("error reading {input_path}: {err}");
            ExitCode::from(7)
        }
        Err(PipelineError::Search(err)) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(PipelineError::Output(err)) => {
            eprintln!("error writing {output_path}: {err}");
            ExitCode::from(8)
        }
    }
}
