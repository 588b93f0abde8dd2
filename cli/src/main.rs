//! undocx CLI - Word document text and image extraction tool
//!
//! A command-line front end over the undocx library.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use undocx::render::JsonFormat;
use undocx::{DocxParseResult, ParseOptions};

/// Default upper bound on input size: 25 MiB.
const DEFAULT_MAX_SIZE: u64 = 25 * 1024 * 1024;

/// Extract text and images from Word documents
#[derive(Parser)]
#[command(
    name = "undocx",
    author = "iyulab",
    version,
    about = "Extract text and images from .docx files",
    long_about = "undocx - Word document extraction tool.\n\n\
                  Reads .docx files and prints their paragraphs as plain text or JSON,\n\
                  or writes their embedded raster images to disk."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Reject input files larger than this many bytes
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: u64,

    /// Minimum decompressed size for an image to be kept
    #[arg(long, global = true, default_value_t = undocx::options::DEFAULT_MIN_IMAGE_BYTES)]
    min_image_bytes: usize,

    /// Skip image extraction
    #[arg(long, global = true)]
    no_images: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl GlobalArgs {
    fn options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_max_input_bytes(self.max_size)
            .with_min_image_bytes(self.min_image_bytes)
            .with_images(!self.no_images)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document text
    Text {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the full parse result as JSON
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show document statistics and warnings
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Write embedded images to a directory
    Images {
        /// Input file path
        input: PathBuf,

        /// Output directory for images
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.global.options();

    match cli.command {
        Commands::Text { input, output } => {
            let result = parse_with_spinner(&input, &options.with_images(false))?;
            write_output(output.as_ref(), &result.text)?;

            if let Some(path) = output {
                println!(
                    "{} Extracted {} paragraphs to {}",
                    "✓".green().bold(),
                    result.paragraphs.len(),
                    path.display()
                );
            }
            print_warnings(&result);
        }

        Commands::Json {
            input,
            output,
            compact,
        } => {
            let result = parse_with_spinner(&input, &options)?;

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = undocx::render::to_json(&result, format)?;
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!("{} Converted to JSON: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Info { input } => {
            let result = parse_with_spinner(&input, &options)?;

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Paragraphs".bold(), result.paragraphs.len());
            println!("{}: {}", "Images".bold(), result.images.len());
            println!("{}: {}", "Words".bold(), result.word_count());
            println!("{}: {}", "Characters".bold(), result.text.chars().count());

            if result.has_warnings() {
                println!("\n{}", "Warnings".yellow().bold());
                println!("{}", "─".repeat(40));
                for warning in &result.warnings {
                    println!("- {}", warning);
                }
            }
        }

        Commands::Images { input, output } => {
            let result = parse_with_spinner(&input, &options.with_images(true))?;

            fs::create_dir_all(&output)?;

            let stem = input
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            let mut count = 0;
            for (index, uri) in result.images.iter().enumerate() {
                let (extension, data) = decode_data_uri(uri)?;
                let path = output.join(format!("{}_image{}.{}", stem, index + 1, extension));
                fs::write(&path, data)?;
                count += 1;
            }

            if count > 0 {
                println!(
                    "{} Extracted {} images to {}",
                    "✓".green().bold(),
                    count,
                    output.display()
                );
            } else {
                println!("{} No images found in document", "!".yellow().bold());
            }
            print_warnings(&result);
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn parse_with_spinner(input: &Path, options: &ParseOptions) -> undocx::Result<DocxParseResult> {
    if let Ok(meta) = fs::metadata(input) {
        log::debug!("{}: {} bytes", input.display(), meta.len());
    }
    log::debug!("parse options: {:?}", options);
    let pb = create_spinner("Parsing document...");
    let result = undocx::parse_file(input, options);
    pb.finish_and_clear();
    result
}

/// Split a `data:<mime>;base64,<payload>` URI into a file extension and bytes.
fn decode_data_uri(uri: &str) -> Result<(&'static str, Vec<u8>), Box<dyn std::error::Error>> {
    let (header, payload) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .ok_or("malformed data URI")?;

    let extension = match header {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/webp" => "webp",
        _ => "bin",
    };

    Ok((extension, STANDARD.decode(payload)?))
}

fn print_warnings(result: &DocxParseResult) {
    for warning in &result.warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }
}

fn print_version() {
    println!("{} {}", "undocx".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Word document text and image extraction");
    println!();
    println!("Supported formats: DOCX");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
