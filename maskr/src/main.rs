use maskr::{apply_region, combine, describe, image_to_mask, invert, mask_to_image, Operation};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use libbitmask::{DrawMode, ImportOptions, Rect};

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 1;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = clap::ArgAction::Count)]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// prints the outside value, count and boxes of a mask
    Info {
        /// The mask document
        mask_file: PathBuf,
    },

    /// draws, erases or toggles a rectangle
    Rect {
        #[arg(allow_negative_numbers = true)]
        x1: i32,
        #[arg(allow_negative_numbers = true)]
        y1: i32,
        #[arg(allow_negative_numbers = true)]
        x2: i32,
        #[arg(allow_negative_numbers = true)]
        y2: i32,
        /// draw, erase or toggle
        #[arg(short, long, default_value = "draw")]
        mode: DrawMode,
        /// The mask to start from, empty if absent
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// The output file name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// combines two masks into a new one
    Combine {
        lhs: PathBuf,
        rhs: PathBuf,
        #[arg(long, value_enum, default_value_t = Operation::Merge)]
        op: Operation,
        /// The output file name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// flips every pixel of a mask
    Invert {
        mask_file: PathBuf,
        /// The output file name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// renders a mask to a PNG image
    Export {
        mask_file: PathBuf,
        /// The output file name
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Rectangle to render instead of the bounding box
        #[arg(long, num_args = 4, value_names = ["X1", "Y1", "X2", "Y2"], allow_negative_numbers = true)]
        clip: Option<Vec<i32>>,
    },

    /// selects the bright pixels of an image
    Import {
        img_file: PathBuf,
        /// The output file name
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Lowest selected luma
        #[arg(short, long, default_value_t = 128)]
        threshold: u8,
        /// Mask column of the image's first pixel
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        x: i32,
        /// Mask row of the image's first pixel
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        y: i32,
    },
}

/// `output`, or `input` renamed with `suffix` next to it
fn output_name(output: Option<PathBuf>, input: &Path, suffix: &str) -> Result<PathBuf> {
    if let Some(output) = output {
        return Ok(output);
    }
    let mut output = PathBuf::new();
    let Some(dir) = input.parent() else {
        bail!("Invalid input file");
    };
    let Some(Some(filename)) = input.file_stem().map(|os| os.to_str()) else {
        bail!("Invalid input file");
    };
    output.push(dir);
    output.push(format!("{filename}.{suffix}"));
    info!("output name: {}", output.display());
    Ok(output)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .init();

    match cli.command {
        Commands::Info { mask_file } => {
            println!("{}", describe(&mask_file)?);
        }
        Commands::Rect {
            x1,
            y1,
            x2,
            y2,
            mode,
            input,
            output,
        } => {
            let output = match (output, &input) {
                (Some(output), _) => output,
                (None, Some(input)) => output_name(None, input, "rect.xml")?,
                (None, None) => bail!("An output file is required without an input mask"),
            };
            apply_region(input.as_deref(), Rect::new(x1, y1, x2, y2), mode, &output)?;
        }
        Commands::Combine {
            lhs,
            rhs,
            op,
            output,
        } => {
            let output = output_name(output, &lhs, "combined.xml")?;
            combine(&lhs, &rhs, op, &output)?;
        }
        Commands::Invert { mask_file, output } => {
            let output = output_name(output, &mask_file, "inverted.xml")?;
            invert(&mask_file, &output)?;
        }
        Commands::Export {
            mask_file,
            output,
            clip,
        } => {
            let clip = match clip.as_deref() {
                None => None,
                Some(&[x1, y1, x2, y2]) => Some(Rect::new(x1, y1, x2, y2)),
                Some(_) => bail!("A clip rectangle takes four coordinates"),
            };
            let output = output_name(output, &mask_file, "png")?;
            mask_to_image(&mask_file, clip, &output)?;
        }
        Commands::Import {
            img_file,
            output,
            threshold,
            x,
            y,
        } => {
            let output = output_name(output, &img_file, "xml")?;
            let options = ImportOptions::builder()
                .threshold(threshold)
                .origin((x, y))
                .build();
            image_to_mask(&img_file, options, &output)?;
        }
    }
    Ok(())
}
