use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};

use wadpack::pipeline::{self, LumpType, PackOptions, Progress, Silent, Stdout};
use wadpack::texture::{ColorSource, Dithering, ScalingPolicy};

#[derive(Parser)]
#[command(name = "wad", version, about = "Add images to a Quake WAD2 archive")]
struct Cli {
    /// Archive to create, or to append to if it exists
    #[arg(value_name = "FILE.WAD")]
    archive: PathBuf,

    /// Input files; read one per line from stdin when omitted
    #[arg(value_name = "LIST")]
    inputs: Vec<PathBuf>,

    /// Lump type to store inputs as
    #[arg(short = 't', long = "type", value_enum, ignore_case = true, default_value = "MIPTEX")]
    lump_type: LumpTypeArg,

    /// Keep the indices of palette-based images instead of quantizing
    #[arg(short, long)]
    raw_indexed: bool,

    /// Resample mip levels smoothly
    #[arg(short, long)]
    smooth_mip: bool,

    /// Resample mip levels smoothly unless the texture has fullbright pixels
    #[arg(short = 'S', long)]
    smart_mip: bool,

    /// Dither when mapping colors onto the palette
    #[arg(short, long)]
    dither: bool,

    /// Do not print progress lines
    #[arg(short, long)]
    quiet: bool,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
#[value(rename_all = "UPPER")]
enum LumpTypeArg {
    Lump,
    Qpic,
    Miptex,
}

impl From<LumpTypeArg> for LumpType {
    fn from(arg: LumpTypeArg) -> Self {
        match arg {
            LumpTypeArg::Lump => LumpType::Lump,
            LumpTypeArg::Qpic => LumpType::Qpic,
            LumpTypeArg::Miptex => LumpType::Miptex,
        }
    }
}

impl Cli {
    fn options(&self) -> PackOptions {
        PackOptions {
            lump_type: self.lump_type.into(),
            color_source: if self.raw_indexed {
                ColorSource::AssumeSourcePalette
            } else {
                ColorSource::Quantize
            },
            scaling: ScalingPolicy::from_flags(self.smooth_mip, self.smart_mip),
            dithering: if self.dither {
                Dithering::FloydSteinberg
            } else {
                Dithering::None
            },
        }
    }
}

fn read_list() -> Result<Vec<PathBuf>> {
    let stdin = io::stdin();

    if stdin.is_terminal() {
        return Ok(Vec::new());
    }

    let mut inputs = Vec::new();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input list")?;
        let line = line.trim();

        if !line.is_empty() {
            inputs.push(PathBuf::from(line));
        }
    }

    Ok(inputs)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if cli.verbose > 0 {
        logger.filter_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    }

    logger.init();

    let inputs = if cli.inputs.is_empty() {
        read_list()?
    } else {
        cli.inputs.clone()
    };

    if inputs.is_empty() {
        bail!("No input files given");
    }

    let mut progress: Box<dyn Progress> = if cli.quiet {
        Box::new(Silent)
    } else {
        Box::new(Stdout)
    };

    pipeline::pack_archive(&cli.archive, &inputs[..], &cli.options(), progress.as_mut())
        .with_context(|| format!("Failed to pack `{}`", cli.archive.display()))?;

    Ok(())
}
