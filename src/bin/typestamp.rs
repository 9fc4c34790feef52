use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "typestamp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten a design document to a PNG at the background's native size.
    Export(ExportArgs),
    /// List the families found in a font directory.
    Fonts(FontsArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input design JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory of .ttf/.otf files to register.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Stamp only these layer ids.
    #[arg(long, num_args = 1..)]
    only: Vec<u64>,
}

#[derive(Parser, Debug)]
struct FontsArgs {
    /// Directory of .ttf/.otf files.
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read design '{}'", args.in_path.display()))?;
    let doc = typestamp::DesignDoc::from_json(&json)?;
    let base_dir = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let design = doc.into_design(base_dir)?;

    let mut fonts = typestamp::FontBook::new();
    if let Some(dir) = &args.fonts {
        let families = fonts.load_dir(dir)?;
        tracing::info!(count = families.len(), dir = %dir.display(), "registered fonts");
    }

    let mut exporter = typestamp::Exporter::default();
    let ticket = exporter.begin();
    let raster = if args.only.is_empty() {
        exporter.export(&design, &mut fonts, &ticket)?
    } else {
        let ids: Vec<typestamp::LayerId> =
            args.only.iter().copied().map(typestamp::LayerId).collect();
        exporter.stamp(&design, &mut fonts, &ids, &ticket)?
    };
    let png = typestamp::encode_png(&raster)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({}x{})", args.out.display(), raster.width(), raster.height());
    Ok(())
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let mut fonts = typestamp::FontBook::new();
    fonts.load_dir(&args.dir)?;
    for family in fonts.families() {
        println!("{family}");
    }
    Ok(())
}
