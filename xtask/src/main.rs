//! Archive packing and release tasks
//!
//! Usage:
//!   cargo xtask pack font res/font/mono.ttf   # Append files as one kind
//!   cargo xtask pack-dir res                  # Append a tree, kind from extension
//!   cargo xtask list [--long]                 # Show what the archive holds
//!   cargo xtask remove res/font/mono.ttf      # Cut records out by name
//!   cargo xtask clear                         # Truncate the archive
//!   cargo xtask package                       # Release build + data into dist/
//!
//! Every archive command takes `--archive <path>` (default `data.dat`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use moge::archive::{Archive, ChunkKind, RemoveOutcome, WriteOutcome, DEFAULT_ARCHIVE, HEADER_SIZE};
use moge::config::CONFIG_FILE;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Archive packing and release tasks for MoGE/wpm")]
struct Cli {
    /// Archive file to operate on
    #[arg(long, global = true, default_value = DEFAULT_ARCHIVE)]
    archive: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append files as records of one kind (font, texture, sound, shader)
    Pack {
        kind: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Append every recognised file under a directory
    PackDir { dir: PathBuf },
    /// List record names
    List {
        /// Also show kind and payload size
        #[arg(long)]
        long: bool,
    },
    /// Remove records by name
    Remove {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Truncate the archive to zero bytes
    Clear,
    /// Build the release binary and copy it with its data into dist/
    Package {
        /// Target platform: windows, macos, linux
        #[arg(long)]
        platform: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    moge::logging::init(LevelFilter::Info).context("Failed to set up logging")?;

    let archive = Archive::new(&cli.archive);
    match cli.command {
        Commands::Pack { kind, files } => pack(&archive, &kind, &files),
        Commands::PackDir { dir } => pack_dir(&archive, &dir),
        Commands::List { long } => list(&archive, long),
        Commands::Remove { names } => remove(&archive, &names),
        Commands::Clear => {
            archive.clear_all()?;
            println!("Cleared {}", archive.path().display());
            Ok(())
        }
        Commands::Package { platform } => package(&cli.archive, platform),
    }
}

fn parse_kind(label: &str) -> Result<ChunkKind> {
    ChunkKind::from_label(label).with_context(|| {
        format!(
            "Unknown kind `{}` (expected one of: font, texture, sound, shader)",
            label
        )
    })
}

/// Append `files` as `kind`, returning how many were new
fn pack(archive: &Archive, kind: &str, files: &[PathBuf]) -> Result<()> {
    let kind = parse_kind(kind)?;
    let mut written = 0;
    for file in files {
        match archive.write_chunk(kind, file)? {
            WriteOutcome::Written { bytes } => {
                println!("+ {} {} ({} bytes)", kind, file.display(), bytes);
                written += 1;
            }
            WriteOutcome::Duplicate => println!("= {} (already packed)", file.display()),
        }
    }
    println!("Packed {} of {} file(s) into {}", written, files.len(), archive.path().display());
    Ok(())
}

/// Files under `dir` with an extension we know how to pack, sorted
fn collect_files(dir: &Path) -> Result<Vec<(ChunkKind, PathBuf)>> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current)
            .with_context(|| format!("Failed to read {}", current.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let kind = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(ChunkKind::from_extension);
            match kind {
                Some(kind) => found.push((kind, path)),
                None => println!("  skipping {}", path.display()),
            }
        }
    }
    found.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(found)
}

fn pack_dir(archive: &Archive, dir: &Path) -> Result<()> {
    let files = collect_files(dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Packing [{bar:30}] {pos}/{len} {msg}")
            .context("Bad progress template")?
            .progress_chars("█▓░"),
    );

    let mut written = 0;
    for (kind, path) in &files {
        pb.set_message(path.display().to_string());
        if let WriteOutcome::Written { .. } = archive.write_chunk(*kind, path)? {
            written += 1;
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("Packed {} new file(s)", written));
    Ok(())
}

fn list(archive: &Archive, long: bool) -> Result<()> {
    if !long {
        for name in archive.list_names()? {
            println!("{}", name);
        }
        return Ok(());
    }

    let spans = archive.list_spans()?;
    for span in &spans {
        let payload = span.size - HEADER_SIZE as u64 - span.name.len() as u64;
        println!("{:<8} {:>10}  {}", span.kind.label(), payload, span.name);
    }
    println!(
        "{} record(s), {} bytes",
        spans.len(),
        spans.iter().map(|s| s.size).sum::<u64>()
    );
    Ok(())
}

fn remove(archive: &Archive, names: &[String]) -> Result<()> {
    for name in names {
        match archive.remove_chunk(name)? {
            RemoveOutcome::Removed { bytes } => println!("- {} ({} bytes)", name, bytes),
            RemoveOutcome::NotPresent => println!("? {} (not in archive)", name),
        }
    }
    Ok(())
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Native release build plus the files it needs at runtime
/// Source and destination of each runtime file shipped next to the binary.
/// Relative sources, the archive included, are taken from the project root.
fn runtime_files(root: &Path, archive: &Path, dist: &Path) -> Vec<(PathBuf, PathBuf)> {
    let data_name = archive.file_name().unwrap_or(archive.as_os_str());
    vec![
        (root.join(archive), dist.join(data_name)),
        (root.join("input.txt"), dist.join("input.txt")),
        (root.join(CONFIG_FILE), dist.join(CONFIG_FILE)),
    ]
}

fn package(archive: &Path, platform: Option<String>) -> Result<()> {
    let root = project_root()?;
    let platform = platform.unwrap_or_else(|| {
        if cfg!(target_os = "windows") {
            "windows".to_string()
        } else if cfg!(target_os = "macos") {
            "macos".to_string()
        } else {
            "linux".to_string()
        }
    });

    let dist = root.join(format!("dist/{}", platform));

    println!("Building native release for {}...", platform);

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", "wpm"]),
    )?;

    let binary_name = if platform == "windows" { "wpm.exe" } else { "wpm" };
    std::fs::copy(
        root.join(format!("target/release/{}", binary_name)),
        dist.join(binary_name),
    )
    .context("Failed to copy the wpm binary")?;

    // Runtime data, whichever of it exists
    for (src, dst) in runtime_files(&root, archive, &dist) {
        if src.exists() {
            std::fs::copy(&src, &dst)
                .with_context(|| format!("Failed to copy {}", src.display()))?;
        } else {
            println!("  {} not found, skipping", src.display());
        }
    }

    println!("Release package ready: dist/{}/", platform);
    Ok(())
}
