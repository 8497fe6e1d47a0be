use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gridcut::editor::{ExportFlagsPatch, ExportOptionsPatch, SubdivideTarget};
use gridcut::export::decode_sources;
use gridcut::{
    export_images, prepare_preview, Axis, Command, Dispatch, EditorState, PresetData,
    SplitterConfig, DEFAULT_MAX_HISTORY, DEFAULT_MAX_SPLITS,
};
use tracing::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gridcut", version, about = "Cut images into slices along guide lines")]
struct Cli {
    /// Maximum number of guide lines per axis
    #[arg(long, global = true, env = "GRIDCUT_MAX_SPLITS", default_value_t = DEFAULT_MAX_SPLITS)]
    max_splits: usize,
    /// Maximum undo depth
    #[arg(long, global = true, env = "GRIDCUT_MAX_HISTORY", default_value_t = DEFAULT_MAX_HISTORY)]
    max_history: usize,
    /// Decode and render on the current thread only
    #[arg(long, global = true)]
    sequential: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write every surviving slice into a zip archive
    Export {
        #[arg(required = true)]
        images: Vec<PathBuf>,
        #[command(flatten)]
        layout: LayoutArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Archive file name (also the default output path)
        #[arg(long)]
        zip_name: Option<String>,
        /// Only export these slice keys, e.g. `0-3`
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
        /// Run the pipeline without writing the archive
        #[arg(long)]
        dry_run: bool,
        #[arg(short, long)]
        output_path: Option<PathBuf>,
    },
    /// List the slices an export would produce
    Preview {
        #[arg(required = true)]
        images: Vec<PathBuf>,
        #[command(flatten)]
        layout: LayoutArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Print previews, including inline PNG data, as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the line positions of an evenly spaced grid
    Grid { size: GridSize },
}

#[derive(Args, Debug, Default)]
struct LayoutArgs {
    /// Preset or session file to start from
    #[arg(long)]
    preset: Option<PathBuf>,
    /// Evenly spaced grid as `HxV` line counts
    #[arg(long)]
    grid: Option<GridSize>,
    /// Horizontal line positions in percent
    #[arg(long = "h", value_delimiter = ',', allow_negative_numbers = true)]
    horizontal: Vec<f64>,
    /// Vertical line positions in percent
    #[arg(long = "v", value_delimiter = ',', allow_negative_numbers = true)]
    vertical: Vec<f64>,
    /// Insert this many lines between every pair of neighbours
    #[arg(long)]
    subdivide: Option<usize>,
}

#[derive(Args, Debug, Default)]
struct OutputArgs {
    /// File name pattern using {i} {index} {w} {h} {findex} {sindex}
    #[arg(long)]
    pattern: Option<String>,
    #[arg(long)]
    min_width: Option<f64>,
    #[arg(long)]
    min_height: Option<f64>,
    #[arg(long)]
    max_width: Option<f64>,
    #[arg(long)]
    max_height: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridSize {
    horizontal: usize,
    vertical: usize,
}

impl FromStr for GridSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (horizontal, vertical) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected HxV, got {s:?}"))?;
        let count = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid line count {part:?}: {e}"))
        };
        Ok(Self {
            horizontal: count(horizontal)?,
            vertical: count(vertical)?,
        })
    }
}

fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let config = SplitterConfig::new(cli.max_splits, cli.max_history, !cli.sequential);
    debug!("Using {:?}", config);

    match cli.command {
        Commands::Export {
            images,
            layout,
            output,
            zip_name,
            only,
            dry_run,
            output_path,
        } => {
            let mut editor = build_editor(config, &layout, &output)?;
            apply(
                &mut editor,
                Command::SetExportOptions(ExportOptionsPatch {
                    zip_name,
                    dry_run: dry_run.then_some(true),
                    ..Default::default()
                }),
            )?;

            let sources = decode_sources(&images, editor.config.enable_parallel)
                .context("Failed to decode source images")?;
            let whitelist: Option<HashSet<String>> =
                (!only.is_empty()).then(|| only.into_iter().collect());

            apply(&mut editor, Command::BeginExport)?;
            let archive = export_images(&editor, &sources, whitelist.as_ref());
            apply(&mut editor, Command::FinishExport)?;
            let archive = archive.context("Failed to build archive")?;

            for entry in &archive.entries {
                println!("{entry}");
            }
            if archive.dry_run {
                info!("Dry run, {} not written", archive.file_name);
                return Ok(());
            }
            let path = output_path.unwrap_or_else(|| PathBuf::from(&archive.file_name));
            fs::write(&path, &archive.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} slices to {}", archive.entries.len(), path.display());
        }
        Commands::Preview {
            images,
            layout,
            output,
            json,
        } => {
            let editor = build_editor(config, &layout, &output)?;
            let sources = decode_sources(&images, editor.config.enable_parallel)
                .context("Failed to decode source images")?;
            let previews = prepare_preview(&editor, &sources);
            if json {
                println!("{}", serde_json::to_string_pretty(&previews)?);
            } else {
                for preview in &previews {
                    println!(
                        "{}\t{}x{}\t{}",
                        preview.key(),
                        preview.width,
                        preview.height,
                        preview.name
                    );
                }
            }
        }
        Commands::Grid { size } => {
            let mut editor = EditorState::new(config);
            apply(&mut editor, Command::Activate)?;
            apply(
                &mut editor,
                Command::GenerateGrid {
                    horizontal: size.horizontal,
                    vertical: size.vertical,
                },
            )?;
            for axis in [Axis::Horizontal, Axis::Vertical] {
                let positions: Vec<String> = editor
                    .splits
                    .axis(axis)
                    .iter()
                    .map(|line| line.position.to_string())
                    .collect();
                println!("{axis}: {}", positions.join(", "));
            }
        }
    }

    Ok(())
}

/// Dispatches a command and turns a rejection into an error.
fn apply(editor: &mut EditorState, command: Command) -> Result<Dispatch> {
    match editor.dispatch(command) {
        Dispatch::Rejected(reason) => bail!("{reason}"),
        outcome => Ok(outcome),
    }
}

/// Builds an active editor from layout and output flags, in the order
/// preset, grid, explicit lines, subdivision.
fn build_editor(
    config: SplitterConfig,
    layout: &LayoutArgs,
    output: &OutputArgs,
) -> Result<EditorState> {
    let mut editor = EditorState::new(config);
    apply(&mut editor, Command::Activate)?;

    if let Some(path) = &layout.preset {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read preset {}", path.display()))?;
        let preset = PresetData::from_json(&json)
            .with_context(|| format!("Failed to load preset {}", path.display()))?;
        apply(&mut editor, Command::ApplyPreset(preset))?;
    }
    if let Some(size) = layout.grid {
        apply(
            &mut editor,
            Command::GenerateGrid {
                horizontal: size.horizontal,
                vertical: size.vertical,
            },
        )?;
    }
    for (axis, positions) in [
        (Axis::Horizontal, &layout.horizontal),
        (Axis::Vertical, &layout.vertical),
    ] {
        for &position in positions {
            apply(&mut editor, Command::AddLine(axis))?;
            let index = editor.splits.axis(axis).len() - 1;
            apply(
                &mut editor,
                Command::SetLinePosition {
                    axis,
                    index,
                    position,
                },
            )?;
        }
    }
    if let Some(count) = layout.subdivide {
        apply(
            &mut editor,
            Command::Subdivide {
                target: SubdivideTarget::Both,
                count,
            },
        )?;
    }

    if let Some(pattern) = &output.pattern {
        apply(
            &mut editor,
            Command::SetExportOptions(ExportOptionsPatch {
                filename_pattern: Some(pattern.clone()),
                ..Default::default()
            }),
        )?;
    }
    apply(
        &mut editor,
        Command::SetExportOptions(ExportOptionsPatch {
            min_width: output.min_width,
            min_height: output.min_height,
            ..Default::default()
        }),
    )?;
    apply(
        &mut editor,
        Command::SetExportMax {
            width: output.max_width,
            height: output.max_height,
        },
    )?;
    let flags = ExportFlagsPatch {
        use_filename_pattern: output.pattern.as_ref().map(|_| true),
        use_min_width: output.min_width.map(|_| true),
        use_min_height: output.min_height.map(|_| true),
        use_max_width: output.max_width.map(|_| true),
        use_max_height: output.max_height.map(|_| true),
        ..Default::default()
    };
    let any_filter = [
        output.min_width,
        output.min_height,
        output.max_width,
        output.max_height,
    ]
    .iter()
    .any(Option::is_some);
    apply(
        &mut editor,
        Command::SetExportFlags(ExportFlagsPatch {
            use_filters: any_filter.then_some(true),
            ..flags
        }),
    )?;

    debug!(
        "Layout has {} horizontal and {} vertical lines",
        editor.splits.horizontal.len(),
        editor.splits.vertical.len()
    );
    Ok(editor)
}
