use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pitchboard_render::GridStyle;

use crate::commands::{run_delete, run_demo, run_list, run_render, run_replay, run_validate};
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(
    name = "pitchboard",
    about = "Football tactics board: build, check, render and replay boards",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the 11-player demo board.
    Demo(DemoArgs),

    /// Check a board file and print a summary.
    Validate(ValidateArgs),

    /// Render a board file to SVG.
    Render(RenderArgs),

    /// Drive a board session from a JSON event script.
    Replay(ReplayArgs),

    /// List boards saved in a library directory.
    List(ListArgs),

    /// Remove a board from a library directory.
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Output file; prints to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Save into a library directory under this name instead.
    #[arg(long, requires = "library", conflicts_with = "out")]
    pub name: Option<String>,

    /// Library directory used with `--name`.
    #[arg(long, requires = "name")]
    pub library: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Board file, current or legacy format.
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Field box width in pixels.
    #[arg(long, default_value_t = 1000.0)]
    pub width: f64,

    /// Field box height in pixels.
    #[arg(long, default_value_t = 650.0)]
    pub height: f64,

    /// Board configuration JSON.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GridArg {
    None,
    Lines,
    Dots,
}

impl From<GridArg> for GridStyle {
    fn from(arg: GridArg) -> Self {
        match arg {
            GridArg::None => GridStyle::None,
            GridArg::Lines => GridStyle::Lines,
            GridArg::Dots => GridStyle::Dots,
        }
    }
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    pub file: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[command(flatten)]
    pub field: FieldArgs,

    /// Grid overlay; `--grid` alone draws lines.
    #[arg(
        long,
        value_enum,
        num_args = 0..=1,
        default_value_t = GridArg::None,
        default_missing_value = "lines"
    )]
    pub grid: GridArg,

    /// Background color, any CSS color.
    #[arg(long)]
    pub background: Option<String>,

    /// Draw the field rotated for a narrow viewport.
    #[arg(long)]
    pub portrait: bool,
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON array of board events.
    #[arg(long)]
    pub events: PathBuf,

    /// Board file loaded before the first event.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Where to write the resulting board; prints to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Also render the final frame to this SVG file.
    #[arg(long)]
    pub svg: Option<PathBuf>,

    #[command(flatten)]
    pub field: FieldArgs,

    /// Stop at the first rejected event.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    pub library: PathBuf,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub library: PathBuf,

    /// Board name as given to `demo --name`.
    pub name: String,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Demo(args) => run_demo(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Render(args) => run_render(args),
        Commands::Replay(args) => run_replay(args),
        Commands::List(args) => run_list(args),
        Commands::Delete(args) => run_delete(args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_defaults_to_landscape_field() {
        let cli = Cli::parse_from(["pitchboard", "render", "board.json", "--out", "b.svg"]);
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.field.width, 1000.0);
        assert_eq!(args.field.height, 650.0);
        assert!(!args.portrait);
        assert_eq!(args.grid, GridArg::None);
        assert!(args.background.is_none());
    }

    #[test]
    fn bare_grid_flag_means_lines() {
        let parse = |extra: &[&str]| {
            let mut argv = vec!["pitchboard", "render", "board.json", "--out", "b.svg"];
            argv.extend_from_slice(extra);
            match Cli::parse_from(argv).command {
                Commands::Render(args) => GridStyle::from(args.grid),
                _ => panic!("expected render"),
            }
        };
        assert_eq!(parse(&["--grid"]), GridStyle::Lines);
        assert_eq!(parse(&["--grid", "dots"]), GridStyle::Dots);
        assert!(
            Cli::try_parse_from(["pitchboard", "render", "b.json", "--out", "b.svg", "--grid", "hex"])
                .is_err()
        );
    }

    #[test]
    fn demo_name_requires_library() {
        assert!(Cli::try_parse_from(["pitchboard", "demo", "--name", "kickoff"]).is_err());
    }
}
