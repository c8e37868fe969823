//! Subcommand implementations.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use kurbo::{Rect, Size};
use pitchboard_core::demo::demo_board;
use pitchboard_core::storage::{read_board, write_board};
use pitchboard_core::{Board, BoardConfig, BoardEvent, FileStorage, Orientation};
use pitchboard_core::tokens::parse_css_color;
use pitchboard_render::{GridStyle, RenderContext, Renderer, SvgRenderer};

use crate::cli::{
    DeleteArgs, DemoArgs, FieldArgs, ListArgs, RenderArgs, ReplayArgs, ValidateArgs,
};
use crate::error::{AppError, Result};

pub fn run_demo(args: DemoArgs) -> Result<()> {
    let file = demo_board();
    match (args.library, args.name, args.out) {
        (Some(library), Some(name), _) => {
            let storage = FileStorage::new(library)?;
            storage.save(&name, &file)?;
            println!("{}", storage.board_path(&name).display());
        }
        (_, _, Some(out)) => write_board(&out, &file)?,
        _ => println!("{}", file.to_json()?),
    }
    Ok(())
}

pub fn run_validate(args: ValidateArgs) -> Result<()> {
    let board = read_board(&args.file)?;
    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for token in &board.tokens {
        *kinds.entry(token.kind().name()).or_default() += 1;
    }
    let breakdown = kinds
        .iter()
        .map(|(kind, count)| format!("{count} {kind}"))
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{}: {} tokens ({}), layout {}, next number {}",
        args.file.display(),
        board.tokens.len(),
        if breakdown.is_empty() { "none" } else { breakdown.as_str() },
        board.layout.name(),
        board.counter
    );
    Ok(())
}

pub fn run_render(args: RenderArgs) -> Result<()> {
    let mut board = session(&args.field)?;
    board.import(read_board(&args.file)?);

    let (size, orientation) = if args.portrait {
        (
            Size::new(args.field.height, args.field.width),
            Orientation::Portrait,
        )
    } else {
        (
            Size::new(args.field.width, args.field.height),
            Orientation::Landscape,
        )
    };
    let mut ctx = RenderContext::from_board(&board, size).with_orientation(orientation);
    let grid = GridStyle::from(args.grid);
    if grid != GridStyle::None {
        ctx = ctx.with_grid(grid, board.config().grid_size);
    }
    if let Some(background) = &args.background {
        let color = parse_css_color(background)
            .ok_or_else(|| AppError::invalid(format!("invalid background color {background:?}")))?;
        ctx = ctx.with_background(color);
    }
    write_svg(&args.out, &ctx)
}

pub fn run_replay(args: ReplayArgs) -> Result<()> {
    let script = read_text(&args.events)?;
    let events: Vec<BoardEvent> = serde_json::from_str(&script)?;

    let mut board = session(&args.field)?;
    if let Some(input) = &args.input {
        board.import(read_board(input)?);
    }

    let mut rejected = 0usize;
    for (index, event) in events.into_iter().enumerate() {
        match board.handle(event) {
            Ok(outcome) => log::debug!("event {index}: {outcome:?}"),
            Err(source) if args.strict => return Err(AppError::Replay { index, source }),
            Err(error) => {
                log::warn!("event {index} rejected: {error}");
                rejected += 1;
            }
        }
    }
    log::info!(
        "Replay finished: {} tokens, revision {}, {} events rejected",
        board.tokens().len(),
        board.revision(),
        rejected
    );

    let file = board.export();
    match &args.out {
        Some(out) => write_board(out, &file)?,
        None => println!("{}", file.to_json()?),
    }

    if let Some(svg) = &args.svg {
        let size = board
            .view()
            .field_box
            .map(|rect| rect.size())
            .unwrap_or(Size::new(args.field.width, args.field.height));
        write_svg(svg, &RenderContext::from_board(&board, size))?;
    }
    Ok(())
}

pub fn run_list(args: ListArgs) -> Result<()> {
    let storage = FileStorage::new(args.library)?;
    for name in storage.list()? {
        println!("{name}");
    }
    Ok(())
}

pub fn run_delete(args: DeleteArgs) -> Result<()> {
    let storage = FileStorage::new(args.library)?;
    storage.delete(&args.name)?;
    log::info!("Deleted board {}", args.name);
    Ok(())
}

/// A board with its field box measured at the origin.
fn session(field: &FieldArgs) -> Result<Board> {
    if !(field.width.is_finite() && field.height.is_finite())
        || field.width <= 0.0
        || field.height <= 0.0
    {
        return Err(AppError::invalid(format!(
            "field size must be positive, got {}x{}",
            field.width, field.height
        )));
    }
    let config = match &field.config {
        Some(path) => BoardConfig::from_json(&read_text(path)?)?,
        None => BoardConfig::default(),
    };
    let mut board = Board::new(config);
    board.measure_field(Some(Rect::new(0.0, 0.0, field.width, field.height)));
    Ok(board)
}

fn write_svg(path: &Path, ctx: &RenderContext) -> Result<()> {
    let mut renderer = SvgRenderer::new();
    renderer.build_scene(ctx)?;
    fs::write(path, renderer.output()).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Rendered {} tokens to {}", ctx.tokens.len(), path.display());
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}
