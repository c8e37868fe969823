use std::fs;
use std::path::Path;

use pitchboard_app::cli::{
    DeleteArgs, DemoArgs, FieldArgs, GridArg, ListArgs, RenderArgs, ReplayArgs, ValidateArgs,
};
use pitchboard_app::{AppError, Cli, Commands, run};
use pitchboard_core::storage::read_board;
use pitchboard_core::{BoardError, Point, StorageError};
use tempfile::tempdir;

fn field() -> FieldArgs {
    FieldArgs {
        width: 1000.0,
        height: 650.0,
        config: None,
    }
}

fn demo_to(path: &Path) {
    run(Cli {
        command: Commands::Demo(DemoArgs {
            out: Some(path.to_path_buf()),
            name: None,
            library: None,
        }),
    })
    .unwrap();
}

fn replay(events: &Path, out: &Path) -> ReplayArgs {
    ReplayArgs {
        events: events.to_path_buf(),
        input: None,
        out: Some(out.to_path_buf()),
        svg: None,
        field: field(),
        strict: false,
    }
}

#[test]
fn demo_writes_a_valid_board() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("demo.json");
    demo_to(&path);

    let board = read_board(&path).unwrap();
    assert_eq!(board.tokens.len(), 11);
    assert_eq!(board.counter, 1);

    run(Cli {
        command: Commands::Validate(ValidateArgs { file: path }),
    })
    .unwrap();
}

#[test]
fn demo_saves_into_library() {
    let dir = tempdir().unwrap();
    run(Cli {
        command: Commands::Demo(DemoArgs {
            out: None,
            name: Some("kick off".to_string()),
            library: Some(dir.path().to_path_buf()),
        }),
    })
    .unwrap();
    assert!(dir.path().join("kick_off.json").exists());

    run(Cli {
        command: Commands::List(ListArgs {
            library: dir.path().to_path_buf(),
        }),
    })
    .unwrap();

    let delete = || {
        run(Cli {
            command: Commands::Delete(DeleteArgs {
                library: dir.path().to_path_buf(),
                name: "kick off".to_string(),
            }),
        })
    };
    delete().unwrap();
    assert!(!dir.path().join("kick_off.json").exists());
    let err = delete().unwrap_err();
    assert!(matches!(err, AppError::Storage(StorageError::NotFound(_))));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn validate_rejects_malformed_board() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"items": [{"id": "", "kind": "cone", "x": 1, "y": 2}]}"#).unwrap();

    let err = run(Cli {
        command: Commands::Validate(ValidateArgs { file: path }),
    })
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::Storage(StorageError::Import(BoardError::MalformedImport(_)))
    ));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn validate_reports_missing_file() {
    let dir = tempdir().unwrap();
    let err = run(Cli {
        command: Commands::Validate(ValidateArgs {
            file: dir.path().join("nope.json"),
        }),
    })
    .unwrap_err();
    assert!(matches!(err, AppError::Storage(StorageError::NotFound(_))));
}

#[test]
fn render_writes_one_group_per_token() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("demo.json");
    let svg = dir.path().join("demo.svg");
    demo_to(&board);

    run(Cli {
        command: Commands::Render(RenderArgs {
            file: board,
            out: svg.clone(),
            field: field(),
            grid: GridArg::Lines,
            background: None,
            portrait: true,
        }),
    })
    .unwrap();

    let markup = fs::read_to_string(&svg).unwrap();
    assert!(markup.contains(r#"width="650" height="1000""#));
    assert_eq!(markup.matches(r#"class="token""#).count(), 11);
    assert!(markup.contains(r#"class="grid""#));
}

#[test]
fn render_rejects_empty_field() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("demo.json");
    demo_to(&board);

    let err = run(Cli {
        command: Commands::Render(RenderArgs {
            file: board,
            out: dir.path().join("x.svg"),
            field: FieldArgs {
                width: 0.0,
                height: 650.0,
                config: None,
            },
            grid: GridArg::None,
            background: None,
            portrait: false,
        }),
    })
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn render_dotted_grid_on_custom_background() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("demo.json");
    let svg = dir.path().join("demo.svg");
    demo_to(&board);

    run(Cli {
        command: Commands::Render(RenderArgs {
            file: board.clone(),
            out: svg.clone(),
            field: field(),
            grid: GridArg::Dots,
            background: Some("teal".to_string()),
            portrait: false,
        }),
    })
    .unwrap();

    let markup = fs::read_to_string(&svg).unwrap();
    assert!(markup.contains(r#"<g class="grid" data-style="dots">"#));
    assert!(markup.contains(r#"class="background" width="1000" height="650" fill="rgb(0,128,128)""#));

    let err = run(Cli {
        command: Commands::Render(RenderArgs {
            file: board,
            out: svg,
            field: field(),
            grid: GridArg::None,
            background: Some("grass".to_string()),
            portrait: false,
        }),
    })
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument { .. }));
}

#[test]
fn replay_places_numbered_players_and_drags() {
    let dir = tempdir().unwrap();
    let events = dir.path().join("events.json");
    let out = dir.path().join("board.json");
    fs::write(
        &events,
        r#"[
            {"type": "select_tool", "tool": {"place": "player-filled"}},
            {"type": "field_click", "position": {"x": 150, "y": 220}},
            {"type": "field_click", "position": {"x": 160, "y": 230}},
            {"type": "clear_tool"},
            {"type": "palette_down", "template": "cone", "position": {"x": 5, "y": 5}, "time_ms": 0},
            {"type": "tick", "time_ms": 300},
            {"type": "pointer_up", "location": {"absolute": {"x": 400, "y": 300}}, "time_ms": 320},
            {"type": "remove", "id": "no-such-token"}
        ]"#,
    )
    .unwrap();

    run(Cli {
        command: Commands::Replay(replay(&events, &out)),
    })
    .unwrap();

    let board = read_board(&out).unwrap();
    assert_eq!(board.tokens.len(), 3);
    assert_eq!(board.counter, 3);
    let numbers: Vec<_> = board.tokens.iter().filter_map(|t| t.number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(board.tokens[2].position, Point::new(400.0, 300.0));
}

#[test]
fn replay_strict_stops_at_rejected_event() {
    let dir = tempdir().unwrap();
    let events = dir.path().join("events.json");
    let out = dir.path().join("board.json");
    fs::write(
        &events,
        r#"[
            {"type": "load_demo"},
            {"type": "recolor", "color": "  "},
            {"type": "clear_all"}
        ]"#,
    )
    .unwrap();

    let mut args = replay(&events, &out);
    args.strict = true;
    let err = run(Cli {
        command: Commands::Replay(args),
    })
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::Replay {
            index: 1,
            source: BoardError::InvalidColor(_)
        }
    ));
    assert!(!out.exists());

    // Lenient replay skips the bad event and carries on.
    run(Cli {
        command: Commands::Replay(replay(&events, &out)),
    })
    .unwrap();
    assert!(read_board(&out).unwrap().tokens.is_empty());
}

#[test]
fn replay_rejects_unknown_event() {
    let dir = tempdir().unwrap();
    let events = dir.path().join("events.json");
    fs::write(&events, r#"[{"type": "teleport"}]"#).unwrap();

    let err = run(Cli {
        command: Commands::Replay(replay(&events, &dir.path().join("b.json"))),
    })
    .unwrap_err();
    assert!(matches!(err, AppError::Json(_)));
}
