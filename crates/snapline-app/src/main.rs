//! Demo shell: drags a widget across a small canvas and prints each frame.

use kurbo::{Point, Rect, Size};
use snapline_core::{
    AlignmentEngine, BOX_MATERIAL_ID, Canvas, CanvasError, Config, ConfigError, DragSession,
    MoveData, Pos, SnapError, Widget,
};
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Snap(#[from] SnapError),
    #[error("Failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

fn main() {
    env_logger::init();
    log::info!("Starting Snapline");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut canvas = Canvas::new(Rect::new(40.0, 60.0, 840.0, 660.0));
    let dragged = canvas.add_widget(BOX_MATERIAL_ID, Point::new(20.0, 20.0))?;
    canvas.add_widget(BOX_MATERIAL_ID, Point::new(300.0, 98.0))?;
    canvas.add_widget(BOX_MATERIAL_ID, Point::new(103.0, 400.0))?;
    canvas.add_group(
        Pos::new(500.0, 250.0),
        vec![
            Widget::new(BOX_MATERIAL_ID, Pos::new(500.0, 250.0).with_size(Size::new(60.0, 60.0))),
            Widget::new(BOX_MATERIAL_ID, Pos::new(580.0, 250.0).with_size(Size::new(60.0, 60.0))),
        ],
    )?;
    canvas.cache_all_rects();

    let engine = AlignmentEngine::bind(&canvas, config);
    let mut session = DragSession::new().with_container_guides(true);
    session.begin(&canvas, dragged)?;

    let mut last = Point::new(20.0, 20.0);
    for target in [
        Point::new(60.0, 60.0),
        Point::new(101.0, 97.0),
        Point::new(250.0, 180.0),
        Point::new(398.0, 248.0),
    ] {
        let data = MoveData::new(target.x, target.y, target.x - last.x, target.y - last.y);
        last = target;
        if let Some(frame) = session.on_move(&mut canvas, &engine, data)? {
            println!("{}", serde_json::to_string(&frame)?);
        }
    }

    if let Some(id) = session.end() {
        log::info!("Drag finished for {}", id);
    }
    Ok(())
}
