// What you SEE:
// • The clue on top, a white canvas, a toolbar with swatches, width slider and buttons.
// • Hold Left Mouse on the canvas to draw a smoothed stroke.
// • Z/U undo, Y/R redo, N new clue, C reset (both ask Y/N first).
// • 1..7 pick a color, [ and ] change the width. ESC quits.

use clap::Parser;
use draw_the_clue::config::Config;
use draw_the_clue::draw::{
    BACKGROUND, Drawer, WindowConfirm, composite_canvas, draw_crosshair, draw_header, draw_toolbar,
};
use draw_the_clue::input::PointerTracker;
use draw_the_clue::palette::{Color, StrokeStyle};
use draw_the_clue::storage::JsonFileStore;
use draw_the_clue::types::FrameBuffer;
use draw_the_clue::ui::{Action, Layout, UiTarget};
use draw_the_clue::{DrawingSession, Error, logging};
use minifb::Key;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Draw the clue before anyone guesses it")]
struct Args {
    /// Settings file (JSON). Missing file means defaults.
    #[arg(long, default_value = "draw_the_clue.settings.json")]
    config: PathBuf,

    /// Where the drawing is kept between runs; overrides the settings file.
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Debug logging (RUST_LOG is honoured).
    #[arg(long)]
    debug: bool,

    /// Write the effective settings back to the settings file, then exit.
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let mut config = Config::load(&args.config)?;
    if let Some(storage) = args.storage {
        config.storage_path = storage;
    }
    logging::init(args.debug || config.debug_logging);
    if args.save_config {
        config.save(&args.config)?;
        tracing::info!(path = %args.config.display(), "settings written");
        return Ok(());
    }

    /* --- Session: restore finishes before any input is wired ---
       Visual: the first frame already shows the saved drawing. */
    let (canvas_w, canvas_h) = config.canvas_size();
    let store = JsonFileStore::open(&config.storage_path)?;
    let style = StrokeStyle::new(config.color, config.stroke_width);
    let mut rng = rand::rng();
    let mut session = DrawingSession::open(canvas_w, canvas_h, style, store, &mut rng)?;

    /* --- Window + screen buffer --- */
    let layout = Layout::new(canvas_w, canvas_h);
    let mut title = session.title();
    let mut drawer = Drawer::new(&title, layout.width, layout.height)?;
    let mut screen = FrameBuffer::new(layout.width, layout.height, BACKGROUND);

    let mut tracker = PointerTracker::default();
    let mut ui_was_down = false;
    let mut dragging_slider = false;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Keyboard */
        let mut action = None;
        for key in drawer.keys_pressed() {
            match key {
                Key::Z | Key::U => action = Some(Action::Undo),
                Key::Y | Key::R => action = Some(Action::Redo),
                Key::N => action = Some(Action::NewClue),
                Key::C => action = Some(Action::Reset),
                Key::LeftBracket => session.set_stroke_width(session.style().width().saturating_sub(1)),
                Key::RightBracket => session.set_stroke_width(session.style().width() + 1),
                other => {
                    if let Some(color) = shortcut_color(other) {
                        session.select_color(color);
                    }
                }
            }
        }

        /* 2) Mouse: toolbar clicks, slider drag, then canvas strokes */
        let pos = drawer.mouse_pos();
        let down = drawer.left_mouse_down();
        if down && !ui_was_down && !session.is_drawing() {
            match pos.and_then(|p| layout.hit(p)) {
                Some(UiTarget::Swatch(color)) => session.select_color(color),
                Some(UiTarget::Slider) => dragging_slider = true,
                Some(UiTarget::Button(a)) => action = Some(a),
                None => {}
            }
        }
        if !down {
            dragging_slider = false;
        }
        if let (true, Some(p)) = (dragging_slider, pos) {
            session.set_stroke_width(layout.slider_value(p.0));
        }
        ui_was_down = down;

        for event in tracker.update(pos, down, layout.canvas) {
            session.handle(event);
        }

        /* 3) Buttons / shortcuts. Nothing fires mid-stroke */
        if session.is_drawing() {
            action = None;
        }
        match action {
            Some(Action::Undo) => {
                session.undo();
            }
            Some(Action::Redo) => {
                session.redo();
            }
            Some(Action::NewClue) => {
                let mut confirm = WindowConfirm { drawer: &mut drawer, screen: &screen };
                session.refresh_clue(&mut confirm, &mut rng);
            }
            Some(Action::Reset) => {
                let mut confirm = WindowConfirm { drawer: &mut drawer, screen: &screen };
                session.reset(&mut confirm);
            }
            None => {}
        }

        if session.title() != title {
            title = session.title();
            drawer.set_title(&title);
        }

        /* 4) Compose the frame
           Visual: header, canvas over white, toolbar, crosshair when idle. */
        screen.fill(BACKGROUND);
        draw_header(&mut screen, session.clue());
        composite_canvas(&mut screen, layout.canvas, session.canvas());
        let history = session.history();
        draw_toolbar(&mut screen, &layout, session.style(), history.undo_len() > 0, history.redo_len() > 0);
        if let Some(p) = pos.filter(|&p| layout.canvas.contains(p) && !session.is_drawing()) {
            draw_crosshair(&mut screen, p.0 as i32, p.1 as i32, 8, session.style().color.rgba().to_u32());
        }

        /* 5) Present */
        drawer.present(&screen)?;
    }

    tracing::info!("bye");
    Ok(())
}

fn shortcut_color(key: Key) -> Option<Color> {
    let n = match key {
        Key::Key1 => 1,
        Key::Key2 => 2,
        Key::Key3 => 3,
        Key::Key4 => 4,
        Key::Key5 => 5,
        Key::Key6 => 6,
        Key::Key7 => 7,
        _ => return None,
    };
    Color::from_shortcut(n)
}
