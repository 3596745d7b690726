use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bevel_engine::input::{
    InputEvent, InputFrame, InputState, KeyState, MouseButton, MouseButtonState,
    PointerButtonEvent,
};
use bevel_engine::logging::{init_logging, LoggingConfig};
use bevel_engine::time::FrameClock;
use bevel_ui::prelude::*;

const SURFACE_W: u32 = 320;
const SURFACE_H: u32 = 120;
const BACKGROUND: Color = Color::rgb(0xd4, 0xd0, 0xc8);
const FRAME_STEP: Duration = Duration::from_millis(120);

/// Command line: `bevel-studio [OUT.png] [FONT.ttf]`.
struct Args {
    out: PathBuf,
    font: Option<PathBuf>,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args_os().skip(1);
        Self {
            out: args.next().map(PathBuf::from).unwrap_or_else(|| "bevel-studio.png".into()),
            font: args.next().map(PathBuf::from),
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let args = Args::parse();

    let fonts = load_fonts(args.font.as_deref())?;
    let mut ui = UiScene::new(Rc::new(fonts));

    // ── widgets ───────────────────────────────────────────────────────────
    let submitted = Rc::new(Cell::new(false));
    let cleared = Rc::new(Cell::new(false));

    let name = ui.add_entry(
        Rect::new(10, 10, 200, 26),
        EntryConfig::new().prompt("Your name").allow_empty(false),
    )?;
    let city = ui.add_entry(
        Rect::new(10, 44, 200, 26),
        EntryConfig::new().prompt("City").font("dejavusans_16"),
    )?;
    let ok = ui.add_button(
        Rect::new(220, 10, 90, 26),
        ButtonConfig::new().text("OK").on_press({
            let submitted = submitted.clone();
            move || submitted.set(true)
        }),
    )?;
    ui.add_button(
        Rect::new(220, 44, 90, 26),
        ButtonConfig::new().text("Clear").color(0xc04040u32).textcolor("white").on_press({
            let cleared = cleared.clone();
            move || cleared.set(true)
        }),
    )?;
    ui.add_button(
        Rect::new(220, 80, 90, 26),
        ButtonConfig::new().text("Disabled").active(false),
    )?;

    // ── scripted frames ───────────────────────────────────────────────────
    let start = Instant::now();
    let mut clock = FrameClock::starting_at(start);
    let mut state = InputState::default();
    let mut frame = InputFrame::default();

    for (i, events) in script().into_iter().enumerate() {
        frame.clear();
        for ev in events {
            state.apply_event(&mut frame, ev);
        }
        let time = clock.tick_at(start + FRAME_STEP * (i as u32 + 1));

        for (id, ev) in ui.frame(&UiInput::from_frame(&state, &frame), time.now) {
            log::info!("frame {}: button {id} {ev:?}", time.frame_index);
        }

        if cleared.take() {
            ui.entries.configure(name, EntryConfig::new().text(""))?;
            ui.entries.configure(city, EntryConfig::new().text(""))?;
        }
        if submitted.take() {
            let valid = ui.entries.get(name).is_some_and(Entry::is_valid);
            log::info!(
                "submitted name={:?} city={:?} valid={valid}",
                ui.entries.get_text(name).unwrap_or_default(),
                ui.entries.get_text(city).unwrap_or_default(),
            );
        }
    }

    log::info!(
        "ok pressed: {}, focused entry: {:?}",
        ui.buttons.get(ok).is_some_and(Button::is_pressed),
        ui.entries.focused(),
    );

    // ── compose ───────────────────────────────────────────────────────────
    let mut surface = Image::filled(SURFACE_W, SURFACE_H, BACKGROUND);
    ui.draw(&mut surface);
    surface
        .save_png(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    log::info!("wrote {}", args.out.display());

    Ok(())
}

/// Loads the font given on the command line, or the first system font found.
///
/// Without any font the demo still runs; text just renders empty.
fn load_fonts(path: Option<&Path>) -> Result<FontSystem> {
    let mut fonts = FontSystem::new();

    let bytes = match path {
        Some(p) => Some(std::fs::read(p).with_context(|| format!("reading font {}", p.display()))?),
        None => [
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/noto/NotoSans-Regular.ttf",
            "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        ]
        .iter()
        .find_map(|p| std::fs::read(p).ok()),
    };

    match bytes {
        Some(bytes) => {
            fonts
                .load_family("DejaVu Sans", false, false, &bytes)
                .context("loading font")?;
        }
        None => log::warn!("no font found; text will not be drawn"),
    }
    Ok(fonts)
}

// ── script ────────────────────────────────────────────────────────────────

fn move_to(x: i32, y: i32) -> InputEvent {
    InputEvent::PointerMoved(Point::new(x, y))
}

fn button(state: MouseButtonState, x: i32, y: i32) -> InputEvent {
    InputEvent::PointerButton(PointerButtonEvent {
        button: MouseButton::PRIMARY,
        state,
        pos: Point::new(x, y),
    })
}

fn press(x: i32, y: i32) -> InputEvent {
    button(MouseButtonState::Pressed, x, y)
}

fn release(x: i32, y: i32) -> InputEvent {
    button(MouseButtonState::Released, x, y)
}

fn key(key: Key, text: Option<char>) -> InputEvent {
    InputEvent::Key { key, state: KeyState::Pressed, text, code: 0, repeat: false }
}

fn typed(s: &str) -> Vec<InputEvent> {
    s.chars().map(|c| key(Key::Unknown(c as u32), Some(c))).collect()
}

/// One inner `Vec` per frame.
fn script() -> Vec<Vec<InputEvent>> {
    let mut frames = vec![
        vec![move_to(50, 20), press(50, 20)],
        vec![release(50, 20)],
        typed("Adx"),
        vec![key(Key::Backspace, None)],
        typed("a"),
        vec![move_to(50, 55), press(50, 55), release(50, 55)],
        typed("Lyon"),
        vec![move_to(260, 20), press(260, 20)],
        vec![release(260, 20)],
        vec![move_to(260, 90), press(260, 90)],
        vec![release(260, 90)],
        vec![key(Key::Escape, None)],
        vec![move_to(50, 20), press(50, 20), release(50, 20)],
    ];
    // Idle frames so the caret blinks a few times.
    frames.extend(std::iter::repeat_with(Vec::new).take(4));
    frames
}
