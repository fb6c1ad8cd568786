use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use rand::seq::SliceRandom;
use raylib::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod texture_loader;

use crate::texture_loader::{load_sorted_image_paths, load_texture_with_exif_rotation};
use slider::constants::*;
use slider::{Engine, GridSlider, Markup, OptionsPatch, Slider, SliderCommand};

/// Browse a directory of images with a slider, optionally laid out on a grid.
#[derive(Parser, Debug)]
#[command(name = "slider", version)]
struct Args {
    /// Directory holding the images
    directory: PathBuf,

    /// Lay the images out on a grid with this many columns
    #[arg(long)]
    columns: Option<usize>,

    /// Wrap around at both ends (linear mode)
    #[arg(long)]
    circular: bool,

    /// Wrap around vertically (grid mode)
    #[arg(long)]
    vertical_circular: bool,

    /// Stop at the first and last column (grid mode)
    #[arg(long)]
    no_horizontal_circular: bool,

    /// Transition duration in milliseconds
    #[arg(long, default_value_t = DEFAULT_DURATION_MS)]
    duration: u64,

    /// Easing curve, e.g. linear, swing, easeOutCubic
    #[arg(long, default_value = DEFAULT_EASING)]
    easing: String,

    /// Index of the first image shown
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Start in vertical orientation
    #[arg(long)]
    vertical: bool,

    /// Shuffle the images instead of sorting them by name
    #[arg(long)]
    shuffle: bool,

    /// Raw options JSON, applied over everything else
    #[arg(long)]
    options: Option<String>,
}

type Keymap = fn(KeyboardKey) -> Option<SliderCommand>;

const KEYS: [KeyboardKey; 5] = [
    KeyboardKey::KEY_LEFT,
    KeyboardKey::KEY_RIGHT,
    KeyboardKey::KEY_UP,
    KeyboardKey::KEY_DOWN,
    KeyboardKey::KEY_HOME,
];

fn jump_home(key: KeyboardKey) -> Option<SliderCommand> {
    matches!(key, KeyboardKey::KEY_HOME).then_some(SliderCommand::GotoSlide {
        slide_number: 0,
        counterwise: true,
        no_animation: true,
    })
}

fn linear_keys(key: KeyboardKey) -> Option<SliderCommand> {
    match key {
        KeyboardKey::KEY_RIGHT | KeyboardKey::KEY_DOWN => Some(SliderCommand::Next),
        KeyboardKey::KEY_LEFT | KeyboardKey::KEY_UP => Some(SliderCommand::Prev),
        _ => jump_home(key),
    }
}

fn grid_keys(key: KeyboardKey) -> Option<SliderCommand> {
    match key {
        KeyboardKey::KEY_UP => Some(SliderCommand::Up { slide: None }),
        KeyboardKey::KEY_DOWN => Some(SliderCommand::Down { slide: None }),
        KeyboardKey::KEY_LEFT => Some(SliderCommand::Left { slide: None }),
        KeyboardKey::KEY_RIGHT => Some(SliderCommand::Right { slide: None }),
        _ => jump_home(key),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut paths = load_sorted_image_paths(&args.directory)?;
    if args.shuffle {
        paths.shuffle(&mut rand::rng());
    }
    info!(directory = %args.directory.display(), images = paths.len(), "loading slides");

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH, RENDER_HEIGHT)
        .title("Slider")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load textures, one slide key per image ---
    let mut keys = Vec::new();
    let mut textures = HashMap::new();
    for (index, path) in paths.iter().enumerate() {
        match load_texture_with_exif_rotation(&mut rl, &thread, path) {
            Ok(texture) => {
                let key = format!("image-{index}");
                keys.push(key.clone());
                textures.insert(key, texture);
            }
            Err(e) => warn!(error = %e, "skipping image"),
        }
    }
    if keys.is_empty() {
        bail!("no slides were loaded from {}", args.directory.display());
    }

    let mut markup = Markup::new().slides(keys.iter().cloned()).handlers();
    if args.vertical {
        markup = markup.vertical();
    }
    if let Some(raw) = &args.options {
        markup = markup.options(raw.clone());
    }

    let mut options = OptionsPatch {
        circular: Some(args.circular),
        start_slide: Some(args.start),
        duration: Some(args.duration),
        easing_function: Some(args.easing.clone()),
        vertical_circular: Some(args.vertical_circular),
        horizontal_circular: Some(!args.no_horizontal_circular),
        ..Default::default()
    };

    match args.columns.filter(|c| *c > 0) {
        Some(columns) => {
            let rows = keys.len().div_ceil(columns);
            options.grid = Some(
                keys.chunks(rows)
                    .map(|column| column.iter().cloned().map(Some).collect())
                    .collect(),
            );
            info!(columns, rows, "grid mode");
            run(GridSlider::new(markup.build(), &options), &mut rl, &thread, &textures, grid_keys);
        }
        None => run(Slider::new(markup.build(), &options), &mut rl, &thread, &textures, linear_keys),
    }

    Ok(())
}

fn run<E: Engine>(
    mut engine: E,
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    textures: &HashMap<String, Texture2D>,
    keymap: Keymap,
) {
    engine.on(|event| debug!(event = event.name(), slide = ?event.slide(), "slider event"));

    // --- Main loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let screen_width = rl.get_screen_width() as f32;
        let screen_height = rl.get_screen_height() as f32;
        engine.slider_mut().set_viewport(screen_width, screen_height);

        for key in KEYS {
            if rl.is_key_pressed(key) {
                if let Some(command) = keymap(key) {
                    engine.dispatch(command);
                }
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_V) {
            engine.switch_orientation();
        }

        engine.update(dt);

        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::BLACK);
        draw_slides(&mut d, engine.slider(), textures, screen_width, screen_height);

        let state = engine.state();
        d.draw_text(
            &format!("{}/{}", state.active_index + 1, state.slide_count),
            10,
            10,
            20,
            Color::WHITE,
        );
    }
}

// Draws the current slide and, during a transition, the incoming one, both
// shifted by the list offset.
fn draw_slides(
    d: &mut RaylibDrawHandle,
    slider: &Slider,
    textures: &HashMap<String, Texture2D>,
    screen_width: f32,
    screen_height: f32,
) {
    let style = slider.list_style();
    let before = slider.list().is_some_and(|l| l.has_class(CLASS_LIST_BEFORE));
    let vertical = style.top.is_some();
    let offset = style.left.or(style.top).unwrap_or(0.0);

    for slide in slider.slides() {
        let slot = if slide.has_class(CLASS_CURRENT) {
            if before { 1.0 } else { 0.0 }
        } else if slide.has_class(CLASS_NEXT) {
            if before { 0.0 } else { 1.0 }
        } else {
            continue;
        };
        let Some(texture) = slide.key().and_then(|k| textures.get(k)) else {
            continue;
        };

        let area = if vertical {
            Rectangle::new(0.0, offset + slot * screen_height, screen_width, screen_height)
        } else {
            Rectangle::new(offset + slot * screen_width, 0.0, screen_width, screen_height)
        };
        draw_fitted(d, texture, area);
    }
}

fn draw_fitted(d: &mut RaylibDrawHandle, texture: &Texture2D, area: Rectangle) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    let scale = (area.width * SLIDE_FILL / tex_width)
        .min(area.height * SLIDE_FILL / tex_height)
        .min(1.0);

    let width = tex_width * scale;
    let height = tex_height * scale;
    let dest = Rectangle::new(
        area.x + (area.width - width) * 0.5,
        area.y + (area.height - height) * 0.5,
        width,
        height,
    );

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        dest,
        Vector2::new(0.0, 0.0),
        0.0,
        Color::WHITE,
    );
}
