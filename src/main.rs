//! Hexcrawl host: window, input and the frame loop
//!
//! Left/Right turn, Up/Down walk, F1/F2 switch between 320x240 and 640x480.
//! Set RUST_LOG=trace for per-frame statistics.

use std::path::PathBuf;
use clap::Parser;
use macroquad::prelude::*;
use hexcrawl::config::{load_settings, RenderSettings};
use hexcrawl::player::{Player, MOVE_SPEED, TURN_SPEED};
use hexcrawl::rasterizer::{Framebuffer, HEIGHT, HEIGHT_HI, WIDTH, WIDTH_HI};
use hexcrawl::view::render_frame;
use hexcrawl::world::{demo_map, load_map, MapData};
use hexcrawl::VERSION;

#[derive(Parser, Debug)]
#[command(name = "hexcrawl", version, about = "First-person hexagon dungeon")]
struct Args {
    /// RON map file; the built-in demo map is used if omitted
    #[arg(long)]
    map: Option<PathBuf>,

    /// RON render settings; fields left out keep their defaults
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Start at 640x480 instead of 320x240
    #[arg(long)]
    hi_res: bool,
}

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Hexcrawl v{}", VERSION),
        window_width: WIDTH as i32 * 3,
        window_height: HEIGHT as i32 * 3,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn open_map(path: Option<&PathBuf>) -> MapData {
    let Some(path) = path else {
        return demo_map();
    };
    match load_map(path) {
        Ok(map) => map,
        Err(e) => {
            log::error!("failed to load map {}: {}, using demo map", path.display(), e);
            demo_map()
        }
    }
}

fn open_settings(path: Option<&PathBuf>) -> RenderSettings {
    let Some(path) = path else {
        return RenderSettings::default();
    };
    match load_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("failed to load settings {}: {}, using defaults", path.display(), e);
            RenderSettings::default()
        }
    }
}

/// Largest integer multiple of the framebuffer that fits the window,
/// centered. Falls back to a plain fit for tiny windows.
fn viewport(fb: &Framebuffer) -> (f32, f32, f32, f32) {
    let (sw, sh) = (screen_width(), screen_height());
    let (fw, fh) = (fb.width as f32, fb.height as f32);
    let scale = (sw / fw).min(sh / fh);
    let scale = if scale >= 1.0 { scale.floor() } else { scale };
    let (w, h) = (fw * scale, fh * scale);
    ((sw - w) / 2.0, (sh - h) / 2.0, w, h)
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let map = open_map(args.map.as_ref());
    let settings = open_settings(args.settings.as_ref());
    let hexagons = map.to_hexagons();
    let palette = map.palette();
    let mut player = Player::spawn(&hexagons);

    let (w, h) = if args.hi_res { (WIDTH_HI, HEIGHT_HI) } else { (WIDTH, HEIGHT) };
    let mut fb = Framebuffer::new(w, h);

    log::info!("hexcrawl v{}: {} hexes, seed {:?}, {}x{}", VERSION, hexagons.len(), map.seed, w, h);

    loop {
        if is_key_pressed(KeyCode::F1) {
            fb.resize(WIDTH, HEIGHT);
        }
        if is_key_pressed(KeyCode::F2) {
            fb.resize(WIDTH_HI, HEIGHT_HI);
        }

        if is_key_down(KeyCode::Left) {
            player.turn(TURN_SPEED);
        }
        if is_key_down(KeyCode::Right) {
            player.turn(-TURN_SPEED);
        }
        if is_key_down(KeyCode::Up) {
            player.move_forward(MOVE_SPEED, &hexagons);
        }
        if is_key_down(KeyCode::Down) {
            player.move_forward(-MOVE_SPEED, &hexagons);
        }

        fb.clear(palette.sky());
        let camera = player.camera(&settings);
        let stats = render_frame(&mut fb, &hexagons, &camera, &settings, &palette);
        log::trace!("{:?}", stats);

        clear_background(BLACK);

        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);

        let (x, y, dw, dh) = viewport(&fb);
        draw_texture_ex(
            &texture,
            x,
            y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(dw, dh)),
                ..Default::default()
            },
        );

        draw_text(
            &format!(
                "Seed: {} | Hexes: {} | Yaw: {} | Pos: ({:.1}, {:.1}) | {}x{}",
                map.seed,
                hexagons.len(),
                player.yaw_degrees,
                player.position.x,
                player.position.z,
                fb.width,
                fb.height,
            ),
            x + 8.0,
            y + 20.0,
            16.0,
            Color::from_rgba(200, 200, 200, 255),
        );
        draw_text(
            &format!(
                "Walls: {} (+{} dropped) | Tris: {} (+{} skipped)",
                stats.walls_drawn, stats.walls_dropped, stats.triangles_drawn, stats.triangles_skipped,
            ),
            x + 8.0,
            y + 38.0,
            16.0,
            Color::from_rgba(200, 200, 200, 255),
        );

        next_frame().await;
    }
}
