use std::f32::consts::{FRAC_PI_3, TAU};
use std::path::PathBuf;

use clap::Parser;
use sdl2::keyboard::Keycode;

use scanfill::display::{Display, InputEvent, RenderTarget};
use scanfill::math3d::{focal_length, Vec3};
use scanfill::raster::{clip_polygon, Frustum, LineAlgorithm, ScreenPolygon, Vertex, ViewPolygon};
use scanfill::util::{hsv_to_rgb, FpsCounter};
use scanfill::{Color, PixelBuffer, RasterConfig, Result, Texture};

const SETTINGS_PATH: &str = "scanfill.json";
const FAN_LINES: usize = 32;
const NEAR: f32 = 0.5;
const FAR: f32 = 50.0;

#[derive(Parser, Debug)]
#[command(name = "scanfill", version, about = "Software rasterizer demo")]
struct Args {
    /// JSON settings file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Resolution as WxH (e.g. 1280x720)
    #[arg(long, short = 'r', value_parser = parse_resolution)]
    resolution: Option<(u32, u32)>,

    /// Disable VSync for an uncapped frame rate
    #[arg(long)]
    no_vsync: bool,

    /// Line rasterizer
    #[arg(long, value_enum)]
    algorithm: Option<LineAlgorithm>,
}

fn parse_resolution(s: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
    let w = w.parse::<u32>().map_err(|e| format!("width: {}", e))?;
    let h = h.parse::<u32>().map_err(|e| format!("height: {}", e))?;
    Ok((w, h))
}

impl Args {
    fn into_config(self) -> Result<RasterConfig> {
        let mut config = match &self.config {
            Some(path) => RasterConfig::load(path)?,
            None => RasterConfig::default(),
        };
        if let Some((w, h)) = self.resolution {
            config.width = w;
            config.height = h;
        }
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if self.no_vsync {
            config.vsync = false;
        }
        if let Some(algorithm) = self.algorithm {
            config.line_algorithm = algorithm;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Everything drawn each frame, laid out for the current resolution
struct Scene {
    checker: Texture,
    frustum: Frustum,
    focal: f32,
    flat: ScreenPolygon,
    blended: ScreenPolygon,
    textured: ScreenPolygon,
    angle: f32,
    paused: bool,
}

impl Scene {
    fn new(width: u32, height: u32) -> Result<Self> {
        let mut scene = Self {
            checker: Texture::checkerboard(64, 8, Color::WHITE, Color::new(0.2, 0.3, 0.8))?,
            frustum: Frustum::perspective(FRAC_PI_3, 1.0, NEAR, FAR),
            focal: 1.0,
            flat: ScreenPolygon::new(0),
            blended: ScreenPolygon::new(0),
            textured: ScreenPolygon::new(0),
            angle: 0.0,
            paused: false,
        };
        scene.layout(width, height)?;
        Ok(scene)
    }

    /// Rebuild the screen-space shapes and the frustum for a new resolution
    fn layout(&mut self, width: u32, height: u32) -> Result<()> {
        let (w, h) = (width as i32, height as i32);
        self.frustum = Frustum::perspective(FRAC_PI_3, width as f32 / height as f32, NEAR, FAR);
        self.focal = focal_length(FRAC_PI_3, height);

        self.flat = ScreenPolygon::from_vertices(vec![
            Vertex::at(w * 55 / 100, h * 8 / 100, vec![]),
            Vertex::at(w * 95 / 100, h * 20 / 100, vec![]),
            Vertex::at(w * 62 / 100, h * 45 / 100, vec![]),
        ])?;
        self.blended = ScreenPolygon::from_vertices(vec![
            Vertex::colored(w * 5 / 100, h * 60 / 100, Color::RED),
            Vertex::colored(w * 30 / 100, h * 55 / 100, Color::GREEN),
            Vertex::colored(w * 35 / 100, h * 92 / 100, Color::BLUE),
            Vertex::colored(w * 8 / 100, h * 95 / 100, Color::WHITE),
        ])?;
        self.textured = ScreenPolygon::from_vertices(vec![
            Vertex::textured(w * 40 / 100, h * 55 / 100, Color::WHITE, 0.0, 0.0),
            Vertex::textured(w * 60 / 100, h * 58 / 100, Color::WHITE, 1.0, 0.0),
            Vertex::textured(w * 58 / 100, h * 92 / 100, Color::new(0.4, 0.4, 0.4), 1.0, 1.0),
            Vertex::textured(w * 42 / 100, h * 90 / 100, Color::new(0.4, 0.4, 0.4), 0.0, 1.0),
        ])?;
        Ok(())
    }

    fn update(&mut self, dt: f32) {
        if !self.paused {
            self.angle = (self.angle + dt * 0.8) % TAU;
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, algorithm: LineAlgorithm) -> Result<()> {
        self.draw_line_fan(buffer, algorithm);
        buffer.draw_polygon_flat(Color::new(0.9, 0.6, 0.1), &self.flat);
        buffer.draw_polygon_blended(&self.blended);
        buffer.draw_polygon_textured(&self.textured, &self.checker);
        self.draw_spinning_quad(buffer)
    }

    fn draw_line_fan(&self, buffer: &mut PixelBuffer, algorithm: LineAlgorithm) {
        let (w, h) = (buffer.width() as f32, buffer.height() as f32);
        let (cx, cy) = (w * 0.25, h * 0.28);
        let radius = w.min(h) * 0.24;
        for i in 0..FAN_LINES {
            let t = i as f32 / FAN_LINES as f32;
            let a = t * TAU + self.angle * 0.25;
            buffer.draw_line(
                hsv_to_rgb(t * 360.0, 1.0, 1.0),
                cx as i32,
                cy as i32,
                (cx + a.cos() * radius) as i32,
                (cy + a.sin() * radius) as i32,
                algorithm,
            );
        }
    }

    /// Textured quad spinning in view space, large enough to cross the side
    /// planes as it turns
    fn draw_spinning_quad(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let corners = [(-1.6, -1.6, 0.0, 0.0), (1.6, -1.6, 1.0, 0.0), (1.6, 1.6, 1.0, 1.0), (-1.6, 1.6, 0.0, 1.0)];
        let center = Vec3::new(0.9, 0.2, 3.2);
        let vertices = corners
            .iter()
            .map(|&(x, y, u, v)| {
                let pos = Vec3::new(x, y, 0.0).rotate_x(self.angle * 0.5).rotate_y(self.angle) + center;
                // Shade by depth so the turn is visible
                let light = (0.7 - (pos.z - center.z) * 0.25).clamp(0.3, 1.0);
                Vertex::new(pos, vec![light, light, light, u, v])
            })
            .collect();
        let quad = ViewPolygon::from_vertices(vertices)?;

        let clipped = clip_polygon(&quad, &self.frustum);
        if clipped.is_empty() {
            log::trace!("spinning quad fully outside the frustum");
            return Ok(());
        }
        let screen = clipped.project(self.focal, buffer.width(), buffer.height());
        buffer.draw_polygon_textured(&screen, &self.checker);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = Args::parse().into_config()?;

    let (mut display, texture_creator) = Display::with_options(
        "scanfill",
        config.width,
        config.height,
        config.vsync,
        config.channel_order,
    )?;
    let order = display.channel_order();
    let mut target = RenderTarget::with_size(&texture_creator, config.width, config.height, order)?;
    let mut buffer = PixelBuffer::new(config.width, config.height, order)?;
    let mut scene = Scene::new(config.width, config.height)?;

    // FPS counter with 60 sample rolling average
    let mut fps_counter = FpsCounter::new(60);
    let mut title_timer = 0.0;

    log::info!("resolution {}x{}, lines: {:?}", config.width, config.height, config.line_algorithm);
    log::info!("keys: A toggle line algorithm, Space pause, S save settings, Escape quit");

    'main: loop {
        let (dt, avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::A) => {
                    config.line_algorithm = match config.line_algorithm {
                        LineAlgorithm::Naive => LineAlgorithm::Bresenham,
                        LineAlgorithm::Bresenham => LineAlgorithm::Naive,
                    };
                    log::info!("line algorithm: {:?}", config.line_algorithm);
                },
                InputEvent::KeyDown(Keycode::Space) => scene.paused = !scene.paused,
                InputEvent::KeyDown(Keycode::S) => {
                    config.width = buffer.width();
                    config.height = buffer.height();
                    match config.save(SETTINGS_PATH) {
                        Ok(()) => log::info!("settings saved to {}", SETTINGS_PATH),
                        Err(e) => log::error!("failed to save settings: {}", e),
                    }
                },
                InputEvent::Resized { width, height } => {
                    buffer = PixelBuffer::new(width, height, order)?;
                    target = RenderTarget::with_size(&texture_creator, width, height, order)?;
                    scene.layout(width, height)?;
                    log::info!("frame buffer rebuilt at {}x{}", width, height);
                },
                InputEvent::KeyDown(_) => {},
            }
        }

        scene.update(dt);
        buffer.clear(config.clear_color);
        scene.render(&mut buffer, config.line_algorithm)?;
        display.present(&mut target, &buffer)?;

        title_timer += dt;
        if title_timer >= 1.0 {
            title_timer = 0.0;
            display.set_title(&format!(
                "scanfill - {:.0} fps ({:.1} ms) - {:?}",
                avg_fps,
                fps_counter.avg_frame_time_ms(),
                config.line_algorithm
            ));
        }
    }

    Ok(())
}
