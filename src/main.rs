//! Downhill entry point
//!
//! Native builds run the game headless: a scripted pilot steers the skier
//! for a fixed number of frames while every frame is composed onto a
//! counting surface. Usage: `downhill [settings.json] [frames]`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::path::Path;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use downhill::renderer::{Surface, draw_frame};
    use downhill::sim::{GameState, tick};
    use downhill::{ImageName, Settings, SpriteSheet};

    /// Simulated frame length (ms), 60 fps
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Two minutes of play
    const DEFAULT_FRAMES: u64 = 60 * 120;
    /// How long a dead skier lies there before the pilot restarts
    const RESTART_DELAY_FRAMES: u32 = 90;
    /// Pilot presses a steering key on average once per this many frames
    const PILOT_KEY_ODDS: u32 = 20;
    const PILOT_KEYS: [&str; 4] = ["ArrowLeft", "ArrowRight", "ArrowDown", " "];

    /// Surface that only counts what it is asked to draw
    #[derive(Default)]
    struct CountingSurface {
        frames: u64,
        sprites: u64,
    }

    impl Surface for CountingSurface {
        fn clear(&mut self) {
            self.frames += 1;
        }

        fn set_view_offset(&mut self, _x: f32, _y: f32) {}

        fn draw_image(&mut self, _image: ImageName, _x: f32, _y: f32, _w: f32, _h: f32) {
            self.sprites += 1;
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load(Path::new(&path))?,
            None => Settings::default(),
        };
        settings.validate()?;
        let frames = match args.next() {
            Some(n) => n.parse::<u64>()?,
            None => DEFAULT_FRAMES,
        };

        let sprites = SpriteSheet::standard();
        sprites.validate()?;

        log::info!(
            "Downhill (headless) starting: {}x{} view, seed {}, {} frames",
            settings.viewport_width,
            settings.viewport_height,
            settings.seed,
            frames
        );

        let mut pilot = Pcg32::seed_from_u64(settings.seed ^ 0x5EED);
        let mut state = GameState::new(settings, 0.0);
        let mut surface = CountingSurface::default();
        let mut scores = Vec::new();
        let mut dead_frames = 0;

        for frame in 0..frames {
            if state.skier.is_dead() {
                dead_frames += 1;
                if dead_frames >= RESTART_DELAY_FRAMES {
                    scores.push(state.score());
                    state.handle_key_down("r");
                    dead_frames = 0;
                }
            } else if pilot.random_ratio(1, PILOT_KEY_ODDS) {
                let key = PILOT_KEYS[pilot.random_range(0..PILOT_KEYS.len())];
                state.handle_key_down(key);
            }

            tick(&mut state, frame as f64 * FRAME_MS, &sprites);
            draw_frame(&state, &mut surface, &sprites);

            if frame % 600 == 0 {
                log::debug!(
                    "frame {}: score {}, {} obstacles live",
                    frame,
                    state.score(),
                    state.obstacles.len()
                );
            }
        }
        scores.push(state.score());

        let best = scores.iter().copied().max().unwrap_or(0);
        log::info!(
            "Drew {} frames ({} sprites)",
            surface.frames,
            surface.sprites
        );
        println!("✓ {} runs, best score {}", scores.len(), best);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    match headless::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("downhill: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page; nothing to run here
}
