//! Dune Roller entry point
//!
//! On the web this hosts the simulation on a 2D canvas; natively it runs a
//! headless session and prints the final ball state.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use dune_roller::renderer::{MARKER_SIZE, ball_center, colors, sample_markers, terrain_outline};
    use dune_roller::{Settings, sim::Session};

    /// Host state: the session plus the canvas it draws on
    struct Host {
        session: Session,
        ctx: CanvasRenderingContext2d,
    }

    impl Host {
        fn frame(&mut self) {
            self.session.step();
            self.draw();
        }

        fn draw(&self) {
            let settings = &self.session.settings;
            let (w, h) = (settings.canvas_width, settings.canvas_height);
            let ctx = &self.ctx;

            ctx.set_fill_style_str(colors::BACKGROUND);
            ctx.fill_rect(0.0, 0.0, w, h);

            // Dunes
            let outline = terrain_outline(
                &self.session.terrain,
                &self.session.viewport,
                w,
                h,
                settings.terrain_segments,
            );
            ctx.set_fill_style_str(colors::DUNE);
            ctx.begin_path();
            if let Some((first, rest)) = outline.split_first() {
                ctx.move_to(first.x, first.y);
                for p in rest {
                    ctx.line_to(p.x, p.y);
                }
            }
            ctx.close_path();
            ctx.fill();

            // Ball
            let ball = &self.session.ball;
            let center = ball_center(ball, &self.session.viewport);
            ctx.set_fill_style_str(colors::BALL);
            ctx.begin_path();
            if let Err(e) = ctx.arc(center.x, center.y, ball.radius, 0.0, std::f64::consts::TAU) {
                log::warn!("Ball arc failed: {:?}", e);
            }
            ctx.fill();

            // Contact samples, deepest overlap highlighted
            let terrain = &self.session.terrain;
            for marker in sample_markers(
                ball,
                &self.session.viewport,
                settings.arc_samples,
                &|x| terrain.height_at(x),
            ) {
                let corner = marker.corner();
                ctx.set_fill_style_str(marker.color);
                ctx.fill_rect(corner.x, corner.y, MARKER_SIZE, MARKER_SIZE);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dune Roller starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Write back so the effective settings can be edited in storage
        let settings = Settings::load();
        settings.save();

        let (width, height) = settings.canvas_pixels();
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let interval = settings.frame_interval_ms;
        let host = Rc::new(RefCell::new(Host {
            session: Session::seeded(seed, settings),
            ctx,
        }));

        log::info!("Session started with seed: {}", seed);

        setup_input_handlers(&document, host.clone());

        if interval == 0 {
            request_animation_frame(host);
        } else {
            start_interval(host, interval);
        }

        log::info!("Dune Roller running!");
    }

    fn setup_input_handlers(document: &web_sys::Document, host: Rc<RefCell<Host>>) {
        // Mouse press/release toggles the accelerate flag
        for (event, held) in [("mousedown", true), ("mouseup", false)] {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                host.borrow_mut().session.set_accelerate(held);
            });
            let _ = document
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        for (event, held) in [("touchstart", true), ("touchend", false), ("touchcancel", false)] {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                host.borrow_mut().session.set_accelerate(held);
            });
            let _ = document
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            host.borrow_mut().frame();
            request_animation_frame(host);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn start_interval(host: Rc<RefCell<Host>>, interval_ms: u32) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut()>::new(move || {
            host.borrow_mut().frame();
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            i32::try_from(interval_ms).unwrap_or(i32::MAX),
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_host::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: `dune-roller [settings.json] [frames] [seed]`
///
/// The accelerate input is held for the middle third of the run.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dune_roller::Settings;
    use dune_roller::sim::Session;

    env_logger::init();
    log::info!("Dune Roller (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();

    let settings = match args.first().map(String::as_str) {
        Some(path) if path != "-" => match Settings::load_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        _ => Settings::default(),
    };
    let frames: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(600);
    let seed: Option<u64> = args.get(2).and_then(|s| s.parse().ok());

    let mut session = match seed {
        Some(seed) => Session::seeded(seed, settings),
        None => Session::fixture(settings),
    };

    let boost = frames / 3..2 * frames / 3;
    for frame in 0..frames {
        session.set_accelerate(boost.contains(&frame));
        session.step();

        if session.frame % 60 == 0 {
            let ball = &session.ball;
            log::info!(
                "frame {:>5}: pos=({:.1}, {:.1}) speed={:.3} mode={:?} ground={:.1}",
                session.frame,
                ball.pos.x,
                ball.pos.y,
                ball.speed(),
                ball.mode,
                session.height_at(ball.pos.x)
            );
        }
    }

    match serde_json::to_string_pretty(&session.ball) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize ball: {}", e),
    }
}
