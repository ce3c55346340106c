//! Plinko Drop entry point
//!
//! Browser builds wire the DOM controls and run the animation-frame loop.
//! Native builds run a single headless round from the command line.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement};

    use plinko_drop::renderer::{CanvasSurface, draw_frame};
    use plinko_drop::{Config, Controller, format_amount};

    /// Game instance holding all state
    struct Game {
        controller: Controller,
        surface: CanvasSurface,
        last_time: f64,
    }

    impl Game {
        /// Advance the simulation and redraw
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                self.controller.board().config.sim_dt()
            };
            self.last_time = time;

            if self.controller.update(dt).is_some() {
                self.update_hud();
            }

            draw_frame(
                &mut self.surface,
                self.controller.board(),
                self.controller.state(),
            );
        }

        /// Push balance and result text into the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("balance") {
                let text = format_amount(self.controller.balance());
                match el.dyn_into::<HtmlInputElement>() {
                    Ok(input) => input.set_value(&text),
                    Err(el) => el.set_text_content(Some(&text)),
                }
            }

            if let Some(el) = document.get_element_by_id("result") {
                let message = self.controller.result_message();
                if message.is_empty() {
                    el.set_inner_html("");
                } else {
                    el.set_inner_html(&format!("<p>{}</p>", message));
                }
            }
        }
    }

    fn bet_input_value(document: &Document) -> String {
        document
            .get_element_by_id("betAmount")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    pub fn run() -> anyhow::Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| anyhow!("failed to init logger: {}", e))?;
        log::info!("Plinko Drop starting...");

        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        let config = Config::load();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("plinkoCanvas")
            .context("no canvas")?
            .dyn_into()
            .map_err(|_| anyhow!("#plinkoCanvas is not a canvas"))?;
        canvas.set_width(config.canvas_width as u32);
        canvas.set_height(config.canvas_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("get_context failed: {:?}", e))?
            .context("no 2d context")?
            .dyn_into()
            .map_err(|_| anyhow!("not a 2d context"))?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            controller: Controller::new(config, seed),
            surface: CanvasSurface::new(ctx),
            last_time: 0.0,
        }));
        game.borrow().update_hud();

        setup_start_button(&document, game.clone());
        setup_reset_button(&document, game.clone());

        request_animation_frame(game);
        log::info!("Plinko Drop running!");
        Ok(())
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("startGame") else {
            log::warn!("No #startGame button");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(document) = window.document() else {
                return;
            };
            let bet = bet_input_value(&document);

            let started = {
                let mut g = game.borrow_mut();
                let started = g.controller.start_round(&bet);
                if started.is_ok() {
                    g.last_time = 0.0;
                    g.update_hud();
                }
                started
            };
            // Alert blocks, so no borrow may be held across it
            if let Err(e) = started {
                let _ = window.alert_with_message(e.user_message());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_reset_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("resetGame") else {
            log::warn!("No #resetGame button");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            g.controller.reset();
            g.update_hud();
            log::info!("Game reset");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:#}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless round: `plinko-drop <bet> [seed] [config.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use plinko_drop::{Config, Controller, format_amount};

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let bet = args.first().map(String::as_str).unwrap_or("10");
    let seed = match args.get(1) {
        Some(s) => s.parse().with_context(|| format!("seed {:?} is not a number", s))?,
        None => 42,
    };
    let config = match args.get(2) {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path))?;
            Config::from_json(&json).with_context(|| format!("parsing config {}", path))?
        }
        None => Config::load(),
    };

    let mut controller = Controller::new(config, seed);
    controller.start_round(bet)?;
    let outcome = controller
        .run_to_completion()
        .context("round ended without landing")?;

    println!(
        "seed {}: slot {} ({}x): bet {}, won {}, balance {}",
        controller.state().seed,
        outcome.slot_index,
        outcome.multiplier,
        format_amount(outcome.bet),
        format_amount(outcome.payout),
        format_amount(outcome.balance_after)
    );
    if let Some(best) = controller.history().best_payout() {
        log::info!("Best payout this session: {}", format_amount(best));
    }
    log::debug!("History: {}", controller.history().to_json()?);
    Ok(())
}
