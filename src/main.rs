//! Tenzies entry point
//!
//! On the web this wires the game to the DOM; natively it plays a demo round.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// DOM element IDs the web host expects in `index.html`
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod dom {
    pub const DICE_CONTAINER: &str = "dice-container";
    pub const ROLL_BUTTON: &str = "roll-dice";
    pub const ROLL_COUNT: &str = "roll-count";
    pub const ELAPSED: &str = "elapsed";
    pub const GAME_DURATION: &str = "game-duration";
    pub const BEST_TIME: &str = "best-time";

    pub const ALL: [&str; 6] = [
        DICE_CONTAINER,
        ROLL_BUTTON,
        ROLL_COUNT,
        ELAPSED,
        GAME_DURATION,
        BEST_TIME,
    ];
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Event};

    use tenzies::game::{GameState, RandomFaces};
    use tenzies::platform::{LocalStorage, SystemClock};
    use tenzies::{BestTimeStore, DieId, Snapshot, format_duration};

    use crate::dom;

    /// Game instance shared between DOM callbacks
    struct App {
        game: GameState,
        document: Document,
    }

    impl App {
        fn new(document: Document, seed: u64) -> Self {
            let game = GameState::new(
                Box::new(RandomFaces::new(seed)),
                Box::new(SystemClock),
                BestTimeStore::load(Box::new(LocalStorage)),
            );
            Self { game, document }
        }

        fn roll(&mut self) {
            let snap = self.game.roll();
            self.render_dice(&snap);
            self.update_hud(&snap);
        }

        fn toggle_hold(&mut self, id: DieId) {
            let snap = self.game.toggle_hold(id);
            self.render_dice(&snap);
            self.update_hud(&snap);
        }

        /// Rebuild the dice container from a snapshot
        fn render_dice(&self, snap: &Snapshot) {
            let Some(container) = self.document.get_element_by_id(dom::DICE_CONTAINER) else {
                return;
            };
            container.set_inner_html("");

            for die in &snap.dice {
                let Ok(el) = self.document.create_element("div") else {
                    continue;
                };
                let class = if die.held { "die-face held" } else { "die-face" };
                let _ = el.set_attribute("class", class);
                let _ = el.set_attribute("data-id", &die.id.0.to_string());
                el.set_text_content(Some(&die.value.to_string()));
                let _ = container.append_child(&el);
            }
        }

        /// Update button label, roll count and times
        fn update_hud(&self, snap: &Snapshot) {
            self.set_text(dom::ROLL_BUTTON, snap.action_label());
            self.set_text(dom::ROLL_COUNT, &format!("Rolls: {}", snap.roll_count));

            if let Some(el) = self.document.get_element_by_id(dom::GAME_DURATION) {
                if snap.won {
                    let _ = el.set_attribute("class", "game-duration");
                    el.set_text_content(Some(&format!(
                        "Time: {}",
                        format_duration(snap.elapsed_millis)
                    )));
                } else {
                    let _ = el.set_attribute("class", "game-duration hidden");
                }
            }

            if let Some(el) = self.document.get_element_by_id(dom::ELAPSED) {
                el.set_text_content(Some(&format!("{:.1}s", snap.elapsed_millis as f64 / 1000.0)));
            }

            if let Some(el) = self.document.get_element_by_id(dom::BEST_TIME) {
                match snap.best_time_millis {
                    Some(best) => {
                        let _ = el.set_attribute("class", "best-time");
                        el.set_text_content(Some(&format!("Best Time: {}", format_duration(best))));
                    }
                    None => {
                        let _ = el.set_attribute("class", "best-time hidden");
                    }
                }
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tenzies starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        for id in dom::ALL {
            if document.get_element_by_id(id).is_none() {
                log::warn!("Missing #{} element, check index.html", id);
            }
        }

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(document, seed)));
        log::info!("Game initialized with seed: {}", seed);

        {
            let a = app.borrow();
            let snap = a.game.snapshot();
            a.render_dice(&snap);
            a.update_hud(&snap);
        }

        setup_dice_handler(app.clone());
        setup_roll_button(app.clone());

        // Keep the live timer ticking
        request_animation_frame(app);

        log::info!("Tenzies running!");
    }

    /// One delegated click handler for every die in the container
    fn setup_dice_handler(app: Rc<RefCell<App>>) {
        let Some(container) = app.borrow().document.get_element_by_id(dom::DICE_CONTAINER) else {
            log::warn!("No #dice-container element");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            let id = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-id]").ok().flatten())
                .and_then(|el| el.get_attribute("data-id"))
                .and_then(|raw| raw.parse::<u32>().ok());

            if let Some(id) = id {
                app.borrow_mut().toggle_hold(DieId(id));
            }
        });
        let _ = container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_roll_button(app: Rc<RefCell<App>>) {
        let Some(btn) = app.borrow().document.get_element_by_id(dom::ROLL_BUTTON) else {
            log::warn!("No #roll-dice button");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            app.borrow_mut().roll();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            {
                let a = app.borrow();
                let snap = a.game.snapshot();
                a.update_hud(&snap);
            }
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tenzies (native) starting...");
    log::info!("Native mode plays a demo round - run with `trunk serve` for the web version");

    autoplay();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Give up on a demo round after this many rolls
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_ROLLS: u32 = 500;

/// Play one round: hold the most common face, roll the rest
#[cfg(not(target_arch = "wasm32"))]
fn autoplay() {
    use tenzies::game::{GameState, RandomFaces};
    use tenzies::platform::{Clock, MemoryStorage, SystemClock};
    use tenzies::{BestTimeStore, format_duration};

    let seed = SystemClock.now_millis();
    let mut game = GameState::new(
        Box::new(RandomFaces::new(seed)),
        Box::new(SystemClock),
        BestTimeStore::load(Box::new(MemoryStorage::new())),
    );
    log::info!("Demo game seeded with {}", seed);

    let mut snap = game.snapshot();
    while !snap.won && snap.roll_count < MAX_DEMO_ROLLS {
        let target = target_face(&snap.dice);
        for die in snap.dice.iter().filter(|d| !d.held && d.value == target) {
            game.toggle_hold(die.id);
        }
        snap = if game.won() { game.snapshot() } else { game.roll() };
        log::debug!(
            "Roll {}: {:?}",
            snap.roll_count,
            snap.dice.iter().map(|d| d.value).collect::<Vec<_>>()
        );
    }

    if snap.won {
        println!(
            "✓ Tenzies on {}s in {} rolls ({})",
            snap.dice[0].value,
            snap.roll_count,
            format_duration(snap.elapsed_millis)
        );
    } else {
        println!("✗ No tenzies after {} rolls", snap.roll_count);
    }
}


/// Face to collect: whatever is already held, else the most common face
#[cfg(not(target_arch = "wasm32"))]
fn target_face(dice: &[tenzies::Die]) -> u8 {
    use tenzies::consts::FACE_COUNT;

    if let Some(held) = dice.iter().find(|d| d.held) {
        return held.value;
    }
    let mut counts = [0usize; FACE_COUNT as usize + 1];
    for die in dice {
        counts[die.value as usize] += 1;
    }
    (1..=FACE_COUNT)
        .max_by_key(|face| counts[*face as usize])
        .unwrap_or(1)
}
