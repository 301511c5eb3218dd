//! Birthday Reveal entry point
//!
//! Handles platform-specific initialization and runs the story loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_story {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use birthday_reveal::Settings;
    use birthday_reveal::consts::*;
    use birthday_reveal::platform::dom::Overlay;
    use birthday_reveal::renderer::{RenderError, RenderState, build_frame};
    use birthday_reveal::sim::{FrameClock, StoryEvent, StoryState, TickInput, tick};

    /// Story instance holding all state
    struct Story {
        state: StoryState,
        settings: Settings,
        render_state: Option<RenderState>,
        overlay: Overlay,
        clock: FrameClock,
        last_time: f64,
        input: TickInput,
    }

    impl Story {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            for _ in 0..self.clock.advance(dt) {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);

                // Clear one-shot inputs after processing
                self.input.tap = false;
                self.input.restart = false;

                for event in &self.state.events {
                    match event {
                        StoryEvent::StageEntered(stage) => {
                            log::debug!("Stage entered: {}", stage.as_str())
                        }
                        other => log::debug!("{:?}", other),
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.overlay.sync(&self.state, &self.settings);

            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let (w, h) = render_state.viewport;
            let vertices = build_frame(&self.state, &self.settings, Vec2::new(w, h));

            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    /// Canvas size in physical and CSS pixels
    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> ((u32, u32), (f32, f32)) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let physical = (
            (client_w as f64 * dpr) as u32,
            (client_h as f64 * dpr) as u32,
        );
        (physical, (client_w as f32, client_h as f32))
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        size: (u32, u32),
        viewport: (f32, f32),
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(RenderError::Surface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderError::Adapter)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, size.0, size.1, viewport).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Birthday Reveal starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (size, viewport) = canvas_size(&window, &canvas);
        canvas.set_width(size.0);
        canvas.set_height(size.1);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Story initialized with seed: {}", seed);

        let overlay = Overlay::build(&document)?;

        // Text still works without a GPU, so a failed renderer only loses the canvas
        let render_state = match init_renderer(&canvas, size, viewport).await {
            Ok(rs) => Some(rs),
            Err(e) => {
                log::error!("Renderer unavailable: {}", e);
                None
            }
        };

        let story = Rc::new(RefCell::new(Story {
            state: StoryState::new(seed),
            settings,
            render_state,
            overlay,
            clock: FrameClock::default(),
            last_time: 0.0,
            input: TickInput::default(),
        }));

        setup_input_handlers(&window, story.clone());
        setup_restart_button(story.clone());
        setup_resize(&window, canvas, story.clone());

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(story);

        log::info!("Birthday Reveal running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, story: Rc<RefCell<Story>>) {
        // Any pointer press on the page is a tap on the active stage
        {
            let story = story.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                story.borrow_mut().input.tap = true;
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard activation
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "Enter" => {
                        event.prevent_default();
                        story.borrow_mut().input.tap = true;
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(story: Rc<RefCell<Story>>) {
        let btn = story.borrow().overlay.restart_button().cloned();
        let Some(btn) = btn else {
            log::warn!("No restart button in overlay");
            return;
        };

        // The press must not also count as a stage tap
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.stop_propagation();
            });
            let _ = btn.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.stop_propagation();
                story.borrow_mut().input.restart = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, story: Rc<RefCell<Story>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (size, viewport) = canvas_size(&window, &canvas);
            canvas.set_width(size.0);
            canvas.set_height(size.1);
            if let Some(rs) = story.borrow_mut().render_state.as_mut() {
                rs.resize(size.0, size.1, viewport);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(story: Rc<RefCell<Story>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            story_loop(story, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn story_loop(story: Rc<RefCell<Story>>, time: f64) {
        {
            let mut s = story.borrow_mut();

            // Calculate delta time
            let dt = if s.last_time > 0.0 {
                ((time - s.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            s.last_time = time;

            s.update(dt);
            s.render();
        }

        request_animation_frame(story);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_story::run().await {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Birthday Reveal (native) starting...");
    log::info!("Native mode runs a headless walkthrough - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);
    walkthrough(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play the story from start to finish with a scripted tap every two seconds
#[cfg(not(target_arch = "wasm32"))]
fn walkthrough(seed: u64) {
    use birthday_reveal::consts::{SIM_DT, TICKS_PER_SECOND};
    use birthday_reveal::sim::{Stage, StoryEvent, StoryState, TickInput, tick};

    let mut state = StoryState::new(seed);
    let limit = 60 * TICKS_PER_SECOND;
    let mut restarted = false;

    log::info!("Walkthrough seed {}, starting at {}", seed, state.stage().as_str());

    for n in 1..=limit {
        let at_end = state.stage() == Stage::DreamyEnding;
        let input = TickInput {
            tap: !at_end && n % (2 * TICKS_PER_SECOND) == 0,
            restart: at_end && !restarted && n % (2 * TICKS_PER_SECOND) == 0,
        };
        tick(&mut state, &input, SIM_DT);

        for event in &state.events {
            let secs = state.time_ticks as f32 * SIM_DT;
            match event {
                StoryEvent::StageEntered(stage) => {
                    println!("[{:6.2}s] entered {}", secs, stage.as_str())
                }
                StoryEvent::ShakeEnded => println!("[{:6.2}s] shake ended", secs),
                StoryEvent::BurstFinished => println!("[{:6.2}s] burst finished", secs),
                StoryEvent::Restarted => {
                    println!("[{:6.2}s] restarted", secs);
                    restarted = true;
                }
            }
        }

        if restarted && state.stage() == Stage::Opening && state.leaving.is_empty() {
            break;
        }
    }

    println!(
        "Walkthrough finished after {} ticks at {}",
        state.time_ticks,
        state.stage().as_str()
    );
}
