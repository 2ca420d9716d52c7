// Wordlink – a word-chain graph puzzle
// Copyright (C) 2026  Wordlink authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use wasm_bindgen::prelude::*;
use web_sys::console;
use rand::thread_rng;
use super::chain::{self, DEFAULT_MAX_ATTEMPTS};
use super::geometry::Point;
use super::layout;
use super::letter_graph::LetterGraph;
use super::render::{self, Action, FrameLayout, Rect, Surface};
use super::session::{Controller, GameSession};
use super::word::Word;
use super::word_list;

const WORD_FILE: &str = "words.txt";
const DEFAULT_CHAIN_LENGTH: usize = 3;

fn show_error(message: &str) {
    console::log_1(&message.into());

    let Some(window) = web_sys::window()
    else {
        return;
    };

    let Some(document) = window.document()
    else {
        return;
    };

    let Some(message_elem) = document.get_element_by_id("message")
    else {
        return;
    };

    message_elem.set_text_content(Some(message));
}

struct Context {
    window: web_sys::Window,
    document: web_sys::Document,
    canvas: web_sys::HtmlCanvasElement,
    ctx: web_sys::CanvasRenderingContext2d,
    howto_overlay: Option<web_sys::HtmlElement>,
}

impl Context {
    fn new() -> Result<Context, String> {
        let Some(window) = web_sys::window()
        else {
            return Err("failed to get window".to_string());
        };

        let Some(document) = window.document()
        else {
            return Err("failed to get document".to_string());
        };

        let Some(canvas) = document.get_element_by_id("game-canvas")
            .and_then(|c| c.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            return Err("failed to get game canvas".to_string());
        };

        let Some(ctx) = canvas.get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| {
                c.dyn_into::<web_sys::CanvasRenderingContext2d>().ok()
            })
        else {
            return Err("failed to get 2d context".to_string());
        };

        let howto_overlay = document.get_element_by_id("howto-overlay")
            .and_then(|c| c.dyn_into::<web_sys::HtmlElement>().ok());

        Ok(Context {
            window,
            document,
            canvas,
            ctx,
            howto_overlay,
        })
    }

    fn now_ms(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }
}

type PromiseClosure = Closure::<dyn FnMut(JsValue)>;

struct Loader {
    context: Context,

    words_response_closure: Option<PromiseClosure>,
    words_content_closure: Option<PromiseClosure>,
    words_error_closure: Option<PromiseClosure>,

    floating_pointer: Option<*mut Loader>,
}

impl Loader {
    fn new(context: Context) -> Loader {
        Loader {
            context,
            words_response_closure: None,
            words_content_closure: None,
            words_error_closure: None,
            floating_pointer: None,
        }
    }

    fn start_floating(self) -> *mut Loader {
        assert!(self.floating_pointer.is_none());

        let floating_pointer = Box::into_raw(Box::new(self));

        unsafe {
            (*floating_pointer).floating_pointer = Some(floating_pointer);
        }

        floating_pointer
    }

    fn stop_floating(&mut self) -> Loader {
        match self.floating_pointer {
            Some(floating_pointer) => unsafe {
                // This should end up destroying the loader and
                // invalidating any closures that it holds
                *Box::from_raw(floating_pointer)
            },
            None => unreachable!(),
        }
    }

    fn queue_words_load(&mut self) {
        let floating_pointer = self.floating_pointer.unwrap();

        let response_closure = PromiseClosure::new(move |v: JsValue| {
            let (content_closure, error_closure) = unsafe {
                (
                    (*floating_pointer).words_content_closure.as_ref()
                        .unwrap(),
                    (*floating_pointer).words_error_closure.as_ref()
                        .unwrap(),
                )
            };

            let response: web_sys::Response = match v.dyn_into() {
                Ok(r) => r,
                Err(_) => {
                    unsafe {
                        (*floating_pointer).words_failed();
                    }
                    return;
                },
            };

            if !response.ok() {
                unsafe {
                    (*floating_pointer).words_failed();
                }
                return;
            }

            match response.text() {
                Ok(promise) => {
                    let _ = promise.then2(content_closure, error_closure);
                },
                Err(_) => unsafe {
                    (*floating_pointer).words_failed();
                },
            }
        });

        let content_closure = PromiseClosure::new(move |v| {
            let text = v.as_string().unwrap_or_default();

            unsafe {
                (*floating_pointer).words_loaded(&text);
            }
        });

        let error_closure = PromiseClosure::new(move |_| {
            unsafe {
                (*floating_pointer).words_failed();
            }
        });

        let init = web_sys::RequestInit::new();
        init.set_cache(web_sys::RequestCache::NoStore);

        let promise = self.context.window
            .fetch_with_str_and_init(WORD_FILE, &init);

        let _ = promise.then2(&response_closure, &error_closure);

        self.words_response_closure = Some(response_closure);
        self.words_content_closure = Some(content_closure);
        self.words_error_closure = Some(error_closure);
    }

    fn words_loaded(&mut self, text: &str) {
        let words = word_list::parse_word_list(text);

        if words.is_empty() {
            self.words_failed();
        } else {
            self.start_game(words);
        }
    }

    fn words_failed(&mut self) {
        console::warn_1(
            &format!(
                "couldn’t load {}, using the built-in word list",
                WORD_FILE,
            ).into()
        );

        let words = word_list::fallback_words();

        self.start_game(words);
    }

    fn start_game(&mut self, words: Vec<Word>) {
        let Loader { context, .. } = self.stop_floating();

        match Wordlink::new(context, words) {
            Ok(wordlink) => {
                let floating_pointer = wordlink.start_floating();

                unsafe {
                    (*floating_pointer).create_closures();
                    (*floating_pointer).queue_frame();
                }
            },
            Err(e) => show_error(&e),
        }
    }
}

struct CanvasSurface {
    ctx: web_sys::CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn trace_polyline(&self, points: &[Point]) {
        self.ctx.begin_path();

        for (i, point) in points.iter().enumerate() {
            if i == 0 {
                self.ctx.move_to(point.x, point.y);
            } else {
                self.ctx.line_to(point.x, point.y);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64, color: &str) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x,
            center.y,
            radius,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: &str,
        line_width: f64,
    ) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x,
            center.y,
            radius,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_line_width(line_width);
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke();
    }

    fn stroke_polyline(
        &mut self,
        points: &[Point],
        color: &str,
        line_width: f64,
    ) {
        self.trace_polyline(points);
        self.ctx.set_line_width(line_width);
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[Point], color: &str) {
        self.trace_polyline(points);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn rounded_rect(
        &mut self,
        rect: Rect,
        radius: f64,
        fill: Option<&str>,
        stroke: Option<(&str, f64)>,
    ) {
        let r = radius.min(rect.w / 2.0).min(rect.h / 2.0);
        let ctx = &self.ctx;

        ctx.begin_path();
        ctx.move_to(rect.x + r, rect.y);
        let _ = ctx.arc_to(
            rect.x + rect.w,
            rect.y,
            rect.x + rect.w,
            rect.y + rect.h,
            r,
        );
        let _ = ctx.arc_to(
            rect.x + rect.w,
            rect.y + rect.h,
            rect.x,
            rect.y + rect.h,
            r,
        );
        let _ = ctx.arc_to(rect.x, rect.y + rect.h, rect.x, rect.y, r);
        let _ = ctx.arc_to(rect.x, rect.y, rect.x + rect.w, rect.y, r);
        ctx.close_path();

        if let Some(color) = fill {
            ctx.set_fill_style_str(color);
            ctx.fill();
        }

        if let Some((color, line_width)) = stroke {
            ctx.set_line_width(line_width);
            ctx.set_stroke_style_str(color);
            ctx.stroke();
        }
    }

    fn set_font(&mut self, px: f64, bold: bool) {
        self.ctx.set_font(&format!(
            "{}{}px system-ui, -apple-system, Segoe UI, Roboto, Arial, \
             sans-serif",
            if bold { "600 " } else { "" },
            px,
        ));
    }

    fn text_width(&mut self, text: &str) -> f64 {
        self.ctx.measure_text(text)
            .map(|metrics| metrics.width())
            .unwrap_or(0.0)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x, y);
    }
}

type EventClosure = Closure::<dyn FnMut(web_sys::PointerEvent)>;

struct Wordlink {
    context: Context,
    words: Vec<Word>,
    chain_length: usize,

    session: GameSession,
    graph: LetterGraph,
    controller: Controller,
    // Geometry of the last drawn frame, so that pointer events are
    // hit-tested against what the player actually sees
    frame: Option<FrameLayout>,

    pointerdown_closure: Option<EventClosure>,
    pointermove_closure: Option<EventClosure>,
    pointerup_closure: Option<EventClosure>,
    close_howto_closure: Option<Closure<dyn FnMut()>>,
    animation_frame_closure: Option<Closure<dyn FnMut()>>,

    floating_pointer: Option<*mut Wordlink>,
}

impl Wordlink {
    fn new(context: Context, words: Vec<Word>) -> Result<Wordlink, String> {
        let chain = chain::generate(
            &words,
            DEFAULT_CHAIN_LENGTH,
            DEFAULT_MAX_ATTEMPTS,
            &mut thread_rng(),
        ).map_err(|e| e.to_string())?;

        let graph = LetterGraph::new(&chain);
        let session = GameSession::new(chain, context.now_ms());

        Ok(Wordlink {
            context,
            words,
            chain_length: DEFAULT_CHAIN_LENGTH,
            session,
            graph,
            controller: Controller::new(),
            frame: None,
            pointerdown_closure: None,
            pointermove_closure: None,
            pointerup_closure: None,
            close_howto_closure: None,
            animation_frame_closure: None,
            floating_pointer: None,
        })
    }

    fn start_floating(self) -> *mut Wordlink {
        assert!(self.floating_pointer.is_none());

        // The game lives for the rest of the page's life so the box is
        // deliberately never freed
        let floating_pointer = Box::into_raw(Box::new(self));

        unsafe {
            (*floating_pointer).floating_pointer = Some(floating_pointer);
        }

        floating_pointer
    }

    fn create_closures(&mut self) {
        let floating_pointer = self.floating_pointer.unwrap();

        let pointerdown_closure =
            EventClosure::new(move |e: web_sys::PointerEvent| {
                unsafe {
                    (*floating_pointer).handle_pointer_down(e);
                }
            });
        let pointermove_closure =
            EventClosure::new(move |e: web_sys::PointerEvent| {
                unsafe {
                    (*floating_pointer).handle_pointer_move(e);
                }
            });
        let pointerup_closure =
            EventClosure::new(move |e: web_sys::PointerEvent| {
                unsafe {
                    (*floating_pointer).handle_pointer_up(e);
                }
            });

        for (name, closure) in [
            ("pointerdown", &pointerdown_closure),
            ("pointermove", &pointermove_closure),
            ("pointerup", &pointerup_closure),
        ] {
            let _ = self.context.canvas.add_event_listener_with_callback(
                name,
                closure.as_ref().unchecked_ref(),
            );
        }

        self.pointerdown_closure = Some(pointerdown_closure);
        self.pointermove_closure = Some(pointermove_closure);
        self.pointerup_closure = Some(pointerup_closure);

        if let Some(close_button) =
            self.context.document.get_element_by_id("close-howto")
        {
            let close_howto_closure = Closure::<dyn FnMut()>::new(move || {
                unsafe {
                    (*floating_pointer).set_howto_visible(false);
                }
            });

            let _ = close_button.add_event_listener_with_callback(
                "click",
                close_howto_closure.as_ref().unchecked_ref(),
            );

            self.close_howto_closure = Some(close_howto_closure);
        }

        let animation_frame_closure = Closure::<dyn FnMut()>::new(move || {
            unsafe {
                (*floating_pointer).frame();
            }
        });

        self.animation_frame_closure = Some(animation_frame_closure);
    }

    fn queue_frame(&self) {
        if let Some(closure) = &self.animation_frame_closure {
            let _ = self.context.window.request_animation_frame(
                closure.as_ref().unchecked_ref(),
            );
        }
    }

    // Matches the canvas backing store to its CSS size so that
    // drawing happens in CSS pixels at device resolution
    fn resize(&self) -> (f64, f64) {
        let dpr = self.context.window.device_pixel_ratio().max(1.0);
        let width = f64::from(self.context.canvas.client_width());
        let height = f64::from(self.context.canvas.client_height());

        self.context.canvas.set_width((width * dpr).floor() as u32);
        self.context.canvas.set_height((height * dpr).floor() as u32);
        let _ = self.context.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

        (width, height)
    }

    fn frame(&mut self) {
        let (width, height) = self.resize();
        let now_ms = self.context.now_ms();

        let frame =
            FrameLayout::compute(&self.session, &self.graph, width, height);

        let mut surface = CanvasSurface {
            ctx: self.context.ctx.clone(),
        };

        render::render_frame(
            &mut surface,
            &self.session,
            &self.graph,
            &frame,
            &self.controller,
            now_ms,
        );

        self.frame = Some(frame);

        self.queue_frame();
    }

    fn pointer_position(&self, event: &web_sys::PointerEvent) -> Point {
        let rect = self.context.canvas.get_bounding_client_rect();

        Point::new(
            f64::from(event.client_x()) - rect.left(),
            f64::from(event.client_y()) - rect.top(),
        )
    }

    fn howto_visible(&self) -> bool {
        self.context.howto_overlay
            .as_ref()
            .map(|overlay| {
                overlay.style().get_property_value("display")
                    .map(|display| display == "flex")
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    fn set_howto_visible(&self, visible: bool) {
        if let Some(overlay) = &self.context.howto_overlay {
            let _ = overlay.style().set_property(
                "display",
                if visible { "flex" } else { "none" },
            );
        }
    }

    fn handle_pointer_down(&mut self, event: web_sys::PointerEvent) {
        let _ = self.context.canvas.set_pointer_capture(event.pointer_id());

        let position = self.pointer_position(&event);

        self.controller.pointer_move(position);

        let Some(frame) = &self.frame
        else {
            return;
        };

        if let Some(action) = render::hit_button(&frame.buttons, position) {
            self.handle_action(action);
            return;
        }

        // The how-to overlay blocks play underneath it
        if self.howto_visible() {
            return;
        }

        let legend_letter = layout::hit_legend(&frame.legend_items, position);

        self.controller.pointer_down(position, legend_letter, &self.session);
    }

    fn handle_pointer_move(&mut self, event: web_sys::PointerEvent) {
        let position = self.pointer_position(&event);

        self.controller.pointer_move(position);
    }

    fn handle_pointer_up(&mut self, event: web_sys::PointerEvent) {
        let position = self.pointer_position(&event);

        let target = self.frame
            .as_ref()
            .and_then(|frame| frame.nodes.hit_node(position));

        let now_ms = self.context.now_ms();

        let _ = self.controller.pointer_up(
            position,
            target,
            &mut self.session,
            now_ms,
        );
    }

    fn new_puzzle(&mut self) {
        match chain::generate(
            &self.words,
            self.chain_length,
            DEFAULT_MAX_ATTEMPTS,
            &mut thread_rng(),
        ) {
            Ok(chain) => {
                self.graph = LetterGraph::new(&chain);
                self.session =
                    GameSession::new(chain, self.context.now_ms());
                self.controller = Controller::new();
            },
            Err(e) => show_error(&e.to_string()),
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Hint => {
                let now_ms = self.context.now_ms();
                self.session.hint(&mut thread_rng(), now_ms);
            },
            Action::Reveal => self.session.reveal_answer(),
            Action::HowTo => self.set_howto_visible(true),
            Action::Next => self.new_puzzle(),
            Action::Quit => {
                let _ = self.context.window.location().set_href("index.html");
            },
        }
    }
}

#[wasm_bindgen]
pub fn init_wordlink() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let context = match Context::new() {
        Ok(c) => c,
        Err(e) => {
            show_error(&e);
            return;
        },
    };

    let loader = Loader::new(context);

    let floating_pointer = loader.start_floating();

    unsafe {
        (*floating_pointer).queue_words_load();
    }
}
