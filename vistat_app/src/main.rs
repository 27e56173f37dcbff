// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interactive vistat dashboard.
//!
//! One winit event loop owns everything: the dispatcher (active chart +
//! render generations), the debounced resize coordinator, hover/tooltip
//! state, and the vello surface. Dataset loading is the only work that
//! leaves this thread: a worker thread per render invocation posts its
//! result back as a user event, tagged with the generation that requested
//! it. Stale completions are discarded before they can touch the scene.

mod cli;
mod dispatch;
mod paint;
mod render;
mod svg;
mod text;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use kurbo::{Affine, Point, Rect, Vec2};
use peniko::color::palette::css;
use vello::util::{RenderContext, RenderSurface};
use vello::{AaConfig, AaSupport, RenderParams, Renderer, RendererOptions, Scene as VelloScene};
use vistat_charts::Size;
use vistat_core::{MarkId, Scene};
use vistat_data::DataError;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::dispatch::{ChartId, Debouncer, Dispatcher};
use crate::paint::{paint_scene, paint_tooltip};
use crate::render::{LoadedData, StyleTokens};
use crate::text::TextEngine;

/// Events posted back to the event loop from worker threads.
#[derive(Debug)]
enum UserEvent {
    /// A dataset load finished for the given render generation.
    LoadComplete {
        generation: u64,
        result: Result<LoadedData, DataError>,
    },
}

struct App {
    data_dir: PathBuf,
    tokens: StyleTokens,
    initial_chart: String,
    proxy: EventLoopProxy<UserEvent>,

    window: Option<Arc<Window>>,
    window_id: Option<WindowId>,
    render_cx: RenderContext,
    surface: Option<RenderSurface<'static>>,
    renderer: Option<Renderer>,
    vello_scene: VelloScene,

    scene: Scene,
    view: Rect,
    text: TextEngine,
    dispatcher: Dispatcher,
    debouncer: Debouncer,
    render_started: Instant,
    hovered: Option<MarkId>,
    cursor: Option<Point>,
}

impl App {
    fn new(args: &cli::Args, tokens: StyleTokens, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            data_dir: args.data_dir.clone(),
            tokens,
            initial_chart: args.chart.clone(),
            proxy,
            window: None,
            window_id: None,
            render_cx: RenderContext::new(),
            surface: None,
            renderer: None,
            vello_scene: VelloScene::new(),
            scene: Scene::new(),
            view: Rect::new(0.0, 0.0, 1.0, 1.0),
            text: TextEngine::new(),
            dispatcher: Dispatcher::new(ChartId::Bar),
            debouncer: Debouncer::default(),
            render_started: Instant::now(),
            hovered: None,
            cursor: None,
        }
    }

    fn view_size(&self) -> Size {
        match self.surface.as_ref() {
            Some(surface) => Size::new(
                f64::from(surface.config.width.max(1)),
                f64::from(surface.config.height.max(1)),
            ),
            None => Size::new(960.0, 540.0),
        }
    }

    /// Clears the surface and kicks off the dataset load for the active
    /// chart under `generation`.
    fn start_render(&mut self, generation: u64) {
        let id = self.dispatcher.active();
        log::info!("render start: chart={} generation={generation}", id.as_str());

        // The previous chart's marks and tooltip go away before the load
        // starts; the surface is blank while the fetch is in flight.
        self.scene.clear();
        self.hovered = None;
        self.request_redraw();

        let proxy = self.proxy.clone();
        let data_dir = self.data_dir.clone();
        std::thread::spawn(move || {
            let result = render::load_chart_data(id, &data_dir);
            let _ = proxy.send_event(UserEvent::LoadComplete { generation, result });
        });
    }

    fn select_chart(&mut self, id: ChartId) {
        let generation = self.dispatcher.select(id);
        self.update_window_title();
        self.start_render(generation);
    }

    fn update_window_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&format!("vistat — {}", self.dispatcher.active().as_str()));
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn elapsed_ms(&self) -> f64 {
        self.render_started.elapsed().as_secs_f64() * 1000.0
    }

    fn fit_transform(&self) -> Affine {
        let Some(surface) = self.surface.as_ref() else {
            return Affine::IDENTITY;
        };
        let view_w = self.view.width().max(1.0);
        let view_h = self.view.height().max(1.0);

        let w = f64::from(surface.config.width.max(1));
        let h = f64::from(surface.config.height.max(1));
        let scale = (w / view_w).min(h / view_h).max(1.0e-6);

        let content_w = view_w * scale;
        let content_h = view_h * scale;
        let pad_x = 0.5 * (w - content_w).max(0.0);
        let pad_y = 0.5 * (h - content_h).max(0.0);

        Affine::translate(Vec2::new(pad_x, pad_y))
            * Affine::scale(scale)
            * Affine::translate(Vec2::new(-self.view.x0, -self.view.y0))
    }

    /// Re-derives hover state from the current pointer position.
    fn update_hover(&mut self) {
        let hovered = self.cursor.and_then(|cursor| {
            let scene_point = self.fit_transform().inverse() * cursor;
            self.scene.hit_test(scene_point)
        });
        if hovered != self.hovered {
            self.hovered = hovered;
            self.request_redraw();
        } else if hovered.is_some() {
            // Tooltip tracks the pointer even over the same mark.
            self.request_redraw();
        }
    }

    fn repaint(&mut self) {
        self.vello_scene.reset();
        let transform = self.fit_transform();
        let elapsed_ms = self.elapsed_ms();
        paint_scene(
            &mut self.vello_scene,
            &self.scene,
            transform,
            elapsed_ms,
            self.hovered,
            &self.text,
        );

        if let (Some(id), Some(cursor)) = (self.hovered, self.cursor)
            && let Some(mark) = self.scene.mark(id)
            && let Some(hover) = &mark.hover
        {
            paint_tooltip(&mut self.vello_scene, &self.text, hover, cursor);
        }
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("vistat")
                        .with_inner_size(PhysicalSize::new(1280_u32, 720_u32)),
                )
                .expect("create window"),
        );
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface = pollster::block_on(self.render_cx.create_surface(
            window.clone(),
            width,
            height,
            wgpu::PresentMode::AutoVsync,
        ))
        .expect("create surface");

        let device_handle = &self.render_cx.devices[surface.dev_id];
        let renderer = Renderer::new(
            &device_handle.device,
            RendererOptions {
                antialiasing_support: AaSupport::all(),
                num_init_threads: NonZeroUsize::new(1),
                ..RendererOptions::default()
            },
        )
        .expect("create vello renderer");

        self.window_id = Some(window.id());
        self.window = Some(window);
        self.surface = Some(surface);
        self.renderer = Some(renderer);

        match ChartId::parse(&self.initial_chart) {
            Some(id) => self.select_chart(id),
            None => {
                log::warn!("unknown chart identifier {:?}", self.initial_chart);
                let view = self.view_size();
                self.view = Rect::new(0.0, 0.0, view.width, view.height);
                self.scene
                    .replace(render::placeholder_marks(&self.initial_chart, view));
                self.update_window_title();
                self.request_redraw();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        let UserEvent::LoadComplete { generation, result } = event;
        if !self.dispatcher.is_current(generation) {
            // A newer selection or resize superseded this invocation.
            log::warn!("discarding stale render generation {generation}");
            return;
        }

        match result {
            Ok(data) => {
                let chart =
                    render::build_chart_scene(&data, self.view_size(), self.tokens, &self.text);
                self.view = chart.view;
                self.scene.replace(chart.marks);
            }
            Err(err) => {
                log::error!("dataset load failed: {err}");
                let view = self.view_size();
                self.view = Rect::new(0.0, 0.0, view.width, view.height);
                self.scene.replace(render::error_marks(&err.to_string()));
            }
        }

        self.render_started = Instant::now();
        self.update_hover();
        self.request_redraw();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(deadline) = self.debouncer.deadline() {
            if self.debouncer.fire(Instant::now()) {
                let id = self.dispatcher.active();
                log::info!("resize settled; re-rendering {}", id.as_str());
                let generation = self.dispatcher.reinvoke();
                self.start_render(generation);
                event_loop.set_control_flow(ControlFlow::Wait);
            } else {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }

        if self.scene.any_entering(self.elapsed_ms()) {
            self.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if Some(id) != self.window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if width == 0 || height == 0 {
                    return;
                }
                if let Some(surface) = self.surface.as_mut() {
                    self.render_cx.resize_surface(surface, width, height);
                }
                self.debouncer
                    .notify(Instant::now(), self.dispatcher.active().debounce_window());
                self.request_redraw();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => event_loop.exit(),
                Key::Named(NamedKey::ArrowRight) => {
                    self.select_chart(self.dispatcher.active().next());
                }
                Key::Named(NamedKey::ArrowLeft) => {
                    self.select_chart(self.dispatcher.active().prev());
                }
                Key::Character(c) => {
                    let selected = match c.as_str() {
                        "1" => Some(ChartId::Bar),
                        "2" => Some(ChartId::Scatter),
                        "3" => Some(ChartId::Heatmap),
                        "4" => Some(ChartId::Choropleth),
                        "5" => Some(ChartId::Treemap),
                        _ => None,
                    };
                    if let Some(selected) = selected
                        && selected != self.dispatcher.active()
                    {
                        self.select_chart(selected);
                    }
                }
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(Point::new(position.x, position.y));
                self.update_hover();
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                if self.hovered.take().is_some() {
                    self.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                self.repaint();
                let Some(surface) = self.surface.as_mut() else {
                    return;
                };
                let Some(renderer) = self.renderer.as_mut() else {
                    return;
                };
                let device_handle = &self.render_cx.devices[surface.dev_id];

                let surface_texture = match surface.surface.get_current_texture() {
                    Ok(texture) => texture,
                    Err(_) => {
                        self.render_cx.resize_surface(
                            surface,
                            surface.config.width,
                            surface.config.height,
                        );
                        return;
                    }
                };
                let surface_view = surface_texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                renderer
                    .render_to_texture(
                        &device_handle.device,
                        &device_handle.queue,
                        &self.vello_scene,
                        &surface.target_view,
                        &RenderParams {
                            base_color: css::WHITE,
                            width: surface.config.width,
                            height: surface.config.height,
                            antialiasing_method: AaConfig::Msaa16,
                        },
                    )
                    .expect("render");

                let mut encoder =
                    device_handle
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("blit"),
                        });
                surface.blitter.copy(
                    &device_handle.device,
                    &mut encoder,
                    &surface.target_view,
                    &surface_view,
                );
                device_handle.queue.submit([encoder.finish()]);
                surface_texture.present();

                // Keep the redraw loop alive while staggered entries run.
                if self.scene.any_entering(self.elapsed_ms()) {
                    self.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Headless path: load, build, and dump one chart as SVG.
fn run_export(args: &cli::Args, tokens: StyleTokens, path: &std::path::Path) -> bool {
    let text = TextEngine::new();
    let view = Size::new(args.width.max(1.0), args.height.max(1.0));

    let marks = match ChartId::parse(&args.chart) {
        Some(id) => match render::load_chart_data(id, &args.data_dir) {
            Ok(data) => render::build_chart_scene(&data, view, tokens, &text).marks,
            Err(err) => {
                log::error!("dataset load failed: {err}");
                render::error_marks(&err.to_string())
            }
        },
        None => {
            log::warn!("unknown chart identifier {:?}", args.chart);
            render::placeholder_marks(&args.chart, view)
        }
    };

    let mut scene = Scene::new();
    scene.replace(marks);
    let svg = svg::scene_to_svg(&scene, Rect::new(0.0, 0.0, view.width, view.height));

    match std::fs::write(path, svg) {
        Ok(()) => {
            log::info!("wrote {}", path.display());
            true
        }
        Err(err) => {
            log::error!("failed to write {}: {err}", path.display());
            false
        }
    }
}

fn main() {
    env_logger::init();
    let args = cli::Args::parse();

    let tokens = StyleTokens {
        bar_color: cli::parse_hex_color(&args.bar_color).unwrap_or_else(|| {
            log::warn!("invalid --bar-color {:?}; using the default", args.bar_color);
            css::STEEL_BLUE
        }),
        bar_hover: cli::parse_hex_color(&args.bar_hover).unwrap_or_else(|| {
            log::warn!("invalid --bar-hover {:?}; using the default", args.bar_hover);
            css::TOMATO
        }),
    };

    if let Some(path) = &args.export {
        if !run_export(&args, tokens, path) {
            std::process::exit(1);
        }
        return;
    }

    let event_loop = EventLoop::<UserEvent>::with_user_event()
        .build()
        .expect("event loop");
    let proxy = event_loop.create_proxy();
    let mut app = App::new(&args, tokens, proxy);
    event_loop.run_app(&mut app).expect("run");
}
