#![windows_subsystem = "windows"]
//! Picsum Gallery - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod constants;
mod gallery;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use tracing::{info, warn};
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "picsum-gallery.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,picsum_gallery=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Picsum Gallery starting");

    let settings = settings::Settings::load(&data_dir);

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(settings.window_size().unwrap_or(egui::vec2(1280.0, 860.0)))
        .with_min_inner_size([360.0, 520.0])
        .with_title(APP_NAME);

    match utils::rasterize_icon(256) {
        Some((rgba, width, height)) => {
            let icon = egui::IconData { rgba, width, height };
            viewport = viewport.with_icon(std::sync::Arc::new(icon));
        }
        None => warn!("Failed to rasterize window icon"),
    }

    if let Some(pos) = settings.window_pos() {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, settings, data_dir)?))),
    )
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Fetch the first page on first frame
        self.start(ctx);

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Apply results from background tasks
        self.poll_fetch_results();
        self.poll_thumbnails(ctx);

        // Arrow keys page through the gallery
        if !ctx.wants_keyboard_input() {
            let (left, right) = ctx.input(|i| {
                (
                    i.key_pressed(egui::Key::ArrowLeft),
                    i.key_pressed(egui::Key::ArrowRight),
                )
            });
            if left {
                self.prev_page(ctx);
            }
            if right {
                self.next_page(ctx);
            }
        }

        // Panels must be added before CentralPanel
        self.render_header(ctx);
        self.render_controls(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| {
                self.render_grid(ui, ctx);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}
