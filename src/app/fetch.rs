//! Listing fetches: user actions, spawning requests and folding results back in

use super::{drain, push, App};
use crate::types::{FetchOutcome, FetchRequest};
use eframe::egui;
use tracing::debug;

impl App {
    /// Issue the first fetch once the window is up.
    pub fn start(&mut self, ctx: &egui::Context) {
        if self.started {
            return;
        }
        self.started = true;
        let request = self.gallery.initial_request();
        self.spawn_fetch(ctx, request);
    }

    pub fn next_page(&mut self, ctx: &egui::Context) {
        let request = self.gallery.next_page();
        self.prune_thumbnails();
        self.spawn_fetch(ctx, request);
    }

    pub fn prev_page(&mut self, ctx: &egui::Context) {
        if let Some(request) = self.gallery.prev_page() {
            self.prune_thumbnails();
            self.spawn_fetch(ctx, request);
        }
    }

    pub fn load_more(&mut self, ctx: &egui::Context) {
        if let Some(request) = self.gallery.load_more() {
            self.spawn_fetch(ctx, request);
        }
    }

    fn spawn_fetch(&self, ctx: &egui::Context, request: FetchRequest) {
        debug!(page = request.page, limit = request.limit, "Spawning fetch");
        let client = self.client.clone();
        let inbox = self.fetch_inbox.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = client.list(request).await;
            push(&inbox, FetchOutcome { request, result });
            ctx.request_repaint();
        });
    }

    /// Apply finished fetches. Runs at the top of every frame.
    pub fn poll_fetch_results(&mut self) {
        for outcome in drain(&self.fetch_inbox) {
            self.gallery.complete(outcome);
        }
    }
}
