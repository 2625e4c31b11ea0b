//! Runs the controller's effects and debounce timers inside the Dioxus runtime.

use client::api::HttpListingsApi;
use client::state::{ListingsController, ListingsView, run_effect};
use common::filter_state::{FieldValue, FilterKey, MultiField, RangeBounds, RangeField};
use dioxus::{logger::tracing::{debug, warn}, prelude::*};
use gloo_timers::future::TimeoutFuture;

use crate::data_definitions::{clock::now_ms, url_query::sync_location};

/// Shared by every listings component.
#[derive(Clone, Copy)]
pub struct ListingsContext {
    controller: Signal<ListingsController>,
    api: Signal<HttpListingsApi>,
    /// Deadline the pending timer was armed for.
    armed: Signal<Option<u64>>,
    pub view: Memo<ListingsView>,
}

impl ListingsContext {
    pub fn new(controller: Signal<ListingsController>, api: Signal<HttpListingsApi>, armed: Signal<Option<u64>>, view: Memo<ListingsView>) -> Self {
        Self { controller, api, armed, view }
    }

    /// Spawns every queued effect. Each completion is handed back to the
    /// controller, which may queue more.
    pub fn drive(self) {
        let mut controller = self.controller;
        let effects = controller.write().take_effects();
        sync_location(&controller.peek().query());
        for effect in effects {
            let api = self.api.peek().clone();
            debug!("Running {}", effect.name());
            spawn(async move {
                let outcome = run_effect(&api, effect).await;
                controller.write().handle(outcome);
                self.drive();
            });
        }
    }

    /// Arms a timer for the earliest pending debounce deadline.
    fn schedule_tick(self) {
        let Some(deadline) = self.controller.peek().next_deadline() else { return };
        let mut armed = self.armed;
        if armed.peek().is_some_and(|at| at <= deadline) {
            return;
        }
        armed.set(Some(deadline));
        let delay = deadline.saturating_sub(now_ms()).min(u32::MAX as u64) as u32;
        spawn(async move {
            TimeoutFuture::new(delay).await;
            // an earlier deadline replaced this timer
            if *armed.peek() != Some(deadline) {
                return;
            }
            armed.set(None);
            let mut controller = self.controller;
            let committed = controller.write().tick(now_ms());
            if committed {
                self.drive();
            }
            self.schedule_tick();
        });
    }

    pub fn edit(self, key: FilterKey, value: FieldValue) {
        let mut controller = self.controller;
        let result = controller.write().edit(key, value, now_ms());
        match result {
            Ok(_) => self.schedule_tick(),
            Err(e) => warn!("Rejected edit of {}: {}", key, e),
        }
    }

    pub fn toggle(self, field: MultiField, value: String) {
        let mut controller = self.controller;
        controller.write().toggle(field, &value, now_ms());
        self.schedule_tick();
    }

    pub fn drag_range(self, field: RangeField, bounds: RangeBounds) {
        let mut controller = self.controller;
        controller.write().drag_range(field, bounds, now_ms());
        self.schedule_tick();
    }

    pub fn set_field(self, key: FilterKey, value: FieldValue) {
        let mut controller = self.controller;
        let result = controller.write().set_field(key, value);
        match result {
            Ok(()) => self.drive(),
            Err(e) => warn!("Rejected value for {}: {}", key, e),
        }
    }

    pub fn submit(self) {
        let mut controller = self.controller;
        controller.write().submit();
        self.drive();
    }

    pub fn next_page(self) {
        let mut controller = self.controller;
        controller.write().next_page();
        self.drive();
    }

    pub fn prev_page(self) {
        let mut controller = self.controller;
        controller.write().prev_page();
        self.drive();
    }
}
