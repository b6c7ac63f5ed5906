//! Main view for gzrun-ui.
//!
//! Root view that composes the header, the error banner, the selection pane
//! and the output log. Owns the application state and runs the dialog and
//! output tasks.

use futures::StreamExt;
use gpui::{
    AsyncApp, Context, FontWeight, IntoElement, MouseButton, Render, ScrollHandle, Window, div,
    prelude::*, rgb,
};
use gzrun_core::{LaunchHandle, LauncherSettings, PickerKind};

use crate::actions;
use crate::dialogs;
use crate::state::AppState;
use crate::views::{console_log, selection_panel};

pub struct MainView {
    state: AppState,
    console_scroll: ScrollHandle,
}

impl MainView {
    pub fn new(
        settings: LauncherSettings,
        startup_errors: Vec<String>,
        _cx: &mut Context<Self>,
    ) -> Self {
        Self {
            state: AppState::new(settings, startup_errors),
            console_scroll: ScrollHandle::new(),
        }
    }

    /// Apply a state mutation and notify GPUI to re-render.
    fn mutate_state(&mut self, cx: &mut Context<Self>, f: impl FnOnce(&mut AppState)) {
        f(&mut self.state);
        cx.notify();
    }

    /// Handle click on a picker button.
    ///
    /// Opens the native dialog on the foreground executor; the result is
    /// applied when the user closes it. Ignored while that picker's dialog is
    /// still open.
    pub fn on_pick_click(&mut self, picker: PickerKind, cx: &mut Context<Self>) {
        if !self.state.begin_selection(picker) {
            tracing::debug!(event = "ui.picker.click_ignored", picker = %picker);
            return;
        }
        tracing::info!(event = "ui.picker.dialog_opened", picker = %picker);
        cx.notify();

        cx.spawn(async move |this, cx: &mut AsyncApp| {
            let paths = dialogs::pick_paths(picker).await;

            if let Err(e) = this.update(cx, |view, cx| {
                match &paths {
                    Some(paths) => tracing::info!(
                        event = "ui.picker.selection_completed",
                        picker = %picker,
                        count = paths.len()
                    ),
                    None => {
                        tracing::info!(event = "ui.picker.selection_cancelled", picker = %picker)
                    }
                }
                view.state.finish_selection(picker, paths);
                cx.notify();
            }) {
                tracing::warn!(
                    event = "ui.picker.view_update_failed",
                    picker = %picker,
                    error = ?e
                );
            }
        })
        .detach();
    }

    /// Handle click on the Launch button.
    ///
    /// Spawns the program and appends every chunk it writes to stdout as a
    /// console row until the stream closes.
    pub fn on_launch_click(&mut self, cx: &mut Context<Self>) {
        if !self.state.can_launch() {
            return;
        }

        let LaunchHandle { pid, mut output } =
            match actions::launch_program(self.state.config(), self.state.settings()) {
                Ok(handle) => handle,
                Err(e) => {
                    tracing::warn!(event = "ui.launch.error_displayed", error = %e);
                    self.mutate_state(cx, |s| s.push_error(e));
                    return;
                }
            };

        cx.spawn(async move |this, cx: &mut AsyncApp| {
            while let Some(text) = output.next().await {
                if let Err(e) = this.update(cx, |view, cx| view.on_output_chunk(text, cx)) {
                    tracing::debug!(
                        event = "ui.output.stopped",
                        pid = pid,
                        reason = "view_dropped",
                        error = ?e
                    );
                    return;
                }
            }
            tracing::debug!(event = "ui.output.stream_closed", pid = pid);
        })
        .detach();
    }

    /// Append one chunk, following it if the log was near the bottom before.
    fn on_output_chunk(&mut self, text: String, cx: &mut Context<Self>) {
        // Last frame's layout; the new row is not measured until the next one.
        let follow = console_log::scroll_metrics(&self.console_scroll)
            .should_stick_to_bottom(self.state.autoscroll_threshold());

        self.state.push_output(text);
        if follow {
            let last = self.state.console_rows().len().saturating_sub(1);
            self.console_scroll.scroll_to_item(last);
        }
        cx.notify();
    }

    /// Handle click on the Save button.
    pub fn on_save_click(&mut self, cx: &mut Context<Self>) {
        match actions::save_config(self.state.config()) {
            Ok(path) => self.state.set_last_saved(path),
            Err(e) => {
                tracing::warn!(event = "ui.save.error_displayed", error = %e);
                self.state.push_error(e);
            }
        }
        cx.notify();
    }

    fn on_dismiss_errors(&mut self, cx: &mut Context<Self>) {
        self.mutate_state(cx, |s| s.dismiss_errors());
    }
}

impl Render for MainView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(rgb(0x1e1e1e))
            // Header
            .child(
                div()
                    .px_4()
                    .py_3()
                    .border_b_1()
                    .border_color(rgb(0x333333))
                    .child(
                        div()
                            .text_xl()
                            .text_color(rgb(0xffffff))
                            .font_weight(FontWeight::BOLD)
                            .child("gzrun"),
                    ),
            )
            // Error banner (settings, save and launch failures)
            .when(self.state.has_banner_errors(), |this| {
                let errors = self.state.banner_errors();
                this.child(
                    div()
                        .mx_4()
                        .mt_2()
                        .px_4()
                        .py_2()
                        .bg(rgb(0x3d1e1e))
                        .rounded_md()
                        .border_1()
                        .border_color(rgb(0x662222))
                        .flex()
                        .flex_col()
                        .gap_1()
                        .child(
                            div()
                                .flex()
                                .justify_between()
                                .items_center()
                                .child(
                                    div()
                                        .text_color(rgb(0xff6b6b))
                                        .font_weight(FontWeight::BOLD)
                                        .child(format!(
                                            "Error{}:",
                                            if errors.len() == 1 { "" } else { "s" }
                                        )),
                                )
                                .child(
                                    div()
                                        .id("dismiss-errors-btn")
                                        .px_2()
                                        .rounded_md()
                                        .cursor_pointer()
                                        .hover(|style| style.bg(rgb(0x552222)))
                                        .on_mouse_up(
                                            MouseButton::Left,
                                            cx.listener(|view, _, _, cx| {
                                                view.on_dismiss_errors(cx);
                                            }),
                                        )
                                        .child(div().text_color(rgb(0xff6b6b)).child("×")),
                                ),
                        )
                        .children(errors.iter().map(|e| {
                            div()
                                .text_sm()
                                .text_color(rgb(0xff9999))
                                .child(format!("• {}", e))
                        })),
                )
            })
            // Selection pane and output log
            .child(
                div()
                    .flex_1()
                    .min_h_0()
                    .p_4()
                    .flex()
                    .gap_4()
                    .child(selection_panel::render_selection_panel(&self.state, cx))
                    .child(console_log::render_console_log(
                        &self.state,
                        &self.console_scroll,
                    )),
            )
    }
}
