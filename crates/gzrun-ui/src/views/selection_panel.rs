//! Left pane: the three pickers and the launch and save controls.

use gpui::{Context, IntoElement, MouseButton, div, prelude::*, px, rgb};
use gzrun_core::PickerKind;

use crate::state::AppState;
use crate::views::MainView;

fn picker_title(picker: PickerKind) -> &'static str {
    match picker {
        PickerKind::Executable => "Engine executable",
        PickerKind::BaseData => "IWAD",
        PickerKind::Overlays => "External files",
    }
}

fn picker_button_id(picker: PickerKind) -> &'static str {
    match picker {
        PickerKind::Executable => "pick-executable-btn",
        PickerKind::BaseData => "pick-base-data-btn",
        PickerKind::Overlays => "pick-overlays-btn",
    }
}

pub fn render_selection_panel(state: &AppState, cx: &mut Context<MainView>) -> impl IntoElement {
    div()
        .w(px(360.0))
        .flex_none()
        .flex()
        .flex_col()
        .gap_4()
        .child(render_single_picker(state, PickerKind::Executable, cx))
        .child(render_single_picker(state, PickerKind::BaseData, cx))
        .child(render_overlay_picker(state, cx))
        .child(render_actions(state, cx))
}

/// Button that opens `picker`'s dialog. Inert while that dialog is open.
fn render_picker_button(
    picker: PickerKind,
    label: &'static str,
    picking: bool,
    cx: &mut Context<MainView>,
) -> impl IntoElement {
    div()
        .id(picker_button_id(picker))
        .px_3()
        .py_1()
        .bg(rgb(0x444444))
        .rounded_md()
        .text_sm()
        .text_color(rgb(0xffffff))
        .when(picking, |this| this.opacity(0.5))
        .when(!picking, |this| {
            this.cursor_pointer()
                .hover(|style| style.bg(rgb(0x555555)))
                .on_mouse_up(
                    MouseButton::Left,
                    cx.listener(move |view, _, _, cx| {
                        view.on_pick_click(picker, cx);
                    }),
                )
        })
        .child(label)
}

fn render_single_picker(
    state: &AppState,
    picker: PickerKind,
    cx: &mut Context<MainView>,
) -> impl IntoElement {
    let missing = state.is_required_missing(picker);
    let selected = state.selected_label(picker);
    let has_selection = selected.is_some();

    div()
        .flex()
        .flex_col()
        .gap_1()
        .child(
            div()
                .text_sm()
                .text_color(rgb(0xaaaaaa))
                .child(picker_title(picker)),
        )
        .child(
            div()
                .flex()
                .items_center()
                .gap_2()
                .child(render_picker_button(
                    picker,
                    "Browse…",
                    state.is_picking(picker),
                    cx,
                ))
                .child(
                    div()
                        .flex_1()
                        .px_2()
                        .py_1()
                        .rounded_md()
                        .border_1()
                        .border_color(if missing {
                            rgb(0xcc4444)
                        } else {
                            rgb(0x444444)
                        })
                        .text_sm()
                        .text_color(if has_selection {
                            rgb(0xffffff)
                        } else {
                            rgb(0x777777)
                        })
                        .overflow_hidden()
                        .child(selected.unwrap_or_else(|| "No file selected".to_string())),
                ),
        )
        // Required-missing flag
        .when(missing, |this| {
            this.child(
                div()
                    .text_xs()
                    .text_color(rgb(0xff6b6b))
                    .child("Required"),
            )
        })
}

fn render_overlay_picker(state: &AppState, cx: &mut Context<MainView>) -> impl IntoElement {
    let rows = state.overlay_rows();

    div()
        .flex()
        .flex_col()
        .gap_1()
        .child(
            div()
                .flex()
                .items_center()
                .justify_between()
                .child(
                    div()
                        .text_sm()
                        .text_color(rgb(0xaaaaaa))
                        .child(picker_title(PickerKind::Overlays)),
                )
                .child(render_picker_button(
                    PickerKind::Overlays,
                    "Add…",
                    state.is_picking(PickerKind::Overlays),
                    cx,
                )),
        )
        .child(
            div()
                .min_h(px(64.0))
                .p_2()
                .rounded_md()
                .border_1()
                .border_color(rgb(0x444444))
                .flex()
                .flex_col()
                .gap_1()
                .when(rows.is_empty(), |this| {
                    this.child(div().text_sm().text_color(rgb(0x777777)).child("None"))
                })
                // One row per added path, duplicates included
                .children(
                    rows.into_iter()
                        .map(|row| div().text_sm().text_color(rgb(0xffffff)).child(row)),
                ),
        )
}

fn render_actions(state: &AppState, cx: &mut Context<MainView>) -> impl IntoElement {
    let can_launch = state.can_launch();
    let last_saved = state
        .last_saved()
        .map(|path| format!("Saved to {}", path.display()));

    div()
        .flex()
        .flex_col()
        .gap_2()
        .child(
            div()
                .flex()
                .gap_2()
                // Launch button (green), enabled only with both required files
                .child(
                    div()
                        .id("launch-btn")
                        .flex_1()
                        .px_4()
                        .py_2()
                        .rounded_md()
                        .flex()
                        .justify_center()
                        .text_color(rgb(0xffffff))
                        .when(can_launch, |this| {
                            this.bg(rgb(0x2f8f46))
                                .hover(|style| style.bg(rgb(0x38a852)))
                                .cursor_pointer()
                                .on_mouse_up(
                                    MouseButton::Left,
                                    cx.listener(|view, _, _, cx| {
                                        view.on_launch_click(cx);
                                    }),
                                )
                        })
                        .when(!can_launch, |this| this.bg(rgb(0x2d3a2f)).opacity(0.6))
                        .child("Launch"),
                )
                // Save button (gray)
                .child(
                    div()
                        .id("save-config-btn")
                        .px_4()
                        .py_2()
                        .bg(rgb(0x444444))
                        .hover(|style| style.bg(rgb(0x555555)))
                        .rounded_md()
                        .cursor_pointer()
                        .on_mouse_up(
                            MouseButton::Left,
                            cx.listener(|view, _, _, cx| {
                                view.on_save_click(cx);
                            }),
                        )
                        .child(div().text_color(rgb(0xffffff)).child("Save")),
                ),
        )
        .when_some(last_saved, |this, message| {
            this.child(div().text_xs().text_color(rgb(0x888888)).child(message))
        })
}
