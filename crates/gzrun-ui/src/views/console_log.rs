//! Output log of the launched program.
//!
//! One row per received chunk, colored and sized by its message kind.

use gpui::{IntoElement, ScrollHandle, div, prelude::*, px, rgb};
use gzrun_core::ScrollMetrics;

use crate::state::AppState;

const TEXT_SIZE: f32 = 13.0;
const DEFAULT_TEXT_COLOR: u32 = 0xd4d4d4;

/// Scroll geometry of the log as laid out in the last frame.
pub fn scroll_metrics(handle: &ScrollHandle) -> ScrollMetrics {
    let viewport_height = f32::from(handle.bounds().size.height);
    let max_offset = f32::from(handle.max_offset().height);
    ScrollMetrics {
        scroll_top: -f32::from(handle.offset().y),
        viewport_height,
        content_height: viewport_height + max_offset,
    }
}

pub fn render_console_log(state: &AppState, scroll: &ScrollHandle) -> impl IntoElement {
    let rows = state.console_rows();

    div()
        .id("console-log")
        .flex_1()
        .min_h_0()
        .p_3()
        .bg(rgb(0x111111))
        .rounded_md()
        .border_1()
        .border_color(rgb(0x333333))
        .flex()
        .flex_col()
        .gap_1()
        .overflow_y_scroll()
        .track_scroll(scroll)
        .when(rows.is_empty(), |this| {
            this.child(
                div()
                    .text_sm()
                    .text_color(rgb(0x666666))
                    .child("Output of the launched program appears here."),
            )
        })
        .children(rows.iter().map(|row| {
            let style = row.style();
            div()
                .text_size(px(TEXT_SIZE * style.font_scale))
                .text_color(rgb(style.color.unwrap_or(DEFAULT_TEXT_COLOR)))
                .child(row.text.clone())
        }))
}
