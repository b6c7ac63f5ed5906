//! gzrun-ui: GUI for gzrun
//!
//! GPUI-based launcher window: three file pickers, a launch control and the
//! colorized output log of the launched program.

use gpui::{
    App, AppContext, Application, Bounds, SharedString, TitlebarOptions, WindowBounds,
    WindowOptions, px, size,
};

mod actions;
mod dialogs;
mod state;
mod views;

use views::MainView;

fn main() {
    gzrun_core::init_logging(false);
    gzrun_core::events::log_app_startup("gzrun-ui");

    let (settings, startup_errors) = actions::load_settings();

    Application::new().run(move |cx: &mut App| {
        let bounds = Bounds::centered(None, size(px(960.0), px(640.0)), cx);
        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some(SharedString::from("gzrun")),
                    ..Default::default()
                }),
                ..Default::default()
            },
            |_, cx| cx.new(|cx| MainView::new(settings, startup_errors, cx)),
        )
        .expect("Failed to open window");
    });
}
