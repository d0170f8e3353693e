use bevy::prelude::*;
use bevy::window::PresentMode;

/// Primary window. On the web it takes over the `#globe` canvas and follows its parent's size.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#globe".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Globe".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
