// File: crates/timing-plot/src/viewer.rs
// Summary: Interactive viewer seam; window implementation blits the rendered RGBA frame via winit + softbuffer.

use chart_core::RgbaImage;

use crate::error::PlotError;

/// Presents a rendered frame on screen.
pub trait Viewer {
    /// Show `frame` and block until the viewer is dismissed.
    fn show(&self, title: &str, frame: &RgbaImage) -> Result<(), PlotError>;
}

/// Viewer used when `show_interactive` is set.
pub fn default_viewer() -> Box<dyn Viewer> {
    #[cfg(feature = "window")]
    {
        Box::new(window::WindowViewer)
    }
    #[cfg(not(feature = "window"))]
    {
        Box::new(NoDisplay)
    }
}

/// Stand-in for builds without the `window` feature; always reports no display.
#[cfg(not(feature = "window"))]
struct NoDisplay;

#[cfg(not(feature = "window"))]
impl Viewer for NoDisplay {
    fn show(&self, _title: &str, _frame: &RgbaImage) -> Result<(), PlotError> {
        Err(PlotError::display_unavailable("built without the `window` feature"))
    }
}

/// Pack RGBA8 into the 0RGB words softbuffer expects.
pub fn pack_0rgb(frame: &RgbaImage) -> Vec<u32> {
    let mut out = Vec::with_capacity(frame.width as usize * frame.height as usize);
    for row in frame.pixels.chunks_exact(frame.stride).take(frame.height as usize) {
        for px in row.chunks_exact(4).take(frame.width as usize) {
            out.push(((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32);
        }
    }
    out
}

#[cfg(feature = "window")]
pub use window::WindowViewer;

#[cfg(feature = "window")]
mod window {
    use std::num::NonZeroU32;
    use std::rc::Rc;

    use chart_core::RgbaImage;
    use tracing::{debug, warn};
    use winit::dpi::PhysicalSize;
    use winit::event::{Event, WindowEvent};
    use winit::event_loop::{ControlFlow, EventLoop};
    use winit::window::{Window, WindowBuilder};

    use super::{pack_0rgb, Viewer};
    use crate::error::PlotError;

    // Fill for any window area beyond the frame (white).
    const BACKDROP: u32 = 0x00FF_FFFF;

    /// Opens a fixed-size window showing the frame; returns when the window is closed.
    pub struct WindowViewer;

    impl Viewer for WindowViewer {
        fn show(&self, title: &str, frame: &RgbaImage) -> Result<(), PlotError> {
            ensure_display()?;

            let event_loop = EventLoop::new().map_err(PlotError::display_unavailable)?;
            let window = WindowBuilder::new()
                .with_title(title)
                .with_inner_size(PhysicalSize::new(frame.width, frame.height))
                .with_resizable(false)
                .build(&event_loop)
                .map_err(PlotError::display_unavailable)?;
            let window = Rc::new(window);

            let context = softbuffer::Context::new(window.clone()).map_err(PlotError::display_unavailable)?;
            let mut surface =
                softbuffer::Surface::new(&context, window.clone()).map_err(PlotError::display_unavailable)?;

            let packed = pack_0rgb(frame);
            let (frame_w, frame_h) = (frame.width, frame.height);
            let mut size = window.inner_size();

            event_loop
                .run(move |event, elwt| {
                    elwt.set_control_flow(ControlFlow::Wait);
                    let Event::WindowEvent { window_id, event } = event else { return };
                    if window_id != window.id() {
                        return;
                    }
                    match event {
                        WindowEvent::CloseRequested => {
                            debug!("viewer close requested");
                            elwt.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            size = new_size;
                            window.request_redraw();
                        }
                        WindowEvent::RedrawRequested => {
                            if let Err(e) = present(&mut surface, size, &packed, frame_w, frame_h) {
                                warn!("present error: {e}");
                                elwt.exit();
                            }
                        }
                        _ => {}
                    }
                })
                .map_err(PlotError::display_unavailable)
        }
    }

    // Copy the frame into the window buffer, anchored top-left and cropped to the window.
    fn present(
        surface: &mut softbuffer::Surface<Rc<Window>, Rc<Window>>,
        size: PhysicalSize<u32>,
        packed: &[u32],
        frame_w: u32,
        frame_h: u32,
    ) -> Result<(), softbuffer::SoftBufferError> {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(());
        };
        surface.resize(w, h)?;
        let mut buffer = surface.buffer_mut()?;
        buffer.fill(BACKDROP);
        let cols = size.width.min(frame_w) as usize;
        let rows = size.height.min(frame_h) as usize;
        for y in 0..rows {
            let dst = y * size.width as usize;
            let src = y * frame_w as usize;
            buffer[dst..dst + cols].copy_from_slice(&packed[src..src + cols]);
        }
        buffer.present()
    }

    // Without a display server winit may abort instead of returning an error.
    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    fn ensure_display() -> Result<(), PlotError> {
        display_from_env(|var| std::env::var_os(var))
    }

    // X11 or Wayland must be advertised through the environment.
    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    fn display_from_env(var: impl Fn(&str) -> Option<std::ffi::OsString>) -> Result<(), PlotError> {
        let has = |name: &str| var(name).is_some_and(|v| !v.is_empty());
        if has("DISPLAY") || has("WAYLAND_DISPLAY") {
            Ok(())
        } else {
            Err(PlotError::display_unavailable("neither DISPLAY nor WAYLAND_DISPLAY is set"))
        }
    }

    #[cfg(not(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android")))))]
    fn ensure_display() -> Result<(), PlotError> {
        Ok(())
    }

    #[cfg(all(test, unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    mod tests {
        use std::ffi::OsString;

        use super::*;

        fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<OsString> {
            move |name| pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| OsString::from(v))
        }

        #[test]
        fn headless_environment_is_display_unavailable() {
            let err = display_from_env(env(&[])).unwrap_err();
            assert!(matches!(err, PlotError::DisplayUnavailable { .. }), "got {err:?}");
            // Set but empty counts as unset.
            assert!(display_from_env(env(&[("DISPLAY", "")])).is_err());
        }

        #[test]
        fn x11_or_wayland_is_enough() {
            assert!(display_from_env(env(&[("DISPLAY", ":0")])).is_ok());
            assert!(display_from_env(env(&[("WAYLAND_DISPLAY", "wayland-0")])).is_ok());
        }
    }
}
