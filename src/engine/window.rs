use sdl2::video::{GLContext, GLProfile, Window};
use sdl2::Sdl;
use tracing::info;

use crate::error::GfxError;

pub struct GameWindow {
    _gl_context: GLContext,
    window: Window,
}

impl GameWindow {
    pub fn new(sdl: &Sdl, title: &str, width: u32, height: u32) -> Result<Self, GfxError> {
        let video = sdl.video().map_err(GfxError::Sdl)?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video
            .window(title, width, height)
            .opengl()
            .resizable()
            .position_centered()
            .build()?;

        let gl_context = window.gl_create_context().map_err(GfxError::Sdl)?;

        gl::load_with(|s| video.gl_get_proc_address(s) as *const _);
        info!(width, height, "window created");

        Ok(Self {
            _gl_context: gl_context,
            window,
        })
    }

    pub fn swap(&self) {
        self.window.gl_swap_window();
    }

    pub fn size(&self) -> (u32, u32) {
        self.window.size()
    }

    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = self.window.size();
        w as f32 / h.max(1) as f32
    }
}
