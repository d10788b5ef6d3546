// Window + input.
// Visual effects provided here:
// 1) A window that shows the painted canvas.
// 2) A left click anywhere in it starts a new run.

use crate::error::Error;
use crate::types::FrameBuffer;
use minifb::{Key, MouseButton, Window, WindowOptions};

/// Turns a held button into a single press: true only on the up -> down edge.
#[derive(Debug, Default)]
pub struct ClickEdge {
    was_down: bool,
}

impl ClickEdge {
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }
}

pub struct Drawer {
    window: Window,   // the on-screen window you see
    left_click: ClickEdge,
}

impl Drawer {
    /// Create a window of the canvas size, refreshed at ~60 fps.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, left_click: ClickEdge::default() })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// True once per left click: on the frame the button goes down.
    pub fn clicked(&mut self) -> bool {
        let down = self.window.get_mouse_down(MouseButton::Left);
        self.left_click.update(down)
    }
}
