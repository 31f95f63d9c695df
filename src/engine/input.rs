use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

/// Mouse travel (pixels) beyond which a press counts as a drag, not a click.
const CLICK_SLOP: f32 = 4.0;

/// Discrete input events, in arrival order, for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyPressed(Scancode),
    /// Left button released without dragging, in window coordinates.
    MouseClicked { x: f32, y: f32 },
    Resized { width: u32, height: u32 },
}

pub struct InputState {
    pub events: Vec<InputEvent>,
    /// Mouse motion this frame while the left button is held.
    pub drag_dx: f32,
    pub drag_dy: f32,
    pub scroll_dy: f32,
    pub quit: bool,
    dragging: bool,
    drag_travel: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            drag_dx: 0.0,
            drag_dy: 0.0,
            scroll_dy: 0.0,
            quit: false,
            dragging: false,
            drag_travel: 0.0,
        }
    }

    pub fn update(&mut self, event_pump: &mut EventPump) {
        self.begin_frame();
        for event in event_pump.poll_iter() {
            self.handle(event);
        }
    }

    fn begin_frame(&mut self) {
        self.events.clear();
        self.drag_dx = 0.0;
        self.drag_dy = 0.0;
        self.scroll_dy = 0.0;
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Quit { .. } => self.quit = true,
            Event::KeyDown {
                scancode: Some(Scancode::Escape),
                ..
            } => self.quit = true,
            Event::KeyDown {
                scancode: Some(sc),
                repeat: false,
                ..
            } => self.events.push(InputEvent::KeyPressed(sc)),
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                ..
            } => {
                self.dragging = true;
                self.drag_travel = 0.0;
            }
            Event::MouseButtonUp {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => {
                if self.dragging && self.drag_travel <= CLICK_SLOP {
                    self.events.push(InputEvent::MouseClicked {
                        x: x as f32,
                        y: y as f32,
                    });
                }
                self.dragging = false;
            }
            Event::MouseMotion { xrel, yrel, .. } if self.dragging => {
                self.drag_dx += xrel as f32;
                self.drag_dy += yrel as f32;
                self.drag_travel += (xrel.abs() + yrel.abs()) as f32;
            }
            Event::MouseWheel { y, .. } => {
                self.scroll_dy += y as f32;
            }
            Event::Window {
                win_event: WindowEvent::SizeChanged(w, h),
                ..
            } => {
                self.events.push(InputEvent::Resized {
                    width: w.max(1) as u32,
                    height: h.max(1) as u32,
                });
            }
            _ => {}
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Drag motion, or zero while the press may still become a click.
    pub fn orbit_delta(&self) -> (f32, f32) {
        if self.dragging && self.drag_travel > CLICK_SLOP {
            (self.drag_dx, self.drag_dy)
        } else {
            (0.0, 0.0)
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
