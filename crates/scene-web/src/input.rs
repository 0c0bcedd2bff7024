use glam::Vec2;
use web_sys as web;

/// Which orbit gesture a pointer drag drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Primary button rotates (or pans with a modifier held), secondary pans.
#[inline]
pub fn drag_mode_for_button(button: i16, modifier: bool) -> Option<DragMode> {
    match button {
        0 if modifier => Some(DragMode::Pan),
        0 => Some(DragMode::Rotate),
        2 => Some(DragMode::Pan),
        _ => None,
    }
}

/// Single-pointer drag tracker; other pointers are ignored while one is down.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerDrag {
    active: Option<(i32, DragMode)>,
    last: Vec2,
}

impl PointerDrag {
    pub fn begin(&mut self, pointer_id: i32, mode: DragMode, at: Vec2) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some((pointer_id, mode));
        self.last = at;
        true
    }

    /// Pixel delta since the previous sample of the active pointer.
    pub fn move_to(&mut self, pointer_id: i32, at: Vec2) -> Option<(DragMode, Vec2)> {
        let (id, mode) = self.active?;
        if id != pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some((mode, delta))
    }

    pub fn end(&mut self, pointer_id: i32) -> bool {
        match self.active {
            Some((id, _)) if id == pointer_id => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn mode(&self) -> Option<DragMode> {
        self.active.map(|(_, m)| m)
    }
}

/// Wheel deltas in lines or pages are converted to approximate pixels.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    let scale = match delta_mode {
        1 => 16.0,
        2 => 800.0,
        _ => 1.0,
    };
    (delta_y * scale) as f32
}

// Pointer position in CSS pixels relative to the canvas
#[inline]
pub fn pointer_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}
