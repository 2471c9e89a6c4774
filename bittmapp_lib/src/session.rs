//! Editing session state.
//!
//! The input layer translates pointer and keyboard events into calls on a `Session`; the
//! session owns the raster and its selection, remembers the active tool and the drag anchor,
//! and clamps pointer coordinates before they reach the bit-level operations.

use crate::config::{InvalidConfig, RasterConfig};
use crate::raster::Raster;
use crate::selection::SelectionMask;
use log::trace;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Select,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Drag {
    anchor: (u32, u32),
    button: Button,
    additive: bool,
}

pub struct Session {
    raster: Raster,
    selection: SelectionMask,
    tool: Tool,
    drag: Option<Drag>,
}
impl Session {
    pub fn new(config: &RasterConfig) -> Result<Self, InvalidConfig> {
        Ok(Self::from_raster(Raster::from_config(config)?))
    }

    pub fn from_raster(raster: Raster) -> Self {
        let selection = SelectionMask::for_raster(&raster);
        Session {
            raster,
            selection,
            tool: Tool::default(),
            drag: None,
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn selection(&self) -> &SelectionMask {
        &self.selection
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Switch tools. Drawing tools drop the current selection.
    pub fn set_tool(&mut self, tool: Tool) {
        trace!("tool {:?} -> {:?}", self.tool, tool);
        if matches!(tool, Tool::Pencil | Tool::Eraser) {
            self.selection.deselect_all();
        }
        self.tool = tool;
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
    }

    /// Start a stroke or selection drag at a pointer position.
    ///
    /// `additive` is the shift-held state: it keeps the existing selection and makes the
    /// select tool toggle single pixels instead of spanning a rectangle.
    pub fn press(&mut self, x: i32, y: i32, button: Button, additive: bool) {
        let Some(anchor) = self.clamp(x, y) else {
            return;
        };
        if !additive {
            self.selection.deselect_all();
        }
        self.drag = Some(Drag {
            anchor,
            button,
            additive,
        });
        self.apply(anchor);
    }

    /// Continue the active stroke or drag. Does nothing without a prior `press`.
    pub fn drag_to(&mut self, x: i32, y: i32) {
        if self.drag.is_none() {
            return;
        }
        if let Some(point) = self.clamp(x, y) {
            self.apply(point);
        }
    }

    pub fn release(&mut self) {
        self.drag = None;
    }

    /// Change dimensions. Raster and selection both come back cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.raster.resize(width, height);
        self.selection.resize(width, height);
        self.drag = None;
    }

    /// Replace the raster wholesale, e.g. after loading a file.
    pub fn load(&mut self, raster: Raster) {
        self.selection = SelectionMask::for_raster(&raster);
        self.raster = raster;
        self.drag = None;
    }

    /// Draw or erase every selected pixel.
    pub fn fill_selection(&mut self, on: bool) {
        self.raster.fill_selection(&self.selection, on);
    }

    fn clamp(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let (w, h) = (self.raster.width(), self.raster.height());
        if w == 0 || h == 0 {
            return None;
        }
        let x = (x.max(0) as u32).min(w - 1);
        let y = (y.max(0) as u32).min(h - 1);
        Some((x, y))
    }

    fn apply(&mut self, (x, y): (u32, u32)) {
        let Some(drag) = self.drag else {
            return;
        };
        match (self.tool, drag.button) {
            (Tool::Pencil, Button::Primary) | (Tool::Eraser, Button::Secondary) => self.raster.set_pixel(x, y),
            (Tool::Pencil, Button::Secondary) | (Tool::Eraser, Button::Primary) => self.raster.clear_pixel(x, y),
            (Tool::Select, _) if drag.additive => self.selection.toggle_point(x, y),
            (Tool::Select, _) => {
                let (ax, ay) = drag.anchor;
                self.selection
                    .select_rectangle(ax as i32, ay as i32, x as i32, y as i32);
            }
        }
    }
}
