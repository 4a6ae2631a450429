//! Core types for the layout pass

use crate::layout::dial::DialGeometry;

/// A 2D point in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box representing the spatial extent of a module
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// Which module edge a port sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSide {
    /// Input, on the left edge
    Input,
    /// Output, on the right edge
    Output,
}

/// A placed port with its absolute center
#[derive(Debug, Clone, PartialEq)]
pub struct PortLayout {
    pub name: String,
    pub side: PortSide,
    pub center: Point,
}

/// A placed knob with resolved dial geometry
#[derive(Debug, Clone, PartialEq)]
pub struct KnobLayout {
    pub name: String,
    pub center: Point,
    pub radius: f64,
    pub dial: DialGeometry,
}

/// A placed module with its ports and knobs
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleLayout {
    pub name: String,
    pub bounds: BoundingBox,
    pub ports: Vec<PortLayout>,
    pub knobs: Vec<KnobLayout>,
}

/// A resolved connection between two port centers
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionLayout {
    pub from: Point,
    pub to: Point,
    pub color: String,
}

/// The complete computed geometry for one render call
#[derive(Debug, Clone, PartialEq)]
pub struct PatchLayout {
    /// Final canvas width in pixels
    pub width: f64,
    /// Final canvas height in pixels
    pub height: f64,
    pub title: Option<String>,
    pub modules: Vec<ModuleLayout>,
    pub connections: Vec<ConnectionLayout>,
}
