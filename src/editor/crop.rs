// SPDX-License-Identifier: MPL-2.0
//! Interactive crop rectangle: drag, handle resize and aspect-ratio locks.
//!
//! All coordinates are canvas pixels. Every state reachable through this
//! type keeps the box inside the canvas and at least the minimum size.

use crate::domain::geometry::{AspectRatio, CanvasSize, CropBox, Point};

/// Fraction of the limiting canvas edge covered by a freshly locked ratio.
const RATIO_FILL: f64 = 0.9;

// =============================================================================
// CropHandle
// =============================================================================

/// Resize handle on the crop rectangle, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropHandle {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl CropHandle {
    /// Hit-test order: corners win over edges where they overlap.
    pub const ALL: [Self; 8] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
        Self::North,
        Self::East,
        Self::South,
        Self::West,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            CropHandle::North => "n",
            CropHandle::South => "s",
            CropHandle::East => "e",
            CropHandle::West => "w",
            CropHandle::NorthEast => "ne",
            CropHandle::NorthWest => "nw",
            CropHandle::SouthEast => "se",
            CropHandle::SouthWest => "sw",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|handle| handle.id() == id)
    }

    fn moves_left(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    /// Returns true if the handle changes the box width directly.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        self.moves_left() || self.moves_right()
    }

    /// Position of the handle on `crop`.
    #[must_use]
    pub fn position_on(self, crop: &CropBox) -> Point {
        let x = if self.moves_left() {
            crop.x
        } else if self.moves_right() {
            crop.right()
        } else {
            crop.x + crop.width / 2.0
        };
        let y = if self.moves_top() {
            crop.y
        } else if self.moves_bottom() {
            crop.bottom()
        } else {
            crop.y + crop.height / 2.0
        };
        Point::new(x, y)
    }
}

// =============================================================================
// CropGesture
// =============================================================================

/// Pointer interaction in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CropGesture {
    /// No active gesture.
    #[default]
    Idle,
    /// Moving the whole rectangle.
    Dragging {
        start_box: CropBox,
        start_pointer: Point,
    },
    /// Dragging one resize handle.
    Resizing {
        handle: CropHandle,
        start_box: CropBox,
        start_pointer: Point,
    },
}

impl CropGesture {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, CropGesture::Idle)
    }
}

// =============================================================================
// CropGeometry
// =============================================================================

/// Crop box state machine on a fixed-size canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CropGeometry {
    canvas: CanvasSize,
    crop: CropBox,
    ratio: Option<AspectRatio>,
    gesture: CropGesture,
}

impl CropGeometry {
    /// Creates a free-ratio box covering the whole canvas.
    #[must_use]
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            crop: CropBox::full(canvas),
            ratio: None,
            gesture: CropGesture::Idle,
        }
    }

    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[must_use]
    pub fn crop_box(&self) -> CropBox {
        self.crop
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        self.ratio
    }

    #[must_use]
    pub fn gesture(&self) -> CropGesture {
        self.gesture
    }

    /// Finds the handle within `tolerance` pixels of `pointer`.
    #[must_use]
    pub fn handle_at(&self, pointer: Point, tolerance: f64) -> Option<CropHandle> {
        CropHandle::ALL.into_iter().find(|handle| {
            let at = handle.position_on(&self.crop);
            (pointer.x - at.x).abs() <= tolerance && (pointer.y - at.y).abs() <= tolerance
        })
    }

    /// Begins a gesture.
    ///
    /// With a handle this starts a resize. Without one it starts a drag, but
    /// only when the pointer is inside the box. Returns true if a gesture
    /// started.
    pub fn gesture_start(&mut self, pointer: Point, handle: Option<CropHandle>) -> bool {
        let start_box = self.crop;
        self.gesture = match handle {
            Some(handle) => CropGesture::Resizing {
                handle,
                start_box,
                start_pointer: pointer,
            },
            None if self.crop.contains(pointer) => CropGesture::Dragging {
                start_box,
                start_pointer: pointer,
            },
            None => CropGesture::Idle,
        };
        self.gesture.is_active()
    }

    /// Updates the box for the pointer's new position.
    pub fn gesture_move(&mut self, pointer: Point) {
        match self.gesture {
            CropGesture::Idle => {}
            CropGesture::Dragging {
                start_box,
                start_pointer,
            } => {
                let dx = finite_or_zero(pointer.x - start_pointer.x);
                let dy = finite_or_zero(pointer.y - start_pointer.y);
                self.crop = drag_box(start_box, dx, dy, self.canvas);
            }
            CropGesture::Resizing {
                handle,
                start_box,
                start_pointer,
            } => {
                let dx = finite_or_zero(pointer.x - start_pointer.x);
                let dy = finite_or_zero(pointer.y - start_pointer.y);
                self.crop = resize_box(start_box, handle, dx, dy, self.canvas, self.ratio);
            }
        }
    }

    /// Ends the gesture. Returns true if one was active, meaning the final
    /// box should be committed to history.
    pub fn gesture_end(&mut self) -> bool {
        let was_active = self.gesture.is_active();
        self.gesture = CropGesture::Idle;
        was_active
    }

    /// Locks (or releases, with `None`) the ratio.
    ///
    /// A locked ratio re-centers the box at 90% of the limiting canvas
    /// dimension. Releasing leaves the box where it is.
    pub fn apply_aspect_ratio(&mut self, ratio: Option<AspectRatio>) {
        self.ratio = ratio;
        if let Some(ratio) = ratio {
            self.crop = centered_box(self.canvas, ratio);
        }
    }

    /// Switches to a new canvas with the box covering all of it.
    ///
    /// A locked ratio stays locked and is re-applied to the new canvas.
    pub fn reset(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
        self.gesture = CropGesture::Idle;
        self.crop = match self.ratio {
            Some(ratio) => centered_box(canvas, ratio),
            None => CropBox::full(canvas),
        };
    }

    /// Restores a box and ratio from a snapshot, clamping the box into the
    /// current canvas.
    pub fn restore(&mut self, crop: CropBox, ratio: Option<AspectRatio>) {
        self.ratio = ratio;
        self.gesture = CropGesture::Idle;
        self.crop = clamp_into(crop, self.canvas);
    }
}

// =============================================================================
// Geometry Helpers
// =============================================================================

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn drag_box(start: CropBox, dx: f64, dy: f64, canvas: CanvasSize) -> CropBox {
    let max_x = (canvas.width_f64() - start.width).max(0.0);
    let max_y = (canvas.height_f64() - start.height).max(0.0);
    CropBox::new(
        (start.x + dx).clamp(0.0, max_x),
        (start.y + dy).clamp(0.0, max_y),
        start.width,
        start.height,
    )
}

fn resize_box(
    start: CropBox,
    handle: CropHandle,
    dx: f64,
    dy: f64,
    canvas: CanvasSize,
    ratio: Option<AspectRatio>,
) -> CropBox {
    let mut width = start.width;
    let mut height = start.height;
    if handle.moves_right() {
        width += dx;
    }
    if handle.moves_left() {
        width -= dx;
    }
    if handle.moves_bottom() {
        height += dy;
    }
    if handle.moves_top() {
        height -= dy;
    }

    // The edge opposite the handle stays put
    let (anchor_x, max_width) = if handle.moves_left() {
        (start.right(), start.right())
    } else {
        (start.x, canvas.width_f64() - start.x)
    };
    let (anchor_y, max_height) = if handle.moves_top() {
        (start.bottom(), start.bottom())
    } else {
        (start.y, canvas.height_f64() - start.y)
    };
    let min_width = canvas.min_width();
    let min_height = canvas.min_height();

    match ratio {
        Some(ratio) => {
            let r = ratio.value();
            if !handle.is_horizontal() {
                width = height * r;
            }
            let lower = min_width.max(min_height * r);
            let upper = max_width.min(max_height * r);
            width = width.max(lower).min(upper);
            height = width / r;
        }
        None => {
            width = width.max(min_width).min(max_width);
            height = height.max(min_height).min(max_height);
        }
    }

    let width = width.min(canvas.width_f64());
    let height = height.min(canvas.height_f64());
    let x = if handle.moves_left() {
        anchor_x - width
    } else {
        anchor_x
    };
    let y = if handle.moves_top() {
        anchor_y - height
    } else {
        anchor_y
    };
    // Re-anchoring can leave the origin a rounding error outside the canvas
    CropBox::new(
        x.clamp(0.0, (canvas.width_f64() - width).max(0.0)),
        y.clamp(0.0, (canvas.height_f64() - height).max(0.0)),
        width,
        height,
    )
}

fn centered_box(canvas: CanvasSize, ratio: AspectRatio) -> CropBox {
    let cw = canvas.width_f64();
    let ch = canvas.height_f64();
    let r = ratio.value();
    let (width, height) = if r > cw / ch {
        let width = cw * RATIO_FILL;
        (width, width / r)
    } else {
        let height = ch * RATIO_FILL;
        (height * r, height)
    };
    CropBox::new((cw - width) / 2.0, (ch - height) / 2.0, width, height)
}

fn clamp_into(crop: CropBox, canvas: CanvasSize) -> CropBox {
    let cw = canvas.width_f64();
    let ch = canvas.height_f64();
    let width = finite_or_zero(crop.width).max(canvas.min_width()).min(cw);
    let height = finite_or_zero(crop.height).max(canvas.min_height()).min(ch);
    CropBox::new(
        finite_or_zero(crop.x).clamp(0.0, cw - width),
        finite_or_zero(crop.y).clamp(0.0, ch - height),
        width,
        height,
    )
}
