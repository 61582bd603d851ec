//! Top-level engine: the testable core and the canvas-bound wrapper.
//!
//! [`EngineCore`] owns the selection state (region, image bounds, active
//! gesture) and implements every transition of the pointer state machine
//! plus the imperative placement operations. It never touches the DOM, so
//! it is tested without WASM/browser dependencies.
//!
//! [`Engine`] binds the core to the browser canvas element and the decoded
//! image element, repainting whenever a handler reports a change and
//! handing the remaining actions back to the host for publication.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::NUDGE_STEP_PX;
use crate::hit::{self, Hit};
use crate::input::InteractionMode;
use crate::region::{Bounds, Direction, GridCell, Point, Region};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The selection changed; forward the new value to collaborators.
    RegionChanged(Region),
    /// The scene must repaint.
    RenderNeeded,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies. Until [`EngineCore::set_bounds`] announces a decoded
/// image, every handler is a no-op.
#[derive(Debug)]
pub struct EngineCore {
    pub region: Region,
    pub bounds: Option<Bounds>,
    pub mode: InteractionMode,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            region: Region::initial(),
            bounds: None,
            mode: InteractionMode::Idle,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Image lifecycle ---

    /// Hydrate from a freshly decoded image: store its bounds, reset the
    /// region to the default placement (clamped, so tiny images still get
    /// a legal region), and cancel any live gesture.
    pub fn set_bounds(&mut self, bounds: Bounds) -> Vec<Action> {
        self.bounds = Some(bounds);
        self.mode = InteractionMode::Idle;
        self.region = Region::initial().clamp(bounds);
        vec![Action::RegionChanged(self.region), Action::RenderNeeded]
    }

    /// The image reference went away; pointer input is ignored again.
    pub fn clear_bounds(&mut self) {
        self.bounds = None;
        self.mode = InteractionMode::Idle;
        self.region = Region::initial();
    }

    // --- Pointer state machine ---

    /// Pointer press: decide between resize, move, and create, based on
    /// where the press lands relative to the current region.
    pub fn on_pointer_down(&mut self, p: Point) -> Vec<Action> {
        if self.bounds.is_none() {
            return Vec::new();
        }
        match hit::hit_test(p, self.region) {
            Some(Hit::ResizeHandle) => {
                self.mode = InteractionMode::Resizing { anchor: p };
                Vec::new()
            }
            Some(Hit::Body) => {
                self.mode = InteractionMode::Dragging { anchor: p };
                Vec::new()
            }
            None => {
                self.mode = InteractionMode::Creating { anchor: p };
                self.region = Region::new(p.x, p.y, 0.0, 0.0);
                vec![Action::RegionChanged(self.region), Action::RenderNeeded]
            }
        }
    }

    /// Pointer move: advance the active gesture. A no-op while idle.
    pub fn on_pointer_move(&mut self, p: Point) -> Vec<Action> {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };
        let next = match self.mode {
            InteractionMode::Idle => return Vec::new(),
            InteractionMode::Resizing { .. } => {
                self.region
                    .resize(p.x - self.region.x, p.y - self.region.y, bounds)
            }
            InteractionMode::Dragging { anchor } => {
                if self.region.is_zero_size() {
                    // Carry-over from a cancelled create: size from scratch.
                    Region::from_points(anchor, p)
                } else {
                    self.mode = InteractionMode::Dragging { anchor: p };
                    self.region.drag_move(p.x - anchor.x, p.y - anchor.y, bounds)
                }
            }
            // No mid-gesture clamp: both endpoints are pointer positions
            // already inside the surface.
            InteractionMode::Creating { anchor } => Region::from_points(anchor, p),
        };
        self.commit(next)
    }

    /// Pointer release: end the gesture. A region below the minimum size
    /// is repaired in place rather than discarded.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };
        if !self.mode.is_active() {
            return Vec::new();
        }
        self.mode = InteractionMode::Idle;
        self.commit(self.region.ensure_min_size(bounds))
    }

    /// The pointer left the surface: ends the gesture exactly like a
    /// release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Imperative placement (bypasses the pointer state machine) ---

    /// Snap the region's center into one of the nine grid cells.
    pub fn move_to_grid(&mut self, cell: GridCell) -> Vec<Action> {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };
        self.mode = InteractionMode::Idle;
        self.commit(self.region.grid_place(cell, bounds))
    }

    /// Set the region's size directly (the host's size sliders).
    pub fn set_region_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };
        self.mode = InteractionMode::Idle;
        self.commit(self.region.resize(width, height, bounds))
    }

    /// Move the region one `step` in `direction` (the host's arrow
    /// buttons). See [`NUDGE_STEP_PX`] for the conventional step.
    pub fn nudge_region(&mut self, direction: Direction, step: f64) -> Vec<Action> {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };
        self.mode = InteractionMode::Idle;
        self.commit(self.region.nudge(direction, step, bounds))
    }

    // --- Queries ---

    /// The current selection.
    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    /// The loaded image's dimensions, if an image is ready.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.mode.is_active()
    }

    /// Store `next` and report the change, or nothing when the value is
    /// unchanged (a drag pinned against an edge publishes nothing).
    fn commit(&mut self, next: Region) -> Vec<Action> {
        if next == self.region {
            return Vec::new();
        }
        self.region = next;
        vec![Action::RegionChanged(self.region), Action::RenderNeeded]
    }
}

/// The full selection engine. Wraps [`EngineCore`] and owns the browser
/// canvas plus the cached decoded image.
pub struct Engine {
    canvas: HtmlCanvasElement,
    image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, image: None, core: EngineCore::new() }
    }

    // --- Image lifecycle ---

    /// Accept a decoded image: size the surface to the natural resolution,
    /// cache the element so redraws never re-decode, seed the default
    /// region, and paint the first frame.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the image has no decoded dimensions, the 2D
    /// context is unavailable, or a draw call fails.
    pub fn set_image(&mut self, image: HtmlImageElement) -> Result<Vec<Action>, JsValue> {
        let width = image.natural_width();
        let height = image.natural_height();
        if width == 0 || height == 0 {
            return Err(JsValue::from_str("image has no decoded dimensions"));
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.image = Some(image);
        let actions = self.core.set_bounds(Bounds::new(f64::from(width), f64::from(height)));
        self.repaint_if_needed(&actions)?;
        Ok(actions)
    }

    /// Drop the image: the surface is cleared and pointer input is
    /// ignored until the next [`Engine::set_image`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable.
    pub fn clear_image(&mut self) -> Result<(), JsValue> {
        self.image = None;
        self.core.clear_bounds();
        render::clear(&self.context()?, &self.canvas);
        Ok(())
    }

    // --- Input events ---

    /// # Errors
    ///
    /// Returns `Err` if the repaint fails.
    pub fn on_pointer_down(&mut self, p: Point) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_pointer_down(p);
        self.repaint_if_needed(&actions)?;
        Ok(actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if the repaint fails.
    pub fn on_pointer_move(&mut self, p: Point) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_pointer_move(p);
        self.repaint_if_needed(&actions)?;
        Ok(actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if the repaint fails.
    pub fn on_pointer_up(&mut self) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_pointer_up();
        self.repaint_if_needed(&actions)?;
        Ok(actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if the repaint fails.
    pub fn on_pointer_leave(&mut self) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_pointer_leave();
        self.repaint_if_needed(&actions)?;
        Ok(actions)
    }

    // --- Imperative placement ---

    /// # Errors
    ///
    /// Returns `Err` if the repaint fails.
    pub fn move_to_grid(&mut self, cell: GridCell) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.move_to_grid(cell);
        self.repaint_if_needed(&actions)?;
        Ok(actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if the repaint fails.
    pub fn set_region_size(&mut self, width: f64, height: f64) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.set_region_size(width, height);
        self.repaint_if_needed(&actions)?;
        Ok(actions)
    }

    /// Nudge by the conventional [`NUDGE_STEP_PX`] step.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the repaint fails.
    pub fn nudge_region(&mut self, direction: Direction) -> Result<Vec<Action>, JsValue> {
        self.nudge_region_by(direction, NUDGE_STEP_PX)
    }

    /// # Errors
    ///
    /// Returns `Err` if the repaint fails.
    pub fn nudge_region_by(
        &mut self,
        direction: Direction,
        step: f64,
    ) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.nudge_region(direction, step);
        self.repaint_if_needed(&actions)?;
        Ok(actions)
    }

    // --- Render ---

    /// Repaint the scene from the cached image and the current selection.
    /// Does nothing while no image is loaded.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(image) = &self.image else {
            return Ok(());
        };
        render::draw(&self.context()?, image, self.core.region())
    }

    // --- Queries ---

    /// The current selection.
    #[must_use]
    pub fn region(&self) -> Region {
        self.core.region()
    }

    /// The loaded image's dimensions, if an image is ready.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.core.bounds()
    }

    /// The drawable surface, for host embedding.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn repaint_if_needed(&self, actions: &[Action]) -> Result<(), JsValue> {
        if actions.iter().any(|a| matches!(a, Action::RenderNeeded)) {
            self.render()?;
        }
        Ok(())
    }

    fn context(&self) -> Result<CanvasRenderingContext2d, JsValue> {
        self.canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas 2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)
    }
}
