//! Rendering: paints the dimmed image with the live selection cut out.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives the cached image element and the current selection and
//! produces pixels — it does not mutate any application state. Given the
//! same image and region it issues the same draw calls in the same order.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::HANDLE_SIZE_PX;
use crate::region::Region;

/// Dimming overlay flooded over the whole image.
const OVERLAY_FILL: &str = "rgba(0, 0, 0, 0.5)";

/// Accent for the border and handle.
const ACCENT: &str = "#00a8ff";

/// Translucent accent behind the dimension label.
const LABEL_FILL: &str = "rgba(0, 168, 255, 0.8)";

/// Border stroke width in pixels.
const BORDER_WIDTH: f64 = 2.0;

/// Label plate dimensions; the plate sits flush above the top-left corner.
const LABEL_WIDTH: f64 = 100.0;
const LABEL_HEIGHT: f64 = 20.0;

const LABEL_FONT: &str = "12px Arial";

/// Repaint the full scene: base image, dimming overlay, selection cut-out,
/// border, resize handle, and dimension label.
///
/// The surface is assumed to match the image's natural resolution, so the
/// image draws at `(0, 0)` unscaled.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    region: Region,
) -> Result<(), JsValue> {
    let width = f64::from(image.natural_width());
    let height = f64::from(image.natural_height());

    // Layer 1: base image.
    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)?;

    // Layer 2: dim everything.
    ctx.set_fill_style_str(OVERLAY_FILL);
    ctx.fill_rect(0.0, 0.0, width, height);

    // Layer 3: cut the selection out of the overlay, restoring the image
    // underneath at full visibility.
    ctx.set_global_composite_operation("destination-out")?;
    ctx.set_fill_style_str("rgba(255, 255, 255, 1)");
    ctx.fill_rect(region.x, region.y, region.width, region.height);
    ctx.set_global_composite_operation("source-over")?;

    // Layer 4: border.
    ctx.set_stroke_style_str(ACCENT);
    ctx.set_line_width(BORDER_WIDTH);
    ctx.stroke_rect(region.x, region.y, region.width, region.height);

    draw_handle(ctx, region);
    draw_label(ctx, region)?;

    Ok(())
}

/// Clear the whole surface; used when the image reference goes away.
pub fn clear(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement) {
    ctx.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
}

/// Filled square centered on the bottom-right corner; the grab target for
/// resize gestures.
fn draw_handle(ctx: &CanvasRenderingContext2d, region: Region) {
    ctx.set_fill_style_str(ACCENT);
    ctx.fill_rect(
        region.x + region.width - HANDLE_SIZE_PX / 2.0,
        region.y + region.height - HANDLE_SIZE_PX / 2.0,
        HANDLE_SIZE_PX,
        HANDLE_SIZE_PX,
    );
}

/// Label plate above the top-left corner showing `"{width}x{height}"`,
/// rounded to whole pixels. Derived at render time, never stored.
fn draw_label(ctx: &CanvasRenderingContext2d, region: Region) -> Result<(), JsValue> {
    ctx.set_fill_style_str(LABEL_FILL);
    ctx.fill_rect(region.x, region.y - LABEL_HEIGHT, LABEL_WIDTH, LABEL_HEIGHT);

    ctx.set_fill_style_str("#fff");
    ctx.set_font(LABEL_FONT);
    let text = format!("{:.0}x{:.0}", region.width, region.height);
    ctx.fill_text(&text, region.x + 5.0, region.y - 6.0)?;

    Ok(())
}
