use crate::{
    foundation::{
        core::{Color, Region},
        error::{SurfaceError, SurfaceResult},
    },
    surface::lifecycle::Surface,
};

/// One serialized surface operation, as found in operation documents fed to the CLI.
///
/// ```json
/// [
///   { "op": "clear", "color": { "r": 255, "g": 255, "b": 255 } },
///   { "op": "set_pixel", "x": 3, "y": 4, "color": { "r": 255, "g": 0, "b": 0, "a": 128 } },
///   { "op": "crop", "region": { "x": 0, "y": 0, "w": 16, "h": 16 } }
/// ]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    /// [`Surface::clear`].
    Clear {
        /// Fill color; transparent black when absent.
        #[serde(default)]
        color: Option<Color>,
        /// Clip region; whole surface when absent.
        #[serde(default)]
        region: Option<Region>,
    },
    /// [`Surface::set_pixel`].
    SetPixel {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Pixel color.
        color: Color,
    },
    /// Replace the surface with [`Surface::clone_region`] of `region`.
    Crop {
        /// Window to keep.
        region: Region,
    },
}

/// Parse a JSON array of [`SurfaceOp`].
pub fn parse_ops(json: &str) -> SurfaceResult<Vec<SurfaceOp>> {
    serde_json::from_str(json).map_err(|e| SurfaceError::serde(format!("surface ops: {e}")))
}

/// Apply `ops` in order.
///
/// Returns `Ok(None)` when a crop falls entirely outside the surface; the surfaces involved are
/// freed in that case.
pub fn apply_ops(mut surface: Surface, ops: &[SurfaceOp]) -> SurfaceResult<Option<Surface>> {
    for op in ops {
        match *op {
            SurfaceOp::Clear { color, region } => surface.clear(color, region),
            SurfaceOp::SetPixel { x, y, color } => surface.set_pixel(x, y, color),
            SurfaceOp::Crop { region } => {
                let Some(cropped) = surface.clone_region(Some(region))? else {
                    tracing::debug!(?region, "crop region misses the surface");
                    return Ok(None);
                };
                surface.free();
                surface = cropped;
            }
        }
    }
    Ok(Some(surface))
}

#[cfg(test)]
#[path = "../../tests/unit/surface/ops.rs"]
mod tests;
