// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{FusionError, FusionResult};
use crate::state::{Boundary, Grid2D, MAX_ORDER};
use serde::{Deserialize, Serialize};

/// Settings of a flux-surface diagnostic run.
///
/// Call [`DiagnosticConfig::validate`] before building anything from it;
/// the loaders do this for you.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticConfig {
    pub name: String,
    pub grid: GridConfig,
    pub geometry: GeometryConfig,
    pub levels: LevelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Gauss-Legendre nodes per cell (default: 3)
    #[serde(default = "default_order")]
    pub order: usize,
    /// Cell counts `[nx, ny]`
    pub cells: [usize; 2],
    #[serde(default)]
    pub boundary: [Boundary; 2],
}

/// Circular flux geometry ψ = s·((R - R₀)² + (Z - Z₀)²), I_pol = I₀·R.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub r_axis: f64,
    #[serde(default)]
    pub z_axis: f64,
    #[serde(default = "default_psi_scale")]
    pub psi_scale: f64,
    #[serde(default = "default_current")]
    pub current: f64,
}

/// Equally spaced flux levels `psi_min ..= psi_max`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub psi_min: f64,
    pub psi_max: f64,
    pub count: usize,
}

fn default_order() -> usize {
    3
}
fn default_psi_scale() -> f64 {
    1.0
}
fn default_current() -> f64 {
    1.0
}

fn require_finite(name: &str, value: f64) -> FusionResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FusionError::ConfigError(format!("{name} must be finite, got {value}")))
    }
}

impl DiagnosticConfig {
    /// Load from JSON file and validate.
    pub fn from_file(path: &str) -> FusionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse from a JSON string and validate.
    pub fn from_json_str(contents: &str) -> FusionResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Consistency check. Hard errors abort; questionable but usable values
    /// only produce a warning.
    pub fn validate(&self) -> FusionResult<()> {
        let g = &self.grid;
        for (name, v) in [
            ("grid.x_min", g.x_min),
            ("grid.x_max", g.x_max),
            ("grid.y_min", g.y_min),
            ("grid.y_max", g.y_max),
            ("geometry.r_axis", self.geometry.r_axis),
            ("geometry.z_axis", self.geometry.z_axis),
            ("geometry.psi_scale", self.geometry.psi_scale),
            ("geometry.current", self.geometry.current),
            ("levels.psi_min", self.levels.psi_min),
            ("levels.psi_max", self.levels.psi_max),
        ] {
            require_finite(name, v)?;
        }
        if g.x_max <= g.x_min || g.y_max <= g.y_min {
            return Err(FusionError::ConfigError(
                "grid extents must satisfy min < max".to_string(),
            ));
        }
        if g.order == 0 || g.order > MAX_ORDER {
            return Err(FusionError::ConfigError(format!(
                "grid.order must be in 1..={MAX_ORDER}, got {}",
                g.order
            )));
        }
        if g.cells[0] == 0 || g.cells[1] == 0 {
            return Err(FusionError::ConfigError(
                "grid.cells must be non-zero in both directions".to_string(),
            ));
        }
        if self.geometry.psi_scale <= 0.0 {
            return Err(FusionError::ConfigError(format!(
                "geometry.psi_scale must be > 0, got {}",
                self.geometry.psi_scale
            )));
        }
        let lv = &self.levels;
        if lv.count == 0 {
            return Err(FusionError::ConfigError(
                "levels.count must be at least 1".to_string(),
            ));
        }
        if lv.psi_max < lv.psi_min || (lv.count > 1 && lv.psi_max == lv.psi_min) {
            return Err(FusionError::ConfigError(format!(
                "levels range [{}, {}] is empty for {} levels",
                lv.psi_min, lv.psi_max, lv.count
            )));
        }

        let geo = &self.geometry;
        if !self.create_grid()?.contains(geo.r_axis, geo.z_axis) {
            log::warn!(
                "{}: magnetic axis ({}, {}) lies outside the grid",
                self.name,
                geo.r_axis,
                geo.z_axis
            );
        }
        if lv.psi_min < 0.0 {
            log::warn!(
                "{}: negative flux levels are never attained (psi_min = {})",
                self.name,
                lv.psi_min
            );
        }
        Ok(())
    }

    /// Create the Grid2D described by `grid`.
    pub fn create_grid(&self) -> FusionResult<Grid2D> {
        let g = &self.grid;
        Ok(Grid2D::new(
            g.x_min, g.x_max, g.y_min, g.y_max, g.order, g.cells[0], g.cells[1],
        )?
        .with_boundaries(g.boundary[0], g.boundary[1]))
    }

    /// The requested flux levels.
    pub fn levels(&self) -> Vec<f64> {
        let lv = &self.levels;
        if lv.count == 1 {
            return vec![lv.psi_min];
        }
        let step = (lv.psi_max - lv.psi_min) / (lv.count - 1) as f64;
        (0..lv.count).map(|i| lv.psi_min + step * i as f64).collect()
    }
}
