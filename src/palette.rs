//! Background palette generation
//!
//! Colors are drawn from a regular HSL grid: `divisions` hues (the last one
//! stops short of wrapping back to red) times `divisions` saturations times
//! `divisions` lightnesses. A palette is a shuffled prefix of that grid,
//! optionally after every grid point has been jittered by up to half a cell.

use crate::{
    color::{Hsl, Rgb},
    config::{ColorSpaceConfig, MAX_DIVISIONS},
};
use rand::{seq::SliceRandom, Rng};
use tracing::debug;

/// The `divisions³` HSL lattice colors are sampled from
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGrid {
    config: ColorSpaceConfig,
    points: Vec<Hsl>,
}

impl ColorGrid {
    /// Build the undisturbed grid described by `config`
    ///
    /// Division counts are clamped to `1..=MAX_DIVISIONS`.
    #[must_use]
    pub fn new(config: &ColorSpaceConfig) -> Self {
        let d = config.divisions.clamp(1, MAX_DIVISIONS);
        let hues: Vec<f64> = (0..d).map(|i| i as f64 / d as f64).collect();
        let saturations = linspace(config.saturation, d);
        let lightnesses = linspace(config.lightness, d);

        let capacity = d.checked_mul(d).and_then(|dd| dd.checked_mul(d)).unwrap_or(0);
        let mut points = Vec::with_capacity(capacity);
        for &h in &hues {
            for &s in &saturations {
                for &l in &lightnesses {
                    points.push(Hsl::new(h, s, l));
                }
            }
        }

        Self {
            config: ColorSpaceConfig {
                divisions: d,
                ..*config
            },
            points,
        }
    }

    /// Build a grid with at least `min_colors` points, adding divisions beyond
    /// `config.divisions` when the configured grid is too small
    ///
    /// Growth stops at `MAX_DIVISIONS`, so requests beyond `MAX_DIVISIONS³`
    /// get the largest grid.
    #[must_use]
    pub fn covering(config: &ColorSpaceConfig, min_colors: usize) -> Self {
        let mut divisions = config.divisions.clamp(1, MAX_DIVISIONS);
        while divisions < MAX_DIVISIONS && divisions.saturating_pow(3) < min_colors {
            divisions += 1;
        }
        if divisions != config.divisions {
            debug!(
                requested = min_colors,
                configured = config.divisions,
                divisions,
                "Growing color grid to cover requested palette size"
            );
        }
        Self::new(&ColorSpaceConfig {
            divisions,
            ..*config
        })
    }

    #[must_use]
    pub fn divisions(&self) -> usize {
        self.config.divisions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[Hsl] {
        &self.points
    }

    /// Jitter every point independently by up to half a grid cell
    ///
    /// Hue wraps around; saturation and lightness are clamped to the
    /// configured ranges.
    #[must_use]
    pub fn disturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let d = self.config.divisions as f64;
        let (s_min, s_max) = self.config.saturation;
        let (l_min, l_max) = self.config.lightness;

        let h_step = 1.0 / d / 2.0;
        let s_step = (s_max - s_min) / d / 2.0;
        let l_step = (l_max - l_min) / d / 2.0;

        let points = self
            .points
            .iter()
            .map(|p| {
                let h = wrap_hue(p.h + jitter(rng, h_step));
                let s = (p.s + jitter(rng, s_step)).clamp(s_min, s_max);
                let l = (p.l + jitter(rng, l_step)).clamp(l_min, l_max);
                Hsl::new(h, s, l)
            })
            .collect();

        Self {
            config: self.config,
            points,
        }
    }

    /// Every grid point as an 8-bit color, in grid order
    #[must_use]
    pub fn to_rgb(&self) -> Vec<Rgb> {
        self.points.iter().map(|p| p.to_rgb()).collect()
    }
}

fn linspace((min, max): (f64, f64), count: usize) -> Vec<f64> {
    if count <= 1 {
        return vec![min];
    }
    let last = count - 1;
    (0..count)
        .map(|i| {
            if i == last {
                max
            } else {
                min + (max - min) * i as f64 / last as f64
            }
        })
        .collect()
}

/// Wrap a hue into `[0, 1)`
fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(1.0);
    // rem_euclid rounds tiny negatives up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, step: f64) -> f64 {
    if step > 0.0 {
        rng.gen_range(-step..step)
    } else {
        0.0
    }
}

/// Draws background palettes from a [`ColorGrid`]
#[derive(Debug, Clone)]
pub struct PaletteGenerator {
    color_space: ColorSpaceConfig,
}

impl PaletteGenerator {
    #[must_use]
    pub fn new(color_space: ColorSpaceConfig) -> Self {
        Self { color_space }
    }

    /// Generate `num_colors` background colors
    ///
    /// The grid is built large enough to hold `num_colors` points, optionally
    /// disturbed, shuffled, and its first `num_colors` entries are returned.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        num_colors: usize,
        add_disturbance: bool,
        rng: &mut R,
    ) -> Vec<Rgb> {
        let grid = ColorGrid::covering(&self.color_space, num_colors);
        let grid = if add_disturbance {
            grid.disturbed(rng)
        } else {
            grid
        };

        let mut colors = grid.to_rgb();
        colors.shuffle(rng);
        colors.truncate(num_colors);
        colors
    }
}
