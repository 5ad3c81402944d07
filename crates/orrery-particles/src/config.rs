//! Particle configuration: per-field rules, merging, and TOML parsing

use crate::field::FieldRule;
use crate::random;
use orrery_core::{Color, OrreryError, Result};

/// Keys a recipe table may carry that are not particle fields
const RECIPE_KEYS: &[&str] = &["variant", "count"];

/// Field rules for one particle. `None` falls through to the next layer of
/// the merge and finally to the built-in default.
#[derive(Debug, Clone, Default)]
pub struct ParticleConfig {
    pub x: Option<FieldRule<f64>>,
    pub y: Option<FieldRule<f64>>,
    pub fill: Option<FieldRule<Color>>,
    pub height: Option<FieldRule<f64>>,
    pub width: Option<FieldRule<f64>>,
    pub velocity: Option<FieldRule<f64>>,
    pub angle: Option<FieldRule<f64>>,
    pub rotation_rate: Option<FieldRule<f64>>,
}

impl ParticleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, rule: impl Into<FieldRule<f64>>) -> Self {
        self.x = Some(rule.into());
        self
    }

    pub fn y(mut self, rule: impl Into<FieldRule<f64>>) -> Self {
        self.y = Some(rule.into());
        self
    }

    pub fn fill(mut self, rule: impl Into<FieldRule<Color>>) -> Self {
        self.fill = Some(rule.into());
        self
    }

    pub fn height(mut self, rule: impl Into<FieldRule<f64>>) -> Self {
        self.height = Some(rule.into());
        self
    }

    pub fn width(mut self, rule: impl Into<FieldRule<f64>>) -> Self {
        self.width = Some(rule.into());
        self
    }

    pub fn velocity(mut self, rule: impl Into<FieldRule<f64>>) -> Self {
        self.velocity = Some(rule.into());
        self
    }

    pub fn angle(mut self, rule: impl Into<FieldRule<f64>>) -> Self {
        self.angle = Some(rule.into());
        self
    }

    pub fn rotation_rate(mut self, rule: impl Into<FieldRule<f64>>) -> Self {
        self.rotation_rate = Some(rule.into());
        self
    }

    /// `self` overlaid with every field `over` sets
    pub fn merged(&self, over: &ParticleConfig) -> ParticleConfig {
        fn pick<T: Clone>(base: &Option<FieldRule<T>>, over: &Option<FieldRule<T>>) -> Option<FieldRule<T>> {
            over.as_ref().or(base.as_ref()).cloned()
        }
        ParticleConfig {
            x: pick(&self.x, &over.x),
            y: pick(&self.y, &over.y),
            fill: pick(&self.fill, &over.fill),
            height: pick(&self.height, &over.height),
            width: pick(&self.width, &over.width),
            velocity: pick(&self.velocity, &over.velocity),
            angle: pick(&self.angle, &over.angle),
            rotation_rate: pick(&self.rotation_rate, &over.rotation_rate),
        }
    }

    /// True if any field re-rolls on initialization
    pub fn has_generated_fields(&self) -> bool {
        let numeric = [
            &self.x,
            &self.y,
            &self.height,
            &self.width,
            &self.velocity,
            &self.angle,
            &self.rotation_rate,
        ];
        numeric
            .into_iter()
            .any(|r| r.as_ref().is_some_and(FieldRule::is_generated))
            || self.fill.as_ref().is_some_and(FieldRule::is_generated)
    }

    /// Parse a recipe table. Numbers become fixed rules, `{ min, max }` tables
    /// become uniform generators (`integer = true` for whole numbers), and
    /// `fill` takes a colour string, an `[r, g, b, a]` array, or `"random"`.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        for (key, value) in table {
            match key.as_str() {
                "x" => config.x = Some(toml_rule(key, value)?),
                "y" => config.y = Some(toml_rule(key, value)?),
                "height" => config.height = Some(toml_rule(key, value)?),
                "width" => config.width = Some(toml_rule(key, value)?),
                "velocity" => config.velocity = Some(toml_rule(key, value)?),
                "angle" => config.angle = Some(toml_rule(key, value)?),
                "rotation_rate" | "rotation" => {
                    config.rotation_rate = Some(toml_rule(key, value)?)
                }
                "fill" => config.fill = Some(toml_fill(value)?),
                k if RECIPE_KEYS.contains(&k) => {}
                other => {
                    tracing::warn!(target: "scene", "Ignoring unknown particle field '{}'", other);
                }
            }
        }

        Ok(config)
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f64(v: &toml::Value) -> Option<f64> {
    v.as_float().or_else(|| v.as_integer().map(|i| i as f64))
}

fn toml_rule(key: &str, v: &toml::Value) -> Result<FieldRule<f64>> {
    if let Some(n) = toml_f64(v) {
        return Ok(FieldRule::fixed(n));
    }
    let bad = || {
        OrreryError::Configuration(format!(
            "field '{}' must be a number or a {{ min, max }} table",
            key
        ))
    };
    let table = v.as_table().ok_or_else(bad)?;
    let min = table.get("min").and_then(toml_f64).ok_or_else(bad)?;
    let max = table.get("max").and_then(toml_f64).ok_or_else(bad)?;
    if min > max {
        return Err(OrreryError::Configuration(format!(
            "field '{}' has min {} greater than max {}",
            key, min, max
        )));
    }
    let integer = table
        .get("integer")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    Ok(if integer {
        let (lo, hi) = (min.ceil(), max.floor());
        if lo > hi {
            return Err(OrreryError::Configuration(format!(
                "field '{}' has no whole number between {} and {}",
                key, min, max
            )));
        }
        FieldRule::int_range(lo as i64, hi as i64)
    } else {
        FieldRule::range(min, max)
    })
}

fn toml_fill(v: &toml::Value) -> Result<FieldRule<Color>> {
    if let Some(s) = v.as_str() {
        if s.trim().eq_ignore_ascii_case("random") {
            return Ok(FieldRule::generated(random::random_fill));
        }
        return Ok(FieldRule::fixed(Color::parse(s)?));
    }
    if let Some(arr) = v.as_array() {
        if arr.len() == 4 {
            let channels: Option<Vec<f64>> = arr.iter().map(toml_f64).collect();
            if let Some(c) = channels {
                return Ok(FieldRule::fixed(Color::new(
                    c[0] as f32,
                    c[1] as f32,
                    c[2] as f32,
                    c[3] as f32,
                )));
            }
        }
    }
    Err(OrreryError::Configuration(
        "field 'fill' must be a colour string, an [r, g, b, a] array or \"random\"".into(),
    ))
}
