//! Sprite layer descriptions with an optional high-resolution variant.
//!
//! Prototype graphics carry a base layer and sometimes a high-resolution
//! copy of it. Every adjustment (shift, size, scale) has to land on both,
//! so the helpers here go through [`Layered::for_each_mut`].

use crate::geometry::Vector;
use serde::{Deserialize, Serialize};

/// One sprite layer of a prototype's graphics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteLayer {
    pub filename: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub shift: Option<Vector>,
}

fn default_scale() -> f64 {
    1.0
}

impl SpriteLayer {
    pub fn new(filename: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            filename: filename.into(),
            width,
            height,
            x: 0.0,
            y: 0.0,
            scale: default_scale(),
            shift: None,
        }
    }

    /// Read a numeric field.
    pub fn get(&self, field: SpriteField) -> f64 {
        match field {
            SpriteField::Width => self.width,
            SpriteField::Height => self.height,
            SpriteField::X => self.x,
            SpriteField::Y => self.y,
            SpriteField::Scale => self.scale,
        }
    }

    /// Write a numeric field.
    pub fn set(&mut self, field: SpriteField, value: f64) {
        match field {
            SpriteField::Width => self.width = value,
            SpriteField::Height => self.height = value,
            SpriteField::X => self.x = value,
            SpriteField::Y => self.y = value,
            SpriteField::Scale => self.scale = value,
        }
    }
}

/// Numeric fields of a [`SpriteLayer`] that the property helpers address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteField {
    Width,
    Height,
    X,
    Y,
    Scale,
}

/// A value with an optional high-resolution variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Layered<T> {
    Base(T),
    WithVariant { base: T, hr: T },
}

impl<T> Layered<T> {
    /// The base (low-resolution) value.
    pub fn base(&self) -> &T {
        match self {
            Layered::Base(base) | Layered::WithVariant { base, .. } => base,
        }
    }

    /// The high-resolution variant, if present.
    pub fn hr(&self) -> Option<&T> {
        match self {
            Layered::Base(_) => None,
            Layered::WithVariant { hr, .. } => Some(hr),
        }
    }

    /// Apply `f` to the base and, when present, to the variant.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        match self {
            Layered::Base(base) => f(base),
            Layered::WithVariant { base, hr } => {
                f(base);
                f(hr);
            }
        }
    }
}

/// Overwrite the shift of every variant.
pub fn set_shift(mut layers: Layered<SpriteLayer>, shift: Vector) -> Layered<SpriteLayer> {
    layers.for_each_mut(|layer| layer.shift = Some(shift));
    layers
}

/// Add `shift` to each variant's shift, or set it where none exists yet.
pub fn add_to_shift(
    mut layers: Layered<SpriteLayer>,
    shift: impl Into<Vector>,
) -> Layered<SpriteLayer> {
    let shift = shift.into();
    layers.for_each_mut(|layer| {
        layer.shift = Some(match layer.shift {
            Some(existing) => existing + shift,
            None => shift,
        });
    });
    layers
}

/// Set a numeric field on every variant.
pub fn set_property(
    mut layers: Layered<SpriteLayer>,
    field: SpriteField,
    value: f64,
) -> Layered<SpriteLayer> {
    layers.for_each_mut(|layer| layer.set(field, value));
    layers
}

/// Set `field` to `source * mult` on every variant, each reading its own
/// `source`. Without a source field the layers are returned untouched.
pub fn set_property_using(
    mut layers: Layered<SpriteLayer>,
    field: SpriteField,
    source: Option<SpriteField>,
    mult: f64,
) -> Layered<SpriteLayer> {
    if let Some(source) = source {
        layers.for_each_mut(|layer| {
            let value = layer.get(source) * mult;
            layer.set(field, value);
        });
    }
    layers
}

/// Like [`set_property_using`] but leaves the input untouched.
pub fn duplicate_and_set_property_using(
    layers: &Layered<SpriteLayer>,
    field: SpriteField,
    source: Option<SpriteField>,
    mult: f64,
) -> Layered<SpriteLayer> {
    set_property_using(layers.clone(), field, source, mult)
}
