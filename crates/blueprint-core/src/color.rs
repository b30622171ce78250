//! Color handling for Blueprint diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the [`Palette`] assigning fill and border colors
//! to every node kind.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_hex().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use blueprint_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the color as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    ///
    /// Graphviz only understands the hexadecimal notation and X11 names, so
    /// every color handed to the layout engine goes through this method.
    ///
    /// # Examples
    ///
    /// ```
    /// use blueprint_core::color::Color;
    ///
    /// assert_eq!(Color::new("rgb(8, 66, 123)").unwrap().to_hex(), "#08427b");
    /// ```
    pub fn to_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        if rgba.a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fill and border color of one node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swatch {
    pub fill: Color,
    pub border: Color,
}

impl Swatch {
    /// Parse a swatch from two CSS color strings.
    pub fn new(fill: &str, border: &str) -> Result<Self, String> {
        Ok(Self {
            fill: Color::new(fill)?,
            border: Color::new(border)?,
        })
    }

    fn builtin(fill: &str, border: &str) -> Self {
        Self::new(fill, border).expect("built-in palette colors are valid")
    }
}

/// Node colors per entity kind.
///
/// Systems, containers and components use escalating shades of blue so that
/// drilling down lightens the diagram. Personas carry their own swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub persona: Swatch,
    pub system: Swatch,
    pub container: Swatch,
    pub component: Swatch,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            persona: Swatch::builtin("#08427b", "#002a56"),
            system: Swatch::builtin("#08427b", "#002a56"),
            container: Swatch::builtin("#1168bd", "#065fae"),
            component: Swatch::builtin("#3d88d1", "#1782cc"),
        }
    }
}
