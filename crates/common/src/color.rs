/// Linear interpolation: `a + (b - a) * t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// An RGB triple. Channels are conceptually in `[0, 1]` but never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Move each channel toward `target` by the fraction `t`.
    pub fn lerp_toward(self, target: Rgb, t: f32) -> Rgb {
        Rgb {
            r: lerp(self.r, target.r, t),
            g: lerp(self.g, target.g, t),
            b: lerp(self.b, target.b, t),
        }
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// An RGBA quadruple.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Build an opaque color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// One of the three pure colors a target key can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorTarget {
    Red,
    Green,
    Blue,
}

impl ColorTarget {
    pub fn rgb(self) -> Rgb {
        match self {
            ColorTarget::Red => Rgb::RED,
            ColorTarget::Green => Rgb::GREEN,
            ColorTarget::Blue => Rgb::BLUE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn lerp_toward_one_step() {
        let c = Rgb::WHITE.lerp_toward(Rgb::RED, 0.05);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 0.95).abs() < 1e-6);
        assert!((c.b - 0.95).abs() < 1e-6);
    }

    #[test]
    fn lerp_toward_fixed_point() {
        let c = Rgb::BLUE.lerp_toward(Rgb::BLUE, 0.05);
        assert_eq!(c, Rgb::BLUE);
    }

    #[test]
    fn targets_are_pure_channels() {
        assert_eq!(ColorTarget::Red.rgb(), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(ColorTarget::Green.rgb(), Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(ColorTarget::Blue.rgb(), Rgb::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn from_u8_is_opaque() {
        let lavender = Rgba::from_u8(230, 230, 250);
        assert_eq!(lavender.a, 1.0);
        assert!((lavender.b - 250.0 / 255.0).abs() < 1e-6);
    }
}
