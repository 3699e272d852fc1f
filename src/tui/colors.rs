use std::collections::HashMap;
use std::sync::OnceLock;

use palette::{FromColor, LightenAssign, Lch, Srgb};

use slide48::engine::Tile;

/// Rgb is an 8-bit sRGB color ready to hand to the terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Rgb(pub(crate) u8, pub(crate) u8, pub(crate) u8);

impl Rgb {
    /// Returns a copy lightened by `amount`, clamped to 1.0.
    pub(crate) fn lighten(&self, amount: f32) -> Rgb {
        let amount = if amount > 1.0 { 1.0 } else { amount };
        let mut color: Srgb<f32> = Srgb::<u8>::new(self.0, self.1, self.2).into_format();
        color.lighten_assign(amount);
        let color: Srgb<u8> = color.into_format();
        Rgb(color.red, color.green, color.blue)
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(c: Srgb<u8>) -> Rgb {
        Rgb(c.red, c.green, c.blue)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(f: Rgb) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: f.0,
            g: f.1,
            b: f.2,
        }
    }
}

pub(crate) const BOARD_BACKGROUND: Rgb = Rgb(51, 65, 85);
pub(crate) const EMPTY_TILE: Rgb = Rgb(71, 85, 105);
pub(crate) const TEXT: Rgb = Rgb(56, 189, 248);

/// Tiles past the last hue step fall back to these.
const FALLBACK_TILE: (Rgb, Rgb) = (Rgb(255, 255, 255), Rgb(90, 0, 0));

/// Number of tile values that get their own hue: 2 through 2^HUE_STEPS.
const HUE_STEPS: u32 = 11;

struct Colors {
    tile_colors: HashMap<Tile, (Rgb, Rgb)>,
}

static DEFAULT_COLORS: OnceLock<Colors> = OnceLock::new();

fn defaults() -> Colors {
    let bg_hue = 28.0;
    let fg_hue = bg_hue + 180.0;
    Colors {
        tile_colors: HashMap::from_iter(
            (1..=HUE_STEPS)
                .map(|i| {
                    (
                        2u32.pow(i),
                        Lch::new(80.0, 90.0, bg_hue + (i - 1) as f32 * 360.0 / HUE_STEPS as f32),
                        Lch::new(20.0, 50.0, fg_hue),
                    )
                })
                .map(|(k, bg_lch, fg_lch)| {
                    (
                        k,
                        (
                            Srgb::<f32>::from_color(bg_lch).into_format::<u8>().into(),
                            Srgb::<f32>::from_color(fg_lch).into_format::<u8>().into(),
                        ),
                    )
                }),
        ),
    }
}

/// Background and foreground colors for a tile value.
#[inline(always)]
pub(crate) fn tile_colors(value: Tile) -> (Rgb, Rgb) {
    if value == 0 {
        return (EMPTY_TILE, EMPTY_TILE);
    }
    DEFAULT_COLORS
        .get_or_init(defaults)
        .tile_colors
        .get(&value)
        .copied()
        .unwrap_or(FALLBACK_TILE)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_step_has_its_own_background() {
        let backgrounds = (1..=HUE_STEPS)
            .map(|i| tile_colors(2u32.pow(i)).0)
            .collect::<Vec<_>>();
        for (i, a) in backgrounds.iter().enumerate() {
            for b in backgrounds.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn fallbacks() {
        assert_eq!(tile_colors(0), (EMPTY_TILE, EMPTY_TILE));
        assert_eq!(tile_colors(2u32.pow(HUE_STEPS + 1)), FALLBACK_TILE);
        assert_eq!(tile_colors(3), FALLBACK_TILE);
    }

    #[test]
    fn lighten() {
        let base = Rgb(100, 50, 25);
        let lighter = base.lighten(0.5);
        assert!(lighter.0 > base.0 && lighter.1 > base.1 && lighter.2 > base.2);
        assert_eq!(Rgb(0, 0, 0).lighten(5.0), Rgb(255, 255, 255));
    }
}
