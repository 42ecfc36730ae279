//! Menu Entry
//!
//! One line of text in a [`MenuScreen`](super::MenuScreen). An entry with
//! empty text is a spacer: it takes up a line but can never be selected.

use super::MenuStyle;
use crate::render::{with_alpha, Renderer};
use crate::text::BitmapFont;
use sdl2::pixels::Color;
use sdl2::rect::Rect;

/// Selection fade speed, in full fades per second
const FADE_RATE: f32 = 4.0;

/// A selectable line of menu text
#[derive(Debug, Clone)]
pub struct MenuEntry {
    text: String,
    color: Color,
    scale: f32,
    /// 0.0 unselected .. 1.0 selected; eases toward the current state
    selection_fade: f32,
    /// Left edge, vertical center
    position: (f32, f32),
    hovering: bool,
}

impl MenuEntry {
    pub fn new(text: impl Into<String>, scale: f32) -> Self {
        MenuEntry {
            text: text.into(),
            color: Color::WHITE,
            scale,
            selection_fade: 0.0,
            position: (0.0, 0.0),
            hovering: false,
        }
    }

    /// An empty line
    pub fn spacer(scale: f32) -> Self {
        MenuEntry::new(String::new(), scale)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    #[cfg(test)]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    #[cfg(test)]
    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    pub fn set_position(&mut self, position: (f32, f32)) {
        self.position = position;
    }

    #[cfg(test)]
    pub fn selection_fade(&self) -> f32 {
        self.selection_fade
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Eases the selection fade toward 1.0 when selected, 0.0 otherwise
    pub fn update(&mut self, is_selected: bool, elapsed: f32) {
        let fade_speed = elapsed * FADE_RATE;

        self.selection_fade = if is_selected {
            (self.selection_fade + fade_speed).min(1.0)
        } else {
            (self.selection_fade - fade_speed).max(0.0)
        };
    }

    pub fn width(&self, font: &BitmapFont) -> f32 {
        font.measure(&self.text).0 * self.scale
    }

    pub fn height(&self, font: &BitmapFont) -> f32 {
        font.line_spacing() * self.scale
    }

    /// Screen-space hit box, or `None` for a spacer
    pub fn bounds(&self, font: &BitmapFont) -> Option<Rect> {
        if self.is_blank() {
            return None;
        }

        let width = self.width(font);
        let height = self.height(font);

        Some(Rect::new(
            self.position.0 as i32,
            (self.position.1 - height / 2.0) as i32,
            width.max(1.0) as u32,
            height.max(1.0) as u32,
        ))
    }

    /// Draws the entry, pulsing with its selection fade
    ///
    /// `time` is total running time in seconds; `alpha` is the owning screen's
    /// transition alpha.
    pub fn draw(
        &self,
        renderer: &mut dyn Renderer,
        font: &BitmapFont,
        style: &MenuStyle,
        is_selected: bool,
        time: f32,
        alpha: f32,
    ) -> Result<(), String> {
        if self.is_blank() {
            return Ok(());
        }

        let color = if self.hovering {
            style.hover_color
        } else if is_selected {
            style.selected_color
        } else {
            self.color
        };

        let pulsate = (time * 6.0).sin() + 1.0;
        let scale = (1.0 + pulsate * 0.05 * self.selection_fade) * self.scale;

        // Origin at the vertical middle of the line
        let origin = (0.0, font.line_spacing() / 2.0);

        renderer.draw_text(
            font,
            &self.text,
            self.position,
            origin,
            scale,
            with_alpha(color, alpha),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{DrawCall, RecordingRenderer};

    const FONT: BitmapFont = BitmapFont { pixel_size: 2.0 };

    #[test]
    fn test_selection_fade_eases_and_clamps() {
        let mut entry = MenuEntry::new("Play", 1.0);

        entry.update(true, 0.125);
        assert_eq!(entry.selection_fade(), 0.5);

        entry.update(true, 1.0);
        assert_eq!(entry.selection_fade(), 1.0);

        entry.update(false, 0.125);
        assert_eq!(entry.selection_fade(), 0.5);

        entry.update(false, 10.0);
        assert_eq!(entry.selection_fade(), 0.0);
    }

    #[test]
    fn test_size_scales_with_entry() {
        let entry = MenuEntry::new("AB", 0.5);
        // 2 chars * 6 advance * 2px * 0.5
        assert_eq!(entry.width(&FONT), 12.0);
        // 9 rows * 2px * 0.5
        assert_eq!(entry.height(&FONT), 9.0);
    }

    #[test]
    fn test_bounds_centered_vertically_on_position() {
        let mut entry = MenuEntry::new("AB", 1.0);
        entry.set_position((100.0, 50.0));

        let bounds = entry.bounds(&FONT).unwrap();
        assert_eq!(bounds, Rect::new(100, 41, 24, 18));
    }

    #[test]
    fn test_spacer_has_no_bounds_and_draws_nothing() {
        let spacer = MenuEntry::spacer(1.0);
        assert!(spacer.is_blank());
        assert!(spacer.bounds(&FONT).is_none());

        let mut renderer = RecordingRenderer::new(100, 100);
        spacer
            .draw(&mut renderer, &FONT, &MenuStyle::default(), true, 0.0, 1.0)
            .unwrap();
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn test_draw_color_priority() {
        let style = MenuStyle::default();
        let mut entry = MenuEntry::new("-", 1.0).with_color(Color::RGB(1, 2, 3));

        let first_color = |entry: &MenuEntry, selected: bool| {
            let mut renderer = RecordingRenderer::new(100, 100);
            entry
                .draw(&mut renderer, &FONT, &style, selected, 0.0, 1.0)
                .unwrap();
            match renderer.calls[0] {
                DrawCall::Rect(_, color) => color,
                ref other => panic!("unexpected draw call {:?}", other),
            }
        };

        assert_eq!(first_color(&entry, false), Color::RGB(1, 2, 3));
        assert_eq!(first_color(&entry, true), style.selected_color);

        entry.set_hovering(true);
        assert_eq!(first_color(&entry, true), style.hover_color);
    }

    #[test]
    fn test_draw_applies_transition_alpha() {
        let entry = MenuEntry::new("-", 1.0);
        let mut renderer = RecordingRenderer::new(100, 100);
        entry
            .draw(&mut renderer, &FONT, &MenuStyle::default(), false, 0.0, 0.5)
            .unwrap();

        assert!(matches!(renderer.calls[0], DrawCall::Rect(_, color) if color.a == 128));
    }
}
