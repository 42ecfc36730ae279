/// Rendering and asset collaborators
///
/// Screens never talk to SDL2 directly. They load textures through an
/// [`AssetLoader`] when activated and draw through a [`Renderer`] each frame,
/// which keeps the screen logic testable without a window.
///
/// # Architecture
///
/// - `AssetLoader` trait: `load(identifier)` → opaque [`TextureHandle`]
/// - `Renderer` trait: region/sprite/rect/text drawing with a tint color
/// - `SdlRenderer`: the SDL2 canvas implementation of both traits
/// - `with_alpha()` / `fade_to_black()`: transition tint helpers
use crate::text::BitmapFont;
use sdl2::image::LoadTexture;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use std::path::PathBuf;
use thiserror::Error;

/// Visible drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    /// Whether a point lies inside the viewport (right/bottom edges exclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width.max(1), self.height.max(1))
    }
}

/// Opaque reference to a loaded texture
///
/// Valid from `AssetLoader::load` until the matching `unload`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    id: usize,
    pub width: u32,
    pub height: u32,
}

impl TextureHandle {
    pub fn new(id: usize, width: u32, height: u32) -> Self {
        TextureHandle { id, width, height }
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

/// Errors raised while loading assets
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset not found: {identifier}")]
    NotFound { identifier: String },

    #[error("Failed to load {identifier}: {message}")]
    Load { identifier: String, message: String },
}

/// Source of textures for screens
pub trait AssetLoader {
    /// Loads the texture named `identifier` (e.g. `"Logos/background"`).
    fn load(&mut self, identifier: &str) -> Result<TextureHandle, AssetError>;

    /// Releases a texture. The handle must not be drawn afterwards.
    fn unload(&mut self, handle: TextureHandle);
}

/// Drawing surface for screens
///
/// Every tint passed in already carries the screen's transition alpha.
pub trait Renderer {
    fn viewport(&self) -> Viewport;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String>;

    /// Draws a whole texture stretched into `destination`.
    fn draw_region(
        &mut self,
        texture: TextureHandle,
        destination: Rect,
        tint: Color,
    ) -> Result<(), String>;

    /// Draws a texture scaled around `origin` (texture pixels) placed at `position`.
    fn draw_sprite(
        &mut self,
        texture: TextureHandle,
        position: (f32, f32),
        origin: (f32, f32),
        scale: f32,
        tint: Color,
    ) -> Result<(), String>;

    /// Draws bitmap text; `origin` is in unscaled font pixels, like `draw_sprite`.
    fn draw_text(
        &mut self,
        font: &BitmapFont,
        text: &str,
        position: (f32, f32),
        origin: (f32, f32),
        scale: f32,
        color: Color,
    ) -> Result<(), String> {
        let top_left = (position.0 - origin.0 * scale, position.1 - origin.1 * scale);
        for rect in font.rasterize(text, top_left, scale) {
            self.fill_rect(rect, color)?;
        }
        Ok(())
    }
}

/// Returns `color` with its alpha multiplied by `alpha` (clamped to 0..=1).
///
/// `with_alpha(Color::WHITE, 1.0 - position)` gives the `255 × (1 − position)`
/// transition tint.
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    Color::RGBA(
        color.r,
        color.g,
        color.b,
        (color.a as f32 * alpha).round() as u8,
    )
}

/// Opaque grey tint that fades a texture to black as `alpha` falls to zero.
pub fn fade_to_black(alpha: f32) -> Color {
    let level = (255.0 * alpha.clamp(0.0, 1.0)).round() as u8;
    Color::RGB(level, level, level)
}

/// SDL2 canvas renderer and texture store
///
/// Textures borrow the `TextureCreator`, so the creator must outlive the
/// renderer:
///
/// ```rust
/// let texture_creator = canvas.texture_creator();
/// let mut renderer = SdlRenderer::new(canvas, &texture_creator, "assets");
/// ```
pub struct SdlRenderer<'a> {
    canvas: Canvas<Window>,
    texture_creator: &'a TextureCreator<WindowContext>,
    textures: Vec<Option<Texture<'a>>>,
    asset_root: PathBuf,
}

impl<'a> SdlRenderer<'a> {
    pub fn new(
        mut canvas: Canvas<Window>,
        texture_creator: &'a TextureCreator<WindowContext>,
        asset_root: impl Into<PathBuf>,
    ) -> Self {
        canvas.set_blend_mode(BlendMode::Blend);
        SdlRenderer {
            canvas,
            texture_creator,
            textures: Vec::new(),
            asset_root: asset_root.into(),
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.canvas.set_draw_color(color);
        self.canvas.clear();
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }

    pub fn window(&self) -> &Window {
        self.canvas.window()
    }

    pub fn window_mut(&mut self) -> &mut Window {
        self.canvas.window_mut()
    }

    fn texture_mut(&mut self, handle: TextureHandle) -> Result<&mut Texture<'a>, String> {
        self.textures
            .get_mut(handle.id)
            .and_then(|slot| slot.as_mut())
            .ok_or_else(|| format!("Texture {} is not loaded", handle.id))
    }
}

/// Puts `item` in the first empty slot, growing only when none is free
fn store_in_free_slot<T>(slots: &mut Vec<Option<T>>, item: T) -> usize {
    match slots.iter().position(Option::is_none) {
        Some(index) => {
            slots[index] = Some(item);
            index
        }
        None => {
            slots.push(Some(item));
            slots.len() - 1
        }
    }
}

impl AssetLoader for SdlRenderer<'_> {
    fn load(&mut self, identifier: &str) -> Result<TextureHandle, AssetError> {
        let path = self.asset_root.join(format!("{}.png", identifier));

        if !path.exists() {
            return Err(AssetError::NotFound {
                identifier: identifier.to_string(),
            });
        }

        let mut texture = self
            .texture_creator
            .load_texture(&path)
            .map_err(|message| AssetError::Load {
                identifier: identifier.to_string(),
                message,
            })?;
        texture.set_blend_mode(BlendMode::Blend);

        let query = texture.query();
        let slot = store_in_free_slot(&mut self.textures, texture);
        let handle = TextureHandle::new(slot, query.width, query.height);

        log::debug!("Loaded texture {} ({}x{})", identifier, query.width, query.height);

        Ok(handle)
    }

    fn unload(&mut self, handle: TextureHandle) {
        // Dropping the texture destroys it on the SDL side
        if let Some(slot) = self.textures.get_mut(handle.id) {
            slot.take();
        }
    }
}

impl Renderer for SdlRenderer<'_> {
    fn viewport(&self) -> Viewport {
        let (width, height) = self.canvas.window().size();
        Viewport::new(width, height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(color);
        self.canvas.fill_rect(rect)
    }

    fn draw_region(
        &mut self,
        texture: TextureHandle,
        destination: Rect,
        tint: Color,
    ) -> Result<(), String> {
        let sdl_texture = self.texture_mut(texture)?;
        sdl_texture.set_color_mod(tint.r, tint.g, tint.b);
        sdl_texture.set_alpha_mod(tint.a);

        let sdl_texture = self
            .textures
            .get(texture.id)
            .and_then(|slot| slot.as_ref())
            .ok_or_else(|| format!("Texture {} is not loaded", texture.id))?;
        self.canvas.copy(sdl_texture, None, destination)
    }

    fn draw_sprite(
        &mut self,
        texture: TextureHandle,
        position: (f32, f32),
        origin: (f32, f32),
        scale: f32,
        tint: Color,
    ) -> Result<(), String> {
        let width = (texture.width as f32 * scale).round().max(1.0);
        let height = (texture.height as f32 * scale).round().max(1.0);
        let destination = Rect::new(
            (position.0 - origin.0 * scale).round() as i32,
            (position.1 - origin.1 * scale).round() as i32,
            width as u32,
            height as u32,
        );

        self.draw_region(texture, destination, tint)
    }
}

#[cfg(test)]
pub mod testing {
    //! Window-free collaborators for screen tests

    use super::*;

    /// A draw call captured by [`RecordingRenderer`]
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Rect(Rect, Color),
        Region(TextureHandle, Rect, Color),
        Sprite(TextureHandle, Color),
    }

    /// Records draw calls and hands out fake texture handles
    ///
    /// Identifiers listed in `missing` fail to load with `NotFound`.
    pub struct RecordingRenderer {
        pub viewport: Viewport,
        pub calls: Vec<DrawCall>,
        pub loaded: Vec<String>,
        pub unloaded: Vec<TextureHandle>,
        pub missing: Vec<String>,
    }

    impl RecordingRenderer {
        pub fn new(width: u32, height: u32) -> Self {
            RecordingRenderer {
                viewport: Viewport::new(width, height),
                calls: Vec::new(),
                loaded: Vec::new(),
                unloaded: Vec::new(),
                missing: Vec::new(),
            }
        }

        pub fn with_missing(mut self, identifier: &str) -> Self {
            self.missing.push(identifier.to_string());
            self
        }
    }

    impl AssetLoader for RecordingRenderer {
        fn load(&mut self, identifier: &str) -> Result<TextureHandle, AssetError> {
            if self.missing.iter().any(|m| m == identifier) {
                return Err(AssetError::NotFound {
                    identifier: identifier.to_string(),
                });
            }
            self.loaded.push(identifier.to_string());
            Ok(TextureHandle::new(self.loaded.len() - 1, 64, 32))
        }

        fn unload(&mut self, handle: TextureHandle) {
            self.unloaded.push(handle);
        }
    }

    impl Renderer for RecordingRenderer {
        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
            self.calls.push(DrawCall::Rect(rect, color));
            Ok(())
        }

        fn draw_region(
            &mut self,
            texture: TextureHandle,
            destination: Rect,
            tint: Color,
        ) -> Result<(), String> {
            self.calls.push(DrawCall::Region(texture, destination, tint));
            Ok(())
        }

        fn draw_sprite(
            &mut self,
            texture: TextureHandle,
            _position: (f32, f32),
            _origin: (f32, f32),
            _scale: f32,
            tint: Color,
        ) -> Result<(), String> {
            self.calls.push(DrawCall::Sprite(texture, tint));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{DrawCall, RecordingRenderer};
    use super::*;
    use crate::text::MENU_FONT;

    #[test]
    fn test_with_alpha_scales_alpha_only() {
        let tint = with_alpha(Color::RGB(10, 20, 30), 0.5);
        assert_eq!(tint, Color::RGBA(10, 20, 30, 128));
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(with_alpha(Color::WHITE, 2.0).a, 255);
        assert_eq!(with_alpha(Color::WHITE, -1.0).a, 0);
    }

    #[test]
    fn test_fade_to_black() {
        assert_eq!(fade_to_black(1.0), Color::RGB(255, 255, 255));
        assert_eq!(fade_to_black(0.0), Color::RGB(0, 0, 0));
    }

    #[test]
    fn test_unloaded_slot_is_reused() {
        let mut slots = Vec::new();
        assert_eq!(store_in_free_slot(&mut slots, "logo"), 0);
        assert_eq!(store_in_free_slot(&mut slots, "cursor"), 1);

        slots[0] = None;
        assert_eq!(store_in_free_slot(&mut slots, "title"), 0);
        assert_eq!(slots, vec![Some("title"), Some("cursor")]);

        assert_eq!(store_in_free_slot(&mut slots, "panel"), 2);
    }

    #[test]
    fn test_viewport_contains() {
        let viewport = Viewport::new(800, 480);
        assert!(viewport.contains(0.0, 0.0));
        assert!(viewport.contains(799.0, 479.0));
        assert!(!viewport.contains(800.0, 10.0));
        assert!(!viewport.contains(-1.0, 10.0));
    }

    #[test]
    fn test_default_draw_text_fills_glyph_pixels() {
        let mut renderer = RecordingRenderer::new(100, 100);
        renderer
            .draw_text(&MENU_FONT, "-", (0.0, 0.0), (0.0, 0.0), 1.0, Color::WHITE)
            .unwrap();

        // '-' is the fourth glyph row, 6px font pixels
        assert_eq!(renderer.calls.len(), 5);
        assert_eq!(
            renderer.calls[0],
            DrawCall::Rect(Rect::new(0, 18, 6, 6), Color::WHITE)
        );
    }

    #[test]
    fn test_missing_asset_is_an_error() {
        let mut renderer = RecordingRenderer::new(100, 100).with_missing("Logos/gone");
        let err = renderer.load("Logos/gone").unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
        assert_eq!(err.to_string(), "Asset not found: Logos/gone");
    }
}
