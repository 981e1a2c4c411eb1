//! Frame composition
//!
//! Turns game state into an ordered list of sprite draws and hands them to a
//! host drawing surface. The surface owns the actual pixels.

use crate::assets::{ImageLookup, ImageName};
use crate::sim::{Entity, GameState, Rect};

/// Host drawing surface
pub trait Surface {
    /// Wipe the previous frame
    fn clear(&mut self);

    /// World coordinate drawn at the surface's top-left corner
    fn set_view_offset(&mut self, x: f32, y: f32);

    /// Draw an image with its top-left corner at (x, y), in world units
    fn draw_image(&mut self, image: ImageName, x: f32, y: f32, width: f32, height: f32);
}

/// One sprite to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub image: ImageName,
    pub rect: Rect,
}

/// Sprites for the current frame in draw order: skier, rhino, obstacles.
/// Entities whose image has no known size are skipped.
pub fn frame_sprites(state: &GameState, images: &dyn ImageLookup) -> Vec<SpriteDraw> {
    let mut sprites = Vec::with_capacity(state.obstacles.len() + 2);
    let entities = [&state.skier as &dyn Entity, &state.rhino as &dyn Entity]
        .into_iter()
        .chain(state.obstacles.obstacles().iter().map(|o| o as &dyn Entity));

    for entity in entities {
        match entity.draw_rect(images) {
            Some(rect) => sprites.push(SpriteDraw {
                image: entity.image(),
                rect,
            }),
            None => {
                let image = entity.image();
                log::warn!(
                    "No size for image {} ({}), not drawn",
                    image.as_str(),
                    image.file_name()
                );
            }
        }
    }
    sprites
}

/// Draw one frame of `state` onto `surface`
pub fn draw_frame(state: &GameState, surface: &mut dyn Surface, images: &dyn ImageLookup) {
    surface.clear();

    let origin = state.window.top_left();
    surface.set_view_offset(origin.x, origin.y);

    for sprite in frame_sprites(state, images) {
        surface.draw_image(
            sprite.image,
            sprite.rect.left,
            sprite.rect.top,
            sprite.rect.width(),
            sprite.rect.height(),
        );
    }
}
