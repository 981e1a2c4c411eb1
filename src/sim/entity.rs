//! Capabilities shared by everything on the slope

use glam::Vec2;

use super::rect::Rect;
use crate::assets::{ImageLookup, ImageName};

/// A positioned, drawable game object
pub trait Entity {
    /// World position. Horizontally the sprite's center, vertically its
    /// visual center for drawing and its bottom edge for collisions.
    fn position(&self) -> Vec2;

    /// Image currently displayed
    fn image(&self) -> ImageName;

    /// React to being killed
    fn die(&mut self);

    /// Collision box: image-wide, half the image tall, bottom edge at
    /// `position.y`. That is the upper half of the drawn sprite.
    /// `None` when the image can't be resolved.
    fn bounds(&self, images: &dyn ImageLookup) -> Option<Rect> {
        let size = images.size(self.image())?;
        Some(Rect::bottom_anchored(self.position(), size))
    }

    /// Screen-space placement for drawing, centered on the position
    fn draw_rect(&self, images: &dyn ImageLookup) -> Option<Rect> {
        let size = images.size(self.image())?;
        Some(Rect::centered(self.position(), size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteSheet;

    struct Marker {
        pos: Vec2,
        image: ImageName,
        dead: bool,
    }

    impl Entity for Marker {
        fn position(&self) -> Vec2 {
            self.pos
        }

        fn image(&self) -> ImageName {
            self.image
        }

        fn die(&mut self) {
            self.dead = true;
        }
    }

    #[test]
    fn test_bounds_anchor_bottom_edge() {
        let mut sheet = SpriteSheet::new();
        sheet.insert(ImageName::Tree, 20.0, 40.0);
        let marker = Marker {
            pos: Vec2::new(100.0, 200.0),
            image: ImageName::Tree,
            dead: false,
        };

        let bounds = marker.bounds(&sheet).unwrap();
        assert_eq!(bounds, Rect::new(90.0, 180.0, 110.0, 200.0));

        // Drawing stays centered: the collision box is its upper half
        let draw = marker.draw_rect(&sheet).unwrap();
        assert_eq!(draw, Rect::new(90.0, 180.0, 110.0, 220.0));
        assert_eq!(bounds.top, draw.top);
        assert_eq!(bounds.height() * 2.0, draw.height());
    }

    #[test]
    fn test_unresolved_image_has_no_bounds() {
        let sheet = SpriteSheet::new();
        let mut marker = Marker {
            pos: Vec2::ZERO,
            image: ImageName::Rock1,
            dead: false,
        };
        assert_eq!(marker.bounds(&sheet), None);
        assert_eq!(marker.draw_rect(&sheet), None);
        marker.die();
        assert!(marker.dead);
    }
}
