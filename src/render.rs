//! Drawing interface and hover card.
//!
//! The session never draws pixels. It describes each frame as a clear plus
//! one [`MarkerGlyph`] per marker, positioned with the same forward mapping
//! used for hit-testing, and hands them to a [`Renderer`].

use crate::color::Rgb;
use crate::constants::hover;
use crate::geometry::{Point, Size};
use crate::model::Marker;
use crate::session::ViewerSession;

/// One marker to draw, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGlyph {
    /// Marker index in the store.
    pub index: usize,
    /// Screen position of the marker's tip.
    pub position: Point,
    pub color: Rgb,
    /// Glyph size, already multiplied for emphasis.
    pub size: f64,
    /// Hovered marker.
    pub emphasized: bool,
}

/// A drawing surface for marker overlays.
pub trait Renderer {
    /// Erase the whole overlay.
    fn clear(&mut self);

    /// Draw one marker glyph.
    fn draw_marker(&mut self, glyph: &MarkerGlyph);
}

/// Draw the current frame: clear, then every marker in insertion order so
/// later markers end up on top.
///
/// Returns the number of markers drawn; zero when no image is loaded.
pub fn render<R: Renderer + ?Sized>(session: &ViewerSession, renderer: &mut R) -> usize {
    renderer.clear();
    let Some(mapping) = session.mapping() else {
        log::trace!("No image loaded, skipping marker render");
        return 0;
    };

    let config = session.config();
    let view = session.view();
    for (index, marker) in session.markers().iter().enumerate() {
        let emphasized = session.highlighted() == Some(index);
        let size = if emphasized {
            config.marker_size * config.highlight_factor
        } else {
            config.marker_size
        };
        renderer.draw_marker(&MarkerGlyph {
            index,
            position: mapping.forward(view, marker.position()),
            color: marker.color,
            size,
            emphasized,
        });
    }
    session.markers().len()
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Marker(MarkerGlyph),
}

/// Renderer that records commands instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Marker glyphs drawn since the last clear.
    pub fn glyphs(&self) -> impl Iterator<Item = &MarkerGlyph> {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map_or(0, |i| i + 1);
        self.commands[start..].iter().filter_map(|c| match c {
            DrawCommand::Marker(glyph) => Some(glyph),
            DrawCommand::Clear => None,
        })
    }
}

impl Renderer for DrawList {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_marker(&mut self, glyph: &MarkerGlyph) {
        self.commands.push(DrawCommand::Marker(glyph.clone()));
    }
}

/// Text of the small popup shown while hovering a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverCard {
    pub title: String,
    pub description: String,
    pub created: String,
    pub updated: String,
}

impl HoverCard {
    pub fn for_marker(marker: &Marker, index: usize) -> Self {
        let or = |value: &str, fallback: &str| {
            if value.is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            title: marker.display_name(index),
            description: or(&marker.desc, hover::NO_DESCRIPTION),
            created: marker.create_time.clone(),
            updated: or(&marker.update_time, hover::NEVER_UPDATED),
        }
    }
}

impl ViewerSession {
    /// Hover card for the highlighted marker, if any.
    pub fn hover_card(&self) -> Option<HoverCard> {
        let index = self.highlighted()?;
        let marker = self.markers().get(index)?;
        Some(HoverCard::for_marker(marker, index))
    }

    /// Draw the current frame; see [`render`].
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> usize {
        render(self, renderer)
    }
}

/// Top-left corner for a popup of `popup` size next to the cursor.
///
/// Prefers up and to the right of the cursor; flips to the left when it
/// would overflow the window's right edge, and below the cursor when it
/// would overflow the top.
pub fn popup_position(cursor: Point, popup: Size, window: Size) -> Point {
    let mut left = cursor.x + hover::CURSOR_GAP;
    let mut top = cursor.y - popup.height - hover::CURSOR_GAP;

    if left + popup.width > window.width {
        left = cursor.x - popup.width - hover::CURSOR_GAP;
    }
    if top < 0.0 {
        top = cursor.y + hover::BELOW_CURSOR;
    }
    Point::new(left, top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LoadedImage;

    fn session_with_markers() -> ViewerSession {
        let mut session = ViewerSession::default();
        session
            .load_image(LoadedImage::new(
                "scan",
                Size::new(800.0, 600.0),
                Size::new(800.0, 600.0),
            ))
            .unwrap();
        session.place_marker(Point::new(300.0, 400.0)).unwrap();
        session.place_marker(Point::new(700.0, 800.0)).unwrap();
        session
    }

    #[test]
    fn test_render_without_image_only_clears() {
        let session = ViewerSession::default();
        let mut list = DrawList::new();
        assert_eq!(session.render(&mut list), 0);
        assert_eq!(list.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_render_positions_follow_view() {
        let mut session = session_with_markers();
        session.set_scale(2.0);
        session.set_rotation(90.0);
        session.pan_by(50.0, -30.0);

        let mut list = DrawList::new();
        assert_eq!(session.render(&mut list), 2);
        let glyphs: Vec<_> = list.glyphs().collect();
        assert_eq!(glyphs.len(), 2);
        for glyph in glyphs {
            let marker = session.markers().get(glyph.index).unwrap();
            let expected = session.image_to_screen(marker.position()).unwrap();
            assert_eq!(glyph.position, expected);
            // Rendered positions are what hit-testing checks against
            assert_eq!(session.hit_test(glyph.position).unwrap(), Some(glyph.index));
        }
    }

    #[test]
    fn test_highlighted_marker_is_emphasized() {
        let mut session = session_with_markers();
        session.pointer_move(Point::new(700.0, 800.0));
        assert_eq!(session.highlighted(), Some(1));

        let mut list = DrawList::new();
        session.render(&mut list);
        let glyphs: Vec<_> = list.glyphs().collect();
        assert!(!glyphs[0].emphasized);
        assert_eq!(glyphs[0].size, 12.0);
        assert!(glyphs[1].emphasized);
        assert_eq!(glyphs[1].size, 18.0);
    }

    #[test]
    fn test_glyphs_only_since_last_clear() {
        let session = session_with_markers();
        let mut list = DrawList::new();
        session.render(&mut list);
        session.render(&mut list);
        assert_eq!(list.commands().len(), 6);
        assert_eq!(list.glyphs().count(), 2);
    }

    #[test]
    fn test_hover_card_fallbacks() {
        let mut marker = Marker::new(Point::new(0.0, 0.0), Rgb::RED, "");
        marker.create_time = "2026-10-17 08:00:00".to_string();
        let card = HoverCard::for_marker(&marker, 2);
        assert_eq!(card.title, "标记3");
        assert_eq!(card.description, "无描述");
        assert_eq!(card.created, "2026-10-17 08:00:00");
        assert_eq!(card.updated, "无");
    }

    #[test]
    fn test_session_hover_card() {
        let mut session = session_with_markers();
        assert!(session.hover_card().is_none());
        session.pointer_move(Point::new(300.0, 400.0));
        assert_eq!(session.hover_card().unwrap().title, "标记1");
    }

    #[test]
    fn test_popup_default_placement() {
        let p = popup_position(
            Point::new(500.0, 500.0),
            Size::new(200.0, 80.0),
            Size::new(1920.0, 1080.0),
        );
        assert_eq!(p, Point::new(510.0, 410.0));
    }

    #[test]
    fn test_popup_flips_at_edges() {
        let window = Size::new(1000.0, 800.0);
        let popup = Size::new(200.0, 80.0);

        let right_edge = popup_position(Point::new(900.0, 500.0), popup, window);
        assert_eq!(right_edge, Point::new(690.0, 410.0));

        let top_edge = popup_position(Point::new(100.0, 30.0), popup, window);
        assert_eq!(top_edge, Point::new(110.0, 50.0));
    }
}
