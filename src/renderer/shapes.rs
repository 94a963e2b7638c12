//! Shape generation for 2D primitives

use super::vertex::{Vertex, colors};
use crate::sim::{Rect, RenderFrame};

/// Two triangles covering `rect` (field coordinates)
pub fn rect(r: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, b, color),
    ]
}

/// Vertices for a whole frame, back to front.
///
/// The end-of-round screen is text only, so an over frame draws nothing.
pub fn frame_vertices(frame: &RenderFrame) -> Vec<Vertex> {
    if frame.game_over.is_some() {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((frame.objects.len() + 3) * 6);
    if let Some(preview) = &frame.preview {
        vertices.extend_from_slice(&rect(preview, colors::PREVIEW));
    }
    for obj in &frame.objects {
        vertices.extend_from_slice(&rect(obj, colors::OBJECT));
    }
    vertices.extend_from_slice(&rect(&frame.catcher, colors::CATCHER));

    if frame.paused {
        let field = Rect::new(0.0, 0.0, frame.field.x, frame.field.y);
        vertices.extend_from_slice(&rect(&field, colors::PAUSE_SHADE));
    }
    vertices
}
