//! Shape generation for demo meshes

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{TexVertex, Vertex, colors};

/// Generate vertices for a filled circle as a triangle list
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Axis-aligned filled rectangle as two counter-clockwise triangles
pub fn rect(center: Vec2, half_width: f32, half_height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (l, r) = (center.x - half_width, center.x + half_width);
    let (b, t) = (center.y - half_height, center.y + half_height);

    vec![
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
    ]
}

/// Filled quad from corners ordered bottom-left, top-left, top-right,
/// bottom-right
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [bl, tl, tr, br] = corners;
    [bl, br, tr, tr, tl, bl]
        .iter()
        .map(|p| Vertex::new(p.x, p.y, color))
        .collect()
}

/// Which of the two cube textures a face carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeTexture {
    A,
    B,
}

/// The four side faces of the open cube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    Front,
    Back,
    Left,
    Right,
}

impl CubeFace {
    pub const ALL: [CubeFace; 4] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
    ];

    /// Texture shown on the outside of the face
    pub fn texture(&self) -> CubeTexture {
        match self {
            CubeFace::Front | CubeFace::Back => CubeTexture::A,
            CubeFace::Left | CubeFace::Right => CubeTexture::B,
        }
    }

    /// Flat color shown on the inside of the face
    pub fn color(&self) -> [f32; 4] {
        match self {
            CubeFace::Front => colors::CUBE_FRONT,
            CubeFace::Back => colors::CUBE_BACK,
            CubeFace::Left => colors::CUBE_LEFT,
            CubeFace::Right => colors::CUBE_RIGHT,
        }
    }

    /// Unit-cube corners and texture coordinates, two triangles per face,
    /// wound counter-clockwise seen from outside the cube
    pub fn corners(&self) -> [([f32; 3], [f32; 2]); 6] {
        match self {
            CubeFace::Front => [
                ([-0.5, -0.5, 0.5], [0.0, 0.0]),
                ([0.5, -0.5, 0.5], [1.0, 0.0]),
                ([0.5, 0.5, 0.5], [1.0, 1.0]),
                ([0.5, 0.5, 0.5], [1.0, 1.0]),
                ([-0.5, 0.5, 0.5], [0.0, 1.0]),
                ([-0.5, -0.5, 0.5], [0.0, 0.0]),
            ],
            CubeFace::Back => [
                ([-0.5, -0.5, -0.5], [0.0, 0.0]),
                ([0.5, 0.5, -0.5], [1.0, 1.0]),
                ([0.5, -0.5, -0.5], [1.0, 0.0]),
                ([0.5, 0.5, -0.5], [1.0, 1.0]),
                ([-0.5, -0.5, -0.5], [0.0, 0.0]),
                ([-0.5, 0.5, -0.5], [0.0, 1.0]),
            ],
            CubeFace::Left => [
                ([-0.5, 0.5, 0.5], [1.0, 0.0]),
                ([-0.5, 0.5, -0.5], [1.0, 1.0]),
                ([-0.5, -0.5, -0.5], [0.0, 1.0]),
                ([-0.5, -0.5, -0.5], [0.0, 1.0]),
                ([-0.5, -0.5, 0.5], [0.0, 0.0]),
                ([-0.5, 0.5, 0.5], [1.0, 0.0]),
            ],
            CubeFace::Right => [
                ([0.5, 0.5, 0.5], [1.0, 0.0]),
                ([0.5, -0.5, -0.5], [0.0, 1.0]),
                ([0.5, 0.5, -0.5], [1.0, 1.0]),
                ([0.5, -0.5, -0.5], [0.0, 1.0]),
                ([0.5, 0.5, 0.5], [1.0, 0.0]),
                ([0.5, -0.5, 0.5], [0.0, 0.0]),
            ],
        }
    }
}

/// Vertices for one cube face, textured (outside) or in its flat color (inside)
pub fn cube_face(face: CubeFace, textured: bool) -> Vec<TexVertex> {
    let weight = if textured { 1.0 } else { 0.0 };
    face.corners()
        .iter()
        .map(|&(position, uv)| TexVertex::new(position, uv, face.color(), weight))
        .collect()
}

/// Outside faces carrying `texture`, concatenated into one triangle list
pub fn cube_outside(texture: CubeTexture) -> Vec<TexVertex> {
    CubeFace::ALL
        .iter()
        .filter(|face| face.texture() == texture)
        .flat_map(|&face| cube_face(face, true))
        .collect()
}

/// All four faces in their flat inside colors
pub fn cube_inside() -> Vec<TexVertex> {
    CubeFace::ALL
        .iter()
        .flat_map(|&face| cube_face(face, false))
        .collect()
}

/// Unit quad in the z = 0 plane, fully textured
pub fn textured_quad() -> Vec<TexVertex> {
    let corners = [
        ([-0.5, -0.5, 0.0], [0.0, 0.0]),
        ([0.5, -0.5, 0.0], [1.0, 0.0]),
        ([0.5, 0.5, 0.0], [1.0, 1.0]),
        ([0.5, 0.5, 0.0], [1.0, 1.0]),
        ([-0.5, 0.5, 0.0], [0.0, 1.0]),
        ([-0.5, -0.5, 0.0], [0.0, 0.0]),
    ];
    corners
        .iter()
        .map(|&(position, uv)| TexVertex::new(position, uv, colors::WHITE, 1.0))
        .collect()
}
