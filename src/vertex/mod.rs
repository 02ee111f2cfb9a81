pub mod cache;

use crate::PositionStream;

pub trait Position {
    fn pos(&self) -> [f32; 3];
}

impl Position for [f32; 3] {
    #[inline]
    fn pos(&self) -> [f32; 3] {
        *self
    }
}

/// Indexed source of vertex positions.
pub trait VertexPositions {
    fn vertex_count(&self) -> usize;

    fn position(&self, index: usize) -> [f32; 3];
}

impl<Vertex> VertexPositions for [Vertex]
where
    Vertex: Position,
{
    #[inline]
    fn vertex_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn position(&self, index: usize) -> [f32; 3] {
        self[index].pos()
    }
}

impl<Vertex, const N: usize> VertexPositions for [Vertex; N]
where
    Vertex: Position,
{
    #[inline]
    fn vertex_count(&self) -> usize {
        N
    }

    #[inline]
    fn position(&self, index: usize) -> [f32; 3] {
        self[index].pos()
    }
}

impl<Vertex> VertexPositions for Vec<Vertex>
where
    Vertex: Position,
{
    #[inline]
    fn vertex_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn position(&self, index: usize) -> [f32; 3] {
        self[index].pos()
    }
}

impl VertexPositions for PositionStream<'_> {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn position(&self, index: usize) -> [f32; 3] {
        self.get(index)
    }
}
