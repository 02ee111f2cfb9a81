//! meshopt-overdraw
//!
//! Reorders the triangles of an indexed mesh so that likely occluders are rendered first, reducing pixel overdraw
//! while keeping most of the vertex cache efficiency of the input order.
//!
//! Based on Pedro Sander, Diego Nehab and Joshua Barczak. Fast Triangle Reordering for Vertex Locality and Reduced
//! Overdraw. 2007
//!
//! # Example
//!
//! ```
//! use meshopt_overdraw::optimize_overdraw;
//!
//! let vertices: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
//! let indices = [0, 1, 2];
//! let mut result = [0u32; 3];
//!
//! optimize_overdraw(&mut result, &indices, &vertices, 16, 1.05);
//!
//! assert_eq!(result, indices);
//! ```

pub mod error;
pub mod overdraw;
pub mod util;
pub mod vertex;

pub use crate::error::OverdrawError;
pub use crate::overdraw::{
    ClusterScore, OverdrawOptions, build_clusters, optimize_overdraw, optimize_overdraw_in_place, score_clusters,
    try_optimize_overdraw,
};
pub use crate::vertex::{Position, VertexPositions};

/// Maximum supported distance between two consecutive vertex positions, in bytes.
pub const MAX_POSITION_STRIDE: usize = 256;

/// Positions stored inside an arbitrary vertex layout, addressed with a byte stride.
///
/// Each position is 3 native-endian `f32` values starting `offset` bytes into its vertex.
pub struct PositionStream<'a> {
    data: &'a [u8],
    stride: usize,
    offset: usize,
}

impl<'a> PositionStream<'a> {
    /// Creates a stream from tightly or loosely packed floats.
    ///
    /// # Arguments
    ///
    /// * `stride`: distance between consecutive positions in bytes (multiple of 4, at most 256)
    ///
    /// # Example
    ///
    /// ```
    /// use meshopt_overdraw::PositionStream;
    ///
    /// // position followed by a 2 component texture coordinate
    /// let data = [0.0, 0.0, 0.0, 0.5, 0.5, 1.0, 0.0, 0.0, 1.0, 1.0];
    /// let stream = PositionStream::from_floats(&data, 20);
    ///
    /// assert_eq!(stream.len(), 2);
    /// assert_eq!(stream.get(1), [1.0, 0.0, 0.0]);
    /// ```
    pub fn from_floats(data: &'a [f32], stride: usize) -> Self {
        Self::from_bytes(util::as_bytes(data), stride, 0)
    }

    /// Creates a stream from a slice of vertices whose first 12 bytes are the position.
    pub fn from_slice<T>(slice: &'a [T]) -> Self {
        Self::from_slice_with_offset(slice, 0)
    }

    /// Creates a stream from a slice of vertices with the position stored `offset` bytes into each vertex.
    ///
    /// # Example
    ///
    /// ```
    /// use meshopt_overdraw::PositionStream;
    ///
    /// #[derive(Clone, Default)]
    /// #[repr(C)]
    /// struct Vertex {
    ///     uv: [f32; 2],
    ///     position: [f32; 3],
    /// }
    ///
    /// let position_offset = std::mem::size_of::<f32>() * 2;
    ///
    /// let vertices = vec![Vertex::default(); 4];
    /// let stream = PositionStream::from_slice_with_offset(&vertices, position_offset);
    ///
    /// assert_eq!(stream.len(), 4);
    /// ```
    pub fn from_slice_with_offset<T>(slice: &'a [T], offset: usize) -> Self {
        Self::from_bytes(util::as_bytes(slice), std::mem::size_of::<T>(), offset)
    }

    /// Creates a stream from raw bytes.
    ///
    /// # Arguments
    ///
    /// * `stride`: distance between consecutive vertices in bytes
    /// * `offset`: position of the 3 floats inside a vertex in bytes
    pub fn from_bytes(data: &'a [u8], stride: usize, offset: usize) -> Self {
        assert!(stride > 0 && stride <= MAX_POSITION_STRIDE);
        assert!(stride % std::mem::size_of::<f32>() == 0);
        assert!(offset % std::mem::size_of::<f32>() == 0);
        assert!(offset + std::mem::size_of::<[f32; 3]>() <= stride);

        Self { data, stride, offset }
    }

    /// Returns the position of the vertex at `index`.
    pub fn get(&self, index: usize) -> [f32; 3] {
        let base = index * self.stride + self.offset;
        let mut result = [0.0; 3];

        for (i, value) in result.iter_mut().enumerate() {
            let b = &self.data[base + i * 4..base + i * 4 + 4];
            *value = f32::from_ne_bytes([b[0], b[1], b[2], b[3]]);
        }

        result
    }

    /// Returns the number of addressable positions.
    ///
    /// The last vertex only needs to hold its position, not a full stride.
    pub fn len(&self) -> usize {
        let position_size = std::mem::size_of::<[f32; 3]>();

        if self.data.len() < self.offset + position_size {
            0
        } else {
            (self.data.len() - self.offset - position_size) / self.stride + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Default, Debug, PartialEq)]
struct Vector3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Vector3 {
        Self { x, y, z }
    }

    pub fn from_pos(p: [f32; 3]) -> Vector3 {
        Self::new(p[0], p[1], p[2])
    }

    pub fn add(self, other: Vector3) -> Vector3 {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Vector3) -> Vector3 {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, s: f32) -> Vector3 {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn dot(self, other: Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vector3) -> Vector3 {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }
}
