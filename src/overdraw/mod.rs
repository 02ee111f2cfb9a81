//! Overdraw optimization

pub mod boundary;
pub mod score;

use crate::error::OverdrawError;
use crate::vertex::VertexPositions;

pub use self::boundary::{generate_hard_boundaries, generate_soft_boundaries};
pub use self::score::{ClusterScore, score_clusters};

/// Parameters of [try_optimize_overdraw].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverdrawOptions {
    /// Size of the simulated FIFO transform cache, at least 3
    pub cache_size: u32,
    /// How much the overdraw optimizer can degrade vertex cache efficiency (1.05 = up to 5%) to reduce overdraw more
    /// efficiently
    pub threshold: f32,
}

impl OverdrawOptions {
    pub const DEFAULT_CACHE_SIZE: u32 = 16;
    pub const DEFAULT_THRESHOLD: f32 = 1.05;

    pub fn new(cache_size: u32, threshold: f32) -> Self {
        Self { cache_size, threshold }
    }

    pub fn validate(&self) -> Result<(), OverdrawError> {
        if self.cache_size < 3 {
            return Err(OverdrawError::CacheTooSmall(self.cache_size));
        }

        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(OverdrawError::InvalidThreshold(self.threshold));
        }

        Ok(())
    }
}

impl Default for OverdrawOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CACHE_SIZE, Self::DEFAULT_THRESHOLD)
    }
}

/// Splits the mesh into clusters of triangles that keep the vertex cache efficiency within `threshold` of the input
/// order.
///
/// Returns the boundary list: the first triangle of each cluster, in ascending order starting at 0. Empty input yields
/// an empty list.
pub fn build_clusters(indices: &[u32], vertex_count: usize, cache_size: u32, threshold: f32) -> Vec<u32> {
    assert_eq!(indices.len() % 3, 0);
    assert!(cache_size >= 3);

    if indices.is_empty() || vertex_count == 0 {
        return Vec::new();
    }

    // generate hard boundaries from full-triangle cache misses
    let hard_clusters = generate_hard_boundaries(indices, vertex_count, cache_size);

    // generate soft boundaries
    let soft_clusters = generate_soft_boundaries(indices, vertex_count, &hard_clusters, cache_size, threshold);

    log::debug!(
        "{} triangles: {} hard clusters, {} soft clusters",
        indices.len() / 3,
        hard_clusters.len(),
        soft_clusters.len()
    );

    soft_clusters
}

fn fill_output(destination: &mut [u32], indices: &[u32], clusters: &[u32], sort_data: &[ClusterScore]) {
    let mut offset = 0;

    for data in sort_data {
        let cluster = data.cluster as usize;
        assert!(cluster < clusters.len());

        let cluster_begin = clusters[cluster] as usize * 3;
        let cluster_end = clusters.get(cluster + 1).map_or(indices.len(), |next| *next as usize * 3);
        assert!(cluster_begin < cluster_end);

        let cluster_size = cluster_end - cluster_begin;

        destination[offset..offset + cluster_size].copy_from_slice(&indices[cluster_begin..cluster_end]);

        offset += cluster_size;
    }

    assert_eq!(offset, indices.len());
}

fn optimize_overdraw_impl<P>(destination: &mut [u32], indices: &[u32], vertices: &P, cache_size: u32, threshold: f32)
where
    P: VertexPositions + ?Sized,
{
    let clusters = build_clusters(indices, vertices.vertex_count(), cache_size, threshold);

    // fill sort data
    let mut sort_data = score_clusters(indices, vertices, &clusters);

    // high product = possible occluder, render early
    sort_data.sort_by(|a, b| b.score.total_cmp(&a.score));

    fill_output(destination, indices, &clusters, &sort_data);
}

/// Reorders indices to reduce the number of GPU vertex shader invocations and the pixel overdraw.
///
/// If index buffer contains multiple ranges for multiple draw calls, this functions needs to be called on each range individually.
///
/// # Arguments
///
/// * `destination`: must contain enough space for the resulting index buffer (`indices.len()` elements)
/// * `indices`: should contain index data that is the result of vertex cache optimization (**not** the original mesh indices!)
/// * `vertices`: vertex positions, e.g. a slice of [Position](crate::vertex::Position) or a [PositionStream](crate::PositionStream)
/// * `cache_size`: size of the simulated transform cache, at least 3 (16 is a good default)
/// * `threshold`: indicates how much the overdraw optimizer can degrade vertex cache efficiency (1.05 = up to 5%) to reduce overdraw more efficiently
///
/// # Panics
///
/// Panics if the index count is not a multiple of 3, if `cache_size` is below 3 or if `destination` is too small.
pub fn optimize_overdraw<P>(destination: &mut [u32], indices: &[u32], vertices: &P, cache_size: u32, threshold: f32)
where
    P: VertexPositions + ?Sized,
{
    assert_eq!(indices.len() % 3, 0);
    assert!(cache_size >= 3);
    assert!(destination.len() >= indices.len());

    // guard for empty meshes
    if indices.is_empty() || vertices.vertex_count() == 0 {
        return;
    }

    optimize_overdraw_impl(destination, indices, vertices, cache_size, threshold);
}

/// Same as [optimize_overdraw], but reorders `indices` in place.
pub fn optimize_overdraw_in_place<P>(indices: &mut [u32], vertices: &P, cache_size: u32, threshold: f32)
where
    P: VertexPositions + ?Sized,
{
    assert_eq!(indices.len() % 3, 0);
    assert!(cache_size >= 3);

    if indices.is_empty() || vertices.vertex_count() == 0 {
        return;
    }

    let indices_copy = indices.to_vec();

    optimize_overdraw_impl(indices, &indices_copy, vertices, cache_size, threshold);
}

/// Same as [optimize_overdraw], but reports invalid input as an error instead of panicking.
///
/// On error `destination` is left untouched.
pub fn try_optimize_overdraw<P>(
    destination: &mut [u32],
    indices: &[u32],
    vertices: &P,
    options: &OverdrawOptions,
) -> Result<(), OverdrawError>
where
    P: VertexPositions + ?Sized,
{
    options.validate()?;

    if indices.len() % 3 != 0 {
        return Err(OverdrawError::InvalidIndexCount(indices.len()));
    }

    if destination.len() < indices.len() {
        return Err(OverdrawError::DestinationTooSmall {
            required: indices.len(),
            actual: destination.len(),
        });
    }

    let vertex_count = vertices.vertex_count();

    if indices.is_empty() || vertex_count == 0 {
        return Ok(());
    }

    if let Some(index) = indices.iter().find(|index| **index as usize >= vertex_count) {
        return Err(OverdrawError::IndexOutOfRange {
            index: *index,
            vertex_count,
        });
    }

    optimize_overdraw_impl(destination, indices, vertices, options.cache_size, options.threshold);

    Ok(())
}
