//! Cluster boundary generation driven by the transform cache model

use crate::vertex::cache::TransformCache;

/// Returns the triangles that start a new disjoint patch of the mesh.
///
/// The first entry is always 0.
pub fn generate_hard_boundaries(indices: &[u32], vertex_count: usize, cache_size: u32) -> Vec<u32> {
    assert!(indices.len() % 3 == 0);

    let mut cache = TransformCache::new(vertex_count, cache_size);

    let mut result = Vec::new();

    for (i, abc) in indices.chunks_exact(3).enumerate() {
        let m = cache.process_triangle(abc[0], abc[1], abc[2]);

        // when all three vertices are not in the cache it's usually relatively safe to assume that this is a new patch in the mesh
        // that is disjoint from previous vertices; sometimes it might come back to reference existing vertices but that frequently
        // suggests an inefficiency in the vertex cache optimization algorithm
        // usually the first triangle has 3 misses unless it's degenerate - thus we make sure the first cluster always starts with 0
        if i == 0 || m == 3 {
            result.push(i as u32);
        }
    }

    assert!(result.len() <= indices.len() / 3);

    result
}

/// Splits every hard cluster into smaller clusters whose ACMR stays within `threshold` times the ACMR of the hard
/// cluster; the last cluster of each hard cluster absorbs the remainder.
pub fn generate_soft_boundaries(
    indices: &[u32],
    vertex_count: usize,
    clusters: &[u32],
    cache_size: u32,
    threshold: f32,
) -> Vec<u32> {
    assert!(indices.len() % 3 == 0);

    let face_count = indices.len() / 3;

    let mut cache = TransformCache::new(vertex_count, cache_size);

    let mut result = Vec::with_capacity(face_count + 1);

    for (cluster_idx, start) in clusters.iter().enumerate() {
        let start = *start as usize;
        let end = clusters.get(cluster_idx + 1).map_or(face_count, |next| *next as usize);
        assert!(start < end);

        let cluster_indices = &indices[start * 3..end * 3];

        // measure cluster ACMR
        cache.reset();

        let cluster_misses = cache.process_triangles(cluster_indices);
        let cluster_threshold = threshold * (cluster_misses as f32 / (end - start) as f32);

        // first cluster always starts from the hard cluster boundary
        result.push(start as u32);

        cache.reset();

        let mut running_misses = 0;
        let mut running_faces = 0;

        for (offset, abc) in cluster_indices.chunks_exact(3).enumerate() {
            running_misses += cache.process_triangle(abc[0], abc[1], abc[2]);
            running_faces += 1;

            if running_misses as f32 / running_faces as f32 <= cluster_threshold {
                // target ACMR reached with the current triangle, next one starts a new cluster
                // for the last triangle this pushes `end`, which the merge below removes again
                result.push((start + offset + 1) as u32);

                cache.reset();

                running_misses = 0;
                running_faces = 0;
            }
        }

        // the last flushed cluster is merged with the incomplete remainder since a short tail has a very bad ACMR;
        // if the tail is empty this only drops the `end` boundary pushed above
        if result.last().copied() != Some(start as u32) {
            result.pop();
        }
    }

    assert!(result.len() >= clusters.len());
    assert!(result.len() <= face_count);

    result
}
