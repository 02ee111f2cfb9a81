//! Vertex transform cache simulation and analysis

#[derive(Default, Debug)]
pub struct VertexCacheStatistics {
    pub vertices_transformed: u32,
    /// Transformed vertices / triangle count
    ///
    /// Best case 0.5, worst case 3.0, optimum depends on topology
    pub acmr: f32,
    /// Transformed vertices / vertex count
    ///
    /// Best case 1.0, worst case 6.0, optimum is 1.0 (each vertex is transformed once)
    pub atvr: f32,
}

/// Simplified FIFO transform cache.
///
/// Every vertex remembers the timestamp of its last transformation; the timestamp only advances on misses, so a vertex
/// stays resident until `cache_size` other vertices have been transformed after it.
pub struct TransformCache {
    timestamps: Vec<u32>,
    timestamp: u32,
    cache_size: u32,
}

impl TransformCache {
    /// Creates a cold cache for `vertex_count` vertices.
    pub fn new(vertex_count: usize, cache_size: u32) -> Self {
        assert!(cache_size >= 3);

        Self {
            timestamps: vec![0; vertex_count],
            timestamp: cache_size + 1,
            cache_size,
        }
    }

    /// Evicts every vertex by advancing the timestamp past the cache size.
    #[inline]
    pub fn reset(&mut self) {
        self.timestamp = self.timestamp.wrapping_add(self.cache_size + 1);
    }

    /// Returns true if `vertex` had to be transformed, putting it into the cache.
    #[inline]
    pub fn touch(&mut self, vertex: u32) -> bool {
        let last = &mut self.timestamps[vertex as usize];

        if self.timestamp.wrapping_sub(*last) > self.cache_size {
            *last = self.timestamp;
            self.timestamp = self.timestamp.wrapping_add(1);
            true
        } else {
            false
        }
    }

    /// Processes the vertices of a triangle in order and returns the number of misses.
    #[inline]
    pub fn process_triangle(&mut self, a: u32, b: u32, c: u32) -> u32 {
        self.touch(a) as u32 + self.touch(b) as u32 + self.touch(c) as u32
    }

    /// Processes a range of triangles and returns the total number of misses.
    pub fn process_triangles(&mut self, indices: &[u32]) -> u32 {
        assert!(indices.len() % 3 == 0);

        indices
            .chunks_exact(3)
            .map(|abc| self.process_triangle(abc[0], abc[1], abc[2]))
            .sum()
    }
}

/// Returns cache hit statistics using a simplified FIFO model.
///
/// Results may not match actual GPU performance.
pub fn analyze_vertex_cache(indices: &[u32], vertex_count: usize, cache_size: u32) -> VertexCacheStatistics {
    assert!(indices.len() % 3 == 0);
    assert!(cache_size >= 3);

    let mut result = VertexCacheStatistics::default();

    let mut cache = TransformCache::new(vertex_count, cache_size);
    let mut referenced = vec![false; vertex_count];

    for abc in indices.chunks_exact(3) {
        result.vertices_transformed += cache.process_triangle(abc[0], abc[1], abc[2]);

        for index in abc {
            referenced[*index as usize] = true;
        }
    }

    let unique_vertex_count = referenced.iter().filter(|r| **r).count();

    result.acmr = if indices.is_empty() {
        0.0
    } else {
        result.vertices_transformed as f32 / (indices.len() as f32 / 3.0)
    };
    result.atvr = if unique_vertex_count == 0 {
        0.0
    } else {
        result.vertices_transformed as f32 / unique_vertex_count as f32
    };

    result
}
