//! Occlusion likelihood of triangle clusters

use crate::Vector3;
use crate::util::zero_inverse;
use crate::vertex::VertexPositions;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterScore {
    /// Position of the cluster in the boundary list
    pub cluster: u32,
    /// Dot product of the centroid offset from the mesh centroid and the cluster normal; high product = possible
    /// occluder, render early
    pub score: f32,
}

fn calc_mesh_centroid<P>(indices: &[u32], vertices: &P) -> Vector3
where
    P: VertexPositions + ?Sized,
{
    let mut centroid = Vector3::default();

    for index in indices {
        centroid = centroid.add(Vector3::from_pos(vertices.position(*index as usize)));
    }

    centroid.scale(zero_inverse(indices.len() as f32))
}

/// Computes the occlusion likelihood of every cluster in `clusters`.
///
/// `clusters` is a boundary list: cluster `i` spans triangles `clusters[i]..clusters[i + 1]`, the last one runs to
/// the end of `indices`.
pub fn score_clusters<P>(indices: &[u32], vertices: &P, clusters: &[u32]) -> Vec<ClusterScore>
where
    P: VertexPositions + ?Sized,
{
    assert!(indices.len() % 3 == 0);

    let mesh_centroid = calc_mesh_centroid(indices, vertices);

    let mut result = Vec::with_capacity(clusters.len());

    for (cluster_idx, cluster_begin) in clusters.iter().enumerate() {
        let cluster_begin = *cluster_begin as usize * 3;
        let cluster_end = clusters.get(cluster_idx + 1).map_or(indices.len(), |next| *next as usize * 3);
        assert!(cluster_begin < cluster_end);

        let mut cluster_area = 0.0;
        let mut cluster_centroid = Vector3::default();
        let mut cluster_normal = Vector3::default();

        for i in indices[cluster_begin..cluster_end].chunks_exact(3) {
            let p0 = Vector3::from_pos(vertices.position(i[0] as usize));
            let p1 = Vector3::from_pos(vertices.position(i[1] as usize));
            let p2 = Vector3::from_pos(vertices.position(i[2] as usize));

            let normal = p1.sub(p0).cross(p2.sub(p0));
            let area = normal.length();

            cluster_centroid = cluster_centroid.add(p0.add(p1).add(p2).scale(area / 3.0));
            cluster_normal = cluster_normal.add(normal);
            cluster_area += area;
        }

        let cluster_centroid = cluster_centroid.scale(zero_inverse(cluster_area));
        let cluster_normal = cluster_normal.scale(zero_inverse(cluster_normal.length()));

        let score = cluster_centroid.sub(mesh_centroid).dot(cluster_normal);

        log::trace!("cluster {} (triangles {}..{}): score {}", cluster_idx, cluster_begin / 3, cluster_end / 3, score);

        result.push(ClusterScore {
            cluster: cluster_idx as u32,
            score,
        });
    }

    result
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_facing_quads() {
        // two parallel unit quads facing +Z, one at z=0 and one at z=1
        #[rustfmt::skip]
        let vb: [[f32; 3]; 8] = [
            [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0],
        ];
        let ib = [0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7];

        let scores = score_clusters(&ib, &vb, &[0, 2]);

        // the lower quad faces the mesh interior, the upper one faces away from it
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].cluster, 0);
        assert_eq!(scores[1].cluster, 1);
        assert!((scores[0].score + 0.5).abs() < 1e-6);
        assert!((scores[1].score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate() {
        // zero area triangle and a cluster whose normals cancel out
        let vb: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

        let zero_area = score_clusters(&[0, 0, 0], &vb, &[0]);

        assert_eq!(zero_area[0].score, 0.0);

        let opposite = score_clusters(&[0, 1, 2, 0, 2, 1], &vb, &[0]);

        assert_eq!(opposite[0].score, 0.0);

        let single = score_clusters(&[0, 1, 2], &vb, &[0]);

        assert!(single[0].score.is_finite());
    }

    #[test]
    fn test_coplanar() {
        // every cluster of a flat grid lies in the plane through the mesh centroid
        let vb: Vec<[f32; 3]> = (0..9).map(|i| [(i % 3) as f32, (i / 3) as f32, 0.0]).collect();

        #[rustfmt::skip]
        let ib = [
            0, 1, 4, 0, 4, 3,
            1, 2, 5, 1, 5, 4,
            3, 4, 7, 3, 7, 6,
            4, 5, 8, 4, 8, 7,
        ];

        let scores = score_clusters(&ib, &vb, &[0, 1, 2, 3, 4, 5, 6, 7]);

        assert!(scores.iter().all(|s| s.score == 0.0));
    }
}
