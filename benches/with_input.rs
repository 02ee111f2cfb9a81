use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use meshopt_overdraw::vertex::cache::analyze_vertex_cache;
use meshopt_overdraw::{PositionStream, build_clusters, optimize_overdraw, optimize_overdraw_in_place};

use std::fmt::Debug;
use std::path::Path;

#[derive(Clone, Copy, Default)]
#[repr(C)]
struct Vertex {
    p: [f32; 3],
    n: [f32; 3],
    t: [f32; 2],
}

#[derive(Clone, Default)]
struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn load<P>(path: P) -> Result<Mesh, tobj::LoadError>
    where
        P: AsRef<Path> + Clone + Debug,
    {
        let (models, _materials) = tobj::load_obj(
            path.clone(),
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut result = Mesh::default();

        for model in models.iter() {
            let mesh = &model.mesh;
            assert!(mesh.positions.len() % 3 == 0);

            let base = result.vertices.len() as u32;

            for i in 0..mesh.positions.len() / 3 {
                let mut vertex = Vertex::default();

                vertex.p.copy_from_slice(&mesh.positions[3 * i..3 * (i + 1)]);

                if !mesh.normals.is_empty() {
                    vertex.n.copy_from_slice(&mesh.normals[3 * i..3 * (i + 1)]);
                }

                if !mesh.texcoords.is_empty() {
                    vertex.t.copy_from_slice(&mesh.texcoords[2 * i..2 * (i + 1)]);
                }

                result.vertices.push(vertex);
            }

            result.indices.extend(mesh.indices.iter().map(|i| base + i));
        }

        Ok(result)
    }

    pub fn sphere(segments: u32, rings: u32) -> Mesh {
        let mut result = Mesh::default();

        for r in 0..=rings {
            let theta = std::f32::consts::PI * r as f32 / rings as f32;

            for s in 0..=segments {
                let phi = 2.0 * std::f32::consts::PI * s as f32 / segments as f32;
                let n = [theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()];

                result.vertices.push(Vertex {
                    p: n,
                    n,
                    t: [s as f32 / segments as f32, r as f32 / rings as f32],
                });
            }
        }

        for r in 0..rings {
            for s in 0..segments {
                let a = r * (segments + 1) + s;
                let b = a + 1;
                let c = a + segments + 1;
                let d = c + 1;

                result.indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        result
    }
}

fn with_input(c: &mut Criterion) {
    let (input_name, mesh) = match std::env::var("MESHOPT_BENCH_MESH") {
        Ok(path) => {
            let mesh = Mesh::load(Path::new(&path)).unwrap();
            (path, mesh)
        }
        Err(_) => ("sphere".to_string(), Mesh::sphere(512, 256)),
    };

    const CACHE_SIZE: u32 = 16;

    let positions = PositionStream::from_slice(&mesh.vertices);

    let mut group = c.benchmark_group("overdraw");
    group.throughput(Throughput::Elements((mesh.indices.len() / 3) as u64));

    group.bench_with_input(BenchmarkId::new("build_clusters", &input_name), &mesh, |b, mesh| {
        b.iter(|| build_clusters(&mesh.indices, mesh.vertices.len(), CACHE_SIZE, 1.05));
    });

    group.bench_with_input(BenchmarkId::new("optimize_overdraw", &input_name), &mesh, |b, mesh| {
        let mut result = vec![0; mesh.indices.len()];

        b.iter(|| optimize_overdraw(&mut result, &mesh.indices, &positions, CACHE_SIZE, 1.05));
    });

    group.bench_with_input(
        BenchmarkId::new("optimize_overdraw_worst_case", &input_name),
        &mesh,
        |b, mesh| {
            const THRESHOLD: f32 = 3.0; // Use worst-case ACMR threshold so that overdraw optimizer can sort *all* triangles
            let mut result = vec![0; mesh.indices.len()];

            b.iter(|| optimize_overdraw(&mut result, &mesh.indices, &positions, CACHE_SIZE, THRESHOLD));
        },
    );

    group.bench_with_input(
        BenchmarkId::new("optimize_overdraw_in_place", &input_name),
        &mesh,
        |b, mesh| {
            b.iter(|| {
                let mut result = mesh.indices.clone(); // Must copy on every iteration because it's also an input
                optimize_overdraw_in_place(&mut result, &positions, CACHE_SIZE, 1.05);
            });
        },
    );

    group.bench_with_input(
        BenchmarkId::new("analyze_vertex_cache", &input_name),
        &mesh,
        |b, mesh| {
            b.iter(|| analyze_vertex_cache(&mesh.indices, mesh.vertices.len(), CACHE_SIZE));
        },
    );

    group.finish();
}

criterion_group!(benches, with_input);
criterion_main!(benches);
