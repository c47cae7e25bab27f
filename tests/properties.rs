use std::fmt::Write;

use nalgebra::{Point2, Point3, Vector3};
use objweld::{load_str, tesselate::fan, FaceVertexRef, LoadOptions, Mesh, VertexOrder};
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

/// A random polygon soup whose every index is in range.
#[derive(Debug, Clone)]
struct Soup {
    positions: usize,
    texcoords: bool,
    normals: bool,
    faces: Vec<Vec<FaceVertexRef>>,
}

fn maybe_index(g: &mut Gen, present: bool, count: usize) -> Option<usize> {
    (present && bool::arbitrary(g)).then(|| usize::arbitrary(g) % count)
}

impl Arbitrary for Soup {
    fn arbitrary(g: &mut Gen) -> Self {
        let positions = usize::arbitrary(g) % 8 + 1;
        let texcoords = bool::arbitrary(g);
        let normals = bool::arbitrary(g);
        let faces = (0..usize::arbitrary(g) % 12)
            .map(|_| {
                (0..usize::arbitrary(g) % 4 + 3)
                    .map(|_| FaceVertexRef {
                        position: usize::arbitrary(g) % positions,
                        texcoord: maybe_index(g, texcoords, positions),
                        normal: maybe_index(g, normals, positions),
                    })
                    .collect()
            })
            .collect();
        Self {
            positions,
            texcoords,
            normals,
            faces,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let base = self.clone();
        Box::new((0..self.faces.len()).map(move |i| {
            let mut s = base.clone();
            s.faces.remove(i);
            s
        }))
    }
}

impl Soup {
    fn to_obj(&self, faces: &[Vec<FaceVertexRef>]) -> String {
        let mut src = String::new();
        for i in 0..self.positions {
            writeln!(src, "v {} {} {}", i, i * 2, i * 3).unwrap();
            if self.texcoords {
                writeln!(src, "vt {} {}", i, i + 100).unwrap();
            }
            if self.normals {
                writeln!(src, "vn {} 0 -{}", i, i).unwrap();
            }
        }
        for face in faces {
            src.push('f');
            for r in face {
                write!(src, " {}", r.position + 1).unwrap();
                match (r.texcoord, r.normal) {
                    (None, None) => {}
                    (Some(t), None) => write!(src, "/{}", t + 1).unwrap(),
                    (None, Some(n)) => write!(src, "//{}", n + 1).unwrap(),
                    (Some(t), Some(n)) => write!(src, "/{}/{}", t + 1, n + 1).unwrap(),
                }
            }
            src.push('\n');
        }
        src
    }

    fn load(&self, faces: &[Vec<FaceVertexRef>], order: VertexOrder) -> Mesh<f64, u32> {
        let options = LoadOptions {
            order,
            ..Default::default()
        };
        load_str(&self.to_obj(faces), &options).unwrap().mesh
    }

    /// Every corner after tesselation, in draw order.
    fn corners(faces: &[Vec<FaceVertexRef>]) -> Vec<FaceVertexRef> {
        faces.iter().flat_map(|f| fan(f).flatten()).collect()
    }
}

type Resolved = (Point3<f64>, Option<Point2<f64>>, Option<Vector3<f64>>);

fn resolve(mesh: &Mesh<f64, u32>, index: u32) -> Resolved {
    let i = index as usize;
    (
        mesh.position(i).unwrap(),
        mesh.texcoord(i),
        mesh.normal(i),
    )
}

/// The attributes a corner should end up with, given how [Soup::to_obj] writes them.
fn expected(soup: &Soup, r: &FaceVertexRef) -> Resolved {
    let p = r.position as f64;
    let t = r.texcoord_or_position() as f64;
    let n = r.normal_or_position() as f64;
    (
        Point3::new(p, p * 2.0, p * 3.0),
        soup.texcoords.then(|| Point2::new(t, t + 100.0)),
        soup.normals.then(|| Vector3::new(n, 0.0, -n)),
    )
}

#[quickcheck]
fn identical_corners_share_vertices(soup: Soup) -> bool {
    let mesh = soup.load(&soup.faces, VertexOrder::FirstUse);
    let corners = Soup::corners(&soup.faces);
    if corners.len() != mesh.indices.len() {
        return false;
    }
    let mut distinct = corners.clone();
    distinct.sort();
    distinct.dedup();
    if distinct.len() != mesh.vertex_count() {
        return false;
    }
    corners.iter().zip(&mesh.indices).all(|(a, ia)| {
        corners
            .iter()
            .zip(&mesh.indices)
            .all(|(b, ib)| (a == b) == (ia == ib))
    })
}

#[quickcheck]
fn indices_are_valid(soup: Soup) -> bool {
    let mesh = soup.load(&soup.faces, VertexOrder::Sorted);
    mesh.indices
        .iter()
        .all(|&i| (i as usize) < mesh.vertex_count())
}

#[quickcheck]
fn corners_resolve_to_their_attributes(soup: Soup) -> bool {
    let mesh = soup.load(&soup.faces, VertexOrder::FirstUse);
    Soup::corners(&soup.faces)
        .iter()
        .zip(&mesh.indices)
        .all(|(r, &i)| resolve(&mesh, i) == expected(&soup, r))
}

#[quickcheck]
fn face_order_changes_only_vertex_order(soup: Soup) -> TestResult {
    if soup.faces.len() < 2 {
        return TestResult::discard();
    }
    let reversed: Vec<_> = soup.faces.iter().rev().cloned().collect();
    let forward = soup.load(&soup.faces, VertexOrder::FirstUse);
    let backward = soup.load(&reversed, VertexOrder::FirstUse);

    let mut forward_tris: Vec<Vec<Resolved>> = Vec::new();
    let mut start = 0;
    for face in &soup.faces {
        let end = start + (face.len() - 2) * 3;
        forward_tris.push(
            forward.indices[start..end]
                .iter()
                .map(|&i| resolve(&forward, i))
                .collect(),
        );
        start = end;
    }
    forward_tris.reverse();
    let forward_flat: Vec<Resolved> = forward_tris.into_iter().flatten().collect();
    let backward_flat: Vec<Resolved> = backward
        .indices
        .iter()
        .map(|&i| resolve(&backward, i))
        .collect();

    TestResult::from_bool(
        forward_flat == backward_flat && forward.vertex_count() == backward.vertex_count(),
    )
}

#[quickcheck]
fn sorted_and_first_use_agree(soup: Soup) -> bool {
    let first_use = soup.load(&soup.faces, VertexOrder::FirstUse);
    let sorted = soup.load(&soup.faces, VertexOrder::Sorted);
    first_use
        .indices
        .iter()
        .zip(&sorted.indices)
        .all(|(&a, &b)| resolve(&first_use, a) == resolve(&sorted, b))
}

#[quickcheck]
fn fan_law(corners: Vec<u16>) -> TestResult {
    if corners.len() < 3 {
        return TestResult::from_bool(fan(&corners).count() == 0);
    }
    let tris: Vec<_> = fan(&corners).collect();
    TestResult::from_bool(
        tris.len() == corners.len() - 2
            && tris
                .iter()
                .enumerate()
                .all(|(i, t)| *t == [corners[0], corners[i + 1], corners[i + 2]]),
    )
}
