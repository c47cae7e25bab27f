use std::path::PathBuf;

use objweld::{dump::Summary, load_path, LoadOptions, Loaded, Mesh, VertexOrder};

fn strip_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/strip.obj")
}

const STRIP_FIRST_USE: &str = "\
vertices 6
0 0 0
1 0 0
1 1 0
0 1 0
2 0 0
2 1 0
texcoords 6
0 0
0.5 0
0.5 1
0 1
1 0
1 1
normals 6
0 0 1
0 0 1
0 0 1
0 0 1
0 0 1
0 0 1
indices 4
0 1 2
0 2 3
1 4 5
1 5 2
";

#[test]
fn strip_first_use() {
    let loaded: Loaded = load_path(strip_path(), &LoadOptions::default()).unwrap();
    assert!(loaded.warnings.is_empty());
    let mesh = loaded.mesh;
    assert_eq!(mesh.to_string(), STRIP_FIRST_USE);
    assert_eq!(
        Summary::from(&mesh).to_string(),
        "6 vertices, 6 texcoords, 6 normals, 4 faces"
    );
}

#[test]
fn strip_sorted() {
    let options = LoadOptions {
        order: VertexOrder::Sorted,
        ..Default::default()
    };
    let mesh: Mesh<f64, u16> = load_path(strip_path(), &options).unwrap().into_mesh();
    assert_eq!(mesh.indices, [0, 1, 4, 0, 4, 3, 1, 2, 5, 1, 5, 4]);
    assert_eq!(
        mesh.vertices,
        [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 2.0, 1.0, 0.0]
    );
}

#[test]
fn short_vertex_does_not_crash() {
    let src = "v 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
    let loaded: Loaded = objweld::load_str(src, &LoadOptions::default()).unwrap();
    assert_eq!(loaded.warnings.len(), 1);
    let mesh = loaded.mesh;
    assert_eq!(mesh.position(0).map(|p| p.z), Some(0.0));
    assert_eq!(mesh.triangle_count(), 1);
}
