use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use tracing::{debug, info, warn};

use super::MeshImporter;
use crate::error::{ImportError, MeshError};
use crate::mesh::{Aabb, Mesh, Polygon, Vertex};
use crate::math::Point3;

/// Importer for ASCII PLY files.
///
/// Reads the vertex and face counts from the header, then exactly that many
/// vertex lines (`x y z`, further properties ignored) and face lines
/// (`n i0 i1 ... in-1`). The result is translated so its bounding box is
/// centered on the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlyImporter;

/// Cap on the capacity reserved from header counts.
const MAX_RESERVED: usize = 1 << 16;

/// Region of the file being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Header,
    Vertices,
    Faces,
    Done,
}

/// Counts declared by the header.
#[derive(Debug, Default)]
struct Header {
    vertices: usize,
    faces: usize,
}

impl PlyImporter {
    /// Creates a new `PlyImporter`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parses PLY text held in memory.
    ///
    /// # Errors
    ///
    /// Same as [`PlyImporter::parse`].
    pub fn parse_str(&self, text: &str) -> Result<Mesh, ImportError> {
        self.parse(Cursor::new(text))
    }

    /// Parses a PLY document from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error for binary PLY files, non-numeric tokens, missing
    /// tokens, a missing `end_header`, a file shorter than its declared
    /// counts, or faces that reference missing vertices.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Mesh, ImportError> {
        let mut region = Region::Header;
        let mut header = Header::default();
        let mut vertices: Vec<Vertex> = Vec::new();
        let mut polygons: Vec<Polygon> = Vec::new();
        let mut bounds: Option<Aabb> = None;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|source| ImportError::Io {
                path: "<stream>".into(),
                source,
            })?;

            match region {
                Region::Header => {
                    if line_no == 1 && line.trim() != "ply" {
                        warn!(first_line = %line.trim(), "PLY magic missing, reading anyway");
                    }
                    if parse_header_line(&line, line_no, &mut header)? {
                        debug!(
                            vertices = header.vertices,
                            faces = header.faces,
                            "PLY header parsed"
                        );
                        vertices.reserve(header.vertices.min(MAX_RESERVED));
                        polygons.reserve(header.faces.min(MAX_RESERVED));
                        region = next_region(Region::Header, &header, 0, 0);
                    }
                }
                Region::Vertices => {
                    let vertex = parse_vertex(&line, line_no)?;
                    match bounds.as_mut() {
                        Some(aabb) => aabb.extend(vertex.position()),
                        None => bounds = Some(Aabb::at(*vertex.position())),
                    }
                    vertices.push(vertex);
                    region = next_region(region, &header, vertices.len(), polygons.len());
                }
                Region::Faces => {
                    polygons.push(parse_face(&line, line_no, polygons.len())?);
                    region = next_region(region, &header, vertices.len(), polygons.len());
                }
                Region::Done => break,
            }
        }

        match region {
            Region::Header => return Err(ImportError::MissingEndHeader),
            Region::Vertices => {
                return Err(ImportError::UnexpectedEof {
                    region: "vertices",
                    expected: header.vertices,
                    found: vertices.len(),
                })
            }
            Region::Faces => {
                return Err(ImportError::UnexpectedEof {
                    region: "faces",
                    expected: header.faces,
                    found: polygons.len(),
                })
            }
            Region::Done => {}
        }

        let extent = match bounds {
            Some(aabb) => {
                let offset = Point3::origin() - aabb.center();
                for vertex in &mut vertices {
                    vertex.translate(&offset);
                }
                aabb.largest_dimension()
            }
            None => 0.0,
        };

        let mut mesh = Mesh::new();
        mesh.set_model(vertices, polygons, extent)?;
        info!(
            vertices = mesh.vertex_count(),
            polygons = mesh.polygon_count(),
            extent,
            "PLY mesh imported"
        );
        Ok(mesh)
    }
}

impl MeshImporter for PlyImporter {
    fn import(&self, path: &Path) -> Result<Mesh, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(BufReader::new(file)).map_err(|err| match err {
            ImportError::Io { source, .. } => ImportError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

/// Picks the region that follows once the current one has what it needs.
///
/// Empty regions are skipped, so a header declaring zero vertices goes
/// straight to the faces.
fn next_region(current: Region, header: &Header, vertices: usize, faces: usize) -> Region {
    let mut region = match current {
        Region::Header => Region::Vertices,
        other => other,
    };
    if region == Region::Vertices && vertices >= header.vertices {
        region = Region::Faces;
    }
    if region == Region::Faces && faces >= header.faces {
        region = Region::Done;
    }
    region
}

/// Applies one header line. Returns `true` on `end_header`.
fn parse_header_line(line: &str, line_no: usize, header: &mut Header) -> Result<bool, ImportError> {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("end_header") => return Ok(true),
        Some("format") => match tokens.next() {
            Some("ascii") => {}
            Some(kind @ ("binary_little_endian" | "binary_big_endian")) => {
                warn!(format = kind, "binary PLY is not supported");
                return Err(ImportError::UnsupportedFormat(format!(
                    "{kind} PLY, only ascii is supported"
                )));
            }
            Some(other) => {
                return Err(ImportError::UnsupportedFormat(format!("PLY format {other}")));
            }
            None => {
                return Err(ImportError::MissingToken {
                    line: line_no,
                    expected: "PLY format name",
                })
            }
        },
        Some("element") => match tokens.next() {
            Some("vertex") => header.vertices = next_number(&mut tokens, line_no, "vertex count")?,
            Some("face") => header.faces = next_number(&mut tokens, line_no, "face count")?,
            Some(other) => debug!(element = other, "ignoring PLY element"),
            None => {
                return Err(ImportError::MissingToken {
                    line: line_no,
                    expected: "element name",
                })
            }
        },
        _ => {}
    }
    Ok(false)
}

fn parse_vertex(line: &str, line_no: usize) -> Result<Vertex, ImportError> {
    let mut tokens = line.split_whitespace();
    let x = next_number(&mut tokens, line_no, "x coordinate")?;
    let y = next_number(&mut tokens, line_no, "y coordinate")?;
    let z = next_number(&mut tokens, line_no, "z coordinate")?;
    Ok(Vertex::new(x, y, z))
}

fn parse_face(line: &str, line_no: usize, polygon: usize) -> Result<Polygon, ImportError> {
    let mut tokens = line.split_whitespace();
    let count: usize = next_number(&mut tokens, line_no, "face vertex count")?;
    let indices = (0..count)
        .map(|_| next_number(&mut tokens, line_no, "face vertex index"))
        .collect::<Result<Vec<usize>, _>>()?;
    Polygon::new(indices).map_err(|err| match err {
        MeshError::DegeneratePolygon { len, .. } => {
            MeshError::DegeneratePolygon { polygon, len }.into()
        }
        other => other.into(),
    })
}

fn next_number<T: FromStr>(
    tokens: &mut SplitWhitespace<'_>,
    line_no: usize,
    expected: &'static str,
) -> Result<T, ImportError> {
    let token = tokens.next().ok_or(ImportError::MissingToken {
        line: line_no,
        expected,
    })?;
    token.parse().map_err(|_| ImportError::MalformedNumber {
        line: line_no,
        token: token.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;

    use super::*;

    const CUBE: &str = "ply
format ascii 1.0
comment unit cube shifted away from the origin
element vertex 8
property float x
property float y
property float z
element face 6
property list uchar int vertex_indices
end_header
10 20 30
12 20 30
12 22 30
10 22 30
10 20 34
12 20 34
12 22 34
10 22 34
4 0 3 2 1
4 4 5 6 7
4 0 1 5 4
4 2 3 7 6
4 1 2 6 5
4 3 0 4 7
";

    #[test]
    fn cube_is_centered_and_sized() {
        let mesh = PlyImporter::new().parse_str(CUBE).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.polygon_count(), 6);
        assert_relative_eq!(mesh.extent(), 4.0);

        let aabb = mesh.bounds().unwrap();
        let mid = (aabb.min.coords + aabb.max.coords) / 2.0;
        assert_relative_eq!(mid.norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(aabb.min.x, -1.0);
        assert_relative_eq!(aabb.max.z, 2.0);
    }

    #[test]
    fn referenced_vertices_have_unit_normals() {
        let mesh = PlyImporter::new().parse_str(CUBE).unwrap();
        for poly in mesh.polygons() {
            for &index in &poly.leading_triangle() {
                assert_relative_eq!(mesh.vertex(index).normal().norm(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn binary_format_is_rejected() {
        let text = CUBE.replace("format ascii 1.0", "format binary_little_endian 1.0");
        let err = PlyImporter::new().parse_str(&text).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));

        let text = CUBE.replace("format ascii 1.0", "format binary_big_endian 1.0");
        let err = PlyImporter::new().parse_str(&text).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }

    #[test]
    fn non_numeric_coordinate_is_fatal() {
        let text = CUBE.replace("12 22 30", "12 abc 30");
        let err = PlyImporter::new().parse_str(&text).unwrap_err();
        match err {
            ImportError::MalformedNumber { line, token } => {
                assert_eq!(line, 13);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_face_index_is_fatal() {
        let text = CUBE.replace("4 4 5 6 7", "4 4 5 x 7");
        let err = PlyImporter::new().parse_str(&text).unwrap_err();
        assert!(matches!(err, ImportError::MalformedNumber { line: 20, .. }));
    }

    #[test]
    fn short_face_line_is_fatal() {
        let text = CUBE.replace("4 4 5 6 7", "4 4 5 6");
        let err = PlyImporter::new().parse_str(&text).unwrap_err();
        assert!(matches!(err, ImportError::MissingToken { line: 20, .. }));
    }

    #[test]
    fn face_index_beyond_vertices_is_fatal() {
        let text = CUBE.replace("4 4 5 6 7", "4 4 5 6 8");
        let err = PlyImporter::new().parse_str(&text).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Mesh(MeshError::VertexIndexOutOfRange { index: 8, .. })
        ));
    }

    #[test]
    fn two_vertex_face_is_fatal() {
        let text = CUBE.replace("4 1 2 6 5", "2 1 2");
        let err = PlyImporter::new().parse_str(&text).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Mesh(MeshError::DegeneratePolygon { polygon: 4, len: 2 })
        ));
    }

    #[test]
    fn truncated_file_is_fatal() {
        let text: String = CUBE.lines().take(15).collect::<Vec<_>>().join("\n");
        let err = PlyImporter::new().parse_str(&text).unwrap_err();
        assert!(matches!(
            err,
            ImportError::UnexpectedEof {
                region: "vertices",
                expected: 8,
                found: 5
            }
        ));
    }

    #[test]
    fn huge_declared_count_is_a_truncation_error() {
        let text = "ply\nformat ascii 1.0\nelement vertex 1000000000000000000\n\
                    element face 0\nend_header\n0 0 0\n";
        let err = PlyImporter::new().parse_str(text).unwrap_err();
        assert!(matches!(
            err,
            ImportError::UnexpectedEof {
                region: "vertices",
                expected: 1_000_000_000_000_000_000,
                found: 1,
            }
        ));
    }

    #[test]
    fn missing_end_header_is_fatal() {
        let text = "ply\nformat ascii 1.0\nelement vertex 0\n";
        let err = PlyImporter::new().parse_str(text).unwrap_err();
        assert!(matches!(err, ImportError::MissingEndHeader));
    }

    #[test]
    fn extra_vertex_properties_and_trailing_lines_are_ignored() {
        let text = "ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
property float nx
element face 1
property list uchar int vertex_indices
end_header
0 0 0 9
2 0 0 9
0 2 0 9
3 0 1 2
trailing garbage that is never read
";
        let mesh = PlyImporter::new().parse_str(text).unwrap();
        assert_eq!(mesh.polygon_count(), 1);
        assert_relative_eq!(mesh.extent(), 2.0);
        assert_relative_eq!(mesh.vertex(0).position().x, -1.0);
    }

    #[test]
    fn mixed_polygon_sizes() {
        let text = "ply
format ascii 1.0
element vertex 5
element face 2
end_header
0 0 0
1 0 0
1 1 0
0 1 0
0.5 2 0
3 0 1 2
5 0 1 2 4 3
";
        let mesh = PlyImporter::new().parse_str(text).unwrap();
        assert_eq!(mesh.polygon(0).len(), 3);
        assert_eq!(mesh.polygon(1).len(), 5);
    }

    #[test]
    fn import_reads_from_disk() {
        let mut file = NamedTempFile::with_suffix(".ply").unwrap();
        file.write_all(CUBE.as_bytes()).unwrap();
        let mesh = PlyImporter::new().import(file.path()).unwrap();
        assert_eq!(mesh.polygon_count(), 6);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = PlyImporter::new()
            .import(Path::new("/definitely/not/here.ply"))
            .unwrap_err();
        match err {
            ImportError::Io { path, .. } => assert_eq!(path, Path::new("/definitely/not/here.ply")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failed_reimport_keeps_previous_mesh() {
        let mut good = NamedTempFile::with_suffix(".ply").unwrap();
        good.write_all(CUBE.as_bytes()).unwrap();
        let mut bad = NamedTempFile::with_suffix(".ply").unwrap();
        bad.write_all(CUBE.replace("ascii", "binary_big_endian").as_bytes())
            .unwrap();

        let importer = PlyImporter::new();
        let mut mesh = Mesh::new();
        importer.import_into(&mut mesh, good.path()).unwrap();
        assert!(importer.import_into(&mut mesh, bad.path()).is_err());
        assert_eq!(mesh.polygon_count(), 6);
    }
}
