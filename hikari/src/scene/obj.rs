use std::{path::Path, time::Instant};

use itertools::Itertools;
use thiserror::Error;

use crate::{
    accel::AccelSettings,
    hikari_info, hikari_warn,
    math::{Point3, Vec3},
    shapes::{Group, Shape, ShapeKind},
};

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("Failed to read OBJ: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line {line}: invalid number '{text}'")]
    Number { line: usize, text: String },
    #[error("Line {line}: expected {expected} values, got {got}")]
    Arity {
        line: usize,
        expected: usize,
        got: usize,
    },
    #[error("Line {line}: vertex {index} doesn't exist")]
    Vertex { line: usize, index: usize },
    #[error("Line {line}: normal {index} doesn't exist")]
    Normal { line: usize, index: usize },
    #[error("Line {line}: face needs at least three vertices")]
    Face { line: usize },
}

/// Triangles under an OBJ group name. The unnamed default group is empty-named.
#[derive(Clone, Debug)]
pub struct ObjGroup {
    pub name: String,
    pub triangles: Vec<Shape>,
}

/// Parsed contents of a Wavefront OBJ file.
#[derive(Clone, Debug)]
pub struct ObjModel {
    pub vertices: Vec<Point3>,
    pub normals: Vec<Vec3>,
    pub groups: Vec<ObjGroup>,
    /// Lines that weren't understood
    pub ignored: usize,
}

impl ObjModel {
    /// Returns the triangles of the group `name`.
    pub fn group(&self, name: &str) -> Option<&[Shape]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.triangles.as_slice())
    }

    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(|g| g.triangles.len()).sum()
    }

    /// Converts this model into a group with a child group per non-empty OBJ group.
    pub fn into_shape(self, settings: &AccelSettings) -> Shape {
        let children = self
            .groups
            .into_iter()
            .filter(|g| !g.triangles.is_empty())
            .map(|g| Shape::new(ShapeKind::Group(Group::new(g.triangles, settings))));
        Shape::new(ShapeKind::Group(Group::new(children, settings)))
    }
}

/// Loads the OBJ at `path`.
pub fn load(path: &Path) -> Result<ObjModel, ObjError> {
    let load_start = Instant::now();
    let source = std::fs::read_to_string(path)?;
    let model = parse(&source)?;
    hikari_info!(
        "OBJ: Parsed {} triangles from '{}' in {:.2}s",
        model.triangle_count(),
        path.to_string_lossy(),
        load_start.elapsed().as_secs_f32()
    );
    if model.ignored > 0 {
        hikari_warn!("OBJ: Ignored {} lines", model.ignored);
    }
    Ok(model)
}

/// Parses OBJ `source`. Supports vertices, vertex normals, polygonal faces and groups.
pub fn parse(source: &str) -> Result<ObjModel, ObjError> {
    let mut model = ObjModel {
        vertices: Vec::new(),
        normals: Vec::new(),
        groups: vec![ObjGroup {
            name: String::new(),
            triangles: Vec::new(),
        }],
        ignored: 0,
    };

    for (i, text) in source.lines().enumerate() {
        let line = i + 1;
        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let [x, y, z] = parse_floats(line, tokens)?;
                model.vertices.push(Point3::new(x, y, z));
            }
            Some("vn") => {
                let [x, y, z] = parse_floats(line, tokens)?;
                model.normals.push(Vec3::new(x, y, z));
            }
            Some("f") => {
                let corners = tokens
                    .map(|t| parse_corner(line, t, &model))
                    .collect::<Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(ObjError::Face { line });
                }
                let group = model.groups.last_mut().map(|g| &mut g.triangles);
                if let Some(triangles) = group {
                    // Fan around the first corner
                    let first = corners[0];
                    for (b, c) in corners[1..].iter().tuple_windows() {
                        triangles.push(triangle(first, *b, *c));
                    }
                }
            }
            Some("g") => {
                let name = tokens.join(" ");
                model.groups.push(ObjGroup {
                    name,
                    triangles: Vec::new(),
                });
            }
            Some(t) if t.starts_with('#') => (),
            None => (),
            Some(_) => model.ignored += 1,
        }
    }

    Ok(model)
}

// Resolved position and optional normal of a face corner
type Corner = (Point3, Option<Vec3>);

fn triangle(a: Corner, b: Corner, c: Corner) -> Shape {
    match (a.1, b.1, c.1) {
        (Some(na), Some(nb), Some(nc)) => Shape::smooth_triangle(a.0, b.0, c.0, na, nb, nc),
        _ => Shape::triangle(a.0, b.0, c.0),
    }
}

fn parse_floats<'a>(
    line: usize,
    tokens: impl Iterator<Item = &'a str>,
) -> Result<[f64; 3], ObjError> {
    let values = tokens
        .map(|t| {
            t.parse::<f64>().map_err(|_| ObjError::Number {
                line,
                text: t.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    match values.as_slice() {
        // A trailing w is allowed and ignored
        [x, y, z] | [x, y, z, _] => Ok([*x, *y, *z]),
        _ => Err(ObjError::Arity {
            line,
            expected: 3,
            got: values.len(),
        }),
    }
}

// `v`, `v/vt`, `v/vt/vn` or `v//vn`
fn parse_corner(line: usize, token: &str, model: &ObjModel) -> Result<Corner, ObjError> {
    let mut parts = token.split('/');
    let v = parse_index(line, parts.next().unwrap_or(""))?;
    let vertex = v
        .checked_sub(1)
        .and_then(|i| model.vertices.get(i))
        .ok_or(ObjError::Vertex { line, index: v })?;

    let normal = match parts.nth(1) {
        Some(n) if !n.is_empty() => {
            let n = parse_index(line, n)?;
            let normal = n
                .checked_sub(1)
                .and_then(|i| model.normals.get(i))
                .ok_or(ObjError::Normal { line, index: n })?;
            Some(*normal)
        }
        _ => None,
    };

    Ok((*vertex, normal))
}

fn parse_index(line: usize, text: &str) -> Result<usize, ObjError> {
    text.parse::<usize>().map_err(|_| ObjError::Number {
        line,
        text: text.to_string(),
    })
}
