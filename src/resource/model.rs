use std::collections::HashMap;
use std::fs;

use anyhow::{anyhow, Context, Result};
use glam::Vec3;

use super::{Loadable, Resource, ResourceManager};

/// Number of floats per vertex: position followed by normal.
const STRIDE: usize = 6;

/// Triangle mesh loaded from a Wavefront OBJ file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    name: String,
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Model {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Resource for Model {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Loadable for Model {
    type Args = ();

    fn load(&mut self, name: &str, _: (), resources: &ResourceManager) -> Result<()> {
        let path = resources.resolve(name);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("unable to read model {}", path.display()))?;
        let (vertices, indices) =
            parse_obj(&text).with_context(|| format!("invalid model {}", path.display()))?;
        self.name = name.to_string();
        self.vertices = vertices;
        self.indices = indices;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Corner {
    position: usize,
    normal: Option<usize>,
}

/// Parses OBJ text into interleaved position/normal vertices and triangle
/// indices. Polygons are fan-triangulated; missing normals are generated.
pub fn parse_obj(text: &str) -> Result<(Vec<f32>, Vec<u32>)> {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut polygons: Vec<Vec<(i64, i64)>> = Vec::new();

    for (number, line) in text.lines().enumerate().map(|(i, l)| (i + 1, l.trim())) {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => positions
                .push(vec3(parts).with_context(|| format!("bad vertex on line {number}"))?),
            Some("vn") => normals
                .push(vec3(parts).with_context(|| format!("bad normal on line {number}"))?),
            Some("f") => polygons
                .push(face(parts).with_context(|| format!("bad face on line {number}"))?),
            _ => {}
        }
    }

    if positions.is_empty() {
        return Err(anyhow!("model does not define any vertices"));
    }

    let mut lookup: HashMap<Corner, u32> = HashMap::new();
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut generated = false;

    for polygon in &polygons {
        for i in 1..polygon.len() - 1 {
            for &(v, vn) in [polygon[0], polygon[i], polygon[i + 1]].iter() {
                let corner = Corner {
                    position: resolve_index(v, positions.len())
                        .ok_or_else(|| anyhow!("vertex index {v} out of range"))?,
                    normal: resolve_index(vn, normals.len()),
                };
                generated |= corner.normal.is_none();
                let next = (vertices.len() / STRIDE) as u32;
                let index = *lookup.entry(corner).or_insert_with(|| {
                    let normal = corner.normal.map_or(Vec3::ZERO, |n| normals[n]);
                    vertices.extend_from_slice(&positions[corner.position].to_array());
                    vertices.extend_from_slice(&normal.to_array());
                    next
                });
                indices.push(index);
            }
        }
    }

    if generated {
        generate_normals(&mut vertices, &indices);
    }
    Ok((vertices, indices))
}

fn vec3<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Vec3> {
    let mut next = || -> Result<f32> {
        Ok(parts
            .next()
            .ok_or_else(|| anyhow!("missing component"))?
            .parse::<f32>()?)
    };
    Ok(Vec3::new(next()?, next()?, next()?))
}

/// Reads `v`, `v/vt` , `v//vn` or `v/vt/vn` corners; zero marks "absent".
fn face<'a>(parts: impl Iterator<Item = &'a str>) -> Result<Vec<(i64, i64)>> {
    let corners = parts
        .map(|corner| {
            let mut fields = corner.split('/');
            let v = fields
                .next()
                .ok_or_else(|| anyhow!("missing vertex index"))?
                .parse::<i64>()?;
            let vn = fields
                .nth(1)
                .filter(|field| !field.is_empty())
                .map(str::parse::<i64>)
                .transpose()?
                .unwrap_or(0);
            Ok((v, vn))
        })
        .collect::<Result<Vec<_>>>()?;
    if corners.len() < 3 {
        return Err(anyhow!("faces need at least three corners"));
    }
    Ok(corners)
}

/// OBJ indices are one-based; negative values count back from the end.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let resolved = match index {
        0 => return None,
        i if i > 0 => i - 1,
        i => len + i,
    };
    (0..len).contains(&resolved).then_some(resolved as usize)
}

fn generate_normals(vertices: &mut [f32], indices: &[u32]) {
    let position = |vertices: &[f32], i: usize| Vec3::from_slice(&vertices[i * STRIDE..]);
    let mut sums = vec![Vec3::ZERO; vertices.len() / STRIDE];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let (pa, pb, pc) = (
            position(vertices, a),
            position(vertices, b),
            position(vertices, c),
        );
        let normal = (pb - pa).cross(pc - pa).normalize_or_zero();
        for i in [a, b, c] {
            sums[i] += normal;
        }
    }

    for (i, sum) in sums.into_iter().enumerate() {
        let slot = &mut vertices[i * STRIDE + 3..i * STRIDE + 6];
        let existing = Vec3::from_slice(slot);
        if existing == Vec3::ZERO {
            slot.copy_from_slice(&sum.normalize_or_zero().to_array());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn quad_is_fan_triangulated() {
        let (vertices, indices) =
            parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(vertices.len(), 4 * STRIDE);
    }

    #[test]
    fn missing_normals_are_generated() {
        let (vertices, _) = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        for chunk in vertices.chunks_exact(STRIDE) {
            assert_eq!(Vec3::from_slice(&chunk[3..]), Vec3::Z);
        }
    }

    #[test]
    fn explicit_normals_and_negative_indices() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 -1\nf -3//1 -2//1 -1//1\n";
        let (vertices, indices) = parse_obj(obj).unwrap();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(Vec3::from_slice(&vertices[3..6]), Vec3::NEG_Z);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_obj("# nothing here\n").is_err());
        assert!(parse_obj("v 0 0 0\nf 1 2 3\n").is_err());
        assert!(parse_obj("v 0 0\n").is_err());
    }

    #[test]
    fn loads_through_the_cache() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("tri.obj"),
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();
        let resources = ResourceManager::new(dir.path());
        let model = resources.get::<Model>("tri.obj", ()).unwrap();
        assert_eq!(model.vertex_count(), 3);
        assert_eq!(model.triangle_count(), 1);
    }
}
