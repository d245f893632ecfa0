//! Wireframe geometry for the scene canvas
//!
//! Meshes are plain vertex/edge lists. Groups place meshes in the world,
//! spin and orbit them, and flatten everything into projected 2D segments
//! the canvas can draw.

use ratatui::style::Color;
use std::collections::{HashMap, HashSet};
use std::f64::consts::{PI, TAU};

pub type Vec3 = [f64; 3];

const PHI: f64 = 1.618_033_988_749_895;

/// Camera distance from the origin along +z
pub const CAMERA_Z: f64 = 5.0;
/// Vertical field of view in degrees
pub const FOV_DEG: f64 = 75.0;
const NEAR: f64 = 0.1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<(usize, usize)>,
}

impl Mesh {
    /// Connects every vertex pair at the minimum pairwise distance.
    /// Works for the regular solids, whose edges are all the same length.
    pub fn from_nearest(vertices: Vec<Vec3>) -> Self {
        let mut shortest = f64::INFINITY;
        for i in 0..vertices.len() {
            for j in (i + 1)..vertices.len() {
                shortest = shortest.min(distance(vertices[i], vertices[j]));
            }
        }

        let tolerance = shortest * 1e-6;
        let mut edges = Vec::new();
        for i in 0..vertices.len() {
            for j in (i + 1)..vertices.len() {
                if (distance(vertices[i], vertices[j]) - shortest).abs() <= tolerance {
                    edges.push((i, j));
                }
            }
        }

        Self { vertices, edges }
    }

    pub fn tetrahedron(radius: f64) -> Self {
        let s = radius / 3f64.sqrt();
        Self::from_nearest(vec![
            [s, s, s],
            [s, -s, -s],
            [-s, s, -s],
            [-s, -s, s],
        ])
    }

    pub fn octahedron(radius: f64) -> Self {
        let r = radius;
        Self::from_nearest(vec![
            [r, 0.0, 0.0],
            [-r, 0.0, 0.0],
            [0.0, r, 0.0],
            [0.0, -r, 0.0],
            [0.0, 0.0, r],
            [0.0, 0.0, -r],
        ])
    }

    pub fn dodecahedron(radius: f64) -> Self {
        let inv = 1.0 / PHI;
        let mut vertices = Vec::with_capacity(20);
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    vertices.push([x, y, z]);
                }
            }
        }
        for a in [-1.0, 1.0] {
            for b in [-1.0, 1.0] {
                vertices.push([0.0, a * inv, b * PHI]);
                vertices.push([a * inv, b * PHI, 0.0]);
                vertices.push([a * PHI, 0.0, b * inv]);
            }
        }
        Self::from_nearest(scale_all(vertices, radius / 3f64.sqrt()))
    }

    /// Icosahedron, optionally subdivided and pushed onto the sphere
    pub fn icosphere(radius: f64, detail: u32) -> Self {
        let mut vertices = Vec::with_capacity(12);
        for a in [-1.0, 1.0] {
            for b in [-1.0, 1.0] {
                vertices.push([0.0, a, b * PHI]);
                vertices.push([a, b * PHI, 0.0]);
                vertices.push([b * PHI, 0.0, a]);
            }
        }
        let base = Self::from_nearest(vertices.into_iter().map(normalize).collect());
        let mut vertices = base.vertices.clone();
        let mut faces = base.faces();

        for _ in 0..detail {
            let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
            let mut midpoint = |a: usize, b: usize, vertices: &mut Vec<Vec3>| {
                let key = (a.min(b), a.max(b));
                *midpoints.entry(key).or_insert_with(|| {
                    let m = normalize(lerp(vertices[a], vertices[b], 0.5));
                    vertices.push(m);
                    vertices.len() - 1
                })
            };

            let mut next = Vec::with_capacity(faces.len() * 4);
            for [a, b, c] in faces {
                let ab = midpoint(a, b, &mut vertices);
                let bc = midpoint(b, c, &mut vertices);
                let ca = midpoint(c, a, &mut vertices);
                next.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
            }
            faces = next;
        }

        let mut edges = HashSet::new();
        for [a, b, c] in &faces {
            for (i, j) in [(*a, *b), (*b, *c), (*c, *a)] {
                edges.insert((i.min(j), i.max(j)));
            }
        }
        let mut edges: Vec<_> = edges.into_iter().collect();
        edges.sort_unstable();

        Self {
            vertices: scale_all(vertices, radius),
            edges,
        }
    }

    pub fn torus(radius: f64, tube: f64, radial_segments: usize, tubular_segments: usize) -> Self {
        let mut vertices = Vec::with_capacity(radial_segments * tubular_segments);
        for j in 0..radial_segments {
            let v = j as f64 / radial_segments as f64 * TAU;
            for i in 0..tubular_segments {
                let u = i as f64 / tubular_segments as f64 * TAU;
                vertices.push([
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                ]);
            }
        }

        let index = |j: usize, i: usize| (j % radial_segments) * tubular_segments + (i % tubular_segments);
        let mut edges = Vec::with_capacity(vertices.len() * 2);
        for j in 0..radial_segments {
            for i in 0..tubular_segments {
                edges.push((index(j, i), index(j, i + 1)));
                edges.push((index(j, i), index(j + 1, i)));
            }
        }

        Self { vertices, edges }
    }

    /// Circle in the xy plane
    pub fn ring(radius: f64, segments: usize) -> Self {
        let vertices = (0..segments)
            .map(|i| {
                let a = i as f64 / segments as f64 * TAU;
                [radius * a.cos(), radius * a.sin(), 0.0]
            })
            .collect();
        let edges = (0..segments).map(|i| (i, (i + 1) % segments)).collect();
        Self { vertices, edges }
    }

    /// Triangles formed by mutually connected vertex triples
    fn faces(&self) -> Vec<[usize; 3]> {
        let adjacent: HashSet<(usize, usize)> = self
            .edges
            .iter()
            .map(|&(a, b)| (a.min(b), a.max(b)))
            .collect();
        let linked = |a: usize, b: usize| adjacent.contains(&(a.min(b), a.max(b)));

        let n = self.vertices.len();
        let mut faces = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                if !linked(a, b) {
                    continue;
                }
                for c in (b + 1)..n {
                    if linked(b, c) && linked(a, c) {
                        faces.push([a, b, c]);
                    }
                }
            }
        }
        faces
    }
}

/// Circular path in the xy plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub base_angle: f64,
    /// Radians per second
    pub speed: f64,
    pub radius: f64,
}

impl Orbit {
    pub fn position_at(&self, t: f64) -> Vec3 {
        let a = self.base_angle + t * self.speed;
        [a.cos() * self.radius, a.sin() * self.radius, 0.0]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub mesh: Mesh,
    pub color: Color,
    pub offset: Vec3,
    pub rotation: Vec3,
    pub orbit: Option<Orbit>,
}

impl Part {
    pub fn new(mesh: Mesh, color: Color) -> Self {
        Self {
            mesh,
            color,
            offset: [0.0; 3],
            rotation: [0.0; 3],
            orbit: None,
        }
    }

    pub fn at(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn orbiting(mut self, orbit: Orbit) -> Self {
        self.offset = orbit.position_at(0.0);
        self.orbit = Some(orbit);
        self
    }
}

/// A set of parts sharing one spin and position
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub parts: Vec<Part>,
    pub position: Vec3,
    pub rotation: Vec3,
    /// Radians per second applied to the x and y rotation
    pub spin: f64,
    pub orbit: Option<Orbit>,
}

impl Group {
    pub fn new(parts: Vec<Part>, spin: f64) -> Self {
        Self {
            parts,
            position: [0.0; 3],
            rotation: [0.0; 3],
            spin,
            orbit: None,
        }
    }

    pub fn orbiting(mut self, orbit: Orbit) -> Self {
        self.position = orbit.position_at(0.0);
        self.orbit = Some(orbit);
        self
    }

    /// Advances spin by `dt` and places orbits at absolute time `t`
    pub fn advance(&mut self, dt: f64, t: f64) {
        self.rotation[0] = (self.rotation[0] + self.spin * dt) % TAU;
        self.rotation[1] = (self.rotation[1] + self.spin * dt) % TAU;
        if let Some(orbit) = self.orbit {
            self.position = orbit.position_at(t);
        }
        for part in &mut self.parts {
            if let Some(orbit) = part.orbit {
                part.offset = orbit.position_at(t);
            }
        }
    }

    /// Appends the projected edges of every part
    pub fn project_into(&self, out: &mut Vec<Segment>) {
        for part in &self.parts {
            let world: Vec<Vec3> = part
                .mesh
                .vertices
                .iter()
                .map(|&v| {
                    let local = add(rotate(v, part.rotation), part.offset);
                    add(rotate(local, self.rotation), self.position)
                })
                .collect();

            for &(a, b) in &part.mesh.edges {
                if let (Some(from), Some(to)) = (project(world[a]), project(world[b])) {
                    out.push(Segment {
                        from,
                        to,
                        color: part.color,
                    });
                }
            }
        }
    }
}

/// A projected edge in normalised screen space (y up, height spans -1..1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: Color,
}

/// Perspective projection from the fixed camera. Points behind the near
/// plane are dropped.
pub fn project(p: Vec3) -> Option<(f64, f64)> {
    let depth = CAMERA_Z - p[2];
    if depth <= NEAR {
        return None;
    }
    let focal = 1.0 / (FOV_DEG.to_radians() / 2.0).tan();
    Some((p[0] * focal / depth, p[1] * focal / depth))
}

/// Rotates around x, then y, then z
pub fn rotate(p: Vec3, r: Vec3) -> Vec3 {
    let [x, y, z] = p;
    let (sx, cx) = r[0].sin_cos();
    let (y, z) = (y * cx - z * sx, y * sx + z * cx);
    let (sy, cy) = r[1].sin_cos();
    let (x, z) = (x * cy + z * sy, -x * sy + z * cy);
    let (sz, cz) = r[2].sin_cos();
    let (x, y) = (x * cz - y * sz, x * sz + y * cz);
    [x, y, z]
}

/// 0xRRGGBB to a terminal colour
pub const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub fn angle_of(index: usize, count: usize) -> f64 {
    index as f64 / count as f64 * 2.0 * PI
}

fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn lerp(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn length(v: Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn normalize(v: Vec3) -> Vec3 {
    let len = length(v);
    [v[0] / len, v[1] / len, v[2] / len]
}

fn distance(a: Vec3, b: Vec3) -> f64 {
    length([a[0] - b[0], a[1] - b[1], a[2] - b[2]])
}

fn scale_all(vertices: Vec<Vec3>, factor: f64) -> Vec<Vec3> {
    vertices
        .into_iter()
        .map(|[x, y, z]| [x * factor, y * factor, z * factor])
        .collect()
}
