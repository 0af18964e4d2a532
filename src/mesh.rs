//! Triangle meshes and OBJ loading.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use crate::error::{LoadError, TextureError};
use crate::material::Material;
use crate::math::{Vec2, Vec3};
use crate::texture::Texture;
use crate::triangle::{Face, Vertex};

/// Scale and offset applied to positions at load time:
/// `position * scale + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f64,
    pub translation: Vec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translation: Vec3::ZERO,
        }
    }
}

impl Placement {
    pub fn new(scale: f64, translation: Vec3) -> Self {
        Self { scale, translation }
    }

    #[inline]
    pub fn apply(&self, position: Vec3) -> Vec3 {
        position * self.scale + self.translation
    }
}

/// A list of textured faces. Built once and drawn every frame.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// A square of side `size` centered on the origin in the XY plane, split
    /// along its diagonal into two triangles facing +Z.
    pub fn quad(size: f64, material: Arc<Material>) -> Self {
        let h = size / 2.0;
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let corner = |x: f64, y: f64, s: f64, t: f64| {
            Vertex::new(Vec3::new(x, y, 0.0), Vec2::new(s, t), normal)
        };
        let bl = corner(-h, -h, 0.0, 0.0);
        let br = corner(h, -h, 1.0, 0.0);
        let tr = corner(h, h, 1.0, 1.0);
        let tl = corner(-h, h, 0.0, 1.0);

        Self::new(vec![
            Face::new([bl, br, tr], material.clone()),
            Face::new([bl, tr, tl], material),
        ])
    }

    /// The built-in demo scene: a checkered quad of side `size`.
    pub fn checker_quad(size: f64) -> Result<Self, TextureError> {
        let texture = Texture::checker(64, 8, 0xFFE0E0E0, 0xFF404040)?;
        Ok(Self::quad(size, Material::shared("checker", texture)))
    }

    /// Return a copy of this mesh with `placement` applied to every position.
    pub fn placed(&self, placement: Placement) -> Self {
        let faces = self
            .faces
            .iter()
            .map(|face| {
                let mut vertices = *face.vertices();
                for v in &mut vertices {
                    v.position = placement.apply(v.position);
                }
                Face::new(vertices, face.material().clone())
            })
            .collect();
        Self::new(faces)
    }

    /// Load an OBJ file and its MTL library.
    ///
    /// Every face needs a material with a diffuse texture (`map_Kd`) and
    /// texture coordinates. Texture paths are resolved relative to the OBJ
    /// file's directory. Missing normals default to zero.
    pub fn from_obj<P: AsRef<Path>>(path: P, placement: Placement) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let (models, obj_materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )?;
        let obj_materials = obj_materials?;

        // Textures are decoded once per material, on first use.
        let mut materials: HashMap<usize, Arc<Material>> = HashMap::new();
        let mut faces = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            if mesh.indices.is_empty() {
                continue;
            }

            let material_id = mesh
                .material_id
                .filter(|&id| id < obj_materials.len())
                .ok_or_else(|| LoadError::MissingMaterial(model.name.clone()))?;
            let material = match materials.get(&material_id) {
                Some(material) => material.clone(),
                None => {
                    let material = load_material(&obj_materials[material_id], base_dir)?;
                    materials.insert(material_id, material.clone());
                    material
                }
            };

            if mesh.texcoords.is_empty() {
                return Err(LoadError::MissingTexCoords(model.name.clone()));
            }

            let vertex = |index: u32| -> Vertex {
                let i = index as usize;
                let position = Vec3::new(
                    mesh.positions[3 * i] as f64,
                    mesh.positions[3 * i + 1] as f64,
                    mesh.positions[3 * i + 2] as f64,
                );
                let tex_coord = Vec2::new(
                    mesh.texcoords.get(2 * i).copied().unwrap_or(0.0) as f64,
                    mesh.texcoords.get(2 * i + 1).copied().unwrap_or(0.0) as f64,
                );
                let normal = if mesh.normals.len() >= 3 * i + 3 {
                    Vec3::new(
                        mesh.normals[3 * i] as f64,
                        mesh.normals[3 * i + 1] as f64,
                        mesh.normals[3 * i + 2] as f64,
                    )
                } else {
                    Vec3::ZERO
                };
                Vertex::new(placement.apply(position), tex_coord, normal)
            };

            let mut skipped = 0;
            for triangle in mesh.indices.chunks(3) {
                let vertices: Vec<Vertex> = triangle.iter().map(|&i| vertex(i)).collect();
                match Face::from_slice(&vertices, material.clone()) {
                    Ok(face) => faces.push(face),
                    Err(_) => skipped += 1,
                }
            }
            if skipped > 0 {
                warn!("{}: skipped {} incomplete faces", model.name, skipped);
            }
        }

        info!(
            "loaded {} faces from {} ({} materials)",
            faces.len(),
            path.display(),
            materials.len()
        );
        Ok(Self::new(faces))
    }
}

fn load_material(material: &tobj::Material, base_dir: &Path) -> Result<Arc<Material>, LoadError> {
    let texture_name = material
        .diffuse_texture
        .as_deref()
        .ok_or_else(|| LoadError::MissingTexture(material.name.clone()))?;
    let texture_path = base_dir.join(texture_name);
    let texture = Texture::from_file(&texture_path).map_err(|source| LoadError::Texture {
        path: texture_path.clone(),
        source,
    })?;
    Ok(Material::shared(material.name.clone(), texture))
}
