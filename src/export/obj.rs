//! Wavefront OBJ export.
//!
//! Writes the book as it looks in the current frame: every page face bent,
//! placed at its depth and angle, and posed with the whole book. Each face is
//! its own group so renderers can swap materials per side.

use crate::book::FlippingBook;
use crate::error::{BookError, Result};
use crate::mesher::{Mesh, PageGeometry};
use crate::types::{PageFace, PageRole, SurfaceMaterial};
use std::fmt::Write;

/// Material name for one face of a page role.
fn material_name(role: PageRole, face: PageFace) -> &'static str {
    match (role.is_cover(), face) {
        (true, PageFace::Front) => "leather",
        (true, PageFace::Back) => "leather_inside",
        (false, _) => "parchment",
    }
}

/// Export the current frame to OBJ format.
/// Returns (obj_content, mtl_content) as strings.
pub fn export_obj(book: &FlippingBook, name: &str) -> Result<(String, String)> {
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(BookError::Export(format!("invalid object name '{}'", name)));
    }

    let config = book.config();
    let frame = book.frame();
    let book_transform = frame.pose.transform();

    // Pages that have not ticked yet are drawn flat.
    let flat = PageGeometry::new(config);

    let mut groups: Vec<(String, &'static str, Mesh)> = Vec::new();
    for page in &frame.pages {
        let geometry = book.geometry(page.index).unwrap_or(&flat);
        let transform = book_transform * page.transform();
        for face in PageFace::ALL {
            let mut mesh = geometry.face_mesh(face, config.face_offset);
            mesh.transform(&transform);
            let group = format!("page{}_{}", page.index, face_label(face));
            groups.push((group, material_name(page.role, face), mesh));
        }
    }

    let total_verts: usize = groups.iter().map(|(_, _, m)| m.vertex_count()).sum();
    let total_tris: usize = groups.iter().map(|(_, _, m)| m.triangle_count()).sum();

    let mut obj = String::with_capacity(256 + total_verts * 120 + total_tris * 40);
    let mut mtl = String::with_capacity(512);

    writeln!(obj, "# Flipping Book OBJ Export")?;
    writeln!(obj, "# Page: {} of {}", frame.current_page, frame.page_count)?;
    writeln!(obj, "# Vertices: {}", total_verts)?;
    writeln!(obj, "# Triangles: {}", total_tris)?;
    writeln!(obj)?;
    writeln!(obj, "mtllib {}.mtl", name)?;
    writeln!(obj)?;
    writeln!(obj, "o {}", name)?;
    writeln!(obj)?;

    // OBJ has global pools: all v, then vt, then vn
    for (_, _, mesh) in &groups {
        for vertex in &mesh.vertices {
            writeln!(
                obj,
                "v {} {} {}",
                vertex.position[0], vertex.position[1], vertex.position[2]
            )?;
        }
    }
    writeln!(obj)?;

    for (_, _, mesh) in &groups {
        for vertex in &mesh.vertices {
            writeln!(obj, "vt {} {}", vertex.uv[0], vertex.uv[1])?;
        }
    }
    writeln!(obj)?;

    for (_, _, mesh) in &groups {
        for vertex in &mesh.vertices {
            writeln!(
                obj,
                "vn {} {} {}",
                vertex.normal[0], vertex.normal[1], vertex.normal[2]
            )?;
        }
    }
    writeln!(obj)?;

    let mut vertex_offset: usize = 0;
    for (group, material, mesh) in &groups {
        writeln!(obj, "g {}", group)?;
        writeln!(obj, "usemtl {}", material)?;
        for triangle in mesh.indices.chunks_exact(3) {
            let i0 = triangle[0] as usize + vertex_offset + 1;
            let i1 = triangle[1] as usize + vertex_offset + 1;
            let i2 = triangle[2] as usize + vertex_offset + 1;
            writeln!(
                obj,
                "f {}/{}/{} {}/{}/{} {}/{}/{}",
                i0, i0, i0, i1, i1, i1, i2, i2, i2
            )?;
        }
        vertex_offset += mesh.vertex_count();
    }

    writeln!(mtl, "# Flipping Book Materials")?;
    let mut written: Vec<&str> = Vec::new();
    for (_, material, _) in &groups {
        if written.contains(material) {
            continue;
        }
        written.push(*material);
        let params = match *material {
            "leather" => PageRole::FrontCover.material(PageFace::Front),
            "leather_inside" => PageRole::FrontCover.material(PageFace::Back),
            _ => SurfaceMaterial::PARCHMENT,
        };
        write_material(&mut mtl, material, &params)?;
    }

    Ok((obj, mtl))
}

fn face_label(face: PageFace) -> &'static str {
    match face {
        PageFace::Front => "front",
        PageFace::Back => "back",
    }
}

fn write_material(mtl: &mut String, name: &str, material: &SurfaceMaterial) -> Result<()> {
    let [r, g, b, a] = material.color;
    // Rougher surfaces get a wider, dimmer highlight
    let shininess = (1.0 - material.roughness) * 100.0;
    let specular = 0.04 + material.metalness * 0.5;

    writeln!(mtl)?;
    writeln!(mtl, "newmtl {}", name)?;
    writeln!(mtl, "Ka {} {} {}", r, g, b)?;
    writeln!(mtl, "Kd {} {} {}", r, g, b)?;
    writeln!(mtl, "Ks {} {} {}", specular, specular, specular)?;
    writeln!(mtl, "Ns {}", shininess)?;
    writeln!(mtl, "d {}", a)?;
    writeln!(mtl, "illum 2")?;
    Ok(())
}

/// OBJ and MTL text for writing to files.
pub struct ObjExport {
    pub obj: String,
    pub mtl: String,
}

impl ObjExport {
    pub fn from_book(book: &FlippingBook, name: &str) -> Result<Self> {
        let (obj, mtl) = export_obj(book, name)?;
        Ok(Self { obj, mtl })
    }
}
