/// Parser for the ASCII mesh interchange format
///
/// A mesh file lists vertices, then colored triangles by vertex index:
///
/// ```text
/// mesh
/// v -1.0 -1.0 -1.0
/// v  1.0 -1.0 -1.0
/// v  0.0  1.0 -1.0
/// t 0 1 2 255 0 0
/// endmesh
/// ```
use nalgebra::Point3;
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, u32 as dec_u32, u8 as dec_u8},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::geometry::{Color, Model, Triangle};

/// Parse a mesh description, validating triangle indices against the vertex
/// count before the model is constructed.
pub fn parse_mesh(input: &str) -> Result<Model, String> {
    let (vertices, triangles) = match parse_mesh_impl(input) {
        Ok((_, parsed)) => parsed,
        Err(e) => return Err(format!("Failed to parse mesh: {:?}", e)),
    };

    for (n, triangle) in triangles.iter().enumerate() {
        for &index in &triangle.vertex_indices {
            if index >= vertices.len() {
                return Err(format!(
                    "Triangle {} references vertex {} but the mesh has {} vertices",
                    n,
                    index,
                    vertices.len()
                ));
            }
        }
    }

    Ok(Model::new(vertices, triangles))
}

fn parse_mesh_impl(input: &str) -> IResult<&str, (Vec<Point3<f32>>, Vec<Triangle>)> {
    let (input, _) = preceded(multispace0, tag("mesh"))(input)?;
    let (input, vertices) = many0(parse_vertex)(input)?;
    let (input, triangles) = many0(parse_triangle)(input)?;
    let (input, _) = preceded(multispace0, tag("endmesh"))(input)?;
    Ok((input, (vertices, triangles)))
}

fn parse_vertex(input: &str) -> IResult<&str, Point3<f32>> {
    let (input, _) = preceded(multispace1, tag("v"))(input)?;
    let (input, x) = preceded(multispace1, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn parse_triangle(input: &str) -> IResult<&str, Triangle> {
    let (input, _) = preceded(multispace1, tag("t"))(input)?;
    let (input, v0) = preceded(multispace1, dec_u32)(input)?;
    let (input, v1) = preceded(multispace1, dec_u32)(input)?;
    let (input, v2) = preceded(multispace1, dec_u32)(input)?;
    let (input, r) = preceded(multispace1, dec_u8)(input)?;
    let (input, g) = preceded(multispace1, dec_u8)(input)?;
    let (input, b) = preceded(multispace1, dec_u8)(input)?;
    Ok((
        input,
        Triangle::new(
            v0 as usize,
            v1 as usize,
            v2 as usize,
            Color::new(r, g, b),
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_TRIANGLE: &str = "\
mesh
v -1.0 -1.0 2.0
v 1.0 -1.0 2.0
v 0.0 1.0 2.0
t 0 1 2 255 0 0
endmesh
";

    #[test]
    fn test_parse_single_triangle() {
        let model = parse_mesh(SINGLE_TRIANGLE).expect("valid mesh");
        assert_eq!(model.vertices.len(), 3);
        assert_eq!(model.triangles.len(), 1);
        assert_eq!(model.triangles[0].vertex_indices, [0, 1, 2]);
        assert_eq!(model.triangles[0].color, Color::RED);
        assert!((model.vertices[2].y - 1.0).abs() < 1e-6);
        assert!(model.bounding_sphere.radius > 0.0);
    }

    #[test]
    fn test_parse_rejects_bad_index() {
        let text = "mesh\nv 0 0 1\nv 1 0 1\nt 0 1 9 0 255 0\nendmesh\n";
        let err = parse_mesh(text).expect_err("index 9 is out of range");
        assert!(err.contains("references vertex 9"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_mesh("solid teapot").is_err());
        assert!(parse_mesh("mesh\nv 0 0").is_err());
    }

    #[test]
    fn test_parse_empty_mesh() {
        let model = parse_mesh("mesh\nendmesh").expect("empty mesh is well-formed");
        assert!(model.vertices.is_empty());
        assert!(model.triangles.is_empty());
        assert_eq!(model.bounding_sphere.radius, 0.0);
    }
}
