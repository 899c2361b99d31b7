/// STL import for binary and ASCII files
use nom::{
    bytes::complete::{tag, take, take_till},
    character::complete::{multispace0, multispace1},
    combinator::map,
    multi::{count, many0},
    number::complete::{float, le_f32, le_u16, le_u32},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{Error, Result};
use crate::scene::{RendererColor, RendererObject};
use crate::vector::Vector3D;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Facet normal plus three corners
type Facet = (Vector3D, [Vector3D; 3]);

/// Detect and parse STL data (binary or ASCII) into a flat colored object
pub fn parse_stl(data: &[u8], color: RendererColor) -> Result<RendererObject> {
    if data.starts_with(b"solid") {
        // Binary files may also start with "solid"; fall back if the text does not parse
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(object) = parse_ascii_stl(text, color) {
                return Ok(object);
            }
        }
    }

    parse_binary_stl(data, color)
}

pub fn parse_binary_stl(data: &[u8], color: RendererColor) -> Result<RendererObject> {
    if data.len() < HEADER_LEN + 4 {
        return Err(Error::Stl("file too small to be a valid STL".to_string()));
    }

    let (body, triangle_count) = binary_header(data)
        .map_err(|e| Error::Stl(format!("bad binary header: {e:?}")))?;
    let expected = triangle_count as usize * FACET_LEN;
    if body.len() < expected {
        return Err(Error::Stl(format!(
            "unexpected end of file: {triangle_count} facets need {expected} bytes, found {}",
            body.len()
        )));
    }

    let (_, facets) = count(binary_facet, triangle_count as usize)(body)
        .map_err(|e| Error::Stl(format!("bad binary facet: {e:?}")))?;
    into_object(facets, color)
}

pub fn parse_ascii_stl(input: &str, color: RendererColor) -> Result<RendererObject> {
    match ascii_solid(input) {
        Ok((_, facets)) => into_object(facets, color),
        Err(e) => Err(Error::Stl(format!("failed to parse ASCII STL: {e:?}"))),
    }
}

fn into_object(facets: Vec<Facet>, color: RendererColor) -> Result<RendererObject> {
    let mut vertices = Vec::with_capacity(facets.len() * 3);
    let mut normals = Vec::with_capacity(facets.len() * 3);
    for (normal, corners) in facets {
        vertices.extend(corners);
        normals.extend([normal; 3]);
    }
    RendererObject::new(vertices, normals, color, Vector3D::ZERO)
}

fn binary_header(input: &[u8]) -> IResult<&[u8], u32> {
    preceded(take(HEADER_LEN), le_u32)(input)
}

fn binary_vector(input: &[u8]) -> IResult<&[u8], Vector3D> {
    map(tuple((le_f32, le_f32, le_f32)), |(x, y, z)| {
        Vector3D::new(x as f64, y as f64, z as f64)
    })(input)
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Facet> {
    let (input, normal) = binary_vector(input)?;
    let (input, a) = binary_vector(input)?;
    let (input, b) = binary_vector(input)?;
    let (input, c) = binary_vector(input)?;
    // attribute byte count
    let (input, _) = le_u16(input)?;
    Ok((input, (normal, [a, b, c])))
}

fn ascii_solid(input: &str) -> IResult<&str, Vec<Facet>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    // optional name up to the end of the line
    let (input, _) = take_till(|c| c == '\n')(input)?;
    let (input, facets) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, facets))
}

fn ascii_facet(input: &str) -> IResult<&str, Facet> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, normal) = ascii_vector(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = ascii_vertex(input)?;
    let (input, b) = ascii_vertex(input)?;
    let (input, c) = ascii_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, (normal, [a, b, c])))
}

fn ascii_vertex(input: &str) -> IResult<&str, Vector3D> {
    preceded(preceded(multispace0, tag("vertex")), ascii_vector)(input)
}

fn ascii_vector(input: &str) -> IResult<&str, Vector3D> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, Vector3D::new(x as f64, y as f64, z as f64)))
}
