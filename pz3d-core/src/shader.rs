//! The fixed shading program
//!
//! Ambient + diffuse + specular (Phong) lighting from a single directional
//! light. GPU surfaces compile [`ShaderProgram::STANDARD`]; software surfaces
//! call [`shade`], which computes the same model per triangle.

use nalgebra::{Matrix4, Point3, Vector4};

use crate::vector::Vector3D;

pub const AMBIENT: f32 = 0.25;
pub const DIFFUSE: f32 = 0.65;
pub const SPECULAR: f32 = 0.35;
pub const SHININESS: i32 = 16;

/// Attribute and uniform names shared by the sources and the surfaces
pub mod names {
    pub const POSITION: &str = "a_position";
    pub const COLOR: &str = "a_color";
    pub const NORMAL: &str = "a_normal";
    pub const PROJECTION: &str = "u_projection";
    pub const VIEW: &str = "u_view";
    pub const LIGHT: &str = "u_light";
    pub const EYE: &str = "u_eye";
}

const VERTEX_SOURCE: &str = r#"#version 300 es
in vec3 a_position;
in vec3 a_color;
in vec3 a_normal;

uniform mat4 u_projection;
uniform mat4 u_view;

out vec3 v_color;
out vec3 v_normal;

void main() {
    v_color = a_color;
    v_normal = a_normal;
    gl_Position = u_projection * u_view * vec4(a_position, 1.0);
}
"#;

const FRAGMENT_SOURCE: &str = r#"#version 300 es
precision highp float;

in vec3 v_color;
in vec3 v_normal;

uniform vec3 u_light;
uniform vec3 u_eye;

out vec4 out_color;

void main() {
    vec3 normal = normalize(v_normal);
    float diffuse = max(dot(normal, u_light), 0.0);
    vec3 reflected = reflect(-u_light, normal);
    float specular = diffuse > 0.0 ? pow(max(dot(reflected, u_eye), 0.0), 16.0) : 0.0;
    vec3 lit = v_color * (0.25 + 0.65 * diffuse) + vec3(0.35 * specular);
    out_color = vec4(min(lit, vec3(1.0)), 1.0);
}
"#;

/// Vertex and fragment sources of a shading program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderProgram {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl ShaderProgram {
    pub const STANDARD: Self = Self {
        vertex: VERTEX_SOURCE,
        fragment: FRAGMENT_SOURCE,
    };
}

impl Default for ShaderProgram {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// CPU version of the fragment stage. `light` and `eye` are unit vectors
/// pointing away from the surface.
pub fn shade(normal: &Vector3D, color: [f32; 3], light: &Vector3D, eye: &Vector3D) -> [f32; 3] {
    let normal = normal.normalize().unwrap_or(*normal);
    let diffuse = normal.dot(light).max(0.0) as f32;
    let specular = if diffuse > 0.0 {
        let reflected = normal * (2.0 * normal.dot(light)) - *light;
        (reflected.dot(eye).max(0.0) as f32).powi(SHININESS)
    } else {
        0.0
    };

    color.map(|c| (c * (AMBIENT + DIFFUSE * diffuse) + SPECULAR * specular).min(1.0))
}

/// Perceived brightness of a linear RGB color
pub fn luminance(rgb: [f32; 3]) -> f32 {
    0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2]
}

/// Run the vertex stage on a world position and map the result to pixel
/// coordinates and NDC depth.
///
/// Returns `None` for points behind the eye or outside the view volume.
pub fn clip_to_screen(
    clip_from_world: &Matrix4<f32>,
    position: &Point3<f32>,
    width: u32,
    height: u32,
) -> Option<(f32, f32, f32)> {
    let clip = clip_from_world * Vector4::new(position.x, position.y, position.z, 1.0);

    // Prevent division by near-zero depth values
    if clip.w < 1e-6 {
        return None;
    }

    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let depth = clip.z / clip.w;

    if !(-1.0..=1.0).contains(&ndc_x)
        || !(-1.0..=1.0).contains(&ndc_y)
        || !(-1.0..=1.0).contains(&depth)
    {
        return None;
    }

    let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

    Some((screen_x, screen_y, depth))
}
