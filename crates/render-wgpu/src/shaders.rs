/// WGSL for both scene pipelines: lit meshes (`vs_mesh`/`fs_mesh`) and
/// colored lines (`vs_line`/`fs_line`).
pub const SCENE_SHADER: &str = r#"
struct Frame {
    view_proj: mat4x4<f32>,
    // xyz towards the light, w intensity
    light: vec4<f32>,
    tint: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

struct MeshOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) normal: vec3<f32>,
};

@vertex
fn vs_mesh(@location(0) position: vec3<f32>, @location(1) normal: vec3<f32>) -> MeshOut {
    var out: MeshOut;
    out.clip = frame.view_proj * vec4<f32>(position, 1.0);
    out.normal = normal;
    return out;
}

@fragment
fn fs_mesh(in: MeshOut) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    // Sky above, ground below.
    let ambient = mix(0.2, 0.4, n.y * 0.5 + 0.5);
    let diffuse = max(dot(n, normalize(frame.light.xyz)), 0.0) * frame.light.w;
    return vec4<f32>(frame.tint.rgb * (ambient + 0.65 * diffuse), frame.tint.a);
}

struct LineOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_line(@location(0) position: vec3<f32>, @location(1) color: vec4<f32>) -> LineOut {
    var out: LineOut;
    out.clip = frame.view_proj * vec4<f32>(position, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_line(in: LineOut) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
