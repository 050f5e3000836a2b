// Parse and validate the bundled WGSL with naga.

use aether_core::{FLUID_WGSL, ORBS_WGSL, PARTICLES_WGSL};

fn validate(source: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| format!("WGSL parse error: {:?}", e))?;
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;
    Ok(module)
}

fn entry_points(module: &naga::Module) -> Vec<(&str, naga::ShaderStage)> {
    module
        .entry_points
        .iter()
        .map(|e| (e.name.as_str(), e.stage))
        .collect()
}

#[test]
fn fluid_shader_validates() {
    let module = validate(FLUID_WGSL).unwrap();
    let eps = entry_points(&module);
    assert!(eps.contains(&("vs_plane", naga::ShaderStage::Vertex)));
    assert!(eps.contains(&("fs_fluid", naga::ShaderStage::Fragment)));
}

#[test]
fn orb_shader_validates() {
    let module = validate(ORBS_WGSL).unwrap();
    let eps = entry_points(&module);
    assert!(eps.contains(&("vs_orb", naga::ShaderStage::Vertex)));
    assert!(eps.contains(&("fs_orb", naga::ShaderStage::Fragment)));
}

#[test]
fn particle_shader_validates() {
    let module = validate(PARTICLES_WGSL).unwrap();
    let eps = entry_points(&module);
    assert!(eps.contains(&("vs_particle", naga::ShaderStage::Vertex)));
    assert!(eps.contains(&("fs_particle", naga::ShaderStage::Fragment)));
}

#[test]
fn orb_and_particle_shaders_share_scene_block() {
    let block = |src: &str| {
        let start = src.find("struct SceneUniforms").unwrap();
        let end = start + src[start..].find("};").unwrap();
        src[start..end]
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(block(ORBS_WGSL), block(PARTICLES_WGSL));
}
