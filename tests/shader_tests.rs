//! WGSL validation for the ribbon shader.

use ribbons::shader::SHADER_SOURCE;

fn validate(source: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| format!("WGSL parse error: {:?}", e))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(module)
}

#[test]
fn test_ribbon_shader_validates() {
    validate(SHADER_SOURCE).expect("ribbon shader should be valid");
}

#[test]
fn test_ribbon_shader_entry_points() {
    let module = validate(SHADER_SOURCE).expect("ribbon shader should be valid");
    let names: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}
