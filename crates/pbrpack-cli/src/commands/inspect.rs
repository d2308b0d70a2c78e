//! Inspect command implementation
//!
//! Prints what a GLB holds: embedded images, texture sources, the material's
//! texture slots and which material each primitive uses.

use anyhow::{Context, Result};
use colored::Colorize;
use pbrpack_container::{inspect_container, ContainerSummary};
use std::path::Path;
use std::process::ExitCode;

/// Run the inspect command
///
/// # Arguments
/// * `path` - Container to read
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(path: &Path, json_output: bool) -> Result<ExitCode> {
    let summary = inspect_container(path)
        .with_context(|| format!("Failed to inspect {}", path.display()))?;

    if json_output {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", json);
    } else {
        println!("{} {}", "Container:".cyan().bold(), path.display());
        for line in describe(&summary) {
            println!("{}", line);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Human-readable lines for a summary.
pub fn describe(summary: &ContainerSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(generator) = &summary.generator {
        lines.push(format!("{} {}", "Generator:".dimmed(), generator));
    }
    lines.push(format!(
        "{} {} mesh(es), {} vertices, {} triangles",
        "Geometry:".dimmed(),
        summary.mesh_count,
        summary.vertex_count,
        summary.triangle_count
    ));

    lines.push(format!("{} {}", "Images:".dimmed(), summary.images.len()));
    for image in &summary.images {
        let size = image
            .byte_length
            .map(|n| format!("{} bytes", n))
            .unwrap_or_else(|| "external".to_string());
        lines.push(format!(
            "  [{}] {} ({})",
            image.index,
            image.mime_type.as_deref().unwrap_or("unknown"),
            size
        ));
    }

    for material in &summary.materials {
        lines.push(format!(
            "{} [{}] {}",
            "Material:".dimmed(),
            material.index,
            material.name.as_deref().unwrap_or("<unnamed>")
        ));
        let slots = [
            ("baseColor", material.base_color_texture),
            ("metallicRoughness", material.metallic_roughness_texture),
            ("normal", material.normal_texture),
            ("occlusion", material.occlusion_texture),
        ];
        for (slot, texture) in slots {
            let value = match texture {
                Some(index) => {
                    let image = summary
                        .texture_sources
                        .get(index)
                        .map(|i| format!(" -> image {}", i))
                        .unwrap_or_default();
                    format!("texture {}{}", index, image)
                }
                None => "-".to_string(),
            };
            lines.push(format!("  {:<18} {}", slot, value));
        }
    }

    let bindings: Vec<String> = summary
        .primitive_materials
        .iter()
        .map(|m| m.map(|i| i.to_string()).unwrap_or_else(|| "none".to_string()))
        .collect();
    lines.push(format!(
        "{} [{}]",
        "Primitive materials:".dimmed(),
        bindings.join(", ")
    ));
    lines
}
