//! Convert command implementation
//!
//! Resolves missing textures, packs metallic and roughness, and writes one
//! self-contained GLB.

use anyhow::{Context, Result};
use colored::Colorize;
use pbrpack_resolve::ConversionReport;
use pbrpack_spec::{ConvertConfig, ConvertRequest, RoleOrigin, TextureRole};
use std::path::PathBuf;
use std::process::ExitCode;

/// Flags of the convert command.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub geometry: Option<PathBuf>,
    pub albedo: Option<PathBuf>,
    pub metallic: Option<PathBuf>,
    pub roughness: Option<PathBuf>,
    pub normal: Option<PathBuf>,
    pub ao: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub size: Option<u32>,
    pub no_discover: bool,
    pub config: Option<PathBuf>,
    pub request: Option<PathBuf>,
    pub json: bool,
}

/// Run the convert command
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(options: ConvertOptions) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let (request, config) = prepare(&options, cwd)?;

    if !options.json {
        println!(
            "{} {}",
            "Converting:".cyan().bold(),
            request.geometry.display()
        );
    }

    let report = pbrpack_resolve::convert(&request, &config)
        .with_context(|| format!("Failed to convert {}", request.geometry.display()))?;

    if options.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    Ok(ExitCode::SUCCESS)
}

/// Build the request and config from files and flags. Flags win.
pub fn prepare(options: &ConvertOptions, cwd: PathBuf) -> Result<(ConvertRequest, ConvertConfig)> {
    let mut config = match &options.config {
        Some(path) => ConvertConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ConvertConfig::default(),
    };
    if config.search_root.is_none() {
        config.search_root = Some(cwd);
    }
    if let Some(dir) = &options.work_dir {
        config.work_dir = Some(dir.clone());
    }
    if let Some(size) = options.size {
        config.synthetic_size = size;
    }
    if options.no_discover {
        config.discover = false;
    }

    let mut request = match (&options.request, &options.geometry) {
        (Some(path), geometry) => {
            let mut request = ConvertRequest::from_file(path)
                .with_context(|| format!("Failed to load request: {}", path.display()))?;
            if let Some(geometry) = geometry {
                request.geometry = geometry.clone();
            }
            request
        }
        (None, Some(geometry)) => ConvertRequest::new(geometry.clone()),
        (None, None) => anyhow::bail!("No geometry given (pass a file or --request)"),
    };

    let flags = [
        (TextureRole::Albedo, &options.albedo),
        (TextureRole::Metallic, &options.metallic),
        (TextureRole::Roughness, &options.roughness),
        (TextureRole::Normal, &options.normal),
        (TextureRole::Ao, &options.ao),
    ];
    for (role, path) in flags {
        if let Some(path) = path {
            request.textures.insert(role, path.clone());
        }
    }
    if let Some(output) = &options.output {
        request.output = Some(output.clone());
    }

    Ok((request, config))
}

fn print_report(report: &ConversionReport) {
    println!("{} {}", "Work dir:".dimmed(), report.work_dir.display());
    for (role, path) in report.textures.iter() {
        let origin = report
            .origins
            .get(&role)
            .map(|o| origin_label(*o))
            .unwrap_or_default();
        println!(
            "  {} {:<18} {} {}",
            "-".dimmed(),
            role.as_str(),
            path.display(),
            origin
        );
    }
    println!(
        "{} Wrote {} ({} bytes)",
        "SUCCESS".green().bold(),
        report.output.display(),
        report.size
    );
    println!("{} {}", "BLAKE3:".dimmed(), report.blake3);
}

fn origin_label(origin: RoleOrigin) -> String {
    match origin {
        RoleOrigin::Supplied => "(supplied)".dimmed().to_string(),
        RoleOrigin::Discovered => "(discovered)".yellow().to_string(),
        RoleOrigin::Synthesized => "(synthesized)".yellow().to_string(),
        RoleOrigin::Packed => "(packed)".dimmed().to_string(),
    }
}
