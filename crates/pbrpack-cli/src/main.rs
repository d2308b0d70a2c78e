//! pbrpack CLI - pack a textured mesh into a single GLB
//!
//! This binary provides commands for converting meshes, inspecting the
//! resulting containers, and running the texture synthesis and packing
//! stages on their own.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use pbrpack_cli::commands;
use pbrpack_cli::commands::convert::ConvertOptions;

fn init_logging(verbose: bool) {
    let mut builder = env_logger::builder();
    builder
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .parse_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            geometry,
            albedo,
            metallic,
            roughness,
            normal,
            ao,
            output,
            work_dir,
            size,
            no_discover,
            config,
            request,
            json,
        } => commands::convert::run(ConvertOptions {
            geometry,
            albedo,
            metallic,
            roughness,
            normal,
            ao,
            output,
            work_dir,
            size,
            no_discover,
            config,
            request,
            json,
        }),
        Commands::Inspect { container, json } => commands::inspect::run(&container, json),
        Commands::Synthesize { path, value, size } => {
            commands::synthesize::run(&path, value, size)
        }
        Commands::Pack {
            metallic,
            roughness,
            output,
        } => commands::pack::run(&metallic, &roughness, &output),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parses_convert_minimal() {
        let cli = Cli::try_parse_from(["pbrpack", "convert", "chair.obj"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Convert {
                geometry,
                albedo,
                output,
                no_discover,
                json,
                ..
            } => {
                assert_eq!(geometry, Some(PathBuf::from("chair.obj")));
                assert!(albedo.is_none());
                assert!(output.is_none());
                assert!(!no_discover);
                assert!(!json);
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_cli_parses_convert_with_textures() {
        let cli = Cli::try_parse_from([
            "pbrpack",
            "convert",
            "chair.obj",
            "--albedo",
            "tex/albedo.png",
            "--metallic",
            "tex/chair_metallic.png",
            "--roughness",
            "tex/chair_roughness.png",
            "--normal",
            "tex/normal.png",
            "--ao",
            "tex/ao.png",
            "-o",
            "dist/chair.glb",
            "--size",
            "256",
            "--no-discover",
            "--json",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Convert {
                metallic,
                ao,
                output,
                size,
                no_discover,
                json,
                ..
            } => {
                assert_eq!(metallic, Some(PathBuf::from("tex/chair_metallic.png")));
                assert_eq!(ao, Some(PathBuf::from("tex/ao.png")));
                assert_eq!(output, Some(PathBuf::from("dist/chair.glb")));
                assert_eq!(size, Some(256));
                assert!(no_discover);
                assert!(json);
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_cli_parses_inspect() {
        let cli = Cli::try_parse_from(["pbrpack", "inspect", "chair.glb", "--json"]).unwrap();
        match cli.command {
            Commands::Inspect { container, json } => {
                assert_eq!(container, PathBuf::from("chair.glb"));
                assert!(json);
            }
            _ => panic!("expected inspect command"),
        }
    }

    #[test]
    fn test_cli_synthesize_defaults_size() {
        let cli =
            Cli::try_parse_from(["pbrpack", "synthesize", "_albedo.png", "--value", "128"])
                .unwrap();
        match cli.command {
            Commands::Synthesize { path, value, size } => {
                assert_eq!(path, PathBuf::from("_albedo.png"));
                assert_eq!(value, 128);
                assert_eq!(size, 1024);
            }
            _ => panic!("expected synthesize command"),
        }
    }

    #[test]
    fn test_cli_synthesize_rejects_out_of_range_value() {
        let err = Cli::try_parse_from(["pbrpack", "synthesize", "x.png", "--value", "300"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("300"));
    }

    #[test]
    fn test_cli_pack_requires_output() {
        let err = Cli::try_parse_from(["pbrpack", "pack", "m.png", "r.png"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--output"));

        let cli = Cli::try_parse_from(["pbrpack", "pack", "m.png", "r.png", "-o", "mr.png"])
            .unwrap();
        match cli.command {
            Commands::Pack {
                metallic,
                roughness,
                output,
            } => {
                assert_eq!(metallic, PathBuf::from("m.png"));
                assert_eq!(roughness, PathBuf::from("r.png"));
                assert_eq!(output, PathBuf::from("mr.png"));
            }
            _ => panic!("expected pack command"),
        }
    }
}
