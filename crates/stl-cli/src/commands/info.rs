//! stl info command - display polyhedron metrics.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use stl_analysis::{Polyhedron, surface_area_parallel};

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct PolyhedronInfo {
    path: String,
    name: String,
    faces: usize,
    vertices: usize,
    surface_area: f64,
    volume: f64,
    euler_characteristic: i64,
    closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    workers: Option<usize>,
}

pub fn run(input: &Path, workers: Option<usize>, cli: &Cli) -> Result<()> {
    let poly = Polyhedron::load(input)
        .with_context(|| format!("Failed to load polyhedron from {:?}", input))?;

    let surface_area = match workers {
        Some(n) => surface_area_parallel(&poly, n)?,
        None => poly.surface_area(),
    };

    let info = PolyhedronInfo {
        path: input.display().to_string(),
        name: poly.name().to_string(),
        faces: poly.face_count(),
        vertices: poly.vertices().len(),
        surface_area,
        volume: poly.volume(),
        euler_characteristic: poly.euler_characteristic(),
        closed: poly.is_closed(),
        workers,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&info, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", "Polyhedron".bold().underline());
                println!("  {}: {}", "File".cyan(), info.path);
                println!("  {}: {}", "Name".cyan(), info.name);
                println!("  {}: {}", "Faces".cyan(), info.faces);
                println!("  {}: {}", "Vertices".cyan(), info.vertices);
                match info.workers {
                    Some(n) => println!(
                        "  {}: {:.6} ({} workers)",
                        "Surface area".cyan(),
                        info.surface_area,
                        n
                    ),
                    None => println!("  {}: {:.6}", "Surface area".cyan(), info.surface_area),
                }
                println!("  {}: {:.6}", "Volume".cyan(), info.volume);
                println!(
                    "  {}: {}",
                    "Euler characteristic".cyan(),
                    info.euler_characteristic
                );
                println!(
                    "  {}: {}",
                    "Closed".cyan(),
                    if info.closed {
                        "yes".green().to_string()
                    } else {
                        "no".yellow().to_string()
                    }
                );
            }
        }
    }

    Ok(())
}
