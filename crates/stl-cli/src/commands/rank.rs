//! stl rank command - list faces ordered by area.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use stl_analysis::{Polyhedron, rank_faces_by_area};

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct RankedFace {
    rank: usize,
    area: f64,
    normal: [f32; 3],
}

#[derive(Serialize)]
struct RankReport {
    path: String,
    name: String,
    total_faces: usize,
    largest: bool,
    faces: Vec<RankedFace>,
}

pub fn run(input: &Path, count: usize, largest: bool, cli: &Cli) -> Result<()> {
    let poly = Polyhedron::load(input)
        .with_context(|| format!("Failed to load polyhedron from {:?}", input))?;

    let mut ranked = rank_faces_by_area(poly.faces());
    if largest {
        ranked.reverse();
    }
    ranked.truncate(count);

    let faces: Vec<RankedFace> = ranked
        .iter()
        .enumerate()
        .map(|(i, face)| {
            let n = face.normal();
            RankedFace {
                rank: i + 1,
                area: face.area(),
                normal: [n.x, n.y, n.z],
            }
        })
        .collect();

    let report = RankReport {
        path: input.display().to_string(),
        name: poly.name().to_string(),
        total_faces: poly.face_count(),
        largest,
        faces,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&report, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                let direction = if largest { "largest" } else { "smallest" };
                println!(
                    "{} ({} of {} faces, {} first)",
                    "Faces by area".bold().underline(),
                    report.faces.len(),
                    report.total_faces,
                    direction
                );
                for face in &report.faces {
                    println!(
                        "  {:>4}. area {:>12.6}  normal [{:.3}, {:.3}, {:.3}]",
                        face.rank, face.area, face.normal[0], face.normal[1], face.normal[2]
                    );
                }
            }
        }
    }

    Ok(())
}
