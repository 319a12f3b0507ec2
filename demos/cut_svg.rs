use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use serde::Deserialize;

use papercut::{CutSettings, Piece, Point, PolygonWithHoles, Sheet, SheetShape};

/// Replays strokes on a sheet and draws what's left.
#[derive(Parser)]
struct Cli {
    /// A YAML file with `sheet`, `strokes` and (optionally) `settings`.
    input: PathBuf,

    #[arg(short, long)]
    output: PathBuf,

    /// Only replay this many drag steps.
    #[arg(long)]
    steps: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Start {
    Shape(SheetShape),
    Polygon(PolygonWithHoles),
}

#[derive(Deserialize)]
struct Input {
    sheet: Start,
    #[serde(default)]
    settings: CutSettings,
    strokes: Vec<Vec<Point>>,
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();
    let input: Input = serde_yaml::from_str(&std::fs::read_to_string(&args.input)?)?;

    let mut sheet = match input.sheet {
        Start::Shape(shape) => Sheet::new(shape, input.settings),
        Start::Polygon(poly) => Sheet::from_pieces(vec![Piece::new(poly)], input.settings),
    };

    let steps = input
        .strokes
        .iter()
        .flat_map(|stroke| stroke.windows(2))
        .take(args.steps.unwrap_or(usize::MAX));
    for (idx, step) in steps.enumerate() {
        let event = sheet.cut(step[0], step[1])?;
        eprintln!("step {idx}: {event:?}");
    }

    if sheet.pieces().is_empty() {
        bail!("nothing left to draw");
    }
    svg::save(&args.output, &sheet.dump_svg())?;
    Ok(())
}
