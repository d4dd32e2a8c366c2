//! Validate a JSON level pack.
//!
//! Usage: `level-check <pack.json>`
//!
//! Prints one line per level: size, station counts and whether the layout is
//! already connected as authored. Exits non-zero when the pack cannot be
//! loaded or a level breaks the one-start/one-goal rule.

use anyhow::{anyhow, Result};

use rail_puzzle::core::{is_connected, Level, LevelPack, TileGrid};
use rail_puzzle::types::TileKind;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = parse_args(&args)?;

    let pack = LevelPack::load(&path)?;
    let mut problems = 0usize;
    for (i, level) in pack.levels.iter().enumerate() {
        let report = check_level(level);
        println!("{:>3}  {}", i + 1, report.line);
        if !report.ok {
            problems += 1;
        }
    }

    if problems > 0 {
        return Err(anyhow!("{}: {} level(s) with problems", path, problems));
    }
    println!("{}: {} level(s) ok", path, pack.len());
    Ok(())
}

fn parse_args(args: &[String]) -> Result<String> {
    match args {
        [path] if !path.starts_with('-') => Ok(path.clone()),
        [] => Err(anyhow!("usage: level-check <pack.json>")),
        _ => Err(anyhow!("level-check: expected exactly one level pack path")),
    }
}

struct Report {
    ok: bool,
    line: String,
}

fn check_level(level: &Level) -> Report {
    let grid = TileGrid::from_level(level);
    let stations = level.check_stations();
    let connected = is_connected(&grid, level);

    let mut line = format!(
        "{}x{}  start={} goal={}  {}",
        level.rows(),
        level.cols(),
        level.count(TileKind::Start),
        level.count(TileKind::Goal),
        if connected { "connected" } else { "open" },
    );
    if let Some(name) = level.name() {
        line.push_str("  ");
        line.push_str(name);
    }
    if let Err(e) = &stations {
        line.push_str("  ERROR: ");
        line.push_str(&e.to_string());
    }

    Report {
        ok: stations.is_ok(),
        line,
    }
}
