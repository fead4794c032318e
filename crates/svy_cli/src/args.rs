// crates/svy_cli/src/args.rs
//
// Deterministic, offline CLI argument surface.
//
// Rules:
// - No networked paths (reject any scheme:// early).
// - --design is always required; --responses and --probe are optional extras.
// - Output: --out dir (plan/analysis artifacts are written there).
// - --validate-only performs load + validation without computing a plan.

use std::path::PathBuf;

use clap::Parser;

use svy_core::entities::GeoPoint;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "svy",
    disable_help_subcommand = true,
    about = "Offline, deterministic CLI for the survey engine"
)]
pub struct Args {
    /// Survey design JSON path.
    #[arg(long)]
    pub design: PathBuf,

    /// Response batch JSON path; when present, an analysis artifact is
    /// written next to the plan.
    #[arg(long)]
    pub responses: Option<PathBuf>,

    /// Output directory for emitted artifacts.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Geofence probe: "<area_id>:<lat>,<lng>". Prints the verdict for the
    /// named area's collection centre.
    #[arg(long, value_parser = parse_probe)]
    pub probe: Option<Probe>,

    /// Validate the design only; no artifacts are written.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress non-essential stdout logs.
    #[arg(long)]
    pub quiet: bool,
}

/// A parsed `--probe` value.
#[derive(Debug, Clone)]
pub struct Probe {
    pub area_id: String,
    pub position: GeoPoint,
}

/// Parse "<area_id>:<lat>,<lng>". Range checks happen later, in the engine.
fn parse_probe(raw: &str) -> Result<Probe, String> {
    let (area_id, coords) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected <area_id>:<lat>,<lng>, got {raw:?}"))?;
    if area_id.is_empty() {
        return Err("probe area id must not be empty".into());
    }
    let (lat, lng) = coords
        .split_once(',')
        .ok_or_else(|| format!("expected <lat>,<lng> after the colon, got {coords:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("bad latitude: {lat:?}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("bad longitude: {lng:?}"))?;
    Ok(Probe {
        area_id: area_id.to_string(),
        position: GeoPoint::new(lat, lng),
    })
}

/// Parse argv and enforce the offline posture on every supplied path.
pub fn parse_and_validate() -> Result<Args, String> {
    let args = Args::parse();
    validate(&args)?;
    Ok(args)
}

fn validate(args: &Args) -> Result<(), String> {
    for (flag, path) in [
        ("--design", Some(&args.design)),
        ("--responses", args.responses.as_ref()),
        ("--out", Some(&args.out)),
    ] {
        if let Some(p) = path {
            let shown = p.display().to_string();
            if svy_io::looks_like_url(&shown) {
                return Err(format!("{flag}: networked paths are rejected: {shown}"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_parses_area_and_coordinates() {
        let p = parse_probe("north:-23.55,-46.63").unwrap();
        assert_eq!(p.area_id, "north");
        assert_eq!(p.position.lat, -23.55);
        assert_eq!(p.position.lng, -46.63);
    }

    #[test]
    fn probe_rejects_malformed_input() {
        assert!(parse_probe("north").is_err());
        assert!(parse_probe(":1,2").is_err());
        assert!(parse_probe("north:1").is_err());
        assert!(parse_probe("north:abc,2").is_err());
    }
}
