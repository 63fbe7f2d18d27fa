//! Command line arguments for the glpaint tool

use clap::Parser;
use glpaint_core::Point3;
use std::path::PathBuf;

/// Replay a G-code file into colored toolpath vertices
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// G-code program to replay
    pub file: PathBuf,

    /// render config (.toml or .json); defaults to the user config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// draw G2/G3 arcs as single straight segments
    #[arg(long, default_value_t = false)]
    pub no_arcs: bool,

    /// machine position before the first command, as X,Y,Z
    #[arg(long, value_parser = parse_point, default_value = "0,0,0")]
    pub start: Point3,

    /// print the vertex stream as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// source line to highlight; may be repeated
    #[arg(long = "highlight", value_name = "LINE")]
    pub highlights: Vec<usize>,
}

/// Parse `X,Y,Z` into a point
pub fn parse_point(s: &str) -> Result<Point3, String> {
    let coords = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("'{}': {}", part.trim(), e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match coords.as_slice() {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(format!("expected X,Y,Z, got {} values", coords.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("1,2.5,-3"), Ok(Point3::new(1.0, 2.5, -3.0)));
        assert_eq!(parse_point(" 0, 0 ,0"), Ok(Point3::ZERO));
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,two,3").is_err());
    }

    #[test]
    fn test_args() {
        let args = CliArgs::try_parse_from([
            "glpaint",
            "part.nc",
            "--start",
            "1,2,3",
            "--highlight",
            "4",
            "--highlight",
            "7",
            "--no-arcs",
        ])
        .expect("valid arguments");
        assert_eq!(args.file, PathBuf::from("part.nc"));
        assert_eq!(args.start, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(args.highlights, vec![4, 7]);
        assert!(args.no_arcs);
        assert!(!args.json);
        assert!(args.config.is_none());
    }
}
