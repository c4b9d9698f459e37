use anyhow::{Context, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::classify::Classification;

// Include the default palette at compile time
const DEFAULT_PALETTE: &str = include_str!("../default_palette.txt");
pub const PALETTE_FILE: &str = "palette.txt";

/// Ordered highlight colors, stored as lowercase `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let re = color_regex()?;
        let mut palette = Self { colors: Vec::new() };
        for raw in colors {
            let raw = raw.as_ref();
            let color =
                parse_color(&re, raw).with_context(|| format!("Invalid color '{}'", raw))?;
            if palette.contains(&color) {
                anyhow::bail!("Duplicate palette color '{}'", raw);
            }
            palette.colors.push(color);
        }
        Ok(palette)
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    fn contains(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        parse_palette(DEFAULT_PALETTE, true).unwrap_or(Self { colors: Vec::new() })
    }
}

fn color_regex() -> Result<Regex> {
    Regex::new(r"^#?([0-9a-fA-F]{6})$").context("Failed to compile color pattern")
}

fn parse_color(re: &Regex, raw: &str) -> Result<String> {
    let captures = re
        .captures(raw.trim())
        .context("expected #rrggbb or rrggbb")?;
    Ok(format!("#{}", captures[1].to_ascii_lowercase()))
}

/// Parse palette file contents. With `strict`, a bad line is an error;
/// otherwise it is logged and skipped.
fn parse_palette(content: &str, strict: bool) -> Result<Palette> {
    let re = color_regex()?;
    let mut colors = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        match parse_color(&re, line) {
            Ok(color) if colors.contains(&color) => {
                if strict {
                    anyhow::bail!("Duplicate palette color {} at line {}", color, line_num + 1)
                }
                warn!(action = "parse", component = "palette_color", line_number = line_num + 1, color = %color, "Duplicate palette color skipped")
            }
            Ok(color) => colors.push(color),
            Err(e) if strict => {
                anyhow::bail!("Invalid palette color at line {}: {}", line_num + 1, e)
            }
            Err(e) => {
                warn!(action = "parse", component = "palette_color", line_number = line_num + 1, error = %e, "Invalid palette color")
            }
        }
    }
    Ok(Palette { colors })
}

/// Load the highlight palette.
///
/// An explicit file must exist and parse cleanly. Without one, `palette.txt`
/// in the working directory is tried leniently, and if that yields nothing
/// the embedded palette is used.
pub fn load_palette(palette_file_path: Option<&Path>) -> Result<Palette> {
    let start_time = Instant::now();

    let palette = if let Some(path) = palette_file_path {
        info!(action = "load", component = "palette_file", file_path = ?path, "Loading palette from specified file");
        if !path.exists() {
            anyhow::bail!("Palette file not found: {:?}", path);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read palette file {:?}", path))?;
        parse_palette(&content, true)?
    } else {
        let default_file = Path::new(PALETTE_FILE);
        let mut palette = Palette { colors: Vec::new() };
        if default_file.exists() {
            info!(action = "load", component = "default_palette_file", file_path = ?default_file, "Loading palette from default file");
            let content = fs::read_to_string(default_file)?;
            palette = parse_palette(&content, false)?;
        }
        if palette.is_empty() {
            info!(
                action = "load",
                component = "embedded_palette",
                "Using embedded default palette"
            );
            palette = parse_palette(DEFAULT_PALETTE, true)
                .context("Failed to parse embedded default palette")?;
        }
        palette
    };

    if palette.is_empty() {
        warn!(
            action = "loaded",
            component = "palette",
            "Palette is empty; every group will get a generated color"
        );
    }

    info!(
        action = "complete",
        component = "palette_loading",
        color_count = palette.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Palette ready"
    );
    Ok(palette)
}

pub fn init_default_palette() -> Result<()> {
    let default_file = Path::new(PALETTE_FILE);
    write_default_palette(default_file)?;
    println!("Created {} with the default palette", PALETTE_FILE);
    Ok(())
}

/// Write the embedded palette to `path`, refusing to overwrite.
pub fn write_default_palette(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!(
            "{:?} already exists. Remove it first if you want to reinitialize.",
            path
        );
    }

    fs::write(path, DEFAULT_PALETTE)
        .with_context(|| format!("Failed to write palette file {:?}", path))?;
    info!(action = "write", component = "palette_file", file_path = ?path, "Wrote default palette");
    Ok(())
}

/// Colors assigned to exact-match URLs and to domain groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    pub exact: HashMap<String, String>,
    /// Keyed by host.
    pub domain: HashMap<String, String>,
}

impl ColorMap {
    /// Render color for a URL; an exact-match color always wins over the
    /// color of the URL's domain group.
    pub fn color_for(&self, url: &str, classification: &Classification) -> Option<&str> {
        if let Some(color) = self.exact.get(url) {
            return Some(color);
        }
        let group = classification.domain_group_of(url)?;
        self.domain
            .get(&classification.domain_groups[group].domain)
            .map(String::as_str)
    }
}

struct ColorCursor<'a> {
    palette: &'a Palette,
    next: usize,
    used: HashSet<String>,
    rng: &'a mut fastrand::Rng,
}

impl ColorCursor<'_> {
    fn take(&mut self) -> String {
        if let Some(color) = self.palette.colors.get(self.next) {
            self.next += 1;
            self.used.insert(color.clone());
            return color.clone();
        }
        loop {
            let color = format!("#{:06x}", self.rng.u32(..=0xFF_FFFF));
            if !self.palette.contains(&color) && self.used.insert(color.clone()) {
                debug!(action = "fallback", component = "colorizer", color = %color, "Palette exhausted, generated color");
                return color;
            }
        }
    }
}

/// Hand out palette colors front to back: first one per exact-match URL,
/// then one per domain group, both in classifier order.
///
/// Once the palette runs out, colors come from `rng`; seed it to make
/// fallback colors reproducible. Generated colors never repeat a palette
/// entry or another generated color.
pub fn assign_colors(
    classification: &Classification,
    palette: &Palette,
    rng: &mut fastrand::Rng,
) -> ColorMap {
    let mut cursor = ColorCursor {
        palette,
        next: 0,
        used: HashSet::new(),
        rng,
    };
    let mut colors = ColorMap::default();

    for url in &classification.exact_matches {
        let color = cursor.take();
        colors.exact.insert(url.clone(), color);
    }
    for group in &classification.domain_groups {
        let color = cursor.take();
        colors.domain.insert(group.domain.clone(), color);
    }

    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DomainGroup;

    fn exact(urls: &[&str]) -> Classification {
        Classification {
            exact_matches: urls.iter().map(|u| u.to_string()).collect(),
            domain_groups: Vec::new(),
        }
    }

    #[test]
    fn embedded_palette_parses() {
        let palette = parse_palette(DEFAULT_PALETTE, true).unwrap();
        assert!(palette.len() >= 10);
        let unique: HashSet<&String> = palette.colors().iter().collect();
        assert_eq!(unique.len(), palette.len());
        assert_eq!(Palette::default(), palette);
    }

    #[test]
    fn colors_are_normalized() {
        let palette = Palette::new(["#ABCDEF", "123456"]).unwrap();
        assert_eq!(palette.colors(), ["#abcdef", "#123456"]);
        assert!(Palette::new(["#12345"]).is_err());
    }

    #[test]
    fn strict_parse_rejects_bad_lines() {
        let err = parse_palette("#ffffff\nnot-a-color\n", true).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        let lenient = parse_palette("// c\n\n#ffffff\nnot-a-color\n", false).unwrap();
        assert_eq!(lenient.colors(), ["#ffffff"]);
    }

    #[test]
    fn duplicate_colors_rejected_or_skipped() {
        let content = "#AA0000\naa0000\n#bb0000\n";
        let err = parse_palette(content, true).unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let lenient = parse_palette(content, false).unwrap();
        assert_eq!(lenient.colors(), ["#aa0000", "#bb0000"]);

        assert!(Palette::new(["#AA0000", "aa0000"]).is_err());
    }

    #[test]
    fn lenient_palette_gives_distinct_groups_distinct_colors() {
        let palette = parse_palette("#AA0000\naa0000\n#bb0000\n", false).unwrap();
        let c = exact(&["https://a.com/", "https://b.com/"]);
        let colors = assign_colors(&c, &palette, &mut fastrand::Rng::with_seed(5));
        assert_eq!(colors.exact["https://a.com/"], "#aa0000");
        assert_eq!(colors.exact["https://b.com/"], "#bb0000");
    }

    #[test]
    fn palette_consumed_in_order() {
        let palette = Palette::new(["#000001", "#000002", "#000003"]).unwrap();
        let mut c = exact(&["https://a.com/", "https://b.com/"]);
        c.domain_groups.push(DomainGroup {
            domain: "c.com".into(),
            urls: vec!["https://c.com/1".into(), "https://c.com/2".into()],
        });
        let colors = assign_colors(&c, &palette, &mut fastrand::Rng::with_seed(1));
        assert_eq!(colors.exact["https://a.com/"], "#000001");
        assert_eq!(colors.exact["https://b.com/"], "#000002");
        assert_eq!(colors.domain["c.com"], "#000003");
    }

    #[test]
    fn exhausted_palette_falls_back_to_seeded_colors() {
        let palette = Palette::new(["#000001", "#000002"]).unwrap();
        let c = exact(&["https://a.com/", "https://b.com/", "https://c.com/"]);
        let first = assign_colors(&c, &palette, &mut fastrand::Rng::with_seed(7));
        let second = assign_colors(&c, &palette, &mut fastrand::Rng::with_seed(7));
        assert_eq!(first, second);

        assert_eq!(first.exact["https://a.com/"], "#000001");
        assert_eq!(first.exact["https://b.com/"], "#000002");
        let fallback = &first.exact["https://c.com/"];
        assert_eq!(fallback.len(), 7);
        assert!(fallback.starts_with('#'));
        assert!(fallback[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
        assert!(!palette.colors().contains(fallback));
    }

    #[test]
    fn empty_palette_generates_distinct_colors() {
        let palette = Palette::new(Vec::<String>::new()).unwrap();
        let urls: Vec<String> = (0..20).map(|i| format!("https://a{i}.com/")).collect();
        let c = Classification {
            exact_matches: urls.clone(),
            domain_groups: Vec::new(),
        };
        let colors = assign_colors(&c, &palette, &mut fastrand::Rng::with_seed(3));
        let unique: HashSet<&String> = colors.exact.values().collect();
        assert_eq!(unique.len(), urls.len());
    }

    #[test]
    fn exact_color_wins_over_domain_color() {
        let c = Classification {
            exact_matches: vec!["https://a.com/x".into()],
            domain_groups: vec![DomainGroup {
                domain: "a.com".into(),
                urls: vec!["https://a.com/x".into(), "https://a.com/y".into()],
            }],
        };
        let palette = Palette::new(["#000001", "#000002"]).unwrap();
        let colors = assign_colors(&c, &palette, &mut fastrand::Rng::with_seed(0));
        assert_eq!(colors.color_for("https://a.com/x", &c), Some("#000001"));
        assert_eq!(colors.color_for("https://a.com/y", &c), Some("#000002"));
        assert_eq!(colors.color_for("https://b.com/", &c), None);
    }
}
