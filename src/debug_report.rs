use aocvp::{Conversion, Dataset};
use std::collections::BTreeMap;
use std::path::Path;

mod ansi {
    const RESET: &str = "\x1b[0m";

    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    /// Wraps text in an SGR code when color output is on.
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, code: &str) -> String {
            if self.enabled { format!("{code}{}{RESET}", s.as_ref()) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_summary(output: &Path, conversion: &Conversion, color: bool) {
    let palette = ansi::Palette::new(color);
    let context = &conversion.document.view_point_context;
    println!("\n{}", palette.paint(palette.paint(format!("⚙  Wrote: {}", output.display()), ansi::CYAN), ansi::BOLD));

    println!("\n{}", palette.paint("━━━ Context ━━━", ansi::GRAY));
    println!(
        "  AOC {}  │  generated {}",
        palette.paint(context.aoc_version.as_deref().unwrap_or("?"), ansi::GREEN),
        palette.paint(context.time_now.as_deref().unwrap_or("?"), ansi::DIM),
    );
    for dataset in &context.datasets {
        print_dataset(dataset, &palette);
    }
    match context.common_time_duration {
        Some(seconds) => {
            println!("  {} {}", palette.paint("common time:", ansi::DIM), palette.paint(format!("{seconds:.3}s"), ansi::GREEN))
        }
        None => println!("  {}", palette.paint("no common time window", ansi::DIM)),
    }

    println!("\n{}", palette.paint("━━━ View Points ━━━", ansi::GRAY));
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for vp in &conversion.document.view_points {
        *counts.entry(vp.kind.label()).or_default() += 1;
    }
    if counts.is_empty() {
        println!("{}", palette.paint("  No view points produced", ansi::DIM));
    }
    for (label, count) in &counts {
        println!("  {} {}", palette.paint(format!("{count:>5}"), ansi::YELLOW), palette.paint(label, ansi::BLUE));
    }
    let total = format!("{:>5}", conversion.document.view_points.len());
    println!("  {} {}", palette.paint(total, ansi::BOLD), palette.paint("total", ansi::DIM));

    if !conversion.diagnostics.is_empty() {
        println!("\n{}", palette.paint("━━━ Diagnostics ━━━", ansi::GRAY));
        for diagnostic in &conversion.diagnostics {
            println!("  {} {}", palette.paint("•", ansi::YELLOW), diagnostic);
        }
    }
    println!();
}

fn print_dataset(dataset: &Dataset, palette: &ansi::Palette) {
    let sensor = match dataset.sensor_identity() {
        Some(id) => format!("{:02X}/{:02X}", id.sac, id.sic),
        None => "-".to_string(),
    };
    let window = match dataset.time_window() {
        Some((start, end)) => format!("{start:.3}..{end:.3}"),
        None => "-".to_string(),
    };
    println!(
        "  {} {}  {} {}  {} {}  {} {}",
        palette.paint(format!("{:<13}", dataset.name), ansi::BLUE),
        palette.paint(&dataset.ds_name, ansi::BOLD),
        palette.paint("file:", ansi::DIM),
        dataset.filename.as_deref().unwrap_or("-"),
        palette.paint("sac/sic:", ansi::DIM),
        palette.paint(sensor, ansi::CYAN),
        palette.paint("window:", ansi::DIM),
        palette.paint(window, ansi::YELLOW),
    );
    if let Some(over) = &dataset.sensor_override {
        println!(
            "  {:<13} {} {}",
            "",
            palette.paint("override:", ansi::DIM),
            palette.paint(format!("{:02X}/{:02X}", over.ds_sac_override, over.ds_sic_override), ansi::CYAN)
        );
    }
}
