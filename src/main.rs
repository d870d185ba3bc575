use ribbons::{RibbonConfig, Viewer};

fn main() {
    // `ribbons [COUNT] [SEGMENTS]`
    let mut args = std::env::args().skip(1);
    let mut config = RibbonConfig::default();
    if let Some(count) = args.next().and_then(|s| s.parse().ok()) {
        config = config.with_ribbons_count(count);
    }
    if let Some(segments) = args.next().and_then(|s| s.parse().ok()) {
        config = config.with_segment_count(segments);
    }

    if let Err(e) = Viewer::new(config).run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
