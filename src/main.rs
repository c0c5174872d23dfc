//! Command-line front end: probe an image, apply a view, place or import
//! markers, and print what a viewer would draw.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use medmark::config::ConfigError;
    use medmark::format::FormatError;
    use medmark::geometry::{Point, Size};
    use medmark::render::{DrawList, popup_position};
    use medmark::session::{ImportOutcome, NameMismatch};
    use medmark::{LoadedImage, NoteFile, ViewerConfig, ViewerError, ViewerMessage, ViewerSession};

    /// Window size assumed when placing the hover card.
    const WINDOW_SIZE: Size = Size::new(1920.0, 1080.0);
    /// Rough hover card footprint.
    const HOVER_CARD_SIZE: Size = Size::new(220.0, 90.0);

    #[derive(Debug, thiserror::Error)]
    enum CliError {
        #[error("{0}")]
        Config(#[from] ConfigError),
        #[error("{0}")]
        Viewer(#[from] ViewerError),
        #[error("{0}")]
        Format(#[from] FormatError),
    }

    #[derive(Parser, Debug)]
    #[command(name = "medmark", version, about = "Point annotations for medical images")]
    struct Cli {
        /// Image file to annotate
        image: PathBuf,

        /// Note file to import before placing new markers
        #[arg(long)]
        note: Option<PathBuf>,

        /// Import the note even if it was made for another image
        #[arg(long, short = 'y')]
        yes: bool,

        /// Zoom factor
        #[arg(long)]
        scale: Option<f64>,

        /// Rotation in degrees, clockwise
        #[arg(long, allow_negative_numbers = true)]
        rotate: Option<f64>,

        /// Pan offset in screen pixels
        #[arg(long, value_name = "DX,DY", value_parser = parse_point, allow_hyphen_values = true)]
        pan: Option<Point>,

        /// Place a marker at a screen point (repeatable)
        #[arg(long = "mark", value_name = "SX,SY", value_parser = parse_point, allow_hyphen_values = true)]
        marks: Vec<Point>,

        /// Show the hover card for the marker under a screen point
        #[arg(long, value_name = "SX,SY", value_parser = parse_point, allow_hyphen_values = true)]
        hover: Option<Point>,

        /// Write `<image>.note` into this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Configuration file (defaults to the user config directory)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    }

    fn parse_point(value: &str) -> Result<Point, String> {
        let (x, y) = value
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y, got '{}'", value))?;
        let parse = |s: &str| {
            let v = s
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate '{}': {}", s.trim(), e))?;
            if v.is_finite() {
                Ok(v)
            } else {
                Err(format!("coordinate '{}' is not finite", s.trim()))
            }
        };
        Ok(Point::new(parse(x)?, parse(y)?))
    }

    fn load_config(path: Option<&PathBuf>) -> Result<ViewerConfig, ConfigError> {
        match path {
            Some(path) => ViewerConfig::load_from(path),
            None => Ok(ViewerConfig::load_from_default_path().unwrap_or_default()),
        }
    }

    fn init_logging(config: &ViewerConfig) {
        env_logger::Builder::new()
            .filter_level(config.log_level.to_level_filter())
            .parse_default_env()
            .init();
    }

    /// Ask on stdin whether to apply a note made for another image.
    fn confirm_on_stdin(mismatch: &NameMismatch) -> bool {
        print!(
            "Note was made for '{}' but '{}' is open. Import anyway? [y/N] ",
            mismatch.note_image, mismatch.current_image
        );
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                log::warn!("Could not read answer: {}", e);
                false
            }
        }
    }

    fn print_markers(session: &ViewerSession) {
        println!("{} marker(s) on '{}'", session.markers().len(), image_name(session));
        for (index, marker) in session.markers().iter().enumerate() {
            let screen = session
                .image_to_screen(marker.position())
                .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
                .unwrap_or_default();
            println!(
                "  {:>3}  {:<12} {}  pixel ({:.1}, {:.1})  screen {}  {}",
                index + 1,
                marker.display_name(index),
                marker.color,
                marker.x,
                marker.y,
                screen,
                marker.desc
            );
        }
    }

    fn print_draw_list(session: &ViewerSession) {
        let mut list = DrawList::new();
        session.render(&mut list);
        println!("draw list:");
        for glyph in list.glyphs() {
            println!(
                "  marker {} at ({:.1}, {:.1}) size {:.1} {}{}",
                glyph.index,
                glyph.position.x,
                glyph.position.y,
                glyph.size,
                glyph.color,
                if glyph.emphasized { " [hover]" } else { "" }
            );
        }
    }

    fn image_name(session: &ViewerSession) -> &str {
        session.image().map(|i| i.name.as_str()).unwrap_or_default()
    }

    fn run(cli: Cli) -> Result<(), CliError> {
        let config = load_config(cli.config.as_ref())?;
        init_logging(&config);

        let image = LoadedImage::probe(&cli.image, config.viewport_size())?;
        let mut session = ViewerSession::new(config);
        session.update(ViewerMessage::ImageLoaded(image))?;

        if let Some(path) = &cli.note {
            let note = NoteFile::read_from(path)?;
            let yes = cli.yes;
            match session.import_note(note, |m| yes || confirm_on_stdin(m))? {
                ImportOutcome::Applied(count) => println!("Imported {} marker(s)", count),
                ImportOutcome::Declined => println!("Import cancelled"),
            }
        }

        if let Some(scale) = cli.scale {
            session.update(ViewerMessage::SetScale(scale))?;
        }
        if let Some(degrees) = cli.rotate {
            session.update(ViewerMessage::SetRotation(degrees))?;
        }
        if let Some(pan) = cli.pan {
            session.pan_by(pan.x, pan.y);
        }

        for mark in &cli.marks {
            match session.update(ViewerMessage::SecondaryClick(*mark)) {
                Ok(()) => {}
                Err(e @ ViewerError::OutsideImage { .. }) => {
                    log::warn!("Skipping mark at ({}, {}): {}", mark.x, mark.y, e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(pos) = cli.hover {
            session.update(ViewerMessage::PointerMove(pos))?;
            match session.hover_card() {
                Some(card) => {
                    let at = popup_position(pos, HOVER_CARD_SIZE, WINDOW_SIZE);
                    println!("hover card at ({:.1}, {:.1}):", at.x, at.y);
                    println!("  {}", card.title);
                    println!("  {}", card.description);
                    println!("  created: {}", card.created);
                    println!("  updated: {}", card.updated);
                }
                None => println!("no marker under ({}, {})", pos.x, pos.y),
            }
        }

        print_markers(&session);
        print_draw_list(&session);

        if let Some(dir) = &cli.export {
            let path = session.export_note()?.write_to_dir(dir)?;
            println!("Exported note to {}", path.display());
        }
        Ok(())
    }

    pub fn main() -> ExitCode {
        match run(Cli::parse()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_point() {
            assert_eq!(parse_point("50,-30").unwrap(), Point::new(50.0, -30.0));
            assert_eq!(parse_point(" 1.5 , 2 ").unwrap(), Point::new(1.5, 2.0));
            assert!(parse_point("50").is_err());
            assert!(parse_point("a,b").is_err());
            assert!(parse_point("nan,0").is_err());
            assert!(parse_point("0,inf").is_err());
        }

        #[test]
        fn test_cli_arguments() {
            let cli = Cli::try_parse_from([
                "medmark", "scan.png", "--scale", "2", "--rotate", "-90", "--pan", "50,-30",
                "--mark", "400,300", "--mark", "410,300",
            ])
            .unwrap();
            assert_eq!(cli.image, PathBuf::from("scan.png"));
            assert_eq!(cli.scale, Some(2.0));
            assert_eq!(cli.rotate, Some(-90.0));
            assert_eq!(cli.pan, Some(Point::new(50.0, -30.0)));
            assert_eq!(cli.marks.len(), 2);
            assert!(!cli.yes);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
