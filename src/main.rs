use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use relgraph::config::Settings;
use relgraph::geometry::{Rect, Vec2};
use relgraph::hash_color::Palette;
use relgraph::legend::{ColorLegendEntry, legend_box_layers, legend_box_size};
use relgraph::preview::render_svg;
use relgraph::render::{DrawList, compute_draw_layers};
use relgraph::style::{Content, DrawContext, Icon, WidgetType};

/// Pixel size assumed for icons named on the command line
const CLI_ICON_SIZE: f32 = 32.0;

/// Inspect hash colors and entity widget layouts from the command line.
#[derive(Parser)]
#[command(name = "relgraph")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the palette color and shade of each key
    Color {
        /// Keys to hash (entity names, relation tags, type names)
        #[arg(required = true)]
        keys: Vec<String>,

        /// Use the dark palette
        #[arg(long)]
        dark: bool,
    },
    /// Lay out one entity widget and print its draw layers
    Render(RenderArgs),
    /// Lay out a color legend whose swatches are hash colors
    Legend {
        /// Legend title
        #[arg(long)]
        title: String,

        /// Entry labels; each gets the hash color of its text
        entries: Vec<String>,

        /// Use the dark palette and style
        #[arg(long)]
        dark: bool,

        /// Write an SVG preview to this file
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Entity label
    #[arg(long)]
    label: String,

    /// Icon id; rect widgets then use the icon+label layout
    #[arg(long)]
    icon: Option<String>,

    /// Widget shape (rect or circle); overrides the settings file
    #[arg(long)]
    shape: Option<String>,

    #[arg(long)]
    selected: bool,

    /// The entity has relations that were not fetched yet
    #[arg(long)]
    unexplored: bool,

    /// The entity is an inspection root
    #[arg(long)]
    target: bool,

    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    x: f32,

    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    y: f32,

    /// Settings file (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the layers as JSON
    #[arg(long)]
    json: bool,

    /// Write an SVG preview to this file
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn color_report(keys: &[String], dark: bool) -> String {
    let palette = Palette::from_dark_mode(dark);
    keys.iter()
        .map(|key| {
            let color = palette.color_for_key(key);
            let shade = palette.shade_for_key(key, color);
            format!("{key}\t{color}\t{shade}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_svg(list: &DrawList, font_size: f32, path: &Path) -> anyhow::Result<()> {
    let svg = render_svg(list, font_size)?;
    std::fs::write(path, svg)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote SVG preview");
    Ok(())
}

fn render(args: &RenderArgs) -> anyhow::Result<String> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let style = settings.style_bundle();
    let widget_type = args
        .shape
        .as_deref()
        .map_or(settings.widget_type, WidgetType::parse);

    let mut content = Content::text(&args.label);
    if let Some(id) = &args.icon {
        content = content.with_icon(Icon::square(id, CLI_ICON_SIZE));
    }
    let ctx = DrawContext::new(Vec2::new(args.x, args.y), &style)
        .widget_type(widget_type)
        .selected(args.selected)
        .unexplored(args.unexplored)
        .target(args.target);
    let list = compute_draw_layers(&content, &ctx, &settings.measure);

    if let Some(path) = &args.svg {
        write_svg(&list, style.content.font_size, path)?;
    }
    if args.json {
        Ok(serde_json::to_string_pretty(&list)?)
    } else {
        Ok(list.to_string())
    }
}

fn legend(
    title: &str,
    entries: &[String],
    dark: bool,
    svg: Option<&Path>,
) -> anyhow::Result<String> {
    let settings = Settings {
        dark_mode: dark,
        ..Settings::default()
    };
    let style = settings.style_bundle();
    let palette = settings.palette();
    let entries: Vec<ColorLegendEntry> = entries
        .iter()
        .map(|text| ColorLegendEntry::new(text.as_str(), palette.color_for_key(text)))
        .collect();

    let size = legend_box_size(title, &entries, &settings.measure);
    let rect = Rect::new(0.0, 0.0, size.x, size.y);
    let list = legend_box_layers(rect, title, &entries, &settings.measure, &style);

    if let Some(path) = svg {
        write_svg(&list, style.content.font_size, path)?;
    }
    Ok(list.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = match &cli.command {
        Commands::Color { keys, dark } => color_report(keys, *dark),
        Commands::Render(args) => render(args)?,
        Commands::Legend {
            title,
            entries,
            dark,
            svg,
        } => legend(title, entries, *dark, svg.as_deref())?,
    };
    println!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(command_line: &str) -> Cli {
        Cli::try_parse_from(command_line.split_whitespace()).unwrap()
    }

    #[test]
    fn cli_parses_color_subcommand() {
        let cli = parse("relgraph color Player likes --dark");
        match cli.command {
            Commands::Color { keys, dark } => {
                assert_eq!(keys, ["Player", "likes"]);
                assert!(dark);
            }
            _ => panic!("Expected Color command"),
        }
    }

    #[test]
    fn cli_color_needs_a_key() {
        assert!(Cli::try_parse_from(["relgraph", "color"]).is_err());
    }

    #[test]
    fn cli_parses_render_subcommand() {
        let cli = parse("relgraph render --label Hi --shape circle --selected --x -10 --y 5");
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.label, "Hi");
                assert_eq!(args.shape.as_deref(), Some("circle"));
                assert!(args.selected);
                assert!(!args.target);
                assert_eq!(args.x, -10.0);
                assert_eq!(args.y, 5.0);
                assert!(args.config.is_none());
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn cli_parses_legend_without_entries() {
        let cli = parse("relgraph legend --title Key");
        match cli.command {
            Commands::Legend { title, entries, .. } => {
                assert_eq!(title, "Key");
                assert!(entries.is_empty());
            }
            _ => panic!("Expected Legend command"),
        }
    }

    #[test]
    fn color_report_has_one_line_per_key() {
        let report = color_report(&["a".into(), "b".into()], false);
        assert_eq!(report.lines().count(), 2);
        assert!(report.starts_with("a\t#"));
    }

    #[test]
    fn unknown_shape_renders_rect() {
        let cli = parse("relgraph render --label x --shape hexagon");
        let Commands::Render(args) = cli.command else {
            panic!("Expected Render command");
        };
        let layers = render(&args).unwrap();
        assert!(layers.contains("outline rect("));
        assert!(!layers.contains("disc("));
    }
}
