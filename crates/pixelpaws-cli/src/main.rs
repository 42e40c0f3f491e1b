//! PixelPaws terminal front end.
//!
//! Keeps one pet in a JSON file under the user's data directory and
//! drives it through [`pixelpaws_core::Pet`].
//!
//! Usage:
//!   pixelpaws                      # show status
//!   pixelpaws act feed
//!   pixelpaws buy crown
//!   pixelpaws cycle ears --back
//!   pixelpaws watch --ticks 10

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixelpaws_core::achievement_book::AchievementBook;
use pixelpaws_core::config::load_config_or_default;
use pixelpaws_core::notice::NoticeKind;
use pixelpaws_core::{FileStore, Pet, SystemClock};
use pixelpaws_logic::achievements::AchievementId;
use pixelpaws_logic::actions::ActionKind;
use pixelpaws_logic::customization::Feature;
use pixelpaws_logic::loyalty::THEMES;
use pixelpaws_logic::shop::CATALOG;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

type CliPet = Pet<FileStore, SystemClock>;

#[derive(Parser, Debug)]
#[command(name = "pixelpaws", version, about = "Look after a tiny pixel pet")]
struct Cli {
    /// Pet data file (defaults to the user data directory)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// TOML file overriding decay, thresholds, and shop tuning
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log what the pet is doing
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show health, mood, and what the pet needs
    Status {
        /// Override the weather (sunny, rainy, snowy, stormy, cloudy, night)
        #[arg(long)]
        weather: Option<String>,
    },
    /// Perform a care action (feed, treat, fetch, pet, brush, toy)
    Act { action: String },
    /// List the accessory shop
    Shop,
    /// Buy an accessory with happiness
    Buy { item: String },
    /// Put an owned accessory on or take it off
    Equip { item: String },
    /// Show the pet's colour, features, and name
    Look,
    /// Step a feature (color, ears, face, eyes, tail) to its next option
    Cycle {
        feature: String,
        /// Step to the previous option instead
        #[arg(long)]
        back: bool,
    },
    /// Give the pet a new name
    Rename { name: String },
    /// List loyalty themes
    Themes,
    /// Switch to an unlocked theme
    Theme { key: String },
    /// List achievements
    Achievements,
    /// Write pet data as JSON to a file, or stdout
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load appearance, accessories, and health from an exported file
    Import { file: PathBuf },
    /// Restore full health (or everything, with --all)
    Reset {
        #[arg(long)]
        all: bool,
    },
    /// Keep the pet open and tick decay on an interval
    Watch {
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config_or_default(cli.config.as_deref())?;
    let path = match cli.data {
        Some(path) => path,
        None => default_data_path()?,
    };
    log::debug!("Using pet data at {:?}", path);
    let store = FileStore::open(&path)
        .with_context(|| format!("could not open pet data at {}", path.display()))?;

    let mut pet = Pet::open(store, SystemClock, config);
    let result = run(&mut pet, cli.command.unwrap_or(Command::Status { weather: None }));
    print_notices(&mut pet);
    result
}

fn default_data_path() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(dirs::home_dir)
        .context("could not find a data directory; pass --data")?;
    Ok(base.join("pixelpaws").join("pet.json"))
}

fn run(pet: &mut CliPet, command: Command) -> Result<()> {
    match command {
        Command::Status { weather } => {
            if let Some(w) = weather {
                pet.set_weather_str(&w)?;
            }
            pet.tick();
            print_status(pet);
        }
        Command::Act { action } => {
            let outcome = pet.perform_str(&action)?;
            println!(
                "{}: hunger {:+.0}, happiness {:+.0}",
                outcome.action.label(),
                outcome.hunger_gained,
                outcome.happiness_gained
            );
            print_status(pet);
        }
        Command::Shop => {
            let open = pet.is_shop_open();
            println!(
                "Shop is {} (happiness {:.0}%, opens at {:.0}%)",
                if open { "open" } else { "closed" },
                pet.health().happiness(),
                pet.config().shop.min_happiness_to_open
            );
            for item in CATALOG.iter() {
                let inv = pet.inventory();
                let tag = if inv.is_equipped(item.id) {
                    "worn"
                } else if inv.owns(item.id) {
                    "owned"
                } else {
                    ""
                };
                println!("  {:<14} {:<14} {:>3.0}  {}", item.id, item.name, item.cost, tag);
            }
        }
        Command::Buy { item } => {
            let bought = pet.purchase(&item)?;
            println!(
                "Bought the {}. Happiness is now {:.0}%.",
                bought.name,
                pet.health().happiness()
            );
        }
        Command::Equip { item } => {
            let worn = pet.toggle_equip(&item)?;
            println!("{} {}", item, if worn { "equipped" } else { "removed" });
        }
        Command::Look => print_look(pet),
        Command::Cycle { feature, back } => {
            let value = pet.cycle_feature_str(&feature, !back)?;
            println!("{} is now {}", feature, value);
        }
        Command::Rename { name } => {
            pet.rename(&name);
            println!("Say hello to {}!", pet.appearance().name());
        }
        Command::Themes => {
            let cal = pet.calendar();
            println!("Visit day {} of {}", cal.visit_days(), THEMES.len());
            for theme in THEMES.iter() {
                let marker = if theme.key == cal.active_theme() {
                    "*"
                } else if theme.unlocked_day <= cal.visit_days() {
                    " "
                } else {
                    "-"
                };
                println!(
                    "  {} {:<7} {:<16} day {}",
                    marker, theme.key, theme.name, theme.unlocked_day
                );
            }
        }
        Command::Theme { key } => {
            let theme = pet.select_theme(&key)?;
            println!("Theme set to {}", theme.name);
        }
        Command::Achievements => print_achievements(pet.achievements()),
        Command::Export { out } => {
            let json = pet.export()?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("could not write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Import { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("could not read {}", file.display()))?;
            pet.import(&raw)?;
            print_status(pet);
        }
        Command::Reset { all } => {
            if all {
                pet.reset_all();
            } else {
                pet.reset_health();
            }
            print_status(pet);
        }
        Command::Watch { ticks } => watch(pet, ticks),
    }
    Ok(())
}

fn watch(pet: &mut CliPet, ticks: Option<u64>) {
    let interval = Duration::from_secs(pet.config().tick_interval_secs.max(1));
    println!("Watching (tick every {}s, Ctrl-C to stop)", interval.as_secs());
    let mut n = 0;
    loop {
        pet.tick();
        let h = pet.health();
        println!(
            "[{:>4}] {:<7} {:>3.0}%  hunger {:>5.1}  happiness {:>5.1}",
            n,
            h.status().label(),
            h.percentage(),
            h.hunger(),
            h.happiness()
        );
        print_notices(pet);
        n += 1;
        if ticks.is_some_and(|max| n >= max) {
            break;
        }
        thread::sleep(interval);
    }
}

fn print_status(pet: &mut CliPet) {
    let report = pet.report();
    println!(
        "{} is {} [{}] {}%  ({})",
        pet.appearance().name(),
        report.status_label(),
        report.band.hex(),
        report.percentage,
        report.mood
    );
    println!(
        "  hunger {:.1}  happiness {:.1}",
        report.hunger, report.happiness
    );
    if !report.required_actions.is_empty() {
        println!("  to feel better: {}", report.required_actions.join(", "));
    }
    let equipped = pet.inventory().equipped();
    if !equipped.is_empty() {
        println!("  wearing: {}", equipped.join(", "));
    }
    println!("  \"{}\"", report.speech);
}

fn print_look(pet: &CliPet) {
    let look = pet.appearance().look();
    println!("{} ({} {})", look.name, look.color, look.color_hex());
    for feature in Feature::ALL {
        println!("  {:<6} {}", feature.as_str(), look.get(feature));
    }
}

fn print_achievements(book: &AchievementBook) {
    for id in AchievementId::ALL {
        match book.unlocked_at(id) {
            Some(at) => println!("  ★ {:<18} {}  ({})", id.name(), id.description(), at),
            None => println!("  ☆ {:<18} {}", id.name(), id.description()),
        }
    }
}

fn print_notices(pet: &mut CliPet) {
    for notice in pet.drain_notices() {
        let prefix = match notice.kind {
            NoticeKind::Info => "·",
            NoticeKind::Celebration => "🎉",
            NoticeKind::Warning => "!",
        };
        eprintln!("{} {}", prefix, notice.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::parse_from(["pixelpaws", "--data", "/tmp/p.json", "act", "feed"]);
        assert!(matches!(cli.command, Some(Command::Act { ref action }) if action == "feed"));
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/p.json")));

        let cli = Cli::parse_from(["pixelpaws"]);
        assert!(cli.command.is_none());

        let cli = Cli::parse_from(["pixelpaws", "reset", "--all", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Command::Reset { all: true })));
    }

    #[test]
    fn test_cycle_parses() {
        let cli = Cli::parse_from(["pixelpaws", "cycle", "ears", "--back"]);
        assert!(matches!(
            cli.command,
            Some(Command::Cycle { ref feature, back: true }) if feature == "ears"
        ));
        let cli = Cli::parse_from(["pixelpaws", "rename", "Mochi"]);
        assert!(matches!(cli.command, Some(Command::Rename { ref name }) if name == "Mochi"));
    }

    #[test]
    fn test_feature_names_match_help() {
        for name in ["color", "ears", "face", "eyes", "tail"] {
            assert!(name.parse::<Feature>().is_ok(), "{name}");
        }
    }

    #[test]
    fn test_action_names_match_help() {
        for name in ["feed", "treat", "fetch", "pet", "brush", "toy", "play"] {
            assert!(name.parse::<ActionKind>().is_ok(), "{name}");
        }
    }
}
