use clap::Parser;
use hugo_outliner::creator::HugoCreator;
use hugo_outliner::outline::Outline;
use hugo_outliner::scaffold::{self, Site};
use hugo_outliner::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "outliner")]
#[command(about = "Scaffold a Hugo documentation tree from a JSON outline")]
#[command(long_about = "\
Scaffold a Hugo documentation tree from a JSON outline

Each chapter and section becomes an index page created with `hugo new`,
then its front matter gets the outline's title, a numbering prefix and a
sort weight.

Outline format:

  {
    \"Chapters\": [
      {
        \"Name\": \"intro\",             # directory name: letters, digits, _
        \"Title\": \"Introduction\",
        \"Weight\": 10,                 # optional; all siblings or none
        \"Sections\": [
          { \"Name\": \"install\", \"Title\": \"Installation\" }
        ]
      }
    ]
  }

Resulting files (locale \"ja\"):

  content/
  └── intro/
      ├── _index.ja.md                 # pre = \"<b>1. </b>\",   weight = 10
      └── install/
          └── _index.ja.md             # pre = \"<b>1.1. </b>\", weight = 1

Run from the Hugo site root, or pass --site. Settings are read from
outliner.toml in the site root; run with --gen-config for a documented copy.")]
#[command(version)]
struct Cli {
    /// Outline JSON file
    #[arg(required_unless_present = "gen_config")]
    outline: Option<PathBuf>,

    /// Hugo site root
    #[arg(long, default_value = ".")]
    site: PathBuf,

    /// Validate the outline and print the planned files without running Hugo
    #[arg(long)]
    check: bool,

    /// Print a stock outliner.toml with all options documented
    #[arg(long, conflicts_with_all = ["outline", "check"])]
    gen_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let Some(outline_path) = cli.outline else {
        return Err("an outline file is required".into());
    };
    let outline = Outline::load(&outline_path)?;
    let site = Site::new(cli.site.clone(), config::load_config(&cli.site)?);

    if cli.check {
        println!("==> Checking {}", outline_path.display());
        let planned = scaffold::plan(&outline, &site.config)?;
        output::print_plan(&planned);
        println!("==> Outline is valid");
        return Ok(());
    }

    println!(
        "==> Scaffolding {} into {}",
        outline_path.display(),
        site.content_root().display()
    );
    let creator = HugoCreator::new(&site.config.generator, &site.root);
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_event(&event);
        }
    });
    let result = scaffold::scaffold(&site, &outline, &creator, Some(tx));
    printer.join().unwrap();
    let summary = result?;
    output::print_summary(&summary);

    Ok(())
}
