//! # Techpack CLI
//!
//! Usage:
//!   techpack render form.json -o out/
//!   echo '{ ... }' | techpack render -o out/
//!   techpack render form.json --config layout.json -v
//!   techpack example > form.json
//!   techpack fields

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use techpack::record::{self, Field};
use techpack::registry::{FabricType, Size};
use techpack::{LayoutConfig, TechpackError};

#[derive(Parser, Debug)]
#[command(name = "techpack")]
#[command(about = "Lay out knitwear techpack order forms as A3 PDF documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a form to samo_techpack_order_form.pdf
    Render {
        /// Form JSON file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Directory to write the document into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Layout configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a sample form
    Example,

    /// List form fields and permitted values
    Fields,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            config,
        } => render(input, output, config),
        Commands::Example => {
            print!("{}", example_form_json());
            Ok(())
        }
        Commands::Fields => {
            print_fields();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

fn render(
    input_path: Option<PathBuf>,
    output_dir: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<(), TechpackError> {
    let json = match input_path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let config = match config_path {
        Some(path) => LayoutConfig::from_file(&path)?,
        None => LayoutConfig::default(),
    };

    let record = record::input::from_json(&json)?;
    let document = techpack::generate(&record, &config)?;
    let path = document.save_in(&output_dir)?;
    eprintln!("✓ Written {} bytes to {}", document.bytes.len(), path.display());
    Ok(())
}

fn print_fields() {
    println!("Fields:");
    for field in Field::ALL {
        println!("  {:<22} {}", field.name(), field.kind().describe());
    }
    println!();
    println!("Fabric types:");
    for fabric in FabricType::ALL {
        println!("  {}", fabric.label());
    }
    println!();
    println!("Sizes:");
    let sizes: Vec<&str> = Size::ALL.iter().map(|s| s.label()).collect();
    println!("  {}", sizes.join(", "));
}

fn example_form_json() -> &'static str {
    r##"{
  "category": "Knitwear",
  "modelCode": "SM-2026-014",
  "styleName": "Relaxed Crew Sweatshirt",
  "brandName": "SAMO",
  "productDescription": "Relaxed fit crew neck sweatshirt with dropped shoulders and ribbed cuffs and hem.",
  "fabricType": "iki iplik",
  "fabricContent": "80% cotton, 20% polyester, brushed back",
  "fabricGSM": 280,
  "fabricColor": "#60a5fa",
  "fabricSamplePhoto": null,
  "selectedSizes": ["S", "M", "L"],
  "totalQuantity": 1200,
  "assortiPackDetails": "Navy: S 2 / M 4 / L 2\nEcru: S 1 / M 2 / L 1",
  "inspirationPhoto": null,
  "technicalDrawing": null,
  "designSpecDetails": "Embroidered logo 6 cm wide, centred 8 cm below the neck seam.",
  "artNo": "ART-5512",
  "collectionDate": "2026-09-01",
  "backNeckLabel": "Woven main label, brand logo",
  "sewingTicket": "Size and content",
  "polyBagInfo": "Self-seal bag with suffocation warning",
  "tissuePaperInfo": "White tissue, logo sticker",
  "brandingTotalPieces": 1200,
  "sewingInstructions": "Four-thread overlock on all seams. Twin-needle coverstitch at cuffs and hem.",
  "printAppliqueInfo": "",
  "labelInfo": "Wash care label at left side seam, 30°C gentle cycle.",
  "hangTagInfo": "Recycled card hang tag with barcode.",
  "packagingInfo": "Folded, 10 pieces per carton, assorted by size.",
  "measurementsDetails": "Chest width 1 cm below armhole: S 54 / M 57 / L 60, tolerance ±1 cm."
}
"##
}
