use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use rastermeta::tiff::TagId;
use rastermeta::{GeoImageReader, GeoKeyDirectory, GeoKeyId, TiffReader};

#[derive(Parser, Debug)]
#[command(
    name = "rastermeta",
    version,
    about = "Read-only GeoTIFF metadata queries: geo keys, key info, and raw tag fields"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show file structure and every geo key
    Info {
        /// GeoTIFF file to inspect
        file: PathBuf,
    },
    /// Print the scalar code stored under a geo key
    Key {
        /// GeoTIFF file to inspect
        file: PathBuf,
        /// Geo key id (GeoTIFF key space, e.g. 3072 for ProjectedCSType)
        key: u16,
    },
    /// Print value count and value type of a geo key
    KeyInfo {
        /// GeoTIFF file to inspect
        file: PathBuf,
        /// Geo key id (GeoTIFF key space)
        key: u16,
    },
    /// Print the floating point values of a raw TIFF tag
    Field {
        /// GeoTIFF file to inspect
        file: PathBuf,
        /// Tag id (TIFF tag space, e.g. 33550 for ModelPixelScale)
        tag: u16,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Info { file } => {
            let mut reader = TiffReader::open(&file)?;
            let tiff = reader.read()?;
            println!("{}", tiff);

            if let Some(ifd) = tiff.main_ifd() {
                match GeoKeyDirectory::parse(ifd, &mut reader)? {
                    Some(directory) => print!("{}", directory),
                    None => println!("No geo key directory present"),
                }
            }
        }
        Command::Key { file, key } => {
            let mut geo = GeoImageReader::new();
            geo.open(&file)?;
            println!("{}", geo.geo_key(GeoKeyId(key))?);
        }
        Command::KeyInfo { file, key } => {
            let mut geo = GeoImageReader::new();
            geo.open(&file)?;
            let info = geo.geo_key_info(GeoKeyId(key))?;
            println!("count: {}, type: {}", info.count, info.value_type.name());
        }
        Command::Field { file, tag } => {
            let mut geo = GeoImageReader::new();
            geo.open(&file)?;
            let values = geo.geo_field(TagId(tag))?;
            let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            println!("{}", rendered.join(" "));
        }
    }

    Ok(())
}
