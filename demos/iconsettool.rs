use clap::{App, Arg, SubCommand};
use iconset::{ContainerFormat, IconError, Registry};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

//===========================================================================//

fn main() {
    tracing_subscriber::fmt::init();
    let matches = App::new("iconsettool")
        .version("0.1")
        .about("Inspects and converts ICNS/ICO icon sets")
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists the icon sizes in an ICNS or ICO file")
                .arg(Arg::with_name("file").required(true)),
        )
        .subcommand(
            SubCommand::with_name("convert")
                .about("Converts an ICNS or ICO file to ICNS")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(Arg::with_name("file").required(true)),
        )
        .subcommand(
            SubCommand::with_name("resolve")
                .about("Writes a PNG of the icon at the given size")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(Arg::with_name("file").required(true))
                .arg(Arg::with_name("width").required(true))
                .arg(Arg::with_name("height")),
        )
        .get_matches();
    let registry = Registry::new();
    let result = if let Some(submatches) = matches.subcommand_matches("list") {
        let path = submatches.value_of("file").unwrap();
        list(&registry, Path::new(path))
    } else if let Some(submatches) = matches.subcommand_matches("convert") {
        let path = Path::new(submatches.value_of("file").unwrap());
        let out_path = match submatches.value_of("output") {
            Some(out) => PathBuf::from(out),
            None => path.with_extension(ContainerFormat::Icns.extension()),
        };
        convert(&registry, path, &out_path)
    } else if let Some(submatches) = matches.subcommand_matches("resolve") {
        let path = Path::new(submatches.value_of("file").unwrap());
        let width = parse_size(submatches.value_of("width").unwrap());
        let height = submatches.value_of("height").map_or(width, parse_size);
        let out_path = match submatches.value_of("output") {
            Some(out) => PathBuf::from(out),
            None => PathBuf::from(format!("{}x{}.png", width, height)),
        };
        resolve(&registry, path, width, height, &out_path)
    } else {
        eprintln!("{}", matches.usage());
        process::exit(2);
    };
    if let Err(error) = result {
        eprintln!("error: {}", error);
        process::exit(1);
    }
}

fn parse_size(value: &str) -> u32 {
    match value.parse::<u32>() {
        Ok(size) if size > 0 => size,
        _ => {
            eprintln!("error: invalid size {:?}", value);
            process::exit(2);
        }
    }
}

fn load(registry: &Registry, path: &Path) -> Result<std::sync::Arc<iconset::IconSet>, IconError> {
    let name = path.to_string_lossy();
    match registry.load_path(&name, path)? {
        Some(icons) => Ok(icons),
        None => Err(IconError::Format(format!("{} holds no PNG icons", name))),
    }
}

fn list(registry: &Registry, path: &Path) -> Result<(), IconError> {
    let icons = load(registry, path)?;
    for (index, (width, height)) in icons.sizes().into_iter().enumerate() {
        println!("{:5}: {}x{}", index, width, height);
    }
    Ok(())
}

fn convert(registry: &Registry, path: &Path, out_path: &Path) -> Result<(), IconError> {
    let icons = load(registry, path)?;
    let out_file = fs::File::create(out_path)?;
    icons.write_icns(out_file)?;
    println!("Wrote {:?}", out_path);
    Ok(())
}

fn resolve(
    registry: &Registry,
    path: &Path,
    width: u32,
    height: u32,
    out_path: &Path,
) -> Result<(), IconError> {
    let icons = load(registry, path)?;
    let scaled = !icons.has_icon(width, height);
    let icon = match icons.icon(width, height) {
        Some(icon) => icon,
        None => return Err(IconError::Format("icon set is empty".to_string())),
    };
    let out_file = fs::File::create(out_path)?;
    icon.write_png(out_file, iconset::DEFAULT_DPI)?;
    println!(
        "Wrote {}x{} icon{} to {:?}",
        width,
        height,
        if scaled { " (scaled)" } else { "" },
        out_path
    );
    Ok(())
}

//===========================================================================//
