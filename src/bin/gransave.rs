//! gransave CLI: garage inspection and reward bin <-> XML conversion.

use clap::{Parser, Subcommand};
use gransave::enums::{GarageSortKey, SortOrder};
use gransave::{GarageContainer, GarageQuery, Reward, RidingCar};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "gransave", about = "Garage and reward save-record tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect a garage container block
    Garage {
        /// Garage block extracted from the save partition
        file: PathBuf,
        /// List the cars, sorted by: acquisition, tuner, country, power,
        /// weight, year, rides, pp
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long)]
        reverse: bool,
    },
    /// Reward record conversion
    Reward {
        #[command(subcommand)]
        command: RewardCommand,
    },
}

#[derive(Subcommand)]
enum RewardCommand {
    /// Binary reward record to XML mirror
    Decode {
        file: PathBuf,
        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// XML mirror to binary reward record
    Encode {
        file: PathBuf,
        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Garage {
            file,
            sort,
            reverse,
        } => {
            let data = std::fs::read(&file)?;
            let garage = GarageContainer::decode(&data)?;
            print_garage(&garage, sort.as_deref(), reverse)?;
        }
        Command::Reward {
            command: RewardCommand::Decode { file, output },
        } => {
            let data = std::fs::read(&file)?;
            let reward = Reward::from_bytes(&data)?;
            let xml = gransave::to_xml(&reward)?;
            write_output(output, xml.as_bytes())?;
        }
        Command::Reward {
            command: RewardCommand::Encode { file, output },
        } => {
            let text = std::fs::read_to_string(&file)?;
            let reward = gransave::from_xml(&text)?;
            write_output(output, &reward.to_bytes())?;
        }
    }
    Ok(())
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    match path {
        Some(path) => std::fs::write(path, data),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data)?;
            stdout.write_all(b"\n")
        }
    }
}

fn print_garage(
    garage: &GarageContainer,
    sort: Option<&str>,
    reverse: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "garage v{}.{} (car format {})",
        garage.version_major, garage.version_minor, garage.car_version
    );
    let riding = match &garage.riding_car {
        RidingCar::Long(blob) | RidingCar::Short(blob) => format!("{} bytes", blob.len()),
        RidingCar::Absent => "absent".to_string(),
    };
    println!("riding car blob: {riding}");
    println!("dlc entries: {}", garage.dlc_table.len());
    println!(
        "slots: {} used / {} max",
        garage.car_count(),
        garage.max_garage_count
    );

    let Some(sort) = sort else { return Ok(()) };
    let sort_key = GarageSortKey::from_name(sort)
        .ok_or_else(|| format!("unknown sort key '{sort}'"))?;
    let query = GarageQuery {
        sort_key,
        order: if reverse {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        },
        ..GarageQuery::default()
    };

    println!();
    println!("{:>10}  {:>10}  {:>5}  {:>6}  {:>7}  {:>6}", "garage id", "car code", "year", "power", "weight", "pp");
    for car in garage.select_cars(&query) {
        println!(
            "{:>10}  {:>10}  {:>5}  {:>6}  {:>7}  {:>6}",
            car.garage_id, car.car_code, car.year, car.power, car.weight, car.pp
        );
    }
    Ok(())
}
