// Compiles data/moves.ron and data/species.ron into postcard blobs plus
// phf name tables, written to $OUT_DIR/generated_data.rs.

use schema::catalog::{self, normalize_name};
use schema::{MoveData, SpeciesData};
use std::env;
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const MOVES_PATH: &str = "data/moves.ron";
const SPECIES_PATH: &str = "data/species.ron";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed={MOVES_PATH}");
    println!("cargo:rerun-if-changed={SPECIES_PATH}");
    println!("cargo:rerun-if-changed=build.rs");

    let moves: Vec<MoveData> = ron::from_str(&fs::read_to_string(MOVES_PATH)?)?;
    let species: Vec<SpeciesData> = ron::from_str(&fs::read_to_string(SPECIES_PATH)?)?;

    catalog::validate_moves(&moves)?;
    catalog::validate_species(&species)?;

    let mut generated = String::new();
    writeln!(generated, "// @generated by build.rs from {MOVES_PATH} and {SPECIES_PATH}")?;

    let move_bytes = catalog::encode(&moves)?;
    writeln!(generated, "pub static COMPILED_MOVE_DATA: &[u8] = &{:?};", move_bytes)?;

    let species_bytes = catalog::encode(&species)?;
    writeln!(generated, "pub static COMPILED_SPECIES_DATA: &[u8] = &{:?};", species_bytes)?;

    let mut move_names = phf_codegen::Map::new();
    for data in &moves {
        move_names.entry(normalize_name(&data.name), &format!("Move::{:?}", data.id));
    }
    writeln!(
        generated,
        "pub static MOVE_NAMES: phf::Map<&'static str, Move> = {};",
        move_names.build()
    )?;

    let mut species_names = phf_codegen::Map::new();
    for data in &species {
        species_names.entry(normalize_name(&data.name), &format!("Species::{:?}", data.id));
    }
    writeln!(
        generated,
        "pub static SPECIES_NAMES: phf::Map<&'static str, Species> = {};",
        species_names.build()
    )?;

    let out_path = Path::new(&env::var("OUT_DIR")?).join("generated_data.rs");
    fs::write(out_path, generated)?;
    Ok(())
}
