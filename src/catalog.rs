//! Move and species tables compiled in by `build.rs` from `data/*.ron`.

use schema::{Move, Species};

include!(concat!(env!("OUT_DIR"), "/generated_data.rs"));
