/***************************************/
/*        3rd party libraries          */
/***************************************/
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ConfigurationError, Passenger};

/// TOML layout, one `[[passenger]]` table per request.
#[derive(Deserialize, Serialize, Clone, Default)]
struct PassengerList {
    #[serde(rename = "passenger", default)]
    passengers: Vec<Passenger>,
}

fn is_json(path: &str) -> bool {
    Path::new(path)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

/// Reads a passenger list. `.json` files hold a plain array of
/// `{"from": .., "to": ..}` objects, anything else is read as TOML.
pub fn load_passengers(path: &str) -> Result<Vec<Passenger>, ConfigurationError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_passengers(path, &text)
}

pub fn parse_passengers(path: &str, text: &str) -> Result<Vec<Passenger>, ConfigurationError> {
    let parse_error = |message: String| ConfigurationError::Parse {
        path: path.to_string(),
        message,
    };

    if is_json(path) {
        serde_json::from_str::<Vec<Passenger>>(text).map_err(|e| parse_error(e.to_string()))
    } else {
        toml::from_str::<PassengerList>(text)
            .map(|list| list.passengers)
            .map_err(|e| parse_error(e.to_string()))
    }
}

pub fn save_passengers(path: &str, passengers: &[Passenger]) -> Result<(), ConfigurationError> {
    let text = if is_json(path) {
        serde_json::to_string_pretty(passengers).map_err(|e| e.to_string())
    } else {
        let list = PassengerList {
            passengers: passengers.to_vec(),
        };
        toml::to_string(&list).map_err(|e| e.to_string())
    }
    .map_err(|message| ConfigurationError::Parse {
        path: path.to_string(),
        message,
    })?;

    fs::write(path, text).map_err(|source| ConfigurationError::Io {
        path: path.to_string(),
        source,
    })
}

/// Uniformly random requests, reproducible for a given seed.
pub fn generate_passengers(count: usize, n_floors: u32, seed: u64) -> Vec<Passenger> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Passenger::new(rng.gen_range(1..=n_floors), rng.gen_range(1..=n_floors)))
        .collect()
}

/// Every floor must lie in `1..=n_floors`.
pub fn validate_passengers(passengers: &[Passenger], n_floors: u32) -> Result<(), ConfigurationError> {
    for (index, passenger) in passengers.iter().enumerate() {
        for (field, floor) in [("from", passenger.from), ("to", passenger.to)] {
            if floor < 1 || floor > n_floors {
                return Err(ConfigurationError::FloorOutOfRange {
                    index,
                    field,
                    floor,
                    n_floors,
                });
            }
        }
    }
    Ok(())
}

/***************************************/
/*             Unit tests              */
/***************************************/
